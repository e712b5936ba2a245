//! Contact record.

use super::{apply, timestamp_now, Entity, Timestamp};
use serde::{Deserialize, Serialize};

/// Named social profile links; every link is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
}

/// A person tracked by the CRM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    /// Avatar image path; empty when the UI should fall back to initials.
    #[serde(default)]
    pub avatar: String,
    pub initials: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    /// Free-text employer name, not a company id.
    pub company: Option<String>,
    pub address: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub social_links: Option<SocialLinks>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub logo: Option<String>,
}

impl Contact {
    /// Creates a contact with only the required fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = timestamp_now();
        Self {
            id: id.into(),
            avatar: String::new(),
            initials: None,
            name: name.into(),
            email: None,
            phone: None,
            position: None,
            company: None,
            address: None,
            state: None,
            city: None,
            zip: None,
            country: None,
            social_links: None,
            created_at: now,
            updated_at: now,
            logo: None,
        }
    }
}

/// Partial update for [`Contact`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub avatar: Option<String>,
    pub initials: Option<Option<String>>,
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub position: Option<Option<String>>,
    pub company: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub state: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub zip: Option<Option<String>>,
    pub country: Option<Option<String>>,
    pub social_links: Option<Option<SocialLinks>>,
    pub logo: Option<Option<String>>,
}

impl Entity for Contact {
    type Patch = ContactPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn merge(&mut self, patch: ContactPatch) {
        let ContactPatch {
            avatar,
            initials,
            name,
            email,
            phone,
            position,
            company,
            address,
            state,
            city,
            zip,
            country,
            social_links,
            logo,
        } = patch;

        apply(&mut self.avatar, avatar);
        apply(&mut self.initials, initials);
        apply(&mut self.name, name);
        apply(&mut self.email, email);
        apply(&mut self.phone, phone);
        apply(&mut self.position, position);
        apply(&mut self.company, company);
        apply(&mut self.address, address);
        apply(&mut self.state, state);
        apply(&mut self.city, city);
        apply(&mut self.zip, zip);
        apply(&mut self.country, country);
        apply(&mut self.social_links, social_links);
        apply(&mut self.logo, logo);
    }

    fn set_updated_at(&mut self, at: Timestamp) {
        self.updated_at = at;
    }
}

#[cfg(test)]
mod tests {
    use super::{Contact, ContactPatch, SocialLinks};
    use crate::model::Entity;

    #[test]
    fn merge_replaces_only_present_fields() {
        let mut contact = Contact {
            email: Some("jane@x.com".to_string()),
            phone: Some("555".to_string()),
            ..Contact::new("c1", "Jane")
        };

        contact.merge(ContactPatch {
            email: Some(Some("new@x.com".to_string())),
            phone: Some(None),
            social_links: Some(Some(SocialLinks {
                github: Some("jane".to_string()),
                ..SocialLinks::default()
            })),
            ..ContactPatch::default()
        });

        assert_eq!(contact.name, "Jane");
        assert_eq!(contact.email.as_deref(), Some("new@x.com"));
        assert_eq!(contact.phone, None);
        assert_eq!(
            contact.social_links.and_then(|links| links.github).as_deref(),
            Some("jane")
        );
    }

    #[test]
    fn social_links_serialize_without_absent_keys() {
        let links = SocialLinks {
            linkedin: Some("in/jane".to_string()),
            ..SocialLinks::default()
        };
        let json = serde_json::to_string(&links).unwrap();
        assert_eq!(json, r#"{"linkedin":"in/jane"}"#);
    }
}
