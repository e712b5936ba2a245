//! Company record.

use super::{apply, timestamp_now, Entity, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An organization tracked by the CRM.
///
/// `*_id` fields reference lookup values owned by the UI layer (categories,
/// connection strengths, revenue buckets); the store keeps them opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub logo: Option<String>,
    pub name: String,
    pub domain: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub category_ids: Option<Vec<String>>,
    pub contact_ids: Option<Vec<String>>,
    pub address: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub angel_list: Option<String>,
    pub linkedin: Option<String>,
    pub connection_strength_id: Option<String>,
    pub x: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub telegram: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub founded_at: Option<Timestamp>,
    pub estimated_arr_id: Option<String>,
    pub employee_range_id: Option<String>,
    pub last_interaction_at: Option<Timestamp>,
    /// Display text, stored as given.
    pub last_contacted: Option<String>,
    pub team_id: Option<String>,
    /// Opaque structured badge rendered by the UI. A JSON `null` badge is
    /// stored as NULL and reads back as `None`.
    pub badge: Option<Value>,
}

impl Company {
    /// Creates a company with only the required fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = timestamp_now();
        Self {
            id: id.into(),
            logo: None,
            name: name.into(),
            domain: None,
            email: None,
            phone: None,
            description: None,
            category_ids: None,
            contact_ids: None,
            address: None,
            state: None,
            city: None,
            zip: None,
            country: None,
            angel_list: None,
            linkedin: None,
            connection_strength_id: None,
            x: None,
            instagram: None,
            facebook: None,
            telegram: None,
            created_at: now,
            updated_at: now,
            founded_at: None,
            estimated_arr_id: None,
            employee_range_id: None,
            last_interaction_at: None,
            last_contacted: None,
            team_id: None,
            badge: None,
        }
    }
}

/// Partial update for [`Company`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyPatch {
    pub logo: Option<Option<String>>,
    pub name: Option<String>,
    pub domain: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub category_ids: Option<Option<Vec<String>>>,
    pub contact_ids: Option<Option<Vec<String>>>,
    pub address: Option<Option<String>>,
    pub state: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub zip: Option<Option<String>>,
    pub country: Option<Option<String>>,
    pub angel_list: Option<Option<String>>,
    pub linkedin: Option<Option<String>>,
    pub connection_strength_id: Option<Option<String>>,
    pub x: Option<Option<String>>,
    pub instagram: Option<Option<String>>,
    pub facebook: Option<Option<String>>,
    pub telegram: Option<Option<String>>,
    pub founded_at: Option<Option<Timestamp>>,
    pub estimated_arr_id: Option<Option<String>>,
    pub employee_range_id: Option<Option<String>>,
    pub last_interaction_at: Option<Option<Timestamp>>,
    pub last_contacted: Option<Option<String>>,
    pub team_id: Option<Option<String>>,
    pub badge: Option<Option<Value>>,
}

impl Entity for Company {
    type Patch = CompanyPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn merge(&mut self, patch: CompanyPatch) {
        let CompanyPatch {
            logo,
            name,
            domain,
            email,
            phone,
            description,
            category_ids,
            contact_ids,
            address,
            state,
            city,
            zip,
            country,
            angel_list,
            linkedin,
            connection_strength_id,
            x,
            instagram,
            facebook,
            telegram,
            founded_at,
            estimated_arr_id,
            employee_range_id,
            last_interaction_at,
            last_contacted,
            team_id,
            badge,
        } = patch;

        apply(&mut self.logo, logo);
        apply(&mut self.name, name);
        apply(&mut self.domain, domain);
        apply(&mut self.email, email);
        apply(&mut self.phone, phone);
        apply(&mut self.description, description);
        apply(&mut self.category_ids, category_ids);
        apply(&mut self.contact_ids, contact_ids);
        apply(&mut self.address, address);
        apply(&mut self.state, state);
        apply(&mut self.city, city);
        apply(&mut self.zip, zip);
        apply(&mut self.country, country);
        apply(&mut self.angel_list, angel_list);
        apply(&mut self.linkedin, linkedin);
        apply(&mut self.connection_strength_id, connection_strength_id);
        apply(&mut self.x, x);
        apply(&mut self.instagram, instagram);
        apply(&mut self.facebook, facebook);
        apply(&mut self.telegram, telegram);
        apply(&mut self.founded_at, founded_at);
        apply(&mut self.estimated_arr_id, estimated_arr_id);
        apply(&mut self.employee_range_id, employee_range_id);
        apply(&mut self.last_interaction_at, last_interaction_at);
        apply(&mut self.last_contacted, last_contacted);
        apply(&mut self.team_id, team_id);
        apply(&mut self.badge, badge);
    }

    fn set_updated_at(&mut self, at: Timestamp) {
        self.updated_at = at;
    }
}
