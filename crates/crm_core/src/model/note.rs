//! Note record.

use super::{apply, timestamp_now, Entity, Timestamp};
use serde::{Deserialize, Serialize};

/// A dated note attached to contacts and companies.
///
/// Unlike tasks and deals, `assigned_contact_ids` and `company_ids` are
/// always present (possibly empty) and `status` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_by: String,
    pub due_at: Timestamp,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub assigned_contact_ids: Vec<String>,
    pub company_ids: Vec<String>,
    pub deal_ids: Option<Vec<String>>,
    pub completed_at: Option<Timestamp>,
    pub completed_by: Option<String>,
    pub logo: Option<String>,
}

impl Note {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        created_by: impl Into<String>,
        due_at: Timestamp,
        status: impl Into<String>,
    ) -> Self {
        let now = timestamp_now();
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            created_by: created_by.into(),
            due_at,
            status: status.into(),
            created_at: now,
            updated_at: now,
            assigned_contact_ids: Vec::new(),
            company_ids: Vec::new(),
            deal_ids: None,
            completed_at: None,
            completed_by: None,
            logo: None,
        }
    }
}

/// Partial update for [`Note`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub created_by: Option<String>,
    pub due_at: Option<Timestamp>,
    pub status: Option<String>,
    pub assigned_contact_ids: Option<Vec<String>>,
    pub company_ids: Option<Vec<String>>,
    pub deal_ids: Option<Option<Vec<String>>>,
    pub completed_at: Option<Option<Timestamp>>,
    pub completed_by: Option<Option<String>>,
    pub logo: Option<Option<String>>,
}

impl Entity for Note {
    type Patch = NotePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn merge(&mut self, patch: NotePatch) {
        let NotePatch {
            title,
            content,
            created_by,
            due_at,
            status,
            assigned_contact_ids,
            company_ids,
            deal_ids,
            completed_at,
            completed_by,
            logo,
        } = patch;

        apply(&mut self.title, title);
        apply(&mut self.content, content);
        apply(&mut self.created_by, created_by);
        apply(&mut self.due_at, due_at);
        apply(&mut self.status, status);
        apply(&mut self.assigned_contact_ids, assigned_contact_ids);
        apply(&mut self.company_ids, company_ids);
        apply(&mut self.deal_ids, deal_ids);
        apply(&mut self.completed_at, completed_at);
        apply(&mut self.completed_by, completed_by);
        apply(&mut self.logo, logo);
    }

    fn set_updated_at(&mut self, at: Timestamp) {
        self.updated_at = at;
    }
}
