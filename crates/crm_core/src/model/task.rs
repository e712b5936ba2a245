//! Task record.

use super::{apply, timestamp_now, Entity, Timestamp};
use serde::{Deserialize, Serialize};

/// An actionable item; shaped like a deal without the money fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub content: String,
    pub company_ids: Option<Vec<String>>,
    pub contact_ids: Option<Vec<String>>,
    pub deal_ids: Option<Vec<String>>,
    pub created_by: String,
    pub due_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub completed_by: Option<String>,
    pub assigned_contact_ids: Option<Vec<String>>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        created_by: impl Into<String>,
        due_at: Timestamp,
    ) -> Self {
        let now = timestamp_now();
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            company_ids: None,
            contact_ids: None,
            deal_ids: None,
            created_by: created_by.into(),
            due_at,
            completed_at: None,
            completed_by: None,
            assigned_contact_ids: None,
            status: None,
            priority: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for [`Task`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub company_ids: Option<Option<Vec<String>>>,
    pub contact_ids: Option<Option<Vec<String>>>,
    pub deal_ids: Option<Option<Vec<String>>>,
    pub created_by: Option<String>,
    pub due_at: Option<Timestamp>,
    pub completed_at: Option<Option<Timestamp>>,
    pub completed_by: Option<Option<String>>,
    pub assigned_contact_ids: Option<Option<Vec<String>>>,
    pub status: Option<Option<String>>,
    pub priority: Option<Option<String>>,
}

impl Entity for Task {
    type Patch = TaskPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn merge(&mut self, patch: TaskPatch) {
        let TaskPatch {
            title,
            content,
            company_ids,
            contact_ids,
            deal_ids,
            created_by,
            due_at,
            completed_at,
            completed_by,
            assigned_contact_ids,
            status,
            priority,
        } = patch;

        apply(&mut self.title, title);
        apply(&mut self.content, content);
        apply(&mut self.company_ids, company_ids);
        apply(&mut self.contact_ids, contact_ids);
        apply(&mut self.deal_ids, deal_ids);
        apply(&mut self.created_by, created_by);
        apply(&mut self.due_at, due_at);
        apply(&mut self.completed_at, completed_at);
        apply(&mut self.completed_by, completed_by);
        apply(&mut self.assigned_contact_ids, assigned_contact_ids);
        apply(&mut self.status, status);
        apply(&mut self.priority, priority);
    }

    fn set_updated_at(&mut self, at: Timestamp) {
        self.updated_at = at;
    }
}
