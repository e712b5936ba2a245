//! Deal record.

use super::{apply, timestamp_now, Entity, Timestamp};
use serde::{Deserialize, Serialize};

/// A sales opportunity owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: String,
    pub title: String,
    pub content: String,
    pub company_ids: Option<Vec<String>>,
    pub contact_ids: Option<Vec<String>>,
    pub deal_ids: Option<Vec<String>>,
    /// Owner of the deal.
    pub user_name: String,
    pub due_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub completed_by: Option<String>,
    pub assigned_contact_ids: Option<Vec<String>>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub comments: Option<i64>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub payment_date: Option<Timestamp>,
    pub payment_type: Option<String>,
    pub contract_number: Option<String>,
    pub discount: Option<f64>,
    pub avatar: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Deal {
    /// Creates a deal with only the required fields set.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        user_name: impl Into<String>,
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
            user_name: user_name.into(),
            due_at,
            completed_at: None,
            completed_by: None,
            assigned_contact_ids: None,
            status: None,
            priority: None,
            comments: None,
            amount: None,
            currency: None,
            payment_date: None,
            payment_type: None,
            contract_number: None,
            discount: None,
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for [`Deal`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub company_ids: Option<Option<Vec<String>>>,
    pub contact_ids: Option<Option<Vec<String>>>,
    pub deal_ids: Option<Option<Vec<String>>>,
    pub user_name: Option<String>,
    pub due_at: Option<Timestamp>,
    pub completed_at: Option<Option<Timestamp>>,
    pub completed_by: Option<Option<String>>,
    pub assigned_contact_ids: Option<Option<Vec<String>>>,
    pub status: Option<Option<String>>,
    pub priority: Option<Option<String>>,
    pub comments: Option<Option<i64>>,
    pub amount: Option<Option<f64>>,
    pub currency: Option<Option<String>>,
    pub payment_date: Option<Option<Timestamp>>,
    pub payment_type: Option<Option<String>>,
    pub contract_number: Option<Option<String>>,
    pub discount: Option<Option<f64>>,
    pub avatar: Option<Option<String>>,
}

impl Entity for Deal {
    type Patch = DealPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn merge(&mut self, patch: DealPatch) {
        let DealPatch {
            title,
            content,
            company_ids,
            contact_ids,
            deal_ids,
            user_name,
            due_at,
            completed_at,
            completed_by,
            assigned_contact_ids,
            status,
            priority,
            comments,
            amount,
            currency,
            payment_date,
            payment_type,
            contract_number,
            discount,
            avatar,
        } = patch;

        apply(&mut self.title, title);
        apply(&mut self.content, content);
        apply(&mut self.company_ids, company_ids);
        apply(&mut self.contact_ids, contact_ids);
        apply(&mut self.deal_ids, deal_ids);
        apply(&mut self.user_name, user_name);
        apply(&mut self.due_at, due_at);
        apply(&mut self.completed_at, completed_at);
        apply(&mut self.completed_by, completed_by);
        apply(&mut self.assigned_contact_ids, assigned_contact_ids);
        apply(&mut self.status, status);
        apply(&mut self.priority, priority);
        apply(&mut self.comments, comments);
        apply(&mut self.amount, amount);
        apply(&mut self.currency, currency);
        apply(&mut self.payment_date, payment_date);
        apply(&mut self.payment_type, payment_type);
        apply(&mut self.contract_number, contract_number);
        apply(&mut self.discount, discount);
        apply(&mut self.avatar, avatar);
    }

    fn set_updated_at(&mut self, at: Timestamp) {
        self.updated_at = at;
    }
}
