//! Domain records for the five CRM entity types.
//!
//! # Responsibility
//! - Define the typed records the repositories store and return.
//! - Define partial-update (`…Patch`) shapes and shallow-merge semantics.
//!
//! # Invariants
//! - `id` is chosen by the caller and never generated by the store.
//! - `updated_at` is not part of any patch; repositories stamp it.
//! - Id lists (`contact_ids`, `company_ids`, …) are plain references; the
//!   store does not keep them consistent when the target is deleted.
//! - Timestamps carry millisecond resolution, matching their stored form.

use chrono::{DateTime, SubsecRound, Utc};

pub mod company;
pub mod contact;
pub mod deal;
pub mod note;
pub mod task;

pub use company::{Company, CompanyPatch};
pub use contact::{Contact, ContactPatch, SocialLinks};
pub use deal::{Deal, DealPatch};
pub use note::{Note, NotePatch};
pub use task::{Task, TaskPatch};

pub type Timestamp = DateTime<Utc>;

/// Current time truncated to the millisecond precision timestamps are
/// stored with.
pub fn timestamp_now() -> Timestamp {
    Utc::now().trunc_subsecs(3)
}

/// Generates a fresh random id for callers creating new records.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Behavior shared by every storable record.
pub trait Entity: Sized {
    /// Partial update accepted by `Repository::update`.
    type Patch;

    fn id(&self) -> &str;

    /// Shallow-merges `patch` into `self`: every field present in the patch
    /// replaces the current value, absent fields leave it untouched.
    fn merge(&mut self, patch: Self::Patch);

    fn set_updated_at(&mut self, at: Timestamp);
}

/// Replaces `slot` when the patch carries a value.
///
/// For optional record fields the patch type is `Option<Option<T>>`, so
/// `Some(None)` clears the field and `None` leaves it alone.
pub(crate) fn apply<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
