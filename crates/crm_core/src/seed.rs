//! First-run contact seeding.
//!
//! # Invariants
//! - Seeding only happens when the contacts table is empty; a database
//!   holding any contact is never re-seeded, even if the fixtures change.
//! - Each fixture goes through `Repository::create`, so each insert writes
//!   its own snapshot.

use crate::db::Database;
use crate::model::{Contact, SocialLinks, Timestamp};
use crate::repo::{RepoResult, Repository};
use chrono::DateTime;
use log::info;

/// Result of one seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Contacts already existed; nothing was written.
    Skipped { existing: u64 },
    Seeded { inserted: usize },
}

struct Fixture {
    id: &'static str,
    name: &'static str,
    initials: &'static str,
    email: &'static str,
    phone: &'static str,
    position: &'static str,
    company: &'static str,
    city: &'static str,
    country: &'static str,
    linkedin: Option<&'static str>,
    created_at_ms: i64,
}

const FIXTURES: &[Fixture] = &[
    Fixture {
        id: "contact-001",
        name: "Olivia Bennett",
        initials: "OB",
        email: "olivia.bennett@northwind.io",
        phone: "+1 415-555-0142",
        position: "Head of Partnerships",
        company: "Northwind Labs",
        city: "San Francisco",
        country: "United States",
        linkedin: Some("https://linkedin.com/in/olivia-bennett"),
        created_at_ms: 1_704_103_200_000,
    },
    Fixture {
        id: "contact-002",
        name: "Marcus Lindqvist",
        initials: "ML",
        email: "marcus@fjordtech.se",
        phone: "+46 8-555-0199",
        position: "CTO",
        company: "Fjord Tech",
        city: "Stockholm",
        country: "Sweden",
        linkedin: Some("https://linkedin.com/in/marcus-lindqvist"),
        created_at_ms: 1_704_362_400_000,
    },
    Fixture {
        id: "contact-003",
        name: "Aiko Tanaka",
        initials: "AT",
        email: "aiko.tanaka@sakura-digital.jp",
        phone: "+81 3-5550-1234",
        position: "Product Manager",
        company: "Sakura Digital",
        city: "Tokyo",
        country: "Japan",
        linkedin: None,
        created_at_ms: 1_705_053_600_000,
    },
    Fixture {
        id: "contact-004",
        name: "Daniel Okafor",
        initials: "DO",
        email: "d.okafor@greenline.ng",
        phone: "+234 1-555-0177",
        position: "Operations Lead",
        company: "Greenline Logistics",
        city: "Lagos",
        country: "Nigeria",
        linkedin: Some("https://linkedin.com/in/daniel-okafor"),
        created_at_ms: 1_706_004_000_000,
    },
    Fixture {
        id: "contact-005",
        name: "Sofia Marques",
        initials: "SM",
        email: "sofia.marques@atlantico.pt",
        phone: "+351 21-555-0110",
        position: "Marketing Director",
        company: "Atlantico Media",
        city: "Lisbon",
        country: "Portugal",
        linkedin: None,
        created_at_ms: 1_707_210_000_000,
    },
    Fixture {
        id: "contact-006",
        name: "Ethan Clarke",
        initials: "EC",
        email: "ethan@clarkeventures.co.uk",
        phone: "+44 20-5550-0188",
        position: "Founder",
        company: "Clarke Ventures",
        city: "London",
        country: "United Kingdom",
        linkedin: Some("https://linkedin.com/in/ethan-clarke"),
        created_at_ms: 1_708_502_400_000,
    },
    Fixture {
        id: "contact-007",
        name: "Priya Raman",
        initials: "PR",
        email: "priya.raman@lotuscloud.in",
        phone: "+91 80-5550-4321",
        position: "Engineering Manager",
        company: "Lotus Cloud",
        city: "Bengaluru",
        country: "India",
        linkedin: Some("https://linkedin.com/in/priya-raman"),
        created_at_ms: 1_709_287_200_000,
    },
    Fixture {
        id: "contact-008",
        name: "Lucas Moreau",
        initials: "LM",
        email: "lucas.moreau@boreal.fr",
        phone: "+33 1-5550-6677",
        position: "Account Executive",
        company: "Boreal Systems",
        city: "Paris",
        country: "France",
        linkedin: None,
        created_at_ms: 1_710_151_200_000,
    },
];

/// The fixed contact set inserted into a fresh database.
pub fn fixture_contacts() -> Vec<Contact> {
    FIXTURES.iter().map(fixture_to_contact).collect()
}

/// Inserts the fixture contacts when the contacts table is empty.
///
/// Requires an initialized database.
pub fn seed_contacts(db: &Database) -> RepoResult<SeedOutcome> {
    let contacts = db.contacts();
    let existing = contacts.count()?;
    if existing > 0 {
        info!(
            "event=seed module=seed status=skipped existing={}",
            existing
        );
        return Ok(SeedOutcome::Skipped { existing });
    }

    let fixtures = fixture_contacts();
    let inserted = fixtures.len();
    for contact in fixtures {
        contacts.create(contact)?;
    }

    info!("event=seed module=seed status=ok inserted={}", inserted);
    Ok(SeedOutcome::Seeded { inserted })
}

fn fixture_to_contact(fixture: &Fixture) -> Contact {
    let created_at: Timestamp =
        DateTime::from_timestamp_millis(fixture.created_at_ms).unwrap_or_default();
    Contact {
        avatar: format!("/media/avatars/{}.png", fixture.id),
        initials: Some(fixture.initials.to_string()),
        email: Some(fixture.email.to_string()),
        phone: Some(fixture.phone.to_string()),
        position: Some(fixture.position.to_string()),
        company: Some(fixture.company.to_string()),
        city: Some(fixture.city.to_string()),
        country: Some(fixture.country.to_string()),
        social_links: fixture.linkedin.map(|url| SocialLinks {
            linkedin: Some(url.to_string()),
            ..SocialLinks::default()
        }),
        created_at,
        updated_at: created_at,
        ..Contact::new(fixture.id, fixture.name)
    }
}

#[cfg(test)]
mod tests {
    use super::fixture_contacts;
    use std::collections::HashSet;

    #[test]
    fn fixture_ids_are_unique_and_timestamps_fixed() {
        let fixtures = fixture_contacts();
        let ids = fixtures
            .iter()
            .map(|contact| contact.id.as_str())
            .collect::<HashSet<_>>();
        assert_eq!(ids.len(), fixtures.len());
        assert_eq!(fixture_contacts(), fixtures);
        assert!(fixtures.iter().all(|contact| contact.created_at.timestamp() > 0));
    }
}
