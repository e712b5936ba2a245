use chrono::{Duration, TimeZone, Utc};
use crm_core::{
    Company, CompanyPatch, Contact, Database, Deal, DealPatch, MemorySnapshotStore, Note,
    NotePatch, Repository, SocialLinks, Task, TaskPatch, Timestamp,
};
use serde_json::json;

fn open() -> Database {
    let db = Database::new(MemorySnapshotStore::new());
    db.initialize().unwrap();
    db
}

fn at(day: u32, hour: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, day, hour, 15, 30).unwrap()
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn raw_text(db: &Database, sql: &str) -> Option<String> {
    db.handle()
        .unwrap()
        .query_row(sql, [], |row| row.get(0))
        .unwrap()
}

#[test]
fn fully_populated_contact_round_trips() {
    let db = open();
    let contact = Contact {
        id: "contact-full".to_string(),
        avatar: "/a.png".to_string(),
        initials: Some("AF".to_string()),
        name: "Ada Full".to_string(),
        email: Some("ada@full.dev".to_string()),
        phone: Some("+1 555".to_string()),
        position: Some("CEO".to_string()),
        company: Some("Full Inc".to_string()),
        address: Some("1 Main St".to_string()),
        state: Some("CA".to_string()),
        city: Some("Oakland".to_string()),
        zip: Some("94601".to_string()),
        country: Some("US".to_string()),
        social_links: Some(SocialLinks {
            linkedin: Some("in/ada".to_string()),
            twitter: Some("@ada".to_string()),
            github: Some("ada".to_string()),
            instagram: None,
            facebook: Some("ada.fb".to_string()),
        }),
        created_at: at(1, 8),
        updated_at: at(2, 9),
        logo: Some("/logo.png".to_string()),
    };

    db.contacts().create(contact.clone()).unwrap();
    assert_eq!(db.contacts().get("contact-full").unwrap(), Some(contact));
    assert_eq!(
        raw_text(&db, "SELECT createdAt FROM contacts").as_deref(),
        Some("2024-03-01T08:15:30.000Z")
    );
}

#[test]
fn absent_and_empty_optional_fields_are_stored_as_null() {
    let db = open();
    db.contacts()
        .create(Contact {
            email: Some(String::new()),
            ..Contact::new("c-empty", "Empty")
        })
        .unwrap();

    assert_eq!(raw_text(&db, "SELECT email FROM contacts"), None);
    assert_eq!(raw_text(&db, "SELECT avatar FROM contacts"), None);
    assert_eq!(raw_text(&db, "SELECT socialLinks FROM contacts"), None);

    let loaded = db.contacts().get("c-empty").unwrap().unwrap();
    assert_eq!(loaded.email, None);
    assert_eq!(loaded.avatar, "");
}

#[test]
fn company_lists_timestamps_and_badge_round_trip() {
    let db = open();
    let company = Company {
        category_ids: Some(ids(&["cat-saas", "cat-b2b"])),
        contact_ids: Some(ids(&["contact-001", "missing-contact"])),
        founded_at: Some(at(3, 0)),
        last_interaction_at: Some(at(4, 12)),
        connection_strength_id: Some("strong".to_string()),
        x: Some("@acme".to_string()),
        badge: Some(json!({ "label": "Hot", "variant": "destructive", "rank": 1 })),
        ..Company::new("co-1", "Acme")
    };

    db.companies().create(company.clone()).unwrap();

    assert_eq!(db.companies().get("co-1").unwrap(), Some(company));
    assert_eq!(
        raw_text(&db, "SELECT contactIds FROM companies").as_deref(),
        Some(r#"["contact-001","missing-contact"]"#)
    );
}

#[test]
fn company_update_replaces_list_wholesale() {
    let db = open();
    db.companies()
        .create(Company {
            category_ids: Some(ids(&["a", "b"])),
            ..Company::new("co-2", "Globex")
        })
        .unwrap();

    let updated = db
        .companies()
        .update(
            "co-2",
            CompanyPatch {
                category_ids: Some(Some(ids(&["c"]))),
                badge: Some(Some(json!("new"))),
                ..CompanyPatch::default()
            },
        )
        .unwrap()
        .unwrap();

    assert_eq!(updated.category_ids, Some(ids(&["c"])));
    assert_eq!(db.companies().get("co-2").unwrap(), Some(updated));
}

#[test]
fn null_badge_is_stored_as_null_and_returned_absent() {
    let db = open();
    let created = db
        .companies()
        .create(Company {
            badge: Some(serde_json::Value::Null),
            ..Company::new("co-null", "Initech")
        })
        .unwrap();

    assert_eq!(created.badge, None);
    assert_eq!(raw_text(&db, "SELECT badge FROM companies"), None);
    assert_eq!(db.companies().get("co-null").unwrap(), Some(created));
}

#[test]
fn deal_money_fields_round_trip() {
    let db = open();
    let deal = Deal {
        company_ids: Some(ids(&["co-1"])),
        contact_ids: Some(Vec::new()),
        assigned_contact_ids: Some(ids(&["contact-002"])),
        completed_at: Some(at(9, 17)),
        completed_by: Some("sam".to_string()),
        status: Some("won".to_string()),
        priority: Some("high".to_string()),
        comments: Some(4),
        amount: Some(12_500.75),
        currency: Some("USD".to_string()),
        payment_date: Some(at(10, 9)),
        payment_type: Some("wire".to_string()),
        contract_number: Some("CN-0042".to_string()),
        discount: Some(0.0),
        ..Deal::new("deal-1", "Renewal", "Annual renewal", "sam", at(8, 10))
    };

    db.deals().create(deal.clone()).unwrap();
    assert_eq!(db.deals().get("deal-1").unwrap(), Some(deal));

    let amount: f64 = db
        .handle()
        .unwrap()
        .query_row("SELECT amount FROM deals", [], |row| row.get(0))
        .unwrap();
    assert_eq!(amount, 12_500.75);
}

#[test]
fn deal_update_keeps_unpatched_fields() {
    let db = open();
    let original = db
        .deals()
        .create(Deal {
            amount: Some(100.0),
            ..Deal::new("deal-2", "Pilot", "Pilot project", "kim", at(5, 10))
        })
        .unwrap();

    let updated = db
        .deals()
        .update(
            "deal-2",
            DealPatch {
                status: Some(Some("negotiation".to_string())),
                ..DealPatch::default()
            },
        )
        .unwrap()
        .unwrap();

    assert_eq!(updated.amount, original.amount);
    assert_eq!(updated.title, original.title);
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(updated.status.as_deref(), Some("negotiation"));
}

#[test]
fn task_round_trips_and_completes() {
    let db = open();
    let task = Task {
        deal_ids: Some(ids(&["deal-1"])),
        status: Some("todo".to_string()),
        ..Task::new("task-1", "Call back", "Follow up on pricing", "sam", at(12, 16))
    };
    db.tasks().create(task.clone()).unwrap();
    assert_eq!(db.tasks().get("task-1").unwrap(), Some(task));

    let done = db
        .tasks()
        .update(
            "task-1",
            TaskPatch {
                status: Some(Some("done".to_string())),
                completed_at: Some(Some(at(13, 9))),
                completed_by: Some(Some("sam".to_string())),
                ..TaskPatch::default()
            },
        )
        .unwrap()
        .unwrap();

    assert_eq!(db.tasks().get("task-1").unwrap(), Some(done));
}

#[test]
fn update_returns_patched_timestamps_as_stored() {
    let db = open();
    db.tasks()
        .create(Task::new("task-2", "Ship", "Release", "kim", at(20, 9)))
        .unwrap();

    let updated = db
        .tasks()
        .update(
            "task-2",
            TaskPatch {
                completed_at: Some(Some(at(21, 9) + Duration::microseconds(1_500))),
                ..TaskPatch::default()
            },
        )
        .unwrap()
        .unwrap();

    assert_eq!(
        updated.completed_at,
        Some(at(21, 9) + Duration::milliseconds(1))
    );
    assert_eq!(db.tasks().get("task-2").unwrap(), Some(updated));
}

#[test]
fn note_required_lists_are_stored_even_when_empty() {
    let db = open();
    let note = Note::new("note-1", "Kickoff", "Agenda", "sam", at(15, 10), "pending");
    db.notes().create(note.clone()).unwrap();

    assert_eq!(
        raw_text(&db, "SELECT assignedContactIds FROM notes").as_deref(),
        Some("[]")
    );
    assert_eq!(raw_text(&db, "SELECT dealIds FROM notes"), None);
    assert_eq!(db.notes().get("note-1").unwrap(), Some(note));
}

#[test]
fn note_update_replaces_required_list() {
    let db = open();
    db.notes()
        .create(Note {
            company_ids: ids(&["co-1"]),
            ..Note::new("note-2", "Recap", "Notes", "kim", at(16, 10), "pending")
        })
        .unwrap();

    let updated = db
        .notes()
        .update(
            "note-2",
            NotePatch {
                company_ids: Some(ids(&["co-1", "co-2"])),
                deal_ids: Some(Some(ids(&["deal-9"]))),
                ..NotePatch::default()
            },
        )
        .unwrap()
        .unwrap();

    assert_eq!(updated.company_ids, ids(&["co-1", "co-2"]));
    assert_eq!(db.notes().get("note-2").unwrap(), Some(updated));
}

#[test]
fn legacy_rows_with_null_json_text_decode_as_absent() {
    let db = open();
    db.handle()
        .unwrap()
        .execute(
            "INSERT INTO tasks (id, title, content, createdBy, dueAt, companyIds, createdAt, updatedAt)
             VALUES ('legacy', 't', 'c', 'me', '2024-01-01T00:00:00.000Z', 'null',
                     '2024-01-01T00:00:00.000Z', '2024-01-01T00:00:00.000Z');",
            [],
        )
        .unwrap();

    let task = db.tasks().get("legacy").unwrap().unwrap();
    assert_eq!(task.company_ids, None);
    assert_eq!(task.status, None);
}
