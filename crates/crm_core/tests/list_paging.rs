use chrono::{Duration, TimeZone, Utc};
use crm_core::{
    Contact, Database, ListOptions, MemorySnapshotStore, OrderDirection, RepoError, Repository,
    Task,
};

fn open_with_contacts(count: i64) -> Database {
    let db = Database::new(MemorySnapshotStore::new());
    db.initialize().unwrap();
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    for index in 0..count {
        let created_at = base + Duration::minutes(index);
        db.contacts()
            .create(Contact {
                created_at,
                updated_at: created_at,
                city: Some(format!("city-{}", count - index)),
                ..Contact::new(format!("c{index:02}"), format!("Contact {index}"))
            })
            .unwrap();
    }
    db
}

fn listed_ids(db: &Database, options: &ListOptions) -> Vec<String> {
    db.contacts()
        .list(options)
        .unwrap()
        .data
        .into_iter()
        .map(|contact| contact.id)
        .collect()
}

#[test]
fn default_order_is_newest_first() {
    let db = open_with_contacts(3);
    assert_eq!(
        listed_ids(&db, &ListOptions::default()),
        vec!["c02", "c01", "c00"]
    );
}

#[test]
fn ascending_direction_reverses_order() {
    let db = open_with_contacts(3);
    let options = ListOptions {
        order_direction: OrderDirection::Asc,
        ..ListOptions::default()
    };
    assert_eq!(listed_ids(&db, &options), vec!["c00", "c01", "c02"]);
}

#[test]
fn pages_are_slices_of_the_unpaged_listing() {
    let db = open_with_contacts(7);
    let all = listed_ids(&db, &ListOptions::default());

    let page = listed_ids(
        &db,
        &ListOptions {
            limit: Some(3),
            offset: Some(2),
            ..ListOptions::default()
        },
    );
    assert_eq!(page, all[2..5].to_vec());

    let tail = listed_ids(
        &db,
        &ListOptions {
            limit: Some(10),
            offset: Some(5),
            ..ListOptions::default()
        },
    );
    assert_eq!(tail, all[5..].to_vec());
}

#[test]
fn offset_without_limit_skips_rows() {
    let db = open_with_contacts(4);
    let all = listed_ids(&db, &ListOptions::default());

    let rest = listed_ids(
        &db,
        &ListOptions {
            offset: Some(1),
            ..ListOptions::default()
        },
    );
    assert_eq!(rest, all[1..].to_vec());
}

#[test]
fn total_ignores_paging() {
    let db = open_with_contacts(5);
    let result = db
        .contacts()
        .list(&ListOptions {
            limit: Some(2),
            offset: Some(4),
            ..ListOptions::default()
        })
        .unwrap();

    assert_eq!(result.data.len(), 1);
    assert_eq!(result.total, 5);
}

#[test]
fn offset_past_end_is_empty() {
    let db = open_with_contacts(2);
    let result = db
        .contacts()
        .list(&ListOptions {
            limit: Some(5),
            offset: Some(10),
            ..ListOptions::default()
        })
        .unwrap();

    assert!(result.data.is_empty());
    assert_eq!(result.total, 2);
}

#[test]
fn orders_by_any_known_column() {
    let db = open_with_contacts(3);
    let options = ListOptions {
        order_by: Some("city".to_string()),
        order_direction: OrderDirection::Asc,
        ..ListOptions::default()
    };
    // city-3, city-2, city-1 were assigned in creation order
    assert_eq!(listed_ids(&db, &options), vec!["c02", "c01", "c00"]);
}

#[test]
fn equal_sort_keys_fall_back_to_id() {
    let db = Database::new(MemorySnapshotStore::new());
    db.initialize().unwrap();
    let due_at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    for id in ["t-b", "t-c", "t-a"] {
        db.tasks()
            .create(Task::new(id, "Same", "Same", "me", due_at))
            .unwrap();
    }

    let result = db
        .tasks()
        .list(&ListOptions {
            order_by: Some("dueAt".to_string()),
            ..ListOptions::default()
        })
        .unwrap();
    let ids: Vec<_> = result.data.iter().map(|task| task.id.as_str()).collect();
    assert_eq!(ids, vec!["t-a", "t-b", "t-c"]);
}

#[test]
fn unknown_order_column_is_rejected() {
    let db = open_with_contacts(1);
    let err = db
        .contacts()
        .list(&ListOptions {
            order_by: Some("name; DROP TABLE contacts".to_string()),
            ..ListOptions::default()
        })
        .unwrap_err();

    assert!(matches!(
        err,
        RepoError::InvalidOrderColumn {
            table: "contacts",
            ..
        }
    ));
    assert_eq!(db.contacts().count().unwrap(), 1);
}

#[test]
fn empty_table_lists_nothing() {
    let db = open_with_contacts(0);
    let result = db.notes().list(&ListOptions::default()).unwrap();
    assert!(result.data.is_empty());
    assert_eq!(result.total, 0);
}
