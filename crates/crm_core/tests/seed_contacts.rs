use crm_core::{
    fixture_contacts, seed_contacts, Contact, Database, ListOptions, MemorySnapshotStore,
    Repository, SeedOutcome,
};

fn open(store: &MemorySnapshotStore) -> Database {
    let db = Database::new(store.clone());
    db.initialize().unwrap();
    db
}

#[test]
fn seeds_fixtures_into_empty_database() {
    let db = open(&MemorySnapshotStore::new());
    let expected = fixture_contacts();

    assert_eq!(
        seed_contacts(&db).unwrap(),
        SeedOutcome::Seeded {
            inserted: expected.len()
        }
    );
    for fixture in &expected {
        assert_eq!(db.contacts().get(&fixture.id).unwrap().as_ref(), Some(fixture));
    }
}

#[test]
fn second_run_is_a_no_op_even_after_restart() {
    let store = MemorySnapshotStore::new();
    let first = open(&store);
    seed_contacts(&first).unwrap();
    drop(first);

    let db = open(&store);
    let total = fixture_contacts().len() as u64;
    assert_eq!(
        seed_contacts(&db).unwrap(),
        SeedOutcome::Skipped { existing: total }
    );
    assert_eq!(db.contacts().list(&ListOptions::default()).unwrap().total, total);
}

#[test]
fn any_existing_contact_blocks_seeding() {
    let db = open(&MemorySnapshotStore::new());
    db.contacts().create(Contact::new("mine", "Only Me")).unwrap();

    assert_eq!(
        seed_contacts(&db).unwrap(),
        SeedOutcome::Skipped { existing: 1 }
    );
    assert_eq!(db.contacts().count().unwrap(), 1);
}

#[test]
fn seeding_requires_initialize() {
    let db = Database::new(MemorySnapshotStore::new());
    assert!(seed_contacts(&db).is_err());
}
