use chrono::NaiveDate;
use staybook_store::{columns, NewBooking, NewOwner, NewPartner, Store, StorePaths};
use tempfile::tempdir;

fn sample_booking() -> NewBooking {
    NewBooking {
        guest_name: "Alice".to_string(),
        check_in: NaiveDate::from_ymd_opt(2024, 1, 1),
        check_out: NaiveDate::from_ymd_opt(2024, 1, 3),
        apartment: Some(101),
        hospitality_value: 100.0,
        condominium: Some("Sea View".to_string()),
        block: Some("B".to_string()),
        address: Some("12 Shore Rd".to_string()),
        payment_status: Some("Paid".to_string()),
        ..NewBooking::default()
    }
}

#[test]
fn open_on_empty_directory_yields_empty_tables_with_headers() {
    let dir = tempdir().unwrap();
    let store = Store::open(StorePaths::from_dir(dir.path()));

    assert!(store.bookings().is_empty());
    assert!(store.partners().is_empty());
    assert!(store.owners().is_empty());
    assert!(store.bookings().has_columns(&[
        columns::booking::GUEST,
        columns::booking::VALUE,
    ]));
}

#[test]
fn append_then_reload_increases_row_count_by_one() {
    let dir = tempdir().unwrap();
    let mut store = Store::open(StorePaths::from_dir(dir.path()));

    let before = store.bookings().row_count();
    let added = store.add_booking(sample_booking()).unwrap();

    // Fresh open simulates the UI's reload action
    let reloaded = Store::open(StorePaths::from_dir(dir.path()));
    assert_eq!(reloaded.bookings().row_count(), before + 1);

    let found = reloaded.get_booking(&added.id).expect("row persisted");
    assert_eq!(found.fields.guest_name, "Alice");
    assert_eq!(found.fields.check_in, NaiveDate::from_ymd_opt(2024, 1, 1));
    assert_eq!(found.fields.apartment, Some(101));
}

#[test]
fn update_by_id_persists() {
    let dir = tempdir().unwrap();
    let mut store = Store::open(StorePaths::from_dir(dir.path()));

    let added = store.add_booking(sample_booking()).unwrap();
    let mut changed = added.fields.clone();
    changed.apartment = Some(202);
    changed.payment_status = Some("Due".to_string());

    assert!(store.update_booking(&added.id, changed).unwrap());

    let reloaded = Store::open(StorePaths::from_dir(dir.path()));
    let found = reloaded.get_booking(&added.id).unwrap();
    assert_eq!(found.fields.apartment, Some(202));
    assert_eq!(found.fields.payment_status, Some("Due".to_string()));
}

#[test]
fn update_unknown_id_is_a_noop() {
    let dir = tempdir().unwrap();
    let mut store = Store::open(StorePaths::from_dir(dir.path()));
    store.add_booking(sample_booking()).unwrap();

    let outcome = store.update_booking("no-such-id", sample_booking()).unwrap();
    assert!(!outcome);

    let reloaded = Store::open(StorePaths::from_dir(dir.path()));
    assert_eq!(reloaded.bookings().row_count(), 1);
    assert_eq!(
        reloaded.list_bookings()[0].fields.guest_name,
        "Alice".to_string()
    );
}

#[test]
fn partners_and_owners_roundtrip() {
    let dir = tempdir().unwrap();
    let mut store = Store::open(StorePaths::from_dir(dir.path()));

    store
        .add_partner(NewPartner {
            name: "Acme".to_string(),
            receivable: 100.0,
            payable: 50.0,
        })
        .unwrap();
    let owner = store
        .add_owner(NewOwner {
            full_name: "Carla Reyes".to_string(),
            email: Some("carla@example.com".to_string()),
            phone: Some("555-0101".to_string()),
            document: Some("X-22".to_string()),
            payable: Some(320.0),
        })
        .unwrap();

    let reloaded = Store::open(StorePaths::from_dir(dir.path()));
    assert_eq!(reloaded.list_partners().len(), 1);
    assert_eq!(reloaded.list_partners()[0].fields.receivable, 100.0);

    let found = reloaded.get_owner(&owner.id).unwrap();
    assert_eq!(found.fields.payable, Some(320.0));
}

#[test]
fn csv_paths_are_honored_by_extension() {
    let dir = tempdir().unwrap();
    let paths = StorePaths {
        bookings: dir.path().join("bookings.csv"),
        partners: dir.path().join("partners.csv"),
        owners: dir.path().join("owners.csv"),
    };

    let mut store = Store::open(paths.clone());
    store.add_booking(sample_booking()).unwrap();

    assert!(paths.bookings.exists());
    let reloaded = Store::open(paths);
    assert_eq!(reloaded.bookings().row_count(), 1);
}

#[test]
fn legacy_file_without_id_column_gets_ids_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bookings.csv");
    std::fs::write(
        &path,
        "Guest Name,Hospitality Value\nAlice,100.0\nBob,80.0\n",
    )
    .unwrap();

    let paths = StorePaths {
        bookings: path,
        partners: dir.path().join("partners.csv"),
        owners: dir.path().join("owners.csv"),
    };
    let store = Store::open(paths);

    let bookings = store.list_bookings();
    assert_eq!(bookings.len(), 2);
    assert!(!bookings[0].id.is_empty());
    assert_ne!(bookings[0].id, bookings[1].id);
}
