use customer_core::db::migrations::latest_version;
use customer_core::db::open_db_in_memory;
use customer_core::{
    CustomerDraft, CustomerRepository, CustomerService, RepoError, SqliteCustomerRepository,
};
use rusqlite::Connection;
use std::collections::HashSet;

#[test]
fn empty_store_lists_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    assert!(repo.list_customers().unwrap().is_empty());
}

#[test]
fn create_adds_exactly_one_row_with_fresh_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();
    repo.create_customer(&CustomerDraft::new("Liana Kim", 20)).unwrap();
    let before = repo.list_customers().unwrap();

    let id = repo.create_customer(&CustomerDraft::new("Ada", 30)).unwrap();

    let after = repo.list_customers().unwrap();
    assert_eq!(after.len(), before.len() + 1);
    assert!(before.iter().all(|customer| customer.id != id));
    let added: Vec<_> = after
        .iter()
        .filter(|customer| customer.name == "Ada" && customer.age == 30)
        .collect();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].id, id);
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    let id = repo.create_customer(&CustomerDraft::new("Glen Rangel", 21)).unwrap();

    let loaded = repo.get_customer(id).unwrap().unwrap();
    assert_eq!(loaded, CustomerDraft::new("Glen Rangel", 21).with_id(id));
}

#[test]
fn empty_name_is_still_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    let id = repo.create_customer(&CustomerDraft::new("", 0)).unwrap();

    let loaded = repo.get_customer(id).unwrap();
    assert_eq!(loaded.map(|customer| customer.name), Some(String::new()));
}

#[test]
fn get_absent_id_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    assert!(repo.get_customer(999).unwrap().is_none());
}

#[test]
fn names_are_not_unique() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    let first = repo.create_customer(&CustomerDraft::new("Marni Benson", 24)).unwrap();
    let second = repo.create_customer(&CustomerDraft::new("Marni Benson", 27)).unwrap();

    assert_ne!(first, second);
    assert_eq!(repo.list_customers().unwrap().len(), 2);
}

#[test]
fn list_is_ordered_by_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    for (name, age) in [("Zed", 1), ("Amy", 2), ("Mia", 3)] {
        repo.create_customer(&CustomerDraft::new(name, age)).unwrap();
    }

    let ids: Vec<_> = repo
        .list_customers()
        .unwrap()
        .into_iter()
        .map(|customer| customer.id)
        .collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[test]
fn update_replaces_name_and_age_and_keeps_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();
    let id = repo.create_customer(&CustomerDraft::new("draft", 1)).unwrap();
    let other = repo.create_customer(&CustomerDraft::new("other", 2)).unwrap();

    let draft = CustomerDraft::new("Leigh Daly", 26);
    repo.update_customer(id, &draft).unwrap();
    repo.update_customer(id, &draft).unwrap();

    let loaded = repo.get_customer(id).unwrap().unwrap();
    assert_eq!(loaded, draft.with_id(id));
    let untouched = repo.get_customer(other).unwrap().unwrap();
    assert_eq!(untouched.name, "other");
}

#[test]
fn update_absent_id_is_a_noop_in_repository() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    repo.update_customer(42, &CustomerDraft::new("ghost", 1)).unwrap();

    assert!(repo.list_customers().unwrap().is_empty());
}

#[test]
fn delete_removes_row_and_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();
    let id = repo.create_customer(&CustomerDraft::new("Klay Correa", 28)).unwrap();

    repo.delete_customer(id).unwrap();
    repo.delete_customer(id).unwrap();

    assert!(repo.get_customer(id).unwrap().is_none());
}

#[test]
fn ids_are_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();
    let first = repo.create_customer(&CustomerDraft::new("a", 1)).unwrap();
    let second = repo.create_customer(&CustomerDraft::new("b", 2)).unwrap();

    repo.delete_customer(second).unwrap();
    let third = repo.create_customer(&CustomerDraft::new("c", 3)).unwrap();

    let seen: HashSet<_> = [first, second].into_iter().collect();
    assert!(!seen.contains(&third));
    assert!(third > second);
}

#[test]
fn parameters_are_not_interpreted_as_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();
    let name = "x'); DROP TABLE Customers; --";

    let id = repo.create_customer(&CustomerDraft::new(name, 5)).unwrap();

    let loaded = repo.get_customer(id).unwrap().unwrap();
    assert_eq!(loaded.name, name);
    assert_eq!(repo.list_customers().unwrap().len(), 1);
}

#[test]
fn service_update_existing_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = CustomerService::new(SqliteCustomerRepository::try_new(&conn).unwrap());

    let err = service
        .update_existing_customer(7, &CustomerDraft::new("nobody", 1))
        .unwrap_err();

    assert!(matches!(err, RepoError::NotFound(7)));
    assert!(service.list_customers().unwrap().is_empty());
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let service = CustomerService::new(SqliteCustomerRepository::try_new(&conn).unwrap());

    let id = service
        .create_customer(&CustomerDraft::new("from service", 40))
        .unwrap();
    service
        .update_existing_customer(id, &CustomerDraft::new("renamed", 41))
        .unwrap();

    let fetched = service.get_customer(id).unwrap().unwrap();
    assert_eq!(fetched.name, "renamed");
    assert_eq!(fetched.age, 41);

    service.delete_customer(id).unwrap();
    assert!(service.get_customer(id).unwrap().is_none());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteCustomerRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_customers_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteCustomerRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("Customers"))
    ));
}

#[test]
fn customer_serializes_with_wire_field_names() {
    let customer = CustomerDraft::new("Ada", 30).with_id(10);

    let json = serde_json::to_value(&customer).unwrap();
    assert_eq!(json, serde_json::json!({"id": 10, "name": "Ada", "age": 30}));

    let draft: CustomerDraft =
        serde_json::from_str(r#"{"id": 99, "name": "Ada", "age": 30}"#).unwrap();
    assert_eq!(draft, CustomerDraft::new("Ada", 30));
}

#[test]
fn draft_missing_fields_decode_to_zero_values() {
    let draft: CustomerDraft = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
    assert_eq!(draft, CustomerDraft::new("Ada", 0));

    let draft: CustomerDraft = serde_json::from_str("{}").unwrap();
    assert_eq!(draft, CustomerDraft::new("", 0));
}
