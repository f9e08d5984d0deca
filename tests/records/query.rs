use salary_records::query::QueryParams;
use salary_records::store::RecordStore;
use salary_records::{QuerySpec, RecordService, ServiceError, SortKey};
use serde_json::json;

use crate::support::staff;

fn params(pairs: &[(&str, &str)]) -> QueryParams {
    let map: serde_json::Map<String, serde_json::Value> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), json!(v)))
        .collect();
    serde_json::from_value(map.into()).unwrap()
}

#[test]
fn salary_sorted_range_scenario() {
    let service = staff();
    let listing = service
        .list(&params(&[("min", "0"), ("max", "70000"), ("sort", "SALARY")]))
        .unwrap();

    let got: Vec<(&str, f64)> = listing
        .records
        .iter()
        .map(|r| (r.name.as_str(), r.salary))
        .collect();
    assert_eq!(got, [("John", 50_000.0), ("Bob", 65_000.0)]);
    assert_eq!(listing.total, 2);
}

#[test]
fn total_ignores_offset_and_page_size() {
    let service = staff();
    let wide = [("min", "0"), ("max", "100000")];

    for (offset, limit) in [("0", "1"), ("1", "1"), ("2", "5"), ("7", "2")] {
        let mut p = wide.to_vec();
        p.push(("offset", offset));
        p.push(("limit", limit));
        let listing = service.list(&params(&p)).unwrap();
        assert_eq!(listing.total, 3, "offset={offset} limit={limit}");
    }
}

#[test]
fn offset_beyond_total_is_empty() {
    let service = staff();
    let listing = service
        .list(&params(&[("max", "100000"), ("offset", "3")]))
        .unwrap();
    assert!(listing.records.is_empty());
    assert_eq!(listing.total, 3);
    assert_eq!(listing.offset, 3);
}

#[test]
fn sorted_pages_are_non_decreasing() {
    let service = RecordService::in_memory();
    for (name, salary) in [
        ("mike", 30.0),
        ("Anna", 10.0),
        ("zed", 20.0),
        ("Anna", 5.0),
        ("Bea", 30.0),
        ("carl", 0.0),
    ] {
        service
            .create(&json!({ "name": name, "salary": salary }))
            .unwrap();
    }

    let spec = |sort| QuerySpec {
        max_salary: 100.0,
        sort,
        ..QuerySpec::default()
    };

    let by_salary = service.query(&spec(SortKey::Salary)).unwrap();
    assert!(by_salary
        .records
        .windows(2)
        .all(|w| w[0].salary <= w[1].salary));

    let by_name = service.query(&spec(SortKey::Name)).unwrap();
    let names: Vec<&str> = by_name.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Anna", "Anna", "Bea", "carl", "mike", "zed"]);

    // Equal names keep insertion order.
    let annas: Vec<f64> = by_name
        .records
        .iter()
        .filter(|r| r.name == "Anna")
        .map(|r| r.salary)
        .collect();
    assert_eq!(annas, [10.0, 5.0]);
}

#[test]
fn name_sort_interleaves_upper_and_lower_case() {
    let service = RecordService::in_memory();
    for name in ["bob", "Carl", "alice", "Zed"] {
        service
            .create(&json!({ "name": name, "salary": 100 }))
            .unwrap();
    }

    let listing = service.list(&params(&[("sort", "NAME")])).unwrap();
    let names: Vec<&str> = listing.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["alice", "bob", "Carl", "Zed"]);
}

#[test]
fn unsorted_query_returns_insertion_order() {
    let service = staff();
    let listing = service.list(&params(&[("max", "100000")])).unwrap();
    let names: Vec<&str> = listing.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["John", "Jane", "Bob"]);
}

#[test]
fn inverted_range_matches_nothing() {
    let service = staff();
    let listing = service
        .list(&params(&[("min", "70000"), ("max", "60000")]))
        .unwrap();
    assert!(listing.records.is_empty());
    assert_eq!(listing.total, 0);
}

#[test]
fn malformed_numbers_are_validation_errors() {
    let service = staff();
    for (field, value) in [("min", "abc"), ("max", "NaN"), ("offset", "-1"), ("limit", "x")] {
        let err = service.list(&params(&[(field, value)])).unwrap_err();
        assert!(
            matches!(&err, ServiceError::Validation(v) if v.field() == field),
            "{field}={value}: {err}"
        );
        assert_eq!(err.status_code(), 400);
    }
}

#[test]
fn empty_store_lists_nothing() {
    let service = RecordService::in_memory();
    let listing = service.list(&QueryParams::default()).unwrap();
    assert!(listing.records.is_empty());
    assert_eq!(listing.total, 0);
}

#[test]
fn create_with_empty_name_writes_nothing() {
    let service = RecordService::in_memory();
    let err = service
        .create(&json!({ "name": "", "salary": 100 }))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(service.store().count().unwrap(), 0);
}

#[test]
fn create_assigns_id_and_is_queryable() {
    let service = RecordService::in_memory();
    let record = service
        .create(&json!({ "name": "Jane", "salary": 3500 }))
        .unwrap();
    assert!(!record.id.as_str().is_empty());

    let listing = service.list(&QueryParams::default()).unwrap();
    assert_eq!(listing.records, vec![record]);
}
