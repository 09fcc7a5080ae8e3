//! Select requests decoded from JSON bodies, the way clients send them.

use oxide_tables_core::{build_select, ColumnSet, CoreError, SelectRequest, Value};
use serde_json::json;

fn columns() -> ColumnSet {
    ColumnSet::new("users", ["id", "name", "age", "status", "deleted_at"])
}

fn parse(body: serde_json::Value) -> SelectRequest {
    serde_json::from_value(body).expect("valid select request")
}

#[test]
fn two_groups_from_json() {
    let request = parse(json!({
        "table": "users",
        "columns": ["id", "name"],
        "filters": [
            {"conditions": [{"column": "age", "operator": "gte", "value": 18}], "logic": "and"},
            {
                "conditions": [
                    {"column": "status", "operator": "eq", "value": "active"},
                    {"column": "status", "operator": "eq", "value": "pending"}
                ],
                "logic": "Or"
            }
        ]
    }));

    let query = build_select(&request, &columns()).unwrap();
    assert_eq!(
        query.sql,
        "SELECT id, name FROM users WHERE (age >= ?) AND (status = ? OR status = ?)"
    );
    assert_eq!(
        query.params,
        vec![Value::Integer(18), "active".into(), "pending".into()]
    );
}

#[test]
fn membership_and_null_tests() {
    let request = parse(json!({
        "table": "users",
        "columns": ["*"],
        "filters": [{
            "conditions": [
                {"column": "status", "operator": "in", "value": ["a", "b", "c"]},
                {"column": "deleted_at", "operator": "is_null", "value": 5}
            ]
        }]
    }));

    let query = build_select(&request, &columns()).unwrap();
    assert_eq!(
        query.sql,
        "SELECT * FROM users WHERE (status IN (?, ?, ?) AND deleted_at IS NULL)"
    );
    assert_eq!(query.params.len(), 3);
}

#[test]
fn invalid_logic_falls_back_to_and() {
    let request = parse(json!({
        "table": "users",
        "columns": ["id"],
        "filters": [{
            "conditions": [
                {"column": "age", "operator": "gt", "value": 1},
                {"column": "age", "operator": "lt", "value": 9}
            ],
            "logic": "sometimes"
        }]
    }));

    let query = build_select(&request, &columns()).unwrap();
    assert_eq!(query.sql, "SELECT id FROM users WHERE (age > ? AND age < ?)");
}

#[test]
fn empty_in_list_is_rejected() {
    let request = parse(json!({
        "table": "users",
        "columns": ["id"],
        "filters": [{"conditions": [{"column": "status", "operator": "in", "value": []}]}]
    }));

    assert!(matches!(
        build_select(&request, &columns()),
        Err(CoreError::InvalidOperatorValue { .. })
    ));
}

#[test]
fn injection_in_filter_column_is_rejected() {
    let request = parse(json!({
        "table": "users",
        "columns": ["id"],
        "filters": [{"conditions": [{"column": "1=1 --", "operator": "eq", "value": 1}]}]
    }));

    assert!(matches!(
        build_select(&request, &columns()),
        Err(CoreError::InvalidIdentifier { .. })
    ));
}
