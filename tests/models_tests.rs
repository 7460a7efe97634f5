// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bilancio::engine::{compute_view, FilterState, Snapshot};
use bilancio::errors::StoreError;
use bilancio::models::{Category, MonthKey, Transaction};
use bilancio::store::{HttpStore, RecordStore};
use bilancio::utils::{canonical_date, fmt_money};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

#[test]
fn decodes_record_store_payloads() {
    let expenses: Vec<Transaction> = serde_json::from_value(json!([
        {"id": 1, "description": "Market", "amount": "200.00", "date": "2024-03-05", "category_id": 2},
        {"id": 2, "description": "Bakery", "amount": 50, "date": "2024-04-01T10:00:00.000000Z", "category_id": "2"},
        {"id": 3, "description": "Odd", "amount": "abc", "date": "2024-03-07", "category_id": null},
        {"id": 4, "description": "Float", "amount": 12.5, "date": "2024-03-08", "category_id": 99},
        {"id": 5, "amount": true, "date": "2024-03-09"}
    ]))
    .unwrap();
    let categories: Vec<Category> = serde_json::from_value(json!([
        {"id": 1, "name": "Income", "created_at": null},
        {"id": 2, "name": "Food"}
    ]))
    .unwrap();

    assert_eq!(expenses[1].category_id, Some(2));
    assert_eq!(expenses[2].category_id, None);
    assert_eq!(expenses[3].amount.raw(), Some("12.5"));
    assert!(expenses[4].amount.raw().is_none());
    assert_eq!(expenses[4].description, "");

    let view = compute_view(
        &Snapshot::new(vec![], expenses, categories),
        &FilterState::new(),
    );
    assert_eq!(view.total_expense, "262.5".parse::<Decimal>().unwrap());
    assert_eq!(view.category_totals.len(), 1);
    assert_eq!(view.category_totals.get("Food"), Some(Decimal::from(250)));
}

#[test]
fn one_odd_record_does_not_sink_the_collection() {
    let incomes: Vec<Transaction> = serde_json::from_value(json!([
        {"id": 1, "description": "Salary", "amount": "1000", "date": "2024-03-01"},
        {"id": 2, "description": null, "amount": "5", "date": null},
        {"id": "3", "description": 42, "amount": "7", "date": {"when": "today"}},
        {"id": "x", "description": "No id", "amount": "1_000", "date": "2024-03-04"}
    ]))
    .unwrap();

    assert_eq!(incomes.len(), 4);
    assert_eq!(incomes[1].description, "");
    assert_eq!(incomes[1].date, "");
    assert_eq!(incomes[2].id, 3);
    assert_eq!(incomes[2].description, "42");
    assert_eq!(incomes[2].date, "");
    assert_eq!(incomes[3].id, 0);
    assert_eq!(incomes[3].amount.parse(), None);

    let view = compute_view(
        &Snapshot::new(incomes, vec![], vec![]),
        &FilterState::new().with_month(MonthKey::new(2024, 3)),
    );
    assert_eq!(view.total_income, Decimal::from(1012));
    assert_eq!(view.filtered_incomes.len(), 2);
}

#[test]
fn month_keys_are_strict() {
    let key: MonthKey = "2024-03".parse().unwrap();
    assert_eq!(key.year(), 2024);
    assert_eq!(key.month(), 3);
    assert_eq!(key.to_string(), "2024-03");
    assert_eq!(" 2024-12 ".parse::<MonthKey>().unwrap().to_string(), "2024-12");
    for bad in ["2024-3", "2024-13", "24-03", "2024/03", "", "2024-03-01"] {
        assert!(bad.parse::<MonthKey>().is_err(), "{bad} should be rejected");
    }
    assert_eq!(serde_json::to_value(key).unwrap(), json!("2024-03"));
}

#[test]
fn canonical_dates_are_utc() {
    let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day);
    assert_eq!(canonical_date("2024-03-05"), d(2024, 3, 5));
    assert_eq!(canonical_date(" 2024-03-05 "), d(2024, 3, 5));
    assert_eq!(canonical_date("2024-03-31T22:00:00-03:00"), d(2024, 4, 1));
    assert_eq!(canonical_date("2024-04-01T01:00:00+02:00"), d(2024, 3, 31));
    assert_eq!(canonical_date("2024-04-01 01:00:00"), d(2024, 4, 1));
    assert_eq!(canonical_date("2024-04-01T01:00:00.250"), d(2024, 4, 1));
    assert_eq!(canonical_date("yesterday"), None);
    assert_eq!(canonical_date(""), None);
}

#[test]
fn money_has_two_decimals() {
    assert_eq!(fmt_money(&Decimal::from(1000)), "€1000.00");
    assert_eq!(fmt_money(&"12.345".parse().unwrap()), "€12.35");
    assert_eq!(fmt_money(&Decimal::ZERO), "€0.00");
}

#[test]
fn http_store_endpoints_stay_under_the_base_path() {
    let store = HttpStore::new("http://localhost:8000").unwrap();
    assert_eq!(
        store.endpoint("api/incomes").unwrap().as_str(),
        "http://localhost:8000/api/incomes"
    );
    let nested = HttpStore::new("https://example.com/bilancio").unwrap();
    assert_eq!(
        nested.endpoint("api/expenses").unwrap().as_str(),
        "https://example.com/bilancio/api/expenses"
    );
    assert!(HttpStore::new("not a url").is_err());
    assert!(HttpStore::new("mailto:me@example.com").is_err());
}

#[test]
fn undecodable_body_is_a_decode_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = thread::spawn(move || {
        let (mut conn, _) = listener.accept().unwrap();
        let mut buf = [0u8; 1024];
        let _ = conn.read(&mut buf).unwrap();
        let body = "not json";
        write!(
            conn,
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
        .unwrap();
    });

    let store = HttpStore::new(&format!("http://{addr}")).unwrap();
    let err = store.list_incomes().unwrap_err();
    server.join().unwrap();
    match err {
        StoreError::Decode { endpoint, .. } => assert!(endpoint.ends_with("/api/incomes")),
        other => panic!("expected a decode error, got {other:?}"),
    }
}
