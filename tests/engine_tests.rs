// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bilancio::engine::{
    compute_view, drilldown, filter_by_month, totals, totals_by_category, CategorySelection,
    FilterState, Snapshot,
};
use bilancio::models::{Amount, Category, MonthKey, Transaction};
use rust_decimal::Decimal;

fn tx(id: i64, amount: &str, date: &str, category_id: Option<i64>) -> Transaction {
    Transaction {
        id,
        description: format!("t{}", id),
        amount: Amount::new(amount),
        date: date.to_string(),
        category_id,
    }
}

fn cat(id: i64, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn month(s: &str) -> MonthKey {
    s.parse().unwrap()
}

fn scenario() -> Snapshot {
    Snapshot::new(
        vec![tx(1, "1000", "2024-03-01", None)],
        vec![
            tx(1, "200", "2024-03-05", Some(2)),
            tx(2, "50", "2024-04-01", Some(2)),
        ],
        vec![cat(1, "Income"), cat(2, "Food")],
    )
}

#[test]
fn unfiltered_totals_and_balance() {
    let view = compute_view(&scenario(), &FilterState::new());
    assert_eq!(format!("{:.2}", view.total_income), "1000.00");
    assert_eq!(format!("{:.2}", view.total_expense), "250.00");
    assert_eq!(format!("{:.2}", view.balance), "750.00");
    assert_eq!(view.filtered_expenses.len(), 2);
    assert_eq!(view.category_totals.get("Food"), Some(dec("250")));
    assert!(view.drilldown.is_empty());
    assert_eq!(view.selected_category, None);
}

#[test]
fn month_filter_narrows_groups_and_drilldown() {
    let filter = FilterState::new()
        .with_month(Some(month("2024-03")))
        .with_category("Food");
    let view = compute_view(&scenario(), &filter);

    // totals always cover the whole snapshot
    assert_eq!(view.total_expense, dec("250"));
    assert_eq!(view.filtered_expenses.len(), 1);
    assert_eq!(view.filtered_expenses[0].amount_value(), dec("200"));
    assert_eq!(view.filtered_incomes.len(), 1);
    assert_eq!(view.category_totals.len(), 1);
    assert_eq!(format!("{:.2}", view.category_totals.get("Food").unwrap()), "200.00");
    assert_eq!(view.drilldown, vec![tx(1, "200", "2024-03-05", Some(2))]);
    assert_eq!(view.selected_category.as_deref(), Some("Food"));
}

#[test]
fn unknown_category_is_counted_but_not_grouped() {
    let snapshot = Snapshot::new(
        vec![],
        vec![
            tx(1, "30", "2024-03-05", Some(99)),
            tx(2, "20", "2024-03-06", Some(2)),
            tx(3, "5", "2024-03-07", None),
        ],
        vec![cat(2, "Food")],
    );
    let view = compute_view(&snapshot, &FilterState::new());
    assert_eq!(view.total_expense, dec("55"));
    assert_eq!(view.category_totals.names().collect::<Vec<_>>(), vec!["Food"]);
    assert_eq!(view.category_totals.get("Food"), Some(dec("20")));
}

#[test]
fn malformed_amounts_count_as_zero() {
    let incomes = vec![
        tx(1, "abc", "2024-03-01", None),
        tx(2, "100.50", "2024-03-02", None),
        Transaction {
            amount: Amount::missing(),
            ..tx(3, "", "2024-03-03", None)
        },
    ];
    let expenses = vec![
        tx(1, "-40", "2024-03-01", Some(2)),
        tx(2, "", "2024-03-01", Some(2)),
        tx(3, "1_000", "2024-03-01", Some(2)),
    ];
    let t = totals(&incomes, &expenses);
    assert_eq!(t.income, dec("100.50"));
    assert_eq!(t.expense, Decimal::ZERO);
    assert_eq!(t.balance, dec("100.50"));

    let groups = totals_by_category(&expenses, &[cat(2, "Food")]);
    assert_eq!(groups.get("Food"), Some(Decimal::ZERO));
}

#[test]
fn balance_is_income_minus_expense() {
    let incomes = vec![tx(1, "10.10", "2024-01-01", None), tx(2, "1e2", "2024-01-02", None)];
    let expenses = vec![tx(1, "200.25", "2024-01-03", Some(2)), tx(2, "x", "2024-01-04", Some(2))];
    let t = totals(&incomes, &expenses);
    assert_eq!(t.income, dec("110.10"));
    assert_eq!(t.expense, dec("200.25"));
    assert_eq!(t.income - t.expense, t.balance);
    assert!(t.balance.is_sign_negative());
}

#[test]
fn month_filter_is_identity_without_key() {
    let txs = vec![
        tx(3, "1", "2024-05-01", None),
        tx(1, "2", "not a date", None),
        tx(2, "3", "2023-01-09", None),
    ];
    assert_eq!(filter_by_month(&txs, None), txs);
}

#[test]
fn month_filter_keeps_order_and_is_idempotent() {
    let txs = vec![
        tx(1, "1", "2024-03-31", None),
        tx(2, "1", "2024-04-01", None),
        tx(3, "1", "2024-03-01", None),
        tx(4, "1", "", None),
        tx(5, "1", "2024-03-15", None),
    ];
    let key = month("2024-03");
    let once = filter_by_month(&txs, Some(&key));
    assert_eq!(once.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3, 5]);
    assert!(once.iter().all(|t| key.contains(t.calendar_date().unwrap())));
    assert_eq!(filter_by_month(&once, Some(&key)), once);
}

#[test]
fn month_filter_normalizes_offsets_to_utc() {
    let txs = vec![
        // 23:30 at UTC-02:00 is already April in UTC
        tx(1, "1", "2024-03-31T23:30:00-02:00", None),
        // 00:30 at UTC+02:00 is still March in UTC
        tx(2, "1", "2024-04-01T00:30:00+02:00", None),
        tx(3, "1", "2024-03-31T23:59:59Z", None),
        tx(4, "1", "2024-03-20 18:00:00", None),
    ];
    let march = filter_by_month(&txs, Some(&month("2024-03")));
    assert_eq!(march.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 3, 4]);
    let april = filter_by_month(&txs, Some(&month("2024-04")));
    assert_eq!(april.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1]);
}

#[test]
fn category_totals_keep_first_encounter_order() {
    let categories = vec![cat(2, "Food"), cat(3, "Rent"), cat(4, "Fun")];
    let expenses = vec![
        tx(1, "10", "2024-03-01", Some(4)),
        tx(2, "500", "2024-03-01", Some(3)),
        tx(3, "5", "2024-03-02", Some(4)),
        tx(4, "12.5", "2024-03-03", Some(2)),
    ];
    let groups = totals_by_category(&expenses, &categories);
    assert_eq!(groups.names().collect::<Vec<_>>(), vec!["Fun", "Rent", "Food"]);
    assert_eq!(groups.get("Fun"), Some(dec("15")));
    assert_eq!(groups.get("Rent"), Some(dec("500")));
    assert_eq!(groups.get("Food"), Some(dec("12.5")));
    assert_eq!(groups.get("Income"), None);

    let json = serde_json::to_string(&groups).unwrap();
    assert_eq!(json, r#"{"Fun":"15","Rent":"500","Food":"12.5"}"#);
}

#[test]
fn categories_sharing_a_name_share_a_total() {
    let categories = vec![cat(2, "Food"), cat(7, "Food")];
    let expenses = vec![
        tx(1, "10", "2024-03-01", Some(2)),
        tx(2, "5", "2024-03-01", Some(7)),
    ];
    assert_eq!(totals_by_category(&expenses, &categories).get("Food"), Some(dec("15")));
    let picked = drilldown(
        &expenses,
        &categories,
        &CategorySelection::Selected("Food".into()),
    );
    assert_eq!(picked.len(), 2);
}

#[test]
fn drilldown_states() {
    let snapshot = scenario();
    let unselected = drilldown(
        snapshot.expenses(),
        snapshot.categories(),
        &CategorySelection::Unselected,
    );
    assert!(unselected.is_empty());

    let food = drilldown(
        snapshot.expenses(),
        snapshot.categories(),
        &CategorySelection::Selected("Food".into()),
    );
    assert_eq!(food.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);

    let missing = drilldown(
        snapshot.expenses(),
        snapshot.categories(),
        &CategorySelection::Selected("Travel".into()),
    );
    assert!(missing.is_empty());
}

#[test]
fn selection_survives_a_snapshot_without_the_category() {
    let filter = FilterState::new().with_category("Food");
    let gone = Snapshot::new(
        vec![],
        vec![tx(1, "200", "2024-03-05", Some(2))],
        vec![cat(1, "Income")],
    );
    let view = compute_view(&gone, &filter);
    assert!(view.drilldown.is_empty());
    assert_eq!(view.selected_category.as_deref(), Some("Food"));

    let back = compute_view(&scenario(), &filter);
    assert_eq!(back.drilldown.len(), 2);
}

#[test]
fn compute_view_is_repeatable() {
    let snapshot = scenario();
    let filter = FilterState::new()
        .with_month(Some(month("2024-04")))
        .with_category("Food");
    let first = compute_view(&snapshot, &filter);
    let second = compute_view(&snapshot, &filter);
    assert_eq!(first, second);
    assert_eq!(snapshot, scenario());
}

#[test]
fn clearing_the_category_empties_drilldown() {
    let mut filter = FilterState::new().with_category("Food");
    filter.clear_category();
    assert_eq!(filter.category(), &CategorySelection::Unselected);
    let view = compute_view(&scenario(), &filter);
    assert!(view.drilldown.is_empty());
    assert_eq!(view.selected_category, None);
}
