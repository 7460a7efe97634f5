// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::dashboard::Dashboard;
use crate::engine::{DerivedView, FilterState};
use crate::store::RecordStore;
use crate::utils::{fmt_date, fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;

pub fn handle<S: RecordStore>(store: S, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let Some(view) = build_view(store, sub)? else {
        println!("Loading... (record store unavailable)");
        return Ok(());
    };
    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }

    println!("Current balance");
    println!(
        "{}",
        pretty_table(
            &["Total income", "Total expense", "Balance"],
            vec![vec![
                fmt_money(&view.total_income),
                fmt_money(&view.total_expense),
                fmt_money(&view.balance),
            ]],
        )
    );

    let rows: Vec<Vec<String>> = view
        .category_totals
        .iter()
        .map(|c| vec![c.name.clone(), fmt_money(&c.total)])
        .collect();
    match sub.get_one::<String>("month") {
        Some(month) => println!("Totals by category for {}", month.trim()),
        None => println!("Totals by category"),
    }
    println!("{}", pretty_table(&["Category", "Total"], rows));

    if let Some(name) = &view.selected_category {
        let rows: Vec<Vec<String>> = view
            .drilldown
            .iter()
            .map(|e| {
                vec![
                    e.description.clone(),
                    fmt_money(&e.amount_value()),
                    fmt_date(&e.date),
                ]
            })
            .collect();
        println!("Details for category: {}", name);
        println!("{}", pretty_table(&["Description", "Amount", "Date"], rows));
    }
    Ok(())
}

pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<FilterState> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(parse_month(m)?),
        None => None,
    };
    let mut filter = FilterState::new().with_month(month);
    if let Some(name) = sub.get_one::<String>("category") {
        filter.select_category(name.trim());
    }
    Ok(filter)
}

/// `None` when the record store could not be loaded.
pub fn build_view<S: RecordStore>(
    store: S,
    sub: &clap::ArgMatches,
) -> Result<Option<DerivedView>> {
    let filter = filter_from_args(sub)?;
    let mut dashboard = Dashboard::with_filter(store, filter);
    if let Err(err) = dashboard.refresh() {
        tracing::warn!("summary not loaded: {err}");
    }
    Ok(dashboard.view())
}
