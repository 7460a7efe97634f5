// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::dashboard::Dashboard;
use crate::engine::{filter_by_month, resolve_category};
use crate::form::NewTransactionForm;
use crate::loader::SnapshotLoader;
use crate::models::{NewTransaction, Transaction, TransactionKind};
use crate::store::RecordStore;
use crate::utils::{fmt_date, fmt_money, maybe_print_json, parse_month, pretty_table, required};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle<S: RecordStore>(store: S, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let tx = add(store, sub)?;
            println!(
                "Recorded {} '{}' of {} on {}",
                tx.kind,
                tx.description,
                fmt_money(&tx.amount),
                tx.date
            );
        }
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

/// Builds the creation form from the arguments and submits it. A category
/// given by name is looked up in the current catalog.
pub fn add<S: RecordStore>(store: S, sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let mut dashboard = Dashboard::new(store);
    let category = required(sub, "category")?.trim().to_string();
    let category_id = if category.is_empty() || category.parse::<i64>().is_ok() {
        category
    } else {
        dashboard.refresh().context("Could not load categories")?;
        let id = dashboard
            .loader()
            .snapshot()
            .and_then(|s| {
                s.categories()
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(&category))
            })
            .map(|c| c.id)
            .with_context(|| format!("Category '{}' not found", category))?;
        id.to_string()
    };

    let mut form = NewTransactionForm {
        description: required(sub, "description")?.clone(),
        amount: required(sub, "amount")?.clone(),
        date: required(sub, "date")?.clone(),
        category_id,
    };
    Ok(dashboard.submit(&mut form)?)
}

fn list<S: RecordStore>(store: S, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.to_string(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Kind", "Description", "Amount", "Category"], rows)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub kind: TransactionKind,
    pub date: String,
    pub description: String,
    pub amount: String,
    pub category: String,
}

/// Newest first; records with an unreadable date sort last.
pub fn query_rows<S: RecordStore>(
    store: S,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(parse_month(m)?),
        None => None,
    };
    let kind = sub
        .get_one::<String>("kind")
        .map(String::as_str)
        .unwrap_or("all");

    let mut loader = SnapshotLoader::new(store);
    loader.load().context("Record store not loaded")?;
    let snapshot = loader.snapshot().context("Record store not loaded")?;

    let mut picked: Vec<(TransactionKind, Transaction)> = Vec::new();
    if kind != "expense" {
        for t in filter_by_month(snapshot.incomes(), month.as_ref()) {
            picked.push((TransactionKind::Income, t));
        }
    }
    if kind != "income" {
        for t in filter_by_month(snapshot.expenses(), month.as_ref()) {
            picked.push((TransactionKind::Expense, t));
        }
    }
    picked.sort_by(|a, b| b.1.calendar_date().cmp(&a.1.calendar_date()));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        picked.truncate(*limit);
    }

    let data = picked
        .into_iter()
        .map(|(kind, t)| {
            let category = match kind {
                TransactionKind::Income => String::new(),
                TransactionKind::Expense => {
                    resolve_category(snapshot.categories(), t.category_id)
                        .map(|c| c.name.clone())
                        .unwrap_or_default()
                }
            };
            let amount = fmt_money(&t.amount_value());
            TransactionRow {
                kind,
                date: fmt_date(&t.date),
                description: t.description,
                amount,
                category,
            }
        })
        .collect();
    Ok(data)
}
