// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregation over an immutable [`Snapshot`]: totals, month filtering,
//! per-category grouping and category drill-down.
//!
//! Everything here is a pure function of its inputs. The caller owns the
//! [`FilterState`] and recomputes a [`DerivedView`] whenever either the
//! snapshot or the filter changes.

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::models::{Category, MonthKey, Transaction};

/// Point-in-time copy of every record used by one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    incomes: Vec<Transaction>,
    expenses: Vec<Transaction>,
    categories: Vec<Category>,
}

impl Snapshot {
    pub fn new(
        incomes: Vec<Transaction>,
        expenses: Vec<Transaction>,
        categories: Vec<Category>,
    ) -> Self {
        Self {
            incomes,
            expenses,
            categories,
        }
    }

    pub fn incomes(&self) -> &[Transaction] {
        &self.incomes
    }

    pub fn expenses(&self) -> &[Transaction] {
        &self.expenses
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}

/// Drill-down selection. Only an explicit clear returns to `Unselected`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "name")]
pub enum CategorySelection {
    #[default]
    Unselected,
    Selected(String),
}

impl CategorySelection {
    pub fn name(&self) -> Option<&str> {
        match self {
            CategorySelection::Unselected => None,
            CategorySelection::Selected(name) => Some(name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    month: Option<MonthKey>,
    category: CategorySelection,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_month(mut self, month: Option<MonthKey>) -> Self {
        self.month = month;
        self
    }

    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        self.select_category(name);
        self
    }

    pub fn month(&self) -> Option<&MonthKey> {
        self.month.as_ref()
    }

    pub fn category(&self) -> &CategorySelection {
        &self.category
    }

    pub fn select_month(&mut self, month: Option<MonthKey>) {
        self.month = month;
    }

    pub fn select_category(&mut self, name: impl Into<String>) {
        self.category = CategorySelection::Selected(name.into());
    }

    pub fn clear_category(&mut self) {
        self.category = CategorySelection::Unselected;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    pub total: Decimal,
}

/// Category name to total, iterated in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals(Vec<CategoryTotal>);

impl CategoryTotals {
    pub fn get(&self, name: &str) -> Option<Decimal> {
        self.0.iter().find(|c| c.name == name).map(|c| c.total)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryTotal> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn add(&mut self, name: &str, amount: Decimal) {
        match self.0.iter_mut().find(|c| c.name == name) {
            Some(entry) => entry.total = checked_sum(entry.total, amount),
            None => self.0.push(CategoryTotal {
                name: name.to_string(),
                total: amount,
            }),
        }
    }
}

impl<'a> IntoIterator for &'a CategoryTotals {
    type Item = &'a CategoryTotal;
    type IntoIter = std::slice::Iter<'a, CategoryTotal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for c in &self.0 {
            map.serialize_entry(&c.name, &c.total)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedView {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub filtered_incomes: Vec<Transaction>,
    pub filtered_expenses: Vec<Transaction>,
    pub category_totals: CategoryTotals,
    pub selected_category: Option<String>,
    pub drilldown: Vec<Transaction>,
}

// An amount that would overflow the running sum is dropped like a
// malformed one.
fn checked_sum(acc: Decimal, amount: Decimal) -> Decimal {
    acc.checked_add(amount).unwrap_or(acc)
}

fn sum_amounts(txs: &[Transaction]) -> Decimal {
    txs.iter()
        .fold(Decimal::ZERO, |acc, t| checked_sum(acc, t.amount_value()))
}

pub fn totals(incomes: &[Transaction], expenses: &[Transaction]) -> Totals {
    let income = sum_amounts(incomes);
    let expense = sum_amounts(expenses);
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Keeps the transactions whose UTC calendar date falls in `month`, in
/// input order. `None` keeps everything.
pub fn filter_by_month(txs: &[Transaction], month: Option<&MonthKey>) -> Vec<Transaction> {
    match month {
        None => txs.to_vec(),
        Some(key) => txs
            .iter()
            .filter(|t| t.month().as_ref() == Some(key))
            .cloned()
            .collect(),
    }
}

pub fn resolve_category(categories: &[Category], id: Option<i64>) -> Option<&Category> {
    let id = id?;
    categories.iter().find(|c| c.id == id)
}

/// Sums expenses per resolved category name.
///
/// Expenses whose `category_id` matches no category are left out of every
/// total; they still count towards [`totals`].
pub fn totals_by_category(expenses: &[Transaction], categories: &[Category]) -> CategoryTotals {
    let mut out = CategoryTotals::default();
    for expense in expenses {
        if let Some(category) = resolve_category(categories, expense.category_id) {
            out.add(&category.name, expense.amount_value());
        }
    }
    out
}

pub fn drilldown(
    expenses: &[Transaction],
    categories: &[Category],
    selection: &CategorySelection,
) -> Vec<Transaction> {
    let Some(name) = selection.name() else {
        return Vec::new();
    };
    expenses
        .iter()
        .filter(|e| resolve_category(categories, e.category_id).is_some_and(|c| c.name == name))
        .cloned()
        .collect()
}

/// Totals cover the whole snapshot; the month filter only narrows the
/// lists, the category totals and the drill-down.
pub fn compute_view(snapshot: &Snapshot, filter: &FilterState) -> DerivedView {
    let Totals {
        income,
        expense,
        balance,
    } = totals(snapshot.incomes(), snapshot.expenses());
    let filtered_incomes = filter_by_month(snapshot.incomes(), filter.month());
    let filtered_expenses = filter_by_month(snapshot.expenses(), filter.month());
    let category_totals = totals_by_category(&filtered_expenses, snapshot.categories());
    let detail = drilldown(&filtered_expenses, snapshot.categories(), filter.category());
    DerivedView {
        total_income: income,
        total_expense: expense,
        balance,
        filtered_incomes,
        filtered_expenses,
        category_totals,
        selected_category: filter.category().name().map(str::to_string),
        drilldown: detail,
    }
}
