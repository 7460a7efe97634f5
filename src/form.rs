// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::models::{NewTransaction, TransactionKind, INCOME_CATEGORY_ID};
use crate::utils::coerce_decimal;

/// Raw new-transaction input, every field as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransactionForm {
    pub description: String,
    pub amount: String,
    pub date: String,
    pub category_id: String,
}

fn non_empty<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let v = value.trim();
    if v.is_empty() {
        Err(ValidationError::Missing(field))
    } else {
        Ok(v)
    }
}

impl NewTransactionForm {
    /// Checks the required fields and coerces them. Picking the reserved
    /// income category yields an income, any other category an expense.
    pub fn validate(&self) -> Result<NewTransaction, ValidationError> {
        let description = non_empty(&self.description, "description")?;
        let amount = non_empty(&self.amount, "amount")?;
        let date = non_empty(&self.date, "date")?;
        let category = non_empty(&self.category_id, "category")?;

        let amount = coerce_decimal(amount)
            .filter(|d| !d.is_sign_negative() || d.is_zero())
            .ok_or_else(|| ValidationError::Amount(amount.to_string()))?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| ValidationError::Date(date.to_string()))?;
        let category_id: i64 = category
            .parse()
            .map_err(|_| ValidationError::Category(category.to_string()))?;

        let (kind, category_id) = if category_id == INCOME_CATEGORY_ID {
            (TransactionKind::Income, None)
        } else {
            (TransactionKind::Expense, Some(category_id))
        };
        Ok(NewTransaction {
            kind,
            description: description.to_string(),
            amount,
            date,
            category_id,
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
