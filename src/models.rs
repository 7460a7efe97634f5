// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::InvalidMonth;
use crate::utils::{canonical_date, coerce_decimal};

/// Category id reserved for incomes in the creation workflow.
pub const INCOME_CATEGORY_ID: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Income => f.write_str("income"),
            TransactionKind::Expense => f.write_str("expense"),
        }
    }
}

/// Amount exactly as the record store handed it over.
///
/// Coercion to a number happens on use: anything that is not a
/// non-negative decimal counts as zero in totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Amount(Option<String>);

impl Amount {
    pub fn new(raw: impl Into<String>) -> Self {
        Amount(Some(raw.into()))
    }

    pub fn missing() -> Self {
        Amount(None)
    }

    pub fn raw(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// The coerced value, or `None` when the raw value is malformed.
    pub fn parse(&self) -> Option<Decimal> {
        let s = self.0.as_deref()?.trim();
        if s.is_empty() {
            return None;
        }
        let d = coerce_decimal(s)?;
        if d.is_sign_negative() && !d.is_zero() {
            return None;
        }
        Some(d)
    }

    pub fn value(&self) -> Decimal {
        self.parse().unwrap_or(Decimal::ZERO)
    }
}

impl From<Decimal> for Amount {
    fn from(d: Decimal) -> Self {
        Amount(Some(d.to_string()))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(raw) => serializer.serialize_str(raw),
            None => serializer.serialize_none(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Int(i64),
    Float(f64),
    Text(String),
    Null(()),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawScalar::deserialize(deserializer)? {
            RawScalar::Int(i) => Amount::new(i.to_string()),
            RawScalar::Float(f) => Amount::new(f.to_string()),
            RawScalar::Text(s) => Amount::new(s),
            RawScalar::Null(()) | RawScalar::Other(_) => Amount::missing(),
        })
    }
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match RawScalar::deserialize(deserializer)? {
        RawScalar::Int(i) => Some(i),
        RawScalar::Text(s) => s.trim().parse().ok(),
        _ => None,
    })
}

// Unreadable ids fall back to 0; nothing is keyed on a record's own id.
fn lenient_record_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(lenient_id(deserializer)?.unwrap_or_default())
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawScalar::deserialize(deserializer)? {
        RawScalar::Text(s) => s,
        RawScalar::Int(i) => i.to_string(),
        RawScalar::Float(f) => f.to_string(),
        RawScalar::Null(()) | RawScalar::Other(_) => String::new(),
    })
}

/// An income or expense record. Both kinds share this shape; only
/// expenses carry a meaningful `category_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, deserialize_with = "lenient_record_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default)]
    pub amount: Amount,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub category_id: Option<i64>,
}

impl Transaction {
    pub fn amount_value(&self) -> Decimal {
        self.amount.value()
    }

    /// Calendar date after UTC normalization.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        canonical_date(&self.date)
    }

    pub fn month(&self) -> Option<MonthKey> {
        self.calendar_date().map(MonthKey::from_date)
    }
}

/// A validated `YYYY-MM` month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::from_date)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for MonthKey {
    type Err = InvalidMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || InvalidMonth(s.to_string());
        let (y, m) = s.split_once('-').ok_or_else(invalid)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A creation request that already passed form validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: Option<i64>,
}
