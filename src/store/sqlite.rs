// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::types::Value;
use rusqlite::{params, Connection};

use super::RecordStore;
use crate::errors::StoreError;
use crate::models::{Amount, Category, NewTransaction, Transaction, TransactionKind};

/// Local record store backed by the SQLite schema in [`crate::db`].
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn add_category(&self, name: &str) -> Result<i64, StoreError> {
        self.conn
            .execute("INSERT INTO categories(name) VALUES (?1)", params![name])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_transactions(
        &self,
        sql: &str,
        with_category: bool,
    ) -> Result<Vec<Transaction>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut data = Vec::new();
        while let Some(r) = rows.next()? {
            let category_id = if with_category {
                id_from_value(r.get(4)?)
            } else {
                None
            };
            data.push(Transaction {
                id: r.get(0)?,
                description: text_from_value(r.get(1)?).unwrap_or_default(),
                amount: text_from_value(r.get(2)?).map_or_else(Amount::missing, Amount::new),
                date: text_from_value(r.get(3)?).unwrap_or_default(),
                category_id,
            });
        }
        Ok(data)
    }
}

fn text_from_value(v: Value) -> Option<String> {
    match v {
        Value::Text(s) => Some(s),
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) => Some(f.to_string()),
        Value::Null | Value::Blob(_) => None,
    }
}

fn id_from_value(v: Value) -> Option<i64> {
    match v {
        Value::Integer(i) => Some(i),
        Value::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl RecordStore for SqliteStore {
    fn list_incomes(&self) -> Result<Vec<Transaction>, StoreError> {
        self.list_transactions(
            "SELECT id, description, amount, date FROM incomes ORDER BY id",
            false,
        )
    }

    fn list_expenses(&self) -> Result<Vec<Transaction>, StoreError> {
        self.list_transactions(
            "SELECT id, description, amount, date, category_id FROM expenses ORDER BY id",
            true,
        )
    }

    fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM categories ORDER BY id")?;
        let rows = stmt.query_map([], |r| {
            Ok(Category {
                id: r.get(0)?,
                name: r.get(1)?,
            })
        })?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        Ok(data)
    }

    fn create_transaction(&self, tx: &NewTransaction) -> Result<(), StoreError> {
        match tx.kind {
            TransactionKind::Income => self.conn.execute(
                "INSERT INTO incomes(description, amount, date) VALUES (?1, ?2, ?3)",
                params![tx.description, tx.amount.to_string(), tx.date.to_string()],
            )?,
            TransactionKind::Expense => self.conn.execute(
                "INSERT INTO expenses(description, amount, date, category_id)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    tx.description,
                    tx.amount.to_string(),
                    tx.date.to_string(),
                    tx.category_id
                ],
            )?,
        };
        Ok(())
    }
}
