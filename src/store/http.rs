// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use reqwest::Url;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::RecordStore;
use crate::errors::StoreError;
use crate::models::{Category, NewTransaction, Transaction, TransactionKind};
use crate::utils::http_client;

const INCOMES: &str = "api/incomes";
const EXPENSES: &str = "api/expenses";
const CATEGORIES: &str = "api/categories";

/// REST record store exposing `/api/incomes`, `/api/expenses` and
/// `/api/categories`.
#[derive(Debug, Clone)]
pub struct HttpStore {
    base_url: Url,
    http: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct Payload<'a> {
    description: &'a str,
    amount: Decimal,
    date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    category_id: Option<i64>,
}

impl HttpStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let mut base_url =
            Url::parse(base_url.trim()).map_err(|_| StoreError::Url(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::Url(base_url.to_string()));
        }
        // Url::join drops the last path segment unless it ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            http: http_client()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(path)
            .map_err(|_| StoreError::Url(format!("{}{}", self.base_url, path)))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
        let endpoint = self.endpoint(path)?;
        let res = self.http.get(endpoint.clone()).send()?;
        let status = res.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        res.json::<T>().map_err(|source| StoreError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

impl RecordStore for HttpStore {
    fn list_incomes(&self) -> Result<Vec<Transaction>, StoreError> {
        self.get_json(INCOMES)
    }

    fn list_expenses(&self) -> Result<Vec<Transaction>, StoreError> {
        self.get_json(EXPENSES)
    }

    fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.get_json(CATEGORIES)
    }

    fn create_transaction(&self, tx: &NewTransaction) -> Result<(), StoreError> {
        let (path, category_id) = match tx.kind {
            TransactionKind::Income => (INCOMES, None),
            TransactionKind::Expense => (EXPENSES, tx.category_id),
        };
        let endpoint = self.endpoint(path)?;
        let payload = Payload {
            description: &tx.description,
            amount: tx.amount,
            date: tx.date,
            category_id,
        };
        let res = self.http.post(endpoint.clone()).json(&payload).send()?;
        let status = res.status();
        if !status.is_success() {
            tracing::warn!("create {} rejected with {}", tx.kind, status);
            return Err(StoreError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
