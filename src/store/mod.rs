// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record store backends holding the persisted incomes, expenses and
//! categories.

pub mod http;
pub mod sqlite;

pub use http::HttpStore;
pub use sqlite::SqliteStore;

use crate::errors::StoreError;
use crate::models::{Category, NewTransaction, Transaction};

pub trait RecordStore {
    fn list_incomes(&self) -> Result<Vec<Transaction>, StoreError>;
    fn list_expenses(&self) -> Result<Vec<Transaction>, StoreError>;
    fn list_categories(&self) -> Result<Vec<Category>, StoreError>;
    fn create_transaction(&self, tx: &NewTransaction) -> Result<(), StoreError>;
}

impl<T: RecordStore + ?Sized> RecordStore for &T {
    fn list_incomes(&self) -> Result<Vec<Transaction>, StoreError> {
        (**self).list_incomes()
    }

    fn list_expenses(&self) -> Result<Vec<Transaction>, StoreError> {
        (**self).list_expenses()
    }

    fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        (**self).list_categories()
    }

    fn create_transaction(&self, tx: &NewTransaction) -> Result<(), StoreError> {
        (**self).create_transaction(tx)
    }
}

impl<T: RecordStore + ?Sized> RecordStore for Box<T> {
    fn list_incomes(&self) -> Result<Vec<Transaction>, StoreError> {
        (**self).list_incomes()
    }

    fn list_expenses(&self) -> Result<Vec<Transaction>, StoreError> {
        (**self).list_expenses()
    }

    fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        (**self).list_categories()
    }

    fn create_transaction(&self, tx: &NewTransaction) -> Result<(), StoreError> {
        (**self).create_transaction(tx)
    }
}
