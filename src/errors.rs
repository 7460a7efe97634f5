// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid month '{0}', expected YYYY-MM")]
pub struct InvalidMonth(pub String);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("record store returned {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },
    #[error("could not decode records from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: reqwest::Error,
    },
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("invalid record store url '{0}'")]
    Url(String),
    #[error("{collection} could not be loaded: {source}")]
    Incomplete {
        collection: &'static str,
        #[source]
        source: Box<StoreError>,
    },
}

/// Rejections raised by the new-transaction form before anything reaches
/// the record store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("invalid amount '{0}', expected a non-negative number")]
    Amount(String),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    Date(String),
    #[error("invalid category '{0}'")]
    Category(String),
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Month(#[from] InvalidMonth),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
