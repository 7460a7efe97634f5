// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod config;
pub mod summary;
pub mod transactions;

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::store::{HttpStore, RecordStore, SqliteStore};
use crate::utils::get_setting;

pub const REMOTE_SETTING: &str = "record_store_url";

/// Picks the record store: `--remote`, then the stored remote URL, then
/// the local database behind `conn`.
pub fn open_store(conn: Connection, m: &clap::ArgMatches) -> Result<Box<dyn RecordStore>> {
    let remote = match m.get_one::<String>("remote") {
        Some(url) => Some(url.clone()),
        None => get_setting(&conn, REMOTE_SETTING)?,
    };
    match remote {
        Some(url) => {
            tracing::debug!("using remote record store at {url}");
            let store = HttpStore::new(&url)
                .with_context(|| format!("Could not set up record store at {}", url))?;
            Ok(Box::new(store))
        }
        None => Ok(Box::new(SqliteStore::new(conn))),
    }
}
