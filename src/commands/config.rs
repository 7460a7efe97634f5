// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use super::REMOTE_SETTING;
use crate::store::HttpStore;
use crate::utils::{clear_setting, get_setting, pretty_table, required, set_setting};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, db_path: &Path, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-remote", sub)) => {
            let url = required(sub, "url")?.trim();
            let store =
                HttpStore::new(url).with_context(|| format!("Invalid remote url '{}'", url))?;
            set_setting(conn, REMOTE_SETTING, store.base_url().as_str())?;
            println!("Remote record store set to {}", store.base_url());
        }
        Some(("clear-remote", _)) => {
            clear_setting(conn, REMOTE_SETTING)?;
            println!("Using the local database at {}", db_path.display());
        }
        Some(("show", _)) => {
            let remote = get_setting(conn, REMOTE_SETTING)?;
            let rows = vec![
                vec!["database".to_string(), db_path.display().to_string()],
                vec![
                    REMOTE_SETTING.to_string(),
                    remote.unwrap_or_else(|| "(local)".to_string()),
                ],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
