// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Category;
use crate::store::{RecordStore, SqliteStore};
use crate::utils::{maybe_print_json, pretty_table, required};
use anyhow::{Context, Result};

/// Categories can only be created locally; the remote record store
/// exposes them read-only.
pub fn add(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<i64> {
    let name = required(sub, "name")?.trim();
    if name.is_empty() {
        anyhow::bail!("Category name cannot be empty");
    }
    let id = store
        .add_category(name)
        .with_context(|| format!("Could not add category '{}'", name))?;
    println!("Added category '{}' (id {})", name, id);
    Ok(id)
}

pub fn list<S: RecordStore>(store: S, sub: &clap::ArgMatches) -> Result<Vec<Category>> {
    let data = store.list_categories().context("Could not list categories")?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|c| vec![c.id.to_string(), c.name.clone()])
            .collect();
        println!("{}", pretty_table(&["Id", "Category"], rows));
    }
    Ok(data)
}
