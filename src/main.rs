// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::Result;

use bilancio::store::SqliteStore;
use bilancio::{cli, commands, db, logging};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    logging::init(matches.get_count("verbose"));

    let (conn, path) = db::open_or_init(matches.get_one::<String>("db").map(Path::new))?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("config", sub)) => commands::config::handle(&conn, &path, sub)?,
        Some(("category", sub)) => match sub.subcommand() {
            Some(("add", add_m)) => {
                if add_m.get_one::<String>("remote").is_some() {
                    anyhow::bail!("Categories can only be added to the local database");
                }
                commands::categories::add(&SqliteStore::new(conn), add_m)?;
            }
            Some(("list", list_m)) => {
                let store = commands::open_store(conn, list_m)?;
                commands::categories::list(store, list_m)?;
            }
            _ => {}
        },
        Some(("tx", sub)) => {
            let store = commands::open_store(conn, sub)?;
            commands::transactions::handle(store, sub)?;
        }
        Some(("summary", sub)) => {
            let store = commands::open_store(conn, sub)?;
            commands::summary::handle(store, sub)?;
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
