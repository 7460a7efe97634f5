// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::Snapshot;
use crate::errors::StoreError;
use crate::store::RecordStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loaded(Snapshot),
}

/// Identifies one load cycle. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

/// Pulls complete snapshots out of a [`RecordStore`].
///
/// Each load replaces the previous snapshot wholesale. A snapshot from a
/// cycle older than the last accepted one is discarded.
pub struct SnapshotLoader<S> {
    store: S,
    issued: u64,
    accepted: u64,
    state: LoadState,
}

impl<S: RecordStore> SnapshotLoader<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            issued: 0,
            accepted: 0,
            state: LoadState::NotLoaded,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        match &self.state {
            LoadState::Loaded(s) => Some(s),
            LoadState::NotLoaded => None,
        }
    }

    pub fn begin(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// Reads all three collections. Any failure aborts the whole cycle so
    /// a partial snapshot never escapes.
    pub fn fetch(&self) -> Result<Snapshot, StoreError> {
        let incomes = self.store.list_incomes().map_err(|e| incomplete("incomes", e))?;
        let expenses = self
            .store
            .list_expenses()
            .map_err(|e| incomplete("expenses", e))?;
        let categories = self
            .store
            .list_categories()
            .map_err(|e| incomplete("categories", e))?;
        tracing::debug!(
            incomes = incomes.len(),
            expenses = expenses.len(),
            categories = categories.len(),
            "fetched snapshot"
        );
        Ok(Snapshot::new(incomes, expenses, categories))
    }

    /// Installs `snapshot` unless a newer cycle already completed.
    pub fn commit(&mut self, ticket: LoadTicket, snapshot: Snapshot) -> bool {
        if ticket.0 <= self.accepted {
            tracing::debug!(
                ticket = ticket.0,
                accepted = self.accepted,
                "discarding stale snapshot"
            );
            return false;
        }
        self.accepted = ticket.0;
        self.state = LoadState::Loaded(snapshot);
        true
    }

    /// Runs one full load cycle. Returns whether the snapshot was installed.
    pub fn load(&mut self) -> Result<bool, StoreError> {
        let ticket = self.begin();
        match self.fetch() {
            Ok(snapshot) => Ok(self.commit(ticket, snapshot)),
            Err(err) => {
                tracing::warn!("load failed: {err}");
                Err(err)
            }
        }
    }
}

fn incomplete(collection: &'static str, source: StoreError) -> StoreError {
    StoreError::Incomplete {
        collection,
        source: Box::new(source),
    }
}
