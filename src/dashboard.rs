// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{compute_view, DerivedView, FilterState};
use crate::errors::DashboardError;
use crate::form::NewTransactionForm;
use crate::loader::SnapshotLoader;
use crate::models::{MonthKey, NewTransaction};
use crate::store::RecordStore;

/// Holds the loaded snapshot together with the user's filter selections
/// and turns interaction events into reloads or view recomputations.
pub struct Dashboard<S> {
    loader: SnapshotLoader<S>,
    filter: FilterState,
}

impl<S: RecordStore> Dashboard<S> {
    pub fn new(store: S) -> Self {
        Self::with_filter(store, FilterState::default())
    }

    pub fn with_filter(store: S, filter: FilterState) -> Self {
        Self {
            loader: SnapshotLoader::new(store),
            filter,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn loader(&self) -> &SnapshotLoader<S> {
        &self.loader
    }

    pub fn is_loaded(&self) -> bool {
        self.loader.snapshot().is_some()
    }

    /// A failed refresh keeps whatever snapshot was loaded before.
    pub fn refresh(&mut self) -> Result<(), DashboardError> {
        self.loader.load()?;
        Ok(())
    }

    /// Changes the month filter and reloads. An empty string clears it.
    pub fn select_month(&mut self, month: Option<&str>) -> Result<(), DashboardError> {
        let month = match month.map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(s.parse::<MonthKey>()?),
        };
        self.filter.select_month(month);
        self.refresh()
    }

    pub fn select_category(&mut self, name: &str) {
        self.filter.select_category(name);
    }

    pub fn clear_category(&mut self) {
        self.filter.clear_category();
    }

    /// Validates `form`, sends it to the store and reloads. The form is
    /// reset only once the store accepted it.
    pub fn submit(
        &mut self,
        form: &mut NewTransactionForm,
    ) -> Result<NewTransaction, DashboardError> {
        let tx = form.validate()?;
        self.loader.store().create_transaction(&tx)?;
        tracing::info!("recorded {} '{}'", tx.kind, tx.description);
        form.clear();
        self.refresh()?;
        Ok(tx)
    }

    /// `None` until the first successful load.
    pub fn view(&self) -> Option<DerivedView> {
        self.loader
            .snapshot()
            .map(|snapshot| compute_view(snapshot, &self.filter))
    }
}
