//! Application lifecycle - Wires the store to the persistence adapter.
//!
//! [`FinanceApp::init`] must complete before any view reads state: it restores the
//! persisted blob, builds the store and attaches the background writer.
//! [`FinanceApp::shutdown`] writes the final state and stops the writer.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::{
    config::app::AppConfig,
    core::store::{Action, AppState, StateListener, Store},
    errors::Result,
    persistence::{BlobStorage, Persistor, RehydrateOutcome, rehydrate},
};

/// Owns the store and its persistence for the lifetime of the process.
#[derive(Debug)]
pub struct FinanceApp {
    store: Store,
    persistor: Persistor,
    outcome: RehydrateOutcome,
}

impl FinanceApp {
    /// Rehydrates the store from `storage` and starts persisting every change.
    ///
    /// # Arguments
    /// * `storage` - Blob backend, shared with the background writer
    /// * `config` - Supplies the rehydration timeout
    pub async fn init<S: BlobStorage>(storage: Arc<S>, config: &AppConfig) -> Self {
        let (state, outcome) = rehydrate(storage.as_ref(), config.rehydrate_timeout()).await;
        info!(
            ?outcome,
            transactions = state.transactions.len(),
            categories = state.categories.all().len(),
            "Store initialized"
        );

        let persistor = Persistor::start(storage);
        let mut store = Store::new(state);
        store.subscribe(persistor.listener());

        Self {
            store,
            persistor,
            outcome,
        }
    }

    /// Applies `action`; the resulting state is persisted in the background.
    pub fn dispatch(&mut self, action: Action) -> Option<String> {
        self.store.dispatch(action)
    }

    /// Registers an additional observer, e.g. a view that re-renders on change.
    pub fn subscribe(&mut self, listener: Arc<dyn StateListener>) {
        self.store.subscribe(listener);
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Where the initial state came from.
    #[must_use]
    pub const fn rehydrate_outcome(&self) -> RehydrateOutcome {
        self.outcome
    }

    /// Waits for every change dispatched so far to reach storage.
    pub async fn flush(&self) {
        self.persistor.flush().await;
    }

    /// Persists the final state and stops the writer, returning that state.
    pub async fn shutdown(self) -> Result<AppState> {
        let state = self.store.into_state();
        self.persistor.shutdown().await?;
        Ok(state)
    }
}

/// The local calendar date, used as the reference day for reports.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
