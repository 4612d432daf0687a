//! Persistence adapter - Mirrors the store into a single JSON blob.
//!
//! Every dispatched action hands a snapshot of the state to a background writer.
//! The writer only ever stores the newest snapshot it has seen, so a burst of
//! actions costs one or two writes and the last state always wins. On start-up
//! [`rehydrate`] restores the blob, falling back to a fresh seeded state when the
//! blob is missing, unreadable or too slow to arrive.

/// Blob storage backends
pub mod storage;

use std::{sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::{
    sync::{oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, error, info, instrument, warn};

pub use storage::{BlobStorage, FileStorage, MemoryStorage};

use crate::{
    core::{
        category::CategoriesState,
        store::{AppState, StateListener},
        transaction::TransactionsState,
    },
    errors::Result,
    models::{Category, Settings, Transaction},
};

/// Fixed key the whole state is stored under.
pub const ROOT_KEY: &str = "persist:root";

/// Format version written into new blobs.
pub const BLOB_VERSION: u32 = 1;

/// Attempts made for the last unsaved snapshot on shutdown.
const FINAL_WRITE_ATTEMPTS: u32 = 3;

/// Delay before the first retry of the final write; doubled after each failure.
const FINAL_WRITE_BACKOFF: Duration = Duration::from_millis(50);

/// Serialized form of the persisted slices.
///
/// Every field has a default so blobs written by older versions stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub settings: Settings,
}

impl From<&AppState> for PersistedState {
    fn from(state: &AppState) -> Self {
        Self {
            version: BLOB_VERSION,
            transactions: state.transactions.all().to_vec(),
            categories: state.categories.all().to_vec(),
            settings: state.settings.clone(),
        }
    }
}

impl PersistedState {
    /// Converts back into store state, seeding default categories if none were stored.
    #[must_use]
    pub fn into_app_state(self) -> AppState {
        let mut transactions = TransactionsState::default();
        transactions.replace_all(self.transactions);

        let mut categories = CategoriesState::default();
        categories.replace_all(self.categories);
        categories.seed_defaults_if_empty();

        AppState {
            transactions,
            categories,
            settings: self.settings,
        }
    }
}

/// Reads and decodes the blob under [`ROOT_KEY`].
///
/// # Returns
/// * `Ok(Some(state))` - A blob was found and decoded
/// * `Ok(None)` - Nothing has been persisted yet
pub async fn load_snapshot<S: BlobStorage>(storage: &S) -> Result<Option<PersistedState>> {
    match storage.read(ROOT_KEY).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encodes `snapshot` and stores it under [`ROOT_KEY`].
pub async fn save_snapshot<S: BlobStorage>(storage: &S, snapshot: &PersistedState) -> Result<()> {
    let raw = serde_json::to_string(snapshot)?;
    storage.write(ROOT_KEY, &raw).await
}

/// How [`rehydrate`] produced its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RehydrateOutcome {
    /// The persisted blob was restored
    Restored,
    /// No blob existed; defaults were used
    Fresh,
    /// The blob could not be used (corrupt, unreadable or timed out); defaults were used
    Fallback,
}

/// Restores the persisted state, never failing.
///
/// # Arguments
/// * `storage` - Backend to read from
/// * `timeout` - Longest acceptable wait before giving up on the blob
///
/// # Returns
/// The state to start the store with and where it came from
#[instrument(skip(storage))]
pub async fn rehydrate<S: BlobStorage>(
    storage: &S,
    timeout: Duration,
) -> (AppState, RehydrateOutcome) {
    match tokio::time::timeout(timeout, load_snapshot(storage)).await {
        Ok(Ok(Some(snapshot))) => {
            info!(
                version = snapshot.version,
                transactions = snapshot.transactions.len(),
                categories = snapshot.categories.len(),
                "Restored persisted state"
            );
            (snapshot.into_app_state(), RehydrateOutcome::Restored)
        }
        Ok(Ok(None)) => {
            info!("No persisted state found, starting with defaults");
            (AppState::default(), RehydrateOutcome::Fresh)
        }
        Ok(Err(e)) => {
            warn!(error = %e, "Persisted state unusable, starting with defaults");
            (AppState::default(), RehydrateOutcome::Fallback)
        }
        Err(_) => {
            warn!(?timeout, "Timed out reading persisted state, starting with defaults");
            (AppState::default(), RehydrateOutcome::Fallback)
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Pending {
    seq: u64,
    snapshot: Option<PersistedState>,
}

/// Store listener that queues snapshots for the writer.
#[derive(Debug)]
struct SnapshotListener {
    pending: Arc<watch::Sender<Pending>>,
}

impl StateListener for SnapshotListener {
    fn state_changed(&self, state: &AppState) {
        let snapshot = PersistedState::from(state);
        self.pending.send_modify(|pending| {
            pending.seq += 1;
            pending.snapshot = Some(snapshot);
        });
    }
}

/// Background writer that keeps the blob in sync with the store.
#[derive(Debug)]
pub struct Persistor {
    pending: Arc<watch::Sender<Pending>>,
    written: watch::Receiver<u64>,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<()>>>,
}

impl Persistor {
    /// Spawns the writer task on the current runtime.
    pub fn start<S: BlobStorage>(storage: Arc<S>) -> Self {
        let (pending_tx, pending_rx) = watch::channel(Pending::default());
        let (written_tx, written_rx) = watch::channel(0);
        let (stop_tx, stop_rx) = oneshot::channel();

        let task = tokio::spawn(run_writer(storage, pending_rx, written_tx, stop_rx));

        Self {
            pending: Arc::new(pending_tx),
            written: written_rx,
            stop: Some(stop_tx),
            task: Some(task),
        }
    }

    /// Listener to subscribe on the store.
    #[must_use]
    pub fn listener(&self) -> Arc<dyn StateListener> {
        Arc::new(SnapshotListener {
            pending: Arc::clone(&self.pending),
        })
    }

    /// Waits until every snapshot queued so far has been written (or has failed).
    pub async fn flush(&self) {
        let target = self.pending.borrow().seq;
        let mut written = self.written.clone();
        if written.wait_for(|seq| *seq >= target).await.is_err() {
            debug!("Writer already stopped");
        }
    }

    /// Writes the newest pending snapshot and stops the writer.
    ///
    /// A snapshot that has not reached storage yet, including one whose earlier
    /// write failed, is retried a few times with backoff before giving up.
    ///
    /// # Errors
    /// The storage error of the last attempt if the newest snapshot could not be written
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            task.await??;
        }
        info!("Persistence writer stopped");
        Ok(())
    }
}

async fn run_writer<S: BlobStorage>(
    storage: Arc<S>,
    mut pending: watch::Receiver<Pending>,
    written: watch::Sender<u64>,
    mut stop: oneshot::Receiver<()>,
) -> Result<()> {
    // Sequence number of the newest snapshot that actually reached storage
    let mut last_written = 0;
    loop {
        tokio::select! {
            changed = pending.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = pending.borrow_and_update().clone();
                let seq = current.seq;
                match write_pending(storage.as_ref(), &current).await {
                    Ok(()) => last_written = seq,
                    Err(e) => error!(seq, error = %e, "Failed to persist snapshot"),
                }
                written.send_replace(seq);
            }
            _ = &mut stop => break,
        }
    }

    let current = pending.borrow().clone();
    if current.seq <= last_written {
        return Ok(());
    }

    let mut delay = FINAL_WRITE_BACKOFF;
    let mut attempt = 1;
    loop {
        match write_pending(storage.as_ref(), &current).await {
            Ok(()) => {
                written.send_replace(current.seq);
                return Ok(());
            }
            Err(e) if attempt < FINAL_WRITE_ATTEMPTS => {
                warn!(seq = current.seq, attempt, error = %e, "Final write failed, retrying");
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
            Err(e) => {
                error!(seq = current.seq, error = %e, "Giving up on final write");
                written.send_replace(current.seq);
                return Err(e);
            }
        }
    }
}

async fn write_pending<S: BlobStorage>(storage: &S, pending: &Pending) -> Result<()> {
    if let Some(snapshot) = &pending.snapshot {
        save_snapshot(storage, snapshot).await?;
        debug!(seq = pending.seq, "Persisted snapshot");
    }
    Ok(())
}
