//! Debounced draft autosave
//!
//! Each edit re-arms an idle timer carrying the latest snapshot; the draft
//! is written only after the form has been quiet for the idle window.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::warn;

use outreach_config::AutosaveConfig;
use outreach_drafts::{CampaignSnapshot, DraftStore, KeyValueStorage};

/// Writes the autosave slot after an idle window with no further edits
pub struct Autosaver<S> {
    store: Arc<DraftStore<S>>,
    idle: Duration,
    task: Option<JoinHandle<()>>,
}

impl<S: KeyValueStorage + 'static> Autosaver<S> {
    /// Create an autosaver writing to `store`
    pub fn new(store: Arc<DraftStore<S>>, config: &AutosaveConfig) -> Self {
        Self {
            store,
            idle: Duration::from_millis(config.idle_ms),
            task: None,
        }
    }

    /// (Re)arm the idle timer with the latest snapshot
    pub fn arm(&mut self, snapshot: CampaignSnapshot) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        let store = Arc::clone(&self.store);
        let idle = self.idle;
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(idle).await;
            // An autosave failure must not disturb the editing session
            if let Err(e) = store.save_current(&snapshot) {
                warn!(error = %e, "autosave failed");
            }
        }));
    }

    /// Drop the armed timer without saving
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<S> Drop for Autosaver<S> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
