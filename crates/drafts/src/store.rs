//! Draft store
//!
//! Two reserved slots in the underlying key-value storage:
//!
//! - `outreach.campaign.current` - the autosaved form state, overwritten on
//!   every autosave and cleared on successful submit
//! - `outreach.campaign.drafts` - a JSON array of explicitly named drafts
//!
//! A slot that fails to parse reads as "no draft" (with a warning), never as
//! an error: a stale or corrupted draft must not block starting a campaign.
//! Concurrent writers (multiple open tabs) are last-writer-wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::storage::KeyValueStorage;

/// Storage key for the autosaved form state
pub const CURRENT_KEY: &str = "outreach.campaign.current";

/// Storage key for the named-draft list
pub const DRAFTS_KEY: &str = "outreach.campaign.drafts";

/// Campaign fields persisted alongside the message body.
///
/// `rules` is stored as raw JSON and normalized on restore, so a draft
/// written by an older build never fails to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignData {
    /// Campaign name
    pub name: String,
    /// Campaign description
    pub description: String,
    /// Segmentation rule set, as last serialized
    pub rules: serde_json::Value,
}

/// A point-in-time snapshot of the campaign form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSnapshot {
    /// Name, description and rules
    pub campaign_data: CampaignData,
    /// Message body
    pub message: String,
}

/// An explicitly saved, named draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedDraft {
    /// Draft id
    pub id: Uuid,
    /// User-supplied draft name
    pub name: String,
    /// When the draft was saved
    pub created_at: DateTime<Utc>,
    /// Name, description and rules
    pub campaign_data: CampaignData,
    /// Message body
    pub message: String,
}

/// Draft store over a pluggable storage backend
pub struct DraftStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> DraftStore<S> {
    /// Create a draft store over the given storage backend
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Overwrite the autosave slot with the given snapshot
    pub fn save_current(&self, snapshot: &CampaignSnapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        self.storage.set(CURRENT_KEY, &json)?;
        debug!(storage = self.storage.name(), "autosaved campaign draft");
        Ok(())
    }

    /// Read the autosave slot.
    ///
    /// An unparsable slot reads as `None` with a warning.
    pub fn load_current(&self) -> Result<Option<CampaignSnapshot>> {
        let Some(json) = self.storage.get(CURRENT_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                warn!(error = %e, "corrupted autosave slot, treating as empty");
                Ok(None)
            }
        }
    }

    /// Clear the autosave slot (after a successful submit)
    pub fn clear_current(&self) -> Result<()> {
        self.storage.remove(CURRENT_KEY)
    }

    /// Save a snapshot as a named draft, returning the stored entry
    pub fn save_named(&self, name: &str, snapshot: &CampaignSnapshot) -> Result<NamedDraft> {
        let draft = NamedDraft {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
            campaign_data: snapshot.campaign_data.clone(),
            message: snapshot.message.clone(),
        };

        let mut drafts = self.list_named()?;
        drafts.push(draft.clone());
        self.write_named(&drafts)?;

        debug!(id = %draft.id, name = %draft.name, "saved named draft");
        Ok(draft)
    }

    /// List all named drafts.
    ///
    /// An unparsable list reads as empty with a warning.
    pub fn list_named(&self) -> Result<Vec<NamedDraft>> {
        let Some(json) = self.storage.get(DRAFTS_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&json) {
            Ok(drafts) => Ok(drafts),
            Err(e) => {
                warn!(error = %e, "corrupted draft list, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Load a named draft by id
    pub fn load_named(&self, id: Uuid) -> Result<Option<NamedDraft>> {
        Ok(self.list_named()?.into_iter().find(|d| d.id == id))
    }

    /// Delete a named draft by id, returning whether it existed
    pub fn delete_named(&self, id: Uuid) -> Result<bool> {
        let mut drafts = self.list_named()?;
        let before = drafts.len();
        drafts.retain(|d| d.id != id);
        if drafts.len() == before {
            return Ok(false);
        }
        self.write_named(&drafts)?;
        Ok(true)
    }

    fn write_named(&self, drafts: &[NamedDraft]) -> Result<()> {
        let json = serde_json::to_string(drafts)?;
        self.storage.set(DRAFTS_KEY, &json)
    }
}
