//! Outreach draft persistence
//!
//! Durable local storage for campaign form state: an autosave slot that
//! survives a closed tab, and a list of explicitly named drafts. Storage is
//! a pluggable synchronous key-value trait with file-backed and in-memory
//! implementations.
//!
//! ```
//! use outreach_drafts::{CampaignData, CampaignSnapshot, DraftStore, MemoryStorage};
//!
//! let store = DraftStore::new(MemoryStorage::new());
//! let snapshot = CampaignSnapshot {
//!     campaign_data: CampaignData {
//!         name: "Spring sale".to_string(),
//!         description: String::new(),
//!         rules: serde_json::json!({ "logic": "AND", "conditions": [] }),
//!     },
//!     message: "Hi {name}!".to_string(),
//! };
//! store.save_current(&snapshot).unwrap();
//! assert_eq!(store.load_current().unwrap(), Some(snapshot));
//! ```

pub mod error;
pub mod storage;
pub mod store;

#[cfg(test)]
mod storage_test;

pub use error::{DraftError, Result};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{
    CampaignData, CampaignSnapshot, DraftStore, NamedDraft, CURRENT_KEY, DRAFTS_KEY,
};
