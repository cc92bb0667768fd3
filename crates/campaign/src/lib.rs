//! Outreach campaign form core
//!
//! The state container behind the campaign-creation surface: a rule editor
//! with invariant-preserving mutations, a debounced audience-preview
//! scheduler with stale-response rejection, draft autosave, and the
//! auth-interrupted action resume flow.
//!
//! The rendering layer drives [`CampaignForm`] and consumes
//! [`PreviewEvent`]s from the receiver returned at construction.

pub mod autosave;
pub mod editor;
pub mod error;
pub mod form;
pub mod pending;
pub mod preview;


pub use autosave::Autosaver;
pub use editor::{ConditionPatch, RuleEditor};
pub use error::{CampaignError, Result};
pub use form::{CampaignClient, CampaignForm};
pub use pending::PendingAction;
pub use preview::{AudienceClient, BoxFuture, PreviewEvent, PreviewScheduler};
