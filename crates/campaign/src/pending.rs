//! Pending-action bookkeeping for the auth-resume flow
//!
//! When a request fails because the session expired, the interrupted action
//! is parked here instead of being discarded. After the surrounding
//! application confirms re-authentication, `CampaignForm::resume_pending`
//! re-issues it exactly once.

/// An action interrupted by an expired session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Audience preview for the current rule set
    Preview,
    /// Campaign submission
    Submit,
}
