//! Campaign error types

use thiserror::Error;

use outreach_client::ApiError;
use outreach_drafts::DraftError;

/// Result type for campaign operations
pub type Result<T> = std::result::Result<T, CampaignError>;

/// Errors from the campaign form and its collaborators
#[derive(Debug, Error)]
pub enum CampaignError {
    /// API call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Draft storage failed
    #[error(transparent)]
    Draft(#[from] DraftError),
}
