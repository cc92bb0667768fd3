//! Campaign form orchestration
//!
//! Owns the form fields, the rule editor, the preview scheduler, autosave
//! and the pending-action slot. Rule edits schedule a debounced preview and
//! arm the autosave timer; text edits only arm autosave.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use outreach_client::{
    ApiClient, ApiError, CampaignResponse, CreateCampaignRequest, FieldError,
};
use outreach_config::Config;
use outreach_drafts::{
    CampaignData, CampaignSnapshot, DraftStore, KeyValueStorage, NamedDraft,
};
use outreach_segment::{normalize_rules, Logic, SegmentRules};

use crate::autosave::Autosaver;
use crate::editor::{ConditionPatch, RuleEditor};
use crate::error::CampaignError;
use crate::pending::PendingAction;
use crate::preview::{AudienceClient, BoxFuture, PreviewEvent, PreviewScheduler};

/// Client surface the campaign form needs beyond audience previews
pub trait CampaignClient: AudienceClient {
    /// Create a campaign from the given request
    fn create_campaign(
        &self,
        request: CreateCampaignRequest,
    ) -> BoxFuture<'_, Result<CampaignResponse, ApiError>>;

    /// Turn a free-text prompt into a candidate rule set (raw, untrusted)
    fn rules_from_prompt(&self, prompt: String) -> BoxFuture<'_, Result<Value, ApiError>>;
}

impl CampaignClient for ApiClient {
    fn create_campaign(
        &self,
        request: CreateCampaignRequest,
    ) -> BoxFuture<'_, Result<CampaignResponse, ApiError>> {
        Box::pin(async move { ApiClient::create_campaign(self, &request).await })
    }

    fn rules_from_prompt(&self, prompt: String) -> BoxFuture<'_, Result<Value, ApiError>> {
        Box::pin(async move { ApiClient::rules_from_prompt(self, &prompt).await })
    }
}

/// The campaign-creation form state container
pub struct CampaignForm<C, S> {
    name: String,
    description: String,
    message: String,
    editor: RuleEditor,
    client: Arc<C>,
    scheduler: PreviewScheduler,
    drafts: Arc<DraftStore<S>>,
    autosaver: Autosaver<S>,
    pending: Option<PendingAction>,
    field_errors: Vec<FieldError>,
}

impl<C, S> CampaignForm<C, S>
where
    C: CampaignClient + 'static,
    S: KeyValueStorage + 'static,
{
    /// Create an empty form; preview events arrive on the returned receiver
    pub fn new(
        client: Arc<C>,
        store: DraftStore<S>,
        config: &Config,
    ) -> (Self, mpsc::UnboundedReceiver<PreviewEvent>) {
        let drafts = Arc::new(store);
        let audience: Arc<dyn AudienceClient> = client.clone();
        let (scheduler, events) = PreviewScheduler::new(audience, &config.preview);
        let autosaver = Autosaver::new(Arc::clone(&drafts), &config.autosave);

        (
            Self {
                name: String::new(),
                description: String::new(),
                message: String::new(),
                editor: RuleEditor::new(),
                client,
                scheduler,
                drafts,
                autosaver,
                pending: None,
                field_errors: Vec::new(),
            },
            events,
        )
    }

    /// Campaign name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Campaign description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Message body
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Current rule set
    pub fn rules(&self) -> &SegmentRules {
        self.editor.rules()
    }

    /// Action parked by an expired session, if any
    pub fn pending(&self) -> Option<PendingAction> {
        self.pending
    }

    /// Field-level errors from the last rejected submit
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch_text();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch_text();
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.touch_text();
    }

    /// Append a default condition
    pub fn add_condition(&mut self) {
        self.editor.add_condition();
        self.touch_rules();
    }

    /// Remove the condition at `index`
    pub fn remove_condition(&mut self, index: usize) {
        self.editor.remove_condition(index);
        self.touch_rules();
    }

    /// Shallow-merge a patch into the condition at `index`
    pub fn update_condition(&mut self, index: usize, patch: ConditionPatch) {
        self.editor.update_condition(index, patch);
        self.touch_rules();
    }

    /// Change the global logic
    pub fn set_logic(&mut self, logic: Logic) {
        self.editor.set_logic(logic);
        self.touch_rules();
    }

    /// Set the connector at `index`
    pub fn set_connector(&mut self, index: usize, logic: Logic) {
        self.editor.set_connector(index, logic);
        self.touch_rules();
    }

    /// Replace the rule set with a normalized candidate (AI output, import).
    ///
    /// The generation endpoint wraps the rule set in a `rules` member; a bare
    /// rule set is accepted too.
    pub fn apply_generated_rules(&mut self, candidate: &Value) {
        let candidate = candidate.get("rules").unwrap_or(candidate);
        self.editor = RuleEditor::from_rules(normalize_rules(candidate));
        self.touch_rules();
    }

    /// Ask the backend to turn a prompt into rules, then apply them
    pub async fn generate_rules(&mut self, prompt: &str) -> Result<(), CampaignError> {
        let candidate = self.client.rules_from_prompt(prompt.to_string()).await?;
        self.apply_generated_rules(&candidate);
        Ok(())
    }

    /// Point-in-time snapshot of the form for draft storage
    pub fn snapshot(&self) -> CampaignSnapshot {
        CampaignSnapshot {
            campaign_data: CampaignData {
                name: self.name.clone(),
                description: self.description.clone(),
                rules: serde_json::to_value(self.editor.rules()).unwrap_or(Value::Null),
            },
            message: self.message.clone(),
        }
    }

    /// Load the autosaved snapshot into the form, if one exists.
    ///
    /// Drafted rules pass through normalization, so a draft written by an
    /// older build restores to a well-formed rule set.
    pub fn restore(&mut self) -> Result<bool, CampaignError> {
        let Some(snapshot) = self.drafts.load_current()? else {
            return Ok(false);
        };
        self.apply_snapshot(snapshot);
        Ok(true)
    }

    /// Save the current form as a named draft
    pub fn save_named_draft(&self, name: &str) -> Result<NamedDraft, CampaignError> {
        Ok(self.drafts.save_named(name, &self.snapshot())?)
    }

    /// List named drafts
    pub fn list_named_drafts(&self) -> Result<Vec<NamedDraft>, CampaignError> {
        Ok(self.drafts.list_named()?)
    }

    /// Load a named draft into the form, returning whether it existed
    pub fn load_named_draft(&mut self, id: Uuid) -> Result<bool, CampaignError> {
        let Some(draft) = self.drafts.load_named(id)? else {
            return Ok(false);
        };
        self.apply_snapshot(CampaignSnapshot {
            campaign_data: draft.campaign_data,
            message: draft.message,
        });
        Ok(true)
    }

    /// Delete a named draft
    pub fn delete_named_draft(&self, id: Uuid) -> Result<bool, CampaignError> {
        Ok(self.drafts.delete_named(id)?)
    }

    /// Submit the campaign.
    ///
    /// On success the autosave slot is cleared. An expired session parks a
    /// Submit pending action; validation errors land in `field_errors`.
    pub async fn submit(&mut self) -> Result<CampaignResponse, CampaignError> {
        let request = CreateCampaignRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            message: self.message.clone(),
            rules: self.editor.rules().clone(),
        };

        match self.client.create_campaign(request).await {
            Ok(response) => {
                self.field_errors.clear();
                self.autosaver.cancel();
                if let Err(e) = self.drafts.clear_current() {
                    warn!(error = %e, "failed to clear autosave slot after submit");
                }
                debug!(id = %response.id, "campaign created");
                Ok(response)
            }
            Err(ApiError::AuthRequired) => {
                self.pending = Some(PendingAction::Submit);
                Err(CampaignError::Api(ApiError::AuthRequired))
            }
            Err(ApiError::Validation(errors)) => {
                self.field_errors = errors.clone();
                Err(CampaignError::Api(ApiError::Validation(errors)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Note a preview event; an auth failure parks a Preview pending action
    pub fn handle_preview_event(&mut self, event: &PreviewEvent) {
        if matches!(event, PreviewEvent::AuthRequired) {
            self.pending = Some(PendingAction::Preview);
        }
    }

    /// Re-issue the action interrupted by an expired session, exactly once.
    ///
    /// Call after the surrounding application confirms re-authentication.
    pub async fn resume_pending(&mut self) -> Result<Option<CampaignResponse>, CampaignError> {
        match self.pending.take() {
            None => Ok(None),
            Some(PendingAction::Preview) => {
                self.scheduler.schedule(self.editor.rules().clone());
                Ok(None)
            }
            Some(PendingAction::Submit) => self.submit().await.map(Some),
        }
    }

    fn apply_snapshot(&mut self, snapshot: CampaignSnapshot) {
        self.name = snapshot.campaign_data.name;
        self.description = snapshot.campaign_data.description;
        self.message = snapshot.message;
        self.editor = RuleEditor::from_rules(normalize_rules(&snapshot.campaign_data.rules));
        self.scheduler.schedule(self.editor.rules().clone());
    }

    fn touch_text(&mut self) {
        self.autosaver.arm(self.snapshot());
    }

    fn touch_rules(&mut self) {
        self.scheduler.schedule(self.editor.rules().clone());
        self.autosaver.arm(self.snapshot());
    }
}
