//! Debounced audience preview
//!
//! Whenever the rule set changes, the scheduler waits out a debounce window
//! and then issues one preview request for the settled state. A newer edit
//! supersedes any pending or in-flight request: its timer task is aborted
//! and, should its response still arrive, a generation counter marks it
//! stale so it can never overwrite a newer result.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use outreach_client::{ApiClient, ApiError};
use outreach_config::PreviewConfig;
use outreach_segment::SegmentRules;

/// Boxed future returned by the object-safe client traits
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Client capable of counting the audience a rule set matches
///
/// Implementations must be Send + Sync to allow use across async tasks.
pub trait AudienceClient: Send + Sync {
    /// Count the customers matching `rules`
    fn preview_audience(&self, rules: SegmentRules) -> BoxFuture<'_, Result<u64, ApiError>>;
}

impl AudienceClient for ApiClient {
    fn preview_audience(&self, rules: SegmentRules) -> BoxFuture<'_, Result<u64, ApiError>> {
        Box::pin(async move { ApiClient::preview_audience(self, &rules).await })
    }
}

/// Preview outcomes pushed to the consuming surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewEvent {
    /// The request outlived the grace period and is still in flight
    Loading,
    /// Audience size for the most recent rule set
    Updated(u64),
    /// Session expired; re-authenticate, then resume
    AuthRequired,
    /// Transient failure, current count left as-is
    Failed(String),
}

/// Debounced, superseding preview scheduler
pub struct PreviewScheduler {
    client: Arc<dyn AudienceClient>,
    events: mpsc::UnboundedSender<PreviewEvent>,
    generation: Arc<AtomicU64>,
    debounce: Duration,
    grace: Duration,
    task: Option<JoinHandle<()>>,
}

impl PreviewScheduler {
    /// Create a scheduler; events arrive on the returned receiver
    pub fn new(
        client: Arc<dyn AudienceClient>,
        config: &PreviewConfig,
    ) -> (Self, mpsc::UnboundedReceiver<PreviewEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        (
            Self {
                client,
                events,
                generation: Arc::new(AtomicU64::new(0)),
                debounce: Duration::from_millis(config.debounce_ms),
                grace: Duration::from_millis(config.grace_ms),
                task: None,
            },
            receiver,
        )
    }

    /// Schedule a preview for `rules`, superseding any pending one
    pub fn schedule(&mut self, rules: SegmentRules) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(task) = self.task.take() {
            task.abort();
        }

        let client = Arc::clone(&self.client);
        let events = self.events.clone();
        let latest = Arc::clone(&self.generation);
        let debounce = self.debounce;
        let grace = self.grace;

        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            let request = client.preview_audience(rules);
            tokio::pin!(request);

            // Only surface a loading state once the request outlives the
            // grace period, so fast responses never flicker
            let result = tokio::select! {
                result = &mut request => result,
                _ = tokio::time::sleep(grace) => {
                    if latest.load(Ordering::SeqCst) == generation {
                        let _ = events.send(PreviewEvent::Loading);
                    }
                    request.await
                }
            };

            // A newer edit superseded this request while it was in flight
            if latest.load(Ordering::SeqCst) != generation {
                debug!(generation, "discarding stale preview response");
                return;
            }

            let event = match result {
                Ok(count) => PreviewEvent::Updated(count),
                Err(ApiError::AuthRequired) => PreviewEvent::AuthRequired,
                Err(e) => PreviewEvent::Failed(e.to_string()),
            };
            let _ = events.send(event);
        }));
    }

    /// Drop any scheduled or in-flight preview without replacement
    pub fn cancel(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for PreviewScheduler {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
