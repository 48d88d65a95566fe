//! Deployment stage tracking and event emission

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Wire tag carried by every progress event
const EVENT_TYPE: &str = "deployment_progress";

/// Pipeline phases, used purely as correlation keys in progress events
///
/// The notifier does not validate ordering between stages; any stage may be
/// started, updated, completed, or failed at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStage {
    RepoClone,
    CodeAnalysis,
    DockerfileGeneration,
    SecurityScan,
    ContainerBuild,
    CloudDeployment,
}

impl fmt::Display for DeploymentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeploymentStage::RepoClone => "repo_clone",
            DeploymentStage::CodeAnalysis => "code_analysis",
            DeploymentStage::DockerfileGeneration => "dockerfile_generation",
            DeploymentStage::SecurityScan => "security_scan",
            DeploymentStage::ContainerBuild => "container_build",
            DeploymentStage::CloudDeployment => "cloud_deployment",
        };
        write!(f, "{}", name)
    }
}

/// Status of a stage within a progress event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageStatus {
    Waiting,
    InProgress,
    Success,
    Error,
}

/// A single progress event, constructed and delivered immediately
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Always `deployment_progress`
    #[serde(rename = "type")]
    pub event_type: String,
    pub deployment_id: String,
    pub stage: DeploymentStage,
    pub status: StageStatus,
    pub message: String,
    /// RFC 3339 timestamp taken at construction
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
    /// Completion percentage, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
}

/// Errors an [`EventSink`] may report
///
/// The notifier observes these, logs them, and moves on; they never reach
/// the caller.
#[derive(Debug, Clone, Error)]
pub enum SinkError {
    #[error("client disconnected")]
    Disconnected,
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Asynchronous delivery function for progress events, keyed by session
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn send(&self, session_id: &str, update: &ProgressUpdate) -> Result<(), SinkError>;
}

/// Streams stage transitions for one deployment run to a connected client
///
/// Tracks the current stage and its start time so completions can carry a
/// duration. One notifier per deployment run; independent runs share nothing.
pub struct ProgressNotifier {
    session_id: String,
    deployment_id: String,
    sink: Arc<dyn EventSink>,
    current_stage: Option<DeploymentStage>,
    stage_start: Option<Instant>,
}

impl ProgressNotifier {
    pub fn new(
        session_id: impl Into<String>,
        deployment_id: impl Into<String>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            deployment_id: deployment_id.into(),
            sink,
            current_stage: None,
            stage_start: None,
        }
    }

    /// Creates a notifier with a freshly generated deployment id
    pub fn for_new_deployment(session_id: impl Into<String>, sink: Arc<dyn EventSink>) -> Self {
        Self::new(session_id, Uuid::new_v4().to_string(), sink)
    }

    pub fn deployment_id(&self) -> &str {
        &self.deployment_id
    }

    pub fn current_stage(&self) -> Option<DeploymentStage> {
        self.current_stage
    }

    /// Marks a stage as started and records its start time
    pub async fn start_stage(&mut self, stage: DeploymentStage, message: &str) {
        self.current_stage = Some(stage);
        self.stage_start = Some(Instant::now());
        self.send_update(stage, StageStatus::InProgress, message, None, None)
            .await;
    }

    /// Emits a percentage update without altering the recorded start time
    pub async fn update_progress(&self, stage: DeploymentStage, message: &str, progress: u8) {
        self.send_update(
            stage,
            StageStatus::InProgress,
            message,
            None,
            Some(progress.min(100)),
        )
        .await;
    }

    /// Marks a stage as completed, attaching the elapsed time since the last
    /// recorded start (omitted when no stage was started)
    pub async fn complete_stage(
        &self,
        stage: DeploymentStage,
        message: &str,
        details: Option<Map<String, Value>>,
    ) {
        let mut details = details.unwrap_or_default();

        if let Some(start) = self.stage_start {
            let elapsed = start.elapsed().as_secs_f64();
            details.insert(
                "duration".to_string(),
                Value::String(format!("{:.1}s", elapsed)),
            );
        }

        let details = if details.is_empty() {
            None
        } else {
            Some(details)
        };

        self.send_update(stage, StageStatus::Success, message, details, None)
            .await;
    }

    /// Marks a stage as failed; no duration is computed
    pub async fn fail_stage(
        &self,
        stage: DeploymentStage,
        error_message: &str,
        details: Option<Map<String, Value>>,
    ) {
        self.send_update(stage, StageStatus::Error, error_message, details, None)
            .await;
    }

    /// Builds and delivers one event. Delivery outcomes are logged and
    /// swallowed; this can never fail the caller's pipeline.
    async fn send_update(
        &self,
        stage: DeploymentStage,
        status: StageStatus,
        message: &str,
        details: Option<Map<String, Value>>,
        progress: Option<u8>,
    ) {
        let update = ProgressUpdate {
            event_type: EVENT_TYPE.to_string(),
            deployment_id: self.deployment_id.clone(),
            stage,
            status,
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            details,
            progress,
        };

        match self.sink.send(&self.session_id, &update).await {
            Ok(()) => {
                debug!(stage = %stage, status = ?status, "Progress event delivered");
            }
            Err(e) => {
                warn!(stage = %stage, status = ?status, error = %e, "Failed to deliver progress event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Sink that records every event it receives
    #[derive(Default)]
    pub struct RecordingSink {
        pub events: Mutex<Vec<(String, ProgressUpdate)>>,
    }

    #[async_trait]
    impl EventSink for RecordingSink {
        async fn send(&self, session_id: &str, update: &ProgressUpdate) -> Result<(), SinkError> {
            self.events
                .lock()
                .unwrap()
                .push((session_id.to_string(), update.clone()));
            Ok(())
        }
    }

    /// Sink that always fails delivery
    struct FailingSink;

    #[async_trait]
    impl EventSink for FailingSink {
        async fn send(&self, _session_id: &str, _update: &ProgressUpdate) -> Result<(), SinkError> {
            Err(SinkError::Disconnected)
        }
    }

    #[tokio::test]
    async fn start_then_complete_emits_two_events_with_duration() {
        let sink = Arc::new(RecordingSink::default());
        let mut notifier = ProgressNotifier::new("session-1", "deploy-1", sink.clone());

        notifier
            .start_stage(DeploymentStage::ContainerBuild, "Building image")
            .await;
        notifier
            .complete_stage(DeploymentStage::ContainerBuild, "Image built", None)
            .await;

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 2);

        let (session, start) = &events[0];
        assert_eq!(session, "session-1");
        assert_eq!(start.status, StageStatus::InProgress);
        assert_eq!(start.stage, DeploymentStage::ContainerBuild);
        assert!(start.details.is_none());

        let (_, done) = &events[1];
        assert_eq!(done.status, StageStatus::Success);
        let duration = done.details.as_ref().unwrap()["duration"].as_str().unwrap();
        assert!(duration.ends_with('s'), "got: {}", duration);
        duration
            .trim_end_matches('s')
            .parse::<f64>()
            .expect("duration is a number");
    }

    #[tokio::test]
    async fn complete_without_start_omits_duration() {
        let sink = Arc::new(RecordingSink::default());
        let notifier = ProgressNotifier::new("s", "d", sink.clone());

        notifier
            .complete_stage(DeploymentStage::RepoClone, "done", None)
            .await;

        let events = sink.events.lock().unwrap();
        assert!(events[0].1.details.is_none());
    }

    #[tokio::test]
    async fn update_progress_carries_clamped_percentage() {
        let sink = Arc::new(RecordingSink::default());
        let mut notifier = ProgressNotifier::new("s", "d", sink.clone());

        notifier
            .start_stage(DeploymentStage::CodeAnalysis, "scanning")
            .await;
        notifier
            .update_progress(DeploymentStage::CodeAnalysis, "halfway", 50)
            .await;
        notifier
            .update_progress(DeploymentStage::CodeAnalysis, "overshoot", 250)
            .await;

        let events = sink.events.lock().unwrap();
        assert_eq!(events[1].1.progress, Some(50));
        assert_eq!(events[2].1.progress, Some(100));
        assert_eq!(events[1].1.status, StageStatus::InProgress);
    }

    #[tokio::test]
    async fn sink_failure_never_propagates() {
        let mut notifier = ProgressNotifier::new("s", "d", Arc::new(FailingSink));

        notifier
            .start_stage(DeploymentStage::CloudDeployment, "deploying")
            .await;
        notifier
            .fail_stage(DeploymentStage::CloudDeployment, "quota exceeded", None)
            .await;
        // Reaching here is the assertion: no panic, no error surfaced.
    }

    #[tokio::test]
    async fn fail_stage_has_no_duration() {
        let sink = Arc::new(RecordingSink::default());
        let mut notifier = ProgressNotifier::new("s", "d", sink.clone());

        notifier
            .start_stage(DeploymentStage::SecurityScan, "scanning")
            .await;
        notifier
            .fail_stage(DeploymentStage::SecurityScan, "found secrets", None)
            .await;

        let events = sink.events.lock().unwrap();
        let (_, failed) = &events[1];
        assert_eq!(failed.status, StageStatus::Error);
        assert!(failed.details.is_none());
    }

    #[tokio::test]
    async fn stages_may_interleave_freely() {
        let sink = Arc::new(RecordingSink::default());
        let mut notifier = ProgressNotifier::new("s", "d", sink.clone());

        // No legality checks: complete before start, repeat stages, any order.
        notifier
            .complete_stage(DeploymentStage::CloudDeployment, "already done?", None)
            .await;
        notifier
            .start_stage(DeploymentStage::RepoClone, "cloning")
            .await;
        notifier
            .start_stage(DeploymentStage::RepoClone, "cloning again")
            .await;

        assert_eq!(sink.events.lock().unwrap().len(), 3);
        assert_eq!(notifier.current_stage(), Some(DeploymentStage::RepoClone));
    }

    #[test]
    fn wire_shape_matches_contract() {
        let update = ProgressUpdate {
            event_type: EVENT_TYPE.to_string(),
            deployment_id: "deploy-9".to_string(),
            stage: DeploymentStage::DockerfileGeneration,
            status: StageStatus::InProgress,
            message: "generating".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            details: None,
            progress: Some(30),
        };

        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["type"], "deployment_progress");
        assert_eq!(value["stage"], "dockerfile_generation");
        assert_eq!(value["status"], "in-progress");
        assert_eq!(value["progress"], 30);
        assert!(value.get("details").is_none());
    }

    #[test]
    fn waiting_status_serializes() {
        assert_eq!(
            serde_json::to_value(StageStatus::Waiting).unwrap(),
            serde_json::json!("waiting")
        );
        assert_eq!(
            serde_json::to_value(StageStatus::Error).unwrap(),
            serde_json::json!("error")
        );
    }

    #[test]
    fn generated_deployment_ids_are_unique() {
        let sink: Arc<dyn EventSink> = Arc::new(RecordingSink::default());
        let a = ProgressNotifier::for_new_deployment("s", sink.clone());
        let b = ProgressNotifier::for_new_deployment("s", sink);
        assert_ne!(a.deployment_id(), b.deployment_id());
    }
}
