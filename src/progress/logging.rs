//! Built-in event sinks

use super::notifier::{EventSink, ProgressUpdate, SinkError, StageStatus};
use async_trait::async_trait;
use tracing::{info, warn};

/// Sink that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpSink;

#[async_trait]
impl EventSink for NoOpSink {
    async fn send(&self, _session_id: &str, _update: &ProgressUpdate) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that logs events using tracing, for running without a client transport
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSink;

#[async_trait]
impl EventSink for LoggingSink {
    async fn send(&self, session_id: &str, update: &ProgressUpdate) -> Result<(), SinkError> {
        match update.status {
            StageStatus::Error => {
                warn!(
                    session = %session_id,
                    deployment = %update.deployment_id,
                    stage = %update.stage,
                    "{}",
                    update.message
                );
            }
            _ => {
                info!(
                    session = %session_id,
                    deployment = %update.deployment_id,
                    stage = %update.stage,
                    progress = update.progress,
                    "{}",
                    update.message
                );
            }
        }
        Ok(())
    }
}
