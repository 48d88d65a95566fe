//! Progress reporting for deployment pipelines
//!
//! Structured status events are streamed to a connected client through an
//! injected [`EventSink`]. Delivery is strictly best-effort: sink failures
//! are logged and swallowed so progress reporting can never fail the
//! pipeline it describes.

mod logging;
mod notifier;

pub use logging::{LoggingSink, NoOpSink};
pub use notifier::{
    DeploymentStage, EventSink, ProgressNotifier, ProgressUpdate, SinkError, StageStatus,
};
