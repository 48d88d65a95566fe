//! gantry - AI-assisted deployment orchestrator for managed container platforms
//!
//! This library coordinates the analysis-to-deployment workflow for a cloned
//! source repository: it drives an AI code-analysis collaborator, an AI
//! Dockerfile-generation collaborator, derives right-sized resource
//! configurations, scans generated build files for security issues, estimates
//! hosting cost, and streams structured progress events to a connected client.
//!
//! # Core Concepts
//!
//! - **Collaborators**: Pluggable AI agents behind the [`agents`] traits that
//!   analyze a project and generate an optimized Dockerfile for it
//! - **Services**: Deterministic heuristics layered on top of the agents:
//!   resource sizing, cost modeling, and security validation
//! - **Progress**: Best-effort structured event streaming; delivery problems
//!   are logged and never fail the pipeline they describe
//!
//! # Example Usage
//!
//! ```ignore
//! use gantry::{AnalysisService, LoadTier, OptimizationService};
//! use std::path::Path;
//!
//! async fn deploy_report(
//!     service: &AnalysisService,
//! ) -> Result<(), Box<dyn std::error::Error>> {
//!     let report = service
//!         .analyze_and_generate(Path::new("/work/cloned-repo"), None)
//!         .await?;
//!
//!     let optimization = OptimizationService::default();
//!     let config = optimization.optimal_config(&report.analysis.framework, LoadTier::Medium);
//!     let cost = optimization.estimate_cost(&config, 1_000_000);
//!
//!     println!("{}", report.dockerfile.content);
//!     println!("Estimated: ${}/month", cost.total_monthly);
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`agents`]: Collaborator contracts, tool declarations, and test mocks
//! - [`services`]: Analysis orchestration, optimization, and security
//! - [`progress`]: Deployment stage tracking and event streaming

// Public modules
pub mod agents;
pub mod cli;
pub mod config;
pub mod progress;
pub mod services;
pub mod util;

// Re-export key types for convenient access
pub use agents::{
    AgentError, CodeAnalyzer, DockerfileGenerator, DockerfilePlan, ProjectAnalysis, ToolRegistry,
};
pub use config::{ConfigError, GantryConfig};
pub use progress::{
    DeploymentStage, EventSink, ProgressNotifier, ProgressUpdate, SinkError, StageStatus,
};
pub use services::analysis::{AnalysisReport, AnalysisService, MilestoneReporter, QuickAnalysis};
pub use services::optimization::{CostEstimate, LoadTier, OptimizationService, ResourceConfig};
pub use services::security::{SecurityScan, SecurityService, ServiceNameError};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
