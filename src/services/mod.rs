//! Deterministic services layered on top of the AI collaborators
//!
//! - [`optimization`]: resource right-sizing, build hints, and cost modeling
//! - [`security`]: naming/env validation, log redaction, and Dockerfile scanning
//! - [`analysis`]: top-level analyze-and-generate orchestration

pub mod analysis;
pub mod optimization;
pub mod security;

pub use analysis::{AnalysisReport, AnalysisService, QuickAnalysis};
pub use optimization::{LoadTier, OptimizationService, ResourceConfig};
pub use security::{SecurityScan, SecurityService};
