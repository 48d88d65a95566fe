//! Dockerfile-generation collaborator contract

use super::analyzer::{AgentError, ProjectAnalysis};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Generated Dockerfile plus the agent's notes about it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerfilePlan {
    /// Complete Dockerfile content
    pub dockerfile: String,
    /// Optimizations the agent applied
    #[serde(default)]
    pub optimizations: Vec<String>,
    /// Human-readable explanations of the choices made
    #[serde(default)]
    pub explanations: Vec<String>,
}

/// AI collaborator that generates an optimized Dockerfile from an analysis
#[async_trait]
pub trait DockerfileGenerator: Send + Sync {
    async fn generate(&self, analysis: &ProjectAnalysis) -> Result<DockerfilePlan, AgentError>;
}
