//! Code-analysis collaborator contract

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors reported by the AI collaborators
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgentError {
    /// Project analysis failed; message surfaced verbatim from the agent
    #[error("Analysis failed: {0}")]
    Analysis(String),

    /// Dockerfile generation failed
    #[error("Dockerfile generation failed: {0}")]
    Generation(String),

    /// The agent backend itself was unreachable or misbehaved
    #[error("Agent backend error: {0}")]
    Backend(String),
}

/// Structured result of analyzing a cloned project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAnalysis {
    /// Detected language, or "unknown" when detection failed
    pub language: String,
    /// Detected framework (e.g., "fastapi", "express")
    pub framework: String,
    /// Application entry point (e.g., "main.py")
    pub entry_point: String,
    /// Declared dependencies
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Environment variables the application reads
    #[serde(default)]
    pub env_vars: HashMap<String, String>,
    /// Detected database, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Detected listen port, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Agent recommendations for the deployment
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Agent warnings about the project
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// AI collaborator that analyzes a cloned repository
///
/// Implementations wrap an LLM backend; the orchestrator treats them as a
/// black box with this request/response contract.
#[async_trait]
pub trait CodeAnalyzer: Send + Sync {
    async fn analyze(&self, project_path: &Path) -> Result<ProjectAnalysis, AgentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_round_trips_through_json() {
        let analysis = ProjectAnalysis {
            language: "python".to_string(),
            framework: "fastapi".to_string(),
            entry_point: "main.py".to_string(),
            dependencies: vec!["fastapi".to_string(), "uvicorn".to_string()],
            env_vars: HashMap::from([("PORT".to_string(), "8080".to_string())]),
            database: Some("postgresql".to_string()),
            port: Some(8080),
            recommendations: vec![],
            warnings: vec![],
        };

        let json = serde_json::to_string(&analysis).unwrap();
        let back: ProjectAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(back.framework, "fastapi");
        assert_eq!(back.port, Some(8080));
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let json = r#"{"language":"go","framework":"gin","entry_point":"main.go"}"#;
        let analysis: ProjectAnalysis = serde_json::from_str(json).unwrap();
        assert!(analysis.dependencies.is_empty());
        assert!(analysis.database.is_none());
        assert!(analysis.warnings.is_empty());
    }
}
