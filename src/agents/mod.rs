//! Collaborator contracts for the deployment pipeline
//!
//! The code-analysis and Dockerfile-generation agents are external AI
//! collaborators. This module defines the traits and data contracts the
//! orchestrator consumes, the tool declarations exposed to the LLM
//! tool-calling runtime, and queued-response mocks for tests.

mod analyzer;
mod docker_expert;
pub mod mock;
mod tools;

pub use analyzer::{AgentError, CodeAnalyzer, ProjectAnalysis};
pub use docker_expert::{DockerfileGenerator, DockerfilePlan};
pub use tools::{
    ToolRegistry, TOOL_CLONE_AND_ANALYZE_REPO, TOOL_DEPLOY_TO_CLOUDRUN, TOOL_GET_DEPLOYMENT_LOGS,
    TOOL_LIST_USER_REPOSITORIES,
};
