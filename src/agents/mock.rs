//! Queued-response mock collaborators for testing the pipeline without a
//! real LLM backend

use super::analyzer::{AgentError, CodeAnalyzer, ProjectAnalysis};
use super::docker_expert::{DockerfileGenerator, DockerfilePlan};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::Mutex;

/// Mock analyzer that replays scripted responses in order
#[derive(Default)]
pub struct MockAnalyzer {
    responses: Mutex<VecDeque<Result<ProjectAnalysis, AgentError>>>,
}

impl MockAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_response(&self, response: Result<ProjectAnalysis, AgentError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    /// A plausible FastAPI project analysis for tests
    pub fn fastapi_analysis() -> ProjectAnalysis {
        ProjectAnalysis {
            language: "python".to_string(),
            framework: "fastapi".to_string(),
            entry_point: "main.py".to_string(),
            dependencies: vec![
                "fastapi".to_string(),
                "uvicorn".to_string(),
                "pydantic".to_string(),
            ],
            env_vars: HashMap::from([("PORT".to_string(), "8080".to_string())]),
            database: None,
            port: Some(8080),
            recommendations: vec!["Add a health check endpoint".to_string()],
            warnings: vec![],
        }
    }
}

#[async_trait]
impl CodeAnalyzer for MockAnalyzer {
    async fn analyze(&self, _project_path: &Path) -> Result<ProjectAnalysis, AgentError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AgentError::Backend("no scripted response".to_string())))
    }
}

/// Mock Dockerfile generator that replays scripted responses in order
#[derive(Default)]
pub struct MockGenerator {
    responses: Mutex<VecDeque<Result<DockerfilePlan, AgentError>>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_response(&self, response: Result<DockerfilePlan, AgentError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    /// A plausible generated Dockerfile for tests
    pub fn python_plan() -> DockerfilePlan {
        DockerfilePlan {
            dockerfile: "FROM python:3.11-slim\nWORKDIR /app\nCOPY requirements.txt .\n\
                         RUN pip install --no-cache-dir -r requirements.txt\nCOPY . /app\n\
                         USER nobody\nCMD [\"uvicorn\", \"main:app\", \"--host\", \"0.0.0.0\"]\n"
                .to_string(),
            optimizations: vec!["Dependency layer cached before source copy".to_string()],
            explanations: vec!["Slim base image keeps the runtime small".to_string()],
        }
    }
}

#[async_trait]
impl DockerfileGenerator for MockGenerator {
    async fn generate(&self, _analysis: &ProjectAnalysis) -> Result<DockerfilePlan, AgentError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AgentError::Backend("no scripted response".to_string())))
    }
}
