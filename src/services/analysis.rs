//! Analysis orchestration
//!
//! This module provides the high-level `AnalysisService` that coordinates
//! the code-analysis and Dockerfile-generation collaborators into a single
//! report.
//!
//! # Architecture
//!
//! The service acts as a thin orchestration layer:
//! 1. Invokes the code-analysis collaborator on the project path
//! 2. Invokes the Dockerfile-generation collaborator with the analysis
//! 3. Assembles a combined report with a fixed next-steps checklist
//!
//! Steps are strictly ordered because generation consumes the analysis. An
//! analyzer error short-circuits the workflow; generation is never attempted.
//! Milestone callbacks are best-effort: a reporter failure is logged and can
//! never abort the workflow.

use crate::agents::{AgentError, CodeAnalyzer, DockerfileGenerator};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Fixed checklist appended to every successful report
const NEXT_STEPS: [&str; 4] = [
    "Review the generated Dockerfile",
    "Configure environment variables",
    "Set up secrets in Secret Manager",
    "Deploy to Cloud Run",
];

/// Receives human-readable milestone strings during the workflow
///
/// Implementations typically forward to the client transport. Failures are
/// observed and logged by the service, never propagated.
#[async_trait]
pub trait MilestoneReporter: Send + Sync {
    async fn milestone(&self, message: &str) -> Result<(), crate::progress::SinkError>;
}

/// Condensed analysis fields carried by the full report
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub language: String,
    pub framework: String,
    pub entry_point: String,
    pub dependency_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    pub env_vars: HashMap<String, String>,
}

/// Generated Dockerfile section of the report
#[derive(Debug, Clone, Serialize)]
pub struct DockerfileSection {
    pub content: String,
    pub optimizations: Vec<String>,
    pub explanations: Vec<String>,
}

/// Combined result of a full analyze-and-generate run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analysis: AnalysisSummary,
    pub dockerfile: DockerfileSection,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
    pub next_steps: Vec<&'static str>,
}

/// Reduced summary produced without Dockerfile generation
#[derive(Debug, Clone, Serialize)]
pub struct QuickAnalysis {
    pub language: String,
    pub framework: String,
    pub dependencies: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    pub ready_to_deploy: bool,
}

/// Orchestrates code analysis and Dockerfile generation
pub struct AnalysisService {
    analyzer: Arc<dyn CodeAnalyzer>,
    generator: Arc<dyn DockerfileGenerator>,
}

impl AnalysisService {
    pub fn new(analyzer: Arc<dyn CodeAnalyzer>, generator: Arc<dyn DockerfileGenerator>) -> Self {
        Self {
            analyzer,
            generator,
        }
    }

    /// Full analysis workflow: analyze the codebase, generate a Dockerfile,
    /// and assemble a comprehensive report
    ///
    /// Collaborator errors are returned verbatim; the analyzer failing means
    /// generation is never attempted.
    pub async fn analyze_and_generate(
        &self,
        project_path: &Path,
        progress: Option<&dyn MilestoneReporter>,
    ) -> Result<AnalysisReport, AgentError> {
        info!(path = %project_path.display(), "Analyzing project");
        Self::notify(progress, "Scanning project structure...").await;

        let analysis = self.analyzer.analyze(project_path).await?;

        Self::notify(
            progress,
            &format!("Detected {} framework...", analysis.framework),
        )
        .await;

        info!(framework = %analysis.framework, "Generating Dockerfile");
        Self::notify(
            progress,
            &format!(
                "Generating optimized Dockerfile for {}...",
                analysis.framework
            ),
        )
        .await;

        let plan = self.generator.generate(&analysis).await?;

        Self::notify(progress, "Dockerfile generated successfully!").await;

        Ok(AnalysisReport {
            analysis: AnalysisSummary {
                language: analysis.language,
                framework: analysis.framework,
                entry_point: analysis.entry_point,
                dependency_count: analysis.dependencies.len(),
                database: analysis.database,
                port: analysis.port,
                env_vars: analysis.env_vars,
            },
            dockerfile: DockerfileSection {
                content: plan.dockerfile,
                optimizations: plan.optimizations,
                explanations: plan.explanations,
            },
            recommendations: analysis.recommendations,
            warnings: analysis.warnings,
            next_steps: NEXT_STEPS.to_vec(),
        })
    }

    /// Quick analysis without Dockerfile generation
    pub async fn quick_analysis(&self, project_path: &Path) -> Result<QuickAnalysis, AgentError> {
        let analysis = self.analyzer.analyze(project_path).await?;
        let ready_to_deploy = analysis.language != "unknown";

        Ok(QuickAnalysis {
            language: analysis.language,
            framework: analysis.framework,
            dependencies: analysis.dependencies.len(),
            database: analysis.database,
            ready_to_deploy,
        })
    }

    /// Delivers a milestone to the reporter, if any; failures are logged and
    /// swallowed so no callback outcome can abort the workflow
    async fn notify(progress: Option<&dyn MilestoneReporter>, message: &str) {
        if let Some(reporter) = progress {
            if let Err(e) = reporter.milestone(message).await {
                warn!(error = %e, "Failed to deliver milestone");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::mock::{MockAnalyzer, MockGenerator};
    use crate::progress::SinkError;
    use std::sync::Mutex;

    struct RecordingReporter {
        milestones: Mutex<Vec<String>>,
    }

    impl RecordingReporter {
        fn new() -> Self {
            Self {
                milestones: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MilestoneReporter for RecordingReporter {
        async fn milestone(&self, message: &str) -> Result<(), SinkError> {
            self.milestones.lock().unwrap().push(message.to_string());
            Ok(())
        }
    }

    struct FailingReporter;

    #[async_trait]
    impl MilestoneReporter for FailingReporter {
        async fn milestone(&self, _message: &str) -> Result<(), SinkError> {
            Err(SinkError::Disconnected)
        }
    }

    fn service_with(
        analyzer: MockAnalyzer,
        generator: MockGenerator,
    ) -> (AnalysisService, Arc<MockAnalyzer>, Arc<MockGenerator>) {
        let analyzer = Arc::new(analyzer);
        let generator = Arc::new(generator);
        (
            AnalysisService::new(analyzer.clone(), generator.clone()),
            analyzer,
            generator,
        )
    }

    #[tokio::test]
    async fn successful_run_assembles_full_report() {
        let analyzer = MockAnalyzer::new();
        analyzer.add_response(Ok(MockAnalyzer::fastapi_analysis()));
        let generator = MockGenerator::new();
        generator.add_response(Ok(MockGenerator::python_plan()));
        let (service, _, _) = service_with(analyzer, generator);

        let report = service
            .analyze_and_generate(Path::new("/work/repo"), None)
            .await
            .unwrap();

        assert_eq!(report.analysis.framework, "fastapi");
        assert_eq!(report.analysis.dependency_count, 3);
        assert_eq!(report.analysis.port, Some(8080));
        assert!(report.dockerfile.content.starts_with("FROM"));
        assert_eq!(report.next_steps.len(), 4);
        assert_eq!(report.next_steps[0], "Review the generated Dockerfile");
        assert_eq!(report.recommendations.len(), 1);
    }

    #[tokio::test]
    async fn analyzer_error_short_circuits_generation() {
        let analyzer = MockAnalyzer::new();
        analyzer.add_response(Err(AgentError::Analysis("no source files".to_string())));
        let generator = MockGenerator::new();
        generator.add_response(Ok(MockGenerator::python_plan()));
        let (service, _, generator) = service_with(analyzer, generator);

        let err = service
            .analyze_and_generate(Path::new("/work/repo"), None)
            .await
            .unwrap_err();

        assert_eq!(err, AgentError::Analysis("no source files".to_string()));
        // Generator was never consulted
        assert_eq!(generator.remaining_responses(), 1);
    }

    #[tokio::test]
    async fn generator_error_is_surfaced() {
        let analyzer = MockAnalyzer::new();
        analyzer.add_response(Ok(MockAnalyzer::fastapi_analysis()));
        let generator = MockGenerator::new();
        generator.add_response(Err(AgentError::Generation("model refused".to_string())));
        let (service, _, _) = service_with(analyzer, generator);

        let err = service
            .analyze_and_generate(Path::new("/work/repo"), None)
            .await
            .unwrap_err();
        assert_eq!(err, AgentError::Generation("model refused".to_string()));
    }

    #[tokio::test]
    async fn milestones_are_delivered_in_order() {
        let analyzer = MockAnalyzer::new();
        analyzer.add_response(Ok(MockAnalyzer::fastapi_analysis()));
        let generator = MockGenerator::new();
        generator.add_response(Ok(MockGenerator::python_plan()));
        let (service, _, _) = service_with(analyzer, generator);

        let reporter = RecordingReporter::new();
        service
            .analyze_and_generate(Path::new("/work/repo"), Some(&reporter))
            .await
            .unwrap();

        let milestones = reporter.milestones.lock().unwrap();
        assert_eq!(milestones.len(), 4);
        assert_eq!(milestones[0], "Scanning project structure...");
        assert!(milestones[1].contains("fastapi"));
        assert!(milestones[2].contains("Generating optimized Dockerfile"));
        assert_eq!(milestones[3], "Dockerfile generated successfully!");
    }

    #[tokio::test]
    async fn failing_reporter_does_not_abort_workflow() {
        let analyzer = MockAnalyzer::new();
        analyzer.add_response(Ok(MockAnalyzer::fastapi_analysis()));
        let generator = MockGenerator::new();
        generator.add_response(Ok(MockGenerator::python_plan()));
        let (service, _, _) = service_with(analyzer, generator);

        let report = service
            .analyze_and_generate(Path::new("/work/repo"), Some(&FailingReporter))
            .await;
        assert!(report.is_ok());
    }

    #[tokio::test]
    async fn quick_analysis_reports_readiness() {
        let analyzer = MockAnalyzer::new();
        analyzer.add_response(Ok(MockAnalyzer::fastapi_analysis()));
        let (service, _, _) = service_with(analyzer, MockGenerator::new());

        let quick = service.quick_analysis(Path::new("/work/repo")).await.unwrap();
        assert!(quick.ready_to_deploy);
        assert_eq!(quick.dependencies, 3);
    }

    #[tokio::test]
    async fn quick_analysis_unknown_language_not_ready() {
        let analyzer = MockAnalyzer::new();
        let mut unknown = MockAnalyzer::fastapi_analysis();
        unknown.language = "unknown".to_string();
        analyzer.add_response(Ok(unknown));
        let (service, _, _) = service_with(analyzer, MockGenerator::new());

        let quick = service.quick_analysis(Path::new("/work/repo")).await.unwrap();
        assert!(!quick.ready_to_deploy);
    }
}
