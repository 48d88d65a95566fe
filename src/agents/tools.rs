//! Tool declarations exposed to the LLM tool-calling runtime
//!
//! These four actions are dispatched externally; this module only describes
//! their parameter contracts. Selection between the first two is contextual:
//! the runtime must clone-and-analyze only when no local project path is
//! known, and deploy only when one is.

use genai::chat::Tool;
use serde_json::{json, Value};

pub const TOOL_CLONE_AND_ANALYZE_REPO: &str = "clone_and_analyze_repo";
pub const TOOL_DEPLOY_TO_CLOUDRUN: &str = "deploy_to_cloudrun";
pub const TOOL_LIST_USER_REPOSITORIES: &str = "list_user_repositories";
pub const TOOL_GET_DEPLOYMENT_LOGS: &str = "get_deployment_logs";

pub struct ToolRegistry;

impl ToolRegistry {
    /// Create all deployment tools for the LLM runtime
    pub fn create_all_tools() -> Vec<Tool> {
        vec![
            Self::create_clone_and_analyze_tool(),
            Self::create_deploy_tool(),
            Self::create_list_repositories_tool(),
            Self::create_deployment_logs_tool(),
        ]
    }

    /// Tool declarations as plain JSON, for inspection and transport
    pub fn schemas_json() -> Value {
        Value::Array(
            Self::create_all_tools()
                .into_iter()
                .map(|tool| {
                    json!({
                        "name": tool.name,
                        "description": tool.description,
                        "parameters": tool.schema,
                    })
                })
                .collect(),
        )
    }

    fn create_clone_and_analyze_tool() -> Tool {
        Tool {
            name: TOOL_CLONE_AND_ANALYZE_REPO.to_string(),
            description: Some(
                "Clone and analyze a GitHub repository. Only call this when no local \
                 project path is known yet. If a project path is already in context, the \
                 repository is already cloned - call deploy_to_cloudrun instead."
                    .to_string(),
            ),
            schema: Some(json!({
                "type": "object",
                "properties": {
                    "repo_url": {
                        "type": "string",
                        "description": "GitHub repository URL (e.g., https://github.com/user/repo)"
                    },
                    "branch": {
                        "type": "string",
                        "description": "Branch to clone (default: main or master)"
                    }
                },
                "required": ["repo_url"]
            })),
            config: None,
        }
    }

    fn create_deploy_tool() -> Tool {
        Tool {
            name: TOOL_DEPLOY_TO_CLOUDRUN.to_string(),
            description: Some(
                "Deploy to Google Cloud Run. Only call this when a local project path is \
                 already known from a prior clone; pass that path through unchanged."
                    .to_string(),
            ),
            schema: Some(json!({
                "type": "object",
                "properties": {
                    "project_path": {
                        "type": "string",
                        "description": "Local path to the cloned project"
                    },
                    "service_name": {
                        "type": "string",
                        "description": "Cloud Run service name (lowercase, hyphens only)"
                    }
                },
                "required": ["project_path", "service_name"]
            })),
            config: None,
        }
    }

    fn create_list_repositories_tool() -> Tool {
        Tool {
            name: TOOL_LIST_USER_REPOSITORIES.to_string(),
            description: Some(
                "List all GitHub repositories for the authenticated user".to_string(),
            ),
            schema: Some(json!({
                "type": "object",
                "properties": {}
            })),
            config: None,
        }
    }

    fn create_deployment_logs_tool() -> Tool {
        Tool {
            name: TOOL_GET_DEPLOYMENT_LOGS.to_string(),
            description: Some("Get logs from a deployed Cloud Run service".to_string()),
            schema: Some(json!({
                "type": "object",
                "properties": {
                    "service_name": {
                        "type": "string",
                        "description": "Cloud Run service name"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Number of log entries to fetch (default: 50)"
                    }
                },
                "required": ["service_name"]
            })),
            config: None,
        }
    }
}
