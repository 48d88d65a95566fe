use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AI-assisted deployment orchestrator for managed container platforms
#[derive(Parser, Debug)]
#[command(
    name = "gantry",
    about = "AI-assisted deployment orchestrator for managed container platforms",
    version,
    long_about = "gantry analyzes cloned repositories, generates optimized Dockerfiles through \
                  AI collaborators, scans them for security issues, right-sizes compute for the \
                  target platform, and estimates monthly hosting cost."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Increase verbosity")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Scan a Dockerfile for security issues and layering problems",
        long_about = "Runs the security scan and the build-optimization lint over a Dockerfile.\n\n\
                      Examples:\n  \
                      gantry scan Dockerfile\n  \
                      gantry scan build/Dockerfile --json"
    )]
    Scan(ScanArgs),

    #[command(
        about = "Estimate monthly hosting cost for a framework and load tier",
        long_about = "Sizes compute for the framework, applies the load tier, and prices it.\n\n\
                      Examples:\n  \
                      gantry estimate --framework fastapi --requests 1000000\n  \
                      gantry estimate --framework django --load high --json"
    )]
    Estimate(EstimateArgs),

    #[command(about = "Validate a service name against platform naming rules")]
    ValidateName(ValidateNameArgs),

    #[command(about = "Print the tool declarations exposed to the LLM runtime")]
    Tools,
}

#[derive(Parser, Debug, Clone)]
pub struct ScanArgs {
    #[arg(value_name = "DOCKERFILE", help = "Path to the Dockerfile to scan")]
    pub dockerfile: PathBuf,

    #[arg(long, help = "Emit the result as JSON")]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct EstimateArgs {
    #[arg(short, long, help = "Detected framework (e.g., fastapi, express, rust)")]
    pub framework: String,

    #[arg(
        short,
        long,
        help = "Expected load tier (low, medium, high); defaults to GANTRY_EXPECTED_LOAD or medium"
    )]
    pub load: Option<String>,

    #[arg(
        short,
        long,
        default_value_t = 1_000_000,
        help = "Expected requests per month"
    )]
    pub requests: u64,

    #[arg(long, help = "Emit the result as JSON")]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ValidateNameArgs {
    #[arg(value_name = "NAME", help = "Service name to validate")]
    pub name: String,
}
