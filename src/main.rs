use gantry::cli::{CliArgs, Commands, EstimateArgs, ScanArgs, ValidateNameArgs};
use gantry::{
    GantryConfig, LoadTier, OptimizationService, SecurityService, ToolRegistry, VERSION,
};

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("gantry v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let result = match &args.command {
        Commands::Scan(scan_args) => handle_scan(scan_args),
        Commands::Estimate(estimate_args) => handle_estimate(estimate_args),
        Commands::ValidateName(name_args) => handle_validate_name(name_args),
        Commands::Tools => handle_tools(),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

fn handle_scan(args: &ScanArgs) -> Result<i32> {
    let content = std::fs::read_to_string(&args.dockerfile)
        .with_context(|| format!("failed to read {}", args.dockerfile.display()))?;

    let security = SecurityService::new();
    let optimization = OptimizationService::new();

    let scan = security.scan_dockerfile(&content);
    let suggestions = optimization.lint_dockerfile(&content);

    if args.json {
        let output = serde_json::json!({
            "security": scan,
            "optimizations": suggestions,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        if scan.secure {
            println!("Security: OK");
        } else {
            println!("Security: ISSUES FOUND");
            for issue in &scan.issues {
                println!("  issue: {}", issue);
            }
        }
        for rec in &scan.recommendations {
            println!("  recommend: {}", rec);
        }
        for suggestion in &suggestions {
            println!("  optimize: {}", suggestion);
        }
    }

    Ok(if scan.secure { 0 } else { 1 })
}

fn handle_estimate(args: &EstimateArgs) -> Result<i32> {
    let env_config = GantryConfig::default();
    env_config.validate().context("invalid configuration")?;

    let optimization = OptimizationService::new();
    let load = args
        .load
        .as_deref()
        .map(LoadTier::parse)
        .unwrap_or(env_config.expected_load);
    let config = optimization.optimal_config(&args.framework, load);
    let estimate = optimization.estimate_cost(&config, args.requests);

    if args.json {
        let output = serde_json::json!({
            "config": config,
            "estimate": estimate,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{} ({} load): {} vCPU, {} memory, {}-{} instances, concurrency {}",
            args.framework,
            load,
            config.cpu,
            config.memory,
            config.min_instances,
            config.max_instances,
            config.concurrency
        );
        println!(
            "Estimated monthly cost for {} requests: ${:.2} {}",
            args.requests, estimate.total_monthly, estimate.currency
        );
        println!(
            "  cpu ${:.2}  memory ${:.2}  requests ${:.2}  cold starts ${:.2}",
            estimate.breakdown.cpu,
            estimate.breakdown.memory,
            estimate.breakdown.requests,
            estimate.breakdown.cold_starts
        );
    }

    Ok(0)
}

fn handle_validate_name(args: &ValidateNameArgs) -> Result<i32> {
    let security = SecurityService::new();
    match security.validate_service_name(&args.name) {
        Ok(name) => {
            println!("Valid service name: {}", name);
            Ok(0)
        }
        Err(e) => {
            println!("Invalid service name: {}", e);
            Ok(1)
        }
    }
}

fn handle_tools() -> Result<i32> {
    println!("{}", serde_json::to_string_pretty(&ToolRegistry::schemas_json())?);
    Ok(0)
}

fn init_logging_from_args(args: &CliArgs) {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let level = if let Some(level_str) = &args.log_level {
            parse_level(level_str)
        } else if args.verbose {
            Level::DEBUG
        } else if args.quiet {
            Level::ERROR
        } else {
            let level_str = env::var("GANTRY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
            parse_level(&level_str)
        };

        let mut filter = EnvFilter::from_default_env();

        if env::var("RUST_LOG").is_err() {
            filter = filter
                .add_directive(format!("gantry={}", level).parse().unwrap())
                .add_directive("h2=warn".parse().unwrap())
                .add_directive("hyper=warn".parse().unwrap());
        }

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    });
}

fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}
