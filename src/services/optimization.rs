//! Resource right-sizing, cost estimation, and build-file tuning
//!
//! This module derives compute sizing for a deployment target from the
//! detected framework and expected load tier, produces per-language build
//! cache hints, estimates monthly hosting cost from fixed platform pricing,
//! and lints generated Dockerfiles for layering and caching problems.
//!
//! Every profile lookup returns a fresh [`ResourceConfig`], so tier
//! adjustments never leak back into the profile table.

use serde::{Deserialize, Serialize};
use std::fmt;

// Platform pricing constants (per-second rates, as of 2024)
const CPU_RATE_PER_VCPU_SECOND: f64 = 0.000_024_0;
const MEMORY_RATE_PER_GIB_SECOND: f64 = 0.000_002_5;
const REQUEST_RATE_PER_MILLION: f64 = 0.40;

/// Modeling assumption for request duration; not derived from telemetry
const AVG_REQUEST_DURATION_SECS: f64 = 0.5;

/// Assumed fraction of requests served by a freshly provisioned instance
const COLD_START_RATE: f64 = 0.05;

/// Memory quantity unit for a deployment target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryUnit {
    Mi,
    Gi,
}

/// Memory quantity with its unit, e.g. `512Mi` or `1Gi`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    pub value: u32,
    pub unit: MemoryUnit,
}

impl Memory {
    pub const fn mib(value: u32) -> Self {
        Self {
            value,
            unit: MemoryUnit::Mi,
        }
    }

    pub const fn gib(value: u32) -> Self {
        Self {
            value,
            unit: MemoryUnit::Gi,
        }
    }

    /// Quantity expressed in GiB (MiB values are divided by 1024)
    pub fn as_gib(&self) -> f64 {
        match self.unit {
            MemoryUnit::Mi => f64::from(self.value) / 1024.0,
            MemoryUnit::Gi => f64::from(self.value),
        }
    }

    /// Doubles the quantity, preserving the unit
    fn doubled(self) -> Self {
        Self {
            value: self.value * 2,
            unit: self.unit,
        }
    }
}

impl fmt::Display for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            MemoryUnit::Mi => write!(f, "{}Mi", self.value),
            MemoryUnit::Gi => write!(f, "{}Gi", self.value),
        }
    }
}

/// Expected traffic tier used to adjust a baseline profile
///
/// Unknown tier strings are treated as [`LoadTier::Medium`], which leaves the
/// baseline untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadTier {
    Low,
    #[default]
    Medium,
    High,
}

impl LoadTier {
    /// Parses a tier name; anything unrecognized is `Medium`
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "low" => LoadTier::Low,
            "high" => LoadTier::High,
            _ => LoadTier::Medium,
        }
    }
}

impl fmt::Display for LoadTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadTier::Low => write!(f, "low"),
            LoadTier::Medium => write!(f, "medium"),
            LoadTier::High => write!(f, "high"),
        }
    }
}

/// Compute sizing for a deployment target
///
/// Invariants: `max_instances >= min_instances`, `cpu > 0`, memory > 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// vCPU count
    pub cpu: u32,
    /// Memory quantity with unit
    pub memory: Memory,
    /// Minimum warm instances
    pub min_instances: u32,
    /// Maximum instances
    pub max_instances: u32,
    /// Request timeout in seconds
    pub timeout_secs: u32,
    /// Concurrent requests per instance
    pub concurrency: u32,
}

impl ResourceConfig {
    /// Baseline with the standard instance bounds and timeout
    fn baseline(cpu: u32, memory: Memory, concurrency: u32) -> Self {
        Self {
            cpu,
            memory,
            min_instances: 0,
            max_instances: 10,
            timeout_secs: 300,
            concurrency,
        }
    }

    /// Converts to the flat ordered argument list expected by the deployment
    /// backend CLI
    pub fn to_deploy_args(&self) -> Vec<String> {
        vec![
            "--cpu".to_string(),
            self.cpu.to_string(),
            "--memory".to_string(),
            self.memory.to_string(),
            "--min-instances".to_string(),
            self.min_instances.to_string(),
            "--max-instances".to_string(),
            self.max_instances.to_string(),
            "--timeout".to_string(),
            self.timeout_secs.to_string(),
            "--concurrency".to_string(),
            self.concurrency.to_string(),
        ]
    }
}

impl Default for ResourceConfig {
    /// Fallback profile for frameworks without a table entry
    fn default() -> Self {
        Self::baseline(1, Memory::mib(512), 80)
    }
}

/// Per-language build optimization hints
#[derive(Debug, Clone, Serialize)]
pub struct BuildOptimizations {
    pub cache_dirs: Vec<&'static str>,
    pub build_args: Vec<&'static str>,
    pub tips: Vec<&'static str>,
}

/// Per-category monthly cost, rounded to cents
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CostBreakdown {
    pub cpu: f64,
    pub memory: f64,
    pub requests: f64,
    pub cold_starts: f64,
}

/// Monthly cost estimate for a sized deployment
#[derive(Debug, Clone, Serialize)]
pub struct CostEstimate {
    pub breakdown: CostBreakdown,
    pub total_monthly: f64,
    pub currency: &'static str,
}

/// Resource right-sizing and cost optimization heuristics
///
/// Stateless; construct once and share freely.
#[derive(Debug, Default, Clone, Copy)]
pub struct OptimizationService;

impl OptimizationService {
    pub fn new() -> Self {
        Self
    }

    /// Returns the optimal resource configuration for a framework and load tier
    ///
    /// The framework lookup is case-insensitive and falls back to
    /// [`ResourceConfig::default`] for unknown frameworks. Each call builds a
    /// fresh config, so adjustments never accumulate across calls.
    pub fn optimal_config(&self, framework: &str, expected_load: LoadTier) -> ResourceConfig {
        let mut config = Self::profile_for(framework);

        match expected_load {
            LoadTier::High => {
                config.min_instances = 2;
                config.max_instances = 50;
                config.cpu *= 2;
                config.memory = config.memory.doubled();
            }
            LoadTier::Low => {
                config.min_instances = 0;
                config.max_instances = 5;
                config.concurrency = (f64::from(config.concurrency) * 0.7) as u32;
            }
            LoadTier::Medium => {}
        }

        config
    }

    /// Baseline profile table, keyed by lowercase framework identifier
    fn profile_for(framework: &str) -> ResourceConfig {
        match framework.to_lowercase().as_str() {
            "fastapi" => ResourceConfig::baseline(1, Memory::mib(512), 100),
            "flask" => ResourceConfig::baseline(1, Memory::mib(512), 80),
            "django" => ResourceConfig::baseline(2, Memory::gib(1), 40),
            "express" => ResourceConfig::baseline(1, Memory::mib(512), 100),
            "nextjs" => ResourceConfig::baseline(2, Memory::gib(1), 60),
            "react" => ResourceConfig::baseline(1, Memory::mib(256), 100),
            "vue" => ResourceConfig::baseline(1, Memory::mib(256), 100),
            "spring-boot" => ResourceConfig::baseline(2, Memory::gib(1), 40),
            "golang" => ResourceConfig::baseline(1, Memory::mib(256), 200),
            "rust" => ResourceConfig::baseline(1, Memory::mib(128), 300),
            _ => ResourceConfig::default(),
        }
    }

    /// Returns build optimization hints for a language
    pub fn build_optimizations(&self, language: &str) -> BuildOptimizations {
        match language.to_lowercase().as_str() {
            "python" => BuildOptimizations {
                cache_dirs: vec!["/root/.cache/pip"],
                build_args: vec!["--no-cache-dir"],
                tips: vec![
                    "Use multi-stage builds to reduce image size",
                    "Install dependencies before copying source code",
                    "Use .dockerignore to exclude unnecessary files",
                    "Consider using slim base images (python:3.11-slim)",
                ],
            },
            "nodejs" => BuildOptimizations {
                cache_dirs: vec!["/root/.npm", "node_modules"],
                build_args: vec!["--production"],
                tips: vec![
                    "Use npm ci instead of npm install for faster builds",
                    "Copy package files before source code",
                    "Use multi-stage builds",
                    "Consider using alpine images",
                ],
            },
            "golang" => BuildOptimizations {
                cache_dirs: vec!["/go/pkg/mod"],
                build_args: vec!["-ldflags=\"-s -w\""],
                tips: vec![
                    "Use multi-stage builds (builder + runtime)",
                    "Use scratch or distroless images for runtime",
                    "Enable Go modules caching",
                    "Static compilation for smallest images",
                ],
            },
            "java" => BuildOptimizations {
                cache_dirs: vec!["/root/.m2", "/root/.gradle"],
                build_args: vec!["-DskipTests"],
                tips: vec![
                    "Use JDK for build, JRE for runtime",
                    "Use multi-stage builds",
                    "Cache Maven/Gradle dependencies",
                    "Consider using Jib for faster builds",
                ],
            },
            _ => BuildOptimizations {
                cache_dirs: vec![],
                build_args: vec![],
                tips: vec!["Use multi-stage builds", "Minimize layer count"],
            },
        }
    }

    /// Estimates the monthly hosting cost for a sized deployment
    ///
    /// Models a fixed average request duration and a 5% cold-start rate
    /// billed at the request rate.
    pub fn estimate_cost(&self, config: &ResourceConfig, requests_per_month: u64) -> CostEstimate {
        let total_seconds = requests_per_month as f64 * AVG_REQUEST_DURATION_SECS;

        let cpu_cost = f64::from(config.cpu) * total_seconds * CPU_RATE_PER_VCPU_SECOND;
        let memory_cost = config.memory.as_gib() * total_seconds * MEMORY_RATE_PER_GIB_SECOND;
        let request_cost = (requests_per_month as f64 / 1_000_000.0) * REQUEST_RATE_PER_MILLION;

        let cold_starts = requests_per_month as f64 * COLD_START_RATE;
        let cold_start_cost = (cold_starts / 1_000_000.0) * REQUEST_RATE_PER_MILLION;

        let total = cpu_cost + memory_cost + request_cost + cold_start_cost;

        CostEstimate {
            breakdown: CostBreakdown {
                cpu: round_cents(cpu_cost),
                memory: round_cents(memory_cost),
                requests: round_cents(request_cost),
                cold_starts: round_cents(cold_start_cost),
            },
            total_monthly: round_cents(total),
            currency: "USD",
        }
    }

    /// Lints a Dockerfile for layering and caching problems
    ///
    /// A heuristic textual scan over lines, not a parser. The predicates are
    /// independent, order-insensitive, and idempotent for identical input.
    pub fn lint_dockerfile(&self, content: &str) -> Vec<String> {
        let lines: Vec<&str> = content.lines().collect();
        let mut suggestions = Vec::new();

        let run_count = lines
            .iter()
            .filter(|line| line.trim_start().starts_with("RUN"))
            .count();
        if run_count > 5 {
            suggestions.push(format!(
                "Combine {} RUN commands into fewer layers for faster builds",
                run_count
            ));
        }

        if Self::copies_source_before_install(&lines) {
            suggestions.push(
                "Copy dependency files first, install, then copy source code for better caching"
                    .to_string(),
            );
        }

        let from_count = lines
            .iter()
            .filter(|line| line.trim_start().starts_with("FROM"))
            .count();
        if from_count == 1 {
            suggestions.push("Consider multi-stage build to reduce final image size".to_string());
        }

        suggestions
    }

    /// True when a "copy everything" instruction precedes the first
    /// dependency-install RUN, which busts the layer cache on every source edit
    fn copies_source_before_install(lines: &[&str]) -> bool {
        let copy_all = lines
            .iter()
            .position(|line| line.contains("COPY . ") || line.contains("COPY ./ "));
        let install = lines.iter().position(|line| {
            line.contains("RUN") && (line.contains("install") || line.contains("pip"))
        });

        matches!((copy_all, install), (Some(c), Some(i)) if c < i)
    }
}

/// Rounds to two decimal places for currency display
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
