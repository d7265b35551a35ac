use crate::manifest::load_manifest;
use crate::runtime_config::RuntimeConfig;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use http::Method;
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;

/// Command-line interface for inspecting route manifests
#[derive(Parser)]
#[command(name = "kvolt-routes")]
#[command(about = "Check, list and match routes from a route manifest", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build the router from a manifest and report registration errors
    Check {
        /// Path to the route manifest (YAML or JSON)
        #[arg(short, long)]
        routes: PathBuf,
    },
    /// Print every registered route
    List {
        /// Path to the route manifest (YAML or JSON)
        #[arg(short, long)]
        routes: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Resolve a request against the manifest's routes
    Match {
        /// Path to the route manifest (YAML or JSON)
        #[arg(short, long)]
        routes: PathBuf,

        /// HTTP method (e.g. GET)
        method: String,

        /// Request path (e.g. /users/42)
        path: String,

        /// Emit JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// Outcome of a command, mapped to the process exit status by the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    NoMatch,
}

/// Execute a parsed command line, writing results to stdout
pub fn run_cli(cli: Cli) -> Result<Outcome> {
    let mut out = std::io::stdout().lock();
    run_cli_to(cli, &mut out)
}

/// Execute a parsed command line, writing results to `out`
pub fn run_cli_to(cli: Cli, out: &mut impl Write) -> Result<Outcome> {
    match cli.command {
        Commands::Check { routes } => {
            let manifest = load_manifest(&routes)?;
            let router = manifest.build_router(RuntimeConfig::from_env())?;
            router.log_summary();
            writeln!(
                out,
                "ok: {} routes across {} methods",
                router.len(),
                router.methods().len()
            )?;
        }
        Commands::List { routes, json } => {
            let manifest = load_manifest(&routes)?;
            let router = manifest.build_router(RuntimeConfig::from_env())?;

            let mut rows = Vec::with_capacity(router.len());
            router.walk_handlers(|method, pattern, handler, description| {
                rows.push((
                    method.to_string(),
                    pattern.to_string(),
                    handler.clone(),
                    description.map(str::to_string),
                ));
            });

            if json {
                let items: Vec<_> = rows
                    .iter()
                    .map(|(method, pattern, handler, description)| {
                        json!({
                            "method": method,
                            "path": pattern,
                            "handler": handler,
                            "description": description,
                        })
                    })
                    .collect();
                writeln!(out, "{}", serde_json::to_string_pretty(&items)?)?;
            } else {
                for (method, pattern, handler, description) in &rows {
                    match description {
                        Some(desc) => writeln!(out, "{method:<7} {pattern} -> {handler}  # {desc}")?,
                        None => writeln!(out, "{method:<7} {pattern} -> {handler}")?,
                    }
                }
            }
        }
        Commands::Match {
            routes,
            method,
            path,
            json,
        } => {
            let method = parse_method(&method)?;
            let manifest = load_manifest(&routes)?;
            let router = manifest.build_router(RuntimeConfig::from_env())?;

            let Some(m) = router.find(method.as_str(), &path) else {
                if json {
                    writeln!(out, "{}", json!({ "found": false }))?;
                } else {
                    writeln!(out, "no route for {method} {path}")?;
                }
                return Ok(Outcome::NoMatch);
            };

            if json {
                let params: Vec<_> = m
                    .params
                    .iter()
                    .map(|p| json!({ "name": p.key, "value": p.value }))
                    .collect();
                writeln!(
                    out,
                    "{}",
                    json!({ "found": true, "handler": m.handler, "params": params })
                )?;
            } else {
                writeln!(out, "handler: {}", m.handler)?;
                for p in &m.params {
                    writeln!(out, "  {} = {}", p.key, p.value)?;
                }
            }
        }
    }
    Ok(Outcome::Success)
}

/// Validate a method token; extension methods are accepted as-is
fn parse_method(method: &str) -> Result<Method> {
    if method.is_empty() {
        bail!("HTTP method must not be empty");
    }
    Method::from_bytes(method.as_bytes())
        .with_context(|| format!("'{}' is not a valid HTTP method", method))
}
