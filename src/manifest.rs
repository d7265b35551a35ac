//! Route manifest loading
//!
//! A manifest is a YAML or JSON file listing routes, used by the
//! `kvolt-routes` binary to check and inspect a routing table without
//! starting the application that owns it:
//!
//! ```yaml
//! routes:
//!   - method: GET
//!     path: /users/:id
//!     handler: get_user
//!     description: Fetch one user
//!   - method: GET
//!     path: /static/*filepath
//!     handler: serve_static
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::router::Router;
use crate::runtime_config::RuntimeConfig;

/// One manifest entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// HTTP method, case-sensitive
    pub method: String,
    /// Route pattern
    pub path: String,
    /// Handler name, used as the router's handler token
    pub handler: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A parsed route manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

impl Manifest {
    /// Register every entry, stopping at the first rejected route
    pub fn build_router(&self, config: RuntimeConfig) -> Result<Router<String>> {
        let mut router = Router::with_config(config);
        for (i, entry) in self.routes.iter().enumerate() {
            router
                .add_route(&entry.method, &entry.path, entry.handler.clone())
                .with_context(|| {
                    format!(
                        "route #{} ({} {} -> {}) rejected",
                        i + 1,
                        entry.method,
                        entry.path,
                        entry.handler
                    )
                })?;
            if let Some(description) = &entry.description {
                router.set_documentation(&entry.method, &entry.path, description.clone());
            }
        }
        Ok(router)
    }
}

/// Parse manifest text; `yaml` selects YAML over JSON
pub fn parse_manifest(content: &str, yaml: bool) -> Result<Manifest> {
    let manifest = if yaml {
        serde_yaml::from_str(content).context("Failed to parse YAML route manifest")?
    } else {
        serde_json::from_str(content).context("Failed to parse JSON route manifest")?
    };
    Ok(manifest)
}

/// Load a manifest from disk, choosing the format by file extension
pub fn load_manifest(file_path: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read route manifest {}", file_path.display()))?;
    let yaml = matches!(
        file_path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let manifest = parse_manifest(&content, yaml)
        .with_context(|| format!("Invalid route manifest {}", file_path.display()))?;

    info!(
        manifest = %file_path.display(),
        routes_count = manifest.routes.len(),
        "Route manifest loaded"
    );
    Ok(manifest)
}
