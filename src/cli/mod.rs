//! # CLI Module
//!
//! Command-line tooling for route manifests, available as the `kvolt-routes`
//! binary.
//!
//! ## Commands
//!
//! ### `check`
//!
//! Build the routing table and fail on the first rejected route:
//!
//! ```bash
//! kvolt-routes check --routes routes.yaml
//! ```
//!
//! ### `list`
//!
//! Print every route with its handler and description:
//!
//! ```bash
//! kvolt-routes list --routes routes.yaml --json
//! ```
//!
//! ### `match`
//!
//! Resolve one request; exits with status 1 if nothing matches:
//!
//! ```bash
//! kvolt-routes match --routes routes.yaml GET /users/42
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, run_cli_to, Cli, Commands, Outcome};
