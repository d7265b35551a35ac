//! # kvolt-router
//!
//! **kvolt-router** is the request-routing core of an HTTP framework: a
//! compressed-trie (radix tree) matcher that resolves a method and a request
//! path to the handler registered for that exact route, together with the path
//! parameters captured along the way.
//!
//! ## Overview
//!
//! - **[`router`]** - Radix tree insertion and lookup, one tree per HTTP method
//! - **[`error`]** - Typed registration errors
//! - **[`runtime_config`]** - Environment-driven runtime tuning
//! - **[`otel`]** - Structured logging setup for binaries
//! - **[`manifest`]** - YAML/JSON route manifests
//! - **[`cli`]** - The `kvolt-routes` inspection tool
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant App as Application
//!     participant Router as Router
//!     participant Tree as Node (per method)
//!
//!     App->>Router: add_route("GET", "/users/:id", handler)
//!     Router->>Tree: insert (split edges, add wildcard nodes)
//!     Tree-->>Router: Ok / RouterError
//!
//!     App->>Router: find("GET", "/users/42")
//!     Router->>Tree: lookup
//!     Tree-->>Router: (&handler, [("id", "42")])
//!     Router-->>App: Some(RouteMatch)
//! ```
//!
//! Registration happens once at startup and fails fast on malformed or
//! conflicting patterns. Lookup is a read-only walk, safe to run from any
//! number of threads once the router is shared.
//!
//! ## Quick Start
//!
//! ```
//! use kvolt_router::Router;
//!
//! let mut router = Router::new();
//! router.add_route("GET", "/", "index")?;
//! router.add_route("GET", "/users/:id", "get_user")?;
//! router.add_route("GET", "/static/*filepath", "serve_static")?;
//!
//! let m = router.find("GET", "/users/42").expect("route exists");
//! assert_eq!(*m.handler, "get_user");
//! assert_eq!(m.params.get("id"), Some("42"));
//!
//! assert!(router.find("GET", "/users/42/").is_none());
//! # Ok::<(), kvolt_router::RouterError>(())
//! ```
//!
//! ## Sharing across threads
//!
//! ```
//! use std::sync::Arc;
//! use kvolt_router::Router;
//!
//! let mut router = Router::new();
//! router.add_route("GET", "/ping", 1u8)?;
//! let router = Arc::new(router);
//!
//! let workers: Vec<_> = (0..4)
//!     .map(|_| {
//!         let router = Arc::clone(&router);
//!         std::thread::spawn(move || router.find("GET", "/ping").is_some())
//!     })
//!     .collect();
//! for w in workers {
//!     assert!(w.join().unwrap());
//! }
//! # Ok::<(), kvolt_router::RouterError>(())
//! ```

pub mod cli;
pub mod error;
pub mod manifest;
pub mod otel;
pub mod router;
pub mod runtime_config;

pub use error::RouterError;
pub use router::{Param, Params, RouteInfo, RouteMatch, Router};
pub use runtime_config::RuntimeConfig;
