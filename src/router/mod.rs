//! # Router Module
//!
//! The router module provides path matching and route resolution: given an
//! HTTP method and a request path it returns the handler registered for that
//! exact route plus the path parameters captured along the way.
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Registration**: At startup, patterns such as `/users/:id` or
//!    `/static/*filepath` are inserted into a radix tree, one tree per method.
//!    Malformed or conflicting patterns are rejected with a [`RouterError`](crate::RouterError).
//!
//! 2. **Matching**: For each incoming request the tree for its method is walked
//!    byte by byte. Matching is exact: no trailing-slash redirects, no
//!    case-insensitive fallback, no partial matches.
//!
//! ## Pattern syntax
//!
//! | Segment     | Matches                                   |
//! |-------------|-------------------------------------------|
//! | `users`     | the literal text                          |
//! | `:id`       | one path segment (up to the next `/`)     |
//! | `*filepath` | the rest of the path, slashes included    |
//!
//! A catch-all must be the last segment, and a segment holds at most one
//! wildcard.
//!
//! ## Example
//!
//! ```rust
//! use kvolt_router::Router;
//!
//! let mut router = Router::new();
//! router.add_route("GET", "/users/:id/posts/:post_id", "get_post")?;
//!
//! if let Some(m) = router.find("GET", "/users/42/posts/7") {
//!     assert_eq!(*m.handler, "get_post");
//!     assert_eq!(m.params.get("id"), Some("42"));
//!     assert_eq!(m.params.get("post_id"), Some("7"));
//! }
//! # Ok::<(), kvolt_router::RouterError>(())
//! ```
//!
//! ## Performance
//!
//! - Sub-microsecond matching for typical paths
//! - No heap allocation per lookup for routes with up to 8 parameters
//! - Cost proportional to path length, not to the number of routes

mod core;
mod params;
mod radix;

pub use self::core::{RouteInfo, RouteMatch, Router};
pub use self::params::{Param, Params, MAX_INLINE_PARAMS};
