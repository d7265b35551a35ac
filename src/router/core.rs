//! Router core module - hot path for request routing.
//!
//! Registration (`add_route`) takes `&mut self` and lookup (`find`) takes
//! `&self`, so the borrow checker keeps the two phases apart: once a router
//! is shared (e.g. behind an `Arc`) it can only be read.

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use tracing::{debug, info, trace, warn};

use crate::error::RouterError;
use crate::runtime_config::RuntimeConfig;

use super::params::Params;
use super::radix::Node;

/// Result of successfully matching a request path to a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'r, 'p, H> {
    /// The handler registered for the matched pattern
    pub handler: &'r H,
    /// Path parameters in the order they appear in the path
    pub params: Params<'r, 'p>,
}

/// A registered route as reported by [`Router::routes`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    /// HTTP method (case-sensitive, e.g. `GET`)
    pub method: String,
    /// The pattern exactly as registered (e.g. `/users/:id`)
    pub pattern: String,
    /// Description set with [`Router::set_documentation`], if any
    pub description: Option<String>,
}

/// Router that matches HTTP requests to handlers using one radix tree per method
///
/// `H` is an opaque handler token. The router stores it and hands back a
/// reference on a match; it never calls it.
///
/// # Performance
///
/// - Route matching: O(k) where k is path length
/// - No allocation on lookup unless a route captures more than
///   [`MAX_INLINE_PARAMS`](super::MAX_INLINE_PARAMS) parameters
pub struct Router<H> {
    /// Root node per HTTP method, created on first registration
    trees: HashMap<String, Node<H>>,
    /// Descriptions keyed by (method, pattern)
    docs: HashMap<(String, String), String>,
    /// Number of successfully registered routes
    route_count: usize,
    config: RuntimeConfig,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    /// Create an empty router with default runtime settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// Create an empty router with explicit runtime settings
    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            trees: HashMap::new(),
            docs: HashMap::new(),
            route_count: 0,
            config,
        }
    }

    /// Register `handler` for `method` + `pattern`
    ///
    /// Pattern grammar: `/`-separated segments, each a literal, a `:name`
    /// parameter, or (last segment only) a `*name` catch-all.
    ///
    /// # Errors
    ///
    /// Returns a [`RouterError`] for a malformed pattern, a wildcard that
    /// conflicts with an existing route, or a duplicate (method, pattern).
    /// The router stays usable and all earlier routes remain reachable.
    ///
    /// # Example
    ///
    /// ```
    /// use kvolt_router::Router;
    ///
    /// let mut router = Router::new();
    /// router.add_route("GET", "/users/:id", "get_user")?;
    /// assert!(router.add_route("GET", "/users/:id", "again").is_err());
    /// # Ok::<(), kvolt_router::RouterError>(())
    /// ```
    pub fn add_route(&mut self, method: &str, pattern: &str, handler: H) -> Result<(), RouterError> {
        let root = self
            .trees
            .entry(method.to_string())
            .or_insert_with(Node::new);

        match root.insert(method, pattern, handler) {
            Ok(()) => {
                self.route_count += 1;
                debug!(method = %method, pattern = %pattern, "Route registered");
                Ok(())
            }
            Err(err) => {
                // Don't keep a tree for a method whose first route was rejected
                if self.trees.get(method).is_some_and(Node::is_empty) {
                    self.trees.remove(method);
                }
                warn!(method = %method, pattern = %pattern, error = %err, "Route registration rejected");
                Err(err)
            }
        }
    }

    /// Match a request to a handler
    ///
    /// Methods are compared case-sensitively and paths literally: `/foo`
    /// and `/foo/` are different routes and neither matches the other.
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - handler plus ordered path parameters
    /// * `None` - no route matches (typically a 404 upstream)
    ///
    /// # Example
    ///
    /// ```
    /// use kvolt_router::Router;
    ///
    /// let mut router = Router::new();
    /// router.add_route("GET", "/static/*filepath", 1)?;
    ///
    /// let m = router.find("GET", "/static/css/a.css").unwrap();
    /// assert_eq!(*m.handler, 1);
    /// assert_eq!(m.params.get("filepath"), Some("css/a.css"));
    /// assert!(router.find("POST", "/static/css/a.css").is_none());
    /// # Ok::<(), kvolt_router::RouterError>(())
    /// ```
    #[must_use]
    pub fn find<'r, 'p>(&'r self, method: &str, path: &'p str) -> Option<RouteMatch<'r, 'p, H>> {
        let root = self.trees.get(method)?;

        let result = match self.config.slow_lookup_threshold {
            Some(threshold) => {
                let match_start = Instant::now();
                let result = root.lookup(path);
                let match_duration = match_start.elapsed();
                if match_duration > threshold {
                    warn!(
                        method = %method,
                        path = %path,
                        duration_us = match_duration.as_micros(),
                        matched = result.is_some(),
                        "Slow route matching detected"
                    );
                }
                result
            }
            None => root.lookup(path),
        };

        match result {
            Some((handler, params)) => {
                trace!(method = %method, path = %path, params = params.len(), "Route matched");
                Some(RouteMatch { handler, params })
            }
            None => {
                trace!(method = %method, path = %path, "No route matched");
                None
            }
        }
    }

    /// Attach a free-text description to a route
    ///
    /// Keyed by method and the exact registered pattern; shown by
    /// [`Router::walk`] and [`Router::routes`].
    pub fn set_documentation(&mut self, method: &str, pattern: &str, description: impl Into<String>) {
        self.docs
            .insert((method.to_string(), pattern.to_string()), description.into());
    }

    /// Visit every registered route as `(method, pattern, description)`
    ///
    /// Methods are visited in sorted order.
    pub fn walk(&self, mut visit: impl FnMut(&str, &str, Option<&str>)) {
        self.walk_handlers(|method, pattern, _, description| visit(method, pattern, description));
    }

    /// Like [`Router::walk`], also handing out each route's handler
    pub fn walk_handlers(&self, mut visit: impl FnMut(&str, &str, &H, Option<&str>)) {
        let sorted: BTreeMap<&str, &Node<H>> =
            self.trees.iter().map(|(m, root)| (m.as_str(), root)).collect();

        for (method, root) in sorted {
            root.walk(|pattern, handler| {
                let description = self
                    .docs
                    .get(&(method.to_string(), pattern.to_string()))
                    .map(String::as_str);
                visit(method, pattern, handler, description);
            });
        }
    }

    /// All registered routes, sorted by method then pattern
    #[must_use]
    pub fn routes(&self) -> Vec<RouteInfo> {
        let mut routes = Vec::with_capacity(self.route_count);
        self.walk(|method, pattern, description| {
            routes.push(RouteInfo {
                method: method.to_string(),
                pattern: pattern.to_string(),
                description: description.map(str::to_string),
            });
        });
        routes.sort_by(|a, b| (&a.method, &a.pattern).cmp(&(&b.method, &b.pattern)));
        routes
    }

    /// Methods that have at least one tree, sorted
    #[must_use]
    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.trees.keys().map(String::as_str).collect();
        methods.sort_unstable();
        methods
    }

    /// Number of registered routes across all methods
    #[must_use]
    pub fn len(&self) -> usize {
        self.route_count
    }

    /// True if no route has been registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.route_count == 0
    }

    /// Log the routing table once registration is complete
    pub fn log_summary(&self) {
        let routes_summary: Vec<String> = self
            .routes()
            .iter()
            .take(10)
            .map(|r| format!("{} {}", r.method, r.pattern))
            .collect();

        info!(
            routes_count = self.route_count,
            methods = ?self.methods(),
            routes_summary = ?routes_summary,
            routing_algorithm = "radix_tree",
            "Routing table loaded"
        );
    }
}
