use std::fmt;

/// Route registration error
///
/// Returned by [`Router::add_route`](crate::router::Router::add_route) when a
/// pattern is malformed or collides with a route that is already registered.
/// These are boot-time errors: the application should refuse to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// Pattern is empty or does not begin with `/`
    InvalidPattern {
        /// The rejected pattern
        path: String,
    },
    /// A `:` or `*` with nothing between it and the next `/`
    UnnamedWildcard {
        /// The rejected pattern
        path: String,
    },
    /// More than one wildcard inside a single path segment (e.g. `/a/:x:y`)
    MultipleWildcards {
        /// The offending segment, starting at the first wildcard
        segment: String,
        /// The rejected pattern
        path: String,
    },
    /// A catch-all that is not the final segment (e.g. `/a/*x/b`)
    CatchAllNotLast {
        /// The rejected pattern
        path: String,
    },
    /// The new segment cannot coexist with what is already registered at
    /// the same position in the tree.
    ///
    /// A node holds either a single wildcard child or any number of static
    /// children, never both, and two different wildcard names cannot share a
    /// position.
    WildcardConflict {
        /// The segment of the new pattern that conflicts
        segment: String,
        /// The segment already present in the tree
        existing: String,
        /// The rejected pattern
        path: String,
    },
    /// The exact (method, pattern) pair is already registered
    DuplicateRoute {
        /// HTTP method the pattern was registered under
        method: String,
        /// The rejected pattern
        path: String,
    },
}

impl RouterError {
    /// The full pattern that was rejected
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            RouterError::InvalidPattern { path }
            | RouterError::UnnamedWildcard { path }
            | RouterError::MultipleWildcards { path, .. }
            | RouterError::CatchAllNotLast { path }
            | RouterError::WildcardConflict { path, .. }
            | RouterError::DuplicateRoute { path, .. } => path,
        }
    }
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::InvalidPattern { path } => {
                write!(f, "path must begin with '/' in path '{}'", path)
            }
            RouterError::UnnamedWildcard { path } => {
                write!(
                    f,
                    "wildcards must be named with a non-empty name in path '{}'",
                    path
                )
            }
            RouterError::MultipleWildcards { segment, path } => {
                write!(
                    f,
                    "only one wildcard per path segment is allowed, has: '{}' in path '{}'",
                    segment, path
                )
            }
            RouterError::CatchAllNotLast { path } => {
                write!(
                    f,
                    "catch-all routes are only allowed at the end of the path in path '{}'",
                    path
                )
            }
            RouterError::WildcardConflict {
                segment,
                existing,
                path,
            } => {
                write!(
                    f,
                    "'{}' in new path '{}' conflicts with existing segment '{}'",
                    segment, path, existing
                )
            }
            RouterError::DuplicateRoute { method, path } => {
                write!(
                    f,
                    "a handler is already registered for {} '{}'",
                    method, path
                )
            }
        }
    }
}

impl std::error::Error for RouterError {}
