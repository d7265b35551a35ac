//! Radix tree implementation for efficient HTTP route matching
//!
//! This module provides a radix tree (also called compact prefix tree) for O(k)
//! route matching where k is the path length, independent of how many routes
//! are registered.
//!
//! ## Implementation Details
//!
//! Every node owns a byte segment of a pattern. Literal text shared by several
//! patterns is stored once and split on demand when a new pattern diverges in
//! the middle of an existing segment:
//!
//! ```text
//! /user, /users, /use        "/use" (handler)
//!                             └─ "r" (handler)
//!                                 └─ "s" (handler)
//! ```
//!
//! - Static children are found through `indices`, one byte per child holding
//!   the first byte of that child's segment
//! - A node with a wildcard child (`:name` or `*name`) has exactly that one child
//! - Children are kept roughly ordered by `priority` (routes in the subtree) so
//!   busy branches are probed first
//!
//! Segments are raw bytes: a split may land inside a multi-byte UTF-8 sequence,
//! which is fine because matching is byte-wise. Captured values are only ever
//! sliced at positions that are char boundaries of the request path.
//!
//! Both insertion and lookup are loops over a cursor into the tree, so deeply
//! segmented patterns or hostile request paths never grow the call stack.

use crate::error::RouterError;

use super::params::Params;

/// Kind of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    /// Plain literal segment
    Static,
    /// Top of a per-method tree
    Root,
    /// `:name`, captures one path segment
    Param,
    /// `*name`, captures the rest of the path
    CatchAll,
}

/// Node in the radix tree
pub(crate) struct Node<H> {
    /// The part of the pattern owned by this node
    segment: Vec<u8>,
    kind: NodeKind,
    /// True iff the only child is a `Param` or `CatchAll` node
    wild_child: bool,
    /// First byte of each static child's segment, parallel to `children`
    indices: Vec<u8>,
    children: Vec<Node<H>>,
    /// Present only if this node completes a registered pattern
    handler: Option<H>,
    /// Number of routes registered in this subtree
    priority: u32,
}

impl<H> Node<H> {
    /// Create an empty root node
    pub(crate) fn new() -> Self {
        Self::with_kind(NodeKind::Root)
    }

    fn with_kind(kind: NodeKind) -> Self {
        Self {
            segment: Vec::new(),
            kind,
            wild_child: false,
            indices: Vec::new(),
            children: Vec::new(),
            handler: None,
            priority: 0,
        }
    }

    fn wildcard(segment: &[u8], kind: NodeKind) -> Self {
        Self {
            segment: segment.to_vec(),
            kind,
            wild_child: false,
            indices: Vec::new(),
            children: Vec::new(),
            handler: None,
            priority: 1,
        }
    }

    /// True for a root that holds no route yet
    pub(crate) fn is_empty(&self) -> bool {
        self.segment.is_empty() && self.children.is_empty()
    }

    /// Wildcard name without the leading `:`/`*`
    ///
    /// Wildcard segments are always complete UTF-8 strings taken from the
    /// pattern, so the fallback is never hit.
    fn param_key(&self) -> &str {
        self.segment
            .get(1..)
            .and_then(|name| std::str::from_utf8(name).ok())
            .unwrap_or("")
    }

    /// Insert a route into the subtree rooted at this node
    ///
    /// `path` is the full pattern (e.g. `/users/:id/files/*filepath`). The
    /// pattern is validated before the tree is touched; conflicts and
    /// duplicates are detected during the walk, after which only
    /// semantics-preserving edge splits may have happened.
    pub(crate) fn insert(&mut self, method: &str, path: &str, handler: H) -> Result<(), RouterError> {
        check_pattern(path)?;

        let full_path = path;
        let mut path = path.as_bytes();
        self.priority += 1;

        // Empty tree
        if self.is_empty() {
            self.insert_wildcards(path, handler);
            self.kind = NodeKind::Root;
            return Ok(());
        }

        let mut n = self;
        loop {
            let i = longest_common_prefix(path, &n.segment);

            // Split edge
            if i < n.segment.len() {
                n.split_at(i);
            }

            if i == path.len() {
                if n.handler.is_some() {
                    return Err(RouterError::DuplicateRoute {
                        method: method.to_string(),
                        path: full_path.to_string(),
                    });
                }
                n.handler = Some(handler);
                return Ok(());
            }

            path = &path[i..];
            let c = path[0];

            // '/' after param: params have exactly one follow-on child
            if n.kind == NodeKind::Param && c == b'/' && n.children.len() == 1 {
                n = &mut n.children[0];
                n.priority += 1;
                continue;
            }

            if n.wild_child {
                let existing = &n.children[0].segment;
                let same_wildcard = path.starts_with(existing)
                    && path.get(existing.len()).map_or(true, |&b| b == b'/');
                if !same_wildcard {
                    return Err(RouterError::WildcardConflict {
                        segment: lossy(first_segment(path)),
                        existing: lossy(existing),
                        path: full_path.to_string(),
                    });
                }
                n = &mut n.children[0];
                n.priority += 1;
                continue;
            }

            // Check if a child with the next path byte exists
            if let Some(pos) = n.indices.iter().position(|&b| b == c) {
                let pos = n.increment_child_priority(pos);
                n = &mut n.children[pos];
                continue;
            }

            if !is_wildcard(c) {
                n.indices.push(c);
                n.children.push(Node::with_kind(NodeKind::Static));
                let pos = n.increment_child_priority(n.children.len() - 1);
                n = &mut n.children[pos];
            } else if let Some(existing) = n.children.first() {
                // A wildcard cannot sit next to static siblings
                return Err(RouterError::WildcardConflict {
                    segment: lossy(first_segment(path)),
                    existing: lossy(&existing.segment),
                    path: full_path.to_string(),
                });
            }
            n.insert_wildcards(path, handler);
            return Ok(());
        }
    }

    /// Push this node's content from byte `i` onwards down into a new child
    fn split_at(&mut self, i: usize) {
        let child = Node {
            segment: self.segment.split_off(i),
            kind: NodeKind::Static,
            wild_child: self.wild_child,
            indices: std::mem::take(&mut self.indices),
            children: std::mem::take(&mut self.children),
            handler: self.handler.take(),
            priority: self.priority - 1,
        };
        self.indices = vec![child.segment[0]];
        self.children = vec![child];
        self.wild_child = false;
    }

    /// Build the chain of nodes for the rest of a pattern below this node
    ///
    /// Only called on a node without children; the pattern has already been
    /// validated by [`check_pattern`].
    fn insert_wildcards(&mut self, mut path: &[u8], handler: H) {
        let mut n = self;
        while let Some((wildcard, start, _)) = find_wildcard(path) {
            if start > 0 {
                n.segment = path[..start].to_vec();
                path = &path[start..];
            }

            let kind = if wildcard[0] == b':' {
                NodeKind::Param
            } else {
                NodeKind::CatchAll
            };
            n.children = vec![Node::wildcard(wildcard, kind)];
            n.wild_child = true;
            n = &mut n.children[0];

            if kind == NodeKind::CatchAll || wildcard.len() == path.len() {
                n.handler = Some(handler);
                return;
            }

            // The pattern continues with '/' after the param name
            path = &path[wildcard.len()..];
            let mut next = Node::with_kind(NodeKind::Static);
            next.priority = 1;
            n.indices = vec![path[0]];
            n.children = vec![next];
            n = &mut n.children[0];
        }

        n.segment = path.to_vec();
        n.handler = Some(handler);
    }

    /// Bump a child's priority and move it towards the front while its
    /// left neighbour has a lower priority. Returns the child's new position.
    fn increment_child_priority(&mut self, pos: usize) -> usize {
        self.children[pos].priority += 1;
        let priority = self.children[pos].priority;

        let mut new_pos = pos;
        while new_pos > 0 && self.children[new_pos - 1].priority < priority {
            self.children.swap(new_pos - 1, new_pos);
            self.indices.swap(new_pos - 1, new_pos);
            new_pos -= 1;
        }
        new_pos
    }

    /// Resolve a request path to its handler and captured parameters
    ///
    /// Returns `None` when nothing matches exactly; there is no trailing-slash
    /// or case-insensitive fallback.
    pub(crate) fn lookup<'n, 'p>(&'n self, path: &'p str) -> Option<(&'n H, Params<'n, 'p>)> {
        let bytes = path.as_bytes();
        let mut params = Params::new();
        let mut n = self;
        let mut pos = 0;

        loop {
            let rest = &bytes[pos..];
            let prefix = n.segment.as_slice();

            if rest.len() > prefix.len() {
                if !rest.starts_with(prefix) {
                    return None;
                }
                pos += prefix.len();

                if !n.wild_child {
                    let c = bytes[pos];
                    let idx = n.indices.iter().position(|&b| b == c)?;
                    n = &n.children[idx];
                    continue;
                }

                n = &n.children[0];
                match n.kind {
                    NodeKind::Param => {
                        let rest = &bytes[pos..];
                        let end = rest.iter().position(|&b| b == b'/').unwrap_or(rest.len());
                        params.push(n.param_key(), path.get(pos..pos + end)?);

                        if end < rest.len() {
                            // Continue below the param, or stop: nothing can match
                            let next = n.children.first()?;
                            pos += end;
                            n = next;
                            continue;
                        }
                        return n.handler.as_ref().map(|h| (h, params));
                    }
                    NodeKind::CatchAll => {
                        params.push(n.param_key(), path.get(pos..)?);
                        return n.handler.as_ref().map(|h| (h, params));
                    }
                    NodeKind::Static | NodeKind::Root => return None,
                }
            }

            if rest == prefix {
                return n.handler.as_ref().map(|h| (h, params));
            }
            return None;
        }
    }

    /// Visit every registered pattern below this node, depth-first in child order
    pub(crate) fn walk(&self, mut visit: impl FnMut(&str, &H)) {
        // (node, length of the accumulated pattern before this node)
        let mut stack: Vec<(&Node<H>, usize)> = vec![(self, 0)];
        let mut pattern: Vec<u8> = Vec::new();

        while let Some((node, depth)) = stack.pop() {
            pattern.truncate(depth);
            pattern.extend_from_slice(&node.segment);

            if let Some(handler) = &node.handler {
                visit(&String::from_utf8_lossy(&pattern), handler);
            }
            let next_depth = pattern.len();
            for child in node.children.iter().rev() {
                stack.push((child, next_depth));
            }
        }
    }
}

fn is_wildcard(c: u8) -> bool {
    c == b':' || c == b'*'
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Bytes up to (not including) the first '/' after position 0
fn first_segment(path: &[u8]) -> &[u8] {
    let end = path
        .iter()
        .skip(1)
        .position(|&b| b == b'/')
        .map_or(path.len(), |i| i + 1);
    &path[..end]
}

fn longest_common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Find the first wildcard in `path`
///
/// Returns the wildcard (from its `:`/`*` marker up to the next `/` or the
/// end), its start offset, and whether it is free of further `:`/`*`.
fn find_wildcard(path: &[u8]) -> Option<(&[u8], usize, bool)> {
    let start = path.iter().position(|&c| is_wildcard(c))?;
    let mut valid = true;
    for (end, &c) in path[start + 1..].iter().enumerate() {
        match c {
            b'/' => return Some((&path[start..start + 1 + end], start, valid)),
            b':' | b'*' => valid = false,
            _ => {}
        }
    }
    Some((&path[start..], start, valid))
}

/// Reject malformed patterns before they reach the tree
fn check_pattern(full_path: &str) -> Result<(), RouterError> {
    if !full_path.starts_with('/') {
        return Err(RouterError::InvalidPattern {
            path: full_path.to_string(),
        });
    }

    let mut path = full_path.as_bytes();
    while let Some((wildcard, start, valid)) = find_wildcard(path) {
        if !valid {
            return Err(RouterError::MultipleWildcards {
                segment: lossy(wildcard),
                path: full_path.to_string(),
            });
        }
        if wildcard.len() < 2 {
            return Err(RouterError::UnnamedWildcard {
                path: full_path.to_string(),
            });
        }
        let end = start + wildcard.len();
        if wildcard[0] == b'*' && end != path.len() {
            return Err(RouterError::CatchAllNotLast {
                path: full_path.to_string(),
            });
        }
        path = &path[end..];
    }
    Ok(())
}

#[cfg(test)]
impl<H> Node<H> {
    /// Assert the structural invariants of the whole subtree
    pub(crate) fn assert_invariants(&self) {
        let mut stack = vec![self];
        while let Some(n) = stack.pop() {
            let has_wildcard_child = n.children.len() == 1
                && matches!(n.children[0].kind, NodeKind::Param | NodeKind::CatchAll);
            assert_eq!(n.wild_child, has_wildcard_child, "wild_child flag out of sync");

            if n.wild_child {
                assert!(n.indices.is_empty(), "wildcard child must not be indexed");
            } else {
                assert_eq!(n.indices.len(), n.children.len(), "indices/children length");
                for (idx, child) in n.indices.iter().zip(&n.children) {
                    assert_eq!(Some(idx), child.segment.first(), "index byte mismatch");
                }
            }
            if n.kind == NodeKind::CatchAll {
                assert!(n.children.is_empty(), "catch-all node with children");
            }
            stack.extend(n.children.iter());
        }
    }

    pub(crate) fn kind(&self) -> NodeKind {
        self.kind
    }

    pub(crate) fn priority(&self) -> u32 {
        self.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(routes: &[&str]) -> Node<String> {
        let mut root = Node::new();
        for route in routes {
            root.insert("GET", route, route.to_string())
                .expect("route should insert");
        }
        root.assert_invariants();
        root
    }

    fn handler_for<'a>(root: &'a Node<String>, path: &str) -> Option<&'a str> {
        root.lookup(path).map(|(h, _)| h.as_str())
    }

    #[test]
    fn test_radix_static_routes() {
        let root = tree(&["/", "/ping", "/pong", "/users", "/users/all"]);
        for route in ["/", "/ping", "/pong", "/users", "/users/all"] {
            assert_eq!(handler_for(&root, route), Some(route));
        }
        assert_eq!(handler_for(&root, "/p"), None);
        assert_eq!(handler_for(&root, "/users/"), None);
        assert_eq!(handler_for(&root, "/users/allx"), None);
    }

    #[test]
    fn test_radix_first_insert_marks_root() {
        let root = tree(&["/users/:id"]);
        assert_eq!(root.kind(), NodeKind::Root);
        assert_eq!(root.segment, b"/users/");
        assert!(root.wild_child);
    }

    #[test]
    fn test_radix_edge_split_keeps_routes_apart() {
        let root = tree(&["/user", "/users", "/use"]);
        assert_eq!(handler_for(&root, "/user"), Some("/user"));
        assert_eq!(handler_for(&root, "/users"), Some("/users"));
        assert_eq!(handler_for(&root, "/use"), Some("/use"));
        assert_eq!(handler_for(&root, "/us"), None);
        assert_eq!(root.segment, b"/use");
    }

    #[test]
    fn test_radix_param_capture() {
        let root = tree(&["/users/:id"]);
        let (h, params) = root.lookup("/users/42").expect("match");
        assert_eq!(h, "/users/:id");
        assert_eq!(params.get("id"), Some("42"));
        assert!(root.lookup("/users/42/x").is_none());
        assert!(root.lookup("/users/").is_none());
    }

    #[test]
    fn test_radix_param_with_continuation() {
        let root = tree(&[
            "/users/:id",
            "/users/:id/posts",
            "/users/:id/posts/:post_id",
            "/users/:id/comments",
        ]);

        let (h, params) = root.lookup("/users/7/posts/99").expect("match");
        assert_eq!(h, "/users/:id/posts/:post_id");
        let pairs: Vec<(&str, &str)> = params.iter().map(|p| (p.key, p.value)).collect();
        assert_eq!(pairs, vec![("id", "7"), ("post_id", "99")]);

        assert_eq!(handler_for(&root, "/users/7"), Some("/users/:id"));
        assert_eq!(handler_for(&root, "/users/7/posts"), Some("/users/:id/posts"));
        assert_eq!(handler_for(&root, "/users/7/comments"), Some("/users/:id/comments"));
        assert_eq!(handler_for(&root, "/users/7/likes"), None);
    }

    #[test]
    fn test_radix_catch_all_captures_slashes() {
        let root = tree(&["/static/*filepath"]);
        let (_, params) = root.lookup("/static/css/a.css").expect("match");
        assert_eq!(params.get("filepath"), Some("css/a.css"));
        assert!(root.lookup("/static/").is_none());
        assert!(root.lookup("/stat").is_none());
    }

    #[test]
    fn test_radix_literal_prefix_before_param() {
        let root = tree(&["/files/v:version"]);
        let (_, params) = root.lookup("/files/v12").expect("match");
        assert_eq!(params.get("version"), Some("12"));
        assert!(root.lookup("/files/x12").is_none());
    }

    #[test]
    fn test_radix_duplicate_rejected() {
        let mut root = tree(&["/a", "/a/:id", "/s/*rest"]);
        for dup in ["/a", "/a/:id", "/s/*rest"] {
            let err = root.insert("GET", dup, "dup".to_string()).unwrap_err();
            assert!(matches!(err, RouterError::DuplicateRoute { .. }), "{dup}: {err}");
        }
        root.assert_invariants();
        assert_eq!(handler_for(&root, "/a"), Some("/a"));
        assert_eq!(handler_for(&root, "/a/1"), Some("/a/:id"));
    }

    #[test]
    fn test_radix_wildcard_conflicts() {
        let mut root = tree(&["/users/:id", "/files/list"]);

        let err = root.insert("GET", "/users/new", String::new()).unwrap_err();
        assert!(matches!(err, RouterError::WildcardConflict { .. }));

        let err = root.insert("GET", "/users/:name", String::new()).unwrap_err();
        assert!(matches!(err, RouterError::WildcardConflict { .. }));

        let err = root.insert("GET", "/files/:name", String::new()).unwrap_err();
        assert!(matches!(err, RouterError::WildcardConflict { .. }));

        let err = root.insert("GET", "/users/:idx", String::new()).unwrap_err();
        assert!(matches!(err, RouterError::WildcardConflict { .. }));

        root.assert_invariants();
        assert_eq!(handler_for(&root, "/users/new"), Some("/users/:id"));
    }

    #[test]
    fn test_radix_malformed_patterns() {
        let mut root: Node<String> = Node::new();
        assert!(matches!(
            root.insert("GET", "/a/:x:y", String::new()),
            Err(RouterError::MultipleWildcards { .. })
        ));
        assert!(matches!(
            root.insert("GET", "/a/*x/b", String::new()),
            Err(RouterError::CatchAllNotLast { .. })
        ));
        assert!(matches!(
            root.insert("GET", "/a/:/b", String::new()),
            Err(RouterError::UnnamedWildcard { .. })
        ));
        assert!(matches!(
            root.insert("GET", "a", String::new()),
            Err(RouterError::InvalidPattern { .. })
        ));
        // Rejected patterns never touch the tree
        assert!(root.segment.is_empty());
        assert!(root.children.is_empty());
        assert_eq!(root.priority(), 0);
    }

    #[test]
    fn test_radix_priority_orders_children() {
        let root = tree(&["/a", "/b", "/b/1", "/b/2", "/c"]);
        assert_eq!(root.priority(), 5);
        // "/" is the shared prefix; "b" has the busiest subtree
        assert_eq!(root.segment, b"/");
        assert_eq!(root.indices[0], b'b');
        assert_eq!(root.children[0].priority(), 3);
    }

    #[test]
    fn test_radix_multibyte_split() {
        let root = tree(&["/caf\u{e9}", "/caf\u{e8}/:id"]);
        assert_eq!(handler_for(&root, "/caf\u{e9}"), Some("/caf\u{e9}"));
        let (_, params) = root.lookup("/caf\u{e8}/\u{fc}ber").expect("match");
        assert_eq!(params.get("id"), Some("\u{fc}ber"));
        assert!(root.lookup("/caf").is_none());
    }

    #[test]
    fn test_radix_walk_reconstructs_patterns() {
        let routes = ["/", "/users", "/users/:id", "/users/:id/posts", "/static/*fp"];
        let root = tree(&routes);

        let mut seen = Vec::new();
        root.walk(|pattern, handler| {
            assert_eq!(pattern, handler);
            seen.push(pattern.to_string());
        });
        seen.sort();
        let mut expected: Vec<String> = routes.iter().map(|r| r.to_string()).collect();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_radix_deep_path_does_not_recurse() {
        let pattern = "/s/:p".repeat(1_000);
        let root = tree(&[pattern.as_str()]);

        let path = "/s/v".repeat(1_000);
        let (_, params) = root.lookup(&path).expect("match");
        assert_eq!(params.len(), 1_000);
        assert!(root.lookup(&"/s/v".repeat(1_001)).is_none());
    }
}
