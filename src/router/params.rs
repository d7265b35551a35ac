use smallvec::SmallVec;

/// Maximum number of path parameters before heap allocation.
/// Most REST APIs have ≤4 path params (e.g., /users/:id/posts/:post_id).
pub const MAX_INLINE_PARAMS: usize = 8;

/// A single captured path parameter.
///
/// `key` borrows from the routing tree, `value` borrows from the request path,
/// so collecting parameters never copies strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param<'k, 'v> {
    /// Wildcard name without its `:`/`*` marker
    pub key: &'k str,
    /// The captured slice of the request path
    pub value: &'v str,
}

/// Ordered list of captured path parameters.
///
/// Order is left-to-right order of appearance in the path. Duplicate names
/// are kept as-is; [`Params::get`] returns the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params<'k, 'v> {
    inner: SmallVec<[Param<'k, 'v>; MAX_INLINE_PARAMS]>,
}

impl<'k, 'v> Params<'k, 'v> {
    /// Create an empty parameter list (no allocation)
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: SmallVec::new(),
        }
    }

    pub(crate) fn push(&mut self, key: &'k str, value: &'v str) {
        self.inner.push(Param { key, value });
    }

    /// Get a parameter value by name
    ///
    /// Uses "first match wins" semantics: for `/org/:id/user/:id` matched
    /// against `/org/1/user/2`, `get("id")` returns `"1"`.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'v str> {
        self.inner
            .iter()
            .find(|p| p.key == name)
            .map(|p| p.value)
    }

    /// Iterate over parameters in path order
    pub fn iter(&self) -> std::slice::Iter<'_, Param<'k, 'v>> {
        self.inner.iter()
    }

    /// Number of captured parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True if the matched route captured nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Copy the parameters into owned pairs
    /// Note: This allocates - use get() in hot paths instead
    #[must_use]
    pub fn to_owned_pairs(&self) -> Vec<(String, String)> {
        self.inner
            .iter()
            .map(|p| (p.key.to_string(), p.value.to_string()))
            .collect()
    }
}

impl<'a, 'k, 'v> IntoIterator for &'a Params<'k, 'v> {
    type Item = &'a Param<'k, 'v>;
    type IntoIter = std::slice::Iter<'a, Param<'k, 'v>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
