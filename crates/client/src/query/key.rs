//! Structured cache keys for logical queries.

/// Identity of a logical query: an entity scope plus filter/sort/page-size
/// parameters.
///
/// Parameters are kept sorted by name, so two keys built from structurally
/// equal parameter sets compare equal regardless of insertion order. Empty
/// values are skipped, matching how blank filter inputs are treated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    scope: &'static str,
    params: Vec<(String, String)>,
}

impl QueryKey {
    /// Start a key for an entity scope (e.g. `"products"`).
    #[must_use]
    pub const fn new(scope: &'static str) -> Self {
        Self {
            scope,
            params: Vec::new(),
        }
    }

    /// Add a parameter, keeping the set sorted. Blank values are ignored.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        if value.is_empty() {
            return self;
        }
        let entry = (name.to_string(), value);
        let position = self
            .params
            .partition_point(|(existing, _)| existing.as_str() <= name);
        self.params.insert(position, entry);
        self
    }

    /// The entity scope this key belongs to.
    #[must_use]
    pub const fn scope(&self) -> &'static str {
        self.scope
    }

    /// Textual form, used for prefix invalidation and logging.
    #[must_use]
    pub fn as_string(&self) -> String {
        let mut out = String::from(self.scope);
        for (name, value) in &self.params {
            out.push_str(&format!(";{name}={value}"));
        }
        out
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_params_equal_keys() {
        let a = QueryKey::new("products").with("category", 3).with("q", "chair");
        let b = QueryKey::new("products").with("q", "chair").with("category", 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_differing_param_differs() {
        let a = QueryKey::new("products").with("q", "chair");
        let b = QueryKey::new("products").with("q", "table");
        assert_ne!(a, b);
    }

    #[test]
    fn test_blank_value_ignored() {
        let a = QueryKey::new("products").with("q", "");
        let b = QueryKey::new("products");
        assert_eq!(a, b);
    }

    #[test]
    fn test_scope_prefix_in_string_form() {
        let key = QueryKey::new("orders").with("status", "new");
        assert!(key.as_string().starts_with("orders"));
        assert_eq!(key.as_string(), "orders;status=new");
    }
}
