//! Canonical cache keys.
//!
//! A key is the tuple of resource name plus filter/identifier parameters
//! identifying one cached query result. Filter parameters are sorted by
//! name before they become segments, so two filter objects with the same
//! contents always produce the same key regardless of construction order.

use serde::{Deserialize, Serialize};

/// Canonical, order-independent cache key.
///
/// Keys form a hierarchy through their segments; list invalidation works by
/// prefix match (`["users", "list"]` is a prefix of every filtered users
/// list key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    /// Root key for a resource type.
    pub fn root(resource: &str) -> Self {
        Self(vec![resource.to_string()])
    }

    /// Prefix covering every list entry of a resource.
    pub fn lists(resource: &str) -> Self {
        Self::root(resource).child("list")
    }

    /// Key for one filtered list read.
    pub fn list(resource: &str, params: &[(&str, String)]) -> Self {
        Self::lists(resource).with_params(params)
    }

    /// Prefix covering every detail entry of a resource.
    pub fn details(resource: &str) -> Self {
        Self::root(resource).child("detail")
    }

    /// Key for one detail read, by natural identifier.
    pub fn detail(resource: &str, id: &str) -> Self {
        Self::details(resource).child(id)
    }

    /// Key for a singleton document (e.g. the pricing config).
    pub fn singleton(resource: &str) -> Self {
        Self::root(resource)
    }

    /// Append one literal segment.
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        Self(segments)
    }

    /// Append filter parameters as `name=value` segments, sorted by name
    /// (then value) for order independence. Absent parameters are simply
    /// not passed in, mirroring the query string the transport sends.
    pub fn with_params(&self, params: &[(&str, String)]) -> Self {
        let mut sorted: Vec<&(&str, String)> = params.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0).then_with(|| a.1.cmp(&b.1)));
        let mut segments = self.0.clone();
        for (name, value) in sorted {
            segments.push(format!("{name}={value}"));
        }
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// True when `other` lives under this key in the hierarchy (inclusive).
    pub fn is_prefix_of(&self, other: &QueryKey) -> bool {
        other.0.len() >= self.0.len() && other.0[..self.0.len()] == self.0[..]
    }
}

impl core::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_order_does_not_matter() {
        let a = QueryKey::list("users", &[("page", "1".into()), ("role", "admin".into())]);
        let b = QueryKey::list("users", &[("role", "admin".into()), ("page", "1".into())]);
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_filters_yield_distinct_keys() {
        let a = QueryKey::list("users", &[("page", "1".into())]);
        let b = QueryKey::list("users", &[("page", "2".into())]);
        assert_ne!(a, b);
    }

    #[test]
    fn lists_prefix_matches_every_filtered_list() {
        let prefix = QueryKey::lists("orders");
        let filtered = QueryKey::list("orders", &[("status", "pending".into())]);
        assert!(prefix.is_prefix_of(&filtered));
        assert!(prefix.is_prefix_of(&prefix));
        assert!(!prefix.is_prefix_of(&QueryKey::detail("orders", "o1")));
    }

    #[test]
    fn detail_key_is_scoped_to_id() {
        let a = QueryKey::detail("products", "laptop-15");
        let b = QueryKey::detail("products", "laptop-17");
        assert_ne!(a, b);
        assert!(QueryKey::details("products").is_prefix_of(&a));
    }

    #[test]
    fn drilldown_keys_nest_under_detail() {
        let deposits = QueryKey::detail("users", "u1")
            .child("deposits")
            .with_params(&[("limit", "20".into()), ("offset", "0".into())]);
        assert!(QueryKey::detail("users", "u1").is_prefix_of(&deposits));
        assert!(!QueryKey::detail("users", "u2").is_prefix_of(&deposits));
    }

    #[test]
    fn display_joins_segments() {
        let key = QueryKey::list("deposits", &[("status", "pending".into())]);
        assert_eq!(key.to_string(), "deposits/list/status=pending");
    }
}
