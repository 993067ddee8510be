//! Path matching for theme exclusion.
//!
//! # Responsibilities
//! - Match path prefixes on segment boundaries (case-sensitive)
//! - Combine conditions with OR semantics
//!
//! # Design Decisions
//! - `/admin` matches `/admin` and `/admin/...` but not `/administrator`
//! - Query strings and fragments are ignored
//! - Repeated or missing leading `/` is treated as a single `/`
//! - No regex to guarantee O(n) matching

/// Trait for matching a request path against a condition.
pub trait PathMatcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches a path prefix on a segment boundary.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher. A trailing `/` is ignored.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim_end_matches('/');
        Self {
            prefix: trimmed.to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl PathMatcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        let path = strip_query(path).trim_start_matches('/');
        let prefix = self.prefix.trim_start_matches('/');
        // An empty prefix came from "/" and covers everything.
        if prefix.is_empty() {
            return true;
        }
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Combines matchers with OR semantics. Empty list matches nothing.
#[derive(Debug, Default)]
pub struct ExclusionList {
    matchers: Vec<Box<dyn PathMatcher>>,
}

impl ExclusionList {
    pub fn new(matchers: Vec<Box<dyn PathMatcher>>) -> Self {
        Self { matchers }
    }

    pub fn from_prefixes<I, P>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self::new(
            prefixes
                .into_iter()
                .map(|p| Box::new(PathPrefixMatcher::new(p)) as Box<dyn PathMatcher>)
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl PathMatcher for ExclusionList {
    fn matches(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_prefix_matcher() {
        let matcher = PathPrefixMatcher::new("/admin");

        assert!(matcher.matches("/admin"));
        assert!(matcher.matches("/admin/dashboard"));
        assert!(matcher.matches("/admin?tab=clients"));
        assert!(!matcher.matches("/administrator"));
        assert!(!matcher.matches("/"));
        assert!(!matcher.matches("/Admin")); // Case sensitive
    }

    #[test]
    fn test_leading_separators_are_collapsed() {
        let matcher = PathPrefixMatcher::new("/admin");

        assert!(matcher.matches("admin/dashboard"));
        assert!(matcher.matches("//admin/dashboard"));
        assert!(matcher.matches("admin"));
        assert!(!matcher.matches("//administrator"));
    }

    #[test]
    fn test_trailing_slash_prefix_is_normalized() {
        let matcher = PathPrefixMatcher::new("/client/");
        assert_eq!(matcher.prefix(), "/client");
        assert!(matcher.matches("/client/selection/7"));
    }

    #[test]
    fn test_exclusion_list_or_semantics() {
        let list = ExclusionList::from_prefixes(["/admin", "/system", "/terms"]);

        assert!(list.matches("/system/tenants"));
        assert!(list.matches("/terms"));
        assert!(!list.matches("/portfolio"));
        assert!(!ExclusionList::default().matches("/admin"));
    }
}
