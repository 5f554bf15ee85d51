//! Regular-expression name filters.
//!
//! A [`NameFilter`] narrows lists of target names. An absent or empty
//! pattern matches everything. Matching is unanchored: `Kit` matches
//! `UIKitExtras`; use `^Kit$` for an exact name.

use regex::Regex;

/// Errors produced while building a filter.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// The pattern is not a valid regular expression.
    #[error("Invalid filter pattern '{pattern}': {source}")]
    InvalidFilterPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type alias for filter construction.
pub type FilterResult<T> = Result<T, FilterError>;

/// A compiled name predicate.
///
/// The pattern is compiled eagerly so that a malformed expression fails
/// where it is supplied instead of silently matching nothing.
///
/// # Example
///
/// ```
/// use targetscope::filter::NameFilter;
///
/// let filter = NameFilter::new("^Core").unwrap();
/// assert!(filter.matches("CoreData"));
/// assert!(!filter.matches("App"));
///
/// assert!(NameFilter::new("(").is_err());
/// assert!(NameFilter::default().matches("anything"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    regex: Option<Regex>,
}

impl NameFilter {
    /// Compiles `pattern`. An empty pattern matches everything.
    pub fn new(pattern: &str) -> FilterResult<Self> {
        if pattern.is_empty() {
            return Ok(Self::match_all());
        }

        let regex = Regex::new(pattern).map_err(|source| FilterError::InvalidFilterPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex: Some(regex) })
    }

    /// Compiles an optional pattern; `None` matches everything.
    pub fn from_option(pattern: Option<&str>) -> FilterResult<Self> {
        match pattern {
            Some(pattern) => Self::new(pattern),
            None => Ok(Self::match_all()),
        }
    }

    /// A filter that accepts every name.
    pub fn match_all() -> Self {
        Self { regex: None }
    }

    /// Returns the source pattern, if any.
    pub fn pattern(&self) -> Option<&str> {
        self.regex.as_ref().map(Regex::as_str)
    }

    /// Returns true if the filter accepts every name.
    pub fn is_match_all(&self) -> bool {
        self.regex.is_none()
    }

    /// Returns true if `name` passes the filter.
    pub fn matches(&self, name: &str) -> bool {
        self.regex.as_ref().map_or(true, |re| re.is_match(name))
    }

    /// Keeps the names that pass the filter, preserving order.
    pub fn apply<S: AsRef<str>>(&self, names: Vec<S>) -> Vec<S> {
        if self.is_match_all() {
            return names;
        }
        names
            .into_iter()
            .filter(|name| self.matches(name.as_ref()))
            .collect()
    }

    /// Returns true if both endpoints of an edge pass the filter.
    pub fn matches_edge(&self, from: &str, to: &str) -> bool {
        self.matches(from) && self.matches(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pattern_matches_everything() {
        let filter = NameFilter::new("").unwrap();
        assert!(filter.is_match_all());
        assert!(filter.matches(""));
        assert!(filter.matches("App"));
    }

    #[test]
    fn test_from_option_none() {
        let filter = NameFilter::from_option(None).unwrap();
        assert!(filter.is_match_all());
        assert_eq!(filter.pattern(), None);
    }

    #[test]
    fn test_dot_star_is_noop() {
        let filter = NameFilter::new(".*").unwrap();
        let names = vec!["App", "Core", "libz.a", "UIKit"];
        assert_eq!(filter.apply(names.clone()), names);
    }

    #[test]
    fn test_unanchored_match() {
        let filter = NameFilter::new("Kit").unwrap();
        assert!(filter.matches("UIKit"));
        assert!(filter.matches("KitCore"));
        assert!(!filter.matches("Core"));
    }

    #[test]
    fn test_apply_preserves_order() {
        let filter = NameFilter::new("^lib").unwrap();
        let names = vec![
            "libz.a".to_string(),
            "App".to_string(),
            "libsqlite3.a".to_string(),
        ];
        assert_eq!(filter.apply(names), vec!["libz.a", "libsqlite3.a"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = NameFilter::new("[unclosed").unwrap_err();
        let FilterError::InvalidFilterPattern { pattern, .. } = &err;
        assert_eq!(pattern, "[unclosed");
        assert!(err.to_string().contains("[unclosed"));
    }

    #[test]
    fn test_matches_edge_requires_both_endpoints() {
        let filter = NameFilter::new("^App|^Core").unwrap();
        assert!(filter.matches_edge("App", "Core"));
        assert!(!filter.matches_edge("App", "Utils"));
        assert!(!filter.matches_edge("Utils", "Core"));
    }
}
