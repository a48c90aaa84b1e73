//! Tag filters restricting which elements a candidate search considers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tags tried after the caller's priority list, in this order.
pub const DEFAULT_TAGS: [&str; 4] = ["img", "input", "button", "a"];

/// Tags preferred during the wildcard pass.
pub const INTERACTIVE_TAGS: [&str; 2] = ["input", "button"];

/// A constraint on the element category a search considers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TagFilter {
    /// Elements with this (lower-case) tag name.
    Tag(String),
    /// Every element in the document.
    Any,
}

impl TagFilter {
    pub fn tag(name: &str) -> Self {
        Self::from(name)
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, TagFilter::Any)
    }

    /// CSS selector matching the filter.
    pub fn selector(&self) -> &str {
        match self {
            TagFilter::Tag(name) => name,
            TagFilter::Any => "*",
        }
    }

    /// The built-in filters, in priority order.
    pub fn defaults() -> Vec<TagFilter> {
        DEFAULT_TAGS.iter().map(|t| TagFilter::tag(t)).collect()
    }

    /// Priority filters followed by the defaults, keeping the first
    /// occurrence of each.
    pub fn with_defaults(priority: &[TagFilter]) -> Vec<TagFilter> {
        let mut filters: Vec<TagFilter> = Vec::with_capacity(priority.len() + DEFAULT_TAGS.len());
        for filter in priority.iter().cloned().chain(Self::defaults()) {
            if !filters.contains(&filter) {
                filters.push(filter);
            }
        }
        filters
    }
}

impl From<&str> for TagFilter {
    fn from(value: &str) -> Self {
        let name = value.trim();
        if name == "*" {
            TagFilter::Any
        } else {
            TagFilter::Tag(name.to_ascii_lowercase())
        }
    }
}

impl From<String> for TagFilter {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<TagFilter> for String {
    fn from(value: TagFilter) -> Self {
        value.selector().to_string()
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

#[cfg(test)]
#[path = "tag_tests.rs"]
mod tests;
