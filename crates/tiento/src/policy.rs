//! String comparison policies used by text-based criteria.
//!
//! A policy decides whether the text read from a widget matches the text a
//! test asked for. [`StringComparePolicy::Substring`] is the default everywhere
//! a policy is not given explicitly.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Pluggable string-equality strategy.
///
/// `expected` is the text configured on the criteria, `actual` the text read
/// from the candidate.
pub trait ComparePolicy: Send + Sync {
    /// Check whether `actual` satisfies `expected`
    fn compare(&self, expected: &str, actual: &str) -> bool;
}

impl<F> ComparePolicy for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn compare(&self, expected: &str, actual: &str) -> bool {
        self(expected, actual)
    }
}

/// Built-in comparison policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringComparePolicy {
    /// Texts must be equal
    Exact,
    /// Actual text must contain the expected text
    #[default]
    Substring,
    /// Actual text must start with the expected text
    Prefix,
    /// Texts must be equal ignoring case
    ExactIgnoreCase,
    /// Actual text must contain the expected text ignoring case
    SubstringIgnoreCase,
    /// Expected text is a regular expression searched in the actual text
    Regex,
    /// Expected text is a glob where `*` matches any run of characters
    Glob,
}

impl StringComparePolicy {
    /// All built-in policies
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Exact,
            Self::Substring,
            Self::Prefix,
            Self::ExactIgnoreCase,
            Self::SubstringIgnoreCase,
            Self::Regex,
            Self::Glob,
        ]
    }

    /// Short name used in diagnostics and configuration files
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Substring => "substring",
            Self::Prefix => "prefix",
            Self::ExactIgnoreCase => "exact_ignore_case",
            Self::SubstringIgnoreCase => "substring_ignore_case",
            Self::Regex => "regex",
            Self::Glob => "glob",
        }
    }

    /// Glob match where `*` spans any (possibly empty) run of characters
    fn glob_matches(pattern: &str, text: &str) -> bool {
        let parts: Vec<&str> = pattern.split('*').collect();
        if parts.len() == 1 {
            return pattern == text;
        }

        let first = parts[0];
        let last = parts[parts.len() - 1];
        if text.len() < first.len() + last.len()
            || !text.starts_with(first)
            || !text.ends_with(last)
        {
            return false;
        }

        let mut pos = first.len();
        let end = text.len() - last.len();
        for part in &parts[1..parts.len() - 1] {
            if part.is_empty() {
                continue;
            }
            match text[pos..end].find(part) {
                Some(found) => pos += found + part.len(),
                None => return false,
            }
        }

        true
    }
}

impl ComparePolicy for StringComparePolicy {
    fn compare(&self, expected: &str, actual: &str) -> bool {
        match self {
            Self::Exact => actual == expected,
            Self::Substring => actual.contains(expected),
            Self::Prefix => actual.starts_with(expected),
            Self::ExactIgnoreCase => actual.to_lowercase() == expected.to_lowercase(),
            Self::SubstringIgnoreCase => actual.to_lowercase().contains(&expected.to_lowercase()),
            // An invalid pattern never matches.
            Self::Regex => Regex::new(expected)
                .map(|re| re.is_match(actual))
                .unwrap_or(false),
            Self::Glob => Self::glob_matches(expected, actual),
        }
    }
}

impl StringComparePolicy {
    /// Specialize the policy for a fixed expected text.
    ///
    /// `Regex` compiles `expected` here so repeated comparisons reuse it;
    /// every other policy is returned as is.
    pub(crate) fn bind(self, expected: &str) -> Arc<dyn ComparePolicy> {
        match self {
            Self::Regex => Arc::new(CompiledRegex::new(expected)),
            other => Arc::new(other),
        }
    }
}

/// Regex policy with its pattern compiled once.
///
/// Ignores the `expected` argument of `compare`; an invalid pattern never
/// matches.
#[derive(Debug, Clone)]
pub(crate) struct CompiledRegex {
    regex: Option<Regex>,
}

impl CompiledRegex {
    pub(crate) fn new(pattern: &str) -> Self {
        Self {
            regex: Regex::new(pattern).ok(),
        }
    }
}

impl ComparePolicy for CompiledRegex {
    fn compare(&self, _expected: &str, actual: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(actual))
    }
}

impl fmt::Display for StringComparePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
