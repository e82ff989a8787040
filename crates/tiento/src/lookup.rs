//! Criteria-based lookup of controls among their siblings.
//!
//! A [`LookupCriteria`] is a pure predicate over a candidate. Text-based
//! criteria ([`ByStringLookup`]) read a display string from the candidate and
//! hand it to a [`ComparePolicy`]; the policy alone decides equality.
//!
//! # Example
//!
//! ```
//! use tiento::{ByStringLookup, LookupCriteria, Parent, StringComparePolicy};
//!
//! let items = vec!["Open".to_string(), "Open Recent".to_string(), "Close".to_string()];
//!
//! // Substring is the default policy
//! let open = ByStringLookup::<String>::by_text("Open");
//! assert_eq!(items.lookup(&open).size(), 2);
//!
//! let exact = ByStringLookup::<String>::by_text_with_policy("Open", StringComparePolicy::Exact);
//! assert!(exact.check(&"Open".to_string()));
//! assert_eq!(items.lookup(&exact).only().unwrap(), "Open");
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::config::TientoConfig;
use crate::policy::{ComparePolicy, StringComparePolicy};
use crate::result::{TientoError, TientoResult};
use crate::wait::{wait_until, WaitOptions, WaitResult};

// =============================================================================
// CRITERIA
// =============================================================================

/// Predicate used to pick a candidate among siblings.
///
/// `check` must be deterministic and must not mutate the candidate. The
/// `Display` form describes the criteria in failure messages.
pub trait LookupCriteria<T: ?Sized>: fmt::Display + Send + Sync {
    /// Check whether the candidate matches
    fn check(&self, candidate: &T) -> bool;
}

impl<T: ?Sized, C: LookupCriteria<T> + ?Sized> LookupCriteria<T> for &C {
    fn check(&self, candidate: &T) -> bool {
        (**self).check(candidate)
    }
}

impl<T: ?Sized, C: LookupCriteria<T> + ?Sized> LookupCriteria<T> for Box<C> {
    fn check(&self, candidate: &T) -> bool {
        (**self).check(candidate)
    }
}

impl<T: ?Sized, C: LookupCriteria<T> + ?Sized> LookupCriteria<T> for Arc<C> {
    fn check(&self, candidate: &T) -> bool {
        (**self).check(candidate)
    }
}

/// Candidates that can report their own display text.
///
/// `None` means the text is not available right now; text criteria treat it
/// as "no match".
pub trait HasText {
    /// Current display text
    fn text(&self) -> Option<String>;
}

impl HasText for String {
    fn text(&self) -> Option<String> {
        Some(self.clone())
    }
}

type TextFn<T> = dyn Fn(&T) -> Option<String> + Send + Sync;

/// Criteria comparing a candidate's text against a configured value.
///
/// The comparison policy defaults to [`StringComparePolicy::Substring`].
pub struct ByStringLookup<T: ?Sized> {
    text: String,
    policy: Arc<dyn ComparePolicy>,
    policy_name: String,
    get_text: Arc<TextFn<T>>,
}

impl<T: ?Sized> ByStringLookup<T> {
    /// Create a substring lookup using `get_text` to read the candidate text
    pub fn new<F>(text: impl Into<String>, get_text: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        Self::with_policy(text, StringComparePolicy::Substring, get_text)
    }

    /// Create a lookup with a built-in comparison policy
    pub fn with_policy<F>(text: impl Into<String>, policy: StringComparePolicy, get_text: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        let text = text.into();
        Self {
            policy: policy.bind(&text),
            text,
            policy_name: policy.to_string(),
            get_text: Arc::new(get_text),
        }
    }

    /// Create a lookup with a caller-supplied comparison policy
    pub fn with_custom_policy<P, F>(
        text: impl Into<String>,
        name: impl Into<String>,
        policy: P,
        get_text: F,
    ) -> Self
    where
        P: ComparePolicy + 'static,
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            text: text.into(),
            policy: Arc::new(policy),
            policy_name: name.into(),
            get_text: Arc::new(get_text),
        }
    }

    /// Configured text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Name of the comparison policy
    #[must_use]
    pub fn policy_name(&self) -> &str {
        &self.policy_name
    }

    /// Read the candidate's text the same way `check` does
    pub fn text_of(&self, candidate: &T) -> Option<String> {
        (self.get_text)(candidate)
    }
}

impl<T: HasText + ?Sized + 'static> ByStringLookup<T> {
    /// Substring lookup over [`HasText`] candidates
    #[must_use]
    pub fn by_text(text: impl Into<String>) -> Self {
        Self::new(text, |candidate: &T| candidate.text())
    }

    /// Lookup over [`HasText`] candidates with an explicit policy
    #[must_use]
    pub fn by_text_with_policy(text: impl Into<String>, policy: StringComparePolicy) -> Self {
        Self::with_policy(text, policy, |candidate: &T| candidate.text())
    }
}

impl<T: fmt::Display + ?Sized + 'static> ByStringLookup<T> {
    /// Lookup matching against the candidate's `Display` output
    #[must_use]
    pub fn by_to_string(text: impl Into<String>, policy: StringComparePolicy) -> Self {
        Self::with_policy(text, policy, |candidate: &T| Some(candidate.to_string()))
    }
}

impl<T: ?Sized> LookupCriteria<T> for ByStringLookup<T> {
    fn check(&self, candidate: &T) -> bool {
        match (self.get_text)(candidate) {
            Some(actual) => self.policy.compare(&self.text, &actual),
            None => false,
        }
    }
}

impl<T: ?Sized> Clone for ByStringLookup<T> {
    fn clone(&self) -> Self {
        Self {
            text: self.text.clone(),
            policy: Arc::clone(&self.policy),
            policy_name: self.policy_name.clone(),
            get_text: Arc::clone(&self.get_text),
        }
    }
}

impl<T: ?Sized> fmt::Debug for ByStringLookup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByStringLookup")
            .field("text", &self.text)
            .field("policy", &self.policy_name)
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized> fmt::Display for ByStringLookup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Text = {}", self.text)
    }
}

/// A closure-based criteria with a description
pub struct FnCriteria<F> {
    func: F,
    description: String,
}

impl<F> FnCriteria<F> {
    /// Create a new closure criteria
    pub fn new(func: F, description: impl Into<String>) -> Self {
        Self {
            func,
            description: description.into(),
        }
    }
}

impl<F> fmt::Debug for FnCriteria<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCriteria")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<F> fmt::Display for FnCriteria<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl<T: ?Sized, F: Fn(&T) -> bool + Send + Sync> LookupCriteria<T> for FnCriteria<F> {
    fn check(&self, candidate: &T) -> bool {
        (self.func)(candidate)
    }
}

/// Matches every candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Any;

impl fmt::Display for Any {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Any")
    }
}

impl<T: ?Sized> LookupCriteria<T> for Any {
    fn check(&self, _candidate: &T) -> bool {
        true
    }
}

/// Both criteria must match
#[derive(Debug, Clone)]
pub struct And<A, B>(pub A, pub B);

/// Either criteria must match
#[derive(Debug, Clone)]
pub struct Or<A, B>(pub A, pub B);

/// The inner criteria must not match
#[derive(Debug, Clone)]
pub struct Not<A>(pub A);

impl<A: fmt::Display, B: fmt::Display> fmt::Display for And<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) and ({})", self.0, self.1)
    }
}

impl<A: fmt::Display, B: fmt::Display> fmt::Display for Or<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) or ({})", self.0, self.1)
    }
}

impl<A: fmt::Display> fmt::Display for Not<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not ({})", self.0)
    }
}

impl<T: ?Sized, A: LookupCriteria<T>, B: LookupCriteria<T>> LookupCriteria<T> for And<A, B> {
    fn check(&self, candidate: &T) -> bool {
        self.0.check(candidate) && self.1.check(candidate)
    }
}

impl<T: ?Sized, A: LookupCriteria<T>, B: LookupCriteria<T>> LookupCriteria<T> for Or<A, B> {
    fn check(&self, candidate: &T) -> bool {
        self.0.check(candidate) || self.1.check(candidate)
    }
}

impl<T: ?Sized, A: LookupCriteria<T>> LookupCriteria<T> for Not<A> {
    fn check(&self, candidate: &T) -> bool {
        !self.0.check(candidate)
    }
}

/// Combinator methods available on every criteria
pub trait CriteriaExt<T: ?Sized>: LookupCriteria<T> + Sized {
    /// Match when both `self` and `other` match
    fn and<B: LookupCriteria<T>>(self, other: B) -> And<Self, B> {
        And(self, other)
    }

    /// Match when `self` or `other` matches
    fn or<B: LookupCriteria<T>>(self, other: B) -> Or<Self, B> {
        Or(self, other)
    }

    /// Match when `self` does not
    fn not(self) -> Not<Self> {
        Not(self)
    }
}

impl<T: ?Sized, C: LookupCriteria<T>> CriteriaExt<T> for C {}

/// Pick the candidate `criteria` resolves to at `level` (1-based).
///
/// Non-strict resolution takes the first match in sibling order.
pub(crate) fn resolve<T, C>(
    candidates: Vec<T>,
    criteria: &C,
    level: usize,
    strict: bool,
) -> TientoResult<T>
where
    C: LookupCriteria<T> + ?Sized,
{
    let mut matches = candidates.into_iter().filter(|c| criteria.check(c));
    let Some(first) = matches.next() else {
        return Err(TientoError::Lookup {
            level,
            criteria: criteria.to_string(),
        });
    };
    if strict {
        let extra = matches.count();
        if extra > 0 {
            return Err(TientoError::AmbiguousMatch {
                level,
                criteria: criteria.to_string(),
                count: extra + 1,
            });
        }
    }
    Ok(first)
}

// =============================================================================
// PARENT / LOOKUP
// =============================================================================

/// Capability of a container that can enumerate its child controls.
///
/// Children are re-read on every call.
pub trait Parent<T> {
    /// Current children in sibling order
    fn children(&self) -> Vec<T>;

    /// Start a lookup of children matching `criteria`
    fn lookup<C: LookupCriteria<T>>(&self, criteria: C) -> Lookup<'_, T, Self, C>
    where
        Self: Sized,
    {
        Lookup::new(self, criteria)
    }
}

impl<T: Clone> Parent<T> for [T] {
    fn children(&self) -> Vec<T> {
        self.to_vec()
    }
}

impl<T: Clone> Parent<T> for Vec<T> {
    fn children(&self) -> Vec<T> {
        self.clone()
    }
}

/// Children of a [`Parent`] filtered by a criteria.
///
/// Holds no results; every query re-enumerates the parent.
pub struct Lookup<'a, T, P: ?Sized, C> {
    parent: &'a P,
    criteria: C,
    _candidate: PhantomData<fn() -> T>,
}

impl<T, P: ?Sized, C: fmt::Display> fmt::Debug for Lookup<'_, T, P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lookup")
            .field("criteria", &self.criteria.to_string())
            .finish_non_exhaustive()
    }
}

impl<'a, T, P, C> Lookup<'a, T, P, C>
where
    P: Parent<T> + ?Sized,
    C: LookupCriteria<T>,
{
    /// Create a lookup over `parent`
    pub fn new(parent: &'a P, criteria: C) -> Self {
        Self {
            parent,
            criteria,
            _candidate: PhantomData,
        }
    }

    /// The criteria in use
    pub const fn criteria(&self) -> &C {
        &self.criteria
    }

    /// All current matches in sibling order
    pub fn matches(&self) -> Vec<T> {
        self.parent
            .children()
            .into_iter()
            .filter(|c| self.criteria.check(c))
            .collect()
    }

    /// Number of current matches
    pub fn size(&self) -> usize {
        self.matches().len()
    }

    /// The match at `index`
    pub fn get(&self, index: usize) -> TientoResult<T> {
        let mut matches = self.matches();
        let size = matches.len();
        if index >= size {
            return Err(TientoError::IndexOutOfBounds { index, size });
        }
        Ok(matches.swap_remove(index))
    }

    /// The first match
    pub fn first(&self) -> TientoResult<T> {
        resolve(self.parent.children(), &self.criteria, 1, false)
    }

    /// The only match; more than one is an error
    pub fn only(&self) -> TientoResult<T> {
        resolve(self.parent.children(), &self.criteria, 1, true)
    }

    /// Poll until at least `count` children match
    pub fn wait(&self, count: usize, options: &WaitOptions) -> TientoResult<WaitResult> {
        let description = format!("{count} entries matching {}", self.criteria);
        wait_until(|| self.size() >= count, description, options)
    }

    /// [`Lookup::wait`] bounded by the session's `wait` settings
    pub fn wait_with_config(&self, count: usize, config: &TientoConfig) -> TientoResult<WaitResult> {
        self.wait(count, &config.wait)
    }
}
