//! Multi-level menu path traversal.
//!
//! A [`MenuPath`] holds one token per menu level: top-level menu first, leaf
//! item last. [`MenuPathSelector`] walks it against a live [`MenuHierarchy`],
//! expanding every intermediate level, and only inspects or toggles the
//! selection state of the terminal item.
//!
//! Traversal is not transactional: when a level fails to resolve, the levels
//! already expanded stay expanded.

use std::fmt;
use std::sync::Arc;

use crate::config::TientoConfig;
use crate::lookup::{resolve, ByStringLookup, HasText, LookupCriteria};
use crate::policy::StringComparePolicy;
use crate::result::{TientoError, TientoResult};

const MENU_PATH_LENGTH_ERROR: &str = "Menu path length should be greater than 0";

/// Capability of a selection-capable menu hierarchy.
pub trait MenuHierarchy {
    /// Handle to a menu entry
    type Item;

    /// Entries at the level below `parent`, or the top level for `None`
    fn entries(&self, parent: Option<&Self::Item>) -> TientoResult<Vec<Self::Item>>;

    /// Open the submenu of an entry
    fn expand(&mut self, item: &Self::Item) -> TientoResult<()>;

    /// Current selection state of an entry
    fn is_selected(&self, item: &Self::Item) -> TientoResult<bool>;

    /// Flip the selection state of an entry
    fn toggle(&mut self, item: &Self::Item) -> TientoResult<()>;
}

impl<M: MenuHierarchy + ?Sized> MenuHierarchy for &mut M {
    type Item = M::Item;

    fn entries(&self, parent: Option<&Self::Item>) -> TientoResult<Vec<Self::Item>> {
        (**self).entries(parent)
    }

    fn expand(&mut self, item: &Self::Item) -> TientoResult<()> {
        (**self).expand(item)
    }

    fn is_selected(&self, item: &Self::Item) -> TientoResult<bool> {
        (**self).is_selected(item)
    }

    fn toggle(&mut self, item: &Self::Item) -> TientoResult<()> {
        (**self).toggle(item)
    }
}

// =============================================================================
// PATH TOKENS
// =============================================================================

/// One level of a menu path: literal text or an explicit criteria
pub enum PathToken<T: ?Sized> {
    /// Text matched with the selector's default policy
    Text(String),
    /// Explicit criteria
    Criteria(Arc<dyn LookupCriteria<T>>),
}

impl<T: ?Sized> PathToken<T> {
    /// Wrap an explicit criteria
    pub fn criteria<C: LookupCriteria<T> + 'static>(criteria: C) -> Self {
        Self::Criteria(Arc::new(criteria))
    }
}

impl<T: HasText + ?Sized + 'static> PathToken<T> {
    /// Normalize to a criteria; text is compared with `policy`
    #[must_use]
    pub fn to_criteria(&self, policy: StringComparePolicy) -> Arc<dyn LookupCriteria<T>> {
        match self {
            Self::Text(text) => Arc::new(ByStringLookup::by_text_with_policy(text.clone(), policy)),
            Self::Criteria(criteria) => Arc::clone(criteria),
        }
    }
}

impl<T: ?Sized> Clone for PathToken<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Text(text) => Self::Text(text.clone()),
            Self::Criteria(criteria) => Self::Criteria(Arc::clone(criteria)),
        }
    }
}

impl<T: ?Sized> fmt::Debug for PathToken<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Criteria(criteria) => f
                .debug_tuple("Criteria")
                .field(&criteria.to_string())
                .finish(),
        }
    }
}

impl<T: ?Sized> fmt::Display for PathToken<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Criteria(criteria) => write!(f, "[{criteria}]"),
        }
    }
}

impl<T: ?Sized> From<&str> for PathToken<T> {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl<T: ?Sized> From<String> for PathToken<T> {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<T: ?Sized> From<&String> for PathToken<T> {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl<T: ?Sized> From<Arc<dyn LookupCriteria<T>>> for PathToken<T> {
    fn from(criteria: Arc<dyn LookupCriteria<T>>) -> Self {
        Self::Criteria(criteria)
    }
}

impl<T: ?Sized> From<&PathToken<T>> for PathToken<T> {
    fn from(token: &PathToken<T>) -> Self {
        token.clone()
    }
}

// =============================================================================
// MENU PATH
// =============================================================================

/// Non-empty ordered sequence of per-level tokens
pub struct MenuPath<T: ?Sized> {
    tokens: Vec<PathToken<T>>,
}

impl<T: ?Sized> MenuPath<T> {
    /// Build a path; an empty token list is rejected
    pub fn new<I, P>(tokens: I) -> TientoResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathToken<T>>,
    {
        let tokens: Vec<PathToken<T>> = tokens.into_iter().map(Into::into).collect();
        if tokens.is_empty() {
            return Err(TientoError::invalid_argument(MENU_PATH_LENGTH_ERROR));
        }
        Ok(Self { tokens })
    }

    /// Number of levels
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in level order
    #[must_use]
    pub fn tokens(&self) -> &[PathToken<T>] {
        &self.tokens
    }

    /// Terminal token
    #[must_use]
    pub fn terminal(&self) -> &PathToken<T> {
        &self.tokens[self.tokens.len() - 1]
    }
}

impl<T: ?Sized> Clone for MenuPath<T> {
    fn clone(&self) -> Self {
        Self {
            tokens: self.tokens.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for MenuPath<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.tokens).finish()
    }
}

impl<T: ?Sized> fmt::Display for MenuPath<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

impl<'a, T: ?Sized> IntoIterator for &'a MenuPath<T> {
    type Item = &'a PathToken<T>;
    type IntoIter = std::slice::Iter<'a, PathToken<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl<T: ?Sized> IntoIterator for MenuPath<T> {
    type Item = PathToken<T>;
    type IntoIter = std::vec::IntoIter<PathToken<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

// =============================================================================
// SELECTOR
// =============================================================================

/// Drives menu paths against a [`MenuHierarchy`].
///
/// # Example
///
/// ```
/// use tiento::mock::MockMenu;
/// use tiento::MenuPathSelector;
///
/// let menu = MockMenu::builder()
///     .submenu("File", |file| file.submenu("Export", |export| export.item("CSV")))
///     .build();
/// let mut selector = MenuPathSelector::new(menu);
///
/// selector.push(true, ["File", "Export", "CSV"]).unwrap();
/// assert!(selector.get_state(["File", "Export", "CSV"]).unwrap());
/// assert_eq!(selector.menu().toggle_count("CSV"), 1);
/// ```
#[derive(Debug)]
pub struct MenuPathSelector<M> {
    menu: M,
    policy: StringComparePolicy,
    strict: bool,
}

impl<M> MenuPathSelector<M> {
    /// Create a selector with substring matching and first-match resolution
    pub fn new(menu: M) -> Self {
        Self {
            menu,
            policy: StringComparePolicy::Substring,
            strict: false,
        }
    }

    /// Policy used for literal text tokens
    #[must_use]
    pub fn with_policy(mut self, policy: StringComparePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fail on levels where more than one entry matches
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Take policy and strictness from a configuration
    #[must_use]
    pub fn with_config(mut self, config: &TientoConfig) -> Self {
        self.policy = config.policy;
        self.strict = config.strict;
        self
    }

    /// Policy used for literal text tokens
    pub const fn policy(&self) -> StringComparePolicy {
        self.policy
    }

    /// Whether strict matching is on
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// The underlying menu
    pub const fn menu(&self) -> &M {
        &self.menu
    }

    /// The underlying menu, mutably
    pub fn menu_mut(&mut self) -> &mut M {
        &mut self.menu
    }

    /// Give back the underlying menu
    pub fn into_inner(self) -> M {
        self.menu
    }
}

impl<M> MenuPathSelector<M>
where
    M: MenuHierarchy,
    M::Item: HasText + 'static,
{
    /// Ensure the terminal item of `path` ends in `desired` selection state.
    ///
    /// Intermediate levels are expanded. The terminal item is toggled only if
    /// its current state differs from `desired`, so repeated calls are
    /// idempotent.
    ///
    /// # Errors
    ///
    /// [`TientoError::InvalidArgument`] for an empty path (the menu is not
    /// touched), [`TientoError::Lookup`] when a level has no matching entry.
    pub fn push<I, P>(&mut self, desired: bool, path: I) -> TientoResult<()>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathToken<M::Item>>,
    {
        let path = MenuPath::new(path)?;
        let item = self.navigate(&path)?;
        let current = self.menu.is_selected(&item)?;
        if current == desired {
            tracing::debug!(path = %path, state = current, "menu item already in desired state");
            return Ok(());
        }
        tracing::debug!(path = %path, from = current, to = desired, "toggling menu item");
        self.menu.toggle(&item)
    }

    /// Current selection state of the terminal item of `path`.
    ///
    /// Intermediate levels are expanded; the terminal item is never toggled.
    ///
    /// # Errors
    ///
    /// Same as [`MenuPathSelector::push`].
    pub fn get_state<I, P>(&mut self, path: I) -> TientoResult<bool>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathToken<M::Item>>,
    {
        let path = MenuPath::new(path)?;
        let item = self.navigate(&path)?;
        self.menu.is_selected(&item)
    }

    /// Resolve `path` and return the terminal item without reading its state.
    ///
    /// # Errors
    ///
    /// Same as [`MenuPathSelector::push`].
    pub fn select<I, P>(&mut self, path: I) -> TientoResult<M::Item>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathToken<M::Item>>,
    {
        let path = MenuPath::new(path)?;
        self.navigate(&path)
    }

    fn navigate(&mut self, path: &MenuPath<M::Item>) -> TientoResult<M::Item> {
        let last = path.len() - 1;
        let mut parent: Option<M::Item> = None;

        for (index, token) in path.tokens().iter().enumerate() {
            let level = index + 1;
            let criteria = token.to_criteria(self.policy);
            let candidates = self.menu.entries(parent.as_ref())?;
            let item = match resolve(candidates, &*criteria, level, self.strict) {
                Ok(item) => item,
                Err(err) => {
                    tracing::debug!(level, criteria = %criteria, "menu level did not resolve");
                    return Err(err);
                }
            };
            tracing::trace!(level, criteria = %criteria, "menu level resolved");

            if index < last {
                self.menu.expand(&item)?;
            }
            parent = Some(item);
        }

        parent.ok_or_else(|| TientoError::invalid_argument(MENU_PATH_LENGTH_ERROR))
    }
}
