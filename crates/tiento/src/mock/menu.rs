//! Recording menu tree.

use crate::lookup::HasText;
use crate::menu::MenuHierarchy;
use crate::result::{TientoError, TientoResult};

/// Operation recorded by [`MockMenu`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCall {
    /// A submenu was opened
    Expand(String),
    /// A selection state was flipped
    Toggle(String),
}

/// Handle to an entry of a [`MockMenu`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockMenuItem {
    id: usize,
    label: String,
}

impl MockMenuItem {
    /// Entry label
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl HasText for MockMenuItem {
    fn text(&self) -> Option<String> {
        Some(self.label.clone())
    }
}

#[derive(Debug, Clone)]
struct EntryDef {
    label: String,
    checked: bool,
    children: Vec<EntryDef>,
}

/// Builder for [`MockMenu`]
#[derive(Debug, Clone, Default)]
pub struct MockMenuBuilder {
    entries: Vec<EntryDef>,
}

impl MockMenuBuilder {
    /// Add an unchecked leaf entry
    #[must_use]
    pub fn item(self, label: impl Into<String>) -> Self {
        self.checked_item(label, false)
    }

    /// Add a leaf entry with an initial selection state
    #[must_use]
    pub fn checked_item(mut self, label: impl Into<String>, checked: bool) -> Self {
        self.entries.push(EntryDef {
            label: label.into(),
            checked,
            children: Vec::new(),
        });
        self
    }

    /// Add an entry whose children are described by `build`
    #[must_use]
    pub fn submenu<F>(mut self, label: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let children = build(Self::default()).entries;
        self.entries.push(EntryDef {
            label: label.into(),
            checked: false,
            children,
        });
        self
    }

    /// Finish the menu
    #[must_use]
    pub fn build(self) -> MockMenu {
        let mut menu = MockMenu::default();
        let roots = self
            .entries
            .into_iter()
            .map(|entry| menu.insert(entry))
            .collect();
        menu.roots = roots;
        menu
    }
}

#[derive(Debug, Clone)]
struct Node {
    label: String,
    checked: bool,
    expanded: bool,
    children: Vec<usize>,
}

/// Menu tree backed by an arena of nodes.
///
/// A submenu only lists its entries after it has been expanded, the way a
/// real menu bar only realizes a popup once it is shown.
#[derive(Debug, Clone, Default)]
pub struct MockMenu {
    nodes: Vec<Node>,
    roots: Vec<usize>,
    calls: Vec<MenuCall>,
    toggle_failure: Option<String>,
}

impl MockMenu {
    /// Start building a menu
    #[must_use]
    pub fn builder() -> MockMenuBuilder {
        MockMenuBuilder::default()
    }

    fn insert(&mut self, entry: EntryDef) -> usize {
        let children = entry
            .children
            .into_iter()
            .map(|child| self.insert(child))
            .collect();
        self.nodes.push(Node {
            label: entry.label,
            checked: entry.checked,
            expanded: false,
            children,
        });
        self.nodes.len() - 1
    }

    fn node(&self, item: &MockMenuItem) -> TientoResult<&Node> {
        self.nodes
            .get(item.id)
            .filter(|node| node.label == item.label)
            .ok_or_else(|| TientoError::capability(format!("Stale menu item '{}'", item.label)))
    }

    fn node_mut(&mut self, item: &MockMenuItem) -> TientoResult<&mut Node> {
        self.node(item)?;
        self.nodes
            .get_mut(item.id)
            .ok_or_else(|| TientoError::capability(format!("Stale menu item '{}'", item.label)))
    }

    fn items(&self, ids: &[usize]) -> Vec<MockMenuItem> {
        ids.iter()
            .map(|&id| MockMenuItem {
                id,
                label: self.nodes[id].label.clone(),
            })
            .collect()
    }

    /// Make every later toggle fail with a capability error
    pub fn fail_toggles(&mut self, message: impl Into<String>) {
        self.toggle_failure = Some(message.into());
    }

    /// Recorded operations, oldest first
    #[must_use]
    pub fn calls(&self) -> &[MenuCall] {
        &self.calls
    }

    /// Number of toggles applied to entries labelled `label`
    #[must_use]
    pub fn toggle_count(&self, label: &str) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, MenuCall::Toggle(l) if l == label))
            .count()
    }

    /// Number of expansions of entries labelled `label`
    #[must_use]
    pub fn expand_count(&self, label: &str) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, MenuCall::Expand(l) if l == label))
            .count()
    }

    /// Number of toggles on any entry
    #[must_use]
    pub fn total_toggles(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, MenuCall::Toggle(_)))
            .count()
    }

    /// Selection state of the first entry labelled `label`; false when absent
    #[must_use]
    pub fn is_checked(&self, label: &str) -> bool {
        self.nodes
            .iter()
            .find(|node| node.label == label)
            .is_some_and(|node| node.checked)
    }
}

impl MenuHierarchy for MockMenu {
    type Item = MockMenuItem;

    fn entries(&self, parent: Option<&MockMenuItem>) -> TientoResult<Vec<MockMenuItem>> {
        let Some(parent) = parent else {
            return Ok(self.items(&self.roots));
        };
        let node = self.node(parent)?;
        if !node.expanded {
            return Err(TientoError::capability(format!(
                "Menu '{}' is not expanded",
                node.label
            )));
        }
        Ok(self.items(&node.children))
    }

    fn expand(&mut self, item: &MockMenuItem) -> TientoResult<()> {
        self.node_mut(item)?.expanded = true;
        self.calls.push(MenuCall::Expand(item.label.clone()));
        Ok(())
    }

    fn is_selected(&self, item: &MockMenuItem) -> TientoResult<bool> {
        Ok(self.node(item)?.checked)
    }

    fn toggle(&mut self, item: &MockMenuItem) -> TientoResult<()> {
        if let Some(message) = &self.toggle_failure {
            return Err(TientoError::capability(message.clone()));
        }
        let node = self.node_mut(item)?;
        node.checked = !node.checked;
        self.calls.push(MenuCall::Toggle(item.label.clone()));
        Ok(())
    }
}
