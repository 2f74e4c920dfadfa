//! Navigation commands and history

use super::tree::NodeId;

/// Where a menu choice leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    ReturnToRoot,
    /// Back to the menu shown before the current one
    GoBack,
    Exit,
    /// The n-th child of the node that offered the choice
    GotoChild(usize),
}

impl NavCommand {
    /// Label of the command when listed as a menu entry
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::ReturnToRoot => Some("Main Menu"),
            Self::GoBack => Some("Previous Menu"),
            Self::Exit => Some("Exit App"),
            Self::GotoChild(_) => None,
        }
    }
}

/// Redirect requested by a procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    Node(NodeId),
    Command(NavCommand),
}

/// Trail of menus the user has passed through
///
/// Revisiting a menu already on the trail cuts the trail back to it, so the
/// trail is always a path without repeats.
#[derive(Debug, Clone, Default)]
pub struct History {
    trail: Vec<NodeId>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a menu was shown
    pub fn visit(&mut self, id: NodeId) {
        match self.trail.iter().position(|n| *n == id) {
            Some(pos) => self.trail.truncate(pos + 1),
            None => self.trail.push(id),
        }
    }

    /// Drop the current menu and return the one before it
    ///
    /// At the start of the trail the current menu is returned unchanged.
    pub fn back(&mut self) -> Option<NodeId> {
        if self.trail.len() > 1 {
            self.trail.pop();
        }
        self.last()
    }

    /// Most recently shown menu
    pub fn last(&self) -> Option<NodeId> {
        self.trail.last().copied()
    }

    /// Menu that led to `id`: the latest trail entry other than `id` itself
    pub fn caller(&self, id: NodeId) -> Option<NodeId> {
        self.trail.iter().rev().copied().find(|n| *n != id)
    }

    pub fn trail(&self) -> &[NodeId] {
        &self.trail
    }

    pub fn len(&self) -> usize {
        self.trail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }

    pub fn clear(&mut self) {
        self.trail.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuTree;

    fn ids(count: usize) -> Vec<NodeId> {
        let mut tree = MenuTree::new("Main Menu").unwrap();
        let mut ids = vec![tree.root()];
        for i in 1..count {
            ids.push(tree.add_node(&format!("Node {}", i)).unwrap());
        }
        ids
    }

    #[test]
    fn test_visit_and_back() {
        let n = ids(3);
        let mut history = History::new();
        history.visit(n[0]);
        history.visit(n[1]);
        history.visit(n[2]);

        assert_eq!(history.back(), Some(n[1]));
        assert_eq!(history.back(), Some(n[0]));
        assert_eq!(history.back(), Some(n[0]));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_revisit_cuts_trail() {
        let n = ids(3);
        let mut history = History::new();
        history.visit(n[0]);
        history.visit(n[1]);
        history.visit(n[1]);
        history.visit(n[2]);
        history.visit(n[0]);

        assert_eq!(history.trail(), &[n[0]]);
    }

    #[test]
    fn test_caller_skips_current_node() {
        let n = ids(3);
        let mut history = History::new();
        history.visit(n[0]);
        history.visit(n[1]);

        assert_eq!(history.caller(n[1]), Some(n[0]));
        assert_eq!(history.caller(n[2]), Some(n[1]));
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.back(), None);
    }

    #[test]
    fn test_command_labels() {
        assert_eq!(NavCommand::ReturnToRoot.label(), Some("Main Menu"));
        assert_eq!(NavCommand::GoBack.label(), Some("Previous Menu"));
        assert_eq!(NavCommand::Exit.label(), Some("Exit App"));
        assert_eq!(NavCommand::GotoChild(2).label(), None);
    }
}
