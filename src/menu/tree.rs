//! Menu tree
//!
//! Nodes live in an arena owned by [`MenuTree`] and refer to each other by
//! [`NodeId`]. A node may be listed under several parents; its `parent`
//! link follows the most recent attachment.

use std::collections::HashSet;
use std::fmt;

use crate::error::{RentalError, RentalResult};

use super::nav::NavCommand;
use super::procedure::Procedure;
use super::selection::Role;

/// Handle to a node of one [`MenuTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Heading shown above a node's options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Title {
    Fixed(String),
    /// "Options for: <record>", resolved from the selection when displayed
    OptionsFor(Role),
}

/// One screen of the menu
pub struct Node {
    label: String,
    title: Title,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    commands: Vec<NavCommand>,
    procedure: Option<Box<dyn Procedure>>,
}

impl Node {
    fn new(label: String) -> Self {
        Self {
            title: Title::Fixed(label.clone()),
            label,
            parent: None,
            children: Vec::new(),
            commands: Vec::new(),
            procedure: None,
        }
    }

    /// Text shown for this node in its parent's option list
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn commands(&self) -> &[NavCommand] {
        &self.commands
    }

    pub fn procedure(&self) -> Option<&dyn Procedure> {
        self.procedure.as_deref()
    }

    pub fn has_procedure(&self) -> bool {
        self.procedure.is_some()
    }

    /// True when entering the node shows a menu
    pub fn has_options(&self) -> bool {
        !self.children.is_empty() || !self.commands.is_empty()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("label", &self.label)
            .field("title", &self.title)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("commands", &self.commands)
            .field("procedure", &self.procedure.is_some())
            .finish()
    }
}

/// Arena of menu nodes with a fixed root
#[derive(Debug)]
pub struct MenuTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl MenuTree {
    /// Create a tree holding only its root
    pub fn new(root_label: &str) -> RentalResult<Self> {
        let root = Node::new(check_label(root_label)?);
        Ok(Self {
            nodes: vec![root],
            root: NodeId(0),
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> RentalResult<&Node> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| RentalError::Config(format!("Unknown menu node {}", id)))
    }

    fn node_mut(&mut self, id: NodeId) -> RentalResult<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| RentalError::Config(format!("Unknown menu node {}", id)))
    }

    /// First node with the given label
    pub fn find(&self, label: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.label == label)
            .map(NodeId)
    }

    /// Create a detached node
    pub fn add_node(&mut self, label: &str) -> RentalResult<NodeId> {
        let node = Node::new(check_label(label)?);
        self.nodes.push(node);
        Ok(NodeId(self.nodes.len() - 1))
    }

    pub fn set_title(&mut self, id: NodeId, title: Title) -> RentalResult<()> {
        if let Title::Fixed(text) = &title {
            check_label(text)?;
        }
        self.node_mut(id)?.title = title;
        Ok(())
    }

    /// List `child` under `parent` and make `parent` its parent
    ///
    /// A child already listed elsewhere stays listed there; only its parent
    /// link moves. Attaching a child to a parent that already lists it
    /// leaves the option list unchanged.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> RentalResult<()> {
        self.node(parent)?;
        self.node(child)?;

        if child == self.root {
            return Err(RentalError::Config(
                "The root menu cannot be attached as a child".into(),
            ));
        }
        if child == parent {
            return Err(RentalError::Config(format!(
                "Menu node '{}' cannot be its own child",
                self.nodes[child.0].label
            )));
        }

        self.nodes[child.0].parent = Some(parent);
        let siblings = &mut self.nodes[parent.0].children;
        if !siblings.contains(&child) {
            siblings.push(child);
        }
        Ok(())
    }

    /// Attach several children in order, stopping at the first failure
    ///
    /// Children attached before the failure stay attached.
    pub fn add_children(&mut self, parent: NodeId, children: &[NodeId]) -> RentalResult<()> {
        for &child in children {
            self.add_child(parent, child)?;
        }
        Ok(())
    }

    /// Offer a navigation command after the node's children
    pub fn add_command(&mut self, id: NodeId, command: NavCommand) -> RentalResult<()> {
        if command.label().is_none() {
            return Err(RentalError::Config(format!(
                "{:?} cannot be listed as a menu entry",
                command
            )));
        }
        let node = self.node_mut(id)?;
        if !node.commands.contains(&command) {
            node.commands.push(command);
        }
        Ok(())
    }

    pub fn add_commands(&mut self, id: NodeId, commands: &[NavCommand]) -> RentalResult<()> {
        for &command in commands {
            self.add_command(id, command)?;
        }
        Ok(())
    }

    /// Attach the procedure run whenever the node is entered, replacing any previous one
    pub fn add_procedure<P: Procedure + 'static>(
        &mut self,
        id: NodeId,
        procedure: P,
    ) -> RentalResult<()> {
        self.node_mut(id)?.procedure = Some(Box::new(procedure));
        Ok(())
    }

    /// Option labels of a node: its children, then its commands
    pub fn options(&self, id: NodeId) -> RentalResult<Vec<String>> {
        let node = self.node(id)?;
        let mut options = Vec::with_capacity(node.children.len() + node.commands.len());
        for child in &node.children {
            options.push(self.node(*child)?.label.clone());
        }
        options.extend(
            node.commands
                .iter()
                .filter_map(|c| c.label())
                .map(str::to_string),
        );
        Ok(options)
    }

    /// Command behind the option at `index`
    pub fn entry(&self, id: NodeId, index: usize) -> RentalResult<NavCommand> {
        let node = self.node(id)?;
        if index < node.children.len() {
            return Ok(NavCommand::GotoChild(index));
        }
        node.commands
            .get(index - node.children.len())
            .copied()
            .ok_or_else(|| {
                RentalError::Config(format!("'{}' has no option {}", node.label, index))
            })
    }

    /// Check that every node reachable from the root leads somewhere
    pub fn validate(&self) -> RentalResult<()> {
        let mut seen = HashSet::new();
        let mut pending = vec![self.root];

        while let Some(id) = pending.pop() {
            if !seen.insert(id) {
                continue;
            }
            let node = self.node(id)?;
            if !node.has_options() && !node.has_procedure() {
                return Err(RentalError::Config(format!(
                    "Menu node '{}' has neither options nor a procedure",
                    node.label
                )));
            }
            pending.extend(node.children.iter().copied());
        }

        log::debug!("Menu tree valid: {} reachable node(s)", seen.len());
        Ok(())
    }
}

fn check_label(label: &str) -> RentalResult<String> {
    if label.trim().is_empty() {
        return Err(RentalError::Config("Menu labels must be non-empty".into()));
    }
    Ok(label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::procedure::from_fn;

    fn noop() -> impl Procedure {
        from_fn(|_| Ok(None))
    }

    #[test]
    fn test_add_child_sets_parent() {
        let mut tree = MenuTree::new("Main Menu").unwrap();
        let units = tree.add_node("Rental Units").unwrap();
        tree.add_child(tree.root(), units).unwrap();

        assert_eq!(tree.node(units).unwrap().parent(), Some(tree.root()));
        assert_eq!(tree.node(tree.root()).unwrap().children(), &[units]);
    }

    #[test]
    fn test_repeat_attachment_lists_child_once() {
        let mut tree = MenuTree::new("Main Menu").unwrap();
        let units = tree.add_node("Rental Units").unwrap();
        tree.add_child(tree.root(), units).unwrap();
        tree.add_child(tree.root(), units).unwrap();

        assert_eq!(tree.node(tree.root()).unwrap().children(), &[units]);
    }

    #[test]
    fn test_shared_node_last_attachment_wins() {
        let mut tree = MenuTree::new("Main Menu").unwrap();
        let tenants = tree.add_node("Tenants").unwrap();
        let unit_tenants = tree.add_node("Tenants for Selected Unit").unwrap();
        let select = tree.add_node("Select Tenant").unwrap();

        tree.add_child(tenants, select).unwrap();
        tree.add_child(unit_tenants, select).unwrap();

        assert_eq!(tree.node(select).unwrap().parent(), Some(unit_tenants));
        assert!(tree.node(tenants).unwrap().children().contains(&select));
        assert!(tree.node(unit_tenants).unwrap().children().contains(&select));
    }

    #[test]
    fn test_add_children_is_fail_fast() {
        let mut tree = MenuTree::new("Main Menu").unwrap();
        let first = tree.add_node("First").unwrap();
        let last = tree.add_node("Last").unwrap();
        let bogus = NodeId(99);

        let result = tree.add_children(tree.root(), &[first, bogus, last]);

        assert!(matches!(result, Err(RentalError::Config(_))));
        assert_eq!(tree.node(tree.root()).unwrap().children(), &[first]);
        assert_eq!(tree.node(last).unwrap().parent(), None);
    }

    #[test]
    fn test_rejects_bad_structure() {
        let mut tree = MenuTree::new("Main Menu").unwrap();
        let node = tree.add_node("Node").unwrap();

        assert!(tree.add_node("  ").is_err());
        assert!(MenuTree::new("").is_err());
        assert!(tree.add_child(node, tree.root()).is_err());
        assert!(tree.add_child(node, node).is_err());
        assert!(tree.add_command(node, NavCommand::GotoChild(0)).is_err());
    }

    #[test]
    fn test_options_list_children_then_commands() {
        let mut tree = MenuTree::new("Main Menu").unwrap();
        let units = tree.add_node("Rental Units").unwrap();
        tree.add_child(tree.root(), units).unwrap();
        tree.add_command(tree.root(), NavCommand::Exit).unwrap();
        tree.add_command(tree.root(), NavCommand::Exit).unwrap();

        let options = tree.options(tree.root()).unwrap();
        assert_eq!(options, vec!["Rental Units", "Exit App"]);
        assert_eq!(tree.entry(tree.root(), 0).unwrap(), NavCommand::GotoChild(0));
        assert_eq!(tree.entry(tree.root(), 1).unwrap(), NavCommand::Exit);
        assert!(tree.entry(tree.root(), 2).is_err());
    }

    #[test]
    fn test_validate_rejects_dead_end() {
        let mut tree = MenuTree::new("Main Menu").unwrap();
        let leaf = tree.add_node("Summary").unwrap();
        tree.add_child(tree.root(), leaf).unwrap();

        let err = tree.validate().unwrap_err();
        assert!(err.to_string().contains("Summary"));

        tree.add_procedure(leaf, noop()).unwrap();
        tree.validate().unwrap();
    }

    #[test]
    fn test_validate_ignores_detached_nodes() {
        let mut tree = MenuTree::new("Main Menu").unwrap();
        tree.add_command(tree.root(), NavCommand::Exit).unwrap();
        tree.add_node("Orphan").unwrap();

        tree.validate().unwrap();
    }

    #[test]
    fn test_validate_handles_cycles() {
        let mut tree = MenuTree::new("Main Menu").unwrap();
        let a = tree.add_node("A").unwrap();
        let b = tree.add_node("B").unwrap();
        tree.add_child(tree.root(), a).unwrap();
        tree.add_child(a, b).unwrap();
        tree.add_child(b, a).unwrap();

        tree.validate().unwrap();
        assert_eq!(tree.node(a).unwrap().parent(), Some(b));
    }
}
