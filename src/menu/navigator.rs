//! Navigation loop
//!
//! Walks the menu tree: entering a node runs its procedure (if any), then
//! shows its options (if any). Only an exit command ends the loop.

use crate::error::{RentalError, RentalResult};

use super::nav::{History, NavCommand, Next};
use super::session::Session;
use super::tree::{MenuTree, NodeId};

/// Result of one navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Goto(NodeId),
    Exit,
}

/// Drives a validated [`MenuTree`]
#[derive(Debug)]
pub struct Navigator {
    tree: MenuTree,
    history: History,
}

impl Navigator {
    /// Take ownership of a tree, rejecting dead-end nodes up front
    pub fn new(tree: MenuTree) -> RentalResult<Self> {
        tree.validate()?;
        Ok(Self {
            tree,
            history: History::new(),
        })
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Run from the root until the user exits
    pub fn run(&mut self, session: &mut Session<'_>) -> RentalResult<()> {
        let mut current = self.tree.root();
        self.history.clear();
        log::info!("Navigation started at '{}'", self.tree.node(current)?.label());

        loop {
            if self.tree.node(current)?.has_procedure() {
                match self.run_procedure(current, session)? {
                    Step::Goto(next) => current = next,
                    Step::Exit => break,
                }
            }

            if self.tree.node(current)?.has_options() {
                match self.show_menu(current, session)? {
                    Step::Goto(next) => current = next,
                    Step::Exit => break,
                }
            }
        }

        log::info!("Navigation finished");
        Ok(())
    }

    fn run_procedure(&mut self, id: NodeId, session: &mut Session<'_>) -> RentalResult<Step> {
        let node = self.tree.node(id)?;
        let caller = self.history.caller(id);
        // a leaf returns to the menu it was picked from
        let default_next = if node.has_options() {
            id
        } else {
            caller.or(node.parent()).unwrap_or(self.tree.root())
        };

        let Some(procedure) = node.procedure() else {
            return Ok(Step::Goto(default_next));
        };

        log::debug!("Running procedure of '{}'", node.label());
        session.set_last_menu(caller);
        let next = procedure.run(session)?;

        match next {
            None => Ok(Step::Goto(default_next)),
            Some(Next::Node(target)) => {
                self.tree.node(target)?;
                Ok(Step::Goto(target))
            }
            Some(Next::Command(command)) => self.resolve(id, command),
        }
    }

    fn show_menu(&mut self, id: NodeId, session: &mut Session<'_>) -> RentalResult<Step> {
        let node = self.tree.node(id)?;
        self.history.visit(id);

        let title = session.title_for(node)?;
        let options = self.tree.options(id)?;
        let index = session.console.pick(&title, &options)?;
        let command = self.tree.entry(id, index)?;

        log::debug!("'{}' -> {:?}", node.label(), command);
        self.resolve(id, command)
    }

    fn resolve(&mut self, from: NodeId, command: NavCommand) -> RentalResult<Step> {
        let root = self.tree.root();
        match command {
            NavCommand::ReturnToRoot => Ok(Step::Goto(root)),
            NavCommand::Exit => Ok(Step::Exit),
            NavCommand::GoBack => Ok(Step::Goto(self.history.back().unwrap_or(root))),
            NavCommand::GotoChild(index) => {
                let node = self.tree.node(from)?;
                node.children()
                    .get(index)
                    .copied()
                    .map(Step::Goto)
                    .ok_or_else(|| {
                        RentalError::Config(format!("'{}' has no child {}", node.label(), index))
                    })
            }
        }
    }
}
