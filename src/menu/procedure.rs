//! Procedures attached to menu nodes

use crate::error::RentalResult;

use super::nav::Next;
use super::session::Session;

/// Behavior run each time a node is entered
///
/// Returning `None` lets the navigator pick the next node: the node itself
/// when it has options, otherwise the menu it was picked from.
pub trait Procedure {
    fn run(&self, session: &mut Session<'_>) -> RentalResult<Option<Next>>;
}

/// Procedure backed by a closure
pub struct FnProcedure<F>(F);

/// Wrap a closure as a [`Procedure`]
pub fn from_fn<F>(f: F) -> FnProcedure<F>
where
    F: Fn(&mut Session<'_>) -> RentalResult<Option<Next>>,
{
    FnProcedure(f)
}

impl<F> Procedure for FnProcedure<F>
where
    F: Fn(&mut Session<'_>) -> RentalResult<Option<Next>>,
{
    fn run(&self, session: &mut Session<'_>) -> RentalResult<Option<Next>> {
        (self.0)(session)
    }
}
