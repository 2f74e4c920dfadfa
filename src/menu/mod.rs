//! Menu navigation engine
//!
//! A [`MenuTree`] of screens, a [`Navigator`] that walks it, and the
//! [`Session`] every procedure runs against. The interactive create and
//! update flows live on the session so every screen shares the same
//! cancellation and retry behavior.

mod flows;
mod nav;
mod navigator;
mod procedure;
mod selection;
mod session;
mod tree;

pub use flows::{is_cancel, FieldEntry, Owner, CANCEL_INPUTS, SUBMIT_CHANGES};
pub use nav::{History, NavCommand, Next};
pub use navigator::Navigator;
pub use procedure::{from_fn, FnProcedure, Procedure};
pub use selection::{Role, Selectable, Selection};
pub use session::{Session, INVALID_INPUT, WELCOME_BANNER};
pub use tree::{MenuTree, Node, NodeId, Title};
