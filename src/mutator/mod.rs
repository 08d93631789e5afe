//! Source-preserving edits
//!
//! Each mutator reads one `Document` and returns an edited copy of its token
//! stream, or `None` when there is nothing to do. The document itself is
//! never touched; the session replays the edited stream and parses the
//! result before replacing its state.

mod add;
mod register;
mod remove;

pub use add::{add_task, TaskConfig};
pub use register::{register_task, TaskList};
pub use remove::remove_task;
