//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that take a `Backend` handle and return
//! the `UiEvent` describing the outcome. The runtime spawns them and sends
//! the result to the inbox; they never touch state.

mod session;
mod users;

pub use session::*;
pub use users::*;
