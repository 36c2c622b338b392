//! User management table.

mod render;
mod state;
mod update;

pub use render::{home_hints, render_home};
pub use state::{UsersState, UsersView};
pub use update::{FormAction, UsersContext, handle_home_key, handle_users_event};
