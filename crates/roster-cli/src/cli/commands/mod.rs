//! CLI command handlers.

pub mod config;
pub mod register;
pub mod tui;
pub mod users;
