//! Feature slices for the TUI (state/update/render per slice).

pub mod navigation;
pub mod session;
pub mod users;
