//! Cross-slice state mutations.
//!
//! Feature reducers and overlays return these mutations to request changes
//! outside their own slice. The main reducer applies them in order.

use crate::features::navigation::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateMutation {
    Navigation(NavigationMutation),
    Session(SessionMutation),
    Notice(NoticeMutation),
}

/// Route changes. Fire-and-forget: applying one never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationMutation {
    /// Switch to `route`. Entering `Home` mounts the table and loads users.
    RedirectTo(Route),
    /// Drop whatever the route has cached so its next mount starts fresh.
    Invalidate(Route),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMutation {
    SetSignedIn(Option<String>),
}

/// Footer notice line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeMutation {
    Show(String),
    Clear,
}
