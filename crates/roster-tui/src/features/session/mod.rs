//! Session feature: login form, register action, error page.

mod render;
mod state;
mod update;

pub use render::{render_error_page, render_login};
pub use state::{LoginField, LoginForm, SessionState};
pub use update::{handle_login_key, handle_login_paste, handle_session_event};
