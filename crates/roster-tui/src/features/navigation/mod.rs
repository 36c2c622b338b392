//! Top-level routes.

/// The screen currently shown under any overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// Credentials form.
    #[default]
    Login,
    /// User management table.
    Home,
    /// Static "Something went wrong" page.
    Error,
}

#[derive(Debug, Default)]
pub struct NavigationState {
    pub route: Route,
}

impl NavigationState {
    pub fn is_at(&self, route: Route) -> bool {
        self.route == route
    }
}
