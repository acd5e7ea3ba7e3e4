use tracing::debug;

use crate::ui::Route;

use super::{AuthorizationGate, GateDecision};

/// Result of entering a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Render(Route),
    Redirect(Route),
}

/// Most redirects a single entry can take (`/` -> `/manga` -> `/login`).
const MAX_REDIRECTS: usize = 2;

impl AuthorizationGate {
    /// Resolve one navigation step.
    ///
    /// `/login` always renders. `/manga` renders only when the gate allows,
    /// else redirects to login. Everything else redirects to `/manga`.
    pub fn resolve_route(&self, path: &str) -> RouteOutcome {
        match normalize_path(path) {
            "/login" => RouteOutcome::Render(Route::Login),
            "/manga" => match self.check() {
                GateDecision::Allow(_) => RouteOutcome::Render(Route::Catalog),
                GateDecision::Deny => RouteOutcome::Redirect(Route::Login),
            },
            _ => RouteOutcome::Redirect(Route::Catalog),
        }
    }

    /// Follow redirects from `path` to the view that finally renders.
    pub fn enter(&self, path: &str) -> Route {
        let mut current = path.to_string();
        for _ in 0..=MAX_REDIRECTS {
            match self.resolve_route(&current) {
                RouteOutcome::Render(route) => return route,
                RouteOutcome::Redirect(route) => {
                    debug!("Redirect {} -> {}", current, route.path());
                    current = route.path().to_string();
                }
            }
        }
        Route::Login
    }
}

/// Strip query string and a trailing slash.
fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}
