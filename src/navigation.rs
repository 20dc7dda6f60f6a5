//! Navigation routes leaving the events map.

use serde_json::{Value, json};
use tracing::info;

/// Screens the events map can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Detail screen for one event
    EventDetails { event_id: String },
    /// Sign-in screen shown after logging out
    Login,
}

impl Route {
    /// Router screen name.
    #[must_use]
    pub const fn screen(&self) -> &'static str {
        match self {
            Self::EventDetails { .. } => "EventDetails",
            Self::Login => "Login",
        }
    }

    /// Route parameters, if the screen takes any.
    #[must_use]
    pub fn params(&self) -> Option<Value> {
        match self {
            Self::EventDetails { event_id } => Some(json!({ "eventId": event_id })),
            Self::Login => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.params() {
            Some(params) => write!(f, "{} {params}", self.screen()),
            None => f.write_str(self.screen()),
        }
    }
}

/// Router collaborator.
pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

/// In-process router that records every navigation in order.
#[derive(Debug, Default)]
pub struct NavigationStack {
    history: Vec<Route>,
}

impl NavigationStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route currently on top, if any navigation happened.
    #[must_use]
    pub fn current(&self) -> Option<&Route> {
        self.history.last()
    }

    #[must_use]
    pub fn history(&self) -> &[Route] {
        &self.history
    }
}

impl Navigator for NavigationStack {
    fn navigate(&mut self, route: Route) {
        info!(screen = route.screen(), "navigate");
        self.history.push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_details_params() {
        let route = Route::EventDetails {
            event_id: "1".into(),
        };
        assert_eq!(route.screen(), "EventDetails");
        assert_eq!(route.params(), Some(json!({ "eventId": "1" })));
        assert_eq!(route.to_string(), r#"EventDetails {"eventId":"1"}"#);
    }

    #[test]
    fn test_login_has_no_params() {
        assert_eq!(Route::Login.params(), None);
        assert_eq!(Route::Login.to_string(), "Login");
    }

    #[test]
    fn test_stack_records_history() {
        let mut nav = NavigationStack::new();
        assert!(nav.current().is_none());

        nav.navigate(Route::EventDetails {
            event_id: "7".into(),
        });
        nav.navigate(Route::Login);

        assert_eq!(nav.history().len(), 2);
        assert_eq!(nav.current(), Some(&Route::Login));
    }
}
