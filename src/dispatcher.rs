//! Action dispatcher for the events map.
//!
//! Turns taps into navigation and session side effects.

use tracing::{debug, info, instrument};

use crate::errors::EventMapError;
use crate::navigation::{Navigator, Route};
use crate::session::{ACCESS_TOKEN_KEY, AuthContext, SessionStore, USER_INFO_KEY};

/// User gestures the screen reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    MarkerTapped(String),
    CreateEventTapped,
    LogOutTapped,
}

/// Dispatches actions against the session and the router.
pub struct ActionDispatcher<S, N> {
    store: S,
    auth: AuthContext,
    navigator: N,
}

impl<S: SessionStore, N: Navigator> ActionDispatcher<S, N> {
    pub fn new(store: S, auth: AuthContext, navigator: N) -> Self {
        Self {
            store,
            auth,
            navigator,
        }
    }

    /// Handle one action.
    ///
    /// # Errors
    ///
    /// Returns an error if logging out cannot clear the persisted session.
    /// In that case the auth state and the current screen are unchanged.
    #[instrument(skip(self))]
    pub async fn dispatch(&mut self, action: Action) -> Result<(), EventMapError> {
        match action {
            Action::MarkerTapped(event_id) => {
                self.navigator.navigate(Route::EventDetails { event_id });
            }
            Action::CreateEventTapped => {
                // Event creation has no screen yet
                debug!("create event tapped");
            }
            Action::LogOutTapped => self.log_out().await?,
        }
        Ok(())
    }

    async fn log_out(&mut self) -> Result<(), EventMapError> {
        self.store
            .multi_remove(&[USER_INFO_KEY, ACCESS_TOKEN_KEY])
            .await?;
        self.auth.set_value(None);
        info!("logged out");
        self.navigator.navigate(Route::Login);
        Ok(())
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}
