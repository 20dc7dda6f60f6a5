//! The events map screen.
//!
//! Owns the working set (upcoming events from the last successful fetch)
//! and the current map region. A generation counter identifies each mount,
//! so a fetch that completes after the screen was left cannot touch state.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::config::MapSettings;
use crate::filters;
use crate::loader::{LoadMessage, LoadTicket};
use crate::models::{Event, Position};
use crate::render::{self, MapScene};
use crate::viewport::{self, Region};

/// Observable screen state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// No successful fetch yet; the map shows no markers
    Loading,
    /// At least one fetch applied
    Populated,
}

/// What happened to a load result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Working set replaced; `shown` events are upcoming
    Applied { shown: usize },
    /// Fetch failed; working set untouched
    Failed(String),
    /// Result belongs to a screen instance that is no longer active
    Stale,
}

/// Screen-scoped state of the events map.
#[derive(Debug)]
pub struct EventsMap {
    settings: MapSettings,
    events: Vec<Event>,
    region: Region,
    state: ScreenState,
    generation: u64,
    mounted: bool,
}

impl EventsMap {
    #[must_use]
    pub fn new(settings: MapSettings) -> Self {
        let region = settings.default_region;
        Self {
            settings,
            events: Vec::new(),
            region,
            state: ScreenState::Loading,
            generation: 0,
            mounted: false,
        }
    }

    /// Mount the screen and get the ticket for its one load.
    pub fn mount(&mut self) -> LoadTicket {
        self.generation += 1;
        self.mounted = true;
        debug!(generation = self.generation, "mounted events map");
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Leave the screen. Local state is discarded and in-flight loads
    /// become stale.
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.mounted = false;
        self.events.clear();
        self.region = self.settings.default_region;
        self.state = ScreenState::Loading;
        debug!("unmounted events map");
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Apply a finished load if it still belongs to this screen instance.
    pub fn apply_load(&mut self, message: LoadMessage, now: DateTime<Utc>) -> LoadOutcome {
        if !self.mounted || message.ticket.generation != self.generation {
            debug!(
                ticket = message.ticket.generation,
                current = self.generation,
                "discarding stale load"
            );
            return LoadOutcome::Stale;
        }

        match message.result {
            Ok(events) => {
                let fetched = events.len();
                self.replace_events(filters::upcoming(events, now));
                info!("{} of {} events upcoming", self.events.len(), fetched);
                LoadOutcome::Applied {
                    shown: self.events.len(),
                }
            }
            Err(e) => {
                error!("Failed to fetch events: {e}");
                LoadOutcome::Failed(e.to_string())
            }
        }
    }

    /// Replace the working set wholesale and refit the map.
    fn replace_events(&mut self, events: Vec<Event>) {
        self.events = events;
        self.state = ScreenState::Populated;

        let coords: Vec<Position> = self.events.iter().map(|e| e.position).collect();
        if let Some(region) =
            viewport::fit_to_coordinates(&coords, self.settings.edge_padding, self.settings.size)
        {
            self.region = region;
        }
    }

    #[must_use]
    pub fn state(&self) -> ScreenState {
        self.state
    }

    /// Current working set.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn region(&self) -> Region {
        self.region
    }

    #[must_use]
    pub fn scene(&self) -> MapScene {
        render::build_scene(&self.events, self.region, &self.settings)
    }

    /// Whether a marker for `event_id` is on the map.
    ///
    /// Taps are only dispatched for rendered markers.
    #[must_use]
    pub fn is_rendered(&self, event_id: &str) -> bool {
        let rendered = self.events.iter().any(|e| e.id == event_id);
        if !rendered {
            warn!(event_id, "tap on a marker that is not shown, ignoring");
        }
        rendered
    }
}
