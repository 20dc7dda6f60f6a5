//! Event loader.
//!
//! The fetch runs as its own task and reports back over a channel, so the
//! screen loop keeps handling gestures while the request is in flight. The
//! screen decides whether the result still applies.

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::EventsClient;
use crate::errors::EventMapError;
use crate::models::Event;
use crate::screen::{EventsMap, LoadOutcome};

/// Identifies the screen instance a load was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub(crate) generation: u64,
}

/// Result of one fetch, addressed to the screen instance that asked for it.
#[derive(Debug)]
pub struct LoadMessage {
    pub ticket: LoadTicket,
    pub result: Result<Vec<Event>, EventMapError>,
}

/// Start fetching the event list for `ticket`.
///
/// The message is dropped quietly if the screen loop is gone.
pub fn spawn_load(
    client: EventsClient,
    ticket: LoadTicket,
    tx: mpsc::Sender<LoadMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = client.fetch_events().await;
        if tx.send(LoadMessage { ticket, result }).await.is_err() {
            debug!(generation = ticket.generation, "screen loop closed, discarding events");
        }
    })
}

/// Mount `screen`, run its one load and apply the result.
pub async fn mount_and_load(screen: &mut EventsMap, client: EventsClient) -> LoadOutcome {
    let (tx, mut rx) = mpsc::channel(1);
    let ticket = screen.mount();
    spawn_load(client, ticket, tx);

    match rx.recv().await {
        Some(message) => screen.apply_load(message, Utc::now()),
        None => LoadOutcome::Stale,
    }
}
