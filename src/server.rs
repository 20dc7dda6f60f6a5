//! Development event backend.
//!
//! Serves an event list from a JSON file the way the app's JSON server
//! does, so the map can be driven end to end without the real backend:
//! - `GET /events` the whole collection
//! - `GET /events/{id}` one record
//! - `GET /health`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::Value;

use crate::models::Event;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub events_file: PathBuf,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Event records exactly as read from disk
    pub events: Arc<Value>,
}

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/events", get(events_handler))
        .route("/events/{id}", get(event_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Read and check the events file.
///
/// # Errors
///
/// Returns an error if the file is unreadable or not an array of events.
pub fn load_events_file(path: &std::path::Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    // Records the loader would reject are a mistake in the fixture
    let events: Vec<Event> = serde_json::from_value(value.clone())
        .with_context(|| format!("{} is not an array of events", path.display()))?;
    for event in &events {
        event.validate()?;
    }
    tracing::info!("serving {} events from {}", events.len(), path.display());

    Ok(value)
}

/// Start the web server.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let events = load_events_file(&config.events_file)?;
    let state = AppState {
        events: Arc::new(events),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("event server listening at http://{}/events", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Whole event collection.
async fn events_handler(State(state): State<AppState>) -> Json<Value> {
    Json(state.events.as_ref().clone())
}

/// Single event by ID.
async fn event_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let found = state
        .events
        .as_array()
        .and_then(|events| events.iter().find(|e| e["id"] == id.as_str()));

    match found {
        Some(event) => (StatusCode::OK, Json(event.clone())).into_response(),
        None => (StatusCode::NOT_FOUND, Json(Value::Object(serde_json::Map::new()))).into_response(),
    }
}

/// Health check endpoint.
async fn health_handler() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::EventsClient;
    use crate::client::tests::spawn_app;

    fn state() -> AppState {
        AppState {
            events: Arc::new(json!([
                {
                    "id": "1",
                    "name": "Soup kitchen",
                    "dateTime": "2099-01-01T00:00:00Z",
                    "position": { "latitude": 1.0, "longitude": 1.0 }
                }
            ])),
        }
    }

    #[tokio::test]
    async fn test_events_round_trip_through_client() {
        let base = spawn_app(create_router(state())).await;
        let client = EventsClient::new(format!("{base}/events")).unwrap();

        let events = client.fetch_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Soup kitchen");
    }

    #[tokio::test]
    async fn test_single_event_and_missing() {
        let base = spawn_app(create_router(state())).await;

        let found = reqwest::get(format!("{base}/events/1")).await.unwrap();
        assert_eq!(found.status(), 200);
        let body: Value = found.json().await.unwrap();
        assert_eq!(body["name"], "Soup kitchen");

        let missing = reqwest::get(format!("{base}/events/nope")).await.unwrap();
        assert_eq!(missing.status(), 404);
    }

    #[tokio::test]
    async fn test_health() {
        let base = spawn_app(create_router(state())).await;
        let body = reqwest::get(format!("{base}/health"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "OK");
    }

    #[test]
    fn test_load_events_file_rejects_bad_fixture() {
        let dir = tempfile::tempdir().unwrap();

        let good = dir.path().join("good.json");
        std::fs::write(&good, state().events.to_string()).unwrap();
        assert!(load_events_file(&good).is_ok());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, r#"{"events": []}"#).unwrap();
        assert!(load_events_file(&bad).is_err());
    }
}
