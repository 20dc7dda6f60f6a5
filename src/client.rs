//! Volunteer events API client.
//!
//! Provides async HTTP access to the event collection.
//! Uses reqwest with rustls for TLS.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};

use crate::errors::EventMapError;
use crate::models::Event;

/// Default request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// User agent string for API requests.
const USER_AGENT: &str = concat!("eventmap/", env!("CARGO_PKG_VERSION"));

/// Client for the event collection endpoint.
#[derive(Debug, Clone)]
pub struct EventsClient {
    client: Client,
    endpoint: String,
}

impl EventsClient {
    /// Create a new client for `endpoint` (the full `/events` URL).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, EventMapError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the full event collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-2xx status, or the body is not a valid array of events.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch_events(&self) -> Result<Vec<Event>, EventMapError> {
        debug!("fetching events");

        let response = self.client.get(&self.endpoint).send().await?;

        // Check status before parsing
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EventMapError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.bytes().await?;
        let events: Vec<Event> = serde_json::from_slice(&body)?;

        for event in &events {
            event.validate()?;
        }

        debug!("fetched {} events", events.len());
        Ok(events)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use tokio::net::TcpListener;

    use super::*;

    /// Serve `app` on an ephemeral local port and return its base URL.
    pub(crate) async fn spawn_app(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// A URL nothing is listening on.
    pub(crate) async fn dead_endpoint() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/events")
    }

    #[tokio::test]
    async fn test_fetch_events() {
        let app = Router::new().route(
            "/events",
            get(|| async {
                r#"[{"id":"1","name":"Park cleanup","dateTime":"2099-01-01T00:00:00Z",
                    "position":{"latitude":1.0,"longitude":1.0}}]"#
            }),
        );
        let base = spawn_app(app).await;

        let client = EventsClient::new(format!("{base}/events")).unwrap();
        let events = client.fetch_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Park cleanup");
    }

    #[tokio::test]
    async fn test_error_status_is_api_error() {
        let app = Router::new().route(
            "/events",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = spawn_app(app).await;

        let client = EventsClient::new(format!("{base}/events")).unwrap();
        let err = client.fetch_events().await.unwrap_err();
        assert!(matches!(err, EventMapError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let app = Router::new().route("/events", get(|| async { "<html>not json</html>" }));
        let base = spawn_app(app).await;

        let client = EventsClient::new(format!("{base}/events")).unwrap();
        let err = client.fetch_events().await.unwrap_err();
        assert!(matches!(err, EventMapError::Parse(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        let client = EventsClient::new(dead_endpoint().await).unwrap();
        let err = client.fetch_events().await.unwrap_err();
        assert!(matches!(err, EventMapError::Http(_)));
    }
}
