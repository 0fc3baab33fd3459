//! Directions HTTP client.
//!
//! Asks a Directions-style JSON API for driving routes between two
//! addresses, with alternatives, and turns the answer into candidate routes.

use chrono::{DateTime, Local, TimeZone};
use tracing::debug;

use crate::domain::CandidateRoute;

use super::RoutingService;
use super::convert::candidates_from_response;
use super::error::RoutingError;
use super::types::DirectionsResponse;

/// Default base URL for the Directions API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Local hour routes are requested for. Late evening keeps traffic from
/// steering the service toward unusual alternatives.
const DEFAULT_DEPARTURE_HOUR: u32 = 23;

/// Configuration for the Directions client.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// API key sent with every request
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Local hour of the requested departure time
    pub departure_hour: u32,
}

impl RoutingConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            departure_hour: DEFAULT_DEPARTURE_HOUR,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the local departure hour (0-23).
    pub fn with_departure_hour(mut self, hour: u32) -> Self {
        self.departure_hour = hour;
        self
    }
}

/// Directions API client.
#[derive(Debug, Clone)]
pub struct DirectionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    departure_hour: u32,
}

impl DirectionsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RoutingConfig) -> Result<Self, RoutingError> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(RoutingError::NotConfigured("API key is empty".to_string()));
        }
        if config.departure_hour > 23 {
            return Err(RoutingError::NotConfigured(format!(
                "departure hour {} is out of range",
                config.departure_hour
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            departure_hour: config.departure_hour,
        })
    }

    /// Fetch driving directions, with alternatives, between two addresses.
    pub async fn directions(
        &self,
        from: &str,
        to: &str,
    ) -> Result<DirectionsResponse, RoutingError> {
        let url = format!("{}/directions/json", self.base_url);

        let now = Local::now();
        let departure_time = next_departure_time(&now, self.departure_hour)
            .unwrap_or(now)
            .timestamp()
            .to_string();

        debug!(from, to, departure_time = %departure_time, "requesting directions");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("origin", from),
                ("destination", to),
                ("mode", "driving"),
                ("alternatives", "true"),
                ("language", "en"),
                ("departure_time", departure_time.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(RoutingError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutingError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RoutingError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| RoutingError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl RoutingService for DirectionsClient {
    async fn routes(&self, from: &str, to: &str) -> Result<Vec<CandidateRoute>, RoutingError> {
        let response = self.directions(from, to).await?;
        candidates_from_response(&response)
    }
}

/// The first `hour:00` strictly after `now`, in `now`'s time zone.
///
/// Returns `None` if `hour` is not a valid hour of the day.
pub fn next_departure_time<Tz: TimeZone>(now: &DateTime<Tz>, hour: u32) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    let mut date = now.date_naive();

    // A DST gap can swallow the hour, so look one day further.
    for _ in 0..3 {
        let naive = date.and_hms_opt(hour, 0, 0)?;
        if let Some(candidate) = tz.from_local_datetime(&naive).earliest()
            && candidate > *now
        {
            return Some(candidate);
        }
        date = date.succ_opt()?;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use axum::Router;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use chrono::Utc;

    use crate::domain::DistanceUnit;

    #[test]
    fn config_builder() {
        let config = RoutingConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(60)
            .with_departure_hour(22);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.departure_hour, 22);
    }

    #[test]
    fn config_defaults() {
        let config = RoutingConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.departure_hour, DEFAULT_DEPARTURE_HOUR);
    }

    #[test]
    fn client_creation() {
        assert!(DirectionsClient::new(RoutingConfig::new("test-key")).is_ok());
    }

    #[test]
    fn empty_key_rejected() {
        let result = DirectionsClient::new(RoutingConfig::new("  \n"));
        assert!(matches!(result, Err(RoutingError::NotConfigured(_))));
    }

    #[test]
    fn bad_departure_hour_rejected() {
        let result = DirectionsClient::new(RoutingConfig::new("k").with_departure_hour(24));
        assert!(matches!(result, Err(RoutingError::NotConfigured(_))));
    }

    #[test]
    fn departure_later_today() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        let next = next_departure_time(&now, 23).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 3, 15, 23, 0, 0).unwrap());
    }

    #[test]
    fn departure_rolls_to_tomorrow() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 23, 30, 0).unwrap();
        let next = next_departure_time(&now, 23).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 3, 16, 23, 0, 0).unwrap());

        // Exactly on the hour is not in the future
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 23, 0, 0).unwrap();
        let next = next_departure_time(&now, 23).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 3, 16, 23, 0, 0).unwrap());
    }

    #[test]
    fn departure_invalid_hour() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        assert!(next_departure_time(&now, 24).is_none());
    }

    /// Serve a fixed Directions body, echoing nothing but checking the query.
    async fn stub_server(body: serde_json::Value) -> String {
        let app = Router::new().route(
            "/directions/json",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let body = body.clone();
                async move {
                    assert_eq!(params.get("mode").map(String::as_str), Some("driving"));
                    assert_eq!(params.get("alternatives").map(String::as_str), Some("true"));
                    assert_eq!(params.get("key").map(String::as_str), Some("test-key"));
                    assert!(params.contains_key("departure_time"));
                    axum::Json(body)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn routes_from_stub_server() {
        let base = stub_server(serde_json::json!({
            "status": "OK",
            "routes": [
                {"legs": [{"distance": {"text": "12.3 km", "value": 12312}}]},
                {"legs": [{"distance": {"text": "950 m", "value": 950}}]}
            ]
        }))
        .await;

        let client =
            DirectionsClient::new(RoutingConfig::new("test-key").with_base_url(base)).unwrap();
        let routes = client.routes("1 Main St", "2 Oak Ave").await.unwrap();

        assert_eq!(
            routes,
            vec![
                CandidateRoute::km(12.3),
                CandidateRoute::new(950.0, DistanceUnit::Metres)
            ]
        );
    }

    #[tokio::test]
    async fn denied_key_from_stub_server() {
        let base = stub_server(serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        }))
        .await;

        let client =
            DirectionsClient::new(RoutingConfig::new("test-key").with_base_url(base)).unwrap();
        let result = client.routes("1 Main St", "2 Oak Ave").await;

        assert!(matches!(result, Err(RoutingError::Unauthorized)));
    }

    /// Answer every request with a fixed HTTP status and raw body.
    async fn status_server(status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route(
            "/directions/json",
            get(move || async move { (status, body) }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    async fn routes_via(base: String) -> Result<Vec<CandidateRoute>, RoutingError> {
        let client =
            DirectionsClient::new(RoutingConfig::new("test-key").with_base_url(base)).unwrap();
        client.routes("1 Main St", "2 Oak Ave").await
    }

    #[tokio::test]
    async fn http_unauthorized_and_forbidden() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let base = status_server(status, "denied").await;
            assert!(matches!(
                routes_via(base).await,
                Err(RoutingError::Unauthorized)
            ));
        }
    }

    #[tokio::test]
    async fn http_too_many_requests() {
        let base = status_server(StatusCode::TOO_MANY_REQUESTS, "slow down").await;
        assert!(matches!(
            routes_via(base).await,
            Err(RoutingError::RateLimited)
        ));
    }

    #[tokio::test]
    async fn http_server_error_keeps_status_and_body() {
        let base = status_server(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
        match routes_via(base).await {
            Err(RoutingError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_json_error() {
        let base = status_server(StatusCode::OK, "<html>maintenance</html>").await;
        match routes_via(base).await {
            Err(RoutingError::Json { body, .. }) => {
                assert_eq!(body.as_deref(), Some("<html>maintenance</html>"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn over_query_limit_from_stub_server() {
        let base = stub_server(serde_json::json!({
            "status": "OVER_QUERY_LIMIT",
            "error_message": "You have exceeded your daily request quota."
        }))
        .await;

        assert!(matches!(
            routes_via(base).await,
            Err(RoutingError::RateLimited)
        ));
    }
}
