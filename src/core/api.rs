/// HTTP client for the simulation service
///
/// Thin wrappers over five endpoints. No retries, no timeouts, no response
/// validation beyond JSON decoding: a failed call surfaces the HTTP client's
/// own error, including non-2xx statuses.

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::types::SystemMetrics;
use crate::utils::join_url;

pub const START_PATH: &str = "/simulation/start";
pub const STOP_PATH: &str = "/simulation/stop";
pub const METRICS_PATH: &str = "/metrics";
pub const REPORT_PATH: &str = "/report/generate";
pub const LOGS_PATH: &str = "/logs";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid service URL '{0}'")]
    InvalidBaseUrl(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// HTTP status of a rejected response, if that is what failed
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            ApiError::InvalidBaseUrl(_) => None,
        }
    }
}

/// The five service calls, abstracted so dashboard handlers can run against a mock
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SimulatorService: Send + Sync {
    async fn start_simulation(&self) -> anyhow::Result<Value>;
    async fn stop_simulation(&self) -> anyhow::Result<Value>;
    async fn get_metrics(&self) -> anyhow::Result<SystemMetrics>;
    async fn generate_report(&self) -> anyhow::Result<Value>;
    async fn get_logs(&self) -> anyhow::Result<Vec<String>>;
}

#[derive(Debug, Clone)]
pub struct SimulatorApi {
    client: Client,
    base_url: String,
}

impl SimulatorApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed)
            .map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            client: Client::new(),
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call<T: DeserializeOwned>(&self, method: Method, path: &str) -> Result<T, ApiError> {
        let url = join_url(&self.base_url, path);
        debug!(%method, path, "calling simulation service");

        let response = self.client
            .request(method, &url)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<T>().await?)
    }

    /// POST /simulation/start
    pub async fn start_simulation(&self) -> Result<Value, ApiError> {
        self.call(Method::POST, START_PATH).await
    }

    /// POST /simulation/stop
    pub async fn stop_simulation(&self) -> Result<Value, ApiError> {
        self.call(Method::POST, STOP_PATH).await
    }

    /// GET /metrics
    pub async fn get_metrics(&self) -> Result<SystemMetrics, ApiError> {
        self.call(Method::GET, METRICS_PATH).await
    }

    /// POST /report/generate
    pub async fn generate_report(&self) -> Result<Value, ApiError> {
        self.call(Method::POST, REPORT_PATH).await
    }

    /// GET /logs
    pub async fn get_logs(&self) -> Result<Vec<String>, ApiError> {
        self.call(Method::GET, LOGS_PATH).await
    }
}

#[async_trait]
impl SimulatorService for SimulatorApi {
    async fn start_simulation(&self) -> anyhow::Result<Value> {
        Ok(SimulatorApi::start_simulation(self).await?)
    }

    async fn stop_simulation(&self) -> anyhow::Result<Value> {
        Ok(SimulatorApi::stop_simulation(self).await?)
    }

    async fn get_metrics(&self) -> anyhow::Result<SystemMetrics> {
        Ok(SimulatorApi::get_metrics(self).await?)
    }

    async fn generate_report(&self) -> anyhow::Result<Value> {
        Ok(SimulatorApi::generate_report(self).await?)
    }

    async fn get_logs(&self) -> anyhow::Result<Vec<String>> {
        Ok(SimulatorApi::get_logs(self).await?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::{
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Serve `router` under /api on an ephemeral port and return the base URL
    pub(crate) async fn spawn_stub(router: Router) -> String {
        let app = Router::new().nest("/api", router);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/api", addr)
    }

    pub(crate) fn stub_router(hits: Arc<AtomicUsize>) -> Router {
        let start_hits = hits.clone();
        let stop_hits = hits.clone();
        let report_hits = hits;

        Router::new()
            .route("/simulation/start", post(move || {
                start_hits.fetch_add(1, Ordering::SeqCst);
                async { Json(json!({"status": "started"})) }
            }))
            .route("/simulation/stop", post(move || {
                stop_hits.fetch_add(1, Ordering::SeqCst);
                async { Json(json!({"status": "stopped"})) }
            }))
            .route("/metrics", get(|| async {
                Json(json!({"cpu": 42.0, "memory": 63.5, "disk": 10.0, "network": 1.25}))
            }))
            .route("/report/generate", post(move || {
                report_hits.fetch_add(1, Ordering::SeqCst);
                async { Json(json!({"timestamp": "2024-01-01T00:00:00", "security_events": []})) }
            }))
            .route("/logs", get(|| async {
                Json(json!(["first line", "second line", "third line"]))
            }))
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(SimulatorApi::new("not a url"), Err(ApiError::InvalidBaseUrl(_))));
        assert!(matches!(SimulatorApi::new("ftp://host/api"), Err(ApiError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let api = SimulatorApi::new("http://localhost:5000/api/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:5000/api");
    }

    #[tokio::test]
    async fn test_simulation_calls_hit_endpoints() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = spawn_stub(stub_router(hits.clone())).await;
        let api = SimulatorApi::new(&base).unwrap();

        let started = api.start_simulation().await.unwrap();
        assert_eq!(started["status"], "started");

        let stopped = api.stop_simulation().await.unwrap();
        assert_eq!(stopped["status"], "stopped");

        let report = api.generate_report().await.unwrap();
        assert!(report.get("security_events").is_some());

        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_metrics_and_logs_decode() {
        let base = spawn_stub(stub_router(Arc::new(AtomicUsize::new(0)))).await;
        let api = SimulatorApi::new(&base).unwrap();

        let metrics = api.get_metrics().await.unwrap();
        assert_eq!(metrics, SystemMetrics { cpu: 42.0, memory: 63.5, disk: 10.0, network: 1.25 });

        let logs = api.get_logs().await.unwrap();
        assert_eq!(logs, vec!["first line", "second line", "third line"]);
    }

    #[tokio::test]
    async fn test_wrong_method_is_not_routed() {
        // GET on a POST-only route must fail: the client never swaps methods
        let base = spawn_stub(Router::new().route("/metrics", post(|| async { Json(json!({})) }))).await;
        let api = SimulatorApi::new(&base).unwrap();

        let err = api.get_metrics().await.unwrap_err();
        assert_eq!(err.status(), Some(405));
    }

    #[tokio::test]
    async fn test_server_error_surfaces_status() {
        let router = Router::new().route(
            "/simulation/start",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = spawn_stub(router).await;
        let api = SimulatorApi::new(&base).unwrap();

        let err = api.start_simulation().await.unwrap_err();
        assert!(matches!(err, ApiError::Http(_)));
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_malformed_metrics_is_an_error() {
        let router = Router::new().route("/metrics", get(|| async { Json(json!({"cpu": "high"})) }));
        let base = spawn_stub(router).await;
        let api = SimulatorApi::new(&base).unwrap();

        let err = api.get_metrics().await.unwrap_err();
        assert!(matches!(err, ApiError::Http(_)));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_error() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = SimulatorApi::new(&format!("http://{}/api", addr)).unwrap();
        let service: &dyn SimulatorService = &api;
        assert!(service.get_logs().await.is_err());
    }
}
