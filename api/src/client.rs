use crate::view::FestData;
use crate::wire::RawPayload;
use chrono::Utc;
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

/// Read-only client for the festival sheet endpoint.
#[derive(Debug, Clone)]
pub struct FestApi {
    client: Client,
    endpoint: Option<String>,
    timeout: Duration,
}

impl Default for FestApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("festui/0.1 (terminal standings viewer)")
                .build()
                .unwrap_or_default(),
            endpoint: None,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl FestApi {
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            endpoint: endpoint.filter(|e| !e.trim().is_empty()),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Fetch and normalize one full snapshot of the sheet.
    pub async fn fetch_snapshot(&self) -> ApiResult<FestData> {
        let raw = self.fetch_payload().await?;
        let mut data = FestData::from_payload(&raw);
        data.fetched_at = Some(Utc::now());
        Ok(data)
    }

    /// Fetch the raw payload without normalizing it.
    pub async fn fetch_payload(&self) -> ApiResult<RawPayload> {
        let url = self
            .endpoint
            .as_deref()
            .ok_or_else(|| ApiError::NotFound("no data endpoint configured".into()))?;
        self.get(url).await
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MedalRow;
    use crate::rank::MedalSort;

    async fn api_for(server: &mockito::ServerGuard) -> FestApi {
        FestApi::new(Some(format!("{}/exec", server.url()))).with_timeout(Duration::from_secs(5))
    }

    #[tokio::test]
    async fn fetch_snapshot_normalizes_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/exec")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "standings": [{"Sport": "Football", "Team": "X", "P": "4", "W": "3", "L": "1", "Pts": "9"}],
                    "medals": {"X": {"gold": 2, "silver": 1, "bronze": 0}}
                }"#,
            )
            .create_async()
            .await;

        let data = api_for(&server).await.fetch_snapshot().await.expect("snapshot");
        mock.assert_async().await;

        assert_eq!(data.standings["football"][0].points, 9);
        assert_eq!(data.medal_table(MedalSort::Gold), vec![MedalRow::new("X", 2, 1, 0)]);
        assert!(data.fetched_at.is_some());
    }

    #[tokio::test]
    async fn empty_object_is_an_empty_snapshot() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/exec")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let data = api_for(&server).await.fetch_snapshot().await.expect("snapshot");
        assert!(data.is_empty());
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/exec")
            .with_status(200)
            .with_body("<html>Sign in to continue</html>")
            .create_async()
            .await;

        let err = api_for(&server).await.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, ApiError::Parsing(..)), "got {err}");
    }

    #[tokio::test]
    async fn server_error_is_an_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/exec")
            .with_status(500)
            .create_async()
            .await;

        let err = api_for(&server).await.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, ApiError::Api(..)), "got {err}");
    }

    #[tokio::test]
    async fn missing_endpoint_is_not_found() {
        let err = FestApi::new(Some("  ".into())).fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let api = FestApi::new(Some("http://127.0.0.1:9/exec".into()))
            .with_timeout(Duration::from_secs(2));
        let err = api.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(..)), "got {err}");
    }
}
