//! Client for the Splunk management REST API.
//!
//! All endpoints are called with `output_mode=json`. Searches run in
//! oneshot mode so results come back in the response body without job
//! polling.

use std::time::Duration;

use serde::Deserialize;

use crate::config::SplunkConfig;
use crate::error::SiemError;

/// Server identity as reported by `/services/server/info`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerInfo {
    /// Splunk server name.
    #[serde(rename = "serverName", default)]
    pub server_name: String,
    /// Splunk version string.
    #[serde(default)]
    pub version: String,
    /// Build identifier.
    #[serde(default)]
    pub build: String,
}

/// One entry of a Splunk collection response.
#[derive(Debug, Clone, Deserialize)]
struct Entry<T> {
    #[serde(default)]
    name: String,
    content: T,
}

/// Envelope for Splunk collection endpoints.
#[derive(Debug, Clone, Deserialize)]
struct Collection<T> {
    #[serde(default = "Vec::new")]
    entry: Vec<Entry<T>>,
}

/// Parameters for a oneshot search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// SPL query. A bare query is prefixed with `search ` automatically.
    pub query: String,
    /// Earliest event time, e.g. `-24h`.
    pub earliest: String,
    /// Latest event time, e.g. `now`.
    pub latest: String,
    /// Maximum number of results to return.
    pub max_count: u32,
}

impl SearchRequest {
    /// Build a request with the default 24-hour window and 100-result cap.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            earliest: "-24h".to_string(),
            latest: "now".to_string(),
            max_count: 100,
        }
    }

    /// The SPL to submit. Splunk requires a leading command, so bare
    /// queries get `search ` prepended; pipelines starting with `|` and
    /// explicit `search ...` queries pass through unchanged.
    fn spl(&self) -> String {
        let trimmed = self.query.trim();
        if trimmed.starts_with('|') || trimmed.starts_with("search ") {
            trimmed.to_string()
        } else {
            format!("search {trimmed}")
        }
    }
}

/// Results of a oneshot search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    /// Result rows as field-to-value maps.
    #[serde(default)]
    pub results: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// Client for a Splunk management endpoint.
#[derive(Debug, Clone)]
pub struct SplunkClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl SplunkClient {
    /// Create a client from configuration.
    pub fn new(config: SplunkConfig) -> Result<Self, SiemError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.verify_tls)
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    reqwest::header::HeaderValue::from_str(&format!("Bearer {}", config.token))
                        .map_err(|_| {
                            SiemError::Config(crate::config::ConfigError::InvalidToken)
                        })?,
                );
                headers
            })
            .build()
            .map_err(|e| SiemError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch server identity. Used as a connectivity check.
    ///
    /// Calls `GET {base_url}/services/server/info`.
    pub async fn server_info(&self) -> Result<ServerInfo, SiemError> {
        let endpoint = "GET /services/server/info";
        let url = format!("{}services/server/info?output_mode=json", self.base_url);

        let resp = self.http.get(&url).send().await.map_err(|e| SiemError::Http {
            endpoint: endpoint.into(),
            source: e,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(SiemError::ApiError {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        let collection: Collection<ServerInfo> =
            resp.json().await.map_err(|e| SiemError::Deserialization {
                endpoint: endpoint.into(),
                source: e,
            })?;

        collection
            .entry
            .into_iter()
            .next()
            .map(|entry| entry.content)
            .ok_or_else(|| SiemError::ApiError {
                endpoint: endpoint.into(),
                status: 200,
                body: "empty server info response".to_string(),
            })
    }

    /// List index names visible to the token.
    ///
    /// Calls `GET {base_url}/services/data/indexes`.
    pub async fn list_indexes(&self) -> Result<Vec<String>, SiemError> {
        let endpoint = "GET /services/data/indexes";
        let url = format!(
            "{}services/data/indexes?output_mode=json&count=0",
            self.base_url
        );

        let resp = self.http.get(&url).send().await.map_err(|e| SiemError::Http {
            endpoint: endpoint.into(),
            source: e,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(SiemError::ApiError {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        let collection: Collection<serde_json::Value> =
            resp.json().await.map_err(|e| SiemError::Deserialization {
                endpoint: endpoint.into(),
                source: e,
            })?;

        Ok(collection.entry.into_iter().map(|entry| entry.name).collect())
    }

    /// Run a oneshot search and return the result rows.
    ///
    /// Calls `POST {base_url}/services/search/jobs` with `exec_mode=oneshot`.
    pub async fn search(&self, req: &SearchRequest) -> Result<SearchResults, SiemError> {
        let endpoint = "POST /services/search/jobs";
        let url = format!("{}services/search/jobs", self.base_url);

        tracing::debug!(query = %req.query, earliest = %req.earliest, latest = %req.latest, "submitting oneshot search");

        let form = [
            ("search", req.spl()),
            ("exec_mode", "oneshot".to_string()),
            ("output_mode", "json".to_string()),
            ("earliest_time", req.earliest.clone()),
            ("latest_time", req.latest.clone()),
            ("count", req.max_count.to_string()),
        ];

        let resp = self
            .http
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| SiemError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(SiemError::ApiError {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| SiemError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> SplunkClient {
        let cfg = SplunkConfig::local_mock(&server.uri(), "test-token").unwrap();
        SplunkClient::new(cfg).unwrap()
    }

    #[test]
    fn header_invalid_token_reported_as_such() {
        let cfg = SplunkConfig::local_mock("http://127.0.0.1:9000", "bad\ntoken").unwrap();
        match SplunkClient::new(cfg) {
            Err(SiemError::Config(crate::config::ConfigError::InvalidToken)) => {}
            other => panic!("expected InvalidToken config error, got {other:?}"),
        }
    }

    #[test]
    fn bare_query_gets_search_prefix() {
        let req = SearchRequest::new("index=main sourcetype=syslog");
        assert_eq!(req.spl(), "search index=main sourcetype=syslog");

        let piped = SearchRequest::new("| tstats count where index=main by host");
        assert!(piped.spl().starts_with("| tstats"));

        let explicit = SearchRequest::new("search index=main");
        assert_eq!(explicit.spl(), "search index=main");
    }

    #[tokio::test]
    async fn server_info_parses_entry_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/server/info"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "entry": [{
                    "name": "server-info",
                    "content": {"serverName": "splunk-01", "version": "9.1.2", "build": "b6b9c8185839"}
                }]
            })))
            .mount(&server)
            .await;

        let info = client_for(&server).await.server_info().await.unwrap();
        assert_eq!(info.server_name, "splunk-01");
        assert_eq!(info.version, "9.1.2");
    }

    #[tokio::test]
    async fn list_indexes_returns_entry_names() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/data/indexes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "entry": [
                    {"name": "main", "content": {}},
                    {"name": "security", "content": {}}
                ]
            })))
            .mount(&server)
            .await;

        let indexes = client_for(&server).await.list_indexes().await.unwrap();
        assert_eq!(indexes, vec!["main", "security"]);
    }

    #[tokio::test]
    async fn search_submits_oneshot_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/search/jobs"))
            .and(body_string_contains("exec_mode=oneshot"))
            .and(body_string_contains("search+index%3Dmain"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {"host": "web-01", "count": "42"},
                    {"host": "web-02", "count": "7"}
                ]
            })))
            .mount(&server)
            .await;

        let results = client_for(&server)
            .await
            .search(&SearchRequest::new("index=main"))
            .await
            .unwrap();
        assert_eq!(results.results.len(), 2);
        assert_eq!(results.results[0]["host"], "web-01");
    }

    #[tokio::test]
    async fn non_success_status_becomes_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/server/info"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.server_info().await.unwrap_err();
        match err {
            SiemError::ApiError { status, .. } => assert_eq!(status, 401),
            other => panic!("unexpected error: {other}"),
        }
    }
}
