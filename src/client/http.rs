//! HTTP implementation of the data client.
//!
//! Every operation is a strict two-step flow: resolve the human-readable name
//! to an opaque key, then execute with that key. The key lives for a single
//! request; nothing is cached and nothing is retried.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::types::{
    AnalyticsData, ErrorBody, ExecuteRequest, ExecuteResponse, LookupResponse, OperationKind,
};
use super::DataClient;
use crate::config::AppConfig;
use crate::error::{DashboardError, Result};

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug)]
pub struct HttpDataClient {
    http: Client,
    config: AppConfig,
}

impl HttpDataClient {
    /// Create a client over the configured API base. The base must be an
    /// absolute `http(s)://` URL; the platform-relative default `/api` only
    /// makes sense for in-browser callers.
    pub fn new(config: AppConfig) -> Result<Self> {
        if !config.api_base_url.starts_with("http://")
            && !config.api_base_url.starts_with("https://")
        {
            return Err(DashboardError::Config(format!(
                "api base url must be absolute, got '{}'",
                config.api_base_url
            )));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(DashboardError::Transport)?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url.trim_end_matches('/'), path)
    }

    /// Graph key precondition, checked before any network call.
    fn require_graph_key(&self) -> Result<&str> {
        let graph_key = self.config.graph_key.as_str();
        if graph_key.is_empty() {
            return Err(DashboardError::Config("graph key not configured".into()));
        }
        Ok(graph_key)
    }

    /// Step 1: look an operation up by name to get its execution key.
    async fn resolve(&self, kind: OperationKind, name: &str, graph_key: &str) -> Result<String> {
        let url = self.endpoint(&format!(
            "/{}/by-name/{}?graphKey={}",
            kind.path_segment(),
            percent_encode(name),
            percent_encode(graph_key)
        ));

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            return Err(DashboardError::NotFound(body.message.unwrap_or_else(
                || format!("{} not found: {}", kind.label(), name),
            )));
        }

        let text = response.text().await?;
        let metadata: LookupResponse =
            serde_json::from_str(&text).map_err(|source| DashboardError::Decode {
                context: format!("{} lookup", kind.label()),
                source,
            })?;

        match metadata.key {
            Some(key) if !key.is_empty() => {
                tracing::debug!(kind = %kind, name, key = %key, "resolved operation");
                Ok(key)
            }
            _ => Err(DashboardError::MissingKey(format!(
                "{} key not found for: {}",
                kind.label(),
                name
            ))),
        }
    }

    /// Step 2: execute with the resolved key and the caller's parameter bag.
    async fn execute(
        &self,
        kind: OperationKind,
        key: &str,
        params: &HashMap<String, Value>,
    ) -> Result<ExecuteResponse> {
        let url = self.endpoint(&format!(
            "/{}/{}/execute",
            kind.path_segment(),
            percent_encode(key)
        ));

        let response = self
            .http
            .post(&url)
            .json(&ExecuteRequest { parameters: params })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body: ErrorBody = response.json().await.unwrap_or_default();
            tracing::warn!(kind = %kind, key, %status, "execute request failed");
            return Err(DashboardError::Execution(body.message.unwrap_or_else(
                || format!("failed to execute {}", kind.label()),
            )));
        }

        let text = response.text().await?;
        let raw: ExecuteResponse =
            serde_json::from_str(&text).map_err(|source| DashboardError::Decode {
                context: format!("{} execute", kind.label()),
                source,
            })?;

        if !raw.success {
            return Err(DashboardError::Execution(raw.error.unwrap_or_else(|| {
                format!("{} execution failed", kind.label())
            })));
        }

        Ok(raw)
    }
}

#[async_trait]
impl DataClient for HttpDataClient {
    async fn fetch_analytics_data(
        &self,
        name: &str,
        params: HashMap<String, Value>,
    ) -> Result<AnalyticsData> {
        let graph_key = self.require_graph_key()?;
        let key = self.resolve(OperationKind::Analytics, name, graph_key).await?;
        let raw = self.execute(OperationKind::Analytics, &key, &params).await?;
        Ok(AnalyticsData::from_response(raw))
    }

    async fn fetch_action_data(
        &self,
        name: &str,
        params: HashMap<String, Value>,
    ) -> Result<Value> {
        let graph_key = self.require_graph_key()?;
        let key = self.resolve(OperationKind::Action, name, graph_key).await?;
        let raw = self.execute(OperationKind::Action, &key, &params).await?;
        Ok(raw.result.unwrap_or(Value::Null))
    }
}

/// RFC 3986 component encoding for names, keys, and the graph key.
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("daily revenue"), "daily%20revenue");
        assert_eq!(percent_encode("a/b?c=d&e"), "a%2Fb%3Fc%3Dd%26e");
        assert_eq!(percent_encode("plain-name_1.0~x"), "plain-name_1.0~x");
        // Multi-byte characters are encoded per UTF-8 byte.
        assert_eq!(percent_encode("매출"), "%EB%A7%A4%EC%B6%9C");
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = HttpDataClient::new(AppConfig {
            api_base_url: "http://localhost:8081/api/".into(),
            ..AppConfig::default()
        })
        .unwrap();
        assert_eq!(
            client.endpoint("/analytics/by-name/x"),
            "http://localhost:8081/api/analytics/by-name/x"
        );
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let err = HttpDataClient::new(AppConfig::default()).unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
        assert!(err.to_string().contains("/api"));
    }
}
