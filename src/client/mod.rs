//! Backend API client: name→key resolution and operation execution.
//!
//! This module provides:
//! - `DataClient` — the contract the presentation layer depends on
//! - `HttpDataClient` — reqwest implementation against the workspace REST API
//! - Wire and result types for the lookup/execute contract

pub mod http;
pub mod types;

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use http::HttpDataClient;
pub use types::{AnalyticsData, ExecuteResponse, OperationKind};

/// The sole boundary between the dashboard surface and the backend API.
/// Callers depend on this trait, never on the transport.
#[async_trait]
pub trait DataClient: Send + Sync {
    /// Resolve an analytics query by name and execute it.
    async fn fetch_analytics_data(
        &self,
        name: &str,
        params: HashMap<String, Value>,
    ) -> Result<AnalyticsData>;

    /// Resolve an action by name, execute it, and return its raw result.
    async fn fetch_action_data(
        &self,
        name: &str,
        params: HashMap<String, Value>,
    ) -> Result<Value>;
}
