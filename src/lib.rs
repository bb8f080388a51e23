//! graphdash — dashboard for named analytics queries and actions.
//!
//! This crate provides:
//! - A client for the graph workspace REST API (name lookup + execute)
//! - Typed result shapes for analytics and action payloads
//! - Display formatting helpers for dashboard cells
//! - An optional axum server that hosts the single-page dashboard

pub mod client;
pub mod config;
pub mod error;
pub mod format;

pub use client::{AnalyticsData, DataClient, HttpDataClient, OperationKind};
pub use config::AppConfig;
pub use error::{DashboardError, Result};
