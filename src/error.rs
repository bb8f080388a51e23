use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

/// Failure taxonomy for the dashboard pipelines. Messages are surfaced
/// verbatim to the caller; nothing is retried or recovered internally.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    MissingKey(String),

    #[error("{0}")]
    Execution(String),

    #[error("malformed response from {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl DashboardError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Config(_) => 500,
            Self::NotFound(_) => 404,
            Self::MissingKey(_) => 502,
            Self::Execution(_) => 502,
            Self::Decode { .. } => 502,
            Self::Transport(_) => 502,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_err() -> DashboardError {
        let source = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        DashboardError::Decode {
            context: "analytics lookup".into(),
            source,
        }
    }

    // ── http_status: variant coverage ─────────────────────────────

    #[test]
    fn http_status_config() {
        assert_eq!(DashboardError::Config("x".into()).http_status(), 500);
    }

    #[test]
    fn http_status_not_found() {
        assert_eq!(DashboardError::NotFound("x".into()).http_status(), 404);
    }

    #[test]
    fn http_status_missing_key() {
        assert_eq!(DashboardError::MissingKey("x".into()).http_status(), 502);
    }

    #[test]
    fn http_status_execution() {
        assert_eq!(DashboardError::Execution("x".into()).http_status(), 502);
    }

    #[test]
    fn http_status_decode() {
        assert_eq!(decode_err().http_status(), 502);
    }

    // ── Display ──────────────────────────────────────────────────

    #[test]
    fn display_passes_backend_messages_through() {
        assert_eq!(DashboardError::NotFound("nope".into()).to_string(), "nope");
        assert_eq!(
            DashboardError::Execution("bad params".into()).to_string(),
            "bad params"
        );
        assert_eq!(
            DashboardError::MissingKey("analytics key not found for: x".into()).to_string(),
            "analytics key not found for: x"
        );
    }

    #[test]
    fn display_config() {
        let e = DashboardError::Config("graph key not configured".into());
        assert_eq!(e.to_string(), "configuration error: graph key not configured");
    }

    #[test]
    fn display_decode_names_the_call() {
        assert!(decode_err()
            .to_string()
            .starts_with("malformed response from analytics lookup:"));
    }
}
