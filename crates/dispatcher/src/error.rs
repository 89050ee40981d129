//! Publish error types

use contracts::ContractError;
use thiserror::Error;

/// Publisher-specific errors
#[derive(Debug, Error)]
pub enum PublishError {
    /// Missing or mistyped configuration, or absent input
    #[error("configuration error: {0}")]
    Config(#[from] ContractError),

    /// Document could not be encoded as JSON
    #[error("failed to serialize metric {namespace}: {source}")]
    Serialization {
        namespace: String,
        #[source]
        source: serde_json::Error,
    },

    /// Destination unreachable
    #[error("unable to reach destination for metric {namespace}: {message}")]
    Transport { namespace: String, message: String },

    /// Destination answered outside {200, 201}
    #[error("Unable to publish metric {namespace}, status: {status}")]
    Status { namespace: String, status: u16 },

    /// Send task panicked or was cancelled before reporting
    #[error("publish task did not complete: {message}")]
    Task { message: String },
}

impl PublishError {
    /// Whether the call was rejected before any HTTP activity
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Namespace of the failed metric, when the error is scoped to one
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::Serialization { namespace, .. }
            | Self::Transport { namespace, .. }
            | Self::Status { namespace, .. } => Some(namespace),
            Self::Config(_) | Self::Task { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = PublishError::Status {
            namespace: "a/b".into(),
            status: 400,
        };
        assert_eq!(err.to_string(), "Unable to publish metric a/b, status: 400");
        assert_eq!(err.namespace(), Some("a/b"));
        assert!(!err.is_config());
    }

    #[test]
    fn test_config_from_contract() {
        let err: PublishError = ContractError::config_missing("port").into();
        assert!(err.is_config());
        assert_eq!(err.namespace(), None);
    }
}
