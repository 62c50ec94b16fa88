//! Error types for topology, path computation and discovery operations

use thiserror::Error;

use crate::domain::{LabelError, NetworkError};

/// Errors surfaced synchronously by the topology store and path computation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// Malformed label, range or request
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown network or port reference
    #[error("Not found: {0}")]
    NotFound(String),

    /// Label-feasible paths existed but none had the requested bandwidth
    #[error("Bandwidth unavailable: {feasible} feasible path(s), none with {requested} Mbps")]
    BandwidthUnavailable { requested: u64, feasible: usize },
}

/// Result type for topology operations
pub type TopologyResult<T> = Result<T, TopologyError>;

impl From<LabelError> for TopologyError {
    fn from(err: LabelError) -> Self {
        TopologyError::Validation(err.to_string())
    }
}

impl From<NetworkError> for TopologyError {
    fn from(err: NetworkError) -> Self {
        TopologyError::Validation(err.to_string())
    }
}

/// Peer-scoped discovery failures; logged by the fetcher, never propagated
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection or protocol failure
    #[error("Transport error fetching {url}: {reason}")]
    Transport { url: String, reason: String },

    /// No response within the per-request timeout
    #[error("Timed out fetching {url} after {after_secs}s")]
    Timeout { url: String, after_secs: u64 },

    /// Non-success HTTP status
    #[error("HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    /// Malformed discovery document
    #[error("Malformed discovery document: {0}")]
    Parse(String),

    /// Document lists no CS2 interface to register a provider against
    #[error("Discovery document for {nsa_id} has no CS2 interface")]
    MissingProviderInterface { nsa_id: String },
}

/// Result type for discovery operations
pub type FetchResult<T> = Result<T, FetchError>;

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid JSON for the schema
    #[error("Cannot parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration parsed but violates a constraint
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<LabelError> for ConfigError {
    fn from(err: LabelError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

impl From<NetworkError> for ConfigError {
    fn from(err: NetworkError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

impl From<TopologyError> for ConfigError {
    fn from(err: TopologyError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

/// Failures at the link activation seam
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Port or VLAN that a backend cannot be asked to configure
    #[error("Invalid link target: {0}")]
    InvalidTarget(String),

    /// Backend refused or failed to apply a change
    #[error("Link activation failed: {0}")]
    Activation(String),
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;
