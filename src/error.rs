//! Discovery error types.

use thiserror::Error;

/// Result type for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Service discovery errors.
///
/// A missing namespace, service, or instance list is never an error: lookups
/// report absence as `None` or an empty `Vec`. Only transport and backend
/// faults surface here, wrapped unmodified from the SDK — this crate adds no
/// retry or translation layer.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Cloud Map request failed at the transport or service level.
    #[error("Cloud Map request failed: {0}")]
    Api(#[from] aws_sdk_servicediscovery::Error),

    /// Invalid configuration or request input.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
