//! Cloud Map client configuration.

use serde::{Deserialize, Serialize};

/// Credentials source for AWS authentication.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialsSource {
    /// Use AWS profile from ~/.aws/credentials.
    Profile(String),
    /// Use explicit credentials.
    Explicit {
        access_key_id: String,
        secret_access_key: String,
        session_token: Option<String>,
    },
    /// Auto-detect credentials (default AWS SDK chain).
    #[default]
    Auto,
}

/// Configuration for the Cloud Map client.
///
/// Held immutably for the lifetime of the client; the values are passed
/// through verbatim to the AWS SDK config loader at construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CloudMapConfig {
    /// AWS region.
    pub region: Option<String>,
    /// Credentials source.
    #[serde(default)]
    pub credentials: CredentialsSource,
    /// Custom endpoint URL (for LocalStack and friends).
    pub endpoint_url: Option<String>,
    /// Registry API version pin. The Rust SDK pins its own wire version, so
    /// this is accepted for config-file compatibility but not forwarded.
    pub api_version: Option<String>,
}

impl CloudMapConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder.
    pub fn builder() -> CloudMapConfigBuilder {
        CloudMapConfigBuilder::new()
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> CloudMapConfigBuilder {
        let mut builder = CloudMapConfigBuilder::new();

        if let Ok(region) = std::env::var("AWS_REGION") {
            builder = builder.region(region);
        } else if let Ok(region) = std::env::var("AWS_DEFAULT_REGION") {
            builder = builder.region(region);
        }

        if let Ok(endpoint) = std::env::var("AWS_ENDPOINT_URL") {
            builder = builder.endpoint_url(endpoint);
        }

        builder
    }
}

/// Builder for Cloud Map configuration.
#[derive(Default)]
pub struct CloudMapConfigBuilder {
    config: CloudMapConfig,
}

impl CloudMapConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the AWS region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.config.region = Some(region.into());
        self
    }

    /// Set the credentials source.
    pub fn credentials(mut self, credentials: CredentialsSource) -> Self {
        self.config.credentials = credentials;
        self
    }

    /// Use explicit credentials.
    pub fn explicit_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.config.credentials = CredentialsSource::Explicit {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        };
        self
    }

    /// Use a named profile.
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.config.credentials = CredentialsSource::Profile(profile.into());
        self
    }

    /// Set a custom endpoint URL (for LocalStack and friends).
    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint_url = Some(url.into());
        self
    }

    /// Configure for LocalStack.
    pub fn localstack(self) -> Self {
        self.endpoint_url("http://localhost:4566")
    }

    /// Pin a registry API version string.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = Some(version.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> CloudMapConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = CloudMapConfig::builder()
            .region("us-east-1")
            .explicit_credentials("AKID", "SECRET")
            .api_version("latest")
            .build();

        assert_eq!(config.region.as_deref(), Some("us-east-1"));
        assert_eq!(config.api_version.as_deref(), Some("latest"));
        match config.credentials {
            CredentialsSource::Explicit {
                access_key_id,
                secret_access_key,
                session_token,
            } => {
                assert_eq!(access_key_id, "AKID");
                assert_eq!(secret_access_key, "SECRET");
                assert!(session_token.is_none());
            }
            other => panic!("unexpected credentials source: {other:?}"),
        }
    }

    #[test]
    fn test_localstack_endpoint() {
        let config = CloudMapConfig::builder().localstack().build();
        assert_eq!(
            config.endpoint_url.as_deref(),
            Some("http://localhost:4566")
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let config = CloudMapConfig::builder()
            .region("eu-west-1")
            .profile("staging")
            .endpoint_url("http://localhost:4566")
            .build();

        let json = serde_json::to_string(&config).unwrap();
        let parsed: CloudMapConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.region.as_deref(), Some("eu-west-1"));
        assert_eq!(
            parsed.endpoint_url.as_deref(),
            Some("http://localhost:4566")
        );
        match parsed.credentials {
            CredentialsSource::Profile(name) => assert_eq!(name, "staging"),
            other => panic!("unexpected credentials source: {other:?}"),
        }
    }

    #[test]
    fn test_default_is_auto() {
        let config = CloudMapConfig::new();
        assert!(matches!(config.credentials, CredentialsSource::Auto));
        assert!(config.region.is_none());
        assert!(config.endpoint_url.is_none());
    }
}
