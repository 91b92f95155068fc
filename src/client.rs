//! AWS Cloud Map client.

use async_trait::async_trait;
use aws_sdk_servicediscovery::types::{
    FilterCondition, HealthStatusFilter, HttpInstanceSummary, Namespace, Service, ServiceFilter,
    ServiceFilterName, ServiceSummary,
};
use tracing::{debug, info};

use crate::config::{CloudMapConfig, CredentialsSource};
use crate::error::{DiscoveryError, Result};
use crate::registry::{CloudMapApi, SERVICE_PAGE_SIZE};

/// Cloud Map registry client.
///
/// Holds one long-lived `aws-sdk-servicediscovery` client built at
/// construction from a [`CloudMapConfig`]; every operation issues a single
/// remote call through it. Transport faults propagate unmodified as
/// [`DiscoveryError::Api`].
pub struct CloudMapClient {
    config: CloudMapConfig,
    client: aws_sdk_servicediscovery::Client,
}

impl CloudMapClient {
    /// Create a new client from configuration.
    pub async fn new(config: CloudMapConfig) -> Self {
        let sdk_config = build_sdk_config(&config).await;
        let client = aws_sdk_servicediscovery::Client::new(&sdk_config);

        info!(
            region = ?sdk_config.region(),
            endpoint = ?config.endpoint_url,
            "Cloud Map client initialized"
        );

        Self { config, client }
    }

    /// Get the configuration.
    pub fn config(&self) -> &CloudMapConfig {
        &self.config
    }

    /// Get the underlying SDK client.
    pub fn sdk_client(&self) -> &aws_sdk_servicediscovery::Client {
        &self.client
    }
}

/// Build AWS SDK configuration from the crate configuration.
async fn build_sdk_config(config: &CloudMapConfig) -> aws_config::SdkConfig {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

    if let Some(region) = &config.region {
        loader = loader.region(aws_config::Region::new(region.clone()));
    }

    match &config.credentials {
        CredentialsSource::Profile(profile) => {
            loader = loader.profile_name(profile);
        }
        CredentialsSource::Explicit {
            access_key_id,
            secret_access_key,
            session_token,
        } => {
            let creds = aws_credential_types::Credentials::new(
                access_key_id,
                secret_access_key,
                session_token.clone(),
                None,
                "explicit",
            );
            loader = loader.credentials_provider(creds);
        }
        CredentialsSource::Auto => {
            // Default credential chain.
        }
    }

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}

#[async_trait]
impl CloudMapApi for CloudMapClient {
    async fn get_namespace(&self, namespace_id: &str) -> Result<Option<Namespace>> {
        let output = self
            .client
            .get_namespace()
            .id(namespace_id)
            .send()
            .await
            .map_err(aws_sdk_servicediscovery::Error::from)?;

        Ok(output.namespace)
    }

    async fn list_services(&self, namespace_id: &str) -> Result<Vec<ServiceSummary>> {
        let filter = ServiceFilter::builder()
            .name(ServiceFilterName::NamespaceId)
            .values(namespace_id)
            .condition(FilterCondition::Eq)
            .build()
            .map_err(|e| DiscoveryError::InvalidConfiguration(e.to_string()))?;

        let output = self
            .client
            .list_services()
            .filters(filter)
            .max_results(SERVICE_PAGE_SIZE)
            .send()
            .await
            .map_err(aws_sdk_servicediscovery::Error::from)?;

        let services = output.services.unwrap_or_default();
        debug!(
            namespace_id,
            count = services.len(),
            "Listed services for namespace"
        );
        Ok(services)
    }

    async fn get_service(&self, service_id: &str) -> Result<Option<Service>> {
        let output = self
            .client
            .get_service()
            .id(service_id)
            .send()
            .await
            .map_err(aws_sdk_servicediscovery::Error::from)?;

        Ok(output.service)
    }

    async fn discover_instances(
        &self,
        namespace_name: &str,
        service_name: &str,
        status: HealthStatusFilter,
        max_results: i32,
    ) -> Result<Vec<HttpInstanceSummary>> {
        let output = self
            .client
            .discover_instances()
            .namespace_name(namespace_name)
            .service_name(service_name)
            .health_status(status)
            .max_results(max_results)
            .send()
            .await
            .map_err(aws_sdk_servicediscovery::Error::from)?;

        let instances = output.instances.unwrap_or_default();
        debug!(
            namespace_name,
            service_name,
            count = instances.len(),
            "Discovered instances"
        );
        Ok(instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        let config = CloudMapConfig::builder()
            .region("us-east-1")
            .explicit_credentials("AKID", "SECRET")
            .localstack()
            .build();

        let client = CloudMapClient::new(config).await;
        assert_eq!(client.config().region.as_deref(), Some("us-east-1"));
        assert_eq!(
            client.config().endpoint_url.as_deref(),
            Some("http://localhost:4566")
        );
    }
}
