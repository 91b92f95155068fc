//! The Cloud Map registry capability.

use async_trait::async_trait;
use aws_sdk_servicediscovery::types::{
    HealthStatusFilter, HttpInstanceSummary, Namespace, Service, ServiceSummary,
};

use crate::error::Result;

/// Instance attribute carrying the IPv4 address.
pub const IPV4_ATTRIBUTE: &str = "AWS_INSTANCE_IPV4";

/// Instance attribute carrying the port.
pub const PORT_ATTRIBUTE: &str = "AWS_INSTANCE_PORT";

/// Fixed page size for service listings; no pagination past the first page.
pub const SERVICE_PAGE_SIZE: i32 = 20;

/// Default cap on discovered instances per call.
pub const DEFAULT_MAX_INSTANCES: i32 = 10;

/// The four remote registry operations this crate depends on.
///
/// Implemented by [`CloudMapClient`](crate::CloudMapClient) against the real
/// backend and by [`InMemoryRegistry`](crate::InMemoryRegistry) for tests.
/// Every method issues exactly one lookup and returns the unwrapped response
/// payload; an absent envelope field is `None` or an empty `Vec`, never an
/// error.
#[async_trait]
pub trait CloudMapApi: Send + Sync {
    /// Fetch a namespace by id.
    async fn get_namespace(&self, namespace_id: &str) -> Result<Option<Namespace>>;

    /// List the services registered under a namespace id (first page only).
    async fn list_services(&self, namespace_id: &str) -> Result<Vec<ServiceSummary>>;

    /// Fetch a service by id.
    async fn get_service(&self, service_id: &str) -> Result<Option<Service>>;

    /// Discover registered instances, addressed by namespace and service
    /// name, filtered by health status and capped at `max_results`.
    async fn discover_instances(
        &self,
        namespace_name: &str,
        service_name: &str,
        status: HealthStatusFilter,
        max_results: i32,
    ) -> Result<Vec<HttpInstanceSummary>>;
}
