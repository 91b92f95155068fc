//! Discovery facade with endpoint resolution.

use aws_sdk_servicediscovery::types::{
    HealthStatusFilter, HttpInstanceSummary, Namespace, Service, ServiceSummary,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

use crate::error::Result;
use crate::registry::{CloudMapApi, DEFAULT_MAX_INSTANCES, IPV4_ATTRIBUTE, PORT_ATTRIBUTE};

/// Read one named attribute from the instance at `index`.
///
/// Returns `None` when the index is out of range, the instance carries no
/// attribute map, or the attribute is absent. Never panics.
pub fn instance_attribute<'a>(
    instances: &'a [HttpInstanceSummary],
    attribute: &str,
    index: usize,
) -> Option<&'a str> {
    instances
        .get(index)?
        .attributes()?
        .get(attribute)
        .map(String::as_str)
}

/// Join the address and port attributes of the instance at `index` into
/// `address:port`, requiring both to be present and non-empty.
fn endpoint_at(instances: &[HttpInstanceSummary], index: usize) -> Option<String> {
    let address = instance_attribute(instances, IPV4_ATTRIBUTE, index)?;
    let port = instance_attribute(instances, PORT_ATTRIBUTE, index)?;

    if address.is_empty() || port.is_empty() {
        return None;
    }
    Some(format!("{address}:{port}"))
}

/// Discovery facade over a Cloud Map registry.
///
/// Delegates the lookup operations to the injected [`CloudMapApi`]
/// implementation and derives `address:port` endpoints from healthy
/// instances on top of them. Endpoint ordering follows whatever order the
/// backend returned for that single response; no independent sorting is
/// applied.
///
/// The random source is owned by the facade so selection is seedable in
/// tests; see [`CloudMapDiscovery::with_rng`].
pub struct CloudMapDiscovery<A> {
    api: A,
    rng: Mutex<StdRng>,
}

impl<A: CloudMapApi> CloudMapDiscovery<A> {
    /// Create a facade over a registry implementation.
    pub fn new(api: A) -> Self {
        Self::with_rng(api, StdRng::from_rng(&mut rand::rng()))
    }

    /// Create a facade with an explicit random source (deterministic tests).
    pub fn with_rng(api: A, rng: StdRng) -> Self {
        Self {
            api,
            rng: Mutex::new(rng),
        }
    }

    /// Fetch a namespace by id. `None` when the backend reports nothing.
    pub async fn namespace(&self, namespace_id: &str) -> Result<Option<Namespace>> {
        self.api.get_namespace(namespace_id).await
    }

    /// List the services registered under a namespace id (first page only).
    pub async fn services(&self, namespace_id: &str) -> Result<Vec<ServiceSummary>> {
        self.api.list_services(namespace_id).await
    }

    /// Fetch a service by id. `None` when the backend reports nothing.
    pub async fn service(&self, service_id: &str) -> Result<Option<Service>> {
        self.api.get_service(service_id).await
    }

    /// Discover instances by namespace and service name.
    pub async fn instances(
        &self,
        namespace_name: &str,
        service_name: &str,
        status: HealthStatusFilter,
        max_results: i32,
    ) -> Result<Vec<HttpInstanceSummary>> {
        self.api
            .discover_instances(namespace_name, service_name, status, max_results)
            .await
    }

    /// Endpoint of the first healthy instance, or `None` when there is no
    /// healthy instance or its address/port attributes are incomplete.
    pub async fn first_healthy_endpoint(
        &self,
        namespace_name: &str,
        service_name: &str,
    ) -> Result<Option<String>> {
        let instances = self.healthy_instances(namespace_name, service_name).await?;
        Ok(endpoint_at(&instances, 0))
    }

    /// Endpoint of a uniformly random healthy instance, or `None` when there
    /// is no healthy instance or the selected one is incomplete.
    pub async fn random_healthy_endpoint(
        &self,
        namespace_name: &str,
        service_name: &str,
    ) -> Result<Option<String>> {
        let instances = self.healthy_instances(namespace_name, service_name).await?;
        if instances.is_empty() {
            return Ok(None);
        }

        let index = self.pick_index(instances.len());
        Ok(endpoint_at(&instances, index))
    }

    /// Endpoints of all healthy instances, in backend order, skipping
    /// instances missing either attribute.
    pub async fn healthy_endpoints(
        &self,
        namespace_name: &str,
        service_name: &str,
    ) -> Result<Vec<String>> {
        let instances = self.healthy_instances(namespace_name, service_name).await?;

        let endpoints = (0..instances.len())
            .filter_map(|index| endpoint_at(&instances, index))
            .collect();
        Ok(endpoints)
    }

    /// Uniform index in `[0, count)`; `0` without consuming randomness when
    /// `count == 1`. Callers guarantee `count >= 1`.
    pub fn pick_index(&self, count: usize) -> usize {
        if count == 1 {
            return 0;
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(0..count)
    }

    async fn healthy_instances(
        &self,
        namespace_name: &str,
        service_name: &str,
    ) -> Result<Vec<HttpInstanceSummary>> {
        self.api
            .discover_instances(
                namespace_name,
                service_name,
                HealthStatusFilter::Healthy,
                DEFAULT_MAX_INSTANCES,
            )
            .await
    }
}
