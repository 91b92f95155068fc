//! In-memory registry (for testing and local development)

use async_trait::async_trait;
use aws_sdk_servicediscovery::types::{
    HealthStatus, HealthStatusFilter, HttpInstanceSummary, Namespace, Service, ServiceSummary,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::registry::{CloudMapApi, SERVICE_PAGE_SIZE};

/// In-memory registry implementing [`CloudMapApi`].
///
/// Mirrors the backend's filter semantics closely enough for tests: health
/// filtering, `max_results` truncation, and service listing by namespace id.
/// Instances with no recorded health status only pass the `All` filter.
#[derive(Clone, Default)]
pub struct InMemoryRegistry {
    namespaces: Arc<RwLock<HashMap<String, Namespace>>>,
    services: Arc<RwLock<HashMap<String, Service>>>,
    instances: Arc<RwLock<HashMap<(String, String), Vec<HttpInstanceSummary>>>>,
}

impl InMemoryRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a namespace, keyed by its id.
    pub async fn register_namespace(&self, namespace: Namespace) {
        let id = namespace.id().unwrap_or_default().to_string();
        self.namespaces.write().await.insert(id, namespace);
    }

    /// Register a service, keyed by its id.
    pub async fn register_service(&self, service: Service) {
        let id = service.id().unwrap_or_default().to_string();
        self.services.write().await.insert(id, service);
    }

    /// Register an instance under a namespace and service name.
    pub async fn register_instance(
        &self,
        namespace_name: impl Into<String>,
        service_name: impl Into<String>,
        instance: HttpInstanceSummary,
    ) {
        let key = (namespace_name.into(), service_name.into());
        self.instances.write().await.entry(key).or_default().push(instance);
    }

    /// Clear everything registered.
    pub async fn clear(&self) {
        self.namespaces.write().await.clear();
        self.services.write().await.clear();
        self.instances.write().await.clear();
    }

    /// Count of registered services.
    pub async fn service_count(&self) -> usize {
        self.services.read().await.len()
    }
}

fn matches_status(instance: &HttpInstanceSummary, status: &HealthStatusFilter) -> bool {
    match status {
        HealthStatusFilter::All => true,
        HealthStatusFilter::Healthy => instance.health_status() == Some(&HealthStatus::Healthy),
        HealthStatusFilter::Unhealthy => instance.health_status() == Some(&HealthStatus::Unhealthy),
        _ => false,
    }
}

#[async_trait]
impl CloudMapApi for InMemoryRegistry {
    async fn get_namespace(&self, namespace_id: &str) -> Result<Option<Namespace>> {
        Ok(self.namespaces.read().await.get(namespace_id).cloned())
    }

    async fn list_services(&self, namespace_id: &str) -> Result<Vec<ServiceSummary>> {
        let services = self.services.read().await;
        let summaries: Vec<ServiceSummary> = services
            .values()
            .filter(|s| s.namespace_id() == Some(namespace_id))
            .take(SERVICE_PAGE_SIZE as usize)
            .map(|s| {
                ServiceSummary::builder()
                    .set_id(s.id().map(String::from))
                    .set_arn(s.arn().map(String::from))
                    .set_name(s.name().map(String::from))
                    .set_description(s.description().map(String::from))
                    .set_instance_count(s.instance_count())
                    .build()
            })
            .collect();
        Ok(summaries)
    }

    async fn get_service(&self, service_id: &str) -> Result<Option<Service>> {
        Ok(self.services.read().await.get(service_id).cloned())
    }

    async fn discover_instances(
        &self,
        namespace_name: &str,
        service_name: &str,
        status: HealthStatusFilter,
        max_results: i32,
    ) -> Result<Vec<HttpInstanceSummary>> {
        let key = (namespace_name.to_string(), service_name.to_string());
        let instances = self.instances.read().await;
        let limit = usize::try_from(max_results).unwrap_or_default();

        let matching: Vec<HttpInstanceSummary> = instances
            .get(&key)
            .map(|registered| {
                registered
                    .iter()
                    .filter(|i| matches_status(i, &status))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(matching)
    }
}
