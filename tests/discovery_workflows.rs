//! Integration tests for common discovery workflows.
//!
//! These exercise the facade end to end against the in-memory registry.

use cloudmap_discovery::*;
use aws_sdk_servicediscovery::types::{
    HealthStatus, HealthStatusFilter, HttpInstanceSummary, Namespace, Service,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

async fn seeded_registry() -> InMemoryRegistry {
    let registry = InMemoryRegistry::new();

    registry
        .register_namespace(
            Namespace::builder()
                .id("ns-1")
                .name("prod")
                .description("production namespace")
                .build(),
        )
        .await;

    registry
        .register_service(
            Service::builder()
                .id("srv-1")
                .name("api")
                .namespace_id("ns-1")
                .build(),
        )
        .await;

    registry
        .register_instance(
            "prod",
            "api",
            HttpInstanceSummary::builder()
                .instance_id("i-1")
                .health_status(HealthStatus::Healthy)
                .attributes(IPV4_ATTRIBUTE, "10.0.0.1")
                .attributes(PORT_ATTRIBUTE, "8080")
                .build(),
        )
        .await;

    // Healthy but missing the port attribute; endpoint derivation skips it.
    registry
        .register_instance(
            "prod",
            "api",
            HttpInstanceSummary::builder()
                .instance_id("i-2")
                .health_status(HealthStatus::Healthy)
                .attributes(IPV4_ATTRIBUTE, "10.0.0.2")
                .build(),
        )
        .await;

    registry
        .register_instance(
            "prod",
            "api",
            HttpInstanceSummary::builder()
                .instance_id("i-3")
                .health_status(HealthStatus::Unhealthy)
                .attributes(IPV4_ATTRIBUTE, "10.0.0.3")
                .attributes(PORT_ATTRIBUTE, "8080")
                .build(),
        )
        .await;

    registry
}

#[tokio::test]
async fn test_lookup_workflow() {
    let discovery = CloudMapDiscovery::new(seeded_registry().await);

    let namespace = discovery.namespace("ns-1").await.unwrap().unwrap();
    assert_eq!(namespace.name(), Some("prod"));
    assert!(discovery.namespace("ns-2").await.unwrap().is_none());

    let services = discovery.services("ns-1").await.unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].id(), Some("srv-1"));

    let service = discovery.service("srv-1").await.unwrap().unwrap();
    assert_eq!(service.name(), Some("api"));
    assert!(discovery.service("srv-2").await.unwrap().is_none());
}

#[tokio::test]
async fn test_instance_discovery_workflow() {
    let discovery = CloudMapDiscovery::new(seeded_registry().await);

    let all = discovery
        .instances("prod", "api", HealthStatusFilter::All, DEFAULT_MAX_INSTANCES)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let healthy = discovery
        .instances(
            "prod",
            "api",
            HealthStatusFilter::Healthy,
            DEFAULT_MAX_INSTANCES,
        )
        .await
        .unwrap();
    assert_eq!(healthy.len(), 2);

    // The attribute helper tolerates any index/key combination.
    assert_eq!(
        instance_attribute(&healthy, IPV4_ATTRIBUTE, 0),
        Some("10.0.0.1")
    );
    assert_eq!(instance_attribute(&healthy, PORT_ATTRIBUTE, 1), None);
    assert_eq!(instance_attribute(&healthy, IPV4_ATTRIBUTE, 5), None);
}

#[tokio::test]
async fn test_endpoint_workflow() {
    let discovery = CloudMapDiscovery::with_rng(seeded_registry().await, StdRng::seed_from_u64(1));

    let first = discovery
        .first_healthy_endpoint("prod", "api")
        .await
        .unwrap();
    assert_eq!(first.as_deref(), Some("10.0.0.1:8080"));

    // Only the complete healthy instance yields an endpoint; the portless
    // one is skipped and the unhealthy one is filtered out.
    let endpoints = discovery.healthy_endpoints("prod", "api").await.unwrap();
    assert_eq!(endpoints, vec!["10.0.0.1:8080".to_string()]);

    // Random selection lands on one of the healthy instances overall; it may
    // pick the incomplete one, which resolves to None rather than an error.
    for _ in 0..20 {
        let random = discovery
            .random_healthy_endpoint("prod", "api")
            .await
            .unwrap();
        if let Some(endpoint) = random {
            assert_eq!(endpoint, "10.0.0.1:8080");
        }
    }
}

#[tokio::test]
async fn test_unknown_service_yields_empty_results() {
    let discovery = CloudMapDiscovery::new(seeded_registry().await);

    assert!(
        discovery
            .first_healthy_endpoint("prod", "worker")
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        discovery
            .random_healthy_endpoint("prod", "worker")
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        discovery
            .healthy_endpoints("prod", "worker")
            .await
            .unwrap()
            .is_empty()
    );
}
