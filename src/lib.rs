//! # Cloud Map Discovery
//!
//! A thin facade over the AWS Cloud Map service registry: namespace, service,
//! and instance lookups plus healthy-endpoint resolution (`address:port`).
//!
//! ## Design
//!
//! - **One remote call per operation** - no caching, no retries, no
//!   pagination past the first page. Transport faults propagate unmodified.
//! - **Absence is not an error** - a missing namespace, service, or instance
//!   list comes back as `None` or an empty `Vec`.
//! - **Injectable backend** - the [`CloudMapApi`] trait covers the four
//!   registry operations, so the real [`CloudMapClient`] and the
//!   [`InMemoryRegistry`] test double are interchangeable.
//! - **Seedable selection** - random endpoint selection draws from an RNG
//!   owned by the facade, replaceable in tests.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cloudmap_discovery::{CloudMapClient, CloudMapConfig, CloudMapDiscovery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CloudMapConfig::builder()
//!         .region("us-east-1")
//!         .build();
//!
//!     let client = CloudMapClient::new(config).await;
//!     let discovery = CloudMapDiscovery::new(client);
//!
//!     if let Some(endpoint) = discovery.random_healthy_endpoint("prod", "api").await? {
//!         println!("talking to {endpoint}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## In-Memory Registry (Testing)
//!
//! ```rust,ignore
//! use cloudmap_discovery::{CloudMapDiscovery, InMemoryRegistry};
//! use cloudmap_discovery::aws_sdk_servicediscovery::types::{HealthStatus, HttpInstanceSummary};
//!
//! let registry = InMemoryRegistry::new();
//! registry.register_instance("prod", "api",
//!     HttpInstanceSummary::builder()
//!         .health_status(HealthStatus::Healthy)
//!         .attributes("AWS_INSTANCE_IPV4", "10.0.0.1")
//!         .attributes("AWS_INSTANCE_PORT", "8080")
//!         .build(),
//! ).await;
//!
//! let discovery = CloudMapDiscovery::new(registry);
//! assert_eq!(
//!     discovery.first_healthy_endpoint("prod", "api").await?.as_deref(),
//!     Some("10.0.0.1:8080"),
//! );
//! ```

mod client;
mod config;
mod error;
mod facade;
mod memory;
mod registry;

pub use client::CloudMapClient;
pub use config::{CloudMapConfig, CloudMapConfigBuilder, CredentialsSource};
pub use error::{DiscoveryError, Result};
pub use facade::{CloudMapDiscovery, instance_attribute};
pub use memory::InMemoryRegistry;
pub use registry::{
    CloudMapApi, DEFAULT_MAX_INSTANCES, IPV4_ATTRIBUTE, PORT_ATTRIBUTE, SERVICE_PAGE_SIZE,
};

// Re-export AWS types for convenience
pub use aws_config;
pub use aws_credential_types;
pub use aws_sdk_servicediscovery;
