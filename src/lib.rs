//! OpenSearch Serverless lifecycle policy lookup
//!
//! Read-only lookup of a lifecycle policy by its `(name, type)` key, normalized
//! into a stable record for downstream consumers.
//!
//! ## Call chain
//! Raw key -> `validate` -> `PolicyResolver::resolve` -> `PolicyRecord`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use oss_lifecycle_policy::config::ClientConfig;
//! use oss_lifecycle_policy::lifecycle_policy::{
//!     read_lifecycle_policy, HttpLifecyclePolicyClient, PolicyResolver,
//! };
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let client = HttpLifecyclePolicyClient::new(&config)?;
//! let resolver = PolicyResolver::new(Arc::new(client));
//! let state = read_lifecycle_policy(&resolver, "my-policy", "retention").await?;
//! println!("{}", state.policy);
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

// Client and resolver configuration
pub mod config;

// Lookup key validation, remote client, normalization
pub mod lifecycle_policy;

pub use error::{ReadError, ResolveError, ResolveErrorKind, TransportError, ValidationError};
pub use lifecycle_policy::{
    read_lifecycle_policy, validate, LifecyclePolicyState, LifecyclePolicyType, LookupKey,
    PolicyRecord, PolicyResolver,
};
