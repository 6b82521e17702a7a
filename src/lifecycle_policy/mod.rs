//! OpenSearch Serverless lifecycle policy lookup
//!
//! This module provides:
//! - Key validation (`validate`) run before any network call
//! - The `LifecyclePolicyClient` boundary and its reqwest implementation
//! - `PolicyResolver`, which queries once and normalizes the single match
//! - `read_lifecycle_policy`, the validate-then-resolve read flow

pub mod client;
pub mod http;
pub mod normalize;
pub mod resolver;
pub mod state;
pub mod types;
pub mod validate;

pub use client::{ClientError, LifecyclePolicyClient};
pub use http::{HttpLifecyclePolicyClient, DEFAULT_MAX_RESPONSE_BYTES};
pub use normalize::epoch_millis_to_rfc3339;
pub use resolver::PolicyResolver;
pub use state::{read_lifecycle_policy, LifecyclePolicyState};
pub use types::*;
pub use validate::{validate, NAME_MAX_LEN, NAME_MIN_LEN};
