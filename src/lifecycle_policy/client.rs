//! LifecyclePolicyClient trait - the boundary to the remote management API.
//! Authentication, retries and connections belong to the implementation.

use async_trait::async_trait;
use thiserror::Error;

use super::types::{BatchGetLifecyclePolicyOutput, LifecyclePolicyIdentifier};
use crate::error::TransportError;

/// Errors a client can return for one call
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service answered and rejected the request
    #[error("{code}: {message}")]
    Service { code: String, message: String },
}

impl ClientError {
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn is_resource_not_found(&self) -> bool {
        matches!(self, Self::Service { code, .. } if code == "ResourceNotFoundException")
    }
}

#[async_trait]
pub trait LifecyclePolicyClient: Send + Sync {
    /// Fetch the lifecycle policies named by `identifiers` in one call
    async fn batch_get_lifecycle_policy(
        &self,
        identifiers: &[LifecyclePolicyIdentifier],
    ) -> Result<BatchGetLifecyclePolicyOutput, ClientError>;
}
