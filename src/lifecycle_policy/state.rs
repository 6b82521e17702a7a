//! Data source read flow
//!
//! Validates the raw key, resolves it, and flattens the record into the
//! attribute set handed to the state layer.

use serde::{Deserialize, Serialize};

use super::resolver::PolicyResolver;
use super::types::PolicyRecord;
use super::validate::validate;
use crate::error::ReadError;

/// Flattened lifecycle policy attributes; `id` mirrors the record identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecyclePolicyState {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub policy_type: String,
    pub created_date: String,
    pub last_modified_date: String,
    pub policy: String,
    pub policy_version: String,
}

impl From<PolicyRecord> for LifecyclePolicyState {
    fn from(record: PolicyRecord) -> Self {
        Self {
            id: record.identifier,
            name: record.name,
            description: record.description,
            policy_type: record.policy_type,
            created_date: record.created_at,
            last_modified_date: record.last_modified_at,
            policy: record.policy_document,
            policy_version: record.policy_version,
        }
    }
}

/// Read one lifecycle policy by raw `(name, type)`
pub async fn read_lifecycle_policy(
    resolver: &PolicyResolver,
    name: &str,
    policy_type: &str,
) -> Result<LifecyclePolicyState, ReadError> {
    let key = validate(name, policy_type).map_err(|source| ReadError::Validation {
        name: name.to_string(),
        source,
    })?;
    let record = resolver.resolve(&key).await?;
    Ok(record.into())
}
