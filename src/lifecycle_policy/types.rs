//! Lifecycle policy types
//!
//! Lookup key, normalized record, and the `BatchGetLifecyclePolicy` wire shapes.
//!
//! Reference: OpenSearch Serverless API, `BatchGetLifecyclePolicy`

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;

/// Lifecycle policy types defined by the remote service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecyclePolicyType {
    Retention,
}

impl LifecyclePolicyType {
    /// Every member of the remote enumeration
    pub const fn values() -> &'static [LifecyclePolicyType] {
        &[Self::Retention]
    }

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retention => "retention",
        }
    }

    /// ASCII case-insensitive match against the wire values. Surrounding
    /// whitespace is not a member and does not match.
    pub fn parse(s: &str) -> Option<Self> {
        Self::values()
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for LifecyclePolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated `(name, type)` pair. Built only by [`super::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    name: String,
    policy_type: LifecyclePolicyType,
}

impl LookupKey {
    pub(crate) fn new(name: impl Into<String>, policy_type: LifecyclePolicyType) -> Self {
        Self {
            name: name.into(),
            policy_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy_type(&self) -> LifecyclePolicyType {
        self.policy_type
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}, {}", self.name, self.policy_type)
    }
}

/// Normalized lifecycle policy, built fresh on every successful lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRecord {
    /// Always equal to `name`
    pub identifier: String,
    pub name: String,
    pub description: Option<String>,
    /// As returned by the remote service
    #[serde(rename = "type")]
    pub policy_type: String,
    /// RFC 3339, UTC
    pub created_at: String,
    /// RFC 3339, UTC
    pub last_modified_at: String,
    /// Compact JSON text of the policy document
    pub policy_document: String,
    pub policy_version: String,
}

// =============================================================================
// Wire types
// =============================================================================

/// One entry of the `identifiers` request list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifecyclePolicyIdentifier {
    pub name: String,
    #[serde(rename = "type")]
    pub policy_type: LifecyclePolicyType,
}

impl From<&LookupKey> for LifecyclePolicyIdentifier {
    fn from(key: &LookupKey) -> Self {
        Self {
            name: key.name().to_string(),
            policy_type: key.policy_type(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchGetLifecyclePolicyRequest<'a> {
    pub identifiers: &'a [LifecyclePolicyIdentifier],
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGetLifecyclePolicyOutput {
    #[serde(default)]
    pub lifecycle_policy_details: Vec<LifecyclePolicyDetail>,
    #[serde(default)]
    pub lifecycle_policy_error_details: Vec<LifecyclePolicyErrorDetail>,
}

/// A lifecycle policy as the remote service returns it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecyclePolicyDetail {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub policy_type: Option<String>,
    /// Epoch milliseconds
    pub created_date: Option<i64>,
    /// Epoch milliseconds
    pub last_modified_date: Option<i64>,
    #[serde(default)]
    pub policy: Option<PolicyDocument>,
    pub policy_version: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecyclePolicyErrorDetail {
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub policy_type: Option<String>,
}

impl LifecyclePolicyErrorDetail {
    pub fn is_not_found(&self) -> bool {
        self.error_code
            .as_deref()
            .is_some_and(|code| code.contains("ResourceNotFound"))
    }
}

/// Opaque policy document, kept as the bytes the transport received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDocument(Vec<u8>);

impl PolicyDocument {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Decode and re-encode as compact JSON text. Key order and the exact
    /// text of every number are preserved.
    pub fn to_compact_string(&self) -> Result<String, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(&self.0)?;
        serde_json::to_string(&value)
    }
}

impl From<serde_json::Value> for PolicyDocument {
    fn from(value: serde_json::Value) -> Self {
        Self(value.to_string().into_bytes())
    }
}

impl<'de> Deserialize<'de> for PolicyDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(Self(raw.get().as_bytes().to_vec()))
    }
}
