//! Normalization of remote lifecycle policy details
//!
//! Converts a `LifecyclePolicyDetail` into a `PolicyRecord`.

use chrono::{DateTime, SecondsFormat, Utc};

use super::types::{LifecyclePolicyDetail, LookupKey, PolicyRecord};
use crate::error::ResolveErrorKind;

/// Normalize the single matching detail for `key`
///
/// Fields are filled in order; a document that fails to serialize is
/// reported after every other field is populated.
pub(crate) fn normalize_detail(
    key: &LookupKey,
    detail: LifecyclePolicyDetail,
) -> Result<PolicyRecord, ResolveErrorKind> {
    let name = detail.name.unwrap_or_else(|| key.name().to_string());
    let policy_type = detail
        .policy_type
        .unwrap_or_else(|| key.policy_type().as_str().to_string());

    let mut record = PolicyRecord {
        identifier: name.clone(),
        name,
        description: detail.description.filter(|d| !d.is_empty()),
        policy_type,
        created_at: timestamp_field("created_date", detail.created_date)?,
        last_modified_at: timestamp_field("last_modified_date", detail.last_modified_date)?,
        policy_document: String::new(),
        policy_version: detail.policy_version.unwrap_or_default(),
    };

    if let Some(document) = detail.policy {
        match document.to_compact_string() {
            Ok(text) => record.policy_document = text,
            Err(source) => {
                return Err(ResolveErrorKind::DocumentSerializationFailed {
                    partial: Box::new(record),
                    source,
                })
            }
        }
    }

    Ok(record)
}

// Absent timestamps are read as 0, like the remote client's zero default.
fn timestamp_field(field: &'static str, millis: Option<i64>) -> Result<String, ResolveErrorKind> {
    let millis = millis.unwrap_or_default();
    epoch_millis_to_rfc3339(millis).ok_or(ResolveErrorKind::InvalidTimestamp { field, millis })
}

/// Epoch milliseconds to RFC 3339 in UTC
///
/// Always whole-second precision; any millisecond part is dropped.
pub fn epoch_millis_to_rfc3339(millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true))
}
