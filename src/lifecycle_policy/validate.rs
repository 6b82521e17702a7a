//! Lookup key validation
//!
//! Runs before any remote call. Both fields are always checked so the caller
//! sees every problem at once.

use super::types::{LifecyclePolicyType, LookupKey};
use crate::error::{FieldViolation, ValidationError, ValidationErrorKind};

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 32;

/// Validate a raw `(name, type)` pair into a [`LookupKey`]
pub fn validate(name: &str, policy_type: &str) -> Result<LookupKey, ValidationError> {
    let mut violations = Vec::new();

    if let Some(kind) = check_name_length(name) {
        violations.push(FieldViolation {
            field: "name",
            kind,
        });
    }

    let parsed = LifecyclePolicyType::parse(policy_type);
    if parsed.is_none() {
        violations.push(FieldViolation {
            field: "type",
            kind: ValidationErrorKind::UnknownEnumValue {
                value: policy_type.to_string(),
                allowed: LifecyclePolicyType::values()
                    .iter()
                    .map(|v| v.as_str().to_string())
                    .collect(),
            },
        });
    }

    match parsed {
        Some(policy_type) if violations.is_empty() => Ok(LookupKey::new(name, policy_type)),
        _ => Err(ValidationError { violations }),
    }
}

// Length is counted in characters, not bytes.
fn check_name_length(name: &str) -> Option<ValidationErrorKind> {
    let actual = name.chars().count();
    if (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&actual) {
        None
    } else {
        Some(ValidationErrorKind::LengthOutOfRange {
            min: NAME_MIN_LEN,
            max: NAME_MAX_LEN,
            actual,
        })
    }
}
