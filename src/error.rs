//! Error taxonomy for lifecycle policy lookups
//!
//! Validation errors are local and never reach the network. Resolve errors
//! carry the lookup key so every message names what was being read.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::lifecycle_policy::{LookupKey, PolicyRecord};

/// What went wrong with a single lookup key field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    #[error("length must be between {min} and {max} characters, got {actual}")]
    LengthOutOfRange {
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("value {value:?} is not one of [{}]", .allowed.join(", "))]
    UnknownEnumValue { value: String, allowed: Vec<String> },
}

/// A violation tied to the field that caused it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub kind: ValidationErrorKind,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// Every violation found in a lookup key. Never empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid lifecycle policy key: {}", join_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn kinds(&self) -> impl Iterator<Item = &ValidationErrorKind> {
        self.violations.iter().map(|v| &v.kind)
    }

    /// The violation reported for `field`, if any
    pub fn field(&self, field: &str) -> Option<&FieldViolation> {
        self.violations.iter().find(|v| v.field == field)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Network, codec and deadline failures below the remote service
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid payload: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("invalid client configuration: {0}")]
    Configuration(String),

    #[error("response body exceeds {limit} bytes")]
    ResponseTooLarge { limit: usize },

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("cancelled by caller")]
    Cancelled,
}

/// Why a validated key could not be resolved into a record
#[derive(Error, Debug)]
pub enum ResolveErrorKind {
    #[error("couldn't find resource")]
    NotFound,

    #[error("expected exactly one result, remote returned {count}")]
    AmbiguousResult { count: usize },

    /// The other fields were normalized; `partial` holds them with an empty
    /// policy document.
    #[error("serializing policy document: {source}")]
    DocumentSerializationFailed {
        partial: Box<PolicyRecord>,
        #[source]
        source: serde_json::Error,
    },

    #[error("{field} of {millis} ms is outside the representable range")]
    InvalidTimestamp { field: &'static str, millis: i64 },

    #[error("transport: {0}")]
    Transport(#[source] TransportError),

    #[error("remote service error {code}: {message}")]
    RemoteService { code: String, message: String },
}

impl ResolveErrorKind {
    /// Stable short name, used as a structured log field
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::AmbiguousResult { .. } => "AmbiguousResult",
            Self::DocumentSerializationFailed { .. } => "DocumentSerializationFailed",
            Self::InvalidTimestamp { .. } => "InvalidTimestamp",
            Self::Transport(_) => "TransportError",
            Self::RemoteService { .. } => "RemoteServiceError",
        }
    }
}

/// A classified lookup failure for one key
#[derive(Error, Debug)]
#[error("reading lifecycle policy ({key}): {kind}")]
pub struct ResolveError {
    pub key: LookupKey,
    #[source]
    pub kind: ResolveErrorKind,
}

impl ResolveError {
    pub fn new(key: LookupKey, kind: ResolveErrorKind) -> Self {
        Self { key, kind }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ResolveErrorKind::NotFound)
    }
}

/// Failure of the full read flow: validate then resolve
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("reading lifecycle policy ({name:?}): {source}")]
    Validation {
        name: String,
        #[source]
        source: ValidationError,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle_policy::{validate, LifecyclePolicyType};

    fn key() -> LookupKey {
        LookupKey::new("my-policy", LifecyclePolicyType::Retention)
    }

    // ── ValidationError ──────────────────────────────────────────

    #[test]
    fn display_length_out_of_range() {
        let kind = ValidationErrorKind::LengthOutOfRange {
            min: 3,
            max: 32,
            actual: 2,
        };
        assert_eq!(
            kind.to_string(),
            "length must be between 3 and 32 characters, got 2"
        );
    }

    #[test]
    fn display_unknown_enum_value() {
        let kind = ValidationErrorKind::UnknownEnumValue {
            value: "deletion".into(),
            allowed: vec!["retention".into()],
        };
        assert_eq!(
            kind.to_string(),
            "value \"deletion\" is not one of [retention]"
        );
    }

    #[test]
    fn display_names_every_field() {
        let err = validate("ab", "deletion").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("invalid lifecycle policy key: "));
        assert!(msg.contains("name: length must be between 3 and 32"));
        assert!(msg.contains("type: value \"deletion\""));
    }

    // ── ResolveError ─────────────────────────────────────────────

    #[test]
    fn display_not_found_names_action_and_key() {
        let err = ResolveError::new(key(), ResolveErrorKind::NotFound);
        assert_eq!(
            err.to_string(),
            "reading lifecycle policy (\"my-policy\", retention): couldn't find resource"
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn display_ambiguous() {
        let err = ResolveError::new(key(), ResolveErrorKind::AmbiguousResult { count: 2 });
        assert!(err
            .to_string()
            .ends_with("expected exactly one result, remote returned 2"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn display_remote_service() {
        let err = ResolveError::new(
            key(),
            ResolveErrorKind::RemoteService {
                code: "ValidationException".into(),
                message: "bad type".into(),
            },
        );
        assert!(err
            .to_string()
            .ends_with("remote service error ValidationException: bad type"));
    }

    #[test]
    fn transport_cause_is_chained() {
        use std::error::Error as _;

        let err = ResolveError::new(
            key(),
            ResolveErrorKind::Transport(TransportError::Timeout(Duration::from_secs(5))),
        );
        assert_eq!(
            err.to_string(),
            "reading lifecycle policy (\"my-policy\", retention): transport: timed out after 5s"
        );
        let source = err.source().expect("kind is the source");
        assert_eq!(source.to_string(), "transport: timed out after 5s");
        assert_eq!(
            source.source().map(ToString::to_string),
            Some("timed out after 5s".to_string())
        );
    }

    #[test]
    fn kind_codes_are_stable() {
        assert_eq!(ResolveErrorKind::NotFound.code(), "NotFound");
        assert_eq!(
            ResolveErrorKind::Transport(TransportError::Cancelled).code(),
            "TransportError"
        );
        assert_eq!(
            ResolveErrorKind::RemoteService {
                code: "x".into(),
                message: "y".into()
            }
            .code(),
            "RemoteServiceError"
        );
    }

    // ── ReadError ────────────────────────────────────────────────

    #[test]
    fn read_error_validation_names_action() {
        let source = validate("x", "retention").unwrap_err();
        let err = ReadError::Validation {
            name: "x".into(),
            source,
        };
        assert!(err
            .to_string()
            .starts_with("reading lifecycle policy (\"x\"): invalid lifecycle policy key"));
    }

    #[test]
    fn read_error_resolve_is_transparent() {
        let err: ReadError = ResolveError::new(key(), ResolveErrorKind::NotFound).into();
        assert!(err.to_string().starts_with("reading lifecycle policy (\"my-policy\""));
    }
}
