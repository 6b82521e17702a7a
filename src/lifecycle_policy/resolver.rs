//! PolicyResolver - one remote query per lookup, normalized or classified
//!
//! The resolver keeps no state between calls. Timeouts and caller
//! cancellation drop the in-flight call before any normalization runs.

use std::future::Future;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::client::{ClientError, LifecyclePolicyClient};
use super::normalize::normalize_detail;
use super::types::{
    BatchGetLifecyclePolicyOutput, LifecyclePolicyDetail, LifecyclePolicyIdentifier, LookupKey,
    PolicyRecord,
};
use crate::config::ResolverConfig;
use crate::error::{ResolveError, ResolveErrorKind, TransportError};

pub struct PolicyResolver {
    client: Arc<dyn LifecyclePolicyClient>,
    config: ResolverConfig,
}

impl PolicyResolver {
    pub fn new(client: Arc<dyn LifecyclePolicyClient>) -> Self {
        Self::with_config(client, ResolverConfig::default())
    }

    pub fn with_config(client: Arc<dyn LifecyclePolicyClient>, config: ResolverConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Fetch and normalize the single policy matching `key`
    pub async fn resolve(&self, key: &LookupKey) -> Result<PolicyRecord, ResolveError> {
        self.resolve_with_cancel(key, std::future::pending::<()>())
            .await
    }

    /// Like [`resolve`](Self::resolve), but gives up with
    /// `TransportError::Cancelled` as soon as `cancel` completes
    #[instrument(
        name = "resolve_lifecycle_policy",
        skip(self, key, cancel),
        fields(name = %key.name(), policy_type = %key.policy_type())
    )]
    pub async fn resolve_with_cancel<C>(
        &self,
        key: &LookupKey,
        cancel: C,
    ) -> Result<PolicyRecord, ResolveError>
    where
        C: Future<Output = ()> + Send,
    {
        let result = self
            .fetch(key, cancel)
            .await
            .and_then(select_single)
            .and_then(|detail| normalize_detail(key, detail));

        match result {
            Ok(record) => {
                info!(policy_version = %record.policy_version, "resolved lifecycle policy");
                Ok(record)
            }
            Err(kind) => {
                warn!(error_kind = kind.code(), "lifecycle policy lookup failed: {}", kind);
                Err(ResolveError::new(key.clone(), kind))
            }
        }
    }

    async fn fetch<C>(
        &self,
        key: &LookupKey,
        cancel: C,
    ) -> Result<BatchGetLifecyclePolicyOutput, ResolveErrorKind>
    where
        C: Future<Output = ()> + Send,
    {
        let identifiers = [LifecyclePolicyIdentifier::from(key)];
        let call = self.client.batch_get_lifecycle_policy(&identifiers);

        let bounded = async {
            match self.config.timeout {
                Some(limit) => match tokio::time::timeout(limit, call).await {
                    Ok(result) => result,
                    Err(_) => Err(ClientError::Transport(TransportError::Timeout(limit))),
                },
                None => call.await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel => Err(ResolveErrorKind::Transport(TransportError::Cancelled)),
            result = bounded => result.map_err(classify_client_error),
        }
    }
}

fn classify_client_error(err: ClientError) -> ResolveErrorKind {
    if err.is_resource_not_found() {
        return ResolveErrorKind::NotFound;
    }
    match err {
        ClientError::Transport(e) => ResolveErrorKind::Transport(e),
        ClientError::Service { code, message } => ResolveErrorKind::RemoteService { code, message },
    }
}

/// Exactly one detail is a match; anything else is classified
fn select_single(
    output: BatchGetLifecyclePolicyOutput,
) -> Result<LifecyclePolicyDetail, ResolveErrorKind> {
    let mut details = output.lifecycle_policy_details;
    if details.len() > 1 {
        return Err(ResolveErrorKind::AmbiguousResult {
            count: details.len(),
        });
    }
    if let Some(detail) = details.pop() {
        return Ok(detail);
    }

    match output.lifecycle_policy_error_details.into_iter().next() {
        Some(error) if !error.is_not_found() => Err(ResolveErrorKind::RemoteService {
            code: error.error_code.unwrap_or_else(|| "Unknown".to_string()),
            message: error.error_message.unwrap_or_default(),
        }),
        _ => Err(ResolveErrorKind::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle_policy::types::LifecyclePolicyErrorDetail;

    fn error_detail(code: &str) -> LifecyclePolicyErrorDetail {
        LifecyclePolicyErrorDetail {
            error_code: Some(code.into()),
            error_message: Some("details".into()),
            name: Some("lp1".into()),
            policy_type: Some("retention".into()),
        }
    }

    #[test]
    fn test_select_single_empty_is_not_found() {
        let out = BatchGetLifecyclePolicyOutput::default();
        assert!(matches!(select_single(out), Err(ResolveErrorKind::NotFound)));
    }

    #[test]
    fn test_select_single_many_is_ambiguous() {
        let out = BatchGetLifecyclePolicyOutput {
            lifecycle_policy_details: vec![LifecyclePolicyDetail::default(); 3],
            lifecycle_policy_error_details: vec![],
        };
        assert!(matches!(
            select_single(out),
            Err(ResolveErrorKind::AmbiguousResult { count: 3 })
        ));
    }

    #[test]
    fn test_select_single_error_details() {
        let out = BatchGetLifecyclePolicyOutput {
            lifecycle_policy_details: vec![],
            lifecycle_policy_error_details: vec![error_detail("ResourceNotFound")],
        };
        assert!(matches!(select_single(out), Err(ResolveErrorKind::NotFound)));

        let out = BatchGetLifecyclePolicyOutput {
            lifecycle_policy_details: vec![],
            lifecycle_policy_error_details: vec![error_detail("AccessDenied")],
        };
        match select_single(out) {
            Err(ResolveErrorKind::RemoteService { code, message }) => {
                assert_eq!(code, "AccessDenied");
                assert_eq!(message, "details");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_classify_client_error() {
        assert!(matches!(
            classify_client_error(ClientError::service("ResourceNotFoundException", "gone")),
            ResolveErrorKind::NotFound
        ));
        assert!(matches!(
            classify_client_error(ClientError::service("ValidationException", "bad")),
            ResolveErrorKind::RemoteService { .. }
        ));
        assert!(matches!(
            classify_client_error(TransportError::Connection("refused".into()).into()),
            ResolveErrorKind::Transport(TransportError::Connection(_))
        ));
    }
}
