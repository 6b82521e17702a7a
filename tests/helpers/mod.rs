//! Shared fixtures for lifecycle policy integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use oss_lifecycle_policy::lifecycle_policy::{
    BatchGetLifecyclePolicyOutput, ClientError, LifecyclePolicyClient, LifecyclePolicyDetail,
    LifecyclePolicyIdentifier, PolicyDocument,
};

type Responder =
    Box<dyn Fn(&[LifecyclePolicyIdentifier]) -> Result<BatchGetLifecyclePolicyOutput, ClientError> + Send + Sync>;

/// In-memory client that answers every call with `responder`
pub struct FakeClient {
    responder: Responder,
    pub calls: Mutex<Vec<Vec<LifecyclePolicyIdentifier>>>,
    pub call_count: AtomicU64,
    pub delay: Option<Duration>,
}

impl FakeClient {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&[LifecyclePolicyIdentifier]) -> Result<BatchGetLifecyclePolicyOutput, ClientError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
            call_count: AtomicU64::new(0),
            delay: None,
        }
    }

    /// Always return these details
    pub fn returning(details: Vec<LifecyclePolicyDetail>) -> Self {
        Self::new(move |_| {
            Ok(BatchGetLifecyclePolicyOutput {
                lifecycle_policy_details: details.clone(),
                lifecycle_policy_error_details: vec![],
            })
        })
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Vec<LifecyclePolicyIdentifier>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LifecyclePolicyClient for FakeClient {
    async fn batch_get_lifecycle_policy(
        &self,
        identifiers: &[LifecyclePolicyIdentifier],
    ) -> Result<BatchGetLifecyclePolicyOutput, ClientError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(identifiers.to_vec());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.responder)(identifiers)
    }
}

/// The remote record used throughout the end-to-end tests
pub fn lp1_detail() -> LifecyclePolicyDetail {
    LifecyclePolicyDetail {
        name: Some("lp1".into()),
        description: Some("desc".into()),
        policy_type: Some("RETENTION".into()),
        created_date: Some(1_700_000_000_000),
        last_modified_date: Some(1_700_003_600_000),
        policy: Some(PolicyDocument::from(json!({"Rules": []}))),
        policy_version: Some("v1".into()),
    }
}

/// Wire body for the same record
pub fn lp1_wire_body() -> serde_json::Value {
    json!({
        "lifecyclePolicyDetails": [{
            "name": "lp1",
            "description": "desc",
            "type": "RETENTION",
            "createdDate": 1_700_000_000_000i64,
            "lastModifiedDate": 1_700_003_600_000i64,
            "policy": {"Rules": []},
            "policyVersion": "v1"
        }],
        "lifecyclePolicyErrorDetails": []
    })
}
