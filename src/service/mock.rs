//! Mock tax service for testing without network calls.

use super::{Operation, ServiceError, TaxService};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock tax service that answers with canned wire responses and records
/// every call it receives.
#[derive(Debug, Clone, Default)]
pub struct MockTaxService {
    responses: HashMap<Operation, Result<serde_json::Value, ServiceError>>,
    calls: Arc<Mutex<Vec<(Operation, serde_json::Value)>>>,
}

impl MockTaxService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `operation` with `response`.
    pub fn with_response(mut self, operation: Operation, response: serde_json::Value) -> Self {
        self.responses.insert(operation, Ok(response));
        self
    }

    /// Fail `operation` with `error`.
    pub fn with_failure(mut self, operation: Operation, error: ServiceError) -> Self {
        self.responses.insert(operation, Err(error));
        self
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> Vec<(Operation, serde_json::Value)> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Payload of the most recent call to `operation`.
    pub fn last_payload(&self, operation: Operation) -> Option<serde_json::Value> {
        self.calls()
            .into_iter()
            .rev()
            .find(|(op, _)| *op == operation)
            .map(|(_, payload)| payload)
    }
}

#[async_trait]
impl TaxService for MockTaxService {
    async fn invoke(
        &self,
        operation: Operation,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, ServiceError> {
        self.calls
            .lock()
            .map_err(|_| ServiceError::Other("mock call log poisoned".to_string()))?
            .push((operation, payload));

        self.responses.get(&operation).cloned().unwrap_or_else(|| {
            Err(ServiceError::Other(format!(
                "no canned response for {}",
                operation
            )))
        })
    }
}
