//! The remote tax service as seen by the adapter.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub mod http;
pub mod mock;

pub use http::HttpTaxService;
pub use mock::MockTaxService;

/// Remote methods of the tax service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Ping,
    IsAuthorized,
    GetTax,
    GetTaxHistory,
    PostTax,
    CommitTax,
    CancelTax,
    ReconcileTaxHistory,
    AdjustTax,
    ApplyPayment,
}

impl Operation {
    /// Method name as the service spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Ping => "Ping",
            Operation::IsAuthorized => "IsAuthorized",
            Operation::GetTax => "GetTax",
            Operation::GetTaxHistory => "GetTaxHistory",
            Operation::PostTax => "PostTax",
            Operation::CommitTax => "CommitTax",
            Operation::CancelTax => "CancelTax",
            Operation::ReconcileTaxHistory => "ReconcileTaxHistory",
            Operation::AdjustTax => "AdjustTax",
            Operation::ApplyPayment => "ApplyPayment",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport to the tax service.
///
/// Implementations own retry and timeout policy; callers see a single
/// request/response exchange of wire JSON.
#[async_trait]
pub trait TaxService: Send + Sync + fmt::Debug {
    async fn invoke(
        &self,
        operation: Operation,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, ServiceError>;
}

/// Error type for tax service calls.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// Network error (e.g., connection timeout, DNS failure)
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("HTTP error {status}: {message}")]
    HttpError { status: u16, message: String },
    /// Response body was not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Error: {0}")]
    Other(String),
}
