pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod logging;
pub mod orchestration;
pub mod service;
pub mod wire;

pub use config::Config;
pub use domain::{
    Address, AddressCode, AddressCollection, AddressRef, AdjustTaxRequest, ApplyPaymentRequest,
    CancelTaxRequest, CommitTaxRequest, Decimal, GetTaxHistoryRequest, GetTaxRequest,
    GetTaxResult, Line, Lines, PostTaxRequest, ReconcileTaxHistoryRequest, TaxOverride,
};
pub use engine::{consolidate_addresses, Validate, Validation, ValidationMode};
pub use error::AdapterError;
pub use logging::{LogLevel, LogSvc};
pub use orchestration::TaxSvc;
pub use service::{HttpTaxService, MockTaxService, Operation, ServiceError, TaxService};
