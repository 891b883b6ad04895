//! Local object model of the tax adapter.
//!
//! This module provides:
//! - Lossless monetary values via the Decimal wrapper
//! - Addresses with content-derived codes and the per-request AddressCollection
//! - Lines, tax overrides and the request aggregates
//! - Result types returned to callers

pub mod address;
pub mod addresses;
pub mod decimal;
pub mod line;
pub mod primitives;
pub mod request;
pub mod result;
pub mod tax_override;

pub use address::{Address, AddressCode, AddressRef};
pub use addresses::AddressCollection;
pub use decimal::Decimal;
pub use line::{Line, Lines};
pub use primitives::{
    AccountingMethod, BoundaryLevel, CancelCode, DetailLevel, DocStatus, DocumentType,
    JurisdictionType, ServiceMode, SeverityLevel, TaxOverrideType, TaxType,
};
pub use request::{
    AdjustTaxRequest, ApplyPaymentRequest, CancelTaxRequest, CommitTaxRequest,
    GetTaxHistoryRequest, GetTaxRequest, PostTaxRequest, ReconcileTaxHistoryRequest,
};
pub use result::{
    AdjustTaxResult, ApplyPaymentResult, BaseResult, CancelTaxResult, CommitTaxResult,
    GetTaxHistoryResult, GetTaxResult, IsAuthorizedResult, Message, PingResult, PostTaxResult,
    ReconcileTaxHistoryResult, TaxDetail, TaxLine, TaxResult,
};
pub use tax_override::TaxOverride;
