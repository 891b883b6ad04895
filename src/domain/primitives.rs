//! Domain primitives: the enumerations shared by the local model and the wire schema.
//!
//! Variant names serialize verbatim, which is the spelling the tax service uses.

use serde::{Deserialize, Serialize};

/// Requested granularity of a tax result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetailLevel {
    Summary,
    #[default]
    Document,
    Line,
    Tax,
    Diagnostic,
}

/// Kind of document a tax request describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Wildcard, only meaningful for history searches.
    Any,
    #[default]
    SalesOrder,
    SalesInvoice,
    PurchaseOrder,
    PurchaseInvoice,
    ReturnOrder,
    ReturnInvoice,
    InventoryTransferOrder,
    InventoryTransferInvoice,
}

/// Reason given when cancelling a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CancelCode {
    #[default]
    Unspecified,
    PostFailed,
    DocDeleted,
    DocVoided,
    AdjustmentCancelled,
}

/// Jurisdiction level of a tax detail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JurisdictionType {
    #[default]
    Country,
    State,
    County,
    City,
    Special,
}

/// Lifecycle status of a document on the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocStatus {
    #[default]
    Temporary,
    Saved,
    Posted,
    Committed,
    Cancelled,
    Adjusted,
    Any,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxType {
    #[default]
    None,
    Sales,
    Use,
    ConsumerUse,
    Output,
    Input,
    Nonrecoverable,
    Fee,
    Rental,
    Excise,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryLevel {
    #[default]
    Address,
    Zip9,
    Zip5,
}

/// Kind of caller-supplied tax override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxOverrideType {
    /// No override; never sent to the service.
    #[default]
    None,
    TaxAmount,
    Exemption,
    TaxDate,
    AccruedTaxAmount,
}

impl TaxOverrideType {
    /// True for every type except `None`.
    pub fn is_active(&self) -> bool {
        !matches!(self, TaxOverrideType::None)
    }
}

/// Where the service should compute tax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceMode {
    #[default]
    Automatic,
    Local,
    Remote,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountingMethod {
    #[default]
    Accrual,
    Cash,
}

/// Outcome classification carried by every result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeverityLevel {
    #[default]
    Success,
    Warning,
    /// The service rejected the call.
    Error,
    /// The call failed before or after reaching the service.
    Exception,
}

impl SeverityLevel {
    pub fn is_failure(&self) -> bool {
        matches!(self, SeverityLevel::Error | SeverityLevel::Exception)
    }
}
