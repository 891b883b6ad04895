//! Pre-serialization validation hook shared by every request type.
//!
//! `Permissive` accepts everything and leaves field checks to the service.
//! `Strict` enforces the minimum field set the service documents for each
//! operation.

use crate::domain::{
    AdjustTaxRequest, ApplyPaymentRequest, CancelTaxRequest, CommitTaxRequest,
    GetTaxHistoryRequest, GetTaxRequest, Line, PostTaxRequest, ReconcileTaxHistoryRequest,
    TaxOverride,
};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    #[default]
    Permissive,
    Strict,
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(ValidationMode::Permissive),
            "strict" => Ok(ValidationMode::Strict),
            other => Err(format!("expected 'permissive' or 'strict', got '{}'", other)),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::Permissive => write!(f, "permissive"),
            ValidationMode::Strict => write!(f, "strict"),
        }
    }
}

/// Outcome of a validation hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub is_valid: bool,
    pub message: String,
}

impl Validation {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }
}

pub trait Validate {
    fn validate(&self, mode: ValidationMode) -> Validation;
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).is_some_and(|s| !s.is_empty())
}

fn require_doc_identity(
    mode: ValidationMode,
    operation: &str,
    company_code: bool,
    doc_code: bool,
) -> Validation {
    if mode == ValidationMode::Permissive || (company_code && doc_code) {
        return Validation::ok();
    }
    Validation::failed(format!(
        "Required fields for {} are [CompanyCode, DocCode, and DocType]. ",
        operation
    ))
}

impl Validate for GetTaxRequest {
    fn validate(&self, mode: ValidationMode) -> Validation {
        if mode == ValidationMode::Permissive {
            return Validation::ok();
        }

        let has_destination = self.destination_ref().is_some()
            || (!self.lines().is_empty()
                && self.lines().iter().all(|line| line.destination_ref().is_some()))
            || present(&self.location_code);

        let header_ok = has_destination
            && present(&self.doc_code)
            && self.doc_date.is_some()
            && present(&self.customer_code)
            && !self.lines().is_empty();

        if !header_ok {
            return Validation::failed(
                "Required fields for GetTaxRequest are [LocationCode or DestinationAddress \
                 (header or line level), Line, CustomerCode, DocCode, and DocDate]. ",
            );
        }

        for line in self.lines() {
            let result = line.validate(mode);
            if !result.is_valid {
                return result;
            }
        }
        Validation::ok()
    }
}

impl Validate for Line {
    fn validate(&self, mode: ValidationMode) -> Validation {
        if mode == ValidationMode::Permissive || (present(&self.no) && !self.amount.is_negative()) {
            return Validation::ok();
        }
        Validation::failed("Required fields for Line are [No and Amount]. ")
    }
}

impl Validate for TaxOverride {
    fn validate(&self, _mode: ValidationMode) -> Validation {
        Validation::ok()
    }
}

impl Validate for AdjustTaxRequest {
    fn validate(&self, mode: ValidationMode) -> Validation {
        self.get_tax_request.validate(mode)
    }
}

impl Validate for ReconcileTaxHistoryRequest {
    fn validate(&self, _mode: ValidationMode) -> Validation {
        Validation::ok()
    }
}

impl Validate for GetTaxHistoryRequest {
    fn validate(&self, mode: ValidationMode) -> Validation {
        require_doc_identity(
            mode,
            "GetTaxHistoryRequest",
            present(&self.company_code),
            present(&self.doc_code),
        )
    }
}

impl Validate for PostTaxRequest {
    fn validate(&self, mode: ValidationMode) -> Validation {
        require_doc_identity(
            mode,
            "PostTaxRequest",
            present(&self.company_code),
            present(&self.doc_code),
        )
    }
}

impl Validate for CommitTaxRequest {
    fn validate(&self, mode: ValidationMode) -> Validation {
        require_doc_identity(
            mode,
            "CommitTaxRequest",
            present(&self.company_code),
            present(&self.doc_code),
        )
    }
}

impl Validate for CancelTaxRequest {
    fn validate(&self, mode: ValidationMode) -> Validation {
        require_doc_identity(
            mode,
            "CancelTaxRequest",
            present(&self.company_code),
            present(&self.doc_code),
        )
    }
}

impl Validate for ApplyPaymentRequest {
    fn validate(&self, mode: ValidationMode) -> Validation {
        require_doc_identity(
            mode,
            "ApplyPaymentRequest",
            !self.company_code.trim().is_empty(),
            !self.doc_code.trim().is_empty(),
        )
    }
}
