//! Request types accepted by the tax adapter.

use crate::domain::{
    Address, AddressCollection, AddressRef, CancelCode, Decimal, DetailLevel, DocStatus,
    DocumentType, Line, Lines, ServiceMode, TaxOverride,
};
use chrono::NaiveDate;

/// The aggregate root of a tax calculation.
///
/// Built by the caller through setters and [`GetTaxRequest::add_line`],
/// consolidated once before serialization, and not mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetTaxRequest {
    pub(crate) origin: Option<AddressRef>,
    pub(crate) destination: Option<AddressRef>,
    pub(crate) addresses: AddressCollection,
    pub(crate) lines: Lines,
    pub company_code: Option<String>,
    pub doc_type: DocumentType,
    pub doc_code: Option<String>,
    pub doc_date: Option<NaiveDate>,
    pub salesperson_code: Option<String>,
    pub customer_code: Option<String>,
    pub customer_usage_type: Option<String>,
    pub discount: Decimal,
    pub exemption_no: Option<String>,
    pub location_code: Option<String>,
    pub detail_level: DetailLevel,
    pub purchase_order_no: Option<String>,
    pub reference_code: Option<String>,
    pub commit: bool,
    pub business_identification_no: Option<String>,
    pub tax_override: TaxOverride,
    pub currency_code: Option<String>,
    pub service_mode: ServiceMode,
    pub payment_date: Option<NaiveDate>,
    /// Unset or zero is sent as 1.0.
    pub exchange_rate: Option<Decimal>,
    pub exchange_rate_eff_date: Option<NaiveDate>,
}

impl GetTaxRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_origin_address(&mut self, address: Address) {
        self.origin = Some(AddressRef::detached(address));
    }

    pub fn set_destination_address(&mut self, address: Address) {
        self.destination = Some(AddressRef::detached(address));
    }

    pub fn origin_ref(&self) -> Option<&AddressRef> {
        self.origin.as_ref()
    }

    pub fn destination_ref(&self) -> Option<&AddressRef> {
        self.destination.as_ref()
    }

    pub fn origin_address(&self) -> Option<&Address> {
        self.origin.as_ref().and_then(|r| self.resolve(r))
    }

    pub fn destination_address(&self) -> Option<&Address> {
        self.destination.as_ref().and_then(|r| self.resolve(r))
    }

    /// Look up the address a header or line reference points at.
    pub fn resolve<'a>(&'a self, reference: &'a AddressRef) -> Option<&'a Address> {
        match reference {
            AddressRef::Detached { address, .. } => Some(address),
            AddressRef::Registered(code) => self.addresses.find_by_code(code),
        }
    }

    pub fn addresses(&self) -> &AddressCollection {
        &self.addresses
    }

    pub fn lines(&self) -> &Lines {
        &self.lines
    }

    pub fn add_line(&mut self, line: Line) {
        self.lines.add(line);
    }
}

/// Re-submission of a previously calculated document with an adjustment reason.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjustTaxRequest {
    pub adjustment_reason: i32,
    pub adjustment_description: Option<String>,
    pub get_tax_request: GetTaxRequest,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetTaxHistoryRequest {
    pub company_code: Option<String>,
    pub doc_type: DocumentType,
    pub doc_code: Option<String>,
    pub detail_level: DetailLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostTaxRequest {
    pub company_code: Option<String>,
    pub doc_type: DocumentType,
    pub doc_code: Option<String>,
    pub doc_date: Option<NaiveDate>,
    pub total_amount: Decimal,
    pub total_tax: Decimal,
    pub commit: bool,
    pub new_doc_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitTaxRequest {
    pub company_code: Option<String>,
    pub doc_type: DocumentType,
    pub doc_code: Option<String>,
    pub new_doc_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelTaxRequest {
    pub company_code: Option<String>,
    pub doc_type: DocumentType,
    pub doc_code: Option<String>,
    pub cancel_code: CancelCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileTaxHistoryRequest {
    pub company_code: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub doc_status: DocStatus,
    pub doc_type: DocumentType,
    pub last_doc_code: Option<String>,
    pub page_size: i32,
}

impl Default for ReconcileTaxHistoryRequest {
    fn default() -> Self {
        Self {
            company_code: None,
            start_date: None,
            end_date: None,
            doc_status: DocStatus::Any,
            doc_type: DocumentType::Any,
            last_doc_code: None,
            page_size: 0,
        }
    }
}

/// Records the payment date of a cash-basis document.
///
/// Unlike the other requests, company and document codes default to `""`
/// rather than unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyPaymentRequest {
    pub company_code: String,
    pub doc_type: DocumentType,
    pub doc_code: String,
    pub payment_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_addresses_resolve_while_detached() {
        let mut req = GetTaxRequest::new();
        req.set_origin_address(Address::new().with_line1("1 Main St"));

        assert_eq!(req.origin_address().unwrap().line1(), Some("1 Main St"));
        assert!(req.destination_address().is_none());
        assert!(req.addresses().is_empty());
    }

    #[test]
    fn defaults_follow_service_conventions() {
        let req = GetTaxRequest::new();
        assert_eq!(req.detail_level, DetailLevel::Document);
        assert_eq!(req.doc_type, DocumentType::SalesOrder);
        assert!(!req.tax_override.is_active());
        assert!(req.exchange_rate.is_none());

        let reconcile = ReconcileTaxHistoryRequest::default();
        assert_eq!(reconcile.doc_status, DocStatus::Any);
        assert_eq!(reconcile.doc_type, DocumentType::Any);

        let payment = ApplyPaymentRequest::default();
        assert_eq!(payment.company_code, "");
        assert_eq!(payment.doc_type, DocumentType::SalesOrder);
    }
}
