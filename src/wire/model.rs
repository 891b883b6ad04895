//! Wire DTOs: the flat JSON shapes of the remote tax service.
//!
//! Field names follow the service schema exactly (PascalCase). Every DTO
//! decodes with missing fields defaulted, so partial payloads from the service
//! are accepted.

use super::dates::{timestamp, WireDate};
use crate::domain::{
    AccountingMethod, BoundaryLevel, CancelCode, Decimal, DetailLevel, DocStatus, DocumentType,
    JurisdictionType, ServiceMode, SeverityLevel, TaxOverrideType, TaxType,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Decode an explicit `null` as the field's default. The service sends `null`
/// for empty collections and blank codes.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireAddress {
    #[serde(deserialize_with = "null_as_default")]
    pub address_code: String,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub line3: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub tax_region_id: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireTaxOverride {
    #[serde(rename = "Type")]
    pub override_type: TaxOverrideType,
    pub amount: Decimal,
    pub date: WireDate,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireLine {
    pub no: Option<String>,
    /// Empty when the line has no origin of its own.
    #[serde(deserialize_with = "null_as_default")]
    pub origin_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub destination_code: String,
    pub item_code: Option<String>,
    pub tax_code: Option<String>,
    pub qty: Decimal,
    pub amount: Decimal,
    pub discounted: bool,
    pub rev_acct: Option<String>,
    pub ref1: Option<String>,
    pub ref2: Option<String>,
    pub exemption_no: Option<String>,
    pub customer_usage_type: Option<String>,
    pub description: Option<String>,
    pub tax_override: Option<WireTaxOverride>,
    pub tax_included: bool,
    pub business_identification_no: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireGetTaxRequest {
    pub company_code: Option<String>,
    pub doc_type: DocumentType,
    pub doc_code: Option<String>,
    pub doc_date: WireDate,
    pub salesperson_code: Option<String>,
    pub customer_code: Option<String>,
    pub customer_usage_type: Option<String>,
    pub discount: Decimal,
    pub exemption_no: Option<String>,
    pub detail_level: DetailLevel,
    pub purchase_order_no: Option<String>,
    pub reference_code: Option<String>,
    pub location_code: Option<String>,
    pub commit: bool,
    pub business_identification_no: Option<String>,
    /// `null` unless an override is active.
    pub tax_override: Option<WireTaxOverride>,
    pub currency_code: Option<String>,
    pub service_mode: ServiceMode,
    pub payment_date: WireDate,
    pub exchange_rate: Decimal,
    pub exchange_rate_eff_date: WireDate,
    #[serde(deserialize_with = "null_as_default")]
    pub origin_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub destination_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub addresses: Vec<WireAddress>,
    #[serde(deserialize_with = "null_as_default")]
    pub lines: Vec<WireLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireAdjustTaxRequest {
    pub adjustment_reason: i32,
    pub adjustment_description: Option<String>,
    pub get_tax_request: WireGetTaxRequest,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireGetTaxHistoryRequest {
    pub company_code: Option<String>,
    pub doc_type: DocumentType,
    pub doc_code: Option<String>,
    pub detail_level: DetailLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WirePostTaxRequest {
    pub company_code: Option<String>,
    pub doc_type: DocumentType,
    pub doc_code: Option<String>,
    pub doc_date: WireDate,
    pub total_amount: Decimal,
    pub total_tax: Decimal,
    pub commit: bool,
    pub new_doc_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireCommitTaxRequest {
    pub company_code: Option<String>,
    pub doc_type: DocumentType,
    pub doc_code: Option<String>,
    pub new_doc_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireCancelTaxRequest {
    pub company_code: Option<String>,
    pub doc_type: DocumentType,
    pub doc_code: Option<String>,
    pub cancel_code: CancelCode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireReconcileTaxHistoryRequest {
    pub company_code: Option<String>,
    pub start_date: WireDate,
    pub end_date: WireDate,
    pub doc_status: DocStatus,
    pub doc_type: DocumentType,
    pub last_doc_code: Option<String>,
    pub page_size: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireApplyPaymentRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub company_code: String,
    pub doc_type: DocumentType,
    #[serde(deserialize_with = "null_as_default")]
    pub doc_code: String,
    pub payment_date: WireDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WirePingRequest {
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireIsAuthorizedRequest {
    pub operations: Option<String>,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireMessage {
    pub name: Option<String>,
    pub summary: Option<String>,
    pub details: Option<String>,
    pub help_link: Option<String>,
    pub refers_to: Option<String>,
    pub severity: SeverityLevel,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireBaseResult {
    pub transaction_id: Option<String>,
    pub result_code: SeverityLevel,
    #[serde(deserialize_with = "null_as_default")]
    pub messages: Vec<WireMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WirePingResult {
    #[serde(flatten)]
    pub base: WireBaseResult,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireIsAuthorizedResult {
    #[serde(flatten)]
    pub base: WireBaseResult,
    pub operations: Option<String>,
    #[serde(with = "timestamp")]
    pub expires: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireTaxDetail {
    pub juris_type: JurisdictionType,
    pub juris_code: Option<String>,
    pub juris_name: Option<String>,
    pub tax_type: TaxType,
    pub taxable: Decimal,
    pub non_taxable: Decimal,
    pub exemption: Decimal,
    pub rate: f64,
    pub tax: Decimal,
    pub tax_calculated: Decimal,
    pub tax_name: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub tax_authority_type: i32,
    pub tax_group: Option<String>,
    pub rate_type: Option<String>,
    pub state_assigned_no: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireTaxLine {
    pub no: Option<String>,
    pub tax_code: Option<String>,
    pub discount: Decimal,
    pub taxable: Decimal,
    pub rate: f64,
    pub tax: Decimal,
    pub exemption: Decimal,
    pub taxability: bool,
    pub boundary_level: BoundaryLevel,
    pub exempt_cert_id: i32,
    pub accounting_method: AccountingMethod,
    pub tax_calculated: Decimal,
    pub tax_included: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub tax_details: Vec<WireTaxDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireGetTaxResult {
    #[serde(flatten)]
    pub base: WireBaseResult,
    pub doc_type: DocumentType,
    pub doc_code: Option<String>,
    pub doc_date: WireDate,
    pub doc_status: DocStatus,
    pub reconciled: bool,
    #[serde(with = "timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    pub total_amount: Decimal,
    pub total_discount: Decimal,
    pub total_exemption: Decimal,
    pub total_taxable: Decimal,
    pub total_tax: Decimal,
    pub total_tax_calculated: Decimal,
    pub locked: bool,
    pub adjustment_reason: i32,
    pub adjustment_description: Option<String>,
    pub version: i32,
    pub tax_date: WireDate,
    #[serde(deserialize_with = "null_as_default")]
    pub tax_lines: Vec<WireTaxLine>,
    #[serde(deserialize_with = "null_as_default")]
    pub tax_summary: Vec<WireTaxDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireGetTaxHistoryResult {
    #[serde(flatten)]
    pub base: WireBaseResult,
    pub get_tax_request: Option<WireGetTaxRequest>,
    pub get_tax_result: Option<WireGetTaxResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireReconcileTaxHistoryResult {
    #[serde(flatten)]
    pub base: WireBaseResult,
    #[serde(deserialize_with = "null_as_default")]
    pub get_tax_results: Vec<WireGetTaxResult>,
    pub last_doc_code: Option<String>,
    pub record_count: i32,
}

/// Results that carry nothing beyond the common fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireBaseOnlyResult {
    #[serde(flatten)]
    pub base: WireBaseResult,
}
