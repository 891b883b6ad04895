//! Result types returned by the tax adapter.
//!
//! Every operation returns one of these, including on failure: errors are
//! folded into [`BaseResult`] rather than surfaced as `Err`.

use crate::domain::{
    AccountingMethod, BoundaryLevel, Decimal, DocStatus, DocumentType, GetTaxRequest,
    JurisdictionType, SeverityLevel, TaxType,
};
use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

/// One diagnostic message attached to a result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub name: String,
    pub summary: String,
    pub details: Option<String>,
    pub help_link: Option<String>,
    pub ref_object: Option<String>,
    pub severity: SeverityLevel,
    pub source: Option<String>,
}

/// Fields shared by every result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResult {
    pub transaction_id: String,
    pub result_code: SeverityLevel,
    pub messages: Vec<Message>,
}

impl BaseResult {
    /// A result carrying a single failure message.
    pub fn failure(severity: SeverityLevel, name: &str, summary: String) -> Self {
        Self {
            transaction_id: String::new(),
            result_code: severity,
            messages: vec![Message {
                name: name.to_string(),
                summary,
                severity,
                source: Some("Adapter".to_string()),
                ..Message::default()
            }],
        }
    }

    pub fn is_success(&self) -> bool {
        !self.result_code.is_failure()
    }
}

/// Implemented by every result so failures can be folded into any of them.
pub trait TaxResult: Default {
    fn base_mut(&mut self) -> &mut BaseResult;

    fn from_base(base: BaseResult) -> Self {
        let mut result = Self::default();
        *result.base_mut() = base;
        result
    }
}

macro_rules! base_only_result {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
            #[serde(rename_all = "camelCase")]
            pub struct $name {
                #[serde(flatten)]
                pub base: BaseResult,
            }

            impl TaxResult for $name {
                fn base_mut(&mut self) -> &mut BaseResult {
                    &mut self.base
                }
            }
        )+
    };
}

base_only_result!(PostTaxResult, CommitTaxResult, CancelTaxResult, ApplyPaymentResult);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PingResult {
    #[serde(flatten)]
    pub base: BaseResult,
    pub version: Option<String>,
}

impl TaxResult for PingResult {
    fn base_mut(&mut self) -> &mut BaseResult {
        &mut self.base
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IsAuthorizedResult {
    #[serde(flatten)]
    pub base: BaseResult,
    pub operations: Option<String>,
    pub expires: Option<DateTime<Local>>,
}

impl TaxResult for IsAuthorizedResult {
    fn base_mut(&mut self) -> &mut BaseResult {
        &mut self.base
    }
}

/// Per-jurisdiction breakdown of tax on a line or in the document summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxDetail {
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

/// Calculated tax for one request line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxLine {
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
    pub tax_details: Vec<TaxDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTaxResult {
    #[serde(flatten)]
    pub base: BaseResult,
    pub doc_type: DocumentType,
    pub doc_code: Option<String>,
    pub doc_date: Option<NaiveDate>,
    pub doc_status: DocStatus,
    pub reconciled: bool,
    /// Last modification time on the service, in local time.
    pub timestamp: Option<DateTime<Local>>,
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
    pub tax_date: Option<NaiveDate>,
    pub tax_lines: Vec<TaxLine>,
    pub tax_summary: Vec<TaxDetail>,
}

impl GetTaxResult {
    /// First tax line whose number matches `line_no`.
    pub fn tax_line_by_no(&self, line_no: &str) -> Option<&TaxLine> {
        let wanted = line_no.trim();
        self.tax_lines
            .iter()
            .find(|line| line.no.as_deref().map(str::trim) == Some(wanted))
    }
}

impl TaxResult for GetTaxResult {
    fn base_mut(&mut self) -> &mut BaseResult {
        &mut self.base
    }
}

/// Result of an adjustment; same shape as a calculation result.
pub type AdjustTaxResult = GetTaxResult;

/// A stored document: the request as the service recorded it and its result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetTaxHistoryResult {
    pub base: BaseResult,
    pub get_tax_request: GetTaxRequest,
    pub get_tax_result: GetTaxResult,
}

impl TaxResult for GetTaxHistoryResult {
    fn base_mut(&mut self) -> &mut BaseResult {
        &mut self.base
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileTaxHistoryResult {
    #[serde(flatten)]
    pub base: BaseResult,
    pub get_tax_results: Vec<GetTaxResult>,
    pub last_doc_code: Option<String>,
    pub record_count: i32,
}

impl TaxResult for ReconcileTaxHistoryResult {
    fn base_mut(&mut self) -> &mut BaseResult {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_carries_single_message() {
        let base = BaseResult::failure(SeverityLevel::Exception, "Boom", "went wrong".into());
        assert!(!base.is_success());
        assert_eq!(base.messages.len(), 1);
        assert_eq!(base.messages[0].name, "Boom");
        assert_eq!(base.messages[0].source.as_deref(), Some("Adapter"));
    }

    #[test]
    fn from_base_keeps_other_fields_default() {
        let base = BaseResult::failure(SeverityLevel::Error, "Validation", "bad".into());
        let result = GetTaxResult::from_base(base.clone());
        assert_eq!(result.base, base);
        assert!(result.tax_lines.is_empty());
        assert!(result.total_tax.is_zero());
    }

    #[test]
    fn tax_line_lookup_by_no() {
        let result = GetTaxResult {
            tax_lines: vec![
                TaxLine {
                    no: Some("1".into()),
                    ..TaxLine::default()
                },
                TaxLine {
                    no: Some("2".into()),
                    ..TaxLine::default()
                },
            ],
            ..GetTaxResult::default()
        };
        assert_eq!(result.tax_line_by_no("2").unwrap().no.as_deref(), Some("2"));
        assert!(result.tax_line_by_no("9").is_none());
    }
}
