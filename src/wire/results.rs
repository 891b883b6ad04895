//! Decoding of service results into the local result model.
//!
//! Timestamps are converted from the service clock to local time here and
//! nowhere else. Collections keep the order the service sent them in.

use super::codec::decode_get_tax;
use super::model::*;
use crate::domain::{
    BaseResult, GetTaxHistoryResult, GetTaxRequest, GetTaxResult, IsAuthorizedResult, Message,
    PingResult, ReconcileTaxHistoryResult, TaxDetail, TaxLine, TaxResult,
};
use crate::error::AdapterError;
use chrono::{DateTime, Local, Utc};

fn to_local(ts: Option<DateTime<Utc>>) -> Option<DateTime<Local>> {
    ts.map(|ts| ts.with_timezone(&Local))
}

impl From<WireMessage> for Message {
    fn from(wire: WireMessage) -> Self {
        Message {
            name: wire.name.unwrap_or_default(),
            summary: wire.summary.unwrap_or_default(),
            details: wire.details,
            help_link: wire.help_link,
            ref_object: wire.refers_to,
            severity: wire.severity,
            source: wire.source,
        }
    }
}

impl From<WireBaseResult> for BaseResult {
    fn from(wire: WireBaseResult) -> Self {
        BaseResult {
            transaction_id: wire.transaction_id.unwrap_or_default(),
            result_code: wire.result_code,
            messages: wire.messages.into_iter().map(Message::from).collect(),
        }
    }
}

impl From<WirePingResult> for PingResult {
    fn from(wire: WirePingResult) -> Self {
        PingResult {
            base: wire.base.into(),
            version: wire.version,
        }
    }
}

impl From<WireIsAuthorizedResult> for IsAuthorizedResult {
    fn from(wire: WireIsAuthorizedResult) -> Self {
        IsAuthorizedResult {
            base: wire.base.into(),
            operations: wire.operations,
            expires: to_local(wire.expires),
        }
    }
}

impl From<WireTaxDetail> for TaxDetail {
    fn from(wire: WireTaxDetail) -> Self {
        TaxDetail {
            juris_type: wire.juris_type,
            juris_code: wire.juris_code,
            juris_name: wire.juris_name,
            tax_type: wire.tax_type,
            taxable: wire.taxable,
            non_taxable: wire.non_taxable,
            exemption: wire.exemption,
            rate: wire.rate,
            tax: wire.tax,
            tax_calculated: wire.tax_calculated,
            tax_name: wire.tax_name,
            country: wire.country,
            region: wire.region,
            tax_authority_type: wire.tax_authority_type,
            tax_group: wire.tax_group,
            rate_type: wire.rate_type,
            state_assigned_no: wire.state_assigned_no,
        }
    }
}

impl From<WireTaxLine> for TaxLine {
    fn from(wire: WireTaxLine) -> Self {
        TaxLine {
            no: wire.no,
            tax_code: wire.tax_code,
            discount: wire.discount,
            taxable: wire.taxable,
            rate: wire.rate,
            tax: wire.tax,
            exemption: wire.exemption,
            taxability: wire.taxability,
            boundary_level: wire.boundary_level,
            exempt_cert_id: wire.exempt_cert_id,
            accounting_method: wire.accounting_method,
            tax_calculated: wire.tax_calculated,
            tax_included: wire.tax_included,
            tax_details: wire.tax_details.into_iter().map(TaxDetail::from).collect(),
        }
    }
}

impl From<WireGetTaxResult> for GetTaxResult {
    fn from(wire: WireGetTaxResult) -> Self {
        GetTaxResult {
            base: wire.base.into(),
            doc_type: wire.doc_type,
            doc_code: wire.doc_code,
            doc_date: wire.doc_date.to_local(),
            doc_status: wire.doc_status,
            reconciled: wire.reconciled,
            timestamp: to_local(wire.timestamp),
            total_amount: wire.total_amount,
            total_discount: wire.total_discount,
            total_exemption: wire.total_exemption,
            total_taxable: wire.total_taxable,
            total_tax: wire.total_tax,
            total_tax_calculated: wire.total_tax_calculated,
            locked: wire.locked,
            adjustment_reason: wire.adjustment_reason,
            adjustment_description: wire.adjustment_description,
            version: wire.version,
            tax_date: wire.tax_date.to_local(),
            tax_lines: wire.tax_lines.into_iter().map(TaxLine::from).collect(),
            tax_summary: wire.tax_summary.into_iter().map(TaxDetail::from).collect(),
        }
    }
}

impl From<WireReconcileTaxHistoryResult> for ReconcileTaxHistoryResult {
    fn from(wire: WireReconcileTaxHistoryResult) -> Self {
        ReconcileTaxHistoryResult {
            base: wire.base.into(),
            get_tax_results: wire
                .get_tax_results
                .into_iter()
                .map(GetTaxResult::from)
                .collect(),
            last_doc_code: wire.last_doc_code,
            record_count: wire.record_count,
        }
    }
}

/// Any result that carries only the common fields.
pub fn decode_base_only<R: TaxResult>(wire: WireBaseOnlyResult) -> R {
    R::from_base(wire.base.into())
}

/// Decode a history result, rebuilding the stored request.
///
/// # Errors
/// Propagates address resolution failures from the stored request.
pub fn decode_get_tax_history(
    wire: WireGetTaxHistoryResult,
) -> Result<GetTaxHistoryResult, AdapterError> {
    let get_tax_request = match wire.get_tax_request {
        Some(request) => decode_get_tax(request)?,
        None => GetTaxRequest::default(),
    };
    Ok(GetTaxHistoryResult {
        base: wire.base.into(),
        get_tax_request,
        get_tax_result: wire.get_tax_result.map(GetTaxResult::from).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommitTaxResult, DocStatus, SeverityLevel};
    use chrono::TimeZone;

    fn wire_result() -> WireGetTaxResult {
        serde_json::from_value(serde_json::json!({
            "TransactionId": "T-42",
            "ResultCode": "Success",
            "DocCode": "INV-1",
            "DocDate": "2024-03-01",
            "DocStatus": "Saved",
            "Timestamp": "2024-03-01T15:30:00Z",
            "TotalAmount": 150.0,
            "TotalTax": 12.75,
            "TaxLines": [
                { "No": "2", "Tax": 4.25, "Rate": 0.085 },
                { "No": "1", "Tax": 8.5, "Rate": 0.085,
                  "TaxDetails": [
                      { "JurisType": "State", "JurisName": "ILLINOIS", "Rate": 0.0625, "Tax": 6.25 },
                      { "JurisType": "City", "JurisName": "SPRINGFIELD", "Rate": 0.0225, "Tax": 2.25 }
                  ] }
            ],
            "TaxSummary": [ { "JurisType": "State", "Tax": 12.75 } ]
        }))
        .unwrap()
    }

    #[test]
    fn get_tax_result_keeps_order_and_scalars() {
        let result = GetTaxResult::from(wire_result());

        assert_eq!(result.base.transaction_id, "T-42");
        assert!(result.base.is_success());
        assert_eq!(result.doc_status, DocStatus::Saved);
        assert_eq!(result.total_tax.to_canonical_string(), "12.75");
        let nos: Vec<_> = result.tax_lines.iter().map(|l| l.no.clone().unwrap()).collect();
        assert_eq!(nos, vec!["2", "1"]);
        let details = &result.tax_line_by_no("1").unwrap().tax_details;
        assert_eq!(details[0].juris_name.as_deref(), Some("ILLINOIS"));
        assert_eq!(details[1].juris_name.as_deref(), Some("SPRINGFIELD"));
        assert_eq!(result.tax_summary.len(), 1);
    }

    #[test]
    fn timestamp_is_converted_to_local_once() {
        let result = GetTaxResult::from(wire_result());
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 15, 30, 0).unwrap();
        let ts = result.timestamp.unwrap();
        assert_eq!(ts, expected.with_timezone(&Local));
        assert_eq!(ts.with_timezone(&Utc), expected);
    }

    #[test]
    fn messages_map_refers_to() {
        let wire: WireBaseOnlyResult = serde_json::from_value(serde_json::json!({
            "ResultCode": "Error",
            "Messages": [{
                "Name": "DocumentNotFoundError",
                "Summary": "The document could not be found.",
                "RefersTo": "DocCode",
                "Severity": "Error",
                "Source": "Avalara.AvaTax.Services"
            }]
        }))
        .unwrap();

        let result: CommitTaxResult = decode_base_only(wire);
        assert_eq!(result.base.result_code, SeverityLevel::Error);
        assert_eq!(result.base.messages[0].ref_object.as_deref(), Some("DocCode"));
        assert_eq!(result.base.messages[0].name, "DocumentNotFoundError");
    }

    #[test]
    fn history_without_request_decodes_to_empty_request() {
        let wire = WireGetTaxHistoryResult {
            get_tax_result: Some(wire_result()),
            ..WireGetTaxHistoryResult::default()
        };
        let history = decode_get_tax_history(wire).unwrap();
        assert!(history.get_tax_request.lines().is_empty());
        assert_eq!(history.get_tax_result.doc_code.as_deref(), Some("INV-1"));
    }

    #[test]
    fn reconcile_keeps_result_order() {
        let mut first = wire_result();
        first.doc_code = Some("A".into());
        let mut second = wire_result();
        second.doc_code = Some("B".into());
        let wire = WireReconcileTaxHistoryResult {
            get_tax_results: vec![first, second],
            last_doc_code: Some("B".into()),
            record_count: 2,
            ..WireReconcileTaxHistoryResult::default()
        };

        let result = ReconcileTaxHistoryResult::from(wire);
        let codes: Vec<_> = result
            .get_tax_results
            .iter()
            .map(|r| r.doc_code.clone().unwrap())
            .collect();
        assert_eq!(codes, vec!["A", "B"]);
        assert_eq!(result.record_count, 2);
    }
}
