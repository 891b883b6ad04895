use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;
use std::sync::Arc;
use taxbridge::domain::{CancelCode, DocStatus, DocumentType, SeverityLevel};
use taxbridge::engine::{DefaultsResolver, ValidationMode};
use taxbridge::{
    ApplyPaymentRequest, CancelTaxRequest, CommitTaxRequest, Decimal, MockTaxService, Operation,
    PostTaxRequest, ReconcileTaxHistoryRequest, ServiceError, TaxSvc,
};

fn svc(mock: &MockTaxService, mode: ValidationMode) -> TaxSvc {
    TaxSvc::with_options(Arc::new(mock.clone()), mode, DefaultsResolver::default())
}

fn ok() -> serde_json::Value {
    json!({ "TransactionId": "1", "ResultCode": "Success" })
}

#[tokio::test]
async fn test_post_commit_cancel_sequence() {
    let mock = MockTaxService::new()
        .with_response(Operation::PostTax, ok())
        .with_response(Operation::CommitTax, ok())
        .with_response(Operation::CancelTax, ok());
    let svc = svc(&mock, ValidationMode::Strict);

    let post = PostTaxRequest {
        company_code: Some("DEFAULT".to_string()),
        doc_type: DocumentType::SalesInvoice,
        doc_code: Some("INV-1001".to_string()),
        doc_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        total_amount: Decimal::from_str_canonical("150").unwrap(),
        total_tax: Decimal::from_str_canonical("12.75").unwrap(),
        commit: false,
        new_doc_code: None,
    };
    assert!(svc.post_tax(&post).await.base.is_success());

    let commit = CommitTaxRequest {
        company_code: Some("DEFAULT".to_string()),
        doc_type: DocumentType::SalesInvoice,
        doc_code: Some("INV-1001".to_string()),
        new_doc_code: Some("INV-1001-F".to_string()),
    };
    assert!(svc.commit_tax(&commit).await.base.is_success());

    let cancel = CancelTaxRequest {
        company_code: Some("DEFAULT".to_string()),
        doc_type: DocumentType::SalesInvoice,
        doc_code: Some("INV-1001-F".to_string()),
        cancel_code: CancelCode::DocVoided,
    };
    assert!(svc.cancel_tax(&cancel).await.base.is_success());

    let ops: Vec<_> = mock.calls().into_iter().map(|(op, _)| op).collect();
    assert_eq!(
        ops,
        vec![Operation::PostTax, Operation::CommitTax, Operation::CancelTax]
    );

    let sent = mock.last_payload(Operation::PostTax).unwrap();
    assert_eq!(sent["DocDate"], "2024-03-01");
    assert_eq!(sent["TotalTax"], 12.75);
    assert!(sent["NewDocCode"].is_null());
    assert_eq!(mock.last_payload(Operation::CancelTax).unwrap()["CancelCode"], "DocVoided");
}

#[tokio::test]
async fn test_strict_mode_requires_document_identity() {
    let mock = MockTaxService::new().with_response(Operation::CommitTax, ok());
    let result = svc(&mock, ValidationMode::Strict)
        .commit_tax(&CommitTaxRequest::default())
        .await;

    assert_eq!(result.base.result_code, SeverityLevel::Error);
    assert_eq!(
        result.base.messages[0].summary,
        "Required fields for CommitTaxRequest are [CompanyCode, DocCode, and DocType]. "
    );
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_reconcile_pages_in_order() {
    let mock = MockTaxService::new().with_response(
        Operation::ReconcileTaxHistory,
        json!({
            "ResultCode": "Success",
            "GetTaxResults": [
                { "DocCode": "INV-1", "DocStatus": "Committed", "TotalTax": 1.0 },
                { "DocCode": "INV-2", "DocStatus": "Committed", "TotalTax": 2.0 },
                { "DocCode": "INV-3", "DocStatus": "Cancelled", "TotalTax": 0.0 }
            ],
            "LastDocCode": "INV-3",
            "RecordCount": 3
        }),
    );

    let request = ReconcileTaxHistoryRequest {
        company_code: Some("DEFAULT".to_string()),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        end_date: NaiveDate::from_ymd_opt(2024, 3, 31),
        page_size: 100,
        ..ReconcileTaxHistoryRequest::default()
    };
    let result = svc(&mock, ValidationMode::Strict)
        .reconcile_tax_history(&request)
        .await;

    assert!(result.base.is_success());
    assert_eq!(result.record_count, 3);
    assert_eq!(result.last_doc_code.as_deref(), Some("INV-3"));
    let codes: Vec<_> = result
        .get_tax_results
        .iter()
        .map(|r| r.doc_code.as_deref().unwrap())
        .collect();
    assert_eq!(codes, vec!["INV-1", "INV-2", "INV-3"]);
    assert_eq!(result.get_tax_results[2].doc_status, DocStatus::Cancelled);

    let sent = mock.last_payload(Operation::ReconcileTaxHistory).unwrap();
    assert_eq!(sent["DocStatus"], "Any");
    assert_eq!(sent["DocType"], "Any");
    assert_eq!(sent["StartDate"], "2024-01-01");
    assert!(sent["LastDocCode"].is_null());
}

#[tokio::test]
async fn test_apply_payment_sends_empty_codes() {
    let mock = MockTaxService::new().with_response(Operation::ApplyPayment, ok());
    let request = ApplyPaymentRequest {
        payment_date: NaiveDate::from_ymd_opt(2024, 4, 15),
        ..ApplyPaymentRequest::default()
    };

    let result = svc(&mock, ValidationMode::Permissive)
        .apply_payment(&request)
        .await;
    assert!(result.base.is_success());

    let sent = mock.last_payload(Operation::ApplyPayment).unwrap();
    assert_eq!(sent["CompanyCode"], "");
    assert_eq!(sent["DocCode"], "");
    assert_eq!(sent["DocType"], "SalesOrder");
    assert_eq!(sent["PaymentDate"], "2024-04-15");
}

#[tokio::test]
async fn test_is_authorized_converts_expiry_to_local() {
    let mock = MockTaxService::new().with_response(
        Operation::IsAuthorized,
        json!({
            "ResultCode": "Success",
            "Operations": "Ping,GetTax",
            "Expires": "2024-06-30T23:59:59Z"
        }),
    );

    let result = svc(&mock, ValidationMode::Permissive)
        .is_authorized("Ping,GetTax")
        .await;

    assert!(result.base.is_success());
    assert_eq!(result.operations.as_deref(), Some("Ping,GetTax"));
    let expected = Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap();
    assert_eq!(result.expires.unwrap().with_timezone(&Utc), expected);
}

#[tokio::test]
async fn test_rate_limited_service_yields_error_result() {
    let mock = MockTaxService::new().with_failure(Operation::Ping, ServiceError::RateLimited);

    let result = svc(&mock, ValidationMode::Permissive).ping("hello").await;

    assert_eq!(result.base.result_code, SeverityLevel::Error);
    assert_eq!(result.base.messages[0].summary, "Service call failed: Rate limited");
    assert!(result.version.is_none());
}
