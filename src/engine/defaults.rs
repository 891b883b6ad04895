//! Default substitution applied at the serialization boundary.
//!
//! The local model keeps "not specified" as `None`; this module decides what
//! the service receives in its place.

use crate::domain::{Decimal, GetTaxRequest, Line, TaxOverride};
use chrono::NaiveDate;

/// The service's "date not specified" value, 0001-01-01.
pub fn min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Exchange rate sent on the wire: unset or zero means 1.0.
pub fn effective_exchange_rate(rate: Option<Decimal>) -> Decimal {
    match rate {
        Some(rate) if !rate.is_zero() => rate,
        _ => Decimal::one(),
    }
}

/// Effective date of the exchange rate: unset, or earlier than the sentinel,
/// means the sentinel.
pub fn effective_rate_date(date: Option<NaiveDate>) -> NaiveDate {
    let min = min_date();
    match date {
        Some(date) if date > min => date,
        _ => min,
    }
}

/// An active override with no date of its own takes the document date.
pub fn override_date(tax_override: &TaxOverride, doc_date: Option<NaiveDate>) -> Option<NaiveDate> {
    match tax_override.tax_date {
        None if tax_override.is_active() => doc_date,
        date => date,
    }
}

/// Trim a text field; blank becomes unset.
pub fn clean_text(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Request-level defaults that come from configuration rather than the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultsResolver {
    pub default_currency_code: Option<String>,
}

impl DefaultsResolver {
    pub fn new(default_currency_code: Option<String>) -> Self {
        Self {
            default_currency_code: clean_text(default_currency_code),
        }
    }

    /// Normalize the caller's text fields and fill configured defaults.
    ///
    /// Leaves addresses, amounts and dates alone; those are resolved by
    /// consolidation and at encoding time.
    pub fn apply(&self, request: &mut GetTaxRequest) {
        request.company_code = clean_text(request.company_code.take());
        request.doc_code = clean_text(request.doc_code.take());
        request.salesperson_code = clean_text(request.salesperson_code.take());
        request.customer_code = clean_text(request.customer_code.take());
        request.customer_usage_type = clean_text(request.customer_usage_type.take());
        request.exemption_no = clean_text(request.exemption_no.take());
        request.location_code = clean_text(request.location_code.take());
        request.purchase_order_no = clean_text(request.purchase_order_no.take());
        request.reference_code = clean_text(request.reference_code.take());
        request.business_identification_no = clean_text(request.business_identification_no.take());
        request.currency_code = clean_text(request.currency_code.take())
            .or_else(|| self.default_currency_code.clone());
        clean_override(&mut request.tax_override);

        for line in request.lines.iter_mut() {
            clean_line(line);
        }
    }
}

fn clean_line(line: &mut Line) {
    line.no = clean_text(line.no.take());
    line.item_code = clean_text(line.item_code.take());
    line.tax_code = clean_text(line.tax_code.take());
    line.rev_acct = clean_text(line.rev_acct.take());
    line.ref1 = clean_text(line.ref1.take());
    line.ref2 = clean_text(line.ref2.take());
    line.exemption_no = clean_text(line.exemption_no.take());
    line.description = clean_text(line.description.take());
    line.customer_usage_type = clean_text(line.customer_usage_type.take());
    line.business_identification_no = clean_text(line.business_identification_no.take());
    clean_override(&mut line.tax_override);
}

fn clean_override(tax_override: &mut TaxOverride) {
    tax_override.reason = clean_text(tax_override.reason.take());
}
