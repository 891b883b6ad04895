//! Conversion between local requests and their wire DTOs.
//!
//! Encoding expects a consolidated request: every header and line address
//! must be registered in the request's collection. Decoding rebuilds a fresh
//! collection from the flat address array and reattaches header and lines by
//! code.

use super::dates::WireDate;
use super::model::*;
use crate::domain::{
    Address, AddressCode, AddressCollection, AddressRef, AdjustTaxRequest, ApplyPaymentRequest,
    CancelTaxRequest, CommitTaxRequest, GetTaxHistoryRequest, GetTaxRequest, Line, Lines,
    PostTaxRequest, ReconcileTaxHistoryRequest, TaxOverride,
};
use crate::engine::{clean_text, effective_exchange_rate, effective_rate_date, override_date};
use crate::error::AdapterError;
use chrono::NaiveDate;
use tracing::debug;

// ---------------------------------------------------------------------------
// Local -> wire
// ---------------------------------------------------------------------------

/// Encode a consolidated `GetTaxRequest`.
///
/// # Errors
/// `UnresolvedAddressReference` if a header or line points at an address
/// that is not in the request's collection.
pub fn encode_get_tax(request: &GetTaxRequest) -> Result<WireGetTaxRequest, AdapterError> {
    debug!("Copying GetTaxRequest into wire object");
    let addresses = &request.addresses;

    let wire_addresses = addresses
        .iter()
        .map(|(code, address)| encode_address(code, address))
        .collect();

    let mut wire_lines = Vec::with_capacity(request.lines.len());
    for line in &request.lines {
        wire_lines.push(encode_line(line, addresses)?);
    }

    Ok(WireGetTaxRequest {
        company_code: request.company_code.clone(),
        doc_type: request.doc_type,
        doc_code: request.doc_code.clone(),
        doc_date: WireDate::from_local(request.doc_date),
        salesperson_code: request.salesperson_code.clone(),
        customer_code: request.customer_code.clone(),
        customer_usage_type: request.customer_usage_type.clone(),
        discount: request.discount,
        exemption_no: request.exemption_no.clone(),
        detail_level: request.detail_level,
        purchase_order_no: request.purchase_order_no.clone(),
        reference_code: request.reference_code.clone(),
        location_code: request.location_code.clone(),
        commit: request.commit,
        business_identification_no: request.business_identification_no.clone(),
        tax_override: encode_override(&request.tax_override),
        currency_code: request.currency_code.clone(),
        service_mode: request.service_mode,
        payment_date: WireDate::from_local(request.payment_date),
        exchange_rate: effective_exchange_rate(request.exchange_rate),
        exchange_rate_eff_date: WireDate::new(effective_rate_date(request.exchange_rate_eff_date)),
        origin_code: encode_ref(request.origin.as_ref(), addresses)?,
        destination_code: encode_ref(request.destination.as_ref(), addresses)?,
        addresses: wire_addresses,
        lines: wire_lines,
    })
}

pub fn encode_adjust_tax(request: &AdjustTaxRequest) -> Result<WireAdjustTaxRequest, AdapterError> {
    Ok(WireAdjustTaxRequest {
        adjustment_reason: request.adjustment_reason,
        adjustment_description: clean_text(request.adjustment_description.clone()),
        get_tax_request: encode_get_tax(&request.get_tax_request)?,
    })
}

fn encode_address(code: &AddressCode, address: &Address) -> WireAddress {
    WireAddress {
        address_code: code.to_string(),
        line1: address.line1().map(str::to_string),
        line2: address.line2().map(str::to_string),
        line3: address.line3().map(str::to_string),
        city: address.city().map(str::to_string),
        region: address.region().map(str::to_string),
        postal_code: address.postal_code().map(str::to_string),
        country: address.country().map(str::to_string),
        tax_region_id: address.tax_region_id(),
    }
}

/// Canonical code of a reference, or `""` when unset.
fn encode_ref(
    reference: Option<&AddressRef>,
    addresses: &AddressCollection,
) -> Result<String, AdapterError> {
    match reference {
        None => Ok(String::new()),
        Some(reference) => addresses
            .canonical_code(reference.code())
            .map(|code| code.to_string())
            .ok_or_else(|| AdapterError::UnresolvedAddressReference {
                code: reference.code().to_string(),
            }),
    }
}

fn encode_line(line: &Line, addresses: &AddressCollection) -> Result<WireLine, AdapterError> {
    Ok(WireLine {
        no: line.no.clone(),
        origin_code: encode_ref(line.origin_ref(), addresses)?,
        destination_code: encode_ref(line.destination_ref(), addresses)?,
        item_code: line.item_code.clone(),
        tax_code: line.tax_code.clone(),
        qty: line.qty,
        amount: line.amount,
        discounted: line.discounted,
        rev_acct: line.rev_acct.clone(),
        ref1: line.ref1.clone(),
        ref2: line.ref2.clone(),
        exemption_no: line.exemption_no.clone(),
        customer_usage_type: line.customer_usage_type.clone(),
        description: line.description.clone(),
        tax_override: encode_override(&line.tax_override),
        tax_included: line.tax_included,
        business_identification_no: line.business_identification_no.clone(),
    })
}

/// Inert overrides are never sent.
fn encode_override(tax_override: &TaxOverride) -> Option<WireTaxOverride> {
    if !tax_override.is_active() {
        return None;
    }
    Some(WireTaxOverride {
        override_type: tax_override.override_type,
        amount: tax_override.tax_amount,
        date: WireDate::from_local(tax_override.tax_date),
        reason: tax_override.reason.clone(),
    })
}

impl From<&GetTaxHistoryRequest> for WireGetTaxHistoryRequest {
    fn from(request: &GetTaxHistoryRequest) -> Self {
        WireGetTaxHistoryRequest {
            company_code: clean_text(request.company_code.clone()),
            doc_type: request.doc_type,
            doc_code: clean_text(request.doc_code.clone()),
            detail_level: request.detail_level,
        }
    }
}

impl From<&PostTaxRequest> for WirePostTaxRequest {
    fn from(request: &PostTaxRequest) -> Self {
        WirePostTaxRequest {
            company_code: clean_text(request.company_code.clone()),
            doc_type: request.doc_type,
            doc_code: clean_text(request.doc_code.clone()),
            doc_date: WireDate::from_local(request.doc_date),
            total_amount: request.total_amount,
            total_tax: request.total_tax,
            commit: request.commit,
            new_doc_code: clean_text(request.new_doc_code.clone()),
        }
    }
}

impl From<&CommitTaxRequest> for WireCommitTaxRequest {
    fn from(request: &CommitTaxRequest) -> Self {
        WireCommitTaxRequest {
            company_code: clean_text(request.company_code.clone()),
            doc_type: request.doc_type,
            doc_code: clean_text(request.doc_code.clone()),
            new_doc_code: clean_text(request.new_doc_code.clone()),
        }
    }
}

impl From<&CancelTaxRequest> for WireCancelTaxRequest {
    fn from(request: &CancelTaxRequest) -> Self {
        WireCancelTaxRequest {
            company_code: clean_text(request.company_code.clone()),
            doc_type: request.doc_type,
            doc_code: clean_text(request.doc_code.clone()),
            cancel_code: request.cancel_code,
        }
    }
}

impl From<&ReconcileTaxHistoryRequest> for WireReconcileTaxHistoryRequest {
    fn from(request: &ReconcileTaxHistoryRequest) -> Self {
        WireReconcileTaxHistoryRequest {
            company_code: clean_text(request.company_code.clone()),
            start_date: WireDate::from_local(request.start_date),
            end_date: WireDate::from_local(request.end_date),
            doc_status: request.doc_status,
            doc_type: request.doc_type,
            last_doc_code: clean_text(request.last_doc_code.clone()),
            page_size: request.page_size,
        }
    }
}

impl From<&ApplyPaymentRequest> for WireApplyPaymentRequest {
    fn from(request: &ApplyPaymentRequest) -> Self {
        WireApplyPaymentRequest {
            company_code: request.company_code.trim().to_string(),
            doc_type: request.doc_type,
            doc_code: request.doc_code.trim().to_string(),
            payment_date: WireDate::from_local(request.payment_date),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire -> local
// ---------------------------------------------------------------------------

/// Rebuild a `GetTaxRequest` read back from the service.
///
/// A line with an empty origin or destination code takes the header's code
/// for that dimension before resolution. An active override without a date
/// takes the document date.
///
/// # Errors
/// - `UnresolvedAddressReference` for a header or line code that names no
///   address in the payload.
/// - `MalformedPayload` when one code is used for two different addresses.
pub fn decode_get_tax(wire: WireGetTaxRequest) -> Result<GetTaxRequest, AdapterError> {
    debug!("Copying GetTaxRequest out of wire object");
    let addresses = decode_addresses(wire.addresses)?;
    let doc_date = wire.doc_date.to_local();

    let origin = resolve_code(&wire.origin_code, &addresses)?;
    let destination = resolve_code(&wire.destination_code, &addresses)?;

    let mut lines = Lines::default();
    for wire_line in wire.lines {
        let origin_code = backfill(&wire_line.origin_code, &wire.origin_code);
        let destination_code = backfill(&wire_line.destination_code, &wire.destination_code);

        let mut line = Line {
            no: wire_line.no,
            item_code: wire_line.item_code,
            tax_code: wire_line.tax_code,
            qty: wire_line.qty,
            amount: wire_line.amount,
            discounted: wire_line.discounted,
            rev_acct: wire_line.rev_acct,
            ref1: wire_line.ref1,
            ref2: wire_line.ref2,
            exemption_no: wire_line.exemption_no,
            description: wire_line.description,
            customer_usage_type: wire_line.customer_usage_type,
            tax_override: decode_override(wire_line.tax_override, doc_date),
            tax_included: wire_line.tax_included,
            business_identification_no: wire_line.business_identification_no,
            ..Line::default()
        };
        line.set_origin_ref(resolve_code(origin_code, &addresses)?);
        line.set_destination_ref(resolve_code(destination_code, &addresses)?);
        lines.add(line);
    }

    Ok(GetTaxRequest {
        origin,
        destination,
        addresses,
        lines,
        company_code: wire.company_code,
        doc_type: wire.doc_type,
        doc_code: wire.doc_code,
        doc_date,
        salesperson_code: wire.salesperson_code,
        customer_code: wire.customer_code,
        customer_usage_type: wire.customer_usage_type,
        discount: wire.discount,
        exemption_no: wire.exemption_no,
        location_code: wire.location_code,
        detail_level: wire.detail_level,
        purchase_order_no: wire.purchase_order_no,
        reference_code: wire.reference_code,
        commit: wire.commit,
        business_identification_no: wire.business_identification_no,
        tax_override: decode_override(wire.tax_override, doc_date),
        currency_code: wire.currency_code,
        service_mode: wire.service_mode,
        payment_date: wire.payment_date.to_local(),
        exchange_rate: Some(wire.exchange_rate).filter(|rate| !rate.is_zero()),
        exchange_rate_eff_date: wire.exchange_rate_eff_date.to_local(),
    })
}

pub fn decode_adjust_tax(wire: WireAdjustTaxRequest) -> Result<AdjustTaxRequest, AdapterError> {
    Ok(AdjustTaxRequest {
        adjustment_reason: wire.adjustment_reason,
        adjustment_description: wire.adjustment_description,
        get_tax_request: decode_get_tax(wire.get_tax_request)?,
    })
}

fn decode_addresses(wire: Vec<WireAddress>) -> Result<AddressCollection, AdapterError> {
    let mut addresses = AddressCollection::new();
    for wire_address in wire {
        let code = wire_address.address_code.trim().to_string();
        let address = Address::new()
            .with_line1(wire_address.line1.unwrap_or_default())
            .with_line2(wire_address.line2.unwrap_or_default())
            .with_line3(wire_address.line3.unwrap_or_default())
            .with_city(wire_address.city.unwrap_or_default())
            .with_region(wire_address.region.unwrap_or_default())
            .with_postal_code(wire_address.postal_code.unwrap_or_default())
            .with_country(wire_address.country.unwrap_or_default())
            .with_tax_region_id(wire_address.tax_region_id);

        if code.is_empty() {
            addresses.add(address);
            continue;
        }

        let code = AddressCode::new(code);
        if let Some(existing) = addresses.find_by_code(&code) {
            if existing != &address {
                return Err(AdapterError::MalformedPayload {
                    field: "AddressCode".to_string(),
                    value: code.to_string(),
                });
            }
        }
        addresses.add(address.with_wire_code(code));
    }
    Ok(addresses)
}

fn backfill<'a>(line_code: &'a str, header_code: &'a str) -> &'a str {
    if line_code.trim().is_empty() {
        header_code
    } else {
        line_code
    }
}

fn resolve_code(
    code: &str,
    addresses: &AddressCollection,
) -> Result<Option<AddressRef>, AdapterError> {
    let code = code.trim();
    if code.is_empty() {
        return Ok(None);
    }
    addresses
        .canonical_code(&AddressCode::new(code))
        .map(|canonical| Some(AddressRef::Registered(canonical.clone())))
        .ok_or_else(|| AdapterError::UnresolvedAddressReference {
            code: code.to_string(),
        })
}

fn decode_override(wire: Option<WireTaxOverride>, doc_date: Option<NaiveDate>) -> TaxOverride {
    let Some(wire) = wire else {
        return TaxOverride::default();
    };
    let mut tax_override = TaxOverride {
        override_type: wire.override_type,
        tax_amount: wire.amount,
        tax_date: wire.date.to_local(),
        reason: wire.reason,
    };
    tax_override.tax_date = override_date(&tax_override, doc_date);
    tax_override
}
