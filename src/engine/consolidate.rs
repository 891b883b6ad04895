//! Address consolidation: deduplicate every address a request references into
//! its `AddressCollection` and apply header-to-line default inheritance.

use crate::domain::{AddressCollection, AddressRef, GetTaxRequest};

/// Consolidate the addresses of `request` in place.
///
/// 1. Header origin, then header destination, are registered: a content-equal
///    entry already in the collection is reused, otherwise the address is
///    inserted.
/// 2. For every line and each dimension independently, an unset address
///    inherits the header's address for that dimension (if set); a set
///    address is registered the same way as the header's.
///
/// Running it again on a consolidated request changes nothing. Missing
/// addresses are left for the remote service to reject.
pub fn consolidate_addresses(request: &mut GetTaxRequest) {
    let GetTaxRequest {
        origin,
        destination,
        addresses,
        lines,
        ..
    } = request;

    *origin = register(origin.take(), addresses);
    *destination = register(destination.take(), addresses);

    for line in lines.iter_mut() {
        let line_origin = match line.origin_ref().cloned() {
            None => origin.clone(),
            set => register(set, addresses),
        };
        line.set_origin_ref(line_origin);

        let line_destination = match line.destination_ref().cloned() {
            None => destination.clone(),
            set => register(set, addresses),
        };
        line.set_destination_ref(line_destination);
    }
}

/// Number of address references held by the header and lines, counting
/// duplicates.
pub fn count_address_refs(request: &GetTaxRequest) -> usize {
    let header =
        request.origin_ref().is_some() as usize + request.destination_ref().is_some() as usize;
    request.lines().iter().fold(header, |acc, line| {
        acc + line.origin_ref().is_some() as usize + line.destination_ref().is_some() as usize
    })
}

fn register(slot: Option<AddressRef>, addresses: &mut AddressCollection) -> Option<AddressRef> {
    match slot {
        None => None,
        Some(AddressRef::Detached { address, .. }) => {
            Some(AddressRef::Registered(addresses.add(address)))
        }
        Some(AddressRef::Registered(code)) => {
            let code = addresses.canonical_code(&code).cloned().unwrap_or(code);
            Some(AddressRef::Registered(code))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, Line};

    fn main_st() -> Address {
        Address::new().with_line1("1 Main St").with_city("Springfield")
    }

    fn oak_rd() -> Address {
        Address::new().with_line1("2 Oak Rd").with_city("Shelbyville")
    }

    #[test]
    fn dedups_header_and_line_addresses() {
        let mut req = GetTaxRequest::new();
        req.set_origin_address(main_st());
        let mut line = Line::new("1");
        line.set_destination_address(main_st());
        req.add_line(line);

        consolidate_addresses(&mut req);

        assert_eq!(req.addresses().len(), 1);
        let line = req.lines().get(0).unwrap();
        assert_eq!(line.destination_ref(), req.origin_ref());
        assert!(line.destination_ref().unwrap().is_registered());
    }

    #[test]
    fn dedup_across_three_addresses_inherits_same_dimension_only() {
        let mut req = GetTaxRequest::new();
        req.set_origin_address(main_st());

        let mut line1 = Line::new("1");
        line1.set_destination_address(main_st());
        let mut line2 = Line::new("2");
        line2.set_destination_address(oak_rd());
        req.add_line(line1);
        req.add_line(line2);
        req.add_line(Line::new("3"));

        consolidate_addresses(&mut req);

        assert_eq!(req.addresses().len(), 2);
        let line1 = req.lines().get(0).unwrap();
        let line2 = req.lines().get(1).unwrap();
        let line3 = req.lines().get(2).unwrap();
        assert_eq!(line1.destination_ref(), req.origin_ref());
        assert_eq!(line2.origin_ref(), req.origin_ref());
        assert_ne!(line2.destination_ref(), req.origin_ref());
        // header destination is unset, so nothing is inherited from the origin
        assert!(req.destination_ref().is_none());
        assert!(line3.destination_ref().is_none());
        assert_eq!(line3.origin_ref(), req.origin_ref());
    }

    #[test]
    fn line_without_destination_inherits_header_destination() {
        let mut req = GetTaxRequest::new();
        req.set_destination_address(oak_rd());
        req.add_line(Line::new("1"));

        consolidate_addresses(&mut req);

        let line = req.lines().get(0).unwrap();
        assert_eq!(line.destination_ref(), req.destination_ref());
        assert!(line.origin_ref().is_none());
        assert_eq!(req.addresses().len(), 1);
    }

    #[test]
    fn no_inheritance_when_header_unset() {
        let mut req = GetTaxRequest::new();
        req.add_line(Line::new("1"));

        consolidate_addresses(&mut req);

        let line = req.lines().get(0).unwrap();
        assert!(line.origin_ref().is_none());
        assert!(line.destination_ref().is_none());
        assert!(req.addresses().is_empty());
    }

    #[test]
    fn consolidation_is_idempotent() {
        let mut req = GetTaxRequest::new();
        req.set_origin_address(main_st());
        req.set_destination_address(oak_rd());
        let mut line = Line::new("1");
        line.set_origin_address(oak_rd());
        req.add_line(line);
        req.add_line(Line::new("2"));

        consolidate_addresses(&mut req);
        let once = req.clone();
        consolidate_addresses(&mut req);

        assert_eq!(req, once);
        assert_eq!(req.addresses().len(), 2);
    }

    #[test]
    fn counts_references_with_duplicates() {
        let mut req = GetTaxRequest::new();
        req.set_origin_address(main_st());
        let mut line = Line::new("1");
        line.set_origin_address(main_st());
        line.set_destination_address(oak_rd());
        req.add_line(line);

        assert_eq!(count_address_refs(&req), 3);
    }
}
