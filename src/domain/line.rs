//! Line items of a tax request.

use crate::domain::{Address, AddressRef, Decimal, TaxOverride};

/// One line item.
///
/// Origin and destination are references into the owning request's address
/// collection once the request has been consolidated. A line with neither set
/// defers to the request header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub(crate) origin: Option<AddressRef>,
    pub(crate) destination: Option<AddressRef>,
    pub no: Option<String>,
    pub item_code: Option<String>,
    pub tax_code: Option<String>,
    pub qty: Decimal,
    pub amount: Decimal,
    pub discounted: bool,
    pub rev_acct: Option<String>,
    pub ref1: Option<String>,
    pub ref2: Option<String>,
    pub exemption_no: Option<String>,
    pub description: Option<String>,
    pub customer_usage_type: Option<String>,
    pub tax_override: TaxOverride,
    pub tax_included: bool,
    pub business_identification_no: Option<String>,
}

impl Line {
    pub fn new(no: impl Into<String>) -> Self {
        Self {
            no: Some(no.into()),
            ..Self::default()
        }
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

    pub(crate) fn set_origin_ref(&mut self, reference: Option<AddressRef>) {
        self.origin = reference;
    }

    pub(crate) fn set_destination_ref(&mut self, reference: Option<AddressRef>) {
        self.destination = reference;
    }
}

/// Ordered line items of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lines(Vec<Line>);

impl Lines {
    pub fn add(&mut self, line: Line) {
        self.0.push(line);
    }

    pub fn get(&self, index: usize) -> Option<&Line> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.0.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Line> {
        self.0.iter_mut()
    }

    /// First line whose number matches `line_no` (surrounding whitespace ignored).
    pub fn get_item_by_no(&self, line_no: &str) -> Option<&Line> {
        let wanted = line_no.trim();
        self.0
            .iter()
            .find(|line| line.no.as_deref().map(str::trim) == Some(wanted))
    }
}

impl<'a> IntoIterator for &'a Lines {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_item_by_no_matches_trimmed() {
        let mut lines = Lines::default();
        lines.add(Line::new("1"));
        lines.add(Line::new(" 2 "));

        assert_eq!(lines.len(), 2);
        assert_eq!(lines.get_item_by_no("2").unwrap().no.as_deref(), Some(" 2 "));
        assert!(lines.get_item_by_no("3").is_none());
    }

    #[test]
    fn setting_address_attaches_it() {
        let mut line = Line::new("1");
        line.set_destination_address(Address::new().with_line1("1 Main St"));

        let dest = line.destination_ref().unwrap();
        assert!(!dest.is_registered());
        assert!(dest.code().as_str().starts_with("a1:"));
        assert!(line.origin_ref().is_none());
    }
}
