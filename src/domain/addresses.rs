//! The deduplicated, insertion-ordered address set of one request.

use crate::domain::{Address, AddressCode};
use std::collections::HashMap;

/// Arena of the unique addresses referenced by a request.
///
/// Entries keep insertion order, which is the order they are emitted on the
/// wire. Lookup by [`AddressCode`] is the only way lines and headers are
/// reattached to addresses after a wire round trip. Codes of content-equal
/// addresses that arrive after the canonical entry are kept as aliases of it.
///
/// A collection belongs to exactly one request and must not be shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressCollection {
    entries: Vec<(AddressCode, Address)>,
    by_code: HashMap<AddressCode, usize>,
}

impl AddressCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&AddressCode, &Address)> {
        self.entries.iter().map(|(code, address)| (code, address))
    }

    /// Insert `address` unless a content-equal entry already exists, and return
    /// the canonical code.
    ///
    /// When an equal entry exists, the incoming address's code (if any and not
    /// already known) is recorded as an alias of that entry.
    pub fn add(&mut self, mut address: Address) -> AddressCode {
        if let Some(idx) = self.position(&address) {
            if let Some(code) = address.code() {
                self.by_code.entry(code.clone()).or_insert(idx);
            }
            return self.entries[idx].0.clone();
        }

        let code = address.attach();
        let idx = self.entries.len();
        self.by_code.entry(code.clone()).or_insert(idx);
        self.entries.push((code.clone(), address));
        code
    }

    /// Content-equality search.
    pub fn find(&self, candidate: &Address) -> Option<&Address> {
        self.position(candidate).map(|idx| &self.entries[idx].1)
    }

    /// Resolve a code (canonical or alias) to its canonical address.
    pub fn find_by_code(&self, code: &AddressCode) -> Option<&Address> {
        self.by_code.get(code).map(|&idx| &self.entries[idx].1)
    }

    /// Resolve a code (canonical or alias) to the canonical entry's code.
    pub fn canonical_code(&self, code: &AddressCode) -> Option<&AddressCode> {
        self.by_code.get(code).map(|&idx| &self.entries[idx].0)
    }

    fn position(&self, candidate: &Address) -> Option<usize> {
        self.entries
            .iter()
            .position(|(_, existing)| existing == candidate)
    }
}
