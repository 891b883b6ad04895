//! Physical addresses and their content-derived identity codes.

use std::fmt;

/// Version tag of the address fingerprint. Bump when the hashed field set changes.
const FINGERPRINT_VERSION: &str = "a1";

/// Stable string identifier of an [`Address`], the only cross-reference key
/// carried over the wire.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddressCode(String);

impl AddressCode {
    pub fn new(code: impl Into<String>) -> Self {
        AddressCode(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AddressCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A physical location descriptor.
///
/// Fields are normalized on the way in: strings are trimmed, blanks become
/// unset, and region/country are upper-cased. Equality compares the normalized
/// fields only and ignores the cached [`AddressCode`].
///
/// The code is assigned once, when the address is first attached to a request
/// or line, and is never recomputed for that value. Attached addresses are only
/// reachable through shared references, so their fields cannot drift from their
/// code. The `with_*` builders produce a new, detached value and drop any cached
/// code.
#[derive(Debug, Clone, Default)]
pub struct Address {
    code: Option<AddressCode>,
    line1: Option<String>,
    line2: Option<String>,
    line3: Option<String>,
    city: Option<String>,
    region: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
    tax_region_id: i32,
}

impl Address {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_line1(mut self, value: impl AsRef<str>) -> Self {
        self.line1 = normalize_text(value.as_ref());
        self.code = None;
        self
    }

    pub fn with_line2(mut self, value: impl AsRef<str>) -> Self {
        self.line2 = normalize_text(value.as_ref());
        self.code = None;
        self
    }

    pub fn with_line3(mut self, value: impl AsRef<str>) -> Self {
        self.line3 = normalize_text(value.as_ref());
        self.code = None;
        self
    }

    pub fn with_city(mut self, value: impl AsRef<str>) -> Self {
        self.city = normalize_text(value.as_ref());
        self.code = None;
        self
    }

    pub fn with_region(mut self, value: impl AsRef<str>) -> Self {
        self.region = normalize_code(value.as_ref());
        self.code = None;
        self
    }

    pub fn with_postal_code(mut self, value: impl AsRef<str>) -> Self {
        self.postal_code = normalize_text(value.as_ref());
        self.code = None;
        self
    }

    pub fn with_country(mut self, value: impl AsRef<str>) -> Self {
        self.country = normalize_code(value.as_ref());
        self.code = None;
        self
    }

    pub fn with_tax_region_id(mut self, value: i32) -> Self {
        self.tax_region_id = value;
        self.code = None;
        self
    }

    pub fn line1(&self) -> Option<&str> {
        self.line1.as_deref()
    }

    pub fn line2(&self) -> Option<&str> {
        self.line2.as_deref()
    }

    pub fn line3(&self) -> Option<&str> {
        self.line3.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn tax_region_id(&self) -> i32 {
        self.tax_region_id
    }

    /// The code cached at attachment time, if the address has been attached.
    pub fn code(&self) -> Option<&AddressCode> {
        self.code.as_ref()
    }

    /// Assign the content fingerprint as this value's code unless one is
    /// already cached, and return the code in effect.
    pub(crate) fn attach(&mut self) -> AddressCode {
        if let Some(code) = &self.code {
            return code.clone();
        }
        let code = self.fingerprint();
        self.code = Some(code.clone());
        code
    }

    /// Adopt a code received from the wire verbatim.
    pub(crate) fn with_wire_code(mut self, code: AddressCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Deterministic, versioned fingerprint of the normalized fields.
    ///
    /// SHA-256 over length-prefixed fields, truncated to 128 bits.
    pub fn fingerprint(&self) -> AddressCode {
        use sha2::{Digest, Sha256};

        fn hash_var(hasher: &mut Sha256, data: Option<&str>) {
            let data = data.unwrap_or("");
            hasher.update((data.len() as u32).to_le_bytes());
            hasher.update(data.as_bytes());
        }

        let mut hasher = Sha256::new();
        hash_var(&mut hasher, self.line1());
        hash_var(&mut hasher, self.line2());
        hash_var(&mut hasher, self.line3());
        hash_var(&mut hasher, self.city());
        hash_var(&mut hasher, self.region());
        hash_var(&mut hasher, self.postal_code());
        hash_var(&mut hasher, self.country());
        hasher.update(self.tax_region_id.to_le_bytes());

        let hash = hasher.finalize();
        AddressCode(format!("{}:{}", FINGERPRINT_VERSION, hex::encode(&hash[..16])))
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.line1 == other.line1
            && self.line2 == other.line2
            && self.line3 == other.line3
            && self.city == other.city
            && self.region == other.region
            && self.postal_code == other.postal_code
            && self.country == other.country
            && self.tax_region_id == other.tax_region_id
    }
}

impl Eq for Address {}

fn normalize_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn normalize_code(value: &str) -> Option<String> {
    normalize_text(value).map(|s| s.to_uppercase())
}

/// How a request header or line points at an address.
///
/// A caller-supplied address starts out `Detached`, carrying its own value.
/// Consolidation moves the value into the owning request's
/// [`AddressCollection`](crate::domain::AddressCollection) and leaves a
/// `Registered` key behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressRef {
    Detached { code: AddressCode, address: Address },
    Registered(AddressCode),
}

impl AddressRef {
    /// Attach an address, assigning its code if it has none yet.
    pub fn detached(mut address: Address) -> Self {
        let code = address.attach();
        AddressRef::Detached { code, address }
    }

    pub fn code(&self) -> &AddressCode {
        match self {
            AddressRef::Detached { code, .. } => code,
            AddressRef::Registered(code) => code,
        }
    }

    pub fn is_registered(&self) -> bool {
        matches!(self, AddressRef::Registered(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn main_st() -> Address {
        Address::new()
            .with_line1("1 Main St")
            .with_city("Springfield")
            .with_region("il")
            .with_postal_code("62701")
            .with_country("us")
    }

    #[test]
    fn normalizes_on_input() {
        let addr = Address::new()
            .with_line1("  1 Main St  ")
            .with_line2("   ")
            .with_region(" il ")
            .with_country("us");
        assert_eq!(addr.line1(), Some("1 Main St"));
        assert_eq!(addr.line2(), None);
        assert_eq!(addr.region(), Some("IL"));
        assert_eq!(addr.country(), Some("US"));
    }

    #[test]
    fn equality_ignores_code_and_whitespace() {
        let mut a = main_st();
        a.attach();
        let b = Address::new()
            .with_line1(" 1 Main St")
            .with_city("Springfield ")
            .with_region("IL")
            .with_postal_code("62701")
            .with_country("US");
        assert!(b.code().is_none());
        assert_eq!(a, b);
    }

    #[test]
    fn fingerprint_is_deterministic_and_versioned() {
        let a = main_st().fingerprint();
        let b = main_st().fingerprint();
        assert_eq!(a, b);
        assert!(a.as_str().starts_with("a1:"));
        assert_eq!(a.as_str().len(), 3 + 32);
    }

    #[test]
    fn fingerprint_separates_adjacent_fields() {
        let a = Address::new().with_line1("ab").with_line2("c");
        let b = Address::new().with_line1("a").with_line2("bc");
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn attach_assigns_once() {
        let mut addr = main_st();
        let first = addr.attach();
        let second = addr.attach();
        assert_eq!(first, second);
        assert_eq!(addr.code(), Some(&first));
    }

    #[test]
    fn attach_keeps_wire_code() {
        let mut addr = main_st().with_wire_code(AddressCode::new("12345"));
        assert_eq!(addr.attach(), AddressCode::new("12345"));
    }

    #[test]
    fn builders_drop_cached_code() {
        let mut addr = main_st();
        addr.attach();
        let edited = addr.clone().with_line1("2 Oak Rd");
        assert!(edited.code().is_none());
        assert!(addr.code().is_some());
    }

    #[test]
    fn detached_ref_carries_code() {
        let r = AddressRef::detached(main_st());
        assert_eq!(r.code(), &main_st().fingerprint());
        assert!(!r.is_registered());
    }
}
