//! Pure, synchronous request processing: address consolidation, default
//! resolution and the validation hook. Nothing here performs I/O.

pub mod consolidate;
pub mod defaults;
pub mod validation;

pub use consolidate::{consolidate_addresses, count_address_refs};
pub use defaults::{
    clean_text, effective_exchange_rate, effective_rate_date, min_date, override_date,
    DefaultsResolver,
};
pub use validation::{Validate, Validation, ValidationMode};
