//! Caller-supplied override of remotely computed tax.

use crate::domain::{Decimal, TaxOverrideType};
use chrono::NaiveDate;

/// Override attached to a request header or to an individual line.
///
/// An override of type [`TaxOverrideType::None`] is inert and never reaches the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxOverride {
    pub override_type: TaxOverrideType,
    pub tax_amount: Decimal,
    /// Effective date; unset means "use the document date".
    pub tax_date: Option<NaiveDate>,
    pub reason: Option<String>,
}

impl TaxOverride {
    pub fn new(override_type: TaxOverrideType) -> Self {
        Self {
            override_type,
            ..Self::default()
        }
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.tax_amount = amount;
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.tax_date = Some(date);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn is_active(&self) -> bool {
        self.override_type.is_active()
    }
}
