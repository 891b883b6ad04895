//! Operation orchestration over the remote tax service.

pub mod tax_svc;

pub use tax_svc::TaxSvc;
