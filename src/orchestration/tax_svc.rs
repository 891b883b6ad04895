//! `TaxSvc`: the public facade over the tax service.
//!
//! Every operation runs validate, (consolidate), encode, invoke, decode, and
//! returns a result object. Failures anywhere along the way are folded into
//! that result; no operation returns `Err`.

use crate::config::Config;
use crate::domain::{
    AdjustTaxRequest, AdjustTaxResult, ApplyPaymentRequest, ApplyPaymentResult, BaseResult,
    CancelTaxRequest, CancelTaxResult, CommitTaxRequest, CommitTaxResult, GetTaxHistoryRequest,
    GetTaxHistoryResult, GetTaxRequest, GetTaxResult, IsAuthorizedResult, PingResult,
    PostTaxRequest, PostTaxResult, ReconcileTaxHistoryRequest, ReconcileTaxHistoryResult,
    TaxResult,
};
use crate::engine::{
    clean_text, consolidate_addresses, count_address_refs, DefaultsResolver, Validate,
    ValidationMode,
};
use crate::error::AdapterError;
use crate::service::{Operation, TaxService};
use crate::wire::{
    self, WireApplyPaymentRequest, WireBaseOnlyResult, WireCancelTaxRequest,
    WireCommitTaxRequest, WireGetTaxHistoryRequest, WireGetTaxHistoryResult, WireGetTaxResult,
    WireIsAuthorizedRequest, WireIsAuthorizedResult, WirePingRequest, WirePingResult,
    WirePostTaxRequest, WireReconcileTaxHistoryRequest, WireReconcileTaxHistoryResult,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct TaxSvc {
    service: Arc<dyn TaxService>,
    validation_mode: ValidationMode,
    defaults: DefaultsResolver,
    instance_id: Uuid,
}

impl TaxSvc {
    pub fn new(service: Arc<dyn TaxService>, config: &Config) -> Self {
        Self::with_options(
            service,
            config.validation_mode,
            DefaultsResolver::new(config.default_currency_code.clone()),
        )
    }

    pub fn with_options(
        service: Arc<dyn TaxService>,
        validation_mode: ValidationMode,
        defaults: DefaultsResolver,
    ) -> Self {
        let instance_id = Uuid::new_v4();
        info!(%instance_id, %validation_mode, "TaxSvc instantiated");
        Self {
            service,
            validation_mode,
            defaults,
            instance_id,
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub async fn ping(&self, message: &str) -> PingResult {
        self.log_entry(Operation::Ping);
        let outcome = self.try_ping(message).await;
        self.fold(Operation::Ping, outcome)
    }

    pub async fn is_authorized(&self, operations: &str) -> IsAuthorizedResult {
        self.log_entry(Operation::IsAuthorized);
        let outcome = self.try_is_authorized(operations).await;
        self.fold(Operation::IsAuthorized, outcome)
    }

    /// Calculate tax. Consolidates the request's addresses in place first.
    pub async fn get_tax(&self, request: &mut GetTaxRequest) -> GetTaxResult {
        self.log_entry(Operation::GetTax);
        let outcome = self.try_get_tax(request).await;
        self.fold(Operation::GetTax, outcome)
    }

    pub async fn get_tax_history(&self, request: &GetTaxHistoryRequest) -> GetTaxHistoryResult {
        self.log_entry(Operation::GetTaxHistory);
        let outcome = self.try_get_tax_history(request).await;
        self.fold(Operation::GetTaxHistory, outcome)
    }

    pub async fn post_tax(&self, request: &PostTaxRequest) -> PostTaxResult {
        self.log_entry(Operation::PostTax);
        let outcome = self
            .try_base_only(Operation::PostTax, request, WirePostTaxRequest::from(request))
            .await;
        self.fold(Operation::PostTax, outcome)
    }

    pub async fn commit_tax(&self, request: &CommitTaxRequest) -> CommitTaxResult {
        self.log_entry(Operation::CommitTax);
        let outcome = self
            .try_base_only(Operation::CommitTax, request, WireCommitTaxRequest::from(request))
            .await;
        self.fold(Operation::CommitTax, outcome)
    }

    pub async fn cancel_tax(&self, request: &CancelTaxRequest) -> CancelTaxResult {
        self.log_entry(Operation::CancelTax);
        let outcome = self
            .try_base_only(Operation::CancelTax, request, WireCancelTaxRequest::from(request))
            .await;
        self.fold(Operation::CancelTax, outcome)
    }

    pub async fn reconcile_tax_history(
        &self,
        request: &ReconcileTaxHistoryRequest,
    ) -> ReconcileTaxHistoryResult {
        self.log_entry(Operation::ReconcileTaxHistory);
        let outcome = self.try_reconcile_tax_history(request).await;
        self.fold(Operation::ReconcileTaxHistory, outcome)
    }

    /// Adjust a committed document. Consolidates the inner request first.
    pub async fn adjust_tax(&self, request: &mut AdjustTaxRequest) -> AdjustTaxResult {
        self.log_entry(Operation::AdjustTax);
        let outcome = self.try_adjust_tax(request).await;
        self.fold(Operation::AdjustTax, outcome)
    }

    pub async fn apply_payment(&self, request: &ApplyPaymentRequest) -> ApplyPaymentResult {
        self.log_entry(Operation::ApplyPayment);
        let outcome = self
            .try_base_only(Operation::ApplyPayment, request, WireApplyPaymentRequest::from(request))
            .await;
        self.fold(Operation::ApplyPayment, outcome)
    }

    async fn try_ping(&self, message: &str) -> Result<PingResult, AdapterError> {
        let wire = WirePingRequest {
            message: clean_text(Some(message.to_string())),
        };
        let response: WirePingResult = self.call(Operation::Ping, &wire).await?;
        Ok(response.into())
    }

    async fn try_is_authorized(
        &self,
        operations: &str,
    ) -> Result<IsAuthorizedResult, AdapterError> {
        let wire = WireIsAuthorizedRequest {
            operations: clean_text(Some(operations.to_string())),
        };
        let response: WireIsAuthorizedResult = self.call(Operation::IsAuthorized, &wire).await?;
        Ok(response.into())
    }

    async fn try_get_tax(&self, request: &mut GetTaxRequest) -> Result<GetTaxResult, AdapterError> {
        self.check(&*request)?;
        self.prepare(request);
        let wire = wire::encode_get_tax(request)?;
        let response: WireGetTaxResult = self.call(Operation::GetTax, &wire).await?;
        Ok(response.into())
    }

    async fn try_adjust_tax(
        &self,
        request: &mut AdjustTaxRequest,
    ) -> Result<AdjustTaxResult, AdapterError> {
        self.check(&*request)?;
        self.prepare(&mut request.get_tax_request);
        let wire = wire::encode_adjust_tax(request)?;
        let response: WireGetTaxResult = self.call(Operation::AdjustTax, &wire).await?;
        Ok(response.into())
    }

    async fn try_get_tax_history(
        &self,
        request: &GetTaxHistoryRequest,
    ) -> Result<GetTaxHistoryResult, AdapterError> {
        self.check(request)?;
        let wire = WireGetTaxHistoryRequest::from(request);
        let response: WireGetTaxHistoryResult = self.call(Operation::GetTaxHistory, &wire).await?;
        wire::decode_get_tax_history(response)
    }

    async fn try_reconcile_tax_history(
        &self,
        request: &ReconcileTaxHistoryRequest,
    ) -> Result<ReconcileTaxHistoryResult, AdapterError> {
        self.check(request)?;
        let wire = WireReconcileTaxHistoryRequest::from(request);
        let response: WireReconcileTaxHistoryResult =
            self.call(Operation::ReconcileTaxHistory, &wire).await?;
        Ok(response.into())
    }

    async fn try_base_only<V, W, R>(
        &self,
        operation: Operation,
        request: &V,
        wire: W,
    ) -> Result<R, AdapterError>
    where
        V: Validate,
        W: Serialize,
        R: TaxResult,
    {
        self.check(request)?;
        let response: WireBaseOnlyResult = self.call(operation, &wire).await?;
        Ok(wire::decode_base_only(response))
    }

    /// Apply configured defaults, then consolidate addresses.
    fn prepare(&self, request: &mut GetTaxRequest) {
        self.defaults.apply(request);
        debug!(
            address_refs = count_address_refs(request),
            "Address count before consolidation"
        );
        consolidate_addresses(request);
        debug!(
            addresses = request.addresses().len(),
            "Address count after consolidation"
        );
    }

    fn check<V: Validate + ?Sized>(&self, request: &V) -> Result<(), AdapterError> {
        debug!("Validate request");
        let validation = request.validate(self.validation_mode);
        if validation.is_valid {
            Ok(())
        } else {
            Err(AdapterError::Validation(validation.message))
        }
    }

    async fn call<W, R>(&self, operation: Operation, wire: &W) -> Result<R, AdapterError>
    where
        W: Serialize,
        R: DeserializeOwned,
    {
        let payload = serde_json::to_value(wire)?;
        let response = self.service.invoke(operation, payload).await?;
        Ok(serde_json::from_value(response)?)
    }

    fn log_entry(&self, operation: Operation) {
        info!(instance_id = %self.instance_id, %operation, "Invoking operation");
    }

    fn fold<R: TaxResult>(&self, operation: Operation, outcome: Result<R, AdapterError>) -> R {
        match outcome {
            Ok(result) => result,
            Err(err) => {
                warn!(
                    instance_id = %self.instance_id,
                    %operation,
                    error = %err,
                    "Operation failed; returning failure result"
                );
                let summary = match &err {
                    AdapterError::Validation(message) => message.clone(),
                    other => other.to_string(),
                };
                R::from_base(BaseResult::failure(err.severity(), err.name(), summary))
            }
        }
    }
}
