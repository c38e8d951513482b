//! Payment provider trait definitions
//!
//! Defines the capability set the host invokes on a payment provider.

use crate::error::PaymentResult;
use crate::payments::types::{
    AuthorizePaymentInput, AuthorizePaymentOutput, CancelPaymentInput, CancelPaymentOutput,
    CapturePaymentInput, CapturePaymentOutput, DeletePaymentInput, DeletePaymentOutput,
    GetPaymentStatusInput, GetPaymentStatusOutput, InitiatePaymentInput, InitiatePaymentOutput,
    ProviderWebhookPayload, RefundPaymentInput, RefundPaymentOutput, RetrievePaymentInput,
    RetrievePaymentOutput, UpdatePaymentInput, UpdatePaymentOutput, WebhookActionResult,
};
use async_trait::async_trait;

/// Trait for payment provider implementations
///
/// Each method is an independent round trip; the only state threaded between
/// calls is the session data the host persists and hands back.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Stable identifier the host registers the provider under
    fn identifier(&self) -> &'static str;

    /// Create a gateway transaction and return its checkout details
    ///
    /// The returned session is always `pending`; the customer completes the
    /// payment on the gateway's hosted page.
    async fn initiate_payment(
        &self,
        input: InitiatePaymentInput,
    ) -> PaymentResult<InitiatePaymentOutput>;

    /// Replace the session with a freshly initiated transaction
    async fn update_payment(&self, input: UpdatePaymentInput)
        -> PaymentResult<UpdatePaymentOutput>;

    /// Check with the gateway whether the session has been paid
    async fn authorize_payment(
        &self,
        input: AuthorizePaymentInput,
    ) -> PaymentResult<AuthorizePaymentOutput>;

    async fn capture_payment(
        &self,
        input: CapturePaymentInput,
    ) -> PaymentResult<CapturePaymentOutput>;

    async fn refund_payment(&self, input: RefundPaymentInput)
        -> PaymentResult<RefundPaymentOutput>;

    async fn cancel_payment(&self, input: CancelPaymentInput)
        -> PaymentResult<CancelPaymentOutput>;

    async fn delete_payment(&self, input: DeletePaymentInput)
        -> PaymentResult<DeletePaymentOutput>;

    /// Fetch a normalized snapshot of the gateway transaction
    async fn retrieve_payment(
        &self,
        input: RetrievePaymentInput,
    ) -> PaymentResult<RetrievePaymentOutput>;

    /// Poll the session status
    ///
    /// Never fails: a missing reference or a gateway fault is reported as the
    /// `error` status so polling loops keep running.
    async fn get_payment_status(&self, input: GetPaymentStatusInput) -> GetPaymentStatusOutput;

    /// Classify a webhook delivery into the action the host should take
    async fn get_webhook_action_and_data(
        &self,
        payload: ProviderWebhookPayload,
    ) -> PaymentResult<WebhookActionResult>;

    /// Validate webhook signature
    ///
    /// # Arguments
    /// * `payload` - Raw webhook payload body
    /// * `signature` - Signature from webhook header
    fn validate_webhook_signature(&self, payload: &[u8], signature: &str) -> bool;
}
