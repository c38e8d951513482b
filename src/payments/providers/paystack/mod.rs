//! Paystack payment provider implementation
//!
//! Drives Paystack's hosted checkout for West African CFA franc (XOF)
//! payments in Côte d'Ivoire; other Paystack currencies work through the same
//! minor-unit conversion.

pub mod client;
pub mod models;

use crate::config::PaystackOptions;
use crate::error::{PaymentError, PaymentResult};
use crate::payments::amount::{to_major_units, to_minor_units};
use crate::payments::traits::PaymentProvider;
use crate::payments::types::{
    data_str, AuthorizePaymentInput, AuthorizePaymentOutput, CancelPaymentInput,
    CancelPaymentOutput, CapturePaymentInput, CapturePaymentOutput, DeletePaymentInput,
    DeletePaymentOutput, GetPaymentStatusInput, GetPaymentStatusOutput, InitiatePaymentInput,
    InitiatePaymentOutput, PaymentAction, PaymentSessionData, PaymentSessionStatus,
    ProviderWebhookPayload, RefundPaymentInput, RefundPaymentOutput, RetrievePaymentInput,
    RetrievePaymentOutput, UpdatePaymentInput, UpdatePaymentOutput, WebhookActionData,
    WebhookActionResult,
};
use async_trait::async_trait;
use chrono::Utc;
use client::{GatewayError, PaystackClient};
use hmac::{Hmac, Mac};
use models::{
    InitializeTransactionRequest, PaystackTransaction, PaystackWebhookEvent, RefundRequest,
    TransactionMetadata, TransactionStatus, EVENT_CHARGE_FAILED, EVENT_CHARGE_SUCCESS,
};
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;
use sha2::Sha512;
use tracing::{debug, error, info, warn};

pub const PROVIDER_IDENTIFIER: &str = "paystack-civ";

/// Prefix of every reference this provider generates
pub const REFERENCE_PREFIX: &str = "civ";

/// Header carrying the HMAC-SHA512 signature of webhook bodies
pub const SIGNATURE_HEADER: &str = "x-paystack-signature";

const REFERENCE_SUFFIX_LEN: usize = 7;
const REFERENCE_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

type HmacSha512 = Hmac<Sha512>;

/// Paystack payment provider
pub struct PaystackProvider {
    options: PaystackOptions,
    client: PaystackClient,
}

impl PaystackProvider {
    /// Create a new Paystack provider instance
    pub fn new(options: PaystackOptions) -> PaymentResult<Self> {
        options
            .validate()
            .map_err(|e| PaymentError::invalid_argument(e.to_string()))?;

        let client = PaystackClient::new(&options)
            .map_err(|e| PaymentError::invalid_argument(e.to_string()))?;

        info!(
            "Paystack provider initialized: test_mode={}, default_currency={}",
            options.test_mode, options.default_currency
        );

        Ok(Self { options, client })
    }

    /// Create provider from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let options = PaystackOptions::from_env()
            .map_err(|e| PaymentError::invalid_argument(format!("{:#}", e)))?;
        Self::new(options)
    }

    /// Check the signature header of a webhook delivery against its raw body.
    pub fn verify_webhook(&self, payload: &ProviderWebhookPayload) -> bool {
        payload
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(SIGNATURE_HEADER))
            .map(|(_, signature)| self.validate_webhook_signature(&payload.raw_data, signature))
            .unwrap_or(false)
    }

    fn resolve_currency(&self, currency: &str) -> String {
        let currency = currency.trim();
        if currency.is_empty() {
            self.options.default_currency.clone()
        } else {
            currency.to_uppercase()
        }
    }

    fn transaction_currency(&self, tx: &PaystackTransaction) -> String {
        self.resolve_currency(&tx.currency)
    }

    fn snapshot(&self, tx: &PaystackTransaction) -> PaymentResult<PaymentSessionData> {
        let currency = self.transaction_currency(tx);
        to_session_data(&TransactionSnapshot {
            reference: &tx.reference,
            authorization_code: tx.authorization_code(),
            gateway_response: tx.gateway_response.as_deref(),
            amount: to_major_units(tx.amount, &currency),
            currency: &currency,
            status: &tx.status,
            paid_at: tx.paid_at_or_transaction_date(),
            created_at: tx.created_at_or_transaction_date(),
            channel: tx.channel.as_deref(),
        })
    }

    /// Verify the session's transaction and map its status. `action` labels
    /// gateway failures ("authorizing payment", "capturing payment").
    async fn verify_session(
        &self,
        data: &PaymentSessionData,
        action: &str,
    ) -> PaymentResult<AuthorizePaymentOutput> {
        let reference = require_reference(data)?;

        info!("Verifying Paystack payment: reference={}", reference);

        let tx = self
            .client
            .verify_transaction(reference)
            .await
            .map_err(|e| gateway_failure(action, e))?;

        let status = TransactionStatus::from(tx.status.as_str()).session_status();

        info!(
            "Paystack payment verified: reference={}, status={}",
            reference, tx.status
        );

        Ok(AuthorizePaymentOutput {
            status,
            data: self.snapshot(&tx)?,
        })
    }

    fn webhook_transaction(
        &self,
        event: &str,
        data: serde_json::Value,
    ) -> PaymentResult<PaystackTransaction> {
        serde_json::from_value(data).map_err(|e| {
            PaymentError::invalid_data(format!("Malformed {} payload: {}", event, e))
        })
    }
}

/// Generate a transaction reference: `civ-<unix millis>-<7 base36 chars>`.
pub fn generate_reference() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..REFERENCE_SUFFIX_LEN)
        .map(|_| REFERENCE_ALPHABET[rng.gen_range(0..REFERENCE_ALPHABET.len())] as char)
        .collect();
    format!(
        "{}-{}-{}",
        REFERENCE_PREFIX,
        Utc::now().timestamp_millis(),
        suffix
    )
}

fn require_reference(data: &PaymentSessionData) -> PaymentResult<&str> {
    data_str(data, "reference").ok_or_else(|| PaymentError::invalid_data("Reference is missing"))
}

fn to_session_data<T: Serialize>(value: &T) -> PaymentResult<PaymentSessionData> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(PaymentError::unexpected_state(format!(
            "Session data must be an object, got {}",
            other
        ))),
        Err(e) => Err(PaymentError::unexpected_state(format!(
            "Failed to encode session data: {}",
            e
        ))),
    }
}

/// Wrap a gateway failure for `action` ("initiating payment", ...).
fn gateway_failure(action: &str, err: GatewayError) -> PaymentError {
    error!("Paystack error {}: {}", action, err);
    PaymentError::unexpected_state(format!("Error {}: {}", action, err))
}

#[derive(Serialize)]
struct CheckoutSession<'a> {
    reference: &'a str,
    access_code: &'a str,
    authorization_url: &'a str,
    public_key: &'a str,
}

#[derive(Serialize)]
struct TransactionSnapshot<'a> {
    reference: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    authorization_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gateway_response: Option<&'a str>,
    amount: Decimal,
    currency: &'a str,
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    paid_at: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<&'a str>,
}

#[derive(Serialize)]
struct StatusSnapshot<'a> {
    reference: &'a str,
    status: &'a str,
}

#[derive(Serialize)]
struct RefundReceipt<'a> {
    reference: &'a str,
    refund_id: String,
    refund_amount: Decimal,
    status: &'static str,
}

#[derive(Serialize)]
struct CancelReceipt<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<&'a str>,
    status: &'static str,
}

#[async_trait]
impl PaymentProvider for PaystackProvider {
    fn identifier(&self) -> &'static str {
        PROVIDER_IDENTIFIER
    }

    async fn initiate_payment(
        &self,
        input: InitiatePaymentInput,
    ) -> PaymentResult<InitiatePaymentOutput> {
        let email = data_str(&input.data, "email")
            .or_else(|| input.context.as_ref().and_then(|c| c.customer_email()))
            .ok_or_else(|| {
                PaymentError::invalid_argument("Customer email is required to initiate a payment")
            })?
            .to_string();

        let currency = self.resolve_currency(&input.currency_code);
        let amount = to_minor_units(input.amount, &currency)?;
        let reference = generate_reference();

        info!(
            "Initiating Paystack payment: {} {} {}",
            amount, currency, reference
        );

        let callback_url = data_str(&input.data, "success_url")
            .or_else(|| data_str(&input.data, "return_url"))
            .map(str::to_string)
            .or_else(|| self.options.callback_url.clone());

        let metadata = TransactionMetadata {
            order_id: data_str(&input.data, "id").map(str::to_string),
            customer_id: input
                .context
                .as_ref()
                .and_then(|c| c.customer_id())
                .map(str::to_string),
            cart_id: data_str(&input.data, "cart_id").map(str::to_string),
        };

        let request = InitializeTransactionRequest {
            email,
            amount,
            reference,
            currency,
            callback_url,
            metadata,
            channels: self.options.channels.clone(),
        };

        let response = self
            .client
            .initialize_transaction(&request)
            .await
            .map_err(|e| match e {
                GatewayError::Rejected { message } => PaymentError::unexpected_state(format!(
                    "Failed to initialize payment: {}",
                    message
                )),
                other => gateway_failure("initiating payment", other),
            })?;

        info!(
            "Paystack payment initiated successfully: reference={}",
            response.reference
        );

        let data = to_session_data(&CheckoutSession {
            reference: &response.reference,
            access_code: &response.access_code,
            authorization_url: &response.authorization_url,
            public_key: &self.options.public_key,
        })?;

        Ok(InitiatePaymentOutput {
            id: response.reference,
            status: PaymentSessionStatus::Pending,
            data,
        })
    }

    async fn update_payment(
        &self,
        input: UpdatePaymentInput,
    ) -> PaymentResult<UpdatePaymentOutput> {
        // Paystack transactions are immutable; a fresh one replaces the session.
        info!("Updating Paystack payment by re-initiating the transaction");

        let result = self
            .initiate_payment(InitiatePaymentInput {
                amount: input.amount,
                currency_code: input.currency_code,
                context: input.context,
                data: input.data,
            })
            .await?;

        Ok(UpdatePaymentOutput {
            status: result.status,
            data: result.data,
        })
    }

    async fn authorize_payment(
        &self,
        input: AuthorizePaymentInput,
    ) -> PaymentResult<AuthorizePaymentOutput> {
        self.verify_session(&input.data, "authorizing payment").await
    }

    async fn capture_payment(
        &self,
        input: CapturePaymentInput,
    ) -> PaymentResult<CapturePaymentOutput> {
        // Paystack captures on success; capturing is verifying again.
        let authorized = self.verify_session(&input.data, "capturing payment").await?;

        match authorized.status {
            PaymentSessionStatus::Authorized | PaymentSessionStatus::Captured => {
                Ok(CapturePaymentOutput {
                    data: authorized.data,
                })
            }
            _ => {
                let reason = data_str(&authorized.data, "gateway_response")
                    .unwrap_or("Transaction not successful");
                warn!("Paystack capture refused: {}", reason);
                Err(PaymentError::unexpected_state(reason))
            }
        }
    }

    async fn refund_payment(
        &self,
        input: RefundPaymentInput,
    ) -> PaymentResult<RefundPaymentOutput> {
        let transaction = data_str(&input.data, "reference")
            .or_else(|| data_str(&input.data, "authorization_code"))
            .ok_or_else(|| {
                PaymentError::invalid_data("Reference or authorization code required")
            })?
            .to_string();

        let currency = self.resolve_currency(data_str(&input.data, "currency").unwrap_or(""));
        let amount = to_minor_units(input.amount, &currency)?;

        info!(
            "Refunding Paystack payment: transaction={}, amount={} {}",
            transaction, amount, currency
        );

        let refund = self
            .client
            .create_refund(&RefundRequest {
                transaction,
                amount,
                currency,
            })
            .await
            .map_err(|e| match e {
                GatewayError::Rejected { message } => {
                    PaymentError::unexpected_state(format!("Refund failed: {}", message))
                }
                other => gateway_failure("refunding payment", other),
            })?;

        info!(
            "Paystack refund created: refund_id={}, reference={}, status={}",
            refund.id,
            refund.transaction.reference,
            refund.status.as_deref().unwrap_or("unknown")
        );

        let data = to_session_data(&RefundReceipt {
            reference: &refund.transaction.reference,
            refund_id: refund.id.to_string(),
            refund_amount: input.amount,
            status: "refunded",
        })?;

        Ok(RefundPaymentOutput { data })
    }

    async fn cancel_payment(&self, input: CancelPaymentInput) -> PaymentResult<CancelPaymentOutput> {
        // No cancel endpoint for pending transactions; Paystack lets them expire.
        let reference = data_str(&input.data, "reference");
        debug!("Cancelling Paystack payment locally: reference={:?}", reference);

        let data = to_session_data(&CancelReceipt {
            reference,
            status: "canceled",
        })?;

        Ok(CancelPaymentOutput { data })
    }

    async fn delete_payment(&self, _input: DeletePaymentInput) -> PaymentResult<DeletePaymentOutput> {
        Ok(DeletePaymentOutput::default())
    }

    async fn retrieve_payment(
        &self,
        input: RetrievePaymentInput,
    ) -> PaymentResult<RetrievePaymentOutput> {
        let reference = require_reference(&input.data)?;

        debug!("Retrieving Paystack payment: reference={}", reference);

        let tx = self
            .client
            .verify_transaction(reference)
            .await
            .map_err(|e| gateway_failure("retrieving payment", e))?;

        Ok(RetrievePaymentOutput {
            data: self.snapshot(&tx)?,
        })
    }

    async fn get_payment_status(&self, input: GetPaymentStatusInput) -> GetPaymentStatusOutput {
        let degraded = GetPaymentStatusOutput {
            status: PaymentSessionStatus::Error,
            data: PaymentSessionData::new(),
        };

        let Some(reference) = data_str(&input.data, "reference") else {
            warn!("Paystack status requested without a reference");
            return degraded;
        };

        let tx = match self.client.verify_transaction(reference).await {
            Ok(tx) => tx,
            Err(e) => {
                warn!(
                    "Paystack status check failed: reference={}, error={}",
                    reference, e
                );
                return degraded;
            }
        };

        let status = TransactionStatus::from(tx.status.as_str()).session_status();
        match to_session_data(&StatusSnapshot {
            reference: &tx.reference,
            status: &tx.status,
        }) {
            Ok(data) => GetPaymentStatusOutput { status, data },
            Err(e) => {
                warn!("Paystack status check failed: {}", e);
                degraded
            }
        }
    }

    async fn get_webhook_action_and_data(
        &self,
        payload: ProviderWebhookPayload,
    ) -> PaymentResult<WebhookActionResult> {
        let body = if payload.data.is_null() && !payload.raw_data.is_empty() {
            serde_json::from_slice(&payload.raw_data).unwrap_or(serde_json::Value::Null)
        } else {
            payload.data
        };

        let event: PaystackWebhookEvent = match serde_json::from_value(body) {
            Ok(event) => event,
            Err(e) => {
                warn!("Ignoring unrecognized Paystack webhook body: {}", e);
                return Ok(WebhookActionResult::not_supported());
            }
        };

        match event.event.as_str() {
            EVENT_CHARGE_SUCCESS => {
                let tx = self.webhook_transaction(&event.event, event.data)?;
                let currency = self.transaction_currency(&tx);
                let amount = to_major_units(tx.amount, &currency);

                info!(
                    "Paystack webhook {}: reference={}, amount={} {}",
                    event.event, tx.reference, amount, currency
                );

                Ok(WebhookActionResult {
                    action: PaymentAction::Authorized,
                    data: Some(WebhookActionData {
                        session_id: tx.reference,
                        amount,
                    }),
                })
            }
            EVENT_CHARGE_FAILED => {
                let tx = self.webhook_transaction(&event.event, event.data)?;

                info!(
                    "Paystack webhook {}: reference={}",
                    event.event, tx.reference
                );

                Ok(WebhookActionResult {
                    action: PaymentAction::Failed,
                    data: Some(WebhookActionData {
                        session_id: tx.reference,
                        amount: Decimal::ZERO,
                    }),
                })
            }
            other => {
                debug!("Paystack webhook event not supported: {}", other);
                Ok(WebhookActionResult::not_supported())
            }
        }
    }

    fn validate_webhook_signature(&self, payload: &[u8], signature: &str) -> bool {
        // Paystack sends the HMAC-SHA512 of the raw body as a hex string
        let Ok(provided) = hex::decode(signature.trim()) else {
            return false;
        };

        let Ok(mut mac) = HmacSha512::new_from_slice(self.options.secret_key.as_bytes()) else {
            return false;
        };

        mac.update(payload);
        // verify_slice compares in constant time
        mac.verify_slice(&provided).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::collections::HashMap;

    fn create_test_provider() -> PaystackProvider {
        let options = PaystackOptions::new("sk_test_test_key", "pk_test_test_key", true);
        PaystackProvider::new(options).unwrap()
    }

    fn sign(secret: &str, body: &[u8]) -> String {
        let mut mac = HmacSha512::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }

    fn webhook(body: serde_json::Value) -> ProviderWebhookPayload {
        ProviderWebhookPayload {
            data: body,
            ..Default::default()
        }
    }

    #[test]
    fn test_identifier() {
        assert_eq!(create_test_provider().identifier(), "paystack-civ");
    }

    #[test]
    fn test_new_rejects_invalid_options() {
        let options = PaystackOptions::new("", "pk_test_test_key", true);
        let err = PaystackProvider::new(options).err().unwrap();
        assert!(err.is_validation());
    }

    #[test]
    fn test_generate_reference_format() {
        let reference = generate_reference();
        let parts: Vec<&str> = reference.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], REFERENCE_PREFIX);
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), REFERENCE_SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_ne!(generate_reference(), generate_reference());
    }

    #[test]
    fn test_webhook_signature_validation_invalid() {
        let provider = create_test_provider();
        let payload = b"test payload";
        assert!(!provider.validate_webhook_signature(payload, "invalid_signature"));
        assert!(!provider.validate_webhook_signature(payload, &sign("sk_test_other", payload)));
    }

    #[test]
    fn test_webhook_signature_validation_valid() {
        let provider = create_test_provider();
        let payload = br#"{"event":"charge.success"}"#;
        let signature = sign("sk_test_test_key", payload);
        assert!(provider.validate_webhook_signature(payload, &signature));
        assert!(provider.validate_webhook_signature(payload, &format!(" {} ", signature)));
    }

    #[test]
    fn test_verify_webhook_reads_header_case_insensitively() {
        let provider = create_test_provider();
        let raw = br#"{"event":"charge.success"}"#.to_vec();
        let mut headers = HashMap::new();
        headers.insert("X-Paystack-Signature".to_string(), sign("sk_test_test_key", &raw));

        let payload = ProviderWebhookPayload {
            data: json!({"event": "charge.success"}),
            raw_data: raw,
            headers,
        };
        assert!(provider.verify_webhook(&payload));

        let unsigned = ProviderWebhookPayload {
            headers: HashMap::new(),
            ..payload
        };
        assert!(!provider.verify_webhook(&unsigned));
    }

    #[tokio::test]
    async fn test_webhook_charge_success() {
        let provider = create_test_provider();
        let result = provider
            .get_webhook_action_and_data(webhook(json!({
                "event": "charge.success",
                "data": {"reference": "civ-1-abc", "amount": 5000, "currency": "XOF", "status": "success"}
            })))
            .await
            .unwrap();

        assert_eq!(result.action, PaymentAction::Authorized);
        let data = result.data.unwrap();
        assert_eq!(data.session_id, "civ-1-abc");
        assert_eq!(data.amount, dec!(5000));
    }

    #[tokio::test]
    async fn test_webhook_charge_success_two_decimal_currency() {
        let provider = create_test_provider();
        let result = provider
            .get_webhook_action_and_data(webhook(json!({
                "event": "charge.success",
                "data": {"reference": "civ-2-abc", "amount": 150050, "currency": "NGN"}
            })))
            .await
            .unwrap();

        assert_eq!(result.data.unwrap().amount, dec!(1500.50));
    }

    #[tokio::test]
    async fn test_webhook_charge_failed() {
        let provider = create_test_provider();
        let result = provider
            .get_webhook_action_and_data(webhook(json!({
                "event": "charge.failed",
                "data": {"reference": "civ-3-abc", "amount": 5000, "currency": "XOF"}
            })))
            .await
            .unwrap();

        assert_eq!(result.action, PaymentAction::Failed);
        let data = result.data.unwrap();
        assert_eq!(data.session_id, "civ-3-abc");
        assert_eq!(data.amount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_webhook_other_events_not_supported() {
        let provider = create_test_provider();
        for body in [
            json!({"event": "transfer.success", "data": {"reference": "trf_1"}}),
            json!({"event": "subscription.create", "data": {}}),
            json!({"unexpected": true}),
            serde_json::Value::Null,
        ] {
            let result = provider
                .get_webhook_action_and_data(webhook(body))
                .await
                .unwrap();
            assert_eq!(result, WebhookActionResult::not_supported());
        }
    }

    #[tokio::test]
    async fn test_webhook_falls_back_to_raw_body() {
        let provider = create_test_provider();
        let payload = ProviderWebhookPayload {
            data: serde_json::Value::Null,
            raw_data: br#"{"event":"charge.success","data":{"reference":"civ-4-abc","amount":700,"currency":"XOF"}}"#.to_vec(),
            headers: HashMap::new(),
        };

        let result = provider.get_webhook_action_and_data(payload).await.unwrap();
        assert_eq!(result.action, PaymentAction::Authorized);
        assert_eq!(result.data.unwrap().amount, dec!(700));
    }

    #[tokio::test]
    async fn test_webhook_charge_without_reference_is_invalid() {
        let provider = create_test_provider();
        let err = provider
            .get_webhook_action_and_data(webhook(json!({
                "event": "charge.success",
                "data": {"amount": 5000}
            })))
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidData { .. }));
    }

    #[tokio::test]
    async fn test_webhook_charge_failed_with_null_fields() {
        let provider = create_test_provider();
        let result = provider
            .get_webhook_action_and_data(webhook(json!({
                "event": "charge.failed",
                "data": {"reference": "civ-1-abc", "amount": null, "currency": null, "status": null}
            })))
            .await
            .unwrap();

        assert_eq!(result.action, PaymentAction::Failed);
        let data = result.data.unwrap();
        assert_eq!(data.session_id, "civ-1-abc");
        assert_eq!(data.amount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_webhook_charge_success_with_null_currency_uses_default() {
        let provider = create_test_provider();
        let result = provider
            .get_webhook_action_and_data(webhook(json!({
                "event": "charge.success",
                "data": {"reference": "civ-2-abc", "amount": 5000, "currency": null, "status": "success"}
            })))
            .await
            .unwrap();

        assert_eq!(result.action, PaymentAction::Authorized);
        assert_eq!(result.data.unwrap().amount, dec!(5000));
    }

    #[tokio::test]
    async fn test_cancel_without_reference() {
        let provider = create_test_provider();
        let output = provider
            .cancel_payment(CancelPaymentInput::default())
            .await
            .unwrap();

        assert!(output.data.get("reference").is_none());
        assert_eq!(output.data["status"], json!("canceled"));
    }

    #[tokio::test]
    async fn test_cancel_echoes_reference() {
        let provider = create_test_provider();
        let data = json!({"reference": "civ-5-abc"}).as_object().cloned().unwrap();
        let output = provider
            .cancel_payment(CancelPaymentInput::new(data))
            .await
            .unwrap();

        assert_eq!(output.data["reference"], json!("civ-5-abc"));
        assert_eq!(output.data["status"], json!("canceled"));
    }

    #[tokio::test]
    async fn test_delete_is_noop() {
        let provider = create_test_provider();
        let output = provider
            .delete_payment(DeletePaymentInput::default())
            .await
            .unwrap();
        assert!(output.data.is_empty());
    }

    #[tokio::test]
    async fn test_authorize_requires_reference() {
        let provider = create_test_provider();
        let err = provider
            .authorize_payment(AuthorizePaymentInput::default())
            .await
            .unwrap_err();
        assert_eq!(err, PaymentError::invalid_data("Reference is missing"));
    }

    #[tokio::test]
    async fn test_status_without_reference_degrades() {
        let provider = create_test_provider();
        let output = provider
            .get_payment_status(GetPaymentStatusInput::default())
            .await;
        assert_eq!(output.status, PaymentSessionStatus::Error);
        assert!(output.data.is_empty());
    }

    #[tokio::test]
    async fn test_initiate_requires_email() {
        let provider = create_test_provider();
        let err = provider
            .initiate_payment(InitiatePaymentInput {
                amount: dec!(1000),
                currency_code: "XOF".to_string(),
                context: None,
                data: PaymentSessionData::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidArgument { .. }));
    }
}
