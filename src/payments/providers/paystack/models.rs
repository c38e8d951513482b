//! Paystack wire types
//!
//! Request bodies and response payloads of the endpoints the provider uses:
//! `POST /transaction/initialize`, `GET /transaction/verify/{reference}`,
//! `POST /refund`, plus the webhook event envelope.

use crate::payments::types::PaymentSessionStatus;
use serde::{Deserialize, Deserializer, Serialize};

// Paystack sends explicit nulls for fields it has no value for yet
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Paystack API response wrapper. `data` stays untyped until `status` is known
// to be true, since failure bodies carry no usable data.
#[derive(Debug, Deserialize)]
pub struct PaystackEnvelope {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct TransactionMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InitializeTransactionRequest {
    pub email: String,
    /// Amount in the currency's minor unit
    pub amount: i64,
    pub reference: String,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    pub metadata: TransactionMetadata,
    pub channels: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitializeTransactionData {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaystackAuthorization {
    #[serde(default)]
    pub authorization_code: Option<String>,
}

/// Transaction as returned by verify and embedded in charge webhooks
#[derive(Debug, Clone, Deserialize)]
pub struct PaystackTransaction {
    pub reference: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub gateway_response: Option<String>,
    #[serde(default)]
    pub paid_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub transaction_date: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub authorization: Option<PaystackAuthorization>,
}

impl PaystackTransaction {
    pub fn authorization_code(&self) -> Option<&str> {
        self.authorization
            .as_ref()
            .and_then(|a| a.authorization_code.as_deref())
    }

    pub fn paid_at_or_transaction_date(&self) -> Option<&str> {
        self.paid_at
            .as_deref()
            .or(self.transaction_date.as_deref())
    }

    pub fn created_at_or_transaction_date(&self) -> Option<&str> {
        self.created_at
            .as_deref()
            .or(self.transaction_date.as_deref())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RefundRequest {
    /// Transaction reference or authorization code
    pub transaction: String,
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefundTransaction {
    pub reference: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefundData {
    pub id: u64,
    pub transaction: RefundTransaction,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaystackWebhookEvent {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

pub const EVENT_CHARGE_SUCCESS: &str = "charge.success";
pub const EVENT_CHARGE_FAILED: &str = "charge.failed";

/// Transaction status as reported by the verify endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    Success,
    Failed,
    Pending,
    Abandoned,
    Ongoing,
    Processing,
    Queued,
    Reversed,
    Unknown(String),
}

impl From<&str> for TransactionStatus {
    fn from(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "success" => TransactionStatus::Success,
            "failed" => TransactionStatus::Failed,
            "pending" => TransactionStatus::Pending,
            "abandoned" => TransactionStatus::Abandoned,
            "ongoing" => TransactionStatus::Ongoing,
            "processing" => TransactionStatus::Processing,
            "queued" => TransactionStatus::Queued,
            "reversed" => TransactionStatus::Reversed,
            other => TransactionStatus::Unknown(other.to_string()),
        }
    }
}

impl TransactionStatus {
    /// Map onto the host's session status. Paystack settles a `success`
    /// transaction immediately; anything not yet final stays pending.
    pub fn session_status(&self) -> PaymentSessionStatus {
        match self {
            TransactionStatus::Success => PaymentSessionStatus::Authorized,
            TransactionStatus::Failed => PaymentSessionStatus::Error,
            _ => PaymentSessionStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            TransactionStatus::from("success").session_status(),
            PaymentSessionStatus::Authorized
        );
        assert_eq!(
            TransactionStatus::from("failed").session_status(),
            PaymentSessionStatus::Error
        );
        for status in ["pending", "abandoned", "ongoing", "queued", "reversed", "weird"] {
            assert_eq!(
                TransactionStatus::from(status).session_status(),
                PaymentSessionStatus::Pending,
                "status {} should map to pending",
                status
            );
        }
        assert_eq!(
            TransactionStatus::from("weird"),
            TransactionStatus::Unknown("weird".to_string())
        );
    }

    #[test]
    fn test_transaction_falls_back_to_transaction_date() {
        let tx: PaystackTransaction = serde_json::from_value(json!({
            "reference": "civ-1-abc",
            "amount": 1000,
            "currency": "XOF",
            "status": "success",
            "paid_at": null,
            "transaction_date": "2024-05-01T10:00:00.000Z",
            "authorization": {"authorization_code": "AUTH_x1"}
        }))
        .unwrap();

        assert_eq!(tx.paid_at_or_transaction_date(), Some("2024-05-01T10:00:00.000Z"));
        assert_eq!(tx.created_at_or_transaction_date(), Some("2024-05-01T10:00:00.000Z"));
        assert_eq!(tx.authorization_code(), Some("AUTH_x1"));
    }

    #[test]
    fn test_transaction_tolerates_null_fields() {
        let tx: PaystackTransaction = serde_json::from_value(json!({
            "reference": "civ-1-abc",
            "amount": null,
            "currency": null,
            "status": null,
            "authorization": null
        }))
        .unwrap();

        assert_eq!(tx.reference, "civ-1-abc");
        assert_eq!(tx.amount, 0);
        assert!(tx.currency.is_empty());
        assert_eq!(
            TransactionStatus::from(tx.status.as_str()).session_status(),
            PaymentSessionStatus::Pending
        );
        assert_eq!(tx.authorization_code(), None);
    }

    #[test]
    fn test_initialize_request_skips_empty_fields() {
        let request = InitializeTransactionRequest {
            email: "buyer@example.ci".to_string(),
            amount: 1000,
            reference: "civ-1-abc".to_string(),
            currency: "XOF".to_string(),
            callback_url: None,
            metadata: TransactionMetadata::default(),
            channels: vec!["card".to_string()],
        };
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("callback_url").is_none());
        assert_eq!(body["metadata"], json!({}));
        assert_eq!(body["amount"], json!(1000));
    }
}
