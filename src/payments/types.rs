//! Payment provider types and data structures
//!
//! Input and output shapes of the provider capability set, as the host
//! exchanges them with every provider.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Free-form session data the host persists and replays to the provider.
pub type PaymentSessionData = serde_json::Map<String, serde_json::Value>;

/// Read a non-empty string field from session data.
pub fn data_str<'a>(data: &'a PaymentSessionData, key: &str) -> Option<&'a str> {
    data.get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Host-level state of a payment session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSessionStatus {
    Authorized,
    Captured,
    Pending,
    RequiresMore,
    Error,
    Canceled,
}

/// What the host should do in response to a webhook
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentAction {
    Authorized,
    Captured,
    Failed,
    Pending,
    Canceled,
    NotSupported,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerContext {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentProviderContext {
    #[serde(default)]
    pub customer: Option<CustomerContext>,
}

impl PaymentProviderContext {
    pub fn customer_email(&self) -> Option<&str> {
        self.customer
            .as_ref()
            .and_then(|c| c.email.as_deref())
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer.as_ref().and_then(|c| c.id.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiatePaymentInput {
    /// Amount in major currency units
    pub amount: Decimal,
    pub currency_code: String,
    #[serde(default)]
    pub context: Option<PaymentProviderContext>,
    #[serde(default)]
    pub data: PaymentSessionData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InitiatePaymentOutput {
    pub id: String,
    pub status: PaymentSessionStatus,
    pub data: PaymentSessionData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePaymentInput {
    pub amount: Decimal,
    pub currency_code: String,
    #[serde(default)]
    pub context: Option<PaymentProviderContext>,
    #[serde(default)]
    pub data: PaymentSessionData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdatePaymentOutput {
    pub status: PaymentSessionStatus,
    pub data: PaymentSessionData,
}

/// Input shared by operations that only need the stored session data
/// (authorize, capture, cancel, delete, retrieve, status).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentDataInput {
    #[serde(default)]
    pub data: PaymentSessionData,
}

impl PaymentDataInput {
    pub fn new(data: PaymentSessionData) -> Self {
        Self { data }
    }
}

pub type AuthorizePaymentInput = PaymentDataInput;
pub type CapturePaymentInput = PaymentDataInput;
pub type CancelPaymentInput = PaymentDataInput;
pub type DeletePaymentInput = PaymentDataInput;
pub type RetrievePaymentInput = PaymentDataInput;
pub type GetPaymentStatusInput = PaymentDataInput;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthorizePaymentOutput {
    pub status: PaymentSessionStatus,
    pub data: PaymentSessionData,
}

pub type GetPaymentStatusOutput = AuthorizePaymentOutput;

/// Output of operations that only hand back session data
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaymentDataOutput {
    pub data: PaymentSessionData,
}

pub type CapturePaymentOutput = PaymentDataOutput;
pub type CancelPaymentOutput = PaymentDataOutput;
pub type DeletePaymentOutput = PaymentDataOutput;
pub type RetrievePaymentOutput = PaymentDataOutput;
pub type RefundPaymentOutput = PaymentDataOutput;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundPaymentInput {
    /// Refund amount in major currency units
    pub amount: Decimal,
    #[serde(default)]
    pub data: PaymentSessionData,
}

/// Webhook delivery as the host receives it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderWebhookPayload {
    /// Parsed JSON body
    pub data: serde_json::Value,
    /// Raw body bytes, needed for signature checks
    #[serde(default)]
    pub raw_data: Vec<u8>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookActionData {
    pub session_id: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookActionResult {
    pub action: PaymentAction,
    #[serde(default)]
    pub data: Option<WebhookActionData>,
}

impl WebhookActionResult {
    pub fn not_supported() -> Self {
        Self {
            action: PaymentAction::NotSupported,
            data: None,
        }
    }
}
