use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::env;
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://api.paystack.co";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CURRENCY: &str = "XOF";

/// Payment channels offered on the Paystack checkout page by default.
pub const DEFAULT_CHANNELS: &[&str] = &[
    "card",
    "bank",
    "ussd",
    "qr",
    "mobile_money",
    "bank_transfer",
];

/// Options the host hands to the Paystack provider at construction.
#[derive(Clone, Deserialize)]
pub struct PaystackOptions {
    pub secret_key: String,
    pub public_key: String,
    #[serde(default)]
    pub test_mode: bool,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_currency")]
    pub default_currency: String,
    #[serde(default = "default_channels")]
    pub channels: Vec<String>,
    #[serde(default)]
    pub callback_url: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_channels() -> Vec<String> {
    DEFAULT_CHANNELS.iter().map(|c| c.to_string()).collect()
}

// The secret key never reaches logs
impl fmt::Debug for PaystackOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaystackOptions")
            .field("secret_key", &"[REDACTED]")
            .field("public_key", &self.public_key)
            .field("test_mode", &self.test_mode)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("default_currency", &self.default_currency)
            .field("channels", &self.channels)
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

impl PaystackOptions {
    pub fn new(
        secret_key: impl Into<String>,
        public_key: impl Into<String>,
        test_mode: bool,
    ) -> Self {
        Self {
            secret_key: secret_key.into(),
            public_key: public_key.into(),
            test_mode,
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_currency: default_currency(),
            channels: default_channels(),
            callback_url: None,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build options from any key lookup (environment, secrets store, test map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup("PAYSTACK_SECRET_KEY").context("PAYSTACK_SECRET_KEY not set")?;
        let public_key = lookup("PAYSTACK_PUBLIC_KEY").context("PAYSTACK_PUBLIC_KEY not set")?;

        let test_mode = match lookup("PAYSTACK_TEST_MODE") {
            Some(value) => value
                .trim()
                .parse()
                .context("PAYSTACK_TEST_MODE must be 'true' or 'false'")?,
            None => false,
        };

        let timeout_secs = match lookup("PAYSTACK_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse()
                .context("PAYSTACK_TIMEOUT_SECS must be a valid number")?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let channels = match lookup("PAYSTACK_CHANNELS") {
            Some(value) => value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => default_channels(),
        };

        let options = PaystackOptions {
            secret_key,
            public_key,
            test_mode,
            base_url: lookup("PAYSTACK_BASE_URL").unwrap_or_else(default_base_url),
            timeout_secs,
            default_currency: lookup("PAYSTACK_DEFAULT_CURRENCY")
                .map(|c| c.trim().to_uppercase())
                .unwrap_or_else(default_currency),
            channels,
            callback_url: lookup("PAYSTACK_CALLBACK_URL").filter(|u| !u.trim().is_empty()),
        };

        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.secret_key.trim().is_empty() {
            return Err(anyhow!("PAYSTACK_SECRET_KEY cannot be empty"));
        }

        if self.public_key.trim().is_empty() {
            return Err(anyhow!("PAYSTACK_PUBLIC_KEY cannot be empty"));
        }

        // Keys carry their mode in the prefix
        check_key_mode("secret", &self.secret_key, "sk", self.test_mode)?;
        check_key_mode("public", &self.public_key, "pk", self.test_mode)?;

        if self.base_url.trim().is_empty() {
            return Err(anyhow!("PAYSTACK_BASE_URL cannot be empty"));
        }

        if self.timeout_secs == 0 {
            return Err(anyhow!("PAYSTACK_TIMEOUT_SECS must be greater than 0"));
        }

        let currency = self.default_currency.as_str();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(anyhow!(
                "PAYSTACK_DEFAULT_CURRENCY must be a three-letter ISO code, got {}",
                self.default_currency
            ));
        }

        if self.channels.is_empty() {
            return Err(anyhow!(
                "PAYSTACK_CHANNELS must contain at least one channel"
            ));
        }

        Ok(())
    }
}

fn check_key_mode(label: &str, key: &str, kind: &str, test_mode: bool) -> Result<()> {
    let test_prefix = format!("{}_test_", kind);
    let live_prefix = format!("{}_live_", kind);

    if test_mode && key.starts_with(&live_prefix) {
        return Err(anyhow!(
            "Live {} key supplied while test mode is enabled",
            label
        ));
    }

    if !test_mode && key.starts_with(&test_prefix) {
        return Err(anyhow!(
            "Test {} key supplied while test mode is disabled",
            label
        ));
    }

    Ok(())
}
