//! Paystack payment provider for Côte d'Ivoire (XOF) storefronts
//!
//! Adapts the Paystack REST API to the payment-provider capability set a
//! commerce host drives: initiate, authorize, capture, refund, cancel, delete,
//! retrieve, status queries and webhook classification.

pub mod config;
pub mod error;
pub mod payments;

pub use config::PaystackOptions;
pub use error::{PaymentError, PaymentResult};
pub use payments::providers::PaystackProvider;
pub use payments::traits::PaymentProvider;
