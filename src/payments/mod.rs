//! Payment provider integration module
//!
//! The host drives providers through the `PaymentProvider` capability set;
//! Paystack is the only gateway wired in, targeting XOF checkouts in Côte d'Ivoire.

pub mod amount;
pub mod providers;
pub mod traits;
pub mod types;
