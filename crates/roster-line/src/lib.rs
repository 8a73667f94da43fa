//! LINE Messaging API binding for Roster.
//!
//! [`LineClient`] implements [`roster_core::messaging::Messenger`] over HTTPS.
//! [`signature`] verifies the `x-line-signature` header on inbound webhooks.

pub mod client;
pub mod error;
pub mod signature;

pub use client::{LineClient, LineConfig};
pub use error::{Error, Result};
