//! Core types and trait definitions for the Roster segmentation bot.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::ProfileStore`]; platform clients
//! implement [`messaging::Messenger`]. The workflow crate depends only on
//! these abstractions.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod event;
pub mod message;
pub mod messaging;
pub mod segment;
pub mod store;
pub mod user;

pub use error::{Error, Result};
