//! Typed access to the summaries backend.
//!
//! [`client`] owns the HTTP plumbing and the session token, [`types`] maps
//! the wire JSON (including its schema drift) into canonical records, and
//! [`summaries`] exposes one function per endpoint. Every operation
//! reports failure through [`error::ApiError`].

pub mod client;
pub mod error;
pub mod summaries;
pub mod types;

pub use client::ApiClient;
