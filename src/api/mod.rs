//! HTTP access to the attendance API
//!
//! The runner talks to the API only through [`ApiTransport`], which keeps
//! the case logic independent of the real network client.

mod client;
pub mod types;

pub use client::{ApiClient, ApiResponse, ApiTransport};
