//! HTTP client module
//!
//! Provides the client used for the single authenticated GET.
//!
//! # Features
//!
//! - **Basic Authentication**: Integration with auth module
//! - **Certificate Policy**: TLS validation is disabled unless configured
//! - **Error Classification**: 5xx and connection failures are fatal; 4xx
//!   bodies are still handed back for format detection

mod client;

pub use client::{HttpClient, HttpClientConfig};
