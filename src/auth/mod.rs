//! Authentication module
//!
//! Supports: HTTP Basic, or no authentication at all.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
