//! Endpoint wrappers, one method per remote operation.
//!
//! Every wrapper follows the same pipeline: build the path, build the payload, then run
//! [`LarkClient::call`](crate::client::LarkClient::call), which checks the HTTP status, decodes
//! the envelope, and surfaces non-zero service codes.

pub mod contact;
pub mod sheets;

pub use contact::*;
pub use sheets::*;

// self
use crate::{_prelude::*, error::ConfigError};

/// Rejects empty identifiers before they reach a URL or payload.
pub(crate) fn require_non_empty(name: &'static str, value: &str) -> Result<(), ConfigError> {
	if value.trim().is_empty() { Err(ConfigError::EmptyParameter { name }) } else { Ok(()) }
}
