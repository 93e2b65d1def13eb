//! Client-level error types shared by the token manager, transport, and endpoint wrappers.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

const BODY_PREVIEW_LIMIT: usize = 512;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or parameter problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Remote endpoint answered with a status other than `200 OK`.
	#[error("Lark API responded with HTTP {status}: {body}.")]
	Http {
		/// HTTP status code.
		status: u16,
		/// Truncated, lossily decoded response body.
		body: String,
	},
	/// Remote endpoint answered `200 OK` but the envelope carried a non-zero code.
	#[error("Lark API returned service error {code}: {msg}.")]
	Service {
		/// Service-specific error code.
		code: i64,
		/// Service-supplied message.
		msg: String,
	},
	/// Response body could not be decoded into the expected shape.
	#[error("Lark API returned a malformed body for `{operation}`.")]
	Decode {
		/// Operation label that produced the body.
		operation: &'static str,
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Successful envelope without the `data` payload the operation requires.
	#[error("Lark API response for `{operation}` is missing its data payload.")]
	MissingData {
		/// Operation label that produced the envelope.
		operation: &'static str,
	},
	/// Token endpoint answered successfully without issuing a token.
	#[error("Token endpoint did not issue a tenant access token.")]
	TokenUnavailable,
	/// Contact lookup matched no user.
	#[error("No user matches the email {email}.")]
	UserNotFound {
		/// Email that was looked up.
		email: String,
	},
}
impl Error {
	/// Builds an [`Error::Http`] with a bounded preview of the response body.
	pub fn http(status: u16, body: &[u8]) -> Self {
		Self::Http { status, body: body_preview(body) }
	}

	/// Returns the HTTP status for [`Error::Http`].
	pub fn http_status(&self) -> Option<u16> {
		match self {
			Self::Http { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Returns the service code for [`Error::Service`].
	pub fn service_code(&self) -> Option<i64> {
		match self {
			Self::Service { code, .. } => Some(*code),
			_ => None,
		}
	}
}

/// Configuration and parameter failures raised before any request is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Client configuration failed validation.
	#[error(transparent)]
	InvalidConfig(#[from] crate::config::ClientConfigError),
	/// Application credentials failed validation.
	#[error(transparent)]
	InvalidCredentials(#[from] crate::auth::CredentialsError),
	/// Base URL cannot be extended with path segments.
	#[error("Base URL `{url}` cannot carry an API path.")]
	UnusableBaseUrl {
		/// Offending base URL.
		url: String,
	},
	/// A required request parameter was empty.
	#[error("Required parameter `{name}` is empty.")]
	EmptyParameter {
		/// Parameter name.
		name: &'static str,
	},
	/// Request payload could not be serialized to JSON.
	#[error("Request payload could not be serialized.")]
	Serialize(#[source] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the Lark API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request did not complete within the configured timeout.
	#[error("Request to the Lark API timed out.")]
	Timeout,
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the Lark API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::Timeout } else { Self::network(e) }
	}
}

fn body_preview(body: &[u8]) -> String {
	let text = String::from_utf8_lossy(body);

	match text.char_indices().nth(BODY_PREVIEW_LIMIT) {
		Some((cut, _)) => format!("{}...", &text[..cut]),
		None => text.into_owned(),
	}
}
