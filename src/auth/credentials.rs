//! App credentials used to mint tenant access tokens.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Errors raised when credentials fail validation.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum CredentialsError {
	/// The app identifier was empty or whitespace.
	#[error("App ID cannot be empty.")]
	EmptyAppId,
	/// The app secret was empty or whitespace.
	#[error("App secret cannot be empty.")]
	EmptyAppSecret,
}

/// Internal-app identifier and secret issued by the developer console.
#[derive(Clone, PartialEq, Eq)]
pub struct AppCredentials {
	app_id: String,
	app_secret: TokenSecret,
}
impl AppCredentials {
	/// Validates and wraps an app identifier + secret pair.
	pub fn new(
		app_id: impl Into<String>,
		app_secret: impl Into<String>,
	) -> Result<Self, CredentialsError> {
		let app_id = app_id.into();
		let app_secret = TokenSecret::new(app_secret);

		if app_id.trim().is_empty() {
			return Err(CredentialsError::EmptyAppId);
		}
		if app_secret.is_blank() {
			return Err(CredentialsError::EmptyAppSecret);
		}

		Ok(Self { app_id, app_secret })
	}

	/// Returns the app identifier.
	pub fn app_id(&self) -> &str {
		&self.app_id
	}

	/// Returns the app secret.
	pub fn app_secret(&self) -> &TokenSecret {
		&self.app_secret
	}
}
impl Debug for AppCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppCredentials")
			.field("app_id", &self.app_id)
			.field("app_secret", &self.app_secret)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn rejects_blank_fields() {
		assert_eq!(AppCredentials::new("", "secret"), Err(CredentialsError::EmptyAppId));
		assert_eq!(AppCredentials::new("cli_a1", " "), Err(CredentialsError::EmptyAppSecret));
	}

	#[test]
	fn debug_output_redacts_secret() {
		let credentials =
			AppCredentials::new("cli_a1", "very-secret").expect("Credentials should be valid.");
		let rendered = format!("{credentials:?}");

		assert!(rendered.contains("cli_a1"));
		assert!(!rendered.contains("very-secret"));
	}
}
