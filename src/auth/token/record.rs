//! Tenant access token record and the token endpoint reply it is built from.

// self
use crate::{_prelude::*, auth::token::secret::TokenSecret};

/// Lifetime assumed when the token endpoint omits `expire` (the documented default).
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::hours(2);

/// Tenant access token currently held by the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TenantToken {
	/// Bearer secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Instant the token was received.
	pub issued_at: OffsetDateTime,
	/// Instant the token stops being accepted.
	pub expires_at: OffsetDateTime,
}
impl TenantToken {
	/// Creates a token that expires `expires_in` after `issued_at`.
	///
	/// A lifetime that overflows the calendar falls back to [`DEFAULT_TOKEN_LIFETIME`].
	pub fn new(
		access_token: TokenSecret,
		issued_at: OffsetDateTime,
		expires_in: Duration,
	) -> Self {
		let expires_at = issued_at
			.checked_add(expires_in)
			.unwrap_or_else(|| issued_at.saturating_add(DEFAULT_TOKEN_LIFETIME));

		Self { access_token, issued_at, expires_at }
	}

	/// Returns `true` once `instant` reaches the expiry.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant >= self.expires_at
	}
}

/// Body posted to the token endpoint.
#[derive(Serialize)]
pub(crate) struct TokenRequest<'a> {
	pub(crate) app_id: &'a str,
	pub(crate) app_secret: &'a str,
}

/// Reply of the internal-app token endpoint. Unlike other endpoints the token fields sit at
/// the top level instead of inside `data`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TokenReply {
	pub(crate) code: i64,
	pub(crate) msg: String,
	pub(crate) tenant_access_token: String,
	pub(crate) expire: i64,
}
impl TokenReply {
	/// Converts a successful reply into a [`TenantToken`] issued at `now`.
	pub(crate) fn into_token(self, now: OffsetDateTime) -> Result<TenantToken> {
		if self.code != 0 {
			return Err(Error::Service { code: self.code, msg: self.msg });
		}

		let secret = TokenSecret::new(self.tenant_access_token);

		if secret.is_blank() {
			return Err(Error::TokenUnavailable);
		}

		let lifetime =
			if self.expire > 0 { Duration::seconds(self.expire) } else { DEFAULT_TOKEN_LIFETIME };

		Ok(TenantToken::new(secret, now, lifetime))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn reply(body: &str) -> TokenReply {
		serde_json::from_str(body).expect("Token reply fixture should deserialize.")
	}

	#[test]
	fn successful_reply_builds_token() {
		let now = OffsetDateTime::now_utc();
		let token = reply(r#"{"code":0,"msg":"ok","tenant_access_token":"t-abc","expire":7140}"#)
			.into_token(now)
			.expect("Successful reply should build a token.");

		assert_eq!(token.access_token.expose(), "t-abc");
		assert_eq!(token.expires_at, now + Duration::seconds(7140));
		assert!(!token.is_expired_at(now));
		assert!(token.is_expired_at(now + Duration::seconds(7140)));
	}

	#[test]
	fn missing_expire_falls_back_to_default_lifetime() {
		let now = OffsetDateTime::now_utc();
		let token = reply(r#"{"tenant_access_token":"t-abc"}"#)
			.into_token(now)
			.expect("Reply without expire should still build a token.");

		assert_eq!(token.expires_at - token.issued_at, DEFAULT_TOKEN_LIFETIME);
	}

	#[test]
	fn out_of_range_expire_falls_back_to_default_lifetime() {
		let now = OffsetDateTime::now_utc();
		let token = reply(&format!(r#"{{"tenant_access_token":"t-abc","expire":{}}}"#, i64::MAX))
			.into_token(now)
			.expect("An oversized expire should still build a token.");

		assert_eq!(token.expires_at - token.issued_at, DEFAULT_TOKEN_LIFETIME);
		assert!(token.is_expired_at(now + DEFAULT_TOKEN_LIFETIME));
	}

	#[test]
	fn failures_are_classified() {
		let now = OffsetDateTime::now_utc();
		let err = reply(r#"{"code":10003,"msg":"invalid param"}"#)
			.into_token(now)
			.expect_err("Non-zero code should fail.");

		assert!(matches!(err, Error::Service { code: 10003, .. }));

		let err = reply(r#"{"code":0,"msg":"ok","tenant_access_token":""}"#)
			.into_token(now)
			.expect_err("Empty token should fail.");

		assert!(matches!(err, Error::TokenUnavailable));
	}
}
