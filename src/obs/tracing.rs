// self
use crate::{_prelude::*, auth::TenantToken, http::Method, obs::Operation};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by client calls.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided operation + HTTP method.
	pub fn new(operation: Operation, method: Method) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"lark_util.call",
				operation = operation.as_str(),
				method = method.as_str()
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (operation, method);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event after a token rotation.
pub fn token_refreshed(token: &TenantToken) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(expires_at = %token.expires_at, "Tenant access token refreshed.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = token;
	}
}

/// Emits a warning when the background refresher fails; the previous token stays in use.
pub fn token_refresh_failed(error: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(%error, "Background tenant token refresh failed; keeping previous token.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = error;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = CallSpan::new(Operation::Custom, Method::Get);
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn refresh_events_without_subscriber() {
		token_refresh_failed(&Error::TokenUnavailable);
	}
}
