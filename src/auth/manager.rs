//! Tenant token manager with single-flight refresh and a periodic background refresher.
//!
//! The manager owns the only copy of the current [`TenantToken`]. Readers take a short
//! `RwLock` read; rotations swap the whole record under the write lock, so a reader sees
//! either the old or the new token, never a mix. Refreshes are serialized through an async
//! mutex: a caller that queued behind an in-flight refresh reuses its result.

// crates.io
use tokio::{
	task::JoinHandle,
	time::{self, Instant, MissedTickBehavior},
};
// self
use crate::{
	_prelude::*,
	auth::{AppCredentials, TenantToken, TokenReply, TokenRequest, TokenSecret},
	config::ClientConfig,
	http::{ApiPath, ApiRequest, HttpTransport, JSON_UTF8_CONTENT_TYPE, Method, encode_json_body},
	obs::{self, CallOutcome, CallSpan, Operation},
};

#[derive(Debug, Default)]
struct TokenState {
	token: Option<TenantToken>,
	generation: u64,
}

/// Fetches, holds, and rotates the tenant access token.
pub struct TenantTokenManager<T>
where
	T: ?Sized + HttpTransport,
{
	transport: Arc<T>,
	credentials: AppCredentials,
	token_url: Url,
	state: RwLock<TokenState>,
	refresh_guard: AsyncMutex<()>,
}
impl<T> TenantTokenManager<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a manager that has not fetched a token yet.
	pub fn new(
		transport: impl Into<Arc<T>>,
		credentials: AppCredentials,
		config: &ClientConfig,
	) -> Result<Self> {
		let token_url = ApiPath::new(&config.token_path).resolve(&config.base_url)?;

		Ok(Self {
			transport: transport.into(),
			credentials,
			token_url,
			state: Default::default(),
			refresh_guard: AsyncMutex::new(()),
		})
	}

	/// Returns the token currently held, if any.
	pub fn current(&self) -> Option<TenantToken> {
		self.state.read().token.clone()
	}

	/// Returns a usable bearer secret, refreshing first when none is held or it has expired.
	pub async fn access_token(&self) -> Result<TokenSecret> {
		let now = OffsetDateTime::now_utc();
		let held = self.current().filter(|token| !token.is_expired_at(now));

		match held {
			Some(token) => Ok(token.access_token),
			None => Ok(self.refresh().await?.access_token),
		}
	}

	/// Fetches a new token and replaces the held one.
	///
	/// Concurrent callers share one request: whoever waited behind an in-flight refresh gets
	/// that refresh's token. On failure the previously held token is left untouched.
	pub async fn refresh(&self) -> Result<TenantToken> {
		let observed = self.state.read().generation;
		let _singleflight = self.refresh_guard.lock().await;

		{
			let state = self.state.read();

			if state.generation != observed {
				if let Some(token) = state.token.clone() {
					return Ok(token);
				}
			}
		}

		let span = CallSpan::new(Operation::TokenRefresh, Method::Post);

		obs::record_call_outcome(Operation::TokenRefresh, CallOutcome::Attempt);

		let result = span.instrument(self.fetch()).await;

		match &result {
			Ok(token) => {
				let mut state = self.state.write();

				state.token = Some(token.clone());
				state.generation += 1;

				obs::record_call_outcome(Operation::TokenRefresh, CallOutcome::Success);
				obs::token_refreshed(token);
			},
			Err(_) => obs::record_call_outcome(Operation::TokenRefresh, CallOutcome::Failure),
		}

		result
	}

	async fn fetch(&self) -> Result<TenantToken> {
		let body = encode_json_body(&TokenRequest {
			app_id: self.credentials.app_id(),
			app_secret: self.credentials.app_secret().expose(),
		})?;
		let request = ApiRequest::new(Method::Post, self.token_url.clone(), None)
			.with_content_type(JSON_UTF8_CONTENT_TYPE)
			.with_body(body);
		let response = self.transport.execute(request).await?;

		if !response.is_ok() {
			return Err(Error::http(response.status, &response.body));
		}

		let reply: TokenReply =
			serde_path_to_error::deserialize(&mut serde_json::Deserializer::from_slice(
				&response.body,
			))
			.map_err(|source| Error::Decode { operation: Operation::TokenRefresh.as_str(), source })?;

		reply.into_token(OffsetDateTime::now_utc())
	}
}
impl<T> TenantTokenManager<T>
where
	T: ?Sized + HttpTransport,
{
	/// Starts a Tokio task that refreshes the token every `interval`.
	///
	/// The first tick fires one `interval` from now, since callers fetch the initial token
	/// themselves. The task holds only a weak reference and exits once the manager is dropped.
	/// Must be called from within a Tokio runtime.
	pub fn spawn_refresher(self: &Arc<Self>, interval: StdDuration) -> RefreshTask {
		let manager = Arc::downgrade(self);
		let handle = tokio::spawn(async move {
			let mut ticker = time::interval_at(Instant::now() + interval, interval);

			ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

			loop {
				ticker.tick().await;

				let Some(manager) = Weak::upgrade(&manager) else {
					break;
				};

				if let Err(e) = manager.refresh().await {
					obs::token_refresh_failed(&e);
				}
			}
		});

		RefreshTask { handle }
	}
}
impl<T> Debug for TenantTokenManager<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let state = self.state.read();

		f.debug_struct("TenantTokenManager")
			.field("app_id", &self.credentials.app_id())
			.field("token_url", &self.token_url.as_str())
			.field("token_held", &state.token.is_some())
			.field("generation", &state.generation)
			.finish()
	}
}

/// Handle to the background refresher; dropping it stops the task.
#[derive(Debug)]
pub struct RefreshTask {
	handle: JoinHandle<()>,
}
impl RefreshTask {
	/// Stops the refresher.
	pub fn stop(self) {
		drop(self);
	}

	/// Returns `true` once the task has exited.
	pub fn is_finished(&self) -> bool {
		self.handle.is_finished()
	}
}
impl Drop for RefreshTask {
	fn drop(&mut self) {
		self.handle.abort();
	}
}
