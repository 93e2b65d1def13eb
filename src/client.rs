//! The Lark API client: token-aware request helpers and the checked call pipeline.
//!
//! Raw helpers ([`LarkClient::get`], [`LarkClient::post`], [`LarkClient::put`],
//! [`LarkClient::delete`]) attach the bearer token and return status + bytes without judging
//! them. [`LarkClient::call`] adds the checks every endpoint wrapper relies on: HTTP `200`,
//! envelope decoding, and `code == 0`.

// crates.io
use serde::de::IgnoredAny;
// self
use crate::{
	_prelude::*,
	auth::{AppCredentials, RefreshTask, TenantTokenManager},
	config::ClientConfig,
	envelope::Envelope,
	http::{ApiPath, ApiRequest, HttpTransport, Method, RawResponse, encode_json_body},
	obs::{self, CallOutcome, CallSpan, Operation},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestLarkClient = LarkClient<ReqwestHttpClient>;

/// Authenticated client shared by every endpoint wrapper.
///
/// Cloning is cheap and clones share the transport, token, and background refresher. The
/// refresher stops when the last clone is dropped.
pub struct LarkClient<T>
where
	T: ?Sized + HttpTransport,
{
	transport: Arc<T>,
	config: Arc<ClientConfig>,
	tokens: Arc<TenantTokenManager<T>>,
	refresher: Option<Arc<RefreshTask>>,
}
impl<T> LarkClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Fetches the initial token over `transport` and starts the background refresher.
	///
	/// Must be awaited inside a Tokio runtime.
	pub async fn with_transport(
		credentials: AppCredentials,
		config: ClientConfig,
		transport: impl Into<Arc<T>>,
	) -> Result<Self> {
		let mut client = Self::without_refresher(credentials, config, transport).await?;
		let task = client.tokens.spawn_refresher(client.config.refresh_interval);

		client.refresher = Some(Arc::new(task));

		Ok(client)
	}

	/// Fetches the initial token but leaves rotation to the caller
	/// (see [`TenantTokenManager::refresh`]).
	pub async fn without_refresher(
		credentials: AppCredentials,
		config: ClientConfig,
		transport: impl Into<Arc<T>>,
	) -> Result<Self> {
		let transport = transport.into();
		let tokens = Arc::new(TenantTokenManager::new(transport.clone(), credentials, &config)?);

		tokens.refresh().await?;

		Ok(Self { transport, config: Arc::new(config), tokens, refresher: None })
	}

	/// Returns the configuration the client was built with.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Returns the token manager.
	pub fn tokens(&self) -> &Arc<TenantTokenManager<T>> {
		&self.tokens
	}

	/// Returns `true` while a background refresher is attached.
	pub fn has_refresher(&self) -> bool {
		self.refresher.as_ref().is_some_and(|task| !task.is_finished())
	}

	/// Issues an authenticated `GET`; query pairs travel on `path`.
	pub async fn get(&self, path: &ApiPath) -> Result<RawResponse> {
		self.send(Method::Get, path, None).await
	}

	/// Issues an authenticated `POST` with a JSON body.
	pub async fn post<B>(&self, path: &ApiPath, body: &B) -> Result<RawResponse>
	where
		B: ?Sized + Serialize,
	{
		self.send(Method::Post, path, Some(encode_json_body(body)?)).await
	}

	/// Issues an authenticated `PUT` with a JSON body.
	pub async fn put<B>(&self, path: &ApiPath, body: &B) -> Result<RawResponse>
	where
		B: ?Sized + Serialize,
	{
		self.send(Method::Put, path, Some(encode_json_body(body)?)).await
	}

	/// Issues an authenticated `DELETE` with a JSON body.
	pub async fn delete<B>(&self, path: &ApiPath, body: &B) -> Result<RawResponse>
	where
		B: ?Sized + Serialize,
	{
		self.send(Method::Delete, path, Some(encode_json_body(body)?)).await
	}

	/// Resolves `path`, attaches the bearer token, and hands the request to the transport.
	///
	/// Only transport failures are errors here; any HTTP status is returned as-is.
	pub async fn send(
		&self,
		method: Method,
		path: &ApiPath,
		body: Option<Vec<u8>>,
	) -> Result<RawResponse> {
		let url = path.resolve(&self.config.base_url)?;
		let bearer = self.tokens.access_token().await?;
		let mut request = ApiRequest::new(method, url, Some(bearer));

		if let Some(body) = body {
			request = request.with_body(body);
		}

		Ok(self.transport.execute(request).await?)
	}

	/// Runs the checked pipeline and returns the optional `data` payload.
	///
	/// `body` is serialized for every verb except `GET`, which never carries one.
	pub async fn call<B, D>(
		&self,
		operation: Operation,
		method: Method,
		path: &ApiPath,
		body: &B,
	) -> Result<Option<D>>
	where
		B: ?Sized + Serialize,
		D: DeserializeOwned,
	{
		let span = CallSpan::new(operation, method);

		obs::record_call_outcome(operation, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let body = match method {
					Method::Get => None,
					_ => Some(encode_json_body(body)?),
				};
				let response = self.send(method, path, body).await?;

				if !response.is_ok() {
					return Err(Error::http(response.status, &response.body));
				}

				Envelope::<D>::decode(operation, &response.body)?.into_data()
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(operation, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(operation, CallOutcome::Failure),
		}

		result
	}

	/// Like [`LarkClient::call`], but a missing `data` payload is an error.
	pub async fn call_required<B, D>(
		&self,
		operation: Operation,
		method: Method,
		path: &ApiPath,
		body: &B,
	) -> Result<D>
	where
		B: ?Sized + Serialize,
		D: DeserializeOwned,
	{
		self.call(operation, method, path, body)
			.await?
			.ok_or(Error::MissingData { operation: operation.as_str() })
	}

	/// Like [`LarkClient::call`] for endpoints whose payload is not needed.
	pub async fn call_unit<B>(
		&self,
		operation: Operation,
		method: Method,
		path: &ApiPath,
		body: &B,
	) -> Result<()>
	where
		B: ?Sized + Serialize,
	{
		self.call::<B, IgnoredAny>(operation, method, path, body).await.map(|_| ())
	}
}
#[cfg(feature = "reqwest")]
impl LarkClient<ReqwestHttpClient> {
	/// Builds the pooled reqwest transport from `config`, fetches the initial token, and
	/// starts the background refresher.
	pub async fn connect(credentials: AppCredentials, config: ClientConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::from_config(&config)?;

		Self::with_transport(credentials, config, http_client).await
	}
}
impl<T> Clone for LarkClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			config: self.config.clone(),
			tokens: self.tokens.clone(),
			refresher: self.refresher.clone(),
		}
	}
}
impl<T> Debug for LarkClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LarkClient")
			.field("base_url", &self.config.base_url.as_str())
			.field("tokens", &self.tokens)
			.field("refresher", &self.refresher.is_some())
			.finish()
	}
}
