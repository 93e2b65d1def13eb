//! Transport primitives for Lark API calls.
//!
//! The module exposes [`HttpTransport`] alongside [`ApiRequest`] and [`RawResponse`] so
//! downstream crates can integrate custom HTTP clients (or fakes in tests). The transport
//! only moves bytes: status classification and envelope decoding happen in
//! [`LarkClient`](crate::client::LarkClient).

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::{ConfigError, TransportError},
};
#[cfg(feature = "reqwest")] use crate::config::ClientConfig;

/// `Content-Type` used for authenticated API calls.
pub const JSON_CONTENT_TYPE: &str = "application/json";
/// `Content-Type` used for the token endpoint.
pub const JSON_UTF8_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing Lark API requests.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared by the
/// client, the token manager, and the background refresher.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and returns the status + raw body, or a transport failure.
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_>;
}

/// HTTP verbs used by the Lark API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `DELETE`
	Delete,
}
impl Method {
	/// Returns the canonical verb.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// API path assembled from fixed segments and resource identifiers.
///
/// Segments are percent-encoded individually when resolved, so identifiers such as
/// spreadsheet tokens can never inject extra path components.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiPath {
	segments: Vec<String>,
	query: Vec<(String, String)>,
}
impl ApiPath {
	/// Parses a `/`-separated template such as `/open-apis/sheets/v3/spreadsheets`.
	pub fn new(template: &str) -> Self {
		Self {
			segments: template.split('/').filter(|s| !s.is_empty()).map(str::to_owned).collect(),
			query: Vec::new(),
		}
	}

	/// Appends a single path segment.
	pub fn segment(mut self, segment: impl Into<String>) -> Self {
		self.segments.push(segment.into());

		self
	}

	/// Appends a query pair.
	pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));

		self
	}

	/// Appends a query pair when `value` is present and non-empty.
	pub fn query_opt(self, key: impl Into<String>, value: Option<&str>) -> Self {
		match value {
			Some(value) if !value.is_empty() => self.query(key, value),
			_ => self,
		}
	}

	/// Resolves the path against `base`, replacing whatever path the base carried.
	pub fn resolve(&self, base: &Url) -> Result<Url, ConfigError> {
		let mut url = base.clone();

		url.set_query(None);
		url.set_fragment(None);

		{
			let mut path = url
				.path_segments_mut()
				.map_err(|_| ConfigError::UnusableBaseUrl { url: base.to_string() })?;

			path.clear().extend(&self.segments);
		}

		if !self.query.is_empty() {
			url.query_pairs_mut().extend_pairs(&self.query);
		}

		Ok(url)
	}
}
impl From<&str> for ApiPath {
	fn from(template: &str) -> Self {
		Self::new(template)
	}
}
impl Display for ApiPath {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		for segment in &self.segments {
			write!(f, "/{segment}")?;
		}

		Ok(())
	}
}

/// Fully resolved request handed to an [`HttpTransport`].
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP verb.
	pub method: Method,
	/// Absolute URL including query string.
	pub url: Url,
	/// Bearer token attached as `Authorization: Bearer <token>`.
	pub bearer: Option<TokenSecret>,
	/// `Content-Type` header value.
	pub content_type: &'static str,
	/// Serialized JSON body, if any.
	pub body: Option<Vec<u8>>,
}
impl ApiRequest {
	/// Creates an authenticated JSON request.
	pub fn new(method: Method, url: Url, bearer: Option<TokenSecret>) -> Self {
		Self { method, url, bearer, content_type: JSON_CONTENT_TYPE, body: None }
	}

	/// Attaches a serialized body.
	pub fn with_body(mut self, body: Vec<u8>) -> Self {
		self.body = Some(body);

		self
	}

	/// Overrides the `Content-Type` header.
	pub fn with_content_type(mut self, content_type: &'static str) -> Self {
		self.content_type = content_type;

		self
	}
}

/// Status and raw body returned by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Returns `true` for `200 OK`, the only status the Lark API uses for success.
	pub fn is_ok(&self) -> bool {
		self.status == 200
	}
}

/// Serializes a request payload; `null` payloads become an empty JSON object.
pub fn encode_json_body<B>(body: &B) -> Result<Vec<u8>, ConfigError>
where
	B: ?Sized + Serialize,
{
	let value = serde_json::to_value(body).map_err(ConfigError::Serialize)?;

	if value.is_null() {
		return Ok(b"{}".to_vec());
	}

	serde_json::to_vec(&value).map_err(ConfigError::Serialize)
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a pooled client with the configured timeout and idle-pool limits.
	pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.timeout(config.timeout)
			.pool_max_idle_per_host(config.pool_max_idle_per_host)
			.pool_idle_timeout(config.pool_idle_timeout)
			.build()?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_> {
		use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

		Box::pin(async move {
			let method = match request.method {
				Method::Get => reqwest::Method::GET,
				Method::Post => reqwest::Method::POST,
				Method::Put => reqwest::Method::PUT,
				Method::Delete => reqwest::Method::DELETE,
			};
			let mut builder = self
				.0
				.request(method, request.url)
				.header(CONTENT_TYPE, request.content_type);

			if let Some(token) = &request.bearer {
				builder = builder.header(AUTHORIZATION, token.bearer());
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(RawResponse { status, body })
		})
	}
}
