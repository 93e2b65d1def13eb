// self
use crate::{
	_prelude::*,
	config::{
		ClientConfig, DEFAULT_BASE_URL, DEFAULT_POOL_IDLE_TIMEOUT, DEFAULT_POOL_MAX_IDLE_PER_HOST,
		DEFAULT_REFRESH_INTERVAL, DEFAULT_TIMEOUT, DEFAULT_TOKEN_PATH,
	},
};

/// Errors raised while constructing or validating configurations.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ClientConfigError {
	/// The default or supplied base URL failed to parse.
	#[error("Base URL is invalid: {reason}.")]
	InvalidBaseUrl {
		/// Parser message.
		reason: String,
	},
	/// Only HTTP(S) hosts are supported.
	#[error("The base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// Base URL that failed validation.
		url: String,
	},
	/// Base URLs must not carry query strings or fragments.
	#[error("The base URL must not carry a query or fragment: {url}.")]
	UnexpectedQuery {
		/// Base URL that failed validation.
		url: String,
	},
	/// Token path must be absolute.
	#[error("The token path must start with `/`: {path}.")]
	RelativeTokenPath {
		/// Token path that failed validation.
		path: String,
	},
	/// Zero timeouts would fail every request.
	#[error("The request timeout must be greater than zero.")]
	ZeroTimeout,
	/// Zero intervals would spin the refresher.
	#[error("The refresh interval must be greater than zero.")]
	ZeroRefreshInterval,
}

/// Builder for [`ClientConfig`] values; also the serde representation of a configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigBuilder {
	/// Optional base URL (defaults to [`DEFAULT_BASE_URL`]).
	pub base_url: Option<Url>,
	/// Token endpoint path.
	pub token_path: String,
	/// Per-request timeout.
	pub timeout: StdDuration,
	/// Interval between background token refreshes.
	pub refresh_interval: StdDuration,
	/// Idle connections kept per host.
	pub pool_max_idle_per_host: usize,
	/// Idle connection lifetime.
	pub pool_idle_timeout: StdDuration,
}
impl ClientConfigBuilder {
	/// Sets the base URL.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Sets the token endpoint path.
	pub fn token_path(mut self, path: impl Into<String>) -> Self {
		self.token_path = path.into();

		self
	}

	/// Sets the per-request timeout.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Sets the background refresh interval.
	pub fn refresh_interval(mut self, interval: StdDuration) -> Self {
		self.refresh_interval = interval;

		self
	}

	/// Sets the idle pool size per host.
	pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
		self.pool_max_idle_per_host = max;

		self
	}

	/// Sets the idle connection lifetime.
	pub fn pool_idle_timeout(mut self, timeout: StdDuration) -> Self {
		self.pool_idle_timeout = timeout;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ClientConfigError> {
		let base_url = match self.base_url {
			Some(url) => url,
			None => Url::parse(DEFAULT_BASE_URL)
				.map_err(|e| ClientConfigError::InvalidBaseUrl { reason: e.to_string() })?,
		};
		let config = ClientConfig {
			base_url,
			token_path: self.token_path,
			timeout: self.timeout,
			refresh_interval: self.refresh_interval,
			pool_max_idle_per_host: self.pool_max_idle_per_host,
			pool_idle_timeout: self.pool_idle_timeout,
		};

		config.validate()?;

		Ok(config)
	}
}
impl Default for ClientConfigBuilder {
	fn default() -> Self {
		Self {
			base_url: None,
			token_path: DEFAULT_TOKEN_PATH.into(),
			timeout: DEFAULT_TIMEOUT,
			refresh_interval: DEFAULT_REFRESH_INTERVAL,
			pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
			pool_idle_timeout: DEFAULT_POOL_IDLE_TIMEOUT,
		}
	}
}

impl ClientConfig {
	/// Validates invariants for the configuration.
	fn validate(&self) -> Result<(), ClientConfigError> {
		validate_base_url(&self.base_url)?;

		if !self.token_path.starts_with('/') {
			return Err(ClientConfigError::RelativeTokenPath { path: self.token_path.clone() });
		}
		if self.timeout.is_zero() {
			return Err(ClientConfigError::ZeroTimeout);
		}
		if self.refresh_interval.is_zero() {
			return Err(ClientConfigError::ZeroRefreshInterval);
		}

		Ok(())
	}
}

fn validate_base_url(url: &Url) -> Result<(), ClientConfigError> {
	if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
		return Err(ClientConfigError::UnsupportedScheme { url: url.to_string() });
	}
	if url.query().is_some() || url.fragment().is_some() {
		return Err(ClientConfigError::UnexpectedQuery { url: url.to_string() });
	}

	Ok(())
}
