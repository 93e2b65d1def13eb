//! Client configuration: API host, token endpoint, transport tuning, and refresh cadence.
//!
//! [`ClientConfig`] values are always validated. Build them through
//! [`ClientConfig::builder`], or deserialize them; deserialization goes through
//! [`ClientConfigBuilder`] so file-based configuration gets the same checks.

/// Builder API for assembling client configurations.
pub mod builder;

pub use builder::*;

// self
use crate::_prelude::*;

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://open.feishu.cn";
/// Internal-app tenant token endpoint.
pub const DEFAULT_TOKEN_PATH: &str = "/open-apis/auth/v3/tenant_access_token/internal";
/// Per-request timeout applied by the transport.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(5);
/// Interval between background token refreshes.
pub const DEFAULT_REFRESH_INTERVAL: StdDuration = StdDuration::from_secs(5 * 60);
/// Idle connections kept per host by the pooled transport.
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 100;
/// How long an idle pooled connection is kept.
pub const DEFAULT_POOL_IDLE_TIMEOUT: StdDuration = StdDuration::from_secs(60);

/// Immutable, validated client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ClientConfigBuilder", into = "ClientConfigBuilder")]
pub struct ClientConfig {
	/// Scheme + host every API path is resolved against.
	pub base_url: Url,
	/// Path of the tenant access token endpoint.
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
impl ClientConfig {
	/// Creates a builder seeded with production defaults.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}
}
impl TryFrom<ClientConfigBuilder> for ClientConfig {
	type Error = ClientConfigError;

	fn try_from(builder: ClientConfigBuilder) -> Result<Self, Self::Error> {
		builder.build()
	}
}
impl From<ClientConfig> for ClientConfigBuilder {
	fn from(config: ClientConfig) -> Self {
		Self {
			base_url: Some(config.base_url),
			token_path: config.token_path,
			timeout: config.timeout,
			refresh_interval: config.refresh_interval,
			pool_max_idle_per_host: config.pool_max_idle_per_host,
			pool_idle_timeout: config.pool_idle_timeout,
		}
	}
}
