//! Feishu/Lark open API client: tenant token rotation, typed `{code, msg, data}` envelopes,
//! and the spreadsheet + contact endpoints used by internal tooling.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod obs;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::AppCredentials,
		client::{LarkClient, ReqwestLarkClient},
		config::ClientConfig,
		http::ReqwestHttpClient,
	};

	/// Application identifier used by test fixtures.
	pub const TEST_APP_ID: &str = "cli_test_app";
	/// Application secret used by test fixtures.
	pub const TEST_APP_SECRET: &str = "test-app-secret";

	/// Builds credentials shared by the integration tests.
	pub fn test_credentials() -> AppCredentials {
		AppCredentials::new(TEST_APP_ID, TEST_APP_SECRET)
			.expect("Test credentials should always be valid.")
	}

	/// Builds a configuration pointing at a local mock server.
	pub fn test_config(base_url: &str) -> ClientConfig {
		ClientConfig::builder()
			.base_url(Url::parse(base_url).expect("Mock server base URL should parse."))
			.timeout(StdDuration::from_secs(2))
			.build()
			.expect("Test configuration should be valid.")
	}

	/// Connects a client to the mock server without spawning the background refresher, so
	/// tests decide when the token endpoint is hit.
	pub async fn connect_test_client(base_url: &str) -> Result<ReqwestLarkClient> {
		let config = test_config(base_url);
		let http_client = ReqwestHttpClient::from_config(&config)?;

		LarkClient::without_refresher(test_credentials(), config, http_client).await
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::{Arc, Weak},
		time::Duration as StdDuration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::Value as JsonValue;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
