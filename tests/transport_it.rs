// std
use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};
// crates.io
use parking_lot::Mutex;
use serde_json::json;
// self
use lark_util::{
	auth::AppCredentials,
	client::LarkClient,
	config::{ClientConfig, DEFAULT_TOKEN_PATH},
	error::{ConfigError, Error, TransportError},
	http::{
		ApiPath, ApiRequest, HttpTransport, JSON_CONTENT_TYPE, JSON_UTF8_CONTENT_TYPE, Method,
		RawResponse, TransportFuture,
	},
};

/// Transport that answers from memory and records every request it sees.
#[derive(Default)]
struct RecordingTransport {
	requests: Mutex<Vec<ApiRequest>>,
	issued: AtomicUsize,
	fail_api_calls: bool,
}
impl RecordingTransport {
	fn failing() -> Self {
		Self { fail_api_calls: true, ..Default::default() }
	}

	fn requests(&self) -> Vec<ApiRequest> {
		self.requests.lock().clone()
	}

	fn last(&self) -> ApiRequest {
		self.requests.lock().last().cloned().expect("At least one request should be recorded.")
	}
}
impl HttpTransport for RecordingTransport {
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			let is_token = request.url.path() == DEFAULT_TOKEN_PATH;

			self.requests.lock().push(request);

			if is_token {
				let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
				let body = json!({
					"code": 0,
					"msg": "ok",
					"tenant_access_token": format!("fake-{n}")
				});

				return Ok(RawResponse { status: 200, body: body.to_string().into_bytes() });
			}
			if self.fail_api_calls {
				return Err(TransportError::Timeout);
			}

			Ok(RawResponse {
				status: 200,
				body: br#"{"code":0,"msg":"success","data":{}}"#.to_vec(),
			})
		})
	}
}

async fn connect(transport: Arc<RecordingTransport>) -> LarkClient<RecordingTransport> {
	let credentials =
		AppCredentials::new("cli_fake", "fake-secret").expect("Fake credentials should be valid.");
	let config = ClientConfig::builder().build().expect("Default configuration should be valid.");

	LarkClient::without_refresher(credentials, config, transport)
		.await
		.expect("Client should connect over the recording transport.")
}

#[tokio::test]
async fn token_request_is_unauthenticated_and_api_calls_carry_bearer() {
	let transport = Arc::new(RecordingTransport::default());
	let client = connect(transport.clone()).await;
	let response = client
		.post(&ApiPath::new("/open-apis/custom/v1/echo"), &json!({ "ping": 1 }))
		.await
		.expect("Raw POST should succeed.");

	assert!(response.is_ok());

	let requests = transport.requests();
	let token_request = &requests[0];
	let api_request = &requests[1];

	assert_eq!(token_request.method, Method::Post);
	assert_eq!(token_request.url.as_str(), format!("https://open.feishu.cn{DEFAULT_TOKEN_PATH}"));
	assert_eq!(token_request.content_type, JSON_UTF8_CONTENT_TYPE);
	assert!(token_request.bearer.is_none());
	assert_eq!(
		serde_json::from_slice::<serde_json::Value>(
			token_request.body.as_deref().expect("Token request should carry a body.")
		)
		.expect("Token request body should be JSON."),
		json!({ "app_id": "cli_fake", "app_secret": "fake-secret" })
	);

	assert_eq!(api_request.content_type, JSON_CONTENT_TYPE);
	assert_eq!(
		api_request.bearer.as_ref().map(|secret| secret.expose().to_owned()),
		Some("fake-1".to_owned())
	);
	assert_eq!(api_request.body.as_deref(), Some(br#"{"ping":1}"#.as_slice()));
}

#[tokio::test]
async fn get_sends_no_body_and_null_payloads_become_empty_objects() {
	let transport = Arc::new(RecordingTransport::default());
	let client = connect(transport.clone()).await;

	client.get(&ApiPath::new("/open-apis/custom/v1/items")).await.expect("GET should succeed.");

	assert_eq!(transport.last().method, Method::Get);
	assert!(transport.last().body.is_none());

	client
		.delete(&ApiPath::new("/open-apis/custom/v1/items"), &())
		.await
		.expect("DELETE should succeed.");

	assert_eq!(transport.last().method, Method::Delete);
	assert_eq!(transport.last().body.as_deref(), Some(b"{}".as_slice()));
}

#[tokio::test]
async fn identifiers_are_percent_encoded_into_single_segments() {
	let transport = Arc::new(RecordingTransport::default());
	let client = connect(transport.clone()).await;

	client
		.get_spreadsheet_meta("sht/x?y", None, None)
		.await
		.expect("Metainfo with defaults should decode.");

	assert_eq!(
		transport.last().url.path(),
		"/open-apis/sheets/v2/spreadsheets/sht%2Fx%3Fy/metainfo"
	);
	assert!(transport.last().url.query().is_none());
}

#[tokio::test]
async fn blank_identifiers_never_reach_the_transport() {
	let transport = Arc::new(RecordingTransport::default());
	let client = connect(transport.clone()).await;
	let err = client
		.merge_cells("", "0b12", "A1:B2", Default::default())
		.await
		.expect_err("Blank spreadsheet token should be rejected.");

	assert!(matches!(
		err,
		Error::Config(ConfigError::EmptyParameter { name: "spreadsheet_token" })
	));
	// Only the token request went out.
	assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn transport_failures_propagate() {
	let transport = Arc::new(RecordingTransport::failing());
	let client = connect(transport).await;
	let err = client
		.unmerge_cells("shtcnmBA", "0b12", "A1:B2")
		.await
		.expect_err("Transport failure should surface.");

	assert!(matches!(err, Error::Transport(TransportError::Timeout)));
}

#[tokio::test]
async fn clones_share_the_rotated_token() {
	let transport = Arc::new(RecordingTransport::default());
	let client = connect(transport.clone()).await;
	let clone = client.clone();

	clone.tokens().refresh().await.expect("Refresh through the clone should succeed.");
	client.get(&ApiPath::new("/open-apis/custom/v1/items")).await.expect("GET should succeed.");

	assert_eq!(
		transport.last().bearer.as_ref().map(|secret| secret.expose().to_owned()),
		Some("fake-2".to_owned())
	);
}
