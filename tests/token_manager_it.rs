// crates.io
use httpmock::{Mock, prelude::*};
use serde_json::json;
// self
use lark_util::{
	_preludet::*,
	auth::TenantTokenManager,
	client::{LarkClient, ReqwestLarkClient},
	config::DEFAULT_TOKEN_PATH,
	http::{ApiPath, ReqwestHttpClient},
};

async fn mock_token<'a>(server: &'a MockServer, token: &str) -> Mock<'a> {
	server
		.mock_async(|when, then| {
			when.method(POST).path(DEFAULT_TOKEN_PATH);
			then.status(200).header("content-type", "application/json").json_body(json!({
				"code": 0,
				"msg": "ok",
				"tenant_access_token": token,
				"expire": 7200
			}));
		})
		.await
}

fn held_token(client: &ReqwestLarkClient) -> String {
	client
		.tokens()
		.current()
		.expect("Client should hold a token after connecting.")
		.access_token
		.expose()
		.to_owned()
}

#[tokio::test]
async fn connect_posts_app_credentials() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(DEFAULT_TOKEN_PATH)
				.header("content-type", "application/json; charset=utf-8")
				.json_body(json!({ "app_id": TEST_APP_ID, "app_secret": TEST_APP_SECRET }));
			then.status(200).header("content-type", "application/json").body(
				"{\"code\":0,\"msg\":\"ok\",\"tenant_access_token\":\"t-initial\",\"expire\":7200}",
			);
		})
		.await;
	let client = connect_test_client(&server.base_url())
		.await
		.expect("Client should connect against the mock token endpoint.");
	let token = client.tokens().current().expect("Initial token should be held.");

	assert_eq!(token.access_token.expose(), "t-initial");
	assert_eq!(token.expires_at - token.issued_at, Duration::seconds(7200));
	assert!(!client.has_refresher());

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn token_endpoint_http_error_fails_connect() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path(DEFAULT_TOKEN_PATH);
			then.status(503).body("upstream busy");
		})
		.await;
	let err = connect_test_client(&server.base_url())
		.await
		.expect_err("A 503 from the token endpoint should fail the connect.");

	assert_eq!(err.http_status(), Some(503));
	assert!(matches!(err, Error::Http { ref body, .. } if body == "upstream busy"));
}

#[tokio::test]
async fn token_reply_without_token_is_rejected() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path(DEFAULT_TOKEN_PATH);
			then.status(200).body("{\"code\":0,\"msg\":\"ok\",\"tenant_access_token\":\"\"}");
		})
		.await;
	let err = connect_test_client(&server.base_url())
		.await
		.expect_err("An empty token should not be accepted.");

	assert!(matches!(err, Error::TokenUnavailable));
}

#[tokio::test]
async fn failed_refresh_keeps_previous_token() {
	let server = MockServer::start_async().await;
	let mut first = mock_token(&server, "t-1").await;
	let client = connect_test_client(&server.base_url())
		.await
		.expect("Client should connect with the first token.");

	first.delete_async().await;

	let _rejecting = server
		.mock_async(|when, then| {
			when.method(POST).path(DEFAULT_TOKEN_PATH);
			then.status(200).body("{\"code\":10003,\"msg\":\"invalid param\"}");
		})
		.await;
	let err = client.tokens().refresh().await.expect_err("Rejected refresh should fail.");

	assert_eq!(err.service_code(), Some(10003));
	assert_eq!(held_token(&client), "t-1");
}

#[tokio::test]
async fn concurrent_refreshes_share_one_request() {
	let server = MockServer::start_async().await;
	let mock = mock_token(&server, "t-shared").await;
	let client = connect_test_client(&server.base_url())
		.await
		.expect("Client should connect before the concurrent refresh.");
	let tokens = client.tokens();
	let (a, b, c) = tokio::join!(tokens.refresh(), tokens.refresh(), tokens.refresh());

	for token in [a, b, c] {
		assert_eq!(
			token.expect("Every concurrent refresh should succeed.").access_token.expose(),
			"t-shared"
		);
	}

	// One request for the initial token, one for the shared refresh.
	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn access_token_fetches_lazily_and_reuses_the_held_token() {
	let server = MockServer::start_async().await;
	let mock = mock_token(&server, "t-lazy").await;
	let config = test_config(&server.base_url());
	let http_client =
		ReqwestHttpClient::from_config(&config).expect("Reqwest transport should build.");
	let manager: TenantTokenManager<ReqwestHttpClient> =
		TenantTokenManager::new(http_client, test_credentials(), &config)
			.expect("Token manager should build from a valid config.");

	assert!(manager.current().is_none());

	for _ in 0..2 {
		let secret = manager.access_token().await.expect("Access token should be available.");

		assert_eq!(secret.expose(), "t-lazy");
	}

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn expired_token_is_refreshed_before_the_next_call() {
	let server = MockServer::start_async().await;
	let mut short_lived = server
		.mock_async(|when, then| {
			when.method(POST).path(DEFAULT_TOKEN_PATH);
			then.status(200).json_body(json!({
				"code": 0,
				"msg": "ok",
				"tenant_access_token": "t-short",
				"expire": 1
			}));
		})
		.await;
	let client = connect_test_client(&server.base_url())
		.await
		.expect("Client should connect with the short-lived token.");

	short_lived.assert_calls_async(1).await;
	short_lived.delete_async().await;

	let renewed = mock_token(&server, "t-renewed").await;
	let api = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/open-apis/custom/v1/items")
				.header("authorization", "Bearer t-renewed");
			then.status(200).json_body(json!({ "code": 0, "msg": "success", "data": {} }));
		})
		.await;

	tokio::time::sleep(StdDuration::from_millis(1_200)).await;

	let response = client
		.get(&ApiPath::new("/open-apis/custom/v1/items"))
		.await
		.expect("Call after expiry should succeed.");

	assert!(response.is_ok());
	assert_eq!(held_token(&client), "t-renewed");

	renewed.assert_calls_async(1).await;
	api.assert_async().await;
}

#[tokio::test]
async fn background_refresher_rotates_until_dropped() {
	let server = MockServer::start_async().await;
	let mut first = mock_token(&server, "t-1").await;
	let mut config = test_config(&server.base_url());

	config.refresh_interval = StdDuration::from_millis(100);

	let http_client =
		ReqwestHttpClient::from_config(&config).expect("Reqwest transport should build.");
	let client: ReqwestLarkClient =
		LarkClient::with_transport(test_credentials(), config, http_client)
			.await
			.expect("Client should connect and start the refresher.");

	assert!(client.has_refresher());
	assert_eq!(held_token(&client), "t-1");

	first.delete_async().await;

	let mut second = mock_token(&server, "t-2").await;
	let mut rotated = false;

	for _ in 0..50 {
		tokio::time::sleep(StdDuration::from_millis(100)).await;

		if held_token(&client) == "t-2" {
			rotated = true;

			break;
		}
	}

	assert!(rotated, "Background refresher should install the rotated token.");

	let tokens = client.tokens().clone();

	drop(client);
	second.delete_async().await;

	let _third = mock_token(&server, "t-3").await;

	tokio::time::sleep(StdDuration::from_millis(500)).await;

	assert_eq!(
		tokens.current().expect("Token should still be held.").access_token.expose(),
		"t-2",
		"Dropping the last client should stop the refresher."
	);
}
