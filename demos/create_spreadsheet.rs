//! Connects with the default reqwest transport, creates a spreadsheet, and styles its header
//! row, all against a local mock of the Lark open API.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use lark_util::{
	api::{CellStyle, Font, HorizontalAlign, MergeType, StyleUpdate},
	auth::AppCredentials,
	client::LarkClient,
	config::{ClientConfig, DEFAULT_TOKEN_PATH},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(DEFAULT_TOKEN_PATH);
			then.status(200).header("content-type", "application/json").body(
				"{\"code\":0,\"msg\":\"ok\",\"tenant_access_token\":\"t-demo\",\"expire\":7200}",
			);
		})
		.await;
	let create_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/open-apis/sheets/v3/spreadsheets")
				.header("authorization", "Bearer t-demo");
			then.status(200).header("content-type", "application/json").body(
				"{\"code\":0,\"msg\":\"success\",\"data\":{\"spreadsheet\":{\"spreadsheet_token\":\"shtcnDemo\"}}}",
			);
		})
		.await;
	let merge_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/open-apis/sheets/v2/spreadsheets/shtcnDemo/merge_cells");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"code\":0,\"msg\":\"success\",\"data\":{}}");
		})
		.await;
	let style_mock = server
		.mock_async(|when, then| {
			when.method(PUT).path("/open-apis/sheets/v2/spreadsheets/shtcnDemo/styles_batch_update");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"code\":0,\"msg\":\"success\",\"data\":{}}");
		})
		.await;
	let config = ClientConfig::builder().base_url(Url::parse(&server.base_url())?).build()?;
	let client =
		LarkClient::connect(AppCredentials::new("cli_demo_app", "demo-secret")?, config).await?;
	let spreadsheet = client.create_spreadsheet("", "Weekly report").await?;

	println!("Created spreadsheet {spreadsheet}.");

	client.merge_cells(&spreadsheet, "0b12", "A1:D1", MergeType::MergeAll).await?;
	client
		.batch_update_styles(&spreadsheet, &[StyleUpdate {
			ranges: vec!["0b12!A1:D1".into()],
			style: CellStyle {
				font: Some(Font { bold: Some(true), ..Default::default() }),
				h_align: Some(HorizontalAlign::Center),
				..Default::default()
			},
		}])
		.await?;

	println!("Header row merged and styled.");

	token_mock.assert_async().await;
	create_mock.assert_async().await;
	merge_mock.assert_async().await;
	style_mock.assert_async().await;

	Ok(())
}
