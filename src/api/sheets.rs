//! Spreadsheet endpoints: documents, worksheets, rows/columns, and cells.

pub mod cell;
pub mod dimension;
pub mod sheet;
pub mod spreadsheet;

pub use cell::*;
pub use dimension::*;
pub use sheet::*;
pub use spreadsheet::*;

// self
use crate::{_prelude::*, api::require_non_empty, error::ConfigError, http::ApiPath};

const SHEETS_V2: &str = "/open-apis/sheets/v2/spreadsheets";
const SHEETS_V3: &str = "/open-apis/sheets/v3/spreadsheets";

/// `/open-apis/sheets/v2/spreadsheets/{token}/{tail}`
pub(crate) fn v2_path(spreadsheet_token: &str, tail: &str) -> Result<ApiPath, ConfigError> {
	require_non_empty("spreadsheet_token", spreadsheet_token)?;

	Ok(ApiPath::new(SHEETS_V2).segment(spreadsheet_token).segment(tail))
}

/// `/open-apis/sheets/v3/spreadsheets/{token}`
pub(crate) fn v3_path(spreadsheet_token: &str) -> Result<ApiPath, ConfigError> {
	require_non_empty("spreadsheet_token", spreadsheet_token)?;

	Ok(ApiPath::new(SHEETS_V3).segment(spreadsheet_token))
}
