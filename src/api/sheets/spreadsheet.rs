//! Spreadsheet documents: creation, metadata, and properties.

// self
use crate::{
	_prelude::*,
	api::{
		UserIdType,
		sheets::{MajorDimension, SHEETS_V3, v2_path},
	},
	client::LarkClient,
	http::{ApiPath, HttpTransport, Method},
	obs::Operation,
};

/// Spreadsheet-level metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpreadsheetMeta {
	/// Document properties.
	pub properties: SpreadsheetProperties,
	/// Worksheets in display order.
	pub sheets: Vec<SheetMeta>,
	/// Token of the spreadsheet itself.
	pub spreadsheet_token: String,
}

/// Document properties.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpreadsheetProperties {
	/// Document title.
	pub title: String,
	/// Owner id; only returned when `user_id_type` was requested.
	#[serde(alias = "ownerUser")]
	pub owner_user_id: Option<i64>,
	/// Number of worksheets.
	pub sheet_count: u32,
	/// Document revision.
	pub revision: i64,
}

/// Worksheet metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SheetMeta {
	/// Worksheet id.
	pub sheet_id: String,
	/// Worksheet title.
	pub title: String,
	/// Position among worksheets.
	pub index: u32,
	/// Row count.
	pub row_count: u32,
	/// Column count.
	pub column_count: u32,
	/// Frozen columns.
	pub frozen_col_count: u32,
	/// Frozen rows.
	pub frozen_row_count: u32,
	/// Merged ranges.
	pub merges: Vec<MergeRange>,
	/// Protected ranges (requested with `extFields=protectedRange`).
	pub protected_range: Vec<ProtectedRange>,
	/// Present when the worksheet is an embedded block rather than a grid.
	pub block_info: Option<BlockInfo>,
}

/// A merged cell range; indexes start at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MergeRange {
	/// First row.
	pub start_row_index: u32,
	/// First column.
	pub start_column_index: u32,
	/// Rows covered.
	pub row_count: u32,
	/// Columns covered.
	pub column_count: u32,
}

/// A protected range.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProtectedRange {
	/// Protected rows/columns; absent when the whole worksheet is protected.
	pub dimension: Option<ProtectedDimension>,
	/// Protection id.
	pub protect_id: String,
	/// Worksheet id.
	pub sheet_id: String,
	/// Free-form note.
	pub lock_info: String,
}

/// Rows or columns covered by a protection; indexes start at one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProtectedDimension {
	/// Worksheet id.
	pub sheet_id: String,
	/// Whether rows or columns are protected.
	pub major_dimension: MajorDimension,
	/// First protected row/column.
	pub start_index: u32,
	/// Last protected row/column.
	pub end_index: u32,
}

/// Embedded block descriptor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockInfo {
	/// Block token.
	pub block_token: String,
	/// Block type.
	pub block_type: String,
}

/// Writable document properties.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SpreadsheetPropertiesUpdate {
	/// New title, at most 100 characters.
	pub title: String,
}

#[derive(Serialize)]
struct CreateSpreadsheetBody<'a> {
	#[serde(skip_serializing_if = "str::is_empty")]
	folder_token: &'a str,
	title: &'a str,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct CreateSpreadsheetData {
	spreadsheet: CreatedSpreadsheet,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct CreatedSpreadsheet {
	spreadsheet_token: String,
}

#[derive(Serialize)]
struct UpdatePropertiesBody<'a> {
	properties: &'a SpreadsheetPropertiesUpdate,
}

impl<T> LarkClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a spreadsheet and returns its token.
	///
	/// `folder_token` is the last path segment of a drive folder URL
	/// (`https://<tenant>.feishu.cn/drive/folder/<folder_token>`); pass an empty string for the
	/// app's root folder.
	pub async fn create_spreadsheet(&self, folder_token: &str, title: &str) -> Result<String> {
		const OP: Operation = Operation::CreateSpreadsheet;

		let data: CreateSpreadsheetData = self
			.call_required(
				OP,
				Method::Post,
				&ApiPath::new(SHEETS_V3),
				&CreateSpreadsheetBody { folder_token, title },
			)
			.await?;
		let token = data.spreadsheet.spreadsheet_token;

		if token.is_empty() {
			return Err(Error::MissingData { operation: OP.as_str() });
		}

		Ok(token)
	}

	/// Reads spreadsheet metadata.
	///
	/// `ext_fields` (e.g. `protectedRange`) and `user_id_type` are forwarded as query
	/// parameters when present.
	pub async fn get_spreadsheet_meta(
		&self,
		spreadsheet_token: &str,
		ext_fields: Option<&str>,
		user_id_type: Option<UserIdType>,
	) -> Result<SpreadsheetMeta> {
		let path = v2_path(spreadsheet_token, "metainfo")?
			.query_opt("extFields", ext_fields)
			.query_opt("user_id_type", user_id_type.map(UserIdType::as_str));

		self.call_required(Operation::GetSpreadsheetMeta, Method::Get, &path, &()).await
	}

	/// Updates spreadsheet properties (currently only the title).
	pub async fn update_spreadsheet_properties(
		&self,
		spreadsheet_token: &str,
		properties: &SpreadsheetPropertiesUpdate,
	) -> Result<()> {
		let path = v2_path(spreadsheet_token, "properties")?;

		self.call_unit(
			Operation::UpdateSpreadsheetProperties,
			Method::Put,
			&path,
			&UpdatePropertiesBody { properties },
		)
		.await
	}
}
