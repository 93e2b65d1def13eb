//! Row and column operations.
//!
//! A single request may touch at most 5000 rows or columns; the service enforces the limit.

// self
use crate::{
	_prelude::*,
	api::{
		require_non_empty,
		sheets::{v2_path, v3_path},
	},
	client::LarkClient,
	http::{HttpTransport, Method},
	obs::Operation,
};

/// Whether an operation targets rows or columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MajorDimension {
	/// Rows.
	#[default]
	Rows,
	/// Columns.
	Columns,
}

/// Which neighbor's style inserted rows/columns inherit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InheritStyle {
	/// Inherit from the row/column before the insertion point.
	Before,
	/// Inherit from the row/column after the insertion point.
	After,
}

/// Rows/columns appended to the end of a worksheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionLength {
	/// Worksheet id.
	pub sheet_id: String,
	/// Rows or columns.
	pub major_dimension: MajorDimension,
	/// How many to append (1..=5000).
	pub length: u32,
}

/// Rows/columns in `[start_index, end_index)`.
///
/// For insertion, `start_index = 3, end_index = 7` inserts four rows starting at the fourth.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
	/// Worksheet id.
	pub sheet_id: String,
	/// Rows or columns.
	pub major_dimension: MajorDimension,
	/// First index.
	pub start_index: u32,
	/// End index.
	pub end_index: u32,
}
impl DimensionRange {
	/// Builds a row range.
	pub fn rows(sheet_id: impl Into<String>, start_index: u32, end_index: u32) -> Self {
		Self {
			sheet_id: sheet_id.into(),
			major_dimension: MajorDimension::Rows,
			start_index,
			end_index,
		}
	}

	/// Builds a column range.
	pub fn columns(sheet_id: impl Into<String>, start_index: u32, end_index: u32) -> Self {
		Self {
			sheet_id: sheet_id.into(),
			major_dimension: MajorDimension::Columns,
			start_index,
			end_index,
		}
	}
}

/// Row/column properties; unset fields are left unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionProperties {
	/// `false` hides the rows/columns.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub visible: Option<bool>,
	/// Row height or column width in pixels.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fixed_size: Option<u32>,
}

/// Source block of a move; the v3 endpoint uses snake_case keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MoveDimensionSource {
	/// Rows or columns.
	pub major_dimension: MajorDimension,
	/// First index, zero based.
	pub start_index: u32,
	/// Last index, inclusive.
	pub end_index: u32,
}

/// Reply of [`LarkClient::add_dimension`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddDimensionReply {
	/// Rows/columns appended.
	pub add_count: u32,
	/// Rows or columns.
	pub major_dimension: MajorDimension,
}

/// Reply of [`LarkClient::delete_dimension`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteDimensionReply {
	/// Rows/columns deleted.
	pub del_count: u32,
	/// Rows or columns.
	pub major_dimension: MajorDimension,
}

#[derive(Serialize)]
struct DimensionBody<'a, D> {
	dimension: &'a D,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InsertDimensionBody<'a> {
	dimension: &'a DimensionRange,
	#[serde(skip_serializing_if = "Option::is_none")]
	inherit_style: Option<InheritStyle>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateDimensionBody<'a> {
	dimension: &'a DimensionRange,
	dimension_properties: &'a DimensionProperties,
}

#[derive(Serialize)]
struct MoveDimensionBody<'a> {
	source: &'a MoveDimensionSource,
	destination_index: u32,
}

impl<T> LarkClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Appends rows/columns to the end of a worksheet.
	pub async fn add_dimension(
		&self,
		spreadsheet_token: &str,
		dimension: &DimensionLength,
	) -> Result<AddDimensionReply> {
		let path = v2_path(spreadsheet_token, "dimension_range")?;
		let reply: Option<AddDimensionReply> = self
			.call(Operation::AddDimension, Method::Post, &path, &DimensionBody { dimension })
			.await?;

		Ok(reply.unwrap_or_default())
	}

	/// Inserts empty rows/columns at `dimension`, optionally inheriting a neighbor's style.
	pub async fn insert_dimension(
		&self,
		spreadsheet_token: &str,
		dimension: &DimensionRange,
		inherit_style: Option<InheritStyle>,
	) -> Result<()> {
		let path = v2_path(spreadsheet_token, "insert_dimension_range")?;

		self.call_unit(
			Operation::InsertDimension,
			Method::Post,
			&path,
			&InsertDimensionBody { dimension, inherit_style },
		)
		.await
	}

	/// Updates visibility and size of rows/columns.
	pub async fn update_dimension(
		&self,
		spreadsheet_token: &str,
		dimension: &DimensionRange,
		properties: &DimensionProperties,
	) -> Result<()> {
		let path = v2_path(spreadsheet_token, "dimension_range")?;

		self.call_unit(
			Operation::UpdateDimension,
			Method::Put,
			&path,
			&UpdateDimensionBody { dimension, dimension_properties: properties },
		)
		.await
	}

	/// Moves a block of rows/columns so it starts at `destination_index`.
	pub async fn move_dimension(
		&self,
		spreadsheet_token: &str,
		sheet_id: &str,
		source: &MoveDimensionSource,
		destination_index: u32,
	) -> Result<()> {
		require_non_empty("sheet_id", sheet_id)?;

		let path =
			v3_path(spreadsheet_token)?.segment("sheets").segment(sheet_id).segment("move_dimension");

		self.call_unit(
			Operation::MoveDimension,
			Method::Post,
			&path,
			&MoveDimensionBody { source, destination_index },
		)
		.await
	}

	/// Deletes rows/columns.
	pub async fn delete_dimension(
		&self,
		spreadsheet_token: &str,
		dimension: &DimensionRange,
	) -> Result<DeleteDimensionReply> {
		let path = v2_path(spreadsheet_token, "dimension_range")?;
		let reply: Option<DeleteDimensionReply> = self
			.call(Operation::DeleteDimension, Method::Delete, &path, &DimensionBody { dimension })
			.await?;

		Ok(reply.unwrap_or_default())
	}
}
