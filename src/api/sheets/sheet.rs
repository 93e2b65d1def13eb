//! Worksheet add/copy/delete/update batches.

// self
use crate::{
	_prelude::*,
	api::sheets::v2_path,
	client::LarkClient,
	http::{HttpTransport, Method},
	obs::Operation,
};

/// One entry of a worksheet batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SheetRequest {
	/// Adds a worksheet.
	AddSheet {
		/// Title and position of the new worksheet.
		properties: SheetProperties,
	},
	/// Copies a worksheet.
	CopySheet {
		/// Worksheet to copy.
		source: SheetSource,
		/// Title of the copy; the service derives one from the source when absent.
		#[serde(skip_serializing_if = "Option::is_none")]
		destination: Option<SheetDestination>,
	},
	/// Deletes a worksheet.
	DeleteSheet {
		/// Worksheet id.
		sheet_id: String,
	},
	/// Updates worksheet properties; `properties.sheet_id` selects the worksheet.
	UpdateSheet {
		/// New properties.
		properties: SheetProperties,
	},
}
impl SheetRequest {
	/// Adds a worksheet titled `title` at `index` (front when `None`).
	pub fn add(title: impl Into<String>, index: Option<u32>) -> Self {
		Self::AddSheet {
			properties: SheetProperties { title: Some(title.into()), index, ..Default::default() },
		}
	}

	/// Copies `sheet_id`, optionally naming the copy.
	pub fn copy(sheet_id: impl Into<String>, title: Option<String>) -> Self {
		Self::CopySheet {
			source: SheetSource { sheet_id: sheet_id.into() },
			destination: title.map(|title| SheetDestination { title }),
		}
	}

	/// Deletes `sheet_id`.
	pub fn delete(sheet_id: impl Into<String>) -> Self {
		Self::DeleteSheet { sheet_id: sheet_id.into() }
	}

	/// Updates `sheet_id` with `properties`; the id is written into the properties.
	pub fn update(sheet_id: impl Into<String>, properties: SheetProperties) -> Self {
		let properties = SheetProperties { sheet_id: Some(sheet_id.into()), ..properties };

		Self::UpdateSheet { properties }
	}
}

/// Worksheet copied by [`SheetRequest::CopySheet`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSource {
	/// Worksheet id.
	pub sheet_id: String,
}

/// Target of [`SheetRequest::CopySheet`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SheetDestination {
	/// Title of the copy.
	pub title: String,
}

/// Worksheet properties; unset fields are omitted from the request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
	/// Worksheet id; read-only, identifies the target of an update.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sheet_id: Option<String>,
	/// Title.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Position among worksheets.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub index: Option<u32>,
	/// Hides the worksheet.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub hidden: Option<bool>,
	/// Frozen columns; `0` unfreezes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub frozen_col_count: Option<u32>,
	/// Frozen rows; `0` unfreezes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub frozen_row_count: Option<u32>,
	/// Locks or unlocks the worksheet.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub protect: Option<SheetProtection>,
}

/// Lock state applied by [`SheetProtection`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LockState {
	/// Lock the worksheet.
	Lock,
	/// Unlock the worksheet.
	Unlock,
}

/// Worksheet protection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProtection {
	/// Lock or unlock.
	pub lock: LockState,
	/// Free-form note.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub lock_info: Option<String>,
	/// Extra editors besides the caller and the owner; requires `user_id_type`.
	#[serde(rename = "userIDs", skip_serializing_if = "Vec::is_empty")]
	pub user_ids: Vec<String>,
}

#[derive(Serialize)]
struct BatchUpdateSheetsBody<'a> {
	requests: &'a [SheetRequest],
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct BatchUpdateSheetsData {
	replies: Vec<JsonValue>,
}

impl<T> LarkClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Applies a batch of worksheet requests and returns the service's per-request replies.
	pub async fn batch_update_sheets(
		&self,
		spreadsheet_token: &str,
		requests: &[SheetRequest],
	) -> Result<Vec<JsonValue>> {
		let path = v2_path(spreadsheet_token, "sheets_batch_update")?;
		let data: Option<BatchUpdateSheetsData> = self
			.call(Operation::BatchUpdateSheets, Method::Post, &path, &BatchUpdateSheetsBody {
				requests,
			})
			.await?;

		Ok(data.unwrap_or_default().replies)
	}
}
