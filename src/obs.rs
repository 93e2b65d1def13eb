//! Optional observability helpers for API calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (on by default) to emit structured spans named `lark_util.call` with the
//!   `operation` and `method` fields, plus token refresh events.
//! - Enable `metrics` to increment the `lark_util_call_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Remote operations issued by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Tenant access token issuance.
	TokenRefresh,
	/// Contact lookup by email.
	BatchGetUserIds,
	/// Spreadsheet creation.
	CreateSpreadsheet,
	/// Spreadsheet metadata read.
	GetSpreadsheetMeta,
	/// Spreadsheet property update.
	UpdateSpreadsheetProperties,
	/// Worksheet add/copy/delete/update batch.
	BatchUpdateSheets,
	/// Row/column append.
	AddDimension,
	/// Row/column insertion.
	InsertDimension,
	/// Row/column property update.
	UpdateDimension,
	/// Row/column move.
	MoveDimension,
	/// Row/column deletion.
	DeleteDimension,
	/// Value prepend into a range.
	PrependValues,
	/// Cell merge.
	MergeCells,
	/// Cell unmerge.
	UnmergeCells,
	/// Batch style update.
	BatchUpdateStyles,
	/// Caller-issued request through [`LarkClient::call`](crate::client::LarkClient::call).
	Custom,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::TokenRefresh => "token_refresh",
			Operation::BatchGetUserIds => "batch_get_user_ids",
			Operation::CreateSpreadsheet => "create_spreadsheet",
			Operation::GetSpreadsheetMeta => "get_spreadsheet_meta",
			Operation::UpdateSpreadsheetProperties => "update_spreadsheet_properties",
			Operation::BatchUpdateSheets => "batch_update_sheets",
			Operation::AddDimension => "add_dimension",
			Operation::InsertDimension => "insert_dimension",
			Operation::UpdateDimension => "update_dimension",
			Operation::MoveDimension => "move_dimension",
			Operation::DeleteDimension => "delete_dimension",
			Operation::PrependValues => "prepend_values",
			Operation::MergeCells => "merge_cells",
			Operation::UnmergeCells => "unmerge_cells",
			Operation::BatchUpdateStyles => "batch_update_styles",
			Operation::Custom => "custom",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
