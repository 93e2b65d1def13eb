//! Cell values, merges, and styles.

// crates.io
use serde::Serializer;
// self
use crate::{
	_prelude::*,
	api::{require_non_empty, sheets::v2_path},
	client::LarkClient,
	http::{HttpTransport, Method},
	obs::Operation,
};

/// Values written into a range such as `0b12!A1:B2`.
///
/// Each inner vector is one row. A single write covers at most 5000 rows and 100 columns,
/// with at most 50,000 characters per cell.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ValueRange {
	/// Target range, prefixed with the worksheet id.
	pub range: String,
	/// Rows of cell values.
	pub values: Vec<Vec<JsonValue>>,
}

/// How [`LarkClient::merge_cells`] merges a range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MergeType {
	/// One merged cell for the whole range.
	#[default]
	MergeAll,
	/// One merged cell per row.
	MergeRows,
	/// One merged cell per column.
	MergeColumns,
}

/// Style applied to a set of ranges.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StyleUpdate {
	/// Ranges such as `0b12!A1:C3`.
	pub ranges: Vec<String>,
	/// Style to apply.
	pub style: CellStyle,
}

/// Cell style; unset fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellStyle {
	/// Font.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub font: Option<Font>,
	/// Underline/strikethrough.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub text_decoration: Option<TextDecoration>,
	/// Number format, e.g. `#,##0.00`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub formatter: Option<String>,
	/// Horizontal alignment.
	#[serde(rename = "hAlign", skip_serializing_if = "Option::is_none")]
	pub h_align: Option<HorizontalAlign>,
	/// Vertical alignment.
	#[serde(rename = "vAlign", skip_serializing_if = "Option::is_none")]
	pub v_align: Option<VerticalAlign>,
	/// Font color, e.g. `#000000`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fore_color: Option<String>,
	/// Background color.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub back_color: Option<String>,
	/// Border placement.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub border_type: Option<BorderType>,
	/// Border color.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub border_color: Option<String>,
	/// Clears every existing format first.
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub clean: bool,
}

/// Font settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
	/// Bold.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bold: Option<bool>,
	/// Italic.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub italic: Option<bool>,
	/// Size and line height, e.g. `10pt/1.5`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub font_size: Option<String>,
	/// Clears the font format first.
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub clean: bool,
}

/// Text decoration; serialized as its numeric code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TextDecoration {
	/// None.
	#[default]
	None = 0,
	/// Underline.
	Underline = 1,
	/// Strikethrough.
	Strikethrough = 2,
	/// Underline and strikethrough.
	UnderlineStrikethrough = 3,
}
impl Serialize for TextDecoration {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_u8(*self as u8)
	}
}

/// Horizontal alignment; serialized as its numeric code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HorizontalAlign {
	/// Left.
	#[default]
	Left = 0,
	/// Center.
	Center = 1,
	/// Right.
	Right = 2,
}
impl Serialize for HorizontalAlign {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_u8(*self as u8)
	}
}

/// Vertical alignment; serialized as its numeric code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VerticalAlign {
	/// Top.
	#[default]
	Top = 0,
	/// Middle.
	Middle = 1,
	/// Bottom.
	Bottom = 2,
}
impl Serialize for VerticalAlign {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_u8(*self as u8)
	}
}

/// Border placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BorderType {
	/// Every edge of every cell.
	FullBorder,
	/// Outer edge of the range.
	OuterBorder,
	/// Inner edges only.
	InnerBorder,
	/// Removes borders.
	NoBorder,
	/// Left edge.
	LeftBorder,
	/// Right edge.
	RightBorder,
	/// Top edge.
	TopBorder,
	/// Bottom edge.
	BottomBorder,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PrependValuesBody<'a> {
	value_range: &'a ValueRange,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MergeCellsBody {
	range: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	merge_type: Option<MergeType>,
}
impl MergeCellsBody {
	fn new(sheet_id: &str, range: &str, merge_type: Option<MergeType>) -> Result<Self> {
		require_non_empty("sheet_id", sheet_id)?;
		require_non_empty("range", range)?;

		Ok(Self { range: format!("{sheet_id}!{range}"), merge_type })
	}
}

#[derive(Serialize)]
struct BatchUpdateStylesBody<'a> {
	data: &'a [StyleUpdate],
}

impl<T> LarkClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Inserts rows above `value_range.range` and fills them with the given values.
	pub async fn prepend_values(
		&self,
		spreadsheet_token: &str,
		value_range: &ValueRange,
	) -> Result<()> {
		let path = v2_path(spreadsheet_token, "values_prepend")?;

		self.call_unit(Operation::PrependValues, Method::Post, &path, &PrependValuesBody {
			value_range,
		})
		.await
	}

	/// Merges `range` (e.g. `A1:B2`) of worksheet `sheet_id`.
	pub async fn merge_cells(
		&self,
		spreadsheet_token: &str,
		sheet_id: &str,
		range: &str,
		merge_type: MergeType,
	) -> Result<()> {
		let path = v2_path(spreadsheet_token, "merge_cells")?;
		let body = MergeCellsBody::new(sheet_id, range, Some(merge_type))?;

		self.call_unit(Operation::MergeCells, Method::Post, &path, &body).await
	}

	/// Splits every merged cell inside `range` of worksheet `sheet_id`.
	pub async fn unmerge_cells(
		&self,
		spreadsheet_token: &str,
		sheet_id: &str,
		range: &str,
	) -> Result<()> {
		let path = v2_path(spreadsheet_token, "unmerge_cells")?;
		let body = MergeCellsBody::new(sheet_id, range, None)?;

		self.call_unit(Operation::UnmergeCells, Method::Post, &path, &body).await
	}

	/// Applies styles to ranges in one request.
	pub async fn batch_update_styles(
		&self,
		spreadsheet_token: &str,
		data: &[StyleUpdate],
	) -> Result<()> {
		let path = v2_path(spreadsheet_token, "styles_batch_update")?;

		self.call_unit(Operation::BatchUpdateStyles, Method::Put, &path, &BatchUpdateStylesBody {
			data,
		})
		.await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::ConfigError;

	#[test]
	fn merge_body_prefixes_sheet_id() {
		let body = serde_json::to_value(
			MergeCellsBody::new("0b12", "A1:B2", Some(MergeType::default()))
				.expect("Merge body should build."),
		)
		.expect("Merge body should serialize.");

		assert_eq!(body, serde_json::json!({ "range": "0b12!A1:B2", "mergeType": "MERGE_ALL" }));

		let unmerge = serde_json::to_value(
			MergeCellsBody::new("0b12", "A1:B2", None).expect("Unmerge body should build."),
		)
		.expect("Unmerge body should serialize.");

		assert_eq!(unmerge, serde_json::json!({ "range": "0b12!A1:B2" }));
		assert!(matches!(
			MergeCellsBody::new("", "A1:B2", None),
			Err(Error::Config(ConfigError::EmptyParameter { name: "sheet_id" }))
		));
	}

	#[test]
	fn style_serializes_numeric_codes_and_skips_unset_fields() {
		let update = StyleUpdate {
			ranges: vec!["0b12!A1:C3".into()],
			style: CellStyle {
				font: Some(Font {
					bold: Some(true),
					font_size: Some("10pt/1.5".into()),
					..Default::default()
				}),
				text_decoration: Some(TextDecoration::Underline),
				h_align: Some(HorizontalAlign::Center),
				v_align: Some(VerticalAlign::Top),
				border_type: Some(BorderType::FullBorder),
				..Default::default()
			},
		};
		let body =
			serde_json::to_value(BatchUpdateStylesBody { data: std::slice::from_ref(&update) })
				.expect("Style body should serialize.");

		assert_eq!(
			body,
			serde_json::json!({
				"data": [{
					"ranges": ["0b12!A1:C3"],
					"style": {
						"font": {"bold": true, "fontSize": "10pt/1.5"},
						"textDecoration": 1,
						"hAlign": 1,
						"vAlign": 0,
						"borderType": "FULL_BORDER"
					}
				}]
			})
		);
	}

	#[test]
	fn prepend_body_wraps_value_range() {
		let range = ValueRange {
			range: "0b12!A1:B1".into(),
			values: vec![vec![serde_json::json!("name"), serde_json::json!(3)]],
		};
		let body = serde_json::to_value(PrependValuesBody { value_range: &range })
			.expect("Prepend body should serialize.");

		assert_eq!(
			body,
			serde_json::json!({ "valueRange": { "range": "0b12!A1:B1", "values": [["name", 3]] } })
		);
	}
}
