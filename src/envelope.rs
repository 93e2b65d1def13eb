//! The `{code, msg, data}` wrapper shared by every Lark API response.

// self
use crate::{_prelude::*, obs::Operation};

/// Response envelope; `code == 0` means success.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
	/// Service status code.
	#[serde(default)]
	pub code: i64,
	/// Service message.
	#[serde(default)]
	pub msg: String,
	/// Operation payload, absent for most write endpoints.
	#[serde(default = "Option::default")]
	pub data: Option<T>,
}
impl<T> Envelope<T>
where
	T: DeserializeOwned,
{
	/// Decodes an envelope, reporting the JSON path of any mismatch.
	pub fn decode(operation: Operation, body: &[u8]) -> Result<Self> {
		let mut de = serde_json::Deserializer::from_slice(body);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| Error::Decode { operation: operation.as_str(), source })
	}
}
impl<T> Envelope<T> {
	/// Surfaces a non-zero code as [`Error::Service`] and returns the optional payload.
	pub fn into_data(self) -> Result<Option<T>> {
		if self.code != 0 {
			return Err(Error::Service { code: self.code, msg: self.msg });
		}

		Ok(self.data)
	}

	/// Like [`Envelope::into_data`], but a missing payload is an error.
	pub fn into_required_data(self, operation: Operation) -> Result<T> {
		self.into_data()?.ok_or(Error::MissingData { operation: operation.as_str() })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[derive(Debug, PartialEq, Deserialize)]
	struct Payload {
		revision: u64,
	}

	#[test]
	fn success_returns_data() {
		let envelope = Envelope::<Payload>::decode(
			Operation::Custom,
			br#"{"code":0,"msg":"success","data":{"revision":7}}"#,
		)
		.expect("Envelope should decode.");

		assert_eq!(
			envelope.into_data().expect("Code 0 should succeed."),
			Some(Payload { revision: 7 })
		);
	}

	#[test]
	fn non_zero_code_is_service_error() {
		let envelope = Envelope::<Payload>::decode(
			Operation::Custom,
			br#"{"code":90215,"msg":"sheetId not found"}"#,
		)
		.expect("Envelope should decode.");
		let err = envelope.into_data().expect_err("Non-zero code should fail.");

		assert!(matches!(err, Error::Service { code: 90215, ref msg } if msg == "sheetId not found"));
	}

	#[test]
	fn missing_fields_default_and_required_data_is_checked() {
		let envelope = Envelope::<Payload>::decode(Operation::MergeCells, b"{}")
			.expect("Empty object should decode with defaults.");

		assert!(matches!(
			envelope.into_required_data(Operation::MergeCells),
			Err(Error::MissingData { operation: "merge_cells" })
		));
	}

	#[test]
	fn decode_errors_carry_json_path() {
		let err = Envelope::<Payload>::decode(
			Operation::GetSpreadsheetMeta,
			br#"{"code":0,"data":{"revision":"seven"}}"#,
		)
		.expect_err("Type mismatch should fail.");

		match err {
			Error::Decode { operation, source } => {
				assert_eq!(operation, "get_spreadsheet_meta");
				assert_eq!(source.path().to_string(), "data.revision");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}
}
