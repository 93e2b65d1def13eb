//! Contact directory lookups.

// self
use crate::{
	_prelude::*,
	api::require_non_empty,
	client::LarkClient,
	error::ConfigError,
	http::{ApiPath, HttpTransport, Method},
	obs::Operation,
};

const BATCH_GET_ID_PATH: &str = "/open-apis/contact/v3/users/batch_get_id";

/// Identifier flavor returned by contact lookups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserIdType {
	/// App-scoped identifier (the service default).
	#[default]
	OpenId,
	/// Identifier shared by apps of the same developer.
	UnionId,
	/// Tenant-scoped identifier.
	UserId,
}
impl UserIdType {
	/// Returns the query-string value.
	pub const fn as_str(self) -> &'static str {
		match self {
			UserIdType::OpenId => "open_id",
			UserIdType::UnionId => "union_id",
			UserIdType::UserId => "user_id",
		}
	}
}

/// One lookup result; `user_id` is absent when the email matched nobody.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserIdEntry {
	/// Resolved identifier in the requested flavor.
	pub user_id: Option<String>,
	/// Email the entry answers.
	pub email: Option<String>,
	/// Mobile number the entry answers.
	pub mobile: Option<String>,
}

#[derive(Serialize)]
struct BatchGetIdBody<'a> {
	emails: Vec<&'a str>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct BatchGetIdData {
	user_list: Vec<UserIdEntry>,
}

impl<T> LarkClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Resolves user identifiers for a batch of emails.
	pub async fn batch_get_user_ids<S>(
		&self,
		emails: &[S],
		user_id_type: Option<UserIdType>,
	) -> Result<Vec<UserIdEntry>>
	where
		S: AsRef<str>,
	{
		if emails.is_empty() {
			return Err(ConfigError::EmptyParameter { name: "emails" }.into());
		}

		let emails = emails.iter().map(AsRef::as_ref).collect::<Vec<_>>();

		for email in &emails {
			require_non_empty("email", email)?;
		}

		let path = ApiPath::new(BATCH_GET_ID_PATH)
			.query_opt("user_id_type", user_id_type.map(UserIdType::as_str));
		let data: Option<BatchGetIdData> = self
			.call(Operation::BatchGetUserIds, Method::Post, &path, &BatchGetIdBody { emails })
			.await?;

		Ok(data.unwrap_or_default().user_list)
	}

	/// Resolves the user identifier (default flavor) behind `email`.
	pub async fn get_user_id(&self, email: &str) -> Result<String> {
		require_non_empty("email", email)?;

		self.batch_get_user_ids(&[email], None)
			.await?
			.into_iter()
			.next()
			.and_then(|entry| entry.user_id)
			.filter(|id| !id.is_empty())
			.ok_or_else(|| Error::UserNotFound { email: email.to_owned() })
	}
}
