use schemars::JsonSchema;
use serde::Deserialize;

use crate::repository::Id;

/// Path parameters of routes addressing a single record.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct IdInput {
	/// The unique identifier of the record.
	pub id: Id,
}
