use macros::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::repository::{Entity, Id};

pub use crate::route::model::IdInput;

/// A single blog post.
#[model]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
	/// The unique identifier of the post, assigned when it is created.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<Id>,
	/// The title of the post.
	pub title: String,
	/// The content of the post.
	pub content: String,
	/// The creation time of the post, as given by the author.
	pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Entity for Post {
	fn id(&self) -> Option<Id> {
		self.id
	}

	fn set_id(&mut self, id: Id) {
		self.id = Some(id);
	}
}
