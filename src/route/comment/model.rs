use macros::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::repository::{Entity, Id, Repository};

pub use crate::route::model::IdInput;

/// A single comment, left on a post.
#[model]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
	/// The unique identifier of the comment, assigned when it is created.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<Id>,
	/// The post the comment was left on. The post is not required to exist.
	pub post_id: Id,
	/// The name of the comment's author.
	pub author: String,
	/// The content of the comment.
	pub content: String,
	/// The creation time of the comment, as given by the author.
	pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Entity for Comment {
	fn id(&self) -> Option<Id> {
		self.id
	}

	fn set_id(&mut self, id: Id) {
		self.id = Some(id);
	}
}

impl Repository<Comment> {
	/// Returns every comment left on the given post, in insertion order.
	pub fn by_post(&self, post_id: Id) -> Vec<Comment> {
		self.find(|comment| comment.post_id == post_id)
	}
}
