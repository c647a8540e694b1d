use aide::axum::{routing::get_with, ApiRouter};
use axum::http::StatusCode;

use crate::{error, repository::Id, AppState};

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown_post")]
	UnknownPost(Id),
}

pub type RouteError = error::RouteError<Error>;

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route(
			"/",
			get_with(get_posts, get_posts_docs).post_with(create_post, create_post_docs),
		)
		.api_route(
			"/:id",
			get_with(get_post, get_post_docs).delete_with(delete_post, delete_post_docs),
		)
		.api_route(
			"/:id/comments",
			get_with(get_post_comments, get_post_comments_docs),
		)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownPost(..) => StatusCode::NOT_FOUND,
		}
	}

	fn into_errors(self) -> Vec<error::Message<'static>> {
		let message = error::Message::new(self.to_string());
		let Self::UnknownPost(post) = self;

		message.detail("post", post).into_vec()
	}
}
