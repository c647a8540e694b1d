use axum::extract::State;
use macros::route;

use crate::{
	error::AppError,
	extract::{Json, Path},
	openapi::tag,
	Comments,
};

use super::{model, Error, RouteError};

/// Get all comments
/// Returns every comment, in the order they were created.
#[route(tag = tag::COMMENT)]
pub async fn get_comments(State(comments): State<Comments>) -> Json<Vec<model::Comment>> {
	Json(comments.all())
}

/// Get single comment
/// Returns a single comment by its unique id.
#[route(tag = tag::COMMENT)]
pub async fn get_comment(
	State(comments): State<Comments>,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::Comment>, RouteError> {
	let comment = comments
		.get(path.id)
		.ok_or(Error::UnknownComment(path.id))?;

	Ok(Json(comment))
}

/// Create comment
/// Creates a new comment, returning it along with its assigned id.
/// The post it refers to is not checked.
#[route(tag = tag::COMMENT)]
pub async fn create_comment(
	State(comments): State<Comments>,
	Json(input): Json<model::CreateCommentInput>,
) -> Result<Json<model::Comment>, RouteError> {
	let comment = comments.save(input.into()).map_err(AppError::from)?;

	tracing::info!(comment = ?comment.id, post = comment.post_id, "created comment");

	Ok(Json(comment))
}

/// Delete comment
/// Deletes an existing comment by its unique id.
#[route(tag = tag::COMMENT, response(status = 200, description = "The comment was deleted."))]
pub async fn delete_comment(
	State(comments): State<Comments>,
	Path(path): Path<model::IdInput>,
) -> Result<(), RouteError> {
	if !comments.remove(path.id) {
		return Err(Error::UnknownComment(path.id).into());
	}

	tracing::info!(comment = path.id, remaining = comments.len(), "deleted comment");

	Ok(())
}
