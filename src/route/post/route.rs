use axum::extract::State;
use macros::route;

use crate::{
	error::AppError,
	extract::{Json, Path},
	openapi::tag,
	route::comment::model::Comment,
	Comments, Posts,
};

use super::{model, Error, RouteError};

/// Get all posts
/// Returns every post, in the order they were created.
#[route(tag = tag::POST)]
pub async fn get_posts(State(posts): State<Posts>) -> Json<Vec<model::Post>> {
	Json(posts.all())
}

/// Get single post
/// Returns a single post by its unique id.
#[route(tag = tag::POST)]
pub async fn get_post(
	State(posts): State<Posts>,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::Post>, RouteError> {
	let post = posts.get(path.id).ok_or(Error::UnknownPost(path.id))?;

	Ok(Json(post))
}

/// Create post
/// Creates a new post, returning it along with its assigned id.
#[route(tag = tag::POST)]
pub async fn create_post(
	State(posts): State<Posts>,
	Json(input): Json<model::CreatePostInput>,
) -> Result<Json<model::Post>, RouteError> {
	let post = posts.save(input.into()).map_err(AppError::from)?;

	tracing::info!(post = ?post.id, "created post");

	Ok(Json(post))
}

/// Delete post
/// Deletes an existing post by its unique id. Comments on the post are kept.
#[route(tag = tag::POST, response(status = 200, description = "The post was deleted."))]
pub async fn delete_post(
	State(posts): State<Posts>,
	Path(path): Path<model::IdInput>,
) -> Result<(), RouteError> {
	if !posts.remove(path.id) {
		return Err(Error::UnknownPost(path.id).into());
	}

	tracing::info!(post = path.id, remaining = posts.len(), "deleted post");

	Ok(())
}

/// Get post comments
/// Returns every comment whose `postId` is the given id, in the order they were created.
/// The post itself does not need to exist.
#[route(tag = tag::POST, tag = tag::COMMENT)]
pub async fn get_post_comments(
	State(comments): State<Comments>,
	Path(path): Path<model::IdInput>,
) -> Json<Vec<Comment>> {
	Json(comments.by_post(path.id))
}
