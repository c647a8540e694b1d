use aide::axum::{routing::get_with, ApiRouter};
use axum::http::StatusCode;

use crate::{error, repository::Id, AppState};

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown_comment")]
	UnknownComment(Id),
}

pub type RouteError = error::RouteError<Error>;

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route(
			"/",
			get_with(get_comments, get_comments_docs).post_with(create_comment, create_comment_docs),
		)
		.api_route(
			"/:id",
			get_with(get_comment, get_comment_docs).delete_with(delete_comment, delete_comment_docs),
		)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownComment(..) => StatusCode::NOT_FOUND,
		}
	}

	fn into_errors(self) -> Vec<error::Message<'static>> {
		let message = error::Message::new(self.to_string());
		let Self::UnknownComment(comment) = self;

		message.detail("comment", comment).into_vec()
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[tokio::test]
	async fn test_list_comments() {
		let state = state();
		let app = app(state.clone());

		let post = create_post(&app, "test post").await.id.unwrap();
		let comment1 = create_comment(&app, post, "comment1").await;
		let comment2 = create_comment(&app, post, "comment2").await;

		let response = app.get("/comments").await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Vec<Comment>>(), [comment1, comment2]);
		assert_eq!(state.comments.len(), 2);
	}

	#[tokio::test]
	async fn test_get_comment() {
		let state = state();
		let app = app(state.clone());

		let post = create_post(&app, "test post").await.id.unwrap();
		let comment = create_comment(&app, post, "comment").await;

		let response = app
			.get(&format!("/comments/{}", comment.id.unwrap()))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Comment>(), comment);
		assert_eq!(state.comments.len(), 1);
	}

	#[tokio::test]
	async fn test_get_missing_comment() {
		let app = app(state());

		let response = app.get("/comments/1219").await;

		assert_eq!(response.status_code(), 500);
		assert_eq!(
			response.json::<Value>()["errors"][0]["content"],
			"unknown_comment"
		);
	}

	#[tokio::test]
	async fn test_get_missing_comment_semantic() {
		let app = app(semantic_state());

		let response = app.get("/comments/1219").await;

		assert_eq!(response.status_code(), 404);
	}

	#[tokio::test]
	async fn test_comment_on_missing_post() {
		let state = state();
		let app = app(state.clone());

		let comment = create_comment(&app, 4242, "dangling").await;

		assert_eq!(comment.post_id, 4242);
		assert_eq!(state.posts.len(), 0);

		let response = app.get("/comments").await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Vec<Comment>>(), [comment]);
	}

	#[tokio::test]
	async fn test_create_malformed_comment() {
		let state = state();
		let app = app(state.clone());

		let response = app
			.post("/comments")
			.json(&json!({ "author": "testu", "content": "missing post id" }))
			.await;

		assert_eq!(response.status_code(), 500);
		assert_eq!(state.comments.len(), 0);
	}

	#[tokio::test]
	async fn test_create_malformed_comment_semantic() {
		let app = semantic_app();

		let response = app
			.post("/comments")
			.json(&json!({ "postId": "one", "author": "testu", "content": "comment" }))
			.await;

		assert_eq!(response.status_code(), 400);
		assert_eq!(
			response.json::<Value>()["errors"][0]["content"],
			"invalid_body"
		);
	}

	#[tokio::test]
	async fn test_create_comment_invalid_json() {
		let state = state();
		let app = app(state.clone());

		let response = app
			.post("/comments")
			.bytes("{not json".into())
			.content_type("application/json")
			.await;

		assert_eq!(response.status_code(), 500);
		assert_eq!(state.comments.len(), 0);

		let app = semantic_app();
		let response = app
			.post("/comments")
			.bytes("{not json".into())
			.content_type("application/json")
			.await;

		assert_eq!(response.status_code(), 400);
	}

	#[tokio::test]
	async fn test_create_comment_without_content_type() {
		let state = state();
		let app = app(state.clone());

		let response = app.post("/comments").bytes("{}".into()).await;

		assert_eq!(response.status_code(), 500);
		assert_eq!(state.comments.len(), 0);

		let app = semantic_app();
		let response = app.post("/comments").bytes("{}".into()).await;

		assert_eq!(response.status_code(), 415);
	}

	#[tokio::test]
	async fn test_create_comment_long_author() {
		let app = app(state());

		let response = app
			.post("/comments")
			.json(&json!({
				"postId": 1,
				"author": "a".repeat(65),
				"content": "comment",
				"createdAt": Utc::now(),
			}))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Comment>().author.len(), 65);
	}

	#[tokio::test]
	async fn test_delete_comment() {
		let state = state();
		let app = app(state.clone());

		let post = create_post(&app, "test post").await.id.unwrap();
		let comment = create_comment(&app, post, "comment").await;

		let response = app
			.delete(&format!("/comments/{}", comment.id.unwrap()))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(state.comments.len(), 0);
	}

	#[tokio::test]
	async fn test_delete_missing_comment() {
		let app = app(state());

		let response = app.delete("/comments/7923").await;

		assert_eq!(response.status_code(), 500);
	}

	#[tokio::test]
	async fn test_deleting_post_keeps_comments() {
		let state = state();
		let app = app(state.clone());

		let post = create_post(&app, "test post").await.id.unwrap();
		create_comment(&app, post, "comment").await;

		app.delete(&format!("/posts/{post}")).await;

		let response = app.get(&format!("/posts/{post}/comments")).await;

		assert_eq!(response.json::<Vec<Comment>>().len(), 1);
	}
}
