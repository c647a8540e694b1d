use aide::OperationIo;
use axum::{
	extract::{FromRequest, FromRequestParts, Request},
	http::request,
	response::{IntoResponse, Response},
};
use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::AppError;

/// A JSON request or response body.
///
/// Request bodies are checked against the JSON schema of `T` before being
/// deserialized. Any failure (missing content type, invalid JSON, schema or
/// type mismatch) is rejected with an [`AppError`], so it goes through the fault policy.
#[derive(OperationIo)]
#[aide(
	input_with = "axum_jsonschema::Json<T>",
	output_with = "axum_jsonschema::Json<T>",
	json_schema
)]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
	fn into_response(self) -> Response {
		axum::Json(self.0).into_response()
	}
}

#[axum::async_trait]
impl<T, S> FromRequest<S> for Json<T>
where
	T: DeserializeOwned + JsonSchema + 'static,
	S: Send + Sync,
{
	type Rejection = AppError;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		let axum_jsonschema::Json(body) = axum_jsonschema::Json::from_request(req, state).await?;

		Ok(Self(body))
	}
}

/// The parameters of the matched route path, such as the `:id` in `/posts/:id`.
///
/// A segment that does not parse as the expected type is rejected with an [`AppError`].
#[derive(OperationIo)]
#[aide(
	input_with = "axum::extract::Path<T>",
	output_with = "axum_jsonschema::Json<T>",
	json_schema
)]
pub struct Path<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for Path<T>
where
	T: DeserializeOwned + Send,
	S: Send + Sync,
{
	type Rejection = AppError;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let axum::extract::Path(params) =
			axum::extract::Path::from_request_parts(parts, state).await?;

		Ok(Self(params))
	}
}
