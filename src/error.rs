use std::borrow::Cow;

use aide::OperationOutput;
use axum::{
	extract::{rejection, Request, State},
	http::StatusCode,
	middleware::Next,
	response::{IntoResponse, Response},
};
use axum_jsonschema::JsonSchemaRejection;
use schemars::JsonSchema;
use serde::Serialize;

use crate::{config::FaultPolicy, extract::Json, repository};

pub type Map = serde_json::Map<String, serde_json::Value>;

/// A single error message sent to the client.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Message<'a> {
	/// A short, machine-readable description of the error.
	pub content: Cow<'a, str>,
	/// Extra information about the error.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Map>,
}

impl<'a> Message<'a> {
	pub fn new(content: impl Into<Cow<'a, str>>) -> Self {
		Self {
			content: content.into(),
			details: None,
		}
	}

	#[must_use]
	pub fn detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		self.details
			.get_or_insert_with(Map::new)
			.insert(key.into(), value.into());
		self
	}

	pub fn into_vec(self) -> Vec<Self> {
		vec![self]
	}
}

/// The body of every fault response.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ErrorResponse<'a> {
	pub errors: Vec<Message<'a>>,
}

/// Marks a response as a fault, so the [`FaultPolicy`] can be applied to it.
///
/// Holds the status the fault was originally rendered with.
#[derive(Clone, Copy, Debug)]
pub struct Fault(pub StatusCode);

/// Describes how a route-specific error is presented to the client.
pub trait ErrorShape: std::error::Error + Sized {
	fn status(&self) -> StatusCode;

	fn into_errors(self) -> Vec<Message<'static>>;
}

/// Errors that can occur in any route, mostly while extracting the request.
///
/// The Display trait is not sent to the client, so it can show
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	#[error("json error: {0}")]
	Json(#[from] rejection::JsonRejection),
	#[error("decode error: {0}")]
	Decode(String),
	#[error("path error: {0}")]
	Path(#[from] rejection::PathRejection),
	#[error("repository error: {0}")]
	Repository(#[from] repository::Error),
}

impl From<JsonSchemaRejection> for AppError {
	fn from(rejection: JsonSchemaRejection) -> Self {
		match rejection {
			JsonSchemaRejection::Json(rejection) => Self::Json(rejection),
			JsonSchemaRejection::Serde(error) => Self::Decode(error.to_string()),
			JsonSchemaRejection::Schema(..) => {
				Self::Decode("request body does not match the expected schema".into())
			}
		}
	}
}

impl AppError {
	pub fn status(&self) -> StatusCode {
		match self {
			Self::Decode(..) => StatusCode::BAD_REQUEST,
			Self::Json(rejection) => rejection.status(),
			Self::Path(rejection) => rejection.status(),
			Self::Repository(..) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	pub fn into_errors(self) -> Vec<Message<'static>> {
		match self {
			Self::Json(rejection) => Message::new("invalid_body")
				.detail("reason", rejection.body_text())
				.into_vec(),
			Self::Decode(reason) => Message::new("invalid_body")
				.detail("reason", reason)
				.into_vec(),
			Self::Path(rejection) => Message::new("invalid_path")
				.detail("reason", rejection.body_text())
				.into_vec(),
			Self::Repository(repository::Error::IdsExhausted) => {
				Message::new("ids_exhausted").into_vec()
			}
		}
	}
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response {
		tracing::debug!(error = %self, "request rejected");

		fault(self.status(), self.into_errors())
	}
}

/// The error type returned by route handlers, combining the route's own
/// error `E` with errors shared by every route.
#[derive(Debug)]
pub enum RouteError<E> {
	App(AppError),
	Route(E),
}

impl<E> From<AppError> for RouteError<E> {
	fn from(error: AppError) -> Self {
		Self::App(error)
	}
}

impl<E: ErrorShape> From<E> for RouteError<E> {
	fn from(error: E) -> Self {
		Self::Route(error)
	}
}

impl<E: ErrorShape> IntoResponse for RouteError<E> {
	fn into_response(self) -> Response {
		match self {
			Self::App(error) => error.into_response(),
			Self::Route(error) => {
				tracing::debug!(error = %error, "route failed");

				fault(error.status(), error.into_errors())
			}
		}
	}
}

impl<E> OperationOutput for RouteError<E> {
	type Inner = ErrorResponse<'static>;
}

fn fault(status: StatusCode, errors: Vec<Message<'static>>) -> Response {
	let mut response = (status, Json(ErrorResponse { errors })).into_response();

	response.extensions_mut().insert(Fault(status));
	response
}

/// Applies the configured [`FaultPolicy`] to fault responses.
///
/// Responses that are not marked with [`Fault`] are passed through untouched.
pub async fn apply_fault_policy(
	State(policy): State<FaultPolicy>,
	request: Request,
	next: Next,
) -> Response {
	let mut response = next.run(request).await;

	if policy == FaultPolicy::Generic {
		if let Some(Fault(status)) = response.extensions().get::<Fault>().copied() {
			tracing::debug!(%status, "reporting fault as internal server error");

			*response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
		}
	}

	response
}
