#![warn(clippy::pedantic)]

mod config;
mod error;
mod extract;
mod openapi;
mod repository;
mod route;
mod trace;


use std::{net::SocketAddr, sync::Arc};

use aide::{axum::ApiRouter, openapi::OpenApi};
use axum::{middleware, Extension};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
	config::Config,
	repository::Repository,
	route::{comment::model::Comment, post::model::Post},
};

pub type Posts = Arc<Repository<Post>>;
pub type Comments = Arc<Repository<Comment>>;
pub type AppState = State;

/// The shared application state.
///
/// Each repository is created once per process and handed to the handlers
/// that need it through [`axum::extract::State`].
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub posts: Posts,
	pub comments: Comments,
	pub config: Arc<Config>,
}

impl State {
	pub fn new(config: Config) -> Self {
		Self {
			posts: Arc::new(Repository::new()),
			comments: Arc::new(Repository::new()),
			config: Arc::new(config),
		}
	}

	/// Removes every post and comment.
	#[cfg(test)]
	pub fn clear(&self) {
		self.posts.clear();
		self.comments.clear();
	}
}

/// Builds the application router, along with its `OpenAPI` documentation.
pub fn app(state: State) -> axum::Router {
	aide::gen::on_error(|error| tracing::warn!("openapi generation error: {error}"));
	aide::gen::extract_schemas(true);

	let mut api = OpenApi::default();
	let fault_policy = state.config.fault_policy;

	ApiRouter::new()
		.nest("/posts", route::post::routes())
		.nest("/comments", route::comment::routes())
		.nest("/docs", route::docs::routes())
		.finish_api_with(&mut api, openapi::docs)
		.layer(Extension(Arc::new(api)))
		.layer(middleware::from_fn_with_state(
			fault_policy,
			error::apply_fault_policy,
		))
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(CorsLayer::permissive()),
		)
		.with_state(state)
}

#[tokio::main]
async fn main() {
	let config = Config::from_env().expect("invalid configuration");
	let _guard = trace::init_tracing_subscriber(&config).expect("failed to initialize tracing");

	let address = SocketAddr::new(config.host, config.port);
	let state = State::new(config);

	let listener = tokio::net::TcpListener::bind(address)
		.await
		.expect("failed to bind to address");

	tracing::info!("listening on {}", address);

	axum::serve(listener, app(state))
		.await
		.expect("server error");
}
