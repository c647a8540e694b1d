use aide::{openapi::Tag, transform::TransformOpenApi};

use crate::{error, extract::Json};

pub const SPEC_URL: &str = "/docs/private/api.json";

pub mod tag {
	pub const POST: &str = "Post";
	pub const COMMENT: &str = "Comment";
}

pub fn docs(api: TransformOpenApi) -> TransformOpenApi {
	api.title("Blog API")
		.summary("Posts and the comments left on them")
		.description(include_str!("../README.md"))
		.tag(Tag {
			name: tag::POST.into(),
			description: Some("Post management".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::COMMENT.into(),
			description: Some("Comment management".into()),
			..Default::default()
		})
		.default_response_with::<Json<error::ErrorResponse<'static>>, _>(|res| {
			res.description("The request failed. Depending on the configured fault policy, the status is either 500 or the specific status of the fault.")
				.example(error::ErrorResponse {
					errors: error::Message::new("unknown_post")
						.detail("post", 1000)
						.into_vec(),
				})
		})
}
