mod model;
mod route;

use proc_macro::TokenStream;

/// Creates a new documentation function for the route, named after the original function with the suffix `_docs`.
///
/// The first line of the doc comment becomes the summary, the rest becomes the description.
#[proc_macro_attribute]
pub fn route(args: TokenStream, input: TokenStream) -> TokenStream {
	route::from_input(args, input)
}

/// Creates a `CreateXInput` struct for the model, along with a `From<CreateXInput>` impl for it.
///
/// The `id` field and fields with #[serde(skip_deserializing)] are left out of the input
/// and filled with their [`Default`] value on conversion. All other fields are included
/// verbatim (including attributes).
#[proc_macro_attribute]
pub fn model(_args: TokenStream, input: TokenStream) -> TokenStream {
	model::from_input(input)
}
