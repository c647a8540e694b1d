use darling::{ast, FromDeriveInput, FromField};
use proc_macro2::TokenTree;
use quote::{format_ident, quote, ToTokens};
use syn::Meta;

#[derive(Debug, FromDeriveInput)]
#[darling(supports(struct_named), forward_attrs)]
struct ModelInputReceiver {
	ident: syn::Ident,

	generics: syn::Generics,

	data: ast::Data<(), ModelFieldReceiver>,

	attrs: Vec<syn::Attribute>,
}

#[derive(Debug, FromField)]
#[darling(forward_attrs)]
struct ModelFieldReceiver {
	ident: Option<syn::Ident>,

	ty: syn::Type,
	vis: syn::Visibility,

	attrs: Vec<syn::Attribute>,
}

impl ModelFieldReceiver {
	/// Whether the field is assigned by the server rather than sent by the client.
	fn is_server_assigned(&self) -> bool {
		if self.ident.as_ref().is_some_and(|ident| ident == "id") {
			return true;
		}

		self.attrs.iter().any(|attr| {
			let Meta::List(ref list) = attr.meta else {
				return false;
			};

			if !list.path.is_ident("serde") {
				return false;
			}

			list.tokens.to_token_stream().into_iter().any(|token| {
				matches!(token, TokenTree::Ident(ref ident) if ident == "skip_deserializing" || ident == "skip")
			})
		})
	}
}

pub fn from_input(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let input = syn::parse_macro_input!(input as syn::DeriveInput);
	let receiver = match ModelInputReceiver::from_derive_input(&input) {
		Ok(x) => x,
		Err(e) => return e.write_errors().into(),
	};

	let ident = &receiver.ident;
	let vis = &input.vis;
	let generics = &receiver.generics;
	let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
	let create_ident = format_ident!("Create{}Input", ident);

	let attrs = &receiver.attrs;

	let Some(fields) = receiver.data.take_struct() else {
		return syn::Error::new_spanned(&input.ident, "expected a struct with named fields")
			.into_compile_error()
			.into();
	};

	let (assigned, provided): (Vec<_>, Vec<_>) = fields
		.iter()
		.filter(|field| field.ident.is_some())
		.partition(|field| field.is_server_assigned());

	let create_fields = provided.iter().map(|field| {
		let attrs = &field.attrs;
		let vis = &field.vis;
		let ident = &field.ident;
		let ty = &field.ty;

		quote! {
			#(#attrs)*
			#vis #ident: #ty,
		}
	});

	let provided_idents = provided.iter().map(|field| &field.ident).collect::<Vec<_>>();
	let input_idents = provided_idents.clone();
	let assigned_idents = assigned.iter().map(|field| &field.ident);

	quote! {
		#input

		#(#attrs)*
		#vis struct #create_ident #generics {
			#(
				#create_fields
			)*
		}

		impl #impl_generics ::core::convert::From<#create_ident #ty_generics> for #ident #ty_generics #where_clause {
			fn from(input: #create_ident #ty_generics) -> Self {
				Self {
					#(
						#provided_idents: input.#input_idents,
					)*
					#(
						#assigned_idents: ::core::default::Default::default(),
					)*
				}
			}
		}
	}
	.into()
}
