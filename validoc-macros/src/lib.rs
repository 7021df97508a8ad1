use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;

mod parser;
mod utils;

use parser::{parse_handler, DocInfo, HandlerItem, ParseError};

/// Derive OpenAPI operation docs for an axum handler from its doc comment.
///
/// The first doc line becomes the summary, the following lines the
/// description. Annotations document responses and metadata:
///
/// ```ignore
/// /// predict demo
/// ///
/// /// demo for `query`, `data`, `resp`
/// ///
/// /// @tag model
/// /// @response 200 ValidJson<Resp> Prediction result
/// /// @response 403 () Rejected at random
/// #[validoc]
/// async fn predict(ValidJson(data): ValidJson<Data>) -> Result<ValidJson<Resp>, ApiError> {
///     // ...
/// }
///
/// // later: .route("/predict", validoc::post!(predict))
/// ```
///
/// Next to the handler the macro emits a hidden module of the same name
/// holding `docs(TransformOperation) -> TransformOperation`, which the
/// `validoc::get!`/`post!`/... macros pair with the handler.
#[proc_macro_attribute]
pub fn validoc(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return ParseError::with_span(
            "#[validoc] takes no arguments\n\
             help: document responses and tags with doc comment annotations instead",
            Span::call_site(),
        )
        .to_compile_error()
        .into();
    }

    match parse_handler(item.into()) {
        Ok((handler, doc_info)) => expand(&handler, &doc_info).into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(handler: &HandlerItem, doc_info: &DocInfo) -> proc_macro2::TokenStream {
    let HandlerItem { name, vis, item } = handler;

    let summary = doc_info.title.as_ref().map(|title| quote!(.summary(#title)));
    let description = doc_info
        .description
        .as_ref()
        .map(|description| quote!(.description(#description)));
    let tags = doc_info.tags.iter().map(|tag| quote!(.tag(#tag)));
    let operation_id = doc_info.operation_id.as_ref().map(|id| quote!(.id(#id)));
    let hidden = doc_info.hidden.then(|| quote!(.hidden(true)));
    let deprecated = doc_info
        .deprecated
        .then(|| quote!(op.inner_mut().deprecated = true;));

    let responses = doc_info.responses.iter().map(|resp| {
        let code = resp.status_code;
        let response_type = &resp.response_type;
        let desc = &resp.description;
        let example = doc_info.example_for(code).map(|example| {
            let example_code = &example.example_code;
            quote!(.example(#example_code))
        });

        quote! {
            .response_with::<#code, #response_type, _>(|res| {
                res.description(#desc) #example
            })
        }
    });

    quote! {
        #item

        #[doc(hidden)]
        #[allow(non_snake_case, unused_imports)]
        #vis mod #name {
            use super::*;

            pub fn docs(
                op: ::validoc::aide::transform::TransformOperation<'_>,
            ) -> ::validoc::aide::transform::TransformOperation<'_> {
                #[allow(unused_mut)]
                let mut op = op
                    #summary
                    #description
                    #(#tags)*
                    #operation_id
                    #hidden
                    #(#responses)*;
                #deprecated
                op
            }
        }
    }
}
