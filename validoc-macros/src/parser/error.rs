use proc_macro2::{Span, TokenStream};
use quote::quote_spanned;
use std::fmt;

#[derive(Debug)]
pub struct ParseError {
    message: String,
    span: Option<Span>,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
        }
    }

    pub fn with_span(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span: Some(span),
        }
    }

    pub const fn span(&self) -> Option<Span> {
        self.span
    }

    /// Render as a `compile_error!` pointing at the offending doc line when known.
    pub fn to_compile_error(&self) -> TokenStream {
        let span = self.span.unwrap_or_else(Span::call_site);
        let message = &self.message;
        quote_spanned! {span=>
            compile_error!(#message);
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<syn::Error> for ParseError {
    fn from(err: syn::Error) -> Self {
        Self::with_span(err.to_string(), err.span())
    }
}
