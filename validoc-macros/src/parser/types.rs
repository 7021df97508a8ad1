use proc_macro2::{Ident, Span, TokenStream};
use syn::{ItemFn, Visibility};

/// One `@response` annotation.
#[derive(Debug, Clone)]
pub struct ResponseInfo {
    pub status_code: u16,
    pub response_type: TokenStream,
    pub description: String,
}

/// One `@example` annotation, attached to the response with the same code.
#[derive(Debug, Clone)]
pub struct ExampleInfo {
    pub status_code: u16,
    pub example_code: TokenStream,
    pub span: Span,
}

#[derive(Debug, Clone, Default)]
pub struct DocInfo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub responses: Vec<ResponseInfo>,
    pub examples: Vec<ExampleInfo>,
    pub tags: Vec<String>,
    pub operation_id: Option<String>,
    pub hidden: bool,
    pub deprecated: bool,
}

impl DocInfo {
    pub fn example_for(&self, status_code: u16) -> Option<&ExampleInfo> {
        self.examples.iter().find(|e| e.status_code == status_code)
    }
}

/// The decorated handler, kept intact for re-emission.
pub struct HandlerItem {
    pub name: Ident,
    pub vis: Visibility,
    pub item: ItemFn,
}

// syn only implements `Debug` for its tree behind `extra-traits`.
impl std::fmt::Debug for HandlerItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerItem")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

pub struct DocLine {
    pub text: String,
    pub span: Span,
}
