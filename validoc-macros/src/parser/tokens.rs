use syn::spanned::Spanned;
use syn::{Attribute, Expr, ExprLit, Lit, Meta};

use super::types::DocLine;

/// Read the text of a `#[doc = "..."]` attribute, `None` for anything else.
pub fn doc_line(attr: &Attribute) -> Option<DocLine> {
    if !attr.path().is_ident("doc") {
        return None;
    }
    let Meta::NameValue(name_value) = &attr.meta else {
        return None;
    };
    let Expr::Lit(ExprLit {
        lit: Lit::Str(text),
        ..
    }) = &name_value.value
    else {
        return None;
    };

    Some(DocLine {
        text: text.value(),
        span: attr.span(),
    })
}

pub fn is_deprecated(attr: &Attribute) -> bool {
    attr.path().is_ident("deprecated")
}

/// Split off a leading Rust type from `input`.
///
/// Whitespace only ends the type outside of `<>`, `()` and `[]`, so
/// `(StatusCode, Json<Item>) Created` yields the whole tuple.
pub fn split_leading_type(input: &str) -> (&str, &str) {
    let mut depth = 0i32;
    for (i, ch) in input.char_indices() {
        match ch {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth -= 1,
            c if c.is_whitespace() && depth <= 0 => {
                return (&input[..i], input[i..].trim_start());
            }
            _ => {}
        }
    }
    (input, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_doc_attribute_text() {
        let attr: Attribute = syn::parse_quote!(#[doc = " predict demo"]);
        let line = doc_line(&attr).unwrap();
        assert_eq!(line.text, " predict demo");
    }

    #[test]
    fn unescapes_string_literals() {
        let attr: Attribute = syn::parse_quote!(#[doc = "Contains \"quotes\""]);
        assert_eq!(doc_line(&attr).unwrap().text, "Contains \"quotes\"");
    }

    #[test]
    fn ignores_non_doc_attributes() {
        let attr: Attribute = syn::parse_quote!(#[allow(dead_code)]);
        assert!(doc_line(&attr).is_none());
    }

    #[test]
    fn detects_deprecated_attribute() {
        let attr: Attribute = syn::parse_quote!(#[deprecated]);
        assert!(is_deprecated(&attr));
        let attr: Attribute = syn::parse_quote!(#[deprecated(note = "use v2")]);
        assert!(is_deprecated(&attr));
        let attr: Attribute = syn::parse_quote!(#[inline]);
        assert!(!is_deprecated(&attr));
    }

    #[test]
    fn splits_simple_type() {
        assert_eq!(
            split_leading_type("Json<Resp> Prediction result"),
            ("Json<Resp>", "Prediction result")
        );
    }

    #[test]
    fn keeps_nested_generics_together() {
        assert_eq!(
            split_leading_type("Json<Vec<Resp>> All results"),
            ("Json<Vec<Resp>>", "All results")
        );
    }

    #[test]
    fn keeps_tuple_types_with_spaces_together() {
        assert_eq!(
            split_leading_type("(StatusCode, Json<Resp>) Created"),
            ("(StatusCode, Json<Resp>)", "Created")
        );
    }

    #[test]
    fn unit_type_then_description() {
        assert_eq!(split_leading_type("() Forbidden"), ("()", "Forbidden"));
    }

    #[test]
    fn type_without_description() {
        assert_eq!(split_leading_type("Json<Resp>"), ("Json<Resp>", ""));
    }
}
