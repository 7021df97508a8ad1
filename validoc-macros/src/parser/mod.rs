mod annotations;
mod error;
mod tokens;
mod types;

pub use error::ParseError;
pub use types::{DocInfo, HandlerItem};

use proc_macro2::TokenStream;
use std::collections::HashSet;
use syn::ItemFn;
use types::DocLine;

use crate::utils::find_closest_annotation;

const VALID_ANNOTATIONS: &str =
    "@response, @example, @tag, @id, @hidden, @validoc-ignore";

/// Parse a handler annotated with `#[validoc]`
pub fn parse_handler(input: TokenStream) -> Result<(HandlerItem, DocInfo), ParseError> {
    let item: ItemFn = syn::parse2(input)
        .map_err(|err| ParseError::with_span(format!("#[validoc] expects a function: {err}"), err.span()))?;

    let doc_lines: Vec<DocLine> = item.attrs.iter().filter_map(tokens::doc_line).collect();

    let mut doc_info = parse_doc_comments(&doc_lines)?;
    doc_info.deprecated = item.attrs.iter().any(tokens::is_deprecated);

    let handler = HandlerItem {
        name: item.sig.ident.clone(),
        vis: item.vis.clone(),
        item,
    };

    Ok((handler, doc_info))
}

/// Parse doc comments into summary, description and annotations
fn parse_doc_comments(lines: &[DocLine]) -> Result<DocInfo, ParseError> {
    let mut doc_info = DocInfo::default();
    let mut description_lines = Vec::new();
    let mut in_description = false;

    for doc_line in lines {
        let trimmed = doc_line.text.trim();
        let span = doc_line.span;

        if trimmed.starts_with("@response") {
            doc_info.responses.push(annotations::parse_response(trimmed, span)?);
        } else if trimmed.starts_with("@example") {
            doc_info.examples.push(annotations::parse_example(trimmed, span)?);
        } else if trimmed.starts_with("@tag") {
            doc_info.tags.push(annotations::parse_tag(trimmed, span)?);
        } else if trimmed.starts_with("@id") {
            doc_info.operation_id = Some(annotations::parse_id(trimmed, span)?);
        } else if trimmed == "@hidden" {
            doc_info.hidden = true;
        } else if trimmed == "@validoc-ignore" {
            break;
        } else if trimmed.starts_with('@') {
            let annotation = trimmed.split_whitespace().next().unwrap_or(trimmed);
            let name = annotation.strip_prefix('@').unwrap_or(annotation);

            let message = find_closest_annotation(name).map_or_else(
                || {
                    format!(
                        "Unknown annotation '{annotation}'\n\
                         note: valid annotations are {VALID_ANNOTATIONS}"
                    )
                },
                |suggestion| {
                    format!(
                        "Unknown annotation '{annotation}'\n\
                         help: did you mean '@{suggestion}'?\n\
                         note: valid annotations are {VALID_ANNOTATIONS}"
                    )
                },
            );
            return Err(ParseError::with_span(message, span));
        } else if !trimmed.is_empty() {
            if doc_info.title.is_none() {
                doc_info.title = Some(trimmed.to_string());
            } else {
                in_description = true;
                description_lines.push(trimmed.to_string());
            }
        } else if in_description {
            description_lines.push(String::new());
        }
    }

    if !description_lines.is_empty() {
        doc_info.description = Some(description_lines.join("\n").trim().to_string());
    }

    check_consistency(&doc_info, lines)?;

    Ok(doc_info)
}

/// Each status code is documented once and every example targets a documented response.
fn check_consistency(doc_info: &DocInfo, lines: &[DocLine]) -> Result<(), ParseError> {
    let mut seen = HashSet::new();
    for response in &doc_info.responses {
        if !seen.insert(response.status_code) {
            let span = lines
                .iter()
                .rev()
                .find(|l| l.text.trim().starts_with(&format!("@response {}", response.status_code)))
                .map(|l| l.span);
            let message = format!(
                "Duplicate @response for status {}\n\
                 help: document each status code once",
                response.status_code
            );
            return Err(match span {
                Some(span) => ParseError::with_span(message, span),
                None => ParseError::new(message),
            });
        }
    }

    for example in &doc_info.examples {
        if !seen.contains(&example.status_code) {
            return Err(ParseError::with_span(
                format!(
                    "@example for status {code} has no matching @response\n\
                     help: add '@response {code} <type> <description>' before the example",
                    code = example.status_code
                ),
                example.span,
            ));
        }
    }

    Ok(())
}
