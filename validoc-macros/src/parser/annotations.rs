use super::error::ParseError;
use super::tokens::split_leading_type;
use super::types::{ExampleInfo, ResponseInfo};
use proc_macro2::Span;
use quote::ToTokens;

const STATUS_HELP: &str = "help: status code must be a number between 100-599\n\
     note: common codes: 200 (OK), 201 (Created), 203 (Non-Authoritative), 403 (Forbidden), 422 (Unprocessable Entity)";

const PRIMITIVES: &[&str] = &[
    "bool", "char", "str", "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32", "i64",
    "i128", "isize", "f32", "f64",
];

/// Strip the annotation keyword and return the trimmed remainder.
fn body<'a>(trimmed: &'a str, keyword: &str) -> &'a str {
    trimmed.strip_prefix(keyword).unwrap_or(trimmed).trim()
}

fn split_word(input: &str) -> (&str, &str) {
    input
        .split_once(char::is_whitespace)
        .map_or((input, ""), |(head, tail)| (head, tail.trim_start()))
}

fn parse_status_code(raw: &str, span: Span) -> Result<u16, ParseError> {
    let status_code = raw.parse::<u16>().map_err(|_| {
        ParseError::with_span(format!("Invalid status code '{raw}'\n{STATUS_HELP}"), span)
    })?;

    if (100..=599).contains(&status_code) {
        Ok(status_code)
    } else {
        Err(ParseError::with_span(
            format!("Status code {status_code} is out of valid range\n{STATUS_HELP}"),
            span,
        ))
    }
}

/// Parse `@response <code> <type> <description>`
pub fn parse_response(trimmed: &str, span: Span) -> Result<ResponseInfo, ParseError> {
    let (code, rest) = split_word(body(trimmed, "@response"));
    if code.is_empty() || rest.is_empty() {
        return Err(ParseError::with_span(
            "Invalid @response annotation format\n\
             help: expected '@response <code> <type> <description>'\n\
             note: example '@response 200 ValidJson<Resp> Prediction result'",
            span,
        ));
    }
    let status_code = parse_status_code(code, span)?;

    let (type_str, description) = split_leading_type(rest);

    if looks_like_description(type_str) {
        return Err(ParseError::with_span(
            format!(
                "Missing response type in @response annotation\n\
                 help: format is '@response <code> <type> <description>'\n\
                 note: did you forget the type? For example '@response {status_code} () {rest}'"
            ),
            span,
        ));
    }

    if description.is_empty() {
        return Err(ParseError::with_span(
            format!(
                "Missing description for @response\n\
                 help: add a description after the response type\n\
                 note: example '@response {status_code} {type_str} Request accepted'"
            ),
            span,
        ));
    }

    let response_type = syn::parse_str::<syn::Type>(type_str).map_err(|_| {
        ParseError::with_span(
            format!(
                "Invalid response type '{type_str}'\n\
                 help: response type must be valid Rust syntax\n\
                 note: common types: (), ValidJson<T>, Json<T>"
            ),
            span,
        )
    })?;

    Ok(ResponseInfo {
        status_code,
        response_type: response_type.into_token_stream(),
        description: description.to_string(),
    })
}

/// Parse `@example <code> <expression>`
pub fn parse_example(trimmed: &str, span: Span) -> Result<ExampleInfo, ParseError> {
    let (code, expr) = split_word(body(trimmed, "@example"));
    if code.is_empty() || expr.is_empty() {
        return Err(ParseError::with_span(
            "Invalid @example annotation format\n\
             help: expected '@example <code> <expression>'\n\
             note: example '@example 200 Resp::example()'",
            span,
        ));
    }
    let status_code = parse_status_code(code, span)?;

    let example = syn::parse_str::<syn::Expr>(expr).map_err(|_| {
        ParseError::with_span(
            format!(
                "Invalid example expression '{expr}'\n\
                 help: expression must be valid Rust syntax\n\
                 note: examples: 'Resp::example()', 'Resp {{ label: 1, score: 0.5 }}'"
            ),
            span,
        )
    })?;

    Ok(ExampleInfo {
        status_code,
        example_code: example.into_token_stream(),
        span,
    })
}

/// Parse `@tag <name>`
pub fn parse_tag(trimmed: &str, span: Span) -> Result<String, ParseError> {
    let tag = body(trimmed, "@tag");
    if tag.is_empty() {
        return Err(ParseError::with_span(
            "Empty tag name in @tag annotation\n\
             help: expected '@tag <tag_name>'\n\
             note: example '@tag model' or '@tag file-upload'",
            span,
        ));
    }
    Ok(tag.to_string())
}

/// Parse `@id <operation_id>`
pub fn parse_id(trimmed: &str, span: Span) -> Result<String, ParseError> {
    let id = body(trimmed, "@id");
    if id.is_empty() {
        return Err(ParseError::with_span(
            "Empty operation ID in @id annotation\n\
             help: expected '@id <operation_id>'\n\
             note: operation IDs must be unique across all endpoints",
            span,
        ));
    }

    if !id.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(ParseError::with_span(
            format!(
                "Invalid operation ID '{id}'\n\
                 help: operation IDs must contain only alphanumeric characters and underscores"
            ),
            span,
        ));
    }

    Ok(id.to_string())
}

/// A lowercase word that is not a primitive is prose, not a type.
fn looks_like_description(type_str: &str) -> bool {
    type_str.chars().next().is_some_and(char::is_lowercase)
        && !type_str.contains(['<', '(', ':'])
        && !PRIMITIVES.contains(&type_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> Span {
        Span::call_site()
    }

    #[test]
    fn parses_json_response() {
        let info = parse_response("@response 200 ValidJson<Resp> Prediction result", span()).unwrap();
        assert_eq!(info.status_code, 200);
        assert_eq!(info.response_type.to_string().replace(' ', ""), "ValidJson<Resp>");
        assert_eq!(info.description, "Prediction result");
    }

    #[test]
    fn parses_unit_response() {
        let info = parse_response("@response 403 () Rejected at random", span()).unwrap();
        assert_eq!(info.status_code, 403);
        assert_eq!(info.response_type.to_string(), "()");
        assert_eq!(info.description, "Rejected at random");
    }

    #[test]
    fn parses_tuple_response_type() {
        let info =
            parse_response("@response 201 (StatusCode, Json<Item>) Item created", span()).unwrap();
        assert_eq!(info.description, "Item created");
        assert!(info.response_type.to_string().contains("StatusCode"));
    }

    #[test]
    fn accepts_primitive_response_type() {
        let info = parse_response("@response 200 bool Whether it worked", span()).unwrap();
        assert_eq!(info.response_type.to_string(), "bool");
    }

    #[test]
    fn rejects_out_of_range_status() {
        let err = parse_response("@response 999 () Nope", span()).unwrap_err();
        assert!(err.to_string().contains("out of valid range"));
    }

    #[test]
    fn rejects_non_numeric_status() {
        let err = parse_response("@response HTTP_403 () Nope", span()).unwrap_err();
        assert!(err.to_string().contains("Invalid status code 'HTTP_403'"));
    }

    #[test]
    fn rejects_missing_description() {
        let err = parse_response("@response 200 Json<Resp>", span()).unwrap_err();
        assert!(err.to_string().contains("Missing description"));
    }

    #[test]
    fn rejects_description_in_type_position() {
        let err = parse_response("@response 404 item was not found", span()).unwrap_err();
        assert!(err.to_string().contains("Missing response type"));
    }

    #[test]
    fn rejects_invalid_type_syntax() {
        let err = parse_response("@response 200 Json<Resp>> Broken", span()).unwrap_err();
        assert!(err.to_string().contains("Invalid response type"));
    }

    #[test]
    fn rejects_bare_response_keyword() {
        let err = parse_response("@response", span()).unwrap_err();
        assert!(err.to_string().contains("Invalid @response annotation format"));
    }

    #[test]
    fn parses_example_expression() {
        let info = parse_example("@example 200 Resp::example()", span()).unwrap();
        assert_eq!(info.status_code, 200);
        assert!(info.example_code.to_string().contains("example"));
    }

    #[test]
    fn parses_struct_literal_example() {
        let info = parse_example("@example 200 Resp { label: 1, score: 0.5 }", span()).unwrap();
        assert!(info.example_code.to_string().contains("label"));
    }

    #[test]
    fn rejects_empty_example() {
        let err = parse_example("@example 200", span()).unwrap_err();
        assert!(err.to_string().contains("Invalid @example annotation format"));
    }

    #[test]
    fn parses_tags_with_dashes() {
        assert_eq!(parse_tag("@tag file-upload", span()).unwrap(), "file-upload");
    }

    #[test]
    fn rejects_empty_tag() {
        assert!(parse_tag("@tag", span()).is_err());
        assert!(parse_tag("@tag   ", span()).is_err());
    }

    #[test]
    fn parses_operation_id() {
        assert_eq!(parse_id("@id predict_language", span()).unwrap(), "predict_language");
    }

    #[test]
    fn rejects_operation_id_with_spaces() {
        let err = parse_id("@id predict language", span()).unwrap_err();
        assert!(err.to_string().contains("Invalid operation ID"));
    }
}
