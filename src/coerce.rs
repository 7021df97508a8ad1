//! Coercion of raw string values (query, path, header, cookie, form text)
//! into typed JSON, driven by the target type's JSON schema.
//!
//! Only properties declared as `integer`, `number` or `boolean` are parsed;
//! everything else stays a string. A value that does not parse is left as a
//! string so deserialization reports the type error against the field.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use axum::http::{header, HeaderMap};
use schemars::JsonSchema;
use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scalar {
    Integer,
    Number,
    Boolean,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldKind {
    pub scalar: Scalar,
    /// Repeated keys collect into an array.
    pub list: bool,
}

impl FieldKind {
    const TEXT: Self = Self {
        scalar: Scalar::Text,
        list: false,
    };
}

type Kinds = Arc<HashMap<String, FieldKind>>;

/// Property name → declared kind, read from the root schema of `T`.
/// Computed once per schema id.
pub(crate) fn property_kinds<T: JsonSchema>() -> Kinds {
    static CACHE: OnceLock<RwLock<HashMap<Cow<'static, str>, Kinds>>> = OnceLock::new();
    let cache = CACHE.get_or_init(Default::default);
    let id = T::schema_id();

    if let Some(kinds) = cache.read().ok().and_then(|kinds| kinds.get(&id).cloned()) {
        return kinds;
    }

    let kinds = Arc::new(read_property_kinds::<T>());
    if let Ok(mut cached) = cache.write() {
        cached.insert(id, Arc::clone(&kinds));
    }
    kinds
}

fn read_property_kinds<T: JsonSchema>() -> HashMap<String, FieldKind> {
    let schema = schemars::schema_for!(T);
    let Ok(value) = serde_json::to_value(&schema) else {
        return HashMap::new();
    };

    value
        .get("properties")
        .and_then(Value::as_object)
        .map(|properties| {
            properties
                .iter()
                .map(|(name, property)| (name.clone(), field_kind(property)))
                .collect()
        })
        .unwrap_or_default()
}

fn declared_types(schema: &Value) -> Vec<&str> {
    match schema.get("type") {
        Some(Value::String(kind)) => vec![kind.as_str()],
        Some(Value::Array(kinds)) => kinds.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn scalar_of(schema: &Value) -> Scalar {
    let types = declared_types(schema);
    if types.contains(&"integer") {
        Scalar::Integer
    } else if types.contains(&"number") {
        Scalar::Number
    } else if types.contains(&"boolean") {
        Scalar::Boolean
    } else {
        Scalar::Text
    }
}

fn field_kind(schema: &Value) -> FieldKind {
    if declared_types(schema).contains(&"array") {
        let scalar = schema.get("items").map_or(Scalar::Text, scalar_of);
        FieldKind { scalar, list: true }
    } else {
        FieldKind {
            scalar: scalar_of(schema),
            list: false,
        }
    }
}

pub(crate) fn coerce_as(scalar: Scalar, raw: &str) -> Value {
    let trimmed = raw.trim();
    match scalar {
        Scalar::Integer => {
            if let Ok(n) = trimmed.parse::<i64>() {
                return Value::Number(n.into());
            }
            if let Ok(n) = trimmed.parse::<u64>() {
                return Value::Number(n.into());
            }
        }
        Scalar::Number => {
            if let Some(n) = trimmed
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .and_then(Number::from_f64)
            {
                return Value::Number(n);
            }
        }
        Scalar::Boolean => match trimmed.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => return Value::Bool(true),
            "false" | "0" | "no" | "off" => return Value::Bool(false),
            _ => {}
        },
        Scalar::Text => {}
    }
    Value::String(raw.to_string())
}

/// Build a JSON object for `T` from raw key/value pairs.
///
/// For scalar fields the last occurrence of a key wins.
pub(crate) fn coerce_pairs<T, I>(pairs: I) -> Value
where
    T: JsonSchema,
    I: IntoIterator<Item = (String, String)>,
{
    let kinds = property_kinds::<T>();
    let mut map = Map::new();

    for (key, raw) in pairs {
        let kind = kinds.get(&key).copied().unwrap_or(FieldKind::TEXT);
        let value = coerce_as(kind.scalar, &raw);

        if kind.list {
            match map.entry(key).or_insert_with(|| Value::Array(Vec::new())) {
                Value::Array(items) => items.push(value),
                other => *other = Value::Array(vec![value]),
            }
        } else {
            map.insert(key, value);
        }
    }

    Value::Object(map)
}

/// Cookie name/value pairs from every `Cookie` header. Names are kept as-is.
pub(crate) fn cookie_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|line| line.split(';'))
        .map(str::trim)
        .filter(|cookie| !cookie.is_empty())
        .map(|cookie| match cookie.split_once('=') {
            Some((name, value)) => (name.trim().to_string(), value.trim().to_string()),
            None => (cookie.to_string(), String::new()),
        })
        .collect()
}

/// Header pairs with names normalised for field matching:
/// `Content-Type` → `content_type`. Non-UTF-8 values are skipped.
pub(crate) fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let value = value.to_str().ok()?;
            Some((name.as_str().replace('-', "_"), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use schemars::JsonSchema;

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    struct Params {
        uid: String,
        limit: i64,
        ratio: f64,
        vip: bool,
        maybe: Option<u32>,
        ids: Vec<i64>,
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn reads_declared_kinds() {
        let kinds = property_kinds::<Params>();
        assert_eq!(kinds["uid"], FieldKind::TEXT);
        assert_eq!(kinds["limit"].scalar, Scalar::Integer);
        assert_eq!(kinds["ratio"].scalar, Scalar::Number);
        assert_eq!(kinds["vip"].scalar, Scalar::Boolean);
        assert_eq!(kinds["maybe"].scalar, Scalar::Integer);
        assert!(kinds["ids"].list);
        assert_eq!(kinds["ids"].scalar, Scalar::Integer);
    }

    #[test]
    fn kinds_are_computed_once_per_type() {
        let first = property_kinds::<Params>();
        let second = property_kinds::<Params>();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn numeric_looking_strings_stay_strings() {
        let value = coerce_pairs::<Params, _>(pairs(&[("uid", "12"), ("limit", "12")]));
        assert_eq!(value["uid"], Value::String("12".into()));
        assert_eq!(value["limit"], Value::from(12));
    }

    #[test]
    fn coerces_numbers_and_booleans() {
        let value = coerce_pairs::<Params, _>(pairs(&[
            ("ratio", "0.25"),
            ("vip", "False"),
            ("maybe", "7"),
        ]));
        assert_eq!(value["ratio"], Value::from(0.25));
        assert_eq!(value["vip"], Value::Bool(false));
        assert_eq!(value["maybe"], Value::from(7));
    }

    #[test]
    fn unparsable_values_are_left_as_strings() {
        let value = coerce_pairs::<Params, _>(pairs(&[("limit", "ten"), ("vip", "maybe")]));
        assert_eq!(value["limit"], Value::String("ten".into()));
        assert_eq!(value["vip"], Value::String("maybe".into()));
    }

    #[test]
    fn repeated_keys_collect_for_lists_only() {
        let value = coerce_pairs::<Params, _>(pairs(&[
            ("ids", "1"),
            ("ids", "2"),
            ("limit", "1"),
            ("limit", "2"),
        ]));
        assert_eq!(value["ids"], serde_json::json!([1, 2]));
        assert_eq!(value["limit"], Value::from(2));
    }

    #[test]
    fn unknown_keys_pass_through_as_text() {
        let value = coerce_pairs::<Params, _>(pairs(&[("text", "hello")]));
        assert_eq!(value["text"], Value::String("hello".into()));
    }

    #[test]
    fn parses_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("key=hello; theme = dark"));
        headers.append(header::COOKIE, HeaderValue::from_static("flag;"));
        let cookies = cookie_pairs(&headers);
        assert_eq!(
            cookies,
            pairs(&[("key", "hello"), ("theme", "dark"), ("flag", "")])
        );
    }

    #[test]
    fn normalises_header_names() {
        let mut headers = HeaderMap::new();
        headers.insert("lang", HeaderValue::from_static("zh-CN"));
        headers.insert("x-request-id", HeaderValue::from_static("abc"));
        let mut found = header_pairs(&headers);
        found.sort();
        assert_eq!(found, pairs(&[("lang", "zh-CN"), ("x_request_id", "abc")]));
    }
}
