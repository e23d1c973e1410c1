//! Response serialization for projected field trees.

use serde_json::{Number, Value};

use crate::codec::mime::MimeType;
use crate::codec::path::{Projection, Slot};
use crate::codec::response::{HttpResponse, StatusCode};
use crate::codec::xml::XmlWriter;

/// Root element of every structured XML response.
pub const XML_ROOT: &str = "result";

/// Content type used when negotiation found no structured type.
pub const FALLBACK_CONTENT_TYPE: &str = "text/plain";

/// The three output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Xml,
    Lines,
}

impl From<Option<MimeType>> for OutputFormat {
    fn from(mime: Option<MimeType>) -> Self {
        match mime {
            Some(MimeType::Json) => OutputFormat::Json,
            Some(MimeType::ApplicationXml | MimeType::TextXml) => OutputFormat::Xml,
            Some(MimeType::FormUrlEncoded) | None => OutputFormat::Lines,
        }
    }
}

/// A serialized body and the content type it was produced for.
#[derive(Debug, Clone, PartialEq)]
pub struct Serialized {
    pub body: String,
    pub content_type: &'static str,
}

/// Text of a scalar the way it is written into XML and line bodies.
///
/// Integral floats drop their fractional part.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

/// Values that render as nothing in line bodies and legacy XML.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Compact JSON in declared field order. Missing fields are omitted.
pub fn to_json(projection: &Projection) -> String {
    projection.to_json().to_string()
}

/// Indented XML under a `<result>` root. Missing fields self-close.
pub fn to_xml(projection: &Projection) -> String {
    let mut writer = XmlWriter::new();
    writer.raw(0, r#"<?xml version="1.0"?>"#);
    writer.projection(0, XML_ROOT, projection);
    writer.finish()
}

/// One `name:value` line per leaf field.
///
/// Every character of the field name is written as `_`, and falsy or
/// missing values are written as nothing.
pub fn to_lines(projection: &Projection) -> String {
    projection
        .leaves()
        .into_iter()
        .map(|(path, slot)| {
            let name = "_".repeat(path.chars().count());
            let value = match slot {
                Slot::Value(value) if !is_falsy(value) => scalar_text(value),
                _ => String::new(),
            };
            format!("{name}:{value}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Encode a projection for the negotiated output type.
pub fn serialize(projection: &Projection, mime: Option<MimeType>) -> Serialized {
    let body = match OutputFormat::from(mime) {
        OutputFormat::Json => to_json(projection),
        OutputFormat::Xml => to_xml(projection),
        OutputFormat::Lines => to_lines(projection),
    };
    Serialized {
        body,
        content_type: mime.map_or(FALLBACK_CONTENT_TYPE, |m| m.as_str()),
    }
}

/// 409 when the projected `reason` mentions "forbidden" in any case,
/// otherwise 201.
pub fn status_for(projection: &Projection) -> StatusCode {
    match projection.value("reason") {
        Some(Value::String(reason)) if reason.to_lowercase().contains("forbidden") => StatusCode::Conflict,
        _ => StatusCode::Created,
    }
}

/// Serialize and wrap in a response with exact `Content-Length`.
pub fn respond(projection: &Projection, mime: Option<MimeType>) -> HttpResponse {
    let Serialized { body, content_type } = serialize(projection, mime);
    HttpResponse::new(status_for(projection))
        .with_content_type(content_type)
        .with_body_string(body)
}
