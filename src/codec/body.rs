//! Inbound request body parsing.

use log::{debug, warn};
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::codec::error::HttpError;
use crate::codec::mime::{select_mime_type, MimeType};
use crate::codec::path::{deep_merge, unflatten, VariableTree};
use crate::codec::xml::read_tree;
use crate::wire::{InboundRequest, Method};

/// Correlation key the host adds to inbound URIs; never part of the data.
pub const CORRELATION_KEY: &str = "event_id";

/// A decoded request body together with the type that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBody {
    pub mime: MimeType,
    pub tree: VariableTree,
}

/// Decode `key=value&...` pairs and expand dotted keys into a tree.
///
/// `+` decodes to a space. A key seen more than once collects its values
/// into an array.
pub fn decode_form(input: &str) -> VariableTree {
    let mut pairs = Map::new();
    for (key, value) in form_urlencoded::parse(input.as_bytes()) {
        let value = Value::String(value.into_owned());
        match pairs.get_mut(&*key) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                pairs.insert(key.into_owned(), value);
            }
        }
    }
    unflatten(pairs)
}

/// The query string of a request as a tree. Empty when there is none.
pub fn parse_query(request: &InboundRequest) -> VariableTree {
    decode_form(request.query().unwrap_or_default())
}

/// Decode a non-empty body according to `mime`.
pub fn decode_body(body: &str, mime: MimeType) -> Result<VariableTree, HttpError> {
    debug!("decoding {} byte body as {mime}", body.len());
    match mime {
        MimeType::FormUrlEncoded => Ok(decode_form(body)),
        MimeType::Json => serde_json::from_str(body).map_err(|e| HttpError::UnparseableBody {
            mime,
            message: e.to_string(),
        }),
        MimeType::ApplicationXml | MimeType::TextXml => {
            read_tree(body).map_err(|e| HttpError::unparseable_xml(e.to_string()))
        }
    }
}

/// Parse an inbound request into a variable tree.
///
/// Only GET and POST are accepted. The query string is always decoded;
/// for a POST that declares a body, the body is decoded per its
/// negotiated Content-Type and the query tree is overlaid on the result.
/// Any decode failure aborts before merging. The correlation key is
/// removed from the top level of the result.
pub fn parse(request: &InboundRequest) -> Result<VariableTree, HttpError> {
    let mut tree = parse_tree(request)?;
    if let Some(map) = tree.as_object_mut() {
        map.shift_remove(CORRELATION_KEY);
    }
    Ok(tree)
}

/// Reject anything but GET and POST.
pub fn ensure_method(request: &InboundRequest) -> Result<(), HttpError> {
    match request.method() {
        Method::GET | Method::POST => Ok(()),
        other => Err(HttpError::MethodNotAllowed(other.to_string())),
    }
}

fn parse_tree(request: &InboundRequest) -> Result<VariableTree, HttpError> {
    ensure_method(request)?;

    let query = parse_query(request);
    if request.method() == Method::GET || !request.declares_body() {
        return Ok(query);
    }

    let Some(content_type) = request.get_header("Content-Type") else {
        return Err(HttpError::MissingContentType);
    };
    let Some(mime) = select_mime_type(Some(content_type)) else {
        return Err(HttpError::UnsupportedContentType);
    };

    let body = std::str::from_utf8(&request.body).map_err(|e| HttpError::UnparseableBody {
        mime,
        message: e.to_string(),
    })?;
    let body = body.trim();
    if body.is_empty() {
        return Ok(query);
    }

    let mut parsed = ParsedBody {
        mime,
        tree: decode_body(body, mime)?,
    };
    if parsed.tree.is_object() {
        deep_merge(&mut parsed.tree, query);
    } else {
        warn!("{} body decoded to a non-object; query string ignored", parsed.mime);
    }
    Ok(parsed.tree)
}
