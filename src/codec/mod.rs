//! Content negotiation and field projection.
//!
//! This module holds the pieces shared by every inbound adapter: MIME
//! negotiation against a fixed registry, request body decoding, dotted
//! path projection, and response serialization. Everything here is a
//! pure function of its inputs.

mod body;
mod error;
mod mime;
mod path;
mod response;
mod serialize;
mod xml;

// Re-export public items
pub use body::{decode_body, decode_form, ensure_method, parse, parse_query, ParsedBody, CORRELATION_KEY};
pub use error::HttpError;
pub use mime::{best_match, select_mime_type, MediaRange, MimeType};
pub use path::{deep_merge, flatten, leaf_paths, lookup, unflatten, Projection, Slot, VariableTree};
pub use response::{HttpResponse, StatusCode};
pub use serialize::{
    is_falsy, respond, scalar_text, serialize, status_for, to_json, to_lines, to_xml, OutputFormat, Serialized,
    FALLBACK_CONTENT_TYPE, XML_ROOT,
};
pub use xml::{element_name, read_tree, XmlError, XmlWriter, TEXT_KEY};
