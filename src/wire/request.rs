//! Inbound request representation and raw request parsing.

use std::collections::HashMap;
use std::str::FromStr;

use crate::wire::error::Error;
use crate::wire::method::Method;
use crate::wire::version::HttpVersion;

/// Represents an inbound HTTP request handed to an adapter.
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    /// The method token as received (any case)
    pub method: String,
    /// The request URI, absolute or origin-form, including any query string
    pub uri: String,
    /// The HTTP version
    pub version: HttpVersion,
    /// The HTTP headers
    pub headers: HashMap<String, String>,
    /// The request body
    pub body: Vec<u8>,
}

impl InboundRequest {
    /// Create a new request with no headers and an empty body.
    ///
    /// # Arguments
    ///
    /// * `method` - The method token
    /// * `uri` - The request URI
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// Add or replace a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// The classified request method.
    pub fn method(&self) -> Method {
        Method::parse(&self.method)
    }

    /// Get a header value.
    ///
    /// # Arguments
    ///
    /// * `name` - The header name
    ///
    /// # Returns
    ///
    /// The header value, if it exists
    pub fn get_header(&self, name: &str) -> Option<&str> {
        // Headers are case-insensitive, so we need to do a case-insensitive lookup
        self.headers.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                Some(v.as_str())
            } else {
                None
            }
        })
    }

    /// Check if a header exists.
    pub fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    /// Whether the request declares a body, either through `Content-Length`
    /// or chunked transfer encoding.
    pub fn declares_body(&self) -> bool {
        self.has_header("Content-Length")
            || self
                .get_header("Transfer-Encoding")
                .is_some_and(|te| te.trim().eq_ignore_ascii_case("chunked"))
    }

    /// The raw query string of the URI, without the leading `?` and
    /// without any fragment.
    pub fn query(&self) -> Option<&str> {
        let (_, rest) = self.uri.split_once('?')?;
        Some(rest.split_once('#').map_or(rest, |(query, _)| query))
    }
}

/// Parse an HTTP request from a byte slice.
///
/// The method token is not validated here; the adapters decide which
/// methods they accept.
///
/// # Arguments
///
/// * `input` - A byte slice containing the HTTP request to parse
///
/// # Returns
///
/// The parsed request, or an error if the request text is invalid
pub fn parse_request(input: &[u8]) -> Result<InboundRequest, Error> {
    if input.is_empty() {
        return Err(Error::EmptyRequest);
    }

    // Split the head from the body at the first blank line
    let (head, body) = split_head(input);

    let head = std::str::from_utf8(head).map_err(|_| Error::InvalidUtf8)?;

    let mut lines = head.lines();

    // Parse the request line
    let request_line = match lines.next() {
        Some(line) if !line.trim().is_empty() => line,
        _ => return Err(Error::EmptyRequest),
    };

    // Split the request line into method, uri, and version
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(Error::MalformedRequestLine(request_line.to_string()));
    }

    let version = HttpVersion::from_str(parts[2])?;

    // Parse the headers
    let mut headers = HashMap::new();
    for line in lines {
        if line.is_empty() {
            break;
        }

        let Some((name, value)) = line.split_once(':') else {
            return Err(Error::InvalidHeaderFormat(line.to_string()));
        };

        headers.insert(name.trim().to_string(), value.trim().to_string());
    }

    // Check for required headers
    if version.requires_host() && !headers.keys().any(|k| k.eq_ignore_ascii_case("Host")) {
        return Err(Error::MissingHeader("Host".to_string()));
    }

    Ok(InboundRequest {
        method: parts[0].to_string(),
        uri: parts[1].to_string(),
        version,
        headers,
        body: body.to_vec(),
    })
}

fn split_head(input: &[u8]) -> (&[u8], &[u8]) {
    if let Some(pos) = input.windows(4).position(|w| w == b"\r\n\r\n") {
        return (&input[..pos], &input[pos + 4..]);
    }
    if let Some(pos) = input.windows(2).position(|w| w == b"\n\n") {
        return (&input[..pos], &input[pos + 2..]);
    }
    (input, &[])
}
