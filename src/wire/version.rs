//! HTTP protocol versions.

use std::fmt;
use std::str::FromStr;

use crate::wire::error::Error;

/// Protocol versions a captured request may carry.
///
/// Hosts that record requests as plain objects store the bare number
/// (`"1.1"`), so both that form and the request-line form
/// (`"HTTP/1.1"`) are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpVersion {
    Http10,
    #[default]
    Http11,
    Http20,
}

impl HttpVersion {
    /// The bare version number, e.g. `"1.1"`.
    pub fn number(&self) -> &'static str {
        match self {
            HttpVersion::Http10 => "1.0",
            HttpVersion::Http11 => "1.1",
            HttpVersion::Http20 => "2",
        }
    }

    /// Only HTTP/1.1 makes the `Host` header mandatory.
    pub fn requires_host(&self) -> bool {
        matches!(self, HttpVersion::Http11)
    }
}

impl FromStr for HttpVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s.strip_prefix("HTTP/").unwrap_or(s);
        match number {
            "1.0" => Ok(HttpVersion::Http10),
            "1.1" => Ok(HttpVersion::Http11),
            "2" | "2.0" => Ok(HttpVersion::Http20),
            _ => Err(Error::InvalidVersion(s.to_string())),
        }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP/{}", self.number())
    }
}
