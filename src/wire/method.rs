//! HTTP request methods.

use std::fmt;

/// HTTP request methods as seen by the inbound adapters.
///
/// Only `GET` and `POST` are accepted; every other token is carried
/// verbatim so the rejection can name it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method: all data arrives in the query string.
    GET,
    /// POST method: data arrives in the body and/or the query string.
    POST,
    /// Any other method token, upper-cased.
    Other(String),
}

impl Method {
    /// Classify a method token, ignoring ASCII case.
    pub fn parse(token: &str) -> Self {
        if token.eq_ignore_ascii_case("GET") {
            Method::GET
        } else if token.eq_ignore_ascii_case("POST") {
            Method::POST
        } else {
            Method::Other(token.to_ascii_uppercase())
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::GET => write!(f, "GET"),
            Method::POST => write!(f, "POST"),
            Method::Other(token) => write!(f, "{token}"),
        }
    }
}
