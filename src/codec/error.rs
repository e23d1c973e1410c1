//! Structured HTTP errors raised while reading an inbound request.

use thiserror::Error;

use crate::codec::mime::MimeType;
use crate::codec::response::{HttpResponse, StatusCode};

/// A request rejection. The `Display` text is the plain-text response body.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HttpError {
    /// Only GET and POST are accepted. Holds the upper-cased method.
    #[error("The {0} method is not allowed")]
    MethodNotAllowed(String),

    /// The Accept header matches no supported type.
    #[error("Not capable of generating content according to the Accept header")]
    NotAcceptable,

    /// A POST declared a body without saying what it is.
    #[error("Content-Type header is required")]
    MissingContentType,

    /// The Content-Type header matches no supported type.
    #[error("MIME type in Content-Type header is not supported. Use only {}.", MimeType::supported_list())]
    UnsupportedContentType,

    /// The body could not be decoded as the negotiated type.
    #[error("Body is not parsable as {mime} -- {message}")]
    UnparseableBody { mime: MimeType, message: String },

    /// The body is not well-formed XML. The message is already one line.
    #[error("Body does not contain XML or XML is unparseable -- {0}.")]
    UnparseableXml(String),
}

impl HttpError {
    /// Build the XML variant, folding line breaks out of the parser message.
    pub fn unparseable_xml(message: impl AsRef<str>) -> Self {
        let single_line = message.as_ref().replace("\r\n", " ").replace(['\r', '\n'], " ");
        HttpError::UnparseableXml(single_line)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::MethodNotAllowed(_) | HttpError::MissingContentType => {
                StatusCode::UnsupportedMediaType
            }
            HttpError::NotAcceptable | HttpError::UnsupportedContentType => StatusCode::NotAcceptable,
            HttpError::UnparseableBody { .. } | HttpError::UnparseableXml(_) => StatusCode::BadRequest,
        }
    }

    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![("Content-Type".to_string(), "text/plain".to_string())];
        if matches!(self, HttpError::MethodNotAllowed(_)) {
            headers.push(("Allow".to_string(), "GET, POST".to_string()));
        }
        headers
    }

    /// Render as a complete response, `Content-Length` included.
    pub fn into_response(self) -> HttpResponse {
        let mut response = HttpResponse::new(self.status());
        for (name, value) in self.headers() {
            response = response.with_header(name, value);
        }
        response.with_body_string(self.to_string())
    }
}
