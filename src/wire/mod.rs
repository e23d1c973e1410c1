//! Raw request module.
//!
//! Turns captured HTTP/1.x request text into an [`InboundRequest`] that the
//! adapters consume. Nothing here performs I/O.

mod request;
mod method;
mod version;
mod error;
mod tests;

// Re-export public items
pub use request::InboundRequest;
pub use method::Method;
pub use version::HttpVersion;
pub use error::Error;

// Re-export the parse_request function
pub use request::parse_request;
