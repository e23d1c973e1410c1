//! General-purpose feedback adapter.
//!
//! Requests go through the full negotiation and body parsing pipeline.
//! Responses project the variables onto a field list and encode them in
//! whatever type the Accept header negotiates.

use log::{debug, warn};

use crate::codec::{self, select_mime_type, HttpError, HttpResponse, Projection, VariableTree};
use crate::inbound::config::PricePolicy;
use crate::inbound::variables::{Variable, FEEDBACK_REQUEST, FEEDBACK_RESPONSE};
use crate::wire::InboundRequest;

pub const NAME: &str = "Standard Feedback";

/// Fields returned when the caller does not supply its own list.
pub const DEFAULT_FIELDS: [&str; 8] = [
    "outcome",
    "reason",
    "lead.id",
    "lead.first_name",
    "lead.last_name",
    "lead.email",
    "lead.phone_1",
    "price",
];

/// Read an inbound feedback request into variables.
///
/// Fails when the method is not GET/POST, when nothing acceptable can be
/// produced for the Accept header, or when the body cannot be decoded.
pub fn request(req: &InboundRequest) -> Result<VariableTree, HttpError> {
    codec::ensure_method(req)
        .and_then(|()| match select_mime_type(req.get_header("Accept")) {
            Some(_) => codec::parse(req),
            None => Err(HttpError::NotAcceptable),
        })
        .inspect_err(|e| warn!("rejecting {} {}: {e}", req.method, req.uri))
}

/// Build the response for `vars`, projecting `fields` or [`DEFAULT_FIELDS`].
pub fn response(req: &InboundRequest, vars: &VariableTree, fields: Option<&[&str]>) -> HttpResponse {
    respond_with(req, vars, fields.unwrap_or(&DEFAULT_FIELDS), &PricePolicy::FEEDBACK)
}

/// Project, apply the price policy, and serialize per the Accept header.
pub fn respond_with<S: AsRef<str>>(
    req: &InboundRequest,
    vars: &VariableTree,
    fields: &[S],
    policy: &PricePolicy,
) -> HttpResponse {
    let mime = select_mime_type(req.get_header("Accept"));
    let mut projection = Projection::project(vars, fields);
    policy.apply(&mut projection);
    debug!("responding with {} fields as {mime:?}", fields.len());
    codec::respond(&projection, mime)
}

pub fn request_variables() -> &'static [Variable] {
    &FEEDBACK_REQUEST
}

pub fn response_variables() -> &'static [Variable] {
    &FEEDBACK_RESPONSE
}
