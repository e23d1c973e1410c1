//! Verbose adapter: echoes every appended field back to the source.

use crate::codec::{leaf_paths, HttpError, HttpResponse, VariableTree};
use crate::inbound::config::PricePolicy;
use crate::inbound::feedback;
use crate::inbound::variables::{Variable, FEEDBACK_REQUEST, VERBOSE_RESPONSE};
use crate::wire::InboundRequest;

pub const NAME: &str = "Standard Verbose";

/// Fields that always follow the appended ones.
pub const TRAILING_FIELDS: [&str; 4] = ["outcome", "reason", "lead.id", "price"];

/// Same request handling as the feedback adapter.
pub fn request(req: &InboundRequest) -> Result<VariableTree, HttpError> {
    feedback::request(req)
}

/// Every leaf under `appended` (arrays kept whole), then the trailing fields.
pub fn field_list(vars: &VariableTree) -> Vec<String> {
    let mut fields = match vars.get("appended") {
        Some(appended) if !appended.is_null() => leaf_paths("appended", appended),
        _ => Vec::new(),
    };
    fields.extend(TRAILING_FIELDS.iter().map(|f| f.to_string()));
    fields
}

pub fn response(req: &InboundRequest, vars: &VariableTree) -> HttpResponse {
    feedback::respond_with(req, vars, &field_list(vars), &PricePolicy::VERBOSE)
}

pub fn request_variables() -> &'static [Variable] {
    &FEEDBACK_REQUEST
}

pub fn response_variables() -> &'static [Variable] {
    &VERBOSE_RESPONSE
}
