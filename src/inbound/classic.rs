//! Classic adapter: a fixed legacy XML document, whatever the Accept header.

use serde_json::Value;

use crate::codec::{is_falsy, lookup, scalar_text, HttpError, HttpResponse, StatusCode, VariableTree, XmlWriter};
use crate::inbound::config::{ClassicConfig, PricePolicy};
use crate::inbound::feedback;
use crate::inbound::variables::{Variable, FEEDBACK_REQUEST, FEEDBACK_RESPONSE};
use crate::wire::InboundRequest;

pub const NAME: &str = "Standard Classic";

pub const CONTENT_TYPE: &str = "application/xml";

/// Same request handling as the feedback adapter.
pub fn request(req: &InboundRequest) -> Result<VariableTree, HttpError> {
    feedback::request(req)
}

/// Build the legacy response with the default configuration.
pub fn response(_req: &InboundRequest, vars: &VariableTree) -> HttpResponse {
    response_with(&ClassicConfig::default(), vars)
}

pub fn response_with(config: &ClassicConfig, vars: &VariableTree) -> HttpResponse {
    HttpResponse::new(StatusCode::Created)
        .with_content_type(CONTENT_TYPE)
        .with_body_string(build_xml(config, vars))
}

fn element(xml: &mut XmlWriter, name: &str, value: Option<&Value>) {
    match value {
        Some(value) => xml.value(1, name, value),
        None => xml.empty(1, name),
    }
}

fn build_xml(config: &ClassicConfig, vars: &VariableTree) -> String {
    let outcome = lookup(vars, "outcome");
    let lead_id = lookup(vars, "lead.id");
    let link = format!("{}{}", config.lead_url_base, lead_id.map(scalar_text).unwrap_or_default());
    let price = PricePolicy::CLASSIC.resolve(outcome, lookup(vars, "price"));

    let mut xml = XmlWriter::new();
    xml.raw(0, format!(r#"<!DOCTYPE response SYSTEM "{}">"#, config.dtd_url));
    xml.open(0, "response");
    element(&mut xml, "result", outcome);
    // reason only appears when there is one
    if let Some(reason) = lookup(vars, "reason").filter(|r| !is_falsy(r)) {
        xml.value(1, "reason", reason);
    }
    element(&mut xml, "leadId", lead_id);
    xml.open(1, "url");
    xml.cdata(2, &link);
    xml.close(1, "url");
    element(&mut xml, "price", price.as_ref().filter(|p| !is_falsy(p)));
    xml.close(0, "response");
    xml.finish()
}

pub fn request_variables() -> &'static [Variable] {
    &FEEDBACK_REQUEST
}

pub fn response_variables() -> &'static [Variable] {
    &FEEDBACK_RESPONSE
}
