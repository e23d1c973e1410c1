//! A common face for the inbound adapters so a host can route to them.

use crate::codec::{HttpError, HttpResponse, VariableTree};
use crate::inbound::variables::Variable;
use crate::inbound::{classic, feedback, verbose};
use crate::wire::InboundRequest;

/// An inbound adapter: request in, variables out; variables in, response out.
pub trait InboundAdapter: Send + Sync {
    /// Display name of the adapter.
    fn name(&self) -> &'static str;

    /// Read an inbound request into variables.
    fn request(&self, req: &InboundRequest) -> Result<VariableTree, HttpError>;

    /// Answer the request that produced `vars`.
    fn response(&self, req: &InboundRequest, vars: &VariableTree) -> HttpResponse;

    fn request_variables(&self) -> &'static [Variable];

    fn response_variables(&self) -> &'static [Variable];

    /// Run the request side and, on success, hand the variables to
    /// `process` before answering. Rejections are rendered as responses.
    fn handle(&self, req: &InboundRequest, process: &dyn Fn(VariableTree) -> VariableTree) -> HttpResponse {
        match self.request(req) {
            Ok(vars) => self.response(req, &process(vars)),
            Err(e) => e.into_response(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Classic;

#[derive(Debug, Clone, Copy, Default)]
pub struct Feedback;

#[derive(Debug, Clone, Copy, Default)]
pub struct Verbose;

impl InboundAdapter for Classic {
    fn name(&self) -> &'static str {
        classic::NAME
    }

    fn request(&self, req: &InboundRequest) -> Result<VariableTree, HttpError> {
        classic::request(req)
    }

    fn response(&self, req: &InboundRequest, vars: &VariableTree) -> HttpResponse {
        classic::response(req, vars)
    }

    fn request_variables(&self) -> &'static [Variable] {
        classic::request_variables()
    }

    fn response_variables(&self) -> &'static [Variable] {
        classic::response_variables()
    }
}

impl InboundAdapter for Feedback {
    fn name(&self) -> &'static str {
        feedback::NAME
    }

    fn request(&self, req: &InboundRequest) -> Result<VariableTree, HttpError> {
        feedback::request(req)
    }

    fn response(&self, req: &InboundRequest, vars: &VariableTree) -> HttpResponse {
        feedback::response(req, vars, None)
    }

    fn request_variables(&self) -> &'static [Variable] {
        feedback::request_variables()
    }

    fn response_variables(&self) -> &'static [Variable] {
        feedback::response_variables()
    }
}

impl InboundAdapter for Verbose {
    fn name(&self) -> &'static str {
        verbose::NAME
    }

    fn request(&self, req: &InboundRequest) -> Result<VariableTree, HttpError> {
        verbose::request(req)
    }

    fn response(&self, req: &InboundRequest, vars: &VariableTree) -> HttpResponse {
        verbose::response(req, vars)
    }

    fn request_variables(&self) -> &'static [Variable] {
        verbose::request_variables()
    }

    fn response_variables(&self) -> &'static [Variable] {
        verbose::response_variables()
    }
}

/// Every adapter, in a stable order.
pub static ADAPTERS: [&dyn InboundAdapter; 3] = [&Classic, &Feedback, &Verbose];

/// Look up an adapter by its display name, ignoring case.
pub fn find_adapter(name: &str) -> Option<&'static dyn InboundAdapter> {
    ADAPTERS.iter().copied().find(|adapter| adapter.name().eq_ignore_ascii_case(name))
}
