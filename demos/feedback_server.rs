//! Serve the inbound adapters over plain TCP.
//!
//! `/classic`, `/feedback` and `/verbose` route to the matching adapter.
//! Every accepted request is answered with a `success` outcome.
//!
//! Set `LEAD_ADAPTERS_ADDR` to change the bind address and `RUST_LOG` to
//! see negotiation and parsing decisions.

use std::env;

use lead_adapters::codec::{HttpResponse, StatusCode, VariableTree};
use lead_adapters::inbound::{Classic, Feedback, InboundAdapter, Verbose};
use lead_adapters::parse_request;
use log::{error, info, warn};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const DEFAULT_ADDR: &str = "127.0.0.1:8080";
const READ_BUFFER_SIZE: usize = 8192;

fn adapter_for(path: &str) -> Option<&'static dyn InboundAdapter> {
    match path {
        "/classic" => Some(&Classic),
        "/feedback" => Some(&Feedback),
        "/verbose" => Some(&Verbose),
        _ => None,
    }
}

fn accept(mut vars: VariableTree) -> VariableTree {
    if let Value::Object(map) = &mut vars {
        map.entry("outcome").or_insert_with(|| json!("success"));
    }
    vars
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::new(StatusCode::BadRequest)
        .with_content_type("text/plain")
        .with_body_string(message)
}

fn answer(raw: &[u8]) -> HttpResponse {
    let request = match parse_request(raw) {
        Ok(request) => request,
        Err(e) => {
            warn!("Error parsing request: {e}");
            return bad_request(format!("Error parsing request: {e}"));
        }
    };

    let path = request.uri.split('?').next().unwrap_or_default();
    match adapter_for(path) {
        Some(adapter) => {
            info!("{} {} -> {}", request.method, request.uri, adapter.name());
            adapter.handle(&request, &accept)
        }
        None => bad_request(format!("No adapter at {path}")),
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let addr = env::var("LEAD_ADAPTERS_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{addr}");

    loop {
        let (mut socket, peer) = listener.accept().await?;

        tokio::spawn(async move {
            let mut buf = vec![0; READ_BUFFER_SIZE];
            let n = match socket.read(&mut buf).await {
                Ok(0) => return,
                Ok(n) => n,
                Err(e) => {
                    error!("Error reading from {peer}: {e}");
                    return;
                }
            };

            let response = answer(&buf[..n]);
            info!("{peer} <- {} {}", response.status.as_u16(), response.status.reason_phrase());
            if let Err(e) = socket.write_all(&response.to_bytes()).await {
                error!("Error writing to {peer}: {e}");
            }
        });
    }
}
