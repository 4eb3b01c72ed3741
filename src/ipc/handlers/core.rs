use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "students": state.roster.list().len(),
        }),
    )
}

fn handle_reset(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.reset();
    tracing::info!("session state reset");
    ok(&req.id, json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "roster.reset" => Some(handle_reset(state, req)),
        _ => None,
    }
}
