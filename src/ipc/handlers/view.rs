use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::query::{self, StatusFilter};
use serde_json::json;

/// Current filtered view plus an echo of the filters that produced it, so the
/// presentation layer can bind its controls without tracking them itself.
fn view_payload(state: &AppState) -> serde_json::Value {
    let visible = query::filter(
        state.roster.list(),
        &state.search_term,
        state.status_filter,
    );
    json!({
        "students": visible,
        "searchTerm": state.search_term,
        "statusFilter": state.status_filter.as_str(),
    })
}

fn handle_search(state: &mut AppState, req: &Request) -> serde_json::Value {
    let term = match req.params.get("term").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing term", None),
    };
    state.search_term = term;
    ok(&req.id, view_payload(state))
}

fn handle_status_filter(state: &mut AppState, req: &Request) -> serde_json::Value {
    let raw = match req.params.get("status").and_then(|v| v.as_str()) {
        Some(v) => v,
        None => return err(&req.id, "bad_params", "missing status", None),
    };
    let status = match StatusFilter::parse(raw) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "bad_params", e.to_string(), None),
    };
    state.status_filter = status;
    ok(&req.id, view_payload(state))
}

fn handle_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, view_payload(state))
}

fn handle_stats(state: &mut AppState, req: &Request) -> serde_json::Value {
    let stats = query::stats(state.roster.list());
    ok(&req.id, json!({ "stats": stats }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "view.search" => Some(handle_search(state, req)),
        "view.statusFilter" => Some(handle_status_filter(state, req)),
        "view.get" => Some(handle_get(state, req)),
        "stats.get" => Some(handle_stats(state, req)),
        _ => None,
    }
}
