use crate::form::{FormError, Submitted};
use crate::ipc::error::{err, ok};
use crate::ipc::types::{today, AppState, Request};
use crate::model::ModelError;
use crate::store::StoreError;
use serde_json::json;

fn form_error_code(e: &FormError) -> &'static str {
    match e {
        FormError::UnknownField(_) | FormError::ExpectedString { .. } => "bad_params",
        FormError::Invalid(_) => "bad_params",
        FormError::Store(StoreError::NotFound(_)) => "not_found",
        FormError::Store(StoreError::Invalid(ModelError::MissingField(_))) => "validation_failed",
        FormError::Store(StoreError::Invalid(_)) => "bad_params",
    }
}

fn handle_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.form.begin_create(today());
    ok(&req.id, json!({ "form": state.form.snapshot() }))
}

fn handle_toggle(state: &mut AppState, req: &Request) -> serde_json::Value {
    let open = state.form.toggle(today());
    ok(&req.id, json!({ "open": open, "form": state.form.snapshot() }))
}

fn handle_edit(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_id = match req.params.get("studentId").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing studentId", None),
    };
    let Some(student) = state.roster.get(&student_id).cloned() else {
        return err(
            &req.id,
            "not_found",
            format!("student not found: {}", student_id),
            None,
        );
    };
    state.form.begin_edit(&student);
    ok(&req.id, json!({ "form": state.form.snapshot() }))
}

fn handle_field(state: &mut AppState, req: &Request) -> serde_json::Value {
    let field = match req.params.get("field").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing field", None),
    };
    let Some(value) = req.params.get("value") else {
        return err(&req.id, "bad_params", "missing value", None);
    };

    match state.form.set_field(&field, value) {
        Ok(()) => ok(&req.id, json!({ "form": state.form.snapshot() })),
        Err(e) => err(&req.id, form_error_code(&e), e.to_string(), None),
    }
}

fn handle_submit(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.form.submit(&mut state.roster, today()) {
        Ok(outcome) => {
            let created = matches!(outcome, Submitted::Created(_));
            tracing::info!(
                id = %outcome.student().id,
                created,
                "form submitted"
            );
            ok(
                &req.id,
                json!({
                    "student": outcome.student(),
                    "created": created,
                    "form": state.form.snapshot(),
                }),
            )
        }
        // Rejected submits keep the draft so the caller can correct and retry.
        Err(e) => err(
            &req.id,
            form_error_code(&e),
            e.to_string(),
            Some(json!({ "form": state.form.snapshot() })),
        ),
    }
}

fn handle_cancel(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.form.cancel(today());
    ok(&req.id, json!({ "form": state.form.snapshot() }))
}

fn handle_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "form": state.form.snapshot() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "form.open" => Some(handle_open(state, req)),
        "form.toggle" => Some(handle_toggle(state, req)),
        "form.edit" => Some(handle_edit(state, req)),
        "form.field" => Some(handle_field(state, req)),
        "form.submit" => Some(handle_submit(state, req)),
        "form.cancel" => Some(handle_cancel(state, req)),
        "form.get" => Some(handle_get(state, req)),
        _ => None,
    }
}
