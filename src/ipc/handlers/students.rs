use crate::ipc::error::{err, ok};
use crate::ipc::types::{today, AppState, Request};
use crate::model::{self, Grade, ModelError, Status, StudentDraft};
use crate::store::StoreError;
use serde_json::json;

/// Assemble a draft from flat request params. Required text fields must be
/// present; typed fields fall back to the draft defaults when omitted, the
/// same defaults a freshly opened form starts from.
fn draft_from_params(params: &serde_json::Value) -> Result<StudentDraft, (&'static str, String)> {
    let mut draft = StudentDraft::defaults(today());

    for (field, slot) in [
        ("name", &mut draft.name),
        ("email", &mut draft.email),
        ("course", &mut draft.course),
    ] {
        match params.get(field).and_then(|v| v.as_str()) {
            Some(v) => *slot = v.to_string(),
            None => return Err(("bad_params", format!("missing {}", field))),
        }
    }

    if let Some(v) = params.get("age") {
        draft.age = model::parse_age(v).map_err(|e| ("bad_params", e.to_string()))?;
    }
    if let Some(v) = params.get("grade") {
        let Some(s) = v.as_str() else {
            return Err(("bad_params", "grade must be a string".to_string()));
        };
        draft.grade = Grade::parse(s).map_err(|e| ("bad_params", e.to_string()))?;
    }
    if let Some(v) = params.get("status") {
        let Some(s) = v.as_str() else {
            return Err(("bad_params", "status must be a string".to_string()));
        };
        draft.status = Status::parse(s).map_err(|e| ("bad_params", e.to_string()))?;
    }
    if let Some(v) = params.get("enrollmentDate") {
        let Some(s) = v.as_str() else {
            return Err(("bad_params", "enrollmentDate must be a string".to_string()));
        };
        draft.enrollment_date = model::parse_date(s).map_err(|e| ("bad_params", e.to_string()))?;
    }
    if let Some(v) = params.get("notes") {
        let Some(s) = v.as_str() else {
            return Err(("bad_params", "notes must be a string".to_string()));
        };
        draft.notes = s.to_string();
    }

    Ok(draft)
}

fn store_error_code(e: &StoreError) -> &'static str {
    match e {
        StoreError::NotFound(_) => "not_found",
        StoreError::Invalid(ModelError::MissingField(_)) => "validation_failed",
        StoreError::Invalid(_) => "bad_params",
    }
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "students": state.roster.list() }))
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let draft = match draft_from_params(&req.params) {
        Ok(d) => d,
        Err((code, msg)) => return err(&req.id, code, msg, None),
    };

    match state.roster.create(&draft) {
        Ok(student) => {
            tracing::info!(id = %student.id, "student created");
            ok(&req.id, json!({ "student": student }))
        }
        Err(e) => err(&req.id, store_error_code(&e), e.to_string(), None),
    }
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_id = match req.params.get("studentId").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing studentId", None),
    };
    let draft = match draft_from_params(&req.params) {
        Ok(d) => d,
        Err((code, msg)) => return err(&req.id, code, msg, None),
    };

    match state.roster.update(&student_id, &draft) {
        Ok(student) => {
            tracing::info!(id = %student.id, "student updated");
            ok(&req.id, json!({ "student": student }))
        }
        Err(e) => err(&req.id, store_error_code(&e), e.to_string(), None),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_id = match req.params.get("studentId").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing studentId", None),
    };

    // Destructive intent: the caller must pass an affirmative confirmation.
    // A declined or absent confirmation leaves the roster untouched.
    let confirmed = req
        .params
        .get("confirm")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    if !confirmed {
        return err(
            &req.id,
            "confirm_required",
            "delete requires confirm: true",
            Some(json!({ "studentId": student_id })),
        );
    }

    match state.roster.delete(&student_id) {
        Ok(student) => {
            tracing::info!(id = %student.id, "student deleted");
            ok(&req.id, json!({ "deleted": student }))
        }
        Err(e) => err(&req.id, store_error_code(&e), e.to_string(), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_list(state, req)),
        "students.create" => Some(handle_create(state, req)),
        "students.update" => Some(handle_update(state, req)),
        "students.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
