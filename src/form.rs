use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::model::{self, ModelError, Status, Student, StudentDraft};
use crate::store::{Roster, StoreError};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown form field: {0}")]
    UnknownField(String),
    #[error("field {field} expects a string value")]
    ExpectedString { field: &'static str },
    #[error(transparent)]
    Invalid(#[from] ModelError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of a successful submit; tells the caller whether the record was
/// appended or replaced in place.
#[derive(Debug, PartialEq, Eq)]
pub enum Submitted {
    Created(Student),
    Updated(Student),
}

impl Submitted {
    pub fn student(&self) -> &Student {
        match self {
            Submitted::Created(s) | Submitted::Updated(s) => s,
        }
    }
}

/// Lifecycle of the single in-progress create/edit operation. Idle until a
/// form opens; while open it holds the draft and, for edits, the target id.
pub struct FormController {
    open: bool,
    editing: Option<String>,
    draft: StudentDraft,
}

impl FormController {
    pub fn new(today: NaiveDate) -> Self {
        FormController {
            open: false,
            editing: None,
            draft: StudentDraft::defaults(today),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn draft(&self) -> &StudentDraft {
        &self.draft
    }

    /// Open the form for a new record with a default draft.
    pub fn begin_create(&mut self, today: NaiveDate) {
        self.draft = StudentDraft::defaults(today);
        self.editing = None;
        self.open = true;
    }

    /// Open the form pre-filled from an existing record, holding its id aside
    /// so submit replaces instead of appending.
    pub fn begin_edit(&mut self, student: &Student) {
        self.draft = StudentDraft::from_student(student);
        self.editing = Some(student.id.clone());
        self.open = true;
    }

    /// The Add/Cancel button: opens a fresh create form when idle, discards
    /// the draft when a form is showing.
    pub fn toggle(&mut self, today: NaiveDate) -> bool {
        if self.open {
            self.cancel(today);
        } else {
            self.begin_create(today);
        }
        self.open
    }

    /// Merge a single field change into the draft. Typed fields (age, grade,
    /// status, enrollmentDate) go through explicit parses; on a parse error
    /// the draft keeps its previous value.
    pub fn set_field(&mut self, field: &str, value: &Value) -> Result<(), FormError> {
        fn text(field: &'static str, value: &Value) -> Result<String, FormError> {
            value
                .as_str()
                .map(str::to_string)
                .ok_or(FormError::ExpectedString { field })
        }

        match field {
            "name" => self.draft.name = text("name", value)?,
            "email" => self.draft.email = text("email", value)?,
            "course" => self.draft.course = text("course", value)?,
            "notes" => self.draft.notes = text("notes", value)?,
            "age" => self.draft.age = model::parse_age(value)?,
            "grade" => self.draft.grade = model::Grade::parse(&text("grade", value)?)?,
            "status" => self.draft.status = Status::parse(&text("status", value)?)?,
            "enrollmentDate" => {
                self.draft.enrollment_date = model::parse_date(&text("enrollmentDate", value)?)?
            }
            other => return Err(FormError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    /// Apply the draft to the roster: update when an edit target is held,
    /// create otherwise. On success the controller resets to idle with a
    /// default draft; on failure the draft is retained for correction.
    pub fn submit(&mut self, roster: &mut Roster, today: NaiveDate) -> Result<Submitted, FormError> {
        let outcome = match &self.editing {
            Some(id) => Submitted::Updated(roster.update(id, &self.draft)?),
            None => Submitted::Created(roster.create(&self.draft)?),
        };
        self.cancel(today);
        Ok(outcome)
    }

    /// Reset to idle, discarding any unsaved changes.
    pub fn cancel(&mut self, today: NaiveDate) {
        self.draft = StudentDraft::defaults(today);
        self.editing = None;
        self.open = false;
    }

    /// View-model for controlled-input binding in the presentation layer.
    pub fn snapshot(&self) -> Value {
        json!({
            "open": self.open,
            "editingId": self.editing,
            "draft": self.draft,
        })
    }
}
