use uuid::Uuid;

use crate::model::{ModelError, Student, StudentDraft};

/// Source of fresh record ids. Injectable so tests can run with a
/// deterministic counter while production uses random UUIDs.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic counter for unit tests; production ids come from `UuidIds`.
#[cfg(test)]
pub struct SequentialIds {
    next: u64,
}

#[cfg(test)]
impl SequentialIds {
    pub fn new() -> Self {
        SequentialIds { next: 1 }
    }
}

#[cfg(test)]
impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("s-{}", self.next);
        self.next += 1;
        id
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("student not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Invalid(#[from] ModelError),
}

/// Authoritative ordered collection of students. The only writer; every
/// mutation path goes through create/update/delete below.
pub struct Roster {
    students: Vec<Student>,
    ids: Box<dyn IdSource + Send>,
}

impl Roster {
    pub fn new(ids: Box<dyn IdSource + Send>) -> Self {
        Roster {
            students: Vec::new(),
            ids,
        }
    }

    pub fn with_uuid_ids() -> Self {
        Roster::new(Box::new(UuidIds))
    }

    /// Validates the draft, assigns a fresh unique id, and appends the new
    /// record. Insertion order is the only order the roster has.
    pub fn create(&mut self, draft: &StudentDraft) -> Result<Student, StoreError> {
        draft.validate()?;
        let mut id = self.ids.next_id();
        // A well-behaved source never repeats, but uniqueness is an invariant
        // of the collection, so check against the live records anyway.
        while self.students.iter().any(|s| s.id == id) {
            id = self.ids.next_id();
        }
        let student = draft.to_student(id);
        self.students.push(student.clone());
        Ok(student)
    }

    /// Full field replacement preserving id and position. A missing id is an
    /// explicit error, never a silent no-op.
    pub fn update(&mut self, id: &str, draft: &StudentDraft) -> Result<Student, StoreError> {
        draft.validate()?;
        let Some(slot) = self.students.iter_mut().find(|s| s.id == id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };
        *slot = draft.to_student(id.to_string());
        Ok(slot.clone())
    }

    /// Removes exactly the matching record and returns it. Confirmation of
    /// destructive intent is the caller's responsibility.
    pub fn delete(&mut self, id: &str) -> Result<Student, StoreError> {
        let Some(pos) = self.students.iter().position(|s| s.id == id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };
        Ok(self.students.remove(pos))
    }

    pub fn get(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn list(&self) -> &[Student] {
        &self.students
    }
}
