use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Enrollment lifecycle of a student. Closed set; stored and transmitted as
/// the lowercase strings the UI already uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
    Graduated,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
            Status::Graduated => "graduated",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        match raw {
            "active" => Ok(Status::Active),
            "inactive" => Ok(Status::Inactive),
            "graduated" => Ok(Status::Graduated),
            other => Err(ModelError::UnknownStatus(other.to_string())),
        }
    }
}

/// Letter grade. Closed set; the UI restricts input to these five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        match raw {
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            other => Err(ModelError::UnknownGrade(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub grade: Grade,
    pub course: String,
    pub enrollment_date: NaiveDate,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Staging copy of a student minus the id. One draft exists per session; it is
/// mutated field-by-field while a form is open and reset on cancel or submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    pub name: String,
    pub email: String,
    pub age: u32,
    pub grade: Grade,
    pub course: String,
    pub enrollment_date: NaiveDate,
    pub status: Status,
    pub notes: String,
}

impl StudentDraft {
    pub fn defaults(today: NaiveDate) -> Self {
        StudentDraft {
            name: String::new(),
            email: String::new(),
            age: 18,
            grade: Grade::A,
            course: String::new(),
            enrollment_date: today,
            status: Status::Active,
            notes: String::new(),
        }
    }

    pub fn from_student(student: &Student) -> Self {
        StudentDraft {
            name: student.name.clone(),
            email: student.email.clone(),
            age: student.age,
            grade: student.grade,
            course: student.course.clone(),
            enrollment_date: student.enrollment_date,
            status: student.status,
            notes: student.notes.clone().unwrap_or_default(),
        }
    }

    /// Required-field check. A draft that fails here must never become a
    /// stored record.
    pub fn validate(&self) -> Result<(), ModelError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("course", &self.course),
        ] {
            if value.trim().is_empty() {
                return Err(ModelError::MissingField(field));
            }
        }
        Ok(())
    }

    /// Materialize the draft into a record under the given id. Trims the text
    /// fields; empty notes collapse to None.
    pub fn to_student(&self, id: String) -> Student {
        let notes = self.notes.trim();
        Student {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            age: self.age,
            grade: self.grade,
            course: self.course.trim().to_string(),
            enrollment_date: self.enrollment_date,
            status: self.status,
            notes: if notes.is_empty() {
                None
            } else {
                Some(notes.to_string())
            },
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("required field is empty: {0}")]
    MissingField(&'static str),
    #[error("unknown status: {0}")]
    UnknownStatus(String),
    #[error("unknown grade: {0}")]
    UnknownGrade(String),
    #[error("age must be a non-negative integer, got: {0}")]
    InvalidAge(String),
    #[error("enrollmentDate must be YYYY-MM-DD, got: {0}")]
    InvalidDate(String),
}

/// Explicit parse step for age input. Form values arrive either as a JSON
/// number or as the raw text of an input element; anything that is not a
/// whole non-negative number is rejected rather than coerced.
pub fn parse_age(value: &serde_json::Value) -> Result<u32, ModelError> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).map_err(|_| ModelError::InvalidAge(n.to_string()));
    }
    if let Some(s) = value.as_str() {
        return s
            .trim()
            .parse::<u32>()
            .map_err(|_| ModelError::InvalidAge(s.to_string()));
    }
    Err(ModelError::InvalidAge(value.to_string()))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ModelError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ModelError::InvalidDate(raw.to_string()))
}
