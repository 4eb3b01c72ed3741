use serde::Serialize;

use crate::model::{Grade, Status, Student};

/// Status axis of the visible-roster query. `All` is the UI's "all" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn parse(raw: &str) -> Result<Self, crate::model::ModelError> {
        if raw == "all" {
            Ok(StatusFilter::All)
        } else {
            Status::parse(raw).map(StatusFilter::Only)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(s) => s.as_str(),
        }
    }
}

/// Visible subset of the roster: case-insensitive substring match of `term`
/// against name, email, or course, AND'ed with the status filter. Pure in its
/// inputs and order-preserving; an empty term matches every record.
pub fn filter<'a>(roster: &'a [Student], term: &str, status: StatusFilter) -> Vec<&'a Student> {
    let needle = term.to_lowercase();
    roster
        .iter()
        .filter(|s| {
            let matches_search = needle.is_empty()
                || s.name.to_lowercase().contains(&needle)
                || s.email.to_lowercase().contains(&needle)
                || s.course.to_lowercase().contains(&needle);
            let matches_status = match status {
                StatusFilter::All => true,
                StatusFilter::Only(want) => s.status == want,
            };
            matches_search && matches_status
        })
        .collect()
}

/// Aggregate counts for the dashboard, recomputed from the live roster.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RosterStats {
    pub total: usize,
    pub active: usize,
    pub a_grade: usize,
}

pub fn stats(roster: &[Student]) -> RosterStats {
    RosterStats {
        total: roster.len(),
        active: roster.iter().filter(|s| s.status == Status::Active).count(),
        a_grade: roster.iter().filter(|s| s.grade == Grade::A).count(),
    }
}
