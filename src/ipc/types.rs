use chrono::NaiveDate;
use serde::Deserialize;

use crate::form::FormController;
use crate::query::StatusFilter;
use crate::store::Roster;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Everything the session owns: the roster, the form draft lifecycle, and the
/// currently applied view filters. Lives for the life of the process only.
pub struct AppState {
    pub roster: Roster,
    pub form: FormController,
    pub search_term: String,
    pub status_filter: StatusFilter,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            roster: Roster::with_uuid_ids(),
            form: FormController::new(today()),
            search_term: String::new(),
            status_filter: StatusFilter::All,
        }
    }

    /// Drop all session state, as if the process had just started.
    pub fn reset(&mut self) {
        *self = AppState::new();
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
