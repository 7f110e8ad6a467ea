use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WorkflowError;

/// The fixed weekday columns, in rendering order. Sunday is excluded.
pub const WEEKDAYS: [&str; 6] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const TIMESLOT_KEY: &str = "Timeslot";

/// Shown in any weekday cell the server left missing or empty.
pub const ABSENCE_MARKER: &str = "-";

/// Timeslot column plus the six weekday columns.
pub const GRID_COLUMNS: usize = WEEKDAYS.len() + 1;

/// One timetable slot as returned by the server: a mapping with a "Timeslot"
/// key and an entry per weekday key that has a lecture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleRow {
    cells: HashMap<String, Value>,
}

impl ScheduleRow {
    /// The display text for one cell; missing, null, or empty entries all
    /// render as the absence marker.
    pub fn cell_text(&self, key: &str) -> String {
        match self.cells.get(key) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => ABSENCE_MARKER.to_string(),
        }
    }
}

/// Body of a generate response: either the ordered schedule rows or an error
/// object with a message.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GenerateResponse {
    Failure { error: String },
    Schedule(Vec<ScheduleRow>),
}

/// A fully rendered table: one row of `GRID_COLUMNS` cells per ScheduleRow,
/// in response order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedGrid {
    pub rows: Vec<Vec<String>>,
}

pub fn grid_header() -> Vec<&'static str> {
    let mut header = vec![TIMESLOT_KEY];
    header.extend(WEEKDAYS);
    header
}

/// Projects the response rows into the fixed grid. A direct structural
/// projection: no re-ordering, filtering, or merging.
pub fn render_rows(rows: &[ScheduleRow]) -> RenderedGrid {
    let rendered = rows
        .iter()
        .map(|row| {
            let mut cells = Vec::with_capacity(GRID_COLUMNS);
            cells.push(row.cell_text(TIMESLOT_KEY));
            for day in WEEKDAYS {
                cells.push(row.cell_text(day));
            }
            cells
        })
        .collect();
    RenderedGrid { rows: rendered }
}

/// What happens to an already rendered table when the server reports an
/// error. Fixed per deployment, never decided at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    #[default]
    PreserveTable,
    ClearTable,
}

/// The table region. Holds at most one rendered grid; a response either
/// replaces it wholesale or (on error) preserves or clears it per policy.
/// Old and new rows are never mixed.
#[derive(Debug, Clone, Default)]
pub struct ScheduleView {
    policy: ErrorPolicy,
    grid: Option<RenderedGrid>,
}

impl ScheduleView {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self { policy, grid: None }
    }

    pub fn grid(&self) -> Option<&RenderedGrid> {
        self.grid.as_ref()
    }

    /// Applies one generate response. A server error is returned to the
    /// caller for presentation; it never leaves the view half-updated.
    pub fn apply(&mut self, response: &GenerateResponse) -> Result<(), WorkflowError> {
        match response {
            GenerateResponse::Schedule(rows) => {
                self.grid = Some(render_rows(rows));
                Ok(())
            }
            GenerateResponse::Failure { error } => {
                if self.policy == ErrorPolicy::ClearTable {
                    self.grid = None;
                }
                Err(WorkflowError::ServerRejected(error.clone()))
            }
        }
    }
}
