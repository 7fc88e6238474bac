//! Task Models
//!
//! The task record, its persisted form, and the draft built from the input form.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Session-local task identifier
pub type TaskId = u32;

/// A to-do task
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    /// Never blank
    pub text: String,
    pub deadline: Option<DateTime<Utc>>,
    /// Countdown length, fixed at creation
    pub timer_minutes: Option<u32>,
    pub completed: bool,
}

/// Persisted record, one per task, in list order.
///
/// Ids are not stored; they are reassigned on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTask {
    pub text: String,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub timer: Option<u32>,
    #[serde(default)]
    pub completed: bool,
}

/// `timer` is the duration the task was created with, not what the countdown
/// currently shows. A reload therefore restarts the countdown from the full
/// duration, even if it had already elapsed.
impl From<&Task> for StoredTask {
    fn from(task: &Task) -> Self {
        Self {
            text: task.text.clone(),
            deadline: task.deadline,
            timer: task.timer_minutes,
            completed: task.completed,
        }
    }
}

/// Validated input for a new task
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub text: String,
    pub deadline: Option<DateTime<Utc>>,
    pub timer_minutes: Option<u32>,
}

impl NewTask {
    /// Returns `None` when the text is blank.
    pub fn new(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            deadline: None,
            timer_minutes: None,
        })
    }

    pub fn with_deadline(mut self, deadline: Option<DateTime<Utc>>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_timer(mut self, minutes: Option<u32>) -> Self {
        self.timer_minutes = minutes.filter(|m| *m > 0);
        self
    }

    /// Build a draft from the raw form fields.
    ///
    /// `tz` is the zone the deadline picker value is expressed in.
    pub fn from_input<Tz: TimeZone>(text: &str, deadline: &str, timer: &str, tz: &Tz) -> Option<Self> {
        Some(
            Self::new(text)?
                .with_deadline(parse_deadline_input(deadline, tz))
                .with_timer(parse_timer_input(timer)),
        )
    }
}

const DATETIME_LOCAL_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parse a `datetime-local` field value as a wall-clock time in `tz`.
pub fn parse_deadline_input<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let naive = DATETIME_LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())?;
    // Skipped wall-clock times (DST gaps) have no instant
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse the timer field as a positive number of minutes.
pub fn parse_timer_input(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|m| *m > 0)
}
