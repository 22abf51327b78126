use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::types::TaskStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub assignee: Option<Uuid>,
    pub status: TaskStatus,
    pub deadline: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateTask {
    pub title: String,
    pub assignee: Option<Uuid>,
    pub status: TaskStatus,
    pub deadline: NaiveDate,
}

impl CreateTask {
    /// New tasks always enter the board as todo.
    pub fn new(title: String, assignee: Uuid, deadline: NaiveDate) -> Self {
        Self {
            title,
            assignee: Some(assignee),
            status: TaskStatus::Todo,
            deadline,
        }
    }
}

/// Partial update for a targeted task patch. Absent fields stay untouched
/// on the server.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}
