//! Change events published by the task store

use serde::{Deserialize, Serialize};

use super::model::Task;

/// A mutation that has been applied to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskEvent {
    Created { task: Task },
    Updated { task: Task },
    Deleted { id: String },
    Cleared,
}

impl TaskEvent {
    /// Id of the affected task, if the event concerns a single task
    pub fn task_id(&self) -> Option<&str> {
        match self {
            Self::Created { task } | Self::Updated { task } => Some(&task.id),
            Self::Deleted { id } => Some(id),
            Self::Cleared => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Updated { .. } => "updated",
            Self::Deleted { .. } => "deleted",
            Self::Cleared => "cleared",
        }
    }
}
