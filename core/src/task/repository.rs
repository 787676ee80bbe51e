//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;

use super::model::{CreateTaskRequest, Task, TaskCounts, TaskFilter, TaskPatch};
use crate::Result;

/// Repository interface for task CRUD operations
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Snapshot of all tasks in insertion order
    async fn list(&self) -> Result<Vec<Task>>;

    /// Get a task by ID
    async fn get(&self, id: &str) -> Result<Option<Task>>;

    /// Create a new task; the repository assigns the id
    async fn create(&self, request: CreateTaskRequest) -> Result<Task>;

    /// Merge a patch into an existing task.
    ///
    /// Returns `Error::TaskNotFound` if no task has this id.
    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task>;

    /// Flip the completion flag of a task
    async fn toggle_completion(&self, id: &str) -> Result<Task>;

    /// Delete a task by ID, returning whether anything was removed
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Remove every task
    async fn clear_all(&self) -> Result<()>;

    /// Aggregate counts over the current collection
    async fn counts(&self) -> Result<TaskCounts>;

    /// Tasks matching the selector, in insertion order
    async fn filter(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        let tasks = self.list().await?;
        Ok(filter.apply(&tasks))
    }
}
