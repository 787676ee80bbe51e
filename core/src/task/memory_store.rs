//! In-memory task storage implementation
//!
//! Holds tasks in an ordered snapshot that is swapped wholesale on every
//! mutation, and publishes a `TaskEvent` to subscribers after each swap.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use super::event::TaskEvent;
use super::model::{CreateTaskRequest, Task, TaskCounts, TaskPatch};
use super::repository::TaskRepository;
use crate::{Error, Result};

const FIRST_ID: u64 = 1;

/// Largest accepted event channel capacity; larger requests are clamped
pub const MAX_EVENT_CAPACITY: usize = 1 << 16;

/// What happens to the id counter on `clear_all`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdPolicy {
    /// Counter restarts at 1, so ids of cleared tasks are handed out again
    #[default]
    ResetOnClear,
    /// Counter never goes backwards
    Monotonic,
}

impl fmt::Display for IdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResetOnClear => f.write_str("reset"),
            Self::Monotonic => f.write_str("monotonic"),
        }
    }
}

impl FromStr for IdPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reset" | "reset_on_clear" => Ok(Self::ResetOnClear),
            "monotonic" => Ok(Self::Monotonic),
            other => Err(Error::InvalidInput(format!("unknown id policy '{}'", other))),
        }
    }
}

/// Store construction options
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub id_policy: IdPolicy,
    /// Capacity of the event channel, clamped to `1..=MAX_EVENT_CAPACITY`;
    /// slow subscribers lag past this
    pub event_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            id_policy: IdPolicy::default(),
            event_capacity: 256,
        }
    }
}

struct StoreState {
    tasks: Arc<Vec<Task>>,
    next_id: u64,
}

struct StoreInner {
    state: RwLock<StoreState>,
    id_policy: IdPolicy,
    event_tx: broadcast::Sender<TaskEvent>,
}

/// Thread-safe in-memory task store
#[derive(Clone)]
pub struct InMemoryTaskStore {
    inner: Arc<StoreInner>,
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTaskStore {
    /// Create an empty store with default options
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        let capacity = config.event_capacity.clamp(1, MAX_EVENT_CAPACITY);
        let (event_tx, _) = broadcast::channel(capacity);
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(StoreState {
                    tasks: Arc::new(Vec::new()),
                    next_id: FIRST_ID,
                }),
                id_policy: config.id_policy,
                event_tx,
            }),
        }
    }

    /// Subscribe to change events
    pub fn subscribe(&self) -> broadcast::Receiver<TaskEvent> {
        self.inner.event_tx.subscribe()
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.inner.id_policy
    }

    /// Shared handle to the current snapshot, without copying tasks
    pub async fn snapshot(&self) -> Arc<Vec<Task>> {
        Arc::clone(&self.inner.state.read().await.tasks)
    }

    pub async fn count_total(&self) -> usize {
        self.snapshot().await.len()
    }

    pub async fn count_completed(&self) -> usize {
        self.snapshot().await.iter().filter(|t| t.completed).count()
    }

    pub async fn count_pending(&self) -> usize {
        self.snapshot().await.iter().filter(|t| !t.completed).count()
    }

    /// Must be called with the write guard held so event order matches swap order
    fn publish(&self, event: TaskEvent) {
        debug!("Publishing {} event for {:?}", event.kind(), event.task_id());
        // Err only means nobody is listening
        let _ = self.inner.event_tx.send(event);
    }
}

/// A timestamp strictly after `previous`, so consecutive mutations are ordered
fn touch(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::nanoseconds(1)
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskStore {
    async fn list(&self) -> Result<Vec<Task>> {
        Ok(self.snapshot().await.to_vec())
    }

    async fn get(&self, id: &str) -> Result<Option<Task>> {
        let tasks = self.snapshot().await;
        Ok(tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, request: CreateTaskRequest) -> Result<Task> {
        let task = {
            let mut state = self.inner.state.write().await;
            let id = state.next_id.to_string();
            state.next_id += 1;

            let task = Task::from_request(id, request, Utc::now());
            let mut tasks = state.tasks.to_vec();
            tasks.push(task.clone());
            state.tasks = Arc::new(tasks);

            debug!("Created task {}", task.id);
            self.publish(TaskEvent::Created { task: task.clone() });
            task
        };

        Ok(task)
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task> {
        let updated = {
            let mut state = self.inner.state.write().await;
            let Some(index) = state.tasks.iter().position(|t| t.id == id) else {
                return Err(Error::TaskNotFound(id.to_string()));
            };

            let current = &state.tasks[index];
            let updated = current.merged(patch, touch(current.updated_at));
            let mut tasks = state.tasks.to_vec();
            tasks[index] = updated.clone();
            state.tasks = Arc::new(tasks);

            debug!("Updated task {}", updated.id);
            self.publish(TaskEvent::Updated {
                task: updated.clone(),
            });
            updated
        };

        Ok(updated)
    }

    async fn toggle_completion(&self, id: &str) -> Result<Task> {
        // Read and write under one lock so the flip is based on the latest value
        let updated = {
            let mut state = self.inner.state.write().await;
            let Some(index) = state.tasks.iter().position(|t| t.id == id) else {
                return Err(Error::TaskNotFound(id.to_string()));
            };

            let current = &state.tasks[index];
            let patch = TaskPatch::new().completed(!current.completed);
            let updated = current.merged(patch, touch(current.updated_at));
            let mut tasks = state.tasks.to_vec();
            tasks[index] = updated.clone();
            state.tasks = Arc::new(tasks);

            debug!(
                "Toggled task {} to completed={}",
                updated.id, updated.completed
            );
            self.publish(TaskEvent::Updated {
                task: updated.clone(),
            });
            updated
        };

        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut state = self.inner.state.write().await;
        if !state.tasks.iter().any(|t| t.id == id) {
            return Ok(false);
        }

        let tasks: Vec<Task> = state
            .tasks
            .iter()
            .filter(|t| t.id != id)
            .cloned()
            .collect();
        state.tasks = Arc::new(tasks);

        debug!("Deleted task {}", id);
        self.publish(TaskEvent::Deleted { id: id.to_string() });
        Ok(true)
    }

    async fn clear_all(&self) -> Result<()> {
        let mut state = self.inner.state.write().await;
        let removed = state.tasks.len();
        state.tasks = Arc::new(Vec::new());
        if self.inner.id_policy == IdPolicy::ResetOnClear {
            state.next_id = FIRST_ID;
        }

        debug!(
            "Cleared {} tasks (id policy: {})",
            removed, self.inner.id_policy
        );
        self.publish(TaskEvent::Cleared);
        Ok(())
    }

    async fn counts(&self) -> Result<TaskCounts> {
        Ok(TaskCounts::from_tasks(&self.snapshot().await))
    }
}
