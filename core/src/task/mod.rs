//! Task module
//!
//! This module contains task-related types and logic.

mod event;
mod memory_store;
mod model;
mod repository;

pub use event::TaskEvent;
pub use memory_store::{IdPolicy, InMemoryTaskStore, StoreConfig, MAX_EVENT_CAPACITY};
pub use model::*;
pub use repository::TaskRepository;
