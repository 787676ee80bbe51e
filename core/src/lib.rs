//! Core library for Taskpad
//!
//! This crate contains the in-memory task store and its contract:
//! - Task model, create requests and patches
//! - The `TaskRepository` trait and its in-memory implementation
//! - Change events for subscribers

pub mod error;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
