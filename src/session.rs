//! In-memory session state.
//!
//! Holds the current task list and the last batch of processed results.
//! Nothing is persisted; a restart clears the session. Mutations go
//! through explicit methods so the batch cap is enforced in one place.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::processor::{ProcessedTask, RawTask, MAX_BATCH_SIZE};

/// Errors from session mutations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Task description cannot be empty.")]
    EmptyDescription,
    #[error("Task list is full. Please process up to {} tasks at a time.", MAX_BATCH_SIZE)]
    TaskListFull,
}

/// Store for the current session's raw tasks and processed results.
#[derive(Debug, Default)]
pub struct SessionStore {
    tasks: RwLock<Vec<RawTask>>,
    processed: RwLock<Vec<ProcessedTask>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task with a generated id.
    ///
    /// Fails when the description is blank or the list already holds
    /// [`MAX_BATCH_SIZE`] tasks.
    pub async fn add_task(&self, description: impl Into<String>) -> Result<RawTask, SessionError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(SessionError::EmptyDescription);
        }

        let mut tasks = self.tasks.write().await;
        if tasks.len() >= MAX_BATCH_SIZE {
            return Err(SessionError::TaskListFull);
        }

        let task = RawTask {
            id: Uuid::new_v4().to_string(),
            description,
        };
        tasks.push(task.clone());
        Ok(task)
    }

    /// Replace the task list wholesale, truncated to the batch cap.
    pub async fn set_tasks(&self, mut new_tasks: Vec<RawTask>) {
        new_tasks.truncate(MAX_BATCH_SIZE);
        *self.tasks.write().await = new_tasks;
    }

    /// Current task list, in insertion order.
    pub async fn tasks(&self) -> Vec<RawTask> {
        self.tasks.read().await.clone()
    }

    /// Remove all raw tasks.
    pub async fn clear_tasks(&self) {
        self.tasks.write().await.clear();
    }

    /// Processed results from the most recent successful batch.
    pub async fn processed(&self) -> Vec<ProcessedTask> {
        self.processed.read().await.clone()
    }

    /// Store the results of a successful batch.
    pub async fn set_processed(&self, results: Vec<ProcessedTask>) {
        *self.processed.write().await = results;
    }

    /// Discard the processed results.
    pub async fn clear_results(&self) {
        self.processed.write().await.clear();
    }
}

/// Shared session store wrapped in Arc for concurrent access.
pub type SharedSessionStore = Arc<SessionStore>;
