//! Batch mutations: multi-delete and JSON import.

mod coordinator;

pub use coordinator::*;

use serde::Serialize;
use thiserror::Error;

use crate::transport::ApiError;

#[derive(Debug, Error)]
pub enum BatchError {
    /// Delete was asked for with nothing selected.
    #[error("No entries selected")]
    EmptySelection,

    /// Import payload is not JSON, or not an object/array of objects.
    #[error("Malformed import payload: {0}")]
    MalformedPayload(String),

    #[error("Failed to read import file: {0}")]
    Read(#[from] std::io::Error),

    /// Every attempted delete failed.
    #[error("All {0} deletions failed")]
    AllFailed(usize),

    /// The session was rejected partway; `outcome` tallies what ran.
    #[error("Batch interrupted after {} deletions: {source}", .outcome.success_count)]
    Interrupted {
        outcome: BatchOutcome,
        source: ApiError,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Per-invocation tally of a multi-item mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub success_count: usize,
    pub failure_count: usize,
}

impl BatchOutcome {
    pub fn attempted(&self) -> usize {
        self.success_count + self.failure_count
    }

    /// A batch counts as done if anything in it went through.
    pub fn any_succeeded(&self) -> bool {
        self.success_count > 0
    }
}
