use std::fmt;

use thiserror::Error;

/// Identifier-keyed collections owned by a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Radionuclide,
    Extremity,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Radionuclide => "radionuclide",
            Collection::Extremity => "extremity entry",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid {kind} identifier: {value:?}")]
    InvalidId { kind: &'static str, value: String },

    #[error("unknown field path: {0:?}")]
    UnknownFieldPath(String),

    #[error("invalid {expected} value for {path}: {value:?}")]
    InvalidValue {
        path: String,
        expected: &'static str,
        value: String,
    },

    #[error("unknown {kind}: {value:?}")]
    UnknownChoice { kind: &'static str, value: String },

    #[error("task {task} has no {collection}")]
    EmptyCollection {
        task: String,
        collection: Collection,
    },

    #[error("task {task} holds {id} but its {collection} counter is at {next}")]
    StaleIdCounter {
        task: String,
        collection: Collection,
        id: String,
        next: u32,
    },

    #[error("task {task} holds duplicate {collection} id {id}")]
    DuplicateId {
        task: String,
        collection: Collection,
        id: String,
    },
}

/// Structural edit rejected by the collection synchronizer.
///
/// The task is left untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("cannot remove {id}: a task must keep at least one {collection}")]
    LastEntry { collection: Collection, id: String },

    #[error("no {collection} with id {id}")]
    UnknownEntry { collection: Collection, id: String },

    #[error("no {collection} identifiers left in this task")]
    IdsExhausted { collection: Collection },
}

pub type Result<T> = std::result::Result<T, ModelError>;
