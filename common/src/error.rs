use thiserror::Error;

use crate::network::ModelId;

/// Reasons an insert into the directory can be refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    /// The parent is neither the root nor a registered group.
    #[error("parent {parent} has no child list in the directory")]
    UnknownParent { parent: ModelId },

    /// An equal object is already a child of the parent.
    #[error("an equal object is already present under {parent}")]
    Duplicate { parent: ModelId },

    /// A group may not take over a reserved sentinel id.
    #[error("{id} is reserved")]
    ReservedId { id: ModelId },
}

/// Invalid runtime settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("update interval of {given}s is below the minimum of {minimum}s")]
    IntervalTooShort { given: u64, minimum: u64 },

    #[error("unknown cascade mode: {0}")]
    UnknownCascadeMode(String),
}
