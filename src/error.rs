//! Filesystem error types
//!
//! Every operation surfaces failures as a distinguishable [`FsError`]
//! variant. All errors are recoverable at the operation boundary; the
//! caller decides whether to retry, prompt again, or abort.

use crate::types::BlockHandle;
use thiserror::Error;

/// Errors raised by namespace, block, and attribute operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FsError {
    /// Path or name did not resolve to a node.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Operation expected a directory.
    #[error("not a directory: {0}")]
    NotDirectory(String),

    /// Operation expected a file.
    #[error("not a file: {0}")]
    NotFile(String),

    /// A sibling with the same name already exists.
    #[error("name already exists: {0}")]
    NameCollision(String),

    /// Node name is empty or contains a path separator.
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    /// Directory removal blocked by remaining children.
    #[error("directory not empty: {0}")]
    NotEmpty(String),

    /// The root directory can never be removed.
    #[error("cannot remove the root directory")]
    RootRemoval,

    /// No free blocks remain in the pool.
    #[error("no free blocks available")]
    PoolExhausted,

    /// Block handle is out of range, never allocated, or already freed.
    #[error("block {0} is not allocated")]
    NotAllocated(BlockHandle),

    /// Attribute lookup missed; distinguishable from an empty value.
    #[error("attribute {attribute:?} not found at {path:?}")]
    AttributeNotFound { path: String, attribute: String },
}
