//! Namespace node types

use crate::types::{BlockHandle, NodeId};
use serde::{Deserialize, Serialize};

/// Per-kind payload; a node is exactly one of these.
#[derive(Debug, Clone)]
pub enum NodePayload {
    /// Child node ids in insertion order.
    Directory { children: Vec<NodeId> },
    /// Handle of the storage block backing this file.
    File { block: BlockHandle },
}

/// A namespace entry: directory or file.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    pub payload: NodePayload,
}

impl Node {
    pub fn is_directory(&self) -> bool {
        matches!(self.payload, NodePayload::Directory { .. })
    }

    pub fn kind(&self) -> EntryKind {
        match self.payload {
            NodePayload::Directory { .. } => EntryKind::Directory,
            NodePayload::File { .. } => EntryKind::File,
        }
    }
}

/// Kind tag used in listings and resolve results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Directory,
    File,
}
