//! NamespaceTree
//!
//! Arena-backed hierarchy of directories and files. Nodes live in a
//! stable-indexed arena and reference each other by [`NodeId`], never by
//! pointer, so a directory and its children share no ownership cycle.
//! Removed slots are recycled through a free list.

pub mod node;
pub mod path;

use crate::error::FsError;
use crate::types::{BlockHandle, NodeId};
use node::{EntryKind, Node, NodePayload};

pub const ROOT_NAME: &str = "/";

/// Namespace tree: path resolution and structural mutation.
pub struct NamespaceTree {
    arena: Vec<Option<Node>>,
    free_slots: Vec<NodeId>,
    root: NodeId,
}

impl Default for NamespaceTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceTree {
    /// Create a tree holding only the root directory `/`.
    pub fn new() -> Self {
        let root = Node {
            name: ROOT_NAME.to_string(),
            parent: None,
            payload: NodePayload::Directory {
                children: Vec::new(),
            },
        };
        NamespaceTree {
            arena: vec![Some(root)],
            free_slots: Vec::new(),
            root: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow the node at `id`. Ids handed out by this tree are valid
    /// until the node is removed.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id).and_then(|slot| slot.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.arena.get_mut(id).and_then(|slot| slot.as_mut())
    }

    /// Resolve a path to a node id, walking from the root one segment at
    /// a time. `/` and the empty path resolve to the root. Fails at the
    /// first missing segment or when a non-final segment names a file.
    pub fn resolve(&self, path: &str) -> Result<NodeId, FsError> {
        let mut current = self.root;
        for segment in path::segments(path) {
            let children = match self.node(current).map(|n| &n.payload) {
                Some(NodePayload::Directory { children }) => children,
                _ => return Err(FsError::NotFound(path.to_string())),
            };
            current = *children
                .iter()
                .find(|&&child| {
                    self.node(child)
                        .map(|n| n.name == segment)
                        .unwrap_or(false)
                })
                .ok_or_else(|| FsError::NotFound(path.to_string()))?;
        }
        Ok(current)
    }

    /// Create a child node under `parent_path` and return its id.
    ///
    /// Fails with `NotFound` when the parent does not resolve,
    /// `NotDirectory` when it resolves to a file, `InvalidName` for an
    /// empty name or one containing `/`, and `NameCollision` when a
    /// sibling already carries the name.
    pub fn create_child(
        &mut self,
        parent_path: &str,
        name: &str,
        payload: NodePayload,
    ) -> Result<NodeId, FsError> {
        path::validate_name(name)?;
        let parent_id = self.resolve(parent_path)?;
        let parent = self
            .node(parent_id)
            .ok_or_else(|| FsError::NotFound(parent_path.to_string()))?;
        match &parent.payload {
            NodePayload::Directory { children } => {
                let collides = children.iter().any(|&child| {
                    self.node(child).map(|n| n.name == name).unwrap_or(false)
                });
                if collides {
                    return Err(FsError::NameCollision(path::join(parent_path, name)));
                }
            }
            NodePayload::File { .. } => {
                return Err(FsError::NotDirectory(parent_path.to_string()));
            }
        }

        let node = Node {
            name: name.to_string(),
            parent: Some(parent_id),
            payload,
        };
        let id = match self.free_slots.pop() {
            Some(slot) => {
                self.arena[slot] = Some(node);
                slot
            }
            None => {
                self.arena.push(Some(node));
                self.arena.len() - 1
            }
        };
        if let Some(NodePayload::Directory { children }) =
            self.node_mut(parent_id).map(|n| &mut n.payload)
        {
            children.push(id);
        }
        Ok(id)
    }

    /// List the direct children of a directory, tagged by kind, in
    /// insertion order.
    pub fn list(&self, dir_path: &str) -> Result<Vec<(String, EntryKind)>, FsError> {
        let id = self.resolve(dir_path)?;
        let node = self
            .node(id)
            .ok_or_else(|| FsError::NotFound(dir_path.to_string()))?;
        match &node.payload {
            NodePayload::Directory { children } => Ok(children
                .iter()
                .filter_map(|&child| self.node(child))
                .map(|n| (n.name.clone(), n.kind()))
                .collect()),
            NodePayload::File { .. } => Err(FsError::NotDirectory(dir_path.to_string())),
        }
    }

    /// Remove the node at `path`, detaching it from its parent.
    ///
    /// The root is never removable. Directories must be empty. For a
    /// file, the block handle it held is returned so the caller can
    /// release it; directories yield `None`.
    pub fn remove(&mut self, target_path: &str) -> Result<Option<BlockHandle>, FsError> {
        if path::is_root(target_path) {
            return Err(FsError::RootRemoval);
        }
        let id = self.resolve(target_path)?;
        let node = self
            .node(id)
            .ok_or_else(|| FsError::NotFound(target_path.to_string()))?;
        let freed_block = match &node.payload {
            NodePayload::Directory { children } => {
                if !children.is_empty() {
                    return Err(FsError::NotEmpty(target_path.to_string()));
                }
                None
            }
            NodePayload::File { block } => Some(*block),
        };
        let parent_id = node.parent;

        if let Some(parent_id) = parent_id {
            if let Some(NodePayload::Directory { children }) =
                self.node_mut(parent_id).map(|n| &mut n.payload)
            {
                children.retain(|&child| child != id);
            }
        }
        self.arena[id] = None;
        self.free_slots.push(id);
        Ok(freed_block)
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.iter().filter(|slot| slot.is_some()).count()
    }
}
