//! FileSystem façade
//!
//! Composes the namespace tree, the block pool, and the attribute store
//! into the operation surface a presentation layer consumes. Composite
//! operations commit only after every precondition holds, or compensate:
//! a file create that registers no namespace entry frees the block it
//! allocated, so a failed create never leaks a block.

use crate::attrs::AttributeStore;
use crate::blocks::{BlockState, BlockStore};
use crate::error::FsError;
use crate::tree::node::{EntryKind, NodePayload};
use crate::tree::{path, NamespaceTree};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Serializable snapshot of filesystem state for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FsStatus {
    pub total_blocks: usize,
    pub free_blocks: usize,
    pub allocated_blocks: usize,
    pub node_count: usize,
    pub current_directory: String,
}

/// In-memory block filesystem: namespace tree + block pool + attributes,
/// plus a navigation cursor over the tree.
pub struct FileSystem {
    tree: NamespaceTree,
    blocks: BlockStore,
    attrs: AttributeStore,
    current_directory: String,
    previous_directories: Vec<String>,
}

impl FileSystem {
    /// Create a filesystem with an empty root and a pool of
    /// `total_blocks` storage blocks.
    pub fn new(total_blocks: usize) -> Self {
        info!(total_blocks, "filesystem created");
        FileSystem {
            tree: NamespaceTree::new(),
            blocks: BlockStore::new(total_blocks),
            attrs: AttributeStore::new(),
            current_directory: "/".to_string(),
            previous_directories: Vec::new(),
        }
    }

    /// Resolve a path and report what kind of node it names.
    pub fn resolve(&self, node_path: &str) -> Result<EntryKind, FsError> {
        let id = self.tree.resolve(node_path)?;
        let node = self
            .tree
            .node(id)
            .ok_or_else(|| FsError::NotFound(node_path.to_string()))?;
        Ok(node.kind())
    }

    /// Direct children of a directory, in creation order.
    pub fn list(&self, dir_path: &str) -> Result<Vec<(String, EntryKind)>, FsError> {
        self.tree.list(dir_path)
    }

    /// Create an empty directory named `name` under `dir_path`.
    pub fn create_directory(&mut self, dir_path: &str, name: &str) -> Result<(), FsError> {
        self.tree.create_child(
            dir_path,
            name,
            NodePayload::Directory {
                children: Vec::new(),
            },
        )?;
        debug!(path = %path::join(dir_path, name), "directory created");
        Ok(())
    }

    /// Create a file under `dir_path`, backed by a freshly allocated
    /// block holding `content`.
    ///
    /// Allocation happens first; if the namespace registration then
    /// fails, the block is released before the error propagates, leaving
    /// the pool exactly as it was.
    pub fn create_file(
        &mut self,
        dir_path: &str,
        name: &str,
        content: &str,
    ) -> Result<(), FsError> {
        let handle = self.blocks.allocate()?;
        if let Err(err) = self
            .tree
            .create_child(dir_path, name, NodePayload::File { block: handle })
        {
            let _ = self.blocks.free(handle);
            return Err(err);
        }
        self.blocks.write(handle, content)?;
        debug!(path = %path::join(dir_path, name), block = handle, "file created");
        Ok(())
    }

    /// Read the full content of the file at `file_path`.
    pub fn read_file(&self, file_path: &str) -> Result<&str, FsError> {
        let handle = self.file_block(file_path)?;
        self.blocks.read(handle)
    }

    /// Replace the content of the file at `file_path` wholesale.
    pub fn edit_file(&mut self, file_path: &str, content: &str) -> Result<(), FsError> {
        let handle = self.file_block(file_path)?;
        self.blocks.write(handle, content)?;
        debug!(path = %file_path, block = handle, "file edited");
        Ok(())
    }

    /// Remove the node at `node_path`. Files release their block back to
    /// the pool; directories must be empty; the root is never removable.
    /// Attributes recorded at the path are left in place.
    pub fn remove_node(&mut self, node_path: &str) -> Result<(), FsError> {
        if let Some(handle) = self.tree.remove(node_path)? {
            self.blocks.free(handle)?;
        }
        debug!(path = %node_path, "node removed");
        Ok(())
    }

    /// Record an attribute for a path that currently resolves.
    pub fn set_attribute(
        &mut self,
        node_path: &str,
        attribute: &str,
        value: &str,
    ) -> Result<(), FsError> {
        self.tree.resolve(node_path)?;
        self.attrs.set(node_path, attribute, value);
        debug!(path = %node_path, attribute, "attribute set");
        Ok(())
    }

    /// Look up an attribute by path. Entries survive node deletion, so a
    /// hit does not imply the path currently resolves.
    pub fn get_attribute(&self, node_path: &str, attribute: &str) -> Result<&str, FsError> {
        self.attrs
            .get(node_path, attribute)
            .ok_or_else(|| FsError::AttributeNotFound {
                path: node_path.to_string(),
                attribute: attribute.to_string(),
            })
    }

    /// Move the cursor to a directory, remembering where it came from.
    pub fn navigate(&mut self, dir_path: &str) -> Result<(), FsError> {
        let id = self.tree.resolve(dir_path)?;
        let node = self
            .tree
            .node(id)
            .ok_or_else(|| FsError::NotFound(dir_path.to_string()))?;
        if !node.is_directory() {
            return Err(FsError::NotDirectory(dir_path.to_string()));
        }
        let target = if path::is_root(dir_path) {
            "/".to_string()
        } else {
            dir_path.to_string()
        };
        let previous = std::mem::replace(&mut self.current_directory, target);
        self.previous_directories.push(previous);
        debug!(path = %self.current_directory, "navigated");
        Ok(())
    }

    /// Step back to the most recently visited directory. Returns the new
    /// current directory, or `None` when there is no history (the cursor
    /// stays put). A remembered directory may have been removed since;
    /// the cursor still moves there, matching the path-keyed model.
    pub fn navigate_back(&mut self) -> Option<String> {
        let previous = self.previous_directories.pop()?;
        self.current_directory = previous.clone();
        debug!(path = %self.current_directory, "navigated back");
        Some(previous)
    }

    /// Path of the directory the cursor is on.
    pub fn current_directory(&self) -> &str {
        &self.current_directory
    }

    /// Per-block allocation snapshot, indexed `0..total_blocks`.
    pub fn occupancy_bitmap(&self) -> Vec<BlockState> {
        self.blocks.occupancy_bitmap()
    }

    /// Aggregate state snapshot for diagnostics.
    pub fn status(&self) -> FsStatus {
        FsStatus {
            total_blocks: self.blocks.total(),
            free_blocks: self.blocks.free_count(),
            allocated_blocks: self.blocks.allocated_count(),
            node_count: self.tree.node_count(),
            current_directory: self.current_directory.clone(),
        }
    }

    fn file_block(&self, file_path: &str) -> Result<crate::types::BlockHandle, FsError> {
        let id = self.tree.resolve(file_path)?;
        let node = self
            .tree
            .node(id)
            .ok_or_else(|| FsError::NotFound(file_path.to_string()))?;
        match node.payload {
            NodePayload::File { block } => Ok(block),
            NodePayload::Directory { .. } => Err(FsError::NotFile(file_path.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_read_edit_file() {
        let mut fs = FileSystem::new(4);
        fs.create_file("/", "a.txt", "hi").unwrap();
        assert_eq!(fs.read_file("/a.txt").unwrap(), "hi");
        fs.edit_file("/a.txt", "bye").unwrap();
        assert_eq!(fs.read_file("/a.txt").unwrap(), "bye");
    }

    #[test]
    fn test_read_directory_is_not_file() {
        let mut fs = FileSystem::new(4);
        fs.create_directory("/", "d").unwrap();
        assert_eq!(fs.read_file("/d"), Err(FsError::NotFile("/d".to_string())));
        assert_eq!(
            fs.edit_file("/d", "x"),
            Err(FsError::NotFile("/d".to_string()))
        );
    }

    #[test]
    fn test_remove_file_releases_block() {
        let mut fs = FileSystem::new(1);
        fs.create_file("/", "a.txt", "hi").unwrap();
        assert_eq!(fs.status().free_blocks, 0);
        fs.remove_node("/a.txt").unwrap();
        assert_eq!(fs.status().free_blocks, 1);
        // The pool is whole again, so another file fits.
        fs.create_file("/", "b.txt", "yo").unwrap();
    }

    #[test]
    fn test_failed_create_rolls_back_allocation() {
        let mut fs = FileSystem::new(2);
        fs.create_file("/", "a.txt", "hi").unwrap();
        let before = fs.occupancy_bitmap();
        assert_eq!(
            fs.create_file("/", "a.txt", "dup"),
            Err(FsError::NameCollision("/a.txt".to_string()))
        );
        assert_eq!(fs.occupancy_bitmap(), before);
        assert_eq!(
            fs.create_file("/missing", "b.txt", "x"),
            Err(FsError::NotFound("/missing".to_string()))
        );
        assert_eq!(fs.occupancy_bitmap(), before);
    }

    #[test]
    fn test_attribute_requires_live_path_on_set_only() {
        let mut fs = FileSystem::new(2);
        assert_eq!(
            fs.set_attribute("/ghost", "owner", "alice"),
            Err(FsError::NotFound("/ghost".to_string()))
        );
        fs.create_file("/", "f", "").unwrap();
        fs.set_attribute("/f", "owner", "alice").unwrap();
        assert_eq!(fs.get_attribute("/f", "owner").unwrap(), "alice");
        // Path-keyed entries survive deletion and reattach on re-create.
        fs.remove_node("/f").unwrap();
        assert_eq!(fs.get_attribute("/f", "owner").unwrap(), "alice");
        fs.create_directory("/", "f").unwrap();
        assert_eq!(fs.get_attribute("/f", "owner").unwrap(), "alice");
    }

    #[test]
    fn test_get_missing_attribute() {
        let mut fs = FileSystem::new(2);
        fs.create_file("/", "f", "").unwrap();
        assert_eq!(
            fs.get_attribute("/f", "missing"),
            Err(FsError::AttributeNotFound {
                path: "/f".to_string(),
                attribute: "missing".to_string(),
            })
        );
    }

    #[test]
    fn test_navigation_cursor() {
        let mut fs = FileSystem::new(2);
        fs.create_directory("/", "a").unwrap();
        fs.create_directory("/a", "b").unwrap();
        assert_eq!(fs.current_directory(), "/");
        fs.navigate("/a").unwrap();
        fs.navigate("/a/b").unwrap();
        assert_eq!(fs.current_directory(), "/a/b");
        assert_eq!(fs.navigate_back(), Some("/a".to_string()));
        assert_eq!(fs.navigate_back(), Some("/".to_string()));
        assert_eq!(fs.navigate_back(), None);
        assert_eq!(fs.current_directory(), "/");
    }

    #[test]
    fn test_navigate_rejects_files_and_missing_paths() {
        let mut fs = FileSystem::new(2);
        fs.create_file("/", "f", "").unwrap();
        assert_eq!(
            fs.navigate("/f"),
            Err(FsError::NotDirectory("/f".to_string()))
        );
        assert_eq!(
            fs.navigate("/nope"),
            Err(FsError::NotFound("/nope".to_string()))
        );
        assert_eq!(fs.current_directory(), "/");
        // Returning to the root from anywhere is allowed.
        fs.create_directory("/", "d").unwrap();
        fs.navigate("/d").unwrap();
        fs.navigate("/").unwrap();
        assert_eq!(fs.current_directory(), "/");
    }

    #[test]
    fn test_status_snapshot() {
        let mut fs = FileSystem::new(4);
        fs.create_directory("/", "d").unwrap();
        fs.create_file("/d", "f", "data").unwrap();
        let status = fs.status();
        assert_eq!(status.total_blocks, 4);
        assert_eq!(status.allocated_blocks, 1);
        assert_eq!(status.free_blocks, 3);
        assert_eq!(status.node_count, 3);
        assert_eq!(status.current_directory, "/");
    }
}
