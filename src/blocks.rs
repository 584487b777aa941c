//! BlockStore
//!
//! Fixed-size pool of storage blocks. Every handle in `[0, N)` is either
//! in the free set or in the allocated map, never both, so
//! `free_count() + allocated_count() == total()` at every observable
//! point. The pool is sized once at construction and never grows.

use crate::error::FsError;
use crate::types::BlockHandle;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Allocation state of one block, as reported by the occupancy bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockState {
    Free,
    Allocated,
}

/// Fixed block pool with whole-buffer content per allocated block.
pub struct BlockStore {
    total: usize,
    free: BTreeSet<BlockHandle>,
    allocated: HashMap<BlockHandle, String>,
}

impl BlockStore {
    /// Create a pool of `total` blocks, all free.
    pub fn new(total: usize) -> Self {
        BlockStore {
            total,
            free: (0..total).collect(),
            allocated: HashMap::new(),
        }
    }

    /// Take one handle out of the free set and mark it allocated with
    /// empty content. Which free handle is picked is unspecified; callers
    /// treat handles as opaque tokens.
    pub fn allocate(&mut self) -> Result<BlockHandle, FsError> {
        let handle = self.free.pop_first().ok_or(FsError::PoolExhausted)?;
        self.allocated.insert(handle, String::new());
        Ok(handle)
    }

    /// Return a handle to the free set and discard its content. Fails on
    /// double-free or a handle that was never allocated.
    pub fn free(&mut self, handle: BlockHandle) -> Result<(), FsError> {
        if self.allocated.remove(&handle).is_none() {
            return Err(FsError::NotAllocated(handle));
        }
        self.free.insert(handle);
        Ok(())
    }

    /// Replace the block's content wholesale; no partial writes.
    pub fn write(&mut self, handle: BlockHandle, data: &str) -> Result<(), FsError> {
        let slot = self
            .allocated
            .get_mut(&handle)
            .ok_or(FsError::NotAllocated(handle))?;
        *slot = data.to_string();
        Ok(())
    }

    /// Current content of an allocated block; empty if never written.
    pub fn read(&self, handle: BlockHandle) -> Result<&str, FsError> {
        self.allocated
            .get(&handle)
            .map(String::as_str)
            .ok_or(FsError::NotAllocated(handle))
    }

    /// Exact snapshot of per-block allocation state, indexed `0..N`.
    pub fn occupancy_bitmap(&self) -> Vec<BlockState> {
        (0..self.total)
            .map(|handle| {
                if self.allocated.contains_key(&handle) {
                    BlockState::Allocated
                } else {
                    BlockState::Free
                }
            })
            .collect()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn allocated_count(&self) -> usize {
        self.allocated.len()
    }
}
