//! Core types for the block filesystem simulation.

/// BlockHandle: opaque index of one storage block in the pool
pub type BlockHandle = usize;

/// NodeId: stable arena index of a namespace node
pub type NodeId = usize;
