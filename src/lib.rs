//! SimFS: In-Memory Block Filesystem Simulation
//!
//! A simulated block-oriented filesystem: a hierarchical namespace of
//! directories and files, a fixed-size pool of storage blocks, and a
//! per-path attribute store, composed behind a single [`fs::FileSystem`]
//! façade.

pub mod attrs;
pub mod blocks;
pub mod concurrency;
pub mod error;
pub mod fs;
pub mod logging;
pub mod tree;
pub mod types;
