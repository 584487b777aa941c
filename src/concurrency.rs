//! Concurrent access to a filesystem instance
//!
//! The core is single-threaded: every operation runs to completion
//! before the next begins. Callers that share one instance across
//! threads go through [`SharedFileSystem`], which holds one exclusive
//! lock per instance. Block allocation and namespace mutation are not
//! independently safe, so there is no finer-grained locking.

use crate::fs::FileSystem;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle serializing all access to one [`FileSystem`].
#[derive(Clone)]
pub struct SharedFileSystem {
    inner: Arc<Mutex<FileSystem>>,
}

impl SharedFileSystem {
    pub fn new(total_blocks: usize) -> Self {
        SharedFileSystem {
            inner: Arc::new(Mutex::new(FileSystem::new(total_blocks))),
        }
    }

    /// Run `f` with exclusive access to the filesystem.
    pub fn with<R>(&self, f: impl FnOnce(&mut FileSystem) -> R) -> R {
        let mut fs = self.inner.lock();
        f(&mut fs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_creates_never_overcommit_pool() {
        let total = 8;
        let shared = SharedFileSystem::new(total);

        // More creators than blocks; the pool must hand out each block once.
        let mut handles = vec![];
        for i in 0..16 {
            let shared = shared.clone();
            handles.push(thread::spawn(move || {
                shared.with(|fs| fs.create_file("/", &format!("f{}.txt", i), "x").is_ok())
            }));
        }

        let created = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(created, total);
        shared.with(|fs| {
            let status = fs.status();
            assert_eq!(status.allocated_blocks, total);
            assert_eq!(status.free_blocks, 0);
        });
    }

    #[test]
    fn test_concurrent_mixed_ops_keep_accounting() {
        let total = 4;
        let shared = SharedFileSystem::new(total);

        let mut handles = vec![];
        for i in 0..8 {
            let shared = shared.clone();
            handles.push(thread::spawn(move || {
                let name = format!("f{}.txt", i);
                let _ = shared.with(|fs| fs.create_file("/", &name, "x"));
                let _ = shared.with(|fs| fs.remove_node(&format!("/{}", name)));
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        shared.with(|fs| {
            let status = fs.status();
            assert_eq!(status.free_blocks + status.allocated_blocks, total);
        });
    }
}
