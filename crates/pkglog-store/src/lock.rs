use fs4::fs_std::FileExt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use tracing::debug;

/// Scoped exclusive lock on a path, used to serialize writers across
/// processes. `acquire` blocks until the lock is granted — there is no
/// timeout, so a stuck holder stalls all future writers (documented
/// limitation of the advisory-lock protocol).
///
/// The lock is released when the guard drops, on every exit path
/// including error paths. fs4 supplies the per-platform flock/LockFile
/// implementations behind one API.
#[derive(Debug)]
pub struct StoreLock {
    file: File,
}

impl StoreLock {
    pub fn acquire(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)?;
        file.lock_exclusive()?;
        debug!(path = %path.display(), "acquired store lock");
        Ok(Self { file })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        // Closing the descriptor would release the lock anyway; unlock
        // explicitly so the release is not left to descriptor teardown.
        let _ = self.file.unlock();
    }
}
