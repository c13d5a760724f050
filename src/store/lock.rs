use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::{Result, StudioError};

/// Lock file in the project root. It stays on disk between runs; only the
/// advisory lock on it is released.
pub const LOCK_FILE: &str = ".studio-migrate.lock";

/// Exclusive hold on a project directory. Released when dropped.
#[derive(Debug)]
pub struct ProjectLock {
    file: File,
}

impl ProjectLock {
    pub fn release(self) -> Result<()> {
        self.file.unlock()?;
        Ok(())
    }
}

/// Take the project lock without waiting. The holder's pid is written into
/// the lock file and reported to anyone who finds it taken.
pub fn lock_project(project_root: &Path) -> Result<ProjectLock> {
    let path = project_root.join(LOCK_FILE);
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&path)?;

    if file.try_lock_exclusive().is_err() {
        let mut holder = String::new();
        file.read_to_string(&mut holder).ok();
        let holder = holder.trim();
        let message = if holder.is_empty() {
            path.display().to_string()
        } else {
            format!("{} (held by pid {holder})", path.display())
        };
        return Err(StudioError::Locked(message));
    }

    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    write!(file, "{}", std::process::id())?;
    file.flush()?;

    Ok(ProjectLock { file })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn second_lock_on_same_project_fails() {
        let dir = tempdir().unwrap();

        let lock = lock_project(dir.path()).unwrap();
        let err = lock_project(dir.path()).unwrap_err();
        assert_eq!(err.code(), "locked");
        assert!(err
            .to_string()
            .contains(&format!("held by pid {}", std::process::id())));

        lock.release().unwrap();
        let _again = lock_project(dir.path()).unwrap();
    }

    #[test]
    fn lock_file_stays_after_drop() {
        let dir = tempdir().unwrap();

        drop(lock_project(dir.path()).unwrap());

        let contents = fs::read_to_string(dir.path().join(LOCK_FILE)).unwrap();
        assert_eq!(contents, std::process::id().to_string());
        let _again = lock_project(dir.path()).unwrap();
    }
}
