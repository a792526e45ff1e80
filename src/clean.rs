//! Removal of previously generated files

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// What happened to one path during a clean
#[derive(Debug)]
pub enum CleanOutcome {
    Removed,
    NotFound,
    Failed(io::Error),
}

impl CleanOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, CleanOutcome::Failed(_))
    }
}

/// Result of cleaning a single path
#[derive(Debug)]
pub struct CleanEntry {
    pub path: PathBuf,
    pub outcome: CleanOutcome,
}

impl fmt::Display for CleanEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            CleanOutcome::Removed => write!(f, "Removed {}", self.path.display()),
            CleanOutcome::NotFound => write!(f, "Not found, skipping: {}", self.path.display()),
            CleanOutcome::Failed(e) => write!(f, "Error removing {}: {}", self.path.display(), e),
        }
    }
}

/// Delete each path independently
///
/// A failure on one path never stops the others from being attempted.
pub fn clean_files<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Vec<CleanEntry> {
    log::info!(">>> Cleaning up generated files...");

    paths
        .into_iter()
        .map(|path| {
            let outcome = match std::fs::remove_file(path) {
                Ok(()) => CleanOutcome::Removed,
                Err(e) if e.kind() == io::ErrorKind::NotFound => CleanOutcome::NotFound,
                Err(e) => CleanOutcome::Failed(e),
            };
            let entry = CleanEntry {
                path: path.to_path_buf(),
                outcome,
            };
            if entry.outcome.is_failure() {
                log::error!("    - {}", entry);
            } else {
                log::info!("    - {}", entry);
            }
            entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_existing_and_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present.js");
        let missing = dir.path().join("missing.json");
        std::fs::write(&present, "[]").unwrap();

        let entries = clean_files([present.as_path(), missing.as_path()]);
        assert!(matches!(entries[0].outcome, CleanOutcome::Removed));
        assert!(matches!(entries[1].outcome, CleanOutcome::NotFound));
        assert!(!present.exists());
    }

    #[test]
    fn test_failure_does_not_stop_later_paths() {
        let dir = tempfile::tempdir().unwrap();
        // Removing a directory with remove_file fails with something other
        // than NotFound
        let not_a_file = dir.path().join("subdir");
        std::fs::create_dir(&not_a_file).unwrap();
        let later = dir.path().join("later.hsnips");
        std::fs::write(&later, "").unwrap();

        let entries = clean_files([not_a_file.as_path(), later.as_path()]);
        assert!(entries[0].outcome.is_failure());
        assert!(matches!(entries[1].outcome, CleanOutcome::Removed));
        assert!(!later.exists());
    }

    #[test]
    fn test_entry_messages() {
        let entry = CleanEntry {
            path: PathBuf::from("/tmp/latex.hsnips"),
            outcome: CleanOutcome::NotFound,
        };
        assert_eq!(entry.to_string(), "Not found, skipping: /tmp/latex.hsnips");
    }
}
