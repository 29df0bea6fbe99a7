use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use tempfile::NamedTempFile;

/// Maximum size of the recovery log before it is restarted (1 MB).
const MAX_LOG_SIZE: u64 = 1_048_576;

/// Self-documenting header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
# tick recovery log, append-only.
# Each entry below is a task list that could not be saved normally.
# If tasks went missing, the most recent entry holds them.
# Safe to delete once recovered.

";

/// Return the path to the recovery log, next to the data file.
pub fn recovery_log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(".tick-recovery.log")
}

// ---------------------------------------------------------------------------
// Atomic file write
// ---------------------------------------------------------------------------

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Unsaved-payload logging
// ---------------------------------------------------------------------------

/// Append the serialized task list that failed to persist, with the write
/// error that caused it. Logging errors are swallowed and printed to stderr;
/// this path must never make a failed save worse.
pub fn log_unsaved_tasks(data_dir: &Path, payload: &str, reason: &str) {
    if let Err(e) = log_unsaved_inner(data_dir, payload, reason) {
        eprintln!("warning: could not write to recovery log: {}", e);
    }
}

fn log_unsaved_inner(data_dir: &Path, payload: &str, reason: &str) -> io::Result<()> {
    let path = recovery_log_path(data_dir);

    // Single writer per session, so a restart needs no locking: when the
    // log outgrows the cap, start a fresh one keeping only this entry.
    let oversize = std::fs::metadata(&path).is_ok_and(|m| m.len() > MAX_LOG_SIZE);
    if oversize {
        std::fs::remove_file(&path)?;
    }

    let needs_header = !path.exists() || std::fs::metadata(&path).map_or(true, |m| m.len() == 0);
    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }

    let timestamp = Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let mut block = format!("## {} save failed: {}\n", timestamp, reason);
    block.push_str(payload);
    if !payload.ends_with('\n') {
        block.push('\n');
    }
    block.push('\n');
    file.write_all(block.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.txt");

        atomic_write(&path, b"hello world").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello world");

        // Overwrite
        atomic_write(&path, b"goodbye").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "goodbye");
    }

    #[test]
    fn test_log_appends_header_once() {
        let tmp = TempDir::new().unwrap();

        log_unsaved_tasks(tmp.path(), "[{\"text\":\"a\"}]", "disk full");
        log_unsaved_tasks(tmp.path(), "[{\"text\":\"b\"}]", "disk full");

        let content = std::fs::read_to_string(recovery_log_path(tmp.path())).unwrap();
        assert_eq!(content.matches("# tick recovery log").count(), 1);
        assert!(content.contains("save failed: disk full"));
        assert!(content.contains("[{\"text\":\"a\"}]"));
        assert!(content.contains("[{\"text\":\"b\"}]"));
    }

    #[test]
    fn test_entries_are_timestamped() {
        let tmp = TempDir::new().unwrap();

        log_unsaved_tasks(tmp.path(), "[]", "permission denied");

        let content = std::fs::read_to_string(recovery_log_path(tmp.path())).unwrap();
        let entry_line = content
            .lines()
            .find(|l| l.starts_with("## "))
            .expect("entry header");
        // RFC 3339 with Z suffix
        assert!(entry_line.contains("T"));
        assert!(entry_line.contains("Z save failed: permission denied"));
    }

    #[test]
    fn test_oversize_log_restarts() {
        let tmp = TempDir::new().unwrap();
        let path = recovery_log_path(tmp.path());

        let big = "x".repeat((MAX_LOG_SIZE + 1) as usize);
        std::fs::write(&path, &big).unwrap();

        log_unsaved_tasks(tmp.path(), "[\"kept\"]", "disk full");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.len() < big.len());
        assert!(content.starts_with("# tick recovery log"));
        assert!(content.contains("[\"kept\"]"));
    }

    #[test]
    fn test_logging_failure_is_swallowed() {
        // Point at a directory that does not exist; must not panic.
        log_unsaved_tasks(Path::new("/nonexistent/tick-test"), "[]", "disk full");
    }
}
