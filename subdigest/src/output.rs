//! Per-run output directory and summary file.

use crate::locate::sanitize_title;
use chrono::{DateTime, Local};
use std::io;
use std::path::{Path, PathBuf};

/// Directory name format for a run, second resolution.
pub const RUN_DIR_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Maximum characters of the title kept in the summary file name.
pub const MAX_TITLE_CHARS: usize = 50;

/// Create a fresh `<root>/<YYYYMMDD_HHMMSS>` directory.
pub fn create_run_dir(root: &Path) -> io::Result<PathBuf> {
    create_run_dir_at(root, Local::now())
}

/// Create the run directory for `time`, appending `_1`, `_2`, ... if the name is taken.
pub fn create_run_dir_at(root: &Path, time: DateTime<Local>) -> io::Result<PathBuf> {
    std::fs::create_dir_all(root)?;

    let stamp = time.format(RUN_DIR_FORMAT).to_string();
    let mut suffix = 0u32;

    loop {
        let name = match suffix {
            0 => stamp.clone(),
            n => format!("{stamp}_{n}"),
        };
        let dir = root.join(name);

        match std::fs::create_dir(&dir) {
            Ok(()) => {
                tracing::info!(dir = ?dir.display(), "created output directory");
                return Ok(dir);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => suffix += 1,
            Err(e) => return Err(e),
        }
    }
}

/// `<sanitized title>.md`, or `summary.md` when nothing usable is left.
pub fn summary_file_name(title: &str) -> String {
    let safe_title: String = sanitize_title(title)
        .trim()
        .chars()
        .take(MAX_TITLE_CHARS)
        .collect();

    if safe_title.is_empty() {
        "summary.md".to_string()
    } else {
        format!("{safe_title}.md")
    }
}

/// Write `summary` into `dir` and return the file path.
pub fn write_summary(summary: &str, title: &str, dir: &Path) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let path = dir.join(summary_file_name(title));
    std::fs::write(&path, summary)?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn run_dir_uses_timestamp() {
        let root = TempDir::new().unwrap();

        let dir = create_run_dir_at(root.path(), fixed_time()).unwrap();

        assert_eq!(dir, root.path().join("20240309_140507"));
        assert!(dir.is_dir());
    }

    #[test]
    fn run_dir_collision_gets_suffix() {
        let root = TempDir::new().unwrap();

        let first = create_run_dir_at(root.path(), fixed_time()).unwrap();
        let second = create_run_dir_at(root.path(), fixed_time()).unwrap();
        let third = create_run_dir_at(root.path(), fixed_time()).unwrap();

        assert_eq!(first, root.path().join("20240309_140507"));
        assert_eq!(second, root.path().join("20240309_140507_1"));
        assert_eq!(third, root.path().join("20240309_140507_2"));
    }

    #[test]
    fn run_dir_creates_missing_root() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("a").join("b");

        let dir = create_run_dir_at(&nested, fixed_time()).unwrap();

        assert!(dir.starts_with(&nested));
    }

    #[test]
    fn file_name_is_sanitized_and_truncated() {
        assert_eq!(summary_file_name("What: is <Rust>?"), "What is Rust.md");
        assert_eq!(summary_file_name("  padded  "), "padded.md");

        let long = "字".repeat(80);
        assert_eq!(summary_file_name(&long), format!("{}.md", "字".repeat(50)));
    }

    #[test]
    fn file_name_falls_back_to_summary() {
        assert_eq!(summary_file_name(""), "summary.md");
        assert_eq!(summary_file_name("???"), "summary.md");
        assert_eq!(summary_file_name("  "), "summary.md");
    }

    #[test]
    fn writes_whole_summary() {
        let dir = TempDir::new().unwrap();

        let path = write_summary("# Title\n\n- point", "Talk/Part 1", dir.path()).unwrap();

        assert_eq!(path, dir.path().join("TalkPart 1.md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Title\n\n- point");
    }
}
