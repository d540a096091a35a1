//! Find the subtitle file the provider wrote.
//!
//! The provider names files from its own title template and sanitizer, so matching is a
//! heuristic in two tiers: a `<title>*<ext>` prefix match, then the most recently modified
//! subtitle file in the directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Characters removed from titles before they are used in file names.
pub const UNSAFE_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Extensions searched, most preferred first.
const SUBTITLE_EXTENSIONS: [&str; 2] = ["vtt", "srt"];

/// Subtitle format inferred from a file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubtitleKind {
    Vtt,
    Srt,
    Unknown,
}

impl SubtitleKind {
    /// Case-insensitive lookup by extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("vtt") => Self::Vtt,
            Some(ext) if ext.eq_ignore_ascii_case("srt") => Self::Srt,
            _ => Self::Unknown,
        }
    }
}

/// Subtitle file on disk and its inferred format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubtitleFile {
    pub path: PathBuf,
    pub kind: SubtitleKind,
}

impl SubtitleFile {
    pub fn new(path: PathBuf) -> Self {
        let kind = SubtitleKind::from_path(&path);
        Self { path, kind }
    }
}

/// Remove characters that are unsafe in file names.
pub fn sanitize_title(title: &str) -> String {
    title.replace(UNSAFE_FILENAME_CHARS, "")
}

/// Locate the subtitle file for `title` in `dir`.
pub fn locate(dir: &Path, title: &str) -> Option<SubtitleFile> {
    let safe_title = sanitize_title(title);
    tracing::info!(dir = ?dir.display(), title = safe_title, "searching subtitle file");

    let files = match list_files(dir) {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!(dir = ?dir.display(), error = %e, "failed to list directory");
            return None;
        }
    };

    for ext in SUBTITLE_EXTENSIONS {
        let suffix = format!(".{ext}");
        let mut matches: Vec<&PathBuf> = files
            .iter()
            .filter(|path| {
                file_name(path).is_some_and(|name| {
                    name.starts_with(&safe_title) && name.ends_with(&suffix)
                })
            })
            .collect();
        matches.sort();

        if let Some(path) = matches.first() {
            tracing::debug!(?matches, "title match");
            return Some(SubtitleFile::new(path.to_path_buf()));
        }
    }

    tracing::info!("no title match, falling back to most recent subtitle file");

    files
        .into_iter()
        .filter(|path| has_subtitle_extension(path))
        .filter_map(|path| modified(&path).map(|time| (time, path)))
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, path)| SubtitleFile::new(path))
        .or_else(|| {
            tracing::warn!(dir = ?dir.display(), "no subtitle file found");
            None
        })
}

fn list_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    Ok(files)
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

fn has_subtitle_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUBTITLE_EXTENSIONS.contains(&ext))
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}
