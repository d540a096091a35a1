//! Subtitle presets: metadata probes and subtitle-only downloads.
//!
//! ```no_run
//! use subdigest_dl::{dl::download, subs::SubtitleRequest};
//! use std::path::PathBuf;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = SubtitleRequest::Fetch {
//!     languages: vec!["ai-zh".to_string(), "en".to_string()],
//!     format: "srt".to_string(),
//!     dir: PathBuf::from("output/20240101_120000"),
//! };
//! download("https://www.bilibili.com/video/BV1xx411c7mD", request.into())?;
//! # Ok(())
//! # }
//! ```
//!
//! **Output:** `<dir>/<title>.<lang>.<ext>`

use crate::dl::{DownloadOptions, OutputPaths, OutputTemplates};
use std::path::PathBuf;

/// Output template for subtitle files, relative to the `home` path.
pub const SUBTITLE_OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Format preference handed to yt-dlp when no specific format was chosen.
pub const FORMAT_PREFERENCE: &str = "srt/vtt/ass/ssa";

/// What to ask the extractor for.
#[derive(Clone, Debug)]
pub enum SubtitleRequest {
    /// Metadata only
    Probe,
    /// Metadata, with subtitle writing switched on so extractors that only fill the subtitle
    /// fields on request report them. Nothing is written because the download is skipped.
    ProbeWithSubtitles { languages: Vec<String> },
    /// Write subtitle files for `languages` in `format` into `dir`, skipping the media
    Fetch {
        languages: Vec<String>,
        format: String,
        dir: PathBuf,
    },
}

impl From<SubtitleRequest> for DownloadOptions {
    fn from(request: SubtitleRequest) -> Self {
        let base = Self {
            skip_download: Some(true),
            quiet: Some(true),
            no_warnings: Some(true),
            ..Default::default()
        };

        match request {
            SubtitleRequest::Probe => base,
            SubtitleRequest::ProbeWithSubtitles { languages } => Self {
                writesubtitles: Some(true),
                writeautomaticsub: Some(true),
                subtitleslangs: Some(languages),
                ..base
            },
            SubtitleRequest::Fetch {
                languages,
                format,
                dir,
            } => Self {
                writesubtitles: Some(true),
                writeautomaticsub: Some(true),
                subtitleslangs: Some(languages),
                subtitlesformat: Some(format),
                paths: Some(OutputPaths::home(&dir)),
                outtmpl: Some(OutputTemplates::simple(
                    SUBTITLE_OUTPUT_TEMPLATE.to_string(),
                )),
                ..base
            },
        }
    }
}
