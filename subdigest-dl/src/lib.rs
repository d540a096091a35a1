//! Type-safe Rust bindings to the [yt-dlp](https://github.com/yt-dlp/yt-dlp) Python library,
//! narrowed to subtitle discovery and subtitle-only downloads.
//!
//! ## Modules
//!
//! - [`dl`] - Core yt-dlp API wrappers and the typed subtitle catalog
//! - [`subs`] - Presets for metadata probes and subtitle fetches
//!
//! ## Quick Start
//!
//! **Probe** available subtitles:
//! ```no_run
//! use subdigest_dl::{dl::probe, subs::SubtitleRequest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let info = probe("https://www.bilibili.com/video/BV1xx411c7mD", SubtitleRequest::Probe.into())?;
//! for lang in info.catalog.languages() {
//!     println!("{lang}: {:?}", info.catalog.tracks(lang));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! **Custom configuration**:
//! ```no_run
//! use subdigest_dl::dl::{download, DownloadOptions, OutputPaths, OutputTemplates};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let opts = DownloadOptions {
//!     skip_download: Some(true),
//!     writesubtitles: Some(true),
//!     subtitleslangs: Some(vec!["en".to_string()]),
//!     subtitlesformat: Some("vtt".to_string()),
//!     paths: Some(OutputPaths::home(Path::new("subs"))),
//!     outtmpl: Some(OutputTemplates::simple("%(id)s.%(ext)s".to_string())),
//!     ..Default::default()
//! }
//! .with_cookies(Path::new("cookies.txt"));
//!
//! download("https://www.youtube.com/watch?v=jNQXAC9IVRw", opts)?;
//! # Ok(())
//! # }
//! ```

pub mod dl;
pub mod subs;
