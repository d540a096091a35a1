//! yt-dlp Python API wrappers.
//!
//! Type-safe bindings to [yt-dlp](https://github.com/yt-dlp/yt-dlp) `YoutubeDL` parameters and
//! to the subset of the info dict needed for subtitle discovery.
//!
//! ```no_run
//! use subdigest_dl::dl::{DownloadOptions, probe};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let opts = DownloadOptions {
//!     skip_download: Some(true),
//!     ..Default::default()
//! };
//! let info = probe("https://www.bilibili.com/video/BV1xx411c7mD", opts)?;
//! println!("{}: {:?}", info.title, info.catalog.languages().collect::<Vec<_>>());
//! # Ok(())
//! # }
//! ```

use indexmap::IndexMap;
use pyo3::ffi::c_str;
use pyo3::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// Filename templates using `%(field)s` syntax. Key `default` required.
#[derive(Clone, Debug, Default, IntoPyObject)]
pub struct OutputTemplates(pub Option<HashMap<String, String>>);

impl OutputTemplates {
    /// Create with a single default template.
    pub fn simple(default: String) -> Self {
        Self(Some(HashMap::from([("default".to_string(), default)])))
    }
}

/// yt-dlp `paths` option. Files are written under `home`.
#[derive(Clone, Debug, Default, IntoPyObject)]
pub struct OutputPaths(pub Option<HashMap<String, String>>);

impl OutputPaths {
    /// Create with only a home directory.
    pub fn home(home: &Path) -> Self {
        Self::default().with_home(home)
    }

    pub fn with_home(self, home: &Path) -> Self {
        self.with_key("home".to_string(), home)
    }

    fn with_key(self, key: String, value: &Path) -> Self {
        let mut inner = self.0.unwrap_or_default();
        inner.insert(key, value.to_string_lossy().to_string());
        Self(Some(inner))
    }
}

/// yt-dlp configuration passed to `YoutubeDL(params)`.
///
/// `None` fields are dropped by the shim before yt-dlp sees them, so yt-dlp defaults apply.
#[derive(Clone, Debug, Default, IntoPyObject)]
pub struct DownloadOptions {
    /// Netscape cookie file used for authenticated extraction
    pub cookiefile: Option<String>,
    /// Do not download the media itself
    pub skip_download: Option<bool>,
    /// Write manual subtitles
    pub writesubtitles: Option<bool>,
    /// Write auto-generated subtitles
    pub writeautomaticsub: Option<bool>,
    /// Subtitle languages to request, most preferred first
    pub subtitleslangs: Option<Vec<String>>,
    /// Subtitle format or `/`-separated preference list, e.g. `srt/vtt`
    pub subtitlesformat: Option<String>,
    pub paths: Option<OutputPaths>,
    pub outtmpl: Option<OutputTemplates>,
    pub quiet: Option<bool>,
    pub no_warnings: Option<bool>,
}

impl DownloadOptions {
    /// Use a Netscape cookie export for authenticated requests.
    pub fn with_cookies(self, path: &Path) -> Self {
        Self {
            cookiefile: Some(path.to_string_lossy().to_string()),
            ..self
        }
    }
}

/// One downloadable encoding of a subtitle track.
#[derive(Clone, Debug, Default, PartialEq, Eq, FromPyObject)]
#[pyo3(from_item_all)]
pub struct SubtitleTrack {
    /// Format tag (`srt`, `vtt`, `ass`, `json3`, ...); empty when the provider omits it
    pub ext: String,
    /// Human-readable language name
    pub name: Option<String>,
    pub url: Option<String>,
}

impl SubtitleTrack {
    pub fn new(ext: impl Into<String>) -> Self {
        Self {
            ext: ext.into(),
            ..Default::default()
        }
    }
}

/// Language code to available encodings, in provider order.
pub type TrackMap = IndexMap<String, Vec<SubtitleTrack>>;

/// Subtitle tracks reported by a probe, split by provenance.
///
/// Insertion order follows the provider response, which makes "first available language"
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, FromPyObject)]
#[pyo3(from_item_all)]
pub struct SubtitleCatalog {
    /// Human-authored tracks (`subtitles` in the info dict)
    pub manual: TrackMap,
    /// Machine-generated tracks (`automatic_captions` in the info dict)
    pub automatic: TrackMap,
}

impl SubtitleCatalog {
    pub fn is_empty(&self) -> bool {
        self.manual.is_empty() && self.automatic.is_empty()
    }

    /// All language codes, manual first, in provider order. May repeat a code present in both.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.manual.keys().chain(self.automatic.keys()).map(String::as_str)
    }

    /// Encodings for `lang`: manual list if non-empty, otherwise the automatic one.
    pub fn tracks(&self, lang: &str) -> &[SubtitleTrack] {
        match self.manual.get(lang) {
            Some(tracks) if !tracks.is_empty() => tracks.as_slice(),
            _ => self.automatic.get(lang).map(Vec::as_slice).unwrap_or(&[]),
        }
    }

    /// Add languages from `other` that this catalog does not know yet.
    pub fn merge(&mut self, other: SubtitleCatalog) {
        for (lang, tracks) in other.manual {
            self.manual.entry(lang).or_insert(tracks);
        }
        for (lang, tracks) in other.automatic {
            self.automatic.entry(lang).or_insert(tracks);
        }
    }
}

/// Essential metadata from the yt-dlp info dict.
///
/// Extracted via `FromPyObject` from the normalized dict built by the shim; missing keys are
/// filled with `None` or empty maps there.
#[derive(Clone, Debug, FromPyObject)]
#[pyo3(from_item_all)]
pub struct VideoInfo {
    /// Video identifier
    pub id: String,
    /// Video title, `"unknown"` when the provider has none
    pub title: String,
    /// Extractor name (e.g., "BiliBili")
    pub extractor_key: Option<String>,
    /// URL to the video webpage
    pub webpage_url: Option<String>,
    /// Length of the video in seconds
    pub duration: Option<f64>,
    /// Available subtitle tracks
    pub catalog: SubtitleCatalog,
}

/// Fetch metadata without downloading anything.
///
/// Uses `extract_info(url, download=False)`.
pub fn probe(url: &str, opts: DownloadOptions) -> PyResult<VideoInfo> {
    call("probe", url, opts)
}

/// Run a download with `opts` and return the info dict of the processed video.
///
/// Uses `extract_info(url, download=True)`; with `skip_download` only side files such as
/// subtitles are written.
pub fn download(url: &str, opts: DownloadOptions) -> PyResult<VideoInfo> {
    call("download", url, opts)
}

fn call(func: &str, url: &str, opts: DownloadOptions) -> PyResult<VideoInfo> {
    Python::attach(|py| {
        let module = PyModule::from_code(py, c_str!(include_str!("./dl.py")), c"dl.py", c"dl")?;

        let py_params = opts.into_pyobject(py)?;

        let info = module.getattr(func)?.call1((url, py_params))?;

        info.extract()
    })
}
