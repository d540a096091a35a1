//! Subtitle acquisition: probe, select, download, locate, parse.
//!
//! Every failure is logged here with its context and returned as an [`AcquireError`]; callers
//! treat any error as "no subtitles for this run".

use crate::error::AcquireError;
use crate::locate::{SubtitleFile, locate};
use crate::output::create_run_dir;
use crate::parse::parse_file;
use crate::provider::SubtitleProvider;
use crate::select::{FALLBACK_LANGUAGES, Selection, select};
use std::path::{Path, PathBuf};
use subdigest_dl::dl::{DownloadOptions, SubtitleCatalog};
use subdigest_dl::subs::{FORMAT_PREFERENCE, SubtitleRequest};

/// Subtitles fetched and normalized for one video.
#[derive(Clone, Debug)]
pub struct Acquisition {
    /// Plain subtitle text
    pub text: String,
    /// Video title as reported by the provider
    pub title: String,
    /// Per-run output directory holding the subtitle file
    pub dir: PathBuf,
    pub subtitle: SubtitleFile,
}

/// Drives a [`SubtitleProvider`] through one acquisition.
#[derive(Debug)]
pub struct Acquirer<P> {
    provider: P,
    cookies: Option<PathBuf>,
}

impl<P: SubtitleProvider> Acquirer<P> {
    pub fn new(provider: P, cookies: Option<PathBuf>) -> Self {
        Self { provider, cookies }
    }

    /// Fetch the best subtitle track for `url` into a new run directory under `output_root`.
    pub fn acquire(&self, url: &str, output_root: &Path) -> Result<Acquisition, AcquireError> {
        let dir = create_run_dir(output_root).map_err(|source| {
            tracing::error!(root = ?output_root.display(), error = %source, "failed to create output directory");
            AcquireError::OutputDir {
                root: output_root.to_path_buf(),
                source,
            }
        })?;

        self.acquire_into(url, dir)
    }

    /// Fetch the best subtitle track for `url` into the existing directory `dir`.
    pub fn acquire_into(&self, url: &str, dir: PathBuf) -> Result<Acquisition, AcquireError> {
        tracing::info!(url, cookies = ?self.cookies, "probing video");

        let info = self
            .provider
            .probe(url, self.options(SubtitleRequest::Probe))
            .map_err(|e| {
                tracing::error!(url, error = %e, "probe failed");
                AcquireError::Probe(e)
            })?;

        tracing::info!(title = info.title, id = info.id, "video found");

        let mut catalog = info.catalog;

        if catalog.is_empty() {
            tracing::warn!("no subtitles in metadata, probing again with subtitle request");

            let request = SubtitleRequest::ProbeWithSubtitles {
                languages: FALLBACK_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            };
            let retry = self.provider.probe(url, self.options(request)).map_err(|e| {
                tracing::error!(url, error = %e, "subtitle probe failed");
                AcquireError::Probe(e)
            })?;

            catalog.merge(retry.catalog);
        }

        log_catalog(&catalog);

        let selection = select(&catalog);
        if catalog.is_empty() {
            tracing::warn!(
                language = selection.language,
                "catalog still empty, trying default language"
            );
        }
        tracing::info!(
            language = selection.language,
            format = selection.format.map_or("auto", |f| f.as_str()),
            "selected subtitles"
        );

        tracing::info!(dir = ?dir.display(), "downloading subtitles");

        let downloaded = self
            .provider
            .download(url, self.options(fetch_request(&selection, &dir)))
            .map_err(|e| {
                tracing::error!(url, error = %e, "subtitle download failed");
                AcquireError::Download(e)
            })?;

        log_dir_contents(&dir);

        let title = if downloaded.title.is_empty() {
            info.title
        } else {
            downloaded.title
        };

        let Some(subtitle) = locate(&dir, &title) else {
            tracing::error!(dir = ?dir.display(), title, "no subtitle file found");
            return Err(AcquireError::NotFound { dir });
        };

        tracing::info!(path = ?subtitle.path.display(), kind = ?subtitle.kind, "subtitle file found");

        let text = parse_file(&subtitle.path).map_err(|e| {
            tracing::error!(path = ?e.path.display(), error = %e.source, "failed to parse subtitle file");
            AcquireError::from(e)
        })?;

        tracing::info!(chars = text.chars().count(), "subtitles acquired");

        Ok(Acquisition {
            text,
            title,
            dir,
            subtitle,
        })
    }

    fn options(&self, request: SubtitleRequest) -> DownloadOptions {
        let opts = DownloadOptions::from(request);
        match self.cookies.as_deref() {
            Some(cookies) => opts.with_cookies(cookies),
            None => opts,
        }
    }
}

/// Download request for `selection`, writing into `dir`.
fn fetch_request(selection: &Selection, dir: &Path) -> SubtitleRequest {
    SubtitleRequest::Fetch {
        languages: selection.languages(),
        format: selection
            .format
            .map_or(FORMAT_PREFERENCE.to_string(), |f| f.as_str().to_string()),
        dir: dir.to_path_buf(),
    }
}

fn log_catalog(catalog: &SubtitleCatalog) {
    for (kind, tracks) in [("manual", &catalog.manual), ("automatic", &catalog.automatic)] {
        if tracks.is_empty() {
            tracing::info!(kind, "no subtitles");
        }
        for (lang, encodings) in tracks {
            let formats: Vec<&str> = encodings.iter().map(|t| t.ext.as_str()).collect();
            tracing::info!(kind, lang, ?formats, "available subtitles");
        }
    }
}

fn log_dir_contents(dir: &Path) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        if let Ok(meta) = entry.metadata()
            && meta.is_file()
        {
            tracing::debug!(file = ?entry.file_name(), size = meta.len(), "output file");
        }
    }
}
