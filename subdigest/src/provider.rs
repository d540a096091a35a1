//! Extraction provider seam.
//!
//! The orchestrator talks to the extraction engine only through [`SubtitleProvider`], so tests
//! can script probe and download outcomes without Python or network access.

use crate::error::ProviderError;
use subdigest_dl::dl::{self, DownloadOptions, VideoInfo};

/// Metadata probe and subtitle download.
pub trait SubtitleProvider {
    /// Fetch metadata for `url` without writing files.
    fn probe(&self, url: &str, opts: DownloadOptions) -> Result<VideoInfo, ProviderError>;

    /// Write the requested subtitle files and return the metadata of the processed video.
    fn download(&self, url: &str, opts: DownloadOptions) -> Result<VideoInfo, ProviderError>;
}

/// yt-dlp through the embedded Python interpreter.
#[derive(Clone, Copy, Debug, Default)]
pub struct YtDlp;

impl SubtitleProvider for YtDlp {
    fn probe(&self, url: &str, opts: DownloadOptions) -> Result<VideoInfo, ProviderError> {
        Ok(dl::probe(url, opts)?)
    }

    fn download(&self, url: &str, opts: DownloadOptions) -> Result<VideoInfo, ProviderError> {
        Ok(dl::download(url, opts)?)
    }
}
