//! Error types for subdigest organized by pipeline stage.

use std::path::PathBuf;
use thiserror::Error;

/// Extraction provider failure (network, authentication, extractor bugs).
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// Subtitle file could not be read as UTF-8 text.
#[derive(Debug, Error)]
#[error("failed to read subtitle file {path:?}")]
pub struct ParseError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Subtitle acquisition failure, one variant per stage.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// Per-run output directory could not be created
    #[error("failed to create output directory under {root:?}")]
    OutputDir {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Metadata probe failed
    #[error("failed to probe video metadata")]
    Probe(#[source] ProviderError),

    /// Subtitle download failed
    #[error("failed to download subtitles")]
    Download(#[source] ProviderError),

    /// Download finished but no subtitle file was found
    #[error("no subtitle file found in {dir:?}")]
    NotFound { dir: PathBuf },

    /// Located file could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Summarization request failure.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Nothing to summarize
    #[error("subtitle text is empty")]
    EmptyInput,

    /// Connection, TLS or timeout failure
    #[error("summarization request failed")]
    Transport(#[source] Box<ureq::Transport>),

    /// Endpoint answered with a non-success status
    #[error("summarization endpoint responded with {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not the expected JSON
    #[error("failed to decode summarization response")]
    Decode(#[source] std::io::Error),

    /// Response had no completion text
    #[error("summarization response contained no content")]
    EmptyCompletion,
}

impl From<ureq::Error> for SummarizeError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(status, response) => SummarizeError::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => SummarizeError::Transport(Box::new(transport)),
        }
    }
}
