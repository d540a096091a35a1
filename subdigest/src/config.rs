//! Resolved run configuration.
//!
//! [`Cli`] holds raw arguments (clap merges flags, environment and defaults); [`Config`] is the
//! validated form the pipeline runs with.

use crate::cli::Cli;
use crate::summarize::SummarizerConfig;
use color_eyre::Section;
use eyre::{Result, eyre};
use std::path::PathBuf;
use std::time::Duration;

/// Validated configuration for one run.
#[derive(Debug)]
pub struct Config {
    pub url: String,
    /// Netscape cookie export passed to the provider
    pub cookies: PathBuf,
    /// Root under which per-run directories are created
    pub output: PathBuf,
    pub summarizer: SummarizerConfig,
}

impl TryFrom<Cli> for Config {
    type Error = eyre::Error;

    fn try_from(cli: Cli) -> Result<Self> {
        if !cli.cookies.is_file() {
            return Err(
                eyre!("cookie file not found: {:?}", cli.cookies.display())
                    .suggestion("export browser cookies in Netscape format to cookies.txt")
                    .suggestion("or pass --cookies <PATH> / set SUBDIGEST_COOKIES"),
            );
        }

        let api_key = match cli.api_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => {
                return Err(eyre!("AI API key is not set")
                    .suggestion("set AI_API_KEY in the environment or .env, or pass --api-key"));
            }
        };

        Ok(Self {
            url: cli.url,
            cookies: cli.cookies,
            output: cli.output,
            summarizer: SummarizerConfig {
                api_url: cli.api_url,
                api_key,
                model: cli.model,
                timeout: Duration::from_secs(cli.timeout),
                language: cli.language,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::NamedTempFile;

    const URL: &str = "https://www.bilibili.com/video/BV1xx411c7mD";

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["subdigest", URL];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn resolves_valid_arguments() {
        let cookies = NamedTempFile::new().unwrap();
        let cookies_arg = cookies.path().to_str().unwrap();

        let config = Config::try_from(parse(&[
            "--cookies",
            cookies_arg,
            "--api-key",
            "sk-test",
            "--api-url",
            "http://localhost:8080/v1/chat/completions",
            "--model",
            "test-model",
            "--output",
            "out",
            "--timeout",
            "30",
            "--language",
            "English",
        ]))
        .unwrap();

        assert_eq!(config.url, URL);
        assert_eq!(config.cookies, cookies.path());
        assert_eq!(config.output, PathBuf::from("out"));
        assert_eq!(config.summarizer.api_key, "sk-test");
        assert_eq!(
            config.summarizer.api_url,
            "http://localhost:8080/v1/chat/completions"
        );
        assert_eq!(config.summarizer.model, "test-model");
        assert_eq!(config.summarizer.timeout, Duration::from_secs(30));
        assert_eq!(config.summarizer.language, "English");
    }

    #[test]
    fn missing_cookie_file_is_rejected() {
        let err = Config::try_from(parse(&[
            "--cookies",
            "/nonexistent/cookies.txt",
            "--api-key",
            "sk-test",
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("cookie file not found"));
    }

    #[test]
    fn cookie_directory_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();

        let result = Config::try_from(parse(&[
            "--cookies",
            dir.path().to_str().unwrap(),
            "--api-key",
            "sk-test",
        ]));

        assert!(result.is_err());
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let cookies = NamedTempFile::new().unwrap();

        let err = Config::try_from(parse(&[
            "--cookies",
            cookies.path().to_str().unwrap(),
            "--api-key",
            "  ",
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("API key"));
    }
}
