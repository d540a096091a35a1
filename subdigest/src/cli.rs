//! CLI argument definitions and the run driver.

use crate::acquire::Acquirer;
use crate::config::Config;
use crate::output::write_summary;
use crate::provider::{SubtitleProvider, YtDlp};
use crate::summarize::{DEFAULT_API_URL, DEFAULT_LANGUAGE, DEFAULT_MODEL, Summarizer};
use clap::Parser;
use color_eyre::Section;
use eyre::{Context, Result, eyre};
use std::path::PathBuf;
use tokio::task::{JoinError, JoinHandle};

#[derive(Debug, Parser)]
#[command(name = "subdigest")]
#[command(about = "Download video subtitles and summarize them with an LLM")]
#[command(version)]
pub struct Cli {
    /// Video URL
    pub url: String,

    /// Netscape-format cookie file
    #[arg(long, env = "SUBDIGEST_COOKIES", default_value = "cookies.txt")]
    pub cookies: PathBuf,

    /// API key for the summarization endpoint
    #[arg(long, env = "AI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat completions endpoint
    #[arg(long, env = "AI_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Model name
    #[arg(long, env = "AI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Output root directory
    #[arg(short, long, env = "SUBDIGEST_OUTPUT", default_value = "output")]
    pub output: PathBuf,

    /// Summarization request timeout in seconds
    #[arg(long, default_value_t = 120)]
    pub timeout: u64,

    /// Language the summary is written in
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    pub language: String,
}

/// Summary text produced by a completed pipeline.
#[derive(Debug)]
struct Digest {
    summary: String,
    title: String,
    dir: PathBuf,
}

/// How a run ended without error.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Summary written to this path
    Written(PathBuf),
    /// Interrupted before the summary was written
    Interrupted,
}

/// Execute CLI command - separated for testing.
pub fn run_cli(cli: Cli) -> Result<()> {
    tracing::debug!(url = cli.url, model = cli.model, output = ?cli.output, "parsed arguments");

    execute(cli.try_into()?, YtDlp).map(|_| ())
}

/// Run acquisition and summarization with `provider`, then write the summary.
///
/// The pipeline runs on a blocking thread raced against Ctrl-C. The summary is written here,
/// after the pipeline finished, so an interrupt never leaves a partial file.
pub fn execute<P>(config: Config, provider: P) -> Result<Outcome>
where
    P: SubtitleProvider + Send + 'static,
{
    execute_until(config, provider, tokio::signal::ctrl_c())
}

/// [`execute`], stopping early when `shutdown` resolves with `Ok`.
pub fn execute_until<P, S>(config: Config, provider: P, shutdown: S) -> Result<Outcome>
where
    P: SubtitleProvider + Send + 'static,
    S: Future<Output = std::io::Result<()>>,
{
    let Config {
        url,
        cookies,
        output,
        summarizer,
    } = config;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to start runtime")?;

    let summarizer = Summarizer::new(summarizer);
    let acquirer = Acquirer::new(provider, Some(cookies));

    let pipeline = move || -> Result<Digest> {
        tracing::info!("step 1: acquiring subtitles");

        let acquisition = acquirer
            .acquire(&url, &output)
            .wrap_err("failed to acquire subtitles")
            .with_suggestion(|| "check that the cookie file is fresh and the URL is reachable")?;

        tracing::info!("step 2: summarizing");

        let summary = summarizer
            .summarize(&acquisition.text, &acquisition.title)
            .wrap_err("failed to summarize subtitles")
            .with_note(|| {
                format!(
                    "subtitles were saved to: {:?}",
                    acquisition.subtitle.path.display()
                )
            })?;

        Ok(Digest {
            summary,
            title: acquisition.title,
            dir: acquisition.dir,
        })
    };

    let task = runtime.spawn_blocking(pipeline);

    let Some(joined) = runtime.block_on(interruptible(task, shutdown)) else {
        tracing::warn!("interrupted by user");
        runtime.shutdown_background();
        return Ok(Outcome::Interrupted);
    };

    let digest = joined.map_err(|e| eyre!(e).wrap_err("pipeline panicked"))??;

    tracing::info!("step 3: saving summary");

    let title = if digest.title.is_empty() {
        "summary"
    } else {
        digest.title.as_str()
    };
    let path = write_summary(&digest.summary, title, &digest.dir)
        .wrap_err_with(|| format!("failed to write summary to {:?}", digest.dir.display()))?;

    tracing::info!(path = ?path.display(), "summary saved");

    Ok(Outcome::Written(path))
}

/// Await `task`, or return `None` once `shutdown` fires.
///
/// A `shutdown` error means no interrupt can be observed, so the task is awaited to the end.
async fn interruptible<T, S>(
    mut task: JoinHandle<T>,
    shutdown: S,
) -> Option<Result<T, JoinError>>
where
    S: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        joined = &mut task => Some(joined),
        signal = shutdown => match signal {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for interrupt");
                Some(task.await)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.bilibili.com/video/BV1xx411c7mD";

    #[test]
    fn parses_url_with_explicit_flags() {
        let cli = Cli::try_parse_from([
            "subdigest",
            URL,
            "--cookies",
            "my_cookies.txt",
            "--model",
            "gpt-4o",
            "-o",
            "/tmp/out",
            "--timeout",
            "60",
            "--language",
            "English",
        ])
        .unwrap();

        assert_eq!(cli.url, URL);
        assert_eq!(cli.cookies.to_str(), Some("my_cookies.txt"));
        assert_eq!(cli.model, "gpt-4o");
        assert_eq!(cli.output.to_str(), Some("/tmp/out"));
        assert_eq!(cli.timeout, 60);
        assert_eq!(cli.language, "English");
    }

    #[test]
    fn timeout_and_language_have_defaults() {
        let cli = Cli::try_parse_from(["subdigest", URL]).unwrap();

        assert_eq!(cli.timeout, 120);
        assert_eq!(cli.language, "Chinese");
    }

    #[test]
    fn url_is_required() {
        assert!(Cli::try_parse_from(["subdigest"]).is_err());
    }

    #[test]
    fn timeout_must_be_numeric() {
        assert!(Cli::try_parse_from(["subdigest", URL, "--timeout", "soon"]).is_err());
    }

    #[tokio::test]
    async fn finished_task_is_returned() {
        let task = tokio::task::spawn_blocking(|| 42);

        let joined = interruptible(task, std::future::pending()).await;

        assert_eq!(joined.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn shutdown_abandons_running_task() {
        let (release, blocked) = std::sync::mpsc::channel::<()>();
        let task = tokio::task::spawn_blocking(move || blocked.recv().is_ok());

        let joined = interruptible(task, std::future::ready(Ok(()))).await;

        assert!(joined.is_none());
        drop(release);
    }

    #[tokio::test]
    async fn shutdown_listener_failure_waits_for_task() {
        let task = tokio::task::spawn_blocking(|| 42);
        let failed = std::future::ready(Err(std::io::Error::other("no signal handler")));

        let joined = interruptible(task, failed).await;

        assert_eq!(joined.unwrap().unwrap(), 42);
    }
}
