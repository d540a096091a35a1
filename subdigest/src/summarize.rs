//! Subtitle summarization over an OpenAI-compatible chat completions endpoint.

use crate::error::SummarizeError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://aihubmix.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_LANGUAGE: &str = "Chinese";

/// Endpoint, credentials and prompt settings.
#[derive(Clone, Debug)]
pub struct SummarizerConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Language the summary is written in
    pub language: String,
}

impl SummarizerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Default, Deserialize)]
struct Choice {
    #[serde(default)]
    message: ChoiceMessage,
}

#[derive(Debug, Default, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
    }
}

/// Blocking chat completions client.
#[derive(Debug)]
pub struct Summarizer {
    agent: ureq::Agent,
    config: SummarizerConfig,
}

impl Summarizer {
    pub fn new(config: SummarizerConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Self { agent, config }
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Summarize `text` as Markdown. `title` is included in the prompt when non-empty.
    pub fn summarize(&self, text: &str, title: &str) -> Result<String, SummarizeError> {
        if text.trim().is_empty() {
            tracing::warn!("subtitle text is empty, skipping summarization");
            return Err(SummarizeError::EmptyInput);
        }

        let prompt = build_prompt(text, title, &self.config.language);
        let request = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: &prompt,
            }],
        };

        tracing::info!(
            url = self.config.api_url,
            model = self.config.model,
            prompt_chars = prompt.chars().count(),
            "requesting summary"
        );

        let response = self
            .agent
            .post(&self.config.api_url)
            .set("Authorization", &format!("Bearer {}", self.config.api_key))
            .send_json(&request)
            .map_err(|e| {
                let e = SummarizeError::from(e);
                tracing::error!(error = %e, "summarization request failed");
                e
            })?;

        let body: ChatResponse = response.into_json().map_err(|e| {
            tracing::error!(error = %e, "failed to decode summarization response");
            SummarizeError::Decode(e)
        })?;

        match body.into_content() {
            Some(summary) => {
                tracing::info!(chars = summary.chars().count(), "summary received");
                Ok(summary)
            }
            None => {
                tracing::warn!("summarization response contained no content");
                Err(SummarizeError::EmptyCompletion)
            }
        }
    }
}

/// Prompt asking for a structured Markdown summary of the subtitles.
pub fn build_prompt(text: &str, title: &str, language: &str) -> String {
    let title_line = if title.is_empty() {
        String::new()
    } else {
        format!("Video title: {title}\n\n")
    };

    format!(
        "Summarize the following video subtitles into a structured Markdown document.\n\n\
         {title_line}Subtitles:\n\n\
         {text}\n\n\
         Requirements:\n\
         1. Extract the core content and key points of the video\n\
         2. Use Markdown with headings, paragraphs and lists\n\
         3. Keep the summary concise and focused\n\
         4. If the subtitles are long, summarize them chapter by chapter\n\
         5. Write the summary in {language}\n\n\
         Begin the summary:"
    )
}
