//! Fetch subtitles for a video with yt-dlp and summarize them with an LLM.
//!
//! ## Pipeline
//!
//! 1. [`acquire`] probes the video, [`select`]s a subtitle track, downloads it,
//!    [`locate`]s the written file and [`parse`]s it into plain text
//! 2. [`summarize`] sends the text to a chat completions endpoint
//! 3. [`output`] writes the Markdown summary next to the subtitle file
//!
//! [`cli`] drives the pipeline with Ctrl-C handling; [`provider`] abstracts the extraction
//! engine so the pipeline can run against a scripted provider in tests.

pub mod acquire;
pub mod cli;
pub mod config;
pub mod error;
pub mod locate;
pub mod output;
pub mod parse;
pub mod provider;
pub mod select;
pub mod summarize;
