//! WebVTT and SubRip to plain text.
//!
//! Output keeps only cue text: one line per input text line, markup, timings, cue indices
//! and blank lines removed.

use crate::error::ParseError;
use crate::locate::SubtitleKind;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// `WEBVTT` header block up to the first blank line.
static VTT_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)WEBVTT.*?\n\n").expect("valid regex"));

/// WebVTT cue timing line, including trailing cue settings.
static VTT_TIMING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{2}:\d{2}:\d{2}\.\d{3}\s*-->\s*\d{2}:\d{2}:\d{2}\.\d{3}[^\n]*(?:\n|$)")
        .expect("valid regex")
});

/// SubRip cue timing line. A `.` millisecond separator is tolerated.
static SRT_TIMING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{2}:\d{2}:\d{2}[,.]\d{3}\s*-->\s*\d{2}:\d{2}:\d{2}[,.]\d{3}")
        .expect("valid regex")
});

static SRT_INDEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").expect("valid regex"));

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

static EXTRA_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Read `path` and convert it to plain text, choosing the format from the extension.
pub fn parse_file(path: &Path) -> Result<String, ParseError> {
    let kind = SubtitleKind::from_path(path);
    tracing::info!(path = ?path.display(), ?kind, "parsing subtitle file");

    let content = std::fs::read_to_string(path).map_err(|source| ParseError {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_str(&content, kind))
}

/// Convert subtitle `content` of the given kind to plain text.
pub fn parse_str(content: &str, kind: SubtitleKind) -> String {
    let content = normalize_newlines(content);

    let stripped = match kind {
        SubtitleKind::Vtt => strip_vtt(&content),
        SubtitleKind::Srt => strip_srt(&content),
        SubtitleKind::Unknown => {
            tracing::warn!("unknown subtitle format, applying generic cleanup only");
            content
        }
    };

    cleanup(&stripped)
}

fn normalize_newlines(content: &str) -> String {
    content
        .strip_prefix('\u{feff}')
        .unwrap_or(content)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

fn strip_vtt(content: &str) -> String {
    let content = VTT_HEADER.replace(content, "");
    VTT_TIMING.replace_all(&content, "\n").into_owned()
}

/// Drop cue indices and timing lines.
///
/// A digit-only line is held back until the next line is seen: followed by a timing line it is
/// a cue index and both are dropped, otherwise it is cue text. Cues without a blank separator
/// are handled the same way.
fn strip_srt(content: &str) -> String {
    let mut text = Vec::new();
    let mut held: Option<&str> = None;

    for line in content.lines().map(str::trim) {
        if let Some(index) = held.take() {
            if SRT_TIMING.is_match(line) {
                continue;
            }
            text.push(index);
        }

        if line.is_empty() {
            continue;
        }

        if SRT_INDEX.is_match(line) {
            held = Some(line);
        } else {
            text.push(line);
        }
    }

    text.extend(held);
    text.join("\n")
}

fn cleanup(content: &str) -> String {
    let content = TAG.replace_all(content, "");
    let content = EXTRA_NEWLINES.replace_all(&content, "\n\n");

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VTT_SAMPLE: &str = "WEBVTT\n\n00:00:00.000 --> 00:00:02.000\nHello world\n\n00:00:02.000 --> 00:00:04.000\nSecond line\n";
    const SRT_SAMPLE: &str = "1\n00:00:00,000 --> 00:00:02,000\nHello world\n\n2\n00:00:02,000 --> 00:00:04,000\nSecond line\n";

    #[test]
    fn parses_vtt_sample() {
        assert_eq!(parse_str(VTT_SAMPLE, SubtitleKind::Vtt), "Hello world\nSecond line");
    }

    #[test]
    fn parses_srt_sample() {
        assert_eq!(parse_str(SRT_SAMPLE, SubtitleKind::Srt), "Hello world\nSecond line");
    }

    #[test]
    fn vtt_header_metadata_and_cue_settings_are_removed() {
        let input = "WEBVTT\nKind: captions\nLanguage: en\n\n\
                     00:00:01.000 --> 00:00:03.500 align:start position:0%\n\
                     <c>Styled</c> <b>text</b>\n";

        assert_eq!(parse_str(input, SubtitleKind::Vtt), "Styled text");
    }

    #[test]
    fn vtt_timing_on_last_line_without_newline() {
        let input = "WEBVTT\n\nIntro\n00:00:01.000 --> 00:00:03.000";

        assert_eq!(parse_str(input, SubtitleKind::Vtt), "Intro");
    }

    #[test]
    fn srt_multiline_cues_keep_every_text_line() {
        let input = "1\n00:00:00,000 --> 00:00:02,000\nFirst\nstill first\n\n\
                     2\n00:00:02,500 --> 00:00:04,000\n<i>Second</i>\n";

        assert_eq!(
            parse_str(input, SubtitleKind::Srt),
            "First\nstill first\nSecond"
        );
    }

    #[test]
    fn srt_digits_inside_cue_text_are_text() {
        let input = "1\n00:00:00,000 --> 00:00:02,000\nThe year was\n1984\n";

        assert_eq!(parse_str(input, SubtitleKind::Srt), "The year was\n1984");
    }

    #[test]
    fn srt_tolerates_dot_separator_and_crlf() {
        let input = "1\r\n00:00:00.000 --> 00:00:02.000\r\nHello\r\n\r\n";

        assert_eq!(parse_str(input, SubtitleKind::Srt), "Hello");
    }

    #[test]
    fn srt_digits_without_timing_are_text() {
        let input = "7\nOrphan text\n";

        assert_eq!(parse_str(input, SubtitleKind::Srt), "7\nOrphan text");
    }

    #[test]
    fn srt_cues_without_blank_separator() {
        let input = "1\n00:00:00,000 --> 00:00:02,000\nHello world\n\
                     2\n00:00:02,000 --> 00:00:04,000\nSecond line\n";

        assert_eq!(parse_str(input, SubtitleKind::Srt), "Hello world\nSecond line");
    }

    #[test]
    fn srt_digit_line_ending_a_cue_is_text() {
        let input = "1\n00:00:00,000 --> 00:00:02,000\nThe answer is\n42\n\n\
                     2\n00:00:02,000 --> 00:00:04,000\nAnd then\n3\n\
                     00:00:04,000 --> 00:00:05,000\nNext\n7";

        assert_eq!(
            parse_str(input, SubtitleKind::Srt),
            "The answer is\n42\nAnd then\nNext\n7"
        );
    }

    #[test]
    fn srt_leading_bom_is_ignored() {
        let input = "\u{feff}1\n00:00:00,000 --> 00:00:01,000\nBom\n";

        assert_eq!(parse_str(input, SubtitleKind::Srt), "Bom");
    }

    #[test]
    fn unknown_format_gets_generic_cleanup() {
        let input = "  <font color=\"red\">Line</font>  \n\n\n\n  Next  \n";

        assert_eq!(parse_str(input, SubtitleKind::Unknown), "Line\nNext");
    }

    #[test]
    fn blank_input_is_empty() {
        for kind in [SubtitleKind::Vtt, SubtitleKind::Srt, SubtitleKind::Unknown] {
            assert_eq!(parse_str(" \n\t\n\n", kind), "");
        }
    }

    #[test]
    fn clean_text_passes_through_unchanged() {
        let clean = "Hello there\nGeneral Kenobi\nYou are a bold one";

        assert_eq!(parse_str(clean, SubtitleKind::Vtt), clean);
        assert_eq!(parse_str(clean, SubtitleKind::Srt), clean);
        assert_eq!(parse_str(&format!("  {clean}  \n"), SubtitleKind::Srt), clean);
    }

    #[test]
    fn parse_file_uses_extension() {
        let mut file = tempfile::Builder::new().suffix(".SRT").tempfile().unwrap();
        file.write_all(SRT_SAMPLE.as_bytes()).unwrap();

        assert_eq!(parse_file(file.path()).unwrap(), "Hello world\nSecond line");
    }

    #[test]
    fn parse_file_rejects_invalid_utf8() {
        let mut file: NamedTempFile = tempfile::Builder::new().suffix(".vtt").tempfile().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0xd8]).unwrap();

        let err = parse_file(file.path()).unwrap_err();

        assert_eq!(err.path, file.path());
    }

    #[test]
    fn parse_file_reports_missing_file() {
        let err = parse_file(Path::new("/nonexistent/subtitle.vtt")).unwrap_err();

        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
    }
}
