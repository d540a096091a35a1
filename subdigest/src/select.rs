//! Subtitle language and format selection.
//!
//! Pure policy over a [`SubtitleCatalog`]: no I/O, always returns a choice.

use std::fmt;
use subdigest_dl::dl::SubtitleCatalog;

/// Language codes in preference order. `ai-*` are platform auto-generated tracks.
pub const PREFERRED_LANGUAGES: &[&str] = &["ai-zh", "zh-CN", "zh", "ai-en", "en", "ai-ja", "ja"];

/// Languages appended to every download request after the selected one.
pub const FALLBACK_LANGUAGES: &[&str] = &["ai-zh", "zh-CN", "zh", "ai-en", "en"];

/// Language tried when the catalog reports nothing at all.
pub const DEFAULT_LANGUAGE: &str = "ai-zh";

/// Subtitle formats we know how to request, in preference order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubtitleFormat {
    Srt,
    Vtt,
    Ass,
    Ssa,
}

impl SubtitleFormat {
    pub const PREFERRED: [SubtitleFormat; 4] = [Self::Srt, Self::Vtt, Self::Ass, Self::Ssa];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Vtt => "vtt",
            Self::Ass => "ass",
            Self::Ssa => "ssa",
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chosen subtitle track.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub language: String,
    /// `None` lets the provider choose from its own format preference list
    pub format: Option<SubtitleFormat>,
}

impl Selection {
    /// Policy default used when the provider reports no tracks.
    pub fn fallback() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            format: Some(SubtitleFormat::Srt),
        }
    }

    /// Languages to request: the selection first, then [`FALLBACK_LANGUAGES`] without repeats.
    pub fn languages(&self) -> Vec<String> {
        let mut languages = vec![self.language.clone()];
        for lang in FALLBACK_LANGUAGES {
            if !languages.iter().any(|l| l == lang) {
                languages.push(lang.to_string());
            }
        }
        languages
    }
}

/// Pick a language and format from `catalog`.
pub fn select(catalog: &SubtitleCatalog) -> Selection {
    let Some(first) = catalog.languages().next() else {
        return Selection::fallback();
    };

    let language = PREFERRED_LANGUAGES
        .iter()
        .copied()
        .find(|pref| catalog.languages().any(|lang| lang == *pref))
        .unwrap_or(first);

    let tracks = catalog.tracks(language);
    let format = SubtitleFormat::PREFERRED
        .into_iter()
        .find(|format| tracks.iter().any(|track| track.ext == format.as_str()));

    Selection {
        language: language.to_string(),
        format,
    }
}
