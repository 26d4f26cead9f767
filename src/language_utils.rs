use isolang::Language;
use std::fmt;
use std::path::Path;

/// Language utilities for subtitle correction
///
/// The correction language is read from the subtitle file name (`movie.fr.srt`,
/// `movie [eng].srt`) and decides which localized word lists are consulted and
/// whether French-only rules run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CorrectionLanguage {
    French,
    English,
    #[default]
    Undefined,
}

impl CorrectionLanguage {
    /// Detect the language from the tag that precedes the `.srt` extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let file_name = match path.as_ref().file_name() {
            Some(name) => name.to_string_lossy().to_lowercase(),
            None => return Self::Undefined,
        };

        let Some(stem) = file_name.strip_suffix(".srt") else {
            return Self::Undefined;
        };

        match language_tag(stem) {
            Some(tag) => Self::from_tag(tag),
            None => Self::Undefined,
        }
    }

    /// Map a language tag (`fr`, `fre`, `eng`, ...) to a correction language
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().to_lowercase();

        // Legacy tag written by the old subtitle toolchain on French files
        if tag == "mis" || tag == "french" {
            return Self::French;
        }
        if tag == "english" {
            return Self::English;
        }

        match iso_language(&tag) {
            Some(Language::Fra) => Self::French,
            Some(Language::Eng) => Self::English,
            _ => Self::Undefined,
        }
    }

    /// Suffix used for localized word-list files
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::French => Some("fr"),
            Self::English => Some("eng"),
            Self::Undefined => None,
        }
    }

    pub fn is_french(&self) -> bool {
        matches!(self, Self::French)
    }
}

impl fmt::Display for CorrectionLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::French => write!(f, "French"),
            Self::English => write!(f, "English"),
            Self::Undefined => write!(f, "undefined"),
        }
    }
}

/// Resolve an ISO 639-1, 639-2/T or 639-2/B code
pub fn iso_language(code: &str) -> Option<Language> {
    let normalized_code = code.trim().to_lowercase();

    match normalized_code.len() {
        2 => Language::from_639_1(&normalized_code),
        3 => {
            // ISO 639-2/B codes that differ from their 639-2/T form
            let part2t = match normalized_code.as_str() {
                "fre" => "fra",
                "ger" => "deu",
                "dut" => "nld",
                "gre" => "ell",
                "chi" => "zho",
                "cze" => "ces",
                "rum" => "ron",
                other => other,
            };
            Language::from_639_3(part2t)
        }
        _ => None,
    }
}

/// Extract the trailing language tag of a file stem
///
/// `movie.fr` -> `fr`, `movie [eng]` -> `eng`, `movie_fre` -> `fre`.
fn language_tag(stem: &str) -> Option<&str> {
    let stem = stem.trim_end();

    if let Some(inner) = stem.strip_suffix(']') {
        let start = inner.rfind('[')?;
        return Some(&inner[start + 1..]);
    }

    let start = stem
        .rfind(|c: char| c == '.' || c == '_' || c == '-' || c.is_whitespace())
        .map(|index| index + 1)?;
    let tag = &stem[start..];

    if tag.is_empty() { None } else { Some(tag) }
}
