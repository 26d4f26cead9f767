/*!
 * Removal of subtitles-for-the-deaf annotations.
 *
 * Handles speaker names (`MAN ON RADIO : ...`), blocks made only of sound
 * descriptions (`[DOOR CLOSES]`, `♪`) and inline asides (`(SIGHS) Fine.`).
 */

use std::borrow::Cow;
use once_cell::sync::Lazy;
use regex::Regex;
use crate::subtitle_processor::split_line_ending;
use super::multi_line::is_dialog_line;
use super::text::UPPER_CASE;

/// Characters allowed in a speaker name after its first capital (character-class body)
pub const DEFAULT_SPEAKER_NAME_CHARS: &str = "A-ZÀÂÄÇÉÈÊËÎÏÔÖÙÛÜ0-9 '.#&-";

static ITALIC_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?i>").expect("Invalid italic tag regex")
});

static LEADING_HYPHEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-\s*").expect("Invalid leading hyphen regex")
});

static DESCRIPTION_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\[[^\]]*\]|\([^)]*\)|[♪♫#].*|\?\s.*\s\?)$").expect("Invalid description regex")
});

static BRACKETED_ASIDE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[[^\]]*\][ \t]*").expect("Invalid bracket aside regex")
});

static DEFAULT_SPEAKER_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&speaker_prefix_pattern(DEFAULT_SPEAKER_NAME_CHARS)).expect("Invalid speaker prefix regex")
});

static DEFAULT_PARENTHESIZED_ASIDE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&parenthesized_aside_pattern(DEFAULT_SPEAKER_NAME_CHARS)).expect("Invalid aside regex")
});

fn speaker_prefix_pattern(name_chars: &str) -> String {
    format!(
        r#"^(\s*(?:-\s*)?(?:<i>\s*)?"?)([{}][{}]{{2,}}?)\s+:(?:\s+|$)"#,
        UPPER_CASE, name_chars
    )
}

fn parenthesized_aside_pattern(name_chars: &str) -> String {
    format!(r"\([,!?{}]+\)[ \t]*", name_chars)
}

/// Strips SDH annotations from the lines of a block
#[derive(Debug, Clone)]
pub struct SdhCleaner {
    speaker_prefix: Regex,
    parenthesized_aside: Regex,
}

impl Default for SdhCleaner {
    fn default() -> Self {
        SdhCleaner {
            speaker_prefix: DEFAULT_SPEAKER_PREFIX.clone(),
            parenthesized_aside: DEFAULT_PARENTHESIZED_ASIDE.clone(),
        }
    }
}

impl SdhCleaner {
    /// Cleaner accepting `name_chars` (a character-class body) in speaker names
    pub fn new(name_chars: &str) -> Result<Self, regex::Error> {
        Ok(SdhCleaner {
            speaker_prefix: Regex::new(&speaker_prefix_pattern(name_chars))?,
            parenthesized_aside: Regex::new(&parenthesized_aside_pattern(name_chars))?,
        })
    }

    /// Remove SDH annotations from the lines of a block
    ///
    /// A block made only of descriptions becomes a single empty line, so that
    /// it is dropped when written. Lines emptied by the removal are dropped.
    /// Speaker names turn into dialogue hyphens when the block holds more
    /// than one speaker.
    pub fn clean(&self, lines: &[String]) -> Vec<String> {
        if lines.is_empty() {
            return Vec::new();
        }
        if Self::is_description_only(lines) {
            return vec![String::new()];
        }

        let named: Vec<bool> = lines
            .iter()
            .map(|line| self.speaker_prefix.is_match(split_line_ending(line).0))
            .collect();

        let cleaned: Vec<String> = lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let several_speakers = lines
                    .iter()
                    .enumerate()
                    .any(|(j, other)| j != i && (named[j] || is_dialog_line(other)));
                let line = self.strip_speaker(line, several_speakers);
                self.strip_asides(&line)
            })
            .filter(|line| !ITALIC_TAG.replace_all(line, "").trim().is_empty())
            .collect();

        if cleaned.is_empty() {
            vec![String::new()]
        } else {
            cleaned
        }
    }

    fn is_description_only(lines: &[String]) -> bool {
        let mut contents = lines
            .iter()
            .map(|line| {
                let untagged = ITALIC_TAG.replace_all(line, "");
                LEADING_HYPHEN.replace(untagged.trim(), "").trim().to_string()
            })
            .filter(|content| !content.is_empty())
            .peekable();

        contents.peek().is_some() && contents.all(|content| DESCRIPTION_ONLY.is_match(&content))
    }

    fn strip_speaker(&self, line: &str, several_speakers: bool) -> String {
        let (body, ending) = split_line_ending(line);
        let Some(caps) = self.speaker_prefix.captures(body) else {
            return line.to_string();
        };
        let (Some(whole), Some(prefix)) = (caps.get(0), caps.get(1)) else {
            return line.to_string();
        };

        let rest = &body[whole.end()..];
        if several_speakers && !prefix.as_str().contains('-') {
            format!("- {}{}{}", prefix.as_str().trim_start(), rest, ending)
        } else {
            format!("{}{}{}", prefix.as_str(), rest, ending)
        }
    }

    fn strip_asides(&self, line: &str) -> String {
        let mut stripped = BRACKETED_ASIDE.replace_all(line, "");
        // A bracket after a lone dash is kept for the single-line rules
        if is_lone_dash(&stripped) {
            stripped = Cow::Borrowed(line);
        }
        self.parenthesized_aside.replace_all(&stripped, "").into_owned()
    }
}

fn is_lone_dash(line: &str) -> bool {
    let untagged = ITALIC_TAG.replace_all(line, "");
    let content = untagged.trim();
    !content.is_empty() && content.chars().all(|c| matches!(c, '-' | '–' | '—'))
}
