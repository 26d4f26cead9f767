use std::fmt;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use crate::errors::SubtitleError;

// @module: SubRip line classification, block parsing and serialization

// @const: Bare sequence number
static INDEX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+$").expect("Invalid index regex")
});

// @const: SRT time range, no surrounding whitespace allowed
static TIME_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{2}:\d{2}:\d{2},\d{3} --> \d{2}:\d{2}:\d{2},\d{3}$").expect("Invalid time range regex")
});

/// UTF-16 byte-order mark decoded as Latin-1 text
pub const BOM_ARTIFACT: &str = "\u{FF}\u{FE}";

/// Split a raw line into its content and its terminator (`"\n"`, `"\r\n"` or `""`)
pub fn split_line_ending(line: &str) -> (&str, &str) {
    let body = line
        .strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line);
    (body, &line[body.len()..])
}

/// Kind of a raw subtitle line, derived from its position in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Sequence number followed by a time range
    Index,
    /// `HH:MM:SS,mmm --> HH:MM:SS,mmm`
    TimeRange,
    /// Anything else, blank lines included
    Text,
    /// Out of range or zero-length
    Unrecognized,
}

// @struct: Pure predicates over raw SRT lines
pub struct LineClassifier;

impl LineClassifier {
    /// True when `lines[index]` is a bare number immediately followed by a time range
    pub fn is_index_line<S: AsRef<str>>(lines: &[S], index: usize) -> bool {
        let Some(line) = lines.get(index) else {
            return false;
        };
        let (body, _) = split_line_ending(line.as_ref());
        if !INDEX_REGEX.is_match(body) {
            return false;
        }

        match lines.get(index + 1) {
            Some(next) => Self::is_time_range_line(next.as_ref()),
            None => false,
        }
    }

    /// True when the line (terminator excluded) is exactly a time range
    pub fn is_time_range_line(text: &str) -> bool {
        let (body, _) = split_line_ending(text);
        TIME_RANGE_REGEX.is_match(body)
    }

    /// True when the line is non-empty and neither an index nor a time range
    pub fn is_text_line<S: AsRef<str>>(lines: &[S], index: usize) -> bool {
        match lines.get(index) {
            Some(line) if !line.as_ref().is_empty() => {
                !Self::is_index_line(lines, index) && !Self::is_time_range_line(line.as_ref())
            }
            _ => false,
        }
    }

    // @returns: The kind of the line at `index`
    pub fn classify<S: AsRef<str>>(lines: &[S], index: usize) -> LineKind {
        match lines.get(index) {
            None => LineKind::Unrecognized,
            Some(line) if line.as_ref().is_empty() => LineKind::Unrecognized,
            Some(line) => {
                if Self::is_index_line(lines, index) {
                    LineKind::Index
                } else if Self::is_time_range_line(line.as_ref()) {
                    LineKind::TimeRange
                } else {
                    LineKind::Text
                }
            }
        }
    }
}

// @struct: One subtitle entry, every field kept as raw text with its terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleBlock {
    // @field: Raw sequence number line, never renumbered
    pub sequence_number: String,

    // @field: Raw time range line
    pub time_range: String,

    // @field: Displayed text lines
    pub text_lines: Vec<String>,
}

impl SubtitleBlock {
    pub fn new(sequence_number: impl Into<String>, time_range: impl Into<String>) -> Self {
        SubtitleBlock {
            sequence_number: sequence_number.into(),
            time_range: time_range.into(),
            text_lines: Vec::new(),
        }
    }

    /// Creates a block with text lines, used by tests and callers building blocks by hand
    pub fn with_lines(sequence_number: impl Into<String>, time_range: impl Into<String>, text_lines: Vec<String>) -> Self {
        SubtitleBlock {
            sequence_number: sequence_number.into(),
            time_range: time_range.into(),
            text_lines,
        }
    }

    /// Sequence number without its terminator
    pub fn number(&self) -> &str {
        split_line_ending(&self.sequence_number).0
    }

    /// True when the block has no text or only whitespace: it is never written
    pub fn is_droppable(&self) -> bool {
        self.text_lines.iter().all(|line| line.trim().is_empty())
    }

    /// Number, time range and text lines, in file order
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.text_lines.len() + 2);
        lines.push(self.sequence_number.clone());
        lines.push(self.time_range.clone());
        lines.extend(self.text_lines.iter().cloned());
        lines
    }

    /// Terminator used by this block, reused for the separator line
    pub fn line_ending(&self) -> &str {
        match split_line_ending(&self.time_range).1 {
            "" => "\n",
            ending => ending,
        }
    }

    /// One-line summary for logs: `    12 : 00:01:02,003 --> ... ["line 1", "line 2"]`
    pub fn pretty_print(&self) -> String {
        let lines: Vec<&str> = self
            .text_lines
            .iter()
            .map(|line| split_line_ending(line).0)
            .collect();

        format!(
            "{:>5} : {} {:?}",
            self.number(),
            split_line_ending(&self.time_range).0,
            lines
        )
    }
}

impl fmt::Display for SubtitleBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in self.to_lines() {
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

// @struct: Groups raw lines into subtitle blocks
pub struct SubtitleParser;

impl SubtitleParser {
    /// Parse raw lines (terminators included) into blocks, in source order
    ///
    /// Lines outside any block are skipped as noise, unless they carry the
    /// UTF-16 byte-order mark artifact, in which case the caller has to decode
    /// the file again.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Vec<SubtitleBlock>, SubtitleError> {
        let mut blocks = Vec::new();
        let mut index = 0;

        while index < lines.len() {
            if !LineClassifier::is_index_line(lines, index) {
                if lines[index].as_ref().contains(BOM_ARTIFACT) {
                    return Err(SubtitleError::UnsupportedEncoding { line: index });
                }
                index += 1;
                continue;
            }

            let mut block = SubtitleBlock::new(lines[index].as_ref(), lines[index + 1].as_ref());
            index += 2;

            while index < lines.len() && !LineClassifier::is_index_line(lines, index) {
                let line = lines[index].as_ref();
                if !split_line_ending(line).0.is_empty() {
                    block.text_lines.push(line.to_string());
                }
                index += 1;
            }

            blocks.push(block);
        }

        debug!("Parsed {} subtitle blocks from {} lines", blocks.len(), lines.len());
        Ok(blocks)
    }

    /// Serialize blocks back to raw lines, a blank separator after each block
    ///
    /// Droppable blocks are left out.
    pub fn serialize(blocks: &[SubtitleBlock]) -> Vec<String> {
        let mut lines = Vec::new();

        for block in blocks {
            if block.is_droppable() {
                debug!("Empty subtitle dropped: {}", block.pretty_print());
                continue;
            }
            lines.extend(block.to_lines());
            lines.push(block.line_ending().to_string());
        }

        lines
    }
}
