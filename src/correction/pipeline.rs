/*!
 * Correction pipeline for one subtitle document.
 *
 * Blocks go through three stages:
 * 1. **Multi-line rules** on all text lines of the block
 * 2. **Single-line rules** on each resulting line, in a fixed order
 * 3. **Outcome**: the block is kept, or dropped when no text is left
 */

use log::{debug, warn};
use crate::app_config::CorrectionConfig;
use crate::errors::SubtitleError;
use crate::language_utils::CorrectionLanguage;
use crate::subtitle_processor::{split_line_ending, SubtitleBlock, SubtitleParser};
use crate::word_lists::OcrLetter;
use super::accents::fix_accented_capitals;
use super::confirmation::Confirmer;
use super::lexicon::Lexicon;
use super::multi_line::{
    fix_double_quotes, fix_missing_dialog_hyphen, fix_redundant_italic_tags, fix_useless_dialog_hyphen,
    remove_3d_doubles, remove_empty_lines,
};
use super::numbers::fix_numbers;
use super::ocr::{check_capital_i, fix_letter_confusion};
use super::sdh::SdhCleaner;
use super::single_line::{
    fix_acronyms, fix_colon, fix_common_errors, fix_degree_symbol, fix_dialog_hyphen, fix_italic_tag_errors,
    fix_punctuation_errors, fix_punctuation_spaces,
};

/// Switches of the correction pipeline.
#[derive(Debug, Clone)]
pub struct CorrectionOptions {
    /// Whether SDH annotations are removed
    pub remove_sdh_tags: bool,

    /// Whether blocks written twice (3D releases) are reduced to one copy
    pub remove_3d_doubles: bool,

    /// OCR letters checked for split words, in order
    pub letters: Vec<OcrLetter>,

    /// Lines per block above which a warning is logged
    pub max_lines_per_block: usize,
}

impl Default for CorrectionOptions {
    fn default() -> Self {
        Self {
            remove_sdh_tags: true,
            remove_3d_doubles: false,
            letters: OcrLetter::ALL.to_vec(),
            max_lines_per_block: 2,
        }
    }
}

impl From<&CorrectionConfig> for CorrectionOptions {
    fn from(config: &CorrectionConfig) -> Self {
        Self {
            remove_sdh_tags: config.remove_sdh_tags,
            remove_3d_doubles: config.remove_3d_doubles,
            letters: config.letters.clone(),
            max_lines_per_block: config.max_lines_per_block,
        }
    }
}

impl CorrectionOptions {
    /// Enable or disable SDH removal.
    pub fn with_sdh_removal(mut self, enabled: bool) -> Self {
        self.remove_sdh_tags = enabled;
        self
    }

    /// Enable or disable 3D double removal.
    pub fn with_3d_doubles_removal(mut self, enabled: bool) -> Self {
        self.remove_3d_doubles = enabled;
        self
    }

    /// Set the OCR letters to check.
    pub fn with_letters(mut self, letters: Vec<OcrLetter>) -> Self {
        self.letters = letters;
        self
    }
}

/// Final state of a corrected block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    /// Written to the output
    Kept(SubtitleBlock),
    /// Left out: no text remains
    Dropped(SubtitleBlock),
}

impl BlockOutcome {
    pub fn block(&self) -> &SubtitleBlock {
        match self {
            Self::Kept(block) | Self::Dropped(block) => block,
        }
    }

    pub fn is_kept(&self) -> bool {
        matches!(self, Self::Kept(_))
    }
}

/// What happened to a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionReport {
    /// Blocks found by the parser
    pub blocks: usize,
    /// Blocks written
    pub kept: usize,
    /// Blocks left out
    pub dropped: usize,
    /// Text lines that differ from their source
    pub changed_lines: usize,
    /// Problems to check by hand
    pub warnings: Vec<String>,
}

/// Corrected lines of a document and its report
#[derive(Debug, Clone)]
pub struct CorrectedDocument {
    pub lines: Vec<String>,
    pub report: CorrectionReport,
}

/// Applies every correction rule to subtitle blocks
pub struct CorrectionPipeline<'c> {
    lexicon: Lexicon,
    sdh: SdhCleaner,
    options: CorrectionOptions,
    confirmer: &'c mut dyn Confirmer,
}

impl<'c> CorrectionPipeline<'c> {
    pub fn new(lexicon: Lexicon, sdh: SdhCleaner, options: CorrectionOptions, confirmer: &'c mut dyn Confirmer) -> Self {
        Self {
            lexicon,
            sdh,
            options,
            confirmer,
        }
    }

    pub fn language(&self) -> CorrectionLanguage {
        self.lexicon.language()
    }

    /// Parse, correct and serialize a whole document
    pub fn correct_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<CorrectedDocument, SubtitleError> {
        let blocks = SubtitleParser::parse(lines)?;
        let mut report = CorrectionReport {
            blocks: blocks.len(),
            ..Default::default()
        };

        let mut kept = Vec::with_capacity(blocks.len());
        for block in &blocks {
            let outcome = self.correct_block(block, &mut report);
            report.changed_lines += changed_lines(&block.text_lines, &outcome.block().text_lines);

            match outcome {
                BlockOutcome::Kept(block) => kept.push(block),
                BlockOutcome::Dropped(block) => {
                    debug!("Empty subtitle dropped: {}", block.pretty_print());
                    report.dropped += 1;
                }
            }
        }
        report.kept = kept.len();

        debug!(
            "Corrected {} blocks: {} kept, {} dropped, {} lines changed",
            report.blocks, report.kept, report.dropped, report.changed_lines
        );

        Ok(CorrectedDocument {
            lines: SubtitleParser::serialize(&kept),
            report,
        })
    }

    /// Correct one block
    ///
    /// Warnings for manual review are appended to `report`.
    pub fn correct_block(&mut self, block: &SubtitleBlock, report: &mut CorrectionReport) -> BlockOutcome {
        let lines = self.fix_multiline_errors(&block.text_lines);
        let lines: Vec<String> = lines.iter().map(|line| self.fix_single_line_errors(line)).collect();

        let corrected = SubtitleBlock::with_lines(block.sequence_number.clone(), block.time_range.clone(), lines);
        if corrected.is_droppable() {
            return BlockOutcome::Dropped(corrected);
        }

        if corrected.text_lines.len() > self.options.max_lines_per_block {
            let message = format!("Wrong subtitle size: {}", corrected.pretty_print());
            warn!("{}", message);
            report.warnings.push(message);
        }

        for line in &corrected.text_lines {
            if line.contains('£') {
                let message = format!("Found £ at {} : {}", corrected.number(), split_line_ending(line).0);
                warn!("{}", message);
                report.warnings.push(message);
            }
        }

        BlockOutcome::Kept(corrected)
    }

    /// Multi-line rules, in order
    pub fn fix_multiline_errors(&self, lines: &[String]) -> Vec<String> {
        let mut lines = lines.to_vec();
        if self.options.remove_3d_doubles {
            lines = remove_3d_doubles(&lines);
        }

        lines = fix_double_quotes(&lines);
        lines = remove_empty_lines(&lines);
        lines = fix_redundant_italic_tags(&lines);
        lines = fix_missing_dialog_hyphen(&lines);
        lines = fix_useless_dialog_hyphen(&lines);

        if self.options.remove_sdh_tags {
            lines = self.sdh.clean(&lines);
        }
        lines
    }

    /// Single-line rules, in order
    pub fn fix_single_line_errors(&mut self, line: &str) -> String {
        let mut line = line.to_string();
        if self.lexicon.language().is_french() {
            line = fix_accented_capitals(&line, &mut *self.confirmer);
        }

        line = fix_common_errors(&line);
        line = fix_punctuation_errors(&line);
        line = fix_numbers(&line, self.lexicon.number_suffixes(), &mut *self.confirmer);
        line = fix_italic_tag_errors(&line);
        line = fix_colon(&line);
        line = fix_letter_confusion(&line);
        line = fix_acronyms(&line);
        line = self.lexicon.fix_common_misspells(&line);
        for &letter in &self.options.letters {
            line = self.lexicon.fix_letter_followed_by_space(&line, letter);
        }
        line = self.lexicon.fix_quotes(&line);
        line = fix_punctuation_spaces(&line);
        line = fix_degree_symbol(&line);
        line = fix_dialog_hyphen(&line);

        check_capital_i(&line, self.lexicon.capital_i_trusted(), &mut *self.confirmer)
    }
}

fn changed_lines(before: &[String], after: &[String]) -> usize {
    let differing = before.iter().zip(after).filter(|(a, b)| a != b).count();
    differing + before.len().abs_diff(after.len())
}
