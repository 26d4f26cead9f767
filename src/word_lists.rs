/*!
 * Word-list resources used by the correction rules.
 *
 * A word list is a small colon-delimited text file named after the rule that
 * consumes it (`common_misspells.csv`). A localized variant with the language
 * code before the extension (`common_misspells.fr.csv`) extends the general
 * list. Missing files are empty lists.
 */

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use log::{debug, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use crate::errors::WordListError;
use crate::language_utils::CorrectionLanguage;

/// Misspelling table, two columns
pub const COMMON_MISSPELLS: &str = "common_misspells";
/// Units and suffixes glued to a preceding number (`%`, `h`, `ème`)
pub const NUMBER_SUFFIXES: &str = "number_succeeded_by_space_trusted";
/// Contraction endings written right after an apostrophe (`'ll`, `'m`)
pub const QUOTE_WORD_TRUSTED: &str = "quote_word_trusted";
/// Words written right before an apostrophe (`O'`, `l'`)
pub const WORD_QUOTE_TRUSTED: &str = "word_quote_trusted";
/// Words where a capital `I` inside the word is correct
pub const CAPITAL_I_TRUSTED: &str = "I_trusted";

type Records = Arc<Vec<Vec<String>>>;

/// Letters OCR engines tend to detach from the rest of a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OcrLetter {
    #[serde(rename = "f")]
    F,
    W,
    C,
    G,
    Z,
    V,
}

impl OcrLetter {
    /// Every letter, in processing order
    pub const ALL: [OcrLetter; 6] = [
        OcrLetter::F,
        OcrLetter::W,
        OcrLetter::C,
        OcrLetter::G,
        OcrLetter::Z,
        OcrLetter::V,
    ];

    pub fn as_char(&self) -> char {
        match self {
            Self::F => 'f',
            Self::W => 'W',
            Self::C => 'C',
            Self::G => 'G',
            Self::Z => 'Z',
            Self::V => 'V',
        }
    }

    // @returns: Rule name of one of the four list variants
    fn rule_name(&self, variant: &str) -> String {
        format!("letters/{}_space{}", self.as_char(), variant)
    }
}

impl fmt::Display for OcrLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The four word lists of one OCR letter
///
/// Entries hold the split form, e.g. `f oreign`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterSpaceLists {
    /// Matched with either case on the first letter, plural `s` allowed
    pub upper_plural: Vec<String>,
    /// Matched with either case on the first letter
    pub upper: Vec<String>,
    /// Matched as written
    pub plain: Vec<String>,
    /// Matched as written, plural `s` allowed
    pub plural: Vec<String>,
}

impl LetterSpaceLists {
    pub fn is_empty(&self) -> bool {
        self.upper_plural.is_empty() && self.upper.is_empty() && self.plain.is_empty() && self.plural.is_empty()
    }
}

/// Loads word lists from a resource directory and keeps them for the whole run
pub struct WordListProvider {
    // @field: Resource root directory
    root: PathBuf,

    // @field: Parsed files keyed by path
    cache: Mutex<HashMap<PathBuf, Records>>,
}

impl WordListProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        WordListProvider {
            root: root.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// First column of the general list followed by the localized one
    pub fn words_for(&self, rule: &str, language: CorrectionLanguage) -> Vec<String> {
        self.records_for(rule, language)
            .iter()
            .flat_map(|records| records.iter())
            .filter_map(|record| record.first().cloned())
            .collect()
    }

    /// (pattern, replacement) pairs of the general list followed by the localized one
    pub fn word_pairs_for(&self, rule: &str, language: CorrectionLanguage) -> Vec<(String, String)> {
        self.records_for(rule, language)
            .iter()
            .flat_map(|records| records.iter())
            .filter(|record| record.len() >= 2)
            .map(|record| (record[0].clone(), record[1].clone()))
            .collect()
    }

    /// The four split-word lists of an OCR letter
    pub fn letter_lists(&self, letter: OcrLetter, language: CorrectionLanguage) -> LetterSpaceLists {
        LetterSpaceLists {
            upper_plural: self.words_for(&letter.rule_name("_upp_plural"), language),
            upper: self.words_for(&letter.rule_name("_upp"), language),
            plain: self.words_for(&letter.rule_name(""), language),
            plural: self.words_for(&letter.rule_name("_plural"), language),
        }
    }

    /// Number of files held in the cache, missing ones included
    pub fn cached_files(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    /// Path of the general resource of a rule
    pub fn resource_path(&self, rule: &str) -> PathBuf {
        self.root.join(format!("{}.csv", rule))
    }

    /// Path of the localized resource of a rule, if the language has one
    pub fn localized_path(&self, rule: &str, language: CorrectionLanguage) -> Option<PathBuf> {
        language
            .code()
            .map(|code| self.root.join(format!("{}.{}.csv", rule, code)))
    }

    fn records_for(&self, rule: &str, language: CorrectionLanguage) -> Vec<Records> {
        let mut all = vec![self.load(&self.resource_path(rule))];
        if let Some(localized) = self.localized_path(rule, language) {
            all.push(self.load(&localized));
        }
        all
    }

    fn load(&self, path: &Path) -> Records {
        if let Some(records) = self.cache.lock().get(path) {
            return Arc::clone(records);
        }

        let records = match Self::read_records(path) {
            Ok(records) => records,
            Err(e) => {
                warn!("{}", e);
                Vec::new()
            }
        };
        debug!("Loaded {} word-list records from {:?}", records.len(), path);

        let records = Arc::new(records);
        self.cache.lock().insert(path.to_path_buf(), Arc::clone(&records));
        records
    }

    // @returns: Parsed records, empty when the file does not exist
    fn read_records(path: &Path) -> Result<Vec<Vec<String>>, WordListError> {
        if !path.is_file() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path).map_err(|source| WordListError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(content
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(split_record)
            .collect())
    }
}

/// Split one `:`-delimited record; `|` quotes a field, `||` is a literal `|`
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '|' if quoted && chars.peek() == Some(&'|') => {
                field.push('|');
                chars.next();
            }
            '|' => quoted = !quoted,
            ':' if !quoted => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);

    fields
}
