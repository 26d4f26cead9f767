use anyhow::{anyhow, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::default::Default;
use std::path::PathBuf;
use crate::correction::sdh::DEFAULT_SPEAKER_NAME_CHARS;
use crate::word_lists::OcrLetter;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory holding the word-list resources
    #[serde(default = "default_word_lists_dir")]
    pub word_lists_dir: PathBuf,

    /// Correction settings
    #[serde(default)]
    pub correction: CorrectionConfig,

    /// File traversal and backup settings
    #[serde(default)]
    pub files: FilesConfig,

    /// External spellcheck settings
    #[serde(default)]
    pub spellcheck: SpellcheckConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Correction rule settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CorrectionConfig {
    /// Ask on the terminal about ambiguous corrections instead of skipping them
    #[serde(default)]
    pub interactive: bool,

    /// Remove speaker names and sound descriptions
    #[serde(default = "default_true")]
    pub remove_sdh_tags: bool,

    /// Keep one copy of blocks written twice (3D releases)
    #[serde(default)]
    pub remove_3d_doubles: bool,

    /// OCR letters checked for split words, in processing order
    #[serde(default = "default_letters")]
    pub letters: Vec<OcrLetter>,

    /// Characters allowed in a speaker name (regex character-class body)
    #[serde(default = "default_speaker_name_chars")]
    pub speaker_name_chars: String,

    /// Text lines per block above which a warning is logged
    #[serde(default = "default_max_lines_per_block")]
    pub max_lines_per_block: usize,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            interactive: false,
            remove_sdh_tags: true,
            remove_3d_doubles: false,
            letters: default_letters(),
            speaker_name_chars: default_speaker_name_chars(),
            max_lines_per_block: default_max_lines_per_block(),
        }
    }
}

/// File handling settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FilesConfig {
    /// Folder depth searched below the input folder (0: the folder only)
    #[serde(default)]
    pub depth: usize,

    /// Copy each file to `<name> (before STAC).srt` before the first correction
    #[serde(default = "default_true")]
    pub backup: bool,

    /// Replace whitespace in file names with underscores
    #[serde(default)]
    pub clean_file_names: bool,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            depth: 0,
            backup: true,
            clean_file_names: false,
        }
    }
}

/// External word-processor spellcheck settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpellcheckConfig {
    /// Word processor executable
    #[serde(default = "default_spellcheck_executable")]
    pub executable: PathBuf,

    /// Macro run on French subtitles
    #[serde(default = "default_french_macro")]
    pub french_macro: String,

    /// Macro run on English subtitles
    #[serde(default = "default_english_macro")]
    pub english_macro: String,

    /// Macro run when the language is unknown
    #[serde(default = "default_default_macro")]
    pub default_macro: String,
}

impl Default for SpellcheckConfig {
    fn default() -> Self {
        Self {
            executable: default_spellcheck_executable(),
            french_macro: default_french_macro(),
            english_macro: default_english_macro(),
            default_macro: default_default_macro(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_word_lists_dir() -> PathBuf {
    PathBuf::from("resources/word_lists")
}

fn default_letters() -> Vec<OcrLetter> {
    OcrLetter::ALL.to_vec()
}

fn default_speaker_name_chars() -> String {
    DEFAULT_SPEAKER_NAME_CHARS.to_string()
}

fn default_max_lines_per_block() -> usize {
    2
}

fn default_spellcheck_executable() -> PathBuf {
    PathBuf::from(r"C:\Program Files\Microsoft Office\Office14\Winword.exe")
}

fn default_french_macro() -> String {
    "SrtFrSpellCheck".to_string()
}

fn default_english_macro() -> String {
    "SrtEngSpellCheck".to_string()
}

fn default_default_macro() -> String {
    "SrtSpellCheck".to_string()
}

impl Config {

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.word_lists_dir.as_os_str().is_empty() {
            return Err(anyhow!("Word list directory must not be empty"));
        }

        if self.correction.max_lines_per_block == 0 {
            return Err(anyhow!("Maximum lines per block must be at least 1"));
        }

        // The speaker characters end up inside a regex character class
        Regex::new(&format!("[{}]", self.correction.speaker_name_chars))
            .map_err(|e| anyhow!("Invalid speaker name characters '{}': {}", self.correction.speaker_name_chars, e))?;

        let mut seen = HashSet::new();
        for letter in &self.correction.letters {
            if !seen.insert(letter) {
                return Err(anyhow!("Letter '{}' is listed twice", letter));
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            word_lists_dir: default_word_lists_dir(),
            correction: CorrectionConfig::default(),
            files: FilesConfig::default(),
            spellcheck: SpellcheckConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
