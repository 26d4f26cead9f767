use anyhow::{anyhow, Context, Result};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;
use indicatif::{ProgressBar, ProgressStyle};
use crate::app_config::Config;
use crate::correction::{
    Confirmer, CorrectionOptions, CorrectionPipeline, CorrectionReport, CorrectedDocument, Lexicon, SdhCleaner,
};
use crate::errors::{AppError, SubtitleError};
use crate::file_utils::FileManager;
use crate::language_utils::CorrectionLanguage;
use crate::spellcheck::Spellcheck;
use crate::word_lists::WordListProvider;

// @module: Application controller for subtitle correction

/// What to do with each subtitle file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Apply the correction rules
    #[default]
    Correct,
    /// Open the file in the external word processor
    Spellcheck,
}

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Corrections written back
    Corrected,
    /// Nothing to change, file left as is
    Unchanged,
    /// Corrections computed but not written
    DryRun,
    /// Handed to the word processor
    Spellchecked,
    /// Not processed, with the reason
    Skipped(String),
}

/// Result of processing one file
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Path of the file after an optional rename
    pub path: PathBuf,
    pub language: CorrectionLanguage,
    pub outcome: FileOutcome,
    /// Correction details, in correct mode
    pub report: Option<CorrectionReport>,
    /// Backup created for this run
    pub backup: Option<PathBuf>,
}

/// Counts of a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub duration: Duration,
}

/// Main application controller for subtitle correction
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Word lists shared by every file of the run
    word_lists: WordListProvider,

    // @field: Compute corrections without writing
    dry_run: bool,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().map_err(|e| AppError::Config(format!("{:#}", e)))?;

        let word_lists = WordListProvider::new(config.word_lists_dir.clone());
        if !FileManager::dir_exists(&config.word_lists_dir) {
            warn!("Word list directory not found: {:?}, word-list rules are disabled", config.word_lists_dir);
        }

        Ok(Self {
            config,
            word_lists,
            dry_run: false,
        })
    }

    /// Compute corrections without touching any file
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn word_lists(&self) -> &WordListProvider {
        &self.word_lists
    }

    /// Process one subtitle file
    pub fn run(&self, input_file: &Path, mode: RunMode, confirmer: &mut dyn Confirmer) -> Result<FileReport> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let path = if self.config.files.clean_file_names && !self.dry_run {
            FileManager::clean_spaces_in_file_name(input_file)?
        } else {
            input_file.to_path_buf()
        };
        let language = CorrectionLanguage::from_path(&path);
        debug!("Processing {:?} as {}", path, language);

        match mode {
            RunMode::Correct => self.correct_file(path, language, confirmer),
            RunMode::Spellcheck => {
                let launched = Spellcheck::new(self.config.spellcheck.clone()).launch(&path, language)?;
                let outcome = if launched {
                    FileOutcome::Spellchecked
                } else {
                    FileOutcome::Skipped("word processor not found".to_string())
                };
                Ok(FileReport {
                    path,
                    language,
                    outcome,
                    report: None,
                    backup: None,
                })
            }
        }
    }

    fn correct_file(&self, path: PathBuf, language: CorrectionLanguage, confirmer: &mut dyn Confirmer) -> Result<FileReport> {
        let bytes = FileManager::read_bytes(&path)?;
        let lines = FileManager::split_lines(&FileManager::decode_text(&bytes));

        let sdh = SdhCleaner::new(&self.config.correction.speaker_name_chars)
            .context("Invalid speaker name characters")?;
        let lexicon = Lexicon::load(&self.word_lists, language, &self.config.correction.letters);
        let options = CorrectionOptions::from(&self.config.correction);
        let mut pipeline = CorrectionPipeline::new(lexicon, sdh, options, confirmer);

        let (source, document) = match pipeline.correct_lines(&lines) {
            Ok(document) => (lines, document),
            Err(SubtitleError::UnsupportedEncoding { line }) => {
                warn!("Byte-order mark found at line {} of {:?}, reading as UTF-16", line + 1, path);
                match Self::retry_as_utf16(&mut pipeline, &bytes) {
                    Ok(retried) => retried,
                    Err(e) => {
                        error!("Cannot decode {:?}: {}", path, e);
                        return Ok(FileReport {
                            path,
                            language,
                            outcome: FileOutcome::Skipped(e.to_string()),
                            report: None,
                            backup: None,
                        });
                    }
                }
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to parse {:?}", path)),
        };

        let CorrectedDocument { lines: corrected, report } = document;
        for warning in &report.warnings {
            debug!("{:?}: {}", path, warning);
        }

        if corrected == source {
            return Ok(FileReport {
                path,
                language,
                outcome: FileOutcome::Unchanged,
                report: Some(report),
                backup: None,
            });
        }

        if self.dry_run {
            info!("{:?}: {} lines would change (dry run)", path, report.changed_lines);
            return Ok(FileReport {
                path,
                language,
                outcome: FileOutcome::DryRun,
                report: Some(report),
                backup: None,
            });
        }

        let backup = if self.config.files.backup {
            FileManager::backup_file(&path)?
        } else {
            None
        };
        FileManager::write_subtitle_lines(&path, &corrected)?;
        info!("Corrected {:?}: {} lines changed, {} blocks dropped", path, report.changed_lines, report.dropped);

        Ok(FileReport {
            path,
            language,
            outcome: FileOutcome::Corrected,
            report: Some(report),
            backup,
        })
    }

    // @returns: Source lines and corrected document from the UTF-16 reading
    fn retry_as_utf16(pipeline: &mut CorrectionPipeline<'_>, bytes: &[u8]) -> Result<(Vec<String>, CorrectedDocument), SubtitleError> {
        let text = FileManager::decode_utf16(bytes)?;
        let lines = FileManager::split_lines(&text);
        let document = pipeline.correct_lines(&lines)?;
        Ok((lines, document))
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }

    /// Run the workflow in folder mode, processing every subtitle file down to the configured depth
    /// Backups are never processed
    pub fn run_folder(&self, input_dir: &Path, mode: RunMode, confirmer: &mut dyn Confirmer) -> Result<FolderSummary> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let subtitle_files = FileManager::find_subtitle_files(input_dir, self.config.files.depth)?;
        if subtitle_files.is_empty() {
            warn!("No subtitle files found in directory: {:?}", input_dir);
            return Ok(FolderSummary::default());
        }

        // Prompts and the bar would fight over the terminal
        let folder_pb = if self.config.correction.interactive {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(subtitle_files.len() as u64)
        };
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing files");

        let mut summary = FolderSummary::default();

        for subtitle_file in &subtitle_files {
            let file_name = subtitle_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let result = folder_pb.suspend(|| self.run(subtitle_file, mode, confirmer));
            match result {
                Ok(FileReport { outcome: FileOutcome::Skipped(reason), .. }) => {
                    warn!("Skipped {}: {}", file_name, reason);
                    summary.skipped += 1;
                }
                Ok(_) => summary.processed += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");
        summary.duration = start_time.elapsed();

        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors in {}",
            summary.processed,
            summary.skipped,
            summary.failed,
            Self::format_duration(summary.duration)
        );

        Ok(summary)
    }
}
