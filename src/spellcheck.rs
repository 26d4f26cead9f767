use anyhow::{Context, Result};
use log::{error, info};
use std::path::Path;
use std::process::Command;
use crate::app_config::SpellcheckConfig;
use crate::language_utils::CorrectionLanguage;

// @module: External word-processor spellcheck

// @struct: Launches the word processor with the spellcheck macro of a subtitle's language
pub struct Spellcheck {
    config: SpellcheckConfig,
}

impl Spellcheck {
    pub fn new(config: SpellcheckConfig) -> Self {
        Spellcheck { config }
    }

    // @returns: Macro name for the language
    pub fn macro_for(&self, language: CorrectionLanguage) -> &str {
        match language {
            CorrectionLanguage::French => &self.config.french_macro,
            CorrectionLanguage::English => &self.config.english_macro,
            CorrectionLanguage::Undefined => &self.config.default_macro,
        }
    }

    /// Command line as shown to the user: `<executable> /t "<path>" /m<macro>`
    pub fn command_line<P: AsRef<Path>>(&self, path: P, language: CorrectionLanguage) -> String {
        format!(
            "{} /t \"{}\" /m{}",
            self.config.executable.display(),
            path.as_ref().display(),
            self.macro_for(language)
        )
    }

    /// Process to spawn for a subtitle file
    pub fn command_for<P: AsRef<Path>>(&self, path: P, language: CorrectionLanguage) -> Command {
        let mut command = Command::new(&self.config.executable);
        command
            .arg("/t")
            .arg(path.as_ref())
            .arg(format!("/m{}", self.macro_for(language)));
        command
    }

    /// Run the spellcheck and wait for the word processor to exit
    ///
    /// @returns: false when the executable is missing
    pub fn launch<P: AsRef<Path>>(&self, path: P, language: CorrectionLanguage) -> Result<bool> {
        if !self.config.executable.is_file() {
            error!("Word processor not found at {:?}, spellcheck skipped", self.config.executable);
            return Ok(false);
        }

        info!("{}", self.command_line(&path, language));
        let status = self
            .command_for(&path, language)
            .status()
            .with_context(|| format!("Failed to launch {:?}", self.config.executable))?;

        if !status.success() {
            error!("Spellcheck exited with {}", status);
        }
        Ok(true)
    }
}
