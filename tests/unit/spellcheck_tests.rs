/*!
 * Tests for the word-processor spellcheck command
 */

use anyhow::Result;
use std::path::PathBuf;
use stac::app_config::SpellcheckConfig;
use stac::language_utils::CorrectionLanguage;
use stac::spellcheck::Spellcheck;

fn spellcheck(executable: &str) -> Spellcheck {
    let config = SpellcheckConfig {
        executable: PathBuf::from(executable),
        ..SpellcheckConfig::default()
    };
    Spellcheck::new(config)
}

/// Test the macro picked for each language
#[test]
fn test_macro_for_withEachLanguage_shouldPickConfiguredMacro() {
    let spellcheck = spellcheck("winword");

    assert_eq!(spellcheck.macro_for(CorrectionLanguage::French), "SrtFrSpellCheck");
    assert_eq!(spellcheck.macro_for(CorrectionLanguage::English), "SrtEngSpellCheck");
    assert_eq!(spellcheck.macro_for(CorrectionLanguage::Undefined), "SrtSpellCheck");
}

/// Test the displayed command line
#[test]
fn test_command_line_withFrenchFile_shouldQuotePath() {
    let spellcheck = spellcheck("winword");
    assert_eq!(
        spellcheck.command_line("movie.fr.srt", CorrectionLanguage::French),
        "winword /t \"movie.fr.srt\" /mSrtFrSpellCheck"
    );
}

/// Test the arguments of the spawned process
#[test]
fn test_command_for_withEnglishFile_shouldPassMacroArgument() {
    let command = spellcheck("winword").command_for("movie.eng.srt", CorrectionLanguage::English);
    let args: Vec<String> = command.get_args().map(|arg| arg.to_string_lossy().to_string()).collect();

    assert_eq!(command.get_program(), "winword");
    assert_eq!(args, vec!["/t", "movie.eng.srt", "/mSrtEngSpellCheck"]);
}

/// Test that a missing word processor is reported without failing
#[test]
fn test_launch_withMissingExecutable_shouldReturnFalse() -> Result<()> {
    let launched = spellcheck("/nonexistent/winword.exe").launch("movie.srt", CorrectionLanguage::Undefined)?;
    assert!(!launched);
    Ok(())
}
