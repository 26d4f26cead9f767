/*!
 * End-to-end correction of whole documents with the shipped word lists
 */

use anyhow::Result;
use stac::correction::{CorrectionOptions, CorrectionPipeline, Lexicon, SdhCleaner, SkipAll};
use stac::language_utils::CorrectionLanguage;
use stac::word_lists::{OcrLetter, WordListProvider};
use crate::common;

const FRENCH_SOURCE: &str = "1
00:00:01,000 --> 00:00:03,000
II est 5 h du matin!

2
00:00:04,000 --> 00:00:06,000
Evidemment, c'est l' ami de Seinfelf.

3
00:00:07,000 --> 00:00:09,000
MAN ON RADIO : 20 % de pluie

4
00:00:10,000 --> 00:00:12,000
[RIRES]

5
00:00:13,000 --> 00:00:15,000
Tu viens ?
- Oui.

";

const FRENCH_EXPECTED: &str = "1
00:00:01,000 --> 00:00:03,000
Il est 5h du matin !

2
00:00:04,000 --> 00:00:06,000
Évidemment, c'est l'ami de Seinfeld.

3
00:00:07,000 --> 00:00:09,000
20% de pluie

5
00:00:13,000 --> 00:00:15,000
- Tu viens ?
- Oui.

";

fn correct(source: &str, language: CorrectionLanguage) -> Result<(Vec<String>, usize)> {
    common::init_logging();
    let provider = WordListProvider::new(common::word_lists_dir());
    let lexicon = Lexicon::load(&provider, language, &OcrLetter::ALL);
    let mut confirmer = SkipAll;
    let mut pipeline = CorrectionPipeline::new(lexicon, SdhCleaner::default(), CorrectionOptions::default(), &mut confirmer);

    let document = pipeline.correct_lines(&common::lines(source))?;
    Ok((document.lines, document.report.dropped))
}

/// Test a French document touching most rule families
#[test]
fn test_correct_lines_withFrenchDocument_shouldApplyFrenchLists() -> Result<()> {
    let (lines, dropped) = correct(FRENCH_SOURCE, CorrectionLanguage::French)?;

    assert_eq!(lines, common::lines(FRENCH_EXPECTED));
    assert_eq!(dropped, 1);

    Ok(())
}

/// Test that the same lines read as English skip the French lists
#[test]
fn test_correct_lines_withEnglishDocument_shouldApplyEnglishLists() -> Result<()> {
    let source = "1\n00:00:01,000 --> 00:00:03,000\nlt's yourjob, f riends.\n\n";
    let (lines, _) = correct(source, CorrectionLanguage::English)?;

    assert_eq!(lines[2], "It's your job, friends.\n");

    Ok(())
}

/// Test that a corrected document is stable under a second pass
#[test]
fn test_correct_lines_withCorrectedDocument_shouldChangeNothing() -> Result<()> {
    let (lines, dropped) = correct(FRENCH_EXPECTED, CorrectionLanguage::French)?;

    assert_eq!(lines, common::lines(FRENCH_EXPECTED));
    assert_eq!(dropped, 0);

    Ok(())
}
