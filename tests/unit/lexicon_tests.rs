/*!
 * Tests for the word-list driven rules
 */

use std::fs;
use anyhow::Result;
use stac::correction::confirmation::SkipAll;
use stac::correction::lexicon::Lexicon;
use stac::correction::numbers::fix_numbers;
use stac::language_utils::CorrectionLanguage;
use stac::word_lists::{OcrLetter, WordListProvider};
use crate::common;

fn shipped_lexicon(language: CorrectionLanguage) -> Lexicon {
    let provider = WordListProvider::new(common::word_lists_dir());
    Lexicon::load(&provider, language, &OcrLetter::ALL)
}

/// Test that French misspellings extend the general ones
#[test]
fn test_fix_common_misspells_withFrench_shouldApplyBothLists() {
    let lexicon = shipped_lexicon(CorrectionLanguage::French);
    assert_eq!(
        lexicon.fix_common_misspells("Seinfelf. II. Evidemment\n"),
        "Seinfeld. Il. Évidemment\n"
    );
}

/// Test that English misspellings do not include the French ones
#[test]
fn test_fix_common_misspells_withEnglish_shouldApplyEnglishList() {
    let lexicon = shipped_lexicon(CorrectionLanguage::English);
    assert_eq!(lexicon.fix_common_misspells("Seinfelf. II yourjob\n"), "Seinfeld. II your job\n");
}

/// Test that an undefined language only uses the general list
#[test]
fn test_fix_common_misspells_withUndefined_shouldApplyGeneralList() {
    let lexicon = shipped_lexicon(CorrectionLanguage::Undefined);
    assert_eq!(lexicon.fix_common_misspells("Seinfelf lran yourjob\n"), "Seinfeld Iran yourjob\n");
}

/// Test that misspellings only match whole words
#[test]
fn test_fix_common_misspells_withLongerWord_shouldNotReplace() {
    let lexicon = shipped_lexicon(CorrectionLanguage::Undefined);
    assert_eq!(lexicon.fix_common_misspells("Seinfelfs\n"), "Seinfelfs\n");
}

/// Test words split after an OCR letter
#[test]
fn test_fix_letter_followed_by_space_withSplitWords_shouldJoin() {
    let lexicon = shipped_lexicon(CorrectionLanguage::English);

    let line = lexicon.fix_letter_followed_by_space("chef f oreign f ollow\n", OcrLetter::F);
    assert_eq!(line, "chef foreign follow\n");

    let line = lexicon.fix_letter_followed_by_space("TEST C ynthia MUSIC TEST\n", OcrLetter::C);
    assert_eq!(line, "TEST Cynthia MUSIC TEST\n");
}

/// Test the case and plural variants of the letter lists
#[test]
fn test_fix_letter_followed_by_space_withCaseAndPlural_shouldJoin() {
    let lexicon = shipped_lexicon(CorrectionLanguage::English);

    assert_eq!(lexicon.fix_letter_followed_by_space("my f riends\n", OcrLetter::F), "my friends\n");
    assert_eq!(lexicon.fix_letter_followed_by_space("F lowers\n", OcrLetter::F), "Flowers\n");
    assert_eq!(lexicon.fix_letter_followed_by_space("c ynthia\n", OcrLetter::C), "cynthia\n");
}

/// Test that a letter without lists leaves the line
#[test]
fn test_fix_letter_followed_by_space_withoutList_shouldLeaveLine() {
    let lexicon = shipped_lexicon(CorrectionLanguage::English);
    assert_eq!(lexicon.fix_letter_followed_by_space("Z orro\n", OcrLetter::Z), "Z orro\n");
    assert!(!lexicon.letters().contains(&OcrLetter::Z));
    assert!(lexicon.letters().contains(&OcrLetter::F));
}

/// Test quote normalization and trusted contractions
#[test]
fn test_fix_quotes_withDoubledAndSpacedQuotes_shouldNormalize() {
    let lexicon = shipped_lexicon(CorrectionLanguage::English);

    assert_eq!(lexicon.fix_quotes("''Plop''\n"), "\"Plop\"\n");
    assert_eq!(lexicon.fix_quotes("Plop 'm O' Connor\n"), "Plop'm O'Connor\n");
    assert_eq!(lexicon.fix_quotes("It\u{2019}s \u{201C}ok\u{201D}\n"), "It's \"ok\"\n");
}

/// Test French elisions
#[test]
fn test_fix_quotes_withFrenchElision_shouldGlueWord() {
    let lexicon = shipped_lexicon(CorrectionLanguage::French);
    assert_eq!(lexicon.fix_quotes("l' ami et L' autre\n"), "l'ami et L'autre\n");
}

/// Test the suffix regex built from the shipped lists
#[test]
fn test_number_suffixes_withFrench_shouldGlueOrdinals() {
    let lexicon = shipped_lexicon(CorrectionLanguage::French);
    let fixed = fix_numbers("4 ème et 5 h 30 à 20 % et 5 .\n", lexicon.number_suffixes(), &mut SkipAll);
    assert_eq!(fixed, "4ème et 5h30 à 20% et 5.\n");
}

/// Test the trusted capital I words per language
#[test]
fn test_capital_i_trusted_withLanguages_shouldExtendGeneralList() {
    let french = shipped_lexicon(CorrectionLanguage::French);
    let english = shipped_lexicon(CorrectionLanguage::English);

    assert!(french.is_capital_i_trusted("Il"));
    assert!(french.is_capital_i_trusted("Iran"));
    assert!(!english.is_capital_i_trusted("Il"));
    assert!(english.is_capital_i_trusted("It"));
}

/// Test the empty lexicon
#[test]
fn test_empty_withAnyLine_shouldLeaveLineUnchanged() {
    let lexicon = Lexicon::empty(CorrectionLanguage::French);

    assert_eq!(lexicon.language(), CorrectionLanguage::French);
    assert!(lexicon.number_suffixes().is_none());
    assert!(lexicon.letters().is_empty());
    assert_eq!(lexicon.fix_common_misspells("Seinfelf\n"), "Seinfelf\n");
    assert_eq!(lexicon.fix_letter_followed_by_space("f oreign\n", OcrLetter::F), "f oreign\n");
}

/// Test that entries are matched literally, regex characters included
#[test]
fn test_load_withPunctuationEntry_shouldMatchLiterally() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    fs::write(temp_dir.path().join("common_misspells.csv"), "teh:the\n|a.c|:abc\n")?;

    let provider = WordListProvider::new(temp_dir.path());
    let lexicon = Lexicon::load(&provider, CorrectionLanguage::Undefined, &OcrLetter::ALL);

    assert_eq!(lexicon.fix_common_misspells("teh abc a.c\n"), "the abc abc\n");

    Ok(())
}
