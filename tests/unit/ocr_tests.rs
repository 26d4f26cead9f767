/*!
 * Tests for l/I confusion and accented capitals
 */

use std::collections::HashSet;
use stac::correction::accents::{fix_accented_capitals, ACCENTED_CAPITAL_RULE};
use stac::correction::confirmation::{AcceptAll, Decision, ScriptedConfirmer, SkipAll};
use stac::correction::ocr::{check_capital_i, fix_capital_i_to_l, fix_l_to_capital_i, fix_letter_confusion, CAPITAL_I_RULE};

fn trusted(words: &[&str]) -> HashSet<String> {
    words.iter().map(|word| word.to_string()).collect()
}

/// Test l read as I at the start of words and between capitals
#[test]
fn test_fix_letter_confusion_withLowercaseL_shouldUseCapitalI() {
    assert_eq!(fix_letter_confusion("lnter la test. ln MlB line\n"), "Inter la test. In MIB line\n");
    assert_eq!(fix_letter_confusion("lou AllB ABll\n"), "lou AIIB ABII\n");
}

/// Test roman numerals and the Ill exception
#[test]
fn test_fix_letter_confusion_withRomanNumerals_shouldUseCapitalI() {
    assert_eq!(
        fix_letter_confusion("Il lou lAB AllB ABll Xlll lll\n"),
        "Il lou IAB AIIB ABII XIII III\n"
    );
    assert_eq!(fix_l_to_capital_i("Ill\n"), "Ill\n");
}

/// Test I read as l inside lowercase words
#[test]
fn test_fix_letter_confusion_withCapitalI_shouldUseLowercaseL() {
    assert_eq!(
        fix_letter_confusion("Il AIbert AI pIop, Iame Iame fataI AIIIIb\n"),
        "Il Albert AI plop, lame lame fatal Allllb\n"
    );
}

/// Test each direction on its own
#[test]
fn test_fix_capital_i_to_l_withLowercaseContext_shouldReplace() {
    assert_eq!(fix_capital_i_to_l("pIop\n"), "plop\n");
    assert_eq!(fix_capital_i_to_l("I am\n"), "I am\n");
    assert_eq!(fix_l_to_capital_i("no change\n"), "no change\n");
}

/// Test that repeated application reaches a fixed point
#[test]
fn test_fix_letter_confusion_withFixedLine_shouldBeStable() {
    for line in ["lnter la test. ln MlB line", "Il AIbert AI pIop, Iame", "lou AllB ABll Xlll"] {
        let once = fix_letter_confusion(line);
        assert_eq!(fix_letter_confusion(&once), once);
    }
}

/// Test that suspicious capital I words are proposed
#[test]
fn test_check_capital_i_withUntrustedWord_shouldAsk() {
    let mut confirmer = ScriptedConfirmer::new(vec![Decision::Accept]);
    let fixed = check_capital_i("Il AIbert\n", &trusted(&["Il"]), &mut confirmer);

    assert_eq!(fixed, "Il Albert\n");
    assert_eq!(confirmer.requests().len(), 1);
    assert_eq!(confirmer.requests()[0].rule, CAPITAL_I_RULE);
    assert_eq!(confirmer.requests()[0].highlighted(), "AIbert");
}

/// Test that capitals, single letters and trusted words are never proposed
#[test]
fn test_check_capital_i_withTrustedOrUppercaseWords_shouldNotAsk() {
    let mut confirmer = ScriptedConfirmer::new(vec![]);
    let fixed = check_capital_i("I saw AI and Iran\n", &trusted(&["Iran"]), &mut confirmer);

    assert_eq!(fixed, "I saw AI and Iran\n");
    assert!(confirmer.requests().is_empty());
}

/// Test that skipping keeps the word
#[test]
fn test_check_capital_i_withSkipAll_shouldLeaveLine() {
    assert_eq!(check_capital_i("McIntosh\n", &trusted(&[]), &mut SkipAll), "McIntosh\n");
}

/// Test the accented capital proposals
#[test]
fn test_fix_accented_capitals_withStandaloneA_shouldProposeAccent() {
    assert_eq!(fix_accented_capitals("A toi a\n", &mut AcceptAll), "À toi a\n");
    assert_eq!(fix_accented_capitals("Plop Abcdc. A.\n", &mut AcceptAll), "Plop Abcdc. À.\n");
    assert_eq!(fix_accented_capitals("A toi\n", &mut SkipAll), "A toi\n");
}

/// Test the forms that are never proposed
#[test]
fn test_fix_accented_capitals_withVerbForms_shouldNotAsk() {
    let mut confirmer = ScriptedConfirmer::new(vec![]);
    for line in ["A-t-on fini ?\n", "A.B.C.\n", "L'A est là\n", "Abc\n"] {
        assert_eq!(fix_accented_capitals(line, &mut confirmer), line);
    }
    assert!(confirmer.requests().is_empty());
}

/// Test the request content
#[test]
fn test_fix_accented_capitals_withTwoCandidates_shouldAskInOrder() {
    let mut confirmer = ScriptedConfirmer::new(vec![Decision::Skip, Decision::Accept]);
    let fixed = fix_accented_capitals("A demain. A bientôt\n", &mut confirmer);

    assert_eq!(fixed, "A demain. À bientôt\n");
    assert_eq!(confirmer.requests().len(), 2);
    assert_eq!(confirmer.requests()[0].rule, ACCENTED_CAPITAL_RULE);
    assert_eq!(confirmer.requests()[1].span, 10..11);
}
