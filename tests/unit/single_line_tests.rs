/*!
 * Tests for the single-line rules that need no word list
 */

use stac::correction::single_line::{
    fix_acronyms, fix_colon, fix_common_errors, fix_degree_symbol, fix_dialog_hyphen, fix_italic_tag_errors,
    fix_punctuation_errors, fix_punctuation_spaces, remove_redundant_italic_pairs,
};

/// Test bracket spacing and typographic characters
#[test]
fn test_fix_common_errors_withBracketsAndCurlyChars_shouldNormalize() {
    assert_eq!(fix_common_errors("( Test )\n"), "(Test)\n");
    assert_eq!(fix_common_errors("\u{2013} [ Plop ]\n"), "- [Plop]\n");
    assert_eq!(fix_common_errors("It\u{2019}s \u{201C}fine\u{201D}\u{2026}"), "It's \"fine\"...");
}

/// Test that a backslash after a dialogue hyphen is removed
#[test]
fn test_fix_common_errors_withHyphenBackslash_shouldRemoveBackslash() {
    assert_eq!(fix_common_errors("-\\Text\n"), "-Text\n");
    assert_eq!(fix_common_errors("<i>-\\Text</i>\n"), "<i>-Text</i>\n");
    assert_eq!(fix_common_errors("a\\b\n"), "a\\b\n");
}

/// Test ellipsis normalization
#[test]
fn test_fix_punctuation_errors_withSpacedEllipses_shouldCollapse() {
    assert_eq!(fix_punctuation_errors("Test. . .Test.. .\n"), "Test... Test...\n");
    assert_eq!(fix_punctuation_errors("Wait.....\n"), "Wait...\n");
    assert_eq!(fix_punctuation_errors("So. .. yes\n"), "So... yes\n");
}

/// Test that a final period moves inside a closing quote
#[test]
fn test_fix_punctuation_errors_withPeriodAfterQuote_shouldMoveItInside() {
    assert_eq!(fix_punctuation_errors("He said \"Yes\".\n"), "He said \"Yes.\"\n");
    assert_eq!(fix_punctuation_errors("He said \"Yes.\"\n"), "He said \"Yes.\"\n");
}

/// Test double hyphen spacing
#[test]
fn test_fix_punctuation_errors_withGluedDoubleHyphen_shouldAddSpace() {
    assert_eq!(fix_punctuation_errors("Plop--\n"), "Plop --\n");
    assert_eq!(fix_punctuation_errors("Plop --\n"), "Plop --\n");
}

/// Test that empty and adjacent italic pairs disappear
#[test]
fn test_fix_italic_tag_errors_withRedundantPairs_shouldRemoveThem() {
    assert_eq!(fix_italic_tag_errors("<i></i>Test\n"), "Test\n");
    assert_eq!(fix_italic_tag_errors("<i>Test</i><i> line</i>\n"), "<i>Test line</i>\n");
    assert_eq!(fix_italic_tag_errors("<i>Test</i>-<i>plop</i>\n"), "<i>Test-plop</i>\n");
}

/// Test that spaces move outside the italic tags
#[test]
fn test_fix_italic_tag_errors_withInnerSpaces_shouldMoveThemOut() {
    assert_eq!(fix_italic_tag_errors("<i> Test </i>\n"), "<i>Test</i>\n");
    assert_eq!(fix_italic_tag_errors("Plop<i> test</i>\n"), "Plop <i>test</i>\n");
    assert_eq!(fix_italic_tag_errors("<i>test </i>plop\n"), "<i>test</i> plop\n");
}

/// Test that quotes stick to the italic tags
#[test]
fn test_fix_italic_tag_errors_withSpacedQuotes_shouldGlueThem() {
    assert_eq!(fix_italic_tag_errors("<i>\" Test \"</i>\n"), "<i>\"Test\"</i>\n");
}

/// Test redundant pair removal on raw text
#[test]
fn test_remove_redundant_italic_pairs_withNestedPairs_shouldReachFixedPoint() {
    assert_eq!(remove_redundant_italic_pairs("<i>a</i><i></i><i>b</i>"), "<i>ab</i>");
    assert_eq!(remove_redundant_italic_pairs("<i>a</i> <i>b</i>"), "<i>a b</i>");
}

/// Test colon spacing between words
#[test]
fn test_fix_colon_withWords_shouldSpaceColon() {
    assert_eq!(fix_colon("TEST: line\n"), "TEST : line\n");
    assert_eq!(fix_colon("TEST:line\n"), "TEST : line\n");
    assert_eq!(fix_colon("Note :\n"), "Note :\n");
}

/// Test that time-like colons stay bare
#[test]
fn test_fix_colon_withDigits_shouldKeepBareColon() {
    assert_eq!(fix_colon("12 : 45\n"), "12:45\n");
    assert_eq!(fix_colon("tonight at 1:15.\n"), "tonight at 1:15.\n");
}

/// Test acronym gluing
#[test]
fn test_fix_acronyms_withSpacedLetters_shouldGlue() {
    assert_eq!(fix_acronyms("I. I was here. S. N. C. F. I was\n"), "I. I was here. S.N.C.F. I was\n");
    assert_eq!(fix_acronyms("Line 2. I. Line 2. A.T. M. "), "Line 2. I. Line 2. A.T.M. ");
}

/// Test question and exclamation mark spacing
#[test]
fn test_fix_punctuation_spaces_withMixedMarks_shouldSpaceThem() {
    assert_eq!(fix_punctuation_spaces("Hey! ?What ? ! ? !!\n"), "Hey !? What ?!?!!\n");
    assert_eq!(fix_punctuation_spaces("Ok ! \"Line 2?\"?\n"), "Ok ! \"Line 2 ?\" ?\n");
}

/// Test that marks after an opening bracket or a period keep no space
#[test]
fn test_fix_punctuation_spaces_withPunctuationBefore_shouldNotAddSpace() {
    assert_eq!(fix_punctuation_spaces("(?)\n"), "(?)\n");
    assert_eq!(fix_punctuation_spaces("Wait...?\n"), "Wait...?\n");
    assert_eq!(fix_punctuation_spaces("No marks here\n"), "No marks here\n");
}

/// Test degree symbol spacing
#[test]
fn test_fix_degree_symbol_withSpaces_shouldGlue() {
    assert_eq!(fix_degree_symbol("It's 5 °F\n"), "It's 5°F\n");
    assert_eq!(fix_degree_symbol("20° C outside\n"), "20°C outside\n");
    assert_eq!(fix_degree_symbol("n ° 2\n"), "n°2\n");
}

/// Test the space after a dialogue hyphen
#[test]
fn test_fix_dialog_hyphen_withGluedOrWideHyphen_shouldUseOneSpace() {
    assert_eq!(fix_dialog_hyphen("-Plop\n"), "- Plop\n");
    assert_eq!(fix_dialog_hyphen("<i>-Plop</i>\n"), "<i>- Plop</i>\n");
    assert_eq!(fix_dialog_hyphen("\"-... Plop\n"), "\"- ... Plop\n");
    assert_eq!(fix_dialog_hyphen("-   Plop\n"), "- Plop\n");
}

/// Test that a double hyphen is not a dialogue marker
#[test]
fn test_fix_dialog_hyphen_withDoubleHyphen_shouldLeaveLine() {
    assert_eq!(fix_dialog_hyphen("--Plop\n"), "--Plop\n");
    assert_eq!(fix_dialog_hyphen("Plop -Test\n"), "Plop -Test\n");
}
