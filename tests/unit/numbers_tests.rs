/*!
 * Tests for number spacing
 */

use stac::correction::confirmation::{AcceptAll, Decision, ScriptedConfirmer, SkipAll};
use stac::correction::numbers::{fix_numbers, group_thousands, suffix_regex, NUMBER_SEPARATOR_RULE};

fn suffixes(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}

/// Test the reference line with every request skipped
#[test]
fn test_fix_numbers_withSplitNumberAndDecimal_shouldGlueCertainGaps() {
    let fixed = fix_numbers("Line 333 4 45, 50 and 3, 4, 5\n", None, &mut SkipAll);
    assert_eq!(fixed, "Line 333 445,50 and 3, 4, 5\n");
}

/// Test that a second pass changes nothing
#[test]
fn test_fix_numbers_withFixedLine_shouldBeIdempotent() {
    let once = fix_numbers("Line 333 4 45, 50 and 3, 4, 5\n", None, &mut SkipAll);
    let twice = fix_numbers(&once, None, &mut SkipAll);
    assert_eq!(once, twice);
}

/// Test that the list gaps are asked about, left to right
#[test]
fn test_fix_numbers_withAmbiguousGaps_shouldAskConfirmer() {
    let mut confirmer = ScriptedConfirmer::new(vec![Decision::Skip, Decision::Accept]);
    let fixed = fix_numbers("Line 333 4 45, 50 and 3, 4, 5\n", None, &mut confirmer);

    assert_eq!(fixed, "Line 333 445,50 and 3, 4,5\n");
    let requests = confirmer.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].rule, NUMBER_SEPARATOR_RULE);
    assert_eq!(requests[0].highlighted(), "3, 4");
    assert_eq!(requests[0].proposed, "Line 333 445,50 and 3,4, 5");
    assert_eq!(requests[1].highlighted(), "4, 5");
}

/// Test that accepted gaps are glued even after an earlier change shifted the line
#[test]
fn test_fix_numbers_withAllAccepted_shouldGlueEveryGap() {
    let fixed = fix_numbers("3, 4, 5\n", None, &mut AcceptAll);
    assert_eq!(fixed, "3,4,5\n");
}

/// Test that a replacement answer becomes the line
#[test]
fn test_fix_numbers_withReplaceDecision_shouldUseTypedLine() {
    let mut confirmer = ScriptedConfirmer::new(vec![Decision::Replace("1, 2 or 3".to_string())]);
    assert_eq!(fix_numbers("1, 2\n", None, &mut confirmer), "1, 2 or 3\n");
}

/// Test that three-digit groups are thousands and never asked about
#[test]
fn test_fix_numbers_withThousandsGroup_shouldKeepGap() {
    let mut confirmer = ScriptedConfirmer::new(vec![]);
    assert_eq!(fix_numbers("It costs 1, 500 now\n", None, &mut confirmer), "It costs 1, 500 now\n");
    assert!(confirmer.requests().is_empty());
}

/// Test unit suffixes and French hours
#[test]
fn test_fix_numbers_withTrustedSuffixes_shouldGlueUnits() {
    let regex = suffix_regex(&suffixes(&["%", "h", "ème", "."]));
    let fixed = fix_numbers("4 ème et 5 h 30 à 20 % et 5 .\n", regex.as_ref(), &mut SkipAll);
    assert_eq!(fixed, "4ème et 5h30 à 20% et 5.\n");
}

/// Test that a suffix must end the word
#[test]
fn test_fix_numbers_withLongerWord_shouldNotGlueSuffix() {
    let regex = suffix_regex(&suffixes(&["h"]));
    assert_eq!(fix_numbers("5 heures\n", regex.as_ref(), &mut SkipAll), "5 heures\n");
}

/// Test big number grouping
#[test]
fn test_fix_numbers_withBigNumber_shouldGroupThousands() {
    assert_eq!(fix_numbers("10000 euros\n", None, &mut SkipAll), "10 000 euros\n");
    assert_eq!(fix_numbers("1234567\n", None, &mut SkipAll), "1 234 567\n");
    assert_eq!(fix_numbers("Pi is 3,14159\n", None, &mut SkipAll), "Pi is 3,14159\n");
}

/// Test lines without digits
#[test]
fn test_fix_numbers_withoutDigits_shouldReturnLine() {
    assert_eq!(fix_numbers("No numbers here.\n", None, &mut SkipAll), "No numbers here.\n");
}

/// Test the thousands grouping helper
#[test]
fn test_group_thousands_withVariousLengths_shouldGroupFromTheRight() {
    assert_eq!(group_thousands("12345"), "12 345");
    assert_eq!(group_thousands("123456"), "123 456");
    assert_eq!(group_thousands("1234567"), "1 234 567");
}

/// Test that an empty suffix list gives no regex
#[test]
fn test_suffix_regex_withEmptyList_shouldReturnNone() {
    assert!(suffix_regex(&[]).is_none());
    assert!(suffix_regex(&suffixes(&["", "  "])).is_none());
}
