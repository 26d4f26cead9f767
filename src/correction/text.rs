/*!
 * Small text helpers shared by the correction rules.
 */

use regex::Regex;
use crate::subtitle_processor::split_line_ending;

/// Lowercase letters, French accents included (character-class body)
pub const LOWER_CASE: &str = "a-zàâäçéèêëîïôöùûü";

/// Uppercase letters, French accents included (character-class body)
pub const UPPER_CASE: &str = "A-ZÀÂÄÇÉÈÊËÎÏÔÖÙÛÜ";

/// Apply `fix` to the content of a raw line and put the terminator back
pub fn map_body<F>(line: &str, fix: F) -> String
where
    F: FnOnce(&str) -> String,
{
    let (body, ending) = split_line_ending(line);
    let mut fixed = fix(body);
    fixed.push_str(ending);
    fixed
}

/// Apply `step` until the text stops changing
///
/// Bounded by the text length plus one iteration, so adversarial input still
/// terminates.
pub fn converge<F>(text: &str, mut step: F) -> String
where
    F: FnMut(&str) -> String,
{
    let max_iterations = text.chars().count() + 1;
    let mut current = text.to_string();

    for _ in 0..max_iterations {
        let next = step(&current);
        if next == current {
            break;
        }
        current = next;
    }

    current
}

/// `replace_all` repeated until no further match changes the text
pub fn replace_until_stable(regex: &Regex, text: &str, replacement: &str) -> String {
    converge(text, |current| regex.replace_all(current, replacement).into_owned())
}

/// Regex pattern matching `text` literally, with word boundaries on word-character ends
pub fn whole_word_pattern(text: &str) -> String {
    let mut pattern = String::new();
    if text.chars().next().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(text));
    if text.chars().last().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern
}

/// Character class accepting both cases of `c`
pub fn either_case_class(c: char) -> String {
    let lower: String = c.to_lowercase().collect();
    let upper: String = c.to_uppercase().collect();
    if lower == upper {
        regex::escape(&lower)
    } else {
        format!("[{}{}]", regex::escape(&upper), regex::escape(&lower))
    }
}

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
