/*!
 * Number spacing.
 *
 * OCR tends to split numbers (`4 45`), detach units (`20 %`) and confuse group
 * separators with decimal marks. The rule glues what is certain and asks about
 * the rest through the injected confirmer.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use super::confirmation::{resolve_candidates, Candidate, Confirmer};
use super::text::{is_word_char, map_body};

/// Label shown to the confirmer
pub const NUMBER_SEPARATOR_RULE: &str = "number separator";

static LONE_DIGIT_GAP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d)[ \t]+(\d+)\b").expect("Invalid lone digit regex")
});

static HOUR_MINUTES_GAP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d)h[ \t]+(\d{2})\b").expect("Invalid hour regex")
});

static BIG_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d[.,])?\b(\d{5,})\b").expect("Invalid big number regex")
});

static SEPARATOR_GAP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([.,])[ \t]+(\d)").expect("Invalid separator gap regex")
});

static DECIMAL_BEFORE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d[.,][ \t]*$").expect("Invalid decimal prefix regex")
});

static LIST_AFTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[.,]\s*\d").expect("Invalid list suffix regex")
});

/// How a `digit[.,] digit` gap is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GapKind {
    /// Not preceded by a digit
    NotNumeric,
    /// Three-digit right group, left as written
    Thousands,
    /// Two-digit right group, glued without asking
    Decimal,
    /// Needs a confirmation
    Ambiguous,
}

/// Build the regex gluing a number to a trusted suffix
///
/// Longest suffixes are tried first; suffixes ending with a word character
/// must end a word (`5 h` but not `5 heures`). `None` for an empty list.
pub fn suffix_regex(suffixes: &[String]) -> Option<Regex> {
    let mut suffixes: Vec<&str> = suffixes
        .iter()
        .map(|suffix| suffix.trim())
        .filter(|suffix| !suffix.is_empty())
        .collect();
    if suffixes.is_empty() {
        return None;
    }
    suffixes.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    suffixes.dedup();

    let alternatives: Vec<String> = suffixes
        .iter()
        .map(|suffix| {
            let escaped = regex::escape(suffix);
            if suffix.chars().last().is_some_and(is_word_char) {
                format!(r"{}\b", escaped)
            } else {
                escaped
            }
        })
        .collect();

    Regex::new(&format!(r"(\d)[ \t]+({})", alternatives.join("|"))).ok()
}

/// Fix whitespace in and around numbers
///
/// `Line 333 4 45, 50 and 3, 4, 5` gives `Line 333 445,50 and 3, 4, 5` when
/// every request is skipped: `4 45` is one number split by OCR, `45, 50` a
/// decimal, and the `3, 4, 5` gaps are ambiguous.
pub fn fix_numbers(line: &str, suffixes: Option<&Regex>, confirmer: &mut dyn Confirmer) -> String {
    map_body(line, |body| {
        if !body.chars().any(|c| c.is_ascii_digit()) {
            return body.to_string();
        }

        let fixed = glue_split_number(body);
        let fixed = match suffixes {
            Some(regex) => regex.replace_all(&fixed, "$1$2").into_owned(),
            None => fixed,
        };
        let fixed = HOUR_MINUTES_GAP.replace_all(&fixed, "${1}h$2").into_owned();
        let fixed = group_big_numbers(&fixed);
        let fixed = glue_decimals(&fixed);

        let candidates = ambiguous_gaps(&fixed);
        if candidates.is_empty() {
            fixed
        } else {
            resolve_candidates(NUMBER_SEPARATOR_RULE, &fixed, &candidates, confirmer)
        }
    })
}

// A lone digit followed by a number is the same number, unless the right group is a thousands group
fn glue_split_number(body: &str) -> String {
    LONE_DIGIT_GAP
        .replace_all(body, |caps: &Captures| {
            if caps[2].len() == 3 {
                caps[0].to_string()
            } else {
                format!("{}{}", &caps[1], &caps[2])
            }
        })
        .into_owned()
}

fn group_big_numbers(body: &str) -> String {
    BIG_NUMBER
        .replace_all(body, |caps: &Captures| {
            if caps.get(1).is_some() {
                return caps[0].to_string();
            }
            debug!("Big number: {}", body);
            group_thousands(&caps[2])
        })
        .into_owned()
}

/// `1234567` -> `1 234 567`
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped
}

fn classify_gap(body: &str, caps: &Captures) -> GapKind {
    let (Some(whole), Some(right)) = (caps.get(0), caps.get(2)) else {
        return GapKind::NotNumeric;
    };
    let before = &body[..whole.start()];
    if !before.chars().last().is_some_and(|c| c.is_ascii_digit()) {
        return GapKind::NotNumeric;
    }

    let left_start = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map_or(whole.start(), |(i, _)| i);
    let right_len = body[right.start()..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .count();
    let after = &body[right.start() + right_len..];

    match right_len {
        3 => GapKind::Thousands,
        2 if !LIST_AFTER.is_match(after) && !DECIMAL_BEFORE.is_match(&body[..left_start]) => GapKind::Decimal,
        _ => GapKind::Ambiguous,
    }
}

fn glue_decimals(body: &str) -> String {
    SEPARATOR_GAP
        .replace_all(body, |caps: &Captures| match classify_gap(body, caps) {
            GapKind::Decimal => format!("{}{}", &caps[1], &caps[2]),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

// @returns: One candidate per ambiguous gap, from the digit before the separator to the digit after it
fn ambiguous_gaps(body: &str) -> Vec<Candidate> {
    SEPARATOR_GAP
        .captures_iter(body)
        .filter(|caps| classify_gap(body, caps) == GapKind::Ambiguous)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let start = whole.start().checked_sub(1)?;
            let left_digit = &body[start..whole.start()];
            Some(Candidate {
                span: start..whole.end(),
                replacement: format!("{}{}{}", left_digit, &caps[1], &caps[2]),
            })
        })
        .collect()
}
