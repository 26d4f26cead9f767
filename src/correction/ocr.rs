/*!
 * OCR confusion between a capital `I` and a lowercase `l`.
 */

use std::collections::HashSet;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use super::confirmation::{resolve_candidates, Candidate, Confirmer};
use super::text::{converge, map_body, replace_until_stable, LOWER_CASE, UPPER_CASE};

/// Label shown to the confirmer
pub const CAPITAL_I_RULE: &str = "capital I";

const ROMAN_NUMERAL_CHARS: &str = "IVXLCDMl";

static LOWER_BEFORE_I: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("([{}])I", LOWER_CASE)).expect("Invalid lowercase I regex")
});

static I_BETWEEN_CASES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("([{}])I([{}])", UPPER_CASE, LOWER_CASE)).expect("Invalid mixed case I regex")
});

static I_AFTER_LOWER_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"([{}]\s)I([{}])", LOWER_CASE, LOWER_CASE)).expect("Invalid word I regex")
});

static I_AFTER_COMMA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(,\s)I([{}])", LOWER_CASE)).expect("Invalid comma I regex")
});

static L_BETWEEN_UPPER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("([{}])l(l*[{}])", UPPER_CASE, UPPER_CASE)).expect("Invalid uppercase l regex")
});

static LETTER_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\p{L}+").expect("Invalid letter run regex")
});

static ILL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Il+$").expect("Invalid Ill regex")
});

/// Capital `I` read where the context asks for `l`
///
/// `aIb` -> `alb`, `AIb` -> `Alb`, `aIIIb` -> `alllb`, `fataI` -> `fatal`.
pub fn fix_capital_i_to_l(line: &str) -> String {
    map_body(line, |body| {
        if !body.contains('I') {
            return body.to_string();
        }

        let fixed = replace_until_stable(&LOWER_BEFORE_I, body, "${1}l");
        let fixed = replace_until_stable(&I_BETWEEN_CASES, &fixed, "${1}l${2}");
        let fixed = replace_until_stable(&I_AFTER_LOWER_WORD, &fixed, "${1}l${2}");
        replace_until_stable(&I_AFTER_COMMA, &fixed, "${1}l${2}")
    })
}

/// Lowercase `l` read where the context asks for `I`
///
/// `MlB` -> `MIB`, `ABll` -> `ABII`, `Xlll` -> `XIII`, `lnter` -> `Inter`.
/// `Ill` is a word and stays.
pub fn fix_l_to_capital_i(line: &str) -> String {
    map_body(line, |body| {
        if !body.contains('l') {
            return body.to_string();
        }

        let fixed = replace_until_stable(&L_BETWEEN_UPPER, body, "${1}I${2}");
        LETTER_RUN
            .replace_all(&fixed, |caps: &Captures| {
                let token = &caps[0];
                let start = caps.get(0).map_or(0, |m| m.start());
                fix_l_token(token, &fixed[..start])
            })
            .into_owned()
    })
}

/// Both directions until neither changes the line
pub fn fix_letter_confusion(line: &str) -> String {
    converge(line, |current| fix_l_to_capital_i(&fix_capital_i_to_l(current)))
}

fn fix_l_token(token: &str, before: &str) -> String {
    if !token.contains('l') {
        return token.to_string();
    }

    let uppercase = token.chars().filter(|c| c.is_uppercase()).count();
    if uppercase >= 2 && token.chars().all(|c| c == 'l' || c.is_uppercase()) {
        return token.replace('l', "I");
    }

    if token.chars().count() >= 3
        && token.chars().all(|c| ROMAN_NUMERAL_CHARS.contains(c))
        && !ILL.is_match(token)
    {
        return token.replace('l', "I");
    }

    let mut chars = token.chars();
    if chars.next() == Some('l') && matches!(chars.next(), Some('n' | 't' | 'f')) && !follows_lower_word(before) {
        return format!("I{}", &token[1..]);
    }

    token.to_string()
}

// The capital I -> l direction would undo an initial-l fix after `word ` or `, `
fn follows_lower_word(before: &str) -> bool {
    let mut reversed = before.chars().rev();
    match (reversed.next(), reversed.next()) {
        (Some(space), Some(previous)) if space.is_whitespace() => previous.is_lowercase() || previous == ',',
        _ => false,
    }
}

/// Ask about words holding a capital `I` that look like a misread `l`
///
/// Words written in capitals and trusted words (`Il`, `It`, `McIntosh`) are
/// never proposed.
pub fn check_capital_i(line: &str, trusted: &HashSet<String>, confirmer: &mut dyn Confirmer) -> String {
    map_body(line, |body| {
        if !body.contains('I') {
            return body.to_string();
        }

        let candidates: Vec<Candidate> = LETTER_RUN
            .find_iter(body)
            .filter(|m| {
                let word = m.as_str();
                word.contains('I')
                    && word.chars().count() > 1
                    && !word.chars().all(|c| c.is_uppercase())
                    && !trusted.contains(word)
            })
            .map(|m| Candidate {
                span: m.range(),
                replacement: m.as_str().replace('I', "l"),
            })
            .collect();

        if candidates.is_empty() {
            body.to_string()
        } else {
            resolve_candidates(CAPITAL_I_RULE, body, &candidates, confirmer)
        }
    })
}
