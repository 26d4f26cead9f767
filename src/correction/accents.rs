/*!
 * Accented capital `A` in French subtitles.
 *
 * OCR output and old subtitles write the preposition `à` as a bare `A` at the
 * start of a sentence. The verb `a` is written the same way, so every
 * standalone `A` goes through the confirmer.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use super::confirmation::{resolve_candidates, Candidate, Confirmer};
use super::text::map_body;

/// Label shown to the confirmer
pub const ACCENTED_CAPITAL_RULE: &str = "accented capital";

static STANDALONE_A: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bA\b").expect("Invalid standalone A regex")
});

/// Propose `À` for every standalone `A`
///
/// Not proposed: `A-t-il`, `A'`, an initial like `A.B.`, or an `A` right after
/// a period or an apostrophe.
pub fn fix_accented_capitals(line: &str, confirmer: &mut dyn Confirmer) -> String {
    map_body(line, |body| {
        let candidates: Vec<Candidate> = STANDALONE_A
            .find_iter(body)
            .filter(|m| is_candidate(body, m.start(), m.end()))
            .map(|m| Candidate {
                span: m.range(),
                replacement: "À".to_string(),
            })
            .collect();

        if candidates.is_empty() {
            body.to_string()
        } else {
            resolve_candidates(ACCENTED_CAPITAL_RULE, body, &candidates, confirmer)
        }
    })
}

fn is_candidate(body: &str, start: usize, end: usize) -> bool {
    let mut after = body[end..].chars();
    match after.next() {
        Some('-' | '\'') => return false,
        Some('.') if after.next().is_some_and(|c| c.is_alphabetic()) => return false,
        _ => {}
    }

    !matches!(body[..start].chars().last(), Some('.' | '\''))
}
