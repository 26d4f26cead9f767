/*!
 * Word-list driven rules.
 *
 * A [`Lexicon`] is compiled once per file from the [`WordListProvider`]: every
 * table is turned into regexes up front, so the per-line rules only run them.
 */

use std::collections::{HashMap, HashSet};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use crate::language_utils::CorrectionLanguage;
use crate::word_lists::{
    OcrLetter, WordListProvider, CAPITAL_I_TRUSTED, COMMON_MISSPELLS, NUMBER_SUFFIXES,
    QUOTE_WORD_TRUSTED, WORD_QUOTE_TRUSTED,
};
use super::numbers::suffix_regex;
use super::text::{either_case_class, map_body, whole_word_pattern};

static QUOTE_THEN_SPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"'\s").expect("Invalid apostrophe regex")
});

static SPACE_THEN_QUOTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s'").expect("Invalid apostrophe regex")
});

/// A split word and the regex finding it
#[derive(Debug, Clone)]
struct SplitWord {
    regex: Regex,
    joined: String,
}

/// Compiled word-list tables for one correction language
#[derive(Debug, Clone)]
pub struct Lexicon {
    language: CorrectionLanguage,
    misspellings: Vec<(Regex, String)>,
    letter_fixes: HashMap<OcrLetter, Vec<SplitWord>>,
    number_suffixes: Option<Regex>,
    quote_words: Vec<(Regex, String)>,
    word_quotes: Vec<(Regex, String)>,
    capital_i_trusted: HashSet<String>,
}

impl Lexicon {
    /// Compile the tables of `language` for the given OCR letters
    ///
    /// Entries that do not compile are logged and left out.
    pub fn load(provider: &WordListProvider, language: CorrectionLanguage, letters: &[OcrLetter]) -> Self {
        let misspellings = provider
            .word_pairs_for(COMMON_MISSPELLS, language)
            .into_iter()
            .filter(|(pattern, _)| !pattern.is_empty())
            .filter_map(|(pattern, replacement)| compile(&whole_word_pattern(&pattern)).map(|regex| (regex, replacement)))
            .collect();

        let mut letter_fixes = HashMap::new();
        for &letter in letters {
            let lists = provider.letter_lists(letter, language);
            let mut words = Vec::new();
            words.extend(lists.upper_plural.iter().filter_map(|word| split_word(word, true, true)));
            words.extend(lists.upper.iter().filter_map(|word| split_word(word, true, false)));
            words.extend(lists.plain.iter().filter_map(|word| split_word(word, false, false)));
            words.extend(lists.plural.iter().filter_map(|word| split_word(word, false, true)));
            letter_fixes.insert(letter, words);
        }

        let quote_words = provider
            .words_for(QUOTE_WORD_TRUSTED, language)
            .into_iter()
            .filter(|word| !word.is_empty())
            .filter_map(|word| {
                compile(&format!(r"\s'{}\b", regex::escape(&word))).map(|regex| (regex, format!("'{}", word)))
            })
            .collect();

        let word_quotes = provider
            .words_for(WORD_QUOTE_TRUSTED, language)
            .into_iter()
            .filter_map(|word| {
                let mut chars = word.chars();
                let first = chars.next()?;
                let pattern = format!(r"\b{}{}'\s", either_case_class(first), regex::escape(chars.as_str()));
                compile(&pattern).map(|regex| (regex, word))
            })
            .collect();

        let lexicon = Lexicon {
            language,
            misspellings,
            letter_fixes,
            number_suffixes: suffix_regex(&provider.words_for(NUMBER_SUFFIXES, language)),
            quote_words,
            word_quotes,
            capital_i_trusted: provider.words_for(CAPITAL_I_TRUSTED, language).into_iter().collect(),
        };

        debug!(
            "Lexicon for {}: {} misspellings, {} trusted capital-I words",
            language,
            lexicon.misspellings.len(),
            lexicon.capital_i_trusted.len()
        );
        lexicon
    }

    /// Lexicon without any table: word-list rules leave lines untouched
    pub fn empty(language: CorrectionLanguage) -> Self {
        Lexicon {
            language,
            misspellings: Vec::new(),
            letter_fixes: HashMap::new(),
            number_suffixes: None,
            quote_words: Vec::new(),
            word_quotes: Vec::new(),
            capital_i_trusted: HashSet::new(),
        }
    }

    pub fn language(&self) -> CorrectionLanguage {
        self.language
    }

    /// Regex gluing numbers to their trusted suffixes, if any suffix is known
    pub fn number_suffixes(&self) -> Option<&Regex> {
        self.number_suffixes.as_ref()
    }

    pub fn capital_i_trusted(&self) -> &HashSet<String> {
        &self.capital_i_trusted
    }

    pub fn is_capital_i_trusted(&self, word: &str) -> bool {
        self.capital_i_trusted.contains(word)
    }

    /// Letters with at least one split word
    pub fn letters(&self) -> Vec<OcrLetter> {
        OcrLetter::ALL
            .iter()
            .copied()
            .filter(|letter| self.letter_fixes.get(letter).is_some_and(|words| !words.is_empty()))
            .collect()
    }

    /// Replace every misspelling by its correction, general entries first
    pub fn fix_common_misspells(&self, line: &str) -> String {
        map_body(line, |body| {
            let mut fixed = body.to_string();
            for (regex, replacement) in &self.misspellings {
                if regex.is_match(&fixed) {
                    fixed = regex.replace_all(&fixed, NoExpand(replacement)).into_owned();
                }
            }
            fixed
        })
    }

    /// Join words split right after `letter`: `f oreign` -> `foreign`
    pub fn fix_letter_followed_by_space(&self, line: &str, letter: OcrLetter) -> String {
        let Some(words) = self.letter_fixes.get(&letter) else {
            return line.to_string();
        };
        if words.is_empty() {
            return line.to_string();
        }

        map_body(line, |body| {
            let lower = letter.as_char().to_ascii_lowercase();
            let upper = letter.as_char().to_ascii_uppercase();
            if !body.contains(&format!("{} ", lower)) && !body.contains(&format!("{} ", upper)) {
                return body.to_string();
            }

            let mut fixed = body.to_string();
            for word in words {
                if word.regex.is_match(&fixed) {
                    let replacement = format!("${{1}}{}${{2}}", word.joined.replace('$', "$$"));
                    fixed = word.regex.replace_all(&fixed, replacement.as_str()).into_owned();
                }
            }
            fixed
        })
    }

    /// `''` to `"` and trusted contractions glued to their apostrophe
    ///
    /// `''Plop''` -> `"Plop"`, `Plop 'm O' Connor` -> `Plop'm O'Connor`.
    pub fn fix_quotes(&self, line: &str) -> String {
        map_body(line, |body| {
            let mut fixed = body
                .replace("' '", "\"")
                .replace("''", "\"")
                .replace(&['\u{2018}', '\u{2019}'][..], "'")
                .replace(&['\u{201C}', '\u{201D}'][..], "\"");

            if SPACE_THEN_QUOTE.is_match(&fixed) {
                for (regex, replacement) in &self.quote_words {
                    fixed = regex.replace_all(&fixed, NoExpand(replacement)).into_owned();
                }
            }

            if QUOTE_THEN_SPACE.is_match(&fixed) {
                for (regex, word) in &self.word_quotes {
                    fixed = regex
                        .replace_all(&fixed, |caps: &regex::Captures| glued_word_quote(&caps[0], word))
                        .into_owned();
                }
            }

            if QUOTE_THEN_SPACE.is_match(&fixed) || SPACE_THEN_QUOTE.is_match(&fixed) {
                debug!("Unknown apostrophe spacing: {}", fixed);
            }
            fixed
        })
    }
}

// Keeps the case of the first letter as written: `o' ` -> `o'`, `O' ` -> `O'`
fn glued_word_quote(matched: &str, word: &str) -> String {
    let first = matched.chars().next().map(String::from).unwrap_or_default();
    let rest: String = word.chars().skip(1).collect();
    format!("{}{}'", first, rest)
}

fn split_word(word: &str, check_uppercase: bool, check_plural: bool) -> Option<SplitWord> {
    let mut chars = word.chars();
    let first = chars.next()?;
    let rest = chars.as_str();

    let head = if check_uppercase {
        either_case_class(first)
    } else {
        regex::escape(&first.to_string())
    };
    let tail = if check_plural { r"(s?)\b" } else { r"()\b" };

    let regex = compile(&format!(r"\b({}){}{}", head, regex::escape(rest), tail))?;
    Some(SplitWord {
        regex,
        joined: rest.replace(' ', ""),
    })
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!("Skipping word-list entry {:?}: {}", pattern, e);
            None
        }
    }
}
