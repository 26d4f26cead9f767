/*!
 * Single-line rules that need no word list.
 *
 * Every function takes a raw line (terminator included) and returns the fixed
 * line with the same terminator. They are total: a line with nothing to fix
 * comes back unchanged.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use super::text::{converge, is_word_char, map_body, replace_until_stable};

// Literal character substitutions, applied in order
const LITERAL_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("\u{2019}", "'"),
    ("\u{2018}", "'"),
    ("\u{201B}", "'"),
    ("\u{201C}", "\""),
    ("\u{201D}", "\""),
    ("\u{201E}", "\""),
    ("\u{2013}", "-"),
    ("\u{2010}", "-"),
    ("\u{2011}", "-"),
    ("\u{2014}", "--"),
    ("\u{2026}", "..."),
];

static SPACE_AFTER_OPENING_BRACKET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([(\[])\s+").expect("Invalid opening bracket regex")
});

static SPACE_BEFORE_CLOSING_BRACKET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+([)\]])").expect("Invalid closing bracket regex")
});

static HYPHEN_BACKSLASH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(\s*(?:<i>|")?\s*-)\\+"#).expect("Invalid hyphen backslash regex")
});

static DOT_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.{4,}").expect("Invalid dot run regex")
});

static GLUED_ELLIPSIS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\w)\.\.\.(\w)").expect("Invalid ellipsis regex")
});

static GLUED_DOUBLE_HYPHEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\w)--").expect("Invalid double hyphen regex")
});

static EMPTY_ITALIC_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<i>(\s*)</i>").expect("Invalid empty italic regex")
});

static ADJACENT_ITALIC_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</i>(\s*)<i>").expect("Invalid adjacent italic regex")
});

static HYPHEN_BETWEEN_ITALICS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</i>-<i>").expect("Invalid italic hyphen regex")
});

static ITALIC_HYPHEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<i>-</i>").expect("Invalid italic hyphen regex")
});

static SPACE_INSIDE_OPENING_ITALIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\s*)<i>\s+").expect("Invalid opening italic regex")
});

static SPACE_INSIDE_CLOSING_ITALIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+</i>(\s*)").expect("Invalid closing italic regex")
});

static SPACE_AFTER_ITALIC_QUOTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<i>"\s+"#).expect("Invalid italic quote regex")
});

static SPACE_BEFORE_QUOTE_ITALIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\s+"</i>"#).expect("Invalid italic quote regex")
});

static DIGIT_COLON_DIGIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d)\s*:\s*(\d)").expect("Invalid digit colon regex")
});

static WORD_COLON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\w)?[ \t]*:[ \t]*(\w)?").expect("Invalid word colon regex")
});

static ACRONYM_GAP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Z])\.\s+([A-Z])\.").expect("Invalid acronym regex")
});

static MARK_GAP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([?!])\s+([?!])").expect("Invalid mark gap regex")
});

static SPACE_BEFORE_MARKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\S)?\s*([?!]+)").expect("Invalid marks regex")
});

static SPACE_AFTER_MARKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([?!]+)[ \t]*(\w)").expect("Invalid marks regex")
});

static DIGIT_SPACE_DEGREE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d)\s+°").expect("Invalid degree regex")
});

static NUMERO_SPACE_DEGREE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([nN])\s+°").expect("Invalid numero regex")
});

static DEGREE_SPACE_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d°)\s+([CFK])\b").expect("Invalid degree unit regex")
});

static NUMERO_SPACE_DIGIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([nN]°)\s+(\d)").expect("Invalid numero digit regex")
});

static DIALOG_HYPHEN_GLUED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^((?:<i>|")?)-([^\s-])"#).expect("Invalid dialog hyphen regex")
});

static DIALOG_HYPHEN_WIDE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^((?:<i>|")?)-[ \t]{2,}"#).expect("Invalid dialog hyphen regex")
});

/// Character substitutions and bracket spacing
///
/// `( Test )` -> `(Test)`, `– [ Plop ]` -> `- [Plop]`, `-\Text` -> `-Text`.
pub fn fix_common_errors(line: &str) -> String {
    map_body(line, |body| {
        let mut fixed = body.to_string();
        for (from, to) in LITERAL_SUBSTITUTIONS {
            if fixed.contains(from) {
                fixed = fixed.replace(from, to);
            }
        }

        let fixed = HYPHEN_BACKSLASH.replace(&fixed, "$1");
        let fixed = SPACE_AFTER_OPENING_BRACKET.replace_all(&fixed, "$1");
        SPACE_BEFORE_CLOSING_BRACKET.replace_all(&fixed, "$1").into_owned()
    })
}

/// Ellipses, dot runs, period before a closing quote, double hyphen spacing
///
/// `Test. . .Test.. .` -> `Test... Test...`, `Plop--` -> `Plop --`.
pub fn fix_punctuation_errors(line: &str) -> String {
    map_body(line, |body| {
        let fixed = body
            .replace(". . .", "...")
            .replace(".. .", "...")
            .replace(". ..", "...");
        let fixed = DOT_RUN.replace_all(&fixed, "...");
        let fixed = replace_until_stable(&GLUED_ELLIPSIS, &fixed, "$1... $2");
        let fixed = move_period_inside_quote(&fixed);
        GLUED_DOUBLE_HYPHEN.replace_all(&fixed, "$1 --").into_owned()
    })
}

// `"Yes".` -> `"Yes."` when the final quote closes a quotation
fn move_period_inside_quote(body: &str) -> String {
    let Some(stem) = body.strip_suffix("\".") else {
        return body.to_string();
    };
    let closes = stem.chars().last().is_some_and(|c| !c.is_whitespace());
    if closes && body.matches('"').count() % 2 == 0 {
        format!("{}.\"", stem)
    } else {
        body.to_string()
    }
}

/// Italic tag cleanup inside one line
///
/// Empty and adjacent pairs disappear, spaces move outside the tags, a hyphen
/// between two italic runs joins them and quotes stick to the tags.
pub fn fix_italic_tag_errors(line: &str) -> String {
    map_body(line, |body| {
        let fixed = converge(body, |current| {
            let step = EMPTY_ITALIC_PAIR.replace_all(current, "$1");
            let step = ADJACENT_ITALIC_PAIR.replace_all(&step, "$1");
            let step = HYPHEN_BETWEEN_ITALICS.replace_all(&step, "-");
            ITALIC_HYPHEN.replace_all(&step, "-").into_owned()
        });

        let fixed = move_spaces_out_of_italics(&fixed);
        let fixed = SPACE_AFTER_ITALIC_QUOTE.replace_all(&fixed, "<i>\"");
        SPACE_BEFORE_QUOTE_ITALIC.replace_all(&fixed, "\"</i>").into_owned()
    })
}

/// Remove `<i></i>` and `</i><i>` pairs, keeping the whitespace between them
pub fn remove_redundant_italic_pairs(text: &str) -> String {
    converge(text, |current| {
        let step = EMPTY_ITALIC_PAIR.replace_all(current, "$1");
        ADJACENT_ITALIC_PAIR.replace_all(&step, "$1").into_owned()
    })
}

fn move_spaces_out_of_italics(body: &str) -> String {
    let opened = SPACE_INSIDE_OPENING_ITALIC.replace_all(body, |caps: &Captures| {
        let outside = &caps[1];
        let start = caps.get(0).map_or(0, |m| m.start());
        let previous = body[..start].chars().last();

        if !outside.is_empty() || !previous.is_some_and(is_word_char) {
            format!("{}<i>", outside)
        } else {
            " <i>".to_string()
        }
    });

    let opened = opened.into_owned();
    SPACE_INSIDE_CLOSING_ITALIC
        .replace_all(&opened, |caps: &Captures| {
            let outside = &caps[1];
            let end = caps.get(0).map_or(opened.len(), |m| m.end());
            let next = opened[end..].chars().next();

            if !outside.is_empty() || !next.is_some_and(is_word_char) {
                format!("</i>{}", outside)
            } else {
                "</i> ".to_string()
            }
        })
        .into_owned()
}

/// ` : ` around colons between words, bare `:` between digits
///
/// `TEST: line` -> `TEST : line`, `12 : 45` -> `12:45`.
pub fn fix_colon(line: &str) -> String {
    map_body(line, |body| {
        if !body.contains(':') {
            return body.to_string();
        }

        let fixed = DIGIT_COLON_DIGIT.replace_all(body, "$1:$2");
        WORD_COLON
            .replace_all(&fixed, |caps: &Captures| {
                let before = caps.get(1).map(|m| m.as_str());
                let after = caps.get(2).map(|m| m.as_str());
                let is_digit = |text: Option<&str>| text.is_some_and(|t| t.chars().all(|c| c.is_ascii_digit()));

                if is_digit(before) && is_digit(after) {
                    return caps[0].to_string();
                }

                let mut spaced = String::new();
                if let Some(before) = before {
                    spaced.push_str(before);
                    spaced.push(' ');
                }
                spaced.push(':');
                if let Some(after) = after {
                    spaced.push(' ');
                    spaced.push_str(after);
                }
                spaced
            })
            .into_owned()
    })
}

/// `S. N. C. F.` -> `S.N.C.F.`
pub fn fix_acronyms(line: &str) -> String {
    map_body(line, |body| replace_until_stable(&ACRONYM_GAP, body, "$1.$2."))
}

/// French spacing around `?` and `!`
///
/// `Hey! ?What ? ! ? !!` -> `Hey !? What ?!?!!`.
pub fn fix_punctuation_spaces(line: &str) -> String {
    map_body(line, |body| {
        if !body.contains(&['?', '!'][..]) {
            return body.to_string();
        }

        let fixed = replace_until_stable(&MARK_GAP, body, "$1$2");
        let fixed = SPACE_BEFORE_MARKS.replace_all(&fixed, |caps: &Captures| {
            let marks = &caps[2];
            match caps.get(1).map(|m| m.as_str()) {
                None => caps[0].to_string(),
                Some(previous) if previous.ends_with(&['.', '(', '[', '>', '¿', '¡'][..]) => {
                    format!("{}{}", previous, marks)
                }
                Some(previous) => format!("{} {}", previous, marks),
            }
        });
        SPACE_AFTER_MARKS.replace_all(&fixed, "$1 $2").into_owned()
    })
}

/// `5 °F` -> `5°F`, `n ° 2` -> `n°2`
pub fn fix_degree_symbol(line: &str) -> String {
    map_body(line, |body| {
        if !body.contains('°') {
            return body.to_string();
        }

        let fixed = DIGIT_SPACE_DEGREE.replace_all(body, "$1°");
        let fixed = NUMERO_SPACE_DEGREE.replace_all(&fixed, "$1°");
        let fixed = DEGREE_SPACE_UNIT.replace_all(&fixed, "$1$2");
        NUMERO_SPACE_DIGIT.replace_all(&fixed, "$1$2").into_owned()
    })
}

/// One space after a line-leading dialogue hyphen; `--` is left alone
///
/// `-Plop` -> `- Plop`, `<i>-Plop` -> `<i>- Plop`, `"-... Plop` -> `"- ... Plop`.
pub fn fix_dialog_hyphen(line: &str) -> String {
    map_body(line, |body| {
        let fixed = DIALOG_HYPHEN_GLUED.replace(body, "$1- $2");
        DIALOG_HYPHEN_WIDE.replace(&fixed, "$1- ").into_owned()
    })
}
