/*!
 * Rules working on all text lines of one block.
 *
 * Each rule takes the lines of a block (terminators included) and returns the
 * new lines; the input is never modified in place.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use crate::subtitle_processor::split_line_ending;
use super::single_line::remove_redundant_italic_pairs;

static DIALOG_HYPHEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*(?:"|<i>)*\s*-(?:[^-]|$)"#).expect("Invalid dialog hyphen regex")
});

static HYPHEN_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*(?:"|<i>)*\s*-"#).expect("Invalid hyphen start regex")
});

static LEADING_DIALOG_HYPHEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(\s*(?:"|<i>)*\s*)-[ \t]*"#).expect("Invalid leading hyphen regex")
});

static OPENING_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:-+\s*)?(?:<i>\s*)?(?:-+\s*)?").expect("Invalid opening markers regex")
});

static CLOSING_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*(?:</i>\s*)?$").expect("Invalid closing markers regex")
});

/// True when the line starts with a dialogue hyphen, possibly after `"` or `<i>`
///
/// A double hyphen is punctuation, not a dialogue marker.
pub fn is_dialog_line(line: &str) -> bool {
    DIALOG_HYPHEN.is_match(split_line_ending(line).0)
}

fn starts_with_hyphen(line: &str) -> bool {
    HYPHEN_START.is_match(split_line_ending(line).0)
}

/// Drop the second copy of a block written twice in a row (3D subtitles)
pub fn remove_3d_doubles(lines: &[String]) -> Vec<String> {
    let half = lines.len() / 2;
    if half == 0 || lines.len() % 2 != 0 {
        return lines.to_vec();
    }

    let same = lines[..half]
        .iter()
        .zip(&lines[half..])
        .all(|(first, second)| split_line_ending(first).0.trim() == split_line_ending(second).0.trim());

    if same {
        lines[..half].to_vec()
    } else {
        lines.to_vec()
    }
}

/// Where a quote sits relative to the text around it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteRole {
    Opener,
    Closer,
    Ambiguous,
}

/// What is missing in a dialogue segment with an odd quote count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentState {
    /// A quote opens and is never closed
    Opener,
    /// A quote closes without a matching opener
    Closer,
    Unknown,
}

fn quote_role(body: &str, index: usize) -> QuoteRole {
    let before = &body[..index];
    let after = &body[index + 1..];

    let opens = match before.chars().last() {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '-' | '(' | '[' | '>'),
    };
    let closes = match after.chars().next() {
        None => true,
        Some(c) => {
            c.is_whitespace() || matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | ')' | ']') || after.starts_with("</")
        }
    };

    match (opens, closes) {
        (true, false) => QuoteRole::Opener,
        (false, true) => QuoteRole::Closer,
        _ => QuoteRole::Ambiguous,
    }
}

fn segment_state(bodies: &[String]) -> SegmentState {
    let mut open = false;
    let mut orphan_closer = false;

    for body in bodies {
        for (index, _) in body.match_indices('"') {
            match quote_role(body, index) {
                QuoteRole::Opener => open = true,
                QuoteRole::Closer if open => open = false,
                QuoteRole::Closer => orphan_closer = true,
                QuoteRole::Ambiguous => open = !open,
            }
        }
    }

    if orphan_closer {
        SegmentState::Closer
    } else if open {
        SegmentState::Opener
    } else {
        SegmentState::Unknown
    }
}

fn opening_markers_end(body: &str) -> usize {
    OPENING_MARKERS.find(body).map_or(0, |m| m.end())
}

fn closing_markers_start(body: &str) -> usize {
    CLOSING_MARKERS.find(body).map_or(body.len(), |m| m.start())
}

/// Balance double quotes across the lines of a block
///
/// Only blocks with an odd quote count are touched. The block is cut into
/// dialogue segments at each hyphen-led line. Segments left open are closed at
/// the end of their last line, before any `</i>`; the remaining odd segments
/// are opened at the start of their first line, after hyphen and `<i>`.
/// The result always has an even quote count.
pub fn fix_double_quotes(lines: &[String]) -> Vec<String> {
    let total: usize = lines.iter().map(|line| line.matches('"').count()).sum();
    if total % 2 == 0 {
        return lines.to_vec();
    }

    let mut bodies: Vec<String> = lines.iter().map(|line| split_line_ending(line).0.to_string()).collect();
    let endings: Vec<&str> = lines.iter().map(|line| split_line_ending(line).1).collect();

    let mut starts: Vec<usize> = vec![0];
    starts.extend((1..bodies.len()).filter(|&i| DIALOG_HYPHEN.is_match(&bodies[i])));
    let segments: Vec<(usize, usize)> = starts
        .iter()
        .enumerate()
        .map(|(n, &start)| (start, starts.get(n + 1).copied().unwrap_or(bodies.len())))
        .collect();

    let is_odd = |bodies: &[String], (start, end): (usize, usize)| {
        bodies[start..end].iter().map(|body| body.matches('"').count()).sum::<usize>() % 2 == 1
    };

    // Forward: close what was opened
    for &(start, end) in &segments {
        if !is_odd(&bodies, (start, end)) {
            continue;
        }
        let first = &bodies[start];
        let starts_quoted = first[opening_markers_end(first)..].starts_with('"');
        let close = match segment_state(&bodies[start..end]) {
            SegmentState::Opener => true,
            SegmentState::Unknown => starts_quoted,
            SegmentState::Closer => false,
        };
        if close {
            let last = &mut bodies[end - 1];
            let at = closing_markers_start(last);
            last.insert(at, '"');
        }
    }

    // Backward: open what is still unbalanced
    for &(start, end) in segments.iter().rev() {
        if is_odd(&bodies, (start, end)) {
            let first = &mut bodies[start];
            let at = opening_markers_end(first);
            first.insert(at, '"');
        }
    }

    bodies
        .into_iter()
        .zip(endings)
        .map(|(body, ending)| body + ending)
        .collect()
}

/// Drop lines that are empty or only whitespace
pub fn remove_empty_lines(lines: &[String]) -> Vec<String> {
    lines.iter().filter(|line| !line.trim().is_empty()).cloned().collect()
}

/// Remove italic tags that open right after they close
///
/// Inside a line `</i><i>` and `<i></i>` go away; across lines a line ending
/// with `</i>` followed by a line starting with `<i>` loses both tags.
pub fn fix_redundant_italic_tags(lines: &[String]) -> Vec<String> {
    let mut fixed: Vec<String> = lines
        .iter()
        .map(|line| {
            let (body, ending) = split_line_ending(line);
            remove_redundant_italic_pairs(body) + ending
        })
        .collect();

    for i in 1..fixed.len() {
        let (previous_body, previous_ending) = split_line_ending(&fixed[i - 1]);
        let (body, ending) = split_line_ending(&fixed[i]);

        let trimmed_previous = previous_body.trim_end();
        let trimmed = body.trim_start();
        if let (Some(kept_previous), Some(kept)) = (trimmed_previous.strip_suffix("</i>"), trimmed.strip_prefix("<i>")) {
            let previous = format!("{}{}{}", kept_previous, &previous_body[trimmed_previous.len()..], previous_ending);
            let current = format!("{}{}{}", &body[..body.len() - trimmed.len()], kept, ending);
            fixed[i - 1] = previous;
            fixed[i] = current;
        }
    }

    fixed
}

/// Add the hyphen of the first speaker when only the next one has it
///
/// The earliest line without a hyphen that comes before the last hyphen-led
/// line gets `- `. Lines opening with `--` already carry a hyphen.
pub fn fix_missing_dialog_hyphen(lines: &[String]) -> Vec<String> {
    let mut fixed = lines.to_vec();
    let Some(last_dialog) = lines.iter().rposition(|line| is_dialog_line(line)) else {
        return fixed;
    };

    if let Some(missing) = lines[..last_dialog].iter().position(|line| !starts_with_hyphen(line)) {
        fixed[missing] = format!("- {}", lines[missing]);
    }

    fixed
}

/// Remove the dialogue hyphen of a single speaker
///
/// Applies when the first line is the only hyphen-led line of the block.
pub fn fix_useless_dialog_hyphen(lines: &[String]) -> Vec<String> {
    let Some(first) = lines.first() else {
        return Vec::new();
    };
    if !is_dialog_line(first) || lines[1..].iter().any(|line| starts_with_hyphen(line)) {
        return lines.to_vec();
    }

    let mut fixed = lines.to_vec();
    let (body, ending) = split_line_ending(first);
    fixed[0] = LEADING_DIALOG_HYPHEN.replace(body, "$1").into_owned() + ending;
    fixed
}
