/*!
 * Confirmation of ambiguous corrections.
 *
 * Some rules cannot decide from local context alone (a digit group separator,
 * a capital `A` that may need its accent, a capital `I` that may be an `l`).
 * They describe the candidate in a [`ConfirmationRequest`] and ask an injected
 * [`Confirmer`]. Batch runs use [`SkipAll`], which leaves every ambiguous text
 * untouched.
 */

use std::collections::VecDeque;
use std::io::{BufRead, StdinLock, Stderr, Write};
use std::ops::Range;
use log::warn;

/// Answer to a confirmation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Apply the proposed correction
    Accept,
    /// Use this text as the whole line instead
    Replace(String),
    /// Leave the line as it is
    Skip,
}

/// One ambiguous correction, as shown to the confirmer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    /// Short label of the asking rule
    pub rule: &'static str,
    /// Current line content, without terminator
    pub line: String,
    /// Byte range of the ambiguous text in `line`
    pub span: Range<usize>,
    /// `line` with the correction applied
    pub proposed: String,
}

impl ConfirmationRequest {
    /// The ambiguous text itself
    pub fn highlighted(&self) -> &str {
        self.line.get(self.span.clone()).unwrap_or("")
    }
}

/// Capability answering confirmation requests
pub trait Confirmer {
    fn confirm(&mut self, request: &ConfirmationRequest) -> Decision;
}

/// Non-interactive default: every ambiguous correction is skipped
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipAll;

impl Confirmer for SkipAll {
    fn confirm(&mut self, _request: &ConfirmationRequest) -> Decision {
        Decision::Skip
    }
}

/// Accepts every proposal
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Confirmer for AcceptAll {
    fn confirm(&mut self, _request: &ConfirmationRequest) -> Decision {
        Decision::Accept
    }
}

/// Replays a fixed list of decisions and records what it was asked
///
/// Once the list is exhausted every request is skipped.
#[derive(Debug, Default)]
pub struct ScriptedConfirmer {
    decisions: VecDeque<Decision>,
    requests: Vec<ConfirmationRequest>,
}

impl ScriptedConfirmer {
    pub fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        ScriptedConfirmer {
            decisions: decisions.into_iter().collect(),
            requests: Vec::new(),
        }
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> &[ConfirmationRequest] {
        &self.requests
    }

    pub fn remaining(&self) -> usize {
        self.decisions.len()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&mut self, request: &ConfirmationRequest) -> Decision {
        self.requests.push(request.clone());
        self.decisions.pop_front().unwrap_or(Decision::Skip)
    }
}

/// Asks on a terminal
///
/// An empty answer, `y` or `:x` accepts, `n` or `:q` skips, anything else is
/// taken as the replacement line. End of input or a read error skips.
pub struct TerminalConfirmer<R, W> {
    input: R,
    output: W,
}

impl TerminalConfirmer<StdinLock<'static>, Stderr> {
    /// Prompt on stderr, read answers from stdin
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalConfirmer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TerminalConfirmer { input, output }
    }

    fn prompt(&mut self, request: &ConfirmationRequest) -> std::io::Result<()> {
        let line = &request.line;
        let span = request.span.clone();
        let (before, after) = match (line.get(..span.start), line.get(span.end..)) {
            (Some(before), Some(after)) => (before, after),
            _ => (line.as_str(), ""),
        };

        writeln!(self.output)?;
        writeln!(
            self.output,
            "[{}] {}\x1B[1;33m{}\x1B[0m{}",
            request.rule,
            before,
            request.highlighted(),
            after
        )?;
        writeln!(self.output, "  => {}", request.proposed)?;
        write!(self.output, "  (enter/:x accept, :q skip, or type the line) > ")?;
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> Confirmer for TerminalConfirmer<R, W> {
    fn confirm(&mut self, request: &ConfirmationRequest) -> Decision {
        if let Err(e) = self.prompt(request) {
            warn!("Cannot display confirmation prompt: {}", e);
            return Decision::Skip;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) => Decision::Skip,
            Ok(_) => {
                let answer = answer.trim_end_matches(&['\r', '\n'][..]);
                match answer {
                    "" | "y" | ":x" => Decision::Accept,
                    "n" | ":q" => Decision::Skip,
                    replacement => Decision::Replace(replacement.to_string()),
                }
            }
            Err(e) => {
                warn!("Cannot read confirmation answer: {}", e);
                Decision::Skip
            }
        }
    }
}

/// A candidate correction inside a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Byte range in the original line
    pub span: Range<usize>,
    /// Text replacing the span when accepted
    pub replacement: String,
}

/// Ask about each candidate, left to right, and apply the accepted ones
///
/// Candidates must be sorted and must not overlap. A `Replace` answer ends the
/// walk: the typed text becomes the line.
pub fn resolve_candidates(
    rule: &'static str,
    line: &str,
    candidates: &[Candidate],
    confirmer: &mut dyn Confirmer,
) -> String {
    let mut current = line.to_string();
    let mut shift: isize = 0;

    for candidate in candidates {
        let start = (candidate.span.start as isize + shift) as usize;
        let end = (candidate.span.end as isize + shift) as usize;
        if end > current.len() || start > end {
            break;
        }

        let mut proposed = String::with_capacity(current.len() + candidate.replacement.len());
        proposed.push_str(&current[..start]);
        proposed.push_str(&candidate.replacement);
        proposed.push_str(&current[end..]);

        let request = ConfirmationRequest {
            rule,
            line: current.clone(),
            span: start..end,
            proposed,
        };

        match confirmer.confirm(&request) {
            Decision::Accept => {
                shift += candidate.replacement.len() as isize - (end - start) as isize;
                current = request.proposed;
            }
            Decision::Replace(text) => return text,
            Decision::Skip => {}
        }
    }

    current
}
