/*!
 * Correction rules for subtitle text.
 *
 * Rules work on the text lines of one block at a time. They are split into
 * several submodules:
 *
 * - `single_line`: punctuation, italic tags, colons, acronyms and spacing
 * - `numbers`: digit grouping and unit suffixes
 * - `ocr`: l/I confusions
 * - `accents`: French accented capitals
 * - `lexicon`: rules driven by the word lists
 * - `multi_line`: quotes, dialog hyphens and italic tags across lines
 * - `sdh`: speaker names and sound descriptions
 * - `confirmation`: decisions on ambiguous corrections
 * - `pipeline`: the rules applied in order to a whole document
 */

// Re-export main types for easier usage
pub use self::confirmation::{
    AcceptAll, Candidate, ConfirmationRequest, Confirmer, Decision, ScriptedConfirmer, SkipAll, TerminalConfirmer,
};
pub use self::lexicon::Lexicon;
pub use self::pipeline::{
    BlockOutcome, CorrectedDocument, CorrectionOptions, CorrectionPipeline, CorrectionReport,
};
pub use self::sdh::SdhCleaner;

// Submodules
pub mod accents;
pub mod confirmation;
pub mod lexicon;
pub mod multi_line;
pub mod numbers;
pub mod ocr;
pub mod pipeline;
pub mod sdh;
pub mod single_line;
pub mod text;
