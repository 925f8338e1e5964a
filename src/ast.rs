//! Parsed representation of one command line.
//!
//! A line parses into a list of [`Pipeline`]s, one per `;`/`&`-separated
//! sequence unit. Each pipeline is an ordered list of [`Stage`]s that the
//! executor connects with pipes; the pipeline as a whole carries the
//! sequencing operator that terminated its unit in the original line.

/// Sequencing operator recorded for a unit: `;` or end-of-line runs the
/// pipeline in the foreground, `&` detaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqOp {
    Foreground,
    Background,
}

/// Kind of redirection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// `<`: read standard input from a file.
    Input,
    /// `>`: write standard output to a file, truncating it.
    Output,
    /// `>>`: write standard output to a file, appending.
    Append,
}

/// One redirection as written: kind plus target path.
///
/// The target is empty when the operator had no following word; the
/// executor rejects that case before opening anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub kind: RedirectKind,
    pub target: String,
}

/// One pipeline segment: program name plus arguments, and the redirects
/// that appeared in its text, in order. Later redirects for the same
/// direction override earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stage {
    pub argv: Vec<String>,
    pub redirects: Vec<Redirect>,
}

impl Stage {
    /// A stage with no words and no redirects, e.g. the middle of
    /// `a | | b`. It launches nothing but still releases its pipe ends.
    pub fn is_empty(&self) -> bool {
        self.argv.is_empty() && self.redirects.is_empty()
    }
}

/// One sequence unit: stages joined by `|`, plus the operator that
/// terminated the unit. The operator applies to the pipeline as a whole,
/// not to individual stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub stages: Vec<Stage>,
    pub op: SeqOp,
}
