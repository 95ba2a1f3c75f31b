//! Error taxonomy
//!
//! Failures split in two families. Process failures (launch, execution, timeout) come from
//! the external TreeTagger scripts and abort the call. Output failures come from the
//! reconstruction pipeline and name the stage and the exact defect, so a malformed bracket
//! stream can be told apart from an unreadable line.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while tagging or chunking.
#[derive(Debug, Error)]
pub enum Error {
    /// The external program could not be found or could not be started.
    #[error("could not launch `{program}`: {reason}")]
    ProcessLaunch {
        program: String,
        reason: String,
        searched: Vec<PathBuf>,
    },

    /// The external program ran but exited unsuccessfully.
    #[error("`{program}` failed ({status}): {stderr}")]
    ProcessExecution {
        program: String,
        status: String,
        stderr: String,
    },

    /// The external program did not finish within the configured timeout.
    #[error("`{program}` did not finish within {after:?}")]
    ProcessTimeout { program: String, after: Duration },

    #[error("malformed {stage} output: {source}")]
    MalformedOutput {
        stage: Stage,
        #[source]
        source: MalformedOutputError,
    },

    /// The program produced no usable lines for non-empty input.
    #[error("`{program}` produced no output for non-empty input")]
    EmptyResult { program: String },

    #[error("language `{0}` is not supported by TreeTagger")]
    UnsupportedLanguage(String),

    #[error("failed to serialize tree: {0}")]
    Serialization(String),

    #[error(transparent)]
    Config(#[from] ::config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<MalformedOutputError> for Error {
    fn from(source: MalformedOutputError) -> Self {
        Error::MalformedOutput {
            stage: source.stage(),
            source,
        }
    }
}

/// Pipeline stage a malformed-output failure originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LineClassification,
    BracketAssembly,
    TreeParsing,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::LineClassification => write!(f, "line classification"),
            Stage::BracketAssembly => write!(f, "bracket assembly"),
            Stage::TreeParsing => write!(f, "tree parsing"),
        }
    }
}

/// Precise reason chunker output could not be turned into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedOutputError {
    #[error("line {line_number} matches no known shape: {line:?}")]
    UnrecognizedLine { line_number: usize, line: String },

    #[error("line {line_number} has an empty token surface")]
    EmptySurface { line_number: usize },

    #[error("token event {event} has an empty {field}")]
    EmptyTokenField { event: usize, field: &'static str },

    #[error("groups nested deeper than {limit} at byte {position}")]
    NestingTooDeep { position: usize, limit: usize },

    #[error("unmatched `)` at byte {position}")]
    UnmatchedClose { position: usize },

    #[error("{open} group(s) still open at end of input")]
    UnclosedGroup { open: usize },

    #[error("leaf at byte {position} has {atoms} atoms, expected exactly 2")]
    InvalidLeaf { position: usize, atoms: usize },

    #[error("unexpected atom {atom:?} at byte {position}")]
    UnexpectedAtom { position: usize, atom: String },

    #[error("content after the root group at byte {position}")]
    TrailingContent { position: usize },

    #[error("bracketed text contains no group")]
    NoRootGroup,
}

impl MalformedOutputError {
    pub fn stage(&self) -> Stage {
        match self {
            MalformedOutputError::UnrecognizedLine { .. }
            | MalformedOutputError::EmptySurface { .. } => Stage::LineClassification,
            MalformedOutputError::EmptyTokenField { .. } => Stage::BracketAssembly,
            _ => Stage::TreeParsing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_output_carries_stage() {
        let err: Error = MalformedOutputError::UnmatchedClose { position: 3 }.into();
        match err {
            Error::MalformedOutput { stage, source } => {
                assert_eq!(stage, Stage::TreeParsing);
                assert_eq!(source, MalformedOutputError::UnmatchedClose { position: 3 });
            }
            other => panic!("Expected MalformedOutput, got {other:?}"),
        }
    }

    #[test]
    fn test_line_errors_belong_to_classification() {
        let err = MalformedOutputError::EmptySurface { line_number: 2 };
        assert_eq!(err.stage(), Stage::LineClassification);
        assert_eq!(
            Error::from(err).to_string(),
            "malformed line classification output: line 2 has an empty token surface"
        );
    }

    #[test]
    fn test_token_field_errors_belong_to_assembly() {
        let err = MalformedOutputError::EmptyTokenField {
            event: 4,
            field: "tag",
        };
        assert_eq!(err.stage(), Stage::BracketAssembly);
        assert_eq!(
            Error::from(err).to_string(),
            "malformed bracket assembly output: token event 4 has an empty tag"
        );
    }
}
