//! Tagging and chunking through TreeTagger
//!
//!     [TreeTagger] sends text to the `tree-tagger-<lang>` script and reads back one tagged
//!     token per line. [TreeTaggerChunker] sends token surfaces to `tagger-chunker-<lang>` and
//!     rebuilds the chunk markers in its output into a [ParseTree].
//!
//!     Both are generic over a [Backend], which defaults to running the real script. Tests and
//!     callers with canned output can plug in anything else.

pub mod backend;
pub mod binary;
pub mod language;

pub use backend::{Backend, ProcessBackend};
pub use binary::BinaryLocator;
pub use language::{BinarySpec, Language, Tool};

use crate::chunking::line_classification::{classify_output, parse_tagged_line};
use crate::chunking::{build_from_events, ParseTree, TaggedToken, ROOT_LABEL};
use crate::config::{self, TaggerConfig};
use crate::error::{Error, Result};
use tracing::debug;

fn default_config(language: Language) -> Result<TaggerConfig> {
    let mut config = config::load_defaults()?.tagger;
    config.language = language;
    Ok(config)
}

/// Part-of-speech tagger.
#[derive(Debug, Clone)]
pub struct TreeTagger<B = ProcessBackend> {
    backend: B,
}

impl TreeTagger<ProcessBackend> {
    /// Tagger for `language` with the default search locations.
    pub fn new(language: Language) -> Result<Self> {
        Self::from_config(&default_config(language)?)
    }

    pub fn from_config(config: &TaggerConfig) -> Result<Self> {
        Ok(Self::with_backend(ProcessBackend::from_config(
            config,
            Tool::Tagger,
        )?))
    }
}

impl<B: Backend> TreeTagger<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Tag free text. Tokenization is left to the script.
    pub fn tag(&self, text: &str) -> Result<Vec<TaggedToken>> {
        let output = self.backend.exchange(text)?;
        let tokens = parse_tagger_output(&output)?;
        if tokens.is_empty() && !text.trim().is_empty() {
            return Err(Error::EmptyResult {
                program: self.backend.program().to_string(),
            });
        }
        debug!(tokens = tokens.len(), "tagged text");
        Ok(tokens)
    }

    /// Tag several sentences in one run, one per input line.
    pub fn tag_sentences<S: AsRef<str>>(&self, sentences: &[S]) -> Result<Vec<TaggedToken>> {
        let joined: Vec<&str> = sentences.iter().map(AsRef::as_ref).collect();
        self.tag(&joined.join("\n"))
    }
}

fn parse_tagger_output(output: &str) -> Result<Vec<TaggedToken>> {
    let mut tokens = Vec::new();
    for (index, line) in output.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        tokens.push(parse_tagged_line(line, index + 1)?);
    }
    Ok(tokens)
}

/// Chunker producing labeled parse trees.
#[derive(Debug, Clone)]
pub struct TreeTaggerChunker<B = ProcessBackend> {
    backend: B,
}

impl TreeTaggerChunker<ProcessBackend> {
    /// Chunker for `language` with the default search locations.
    pub fn new(language: Language) -> Result<Self> {
        Self::from_config(&default_config(language)?)
    }

    pub fn from_config(config: &TaggerConfig) -> Result<Self> {
        Ok(Self::with_backend(ProcessBackend::from_config(
            config,
            Tool::Chunker,
        )?))
    }
}

impl<B: Backend> TreeTaggerChunker<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Chunk a tagged sentence. Only the surfaces are sent; the chunker re-tags them.
    pub fn parse(&self, tokens: &[TaggedToken]) -> Result<ParseTree> {
        let surfaces: Vec<&str> = tokens.iter().map(|token| token.surface.as_str()).collect();
        self.parse_text(&surfaces.join(" "))
    }

    /// Chunk `(surface, tag)` pairs as produced by other taggers.
    pub fn parse_pairs<S: AsRef<str>, T>(&self, pairs: &[(S, T)]) -> Result<ParseTree> {
        let surfaces: Vec<&str> = pairs.iter().map(|(surface, _)| surface.as_ref()).collect();
        self.parse_text(&surfaces.join(" "))
    }

    /// Chunk raw text.
    pub fn parse_text(&self, text: &str) -> Result<ParseTree> {
        if text.trim().is_empty() {
            return Ok(ParseTree::new(Some(ROOT_LABEL.to_string())));
        }

        let output = self.backend.exchange(text)?;
        let events = classify_output(&output)?;
        if events.is_empty() {
            return Err(Error::EmptyResult {
                program: self.backend.program().to_string(),
            });
        }
        build_from_events(&events)
    }
}
