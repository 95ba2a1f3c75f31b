//! Token and event types shared by the tagger and the chunk reconstruction pipeline.

use serde::Serialize;

/// One token as reported by TreeTagger: the surface form, its part-of-speech tag and,
/// when the tagger prints one, the lemma.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TaggedToken {
    pub surface: String,
    pub tag: String,
    pub lemma: Option<String>,
}

impl TaggedToken {
    pub fn new(surface: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            tag: tag.into(),
            lemma: None,
        }
    }

    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    /// The `(surface, tag)` pair, the shape most callers want.
    pub fn pair(&self) -> (&str, &str) {
        (&self.surface, &self.tag)
    }
}

/// A single classified line of chunker output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketEvent {
    /// `<NC>`: a chunk with the given label starts
    Open(String),
    /// `</NC>`: the innermost open chunk ends
    Close,
    /// The sentence-final placeholder line; carries nothing downstream
    SentenceBoundary,
    Token(TaggedToken),
}

impl BracketEvent {
    pub fn is_token(&self) -> bool {
        matches!(self, BracketEvent::Token(_))
    }
}
