//! Line Classification
//!
//! Turns each line printed by the TreeTagger chunker into a [`BracketEvent`].
//!
//! Classification follows this specific order (important for correctness):
//! 1. Opening chunk markers, `<NC>`
//! 2. Closing chunk markers, `</NC>` (the slash is optional, but an opening marker has
//!    already been ruled out by then)
//! 3. The sentence-boundary placeholder, `? SENT ?`
//! 4. Tab-separated token records
//!
//! Token records are `surface<TAB>tag<TAB>lemma`. A surface that itself contained a tab
//! comes back split over several fields, so everything before the last two fields is
//! rejoined with `_`.

use crate::chunking::tokens::{BracketEvent, TaggedToken};
use crate::error::MalformedOutputError;
use once_cell::sync::Lazy;
use regex::Regex;

static OPEN_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<\s*(?P<label>[A-Z]+)\s*>\s*$").unwrap());

static CLOSE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<\s*/*\s*[A-Z]+\s*>\s*$").unwrap());

static SENTENCE_BOUNDARY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\?\s*SENT\s*\?").unwrap());

/// Separator used to rejoin surface fields that were split on embedded tabs.
const SURFACE_JOINER: &str = "_";

/// Classify one line of chunker output. `line_number` is 1-based and only used for errors.
pub fn classify_line(line: &str, line_number: usize) -> Result<BracketEvent, MalformedOutputError> {
    let line = line.trim_end_matches('\r');

    if let Some(captures) = OPEN_TAG_REGEX.captures(line) {
        return Ok(BracketEvent::Open(captures["label"].to_string()));
    }

    if CLOSE_TAG_REGEX.is_match(line) {
        return Ok(BracketEvent::Close);
    }

    if SENTENCE_BOUNDARY_REGEX.is_match(line) {
        return Ok(BracketEvent::SentenceBoundary);
    }

    parse_tagged_line(line, line_number).map(BracketEvent::Token)
}

/// Parse a tab-separated token record.
///
/// Three or more fields: the last two are tag and lemma, the rest is the surface.
/// Exactly two fields: surface and tag, as printed when lemmas are switched off.
pub fn parse_tagged_line(line: &str, line_number: usize) -> Result<TaggedToken, MalformedOutputError> {
    let line = line.trim_end_matches('\r');
    let fields: Vec<&str> = line.split('\t').collect();

    let token = match fields.as_slice() {
        [] | [_] => {
            return Err(MalformedOutputError::UnrecognizedLine {
                line_number,
                line: line.to_string(),
            })
        }
        [surface, tag] => TaggedToken::new(*surface, *tag),
        [surface @ .., tag, lemma] => {
            TaggedToken::new(surface.join(SURFACE_JOINER), *tag).with_lemma(*lemma)
        }
    };

    if token.surface.is_empty() {
        return Err(MalformedOutputError::EmptySurface { line_number });
    }
    if token.tag.is_empty() {
        return Err(MalformedOutputError::UnrecognizedLine {
            line_number,
            line: line.to_string(),
        });
    }
    Ok(token)
}

/// Classify every non-blank line of a buffered chunker output.
pub fn classify_output(output: &str) -> Result<Vec<BracketEvent>, MalformedOutputError> {
    output
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| classify_line(line, index + 1))
        .collect()
}
