//! Chunk reconstruction
//!
//!     The TreeTagger chunker prints one item per line: `<NC>` opens a chunk, `</NC>` closes
//!     it, and everything else is a tab-separated token record. This module rebuilds that
//!     flat stream into a labeled parse tree.
//!
//! The Pipeline
//!
//!     1. Line classification. See [line_classification]. Each line becomes a
//!        [BracketEvent]; lines matching no known shape fail here.
//!     2. Escaping. See [escaping]. Parentheses and whitespace in token text are swapped
//!        for sentinels so they cannot be confused with structure.
//!     3. Bracket assembly. See [assembler]. The events are folded into one bracketed
//!        string wrapped in a `ROOT` group; tokens with an empty surface or tag fail here.
//!     4. Generic tree parsing. See [sexpr]. A stack-based parse of that string; bracket
//!        imbalance, malformed leaves and excessive nesting fail here.
//!     5. Label inheritance. See [inheritance]. Every leaf is wrapped in a node carrying
//!        the label of the chunk that directly contains it.
//!     6. Flattening. See [flattening]. Wrappers and same-label or unlabeled chunks are
//!        spliced back into their parent, then the escaping is reversed.
//!
//!     The whole output is buffered before step 1; there is no streaming variant. A failure
//!     in any step yields an error naming the stage, never a partial tree.

pub mod assembler;
pub mod escaping;
pub mod flattening;
pub mod formats;
pub mod inheritance;
pub mod line_classification;
pub mod sexpr;
pub mod tokens;
pub mod tree;

pub use assembler::ROOT_LABEL;
pub use formats::{OutputFormat, TreeSnapshot};
pub use tokens::{BracketEvent, TaggedToken};
pub use tree::{NodeId, NodeKind, ParseTree};

use crate::error::Result;
use tracing::debug;

/// Rebuild a parse tree from the complete, buffered output of the chunker.
///
/// Empty output yields a root with no children.
pub fn parse_chunker_output(output: &str) -> Result<ParseTree> {
    let events = line_classification::classify_output(output)?;
    build_from_events(&events)
}

/// Rebuild a parse tree from already classified events.
pub fn build_from_events(events: &[BracketEvent]) -> Result<ParseTree> {
    let token_count = events.iter().filter(|event| event.is_token()).count();
    debug!(events = events.len(), tokens = token_count, "assembling bracket stream");

    let bracketed = assembler::assemble(events)?;
    let generic = sexpr::parse_bracketed(&bracketed)?;

    let mut tree = inheritance::build_tree(&generic);
    let built = tree.node_count();
    flattening::flatten(&mut tree);
    debug!(before = built, after = tree.node_count(), "flattened parse tree");

    tree.map_text(escaping::unescape);
    Ok(tree)
}
