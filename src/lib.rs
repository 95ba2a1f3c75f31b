//! # treetagger
//!
//! Runs the TreeTagger part-of-speech tagger and chunker as external processes and turns
//! their line-oriented output into structured data.
//!
//! File Layout
//!
//!     The interesting part of the crate is the chunk reconstruction under `chunking`: the
//!     chunker prints a flat stream of `<NC>` / `</NC>` markers interleaved with tagged
//!     tokens, and we rebuild that into a labeled parse tree. Everything under `tagger` is
//!     plumbing around locating and running the TreeTagger scripts.
//!
//!     src
//!       ├── chunking     Line classification, escaping, bracket assembly, tree building
//!       ├── tagger       Language table, binary discovery, process exchange
//!       ├── config.rs    Layered configuration (embedded defaults + user files)
//!       └── error.rs     Error taxonomy shared by both halves
//!
//! The core pipeline can be used without TreeTagger installed, see
//! [`parse_chunker_output`](chunking::parse_chunker_output).

pub mod chunking;
pub mod config;
pub mod error;
pub mod tagger;

pub use chunking::{parse_chunker_output, BracketEvent, ParseTree, TaggedToken};
pub use error::{Error, MalformedOutputError, Result, Stage};
pub use tagger::{Language, Tool, TreeTagger, TreeTaggerChunker};
