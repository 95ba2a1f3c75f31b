//! Bracket-stream assembly
//!
//! Folds the classified events into one bracketed string, wrapped in a root group:
//!
//!     Open(label)      ->  "(" label
//!     Close            ->  ")"
//!     SentenceBoundary ->  (nothing)
//!     Token(t)         ->  " (" surface " " tag ") "
//!
//! Surfaces and tags are escaped on the way in. An empty surface or tag has no atom to
//! stand for it, so such a token is rejected rather than folded in. The string is only
//! ever handed whole to the generic tree parser.

use crate::chunking::escaping::escape;
use crate::chunking::tokens::BracketEvent;
use crate::error::MalformedOutputError;

/// Label of the group wrapped around the whole stream.
pub const ROOT_LABEL: &str = "ROOT";

pub fn assemble(events: &[BracketEvent]) -> Result<String, MalformedOutputError> {
    let mut body = String::new();
    for (index, event) in events.iter().enumerate() {
        match event {
            BracketEvent::Open(label) => {
                body.push('(');
                body.push_str(&escape(label));
            }
            BracketEvent::Close => body.push(')'),
            BracketEvent::SentenceBoundary => {}
            BracketEvent::Token(token) => {
                let empty = match (token.surface.is_empty(), token.tag.is_empty()) {
                    (true, _) => Some("surface"),
                    (false, true) => Some("tag"),
                    (false, false) => None,
                };
                if let Some(field) = empty {
                    return Err(MalformedOutputError::EmptyTokenField {
                        event: index,
                        field,
                    });
                }
                body.push_str(" (");
                body.push_str(&escape(&token.surface));
                body.push(' ');
                body.push_str(&escape(&token.tag));
                body.push_str(") ");
            }
        }
    }
    Ok(format!("({} {} )", ROOT_LABEL, body))
}
