//! Generic tree parser for the bracketed notation
//!
//! Grammar (whitespace-insensitive):
//!
//!     group := "(" LABEL? (group | leaf)* ")"
//!     leaf  := "(" TOKEN TAG ")"
//!
//! Tokenization is done with logos; the parse itself is a single left-to-right pass over a
//! stack of open groups. `(` pushes a frame, the first atom after it becomes the frame's
//! label, `)` pops the frame and hands it to the new top of the stack. A frame holding a
//! label and exactly one more atom is a leaf.
//!
//! Brackets may nest at most [`MAX_NESTING`] deep, counting the root group and the leaf
//! pairs. Every later stage walks the tree recursively.

use crate::error::MalformedOutputError;
use logos::Logos;

pub const MAX_NESTING: usize = 256;

/// Tokens of the bracketed notation.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n]+")]
pub enum SexprToken {
    #[token("(")]
    Open,

    #[token(")")]
    Close,

    #[regex(r"[^() \t\r\n]+", |lex| lex.slice().to_string())]
    Atom(String),
}

/// A `(token tag)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub token: String,
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenericChild {
    Node(GenericNode),
    Leaf(Leaf),
}

/// A bracketed group with an optional label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenericNode {
    pub label: Option<String>,
    pub children: Vec<GenericChild>,
}

impl GenericNode {
    /// True when every child is a leaf (vacuously true for an empty group).
    pub fn is_leaf_bearing(&self) -> bool {
        self.children
            .iter()
            .all(|child| matches!(child, GenericChild::Leaf(_)))
    }

    /// True when at least one leaf sits anywhere below this node.
    pub fn has_leaf(&self) -> bool {
        self.children.iter().any(|child| match child {
            GenericChild::Leaf(_) => true,
            GenericChild::Node(node) => node.has_leaf(),
        })
    }

}

/// A group still being filled.
#[derive(Debug)]
struct Frame {
    position: usize,
    label: Option<String>,
    atoms: Vec<String>,
    children: Vec<GenericChild>,
}

impl Frame {
    fn new(position: usize) -> Self {
        Self {
            position,
            label: None,
            atoms: Vec::new(),
            children: Vec::new(),
        }
    }

    fn push_atom(&mut self, atom: String, position: usize) -> Result<(), MalformedOutputError> {
        if !self.children.is_empty() {
            return Err(MalformedOutputError::UnexpectedAtom { position, atom });
        }
        match self.label {
            None => self.label = Some(atom),
            Some(_) => self.atoms.push(atom),
        }
        Ok(())
    }

    fn push_child(&mut self, child: GenericChild) -> Result<(), MalformedOutputError> {
        if !self.atoms.is_empty() {
            return Err(self.invalid_leaf());
        }
        self.children.push(child);
        Ok(())
    }

    fn finish(mut self) -> Result<GenericChild, MalformedOutputError> {
        if self.atoms.is_empty() {
            return Ok(GenericChild::Node(GenericNode {
                label: self.label,
                children: self.children,
            }));
        }
        if self.atoms.len() == 1 && self.children.is_empty() {
            if let (Some(token), Some(tag)) = (self.label.take(), self.atoms.pop()) {
                return Ok(GenericChild::Leaf(Leaf { token, tag }));
            }
        }
        Err(self.invalid_leaf())
    }

    fn invalid_leaf(&self) -> MalformedOutputError {
        MalformedOutputError::InvalidLeaf {
            position: self.position,
            atoms: self.atoms.len() + usize::from(self.label.is_some()),
        }
    }
}

/// Parse bracketed text into its root group.
pub fn parse_bracketed(text: &str) -> Result<GenericNode, MalformedOutputError> {
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<GenericNode> = None;
    let mut lexer = SexprToken::lexer(text);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let token = result.map_err(|_| MalformedOutputError::UnexpectedAtom {
            position: span.start,
            atom: lexer.slice().to_string(),
        })?;

        if root.is_some() {
            return Err(match token {
                SexprToken::Close => MalformedOutputError::UnmatchedClose {
                    position: span.start,
                },
                _ => MalformedOutputError::TrailingContent {
                    position: span.start,
                },
            });
        }

        match token {
            SexprToken::Open => {
                if stack.len() >= MAX_NESTING {
                    return Err(MalformedOutputError::NestingTooDeep {
                        position: span.start,
                        limit: MAX_NESTING,
                    });
                }
                stack.push(Frame::new(span.start));
            }
            SexprToken::Atom(atom) => match stack.last_mut() {
                Some(frame) => frame.push_atom(atom, span.start)?,
                None => {
                    return Err(MalformedOutputError::UnexpectedAtom {
                        position: span.start,
                        atom,
                    })
                }
            },
            SexprToken::Close => {
                let frame = stack.pop().ok_or(MalformedOutputError::UnmatchedClose {
                    position: span.start,
                })?;
                let child = frame.finish()?;
                match stack.last_mut() {
                    Some(parent) => parent.push_child(child)?,
                    None => match child {
                        GenericChild::Node(node) => root = Some(node),
                        GenericChild::Leaf(_) => return Err(MalformedOutputError::NoRootGroup),
                    },
                }
            }
        }
    }

    if !stack.is_empty() {
        return Err(MalformedOutputError::UnclosedGroup { open: stack.len() });
    }
    root.ok_or(MalformedOutputError::NoRootGroup)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(token: &str, tag: &str) -> GenericChild {
        GenericChild::Leaf(Leaf {
            token: token.to_string(),
            tag: tag.to_string(),
        })
    }

    #[test]
    fn test_tokenizes() {
        let tokens: Vec<_> = SexprToken::lexer("(NC (What WP))")
            .filter_map(Result::ok)
            .collect();
        assert_eq!(
            tokens,
            vec![
                SexprToken::Open,
                SexprToken::Atom("NC".to_string()),
                SexprToken::Open,
                SexprToken::Atom("What".to_string()),
                SexprToken::Atom("WP".to_string()),
                SexprToken::Close,
                SexprToken::Close,
            ]
        );
    }

    #[test]
    fn test_parse_nested_groups() {
        let root = parse_bracketed("(ROOT (NC (the DT) (airspeed NN)) (VC (is VBZ)))").unwrap();
        assert_eq!(root.label.as_deref(), Some("ROOT"));
        assert_eq!(
            root.children,
            vec![
                GenericChild::Node(GenericNode {
                    label: Some("NC".to_string()),
                    children: vec![leaf("the", "DT"), leaf("airspeed", "NN")],
                }),
                GenericChild::Node(GenericNode {
                    label: Some("VC".to_string()),
                    children: vec![leaf("is", "VBZ")],
                }),
            ]
        );
        assert!(!root.is_leaf_bearing());
    }

    #[test]
    fn test_parse_mixed_group() {
        let root = parse_bracketed("(PC (of IN) (NC (an DT)))").unwrap();
        assert_eq!(
            root.children,
            vec![
                leaf("of", "IN"),
                GenericChild::Node(GenericNode {
                    label: Some("NC".to_string()),
                    children: vec![leaf("an", "DT")],
                }),
            ]
        );
    }

    #[test]
    fn test_parse_empty_and_unlabeled_groups() {
        let root = parse_bracketed("(ROOT (PC) ((x y)))").unwrap();
        assert_eq!(
            root.children,
            vec![
                GenericChild::Node(GenericNode {
                    label: Some("PC".to_string()),
                    children: vec![],
                }),
                GenericChild::Node(GenericNode {
                    label: None,
                    children: vec![leaf("x", "y")],
                }),
            ]
        );
    }

    #[test]
    fn test_has_leaf() {
        let root = parse_bracketed("(ROOT (PC (NC)) (VC (NC (go VB))))").unwrap();
        let found: Vec<bool> = root
            .children
            .iter()
            .map(|child| match child {
                GenericChild::Node(node) => node.has_leaf(),
                GenericChild::Leaf(_) => true,
            })
            .collect();
        assert_eq!(found, vec![false, true]);
        assert!(root.has_leaf());
        assert!(!GenericNode::default().has_leaf());
    }

    #[test]
    fn test_unmatched_close() {
        assert_eq!(
            parse_bracketed("(ROOT))"),
            Err(MalformedOutputError::UnmatchedClose { position: 6 })
        );
        assert_eq!(
            parse_bracketed("(ROOT) (NC)"),
            Err(MalformedOutputError::TrailingContent { position: 7 })
        );
        assert_eq!(
            parse_bracketed(")"),
            Err(MalformedOutputError::UnmatchedClose { position: 0 })
        );
    }

    #[test]
    fn test_unclosed_group() {
        assert_eq!(
            parse_bracketed("(ROOT (NC (What WP)"),
            Err(MalformedOutputError::UnclosedGroup { open: 2 })
        );
    }

    #[test]
    fn test_leaf_with_too_many_atoms() {
        assert_eq!(
            parse_bracketed("(ROOT (a b c))"),
            Err(MalformedOutputError::InvalidLeaf {
                position: 6,
                atoms: 3
            })
        );
    }

    #[test]
    fn test_atom_after_child_group() {
        assert_eq!(
            parse_bracketed("(ROOT (a b) c)"),
            Err(MalformedOutputError::UnexpectedAtom {
                position: 12,
                atom: "c".to_string()
            })
        );
    }

    #[test]
    fn test_no_group() {
        assert_eq!(parse_bracketed("   "), Err(MalformedOutputError::NoRootGroup));
        assert_eq!(parse_bracketed("(a b)"), Err(MalformedOutputError::NoRootGroup));
    }

    #[test]
    fn test_nesting_limit() {
        let at_limit = format!("{}{}", "(X ".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert!(parse_bracketed(&at_limit).is_ok());

        let too_deep = format!("{}(a b){}", "(X ".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert_eq!(
            parse_bracketed(&too_deep),
            Err(MalformedOutputError::NestingTooDeep {
                position: 3 * MAX_NESTING,
                limit: MAX_NESTING
            })
        );
    }
}
