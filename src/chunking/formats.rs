//! Output formats for parse trees
//!
//! - `bracketed`: the single-line notation the NLTK interface printed,
//!   `(ROOT (NC (What WP)) (VC (is VBZ)))`
//! - `treeviz`: one line per node with box-drawing connectors
//! - `json` / `yaml`: a serde snapshot of the tree
//!
//! Example treeviz output:
//!
//!     ROOT
//!     ├─ NC
//!     │ └─ What/WP
//!     └─ VC
//!       └─ is/VBZ

use crate::chunking::tree::{NodeId, NodeKind, ParseTree};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Bracketed,
    Treeviz,
    Json,
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Bracketed => "bracketed",
            OutputFormat::Treeviz => "treeviz",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        };
        write!(f, "{name}")
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bracketed" => Ok(OutputFormat::Bracketed),
            "treeviz" => Ok(OutputFormat::Treeviz),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

/// Owned, nested copy of a tree, used for serialization and structural assertions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeSnapshot {
    Chunk {
        label: Option<String>,
        children: Vec<TreeSnapshot>,
    },
    Leaf {
        token: String,
        tag: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        inherited_label: Option<String>,
    },
}

pub fn snapshot(tree: &ParseTree) -> TreeSnapshot {
    snapshot_node(tree, tree.root())
}

fn snapshot_node(tree: &ParseTree, id: NodeId) -> TreeSnapshot {
    match tree.kind(id) {
        NodeKind::Chunk { label } => TreeSnapshot::Chunk {
            label: label.clone(),
            children: tree
                .children(id)
                .iter()
                .map(|&child| snapshot_node(tree, child))
                .collect(),
        },
        NodeKind::Wrapper(inherited) => TreeSnapshot::Leaf {
            token: inherited.leaf.token.clone(),
            tag: inherited.leaf.tag.clone(),
            inherited_label: inherited.inherited_label.clone(),
        },
        NodeKind::Leaf(leaf) => TreeSnapshot::Leaf {
            token: leaf.token.clone(),
            tag: leaf.tag.clone(),
            inherited_label: None,
        },
    }
}

pub fn serialize(tree: &ParseTree, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Bracketed => Ok(tree.to_string()),
        OutputFormat::Treeviz => Ok(to_treeviz_str(tree)),
        OutputFormat::Json => serde_json::to_string_pretty(&snapshot(tree))
            .map_err(|e| Error::Serialization(e.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(&snapshot(tree)).map_err(|e| Error::Serialization(e.to_string()))
        }
    }
}

pub fn to_treeviz_str(tree: &ParseTree) -> String {
    let root = tree.root();
    let mut result = format!("{}\n", node_label(tree, root));
    append_children(&mut result, tree, root, "");
    result
}

fn node_label(tree: &ParseTree, id: NodeId) -> String {
    match tree.kind(id) {
        NodeKind::Chunk { label } => label.clone().unwrap_or_else(|| "∅".to_string()),
        NodeKind::Wrapper(inherited) => format!(
            "{} {}/{}",
            inherited.inherited_label.as_deref().unwrap_or("∅"),
            inherited.leaf.token,
            inherited.leaf.tag
        ),
        NodeKind::Leaf(leaf) => format!("{}/{}", leaf.token, leaf.tag),
    }
}

fn append_node(result: &mut String, tree: &ParseTree, id: NodeId, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    result.push_str(&format!("{}{} {}\n", prefix, connector, node_label(tree, id)));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    append_children(result, tree, id, &new_prefix);
}

fn append_children(result: &mut String, tree: &ParseTree, id: NodeId, prefix: &str) {
    let children = tree.children(id);
    for (i, &child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_node(result, tree, child, prefix, is_last);
    }
}
