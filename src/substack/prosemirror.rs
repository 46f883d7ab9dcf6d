//! Plain text to ProseMirror document conversion
//!
//! Substack's editor stores rich content as a ProseMirror JSON tree. Post and
//! note bodies submitted by the tools are plain text; this module performs the
//! lossy conversion: blank-line boundaries become paragraph breaks and single
//! newlines inside a paragraph collapse to spaces.

use serde::{Deserialize, Serialize};

/// Minimal ProseMirror node tree: document, paragraph, text run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Doc { content: Vec<Node> },
    Paragraph { content: Vec<Node> },
    Text { text: String },
}

/// Wrap text verbatim in a single-paragraph document.
///
/// Notes are published as one paragraph; blank lines and embedded newlines in
/// the note text pass through untouched.
pub fn single_paragraph_document(text: &str) -> Node {
    Node::Doc {
        content: vec![Node::Paragraph {
            content: vec![Node::Text {
                text: text.to_string(),
            }],
        }],
    }
}

/// Convert plain text into a ProseMirror document
pub fn document_from_text(text: &str) -> Node {
    let content = text
        .split("\n\n")
        .filter(|para| !para.trim().is_empty())
        .map(|para| Node::Paragraph {
            content: vec![Node::Text {
                text: para.replace('\n', " "),
            }],
        })
        .collect();
    Node::Doc { content }
}
