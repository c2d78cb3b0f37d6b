//! Free predicates and helpers over arena nodes

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::{DomNode, NodeId, NodeType};
use html5ever::LocalName;

pub fn is_element(node: &DomNode) -> bool {
    node.node_type == NodeType::Element
}

pub fn is_text(node: &DomNode) -> bool {
    node.node_type == NodeType::Text
}

/// Element whose local name is `tag`, in any namespace
pub fn has_tag(node: &DomNode, tag: &LocalName) -> bool {
    is_element(node) && node.tag() == Some(tag)
}

/// Get all text content from node and its descendants, trimmed
pub fn text_content(arena: &DomArena, node_id: NodeId) -> Result<String> {
    let mut text = String::new();

    arena.traverse_df(node_id, |node| {
        if is_text(node) {
            text.push_str(&node.node_value);
        }
        Ok(())
    })?;

    Ok(text.trim().to_string())
}
