//! Core node definitions for the arena
//!
//! Key design principles:
//! 1. Use u32 for indices (4 bytes vs 8 bytes pointer)
//! 2. Every tree edge is an `Option<NodeId>`, so navigation is one lookup
//! 3. Use SmallVec for small arrays (avoid heap allocation)

use html5ever::{LocalName, QualName};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Node identifier (index into arena)
/// u32 allows 4 billion nodes, enough for any webpage
pub type NodeId = u32;

/// Node type matching the DOM specification codes
///
/// Only the kinds the HTML tree builder can produce are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
}

/// Element attribute, value copied out of the parser's buffers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// The tree node structure
///
/// Design philosophy:
/// - Small fixed-size fields first (better packing)
/// - Use indices instead of pointers
/// - Links form a doubly-linked sibling list under each parent
#[derive(Debug, Clone)]
pub struct DomNode {
    pub node_id: NodeId,
    pub node_type: NodeType,

    // Navigation indices
    pub parent_id: Option<NodeId>,
    pub first_child_id: Option<NodeId>,
    pub last_child_id: Option<NodeId>,
    pub prev_sibling_id: Option<NodeId>,
    pub next_sibling_id: Option<NodeId>,

    /// Qualified name, elements only
    pub name: Option<QualName>,
    /// Text/comment data, doctype name, processing instruction data
    pub node_value: String,
    pub attributes: SmallVec<[Attribute; 4]>, // Most elements have <4 attributes
}

impl DomNode {
    /// Create an unlinked node. The arena assigns `node_id` on insertion.
    pub fn new(node_type: NodeType) -> Self {
        Self {
            node_id: 0,
            node_type,
            parent_id: None,
            first_child_id: None,
            last_child_id: None,
            prev_sibling_id: None,
            next_sibling_id: None,
            name: None,
            node_value: String::new(),
            attributes: SmallVec::new(),
        }
    }

    /// Create an unlinked element node
    pub fn element(name: QualName, attributes: SmallVec<[Attribute; 4]>) -> Self {
        Self {
            name: Some(name),
            attributes,
            ..Self::new(NodeType::Element)
        }
    }

    /// Create an unlinked node carrying character data (text, comment, doctype)
    pub fn with_value(node_type: NodeType, value: impl Into<String>) -> Self {
        Self {
            node_value: value.into(),
            ..Self::new(node_type)
        }
    }

    /// Tag identifier for element nodes
    pub fn tag(&self) -> Option<&LocalName> {
        match (&self.name, self.node_type) {
            (Some(name), NodeType::Element) => Some(&name.local),
            _ => None,
        }
    }

    /// Tag name for element nodes
    pub fn tag_name(&self) -> Option<&str> {
        self.tag().map(|local| &**local)
    }

    /// Check if node is an element
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if node is text
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    pub fn has_children(&self) -> bool {
        self.first_child_id.is_some()
    }

    /// Get attribute value by local name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| &*attr.name.local == name)
            .map(|attr| attr.value.as_str())
    }
}
