//! Arena-based DOM tree storage
//!
//! All nodes live in a single `Vec`, addressed by `NodeId`. Tree edges are
//! stored as optional indices on each node, so there are no reference
//! cycles to manage and every move is one lookup.
//!
//! ## Memory Layout
//!
//! ```text
//! Arena: Vec<DomNode>
//!        [Node0][Node1][Node2]...
//!         ↑ 4-byte index, not 8-byte pointer
//! ```
//!
//! Link invariants maintained by every mutation here:
//! - `a.first_child_id == Some(b)` implies `b.parent_id == Some(a)`
//! - sibling links form a consistent doubly-linked list under each parent
//! - a node appears in at most one child list
//! - no node is its own ancestor (insertions that would close a cycle fail)

use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId, NodeType};
use std::ops::Index;

/// Arena allocator for DOM nodes
#[derive(Debug, Clone)]
pub struct DomArena {
    /// All nodes stored sequentially (cache-friendly)
    nodes: Vec<DomNode>,

    /// Root node ID (if set)
    root_id: Option<NodeId>,
}

impl DomArena {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self::with_capacity(1024) // Pre-allocate for typical page
    }

    /// Create arena with specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root_id: None,
        }
    }

    /// Add an unlinked node to the arena, returns its ID
    pub fn add_node(&mut self, mut node: DomNode) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        node.node_id = node_id;
        self.nodes.push(node);
        node_id
    }

    /// Get node by ID (immutable)
    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.nodes
            .get(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID (mutable)
    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.nodes
            .get_mut(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    pub fn contains(&self, node_id: NodeId) -> bool {
        (node_id as usize) < self.nodes.len()
    }

    /// Set root node
    pub fn set_root(&mut self, node_id: NodeId) -> Result<()> {
        // Verify node exists
        self.get(node_id)?;
        self.root_id = Some(node_id);
        Ok(())
    }

    /// Get root node ID
    pub fn root_id(&self) -> Option<NodeId> {
        self.root_id
    }

    /// Get root node
    pub fn root(&self) -> Result<&DomNode> {
        let root_id = self.root_id.ok_or(DomError::EmptyDocument)?;
        self.get(root_id)
    }

    /// Total number of nodes, including any the parser detached
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterator over all nodes in allocation order
    pub fn iter(&self) -> impl Iterator<Item = &DomNode> {
        self.nodes.iter()
    }

    /// Get children of a node, left to right
    pub fn children(&self, node_id: NodeId) -> Result<Vec<&DomNode>> {
        let mut children = Vec::new();
        let mut next = self.get(node_id)?.first_child_id;
        while let Some(child_id) = next {
            let child = self.get(child_id)?;
            next = child.next_sibling_id;
            children.push(child);
        }
        Ok(children)
    }

    /// Get parent of a node
    pub fn parent(&self, node_id: NodeId) -> Result<Option<&DomNode>> {
        let node = self.get(node_id)?;
        match node.parent_id {
            Some(parent_id) => Ok(Some(self.get(parent_id)?)),
            None => Ok(None),
        }
    }

    /// True if `ancestor_id` is `node_id` or lies on its parent chain
    pub fn is_ancestor_or_self(&self, ancestor_id: NodeId, node_id: NodeId) -> Result<bool> {
        let mut next = Some(node_id);
        while let Some(id) = next {
            if id == ancestor_id {
                return Ok(true);
            }
            next = self.get(id)?.parent_id;
        }
        Ok(false)
    }

    /// Unlink a node from its parent and siblings. Its own subtree stays attached.
    pub fn detach(&mut self, node_id: NodeId) -> Result<()> {
        let node = self.get_mut(node_id)?;
        let parent = node.parent_id.take();
        let prev = node.prev_sibling_id.take();
        let next = node.next_sibling_id.take();

        match (prev, parent) {
            (Some(prev_id), _) => self.get_mut(prev_id)?.next_sibling_id = next,
            (None, Some(parent_id)) => self.get_mut(parent_id)?.first_child_id = next,
            (None, None) => {}
        }
        match (next, parent) {
            (Some(next_id), _) => self.get_mut(next_id)?.prev_sibling_id = prev,
            (None, Some(parent_id)) => self.get_mut(parent_id)?.last_child_id = prev,
            (None, None) => {}
        }
        Ok(())
    }

    /// Make `child` the last child of `parent`, detaching it first if needed
    ///
    /// Fails with `WouldCycle`, tree untouched, if `child` is `parent` or one
    /// of its ancestors.
    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<()> {
        self.get(child_id)?;
        if self.is_ancestor_or_self(child_id, parent_id)? {
            return Err(DomError::WouldCycle(child_id));
        }
        self.detach(child_id)?;
        let last = self.get(parent_id)?.last_child_id;

        let child = self.get_mut(child_id)?;
        child.parent_id = Some(parent_id);
        child.prev_sibling_id = last;

        match last {
            Some(last_id) => self.get_mut(last_id)?.next_sibling_id = Some(child_id),
            None => self.get_mut(parent_id)?.first_child_id = Some(child_id),
        }
        self.get_mut(parent_id)?.last_child_id = Some(child_id);
        Ok(())
    }

    /// Insert `new_id` immediately before `sibling_id` under the same parent
    ///
    /// Fails with `WouldCycle` if `new` is `sibling` or one of its ancestors.
    pub fn insert_before(&mut self, sibling_id: NodeId, new_id: NodeId) -> Result<()> {
        self.get(new_id)?;
        let parent_id = self
            .get(sibling_id)?
            .parent_id
            .ok_or(DomError::NoSuchRelative)?;
        if self.is_ancestor_or_self(new_id, sibling_id)? {
            return Err(DomError::WouldCycle(new_id));
        }
        self.detach(new_id)?;
        let prev = self.get(sibling_id)?.prev_sibling_id;

        let node = self.get_mut(new_id)?;
        node.parent_id = Some(parent_id);
        node.prev_sibling_id = prev;
        node.next_sibling_id = Some(sibling_id);

        self.get_mut(sibling_id)?.prev_sibling_id = Some(new_id);
        match prev {
            Some(prev_id) => self.get_mut(prev_id)?.next_sibling_id = Some(new_id),
            None => self.get_mut(parent_id)?.first_child_id = Some(new_id),
        }
        Ok(())
    }

    /// Append text under `parent`, merging into a trailing text node
    pub fn append_text(&mut self, parent_id: NodeId, text: &str) -> Result<()> {
        if let Some(last_id) = self.get(parent_id)?.last_child_id {
            let last = self.get_mut(last_id)?;
            if last.node_type == NodeType::Text {
                last.node_value.push_str(text);
                return Ok(());
            }
        }
        let text_id = self.add_node(DomNode::with_value(NodeType::Text, text));
        self.append_child(parent_id, text_id)
    }

    /// Insert text before `sibling`, merging into a preceding text node
    pub fn insert_text_before(&mut self, sibling_id: NodeId, text: &str) -> Result<()> {
        if let Some(prev_id) = self.get(sibling_id)?.prev_sibling_id {
            let prev = self.get_mut(prev_id)?;
            if prev.node_type == NodeType::Text {
                prev.node_value.push_str(text);
                return Ok(());
            }
        }
        let text_id = self.add_node(DomNode::with_value(NodeType::Text, text));
        self.insert_before(sibling_id, text_id)
    }

    /// Move every child of `node_id` to the end of `new_parent_id`, in order
    pub fn reparent_children(&mut self, node_id: NodeId, new_parent_id: NodeId) -> Result<()> {
        let child_ids: Vec<NodeId> = self
            .children(node_id)?
            .iter()
            .map(|child| child.node_id)
            .collect();

        for child_id in child_ids {
            self.append_child(new_parent_id, child_id)?;
        }
        Ok(())
    }

    /// Traverse tree depth-first (iterative, no recursion)
    ///
    /// Visits in document order: parent before children, children left to right.
    pub fn traverse_df<F>(&self, start_id: NodeId, mut visit: F) -> Result<()>
    where
        F: FnMut(&DomNode) -> Result<()>,
    {
        let mut stack = vec![start_id];

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            visit(node)?;

            // Push children in reverse order (so they're visited left-to-right)
            let mut child = node.last_child_id;
            while let Some(child_id) = child {
                stack.push(child_id);
                child = self.get(child_id)?.prev_sibling_id;
            }
        }

        Ok(())
    }
}

/// Indexing panics on an ID from another arena, like `Vec` indexing
impl Index<NodeId> for DomArena {
    type Output = DomNode;

    fn index(&self, node_id: NodeId) -> &DomNode {
        &self.nodes[node_id as usize]
    }
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}
