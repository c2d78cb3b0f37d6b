//! Stateful cursor over a parsed document
//!
//! A `Cursor` stands on one node and moves along tree edges. Five primitive
//! moves (parent, first/last child, next/previous sibling) compose into
//! document-order stepping (`next`/`prev`), which in turn drives the
//! element and tag searches.
//!
//! ## Failure and rollback
//!
//! Primitive moves and `next`/`prev` are all-or-nothing: when they fail the
//! cursor is exactly where it was before the call.
//!
//! The searches (`next_element`, `prev_element`, `*_by_tag`, `body`, `head`,
//! the meta helpers) do NOT roll back. A failed search leaves the cursor on
//! the last node it reached, i.e. at the end (or start) of the document.
//! Save a [`Position`] first if you need to return.
//!
//! ```text
//! #document            depth 0
//! └─ html              depth 1
//!    ├─ head           depth 2
//!    └─ body           depth 2
//!       └─ p           depth 3
//!          └─ "x"      depth 4
//! ```

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::parser::{DomParser, ParseConfig};
use crate::types::{DomNode, NodeId};
use crate::utils::{has_tag, is_element};
use html5ever::{local_name, LocalName};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::sync::Arc;

/// Snapshot of a cursor's location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub node: NodeId,
    pub depth: usize,
}

#[derive(Debug, Clone, Copy)]
enum Relative {
    Parent,
    FirstChild,
    LastChild,
    NextSibling,
    PrevSibling,
}

/// Navigational cursor over a shared, read-only document tree
///
/// Cloning is cheap and yields an independent cursor over the same tree.
#[derive(Debug, Clone)]
pub struct Cursor {
    doc: Arc<DomArena>,
    root: NodeId,
    current: NodeId,
    depth: usize,
}

impl Cursor {
    /// Bind a cursor to the root of an already-built tree
    pub fn new(doc: impl Into<Arc<DomArena>>) -> Result<Self> {
        let doc = doc.into();
        let root = doc.root()?.node_id;
        Ok(Self {
            doc,
            root,
            current: root,
            depth: 0,
        })
    }

    /// Parse an in-memory document and bind to it
    pub fn parse(html: &str) -> Result<Self> {
        Self::new(DomParser::new().parse_str(html))
    }

    /// Parse a document from a byte stream and bind to it
    ///
    /// Fails with the reader's I/O error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_config(reader, ParseConfig::default())
    }

    pub fn from_reader_with_config<R: Read>(reader: R, config: ParseConfig) -> Result<Self> {
        Self::new(DomParser::with_config(config).parse_reader(reader)?)
    }

    /// The tree this cursor walks
    pub fn document(&self) -> &Arc<DomArena> {
        &self.doc
    }

    /// Current node
    pub fn node(&self) -> &DomNode {
        &self.doc[self.current]
    }

    pub fn node_id(&self) -> NodeId {
        self.current
    }

    /// Depth of the current node. The document node is 0, `<html>` is 1.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Go back to the document node
    pub fn reset(&mut self) -> &DomNode {
        self.current = self.root;
        self.depth = 0;
        self.node()
    }

    pub fn position(&self) -> Position {
        Position {
            node: self.current,
            depth: self.depth,
        }
    }

    /// Return to a saved position. The depth is recomputed from the tree.
    pub fn restore(&mut self, position: Position) -> Result<&DomNode> {
        self.seek(position.node)
    }

    /// Jump to any node of this document
    ///
    /// Fails with `NodeNotFound`, leaving the cursor alone, if the node is
    /// outside the arena or not inside the root's subtree.
    pub fn seek(&mut self, node_id: NodeId) -> Result<&DomNode> {
        let mut top = self.doc.get(node_id)?;
        let mut depth = 0;
        while top.node_id != self.root {
            let parent_id = top.parent_id.ok_or(DomError::NodeNotFound(node_id))?;
            top = self.doc.get(parent_id)?;
            depth += 1;
        }

        self.current = node_id;
        self.depth = depth;
        Ok(self.node())
    }

    // ---- Primitive moves ----

    /// Move along one edge. The root has no parent or siblings as far as
    /// the cursor is concerned, even when the arena links it further.
    fn step(&mut self, relative: Relative) -> Result<()> {
        let node = &self.doc[self.current];
        let at_root = self.current == self.root;
        let target = match relative {
            Relative::Parent if at_root => None,
            Relative::NextSibling | Relative::PrevSibling if at_root => None,
            Relative::Parent => node.parent_id,
            Relative::FirstChild => node.first_child_id,
            Relative::LastChild => node.last_child_id,
            Relative::NextSibling => node.next_sibling_id,
            Relative::PrevSibling => node.prev_sibling_id,
        }
        .ok_or(DomError::NoSuchRelative)?;

        let depth = match relative {
            Relative::Parent => self.depth.checked_sub(1),
            Relative::FirstChild | Relative::LastChild => self.depth.checked_add(1),
            Relative::NextSibling | Relative::PrevSibling => Some(self.depth),
        }
        .ok_or(DomError::NoSuchRelative)?;

        self.current = target;
        self.depth = depth;
        Ok(())
    }

    pub fn parent(&mut self) -> Result<&DomNode> {
        self.step(Relative::Parent)?;
        Ok(self.node())
    }

    pub fn first_child(&mut self) -> Result<&DomNode> {
        self.step(Relative::FirstChild)?;
        Ok(self.node())
    }

    pub fn last_child(&mut self) -> Result<&DomNode> {
        self.step(Relative::LastChild)?;
        Ok(self.node())
    }

    pub fn next_sibling(&mut self) -> Result<&DomNode> {
        self.step(Relative::NextSibling)?;
        Ok(self.node())
    }

    pub fn prev_sibling(&mut self) -> Result<&DomNode> {
        self.step(Relative::PrevSibling)?;
        Ok(self.node())
    }

    // ---- Document order ----

    /// Advance to the next node in document order
    ///
    /// Fails with `EndOfDocument` on the last node, cursor unchanged.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<&DomNode> {
        if self.step(Relative::FirstChild).is_ok() || self.next_sibling_ascending().is_ok() {
            return Ok(self.node());
        }
        Err(DomError::EndOfDocument)
    }

    /// Retreat to the previous node in document order
    ///
    /// Fails with `BeginningOfDocument` on the document node, cursor unchanged.
    pub fn prev(&mut self) -> Result<&DomNode> {
        if self.prev_sibling_descending().is_ok() || self.step(Relative::Parent).is_ok() {
            return Ok(self.node());
        }
        Err(DomError::BeginningOfDocument)
    }

    /// Next sibling of the current node or of its nearest ancestor that has one.
    /// Restores the starting position if the climb reaches the root.
    fn next_sibling_ascending(&mut self) -> Result<()> {
        let start = self.position();
        loop {
            if self.step(Relative::NextSibling).is_ok() {
                return Ok(());
            }
            if self.step(Relative::Parent).is_err() {
                break;
            }
        }
        self.current = start.node;
        self.depth = start.depth;
        Err(DomError::NoSuchRelative)
    }

    /// Previous sibling, then down its last-child chain to the deepest node
    fn prev_sibling_descending(&mut self) -> Result<()> {
        self.step(Relative::PrevSibling)?;
        while self.step(Relative::LastChild).is_ok() {}
        Ok(())
    }

    // ---- Searches (no rollback) ----

    /// Step forward until standing on an element. Returns the current node
    /// without moving if it already is one.
    pub fn next_element(&mut self) -> Result<&DomNode> {
        while !is_element(self.node()) {
            self.next()?;
        }
        Ok(self.node())
    }

    /// Step backward until standing on an element. Returns the current node
    /// without moving if it already is one.
    pub fn prev_element(&mut self) -> Result<&DomNode> {
        while !is_element(self.node()) {
            self.prev()?;
        }
        Ok(self.node())
    }

    /// First element in the document with the given tag
    pub fn first_element_by_tag(&mut self, tag: &LocalName) -> Result<&DomNode> {
        self.reset();
        self.next()?;
        self.forward_to_tag(tag)
    }

    /// Next element with the given tag, strictly after the current node
    pub fn next_element_by_tag(&mut self, tag: &LocalName) -> Result<&DomNode> {
        self.next()?;
        self.forward_to_tag(tag)
    }

    fn forward_to_tag(&mut self, tag: &LocalName) -> Result<&DomNode> {
        while !has_tag(self.node(), tag) {
            self.next().map_err(|err| {
                tracing::trace!(tag = &**tag, "no further element with tag");
                err
            })?;
        }
        Ok(self.node())
    }

    pub fn body(&mut self) -> Result<&DomNode> {
        self.first_element_by_tag(&local_name!("body"))
    }

    pub fn head(&mut self) -> Result<&DomNode> {
        self.first_element_by_tag(&local_name!("head"))
    }

    pub fn first_meta(&mut self) -> Result<&DomNode> {
        self.first_element_by_tag(&local_name!("meta"))
    }

    pub fn next_meta(&mut self) -> Result<&DomNode> {
        self.next_element_by_tag(&local_name!("meta"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeType;

    const SIMPLE: &str = "<html><head></head><body><p>x</p></body></html>";

    const PAGE: &str = "<!DOCTYPE html>\
        <html><head><title>T</title>\
        <meta charset=\"utf-8\"><meta name=\"author\" content=\"me\"></head>\
        <body><div id=\"a\"><p>one</p><p>two<b>bold</b></p></div>\
        <!-- note --><ul><li>i</li><li></li></ul>tail</body></html>";

    fn label(node: &DomNode) -> String {
        match node.node_type {
            NodeType::Element => node.tag_name().unwrap_or_default().to_string(),
            NodeType::Text => format!("#text:{}", node.node_value),
            NodeType::Comment => "#comment".to_string(),
            NodeType::Document => "#document".to_string(),
            NodeType::DocumentType => "#doctype".to_string(),
            NodeType::ProcessingInstruction => "#pi".to_string(),
        }
    }

    /// Walk forward from the document node, collecting every position
    fn forward(cursor: &mut Cursor) -> (Vec<Position>, DomError) {
        cursor.reset();
        let mut seen = vec![cursor.position()];
        loop {
            match cursor.next() {
                Ok(_) => seen.push(cursor.position()),
                Err(err) => return (seen, err),
            }
        }
    }

    #[test]
    fn test_new_requires_root() {
        assert!(matches!(
            Cursor::new(DomArena::new()),
            Err(DomError::EmptyDocument)
        ));
    }

    #[test]
    fn test_starts_at_document() {
        let cursor = Cursor::parse(SIMPLE).unwrap();
        assert_eq!(cursor.node().node_type, NodeType::Document);
        assert_eq!(cursor.depth(), 0);
        assert_eq!(Some(cursor.node_id()), cursor.document().root_id());
    }

    #[test]
    fn test_from_reader() {
        let mut cursor = Cursor::from_reader(SIMPLE.as_bytes()).unwrap();
        assert_eq!(cursor.body().unwrap().tag_name(), Some("body"));

        let config = ParseConfig {
            drop_doctype: true,
            ..Default::default()
        };
        let mut cursor = Cursor::from_reader_with_config(PAGE.as_bytes(), config).unwrap();
        assert_eq!(label(cursor.next().unwrap()), "html");
    }

    #[test]
    fn test_primitive_moves_track_depth() {
        let mut cursor = Cursor::parse(SIMPLE).unwrap();

        assert_eq!(label(cursor.first_child().unwrap()), "html");
        assert_eq!(cursor.depth(), 1);
        assert_eq!(label(cursor.last_child().unwrap()), "body");
        assert_eq!(cursor.depth(), 2);
        assert_eq!(label(cursor.prev_sibling().unwrap()), "head");
        assert_eq!(cursor.depth(), 2);
        assert_eq!(label(cursor.next_sibling().unwrap()), "body");
        assert_eq!(label(cursor.parent().unwrap()), "html");
        assert_eq!(cursor.depth(), 1);
        assert_eq!(label(cursor.parent().unwrap()), "#document");
        assert_eq!(cursor.depth(), 0);
    }

    #[test]
    fn test_failed_primitive_leaves_cursor_unchanged() {
        let mut cursor = Cursor::parse(SIMPLE).unwrap();

        let at_root = cursor.position();
        assert!(matches!(cursor.parent(), Err(DomError::NoSuchRelative)));
        assert!(matches!(cursor.next_sibling(), Err(DomError::NoSuchRelative)));
        assert_eq!(cursor.position(), at_root);

        cursor.body().unwrap();
        let at_body = cursor.position();
        assert!(matches!(cursor.next_sibling(), Err(DomError::NoSuchRelative)));
        assert_eq!(cursor.position(), at_body);

        cursor.prev_sibling().unwrap();
        let at_head = cursor.position();
        assert!(matches!(cursor.first_child(), Err(DomError::NoSuchRelative)));
        assert!(matches!(cursor.last_child(), Err(DomError::NoSuchRelative)));
        assert!(matches!(cursor.prev_sibling(), Err(DomError::NoSuchRelative)));
        assert_eq!(cursor.position(), at_head);
    }

    #[test]
    fn test_child_parent_round_trip() {
        let mut cursor = Cursor::parse(PAGE).unwrap();
        let (positions, _) = forward(&mut cursor);

        for position in positions {
            cursor.restore(position).unwrap();
            if !cursor.node().has_children() {
                continue;
            }
            cursor.first_child().unwrap();
            assert_eq!(cursor.depth(), position.depth + 1);
            cursor.parent().unwrap();
            assert_eq!(cursor.position(), position);

            cursor.last_child().unwrap();
            cursor.parent().unwrap();
            assert_eq!(cursor.position(), position);
        }
    }

    #[test]
    fn test_parent_reduces_depth_by_one() {
        let mut cursor = Cursor::parse(PAGE).unwrap();
        let (positions, _) = forward(&mut cursor);

        for position in positions.into_iter().skip(1) {
            cursor.restore(position).unwrap();
            let expected_parent = cursor.node().parent_id;
            cursor.parent().unwrap();
            assert_eq!(Some(cursor.node_id()), expected_parent);
            assert_eq!(cursor.depth(), position.depth - 1);
        }
    }

    #[test]
    fn test_next_walks_simple_document() {
        let mut cursor = Cursor::parse(SIMPLE).unwrap();
        let mut walk = Vec::new();
        while let Ok(node) = cursor.next() {
            walk.push(label(node));
        }
        assert_eq!(walk, vec!["html", "head", "body", "p", "#text:x"]);
    }

    #[test]
    fn test_next_visits_every_node_in_preorder() {
        let mut cursor = Cursor::parse(PAGE).unwrap();
        let (positions, err) = forward(&mut cursor);
        assert!(matches!(err, DomError::EndOfDocument));

        let doc = cursor.document().clone();
        let mut preorder = Vec::new();
        doc.traverse_df(cursor.root, |node| {
            preorder.push(node.node_id);
            Ok(())
        })
        .unwrap();

        let visited: Vec<NodeId> = positions.iter().map(|p| p.node).collect();
        assert_eq!(visited, preorder);

        // Depth bookkeeping agrees with the tree
        let mut probe = cursor.clone();
        for position in &positions {
            probe.seek(position.node).unwrap();
            assert_eq!(probe.depth(), position.depth);
        }
    }

    #[test]
    fn test_end_of_document_rolls_back() {
        let mut cursor = Cursor::parse(PAGE).unwrap();
        let (positions, _) = forward(&mut cursor);
        let last = *positions.last().unwrap();

        // `forward` left the cursor on the last node; failing again changes nothing
        assert_eq!(cursor.position(), last);
        assert!(matches!(cursor.next(), Err(DomError::EndOfDocument)));
        assert_eq!(cursor.position(), last);
        assert_eq!(label(cursor.node()), "#text:tail");
    }

    #[test]
    fn test_prev_walks_reverse_order() {
        let mut cursor = Cursor::parse(PAGE).unwrap();
        let (positions, _) = forward(&mut cursor);

        let mut backward = vec![cursor.position()];
        let err = loop {
            match cursor.prev() {
                Ok(_) => backward.push(cursor.position()),
                Err(err) => break err,
            }
        };
        assert!(matches!(err, DomError::BeginningOfDocument));
        assert_eq!(cursor.depth(), 0);
        assert_eq!(cursor.node_id(), cursor.root);

        backward.reverse();
        assert_eq!(backward, positions);
    }

    #[test]
    fn test_next_and_prev_are_inverses() {
        let mut cursor = Cursor::parse(PAGE).unwrap();
        let (positions, _) = forward(&mut cursor);
        let interior = &positions[1..positions.len() - 1];

        for &position in interior {
            cursor.restore(position).unwrap();
            cursor.next().unwrap();
            cursor.prev().unwrap();
            assert_eq!(cursor.position(), position);

            cursor.prev().unwrap();
            cursor.next().unwrap();
            assert_eq!(cursor.position(), position);
        }
    }

    #[test]
    fn test_prev_descends_into_previous_sibling() {
        let mut cursor = Cursor::parse(PAGE).unwrap();
        cursor
            .first_element_by_tag(&LocalName::from("ul"))
            .unwrap();
        // Previous of <ul> is the comment, then the deepest tail of <div>
        assert_eq!(label(cursor.prev().unwrap()), "#comment");
        assert_eq!(label(cursor.prev().unwrap()), "#text:bold");
        assert_eq!(cursor.depth(), 6);
    }

    #[test]
    fn test_next_element_skips_non_elements() {
        let mut cursor = Cursor::parse(PAGE).unwrap();
        // Document node is not an element; the doctype is next, then <html>
        assert_eq!(label(cursor.next_element().unwrap()), "html");
        // Already on an element: no movement
        assert_eq!(label(cursor.next_element().unwrap()), "html");
        assert_eq!(cursor.depth(), 1);

        cursor.first_element_by_tag(&LocalName::from("p")).unwrap();
        cursor.first_child().unwrap();
        assert_eq!(label(cursor.node()), "#text:one");
        assert_eq!(label(cursor.next_element().unwrap()), "p");
    }

    #[test]
    fn test_failed_search_stops_at_last_node_visited() {
        let mut cursor =
            Cursor::parse("<html><head></head><body><p>x</p>tail<!--c--></body></html>").unwrap();
        cursor.first_element_by_tag(&LocalName::from("p")).unwrap();
        cursor.first_child().unwrap();
        assert_eq!(label(cursor.node()), "#text:x");

        assert!(matches!(cursor.next_element(), Err(DomError::EndOfDocument)));
        // Moved past "x" and "tail" before running out
        assert_eq!(label(cursor.node()), "#comment");
        assert_eq!(cursor.depth(), 3);
    }

    #[test]
    fn test_prev_element() {
        let mut cursor = Cursor::parse(PAGE).unwrap();
        cursor.first_element_by_tag(&LocalName::from("ul")).unwrap();
        cursor.prev().unwrap();
        assert_eq!(label(cursor.node()), "#comment");
        assert_eq!(label(cursor.prev_element().unwrap()), "b");

        // Doctype -> document node -> nothing: ends on the document, not the doctype
        cursor.reset();
        cursor.first_child().unwrap();
        assert_eq!(label(cursor.node()), "#doctype");
        assert!(matches!(
            cursor.prev_element(),
            Err(DomError::BeginningOfDocument)
        ));
        assert_eq!(label(cursor.node()), "#document");
        assert_eq!(cursor.depth(), 0);
    }

    #[test]
    fn test_body_and_head() {
        let mut cursor = Cursor::parse(SIMPLE).unwrap();
        let body = cursor.body().unwrap();
        assert_eq!(body.tag(), Some(&local_name!("body")));
        assert_eq!(cursor.depth(), 2);

        assert_eq!(cursor.head().unwrap().tag_name(), Some("head"));
        assert_eq!(cursor.depth(), 2);

        // body() resets first, so it works from anywhere
        while cursor.next().is_ok() {}
        assert_eq!(label(cursor.node()), "#text:x");
        assert_eq!(cursor.body().unwrap().tag_name(), Some("body"));
    }

    #[test]
    fn test_next_element_by_tag_moves_strictly_forward() {
        let mut cursor = Cursor::parse(PAGE).unwrap();
        let p = local_name!("p");

        let first = cursor.first_element_by_tag(&p).unwrap().node_id;
        assert_eq!(cursor.depth(), 4);
        let second = cursor.next_element_by_tag(&p).unwrap().node_id;
        assert_ne!(first, second);
        assert!(matches!(
            cursor.next_element_by_tag(&p),
            Err(DomError::EndOfDocument)
        ));
        // Search ran to the last node
        assert_eq!(label(cursor.node()), "#text:tail");
    }

    #[test]
    fn test_meta_iteration() {
        let mut cursor = Cursor::parse(PAGE).unwrap();

        assert_eq!(cursor.first_meta().unwrap().attr("charset"), Some("utf-8"));
        let meta = cursor.next_meta().unwrap();
        assert_eq!(meta.attr("name"), Some("author"));
        assert_eq!(meta.attr("content"), Some("me"));
        assert!(matches!(cursor.next_meta(), Err(DomError::EndOfDocument)));
    }

    #[test]
    fn test_first_meta_without_meta_ends_on_last_node() {
        let mut cursor = Cursor::parse(SIMPLE).unwrap();
        assert!(matches!(cursor.first_meta(), Err(DomError::EndOfDocument)));
        assert_eq!(label(cursor.node()), "#text:x");
        assert_eq!(cursor.depth(), 4);
    }

    #[test]
    fn test_position_restore_and_seek() {
        let mut cursor = Cursor::parse(PAGE).unwrap();
        cursor.first_element_by_tag(&local_name!("b")).unwrap();
        let saved = cursor.position();

        cursor.reset();
        assert_eq!(label(cursor.restore(saved).unwrap()), "b");
        assert_eq!(cursor.position(), saved);

        assert!(matches!(
            cursor.seek(u32::MAX),
            Err(DomError::NodeNotFound(_))
        ));
        assert_eq!(cursor.position(), saved);
    }

    #[test]
    fn test_seek_rejects_detached_nodes() {
        let mut arena = DomArena::new();
        let root = arena.add_node(DomNode::new(NodeType::Document));
        arena.set_root(root).unwrap();
        let attached = arena.add_node(DomNode::with_value(NodeType::Text, "in"));
        arena.append_child(root, attached).unwrap();
        let detached = arena.add_node(DomNode::with_value(NodeType::Text, "out"));

        let mut cursor = Cursor::new(arena).unwrap();
        assert!(matches!(
            cursor.seek(detached),
            Err(DomError::NodeNotFound(id)) if id == detached
        ));
        assert_eq!(cursor.seek(attached).unwrap().node_value, "in");
        assert_eq!(cursor.depth(), 1);
    }

    /// doc -> [before, inner -> [leaf], after], cursor rooted at `inner`
    fn nested_root() -> (Cursor, [NodeId; 5]) {
        let mut arena = DomArena::new();
        let doc = arena.add_node(DomNode::new(NodeType::Document));
        let before = arena.add_node(DomNode::with_value(NodeType::Text, "before"));
        let inner = arena.add_node(DomNode::new(NodeType::Element));
        let leaf = arena.add_node(DomNode::with_value(NodeType::Text, "leaf"));
        let after = arena.add_node(DomNode::with_value(NodeType::Text, "after"));
        arena.append_child(doc, before).unwrap();
        arena.append_child(doc, inner).unwrap();
        arena.append_child(inner, leaf).unwrap();
        arena.append_child(doc, after).unwrap();
        arena.set_root(inner).unwrap();
        (Cursor::new(arena).unwrap(), [doc, before, inner, leaf, after])
    }

    #[test]
    fn test_root_with_arena_parent_is_still_the_top() {
        let (mut cursor, [doc, _, inner, leaf, _]) = nested_root();
        let at_root = cursor.position();

        assert!(matches!(cursor.parent(), Err(DomError::NoSuchRelative)));
        assert!(matches!(cursor.next_sibling(), Err(DomError::NoSuchRelative)));
        assert!(matches!(cursor.prev_sibling(), Err(DomError::NoSuchRelative)));
        assert!(matches!(cursor.prev(), Err(DomError::BeginningOfDocument)));
        assert_eq!(cursor.position(), at_root);

        assert_eq!(cursor.seek(inner).unwrap().node_id, inner);
        assert_eq!(cursor.depth(), 0);
        assert!(matches!(cursor.seek(doc), Err(DomError::NodeNotFound(id)) if id == doc));
        assert_eq!(cursor.position(), at_root);

        assert_eq!(cursor.seek(leaf).unwrap().node_value, "leaf");
        assert_eq!(cursor.depth(), 1);
    }

    #[test]
    fn test_walk_stays_inside_root_subtree() {
        let (mut cursor, [_, before, inner, leaf, after]) = nested_root();

        assert_eq!(cursor.next().unwrap().node_id, leaf);
        // "after" follows inner in the arena, but lies outside the root
        assert!(matches!(cursor.next(), Err(DomError::EndOfDocument)));
        assert_eq!(cursor.node_id(), leaf);
        assert_eq!(cursor.depth(), 1);

        assert_eq!(cursor.prev().unwrap().node_id, inner);
        assert!(matches!(cursor.prev(), Err(DomError::BeginningOfDocument)));
        assert_eq!(cursor.depth(), 0);

        assert!(matches!(cursor.seek(before), Err(DomError::NodeNotFound(_))));
        assert!(matches!(cursor.seek(after), Err(DomError::NodeNotFound(_))));
    }

    #[test]
    fn test_position_serializes() {
        let mut cursor = Cursor::parse(SIMPLE).unwrap();
        cursor.body().unwrap();
        let json = serde_json::to_string(&cursor.position()).unwrap();
        let position: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(position, cursor.position());
        assert_eq!(position.depth, 2);
    }

    #[test]
    fn test_clones_walk_independently() {
        let mut a = Cursor::parse(PAGE).unwrap();
        let mut b = a.clone();
        a.body().unwrap();
        b.head().unwrap();
        assert_eq!(label(a.node()), "body");
        assert_eq!(label(b.node()), "head");
        assert!(Arc::ptr_eq(a.document(), b.document()));
    }

    #[test]
    fn test_cursor_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Cursor>();
    }
}
