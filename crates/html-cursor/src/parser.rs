//! HTML parser front end - builds a `DomArena` with html5ever
//!
//! html5ever does the tokenizing and tree construction (with full browser
//! error recovery); this module only supplies the `TreeSink` that records
//! the resulting tree into our arena.
//!
//! The arena root is always the `Document` node. Its children are the
//! doctype (if kept), any top-level comments and the `<html>` element.

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::{Attribute, DomNode, NodeId, NodeType};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tokenizer::TokenizerOpts;
use html5ever::tree_builder::{
    ElemName, ElementFlags, NodeOrText, QuirksMode, TreeBuilderOpts, TreeSink,
};
use html5ever::{parse_document, LocalName, Namespace, ParseOpts, QualName};
use std::borrow::Cow;
use std::cell::RefCell;
use std::io::Read;

/// Configuration for the HTML parser
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// Parse `<noscript>` content as raw text, like a browser with JS on
    pub scripting_enabled: bool,
    /// Leave the doctype out of the tree
    pub drop_doctype: bool,
    /// Ask html5ever for detailed (slower) parse-error messages
    pub exact_errors: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            scripting_enabled: true,
            drop_doctype: false,
            exact_errors: false,
        }
    }
}

impl ParseConfig {
    fn parse_opts(&self) -> ParseOpts {
        ParseOpts {
            tokenizer: TokenizerOpts {
                exact_errors: self.exact_errors,
                ..Default::default()
            },
            tree_builder: TreeBuilderOpts {
                exact_errors: self.exact_errors,
                scripting_enabled: self.scripting_enabled,
                drop_doctype: self.drop_doctype,
                ..Default::default()
            },
        }
    }
}

/// HTML parser producing arena trees
#[derive(Debug, Clone, Default)]
pub struct DomParser {
    config: ParseConfig,
}

impl DomParser {
    /// Create parser with default config
    pub fn new() -> Self {
        Self::with_config(ParseConfig::default())
    }

    /// Create parser with custom config
    pub fn with_config(config: ParseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Parse a complete document held in memory. Cannot fail: malformed
    /// markup is repaired the way browsers repair it.
    pub fn parse_str(&self, html: &str) -> DomArena {
        parse_document(ArenaSink::new(), self.config.parse_opts()).one(StrTendril::from(html))
    }

    /// Parse a document from a byte stream, decoding it as UTF-8 (lossy).
    ///
    /// Fails only if reading the stream fails.
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<DomArena> {
        let arena = parse_document(ArenaSink::new(), self.config.parse_opts())
            .from_utf8()
            .read_from(&mut reader)?;
        Ok(arena)
    }
}

/// Owned element name handed back to the tree builder
#[derive(Debug, Clone)]
struct OwnedElemName(QualName);

impl ElemName for OwnedElemName {
    fn ns(&self) -> &Namespace {
        &self.0.ns
    }

    fn local_name(&self) -> &LocalName {
        &self.0.local
    }
}

/// TreeSink implementation for building the arena
///
/// html5ever drives the sink through `&self`, hence the RefCell.
struct ArenaSink {
    arena: RefCell<DomArena>,

    /// Document node (parent of <html>)
    document: NodeId,
}

impl ArenaSink {
    fn new() -> Self {
        let mut arena = DomArena::new();
        let document = arena.add_node(DomNode::new(NodeType::Document));

        ArenaSink {
            arena: RefCell::new(arena),
            document,
        }
    }

    fn create(&self, node: DomNode) -> NodeId {
        self.arena.borrow_mut().add_node(node)
    }

    /// Handles come from this arena, so link updates only fail on a tree
    /// builder bug. Log and keep going rather than abort the parse.
    fn link(&self, op: &str, result: Result<()>) {
        if let Err(err) = result {
            tracing::warn!(op, error = %err, "tree builder link update failed");
        }
    }
}

impl TreeSink for ArenaSink {
    type Handle = NodeId;
    type Output = DomArena;
    type ElemName<'a>
        = OwnedElemName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        let mut arena = self.arena.into_inner();
        if let Err(err) = arena.set_root(self.document) {
            tracing::warn!(error = %err, "document node missing from arena");
        }
        tracing::debug!(nodes = arena.len(), "parsed html document");
        arena
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        // html5ever recovers from every error; just record it
        tracing::trace!(%msg, "html parse error");
    }

    fn get_document(&self) -> Self::Handle {
        self.document
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        tracing::trace!(?mode, "quirks mode");
    }

    fn same_node(&self, a: &Self::Handle, b: &Self::Handle) -> bool {
        a == b
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> OwnedElemName {
        let name = self
            .arena
            .borrow()
            .get(*target)
            .ok()
            .and_then(|node| node.name.clone());

        // Only ever asked about elements
        OwnedElemName(name.unwrap_or_else(|| {
            QualName::new(None, Namespace::from(""), LocalName::from(""))
        }))
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<html5ever::Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let attributes = attrs
            .into_iter()
            .map(|attr| Attribute {
                name: attr.name,
                value: attr.value.to_string(),
            })
            .collect();

        self.create(DomNode::element(name, attributes))
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        self.create(DomNode::with_value(NodeType::Comment, &*text))
    }

    fn create_pi(&self, _target: StrTendril, data: StrTendril) -> Self::Handle {
        self.create(DomNode::with_value(NodeType::ProcessingInstruction, &*data))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let mut arena = self.arena.borrow_mut();
        let result = match child {
            NodeOrText::AppendNode(node) => arena.append_child(*parent, node),
            NodeOrText::AppendText(text) => arena.append_text(*parent, &text),
        };
        self.link("append", result);
    }

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut arena = self.arena.borrow_mut();
        let result = match new_node {
            NodeOrText::AppendNode(node) => arena.insert_before(*sibling, node),
            NodeOrText::AppendText(text) => arena.insert_text_before(*sibling, &text),
        };
        self.link("append_before_sibling", result);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let has_parent = self
            .arena
            .borrow()
            .get(*element)
            .map(|node| node.parent_id.is_some())
            .unwrap_or(false);

        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        let doctype = self.create(DomNode::with_value(NodeType::DocumentType, &*name));
        let result = self.arena.borrow_mut().append_child(self.document, doctype);
        self.link("append_doctype", result);
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        // Template contents live directly under the <template> element
        *target
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<html5ever::Attribute>) {
        let mut arena = self.arena.borrow_mut();
        let Ok(node) = arena.get_mut(*target) else {
            return;
        };
        for attr in attrs {
            if !node.attributes.iter().any(|existing| existing.name == attr.name) {
                node.attributes.push(Attribute {
                    name: attr.name,
                    value: attr.value.to_string(),
                });
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        let result = self.arena.borrow_mut().detach(*target);
        self.link("remove_from_parent", result);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let result = self.arena.borrow_mut().reparent_children(*node, *new_parent);
        self.link("reparent_children", result);
    }
}
