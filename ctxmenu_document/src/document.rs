// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, updates, queries.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Rect, Size};

use crate::types::{Element, NodeFlags, NodeId};

/// A tree of elements plus the document-wide focus owner and viewport.
///
/// Unlike a browser DOM, the document performs no layout: the host sets each
/// element's origin and size directly. An element's box is only observable
/// through [`Document::rendered_rect`] while it and all of its ancestors are
/// [`NodeFlags::DISPLAYED`].
///
/// ## Example
///
/// ```rust
/// use ctxmenu_document::{Document, Element, Tag};
///
/// let mut doc = Document::new((800.0, 600.0));
/// let body = doc.insert(None, Element::new(Tag::Block));
/// let button = doc.insert(
///     Some(body),
///     Element::new(Tag::Button)
///         .with_id("save")
///         .with_size((80.0, 24.0)),
/// );
///
/// assert_eq!(doc.get_element_by_id("save"), Some(button));
/// assert!(doc.focus(button));
/// assert_eq!(doc.focused(), Some(button));
/// ```
pub struct Document {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    roots: Vec<NodeId>,
    focused: Option<NodeId>,
    viewport: Size,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("focused", &self.focused)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    element: Element,
}

impl Node {
    fn new(generation: u32, element: Element) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            element,
        }
    }
}

impl Document {
    /// Create an empty document with the given viewport size.
    pub fn new(viewport: impl Into<Size>) -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            roots: Vec::new(),
            focused: None,
            viewport: viewport.into(),
        }
    }

    /// Insert a new element as the last child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` inserts the element as a root.
    pub fn insert(&mut self, parent: Option<NodeId>, element: Element) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, element));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, element)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        match parent {
            Some(p) if self.is_alive(p) => self.link_parent(id, p),
            _ => self.roots.push(id),
        }
        id
    }

    /// Remove an element and its subtree.
    ///
    /// If the focus owner is inside the removed subtree, focus is cleared.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        match self.node(id).parent {
            Some(parent) => self.unlink_parent(id, parent),
            None => self.roots.retain(|r| *r != id),
        }
        self.free_subtree(id);
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.free_subtree(child);
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Returns true if `id` refers to a live element.
    ///
    /// A `NodeId` is live if its slot exists and its generation matches the
    /// current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Borrow the element data of a live node.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node_opt(id).map(|n| &n.element)
    }

    /// Returns the parent of a live node, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of a node, or an empty slice if the node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.node_opt(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Root elements in insertion order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// All elements of the subtree rooted at `root` (inclusive), in document order.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.is_alive(root) {
            return out;
        }
        let mut stack = alloc::vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            // Reverse so children are visited in the order they are given.
            for &child in self.node(id).children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// All live elements in document order.
    pub fn all(&self) -> Vec<NodeId> {
        self.roots
            .iter()
            .flat_map(|&root| self.descendants(root))
            .collect()
    }

    /// Walk from `start` towards the root (inclusive) and return the first
    /// element matching `predicate`.
    pub fn closest(
        &self,
        start: NodeId,
        mut predicate: impl FnMut(NodeId, &Element) -> bool,
    ) -> Option<NodeId> {
        let mut cur = Some(start);
        while let Some(id) = cur {
            let node = self.node_opt(id)?;
            if predicate(id, &node.element) {
                return Some(id);
            }
            cur = node.parent;
        }
        None
    }

    /// Returns true if `node` is `ancestor` or lies inside its subtree.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.is_alive(ancestor) && self.closest(node, |id, _| id == ancestor).is_some()
    }

    /// Find the first live element in document order carrying `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.all()
            .into_iter()
            .find(|&n| self.node(n).element.id.as_deref() == Some(id))
    }

    /// Returns the value of an attribute on a live element.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attribute(name)
    }

    /// Set an attribute on a live element.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            n.element.attributes.insert(String::from(name), String::from(value));
        }
    }

    /// Remove an attribute from a live element.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            n.element.attributes.remove(name);
        }
    }

    /// Returns true if the live element carries `class`.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    /// Add a class to a live element; adding an existing class is a no-op.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(n) = self.node_opt_mut(id)
            && !n.element.has_class(class)
        {
            n.element.classes.push(String::from(class));
        }
    }

    /// Remove a class from a live element.
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            n.element.classes.retain(|c| c != class);
        }
    }

    /// Update the tab-order hint.
    pub fn set_tab_index(&mut self, id: NodeId, tab_index: Option<i32>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.element.tab_index = tab_index;
        }
    }

    /// Returns the flags of a live element.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.element(id).map(|e| e.flags)
    }

    /// Replace the flags of a live element.
    ///
    /// Hiding or disabling the focus owner clears focus, as it stops being
    /// focusable.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.element.flags = flags;
        }
        if let Some(f) = self.focused
            && !self.is_focusable(f)
        {
            self.focused = None;
        }
    }

    /// Toggle [`NodeFlags::DISPLAYED`].
    pub fn set_displayed(&mut self, id: NodeId, displayed: bool) {
        if let Some(mut flags) = self.flags(id) {
            flags.set(NodeFlags::DISPLAYED, displayed);
            self.set_flags(id, flags);
        }
    }

    /// Move a live element so its top-left corner sits at `origin`.
    pub fn set_origin(&mut self, id: NodeId, origin: impl Into<kurbo::Point>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.element.origin = origin.into();
        }
    }

    /// Update the laid-out size of a live element.
    pub fn set_size(&mut self, id: NodeId, size: impl Into<Size>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.element.size = size.into();
        }
    }

    /// Update the text content of a live element.
    pub fn set_text(&mut self, id: NodeId, text: Option<String>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.element.text = text;
        }
    }

    /// Returns true if the element and every ancestor are displayed.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        self.is_alive(id)
            && self
                .closest(id, |_, e| !e.flags.contains(NodeFlags::DISPLAYED))
                .is_none()
    }

    /// The element's box in viewport coordinates, if it is rendered.
    ///
    /// Elements that are not rendered have no box at all, which is how a
    /// caller learns that a size cannot be measured yet.
    pub fn rendered_rect(&self, id: NodeId) -> Option<Rect> {
        if !self.is_rendered(id) {
            return None;
        }
        let e = self.element(id)?;
        Some(Rect::from_origin_size(e.origin, e.size))
    }

    /// Whether keyboard traversal reaches this element without a tab-order hint.
    pub fn is_natively_focusable(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(Element::is_natively_focusable)
    }

    /// Whether [`Document::focus`] would accept this element.
    pub fn is_focusable(&self, id: NodeId) -> bool {
        self.is_rendered(id)
            && self
                .element(id)
                .is_some_and(|e| e.tab_index.is_some() || e.is_natively_focusable())
    }

    /// Move input focus to `id`.
    ///
    /// Returns `false` and leaves focus unchanged if `id` is stale, not
    /// rendered, or not focusable.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if !self.is_focusable(id) {
            return false;
        }
        self.focused = Some(id);
        true
    }

    /// Clear input focus.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// The current input-focus owner.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused.filter(|&f| self.is_alive(f))
    }

    /// Size of the visible viewport.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Update the size of the visible viewport.
    pub fn set_viewport(&mut self, viewport: impl Into<Size>) {
        self.viewport = viewport.into();
    }

    // --- internals ---

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()]
            .as_ref()
            .filter(|n| n.generation == id.1)
            .expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()]
            .as_mut()
            .filter(|n| n.generation == id.1)
            .expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}
