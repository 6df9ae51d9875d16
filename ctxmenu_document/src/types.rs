// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the document: node identifiers, flags, tags, and element data.

use alloc::collections::BTreeMap;
use alloc::string::String;

use kurbo::{Point, Size};
use smallvec::SmallVec;

/// Identifier for an element in the document (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags controlling rendering and interactivity.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Element takes part in rendering (the opposite of `display: none`).
        const DISPLAYED = 0b0000_0001;
        /// Element is disabled; native controls lose keyboard reachability.
        const DISABLED  = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::DISPLAYED
    }
}

/// Element kind.
///
/// Only the distinctions that matter for keyboard reachability and menu
/// structure are modeled; everything else is a [`Tag::Block`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Generic container.
    Block,
    /// Push button.
    Button,
    /// Hyperlink; navigable only when it carries an `href` attribute.
    Anchor,
    /// Text or other form input.
    Input,
    /// Drop-down select.
    Select,
    /// Multi-line text input.
    TextArea,
    /// List container.
    List,
    /// List item.
    ListItem,
    /// Table.
    Table,
    /// Table row.
    Row,
    /// Table cell.
    Cell,
    /// Inline text run.
    Text,
}

impl Tag {
    /// Whether elements of this kind are interactive controls that can be
    /// disabled.
    pub const fn is_form_control(self) -> bool {
        matches!(self, Self::Button | Self::Input | Self::Select | Self::TextArea)
    }
}

/// Per-element data owned by the document.
#[derive(Clone, Debug)]
pub struct Element {
    /// Element kind.
    pub tag: Tag,
    /// Optional document-unique identifier.
    pub id: Option<String>,
    /// Class list, in insertion order, without duplicates.
    pub classes: SmallVec<[String; 2]>,
    /// String attributes keyed by name.
    pub attributes: BTreeMap<String, String>,
    /// Explicit tab-order hint.
    ///
    /// `Some(_)` makes an element focusable even when it is not a native
    /// control.
    pub tab_index: Option<i32>,
    /// Rendering and interactivity flags.
    pub flags: NodeFlags,
    /// Top-left corner in viewport coordinates.
    pub origin: Point,
    /// Laid-out size. Only observable while the element is rendered.
    pub size: Size,
    /// Text content, if any.
    pub text: Option<String>,
}

impl Element {
    /// Create an element of the given kind with default data.
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            classes: SmallVec::new(),
            attributes: BTreeMap::new(),
            tab_index: None,
            flags: NodeFlags::default(),
            origin: Point::ORIGIN,
            size: Size::ZERO,
            text: None,
        }
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Set an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the tab-order hint.
    pub fn with_tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    /// Replace the flags.
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Start out hidden (`display: none`).
    pub fn hidden(mut self) -> Self {
        self.flags.remove(NodeFlags::DISPLAYED);
        self
    }

    /// Set the origin.
    pub fn with_origin(mut self, origin: impl Into<Point>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Set the laid-out size.
    pub fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = size.into();
        self
    }

    /// Set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Returns true if the element carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns the value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether keyboard traversal reaches this element without a tab-order hint.
    ///
    /// Form controls qualify unless disabled; anchors only with an `href`.
    pub fn is_natively_focusable(&self) -> bool {
        match self.tag {
            Tag::Anchor => self.attributes.contains_key("href"),
            tag if tag.is_form_control() => !self.flags.contains(NodeFlags::DISABLED),
            _ => false,
        }
    }
}
