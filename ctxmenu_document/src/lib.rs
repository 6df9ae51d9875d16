// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ctxmenu Document: the host document a context menu lives in.
//!
//! This crate is a small stand-in for a browser DOM, holding exactly the state a
//! popup menu reads and writes:
//!
//! - A hierarchy of [`Element`]s addressed by generational [`NodeId`]s.
//! - Per-element identity (`id`), class list, string attributes, and an optional
//!   tab-order hint.
//! - Display state ([`NodeFlags::DISPLAYED`]) plus a host-assigned origin and size.
//! - The document-wide input-focus owner and the viewport size.
//!
//! ## Not a layout engine
//!
//! The document does not measure or arrange anything. Hosts write origins and sizes
//! directly; the document only answers whether a box is observable right now
//! ([`Document::rendered_rect`]), which is `None` for any element inside a hidden
//! subtree.
//!
//! ## API overview
//!
//! - [`Document::insert`] / [`Document::remove`] build and prune the tree.
//! - [`Document::closest`], [`Document::contains`], [`Document::descendants`] and
//!   [`Document::get_element_by_id`] query it.
//! - [`Document::set_attribute`], [`Document::add_class`], [`Document::set_tab_index`],
//!   [`Document::set_displayed`], [`Document::set_origin`] and [`Document::set_size`]
//!   mutate element data.
//! - [`Document::focus`], [`Document::blur`] and [`Document::focused`] manage input focus.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod types;

pub use document::Document;
pub use types::{Element, NodeFlags, NodeId, Tag};
