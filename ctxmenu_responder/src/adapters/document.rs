// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for Ctxmenu Document.
//!
//! ## Feature
//!
//! Enable with `document_adapter`.

use ctxmenu_document::{Document, NodeId};

use crate::router::Router;
use crate::types::ParentLookup;

impl ParentLookup<NodeId> for &Document {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        Document::parent_of(self, *node)
    }
}

/// Build a router that walks the element hierarchy of `doc`.
pub fn router(doc: &Document) -> Router<NodeId, &Document> {
    Router::with_parent(doc)
}
