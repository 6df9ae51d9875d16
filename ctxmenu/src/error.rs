// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! None of these escape [`ContextMenu::show`](crate::ContextMenu::show) or the input
//! router: an unresolvable menu simply leaves the state untouched. They are
//! surfaced by [`ContextMenu::try_show`](crate::ContextMenu::try_show) and by
//! configuration parsing.

use alloc::string::String;

use ctxmenu_document::NodeId;

/// Why a menu reference did not resolve to a menu container.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No live element carries this id.
    #[error("no element with id `{0}`")]
    UnknownId(String),
    /// The element exists but lacks the menu marker class.
    #[error("element {0:?} is not a menu container")]
    NotAMenu(NodeId),
    /// The handle refers to an element that has been removed.
    #[error("element {0:?} is no longer in the document")]
    Stale(NodeId),
}

/// Invalid [`MenuConfig`](crate::MenuConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON could not be parsed.
    #[error("malformed menu configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// A name field is blank.
    #[error("`{0}` must not be empty")]
    EmptyName(&'static str),
    /// The edge inset is negative or not finite.
    #[error("edge inset must be a finite, non-negative length, got {0}")]
    InvalidInset(f64),
}
