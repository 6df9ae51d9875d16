// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ctxmenu Focus: keyboard focus traversal over an ordered list of items.
//!
//! This crate models menu keyboard navigation as a combination of:
//! - **Navigation intents** ([`Navigation`]) such as [`Navigation::Next`] (Arrow Down, Tab),
//!   [`Navigation::Prev`] (Arrow Up, Shift+Tab), [`Navigation::First`] (Home) and
//!   [`Navigation::Last`] (End).
//! - A **read-only view of candidates** ([`FocusEntry`] / [`FocusSpace`]) listing the items in
//!   their presentation order together with whether each one is enabled.
//! - Pluggable **policies** ([`FocusPolicy`]) that select the next focused item given an
//!   optional origin, a direction, and the candidates.
//!
//! ## Minimal example
//!
//! Three menu items, the middle one disabled:
//!
//! ```rust
//! use ctxmenu_focus::{FocusEntry, FocusPolicy, FocusSpace, LinearPolicy, Navigation};
//!
//! let entries = [
//!     FocusEntry { id: 1_u32, enabled: true },
//!     FocusEntry { id: 2_u32, enabled: false },
//!     FocusEntry { id: 3_u32, enabled: true },
//! ];
//! let space = FocusSpace { nodes: &entries };
//! let policy = LinearPolicy::default();
//!
//! // Nothing focused yet: Arrow Down picks the first item, Arrow Up the last.
//! assert_eq!(policy.next(None, Navigation::Next, &space), Some(1));
//! assert_eq!(policy.next(None, Navigation::Prev, &space), Some(3));
//! // The disabled item is never a stop…
//! assert_eq!(policy.next(Some(1), Navigation::Next, &space), Some(3));
//! // …and traversal wraps around.
//! assert_eq!(policy.next(Some(3), Navigation::Next, &space), Some(1));
//! ```
//!
//! The core types are generic over the item identifier `K`, so callers can use any small,
//! copyable handle (for example `ctxmenu_document::NodeId`).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// Direction of focus navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Move to the next candidate (for example, Arrow Down or Tab).
    Next,
    /// Move to the previous candidate (for example, Arrow Up or Shift+Tab).
    Prev,
    /// Jump to the first candidate (for example, Home).
    First,
    /// Jump to the last candidate (for example, End).
    Last,
}

/// A single focusable candidate within a [`FocusSpace`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusEntry<K> {
    /// Identifier for this item.
    pub id: K,
    /// Whether this item is enabled for focus.
    ///
    /// Disabled items are excluded from traversal entirely: they are never
    /// returned and do not count towards wraparound.
    pub enabled: bool,
}

/// A read-only view of focusable candidates, in presentation order.
#[derive(Clone, Debug)]
pub struct FocusSpace<'a, K> {
    /// Candidates, including disabled ones.
    pub nodes: &'a [FocusEntry<K>],
}

impl<K: Copy> FocusSpace<'_, K> {
    /// Identifiers of the enabled candidates, in order.
    pub fn enabled(&self) -> Vec<K> {
        self.nodes
            .iter()
            .filter_map(|e| e.enabled.then_some(e.id))
            .collect()
    }
}

/// Wrap mode configuration for focus traversal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Do not wrap; reaching the end of the sequence yields no next candidate.
    Never,
    /// Wrap around within the list.
    Scope,
}

/// Trait for focus traversal policies.
///
/// A policy receives a navigation intent, the current origin (if focus is on
/// one of the candidates at all), and a read-only view of candidates, and
/// returns the item to focus next, if any.
pub trait FocusPolicy<K>
where
    K: Copy + Eq,
{
    /// Compute the next focus target.
    fn next(
        &self,
        origin: Option<K>,
        direction: Navigation,
        space: &FocusSpace<'_, K>,
    ) -> Option<K>;
}

/// Linear traversal in presentation order.
///
/// When the origin is not an enabled candidate, [`Navigation::Next`] selects the
/// first enabled candidate and [`Navigation::Prev`] the last one.
#[derive(Copy, Clone, Debug)]
pub struct LinearPolicy {
    /// Wrap behavior at either end of the list.
    pub wrap: WrapMode,
}

impl Default for LinearPolicy {
    fn default() -> Self {
        Self {
            wrap: WrapMode::Scope,
        }
    }
}

impl<K> FocusPolicy<K> for LinearPolicy
where
    K: Copy + Eq,
{
    fn next(
        &self,
        origin: Option<K>,
        direction: Navigation,
        space: &FocusSpace<'_, K>,
    ) -> Option<K> {
        let enabled = space.enabled();
        let (&first, &last) = (enabled.first()?, enabled.last()?);

        let origin_pos = origin.and_then(|o| enabled.iter().position(|&id| id == o));
        let wraps = matches!(self.wrap, WrapMode::Scope);

        match (direction, origin_pos) {
            (Navigation::First, _) | (Navigation::Next, None) => Some(first),
            (Navigation::Last, _) | (Navigation::Prev, None) => Some(last),
            (Navigation::Next, Some(pos)) => match enabled.get(pos + 1) {
                Some(&id) => Some(id),
                None => wraps.then_some(first),
            },
            (Navigation::Prev, Some(pos)) => match pos.checked_sub(1) {
                Some(prev) => Some(enabled[prev]),
                None => wraps.then_some(last),
            },
        }
    }
}
