// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Reconstructs the root→target path of a node and emits dispatch steps.
//! Produces a capture → target → bubble sequence for that target.
//!
//! Pointer input in a document already knows its target element, so there is
//! no hit ranking here: every sequence starts from a known target.

use alloc::vec::Vec;

use crate::types::{Dispatch, NoParent, ParentLookup, Phase};

/// Deterministic responder chain router.
///
/// ## Usage
///
/// - Construct with [`Router::with_parent`] and a [`ParentLookup`] over your
///   hierarchy (for example `&ctxmenu_document::Document` with the
///   `document_adapter` feature).
/// - Call [`Router::dispatch_for`] (or [`Router::dispatch_for_with`] to attach a
///   payload) to produce the sequence, then execute it with
///   [`dispatcher::run`](crate::dispatcher::run).
pub struct Router<K, P: ParentLookup<K> = NoParent> {
    pub(crate) parent: P,
    pub(crate) _phantom: core::marker::PhantomData<fn() -> K>,
}

impl<K, P: ParentLookup<K>> core::fmt::Debug for Router<K, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K> + Default> Router<K, P> {
    /// Create a router with a default parent lookup.
    pub fn new() -> Self {
        Self::with_parent(P::default())
    }
}

impl<K: Copy + Eq, P: ParentLookup<K> + Default> Default for Router<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K>> Router<K, P> {
    /// Create a router with an explicit parent lookup provider.
    pub fn with_parent(parent: P) -> Self {
        Self {
            parent,
            _phantom: core::marker::PhantomData,
        }
    }

    /// Emit a dispatch sequence for `target` by reconstructing its path.
    pub fn dispatch_for<M>(&self, target: K) -> Vec<Dispatch<K, M>>
    where
        M: Clone,
    {
        self.dispatch_for_with(target, None)
    }

    /// Emit a dispatch sequence for `target`, attaching `meta` to every step.
    pub fn dispatch_for_with<M>(&self, target: K, meta: Option<M>) -> Vec<Dispatch<K, M>>
    where
        M: Clone,
    {
        let path = self.path_to(target);
        Self::emit_path(&path, meta)
    }

    /// Root→target path of `target` (inclusive).
    pub fn path_to(&self, target: K) -> Vec<K> {
        let mut out = Vec::new();
        let mut cur = target;
        // Collect to root; caller ensures acyclic ancestry.
        loop {
            out.push(cur);
            match self.parent.parent_of(&cur) {
                Some(p) => cur = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    fn emit_path<M: Clone>(path: &[K], meta: Option<M>) -> Vec<Dispatch<K, M>> {
        let mut out = Vec::with_capacity(path.len() * 2);
        // Split into ancestors and target. If path is empty, nothing to emit.
        let Some((&target, ancestors)) = path.split_last() else {
            return out;
        };

        let step = |phase, node| Dispatch {
            phase,
            node,
            meta: meta.clone(),
        };

        // Capture: root→(excluding target)
        for &n in ancestors {
            out.push(step(Phase::Capture, n));
        }

        // Target: only the target element
        out.push(step(Phase::Target, target));

        // Bubble: parent→root (excluding target)
        for &n in ancestors.iter().rev() {
            out.push(step(Phase::Bubble, n));
        }
        out
    }
}
