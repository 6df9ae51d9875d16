// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared types for routing: phases, outcomes, dispatch entries, and parent lookup.

/// Propagation phase of a dispatch entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Root towards the target, excluding the target.
    Capture,
    /// The target itself.
    Target,
    /// Target's parent back towards the root.
    Bubble,
}

/// Result of a handler invocation, controlling propagation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Keep propagating.
    Continue,
    /// Stop propagation immediately.
    Stop,
}

/// One step of a responder sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatch<K, M = ()> {
    /// Phase of this step.
    pub phase: Phase,
    /// Node visited by this step.
    pub node: K,
    /// Optional payload shared by every step of a sequence.
    pub meta: Option<M>,
}

impl<K, M> Dispatch<K, M> {
    /// A capture step for `node`.
    pub fn capture(node: K) -> Self {
        Self {
            phase: Phase::Capture,
            node,
            meta: None,
        }
    }

    /// A target step for `node`.
    pub fn target(node: K) -> Self {
        Self {
            phase: Phase::Target,
            node,
            meta: None,
        }
    }

    /// A bubble step for `node`.
    pub fn bubble(node: K) -> Self {
        Self {
            phase: Phase::Bubble,
            node,
            meta: None,
        }
    }

    /// Attach a payload.
    pub fn with_meta(mut self, meta: M) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// Source of parent links used to reconstruct a root→target path.
pub trait ParentLookup<K> {
    /// Parent of `node`, or `None` at a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// Parent lookup for flat hierarchies; every node is its own root.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}
