// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Work deferred until just before the next paint.
//!
//! A menu's box cannot be measured in the same turn that makes it visible,
//! so placement correction and initial focus are queued here and drained by
//! the host's "before next paint" hook. Tasks cannot be cancelled; each one
//! records the show [`Generation`] that queued it, and the consumer compares
//! it with the live generation to detect tasks that went stale.

use alloc::collections::VecDeque;

use ctxmenu_document::NodeId;
use kurbo::Point;

/// Monotonic counter bumped by every show and hide.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// The generation following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Placement and focus work for a freshly shown menu.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementTask {
    /// The menu that was shown.
    pub menu: NodeId,
    /// Anchor requested by the show.
    pub anchor: Point,
    /// Generation of the show that queued this task.
    pub generation: Generation,
}

/// FIFO of tasks waiting for the next frame.
#[derive(Clone, Debug, Default)]
pub struct FrameQueue {
    tasks: VecDeque<PlacementTask>,
}

impl FrameQueue {
    /// Queue a task for the next frame.
    pub fn schedule(&mut self, task: PlacementTask) {
        self.tasks.push_back(task);
    }

    /// Take every task queued so far.
    ///
    /// Tasks scheduled while the returned ones run belong to the frame after.
    pub fn take(&mut self) -> VecDeque<PlacementTask> {
        core::mem::take(&mut self.tasks)
    }

    /// Whether any task is waiting.
    pub fn is_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Number of waiting tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
