// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The menu lifecycle: one open slot, one toggle slot.
//!
//! ## States
//!
//! The machine is either closed or holds exactly one [`OpenMenu`]. Showing a
//! menu while another is open hides the old one first, so observers always
//! see `Hidden` for the old menu before `Shown` for the new one.
//!
//! ## Deferred placement
//!
//! A show places the menu at the requested anchor right away and queues a
//! [`PlacementTask`]. When the host drains the queue before the next paint,
//! the menu has a measurable box: it is pulled back inside the viewport and
//! focus moves to its first enabled item. Every show and hide advances the
//! [`Generation`], and a task whose generation or menu no longer matches the
//! open slot does nothing.

use alloc::boxed::Box;

use ctxmenu_document::{Document, NodeId};
use ctxmenu_focus::{FocusPolicy, FocusSpace, LinearPolicy, Navigation};
use ctxmenu_responder::adapters::document::router;
use ctxmenu_responder::dispatcher;
use ctxmenu_responder::types::{Outcome, Phase};
use hashbrown::HashMap;
use kurbo::Point;

use crate::config::MenuConfig;
use crate::error::ResolveError;
use crate::frame::{FrameQueue, Generation, PlacementTask};
use crate::geometry::fit_in_viewport;
use crate::menu::{self, MenuRef};
use crate::notify::{Listeners, MenuEvent};

/// Callback run when a menu item is activated.
pub type ItemAction = Box<dyn FnMut(&mut Document, NodeId)>;

/// The currently open menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OpenMenu {
    /// The menu container.
    pub menu: NodeId,
    /// The element the menu was opened for; `None` for programmatic shows
    /// without one.
    pub trigger: Option<NodeId>,
}

/// Outcome of a secondary click on a bound trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Arbitration {
    /// The custom menu opened; native handling must be suppressed.
    Opened,
    /// The same trigger fired twice in a row; the custom menu closed and the
    /// native menu may appear.
    Deferred,
    /// The bound menu did not resolve; nothing changed.
    Unresolved,
}

/// Owner of the open-menu and toggle-memory slots.
pub struct MenuMachine {
    pub(crate) config: MenuConfig,
    open: Option<OpenMenu>,
    toggle: Option<NodeId>,
    generation: Generation,
    frames: FrameQueue,
    pub(crate) listeners: Listeners,
    actions: HashMap<NodeId, ItemAction>,
}

impl core::fmt::Debug for MenuMachine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MenuMachine")
            .field("open", &self.open)
            .field("toggle", &self.toggle)
            .field("generation", &self.generation)
            .field("pending_frames", &self.frames.len())
            .field("listeners", &self.listeners)
            .field("actions", &self.actions.len())
            .finish_non_exhaustive()
    }
}

impl MenuMachine {
    /// A closed machine using `config`.
    pub fn new(config: MenuConfig) -> Self {
        Self {
            config,
            open: None,
            toggle: None,
            generation: Generation::default(),
            frames: FrameQueue::default(),
            listeners: Listeners::default(),
            actions: HashMap::new(),
        }
    }

    /// The open menu, if any.
    pub fn open(&self) -> Option<OpenMenu> {
        self.open
    }

    /// The trigger whose secondary click last opened the custom menu.
    pub fn toggle_memory(&self) -> Option<NodeId> {
        self.toggle
    }

    pub(crate) fn clear_toggle(&mut self) {
        self.toggle = None;
    }

    /// Whether placement work is waiting for the next frame.
    pub fn has_pending_frame(&self) -> bool {
        self.frames.is_pending()
    }

    /// Open `menu` at `position`, hiding whatever was open before.
    ///
    /// Resolution happens first; if it fails, nothing changes.
    pub fn try_show(
        &mut self,
        doc: &mut Document,
        menu: MenuRef<'_>,
        position: Point,
        trigger: Option<NodeId>,
    ) -> Result<NodeId, ResolveError> {
        let menu = menu::resolve(doc, menu, &self.config)?;
        self.hide(doc);

        self.open = Some(OpenMenu { menu, trigger });
        self.generation = self.generation.next();
        menu::make_items_focusable(doc, menu);
        doc.set_origin(menu, position);
        doc.set_displayed(menu, true);
        if let Some(t) = trigger {
            doc.set_attribute(t, &self.config.expanded_attribute, "true");
        }
        tracing::trace!(?menu, ?trigger, x = position.x, y = position.y, "menu shown");
        self.listeners.deliver(
            doc,
            &MenuEvent::Shown {
                menu,
                trigger,
                position,
            },
        );
        self.frames.schedule(PlacementTask {
            menu,
            anchor: position,
            generation: self.generation,
        });
        Ok(menu)
    }

    /// Close the open menu. Does nothing when closed.
    pub fn hide(&mut self, doc: &mut Document) {
        let Some(OpenMenu { menu, trigger }) = self.open else {
            return;
        };
        self.generation = self.generation.next();
        self.toggle = None;
        doc.set_displayed(menu, false);
        if let Some(t) = trigger {
            doc.set_attribute(t, &self.config.expanded_attribute, "false");
            doc.focus(t);
        }
        tracing::trace!(?menu, ?trigger, "menu hidden");
        self.listeners
            .deliver(doc, &MenuEvent::Hidden { menu, trigger });
        self.open = None;
    }

    /// Apply the toggle rule to a secondary click on `trigger`, bound to `menu_id`.
    pub(crate) fn arbitrate(
        &mut self,
        doc: &mut Document,
        trigger: NodeId,
        menu_id: &str,
        position: Point,
    ) -> Arbitration {
        if self.toggle == Some(trigger) {
            self.toggle = None;
            self.hide(doc);
            return Arbitration::Deferred;
        }
        match self.try_show(doc, MenuRef::Id(menu_id), position, Some(trigger)) {
            Ok(_) => {
                self.toggle = Some(trigger);
                Arbitration::Opened
            }
            Err(err) => {
                tracing::debug!(?trigger, %err, "trigger names no usable menu");
                self.toggle = None;
                Arbitration::Unresolved
            }
        }
    }

    /// Run every placement task queued before this call.
    pub fn run_frame(&mut self, doc: &mut Document) {
        for task in self.frames.take() {
            let live = self
                .open
                .is_some_and(|o| o.menu == task.menu && self.generation == task.generation);
            if !live {
                tracing::debug!(menu = ?task.menu, "skipping stale placement");
                continue;
            }
            self.place(doc, task);
        }
    }

    fn place(&self, doc: &mut Document, task: PlacementTask) {
        if let Some(rect) = doc.rendered_rect(task.menu) {
            let corrected =
                fit_in_viewport(task.anchor, rect.size(), doc.viewport(), self.config.edge_inset);
            if corrected != task.anchor {
                tracing::trace!(
                    menu = ?task.menu,
                    x = corrected.x,
                    y = corrected.y,
                    "menu moved into view"
                );
            }
            doc.set_origin(task.menu, corrected);
        }
        self.move_focus(doc, task.menu, Navigation::First);
    }

    /// Move focus within `menu`. Returns whether focus moved to an item.
    pub(crate) fn move_focus(
        &self,
        doc: &mut Document,
        menu: NodeId,
        direction: Navigation,
    ) -> bool {
        let entries = menu::focus_entries(doc, menu, &self.config);
        let origin = doc
            .focused()
            .filter(|f| entries.iter().any(|e| e.id == *f));
        let space = FocusSpace { nodes: &entries };
        LinearPolicy::default()
            .next(origin, direction, &space)
            .is_some_and(|item| doc.focus(item))
    }

    /// Register the activation callback of `item`, replacing any previous one.
    pub fn on_activate(
        &mut self,
        item: NodeId,
        action: impl FnMut(&mut Document, NodeId) + 'static,
    ) {
        self.actions.insert(item, Box::new(action));
    }

    /// Nearest element between `target` and `item` (inclusive) with a callback.
    ///
    /// The activation bubbles from `target` along the responder path and is
    /// claimed by the first callback it meets; it never leaves the item.
    pub(crate) fn action_for(
        &self,
        doc: &Document,
        item: NodeId,
        target: NodeId,
    ) -> Option<NodeId> {
        let seq = router(doc).dispatch_for::<()>(target);
        let mut claimed = None;
        dispatcher::run(&seq, &mut claimed, |d, claimed| {
            if d.phase == Phase::Capture {
                return Outcome::Continue;
            }
            if !doc.contains(item, d.node) {
                return Outcome::Stop;
            }
            if self.actions.contains_key(&d.node) {
                *claimed = Some(d.node);
                return Outcome::Stop;
            }
            Outcome::Continue
        });
        claimed
    }

    /// Forget callbacks and listeners attached to elements that have left
    /// the document. Returns how many were dropped.
    pub fn prune(&mut self, doc: &Document) -> usize {
        let before = self.actions.len();
        self.actions.retain(|&id, _| doc.is_alive(id));
        let dropped = before - self.actions.len() + self.listeners.prune(doc);
        if dropped > 0 {
            tracing::debug!(dropped, "pruned handlers of removed elements");
        }
        dropped
    }

    pub(crate) fn run_action(&mut self, doc: &mut Document, node: NodeId) {
        if let Some(action) = self.actions.get_mut(&node) {
            action(doc, node);
        }
    }
}
