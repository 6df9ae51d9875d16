// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The public entry point tying the registry and the lifecycle together.

use ctxmenu_document::{Document, NodeId};
use ctxmenu_responder::types::Outcome;
use kurbo::Point;

use crate::config::MenuConfig;
use crate::error::ResolveError;
use crate::machine::MenuMachine;
use crate::menu::MenuRef;
use crate::notify::{ListenerId, MenuEvent};
use crate::registry::TriggerRegistry;

/// Context menus for one document.
#[derive(Debug)]
pub struct ContextMenu {
    pub(crate) registry: TriggerRegistry,
    pub(crate) machine: MenuMachine,
}

impl Default for ContextMenu {
    fn default() -> Self {
        Self::new(MenuConfig::default())
    }
}

impl ContextMenu {
    /// Create a closed context menu controller.
    pub fn new(config: MenuConfig) -> Self {
        Self {
            registry: TriggerRegistry::new(),
            machine: MenuMachine::new(config),
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &MenuConfig {
        &self.machine.config
    }

    /// Bind every trigger under `root`. Returns the number of new triggers.
    pub fn init(&mut self, doc: &mut Document, root: NodeId) -> usize {
        let added = self.registry.register(doc, root, &self.machine.config);
        tracing::debug!(?root, added, "context menu triggers registered");
        added
    }

    /// Bind triggers added since [`ContextMenu::init`].
    ///
    /// Also unbinds elements that lost the binding attribute, and forgets
    /// callbacks and listeners attached to removed elements. Returns the
    /// number of new triggers.
    pub fn refresh(&mut self, doc: &mut Document) -> usize {
        self.machine.prune(doc);
        self.registry.refresh(doc, &self.machine.config)
    }

    /// The trigger registry.
    pub fn registry(&self) -> &TriggerRegistry {
        &self.registry
    }

    /// Open `menu` at `position`, hiding any open menu first.
    ///
    /// A reference that does not name a menu container is ignored.
    pub fn show<'a>(
        &mut self,
        doc: &mut Document,
        menu: impl Into<MenuRef<'a>>,
        position: impl Into<Point>,
        trigger: Option<NodeId>,
    ) {
        if let Err(err) = self.try_show(doc, menu, position, trigger) {
            tracing::debug!(%err, "show ignored");
        }
    }

    /// Like [`ContextMenu::show`], reporting why a reference did not resolve.
    pub fn try_show<'a>(
        &mut self,
        doc: &mut Document,
        menu: impl Into<MenuRef<'a>>,
        position: impl Into<Point>,
        trigger: Option<NodeId>,
    ) -> Result<NodeId, ResolveError> {
        self.machine
            .try_show(doc, menu.into(), position.into(), trigger)
    }

    /// Close the open menu, if any.
    pub fn hide(&mut self, doc: &mut Document) {
        self.machine.hide(doc);
    }

    /// The open menu container.
    pub fn active_menu(&self) -> Option<NodeId> {
        self.machine.open().map(|o| o.menu)
    }

    /// The trigger the open menu was opened for.
    pub fn active_trigger(&self) -> Option<NodeId> {
        self.machine.open().and_then(|o| o.trigger)
    }

    /// The trigger whose next secondary click will defer to the native menu.
    pub fn toggle_memory(&self) -> Option<NodeId> {
        self.machine.toggle_memory()
    }

    /// Run placement work deferred by a show. Call once before each paint.
    pub fn run_frame(&mut self, doc: &mut Document) {
        self.machine.run_frame(doc);
    }

    /// Whether [`ContextMenu::run_frame`] has work to do.
    pub fn has_pending_frame(&self) -> bool {
        self.machine.has_pending_frame()
    }

    /// Observe menu notifications reaching `node`.
    ///
    /// Notifications target the menu container and bubble to its ancestors;
    /// with `capture` the listener sees them on the way down instead.
    pub fn add_listener(
        &mut self,
        node: NodeId,
        capture: bool,
        listener: impl FnMut(&MenuEvent, NodeId) -> Outcome + 'static,
    ) -> ListenerId {
        self.machine.listeners.add(node, capture, listener)
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.machine.listeners.remove(id)
    }

    /// Run `action` when `item` (or anything inside it) is activated.
    ///
    /// The menu is already hidden when the action runs.
    pub fn on_activate(
        &mut self,
        item: NodeId,
        action: impl FnMut(&mut Document, NodeId) + 'static,
    ) {
        self.machine.on_activate(item, action);
    }
}
