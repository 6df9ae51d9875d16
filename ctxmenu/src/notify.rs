// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle notifications and their listeners.
//!
//! Notifications target the menu container and travel the usual
//! capture → target → bubble path, so a listener on any ancestor (for
//! example the document root) observes every menu below it.

use alloc::boxed::Box;
use alloc::vec::Vec;

use ctxmenu_document::{Document, NodeId};
use ctxmenu_responder::adapters::document::router;
use ctxmenu_responder::dispatcher;
use ctxmenu_responder::types::{Outcome, Phase};
use kurbo::Point;

/// A menu lifecycle notification.
#[derive(Clone, Debug, PartialEq)]
pub enum MenuEvent {
    /// A menu was opened.
    Shown {
        /// The menu container.
        menu: NodeId,
        /// The element the menu was opened for, if any.
        trigger: Option<NodeId>,
        /// Requested anchor point, before viewport correction.
        position: Point,
    },
    /// A menu was closed.
    Hidden {
        /// The menu container.
        menu: NodeId,
        /// The element the menu had been opened for, if any.
        trigger: Option<NodeId>,
    },
}

impl MenuEvent {
    /// The menu container the notification is delivered to.
    pub fn menu(&self) -> NodeId {
        match self {
            Self::Shown { menu, .. } | Self::Hidden { menu, .. } => *menu,
        }
    }

    /// The trigger carried by the notification.
    pub fn trigger(&self) -> Option<NodeId> {
        match self {
            Self::Shown { trigger, .. } | Self::Hidden { trigger, .. } => *trigger,
        }
    }
}

/// Handler invoked with the notification and the element it is currently visiting.
pub type MenuListener = Box<dyn FnMut(&MenuEvent, NodeId) -> Outcome>;

/// Opaque handle returned by [`Listeners::add`], used to remove a listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Entry {
    id: ListenerId,
    node: NodeId,
    capture: bool,
    handler: MenuListener,
}

/// Listeners registered on elements.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<Entry>,
    next_id: u64,
}

impl core::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl Listeners {
    /// Listen on `node`. Capture listeners see the notification on its way
    /// down; others see it at the target and while it bubbles.
    pub fn add(
        &mut self,
        node: NodeId,
        capture: bool,
        handler: impl FnMut(&MenuEvent, NodeId) -> Outcome + 'static,
    ) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push(Entry {
            id,
            node,
            capture,
            handler: Box::new(handler),
        });
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Drop listeners whose element has left the document. Returns how many.
    pub fn prune(&mut self, doc: &Document) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| doc.is_alive(e.node));
        before - self.entries.len()
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deliver `event` to the listeners along the path of its menu container.
    ///
    /// Returns `true` if a listener stopped propagation.
    pub fn deliver(&mut self, doc: &Document, event: &MenuEvent) -> bool {
        let seq = router(doc).dispatch_for::<()>(event.menu());
        let stopped = dispatcher::run(&seq, &mut self.entries, |d, entries| {
            let mut outcome = Outcome::Continue;
            for entry in entries.iter_mut() {
                if entry.node != d.node {
                    continue;
                }
                let wants = match d.phase {
                    Phase::Capture => entry.capture,
                    Phase::Target => true,
                    Phase::Bubble => !entry.capture,
                };
                if wants && (entry.handler)(event, d.node) == Outcome::Stop {
                    outcome = Outcome::Stop;
                }
            }
            outcome
        });
        stopped.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;
    use ctxmenu_document::{Element, Tag};

    fn doc() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new((100.0, 100.0));
        let root = doc.insert(None, Element::new(Tag::Block));
        let section = doc.insert(Some(root), Element::new(Tag::Block));
        let menu = doc.insert(Some(section), Element::new(Tag::List));
        (doc, root, section, menu)
    }

    fn recorder(
        log: &Rc<RefCell<Vec<(&'static str, NodeId)>>>,
        name: &'static str,
        outcome: Outcome,
    ) -> impl FnMut(&MenuEvent, NodeId) -> Outcome + 'static {
        let log = Rc::clone(log);
        move |_, at| {
            log.borrow_mut().push((name, at));
            outcome
        }
    }

    #[test]
    fn bubbles_from_menu_to_root() {
        let (doc, root, section, menu) = doc();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();
        listeners.add(root, false, recorder(&log, "root", Outcome::Continue));
        listeners.add(menu, false, recorder(&log, "menu", Outcome::Continue));
        listeners.add(root, true, recorder(&log, "root-capture", Outcome::Continue));
        listeners.add(section, false, recorder(&log, "section", Outcome::Continue));

        let event = MenuEvent::Hidden {
            menu,
            trigger: None,
        };
        assert!(!listeners.deliver(&doc, &event));
        assert_eq!(
            *log.borrow(),
            vec![
                ("root-capture", root),
                ("menu", menu),
                ("section", section),
                ("root", root)
            ]
        );
    }

    #[test]
    fn stop_propagation_spares_ancestors() {
        let (doc, root, section, menu) = doc();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();
        listeners.add(section, false, recorder(&log, "section", Outcome::Stop));
        listeners.add(root, false, recorder(&log, "root", Outcome::Continue));

        let event = MenuEvent::Shown {
            menu,
            trigger: None,
            position: Point::ZERO,
        };
        assert!(listeners.deliver(&doc, &event));
        assert_eq!(*log.borrow(), vec![("section", section)]);
    }

    #[test]
    fn removed_listeners_stay_silent() {
        let (doc, root, _, menu) = doc();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();
        let id = listeners.add(root, false, recorder(&log, "root", Outcome::Continue));
        assert!(listeners.remove(id));
        assert!(!listeners.remove(id));
        listeners.deliver(
            &doc,
            &MenuEvent::Hidden {
                menu,
                trigger: None,
            },
        );
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn prune_drops_listeners_on_removed_elements() {
        let (mut doc, root, section, _) = doc();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();
        listeners.add(root, false, recorder(&log, "root", Outcome::Continue));
        listeners.add(section, true, recorder(&log, "section", Outcome::Continue));

        assert_eq!(listeners.prune(&doc), 0);
        doc.remove(section);
        assert_eq!(listeners.prune(&doc), 1);
        assert_eq!(listeners.len(), 1);
    }
}
