// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing host input to the menu lifecycle.
//!
//! The host forwards each relevant input event to
//! [`ContextMenu::handle_event`] and honors the returned [`EventResponse`]:
//! when `default_prevented` is set it must skip its own handling (most
//! notably the native context menu), and a `default_action` asks it to
//! perform that action itself.

use alloc::string::String;

use ctxmenu_document::{Document, NodeId};
use ctxmenu_focus::Navigation;
use kurbo::{Point, Size};

use crate::context_menu::ContextMenu;
use crate::machine::Arbitration;
use crate::menu;

/// Keys the router reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow Down.
    ArrowDown,
    /// Arrow Up.
    ArrowUp,
    /// Tab; reversed with Shift.
    Tab,
    /// Home.
    Home,
    /// End.
    End,
    /// Escape.
    Escape,
    /// Enter.
    Enter,
    /// Space bar.
    Space,
    /// Anything else.
    Other,
}

/// Input events forwarded by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Secondary click (or the keyboard context-menu request) on `target`.
    ContextMenu {
        /// Innermost element under the pointer.
        target: NodeId,
        /// Pointer position in viewport coordinates.
        position: Point,
    },
    /// Primary click on `target`.
    Click {
        /// Innermost element under the pointer.
        target: NodeId,
    },
    /// A key press, delivered while any element holds focus.
    KeyDown {
        /// The key.
        key: Key,
        /// Whether Shift was held.
        shift: bool,
    },
    /// Anything in the document scrolled.
    Scroll,
    /// The window was resized.
    Resize {
        /// The new viewport size.
        viewport: Size,
    },
}

/// Something the host should do on the menu's behalf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DefaultAction {
    /// Follow a link from an activated item.
    Navigate(String),
}

/// What the host should do after routing an event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// Skip the host's own handling of the event.
    pub default_prevented: bool,
    /// Host-side action to perform, if any.
    pub default_action: Option<DefaultAction>,
}

impl EventResponse {
    /// Let the host handle the event as usual.
    pub fn pass() -> Self {
        Self::default()
    }

    /// Suppress the host's handling of the event.
    pub fn prevented() -> Self {
        Self {
            default_prevented: true,
            default_action: None,
        }
    }

    fn navigate(href: String) -> Self {
        Self {
            default_prevented: false,
            default_action: Some(DefaultAction::Navigate(href)),
        }
    }
}

impl ContextMenu {
    /// Route one input event.
    pub fn handle_event(&mut self, doc: &mut Document, event: &InputEvent) -> EventResponse {
        tracing::trace!(?event, "routing input");
        match *event {
            InputEvent::ContextMenu { target, position } => {
                self.secondary_click(doc, target, position)
            }
            InputEvent::Click { target } => self.click(doc, target),
            InputEvent::KeyDown { key, shift } => self.key_down(doc, key, shift),
            InputEvent::Scroll => {
                self.machine.hide(doc);
                EventResponse::pass()
            }
            InputEvent::Resize { viewport } => {
                doc.set_viewport(viewport);
                self.machine.hide(doc);
                EventResponse::pass()
            }
        }
    }

    fn secondary_click(
        &mut self,
        doc: &mut Document,
        target: NodeId,
        position: Point,
    ) -> EventResponse {
        let Some((trigger, menu_id)) = self.registry.closest_trigger(doc, target) else {
            self.machine.clear_toggle();
            return EventResponse::pass();
        };
        let menu_id = String::from(menu_id);
        match self.machine.arbitrate(doc, trigger, &menu_id, position) {
            Arbitration::Opened => EventResponse::prevented(),
            Arbitration::Deferred | Arbitration::Unresolved => EventResponse::pass(),
        }
    }

    fn click(&mut self, doc: &mut Document, target: NodeId) -> EventResponse {
        let Some(open) = self.machine.open() else {
            self.machine.clear_toggle();
            return EventResponse::pass();
        };
        if !doc.contains(open.menu, target) {
            self.machine.hide(doc);
            return EventResponse::pass();
        }
        let Some(item) = menu::item_at(doc, open.menu, target) else {
            return EventResponse::pass();
        };
        if menu::is_disabled(doc, item, &self.machine.config) {
            return EventResponse::prevented();
        }

        let action = self.machine.action_for(doc, item, target);
        let link = menu::link_of(doc, item, target);
        self.machine.hide(doc);
        match (action, link) {
            (Some(node), _) => {
                tracing::trace!(?item, ?node, "item activated");
                self.machine.run_action(doc, node);
                EventResponse::prevented()
            }
            (None, Some(href)) => EventResponse::navigate(href),
            (None, None) => EventResponse::pass(),
        }
    }

    fn key_down(&mut self, doc: &mut Document, key: Key, shift: bool) -> EventResponse {
        let Some(open) = self.machine.open() else {
            return EventResponse::pass();
        };
        let direction = match (key, shift) {
            (Key::ArrowDown, _) | (Key::Tab, false) => Navigation::Next,
            (Key::ArrowUp, _) | (Key::Tab, true) => Navigation::Prev,
            (Key::Home, _) => Navigation::First,
            (Key::End, _) => Navigation::Last,
            (Key::Escape, _) => {
                self.machine.hide(doc);
                return EventResponse::prevented();
            }
            (Key::Enter | Key::Space, _) => {
                let focused = doc
                    .focused()
                    .filter(|&f| menu::item_at(doc, open.menu, f).is_some());
                return match focused {
                    Some(item) => {
                        let mut response = self.click(doc, item);
                        response.default_prevented |= response.default_action.is_none();
                        response
                    }
                    None => EventResponse::pass(),
                };
            }
            (Key::Other, _) => return EventResponse::pass(),
        };
        self.machine.move_focus(doc, open.menu, direction);
        EventResponse::prevented()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;
    use ctxmenu_document::{Element, Tag};

    use crate::config::MenuConfig;

    struct Page {
        doc: Document,
        cell: NodeId,
        other: NodeId,
        menu: NodeId,
        copy: NodeId,
        disabled: NodeId,
        help: NodeId,
        help_text: NodeId,
        ctx: ContextMenu,
    }

    fn page() -> Page {
        let mut doc = Document::new((1000.0, 700.0));
        let body = doc.insert(None, Element::new(Tag::Block));
        let table = doc.insert(Some(body), Element::new(Tag::Table));
        let row = doc.insert(Some(table), Element::new(Tag::Row));
        let cell = doc.insert(
            Some(row),
            Element::new(Tag::Cell).with_attribute("data-contextmenu", "table-menu"),
        );
        let other = doc.insert(Some(body), Element::new(Tag::Text));
        let menu = doc.insert(
            Some(body),
            Element::new(Tag::List)
                .with_id("table-menu")
                .with_class("contextmenu")
                .with_size(Size::new(160.0, 90.0))
                .hidden(),
        );
        let copy = doc.insert(Some(menu), Element::new(Tag::ListItem).with_text("Copy"));
        let disabled = doc.insert(
            Some(menu),
            Element::new(Tag::ListItem)
                .with_attribute("aria-disabled", "true")
                .with_text("Paste"),
        );
        let help = doc.insert(Some(menu), Element::new(Tag::ListItem));
        let help_text = doc.insert(
            Some(help),
            Element::new(Tag::Anchor)
                .with_attribute("href", "/help")
                .with_text("Help"),
        );
        let mut ctx = ContextMenu::new(MenuConfig::default());
        ctx.init(&mut doc, body);
        Page {
            doc,
            cell,
            other,
            menu,
            copy,
            disabled,
            help,
            help_text,
            ctx,
        }
    }

    fn open(p: &mut Page) {
        let r = p.ctx.handle_event(
            &mut p.doc,
            &InputEvent::ContextMenu {
                target: p.cell,
                position: Point::new(40.0, 40.0),
            },
        );
        assert!(r.default_prevented);
        p.ctx.run_frame(&mut p.doc);
    }

    fn key(p: &mut Page, key: Key) -> EventResponse {
        p.ctx
            .handle_event(&mut p.doc, &InputEvent::KeyDown { key, shift: false })
    }

    #[test]
    fn unbound_secondary_click_passes_through() {
        let mut p = page();
        let r = p.ctx.handle_event(
            &mut p.doc,
            &InputEvent::ContextMenu {
                target: p.other,
                position: Point::ZERO,
            },
        );
        assert_eq!(r, EventResponse::pass());
        assert_eq!(p.ctx.active_menu(), None);
    }

    #[test]
    fn outside_click_hides_and_clears_toggle() {
        let mut p = page();
        open(&mut p);
        let r = p
            .ctx
            .handle_event(&mut p.doc, &InputEvent::Click { target: p.other });
        assert!(!r.default_prevented);
        assert_eq!(p.ctx.active_menu(), None);
        assert_eq!(p.ctx.toggle_memory(), None);
        // The next secondary click opens the custom menu again.
        open(&mut p);
        assert_eq!(p.ctx.active_menu(), Some(p.menu));
    }

    #[test]
    fn click_on_disabled_item_keeps_menu_open() {
        let mut p = page();
        open(&mut p);
        let r = p
            .ctx
            .handle_event(&mut p.doc, &InputEvent::Click { target: p.disabled });
        assert!(r.default_prevented);
        assert_eq!(p.ctx.active_menu(), Some(p.menu));
    }

    #[test]
    fn callback_item_runs_after_hide() {
        let mut p = page();
        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        let menu = p.menu;
        p.ctx.on_activate(p.copy, move |doc: &mut Document, _| {
            assert!(!doc.is_rendered(menu));
            seen.set(seen.get() + 1);
        });
        open(&mut p);
        let r = p
            .ctx
            .handle_event(&mut p.doc, &InputEvent::Click { target: p.copy });
        assert_eq!(hits.get(), 1);
        assert!(r.default_prevented);
        assert_eq!(p.ctx.active_menu(), None);
        assert_eq!(p.ctx.toggle_memory(), None);
    }

    #[test]
    fn link_item_navigates_without_preventing_default() {
        let mut p = page();
        open(&mut p);
        let r = p
            .ctx
            .handle_event(&mut p.doc, &InputEvent::Click { target: p.help_text });
        assert!(!r.default_prevented);
        assert_eq!(
            r.default_action,
            Some(DefaultAction::Navigate("/help".into()))
        );
        assert_eq!(p.ctx.active_menu(), None);
    }

    #[test]
    fn arrows_skip_disabled_items_and_wrap() {
        let mut p = page();
        open(&mut p);
        assert_eq!(p.doc.focused(), Some(p.copy));
        assert!(key(&mut p, Key::ArrowDown).default_prevented);
        assert_eq!(p.doc.focused(), Some(p.help));
        key(&mut p, Key::ArrowDown);
        assert_eq!(p.doc.focused(), Some(p.copy));
        key(&mut p, Key::ArrowUp);
        assert_eq!(p.doc.focused(), Some(p.help));
        let r = p.ctx.handle_event(
            &mut p.doc,
            &InputEvent::KeyDown {
                key: Key::Tab,
                shift: true,
            },
        );
        assert!(r.default_prevented);
        assert_eq!(p.doc.focused(), Some(p.copy));
        key(&mut p, Key::End);
        assert_eq!(p.doc.focused(), Some(p.help));
        key(&mut p, Key::Home);
        assert_eq!(p.doc.focused(), Some(p.copy));
    }

    #[test]
    fn enter_activates_the_focused_item() {
        let mut p = page();
        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        p.ctx.on_activate(p.copy, move |_, _| seen.set(seen.get() + 1));
        open(&mut p);
        let r = key(&mut p, Key::Enter);
        assert!(r.default_prevented);
        assert_eq!(hits.get(), 1);
        assert_eq!(p.ctx.active_menu(), None);
        assert_eq!(p.doc.focused(), Some(p.cell));
    }

    #[test]
    fn space_activates_the_focused_item() {
        let mut p = page();
        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        p.ctx.on_activate(p.copy, move |_, _| seen.set(seen.get() + 1));
        open(&mut p);
        assert_eq!(p.doc.focused(), Some(p.copy));
        let r = key(&mut p, Key::Space);
        assert!(r.default_prevented);
        assert_eq!(r.default_action, None);
        assert_eq!(hits.get(), 1);
        assert_eq!(p.ctx.active_menu(), None);
        assert_eq!(p.doc.focused(), Some(p.cell));
    }

    #[test]
    fn space_on_a_link_item_reports_navigation() {
        let mut p = page();
        open(&mut p);
        key(&mut p, Key::End);
        assert_eq!(p.doc.focused(), Some(p.help));
        let r = key(&mut p, Key::Space);
        assert!(!r.default_prevented);
        assert_eq!(
            r.default_action,
            Some(DefaultAction::Navigate("/help".into()))
        );
        assert_eq!(p.ctx.active_menu(), None);
    }

    #[test]
    fn escape_returns_focus_to_the_trigger() {
        let mut p = page();
        open(&mut p);
        assert!(key(&mut p, Key::Escape).default_prevented);
        assert_eq!(p.ctx.active_menu(), None);
        assert_eq!(p.doc.focused(), Some(p.cell));
        assert_eq!(p.doc.attribute(p.cell, "aria-expanded"), Some("false"));
    }

    #[test]
    fn keys_are_ignored_while_closed() {
        let mut p = page();
        assert_eq!(key(&mut p, Key::ArrowDown), EventResponse::pass());
        assert_eq!(key(&mut p, Key::Escape), EventResponse::pass());
        assert_eq!(p.doc.focused(), None);
    }

    #[test]
    fn scroll_hides() {
        let mut p = page();
        open(&mut p);
        p.ctx.handle_event(&mut p.doc, &InputEvent::Scroll);
        assert_eq!(p.ctx.active_menu(), None);
    }
}
