// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ctxmenu: in-page context menus opened by a secondary click.
//!
//! Elements opt in through a binding attribute naming a menu container; the
//! container is any element with the menu marker class and a matching `id`,
//! and its list items are the menu's entries. [`ContextMenu`] then:
//!
//! - binds triggers ([`ContextMenu::init`], [`ContextMenu::refresh`]),
//! - decides between the custom menu and the host's native one on repeated
//!   secondary clicks of the same trigger,
//! - keeps the open menu inside the viewport ([`geometry::fit_in_viewport`]),
//! - moves keyboard focus over enabled items, and
//! - announces [`MenuEvent::Shown`] and [`MenuEvent::Hidden`] to listeners on
//!   the menu container or any ancestor.
//!
//! ## Driving it
//!
//! The host owns a [`Document`](ctxmenu_document::Document). It forwards input
//! through [`ContextMenu::handle_event`], honors the returned
//! [`EventResponse`], and calls [`ContextMenu::run_frame`] once before each
//! paint so freshly opened menus can be measured and corrected.
//!
//! ```
//! use ctxmenu::{ContextMenu, InputEvent, MenuConfig};
//! use ctxmenu_document::{Document, Element, Tag};
//! use kurbo::{Point, Size};
//!
//! let mut doc = Document::new(Size::new(1000.0, 700.0));
//! let body = doc.insert(None, Element::new(Tag::Block));
//! let btn = doc.insert(
//!     Some(body),
//!     Element::new(Tag::Button).with_attribute("data-contextmenu", "m1"),
//! );
//! let menu = doc.insert(
//!     Some(body),
//!     Element::new(Tag::List)
//!         .with_id("m1")
//!         .with_class("contextmenu")
//!         .with_size(Size::new(150.0, 60.0))
//!         .hidden(),
//! );
//! let copy = doc.insert(Some(menu), Element::new(Tag::ListItem).with_text("Copy"));
//!
//! let mut menus = ContextMenu::new(MenuConfig::default());
//! menus.init(&mut doc, body);
//!
//! let open = InputEvent::ContextMenu { target: btn, position: Point::new(990.0, 50.0) };
//! assert!(menus.handle_event(&mut doc, &open).default_prevented);
//! menus.run_frame(&mut doc);
//!
//! assert_eq!(menus.active_menu(), Some(menu));
//! assert_eq!(doc.element(menu).unwrap().origin, Point::new(845.0, 50.0));
//! assert_eq!(doc.focused(), Some(copy));
//!
//! // The same trigger again: the custom menu steps aside for the native one.
//! assert!(!menus.handle_event(&mut doc, &open).default_prevented);
//! assert_eq!(menus.active_menu(), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod context_menu;
mod error;
mod frame;
pub mod geometry;
mod input;
mod machine;
mod menu;
mod notify;
mod registry;

pub use config::MenuConfig;
pub use context_menu::ContextMenu;
pub use error::{ConfigError, ResolveError};
pub use frame::{FrameQueue, Generation, PlacementTask};
pub use input::{DefaultAction, EventResponse, InputEvent, Key};
pub use machine::{ItemAction, MenuMachine, OpenMenu};
pub use menu::{MenuRef, focus_entries, is_disabled, item_at, items, link_of, resolve};
pub use notify::{ListenerId, Listeners, MenuEvent, MenuListener};
pub use registry::TriggerRegistry;
