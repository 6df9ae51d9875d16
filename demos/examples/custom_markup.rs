// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup conventions loaded from JSON, plus a menu opened from code.
//!
//! Run:
//! - `cargo run -p ctxmenu_demos --example custom_markup`

use ctxmenu::{ContextMenu, InputEvent, Key, MenuConfig, MenuEvent};
use ctxmenu_document::{Document, Element, Tag};
use ctxmenu_responder::types::Outcome;
use kurbo::{Point, Size};
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"{
    "binding_attribute": "data-menu",
    "menu_class": "popup",
    "disabled_class": "is-off"
}"#;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ctxmenu=trace")),
        )
        .init();

    let config = match MenuConfig::from_json(CONFIG) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "bad menu configuration");
            return;
        }
    };

    let mut doc = Document::new(Size::new(400.0, 300.0));
    let body = doc.insert(None, Element::new(Tag::Block));
    let avatar = doc.insert(
        Some(body),
        Element::new(Tag::Block)
            .with_attribute("data-menu", "profile")
            .with_text("avatar"),
    );
    let menu = doc.insert(
        Some(body),
        Element::new(Tag::List)
            .with_id("profile")
            .with_class("popup")
            .with_size(Size::new(140.0, 90.0))
            .hidden(),
    );
    for (label, off) in [("View profile", false), ("Sign out", false), ("Admin", true)] {
        let mut e = Element::new(Tag::ListItem).with_text(label);
        if off {
            e = e.with_class("is-off");
        }
        doc.insert(Some(menu), e);
    }

    let mut menus = ContextMenu::new(config);
    let bound = menus.init(&mut doc, body);
    println!(
        "{bound} trigger(s); avatar tab index {:?}, aria-haspopup {:?}",
        doc.element(avatar).and_then(|e| e.tab_index),
        doc.attribute(avatar, "aria-haspopup"),
    );

    menus.add_listener(body, true, |event: &MenuEvent, _| {
        println!("notification: {event:?}");
        Outcome::Continue
    });

    // Opened from code near the bottom-right corner, with no trigger.
    menus.show(&mut doc, "profile", (380.0, 290.0), None);
    menus.run_frame(&mut doc);
    println!(
        "placed at {:?}",
        doc.element(menu).map(|e| e.origin).unwrap_or(Point::ZERO)
    );

    // End skips the disabled "Admin" entry.
    menus.handle_event(
        &mut doc,
        &InputEvent::KeyDown {
            key: Key::End,
            shift: false,
        },
    );
    println!("focused: {:?}", doc.focused().and_then(|f| doc.element(f)?.text.clone()));

    menus.handle_event(
        &mut doc,
        &InputEvent::KeyDown {
            key: Key::Escape,
            shift: false,
        },
    );
    println!("open menu after Escape: {:?}", menus.active_menu());
}
