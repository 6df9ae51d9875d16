// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A table whose cells share one context menu for row/column editing and copying.
//!
//! The host loop here is scripted: each step forwards an input event, prints
//! what the host would do with the response, and runs the pre-paint frame.
//!
//! Run:
//! - `RUST_LOG=ctxmenu=trace cargo run -p ctxmenu_demos --example table_editing`

use std::cell::RefCell;
use std::rc::Rc;

use ctxmenu::{ContextMenu, EventResponse, InputEvent, Key, MenuConfig, MenuEvent};
use ctxmenu_document::{Document, Element, NodeId, Tag};
use ctxmenu_responder::types::Outcome;
use kurbo::{Point, Size};
use tracing_subscriber::EnvFilter;

const CELL: Size = Size::new(120.0, 24.0);

fn cell(text: &str) -> Element {
    Element::new(Tag::Cell)
        .with_attribute("data-contextmenu", "table-menu")
        .with_size(CELL)
        .with_text(text)
}

fn item(label: &str) -> Element {
    Element::new(Tag::ListItem).with_text(label)
}

/// Index of `child` among its parent's children.
fn position_in_parent(doc: &Document, child: NodeId) -> Option<usize> {
    let parent = doc.parent_of(child)?;
    doc.children_of(parent).iter().position(|&c| c == child)
}

fn add_row(doc: &mut Document, table: NodeId) {
    let columns = doc
        .children_of(table)
        .first()
        .map_or(1, |&row| doc.children_of(row).len());
    let row = doc.insert(Some(table), Element::new(Tag::Row));
    for _ in 0..columns {
        doc.insert(Some(row), cell(""));
    }
}

fn add_column(doc: &mut Document, table: NodeId) {
    for row in doc.children_of(table).to_vec() {
        doc.insert(Some(row), cell(""));
    }
}

fn delete_row(doc: &mut Document, target: NodeId) {
    if let Some(row) = doc.parent_of(target) {
        doc.remove(row);
    }
}

fn delete_column(doc: &mut Document, table: NodeId, target: NodeId) {
    let Some(index) = position_in_parent(doc, target) else {
        return;
    };
    for row in doc.children_of(table).to_vec() {
        if let Some(&c) = doc.children_of(row).get(index) {
            doc.remove(c);
        }
    }
}

fn print_table(doc: &Document, table: NodeId) {
    for &row in doc.children_of(table) {
        let cells: Vec<&str> = doc
            .children_of(row)
            .iter()
            .map(|&c| {
                doc.element(c)
                    .and_then(|e| e.text.as_deref())
                    .filter(|t| !t.is_empty())
                    .unwrap_or("·")
            })
            .collect();
        println!("  | {} |", cells.join(" | "));
    }
}

fn report(step: &str, response: &EventResponse) {
    let native = if response.default_prevented {
        "suppressed"
    } else {
        "allowed"
    };
    match &response.default_action {
        Some(action) => println!("{step}: native handling {native}, host should {action:?}"),
        None => println!("{step}: native handling {native}"),
    }
}

/// One turn of the host loop: route the event, then run the pre-paint frame.
fn step(menus: &mut ContextMenu, doc: &mut Document, name: &str, event: InputEvent) {
    let response = menus.handle_event(doc, &event);
    report(name, &response);
    menus.run_frame(doc);
    // Cells created by an action become triggers too.
    menus.refresh(doc);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ctxmenu=debug")),
        )
        .init();

    let mut doc = Document::new(Size::new(800.0, 600.0));
    let body = doc.insert(None, Element::new(Tag::Block));
    let table = doc.insert(Some(body), Element::new(Tag::Table));
    for (r, texts) in [["Name", "Qty"], ["Apples", "3"]].iter().enumerate() {
        let row = doc.insert(Some(table), Element::new(Tag::Row));
        for (c, text) in texts.iter().enumerate() {
            let origin = Point::new(c as f64 * CELL.width, r as f64 * CELL.height);
            doc.insert(Some(row), cell(text).with_origin(origin));
        }
    }

    let menu = doc.insert(
        Some(body),
        Element::new(Tag::List)
            .with_id("table-menu")
            .with_class("contextmenu")
            .with_size(Size::new(180.0, 170.0))
            .hidden(),
    );
    let add_row_item = doc.insert(Some(menu), item("Add row"));
    let add_col_item = doc.insert(Some(menu), item("Add column"));
    let del_row_item = doc.insert(Some(menu), item("Delete row"));
    let del_col_item = doc.insert(Some(menu), item("Delete column"));
    let copy_item = doc.insert(Some(menu), item("Copy text"));
    doc.insert(Some(menu), item("Paste").with_class("disabled"));
    let help_item = doc.insert(Some(menu), Element::new(Tag::ListItem));
    doc.insert(
        Some(help_item),
        Element::new(Tag::Anchor)
            .with_attribute("href", "https://example.com/tables")
            .with_text("Help"),
    );

    let mut menus = ContextMenu::new(MenuConfig::default());
    menus.init(&mut doc, body);

    // The cell a menu was opened for, remembered from the "shown" notification.
    let target: Rc<RefCell<Option<NodeId>>> = Rc::default();
    let clipboard: Rc<RefCell<String>> = Rc::default();
    {
        let target = Rc::clone(&target);
        menus.add_listener(body, false, move |event: &MenuEvent, _| {
            if let MenuEvent::Shown { trigger, .. } = event {
                *target.borrow_mut() = *trigger;
            }
            Outcome::Continue
        });
    }
    menus.on_activate(add_row_item, move |doc: &mut Document, _| add_row(doc, table));
    menus.on_activate(add_col_item, move |doc: &mut Document, _| {
        add_column(doc, table);
    });
    {
        let target = Rc::clone(&target);
        menus.on_activate(del_row_item, move |doc: &mut Document, _| {
            if let Some(t) = *target.borrow() {
                delete_row(doc, t);
            }
        });
    }
    {
        let target = Rc::clone(&target);
        menus.on_activate(del_col_item, move |doc: &mut Document, _| {
            if let Some(t) = *target.borrow() {
                delete_column(doc, table, t);
            }
        });
    }
    {
        let target = Rc::clone(&target);
        let clipboard = Rc::clone(&clipboard);
        menus.on_activate(copy_item, move |doc: &mut Document, _| {
            let current = *target.borrow();
            let text = current
                .and_then(|t| doc.element(t))
                .and_then(|e| e.text.clone())
                .unwrap_or_default();
            *clipboard.borrow_mut() = text;
        });
    }

    println!("initial table:");
    print_table(&doc, table);

    let apples = doc.children_of(doc.children_of(table)[1])[0];
    let open = InputEvent::ContextMenu {
        target: apples,
        position: Point::new(760.0, 40.0),
    };
    step(&mut menus, &mut doc, "right-click Apples", open.clone());
    if let Some(origin) = doc.element(menu).map(|e| e.origin) {
        println!("menu placed at {origin:?}, focus on {:?}", doc.focused());
    }
    step(&mut menus, &mut doc, "right-click Apples again", open.clone());

    step(&mut menus, &mut doc, "right-click Apples", open.clone());
    for _ in 0..4 {
        step(
            &mut menus,
            &mut doc,
            "arrow down",
            InputEvent::KeyDown {
                key: Key::ArrowDown,
                shift: false,
            },
        );
    }
    step(
        &mut menus,
        &mut doc,
        "enter",
        InputEvent::KeyDown {
            key: Key::Enter,
            shift: false,
        },
    );
    println!("clipboard: {:?}", clipboard.borrow());

    step(&mut menus, &mut doc, "right-click Apples", open.clone());
    step(
        &mut menus,
        &mut doc,
        "click Add column",
        InputEvent::Click {
            target: add_col_item,
        },
    );
    step(&mut menus, &mut doc, "right-click Apples", open.clone());
    step(
        &mut menus,
        &mut doc,
        "click Add row",
        InputEvent::Click {
            target: add_row_item,
        },
    );
    println!("after adding a row and a column:");
    print_table(&doc, table);

    step(&mut menus, &mut doc, "right-click Apples", open);
    step(
        &mut menus,
        &mut doc,
        "click Help",
        InputEvent::Click { target: help_item },
    );
    step(
        &mut menus,
        &mut doc,
        "resize",
        InputEvent::Resize {
            viewport: Size::new(640.0, 480.0),
        },
    );
}
