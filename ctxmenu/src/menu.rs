// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu containers and their items, as read from the document.

use alloc::string::String;
use alloc::vec::Vec;

use ctxmenu_document::{Document, Element, NodeFlags, NodeId, Tag};
use ctxmenu_focus::FocusEntry;

use crate::config::MenuConfig;
use crate::error::ResolveError;

/// A menu named either by its element id or by its handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuRef<'a> {
    /// The `id` of the menu container.
    Id(&'a str),
    /// The menu container itself.
    Node(NodeId),
}

impl<'a> From<&'a str> for MenuRef<'a> {
    fn from(id: &'a str) -> Self {
        Self::Id(id)
    }
}

impl From<NodeId> for MenuRef<'_> {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

/// Resolve a reference to a live element carrying the menu marker class.
pub fn resolve(
    doc: &Document,
    menu: MenuRef<'_>,
    config: &MenuConfig,
) -> Result<NodeId, ResolveError> {
    let node = match menu {
        MenuRef::Id(id) => doc
            .get_element_by_id(id)
            .ok_or_else(|| ResolveError::UnknownId(String::from(id)))?,
        MenuRef::Node(node) if !doc.is_alive(node) => return Err(ResolveError::Stale(node)),
        MenuRef::Node(node) => node,
    };
    if !doc.has_class(node, &config.menu_class) {
        return Err(ResolveError::NotAMenu(node));
    }
    Ok(node)
}

/// Items of `menu` in document order: its list-item descendants.
pub fn items(doc: &Document, menu: NodeId) -> Vec<NodeId> {
    doc.descendants(menu)
        .into_iter()
        .filter(|&id| id != menu && doc.element(id).is_some_and(|e| e.tag == Tag::ListItem))
        .collect()
}

/// An item is disabled by the disabled class, `aria-disabled="true"`, or the
/// [`NodeFlags::DISABLED`] flag.
pub fn is_disabled(doc: &Document, item: NodeId, config: &MenuConfig) -> bool {
    doc.element(item).is_none_or(|e| {
        e.has_class(&config.disabled_class)
            || e.attribute("aria-disabled") == Some("true")
            || e.flags.contains(NodeFlags::DISABLED)
    })
}

/// Candidates for keyboard traversal of `menu`.
pub fn focus_entries(
    doc: &Document,
    menu: NodeId,
    config: &MenuConfig,
) -> Vec<FocusEntry<NodeId>> {
    items(doc, menu)
        .into_iter()
        .map(|id| FocusEntry {
            id,
            enabled: !is_disabled(doc, id, config),
        })
        .collect()
}

/// Give every item a tab index so it can hold input focus.
pub(crate) fn make_items_focusable(doc: &mut Document, menu: NodeId) {
    for item in items(doc, menu) {
        let needs_tab_index = doc
            .element(item)
            .is_some_and(|e| e.tab_index.is_none() && !e.is_natively_focusable());
        if needs_tab_index {
            doc.set_tab_index(item, Some(-1));
        }
    }
}

/// The item of `menu` enclosing `target`, if any.
pub fn item_at(doc: &Document, menu: NodeId, target: NodeId) -> Option<NodeId> {
    let item = doc.closest(target, |id, e| id == menu || e.tag == Tag::ListItem)?;
    (item != menu).then_some(item)
}

/// Link target of an activation landing on `target` inside `item`.
///
/// The nearest anchor between `target` and `item` wins; otherwise the first
/// anchor inside the item is used.
pub fn link_of(doc: &Document, item: NodeId, target: NodeId) -> Option<String> {
    let is_link = |e: &Element| e.tag == Tag::Anchor && e.attribute("href").is_some();
    let enclosing = doc
        .closest(target, |id, e| id == item || is_link(e))
        .filter(|&id| doc.element(id).is_some_and(is_link));
    let anchor = enclosing.or_else(|| {
        doc.descendants(item)
            .into_iter()
            .find(|&id| doc.element(id).is_some_and(is_link))
    })?;
    doc.attribute(anchor, "href").map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    struct Fixture {
        doc: Document,
        menu: NodeId,
        copy: NodeId,
        paste: NodeId,
        help: NodeId,
        help_link: NodeId,
    }

    fn fixture() -> Fixture {
        let mut doc = Document::new((800.0, 600.0));
        let body = doc.insert(None, Element::new(Tag::Block));
        let menu = doc.insert(
            Some(body),
            Element::new(Tag::List)
                .with_id("m1")
                .with_class("contextmenu")
                .hidden(),
        );
        let copy = doc.insert(Some(menu), Element::new(Tag::ListItem).with_text("Copy"));
        let paste = doc.insert(
            Some(menu),
            Element::new(Tag::ListItem)
                .with_class("disabled")
                .with_text("Paste"),
        );
        let help = doc.insert(Some(menu), Element::new(Tag::ListItem));
        let help_link = doc.insert(
            Some(help),
            Element::new(Tag::Anchor).with_attribute("href", "/help"),
        );
        Fixture {
            doc,
            menu,
            copy,
            paste,
            help,
            help_link,
        }
    }

    #[test]
    fn resolves_by_id_and_handle() {
        let f = fixture();
        let config = MenuConfig::default();
        assert_eq!(resolve(&f.doc, "m1".into(), &config), Ok(f.menu));
        assert_eq!(resolve(&f.doc, f.menu.into(), &config), Ok(f.menu));
    }

    #[test]
    fn resolution_failures() {
        let mut f = fixture();
        let config = MenuConfig::default();
        assert_eq!(
            resolve(&f.doc, "missing".into(), &config),
            Err(ResolveError::UnknownId("missing".into()))
        );
        assert_eq!(
            resolve(&f.doc, f.copy.into(), &config),
            Err(ResolveError::NotAMenu(f.copy))
        );
        f.doc.remove(f.menu);
        assert_eq!(
            resolve(&f.doc, f.menu.into(), &config),
            Err(ResolveError::Stale(f.menu))
        );
    }

    #[test]
    fn items_and_disabled_state() {
        let mut f = fixture();
        let config = MenuConfig::default();
        assert_eq!(items(&f.doc, f.menu), vec![f.copy, f.paste, f.help]);
        assert!(!is_disabled(&f.doc, f.copy, &config));
        assert!(is_disabled(&f.doc, f.paste, &config));

        f.doc.set_attribute(f.help, "aria-disabled", "true");
        let enabled: Vec<bool> = focus_entries(&f.doc, f.menu, &config)
            .iter()
            .map(|e| e.enabled)
            .collect();
        assert_eq!(enabled, vec![true, false, false]);
    }

    #[test]
    fn item_lookup_from_nested_target() {
        let f = fixture();
        assert_eq!(item_at(&f.doc, f.menu, f.help_link), Some(f.help));
        assert_eq!(item_at(&f.doc, f.menu, f.copy), Some(f.copy));
        assert_eq!(item_at(&f.doc, f.menu, f.menu), None);
    }

    #[test]
    fn links_are_found_around_the_target() {
        let f = fixture();
        assert_eq!(link_of(&f.doc, f.help, f.help), Some("/help".into()));
        assert_eq!(link_of(&f.doc, f.help, f.help_link), Some("/help".into()));
        assert_eq!(link_of(&f.doc, f.copy, f.copy), None);
    }

    #[test]
    fn items_become_focusable() {
        let mut f = fixture();
        make_items_focusable(&mut f.doc, f.menu);
        assert_eq!(f.doc.element(f.copy).unwrap().tab_index, Some(-1));
    }
}
