// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger discovery: which elements open which menu.

use alloc::string::String;
use alloc::vec::Vec;

use ctxmenu_document::{Document, NodeId};
use hashbrown::HashMap;

use crate::config::MenuConfig;

/// Mapping from trigger elements to the menu id named by their binding attribute.
///
/// Built by [`TriggerRegistry::register`] and extended by
/// [`TriggerRegistry::refresh`]. Menu ids are stored as written; whether they
/// name a real menu container is only checked when a menu is shown.
#[derive(Clone, Debug, Default)]
pub struct TriggerRegistry {
    bindings: HashMap<NodeId, String>,
    roots: Vec<NodeId>,
}

impl TriggerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan the subtree under `root` for elements carrying the binding attribute.
    ///
    /// Each trigger that keyboard traversal cannot already reach gets a tab
    /// index of `0`. Triggers also get the popup attributes
    /// ([`MenuConfig::haspopup_attribute`], and a collapsed
    /// [`MenuConfig::expanded_attribute`] unless one is present). Returns the
    /// number of triggers newly bound by this scan.
    pub fn register(&mut self, doc: &mut Document, root: NodeId, config: &MenuConfig) -> usize {
        if !self.roots.contains(&root) {
            self.roots.push(root);
        }
        let mut added = 0;
        for id in doc.descendants(root) {
            let Some(menu_id) = doc.attribute(id, &config.binding_attribute) else {
                continue;
            };
            let menu_id = String::from(menu_id);
            prepare_trigger(doc, id, config);
            if self.bindings.insert(id, menu_id).is_none() {
                added += 1;
                tracing::trace!(trigger = ?id, "bound context menu trigger");
            }
        }
        added
    }

    /// Re-run every previous scan to pick up triggers added since.
    ///
    /// Elements that were removed from the document, or that no longer carry
    /// the binding attribute, stop being triggers; a changed attribute value
    /// rebinds the trigger. Re-scanning an element that is already bound
    /// changes nothing observable. Returns the number of newly bound triggers.
    pub fn refresh(&mut self, doc: &mut Document, config: &MenuConfig) -> usize {
        self.bindings
            .retain(|&id, _| doc.attribute(id, &config.binding_attribute).is_some());
        self.roots.retain(|&root| doc.is_alive(root));
        let roots = self.roots.clone();
        roots
            .into_iter()
            .map(|root| self.register(doc, root, config))
            .sum()
    }

    /// Menu id bound to `trigger`, if it is a registered trigger.
    pub fn menu_for(&self, trigger: NodeId) -> Option<&str> {
        self.bindings.get(&trigger).map(String::as_str)
    }

    /// Nearest registered trigger enclosing `target` (inclusive).
    ///
    /// When triggers nest, the innermost one wins.
    pub fn closest_trigger(&self, doc: &Document, target: NodeId) -> Option<(NodeId, &str)> {
        let trigger = doc.closest(target, |id, _| self.bindings.contains_key(&id))?;
        Some((trigger, self.menu_for(trigger)?))
    }

    /// Whether `id` is a registered trigger.
    pub fn is_trigger(&self, id: NodeId) -> bool {
        self.bindings.contains_key(&id)
    }

    /// Number of registered triggers.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no trigger is registered.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

fn prepare_trigger(doc: &mut Document, id: NodeId, config: &MenuConfig) {
    let needs_tab_index = doc
        .element(id)
        .is_some_and(|e| e.tab_index.is_none() && !e.is_natively_focusable());
    if needs_tab_index {
        doc.set_tab_index(id, Some(0));
    }
    doc.set_attribute(id, &config.haspopup_attribute, "menu");
    if doc.attribute(id, &config.expanded_attribute).is_none() {
        doc.set_attribute(id, &config.expanded_attribute, "false");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctxmenu_document::{Element, Tag};

    fn doc_with_triggers() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new((800.0, 600.0));
        let body = doc.insert(None, Element::new(Tag::Block));
        let cell = doc.insert(
            Some(body),
            Element::new(Tag::Cell).with_attribute("data-contextmenu", "table-menu"),
        );
        let button = doc.insert(
            Some(body),
            Element::new(Tag::Button).with_attribute("data-contextmenu", "button-menu"),
        );
        (doc, body, cell, button)
    }

    #[test]
    fn registers_bound_elements() {
        let (mut doc, body, cell, button) = doc_with_triggers();
        let mut registry = TriggerRegistry::new();
        assert_eq!(registry.register(&mut doc, body, &MenuConfig::default()), 2);
        assert_eq!(registry.menu_for(cell), Some("table-menu"));
        assert_eq!(registry.menu_for(button), Some("button-menu"));
        assert_eq!(registry.menu_for(body), None);
    }

    #[test]
    fn only_unreachable_triggers_get_a_tab_index() {
        let (mut doc, body, cell, button) = doc_with_triggers();
        let preset = doc.insert(
            Some(body),
            Element::new(Tag::Block)
                .with_attribute("data-contextmenu", "m")
                .with_tab_index(-1),
        );
        TriggerRegistry::new().register(&mut doc, body, &MenuConfig::default());

        assert_eq!(doc.element(cell).unwrap().tab_index, Some(0));
        assert_eq!(doc.element(button).unwrap().tab_index, None);
        assert_eq!(doc.element(preset).unwrap().tab_index, Some(-1));
    }

    #[test]
    fn sets_popup_attributes() {
        let (mut doc, body, cell, _) = doc_with_triggers();
        TriggerRegistry::new().register(&mut doc, body, &MenuConfig::default());
        assert_eq!(doc.attribute(cell, "aria-haspopup"), Some("menu"));
        assert_eq!(doc.attribute(cell, "aria-expanded"), Some("false"));
    }

    #[test]
    fn refresh_is_idempotent_and_picks_up_new_triggers() {
        let (mut doc, body, _, _) = doc_with_triggers();
        let config = MenuConfig::default();
        let mut registry = TriggerRegistry::new();
        registry.register(&mut doc, body, &config);

        assert_eq!(registry.refresh(&mut doc, &config), 0);
        assert_eq!(registry.len(), 2);

        let late = doc.insert(
            Some(body),
            Element::new(Tag::Row).with_attribute("data-contextmenu", "table-menu"),
        );
        assert_eq!(registry.refresh(&mut doc, &config), 1);
        assert_eq!(registry.menu_for(late), Some("table-menu"));
        assert_eq!(doc.element(late).unwrap().tab_index, Some(0));
    }

    #[test]
    fn refresh_drops_removed_triggers() {
        let (mut doc, body, cell, _) = doc_with_triggers();
        let config = MenuConfig::default();
        let mut registry = TriggerRegistry::new();
        registry.register(&mut doc, body, &config);
        doc.remove(cell);
        registry.refresh(&mut doc, &config);
        assert!(!registry.is_trigger(cell));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn refresh_unbinds_elements_that_lost_the_attribute() {
        let (mut doc, body, cell, button) = doc_with_triggers();
        let config = MenuConfig::default();
        let mut registry = TriggerRegistry::new();
        registry.register(&mut doc, body, &config);

        doc.remove_attribute(button, "data-contextmenu");
        doc.set_attribute(cell, "data-contextmenu", "other-menu");
        assert_eq!(registry.refresh(&mut doc, &config), 0);

        assert!(!registry.is_trigger(button));
        assert_eq!(registry.closest_trigger(&doc, button), None);
        assert_eq!(registry.menu_for(cell), Some("other-menu"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn nearest_enclosing_trigger_wins() {
        let mut doc = Document::new((800.0, 600.0));
        let outer = doc.insert(
            None,
            Element::new(Tag::Table).with_attribute("data-contextmenu", "outer"),
        );
        let inner = doc.insert(
            Some(outer),
            Element::new(Tag::Cell).with_attribute("data-contextmenu", "inner"),
        );
        let text = doc.insert(Some(inner), Element::new(Tag::Text));
        let plain = doc.insert(Some(outer), Element::new(Tag::Cell));
        let mut registry = TriggerRegistry::new();
        registry.register(&mut doc, outer, &MenuConfig::default());

        assert_eq!(registry.closest_trigger(&doc, text), Some((inner, "inner")));
        assert_eq!(registry.closest_trigger(&doc, plain), Some((outer, "outer")));
    }

    #[test]
    fn unresolvable_menu_ids_are_still_recorded() {
        let mut doc = Document::new((800.0, 600.0));
        let t = doc.insert(
            None,
            Element::new(Tag::Block).with_attribute("data-contextmenu", "nope"),
        );
        let mut registry = TriggerRegistry::new();
        assert_eq!(registry.register(&mut doc, t, &MenuConfig::default()), 1);
        assert_eq!(registry.menu_for(t), Some("nope"));
    }
}
