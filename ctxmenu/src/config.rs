// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup conventions and placement constants.

use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Names and constants shared between the markup and the menu machinery.
///
/// Every field has a default, so a partial JSON object is enough:
///
/// ```
/// use ctxmenu::MenuConfig;
///
/// let config = MenuConfig::from_json(r#"{ "binding_attribute": "data-menu" }"#).unwrap();
/// assert_eq!(config.binding_attribute, "data-menu");
/// assert_eq!(config.menu_class, "contextmenu");
/// assert_eq!(config.edge_inset, 5.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuConfig {
    /// Attribute whose value names the menu a trigger opens.
    pub binding_attribute: String,
    /// Class marking an element as a menu container.
    pub menu_class: String,
    /// Class marking a menu item as disabled.
    pub disabled_class: String,
    /// Attribute mirroring the trigger's open/closed state.
    pub expanded_attribute: String,
    /// Attribute announcing that a trigger owns a popup.
    pub haspopup_attribute: String,
    /// Gap kept between a corrected menu and the viewport edge.
    pub edge_inset: f64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            binding_attribute: String::from("data-contextmenu"),
            menu_class: String::from("contextmenu"),
            disabled_class: String::from("disabled"),
            expanded_attribute: String::from("aria-expanded"),
            haspopup_attribute: String::from("aria-haspopup"),
            edge_inset: 5.0,
        }
    }
}

impl MenuConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that names are usable and the inset is a finite, non-negative length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("binding_attribute", &self.binding_attribute),
            ("menu_class", &self.menu_class),
            ("disabled_class", &self.disabled_class),
            ("expanded_attribute", &self.expanded_attribute),
            ("haspopup_attribute", &self.haspopup_attribute),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyName(field));
            }
        }
        if !self.edge_inset.is_finite() || self.edge_inset < 0.0 {
            return Err(ConfigError::InvalidInset(self.edge_inset));
        }
        Ok(())
    }
}
