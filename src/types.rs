//! Shared types used by configuration and page rendering.

use serde::{Deserialize, Serialize};

/// A navigation menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    /// Text shown in the menu.
    pub label: String,
    /// Target page, relative to the site root (`blog.html`).
    pub href: String,
}

impl NavLink {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}
