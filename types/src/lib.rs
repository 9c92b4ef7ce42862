//! Shared configuration types for ringbar
//!
//! This crate contains serializable configuration types that are shared between
//! the native crates (ringbar-core, the REPL) and the WASM frontend (ringbar-ui).

use serde::{Deserialize, Serialize};

/// Radius of the arc in the stock markup (`r="45"` in a 100x100 viewBox).
pub const DEFAULT_RADIUS: f64 = 45.0;

/// Period of the indeterminate spin animation, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 20;

/// Marker class shared by every widget root.
pub const DEFAULT_MARKER: &str = "progress";

// ─────────────────────────────────────────────────────────────────────────────
// Widget Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Where the arc radius comes from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RadiusSource {
    /// Hard-coded radius, matching the markup.
    Fixed { radius: f64 },
    /// Read the `r` property from the arc's computed style, falling back when
    /// the style cannot be read or parsed.
    Computed { fallback: f64 },
}

impl RadiusSource {
    /// The radius used when nothing better is known.
    pub fn fallback(&self) -> f64 {
        match self {
            RadiusSource::Fixed { radius } => *radius,
            RadiusSource::Computed { fallback } => *fallback,
        }
    }
}

impl Default for RadiusSource {
    fn default() -> Self {
        RadiusSource::Fixed {
            radius: DEFAULT_RADIUS,
        }
    }
}

/// Per-widget behavior shared by every instance on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default)]
    pub radius: RadiusSource,
    /// Whether the rotate control is wired up. The reduced variant has none.
    #[serde(default = "default_true")]
    pub rotate_control: bool,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            radius: RadiusSource::default(),
            rotate_control: true,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Page Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Everything the bootstrap needs to find and bind widgets on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Root class; element and modifier class names derive from it.
    #[serde(default = "default_marker")]
    pub marker: String,
    #[serde(default)]
    pub widget: WidgetConfig,
}

impl PageConfig {
    /// CSS selector matching every widget root.
    pub fn root_selector(&self) -> String {
        format!(".{}", self.marker)
    }

    /// CSS selector for a child element, e.g. `part("control__value")`
    /// gives `.progress-control__value`.
    pub fn part_selector(&self, part: &str) -> String {
        format!(".{}-{}", self.marker, part)
    }

    /// Modifier class toggled on the root, e.g. `progress--hidden`.
    pub fn modifier_class(&self, modifier: &str) -> String {
        format!("{}--{}", self.marker, modifier)
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            widget: WidgetConfig::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_tick_interval_ms() -> u32 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}
