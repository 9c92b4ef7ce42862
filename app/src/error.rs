//! Error types for binding widgets to the page

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors while discovering or binding widgets.
///
/// A widget that fails to bind is skipped; only a missing window or document
/// aborts the whole scan.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("no browser window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("widget {index} has no element matching {selector}")]
    MissingElement { index: usize, selector: String },

    #[error("element matching {selector} is not a {expected}")]
    WrongElement {
        selector: String,
        expected: &'static str,
    },

    #[error("JS error: {0}")]
    Js(String),

    #[error("failed to serialize widget state")]
    Serialize(#[from] serde_wasm_bindgen::Error),
}

impl MountError {
    pub fn from_js(value: JsValue) -> Self {
        MountError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
