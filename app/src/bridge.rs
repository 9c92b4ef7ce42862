//! Script-facing widget handles.
//!
//! After mounting, every widget is published on `window.progressInstances`
//! as a [`ProgressHandle`], so other page scripts can drive a widget the same
//! way its controls do.

use wasm_bindgen::prelude::*;

use crate::error::MountError;
use crate::mount::{DomWidget, Registry};

/// Window property the handles are published under.
pub const INSTANCES_KEY: &str = "progressInstances";

/// One mounted widget, as seen from JS.
#[wasm_bindgen]
pub struct ProgressHandle {
    widget: DomWidget,
}

#[wasm_bindgen]
impl ProgressHandle {
    /// Position of the widget's root among all matches.
    #[wasm_bindgen(getter)]
    pub fn index(&self) -> usize {
        self.widget.index()
    }

    #[wasm_bindgen(js_name = getValue)]
    pub fn get_value(&self) -> u8 {
        self.widget.get_value()
    }

    /// Takes a string or a number; anything else counts as 0.
    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&self, raw: JsValue) {
        self.widget.set_value(raw_text(raw.as_string(), raw.as_f64()));
    }

    #[wasm_bindgen(js_name = toggleAnimation)]
    pub fn toggle_animation(&self, is_animated: bool) {
        self.widget.toggle_animation(is_animated);
    }

    #[wasm_bindgen(js_name = toggleRotation)]
    pub fn toggle_rotation(&self, is_rotated: bool) {
        self.widget.toggle_rotation(is_rotated);
    }

    #[wasm_bindgen(js_name = toggleHiding)]
    pub fn toggle_hiding(&self, is_hidden: bool) {
        self.widget.toggle_hiding(is_hidden);
    }

    pub fn reset(&self) {
        self.widget.reset();
    }

    /// Current state as a plain object (`index`, `value`, `isAnimated`, ...).
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.widget.state()).map_err(JsValue::from)
    }
}

/// Set `window.progressInstances` to one handle per mounted widget.
pub fn publish(registry: &Registry) -> Result<(), MountError> {
    let window = web_sys::window().ok_or(MountError::NoWindow)?;
    let instances = js_sys::Array::new();
    for widget in registry.iter() {
        instances.push(&JsValue::from(ProgressHandle {
            widget: widget.clone(),
        }));
    }
    js_sys::Reflect::set(&window, &JsValue::from_str(INSTANCES_KEY), &instances)
        .map_err(MountError::from_js)?;
    Ok(())
}

// Raw input as the text the value parser sees: strings pass through, numbers
// print without a trailing `.0`, anything else is empty.
fn raw_text(text: Option<String>, number: Option<f64>) -> String {
    match (text, number) {
        (Some(text), _) => text,
        (None, Some(number)) => number.to_string(),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringbar_core::coerce_percent;

    #[test]
    fn raw_text_from_strings_and_numbers() {
        assert_eq!(raw_text(Some("42".to_string()), None), "42");
        assert_eq!(raw_text(None, Some(50.0)), "50");
        assert_eq!(raw_text(None, Some(-5.0)), "-5");
        assert_eq!(raw_text(None, None), "");
    }

    #[test]
    fn script_input_coerces_like_the_value_field() {
        assert_eq!(coerce_percent(raw_text(None, Some(150.0))), 100);
        assert_eq!(coerce_percent(raw_text(None, Some(-5.0))), 5);
        assert_eq!(coerce_percent(raw_text(Some("abc".to_string()), None)), 0);
        assert_eq!(coerce_percent(raw_text(None, None)), 0);
    }
}
