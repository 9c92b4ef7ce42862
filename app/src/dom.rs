//! DOM view: applies frames to one widget's markup.

use ringbar_core::{Frame, Modifiers, View};
use ringbar_types::PageConfig;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlInputElement, SvgElement, Window};

use crate::error::MountError;

/// The elements one widget is made of.
#[derive(Clone)]
pub struct WidgetElements {
    pub root: Element,
    pub arc: SvgElement,
    pub value: HtmlInputElement,
    pub animate: HtmlInputElement,
    /// Absent in the reduced variant.
    pub rotate: Option<HtmlInputElement>,
    pub hide: HtmlInputElement,
}

impl WidgetElements {
    /// Look up every control under `root`.
    pub fn find(root: Element, index: usize, config: &PageConfig) -> Result<Self, MountError> {
        Ok(Self {
            arc: require(&root, index, &config.part_selector("circle__arc"), "SVG element")?,
            value: require(&root, index, &config.part_selector("control__value"), "input")?,
            animate: require(&root, index, &config.part_selector("control__animate"), "input")?,
            rotate: find_part(&root, &config.part_selector("control__rotate"), "input")?,
            hide: require(&root, index, &config.part_selector("control__hide"), "input")?,
            root,
        })
    }

    /// The arc's computed `r`, e.g. `"45px"`.
    pub fn computed_radius(&self, window: &Window) -> Option<String> {
        let style = window.get_computed_style(&self.arc).ok().flatten()?;
        style.get_property_value("r").ok()
    }
}

fn find_part<T: JsCast>(
    root: &Element,
    selector: &str,
    expected: &'static str,
) -> Result<Option<T>, MountError> {
    let Some(element) = root.query_selector(selector).map_err(MountError::from_js)? else {
        return Ok(None);
    };
    element
        .dyn_into::<T>()
        .map(Some)
        .map_err(|_| MountError::WrongElement {
            selector: selector.to_string(),
            expected,
        })
}

fn require<T: JsCast>(
    root: &Element,
    index: usize,
    selector: &str,
    expected: &'static str,
) -> Result<T, MountError> {
    find_part(root, selector, expected)?.ok_or_else(|| MountError::MissingElement {
        index,
        selector: selector.to_string(),
    })
}

/// [`View`] over real markup.
pub struct DomView {
    elements: WidgetElements,
    /// Modifier classes in [`Modifiers::entries`] order.
    modifier_classes: [String; 3],
}

impl DomView {
    pub fn new(elements: WidgetElements, config: &PageConfig) -> Self {
        Self {
            elements,
            modifier_classes: Modifiers::default()
                .entries()
                .map(|(name, _)| config.modifier_class(name)),
        }
    }
}

impl View for DomView {
    fn apply(&mut self, frame: &Frame) {
        let class_list = self.elements.root.class_list();
        for ((_, present), class) in frame.modifiers.entries().iter().zip(&self.modifier_classes) {
            report("toggle modifier", class_list.toggle_with_force(class, *present));
        }

        // Transition first, so a snap-back offset is not animated
        self.set_transition(!frame.transition_suppressed);
        self.draw_arc(frame.arc_offset);

        let elements = &self.elements;
        elements.value.set_value(&frame.value_text);
        elements.value.set_disabled(!frame.controls.value_enabled);
        elements.animate.set_checked(frame.animate_checked);
        elements.animate.set_disabled(!frame.controls.animate_enabled);
        if let Some(rotate) = &elements.rotate {
            rotate.set_checked(frame.rotate_checked);
            rotate.set_disabled(!frame.controls.rotate_enabled);
        }
        elements.hide.set_checked(frame.hide_checked);
    }

    fn draw_arc(&mut self, offset: f64) {
        let style = self.elements.arc.style();
        report(
            "stroke-dashoffset",
            style.set_property("stroke-dashoffset", &offset.to_string()),
        );
    }

    fn set_transition(&mut self, enabled: bool) {
        let style = self.elements.arc.style();
        if enabled {
            report("restore transition", style.remove_property("transition"));
        } else {
            report("suppress transition", style.set_property("transition", "none"));
        }
    }
}

fn report<T>(what: &str, result: Result<T, JsValue>) {
    if let Err(err) = result {
        warn!(what, error = ?err, "DOM update failed");
    }
}
