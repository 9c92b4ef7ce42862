//! Page bootstrap: find every widget root and bind it.

use ringbar_core::{Features, ProgressWidget, Ring, WidgetOptions, WidgetState};
use ringbar_types::{PageConfig, RadiusSource, WidgetConfig};
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, Window};

use crate::dom::{DomView, WidgetElements};
use crate::error::MountError;
use crate::timers::BrowserScheduler;

pub type DomWidget = ProgressWidget<DomView, BrowserScheduler>;

/// The widgets found on a page, in document order.
///
/// Owned by whoever bootstrapped the page and handed to anything that needs
/// to reach the widgets.
pub struct Registry {
    widgets: Vec<DomWidget>,
}

impl Registry {
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// The widget whose root sat at `index` among the matches. Skipped roots
    /// keep their index, so this is not a position in the registry.
    pub fn get(&self, index: usize) -> Option<&DomWidget> {
        self.widgets.iter().find(|widget| widget.index() == index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomWidget> {
        self.widgets.iter()
    }

    pub fn reset_all(&self) {
        for widget in &self.widgets {
            widget.reset();
        }
    }

    pub fn states(&self) -> Vec<WidgetState> {
        self.widgets.iter().map(|w| w.state()).collect()
    }

    /// Widget states as a plain JS array, for scripts poking at the page.
    pub fn snapshot(&self) -> Result<JsValue, MountError> {
        Ok(serde_wasm_bindgen::to_value(&self.states())?)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scan
// ─────────────────────────────────────────────────────────────────────────────

/// What the scan learned about one matching root.
#[derive(Debug)]
struct RootSurvey<T> {
    /// The root's parts, or why they could not be found.
    parts: Result<T, MountError>,
    /// Raw `data-rotate` attribute.
    data_rotate: Option<String>,
}

/// The scan's verdict for one root.
#[derive(Debug)]
enum Placement<T> {
    Mount {
        index: usize,
        features: Features,
        parts: T,
    },
    Skip {
        index: usize,
        error: MountError,
    },
}

/// Decide, in document order, which roots get a widget and with which features.
///
/// `index` is the root's position among all matches, so a skipped root leaves
/// a gap rather than shifting its neighbours. Rotation needs the page config,
/// a rotate control on the root, and no `data-rotate` opt-out.
fn place_roots<T>(
    surveys: Vec<RootSurvey<T>>,
    config: &WidgetConfig,
    has_rotate: impl Fn(&T) -> bool,
) -> Vec<Placement<T>> {
    surveys
        .into_iter()
        .enumerate()
        .map(|(index, survey)| match survey.parts {
            Ok(parts) => {
                let mut features = Features::from(config);
                features.rotation &=
                    has_rotate(&parts) && !rotation_opted_out(survey.data_rotate.as_deref());
                Placement::Mount {
                    index,
                    features,
                    parts,
                }
            }
            Err(error) => Placement::Skip { index, error },
        })
        .collect()
}

fn survey_roots(
    document: &Document,
    config: &PageConfig,
) -> Result<Vec<RootSurvey<WidgetElements>>, MountError> {
    let selector = config.root_selector();
    let roots = document
        .query_selector_all(&selector)
        .map_err(MountError::from_js)?;

    let mut surveys = Vec::with_capacity(roots.length() as usize);
    for position in 0..roots.length() {
        let root = roots
            .item(position)
            .and_then(|node| node.dyn_into::<Element>().ok());
        let survey = match root {
            Some(root) => RootSurvey {
                data_rotate: root.get_attribute("data-rotate"),
                parts: WidgetElements::find(root, position as usize, config),
            },
            None => RootSurvey {
                data_rotate: None,
                parts: Err(MountError::WrongElement {
                    selector: selector.clone(),
                    expected: "element",
                }),
            },
        };
        surveys.push(survey);
    }
    Ok(surveys)
}

/// Scan `document` for widget roots and bind one widget to each.
///
/// A root that fails to bind is skipped with a warning; the scan carries on.
pub fn mount_all(document: &Document, config: &PageConfig) -> Result<Registry, MountError> {
    let window = web_sys::window().ok_or(MountError::NoWindow)?;
    let surveys = survey_roots(document, config)?;

    let mut widgets = Vec::with_capacity(surveys.len());
    for placement in place_roots(surveys, &config.widget, |elements| elements.rotate.is_some()) {
        match placement {
            Placement::Mount {
                index,
                features,
                parts,
            } => match mount_one(&window, index, parts, features, config) {
                Ok(widget) => widgets.push(widget),
                Err(err) => warn!(index, error = %err, "skipping progress widget"),
            },
            Placement::Skip { index, error } => {
                warn!(index, error = %error, "skipping progress widget")
            }
        }
    }

    info!(count = widgets.len(), marker = %config.marker, "progress widgets mounted");
    Ok(Registry { widgets })
}

/// Bind the widgets of the current document.
pub fn mount_document(config: &PageConfig) -> Result<Registry, MountError> {
    let document = web_sys::window()
        .ok_or(MountError::NoWindow)?
        .document()
        .ok_or(MountError::NoDocument)?;
    mount_all(&document, config)
}

fn mount_one(
    window: &Window,
    index: usize,
    elements: WidgetElements,
    features: Features,
    config: &PageConfig,
) -> Result<DomWidget, MountError> {
    let computed = match config.widget.radius {
        RadiusSource::Computed { .. } => elements.computed_radius(window),
        RadiusSource::Fixed { .. } => None,
    };
    let ring = Ring::resolve(&config.widget.radius, computed.as_deref());

    let mut options = WidgetOptions::from_config(&config.widget, ring);
    options.features = features;

    let handles = elements.clone();
    let widget = ProgressWidget::new(
        index,
        DomView::new(elements, config),
        BrowserScheduler,
        options,
    );
    bind(&widget, &handles)?;
    Ok(widget)
}

/// `data-rotate="false"` on a root switches its rotate control off.
fn rotation_opted_out(attr: Option<&str>) -> bool {
    matches!(attr.map(str::trim), Some("false" | "off" | "0"))
}

fn bind(widget: &DomWidget, elements: &WidgetElements) -> Result<(), MountError> {
    let input = elements.value.clone();
    let target = widget.clone();
    listen(&elements.value, "input", move || target.set_value(input.value()))?;

    let animate = elements.animate.clone();
    let target = widget.clone();
    listen(&elements.animate, "change", move || {
        target.toggle_animation(animate.checked())
    })?;

    if widget.features().rotation
        && let Some(rotate) = &elements.rotate
    {
        let checkbox = rotate.clone();
        let target = widget.clone();
        listen(rotate, "change", move || {
            target.toggle_rotation(checkbox.checked())
        })?;
    }

    let hide = elements.hide.clone();
    let target = widget.clone();
    listen(&elements.hide, "change", move || target.toggle_hiding(hide.checked()))?;

    Ok(())
}

fn listen(
    target: &EventTarget,
    event: &str,
    mut handler: impl FnMut() + 'static,
) -> Result<(), MountError> {
    let closure = Closure::<dyn FnMut(Event)>::new(move |_event: Event| handler());
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(MountError::from_js)?;
    // Widgets live as long as the page, and so do their listeners
    closure.forget();
    Ok(())
}
