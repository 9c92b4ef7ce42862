#![allow(non_snake_case)]

use std::rc::Rc;

use dioxus::prelude::*;
use ringbar_core::Ring;
use ringbar_types::PageConfig;
use tracing::{error, info};

use crate::bridge::publish;
use crate::mount::{Registry, mount_document};

static CSS: Asset = asset!("/assets/styles.css");

/// Demo page: one widget with every control and one reduced variant.
#[component]
pub fn App() -> Element {
    let mut registry = use_signal(|| None::<Rc<Registry>>);
    let mut status_msg = use_signal(String::new);

    // Bind after the markup is in the document
    use_effect(move || match mount_document(&PageConfig::default()) {
        Ok(mounted) => {
            if mounted.is_empty() {
                status_msg.set("No progress widgets found".to_string());
            } else {
                status_msg.set(format!("{} widgets ready", mounted.len()));
            }
            if let Err(err) = publish(&mounted) {
                error!(error = %err, "failed to publish progress widgets");
            }
            registry.set(Some(Rc::new(mounted)));
        }
        Err(err) => {
            error!(error = %err, "failed to mount progress widgets");
            status_msg.set(format!("Error: {}", err));
        }
    });

    let reset_all = move |_| {
        if let Some(registry) = registry() {
            registry.reset_all();
        }
    };

    // Drive a widget from code, the way a page script would
    let spin_first = move |_| {
        if let Some(registry) = registry()
            && let Some(widget) = registry.get(0)
        {
            widget.toggle_animation(!widget.state().is_animated());
        }
    };

    let dump_state = move |_| {
        let Some(registry) = registry() else {
            return;
        };
        info!(states = ?registry.states(), "widget states");
        match registry.snapshot() {
            Ok(snapshot) => web_sys::console::log_1(&snapshot),
            Err(err) => status_msg.set(format!("Error: {}", err)),
        }
    };

    rsx! {
        link { rel: "stylesheet", href: CSS }
        main { class: "container",
            header { class: "app-header",
                h1 { "ringbar" }
                p { class: "subtitle", "Circular progress with animate, rotate and hide controls" }
            }

            div { class: "widget-grid",
                ProgressMarkup { label: "Full controls", rotate: true }
                ProgressMarkup { label: "Reduced", rotate: false }
            }

            footer { class: "app-footer",
                button { class: "btn", onclick: reset_all, "Reset all" }
                button { class: "btn", onclick: spin_first, "Spin first" }
                button { class: "btn", onclick: dump_state, "Log state" }
                span { class: "status", "{status_msg}" }
            }
        }
    }
}

/// Static markup for one widget. Behavior is bound by `mount_document`,
/// so this component never re-renders once mounted.
#[component]
fn ProgressMarkup(label: String, rotate: bool) -> Element {
    let ring = Ring::default();
    let radius = ring.radius();
    let dash = ring.circumference();

    rsx! {
        section { class: "progress",
            h2 { class: "progress-title", "{label}" }
            svg { class: "progress-circle", "viewBox": "0 0 100 100",
                circle {
                    class: "progress-circle__track",
                    "cx": "50",
                    "cy": "50",
                    "r": "{radius}",
                }
                circle {
                    class: "progress-circle__arc",
                    "cx": "50",
                    "cy": "50",
                    "r": "{radius}",
                    "stroke-dasharray": "{dash}",
                }
            }
            div { class: "progress-controls",
                label { class: "progress-control",
                    input {
                        class: "progress-control__value",
                        r#type: "text",
                        "inputmode": "numeric",
                        maxlength: "3",
                        value: "0",
                    }
                    span { "Value" }
                }
                label { class: "progress-control",
                    input { class: "progress-control__animate", r#type: "checkbox" }
                    span { "Animate" }
                }
                if rotate {
                    label { class: "progress-control",
                        input { class: "progress-control__rotate", r#type: "checkbox" }
                        span { "Rotate" }
                    }
                }
                label { class: "progress-control",
                    input { class: "progress-control__hide", r#type: "checkbox" }
                    span { "Hide" }
                }
            }
        }
    }
}
