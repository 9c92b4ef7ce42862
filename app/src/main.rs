mod app;
mod bridge;
mod dom;
mod error;
mod mount;
mod timers;

use dioxus_logger::tracing::Level;

fn main() {
    dioxus_logger::init(Level::INFO).expect("failed to init logger");
    dioxus::launch(app::App);
}
