use std::path::PathBuf;
use std::time::Duration;

use ringbar_core::{HeadlessView, ProgressWidget, Ring, VirtualScheduler, WidgetOptions};
use ringbar_types::PageConfig;
use tracing::{info, warn};

use crate::error::CommandError;

pub type HeadlessWidget = ProgressWidget<HeadlessView, VirtualScheduler>;

/// Everything the REPL works on: one virtual clock and the widgets on it.
pub struct ReplContext {
    pub config: PageConfig,
    pub config_path: Option<PathBuf>,
    pub scheduler: VirtualScheduler,
    pub widgets: Vec<HeadlessWidget>,
}

impl ReplContext {
    pub fn new(config: PageConfig, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
            scheduler: VirtualScheduler::new(),
            widgets: Vec::new(),
        }
    }

    /// Load `<config_dir>/ringbar/ringbar.toml` if present, else use defaults.
    pub fn load() -> Self {
        let Some(path) = default_config_path() else {
            return Self::new(PageConfig::default(), None);
        };
        if !path.exists() {
            return Self::new(PageConfig::default(), None);
        }

        match ringbar_core::config::load(&path) {
            Ok(config) => {
                info!(path = %path.display(), "using config file");
                Self::new(config, Some(path))
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring config file");
                Self::new(PageConfig::default(), None)
            }
        }
    }

    /// Add a widget at the next index.
    ///
    /// `rotation` can only take the rotate control away; whether it exists at
    /// all is up to the config.
    pub fn spawn(&mut self, rotation: bool) -> &HeadlessWidget {
        let index = self.widgets.len();
        // No computed style off-screen; the fallback radius is all there is
        let ring = Ring::new(self.config.widget.radius.fallback());
        let mut options = WidgetOptions::from_config(&self.config.widget, ring);
        options.features.rotation &= rotation;

        let widget = ProgressWidget::new(
            index,
            HeadlessView::default(),
            self.scheduler.clone(),
            options,
        );
        self.widgets.push(widget);
        &self.widgets[index]
    }

    pub fn widget(&self, index: usize) -> Result<&HeadlessWidget, CommandError> {
        self.widgets.get(index).ok_or(CommandError::UnknownWidget {
            index,
            count: self.widgets.len(),
        })
    }

    pub fn advance(&self, by: Duration) {
        self.scheduler.advance(by);
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ringbar").join("ringbar.toml"))
}
