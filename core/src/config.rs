//! Loading and validation of [`PageConfig`] from TOML.
//!
//! ```toml
//! marker = "progress"
//!
//! [widget]
//! rotate_control = true
//! tick_interval_ms = 20
//! radius = { kind = "computed", fallback = 45.0 }
//! ```

use std::path::Path;

use ringbar_types::PageConfig;
use tracing::debug;

use crate::error::ConfigError;

/// Read and validate a config file.
pub fn load(path: &Path) -> Result<PageConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse(&text)?;
    debug!(path = %path.display(), ?config, "loaded page config");
    Ok(config)
}

/// Parse and validate config text.
pub fn parse(text: &str) -> Result<PageConfig, ConfigError> {
    let config: PageConfig = toml::from_str(text)?;
    validate(&config)?;
    Ok(config)
}

/// Reject configs the widget cannot run with.
pub fn validate(config: &PageConfig) -> Result<(), ConfigError> {
    let radius = config.widget.radius.fallback();
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ConfigError::InvalidRadius { radius });
    }
    if config.widget.tick_interval_ms == 0 {
        return Err(ConfigError::InvalidInterval);
    }
    if !is_css_ident(&config.marker) {
        return Err(ConfigError::InvalidMarker {
            marker: config.marker.clone(),
        });
    }
    Ok(())
}

fn is_css_ident(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
