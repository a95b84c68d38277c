//! Configuration types for Portlink.
//!
//! This module provides configuration structures that control where the
//! wiring diagram is stored, how the Graphviz export looks, and whether the
//! external renderer is invoked. All types implement [`serde::Deserialize`]
//! for loading from TOML; every field has a default, so an empty file is a
//! valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`PathsConfig`] - Backing file, DOT output and rendered image paths.
//! - [`RenderConfig`] - External renderer command and output format.
//! - [`StyleConfig`] - Graph attributes written into the DOT output.
//!
//! # Example
//!
//! ```
//! # use portlink::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.paths().store().to_str(), Some("links_data.xml"));
//! assert!(config.render().enabled());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// File locations.
    #[serde(default)]
    paths: PathsConfig,

    /// External renderer settings.
    #[serde(default)]
    render: RenderConfig,

    /// DOT styling.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(paths: PathsConfig, render: RenderConfig, style: StyleConfig) -> Self {
        Self {
            paths,
            render,
            style,
        }
    }

    /// Returns the path configuration.
    pub fn paths(&self) -> &PathsConfig {
        &self.paths
    }

    /// Returns a mutable reference to the path configuration.
    pub fn paths_mut(&mut self) -> &mut PathsConfig {
        &mut self.paths
    }

    /// Returns the renderer configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns a mutable reference to the renderer configuration.
    pub fn render_mut(&mut self) -> &mut RenderConfig {
        &mut self.render
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// File locations used by a run.
///
/// Relative paths resolve against the working directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// The XML backing file holding the wiring diagram.
    store: PathBuf,

    /// Where the Graphviz DOT export is written.
    dot: PathBuf,

    /// Where the rendered image is written.
    image: PathBuf,
}

impl PathsConfig {
    /// Creates a new [`PathsConfig`].
    ///
    /// # Arguments
    ///
    /// * `store` - Backing file path.
    /// * `dot` - DOT output path.
    /// * `image` - Rendered image path.
    pub fn new(store: impl Into<PathBuf>, dot: impl Into<PathBuf>, image: impl Into<PathBuf>) -> Self {
        Self {
            store: store.into(),
            dot: dot.into(),
            image: image.into(),
        }
    }

    pub fn store(&self) -> &Path {
        &self.store
    }

    pub fn dot(&self) -> &Path {
        &self.dot
    }

    pub fn image(&self) -> &Path {
        &self.image
    }

    /// Overrides the backing file path.
    pub fn set_store(&mut self, store: impl Into<PathBuf>) {
        self.store = store.into();
    }

    /// Overrides the DOT output path.
    pub fn set_dot(&mut self, dot: impl Into<PathBuf>) {
        self.dot = dot.into();
    }

    /// Overrides the rendered image path.
    pub fn set_image(&mut self, image: impl Into<PathBuf>) {
        self.image = image.into();
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self::new("links_data.xml", "graph.dot", "graph.svg")
    }
}

/// Settings for the external renderer that turns DOT into an image.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Whether to invoke the renderer after writing the DOT file.
    enabled: bool,

    /// Renderer executable, looked up on `PATH`.
    command: String,

    /// Output format passed as `-T<format>`.
    format: String,
}

impl RenderConfig {
    /// Creates a new [`RenderConfig`].
    pub fn new(enabled: bool, command: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            enabled,
            command: command.into(),
            format: format.into(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Turns the renderer on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(true, "dot", "svg")
    }
}

/// Graph attributes written into the DOT export.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Graphviz `rankdir`, e.g. `LR` or `TB`.
    rank_direction: String,

    /// Font used for module and port labels.
    font_name: String,

    /// Font size for node labels; edges use two points less.
    font_size: u32,
}

impl StyleConfig {
    /// Creates a new [`StyleConfig`].
    pub fn new(rank_direction: impl Into<String>, font_name: impl Into<String>, font_size: u32) -> Self {
        Self {
            rank_direction: rank_direction.into(),
            font_name: font_name.into(),
            font_size,
        }
    }

    pub fn rank_direction(&self) -> &str {
        &self.rank_direction
    }

    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new("LR", "Arial", 12)
    }
}
