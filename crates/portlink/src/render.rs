//! External rendering of DOT files into images.
//!
//! The exporter only produces DOT text. Turning it into a picture is left to
//! a [`Renderer`], normally [`GraphvizRenderer`], which runs the Graphviz
//! `dot` executable.

use std::{
    path::Path,
    process::{Command, ExitStatus},
};

use log::{debug, info};
use thiserror::Error;

use crate::config::RenderConfig;

/// Errors raised by a [`Renderer`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot run `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Turns a DOT file into an image file.
pub trait Renderer {
    /// Renders the DOT document at `dot` into `output`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the image could not be produced.
    fn render(&self, dot: &Path, output: &Path) -> Result<(), Error>;
}

/// Renders through a Graphviz executable: `<command> -T<format> <dot> -o <output>`.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    command: String,
    format: String,
}

impl GraphvizRenderer {
    /// Creates a renderer running `command` with output format `format`.
    pub fn new(command: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            format: format.into(),
        }
    }

    /// Creates a renderer from the `[render]` configuration section.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.command(), config.format())
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn format(&self) -> &str {
        &self.format
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl Renderer for GraphvizRenderer {
    fn render(&self, dot: &Path, output: &Path) -> Result<(), Error> {
        debug!(
            command = self.command.as_str(),
            format = self.format.as_str(),
            dot:? = dot,
            output:? = output;
            "Running renderer"
        );

        let result = Command::new(&self.command)
            .arg(format!("-T{}", self.format))
            .arg(dot)
            .arg("-o")
            .arg(output)
            .output()
            .map_err(|source| Error::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if !result.status.success() {
            return Err(Error::Failed {
                command: self.command.clone(),
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_owned(),
            });
        }

        info!(output:? = output; "Rendered diagram");
        Ok(())
    }
}
