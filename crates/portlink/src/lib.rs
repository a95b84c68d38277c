//! Portlink - A command-driven editor for module/port wiring diagrams.
//!
//! Modules own named, typed ports; links run from an output port to an
//! input port of another module. The diagram is kept in an XML backing file,
//! edited through reference tokens like `Module::Port:Type`, and exported to
//! Graphviz DOT.

pub mod codec;
pub mod config;
pub mod editor;
pub mod export;
pub mod render;
pub mod view;

mod error;

pub use portlink_core::{Direction, Link, Module, Port, PortRef, Store, UNKNOWN_TYPE};
pub use portlink_parser::{Reference, parse_reference};

pub use editor::{EditError, LinkEditor, Linked, Unlinked};
pub use error::PortlinkError;

use log::{debug, info};

use config::AppConfig;
use export::Exported;
use render::Renderer;

/// A store loaded from its backing file, plus the configuration it was
/// loaded with.
///
/// A session reads the backing file once when opened and writes it back on
/// [`Session::save`]; everything in between happens in memory.
///
/// # Examples
///
/// ```rust,no_run
/// use portlink::{Session, config::AppConfig};
///
/// let mut session = Session::open(AppConfig::default())
///     .expect("Failed to load store");
///
/// session.editor().add("Osc::out:audio", "Mixer::in1")
///     .expect("Failed to add link");
///
/// session.save().expect("Failed to save store");
/// ```
#[derive(Debug)]
pub struct Session {
    config: AppConfig,
    store: Store,
}

impl Session {
    /// Loads the backing file named by `config`.
    ///
    /// A missing backing file opens an empty session.
    ///
    /// # Errors
    ///
    /// Returns [`PortlinkError::Codec`] if the file cannot be read or is not
    /// well-formed XML.
    pub fn open(config: AppConfig) -> Result<Self, PortlinkError> {
        info!(path:? = config.paths().store(); "Opening store");
        let store = codec::load(config.paths().store())?;
        debug!(modules = store.len(); "Store loaded");
        Ok(Self { config, store })
    }

    /// Creates a session over an existing store without touching the disk.
    pub fn with_store(config: AppConfig, store: Store) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns an editor over this session's store.
    pub fn editor(&mut self) -> LinkEditor<'_> {
        LinkEditor::new(&mut self.store)
    }

    /// Writes the store back to its backing file.
    ///
    /// # Errors
    ///
    /// Returns [`PortlinkError::Codec`] if the file cannot be written.
    pub fn save(&self) -> Result<(), PortlinkError> {
        codec::save(&self.store, self.config.paths().store())?;
        Ok(())
    }

    /// Writes the DOT export and renders it with `renderer`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`PortlinkError::Export`] if the DOT file cannot be written.
    /// Renderer failures are logged, not returned.
    pub fn export_diagram(
        &self,
        renderer: Option<&dyn Renderer>,
    ) -> Result<Exported, PortlinkError> {
        Ok(export::export_diagram(&self.store, &self.config, renderer)?)
    }

    /// Consumes the session, returning its store.
    pub fn into_store(self) -> Store {
        self.store
    }
}
