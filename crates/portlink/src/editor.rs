//! Link editing over the record store.
//!
//! [`LinkEditor`] turns pairs of reference tokens into link additions and
//! removals. Links are recorded on the source port only: adding one marks the
//! source [`Direction::Out`](portlink_core::Direction::Out) with a destination
//! and the destination [`Direction::In`](portlink_core::Direction::In).
//!
//! Removal resets the source port and leaves the destination port's
//! direction alone, so a port that once received a link keeps reporting
//! `in` after the link is gone.

use std::fmt;

use log::{debug, info};
use thiserror::Error;

use portlink_core::{Port, PortRef, Store, UNKNOWN_TYPE};
use portlink_parser::{
    Reference, Span,
    error::{Diagnostic, ErrorCode, ParseError},
    parse_reference,
};

/// Which side of a link a reference token describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Destination => f.write_str("destination"),
        }
    }
}

/// Errors raised by [`LinkEditor`] operations.
///
/// None of these leave a partial edit behind: every check runs before the
/// store is touched.
#[derive(Debug, Error)]
pub enum EditError {
    /// A reference token was rejected. `src` holds the token so the
    /// diagnostics' spans can be shown against it.
    #[error("invalid {endpoint} reference: {err}")]
    Reference {
        endpoint: Endpoint,
        err: ParseError,
        src: String,
    },

    #[error("port `{0}` not found")]
    PortNotFound(PortRef),

    #[error("link `{from}` -> `{to}` not found")]
    LinkNotFound { from: PortRef, to: PortRef },
}

impl EditError {
    fn reference(endpoint: Endpoint, err: impl Into<ParseError>, src: &str) -> Self {
        Self::Reference {
            endpoint,
            err: err.into(),
            src: src.to_owned(),
        }
    }
}

/// The fully resolved endpoints of a link that was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linked {
    /// Source reference with its type defaulted.
    pub source: Reference,
    /// Destination reference with port and type inherited where missing.
    pub destination: Reference,
    /// Set when the destination port name was taken from the source.
    pub inherited_port: bool,
}

/// The endpoints of a link that was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unlinked {
    pub from: PortRef,
    pub to: PortRef,
}

/// Applies link additions and removals to a [`Store`].
///
/// # Examples
///
/// ```
/// use portlink::{Direction, LinkEditor, Store};
///
/// let mut store = Store::new();
/// let mut editor = LinkEditor::new(&mut store);
///
/// let linked = editor.add("Osc::out:audio", "Mixer::in1").unwrap();
/// assert_eq!(linked.destination.type_name(), "audio");
///
/// assert_eq!(store.port("Osc", "out").unwrap().direction(), Direction::Out);
/// assert_eq!(store.port("Mixer", "in1").unwrap().direction(), Direction::In);
/// ```
pub struct LinkEditor<'a> {
    store: &'a mut Store,
}

impl<'a> LinkEditor<'a> {
    /// Creates an editor operating on `store`.
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    /// Links the port named by `source` to the port named by `destination`.
    ///
    /// Missing pieces are filled in before anything is created:
    /// - an untyped source gets [`UNKNOWN_TYPE`],
    /// - a destination without a port reuses the source port name,
    /// - an untyped destination takes the source type.
    ///
    /// Both ports are created on demand and their types overwritten. The
    /// destination port is marked as an input and loses any destination it
    /// carried, even if it was itself linked somewhere. Repeating the same
    /// call leaves the store unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Reference`] if either token does not parse or
    /// the source names no port.
    pub fn add(&mut self, source: &str, destination: &str) -> Result<Linked, EditError> {
        let mut source_ref = parse(Endpoint::Source, source)?;
        let mut dest_ref = parse(Endpoint::Destination, destination)?;

        if !source_ref.has_port() {
            let module = source_ref.module();
            let diagnostic = Diagnostic::error(format!("source `{module}` must specify a port"))
                .with_code(ErrorCode::E100)
                .with_label(Span::new(0..source.len()), "no port given")
                .with_help(format!("write the source as `{module}::<port>`"));
            return Err(EditError::reference(Endpoint::Source, diagnostic, source));
        }

        if !source_ref.has_type() {
            source_ref.set_type(UNKNOWN_TYPE);
        }

        let inherited_port = !dest_ref.has_port();
        if inherited_port {
            dest_ref.set_port(source_ref.port());
            info!(port = dest_ref.port(); "Destination port not specified, using source port name");
        }
        if !dest_ref.has_type() {
            dest_ref.set_type(source_ref.type_name());
        }

        // Each step looks its port up again; source and destination may be
        // the same port, and the destination update must land last.
        self.endpoint_mut(&source_ref)?
            .set_type(source_ref.type_name());
        self.endpoint_mut(&dest_ref)?
            .set_type(dest_ref.type_name());
        self.endpoint_mut(&source_ref)?
            .connect_to(dest_ref.port_ref());
        self.endpoint_mut(&dest_ref)?.mark_input();

        info!(
            source = source_ref.to_string(),
            destination = dest_ref.to_string();
            "Link added"
        );

        Ok(Linked {
            source: source_ref,
            destination: dest_ref,
            inherited_port,
        })
    }

    /// Removes the link from `source` to `destination`.
    ///
    /// Type components of either token are ignored. Only the source port is
    /// reset; the destination port keeps its direction.
    ///
    /// # Errors
    ///
    /// - [`EditError::Reference`] if either token does not parse.
    /// - [`EditError::PortNotFound`] if the source module or port does not exist.
    /// - [`EditError::LinkNotFound`] if the source port does not point at
    ///   exactly that destination.
    pub fn remove(&mut self, source: &str, destination: &str) -> Result<Unlinked, EditError> {
        let from = parse(Endpoint::Source, source)?.port_ref();
        let to = parse(Endpoint::Destination, destination)?.port_ref();

        let port = self
            .store
            .find_or_create_port(from.module(), from.port(), false)
            .ok_or_else(|| EditError::PortNotFound(from.clone()))?;

        if port.destination() != Some(&to) {
            debug!(
                from = from.to_string(),
                to = to.to_string(),
                current:? = port.destination();
                "Source port does not point at destination"
            );
            return Err(EditError::LinkNotFound { from, to });
        }

        port.disconnect();
        info!(from = from.to_string(), to = to.to_string(); "Link removed");

        Ok(Unlinked { from, to })
    }

    /// Finds or creates the port a resolved reference names.
    fn endpoint_mut(&mut self, reference: &Reference) -> Result<&mut Port, EditError> {
        self.store
            .find_or_create_port(reference.module(), reference.port(), true)
            .ok_or_else(|| EditError::PortNotFound(reference.port_ref()))
    }
}

fn parse(endpoint: Endpoint, token: &str) -> Result<Reference, EditError> {
    parse_reference(token).map_err(|err| EditError::reference(endpoint, err, token))
}
