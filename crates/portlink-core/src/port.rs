//! Ports, their direction and link targets.
//!
//! A [`Port`] is a named, typed attachment point owned by a module. Links are
//! recorded only on the source side: an [`Direction::Out`] port carries a
//! [`PortRef`] naming the port it feeds, while the receiving port is merely
//! marked [`Direction::In`] and does not know who points at it.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Type label given to ports whose type was never specified.
pub const UNKNOWN_TYPE: &str = "unknown";

/// The role a port plays in the wiring diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Unconnected, or never initialized.
    #[default]
    None,
    /// Passive endpoint of some other port's link.
    In,
    /// Source of a link; the destination is stored on the port.
    Out,
}

impl Direction {
    /// Returns the lowercase name used in the backing file and in listings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::None => "none",
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Direction`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown port direction `{0}`")]
pub struct UnknownDirection(pub String);

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Direction::None),
            "in" => Ok(Direction::In),
            "out" => Ok(Direction::Out),
            other => Err(UnknownDirection(other.to_owned())),
        }
    }
}

/// A `(module, port)` pair naming the far end of a link.
///
/// # Examples
///
/// ```
/// use portlink_core::PortRef;
///
/// let target = PortRef::new("Mixer", "left");
/// assert_eq!(target.to_string(), "Mixer::left");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PortRef {
    module: String,
    port: String,
}

impl PortRef {
    /// Creates a reference to `port` on `module`.
    pub fn new(module: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            port: port.into(),
        }
    }

    /// Returns the module name.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Returns the port name.
    pub fn port(&self) -> &str {
        &self.port
    }

    /// Returns `true` if both halves are empty.
    pub fn is_empty(&self) -> bool {
        self.module.is_empty() && self.port.is_empty()
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.port)
    }
}

/// A named, typed attachment point on a module.
///
/// The mutators keep the link invariant intact: only an [`Direction::Out`]
/// port carries a destination. [`Port::restore`] is the single escape hatch,
/// used when reloading whatever the backing file recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    name: String,
    type_name: String,
    direction: Direction,
    destination: Option<PortRef>,
}

impl Port {
    /// Creates an unconnected port of [`UNKNOWN_TYPE`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: UNKNOWN_TYPE.to_owned(),
            direction: Direction::None,
            destination: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the recorded destination, whatever the direction.
    pub fn destination(&self) -> Option<&PortRef> {
        self.destination.as_ref()
    }

    /// Returns the destination of a live outgoing link.
    ///
    /// A link is live when the port is [`Direction::Out`] and the destination
    /// names a module.
    pub fn live_destination(&self) -> Option<&PortRef> {
        match (&self.direction, &self.destination) {
            (Direction::Out, Some(dest)) if !dest.module().is_empty() => Some(dest),
            _ => None,
        }
    }

    /// Overwrites the type label.
    pub fn set_type(&mut self, type_name: impl Into<String>) {
        self.type_name = type_name.into();
    }

    /// Makes this port the source of a link to `destination`.
    pub fn connect_to(&mut self, destination: PortRef) {
        self.direction = Direction::Out;
        self.destination = Some(destination);
    }

    /// Makes this port a link endpoint, dropping any destination it carried.
    pub fn mark_input(&mut self) {
        self.direction = Direction::In;
        self.destination = None;
    }

    /// Resets the port to [`Direction::None`] without a destination.
    pub fn disconnect(&mut self) {
        self.direction = Direction::None;
        self.destination = None;
    }

    /// Sets every attribute verbatim.
    ///
    /// An empty destination is stored as no destination.
    pub fn restore(
        &mut self,
        type_name: impl Into<String>,
        direction: Direction,
        destination: PortRef,
    ) {
        self.type_name = type_name.into();
        self.direction = direction;
        self.destination = (!destination.is_empty()).then_some(destination);
    }
}
