//! The record store: modules and the ports they own.
//!
//! [`Store`] exclusively owns every [`Module`], and each module exclusively
//! owns its [`Port`]s. Both levels are keyed by name in an [`IndexMap`], so
//! lookups are by exact, case-sensitive name while iteration follows
//! insertion order. The backing file, listings and diagrams all rely on that
//! order.
//!
//! # Find-or-create
//!
//! Lookups that may create take an explicit `create` flag. With `create`
//! unset they never mutate; with it set they are idempotent and a second call
//! returns the same, unchanged entity.

use indexmap::{IndexMap, map::Entry};
use log::debug;

use crate::port::{Port, PortRef};

/// A named entity owning an ordered set of ports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    name: String,
    ports: IndexMap<String, Port>,
}

impl Module {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ports: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the port called `name`, if any.
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.get(name)
    }

    /// Returns the ports in insertion order.
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.ports.values()
    }

    /// Returns the number of ports on this module.
    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    /// Finds the port called `name`, creating it when `create` is set.
    ///
    /// New ports are appended after the existing ones and start out as
    /// [`Port::new`] describes.
    ///
    /// # Returns
    ///
    /// `None` if `name` is empty, or if the port does not exist and `create`
    /// is unset.
    pub fn find_or_create_port(&mut self, name: &str, create: bool) -> Option<&mut Port> {
        if name.is_empty() {
            return None;
        }
        if !create {
            return self.ports.get_mut(name);
        }

        match self.ports.entry(name.to_owned()) {
            Entry::Occupied(entry) => Some(entry.into_mut()),
            Entry::Vacant(entry) => {
                debug!(module = self.name, port = name; "Creating port");
                Some(entry.insert(Port::new(name)))
            }
        }
    }
}

/// A live link, seen from its source port.
#[derive(Debug, Clone, Copy)]
pub struct Link<'a> {
    /// Module owning the source port.
    pub module: &'a Module,
    /// The [`Direction::Out`](crate::Direction::Out) port the link starts at.
    pub port: &'a Port,
    /// Where the link ends.
    pub destination: &'a PortRef,
}

/// The in-memory wiring diagram.
///
/// # Examples
///
/// ```
/// use portlink_core::{Direction, Store};
///
/// let mut store = Store::new();
/// let module = store.find_or_create_module("Filter", true).unwrap();
/// module.find_or_create_port("in", true).unwrap();
///
/// let port = store.module("Filter").and_then(|m| m.port("in")).unwrap();
/// assert_eq!(port.direction(), Direction::None);
///
/// // Lookups without `create` never add anything
/// assert!(store.find_or_create_module("Missing", false).is_none());
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    modules: IndexMap<String, Module>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if the store holds no modules.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Returns the module called `name`, if any.
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    /// Returns the modules in insertion order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    /// Returns `port` on `module`, if both exist.
    pub fn port(&self, module: &str, port: &str) -> Option<&Port> {
        self.module(module).and_then(|m| m.port(port))
    }

    /// Finds the module called `name`, creating it when `create` is set.
    ///
    /// New modules are appended after the existing ones.
    ///
    /// # Returns
    ///
    /// `None` if `name` is empty, or if the module does not exist and
    /// `create` is unset.
    pub fn find_or_create_module(&mut self, name: &str, create: bool) -> Option<&mut Module> {
        if name.is_empty() {
            return None;
        }
        if !create {
            return self.modules.get_mut(name);
        }

        match self.modules.entry(name.to_owned()) {
            Entry::Occupied(entry) => Some(entry.into_mut()),
            Entry::Vacant(entry) => {
                debug!(module = name; "Creating module");
                Some(entry.insert(Module::new(name)))
            }
        }
    }

    /// Finds or creates `port` on `module`, creating both when `create` is set.
    ///
    /// An empty port name yields `None` without creating the module.
    pub fn find_or_create_port(
        &mut self,
        module: &str,
        port: &str,
        create: bool,
    ) -> Option<&mut Port> {
        if port.is_empty() {
            return None;
        }
        self.find_or_create_module(module, create)?
            .find_or_create_port(port, create)
    }

    /// Returns every live link in module order, then port order.
    pub fn links(&self) -> impl Iterator<Item = Link<'_>> {
        self.modules().flat_map(|module| {
            module.ports().filter_map(move |port| {
                port.live_destination().map(|destination| Link {
                    module,
                    port,
                    destination,
                })
            })
        })
    }
}
