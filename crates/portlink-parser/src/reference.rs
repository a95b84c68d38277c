//! The decomposed form of a reference token.

use std::fmt;

use portlink_core::PortRef;

/// A parsed reference token: module, port and type.
///
/// Port and type are empty when the token did not mention them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reference {
    module: String,
    port: String,
    type_name: String,
}

impl Reference {
    /// Creates a reference from already-bounded components.
    pub fn new(
        module: impl Into<String>,
        port: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            port: port.into(),
            type_name: type_name.into(),
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns `true` if the token named a port.
    pub fn has_port(&self) -> bool {
        !self.port.is_empty()
    }

    /// Returns `true` if the token carried a type.
    pub fn has_type(&self) -> bool {
        !self.type_name.is_empty()
    }

    /// Replaces the port name.
    pub fn set_port(&mut self, port: impl Into<String>) {
        self.port = port.into();
    }

    /// Replaces the type label.
    pub fn set_type(&mut self, type_name: impl Into<String>) {
        self.type_name = type_name.into();
    }

    /// Returns the `(module, port)` half of this reference.
    pub fn port_ref(&self) -> PortRef {
        PortRef::new(&self.module, &self.port)
    }
}

impl fmt::Display for Reference {
    /// Formats as `Module::Port:Type`, dropping the parts that are empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.module)?;
        if self.has_port() || self.has_type() {
            write!(f, "::{}", self.port)?;
        }
        if self.has_type() {
            write!(f, ":{}", self.type_name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_drops_empty_parts() {
        assert_eq!(Reference::new("A", "", "").to_string(), "A");
        assert_eq!(Reference::new("A", "p", "").to_string(), "A::p");
        assert_eq!(Reference::new("A", "p", "int").to_string(), "A::p:int");
    }

    #[test]
    fn test_port_ref() {
        let reference = Reference::new("A", "p", "int");
        assert_eq!(reference.port_ref(), PortRef::new("A", "p"));
    }
}
