//! Plain-text views of the store for terminal output.

use std::fmt;

use portlink_core::{Direction, Module, Store};

const RULE: &str = "----------------------------------------------------";
const NO_DESTINATION: &str = "--";

/// Port table for one module, as printed by `list`.
///
/// ```text
/// Module: Osc
/// ----------------------------------------------------
/// Port            | Type       | Dir   | Destination
/// ----------------------------------------------------
/// out             | audio      | out   | Mixer::in1
/// ```
pub struct ModuleTable<'a> {
    module: &'a Module,
}

impl<'a> ModuleTable<'a> {
    pub fn new(module: &'a Module) -> Self {
        Self { module }
    }
}

impl fmt::Display for ModuleTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Module: {}", self.module.name())?;
        writeln!(f, "{RULE}")?;
        write_row(f, "Port", "Type", "Dir", "Destination")?;
        writeln!(f, "{RULE}")?;

        for port in self.module.ports() {
            let destination = port
                .live_destination()
                .map_or_else(|| NO_DESTINATION.to_owned(), ToString::to_string);
            write_row(
                f,
                port.name(),
                port.type_name(),
                port.direction().as_str(),
                &destination,
            )?;
        }
        Ok(())
    }
}

fn write_row(
    f: &mut fmt::Formatter<'_>,
    port: &str,
    type_name: &str,
    direction: &str,
    destination: &str,
) -> fmt::Result {
    writeln!(f, "{port:<15} | {type_name:<10} | {direction:<5} | {destination}")
}

/// Looks up `name` and returns its port table, or `None` if there is no
/// such module.
pub fn module_table<'a>(store: &'a Store, name: &str) -> Option<ModuleTable<'a>> {
    store.module(name).map(ModuleTable::new)
}

/// Text diagram of every module and its connected ports, as printed by
/// `draw`.
///
/// Ports with no direction are left out.
pub struct TextDiagram<'a> {
    store: &'a Store,
}

impl<'a> TextDiagram<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }
}

impl fmt::Display for TextDiagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "--- System Diagram ---")?;

        for module in self.store.modules() {
            writeln!(f, "[{}]", module.name())?;
            for port in module.ports() {
                match port.direction() {
                    Direction::In => {
                        writeln!(f, "  -> (IN)  {} ({})", port.name(), port.type_name())?;
                    }
                    Direction::Out => {
                        write!(f, "  <- (OUT) {} ({})", port.name(), port.type_name())?;
                        match port.destination() {
                            Some(destination) => writeln!(f, " -> [{destination}]")?,
                            None => writeln!(f)?,
                        }
                    }
                    Direction::None => {}
                }
            }
        }
        Ok(())
    }
}
