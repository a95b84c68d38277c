//! Graphviz DOT backend.
//!
//! Each module becomes one `shape=plain` node whose HTML-like label is a
//! single table row: the module's input ports on the left, its name in the
//! middle, its output ports on the right. Every port cell carries a `port`
//! anchor, so each live link is drawn as an edge from the exact source port
//! (east side) to the exact destination port (west side).
//!
//! A module without input ports has no left column, and one without output
//! ports has no right column.

use std::fmt;

use quick_xml::escape::escape;

use portlink_core::{Direction, Module, Store};

use crate::config::StyleConfig;

/// DOT rendering of a store.
///
/// The rendering happens in [`fmt::Display`], so `to_string()` yields the
/// complete document.
///
/// # Examples
///
/// ```
/// use portlink::{LinkEditor, Store, config::StyleConfig, export::Dot};
///
/// let mut store = Store::new();
/// LinkEditor::new(&mut store).add("Osc::out", "Mixer::in1").unwrap();
///
/// let dot = Dot::new(&store, &StyleConfig::default()).to_string();
/// assert!(dot.starts_with("digraph G {"));
/// assert!(dot.contains(r#""Osc":"out":e -> "Mixer":"in1":w;"#));
/// ```
pub struct Dot<'a> {
    store: &'a Store,
    style: &'a StyleConfig,
}

impl<'a> Dot<'a> {
    /// Creates a DOT rendering of `store` using the graph attributes in `style`.
    pub fn new(store: &'a Store, style: &'a StyleConfig) -> Self {
        Self { store, style }
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let font = quote_id(self.style.font_name());
        let node_size = self.style.font_size();
        let edge_size = node_size.saturating_sub(2).max(1);

        writeln!(f, "digraph G {{")?;
        writeln!(f, "  rankdir={};", quote_id(self.style.rank_direction()))?;
        writeln!(f, "  splines=ortho;")?;
        writeln!(f, "  nodesep=0.8;")?;
        writeln!(f, "  ranksep=1.0;")?;
        writeln!(f, "  node [shape=plain, fontname={font}, fontsize={node_size}];")?;
        writeln!(f, "  edge [fontname={font}, fontsize={edge_size}];")?;
        writeln!(f)
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, module: &Module) -> fmt::Result {
        writeln!(f, "  {} [label=<", quote_id(module.name()))?;
        writeln!(
            f,
            r#"   <table border="0" cellborder="0" cellspacing="0" cellpadding="0">"#
        )?;
        writeln!(f, "     <tr>")?;

        write_port_column(f, module, Direction::In)?;

        writeln!(f, r##"       <td border="1" bgcolor="#f0f0f0">"##)?;
        writeln!(
            f,
            r#"         <table border="0" cellborder="0" cellspacing="0" cellpadding="8">"#
        )?;
        writeln!(f, "           <tr><td><b>{}</b></td></tr>", escape(module.name()))?;
        writeln!(f, "         </table>")?;
        writeln!(f, "       </td>")?;

        write_port_column(f, module, Direction::Out)?;

        writeln!(f, "     </tr>")?;
        writeln!(f, "   </table>>];")?;
        writeln!(f)
    }
}

impl fmt::Display for Dot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;

        for module in self.store.modules() {
            self.write_node(f, module)?;
        }

        writeln!(f)?;
        for link in self.store.links() {
            writeln!(
                f,
                "  {}:{}:e -> {}:{}:w;",
                quote_id(link.module.name()),
                quote_id(link.port.name()),
                quote_id(link.destination.module()),
                quote_id(link.destination.port()),
            )?;
        }

        writeln!(f, "}}")
    }
}

/// Writes the table cell listing `module`'s ports of one direction.
///
/// Nothing is written when the module has no such ports.
fn write_port_column(f: &mut fmt::Formatter<'_>, module: &Module, direction: Direction) -> fmt::Result {
    let mut ports = module
        .ports()
        .filter(|port| port.direction() == direction)
        .peekable();
    if ports.peek().is_none() {
        return Ok(());
    }

    writeln!(f, "       <td>")?;
    writeln!(
        f,
        r#"         <table border="0" cellborder="1" cellspacing="0" cellpadding="4">"#
    )?;
    for port in ports {
        let name = escape(port.name());
        writeln!(
            f,
            r##"           <tr><td port="{name}" bgcolor="#ffffff">{name}</td></tr>"##
        )?;
    }
    writeln!(f, "         </table>")?;
    writeln!(f, "       </td>")
}

/// Quotes `id` as a DOT string identifier.
///
/// Only `"` is an escape inside DOT strings, so everything else is kept
/// as is and a port name reads the same here as in its `port` anchor. A
/// backslash that would run into a quote is doubled.
fn quote_id(id: &str) -> String {
    let mut quoted = String::with_capacity(id.len() + 2);
    quoted.push('"');
    let mut chars = id.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' if matches!(chars.peek(), None | Some('"')) => quoted.push_str("\\\\"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}
