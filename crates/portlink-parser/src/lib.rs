//! # Portlink Parser
//!
//! Parser for Portlink reference tokens, the command-line strings that name
//! a module, a port and a port type.
//!
//! ## Usage
//!
//! ```
//! # use portlink_parser::{parse_reference, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = parse_reference("Oscillator::out:audio")?;
//!     let dest = parse_reference("Mixer")?;
//!
//!     assert_eq!(source.port(), "out");
//!     assert!(!dest.has_port());
//!     Ok(())
//! }
//! ```

pub mod error;

mod parser;
#[cfg(test)]
mod parser_tests;
mod reference;
mod span;

pub use parser::{MODULE_SEPARATOR, TYPE_SEPARATOR, parse_reference};
pub use reference::Reference;
pub use span::Span;
