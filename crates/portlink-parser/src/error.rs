//! Error and diagnostic system for the Portlink parser.
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single problem with a reference token: an optional error code, labeled
//! spans into the token, and help text. Diagnostics are wrapped in
//! [`ParseError`] when returned from [`parse_reference`](crate::parse_reference).
//!
//! # Example
//!
//! ```
//! # use portlink_parser::error::{Diagnostic, ErrorCode};
//! # use portlink_parser::Span;
//!
//! let diag = Diagnostic::error("source `Mixer` must specify a port")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(0..5), "no port given")
//!     .with_help("write the source as `Mixer::<port>`");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
