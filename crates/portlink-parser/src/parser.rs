//! Parser for reference tokens.
//!
//! A reference token names a module, optionally one of its ports, and
//! optionally a type label for that port:
//!
//! ```text
//! Module
//! Module::Port
//! Module::Port:Type
//! ```
//!
//! The token is split at the first `::` into module and remainder, and the
//! remainder at its first `:` into port and type. The public entry point is
//! [`parse_reference`].

use log::{debug, trace};
use winnow::{
    Parser as _,
    combinator::{alt, opt, preceded, terminated},
    error::{ContextError, ErrMode},
    token::{rest, take_until},
};

use portlink_core::field;

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    reference::Reference,
    span::Span,
};

/// Separator between the module name and the rest of the token.
pub const MODULE_SEPARATOR: &str = "::";
/// Separator between the port name and its type.
pub const TYPE_SEPARATOR: &str = ":";

type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

const REFERENCE_HELP: &str = "write references as `Module`, `Module::Port` or `Module::Port:Type`";

/// Token components before any length bounds are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawReference<'src> {
    module: &'src str,
    port: &'src str,
    type_name: &'src str,
}

/// Parse the module name, if the token is qualified with `::`.
fn qualified_module<'src>(input: &mut &'src str) -> IResult<Option<&'src str>> {
    opt(terminated(
        take_until(0.., MODULE_SEPARATOR),
        MODULE_SEPARATOR,
    ))
    .parse_next(input)
}

/// Parse `port` or `port:type` from the remainder of a qualified token.
fn port_and_type<'src>(input: &mut &'src str) -> IResult<(&'src str, &'src str)> {
    alt((
        (
            take_until(0.., TYPE_SEPARATOR),
            preceded(TYPE_SEPARATOR, rest),
        ),
        rest.map(|port| (port, "")),
    ))
    .parse_next(input)
}

/// Parse a whole reference token.
///
/// A token that starts with `::` names no module and is rejected.
fn raw_reference<'src>(input: &mut &'src str) -> IResult<RawReference<'src>> {
    match qualified_module.parse_next(input)? {
        Some("") => Err(ErrMode::Cut(ContextError::new())),
        Some(module) => {
            let (port, type_name) = port_and_type.parse_next(input)?;
            Ok(RawReference {
                module,
                port,
                type_name,
            })
        }
        None => {
            let module = rest.parse_next(input)?;
            Ok(RawReference {
                module,
                port: "",
                type_name: "",
            })
        }
    }
}

/// Decompose a reference token into module, port and type.
///
/// Port and type are empty when the token does not mention them; no default
/// type is substituted here. Each component is cut down to
/// [`MAX_FIELD_LEN`](portlink_core::field::MAX_FIELD_LEN) characters.
///
/// # Errors
///
/// Returns a [`ParseError`] when no module name can be derived: the token is
/// empty (`E001`) or starts with `::` (`E002`).
///
/// # Examples
///
/// ```
/// use portlink_parser::parse_reference;
///
/// let reference = parse_reference("Mod::Port:Type").unwrap();
/// assert_eq!(reference.module(), "Mod");
/// assert_eq!(reference.port(), "Port");
/// assert_eq!(reference.type_name(), "Type");
///
/// let reference = parse_reference("Mod").unwrap();
/// assert!(!reference.has_port());
///
/// assert!(parse_reference("").is_err());
/// ```
pub fn parse_reference(token: &str) -> Result<Reference, ParseError> {
    if token.is_empty() {
        return Err(Diagnostic::error("reference is empty")
            .with_code(ErrorCode::E001)
            .with_label(Span::new(0..0), "expected a module name")
            .with_help(REFERENCE_HELP)
            .into());
    }

    let mut input = token;
    let raw = raw_reference.parse_next(&mut input).map_err(|err| {
        debug!(token = token, err:? = err; "Reference grammar rejected token");
        Diagnostic::error(format!("reference `{token}` has no module name"))
            .with_code(ErrorCode::E002)
            .with_label(
                Span::new(0..MODULE_SEPARATOR.len()),
                "module name expected before `::`",
            )
            .with_help(REFERENCE_HELP)
    })?;
    trace!(raw:? = raw; "Split reference token");

    Ok(Reference::new(
        field::bounded("module", raw.module),
        field::bounded("port", raw.port),
        field::bounded("type", raw.type_name),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(token: &str) -> RawReference<'_> {
        let mut input = token;
        let raw = raw_reference
            .parse_next(&mut input)
            .expect("token should have a module name");
        assert!(input.is_empty(), "grammar should consume `{token}`");
        raw
    }

    #[test]
    fn test_raw_module_only() {
        assert_eq!(
            raw("Mod"),
            RawReference {
                module: "Mod",
                port: "",
                type_name: ""
            }
        );
    }

    #[test]
    fn test_raw_single_colon_stays_in_module() {
        assert_eq!(raw("Mod:Port").module, "Mod:Port");
        assert_eq!(raw("Mod:Port").port, "");
    }

    #[test]
    fn test_raw_splits_at_first_separators() {
        let parsed = raw("A::B::C");
        assert_eq!(parsed.module, "A");
        assert_eq!(parsed.port, "B");
        assert_eq!(parsed.type_name, ":C");

        let parsed = raw("A::p:t:u");
        assert_eq!(parsed.port, "p");
        assert_eq!(parsed.type_name, "t:u");
    }

    #[test]
    fn test_raw_trailing_separators() {
        let parsed = raw("A::");
        assert_eq!((parsed.module, parsed.port, parsed.type_name), ("A", "", ""));

        let parsed = raw("A::p:");
        assert_eq!((parsed.module, parsed.port, parsed.type_name), ("A", "p", ""));

        let parsed = raw("A:::t");
        assert_eq!((parsed.module, parsed.port, parsed.type_name), ("A", "", "t"));
    }

    #[test]
    fn test_raw_rejects_missing_module() {
        for token in ["::", "::p", "::p:t", ":::t"] {
            let mut input = token;
            assert!(
                matches!(raw_reference.parse_next(&mut input), Err(ErrMode::Cut(_))),
                "`{token}` should be rejected"
            );
        }
    }
}
