//! Tests for reference token parsing.
//!
//! These tests cover the accepted token shapes, the diagnostics raised for
//! tokens without a module name, and field truncation.

use portlink_core::field::MAX_FIELD_LEN;

use crate::{error::ErrorCode, parse_reference};

/// Helper to parse a token and return its three components
fn components(token: &str) -> (String, String, String) {
    let reference = parse_reference(token)
        .unwrap_or_else(|err| panic!("Expected `{token}` to parse, got: {err}"));
    (
        reference.module().to_owned(),
        reference.port().to_owned(),
        reference.type_name().to_owned(),
    )
}

/// Helper to parse a token and return the code of its diagnostic
fn error_code(token: &str) -> Option<ErrorCode> {
    let err = parse_reference(token).expect_err("Expected parsing to fail");
    err.diagnostic().code()
}

#[cfg(test)]
mod shape_tests {
    use super::*;

    #[test]
    fn test_module_port_and_type() {
        assert_eq!(
            components("Mod::Port:Type"),
            ("Mod".into(), "Port".into(), "Type".into())
        );
    }

    #[test]
    fn test_module_and_port() {
        assert_eq!(
            components("Mod::Port"),
            ("Mod".into(), "Port".into(), String::new())
        );
    }

    #[test]
    fn test_module_only() {
        assert_eq!(
            components("Mod"),
            ("Mod".into(), String::new(), String::new())
        );
    }

    #[test]
    fn test_type_without_port() {
        assert_eq!(
            components("Mod:::int"),
            ("Mod".into(), String::new(), "int".into())
        );
    }

    #[test]
    fn test_names_keep_case_and_spaces() {
        assert_eq!(
            components("My Mod::In Port:Int"),
            ("My Mod".into(), "In Port".into(), "Int".into())
        );
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_empty_token_fails() {
        assert_eq!(error_code(""), Some(ErrorCode::E001));
    }

    #[test]
    fn test_missing_module_fails() {
        assert_eq!(error_code("::port"), Some(ErrorCode::E002));
        assert_eq!(error_code("::"), Some(ErrorCode::E002));
    }

    #[test]
    fn test_missing_module_label_covers_separator() {
        let err = parse_reference("::port:int").unwrap_err();
        let label = &err.diagnostic().labels()[0];

        assert_eq!(label.span().start(), 0);
        assert_eq!(label.span().end(), 2);
    }

    #[test]
    fn test_error_message_mentions_token() {
        let err = parse_reference("::out").unwrap_err();
        assert_eq!(
            err.to_string(),
            "error[E002]: reference `::out` has no module name"
        );
    }
}

#[cfg(test)]
mod truncation_tests {
    use super::*;

    #[test]
    fn test_each_field_is_truncated() {
        let long = "x".repeat(MAX_FIELD_LEN + 20);
        let token = format!("{long}::{long}:{long}");

        let (module, port, type_name) = components(&token);
        assert_eq!(module.len(), MAX_FIELD_LEN);
        assert_eq!(port.len(), MAX_FIELD_LEN);
        assert_eq!(type_name.len(), MAX_FIELD_LEN);
    }

    #[test]
    fn test_unqualified_module_is_truncated() {
        let long = "m".repeat(MAX_FIELD_LEN * 3);
        let (module, port, _) = components(&long);

        assert_eq!(module, "m".repeat(MAX_FIELD_LEN));
        assert!(port.is_empty());
    }
}

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn prop_qualified_tokens_decompose(
            module in "[A-Za-z0-9_ .-]{1,20}",
            port in "[A-Za-z0-9_ .-]{0,20}",
            type_name in "[A-Za-z0-9_<>]{1,20}",
        ) {
            let token = format!("{module}::{port}:{type_name}");
            prop_assert_eq!(components(&token), (module, port, type_name));
        }

        #[test]
        fn prop_tokens_without_separator_are_modules(module in "[^:]{1,40}") {
            let (parsed, port, type_name) = components(&module);
            prop_assert_eq!(parsed, module);
            prop_assert!(port.is_empty());
            prop_assert!(type_name.is_empty());
        }
    }
}
