//! Error codes for the Portlink diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Reference syntax errors
//! - `E1xx` - Reference usage errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E0xx)
    // =========================================================================
    /// Empty reference.
    ///
    /// The reference token contains no characters at all.
    E001,

    /// Missing module name.
    ///
    /// The token starts with the `::` separator, so nothing names the module.
    E002,

    // =========================================================================
    // Usage Errors (E1xx)
    // =========================================================================
    /// Missing source port.
    ///
    /// A link source names only a module; links start at a specific port.
    E100,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "empty reference",
            ErrorCode::E002 => "missing module name",
            ErrorCode::E100 => "missing source port",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "empty reference");
        assert_eq!(ErrorCode::E002.description(), "missing module name");
        assert_eq!(ErrorCode::E100.description(), "missing source port");
    }
}
