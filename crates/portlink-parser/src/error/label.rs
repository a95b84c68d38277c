//! Labeled source spans for diagnostic messages.
//!
//! A label associates a message with a span of a reference token,
//! pointing at the part of the token that caused an error.

use crate::span::Span;

/// A labeled span in a reference token.
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
}

impl Label {
    /// Create a new label.
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        let label = Label::new(Span::new(0..2), "module name expected");

        assert_eq!(label.span().start(), 0);
        assert_eq!(label.span().end(), 2);
        assert_eq!(label.message(), "module name expected");
    }
}
