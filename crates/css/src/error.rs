//! Declaration parsing error types

use std::fmt;
use thiserror::Error;

/// Declaration parsing result type
pub type CssResult<T> = Result<T, CssError>;

/// Position inside a declaration block's text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourcePosition {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Byte offset from start
    pub offset: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Declaration block errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CssError {
    #[error("The CSS property `{property}` is defined twice")]
    DuplicateProperty { property: String },

    #[error("The property `{property}` is overridden by `{overridden_by}`")]
    PartialOverride {
        property: String,
        overridden_by: String,
    },

    #[error("Malformed declaration `{text}` at {position}")]
    MalformedDeclaration {
        text: String,
        position: SourcePosition,
    },

    #[error("Unterminated {what} at {position}")]
    Unterminated {
        what: &'static str,
        position: SourcePosition,
    },
}

impl CssError {
    pub fn duplicate_property(property: impl Into<String>) -> Self {
        Self::DuplicateProperty { property: property.into() }
    }

    pub fn partial_override(property: impl Into<String>, overridden_by: impl Into<String>) -> Self {
        Self::PartialOverride {
            property: property.into(),
            overridden_by: overridden_by.into(),
        }
    }

    pub fn malformed(text: impl Into<String>, position: SourcePosition) -> Self {
        Self::MalformedDeclaration { text: text.into(), position }
    }
}
