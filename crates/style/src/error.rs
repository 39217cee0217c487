//! Style compilation error types

use std::fmt;
use thiserror::Error;

use immutable_styles_css::{Breakpoint, CssError};

/// Style compilation result type
pub type StyleResult<T> = Result<T, StyleError>;

/// Where a style node was written. Opaque to the compiler, which only
/// carries it through to diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// Source file name
    pub file: String,
    /// Line number (1-indexed, 0 when unknown)
    pub line: u32,
    /// Column number (1-indexed, 0 when unknown)
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self { file: file.into(), line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (0, _) => write!(f, "{}", self.file),
            (line, 0) => write!(f, "{}:{}", self.file, line),
            (line, column) => write!(f, "{}:{}:{}", self.file, line, column),
        }
    }
}

/// Kind of a compilation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidAttribute,
    InvalidAttributeValue,
    NestedMediaQuery,
    UnknownBaseClass,
    NestedSubclass,
    DuplicateProperty,
    MalformedDeclaration,
    ElementPropertyMismatch,
    ExactOverrideFound,
    PartialOverrideFound,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidAttribute => "Invalid Attribute",
            ErrorKind::InvalidAttributeValue => "Invalid Attribute Value",
            ErrorKind::NestedMediaQuery => "Nested Media Query",
            ErrorKind::UnknownBaseClass => "Unknown Base Class",
            ErrorKind::NestedSubclass => "Nested Subclass",
            ErrorKind::DuplicateProperty => "Duplicate Property",
            ErrorKind::MalformedDeclaration => "Malformed Declaration",
            ErrorKind::ElementPropertyMismatch => "Element Property Mismatch",
            ErrorKind::ExactOverrideFound => "Override Found",
            ErrorKind::PartialOverrideFound => "Partial Override Found",
        };
        f.write_str(name)
    }
}

/// Style compilation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("[Invalid Attribute] `{attribute}` is not a valid attribute (expected one of: {})", .allowed.join(", "))]
    InvalidAttribute {
        attribute: String,
        allowed: &'static [&'static str],
        location: Option<SourceLocation>,
    },

    #[error("[Invalid Attribute Value] `{attribute}` {reason}")]
    InvalidAttributeValue {
        attribute: String,
        reason: String,
        location: Option<SourceLocation>,
    },

    #[error("[Nested Media Query] Nested media query found in `{scope_ref}` (scope {scope} redeclared by `{style_ref}`)")]
    NestedMediaQuery {
        style_ref: String,
        scope_ref: String,
        scope: Breakpoint,
        location: Option<SourceLocation>,
        scope_location: Option<SourceLocation>,
    },

    #[error("[Unknown Base Class] The base class `{base_ref}` does not exist")]
    UnknownBaseClass {
        base_ref: String,
        location: Option<SourceLocation>,
    },

    #[error("[Nested Subclass] Nested subclass `{class_name}` found in `{parent_ref}`")]
    NestedSubclass {
        class_name: String,
        parent_ref: String,
        location: Option<SourceLocation>,
    },

    #[error("[Duplicate Property] The CSS property `{property}` is defined twice by `{style_ref}`")]
    DuplicateProperty {
        style_ref: String,
        property: String,
        location: Option<SourceLocation>,
    },

    #[error("[Malformed Declaration] `{declaration}` in `{style_ref}` is not a `property: value` pair")]
    MalformedDeclaration {
        style_ref: String,
        declaration: String,
        location: Option<SourceLocation>,
    },

    #[error("[Element Property Mismatch] The HTML element `{element}` ({style_ref}) cannot use the property `{property}`")]
    ElementPropertyMismatch {
        style_ref: String,
        element: String,
        property: String,
        allowed: &'static [&'static str],
        location: Option<SourceLocation>,
    },

    #[error("[Override Found] The property `{property}` has already been defined (`{style_ref}`)")]
    ExactOverrideFound {
        style_ref: String,
        property: String,
        location: Option<SourceLocation>,
        existing: Option<SourceLocation>,
    },

    #[error("[Partial Override Found] The property `{property}` is overridden by `{overridden_by}` (`{style_ref}`)")]
    PartialOverrideFound {
        style_ref: String,
        property: String,
        overridden_by: String,
        location: Option<SourceLocation>,
        existing: Option<SourceLocation>,
    },
}

impl StyleError {
    /// Discriminant of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAttribute { .. } => ErrorKind::InvalidAttribute,
            Self::InvalidAttributeValue { .. } => ErrorKind::InvalidAttributeValue,
            Self::NestedMediaQuery { .. } => ErrorKind::NestedMediaQuery,
            Self::UnknownBaseClass { .. } => ErrorKind::UnknownBaseClass,
            Self::NestedSubclass { .. } => ErrorKind::NestedSubclass,
            Self::DuplicateProperty { .. } => ErrorKind::DuplicateProperty,
            Self::MalformedDeclaration { .. } => ErrorKind::MalformedDeclaration,
            Self::ElementPropertyMismatch { .. } => ErrorKind::ElementPropertyMismatch,
            Self::ExactOverrideFound { .. } => ErrorKind::ExactOverrideFound,
            Self::PartialOverrideFound { .. } => ErrorKind::PartialOverrideFound,
        }
    }

    /// Location of the node that triggered the error
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::InvalidAttribute { location, .. }
            | Self::InvalidAttributeValue { location, .. }
            | Self::NestedMediaQuery { location, .. }
            | Self::UnknownBaseClass { location, .. }
            | Self::NestedSubclass { location, .. }
            | Self::DuplicateProperty { location, .. }
            | Self::MalformedDeclaration { location, .. }
            | Self::ElementPropertyMismatch { location, .. }
            | Self::ExactOverrideFound { location, .. }
            | Self::PartialOverrideFound { location, .. } => location.as_ref(),
        }
    }

    /// Location of the earlier declaration the error collides with, if any
    pub fn related_location(&self) -> Option<&SourceLocation> {
        match self {
            Self::NestedMediaQuery { scope_location, .. } => scope_location.as_ref(),
            Self::ExactOverrideFound { existing, .. }
            | Self::PartialOverrideFound { existing, .. } => existing.as_ref(),
            _ => None,
        }
    }

    /// Attach ref and node location to a declaration parsing error
    pub fn from_css(err: CssError, style_ref: &str, location: Option<&SourceLocation>) -> Self {
        let location = location.cloned();
        match err {
            CssError::DuplicateProperty { property } => Self::DuplicateProperty {
                style_ref: style_ref.to_string(),
                property,
                location,
            },
            CssError::PartialOverride { property, overridden_by } => Self::PartialOverrideFound {
                style_ref: style_ref.to_string(),
                property,
                overridden_by,
                existing: location.clone(),
                location,
            },
            CssError::MalformedDeclaration { text, .. } => Self::MalformedDeclaration {
                style_ref: style_ref.to_string(),
                declaration: text,
                location,
            },
            err @ CssError::Unterminated { .. } => Self::MalformedDeclaration {
                style_ref: style_ref.to_string(),
                declaration: err.to_string(),
                location,
            },
        }
    }
}
