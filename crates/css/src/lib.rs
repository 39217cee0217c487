//! Immutable Styles CSS primitives
//!
//! Declaration tokenizing and parsing, property tables, breakpoint ranges
//! and selector rendering used by the style compiler.

pub mod error;
pub mod media;
pub mod parser;
pub mod properties;
pub mod selector;
pub mod tokenizer;

pub use error::{CssError, CssResult, SourcePosition};
pub use media::Breakpoint;
pub use parser::{Declaration, DeclarationBlock, DeclarationParser};
pub use properties::{allowed_elements, element_can_use, longhands_of, overrides};
pub use selector::{Fragment, Selector, SelectorPart};
pub use tokenizer::{Token, Tokenizer};
