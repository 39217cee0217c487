//! Immutable Styles compiler
//!
//! Compiles trees of style nodes into a stylesheet in which no property is
//! ever assigned twice to the same selector at an overlapping breakpoint.
//!
//! ```ignore
//! use immutable_styles_style::{compile, style, Attrs};
//!
//! let forest = [
//!     style!("h1", Attrs::new().class("pageTitle"), "font-size: 30px;"),
//!     style!("div", Attrs::new().class("titleBar"), "display: flex;",
//!         style!("span", Attrs::new(), "color: grey;")),
//! ];
//! let css = compile(&forest)?;
//! ```

pub mod assembler;
pub mod compiler;
pub mod consistency;
pub mod emitter;
pub mod error;
pub mod inheritance;
pub mod node;
pub mod table;
pub mod validator;

pub use compiler::{compile, Compiler, DiagnosticSink, NullSink};
pub use emitter::emit_css;
pub use error::{ErrorKind, SourceLocation, StyleError, StyleResult};
pub use node::{AttrValue, Attrs, Item, StyleNode, ALLOWED_ATTRIBUTES};
pub use table::{EntryList, StyleEntry, StyleRef, StyleTable};
