//! Compiler context
//!
//! Owns the style table for one compilation. `compile` clears the table,
//! assembles every tree, runs the consistency pass and emits the stylesheet;
//! any failure aborts the whole run and is handed to the diagnostic sink.

use log::debug;

use crate::assembler::assemble;
use crate::consistency::check_table;
use crate::emitter::emit_css;
use crate::error::{StyleError, StyleResult};
use crate::node::StyleNode;
use crate::table::StyleTable;

/// Receives every compilation failure before it is returned
pub trait DiagnosticSink {
    fn report(&mut self, error: &StyleError);
}

/// Sink that discards diagnostics
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _error: &StyleError) {}
}

impl DiagnosticSink for Vec<StyleError> {
    fn report(&mut self, error: &StyleError) {
        self.push(error.clone());
    }
}

/// Single-threaded compiler over one style table
#[derive(Debug, Default)]
pub struct Compiler<S: DiagnosticSink = NullSink> {
    table: StyleTable,
    sink: S,
}

impl Compiler<NullSink> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: DiagnosticSink> Compiler<S> {
    /// Create a compiler reporting failures to `sink`
    pub fn with_sink(sink: S) -> Self {
        Self { table: StyleTable::new(), sink }
    }

    /// Drop everything compiled so far
    pub fn reset(&mut self) {
        self.table.clear();
    }

    /// Table built by the last compilation
    pub fn table(&self) -> &StyleTable {
        &self.table
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Compile a forest of independent top-level trees into one stylesheet
    pub fn compile<'n, I>(&mut self, forest: I) -> StyleResult<String>
    where
        I: IntoIterator<Item = &'n StyleNode>,
    {
        self.reset();

        match self.run(forest) {
            Ok(css) => Ok(css),
            Err(err) => {
                self.sink.report(&err);
                Err(err)
            }
        }
    }

    /// Compile a single tree
    pub fn compile_node(&mut self, node: &StyleNode) -> StyleResult<String> {
        self.compile(std::iter::once(node))
    }

    fn run<'n, I>(&mut self, forest: I) -> StyleResult<String>
    where
        I: IntoIterator<Item = &'n StyleNode>,
    {
        let mut trees = 0usize;
        for node in forest {
            assemble(&mut self.table, node, None, None)?;
            trees += 1;
        }
        debug!("assembled {} trees into {} refs", trees, self.table.len());

        check_table(&self.table)?;
        Ok(emit_css(&self.table))
    }
}

/// Compile `forest` with a fresh compiler
pub fn compile<'n, I>(forest: I) -> StyleResult<String>
where
    I: IntoIterator<Item = &'n StyleNode>,
{
    Compiler::new().compile(forest)
}
