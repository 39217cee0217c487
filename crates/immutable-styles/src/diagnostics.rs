//! Diagnostics
//!
//! Keeps the text of every loaded document so compilation failures can be
//! printed with the offending source line.

use rustc_hash::FxHashMap;

use immutable_styles_style::{DiagnosticSink, SourceLocation, StyleError};

/// Original document text keyed by file path
#[derive(Debug, Default)]
pub struct SourceMaps {
    files: FxHashMap<String, String>,
}

impl SourceMaps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }

    /// Source line a location points at
    pub fn line(&self, location: &SourceLocation) -> Option<&str> {
        let index = location.line.checked_sub(1)?;
        self.files
            .get(&location.file)?
            .lines()
            .nth(index as usize)
    }
}

/// Render an error with a code frame for each location it names
pub fn render(error: &StyleError, maps: &SourceMaps) -> String {
    let mut out = error.to_string();

    if let Some(location) = error.location() {
        push_frame(&mut out, "-->", location, maps);
    }
    if let Some(related) = error.related_location().filter(|r| Some(*r) != error.location()) {
        push_frame(&mut out, "previously declared at", related, maps);
    }

    out
}

fn push_frame(out: &mut String, label: &str, location: &SourceLocation, maps: &SourceMaps) {
    out.push_str(&format!("\n  {} {}", label, location));

    if let Some(line) = maps.line(location) {
        let gutter = location.line.to_string();
        out.push_str(&format!("\n  {} | {}", gutter, line));
        if location.column > 0 {
            let pad = " ".repeat(gutter.len() + 2 + location.column as usize);
            out.push_str(&format!("\n  {}^", pad));
        }
    }
}

/// Sink logging every failure through `log::error!`
#[derive(Debug, Default)]
pub struct LogSink {
    pub source_maps: SourceMaps,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticSink for LogSink {
    fn report(&mut self, error: &StyleError) {
        log::error!("{}", render(error, &self.source_maps));
    }
}
