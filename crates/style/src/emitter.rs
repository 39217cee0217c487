//! CSS Emitter
//!
//! Serializes the style table in ref/entry order. Entries with a bounded
//! breakpoint are wrapped in their own `@media` block.

use log::debug;

use immutable_styles_css::{Declaration, Selector};

use crate::table::{StyleEntry, StyleTable};

const INDENT: &str = "  ";

/// Render the whole table as stylesheet text
pub fn emit_css(table: &StyleTable) -> String {
    let mut out = String::new();
    let mut rules = 0usize;

    for (style_ref, entries) in table.iter() {
        let selector = Selector::from_path(style_ref.fragments()).to_string();

        for entry in entries.iter().filter(|e| !e.declarations.is_empty()) {
            emit_entry(&selector, entry, &mut out);
            rules += 1;
        }
    }

    debug!("emitted {} rules for {} refs", rules, table.len());
    out
}

fn emit_entry(selector: &str, entry: &StyleEntry, out: &mut String) {
    match entry.breakpoint.media_query() {
        None => emit_rule(selector, entry, 0, out),
        Some(query) => {
            out.push_str("@media ");
            out.push_str(&query);
            out.push_str(" {\n");
            emit_rule(selector, entry, 1, out);
            out.push_str("}\n");
        }
    }
}

fn emit_rule(selector: &str, entry: &StyleEntry, depth: usize, out: &mut String) {
    let indent = INDENT.repeat(depth);

    out.push_str(&indent);
    out.push_str(selector);
    out.push_str(" {\n");

    for declaration in entry.declarations.iter() {
        emit_declaration(declaration, depth + 1, out);
    }

    out.push_str(&indent);
    out.push_str("}\n");
}

fn emit_declaration(declaration: &Declaration, depth: usize, out: &mut String) {
    out.push_str(&INDENT.repeat(depth));
    out.push_str(&declaration.to_string());
    out.push('\n');
}
