//! Ancestor Consistency Pass
//!
//! Emitted selectors match class attributes exactly, so a rule for
//! `h1.pageTitle` and a rule for `div.titleBar h1.pageTitle` can land on the
//! same element. The tree walk only compares entries filed under the same
//! ref; this pass compares every ref against each longer ref ending in it.

use log::debug;
use rustc_hash::FxHashMap;

use crate::error::StyleResult;
use crate::table::{StyleRef, StyleTable};
use crate::validator::check_overrides;

/// Index from a right-aligned sub-path to the longer refs that end in it
#[derive(Debug, Default)]
pub struct SuffixIndex<'a> {
    by_suffix: FxHashMap<StyleRef, Vec<&'a StyleRef>>,
}

impl<'a> SuffixIndex<'a> {
    /// Index every proper suffix of every ref in `table`
    pub fn build(table: &'a StyleTable) -> Self {
        let mut by_suffix: FxHashMap<StyleRef, Vec<&'a StyleRef>> = FxHashMap::default();

        for style_ref in table.refs() {
            for suffix in style_ref.proper_suffixes() {
                by_suffix.entry(suffix).or_default().push(style_ref);
            }
        }

        Self { by_suffix }
    }

    /// Refs longer than `suffix` that end in it, in table order
    pub fn extending(&self, suffix: &StyleRef) -> &[&'a StyleRef] {
        self.by_suffix.get(suffix).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Check every ref's entries against each longer ref sharing its suffix
pub fn check_table(table: &StyleTable) -> StyleResult<()> {
    let index = SuffixIndex::build(table);
    let mut comparisons = 0usize;

    for (short_ref, short_entries) in table.iter() {
        for long_ref in index.extending(short_ref) {
            let Some(long_entries) = table.get(long_ref) else {
                continue;
            };

            for existing in long_entries.iter() {
                for accumulated in short_entries.iter() {
                    comparisons += 1;
                    check_overrides(long_ref, accumulated, existing)?;
                }
            }
        }
    }

    debug!("consistency pass: {} refs, {} comparisons", table.len(), comparisons);
    Ok(())
}
