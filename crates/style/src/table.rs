//! Style table
//!
//! The compiled form of a style forest: every fully-qualified ref mapped to
//! the declaration blocks filed under it, in first-insertion order.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;

use immutable_styles_css::{Breakpoint, DeclarationBlock, Fragment};

use crate::error::SourceLocation;

/// Root-to-node path of fragments identifying one selector
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleRef {
    fragments: SmallVec<[Fragment; 4]>,
}

impl StyleRef {
    /// Ref of a top-level node
    pub fn root(fragment: Fragment) -> Self {
        let mut fragments = SmallVec::new();
        fragments.push(fragment);
        Self { fragments }
    }

    pub fn from_fragments(fragments: impl IntoIterator<Item = Fragment>) -> Self {
        Self { fragments: fragments.into_iter().collect() }
    }

    /// Ref of a child of this ref
    pub fn child(&self, fragment: Fragment) -> Self {
        let mut fragments = self.fragments.clone();
        fragments.push(fragment);
        Self { fragments }
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Whether the first fragment is `fragment`
    pub fn starts_with(&self, fragment: &Fragment) -> bool {
        self.fragments.first() == Some(fragment)
    }

    /// This ref with its first fragment replaced by `fragment`
    pub fn rebase(&self, fragment: Fragment) -> Self {
        let mut fragments = self.fragments.clone();
        if let Some(first) = fragments.first_mut() {
            *first = fragment;
        }
        Self { fragments }
    }

    /// Right-aligned sub-paths shorter than the whole ref, shortest first
    pub fn proper_suffixes(&self) -> impl Iterator<Item = StyleRef> + '_ {
        (1..self.fragments.len())
            .rev()
            .map(move |start| StyleRef::from_fragments(self.fragments[start..].iter().cloned()))
    }
}

impl fmt::Display for StyleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fragment) in self.fragments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", fragment)?;
        }
        Ok(())
    }
}

/// One declaration block filed under a ref, scoped to a breakpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry {
    pub declarations: DeclarationBlock,
    pub breakpoint: Breakpoint,
    pub source: Option<SourceLocation>,
}

impl StyleEntry {
    pub fn new(declarations: DeclarationBlock, breakpoint: Breakpoint, source: Option<SourceLocation>) -> Self {
        Self { declarations, breakpoint, source }
    }
}

/// Every entry filed under one ref
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryList {
    entries: Vec<StyleEntry>,
    cloned: bool,
}

impl EntryList {
    pub fn new(entry: StyleEntry) -> Self {
        Self { entries: vec![entry], cloned: false }
    }

    /// Deep copy of this list, marked as cloned from a base class
    pub fn clone_from_base(&self) -> Self {
        Self { entries: self.entries.clone(), cloned: true }
    }

    /// Whether the entries came from a base class and may absorb a
    /// same-range override
    pub fn is_cloned(&self) -> bool {
        self.cloned
    }

    pub fn entries(&self) -> &[StyleEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry scoped to exactly `breakpoint`
    pub fn find_range_mut(&mut self, breakpoint: &Breakpoint) -> Option<&mut StyleEntry> {
        self.entries.iter_mut().find(|e| e.breakpoint == *breakpoint)
    }

    pub fn push(&mut self, entry: StyleEntry) {
        self.entries.push(entry);
    }
}

/// Ref to entries table, iterated in first-insertion order
#[derive(Debug, Default)]
pub struct StyleTable {
    refs: Vec<(StyleRef, EntryList)>,
    index: FxHashMap<StyleRef, usize>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn contains(&self, style_ref: &StyleRef) -> bool {
        self.index.contains_key(style_ref)
    }

    pub fn get(&self, style_ref: &StyleRef) -> Option<&EntryList> {
        self.index.get(style_ref).map(|&i| &self.refs[i].1)
    }

    pub fn get_mut(&mut self, style_ref: &StyleRef) -> Option<&mut EntryList> {
        let i = *self.index.get(style_ref)?;
        Some(&mut self.refs[i].1)
    }

    /// Insert entries under a new ref; an existing ref keeps its position
    pub fn insert(&mut self, style_ref: StyleRef, entries: EntryList) {
        match self.index.get(&style_ref) {
            Some(&i) => self.refs[i].1 = entries,
            None => {
                self.index.insert(style_ref.clone(), self.refs.len());
                self.refs.push((style_ref, entries));
            }
        }
    }

    /// Refs and their entries in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&StyleRef, &EntryList)> {
        self.refs.iter().map(|(r, e)| (r, e))
    }

    pub fn refs(&self) -> impl Iterator<Item = &StyleRef> {
        self.refs.iter().map(|(r, _)| r)
    }

    /// Drop every ref
    pub fn clear(&mut self) {
        self.refs.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(fragments: &[Fragment]) -> StyleRef {
        StyleRef::from_fragments(fragments.iter().cloned())
    }

    fn entry(text: &str) -> StyleEntry {
        StyleEntry::new(DeclarationBlock::parse(text).unwrap(), Breakpoint::UNBOUNDED, None)
    }

    #[test]
    fn test_ref_display() {
        let r = StyleRef::root(Fragment::with_class("div", "titleBar")).child(Fragment::element("h1"));
        assert_eq!(r.to_string(), "div.titleBar h1");
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn test_proper_suffixes() {
        let a = Fragment::element("a");
        let b = Fragment::element("b");
        let c = Fragment::element("c");
        let r = path(&[a.clone(), b.clone(), c.clone()]);

        let suffixes: Vec<_> = r.proper_suffixes().collect();
        assert_eq!(suffixes, vec![path(&[c.clone()]), path(&[b, c])]);
        assert_eq!(StyleRef::root(a).proper_suffixes().count(), 0);
    }

    #[test]
    fn test_rebase() {
        let base = Fragment::with_class("div", "card");
        let sub = Fragment::with_class("div", "card.wide");
        let r = StyleRef::root(base.clone()).child(Fragment::element("p"));

        assert!(r.starts_with(&base));
        assert_eq!(r.rebase(sub).to_string(), "div.card.wide p");
    }

    #[test]
    fn test_insertion_order() {
        let mut table = StyleTable::new();
        let first = StyleRef::root(Fragment::element("b"));
        let second = StyleRef::root(Fragment::element("a"));
        table.insert(first.clone(), EntryList::new(entry("color: red;")));
        table.insert(second.clone(), EntryList::new(entry("color: blue;")));
        table.insert(first.clone(), EntryList::new(entry("color: green;")));

        let refs: Vec<_> = table.refs().cloned().collect();
        assert_eq!(refs, vec![first.clone(), second]);
        assert_eq!(
            table.get(&first).unwrap().entries()[0].declarations.get("color").unwrap().value,
            "green"
        );
    }

    #[test]
    fn test_clone_from_base_is_deep() {
        let original = EntryList::new(entry("color: red;"));
        let mut cloned = original.clone_from_base();
        assert!(cloned.is_cloned());
        assert!(!original.is_cloned());

        let target = cloned.find_range_mut(&Breakpoint::UNBOUNDED).unwrap();
        target.declarations.merge_from(&DeclarationBlock::parse("color: blue;").unwrap());

        assert_eq!(original.entries()[0].declarations.get("color").unwrap().value, "red");
    }

    #[test]
    fn test_clear() {
        let mut table = StyleTable::new();
        table.insert(StyleRef::root(Fragment::element("p")), EntryList::new(entry("color: red;")));
        table.clear();
        assert!(table.is_empty());
        assert!(!table.contains(&StyleRef::root(Fragment::element("p"))));
    }
}
