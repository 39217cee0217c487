//! Inheritance Resolver
//!
//! Single-level class inheritance: a top-level `div.base.sub` node starts
//! from a copy of everything filed under `div.base` and its descendants.

use log::trace;

use immutable_styles_css::Fragment;

use crate::error::{SourceLocation, StyleError, StyleResult};
use crate::table::{StyleRef, StyleTable};

/// Base fragment of `fragment` when it declares a subclass.
///
/// Subclasses are only allowed at the top of a tree and only one level
/// deep.
pub fn subclass_base(
    parent: Option<&StyleRef>,
    fragment: &Fragment,
    source: Option<&SourceLocation>,
) -> StyleResult<Option<Fragment>> {
    let (Some(class_name), Some((_, sub))) = (fragment.class.as_deref(), fragment.subclass()) else {
        return Ok(None);
    };

    if let Some(parent) = parent {
        return Err(StyleError::NestedSubclass {
            class_name: class_name.to_string(),
            parent_ref: parent.to_string(),
            location: source.cloned(),
        });
    }

    if sub.contains('.') {
        let enclosing = class_name.rsplit_once('.').map(|(outer, _)| outer.to_string());
        return Err(StyleError::NestedSubclass {
            class_name: class_name.to_string(),
            parent_ref: Fragment::new(fragment.element.clone(), enclosing, None).to_string(),
            location: source.cloned(),
        });
    }

    Ok(fragment.base())
}

/// Copy every ref rooted at `base` to the same path rooted at `target`.
/// Copies are deep and marked as cloned; refs already present under
/// `target` are left alone.
pub fn clone_base(
    table: &mut StyleTable,
    base: &Fragment,
    target: &Fragment,
    source: Option<&SourceLocation>,
) -> StyleResult<()> {
    let base_ref = StyleRef::root(base.clone());
    if !table.contains(&base_ref) {
        return Err(StyleError::UnknownBaseClass {
            base_ref: base_ref.to_string(),
            location: source.cloned(),
        });
    }

    let clones: Vec<_> = table
        .iter()
        .filter(|(style_ref, _)| style_ref.starts_with(base))
        .map(|(style_ref, entries)| (style_ref.rebase(target.clone()), entries.clone_from_base()))
        .collect();

    for (style_ref, entries) in clones {
        if table.contains(&style_ref) {
            continue;
        }
        trace!("cloned `{}` ({} entries)", style_ref, entries.len());
        table.insert(style_ref, entries);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::table::{EntryList, StyleEntry};
    use immutable_styles_css::{Breakpoint, DeclarationBlock};

    fn entries(text: &str) -> EntryList {
        EntryList::new(StyleEntry::new(
            DeclarationBlock::parse(text).unwrap(),
            Breakpoint::UNBOUNDED,
            None,
        ))
    }

    #[test]
    fn test_plain_class_not_subclass() {
        let fragment = Fragment::with_class("div", "card");
        assert_eq!(subclass_base(None, &fragment, None).unwrap(), None);
        assert_eq!(subclass_base(None, &Fragment::element("div"), None).unwrap(), None);
    }

    #[test]
    fn test_top_level_subclass() {
        let fragment = Fragment::with_class("div", "card.wide");
        assert_eq!(
            subclass_base(None, &fragment, None).unwrap(),
            Some(Fragment::with_class("div", "card"))
        );
    }

    #[test]
    fn test_nested_subclass() {
        let parent = StyleRef::root(Fragment::element("section"));
        let fragment = Fragment::with_class("div", "card.wide");
        let err = subclass_base(Some(&parent), &fragment, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestedSubclass);
        assert_eq!(
            err.to_string(),
            "[Nested Subclass] Nested subclass `card.wide` found in `section`"
        );
    }

    #[test]
    fn test_subclass_of_subclass() {
        let fragment = Fragment::with_class("div", "card.wide.tall");
        let err = subclass_base(None, &fragment, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestedSubclass);
    }

    #[test]
    fn test_clone_copies_descendants() {
        let base = Fragment::with_class("div", "card");
        let sub = Fragment::with_class("div", "card.wide");
        let other = StyleRef::root(Fragment::with_class("div", "cardHolder"));

        let mut table = StyleTable::new();
        table.insert(StyleRef::root(base.clone()), entries("width: 100px;"));
        table.insert(StyleRef::root(base.clone()).child(Fragment::element("p")), entries("color: red;"));
        table.insert(other.clone(), entries("color: blue;"));

        clone_base(&mut table, &base, &sub, None).unwrap();

        let sub_ref = StyleRef::root(sub.clone());
        let sub_child = sub_ref.child(Fragment::element("p"));
        assert!(table.get(&sub_ref).unwrap().is_cloned());
        assert!(table.get(&sub_child).unwrap().is_cloned());
        assert_eq!(
            table.get(&sub_child).unwrap().entries(),
            table.get(&StyleRef::root(base).child(Fragment::element("p"))).unwrap().entries()
        );
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_clone_skips_existing_targets() {
        let base = Fragment::with_class("div", "card");
        let sub = Fragment::with_class("div", "card.wide");

        let mut table = StyleTable::new();
        table.insert(StyleRef::root(base.clone()), entries("width: 100px;"));
        table.insert(StyleRef::root(sub.clone()), entries("width: 200px;"));

        clone_base(&mut table, &base, &sub, None).unwrap();

        let kept = table.get(&StyleRef::root(sub)).unwrap();
        assert!(!kept.is_cloned());
        assert_eq!(kept.entries()[0].declarations.get("width").unwrap().value, "200px");
    }

    #[test]
    fn test_unknown_base() {
        let mut table = StyleTable::new();
        let err = clone_base(
            &mut table,
            &Fragment::with_class("div", "card"),
            &Fragment::with_class("div", "card.wide"),
            None,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "[Unknown Base Class] The base class `div.card` does not exist"
        );
    }
}
