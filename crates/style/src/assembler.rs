//! AST Assembler
//!
//! Walks a style tree depth-first, building each node's fully-qualified ref,
//! pushing breakpoint scopes down to descendants, resolving subclasses and
//! filing every node's declarations in the style table.

use log::trace;

use immutable_styles_css::{Breakpoint, Fragment};

use crate::error::{SourceLocation, StyleError, StyleResult};
use crate::inheritance::{clone_base, subclass_base};
use crate::node::StyleNode;
use crate::table::{StyleRef, StyleTable};
use crate::validator::register;

/// Breakpoint scope established by an ancestor
#[derive(Debug, Clone)]
pub struct MediaScope {
    pub breakpoint: Breakpoint,
    /// Ref of the node that declared the breakpoint
    pub set_by: StyleRef,
    pub source: Option<SourceLocation>,
}

/// Local fragment of a node: `element[.className][pseudoSelector]`
pub fn fragment_of(node: &StyleNode) -> Fragment {
    let attrs = node.attrs();
    Fragment::new(node.element(), attrs.class_name.clone(), attrs.pseudo_selector.clone())
}

/// Assemble `node` and its descendants into `table`
pub fn assemble(
    table: &mut StyleTable,
    node: &StyleNode,
    parent: Option<&StyleRef>,
    inherited: Option<&MediaScope>,
) -> StyleResult<()> {
    let attrs = node.attrs();
    let source = node.source();
    attrs.validate()?;

    let fragment = fragment_of(node);
    let style_ref = match parent {
        Some(parent) => parent.child(fragment.clone()),
        None => StyleRef::root(fragment.clone()),
    };
    trace!("assembling `{}`", style_ref);

    let own = attrs.breakpoint();
    let breakpoint = match (inherited, own) {
        (Some(scope), Some(_)) => {
            return Err(StyleError::NestedMediaQuery {
                style_ref: style_ref.to_string(),
                scope_ref: scope.set_by.to_string(),
                scope: scope.breakpoint,
                location: source.cloned(),
                scope_location: scope.source.clone(),
            });
        }
        (Some(scope), None) => scope.breakpoint,
        (None, Some(own)) => own,
        (None, None) => Breakpoint::UNBOUNDED,
    };

    if let Some(base) = subclass_base(parent, &fragment, source)? {
        clone_base(table, &base, &fragment, source)?;
    }

    register(table, &style_ref, node.element(), node.declarations(), breakpoint, source)?;

    if node.children().is_empty() {
        return Ok(());
    }

    let declared;
    let scope = match own {
        Some(breakpoint) => {
            declared = MediaScope {
                breakpoint,
                set_by: style_ref.clone(),
                source: source.cloned(),
            };
            Some(&declared)
        }
        None => inherited,
    };

    for child in node.children() {
        assemble(table, child, Some(&style_ref), scope)?;
    }

    Ok(())
}
