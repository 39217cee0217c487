//! Conflict Validator
//!
//! Files a node's declarations under its ref, refusing any block that would
//! redefine a property already set for an overlapping breakpoint.

use log::trace;

use immutable_styles_css::{allowed_elements, element_can_use, overrides, Breakpoint, DeclarationBlock};

use crate::error::{SourceLocation, StyleError, StyleResult};
use crate::table::{EntryList, StyleEntry, StyleRef, StyleTable};

/// Parse and validate `text`, then file it under `style_ref`
pub fn register(
    table: &mut StyleTable,
    style_ref: &StyleRef,
    element: &str,
    text: &str,
    breakpoint: Breakpoint,
    source: Option<&SourceLocation>,
) -> StyleResult<()> {
    let declarations = parse_block(style_ref, element, text, source)?;
    let entry = StyleEntry::new(declarations, breakpoint, source.cloned());

    let list = match table.get_mut(style_ref) {
        Some(list) => list,
        None => {
            trace!("new ref `{}` {}", style_ref, breakpoint);
            table.insert(style_ref.clone(), EntryList::new(entry));
            return Ok(());
        }
    };

    if list.is_cloned() {
        if let Some(equivalent) = list.find_range_mut(&entry.breakpoint) {
            trace!("merging subclass override into `{}` {}", style_ref, breakpoint);
            equivalent.declarations.merge_from(&entry.declarations);
            return Ok(());
        }
    }

    for existing in list.iter() {
        check_overrides(style_ref, existing, &entry)?;
    }

    trace!("appending entry to `{}` {}", style_ref, breakpoint);
    list.push(entry);
    Ok(())
}

/// Parse one block and check the element may use every property in it
fn parse_block(
    style_ref: &StyleRef,
    element: &str,
    text: &str,
    source: Option<&SourceLocation>,
) -> StyleResult<DeclarationBlock> {
    let declarations = DeclarationBlock::parse(text)
        .map_err(|err| StyleError::from_css(err, &style_ref.to_string(), source))?;

    for property in declarations.properties() {
        if !element_can_use(element, property) {
            return Err(StyleError::ElementPropertyMismatch {
                style_ref: style_ref.to_string(),
                element: element.to_string(),
                property: property.to_string(),
                allowed: allowed_elements(property).unwrap_or(&[]),
                location: source.cloned(),
            });
        }
    }

    Ok(declarations)
}

/// Fail if `candidate` would override anything `control` defines for an
/// overlapping breakpoint
pub fn check_overrides(style_ref: &StyleRef, control: &StyleEntry, candidate: &StyleEntry) -> StyleResult<()> {
    if !control.breakpoint.overlaps(&candidate.breakpoint) {
        return Ok(());
    }

    check_exact_override(style_ref, control, candidate)?;
    check_partial_override(style_ref, control, candidate)?;
    check_partial_override(style_ref, candidate, control)
}

fn check_exact_override(style_ref: &StyleRef, control: &StyleEntry, candidate: &StyleEntry) -> StyleResult<()> {
    match control.declarations.properties().find(|p| candidate.declarations.contains(p)) {
        Some(property) => Err(StyleError::ExactOverrideFound {
            style_ref: style_ref.to_string(),
            property: property.to_string(),
            location: candidate.source.clone(),
            existing: control.source.clone(),
        }),
        None => Ok(()),
    }
}

/// A shorthand in `shorthands` resetting a longhand in `longhands`
fn check_partial_override(style_ref: &StyleRef, longhands: &StyleEntry, shorthands: &StyleEntry) -> StyleResult<()> {
    for shorthand in shorthands.declarations.properties() {
        if let Some(longhand) = longhands
            .declarations
            .properties()
            .find(|longhand| overrides(shorthand, longhand))
        {
            return Err(StyleError::PartialOverrideFound {
                style_ref: style_ref.to_string(),
                property: longhand.to_string(),
                overridden_by: shorthand.to_string(),
                location: shorthands.source.clone(),
                existing: longhands.source.clone(),
            });
        }
    }
    Ok(())
}
