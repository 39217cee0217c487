//! CSS Property Tables
//!
//! Element capability whitelist and shorthand/longhand relationships used
//! to detect declarations that could silently override each other.

/// Elements a restricted property may be used on, `None` if unrestricted
pub fn allowed_elements(property: &str) -> Option<&'static [&'static str]> {
    const TABLE: &[&str] = &["table"];
    const TABLE_CELLS: &[&str] = &["td", "th"];
    const LISTS: &[&str] = &["ul", "ol", "li"];
    const REPLACED: &[&str] = &["img", "video", "iframe", "embed", "object", "canvas"];

    match property.to_ascii_lowercase().as_str() {
        "table-layout" |
        "border-collapse" |
        "border-spacing" |
        "caption-side" => Some(TABLE),

        "empty-cells" => Some(TABLE_CELLS),

        "list-style" |
        "list-style-type" |
        "list-style-position" |
        "list-style-image" => Some(LISTS),

        "object-fit" |
        "object-position" => Some(REPLACED),

        _ => None,
    }
}

/// Check whether `element` may use `property`
pub fn element_can_use(element: &str, property: &str) -> bool {
    match allowed_elements(property) {
        Some(elements) => elements.iter().any(|e| e.eq_ignore_ascii_case(element)),
        None => true,
    }
}

/// Longhands a shorthand resets when it is declared
pub fn longhands_of(shorthand: &str) -> &'static [&'static str] {
    match shorthand.to_ascii_lowercase().as_str() {
        "margin" => &["margin-top", "margin-right", "margin-bottom", "margin-left"],
        "padding" => &["padding-top", "padding-right", "padding-bottom", "padding-left"],
        "inset" => &["top", "right", "bottom", "left"],
        "border" => &[
            "border-top",
            "border-right",
            "border-bottom",
            "border-left",
            "border-width",
            "border-style",
            "border-color",
            "border-top-width",
            "border-right-width",
            "border-bottom-width",
            "border-left-width",
            "border-top-style",
            "border-right-style",
            "border-bottom-style",
            "border-left-style",
            "border-top-color",
            "border-right-color",
            "border-bottom-color",
            "border-left-color",
        ],
        "border-top" => &["border-top-width", "border-top-style", "border-top-color"],
        "border-right" => &["border-right-width", "border-right-style", "border-right-color"],
        "border-bottom" => &["border-bottom-width", "border-bottom-style", "border-bottom-color"],
        "border-left" => &["border-left-width", "border-left-style", "border-left-color"],
        "border-width" => &[
            "border-top-width",
            "border-right-width",
            "border-bottom-width",
            "border-left-width",
        ],
        "border-style" => &[
            "border-top-style",
            "border-right-style",
            "border-bottom-style",
            "border-left-style",
        ],
        "border-color" => &[
            "border-top-color",
            "border-right-color",
            "border-bottom-color",
            "border-left-color",
        ],
        "border-radius" => &[
            "border-top-left-radius",
            "border-top-right-radius",
            "border-bottom-right-radius",
            "border-bottom-left-radius",
        ],
        "outline" => &["outline-color", "outline-style", "outline-width"],
        "background" => &[
            "background-color",
            "background-image",
            "background-repeat",
            "background-position",
            "background-size",
            "background-attachment",
            "background-origin",
            "background-clip",
        ],
        "font" => &[
            "font-style",
            "font-variant",
            "font-weight",
            "font-stretch",
            "font-size",
            "line-height",
            "font-family",
        ],
        "list-style" => &["list-style-type", "list-style-position", "list-style-image"],
        "overflow" => &["overflow-x", "overflow-y"],
        "flex" => &["flex-grow", "flex-shrink", "flex-basis"],
        "flex-flow" => &["flex-direction", "flex-wrap"],
        "gap" => &["row-gap", "column-gap"],
        "place-items" => &["align-items", "justify-items"],
        "place-content" => &["align-content", "justify-content"],
        "place-self" => &["align-self", "justify-self"],
        "grid-area" => &["grid-row-start", "grid-column-start", "grid-row-end", "grid-column-end"],
        "grid-row" => &["grid-row-start", "grid-row-end"],
        "grid-column" => &["grid-column-start", "grid-column-end"],
        "grid-template" => &["grid-template-rows", "grid-template-columns", "grid-template-areas"],
        "columns" => &["column-width", "column-count"],
        "text-decoration" => &[
            "text-decoration-line",
            "text-decoration-color",
            "text-decoration-style",
            "text-decoration-thickness",
        ],
        "transition" => &[
            "transition-property",
            "transition-duration",
            "transition-timing-function",
            "transition-delay",
        ],
        "animation" => &[
            "animation-name",
            "animation-duration",
            "animation-timing-function",
            "animation-delay",
            "animation-iteration-count",
            "animation-direction",
            "animation-fill-mode",
            "animation-play-state",
        ],
        _ => &[],
    }
}

/// Check whether declaring `shorthand` resets `longhand`
pub fn overrides(shorthand: &str, longhand: &str) -> bool {
    longhands_of(shorthand)
        .iter()
        .any(|l| l.eq_ignore_ascii_case(longhand))
}
