//! End-to-end compilation scenarios

use immutable_styles_css::Fragment;
use immutable_styles_style::assembler::assemble;
use immutable_styles_style::consistency::check_table;
use immutable_styles_style::{compile, style, Attrs, Compiler, ErrorKind, StyleError, StyleNode, StyleRef, StyleTable};

fn kind_of(forest: &[StyleNode]) -> ErrorKind {
    compile(forest).unwrap_err().kind()
}

fn overridden_property(err: &StyleError) -> &str {
    match err {
        StyleError::ExactOverrideFound { property, .. } => property.as_str(),
        other => panic!("expected an exact override, got {:?}", other),
    }
}

#[test]
fn test_duplicate_property_in_block() {
    for block in [
        "font-size: 30px; font-size: 20px;",
        "font-size: 30px; font-size: 30px;",
        "font-family: \"Fira Code\"; font-size: 30px; font-weight: bold; font-size: 20px;",
    ] {
        let node = style!("h1", Attrs::new().class("pageTitle"), block);
        let err = compile([&node]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "[Duplicate Property] The CSS property `font-size` is defined twice by `h1.pageTitle`"
        );
    }
}

#[test]
fn test_duplicate_property_in_detached_ruleset() {
    let heading = "font-family: \"Fira Code\"; font-size: 30px; font-weight: bold;";
    let node = style!("h1", Attrs::new().class("pageTitle"), heading, " font-size: 20px;");
    assert_eq!(kind_of(&[node]), ErrorKind::DuplicateProperty);
}

#[test]
fn test_override_from_adjacent_node() {
    let forest = [
        style!("h1", Attrs::new().class("pageTitle"), "font-size: 30px;"),
        style!("h1", Attrs::new().class("pageTitle"), "font-size: 28px;"),
    ];
    let err = compile(&forest).unwrap_err();
    assert_eq!(overridden_property(&err), "font-size");
    assert!(err
        .to_string()
        .starts_with("[Override Found] The property `font-size` has already been defined"));
}

#[test]
fn test_override_from_child_node_caught_by_consistency_pass() {
    let forest = [
        style!("h1", Attrs::new().class("pageTitle"), "font-size: 30px;"),
        style!(
            "div",
            Attrs::new().class("titleBar"),
            "",
            style!("h1", Attrs::new().class("pageTitle"), "font-size: 20px;"),
        ),
    ];

    let mut table = StyleTable::new();
    for node in &forest {
        assemble(&mut table, node, None, None).unwrap();
    }
    let err = check_table(&table).unwrap_err();
    assert_eq!(overridden_property(&err), "font-size");

    assert_eq!(kind_of(&forest), ErrorKind::ExactOverrideFound);
}

#[test]
fn test_override_from_adjacent_child_nodes() {
    let forest = [
        style!(
            "div",
            Attrs::new().class("parent"),
            "",
            style!("span", Attrs::new().class("child"), "color: cadetblue;"),
        ),
        style!(
            "div",
            Attrs::new().class("parent"),
            "",
            style!("span", Attrs::new().class("child"), "color: forestgreen;"),
        ),
    ];
    let err = compile(&forest).unwrap_err();
    assert_eq!(overridden_property(&err), "color");
}

#[test]
fn test_no_override_when_elements_differ() {
    let forest = [
        style!("h1", Attrs::new(), "font-size: 30px;"),
        style!("h1", Attrs::new().class("pageTitle"), "font-size: 20px;"),
    ];
    assert!(compile(&forest).is_ok());
}

#[test]
fn test_override_when_breakpoints_overlap() {
    let forest = [
        style!("section", Attrs::new().class("sideBar").min_width(300), "display: block;"),
        style!("section", Attrs::new().class("sideBar").min_width(900), "display: block;"),
    ];
    let err = compile(&forest).unwrap_err();
    assert_eq!(overridden_property(&err), "display");
}

#[test]
fn test_no_override_when_breakpoints_disjoint() {
    let forest = [
        style!(
            "section",
            Attrs::new().class("sideBar").min_width(300).max_width(899),
            "display: block;"
        ),
        style!("section", Attrs::new().class("sideBar").min_width(900), "display: block;"),
    ];
    assert!(compile(&forest).is_ok());
}

#[test]
fn test_override_when_breakpoints_equal() {
    let forest = [
        style!("nav", Attrs::new().min_width(300).max_width(600), "display: none;"),
        style!("nav", Attrs::new().min_width(300).max_width(600), "display: flex;"),
    ];
    assert_eq!(kind_of(&forest), ErrorKind::ExactOverrideFound);
}

#[test]
fn test_no_override_when_parents_differ() {
    let forest = [
        style!(
            "div",
            Attrs::new().class("parentOne"),
            "",
            style!("span", Attrs::new().class("child"), "color: cadetblue;"),
        ),
        style!(
            "div",
            Attrs::new().class("parentTwo"),
            "",
            style!("span", Attrs::new().class("child"), "color: forestgreen;"),
        ),
    ];
    assert!(compile(&forest).is_ok());
}

#[test]
fn test_top_level_leaf_conflicts_with_nested_leaf() {
    let forest = [
        style!(
            "div",
            Attrs::new().class("parentOne"),
            "",
            style!("span", Attrs::new().class("child"), "color: cadetblue;"),
        ),
        style!("span", Attrs::new().class("child"), "color: forestgreen;"),
    ];
    assert_eq!(kind_of(&forest), ErrorKind::ExactOverrideFound);
}

#[test]
fn test_partial_override_across_nodes() {
    let forest = [
        style!("p", Attrs::new().class("note"), "margin-top: 8px;"),
        style!("p", Attrs::new().class("note"), "margin: 0;"),
    ];
    let err = compile(&forest).unwrap_err();
    assert!(matches!(
        err,
        StyleError::PartialOverrideFound { ref property, ref overridden_by, .. }
            if property == "margin-top" && overridden_by == "margin"
    ));
}

#[test]
fn test_element_property_mismatch() {
    let node = style!("div", Attrs::new().class("grid"), "border-collapse: collapse;");
    let err = compile([&node]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "[Element Property Mismatch] The HTML element `div` (div.grid) cannot use the property `border-collapse`"
    );
}

#[test]
fn test_subclass_clones_descendants() {
    let forest = [
        style!(
            "div",
            Attrs::new().class("card"),
            "width: 200px;",
            style!("h2", Attrs::new(), "font-size: 18px;", style!("a", Attrs::new(), "color: navy;")),
        ),
        style!("div", Attrs::new().class("card.featured"), "width: 400px;"),
    ];

    let mut compiler = Compiler::new();
    compiler.compile(&forest).unwrap();
    let table = compiler.table();

    let base = Fragment::with_class("div", "card");
    let sub = Fragment::with_class("div", "card.featured");
    for base_ref in table.refs().filter(|r| r.starts_with(&base)).cloned().collect::<Vec<_>>() {
        let cloned_ref = base_ref.rebase(sub.clone());
        let cloned = table.get(&cloned_ref).unwrap();
        assert!(cloned.is_cloned());
        if base_ref.len() > 1 {
            assert_eq!(cloned.entries(), table.get(&base_ref).unwrap().entries());
        }
    }

    let base_width = table.get(&StyleRef::root(base)).unwrap().entries()[0]
        .declarations
        .get("width")
        .unwrap();
    assert_eq!(base_width.value, "200px");
}

#[test]
fn test_subclass_override_emits_original_value() {
    let forest = [
        style!("button", Attrs::new().class("primary"), "color: white; padding: 4px;"),
        style!("button", Attrs::new().class("primary.large"), "padding: 8px;"),
    ];
    let css = compile(&forest).unwrap();
    assert_eq!(
        css,
        "button[class=\"primary\"] {\n  color: white;\n  padding: 4px;\n}\n\
         button[class=\"primary large\"] {\n  color: white;\n  padding: 8px /* (original value: 4px) */;\n}\n"
    );
}

#[test]
fn test_subclass_override_at_new_breakpoint_is_checked() {
    let forest = [
        style!("button", Attrs::new().class("primary"), "padding: 4px;"),
        style!("button", Attrs::new().class("primary.large").min_width(600), "padding: 8px;"),
    ];
    assert_eq!(kind_of(&forest), ErrorKind::ExactOverrideFound);
}

#[test]
fn test_subclass_nested_children_merge() {
    let forest = [
        style!(
            "ul",
            Attrs::new().class("menu"),
            "",
            style!("li", Attrs::new(), "color: black;"),
        ),
        style!(
            "ul",
            Attrs::new().class("menu.dark"),
            "",
            style!("li", Attrs::new(), "color: white;"),
        ),
    ];
    let css = compile(&forest).unwrap();
    assert!(css.contains("ul[class=\"menu dark\"] > li:not([class]) {\n  color: white /* (original value: black) */;\n}\n"));
}

#[test]
fn test_selector_emission() {
    let forest = [
        style!("div", Attrs::new(), "display: block;"),
        style!("div", Attrs::new().class("grid"), "display: grid;"),
        style!("div", Attrs::new().class("grid.dense"), "gap: 0;"),
    ];
    let css = compile(&forest).unwrap();
    assert!(css.contains("div:not([class]) {"));
    assert!(css.contains("div[class=\"grid\"] {"));
    assert!(css.contains("div[class=\"grid dense\"] {"));
}

#[test]
fn test_round_trip_unbounded() {
    let node = style!("p", Attrs::new().class("lead"), "font-size: 18px; line-height: 1.5;");
    let css = compile([&node]).unwrap();
    assert_eq!(css.matches('{').count(), 1);
    assert!(!css.contains("@media"));
    assert!(css.contains("font-size: 18px;"));
    assert!(css.contains("line-height: 1.5;"));
}

#[test]
fn test_round_trip_min_width() {
    let node = style!("p", Attrs::new().class("lead").min_width(300), "font-size: 18px; line-height: 1.5;");
    let css = compile([&node]).unwrap();
    assert_eq!(css.matches("@media (min-width:300px) {").count(), 1);
    assert_eq!(
        css,
        "@media (min-width:300px) {\n  p[class=\"lead\"] {\n    font-size: 18px;\n    line-height: 1.5;\n  }\n}\n"
    );
}

#[test]
fn test_nested_media_query_fails() {
    let node = style!(
        "main",
        Attrs::new().max_width(600),
        "",
        style!("p", Attrs::new().min_width(300), "color: red;"),
    );
    assert_eq!(kind_of(&[node]), ErrorKind::NestedMediaQuery);
}

#[test]
fn test_nested_zero_min_width_fails() {
    let node = style!(
        "main",
        Attrs::new().max_width(600),
        "",
        style!("p", Attrs::new().min_width(0), "color: red;"),
    );
    let err = compile([&node]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NestedMediaQuery);
    assert!(matches!(err, StyleError::NestedMediaQuery { ref scope_ref, .. } if scope_ref == "main"));
}

#[test]
fn test_empty_pseudo_selector_fails() {
    let node = style!("a", Attrs::new().pseudo(""), "color: red;");
    assert_eq!(kind_of(&[node]), ErrorKind::InvalidAttributeValue);
}

#[test]
fn test_pseudo_selector_is_its_own_ref() {
    let forest = [
        style!("a", Attrs::new().class("link"), "color: blue;"),
        style!("a", Attrs::new().class("link").pseudo(":hover"), "color: red;"),
    ];
    let css = compile(&forest).unwrap();
    assert!(css.contains("a[class=\"link\"]:hover {\n  color: red;\n}\n"));
}

#[test]
fn test_runs_do_not_leak() {
    let mut compiler = Compiler::new();
    let first = [style!("h1", Attrs::new(), "font-size: 30px;")];
    let second = [style!("h1", Attrs::new(), "font-size: 20px;")];

    compiler.compile(&first).unwrap();
    let css = compiler.compile(&second).unwrap();
    assert!(css.contains("20px"));
    assert!(!css.contains("30px"));
}
