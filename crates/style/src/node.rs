//! Style Tree
//!
//! Immutable style nodes: an element, its scoping attributes, the raw
//! declaration text for the element, and nested child nodes.

use immutable_styles_css::Breakpoint;

use crate::error::{SourceLocation, StyleError, StyleResult};

/// Attribute keys a style node accepts
pub const ALLOWED_ATTRIBUTES: &[&str] = &[
    "className",
    "minWidth",
    "maxWidth",
    "pseudoSelector",
    "__source",
];

/// Scoping attributes of a style node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
    /// Class name; `base.sub` declares a subclass of `base`
    pub class_name: Option<String>,
    /// Lower bound of the breakpoint range, in px
    pub min_width: Option<u32>,
    /// Upper bound of the breakpoint range, in px
    pub max_width: Option<u32>,
    /// Pseudo-class or pseudo-element suffix, leading colon included
    pub pseudo_selector: Option<String>,
    /// Where the node was written
    pub source: Option<SourceLocation>,
}

/// Untyped attribute value, as produced by a loader
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Number(f64),
    Source(SourceLocation),
}

impl AttrValue {
    fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Text(_) => "a string",
            AttrValue::Number(_) => "a number",
            AttrValue::Source(_) => "a source location",
        }
    }
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn min_width(mut self, px: u32) -> Self {
        self.min_width = Some(px);
        self
    }

    pub fn max_width(mut self, px: u32) -> Self {
        self.max_width = Some(px);
        self
    }

    /// Set the pseudo suffix; a missing leading colon is added
    pub fn pseudo(mut self, pseudo: impl Into<String>) -> Self {
        let pseudo = pseudo.into();
        self.pseudo_selector = Some(if pseudo.starts_with(':') {
            pseudo
        } else {
            format!(":{}", pseudo)
        });
        self
    }

    pub fn source(mut self, source: SourceLocation) -> Self {
        self.source = Some(source);
        self
    }

    /// Build attributes from an untyped key/value bag, rejecting any key
    /// outside [`ALLOWED_ATTRIBUTES`]
    pub fn from_pairs<I, K>(pairs: I) -> StyleResult<Self>
    where
        I: IntoIterator<Item = (K, AttrValue)>,
        K: AsRef<str>,
    {
        let pairs: Vec<(K, AttrValue)> = pairs.into_iter().collect();

        let mut attrs = Attrs::new();
        for (key, value) in &pairs {
            if let ("__source", AttrValue::Source(source)) = (key.as_ref(), value) {
                attrs.source = Some(source.clone());
            }
        }

        for (key, value) in pairs {
            let key = key.as_ref();
            match (key, value) {
                ("className", AttrValue::Text(class)) => attrs.class_name = Some(class),
                ("pseudoSelector", AttrValue::Text(pseudo)) => attrs = attrs.pseudo(pseudo),
                ("minWidth", AttrValue::Number(px)) => attrs.min_width = Some(attrs.pixels(key, px)?),
                ("maxWidth", AttrValue::Number(px)) => attrs.max_width = Some(attrs.pixels(key, px)?),
                ("__source", AttrValue::Source(_)) => {}
                (key, value) if ALLOWED_ATTRIBUTES.contains(&key) => {
                    return Err(attrs.invalid_value(key, format!("cannot be {}", value.type_name())));
                }
                (key, _) => {
                    return Err(StyleError::InvalidAttribute {
                        attribute: key.to_string(),
                        allowed: ALLOWED_ATTRIBUTES,
                        location: attrs.source.clone(),
                    });
                }
            }
        }

        attrs.validate()?;
        Ok(attrs)
    }

    fn pixels(&self, key: &str, px: f64) -> StyleResult<u32> {
        if px.fract() != 0.0 || px < 0.0 || px > f64::from(u32::MAX) {
            return Err(self.invalid_value(key, format!("must be a whole number of pixels, got {}", px)));
        }
        Ok(px as u32)
    }

    fn invalid_value(&self, key: &str, reason: String) -> StyleError {
        StyleError::InvalidAttributeValue {
            attribute: key.to_string(),
            reason,
            location: self.source.clone(),
        }
    }

    /// Check that the declared range is not inverted and the pseudo
    /// suffix names something
    pub fn validate(&self) -> StyleResult<()> {
        if let Some(pseudo) = &self.pseudo_selector {
            if pseudo.trim_start_matches(':').trim().is_empty() {
                return Err(self.invalid_value("pseudoSelector", format!("`{}` is empty", pseudo)));
            }
        }
        if let (Some(min), Some(max)) = (self.min_width, self.max_width) {
            if min > max {
                return Err(self.invalid_value(
                    "minWidth",
                    format!("({}) must not exceed maxWidth ({})", min, max),
                ));
            }
        }
        Ok(())
    }

    /// Whether the node declares its own breakpoint
    pub fn declares_breakpoint(&self) -> bool {
        self.min_width.is_some() || self.max_width.is_some()
    }

    /// The node's own breakpoint, if it declares one
    pub fn breakpoint(&self) -> Option<Breakpoint> {
        if self.declares_breakpoint() {
            Some(Breakpoint::new(self.min_width, self.max_width))
        } else {
            None
        }
    }
}

/// One argument to [`StyleNode::build`]: declaration text or a child
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Text(String),
    Node(StyleNode),
}

impl From<&str> for Item {
    fn from(text: &str) -> Self {
        Item::Text(text.to_string())
    }
}

impl From<String> for Item {
    fn from(text: String) -> Self {
        Item::Text(text)
    }
}

impl From<StyleNode> for Item {
    fn from(node: StyleNode) -> Self {
        Item::Node(node)
    }
}

/// A node of the style tree
#[derive(Debug, Clone, PartialEq)]
pub struct StyleNode {
    element: String,
    attrs: Attrs,
    declarations: String,
    children: Vec<StyleNode>,
}

impl StyleNode {
    /// Build a node. Text items are concatenated in order into the node's
    /// declarations; node items become its children, in order.
    pub fn build<I>(element: impl Into<String>, attrs: Attrs, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        let mut declarations = String::new();
        let mut children = Vec::new();

        for item in items {
            match item.into() {
                Item::Text(text) => declarations.push_str(&text),
                Item::Node(node) => children.push(node),
            }
        }

        Self {
            element: element.into(),
            attrs,
            declarations,
            children,
        }
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// Raw declaration text
    pub fn declarations(&self) -> &str {
        &self.declarations
    }

    pub fn children(&self) -> &[StyleNode] {
        &self.children
    }

    pub fn source(&self) -> Option<&SourceLocation> {
        self.attrs.source.as_ref()
    }
}

/// Build a [`StyleNode`] from an element, [`Attrs`] and any mix of
/// declaration text and child nodes.
///
/// ```ignore
/// let node = style!("div", Attrs::new().class("titleBar"),
///     "display: flex;",
///     style!("h1", Attrs::new().class("pageTitle"), "font-size: 30px;"),
/// );
/// ```
#[macro_export]
macro_rules! style {
    ($element:expr) => {
        $crate::StyleNode::build($element, $crate::Attrs::new(), ::std::iter::empty::<$crate::Item>())
    };
    ($element:expr, $attrs:expr $(, $item:expr)* $(,)?) => {
        $crate::StyleNode::build(
            $element,
            $attrs,
            ::std::vec::Vec::<$crate::Item>::from([$($crate::Item::from($item)),*]),
        )
    };
}
