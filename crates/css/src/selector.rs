//! Selector fragments and emitted selectors
//!
//! A fragment is the local `element[.class][:pseudo]` part of a style path.
//! Fragments render to selectors that match the class attribute exactly, so
//! `div.grid` never matches `<div class="grid wide">`.

use std::fmt;

/// Local selector fragment of one style node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment {
    /// Element name (e.g., div, h1)
    pub element: String,
    /// Class name; `base.sub` for a subclass
    pub class: Option<String>,
    /// Pseudo suffix including its leading colon (e.g., `:hover`)
    pub pseudo: Option<String>,
}

impl Fragment {
    pub fn new(element: impl Into<String>, class: Option<String>, pseudo: Option<String>) -> Self {
        Self {
            element: element.into(),
            class,
            pseudo,
        }
    }

    /// Fragment with only an element name
    pub fn element(element: impl Into<String>) -> Self {
        Self::new(element, None, None)
    }

    /// Fragment with an element and a class
    pub fn with_class(element: impl Into<String>, class: impl Into<String>) -> Self {
        Self::new(element, Some(class.into()), None)
    }

    /// Split a `base.sub` class into its two halves
    pub fn subclass(&self) -> Option<(&str, &str)> {
        self.class.as_deref()?.split_once('.')
    }

    /// For a subclass fragment, the fragment naming its base class
    pub fn base(&self) -> Option<Fragment> {
        let (base, _) = self.subclass()?;
        Some(Fragment::with_class(self.element.clone(), base))
    }

    /// Selector parts matching this fragment
    pub fn selector_parts(&self) -> Vec<SelectorPart> {
        let mut parts = vec![SelectorPart::Type(self.element.clone())];

        match &self.class {
            None => parts.push(SelectorPart::NoAttribute("class".to_string())),
            Some(class) => parts.push(SelectorPart::ExactAttribute {
                name: "class".to_string(),
                value: class.split('.').collect::<Vec<_>>().join(" "),
            }),
        }

        if let Some(pseudo) = &self.pseudo {
            parts.push(SelectorPart::Pseudo(pseudo.clone()));
        }

        parts
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.element)?;
        if let Some(class) = &self.class {
            write!(f, ".{}", class)?;
        }
        if let Some(pseudo) = &self.pseudo {
            f.write_str(pseudo)?;
        }
        Ok(())
    }
}

/// A part of an emitted selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorPart {
    /// Type selector (e.g., div, p, span)
    Type(String),
    /// `[name="value"]`, whole-attribute match
    ExactAttribute { name: String, value: String },
    /// `:not([name])`
    NoAttribute(String),
    /// Pseudo-class or pseudo-element suffix, colon included
    Pseudo(String),
    /// Child combinator between compound selectors (`>`)
    Child,
}

/// A complete emitted selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub parts: Vec<SelectorPart>,
}

impl Selector {
    /// Selector for a root-to-node path of fragments, joined by `>`
    pub fn from_path(path: &[Fragment]) -> Self {
        let mut parts = Vec::new();

        for (i, fragment) in path.iter().enumerate() {
            if i > 0 {
                parts.push(SelectorPart::Child);
            }
            parts.extend(fragment.selector_parts());
        }

        Self { parts }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                SelectorPart::Type(name) => f.write_str(name)?,
                SelectorPart::ExactAttribute { name, value } => write!(f, "[{}=\"{}\"]", name, value)?,
                SelectorPart::NoAttribute(name) => write!(f, ":not([{}])", name)?,
                SelectorPart::Pseudo(pseudo) => f.write_str(pseudo)?,
                SelectorPart::Child => f.write_str(" > ")?,
            }
        }
        Ok(())
    }
}
