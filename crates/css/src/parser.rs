//! Declaration Parser
//!
//! Parses a raw `property: value;` block into an ordered set of
//! declarations, rejecting repeated properties within the block.

use smallvec::SmallVec;
use std::fmt;

use crate::error::{CssError, CssResult, SourcePosition};
use crate::properties::longhands_of;
use crate::tokenizer::{Token, Tokenizer};

/// A CSS declaration (property: value)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Property name, lower-cased
    pub property: String,
    /// Property value, trimmed
    pub value: String,
    /// Value this declaration replaced through a subclass merge
    pub original_value: Option<String>,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            original_value: None,
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.original_value {
            Some(original) => write!(
                f,
                "{}: {} /* (original value: {}) */;",
                self.property, self.value, original
            ),
            None => write!(f, "{}: {};", self.property, self.value),
        }
    }
}

/// Declarations of one block, each property at most once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationBlock {
    declarations: SmallVec<[Declaration; 8]>,
}

impl DeclarationBlock {
    /// Create an empty block
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw declaration text
    pub fn parse(input: &str) -> CssResult<Self> {
        DeclarationParser::new(input).parse_block()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    /// Property names in declaration order
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(|d| d.property.as_str())
    }

    /// Look up a declaration, ignoring ASCII case
    pub fn get(&self, property: &str) -> Option<&Declaration> {
        self.declarations
            .iter()
            .find(|d| d.property.eq_ignore_ascii_case(property))
    }

    pub fn contains(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    /// Append a declaration, enforcing per-block uniqueness and
    /// shorthand-after-longhand ordering
    pub fn push(&mut self, declaration: Declaration) -> CssResult<()> {
        if self.contains(&declaration.property) {
            return Err(CssError::duplicate_property(declaration.property));
        }

        if let Some(longhand) = longhands_of(&declaration.property)
            .iter()
            .find(|longhand| self.contains(longhand))
        {
            return Err(CssError::partial_override(*longhand, declaration.property));
        }

        self.declarations.push(declaration);
        Ok(())
    }

    /// Fold `other` into this block. Values from `other` win; a replaced
    /// value is kept as `original_value` (the first one replaced sticks).
    pub fn merge_from(&mut self, other: &DeclarationBlock) {
        for incoming in other.iter() {
            match self
                .declarations
                .iter_mut()
                .find(|d| d.property == incoming.property)
            {
                Some(existing) => {
                    let replaced = std::mem::replace(&mut existing.value, incoming.value.clone());
                    if existing.original_value.is_none() {
                        existing.original_value = Some(replaced);
                    }
                }
                None => self.declarations.push(incoming.clone()),
            }
        }
    }
}

impl fmt::Display for DeclarationBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, declaration) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", declaration)?;
        }
        Ok(())
    }
}

/// Declaration block parser
pub struct DeclarationParser<'a> {
    tokenizer: Tokenizer<'a>,
}

impl<'a> DeclarationParser<'a> {
    /// Create a new parser
    pub fn new(input: &'a str) -> Self {
        Self { tokenizer: Tokenizer::new(input) }
    }

    /// Parse every declaration in the input
    pub fn parse_block(&mut self) -> CssResult<DeclarationBlock> {
        let mut block = DeclarationBlock::new();

        loop {
            let start = self.tokenizer.position();
            let (tokens, at_eof) = self.collect_declaration()?;

            if let Some(declaration) = parse_declaration(&tokens, start)? {
                block.push(declaration)?;
            }

            if at_eof {
                break;
            }
        }

        Ok(block)
    }

    /// Collect tokens up to the next semicolon
    fn collect_declaration(&mut self) -> CssResult<(Vec<Token>, bool)> {
        let mut tokens = Vec::new();

        loop {
            match self.tokenizer.next_token()? {
                Token::Eof => return Ok((tokens, true)),
                Token::Semicolon => return Ok((tokens, false)),
                token => tokens.push(token),
            }
        }
    }
}

/// Turn one declaration's tokens into a `Declaration`; blank input is skipped
fn parse_declaration(tokens: &[Token], start: SourcePosition) -> CssResult<Option<Declaration>> {
    if tokens.iter().all(|t| *t == Token::Whitespace) {
        return Ok(None);
    }

    let raw = || tokens_to_string(tokens).trim().to_string();

    let colon = match tokens.iter().position(|t| *t == Token::Colon) {
        Some(index) => index,
        None => return Err(CssError::malformed(raw(), start)),
    };

    let property = tokens_to_string(&tokens[..colon]);
    let property = property.trim();
    if property.is_empty() || property.contains(char::is_whitespace) {
        return Err(CssError::malformed(raw(), start));
    }

    let value = tokens_to_string(&tokens[colon + 1..]);
    let value = value.trim();
    if value.is_empty() {
        return Err(CssError::malformed(raw(), start));
    }

    Ok(Some(Declaration::new(property.to_ascii_lowercase(), value)))
}

/// Convert tokens back to text, whitespace collapsed to single spaces
fn tokens_to_string(tokens: &[Token]) -> String {
    let mut text = String::new();
    for token in tokens {
        if *token == Token::Whitespace && text.ends_with(' ') {
            continue;
        }
        text.push_str(token.as_text());
    }
    text
}
