//! Declaration Tokenizer
//!
//! Splits raw declaration text into the handful of tokens needed to find
//! property/value boundaries. Strings and parenthesized groups are kept
//! whole so that `;` and `:` inside them never split a declaration.

use crate::error::{CssError, CssResult, SourcePosition};

/// Declaration token types
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Run of ordinary characters (property names, keywords, numbers)
    Word(String),
    /// Quoted string, quotes included
    String(String),
    /// Balanced parenthesized group, parens included (e.g. `(0, 0, 0)`)
    Group(String),
    /// Whitespace (comments collapse into it)
    Whitespace,
    /// Colon ':'
    Colon,
    /// Semicolon ';'
    Semicolon,
    /// End of input
    Eof,
}

impl Token {
    /// Raw text of the token as it should appear in a value
    pub fn as_text(&self) -> &str {
        match self {
            Token::Word(s) | Token::String(s) | Token::Group(s) => s,
            Token::Whitespace => " ",
            Token::Colon => ":",
            Token::Semicolon => ";",
            Token::Eof => "",
        }
    }
}

/// Declaration tokenizer
pub struct Tokenizer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Get the current source position
    pub fn position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column, self.position)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn peek_second(&self) -> Option<char> {
        let mut iter = self.input[self.position..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.position = pos + c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(c)
        } else {
            None
        }
    }

    fn at_comment(&mut self) -> bool {
        self.peek() == Some('/') && self.peek_second() == Some('*')
    }

    /// Consume a comment, assuming the cursor sits on `/*`
    fn consume_comment(&mut self) {
        self.advance();
        self.advance();

        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return;
                }
                Some(_) => continue,
                None => return, // EOF in comment
            }
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> CssResult<Token> {
        let mut saw_whitespace = false;
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    saw_whitespace = true;
                    self.advance();
                }
                Some('/') if self.at_comment() => {
                    saw_whitespace = true;
                    self.consume_comment();
                }
                _ => break,
            }
        }

        if saw_whitespace {
            return Ok(Token::Whitespace);
        }

        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        match c {
            ':' => {
                self.advance();
                Ok(Token::Colon)
            }
            ';' => {
                self.advance();
                Ok(Token::Semicolon)
            }
            '"' | '\'' => {
                let mut text = String::new();
                self.consume_string(&mut text)?;
                Ok(Token::String(text))
            }
            '(' => self.consume_group(),
            _ => Ok(Token::Word(self.consume_word())),
        }
    }

    /// Consume a quoted string into `out`, quotes included
    fn consume_string(&mut self, out: &mut String) -> CssResult<()> {
        let start = self.position();
        let quote = match self.advance() {
            Some(q) => q,
            None => return Err(CssError::Unterminated { what: "string", position: start }),
        };
        out.push(quote);

        loop {
            match self.advance() {
                Some('\\') => {
                    out.push('\\');
                    if let Some(escaped) = self.advance() {
                        out.push(escaped);
                    }
                }
                Some(c) if c == quote => {
                    out.push(c);
                    return Ok(());
                }
                Some(c) => out.push(c),
                None => return Err(CssError::Unterminated { what: "string", position: start }),
            }
        }
    }

    /// Consume a balanced `( ... )` group
    fn consume_group(&mut self) -> CssResult<Token> {
        let start = self.position();
        let mut text = String::new();
        let mut depth = 0usize;

        loop {
            match self.peek() {
                Some('(') => {
                    depth += 1;
                    text.push('(');
                    self.advance();
                }
                Some(')') => {
                    depth -= 1;
                    text.push(')');
                    self.advance();
                    if depth == 0 {
                        return Ok(Token::Group(text));
                    }
                }
                Some('"') | Some('\'') => self.consume_string(&mut text)?,
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
                None => {
                    return Err(CssError::Unterminated { what: "parenthesis", position: start });
                }
            }
        }
    }

    fn consume_word(&mut self) -> String {
        let mut word = String::new();

        while let Some(c) = self.peek() {
            match c {
                ':' | ';' | '"' | '\'' | '(' => break,
                c if c.is_whitespace() => break,
                '/' if self.at_comment() => break,
                _ => {
                    word.push(c);
                    self.advance();
                }
            }
        }

        word
    }
}
