use crate::ast::{Error, RawValue, Result};
use log::trace;
use std::fmt;

/// Name of the only reserved function.
pub const REGEX_FUNCTION: &str = "Regex";

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Integer or float literal; the decoded value is carried along.
    Number(RawValue),
    String(String),
    Identifier(String),
    Regex,
    Plus,
    Minus,
    Star,
    Slash,
    Power,
    LParen,
    RParen,
    Comma,
    Eof,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    String,
    Identifier,
    Regex,
    Plus,
    Minus,
    Star,
    Slash,
    Power,
    LParen,
    RParen,
    Comma,
    Eof,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Number(_) => TokenKind::Number,
            Token::String(_) => TokenKind::String,
            Token::Identifier(_) => TokenKind::Identifier,
            Token::Regex => TokenKind::Regex,
            Token::Plus => TokenKind::Plus,
            Token::Minus => TokenKind::Minus,
            Token::Star => TokenKind::Star,
            Token::Slash => TokenKind::Slash,
            Token::Power => TokenKind::Power,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::Comma => TokenKind::Comma,
            Token::Eof => TokenKind::Eof,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::Regex => "'Regex'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Power => "'**'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Eof => "end of input",
        };
        f.write_str(name)
    }
}

/// On-demand tokenizer over an expression string.
///
/// `next_token` keeps returning [`Token::Eof`] once the input is exhausted.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(Token::Eof);
        };

        let token = if ch.is_ascii_digit() {
            self.number()?
        } else if ch.is_alphabetic() || ch == '_' {
            self.identifier()
        } else if ch == '"' {
            self.string()?
        } else {
            self.advance();
            match ch {
                '+' => Token::Plus,
                '-' => Token::Minus,
                '*' if self.current_char() == Some('*') => {
                    self.advance();
                    Token::Power
                }
                '*' => Token::Star,
                '/' => Token::Slash,
                '(' => Token::LParen,
                ')' => Token::RParen,
                ',' => Token::Comma,
                _ => {
                    return Err(Error::InvalidCharacter {
                        character: ch,
                        position: self.pos - ch.len_utf8(),
                    })
                }
            }
        };

        trace!("token: {:?}", token);
        Ok(token)
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current_char(), Some(ch) if ch.is_whitespace()) {
            self.advance();
        }
    }

    fn consume_digits(&mut self) {
        while matches!(self.current_char(), Some(ch) if ch.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Digits with at most one `.`; the fraction may be empty (`1.`).
    fn number(&mut self) -> Result<Token> {
        let start = self.pos;
        self.consume_digits();

        let is_float = self.current_char() == Some('.');
        if is_float {
            self.advance();
            self.consume_digits();
        }

        let text = &self.input[start..self.pos];
        let value = if is_float {
            text.parse::<f64>().map(RawValue::Float).ok()
        } else {
            text.parse::<i64>().map(RawValue::Integer).ok()
        };
        value
            .map(Token::Number)
            .ok_or_else(|| Error::InvalidNumber(text.to_string()))
    }

    fn identifier(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.current_char(), Some(ch) if ch.is_alphanumeric() || ch == '_') {
            self.advance();
        }

        match &self.input[start..self.pos] {
            REGEX_FUNCTION => Token::Regex,
            name => Token::Identifier(name.to_string()),
        }
    }

    /// Everything up to the next `"` is taken verbatim, backslashes included.
    fn string(&mut self) -> Result<Token> {
        let start = self.pos;
        self.advance();

        let body_start = self.pos;
        match self.input[body_start..].find('"') {
            Some(len) => {
                self.pos = body_start + len + 1;
                Ok(Token::String(
                    self.input[body_start..body_start + len].to_string(),
                ))
            }
            None => {
                self.pos = self.input.len();
                Err(Error::UnterminatedString { position: start })
            }
        }
    }
}
