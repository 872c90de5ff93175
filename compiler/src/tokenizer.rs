//! Order-preserving access to JSON objects.
//!
//! `serde_json` maps forget the order keys were written in, but definition and
//! property order is carried through to the generated source. The reader here
//! tokenizes a document and walks only the top level of an object, skipping
//! nested values structurally without decoding them.

use regex::Regex;
use lazy_static::lazy_static;
use crate::utils::{quote, error};
use crate::error::GenError;

lazy_static! {
    pub static ref TOKEN_REGEX:    Regex = Regex::new(
        r#"("(?:[^"\\]|\\.)*"|-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?|\btrue\b|\bfalse\b|\bnull\b|[{}\[\]:,]|\s+)"#
    ).unwrap();
    pub static ref WHITESPACE_RX:  Regex = Regex::new(r"^\s+$").unwrap();
}

#[derive(Debug, PartialEq)]
pub struct Token {
    pub text:   String,
    pub line:   usize,
    pub column: usize,
    /// Byte offset of the token in the tokenized text.
    pub offset: usize,
}

impl Token {
    fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Splits JSON text into tokens, followed by an empty EOF token.
pub fn tokenize_json(text: &str) -> Result<Vec<Token>, GenError> {
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut column = 1;
    let mut last_end = 0;

    for mat in TOKEN_REGEX.find_iter(text) {
        let start = mat.start();
        let end   = mat.end();
        let part  = mat.as_str();

        if start > last_end {
            let unexpected = &text[last_end..start];
            return Err(error(
                &format!("Syntax error: {}", quote(unexpected)),
                line,
                column,
            ));
        }

        if !WHITESPACE_RX.is_match(part) {
            tokens.push(Token {
                text:   part.to_string(),
                line,
                column,
                offset: start,
            });
        }

        let newline_count = part.matches('\n').count();
        if newline_count > 0 {
            line += newline_count;
            if let Some(last_line_part) = part.split('\n').last() {
                column = last_line_part.len() + 1;
            }
        } else {
            column += part.len();
        }

        last_end = end;
    }

    if last_end != text.len() {
        let unexpected = &text[last_end..];
        return Err(error(
            &format!("Syntax error: {}", quote(unexpected)),
            line,
            column,
        ));
    }

    tokens.push(Token {
        text:   "".to_string(),
        line,
        column,
        offset: text.len(),
    });
    Ok(tokens)
}

/// Outcome of skipping one value. `Close` is returned when the reader hits
/// the `]` or `}` that ends the enclosing container instead of a value.
enum Skipped {
    Value,
    Close(usize),
}

struct ObjectReader<'a> {
    text:   &'a str,
    tokens: Vec<Token>,
    index:  usize,
}

impl<'a> ObjectReader<'a> {
    fn new(text: &'a str) -> Result<Self, GenError> {
        Ok(ObjectReader {
            text,
            tokens: tokenize_json(text)?,
            index:  0,
        })
    }

    /// Consumes the current token and returns its index.
    fn advance(&mut self) -> Result<usize, GenError> {
        let tok = &self.tokens[self.index];
        if self.index + 1 >= self.tokens.len() {
            return Err(error("Unexpected end of input", tok.line, tok.column));
        }
        self.index += 1;
        Ok(self.index - 1)
    }

    fn unexpected_token(&self, index: usize) -> GenError {
        let tok = &self.tokens[index];
        error(
            &format!("Unexpected token {}", quote(&tok.text)),
            tok.line,
            tok.column,
        )
    }

    fn expect(&mut self, text: &str, expected: &str) -> Result<(), GenError> {
        let i = self.advance()?;
        if self.tokens[i].text != text {
            let tok = &self.tokens[i];
            return Err(error(
                &format!("Expected {} but found {}", expected, quote(&tok.text)),
                tok.line,
                tok.column,
            ));
        }
        Ok(())
    }

    fn skip_value(&mut self) -> Result<Skipped, GenError> {
        let i = self.advance()?;
        // Punctuation tokens are one byte long.
        match self.tokens[i].text.as_bytes()[0] {
            b'[' => self.skip_container("]", false),
            b'{' => self.skip_container("}", true),
            b']' | b'}' => Ok(Skipped::Close(i)),
            b',' | b':' => Err(self.unexpected_token(i)),
            _ => Ok(Skipped::Value),
        }
    }

    /// Skips the rest of an array or object whose opener was just consumed.
    fn skip_container(&mut self, close: &str, keyed: bool) -> Result<Skipped, GenError> {
        let mut first = true;
        loop {
            if keyed {
                let k = self.advance()?;
                let key = &self.tokens[k].text;
                if first && key == close {
                    return Ok(Skipped::Value);
                }
                if !key.starts_with('"') {
                    return Err(self.unexpected_token(k));
                }
                self.expect(":", "\":\"")?;
            }

            if let Skipped::Close(c) = self.skip_value()? {
                // Only `[]` may close where a value is expected.
                if first && !keyed && self.tokens[c].text == close {
                    return Ok(Skipped::Value);
                }
                return Err(self.unexpected_token(c));
            }
            first = false;

            let sep = self.advance()?;
            let sep_text = self.tokens[sep].text.as_str();
            if sep_text == close {
                return Ok(Skipped::Value);
            }
            if sep_text != "," {
                return Err(self.unexpected_token(sep));
            }
        }
    }

    fn entries(mut self) -> Result<Vec<(String, &'a str)>, GenError> {
        let text = self.text;
        self.expect("{", "start of object")?;
        let mut entries = Vec::new();

        let mut i = self.advance()?;
        if self.tokens[i].text == "}" {
            return self.finish(entries);
        }
        loop {
            let key_text = self.tokens[i].text.clone();
            if !key_text.starts_with('"') {
                return Err(self.unexpected_token(i));
            }
            let key: String = serde_json::from_str(&key_text)?;
            self.expect(":", "\":\"")?;

            let start = self.tokens[self.index].offset;
            if let Skipped::Close(c) = self.skip_value()? {
                return Err(self.unexpected_token(c));
            }
            let end = self.tokens[self.index - 1].end();
            entries.push((key, &text[start..end]));

            let sep = self.advance()?;
            if self.tokens[sep].text == "}" {
                return self.finish(entries);
            }
            if self.tokens[sep].text != "," {
                return Err(self.unexpected_token(sep));
            }
            i = self.advance()?;
        }
    }

    /// Nothing but the EOF token may follow the object.
    fn finish<T>(&self, value: T) -> Result<T, GenError> {
        if self.index + 1 < self.tokens.len() {
            return Err(self.unexpected_token(self.index));
        }
        Ok(value)
    }
}

/// Returns the top-level `(key, raw value)` pairs of a JSON object in source
/// order. Values are slices of `text` and are not decoded.
pub fn entries_in_order(text: &str) -> Result<Vec<(String, &str)>, GenError> {
    ObjectReader::new(text)?.entries()
}
