//! Splits an input line into whitespace-separated tokens.

use crate::buffer;

/// Characters that separate tokens: space, tab, carriage return, newline and bell.
pub const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\x07'];

/// Initial capacity of the token array.
pub const TOKEN_BUFFER_SIZE: usize = 64;

pub fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

/// Splits `line` on runs of [`DELIMITERS`].
///
/// Tokens borrow from `line` and are never empty; a blank line gives an empty
/// vector. The first token, if any, is the command name.
pub fn tokenize(line: &str) -> Vec<&str> {
    let mut tokens = buffer::with_capacity(TOKEN_BUFFER_SIZE);
    for token in line.split(is_delimiter).filter(|t| !t.is_empty()) {
        buffer::grow(&mut tokens, TOKEN_BUFFER_SIZE);
        tokens.push(token);
    }
    tokens
}
