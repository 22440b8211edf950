//! Shell-style splitting that keeps the source text intact.
//!
//! Unlike POSIX shell splitting, quotes are not removed and `$VAR`
//! references are not touched, so a command can be split, rewritten token by
//! token, and joined back without losing what the author wrote. Rules:
//!
//! - spaces, tabs, and newlines separate tokens;
//! - a quote (`'` or `"`) that starts a token groups everything up to the
//!   matching quote, including whitespace, and the closing quote ends the
//!   token;
//! - a quote in the middle of a word is an ordinary character;
//! - there are no escapes and no comments.
use crate::error::{PrimeError, Result};

const QUOTES: [char; 2] = ['\'', '"'];

fn is_separator(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

enum State {
    Between,
    Word,
    Quoted(char),
}

pub fn split_preserving_quotes(text: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut token = String::new();
    let mut state = State::Between;

    for ch in text.chars() {
        match state {
            State::Between => {
                if is_separator(ch) {
                    continue;
                }
                token.push(ch);
                state = if QUOTES.contains(&ch) {
                    State::Quoted(ch)
                } else {
                    State::Word
                };
            }
            State::Word => {
                if is_separator(ch) {
                    tokens.push(std::mem::take(&mut token));
                    state = State::Between;
                } else {
                    token.push(ch);
                }
            }
            State::Quoted(quote) => {
                token.push(ch);
                if ch == quote {
                    tokens.push(std::mem::take(&mut token));
                    state = State::Between;
                }
            }
        }
    }

    match state {
        State::Quoted(_) => Err(PrimeError::UnbalancedQuotes {
            text: text.to_string(),
        }),
        State::Word => {
            tokens.push(token);
            Ok(tokens)
        }
        State::Between => Ok(tokens),
    }
}
