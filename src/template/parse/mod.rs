use super::{
    error::ParseError,
    token::{OPTIONAL_MARKER, TOKEN_CLOSE, TOKEN_OPEN},
    Token,
};
use std::fmt::{self, Debug};


struct ParseState {
    cursor: usize,
    chars: Vec<char>,
    state: ParseStateMachine,
    bound_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseStateMachine {
    /// Between tokens; only a `{` may follow.
    Base,
    /// Inside `{`, accumulating the token name.
    TokenName,
    /// Encountered a `?` after the token name; only a `}` may follow.
    TokenOptional,
}

/// Scans `template` left to right and returns its tokens in order.
pub fn parse(template: &str) -> Result<Vec<Token>, ParseError> {
    if template.is_empty() {
        return Err(ParseError::empty_template());
    }

    let mut state = ParseState {
        cursor: 0,
        chars: template.chars().collect(),
        state: ParseStateMachine::Base,
        bound_name: String::new(),
    };
    let mut tokens = Vec::new();

    while let Some(ch) = state.chars.get(state.cursor).copied() {
        log::trace!("{state:?}");

        if ch.is_whitespace() {
            return Err(ParseError::whitespace(state.cursor, &state.chars));
        }

        match state.state {
            ParseStateMachine::Base => {
                if ch != TOKEN_OPEN {
                    return Err(ParseError::expected_token_open(state.cursor, &state.chars));
                }
                state.state = ParseStateMachine::TokenName;
            }

            ParseStateMachine::TokenName => {
                if ch.is_ascii_alphanumeric() {
                    state.bound_name.push(ch);
                } else if ch == TOKEN_CLOSE || ch == OPTIONAL_MARKER {
                    if state.bound_name.is_empty() {
                        return Err(ParseError::blank_token_name(state.cursor, &state.chars));
                    }
                    if ch == OPTIONAL_MARKER {
                        state.state = ParseStateMachine::TokenOptional;
                    } else {
                        tokens.push(state.take_token(false));
                    }
                } else if ch == TOKEN_OPEN {
                    return Err(ParseError::nested_token(state.cursor, &state.chars));
                } else {
                    return Err(ParseError::invalid_token_name_char(
                        state.cursor,
                        &state.chars,
                    ));
                }
            }

            ParseStateMachine::TokenOptional => {
                if ch != TOKEN_CLOSE {
                    return Err(ParseError::misplaced_optional_marker(
                        state.cursor - 1,
                        &state.chars,
                    ));
                }
                tokens.push(state.take_token(true));
            }
        }
        state.cursor += 1;
    }

    if state.state != ParseStateMachine::Base {
        return Err(ParseError::unclosed_token(state.cursor, &state.chars));
    }
    Ok(tokens)
}

impl ParseState {
    /// Completes the token being built and returns to [ParseStateMachine::Base].
    fn take_token(&mut self, is_optional: bool) -> Token {
        self.state = ParseStateMachine::Base;
        Token {
            name: std::mem::take(&mut self.bound_name),
            is_optional,
        }
    }
}

impl Debug for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ParseState {
            cursor,
            state,
            bound_name,
            ..
        } = self;
        write!(f, "ParseState: cursor={cursor} state={state:?}, bound_name={bound_name:?}")
    }
}
