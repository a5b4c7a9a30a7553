use super::token::{OPTIONAL_MARKER, TOKEN_CLOSE, TOKEN_OPEN};
use indoc::formatdoc;
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    message: String,
    // Full template string to include in output message
    template: String,
    // The index of the char that caused the error
    char_index: usize,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ParseError {
            message,
            template,
            char_index,
        } = self;

        // The caret may sit one past the end when the template ends prematurely.
        let error_position = format!("{}^", " ".repeat(*char_index));

        let output = formatdoc! {"
            Something went wrong while parsing the name template:
                {template}
                {error_position}
            {message}
        "};
        write!(f, "{output}")
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    pub fn empty_template() -> Self {
        ParseError {
            char_index: 0,
            template: String::new(),
            message: String::from("A template must contain at least one token."),
        }
    }

    pub fn whitespace(char_index: usize, chars: &[char]) -> Self {
        ParseError {
            char_index,
            template: chars.iter().collect(),
            message: String::from("Whitespace is not permitted anywhere in a template."),
        }
    }

    pub fn expected_token_open(char_index: usize, chars: &[char]) -> Self {
        ParseError {
            char_index,
            template: chars.iter().collect(),
            message: format!("Expected '{TOKEN_OPEN}' to begin a token."),
        }
    }

    pub fn unclosed_token(char_index: usize, chars: &[char]) -> Self {
        ParseError {
            char_index,
            template: chars.iter().collect(),
            message: format!("Expected a '{TOKEN_CLOSE}' character to close the token."),
        }
    }

    pub fn nested_token(char_index: usize, chars: &[char]) -> Self {
        ParseError {
            char_index,
            template: chars.iter().collect(),
            message: format!("Tokens cannot be nested; '{TOKEN_OPEN}' found inside a token."),
        }
    }

    pub fn blank_token_name(char_index: usize, chars: &[char]) -> Self {
        ParseError {
            char_index,
            template: chars.iter().collect(),
            message: String::from("Token name cannot be blank."),
        }
    }

    pub fn invalid_token_name_char(char_index: usize, chars: &[char]) -> Self {
        ParseError {
            char_index,
            template: chars.iter().collect(),
            message: String::from("Token names may only contain ASCII letters and digits."),
        }
    }

    pub fn misplaced_optional_marker(char_index: usize, chars: &[char]) -> Self {
        ParseError {
            char_index,
            template: chars.iter().collect(),
            message: format!(
                "The '{OPTIONAL_MARKER}' marker must immediately precede '{TOKEN_CLOSE}'."
            ),
        }
    }
}

#[test]
fn test_parse_error_display() {
    use indoc::indoc;

    let template: Vec<char> = "{MiscText} {TwoDigit?}".chars().collect();
    let error = ParseError::whitespace(10, &template);

    assert_eq!(
        format!("{error}"),
        indoc! {"
            Something went wrong while parsing the name template:
                {MiscText} {TwoDigit?}
                          ^
            Whitespace is not permitted anywhere in a template.
        "},
    )
}

#[test]
fn test_parse_error_display_past_end() {
    let template: Vec<char> = "{".chars().collect();
    let error = ParseError::unclosed_token(1, &template);
    let output = format!("{error}");

    assert!(output.contains("\n     ^\n"));
    assert!(output.contains("to close the token"));
}
