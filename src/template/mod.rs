use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// Characters with special meaning in a template string.
pub mod token;
pub use token::{CHUNK_SEPARATOR, NAME_CODE};

pub mod parse;


/// Errors specific to template string parsing
pub mod error;
pub use error::ParseError;

/// A single `{Name}` or `{Name?}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub name: String,
    pub is_optional: bool,
}

/// The structure of a hyphen-segmented name, as an ordered sequence of tokens.
///
/// Parsing never fails outright. A malformed source produces a template whose
/// [Template::is_valid] is `false`, with the reason available from [Template::error], so
/// callers can probe validity before committing to it.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    tokens: Vec<Token>,
    error: Option<ParseError>,
}

impl Template {
    pub fn parse(source: &str) -> Self {
        let (tokens, error) = match parse::parse(source) {
            Ok(tokens) => (tokens, None),
            Err(e) => {
                log::debug!("invalid template {source:?}: {}", e.message());
                (Vec::new(), Some(e))
            }
        };
        Self {
            source: source.to_string(),
            tokens,
            error,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Empty when the template is invalid.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The string the template was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Strict counterpart to [Template::parse].
impl FromStr for Template {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut template = Self::parse(s);
        if let Some(e) = template.error.take() {
            return Err(e);
        }
        Ok(template)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Token { name, is_optional } = self;
        if *is_optional {
            write!(f, "{{{name}?}}")
        } else {
            write!(f, "{{{name}}}")
        }
    }
}

/// Writes the canonical reconstruction of the tokens.
impl Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{token}")?;
        }
        Ok(())
    }
}
