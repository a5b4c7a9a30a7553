/// Opens a token declaration.
pub const TOKEN_OPEN: char = '{';

/// Closes a token declaration.
pub const TOKEN_CLOSE: char = '}';

/// Marks a token as optional when it immediately precedes [TOKEN_CLOSE].
pub const OPTIONAL_MARKER: char = '?';

/// Separates the chunks of a candidate name that are matched against template tokens.
pub const CHUNK_SEPARATOR: char = '-';

/// Reserved token name resolved to the resource kind's short code rather than to a field.
pub const NAME_CODE: &str = "NameCode";
