use crate::kind::ResourceKind;
use anyhow::{format_err, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;


bitflags::bitflags! {
    /// Character classes a resource kind may permit in its names.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NameChars: u8 {
        const LOWER_ALPHA  = 1 << 0;
        const UPPER_ALPHA  = 1 << 1;
        const DIGIT        = 1 << 2;
        const HYPHEN       = 1 << 3;
        const UNDERSCORE   = 1 << 4;
        const PERIOD       = 1 << 5;
        const PARENTHESIS  = 1 << 6;

        const ALPHA        = Self::LOWER_ALPHA.bits() | Self::UPPER_ALPHA.bits();
        const ALPHANUMERIC = Self::ALPHA.bits() | Self::DIGIT.bits();
    }
}

impl NameChars {
    /// The single class `ch` belongs to, or `None` if it belongs to no class at all.
    pub fn classify(ch: char) -> Option<Self> {
        match ch {
            'a'..='z' => Some(Self::LOWER_ALPHA),
            'A'..='Z' => Some(Self::UPPER_ALPHA),
            '0'..='9' => Some(Self::DIGIT),
            '-' => Some(Self::HYPHEN),
            '_' => Some(Self::UNDERSCORE),
            '.' => Some(Self::PERIOD),
            '(' | ')' => Some(Self::PARENTHESIS),
            _ => None,
        }
    }

    /// Parses a `|` or `,` separated list of class names, e.g. `Alphanumeric|Hyphen`.
    pub fn from_names(s: &str) -> Result<Self> {
        let mut chars = Self::empty();

        for name in s.split(['|', ',']).map(str::trim) {
            let class = match name.to_lowercase().as_str() {
                "loweralpha" | "lower_alpha" | "lower-alpha" => Self::LOWER_ALPHA,
                "upperalpha" | "upper_alpha" | "upper-alpha" => Self::UPPER_ALPHA,
                "digit" => Self::DIGIT,
                "hyphen" => Self::HYPHEN,
                "underscore" => Self::UNDERSCORE,
                "period" => Self::PERIOD,
                "parenthesis" => Self::PARENTHESIS,
                "alpha" => Self::ALPHA,
                "alphanumeric" => Self::ALPHANUMERIC,
                _ => return Err(format_err!("unrecognized character class '{name}'")),
            };
            chars |= class;
        }
        Ok(chars)
    }
}

/// Length and character-class limits for one resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameRule {
    pub min_length: usize,
    pub max_length: usize,
    pub chars: NameChars,
}

impl NameRule {
    pub fn new(min_length: usize, max_length: usize, chars: NameChars) -> Result<Self> {
        if min_length == 0 {
            return Err(format_err!("minimum name length must be at least 1"));
        }
        if min_length > max_length {
            return Err(format_err!(
                "minimum name length {min_length} exceeds maximum name length {max_length}"
            ));
        }
        Ok(Self {
            min_length,
            max_length,
            chars,
        })
    }

    /// Checks the literal characters of `name`.
    ///
    /// The first character is never checked against [NameRule::chars], and the last one
    /// must be a digit or, when the kind allows lower-case letters, a lower-case letter.
    /// Both quirks are deliberate and must not be tightened without sign-off.
    pub fn is_valid_name(&self, name: &str) -> bool {
        let chars = name.chars().collect::<Vec<_>>();
        let len = chars.len();

        if len < self.min_length || len > self.max_length {
            return false;
        }

        for &ch in chars.iter().take(len.saturating_sub(1)).skip(1) {
            match NameChars::classify(ch) {
                Some(class) if self.chars.contains(class) => continue,
                _ => return false,
            }
        }

        if self.max_length < 2 {
            return false;
        }

        chars.last().is_some_and(|last| {
            last.is_ascii_digit()
                || (last.is_ascii_lowercase() && self.chars.contains(NameChars::LOWER_ALPHA))
        })
    }
}

/// The per-kind character-class table.
#[derive(Debug, Clone, Default)]
pub struct NameRules {
    rules: HashMap<ResourceKind, NameRule>,
}

/// One row of a character-class table supplied as JSON.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct NameRuleEntry {
    kind: String,
    min_length: usize,
    max_length: usize,
    chars: String,
}

static STANDARD: Lazy<NameRules> = Lazy::new(|| {
    use NameChars as C;
    use ResourceKind as K;

    let word = C::ALPHANUMERIC | C::HYPHEN | C::UNDERSCORE;
    let dotted = word | C::PERIOD;

    let rules = [
        (K::ManagementGroup, 1, 90, word),
        (K::Subscription, 1, 90, word | C::PARENTHESIS),
        (K::ResourceGroup, 1, 64, dotted | C::PARENTHESIS),
        (K::WindowsVm, 1, 15, word),
        (K::LinuxVm, 1, 64, word),
        (K::StorageAccount, 3, 24, C::LOWER_ALPHA | C::DIGIT),
        (K::VirtualNetwork, 2, 64, dotted),
        (K::Subnet, 1, 80, dotted),
        (K::NetworkInterface, 1, 80, dotted),
        (K::NetworkSecurityGroup, 1, 80, dotted),
        (K::PublicIpAddress, 1, 80, dotted),
    ]
    .into_iter()
    .map(|(kind, min_length, max_length, chars)| {
        let rule = NameRule {
            min_length,
            max_length,
            chars,
        };
        (kind, rule)
    })
    .collect();

    NameRules { rules }
});

impl NameRules {
    /// The built-in table, constructed once on first use and never mutated.
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Builds a table from `(kind, min length, max length, classes)` rows.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (ResourceKind, usize, usize, NameChars)>,
    {
        let mut rules = HashMap::new();

        for (kind, min_length, max_length, chars) in entries {
            let rule = NameRule::new(min_length, max_length, chars)
                .with_context(|| format!("invalid character rule for {kind}"))?;

            if rules.insert(kind, rule).is_some() {
                return Err(format_err!("character rule for {kind} is defined more than once"));
            }
        }
        log::debug!("built character-class table with {} rules", rules.len());
        Ok(Self { rules })
    }

    /// Reads a table from a JSON array of `{ kind, minLength, maxLength, chars }` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<NameRuleEntry> =
            serde_json::from_str(json).context("malformed character-class table")?;

        let mut rows = Vec::with_capacity(entries.len());
        for entry in entries {
            let kind = entry.kind.parse::<ResourceKind>()?;
            let chars = NameChars::from_names(&entry.chars)
                .with_context(|| format!("invalid character classes for {kind}"))?;
            rows.push((kind, entry.min_length, entry.max_length, chars));
        }
        Self::from_entries(rows)
    }

    pub fn get(&self, kind: ResourceKind) -> Option<&NameRule> {
        self.rules.get(&kind)
    }

    /// `false` when `kind` has no row in this table.
    pub fn is_valid_name(&self, name: &str, kind: ResourceKind) -> bool {
        self.get(kind).is_some_and(|rule| rule.is_valid_name(name))
    }
}

/// Checks `name` against the standard table.
pub fn is_valid_name(name: &str, kind: ResourceKind) -> bool {
    NameRules::standard().is_valid_name(name, kind)
}
