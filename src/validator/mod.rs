use crate::{
    chars::NameRules,
    kind::ResourceKind,
    rules::{Constraint, RuleSet},
    template::{Template, CHUNK_SEPARATOR, NAME_CODE},
};
use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::fmt::{self, Display};


/// The rule set that ships with the crate.
pub const DEFAULT_RULE_SET: &str = include_str!("../../rules/default.json");

static SHARED: OnceCell<NameValidator> = OnceCell::new();

/// Answers whether candidate names comply with a loaded [RuleSet].
#[derive(Debug, Clone)]
pub struct NameValidator {
    rule_set: RuleSet,
}

/// Why a candidate name was judged non-compliant. This is an ordinary outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    PatternMismatch,
    ChunkCount {
        expected: usize,
        actual: usize,
    },
    NameCode {
        position: usize,
        expected: &'static str,
        actual: String,
    },
    UnknownField {
        position: usize,
        field: String,
    },
    FieldMismatch {
        position: usize,
        field: String,
        chunk: String,
    },
}

/// A configured sample name and the kind it was declared for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub name: String,
    pub kind: ResourceKind,
}

impl NameValidator {
    pub fn new(rule_set: RuleSet) -> Self {
        Self { rule_set }
    }

    /// Loads a JSON rule-set document, checking its samples against the standard
    /// character-class table.
    pub fn from_json(json: &str) -> Result<Self> {
        RuleSet::from_json(json, NameRules::standard()).map(Self::new)
    }

    pub fn with_default_rules() -> Result<Self> {
        Self::from_json(DEFAULT_RULE_SET).context("the built-in rule set failed to load")
    }

    /// The validator for the built-in rule set. The first caller loads and checks it; every
    /// later caller, from any thread, gets the same instance.
    pub fn shared() -> Result<&'static Self> {
        SHARED.get_or_try_init(Self::with_default_rules)
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    pub fn is_valid(&self, name: &str, kind: ResourceKind) -> bool {
        self.rejection(name, kind).is_none()
    }

    /// `None` when `name` is valid for `kind`, otherwise the first reason it is not.
    ///
    /// A kind with no rule, or whose rule has neither a regex nor a template, accepts
    /// every name.
    pub fn rejection(&self, name: &str, kind: ResourceKind) -> Option<Rejection> {
        let Some(rule) = self.rule_set.rule(kind) else {
            log::debug!("no rule for {kind}; '{name}' is unconstrained");
            return None;
        };

        match rule.constraint() {
            Constraint::Unconstrained => None,
            Constraint::Pattern(regex) => {
                (!regex.is_match(name)).then_some(Rejection::PatternMismatch)
            }
            Constraint::Template(template) => self.decompose(name, kind, template),
        }
    }

    /// Matches the Nth hyphen-delimited chunk of `name` to the Nth template token.
    fn decompose(
        &self,
        name: &str,
        kind: ResourceKind,
        template: &Template,
    ) -> Option<Rejection> {
        let chunks = if name.is_empty() {
            Vec::new()
        } else {
            name.split(CHUNK_SEPARATOR).collect::<Vec<_>>()
        };
        let tokens = template.tokens();

        if chunks.len() != tokens.len() {
            return Some(Rejection::ChunkCount {
                expected: tokens.len(),
                actual: chunks.len(),
            });
        }

        for (position, (chunk, token)) in chunks.into_iter().zip(tokens).enumerate() {
            log::trace!("matching chunk {chunk:?} against {token}");

            if token.name == NAME_CODE {
                if chunk != kind.code() {
                    return Some(Rejection::NameCode {
                        position,
                        expected: kind.code(),
                        actual: chunk.to_string(),
                    });
                }
                continue;
            }

            let Some(field) = self.rule_set.field(&token.name) else {
                return Some(Rejection::UnknownField {
                    position,
                    field: token.name.clone(),
                });
            };
            if !field.matches(chunk) {
                return Some(Rejection::FieldMismatch {
                    position,
                    field: token.name.clone(),
                    chunk: chunk.to_string(),
                });
            }
        }
        None
    }

    /// Every configured sample, optionally restricted to one kind.
    pub fn samples(&self, filter: Option<ResourceKind>) -> Vec<Sample> {
        self.rule_set
            .rules()
            .filter(|(kind, _)| filter.is_none_or(|f| f == *kind))
            .flat_map(|(kind, rule)| {
                rule.samples().iter().map(move |name| Sample {
                    name: name.clone(),
                    kind,
                })
            })
            .collect()
    }
}

impl Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PatternMismatch => write!(f, "does not match the rule's pattern"),
            Self::ChunkCount { expected, actual } => write!(
                f,
                "has {actual} '{CHUNK_SEPARATOR}'-separated chunks but the template expects {expected}"
            ),
            Self::NameCode {
                position,
                expected,
                actual,
            } => write!(f, "chunk {position} is '{actual}' but the short code is '{expected}'"),
            Self::UnknownField { position, field } => {
                write!(f, "chunk {position} refers to undefined field '{field}'")
            }
            Self::FieldMismatch {
                position,
                field,
                chunk,
            } => write!(f, "chunk {position} '{chunk}' does not satisfy field '{field}'"),
        }
    }
}
