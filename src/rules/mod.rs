use crate::{
    chars::NameRules,
    kind::ResourceKind,
    template::{Template, NAME_CODE},
};
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

/// The serde shape of a rule-set document.
pub mod document;
pub use document::{FieldDocument, RuleDocument, RuleSetDocument};

/// Errors raised while loading a rule-set document.
pub mod error;
pub use error::ConfigError;

#[cfg(test)]
mod test;

/// Longest permitted rule-set or field name.
const MAX_IDENTIFIER_LEN: usize = 50;

/// A reusable named constraint that template tokens resolve to.
#[derive(Debug, Clone)]
pub enum Field {
    Pattern(Regex),
    Values(BTreeSet<String>),
}

/// What a rule requires of names of its resource kind.
#[derive(Debug, Clone)]
pub enum Constraint {
    Unconstrained,
    Pattern(Regex),
    Template(Template),
}

#[derive(Debug, Clone)]
pub struct Rule {
    constraint: Constraint,
    samples: Vec<String>,
}

/// A rule-set document that has passed every consistency check. Immutable once built.
#[derive(Debug, Clone)]
pub struct RuleSet {
    name: String,
    fields: BTreeMap<String, Field>,
    rules: BTreeMap<ResourceKind, Rule>,
}

impl Field {
    fn from_document(name: &str, doc: FieldDocument) -> Result<Self, ConfigError> {
        match (doc.regex, doc.values) {
            (Some(_), Some(_)) => Err(ConfigError::field_with_both_constraints(name)),
            (None, None) => Err(ConfigError::field_without_constraint(name)),
            (Some(pattern), None) => Regex::new(&pattern)
                .map(Field::Pattern)
                .map_err(|e| ConfigError::invalid_regex(format!("fields.{name}.regex"), e)),
            (None, Some(values)) => {
                if values.is_empty() {
                    return Err(ConfigError::empty_field_values(name));
                }
                for (i, value) in values.iter().enumerate() {
                    if value.is_empty() || value.trim() != value {
                        return Err(ConfigError::invalid_field_value(name, i, value));
                    }
                }
                Ok(Field::Values(values.into_iter().collect()))
            }
        }
    }

    /// Whether one chunk of a candidate name satisfies this field.
    pub fn matches(&self, chunk: &str) -> bool {
        match self {
            Field::Pattern(regex) => regex.is_match(chunk),
            Field::Values(values) => values.contains(chunk),
        }
    }
}

impl Rule {
    fn from_document(
        kind: ResourceKind,
        doc: RuleDocument,
        fields: &BTreeMap<String, Field>,
        name_rules: &NameRules,
    ) -> Result<Self, ConfigError> {
        if doc.samples.is_empty() {
            return Err(ConfigError::missing_samples(kind));
        }
        for (i, sample) in doc.samples.iter().enumerate() {
            if !name_rules.is_valid_name(sample, kind) {
                return Err(ConfigError::invalid_sample(kind, i, sample));
            }
        }

        let constraint = match (doc.regex, doc.template) {
            (Some(_), Some(_)) => return Err(ConfigError::rule_with_both_constraints(kind)),
            (None, None) => Constraint::Unconstrained,
            (Some(pattern), None) => Regex::new(&pattern)
                .map(Constraint::Pattern)
                .map_err(|e| ConfigError::invalid_regex(format!("rules.{kind}.regex"), e))?,
            (None, Some(source)) => {
                let template = Template::parse(&source);
                if let Some(e) = template.error() {
                    return Err(ConfigError::invalid_template(kind, e));
                }
                if let Some(token) = template
                    .tokens()
                    .iter()
                    .find(|t| t.name != NAME_CODE && !fields.contains_key(&t.name))
                {
                    return Err(ConfigError::unknown_template_token(kind, &token.name));
                }
                Constraint::Template(template)
            }
        };

        Ok(Self {
            constraint,
            samples: doc.samples,
        })
    }

    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }
}

impl RuleSet {
    /// Verifies `document` completely and builds the rule set from it. Samples are checked
    /// against `name_rules`. A document that fails any check is never returned.
    pub fn load(document: RuleSetDocument, name_rules: &NameRules) -> Result<Self> {
        let RuleSetDocument {
            name,
            fields: field_docs,
            rules: rule_docs,
        } = document;
        log::debug!("validating rule set '{name}'");

        if !is_short_identifier(&name) {
            return Err(ConfigError::invalid_rule_set_name(&name).into());
        }
        if let Some(field_name) = field_docs.keys().find(|k| !is_short_identifier(k)) {
            return Err(ConfigError::invalid_field_name(field_name).into());
        }

        let mut kinded_docs = Vec::with_capacity(rule_docs.len());
        for (key, doc) in rule_docs {
            let kind = key
                .parse::<ResourceKind>()
                .map_err(|_| ConfigError::unknown_resource_kind(&key))?;
            kinded_docs.push((kind, doc));
        }

        if field_docs.is_empty() {
            return Err(ConfigError::no_fields().into());
        }
        let mut fields = BTreeMap::new();
        for (field_name, doc) in field_docs {
            let field = Field::from_document(&field_name, doc)?;
            fields.insert(field_name, field);
        }

        let mut rules = BTreeMap::new();
        for (kind, doc) in kinded_docs {
            let rule = Rule::from_document(kind, doc, &fields, name_rules)?;
            if rules.insert(kind, rule).is_some() {
                return Err(ConfigError::duplicate_resource_kind(kind).into());
            }
        }

        log::info!(
            "loaded rule set '{name}' with {} fields and {} rules",
            fields.len(),
            rules.len()
        );
        Ok(Self {
            name,
            fields,
            rules,
        })
    }

    /// Deserializes and loads a JSON rule-set document.
    pub fn from_json(json: &str, name_rules: &NameRules) -> Result<Self> {
        let document = serde_json::from_str::<RuleSetDocument>(json)
            .map_err(ConfigError::malformed_document)?;
        Self::load(document, name_rules)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &BTreeMap<String, Field> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn rule(&self, kind: ResourceKind) -> Option<&Rule> {
        self.rules.get(&kind)
    }

    /// Rules in [ResourceKind] declaration order.
    pub fn rules(&self) -> impl Iterator<Item = (ResourceKind, &Rule)> {
        self.rules.iter().map(|(kind, rule)| (*kind, rule))
    }
}

static SHORT_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").unwrap());

/// Document and field names, at most [MAX_IDENTIFIER_LEN] characters.
fn is_short_identifier(value: &str) -> bool {
    value.len() <= MAX_IDENTIFIER_LEN && SHORT_IDENTIFIER.is_match(value)
}
