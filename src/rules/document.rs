use serde::Deserialize;
use std::collections::BTreeMap;

/// The rule-set document as it appears on the wire. Nothing here is checked yet; see
/// [super::RuleSet::load].
///
/// Property names are accepted in camelCase or PascalCase (`name` or `Name`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSetDocument {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Fields")]
    pub fields: BTreeMap<String, FieldDocument>,
    /// Keyed by resource kind name.
    #[serde(default, alias = "Rules")]
    pub rules: BTreeMap<String, RuleDocument>,
}

/// Exactly one of `regex` or `values` must be present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDocument {
    #[serde(alias = "Regex")]
    pub regex: Option<String>,
    #[serde(alias = "Values")]
    pub values: Option<Vec<String>>,
}

/// At most one of `regex` or `template` may be present; with neither, names are
/// unconstrained.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDocument {
    #[serde(alias = "Regex")]
    pub regex: Option<String>,
    #[serde(alias = "Template")]
    pub template: Option<String>,
    #[serde(default, alias = "Samples")]
    pub samples: Vec<String>,
}
