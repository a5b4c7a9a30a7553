//! Validation of cloud resource names.
//!
//! Two independent checks are offered. The [chars] table enforces hard per-kind length and
//! character-class limits on a literal name. The [validator] checks a name against a loaded
//! [rules::RuleSet], either with a raw regular expression or by decomposing the name into
//! hyphen-separated chunks that are matched positionally against the tokens of a
//! [template::Template].

/// Resource kinds and their canonical short codes.
pub mod kind;
pub use kind::ResourceKind;

/// Static per-kind length and character-class rules.
pub mod chars;
pub use chars::{is_valid_name, NameChars, NameRule, NameRules};

/// The `{Token}{Token?}` template mini-language that describes a name's structure.
pub mod template;
pub use template::{Template, Token, NAME_CODE};

/// The loaded and self-validated rule-set document.
pub mod rules;
pub use rules::{Constraint, Field, Rule, RuleSet, RuleSetDocument};

/// Answers whether a candidate name is valid for a resource kind.
pub mod validator;
pub use validator::{NameValidator, Rejection, Sample};

/// String-keyed store of typed configuration values.
pub mod config;
pub use config::{ConfigEnum, ConfigSet, ConfigValue};
