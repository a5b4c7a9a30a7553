use crate::{kind::ResourceKind, template::ParseError};
use indoc::formatdoc;
use std::fmt::{self, Display};

/// A rule-set document that cannot be fully verified. Always fatal at load time.
#[derive(Debug)]
pub struct ConfigError {
    // Dotted path into the document, e.g. `rules.StorageAccount.samples[1]`
    location: String,
    message: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ConfigError { location, message } = self;
        write!(f, "invalid rule set at '{location}': {message}")
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn malformed_document(err: serde_json::Error) -> Self {
        ConfigError {
            location: String::from("document"),
            message: format!("the document could not be read: {err}"),
        }
    }

    pub fn invalid_rule_set_name(name: &str) -> Self {
        ConfigError {
            location: String::from("name"),
            message: format!("'{name}' is not a valid identifier (expected ^[A-Z][A-Za-z0-9]*$, at most 50 characters)"),
        }
    }

    pub fn invalid_field_name(name: &str) -> Self {
        ConfigError {
            location: format!("fields.{name}"),
            message: format!("'{name}' is not a valid identifier (expected ^[A-Z][A-Za-z0-9]*$, at most 50 characters)"),
        }
    }

    pub fn unknown_resource_kind(key: &str) -> Self {
        ConfigError {
            location: format!("rules.{key}"),
            message: format!("'{key}' is not a known resource kind"),
        }
    }

    pub fn duplicate_resource_kind(kind: ResourceKind) -> Self {
        ConfigError {
            location: format!("rules.{kind}"),
            message: String::from("more than one rule resolves to this resource kind"),
        }
    }

    pub fn no_fields() -> Self {
        ConfigError {
            location: String::from("fields"),
            message: String::from("at least one field must be defined"),
        }
    }

    pub fn field_without_constraint(name: &str) -> Self {
        ConfigError {
            location: format!("fields.{name}"),
            message: String::from("a field must define either 'regex' or 'values'"),
        }
    }

    pub fn field_with_both_constraints(name: &str) -> Self {
        ConfigError {
            location: format!("fields.{name}"),
            message: String::from("a field cannot define both 'regex' and 'values'"),
        }
    }

    pub fn empty_field_values(name: &str) -> Self {
        ConfigError {
            location: format!("fields.{name}.values"),
            message: String::from("at least one value must be listed"),
        }
    }

    pub fn invalid_field_value(name: &str, index: usize, value: &str) -> Self {
        ConfigError {
            location: format!("fields.{name}.values[{index}]"),
            message: format!("{value:?} must be non-empty without leading or trailing whitespace"),
        }
    }

    pub fn invalid_regex(location: String, err: regex::Error) -> Self {
        ConfigError {
            location,
            message: formatdoc! {"
                the regular expression does not compile:
                {err}"
            },
        }
    }

    pub fn rule_with_both_constraints(kind: ResourceKind) -> Self {
        ConfigError {
            location: format!("rules.{kind}"),
            message: String::from("a rule cannot define both 'regex' and 'template'"),
        }
    }

    pub fn invalid_template(kind: ResourceKind, err: &ParseError) -> Self {
        ConfigError {
            location: format!("rules.{kind}.template"),
            message: format!("the template is malformed:\n{err}"),
        }
    }

    pub fn unknown_template_token(kind: ResourceKind, token: &str) -> Self {
        ConfigError {
            location: format!("rules.{kind}.template"),
            message: format!("the template references '{token}', which is not a defined field"),
        }
    }

    pub fn missing_samples(kind: ResourceKind) -> Self {
        ConfigError {
            location: format!("rules.{kind}.samples"),
            message: String::from("at least one sample name must be listed"),
        }
    }

    pub fn invalid_sample(kind: ResourceKind, index: usize, sample: &str) -> Self {
        ConfigError {
            location: format!("rules.{kind}.samples[{index}]"),
            message: format!("{sample:?} breaks the length or character rules for {kind}"),
        }
    }
}
