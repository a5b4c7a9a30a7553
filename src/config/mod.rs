use crate::kind::ResourceKind;
use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};
use url::Url;

#[cfg(test)]
mod test;

/// A typed configuration value. Getters never convert between variants, except that an
/// [ConfigValue::Int] may be read as a float.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i32),
    Float(f64),
    /// The code of an enumerant; see [ConfigEnum].
    Enum(String),
    Str(String),
    Uri(Url),
}

/// Enumerations that can be stored in a [ConfigSet] by code.
pub trait ConfigEnum: Sized {
    fn to_code(&self) -> String;
    fn from_code(code: &str) -> Option<Self>;
}

impl ConfigEnum for ResourceKind {
    fn to_code(&self) -> String {
        self.name().to_string()
    }

    fn from_code(code: &str) -> Option<Self> {
        code.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSetError {
    InvalidKey(String),
    Rejected(String),
    InvalidUri { key: String, reason: String },
    Missing(String),
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl Display for ConfigSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey(key) => {
                write!(f, "configuration key {key:?} must be non-empty and trimmed")
            }
            Self::Rejected(key) => write!(f, "the value for '{key}' was rejected"),
            Self::InvalidUri { key, reason } => {
                write!(f, "the value for '{key}' is not an absolute URI: {reason}")
            }
            Self::Missing(key) => write!(f, "no value is configured for '{key}'"),
            Self::TypeMismatch {
                key,
                expected,
                actual,
            } => write!(f, "'{key}' holds {actual} but {expected} was requested"),
        }
    }
}

impl std::error::Error for ConfigSetError {}

impl ConfigValue {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "a bool",
            Self::Int(_) => "an integer",
            Self::Float(_) => "a float",
            Self::Enum(_) => "an enum code",
            Self::Str(_) => "a string",
            Self::Uri(_) => "a URI",
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Url> for ConfigValue {
    fn from(value: Url) -> Self {
        Self::Uri(value)
    }
}

/// String-keyed store of [ConfigValue]s.
#[derive(Debug, Clone, Default)]
pub struct ConfigSet {
    dials: BTreeMap<String, ConfigValue>,
}

impl ConfigSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value for `key`.
    pub fn upsert<V>(&mut self, key: &str, value: V) -> Result<(), ConfigSetError>
    where
        V: Into<ConfigValue>,
    {
        self.upsert_checked(key, value, |_| true)
    }

    /// Like [ConfigSet::upsert], but `validate` may reject the value first.
    pub fn upsert_checked<V, F>(
        &mut self,
        key: &str,
        value: V,
        validate: F,
    ) -> Result<(), ConfigSetError>
    where
        V: Into<ConfigValue>,
        F: FnOnce(&V) -> bool,
    {
        check_key(key)?;
        if !validate(&value) {
            return Err(ConfigSetError::Rejected(key.to_string()));
        }
        self.dials.insert(key.to_string(), value.into());
        Ok(())
    }

    pub fn upsert_enum<E>(&mut self, key: &str, value: E) -> Result<(), ConfigSetError>
    where
        E: ConfigEnum,
    {
        self.upsert_enum_checked(key, value, |_| true)
    }

    pub fn upsert_enum_checked<E, F>(
        &mut self,
        key: &str,
        value: E,
        validate: F,
    ) -> Result<(), ConfigSetError>
    where
        E: ConfigEnum,
        F: FnOnce(&E) -> bool,
    {
        check_key(key)?;
        if !validate(&value) {
            return Err(ConfigSetError::Rejected(key.to_string()));
        }
        self.dials
            .insert(key.to_string(), ConfigValue::Enum(value.to_code()));
        Ok(())
    }

    /// Parses `value` as an absolute URI before storing it.
    pub fn upsert_uri(&mut self, key: &str, value: &str) -> Result<(), ConfigSetError> {
        self.upsert_uri_checked(key, value, |_| true)
    }

    /// Like [ConfigSet::upsert_uri]; `validate` sees the parsed URI.
    pub fn upsert_uri_checked<F>(
        &mut self,
        key: &str,
        value: &str,
        validate: F,
    ) -> Result<(), ConfigSetError>
    where
        F: FnOnce(&Url) -> bool,
    {
        check_key(key)?;
        let uri = Url::parse(value).map_err(|e| ConfigSetError::InvalidUri {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        if !validate(&uri) {
            return Err(ConfigSetError::Rejected(key.to_string()));
        }
        self.dials.insert(key.to_string(), ConfigValue::Uri(uri));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.dials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dials.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.dials.contains_key(key)
    }

    /// Whether the set holds exactly `keys`, no more and no fewer.
    pub fn contains_keys(&self, keys: &[&str]) -> bool {
        self.len() == keys.len() && keys.iter().all(|key| self.contains_key(key))
    }

    pub fn to_map(&self) -> BTreeMap<String, ConfigValue> {
        self.dials.clone()
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.dials.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigSetError> {
        match self.lookup(key)? {
            ConfigValue::Bool(value) => Ok(*value),
            other => Err(mismatch(key, "a bool", other)),
        }
    }

    pub fn get_int(&self, key: &str) -> Result<i32, ConfigSetError> {
        match self.lookup(key)? {
            ConfigValue::Int(value) => Ok(*value),
            other => Err(mismatch(key, "an integer", other)),
        }
    }

    pub fn get_float(&self, key: &str) -> Result<f64, ConfigSetError> {
        match self.lookup(key)? {
            ConfigValue::Float(value) => Ok(*value),
            ConfigValue::Int(value) => Ok(f64::from(*value)),
            other => Err(mismatch(key, "a float", other)),
        }
    }

    pub fn get_enum<E: ConfigEnum>(&self, key: &str) -> Result<E, ConfigSetError> {
        match self.lookup(key)? {
            ConfigValue::Enum(code) => {
                E::from_code(code).ok_or_else(|| ConfigSetError::TypeMismatch {
                    key: key.to_string(),
                    expected: "a code of the requested enum",
                    actual: "an enum code",
                })
            }
            other => Err(mismatch(key, "an enum code", other)),
        }
    }

    pub fn get_str(&self, key: &str) -> Result<&str, ConfigSetError> {
        match self.lookup(key)? {
            ConfigValue::Str(value) => Ok(value),
            other => Err(mismatch(key, "a string", other)),
        }
    }

    pub fn get_uri(&self, key: &str) -> Result<&Url, ConfigSetError> {
        match self.lookup(key)? {
            ConfigValue::Uri(value) => Ok(value),
            other => Err(mismatch(key, "a URI", other)),
        }
    }

    fn lookup(&self, key: &str) -> Result<&ConfigValue, ConfigSetError> {
        self.dials
            .get(key)
            .ok_or_else(|| ConfigSetError::Missing(key.to_string()))
    }
}

fn check_key(key: &str) -> Result<(), ConfigSetError> {
    if key.is_empty() || key.trim() != key {
        return Err(ConfigSetError::InvalidKey(key.to_string()));
    }
    Ok(())
}

fn mismatch(key: &str, expected: &'static str, actual: &ConfigValue) -> ConfigSetError {
    ConfigSetError::TypeMismatch {
        key: key.to_string(),
        expected,
        actual: actual.type_name(),
    }
}
