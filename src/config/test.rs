use super::{ConfigSet, ConfigSetError, ConfigValue};
use crate::kind::ResourceKind;

#[test]
fn test_typed_round_trip() {
    let mut config = ConfigSet::new();
    config.upsert("Strict", true).unwrap();
    config.upsert("MaxNames", 250).unwrap();
    config.upsert("Ratio", 0.5).unwrap();
    config.upsert("RuleSet", "Default").unwrap();
    config.upsert_enum("Kind", ResourceKind::StorageAccount).unwrap();
    config.upsert_uri("Endpoint", "https://example.com/rules").unwrap();

    assert!(config.get_bool("Strict").unwrap());
    assert_eq!(config.get_int("MaxNames").unwrap(), 250);
    assert_eq!(config.get_float("Ratio").unwrap(), 0.5);
    assert_eq!(config.get_str("RuleSet").unwrap(), "Default");
    assert_eq!(
        config.get_enum::<ResourceKind>("Kind").unwrap(),
        ResourceKind::StorageAccount
    );
    assert_eq!(
        config.get_uri("Endpoint").unwrap().as_str(),
        "https://example.com/rules"
    );
    assert_eq!(
        config.get("Kind"),
        Some(&ConfigValue::Enum("StorageAccount".to_string()))
    );
}

#[test]
fn test_type_mismatch_is_an_error() {
    let mut config = ConfigSet::new();
    config.upsert("MaxNames", 250).unwrap();
    config.upsert("RuleSet", "Default").unwrap();

    assert_eq!(
        config.get_bool("MaxNames"),
        Err(ConfigSetError::TypeMismatch {
            key: "MaxNames".to_string(),
            expected: "a bool",
            actual: "an integer"
        })
    );
    assert!(config.get_int("RuleSet").is_err());
    assert!(config.get_uri("RuleSet").is_err());
    assert!(config.get_enum::<ResourceKind>("RuleSet").is_err());

    // Integers widen to floats, nothing else converts.
    assert_eq!(config.get_float("MaxNames").unwrap(), 250.0);
}

#[test]
fn test_enum_with_foreign_code() {
    let mut config = ConfigSet::new();
    config
        .dials
        .insert("Kind".to_string(), ConfigValue::Enum("Database".to_string()));

    assert!(config
        .get_enum::<ResourceKind>("Kind")
        .is_err_and(|e| e.to_string().contains("requested enum")));
}

#[test]
fn test_missing_key() {
    let config = ConfigSet::new();
    assert_eq!(
        config.get_str("RuleSet"),
        Err(ConfigSetError::Missing("RuleSet".to_string()))
    );
}

#[test]
fn test_upsert_replaces_and_validates() {
    let mut config = ConfigSet::new();
    config.upsert("MaxNames", 10).unwrap();
    config.upsert("MaxNames", 20).unwrap();
    assert_eq!(config.get_int("MaxNames").unwrap(), 20);
    assert_eq!(config.len(), 1);

    let result = config.upsert_checked("MaxNames", -1, |v| *v > 0);
    assert_eq!(result, Err(ConfigSetError::Rejected("MaxNames".to_string())));
    assert_eq!(config.get_int("MaxNames").unwrap(), 20);

    // The replacement may change the value's type.
    config.upsert("MaxNames", "lots").unwrap();
    assert_eq!(config.get_str("MaxNames").unwrap(), "lots");
}

#[test]
fn test_invalid_keys() {
    let mut config = ConfigSet::new();
    for key in ["", " Key", "Key "] {
        assert_eq!(
            config.upsert(key, true),
            Err(ConfigSetError::InvalidKey(key.to_string()))
        );
    }
    assert!(config.upsert_uri(" ", "https://example.com").is_err());
    assert!(config.is_empty());
}

#[test]
fn test_relative_uri_is_rejected() {
    let mut config = ConfigSet::new();
    let result = config.upsert_uri("Endpoint", "/rules/default.json");
    assert!(result.is_err_and(|e| e.to_string().contains("not an absolute URI")));
    assert!(!config.contains_key("Endpoint"));
}

#[test]
fn test_contains_keys_requires_exact_set() {
    let mut config = ConfigSet::new();
    config.upsert("A", 1).unwrap();
    config.upsert("B", 2).unwrap();

    assert!(config.contains_keys(&["A", "B"]));
    assert!(config.contains_keys(&["B", "A"]));
    assert!(!config.contains_keys(&["A"]));
    assert!(!config.contains_keys(&["A", "C"]));
    assert!(!config.contains_keys(&["A", "B", "C"]));

    let map = config.to_map();
    assert_eq!(map.get("B"), Some(&ConfigValue::Int(2)));
}

#[test]
fn test_checked_enum_and_uri() {
    let mut config = ConfigSet::new();

    let storage_only = |kind: &ResourceKind| *kind == ResourceKind::StorageAccount;
    assert_eq!(
        config.upsert_enum_checked("Kind", ResourceKind::Subnet, storage_only),
        Err(ConfigSetError::Rejected("Kind".to_string()))
    );
    config
        .upsert_enum_checked("Kind", ResourceKind::StorageAccount, storage_only)
        .unwrap();
    assert_eq!(
        config.get_enum::<ResourceKind>("Kind").unwrap(),
        ResourceKind::StorageAccount
    );

    let https_only = |uri: &url::Url| uri.scheme() == "https";
    assert_eq!(
        config.upsert_uri_checked("Endpoint", "http://example.com/rules", https_only),
        Err(ConfigSetError::Rejected("Endpoint".to_string()))
    );
    assert!(config
        .upsert_uri_checked("Endpoint", "not a uri", https_only)
        .is_err_and(|e| matches!(e, ConfigSetError::InvalidUri { .. })));
    config
        .upsert_uri_checked("Endpoint", "https://example.com/rules", https_only)
        .unwrap();
    assert_eq!(config.get_uri("Endpoint").unwrap().path(), "/rules");
    assert_eq!(config.len(), 2);
}
