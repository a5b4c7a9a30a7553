use super::{ConfigError, Constraint, Field, RuleSet};
use crate::{chars::NameRules, kind::ResourceKind};
use serde_json::{json, Value};

const DEFAULT_RULE_SET: &str = include_str!("../../rules/default.json");

/// A small, valid document that individual tests break in one place.
fn base_document() -> Value {
    json!({
        "name": "Test",
        "fields": {
            "Workload": { "regex": "^[a-z]+$" },
            "Environment": { "values": ["dev", "prod"] }
        },
        "rules": {
            "Subnet": {
                "template": "{NameCode}{Workload}{Environment}",
                "samples": ["snet-web-prod"]
            },
            "StorageAccount": {
                "regex": "^st[a-z0-9]+$",
                "samples": ["st12345"]
            },
            "PublicIPAddress": {
                "samples": ["pip-anything-1"]
            }
        }
    })
}

fn load(document: &Value) -> anyhow::Result<RuleSet> {
    RuleSet::from_json(&document.to_string(), NameRules::standard())
}

fn config_error(document: &Value) -> (String, String) {
    let err = load(document).unwrap_err();
    let config_error = err
        .downcast_ref::<ConfigError>()
        .expect("expected a ConfigError");
    (
        config_error.location().to_string(),
        config_error.message().to_string(),
    )
}

#[test]
fn test_load_default_rule_set() {
    let rule_set = RuleSet::from_json(DEFAULT_RULE_SET, NameRules::standard()).unwrap();
    assert_eq!(rule_set.name(), "Default");
    assert_eq!(rule_set.fields().len(), 5);
    assert_eq!(rule_set.rules().count(), ResourceKind::ALL.len());

    let rule = rule_set.rule(ResourceKind::StorageAccount).unwrap();
    assert!(matches!(rule.constraint(), Constraint::Pattern(_)));
    assert_eq!(rule.samples(), ["stpayrollprod001", "st12345"]);
}

#[test]
fn test_load_base_document() {
    let rule_set = load(&base_document()).unwrap();

    let Constraint::Template(template) = rule_set.rule(ResourceKind::Subnet).unwrap().constraint()
    else {
        panic!("expected a template rule");
    };
    assert_eq!(template.to_string(), "{NameCode}{Workload}{Environment}");

    assert!(matches!(
        rule_set.rule(ResourceKind::PublicIpAddress).unwrap().constraint(),
        Constraint::Unconstrained
    ));
    assert!(rule_set.rule(ResourceKind::ResourceGroup).is_none());
}

#[test]
fn test_rules_iterate_in_kind_order() {
    let rule_set = load(&base_document()).unwrap();
    let kinds = rule_set.rules().map(|(kind, _)| kind).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        [
            ResourceKind::StorageAccount,
            ResourceKind::Subnet,
            ResourceKind::PublicIpAddress
        ]
    );
}

#[test]
fn test_field_matches() {
    let rule_set = load(&base_document()).unwrap();

    let workload = rule_set.field("Workload").unwrap();
    assert!(workload.matches("web"));
    assert!(!workload.matches("web1"));

    let environment = rule_set.field("Environment").unwrap();
    assert!(matches!(environment, Field::Values(_)));
    assert!(environment.matches("prod"));
    assert!(!environment.matches("Prod"));
    assert!(!environment.matches("pro"));
}

#[test]
fn test_empty_fields_fail_to_load() {
    let mut document = base_document();
    document["fields"] = json!({});
    document["rules"] = json!({ "PublicIPAddress": { "samples": ["pip-1"] } });

    let (location, message) = config_error(&document);
    assert_eq!(location, "fields");
    assert!(message.contains("at least one field"));
}

#[test]
fn test_missing_fields_fail_to_load() {
    let mut document = base_document();
    document.as_object_mut().unwrap().remove("fields");
    document["rules"] = json!({});

    let (location, _) = config_error(&document);
    assert_eq!(location, "fields");
}

#[test]
fn test_invalid_identifiers() {
    let mut document = base_document();
    document["name"] = json!("test");
    assert_eq!(config_error(&document).0, "name");

    let mut document = base_document();
    document["name"] = json!("T".repeat(51));
    assert_eq!(config_error(&document).0, "name");

    let mut document = base_document();
    document["fields"]["work_load"] = json!({ "regex": "x" });
    assert_eq!(config_error(&document).0, "fields.work_load");
}

#[test]
fn test_unknown_resource_kind() {
    let mut document = base_document();
    document["rules"]["Database"] = json!({ "samples": ["db1"] });

    let (location, message) = config_error(&document);
    assert_eq!(location, "rules.Database");
    assert!(message.contains("not a known resource kind"));
}

#[test]
fn test_duplicate_resource_kind() {
    let mut document = base_document();
    document["rules"]["subnet"] = json!({ "samples": ["snet-1"] });

    let (location, message) = config_error(&document);
    assert_eq!(location, "rules.Subnet");
    assert!(message.contains("more than one rule"));
}

#[test]
fn test_invalid_fields() {
    let mut document = base_document();
    document["fields"]["Region"] = json!({});
    let (location, message) = config_error(&document);
    assert_eq!(location, "fields.Region");
    assert!(message.contains("either 'regex' or 'values'"));

    let mut document = base_document();
    document["fields"]["Region"] = json!({ "regex": "^[a-z]+$", "values": ["eastus"] });
    assert!(config_error(&document).1.contains("both 'regex' and 'values'"));

    let mut document = base_document();
    document["fields"]["Region"] = json!({ "values": [] });
    assert_eq!(config_error(&document).0, "fields.Region.values");

    let mut document = base_document();
    document["fields"]["Region"] = json!({ "values": ["eastus", " westus"] });
    assert_eq!(config_error(&document).0, "fields.Region.values[1]");

    let mut document = base_document();
    document["fields"]["Region"] = json!({ "values": ["eastus", ""] });
    assert_eq!(config_error(&document).0, "fields.Region.values[1]");
}

#[test]
fn test_invalid_regexes() {
    let mut document = base_document();
    document["fields"]["Workload"] = json!({ "regex": "([a-z]+" });
    let (location, message) = config_error(&document);
    assert_eq!(location, "fields.Workload.regex");
    assert!(message.contains("does not compile"));

    let mut document = base_document();
    document["rules"]["StorageAccount"]["regex"] = json!("st[");
    assert_eq!(config_error(&document).0, "rules.StorageAccount.regex");
}

#[test]
fn test_rule_with_regex_and_template() {
    let mut document = base_document();
    document["rules"]["Subnet"]["regex"] = json!("^snet-.*$");

    let (location, message) = config_error(&document);
    assert_eq!(location, "rules.Subnet");
    assert!(message.contains("both 'regex' and 'template'"));
}

#[test]
fn test_invalid_template() {
    let mut document = base_document();
    document["rules"]["Subnet"]["template"] = json!("{NameCode} {Workload}");
    let (location, message) = config_error(&document);
    assert_eq!(location, "rules.Subnet.template");
    assert!(message.contains("Whitespace is not permitted"));

    let mut document = base_document();
    document["rules"]["Subnet"]["template"] = json!("");
    assert!(config_error(&document).1.contains("at least one token"));
}

#[test]
fn test_template_with_unknown_token() {
    let mut document = base_document();
    document["rules"]["Subnet"]["template"] = json!("{NameCode}{Workload}{Region}");

    let (location, message) = config_error(&document);
    assert_eq!(location, "rules.Subnet.template");
    assert!(message.contains("'Region'"));
}

#[test]
fn test_samples_are_checked_against_character_rules() {
    let mut document = base_document();
    document["rules"]["StorageAccount"]["samples"] = json!(["st12345", "ST-1"]);

    let (location, message) = config_error(&document);
    assert_eq!(location, "rules.StorageAccount.samples[1]");
    assert!(message.contains("StorageAccount"));

    let mut document = base_document();
    document["rules"]["Subnet"]["samples"] = json!([]);
    assert_eq!(config_error(&document).0, "rules.Subnet.samples");

    let mut document = base_document();
    document["rules"]["Subnet"]
        .as_object_mut()
        .unwrap()
        .remove("samples");
    assert_eq!(config_error(&document).0, "rules.Subnet.samples");
}

#[test]
fn test_samples_are_checked_against_custom_character_table() {
    let name_rules = NameRules::from_json(
        r#"[
            { "kind": "Subnet", "minLength": 1, "maxLength": 8, "chars": "LowerAlpha|Hyphen" },
            { "kind": "StorageAccount", "minLength": 3, "maxLength": 24, "chars": "LowerAlpha|Digit" },
            { "kind": "PublicIPAddress", "minLength": 1, "maxLength": 80, "chars": "Alphanumeric|Hyphen" }
        ]"#,
    )
    .unwrap();

    let err = RuleSet::from_json(&base_document().to_string(), &name_rules).unwrap_err();
    assert!(err.to_string().contains("rules.Subnet.samples[0]"));
}

#[test]
fn test_malformed_documents() {
    let err = RuleSet::from_json("{ not json", NameRules::standard()).unwrap_err();
    assert!(err.to_string().contains("could not be read"));

    let mut document = base_document();
    document["version"] = json!("1.0");
    let (location, message) = config_error(&document);
    assert_eq!(location, "document");
    assert!(message.contains("version"));
}

#[test]
fn test_pascal_case_properties() {
    let document = json!({
        "Name": "Test",
        "Fields": {
            "Workload": { "Regex": "^[a-z]+$" },
            "Environment": { "Values": ["dev", "prod"] }
        },
        "Rules": {
            "Subnet": {
                "Template": "{NameCode}{Workload}{Environment}",
                "Samples": ["snet-web-prod"]
            },
            "StorageAccount": {
                "Regex": "^st[a-z0-9]+$",
                "Samples": ["st12345"]
            }
        }
    });
    let rule_set = load(&document).unwrap();
    assert_eq!(rule_set.name(), "Test");
    assert!(matches!(rule_set.field("Environment"), Some(Field::Values(_))));
    assert!(matches!(
        rule_set.rule(ResourceKind::Subnet).map(|r| r.constraint()),
        Some(Constraint::Template(_))
    ));
    assert_eq!(rule_set.rule(ResourceKind::StorageAccount).unwrap().samples(), ["st12345"]);
}

#[test]
fn test_short_identifier_boundaries() {
    let mut document = base_document();
    document["name"] = json!(format!("T{}", "x".repeat(49)));
    assert!(load(&document).is_ok());

    let mut document = base_document();
    document["name"] = json!("Rule-Set");
    assert_eq!(config_error(&document).0, "name");
}
