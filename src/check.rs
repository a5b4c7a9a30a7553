use crate::{
    cli::{NamesArgs, SamplesArgs},
    scanner,
    tty::{init_output_writer, OutputWriter, TtyContext},
};
use anyhow::{Context, Result};
use azname::{
    validator::DEFAULT_RULE_SET, NameRules, NameValidator, ResourceKind, RuleSet, Template,
};
use std::{fs, path::Path};

/// Loads the character-class table from `path`, or the built-in one.
pub fn load_name_rules(path: Option<&Path>) -> Result<NameRules> {
    let Some(path) = path else {
        return Ok(NameRules::standard().clone());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read character-class table {}", path.display()))?;
    NameRules::from_json(&json)
        .with_context(|| format!("failed to load character-class table {}", path.display()))
}

/// Loads and verifies the rule set from `path`, or the built-in one.
pub fn load_validator(path: Option<&Path>, name_rules: &NameRules) -> Result<NameValidator> {
    let (json, origin) = match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read rule set {}", path.display()))?;
            (json, path.display().to_string())
        }
        None => (DEFAULT_RULE_SET.to_string(), String::from("<built-in>")),
    };
    let rule_set = RuleSet::from_json(&json, name_rules)
        .with_context(|| format!("failed to load rule set {origin}"))?;
    Ok(NameValidator::new(rule_set))
}

/// Judges every candidate name from the command line, the listed files, or stdin, and
/// writes one verdict per name. `judge` returns the reason a name is invalid. Returns the
/// number of invalid names.
pub fn check_names<F>(
    tty: &TtyContext,
    line_buffered: bool,
    args: &NamesArgs,
    judge: F,
) -> Result<usize>
where
    F: Fn(&str, ResourceKind) -> Option<String>,
{
    let NamesArgs { kind, names, file } = args;

    let scanner = scanner::init(names, file)?;
    let mut writer = init_output_writer(tty, line_buffered);
    let mut failures = 0;

    for name in scanner {
        let reason = judge(&name, *kind);
        if reason.is_some() {
            failures += 1;
        }
        writer.write_verdict(&name, reason.as_deref())?;
    }
    log::debug!("{failures} invalid names");
    Ok(failures)
}

pub fn list_samples(
    tty: &TtyContext,
    line_buffered: bool,
    validator: &NameValidator,
    args: &SamplesArgs,
) -> Result<usize> {
    let samples = validator.samples(args.kind);
    let mut writer = init_output_writer(tty, line_buffered);

    if args.json {
        let json = serde_json::to_string_pretty(&samples).context("failed to serialize samples")?;
        writer.writeln(&json)?;
        return Ok(0);
    }
    for sample in samples {
        writer.writeln(&format!("{}\t{}", sample.kind, sample.name))?;
    }
    Ok(0)
}

/// Runs every declared sample through the validator for its own kind.
pub fn self_test(tty: &TtyContext, line_buffered: bool, validator: &NameValidator) -> Result<usize> {
    let mut writer = init_output_writer(tty, line_buffered);
    let mut failures = 0;

    for sample in validator.samples(None) {
        let reason = validator
            .rejection(&sample.name, sample.kind)
            .map(|rejection| rejection.to_string());
        if reason.is_some() {
            failures += 1;
        }
        writer.write_verdict(&format!("{} {}", sample.kind, sample.name), reason.as_deref())?;
    }
    log::info!(
        "self-test of rule set '{}' finished with {failures} failures",
        validator.rule_set().name()
    );
    Ok(failures)
}

/// Prints the tokens of `source`, or the reason it is not a valid template.
pub fn describe_template(tty: &TtyContext, source: &str) -> Result<usize> {
    let template = Template::parse(source);
    let mut writer = init_output_writer(tty, true);

    if let Some(e) = template.error() {
        writer.writeln(&e.to_string())?;
        return Ok(1);
    }
    for (position, token) in template.tokens().iter().enumerate() {
        let optional = if token.is_optional { " (optional)" } else { "" };
        writer.writeln(&format!("{position}\t{}{optional}", token.name))?;
    }
    Ok(0)
}
