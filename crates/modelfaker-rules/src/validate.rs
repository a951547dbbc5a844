use jsonschema::JSONSchema;
use serde_json::Value;

use crate::errors::{IssueSeverity, RuleError, ValidationIssue, ValidationReport};
use crate::normalize::normalize;
use crate::rule::{Rule, RuleTree};
use crate::schema::rules_json_schema;

/// Parsed rule document with accumulated warnings.
#[derive(Debug, Clone)]
pub struct ValidatedRules {
    pub rules: RuleTree,
    pub warnings: Vec<ValidationIssue>,
}

/// Validate a rule document against a rule JSON Schema.
pub fn validate_rules_json(
    rules_json: &Value,
    rules_schema: &Value,
) -> Result<ValidationReport, RuleError> {
    let compiled =
        JSONSchema::compile(rules_schema).map_err(|err| RuleError::Schema(err.to_string()))?;

    let mut report = ValidationReport::default();

    if let Err(errors) = compiled.validate(rules_json) {
        for error in errors {
            let path = normalized_json_pointer(&error.instance_path.to_string());
            report.push_error(ValidationIssue::new(
                IssueSeverity::Error,
                "schema_violation",
                path,
                error.to_string(),
                None,
            ));
        }
    }

    Ok(report)
}

/// Checks the schema cannot express: pair arity and negative counts.
pub fn validate_rule_tree(rules: &RuleTree) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_tree(rules, "", &mut report);
    report
}

/// Validate a rule document end-to-end against the built-in schema.
pub fn validate_rules(rules_json: &Value) -> Result<ValidatedRules, ValidationReport> {
    let schema = match serde_json::to_value(rules_json_schema()) {
        Ok(schema) => schema,
        Err(err) => return Err(single_error("schema_serialization_error", err.to_string())),
    };

    let structural = match validate_rules_json(rules_json, &schema) {
        Ok(report) => report,
        Err(err) => return Err(single_error("schema_validation_error", err.to_string())),
    };
    if !structural.is_ok() {
        return Err(structural);
    }

    let rules: RuleTree = match serde_json::from_value(rules_json.clone()) {
        Ok(rules) => rules,
        Err(err) => return Err(single_error("invalid_rules_json", err.to_string())),
    };

    let mut report = structural;
    report.merge(validate_rule_tree(&rules));
    if !report.is_ok() {
        return Err(report);
    }

    Ok(ValidatedRules {
        rules,
        warnings: report.warnings,
    })
}

fn check_tree(tree: &RuleTree, base_path: &str, report: &mut ValidationReport) {
    if let Some(count) = tree.count.filter(|count| *count < 0) {
        report.push_warning(negative_count(format!("{base_path}/COUNT"), count));
    }
    for (key, rule) in &tree.fields {
        let path = format!("{base_path}/{}", escape_pointer_token(key));
        match rule {
            Rule::Count(count) if *count < 0 => {
                report.push_warning(negative_count(path, *count));
            }
            Rule::Count(_) => {}
            Rule::Pair(values) => {
                if let Err(err) = normalize(Some(rule)) {
                    report.push_error(ValidationIssue::new(
                        IssueSeverity::Error,
                        "malformed_pair",
                        path,
                        err.to_string(),
                        Some("use [count, depth] or an object with COUNT and DEEP".to_string()),
                    ));
                } else if values.first().is_some_and(|count| *count < 0) {
                    report.push_warning(negative_count(format!("{path}/0"), values[0]));
                }
            }
            Rule::Tree(nested) => check_tree(nested, &path, report),
        }
    }
}

fn negative_count(path: String, count: i64) -> ValidationIssue {
    ValidationIssue::new(
        IssueSeverity::Warning,
        "negative_count",
        path,
        format!("count {count} is negative and will be treated as 0"),
        Some("use 0 to leave the field out".to_string()),
    )
}

fn single_error(code: &str, message: String) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.push_error(ValidationIssue::new(
        IssueSeverity::Error,
        code,
        "/",
        message,
        None,
    ));
    report
}

fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}
