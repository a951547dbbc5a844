use modelfaker_rules::{IssueSeverity, rules_json_schema, validate_rules, validate_rules_json};
use serde_json::json;

fn schema() -> serde_json::Value {
    serde_json::to_value(rules_json_schema()).expect("serialize schema")
}

#[test]
fn well_formed_rules_pass_the_schema() {
    let rules = json!({
        "COUNT": 1,
        "address": 2,
        "friends": [3, 1],
        "child": {"DEEP": 2, "pets": {"COUNT": 0}}
    });

    let report = validate_rules_json(&rules, &schema()).expect("validate");
    assert!(report.is_ok(), "unexpected errors: {:?}", report.errors);

    let validated = validate_rules(&rules).expect("validated");
    assert!(validated.warnings.is_empty());
    assert_eq!(validated.rules.count, Some(1));
}

#[test]
fn schema_violations_point_at_the_offending_field() {
    let rules = json!({"child": {"DEEP": "deep"}, "address": "two"});

    let report = validate_rules(&rules).expect_err("should fail");
    assert!(!report.errors.is_empty());
    assert!(report.errors.iter().all(|issue| issue.code == "schema_violation"));
    assert!(
        report
            .errors
            .iter()
            .any(|issue| issue.path.starts_with("/child") || issue.path.starts_with("/address"))
    );
}

#[test]
fn three_element_pairs_are_rejected() {
    let report = validate_rules(&json!({"friends": [1, 2, 3]})).expect_err("should fail");
    let issue = report.errors.first().expect("error issue");
    assert_eq!(issue.code, "malformed_pair");
    assert_eq!(issue.path, "/friends");
    assert_eq!(issue.severity, IssueSeverity::Error);
}

#[test]
fn negative_counts_produce_warnings() {
    let validated =
        validate_rules(&json!({"address": -1, "child": {"COUNT": -2}})).expect("validated");
    let paths: Vec<&str> = validated
        .warnings
        .iter()
        .map(|issue| issue.path.as_str())
        .collect();
    assert_eq!(paths, vec!["/address", "/child/COUNT"]);
}

#[test]
fn failing_reports_keep_warnings_alongside_errors() {
    let report = validate_rules(&json!({"address": -1, "friends": [1, 2, 3]}))
        .expect_err("should fail");
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].path, "/friends");
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].code, "negative_count");
}
