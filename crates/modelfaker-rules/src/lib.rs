//! Per-call rules controlling how many records a reference field produces and
//! how deep recursive references may go.

pub mod errors;
pub mod normalize;
pub mod rule;
pub mod schema;
pub mod validate;

pub use errors::{IssueSeverity, Result, RuleError, ValidationIssue, ValidationReport};
pub use normalize::{child, normalize, rules_from_json, rules_from_str};
pub use rule::{Rule, RuleTree};
pub use schema::rules_json_schema;
pub use validate::{ValidatedRules, validate_rule_tree, validate_rules, validate_rules_json};
