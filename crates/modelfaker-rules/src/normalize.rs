use serde_json::Value;

use crate::errors::{Result, RuleError};
use crate::rule::{Rule, RuleTree};

/// Canonical form of a rule value.
///
/// A count becomes `{COUNT}`, a pair becomes `{COUNT, DEEP}`, a tree is kept and
/// an absent rule is empty. Negative counts clamp to zero.
pub fn normalize(rule: Option<&Rule>) -> Result<RuleTree> {
    let mut tree = match rule {
        None => RuleTree::default(),
        Some(Rule::Count(count)) => RuleTree::new().count(*count),
        Some(Rule::Pair(values)) => match values.as_slice() {
            [count, deep] => RuleTree::new().count(*count).deep(*deep),
            _ => return Err(RuleError::Malformed { len: values.len() }),
        },
        Some(Rule::Tree(tree)) => tree.clone(),
    };
    tree.count = tree.count.map(|count| count.max(0));
    Ok(tree)
}

/// Normalized rule for field `key` of `parent`.
pub fn child(parent: &RuleTree, key: &str) -> Result<RuleTree> {
    normalize(parent.get(key))
}

/// Parse a rule document.
pub fn rules_from_json(value: &Value) -> Result<RuleTree> {
    if value.is_null() {
        return Ok(RuleTree::default());
    }
    let rule: Rule = serde_json::from_value(value.clone())?;
    normalize(Some(&rule))
}

pub fn rules_from_str(contents: &str) -> Result<RuleTree> {
    let value: Value = serde_json::from_str(contents)?;
    rules_from_json(&value)
}
