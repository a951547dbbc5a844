use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Cardinality and depth override for one field.
///
/// A rule is written as a bare count, a `[count, depth]` pair, or a nested
/// [`RuleTree`]. Read it through [`crate::normalize`], never directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Rule {
    /// Number of records for the field.
    Count(i64),
    /// `[count, depth]`; any other length is rejected when normalized.
    Pair(Vec<i64>),
    /// Explicit counts plus rules for nested fields.
    Tree(RuleTree),
}

/// Normalized rule mapping.
///
/// `COUNT` and `DEEP` are reserved keys; every other key carries the rule for
/// the nested field of the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleTree {
    /// Records to produce for the field; `0` leaves the field out.
    #[serde(rename = "COUNT", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    /// Maximum recursion depth below the field.
    #[serde(rename = "DEEP", default, skip_serializing_if = "Option::is_none")]
    pub deep: Option<i64>,
    /// Rules for nested fields.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Rule>,
}

impl RuleTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn deep(mut self, deep: i64) -> Self {
        self.deep = Some(deep);
        self
    }

    pub fn field(mut self, key: impl Into<String>, rule: impl Into<Rule>) -> Self {
        self.fields.insert(key.into(), rule.into());
        self
    }

    /// Raw rule for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Rule> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.count.is_none() && self.deep.is_none() && self.fields.is_empty()
    }
}

impl From<i64> for Rule {
    fn from(value: i64) -> Self {
        Rule::Count(value)
    }
}

impl From<[i64; 2]> for Rule {
    fn from(value: [i64; 2]) -> Self {
        Rule::Pair(value.to_vec())
    }
}

impl From<Vec<i64>> for Rule {
    fn from(value: Vec<i64>) -> Self {
        Rule::Pair(value)
    }
}

impl From<RuleTree> for Rule {
    fn from(value: RuleTree) -> Self {
        Rule::Tree(value)
    }
}
