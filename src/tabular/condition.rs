//! Filter expressions for `GetTable`
//!
//! A [`Condition`] is a recursive tree: each entry in `cases` is either a
//! leaf [`Filter`] or a nested [`Condition`], combined with the node's
//! [`LogicalOperator`]. The client never evaluates the tree; it only has to
//! serialize it in the exact shape the server expects:
//!
//! ```json
//! {
//!   "cases": [
//!     { "column": "age", "operator": "gte", "value": "18" },
//!     { "cases": [ ... ], "logicalOperator": "or" }
//!   ],
//!   "logicalOperator": "and"
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Comparison applied by a single [`Filter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Neq,
    Like,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Operator {
    /// Wire token for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Like => "like",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the entries of a [`Condition`] are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

/// Leaf comparison: `column operator value`
///
/// `column` is not checked against the table schema and `value` is not
/// type-checked against the column type; the server does both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Filter {
    pub column: String,
    pub operator: Operator,
    pub value: String,
}

impl Filter {
    pub fn new(column: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Filter {
            column: column.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, Operator::Eq, value)
    }

    pub fn neq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, Operator::Neq, value)
    }

    pub fn like(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, Operator::Like, value)
    }

    pub fn lt(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, Operator::Lt, value)
    }

    pub fn lte(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, Operator::Lte, value)
    }

    pub fn gt(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, Operator::Gt, value)
    }

    pub fn gte(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, Operator::Gte, value)
    }
}

/// One entry of [`Condition::cases`]
///
/// Untagged on the wire: the node kind is implied by which fields are
/// present. `Filter` is tried first. Both kinds reject unknown fields, so a
/// node mixing leaf and group keys fails instead of losing half its keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Case {
    Filter(Filter),
    Condition(Condition),
}

impl From<Filter> for Case {
    fn from(filter: Filter) -> Self {
        Case::Filter(filter)
    }
}

impl From<Condition> for Case {
    fn from(condition: Condition) -> Self {
        Case::Condition(condition)
    }
}

/// Boolean filter tree over named columns
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Condition {
    pub cases: Vec<Case>,
    pub logical_operator: LogicalOperator,
}

/// The "all rows" condition: an `and` over zero cases
pub const EMPTY_CONDITION: Condition = Condition {
    cases: Vec::new(),
    logical_operator: LogicalOperator::And,
};

impl Condition {
    pub fn new(logical_operator: LogicalOperator, cases: Vec<Case>) -> Self {
        Condition {
            cases,
            logical_operator,
        }
    }

    /// `and` over the given cases
    pub fn all<I, C>(cases: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Case>,
    {
        Self::new(
            LogicalOperator::And,
            cases.into_iter().map(Into::into).collect(),
        )
    }

    /// `or` over the given cases
    pub fn any<I, C>(cases: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Case>,
    {
        Self::new(
            LogicalOperator::Or,
            cases.into_iter().map(Into::into).collect(),
        )
    }

    /// Append a case, keeping insertion order
    pub fn with(mut self, case: impl Into<Case>) -> Self {
        self.cases.push(case.into());
        self
    }

    /// True when this condition filters nothing out
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
