//! Segmentation rule model
//!
//! A rule set filters customers by attribute conditions. Conditions are
//! ordered; the connector joining conditions `i` and `i + 1` lives at
//! `connectors[i]`. Gaps without an explicit connector fall back to the
//! rule set's global `logic`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SegmentError};

/// Logical connector between adjacent conditions.
///
/// Doubles as the "global logic": the default connector value used to fill
/// gaps that have no explicit override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Logic {
    /// All joined conditions must match
    #[default]
    #[serde(rename = "AND")]
    And,
    /// Any joined condition may match
    #[serde(rename = "OR")]
    Or,
}

impl Logic {
    /// Parse a connector from string (case-insensitive)
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            _ => Err(SegmentError::UnknownLogic(s.to_string())),
        }
    }

    /// Wire name ("AND" / "OR")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Customer attribute a condition filters on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Lifetime spend
    #[default]
    TotalSpending,
    /// Number of store visits
    VisitCount,
    /// Number of emails sent to the customer
    EmailCount,
    /// Date of the most recent visit
    LastVisit,
    /// Email address (substring match)
    Email,
}

impl Field {
    /// Parse a field from its wire name
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "totalSpending" => Ok(Self::TotalSpending),
            "visitCount" => Ok(Self::VisitCount),
            "emailCount" => Ok(Self::EmailCount),
            "lastVisit" => Ok(Self::LastVisit),
            "email" => Ok(Self::Email),
            _ => Err(SegmentError::UnknownField(s.to_string())),
        }
    }

    /// Wire name (camelCase)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TotalSpending => "totalSpending",
            Self::VisitCount => "visitCount",
            Self::EmailCount => "emailCount",
            Self::LastVisit => "lastVisit",
            Self::Email => "email",
        }
    }

    /// Whether this field compares numerically
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::TotalSpending | Self::VisitCount | Self::EmailCount)
    }

    /// Default operator used when a condition on this field has none
    pub fn default_operator(&self) -> Operator {
        match self {
            Self::LastVisit => Operator::Before,
            _ => Operator::Gte,
        }
    }

    /// Default value used when a condition on this field has none
    pub fn default_value(&self) -> ConditionValue {
        match self {
            Self::LastVisit => ConditionValue::Text(String::new()),
            _ => ConditionValue::Number(0.into()),
        }
    }
}

/// Filter operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Greater than
    #[serde(rename = ">")]
    Gt,
    /// Greater than or equal
    #[serde(rename = ">=")]
    Gte,
    /// Less than
    #[serde(rename = "<")]
    Lt,
    /// Less than or equal
    #[serde(rename = "<=")]
    Lte,
    /// Equal
    #[serde(rename = "=")]
    Eq,
    /// Date is before
    #[serde(rename = "before")]
    Before,
    /// Date is after
    #[serde(rename = "after")]
    After,
    /// Contains substring
    #[serde(rename = "contains")]
    Contains,
}

impl Operator {
    /// Parse an operator from string (symbols or word aliases)
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            ">" | "gt" => Ok(Self::Gt),
            ">=" | "gte" => Ok(Self::Gte),
            "<" | "lt" => Ok(Self::Lt),
            "<=" | "lte" => Ok(Self::Lte),
            "=" | "==" | "eq" => Ok(Self::Eq),
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            "contains" | "like" => Ok(Self::Contains),
            _ => Err(SegmentError::UnknownOperator(s.to_string())),
        }
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Eq => "=",
            Self::Before => "before",
            Self::After => "after",
            Self::Contains => "contains",
        }
    }

    /// Operators valid for a given field.
    ///
    /// Normalization does not enforce this set on existing operators (a
    /// field change can leave a stale operator behind); it exists for UI
    /// dropdowns and explicit validation.
    pub fn allowed_for(field: Field) -> &'static [Operator] {
        if field.is_numeric() {
            &[Self::Gt, Self::Gte, Self::Lt, Self::Lte, Self::Eq]
        } else if field == Field::LastVisit {
            &[Self::Before, Self::After]
        } else {
            &[Self::Contains]
        }
    }

    /// Whether this operator is valid for the field
    pub fn is_allowed_for(&self, field: Field) -> bool {
        Self::allowed_for(field).contains(self)
    }
}

/// Condition value: a number for numeric fields, an ISO date string for
/// `lastVisit`, a substring for `email`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    /// Numeric value
    Number(serde_json::Number),
    /// String value (ISO date or substring)
    Text(String),
}

impl From<i64> for ConditionValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for ConditionValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A single filter predicate over one customer attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Attribute being filtered
    pub field: Field,
    /// Comparison operator
    pub operator: Operator,
    /// Value to compare against
    pub value: ConditionValue,
}

impl Condition {
    /// Create a condition
    pub fn new(field: Field, operator: Operator, value: impl Into<ConditionValue>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }

    /// The safe default condition for a field (default operator and value)
    pub fn default_for(field: Field) -> Self {
        Self {
            field,
            operator: field.default_operator(),
            value: field.default_value(),
        }
    }
}

/// A complete segmentation rule set.
///
/// Invariant (maintained by normalization and the rule editor):
/// `connectors.len() == conditions.len().saturating_sub(1)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentRules {
    /// Default connector for gaps without an explicit override
    #[serde(default)]
    pub logic: Logic,
    /// Ordered filter conditions
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Per-gap connector overrides; entry `i` joins conditions `i` and `i+1`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connectors: Vec<Logic>,
}

impl SegmentRules {
    /// Create an empty rule set with the given global logic
    pub fn new(logic: Logic) -> Self {
        Self {
            logic,
            conditions: Vec::new(),
            connectors: Vec::new(),
        }
    }

    /// The rule set a new campaign starts with: one `totalSpending > 0`
    /// condition.
    pub fn default_rule_set() -> Self {
        Self {
            logic: Logic::And,
            conditions: vec![Condition::new(Field::TotalSpending, Operator::Gt, 0)],
            connectors: Vec::new(),
        }
    }

    /// Number of connectors a well-formed rule set must carry
    pub fn expected_connectors(&self) -> usize {
        self.conditions.len().saturating_sub(1)
    }

    /// Re-establish the connector-length invariant after a mutation.
    ///
    /// Extra connectors are truncated; missing ones are padded with the
    /// global logic.
    pub fn reconcile_connectors(&mut self) {
        let expected = self.expected_connectors();
        if self.connectors.len() > expected {
            self.connectors.truncate(expected);
        }
        while self.connectors.len() < expected {
            self.connectors.push(self.logic);
        }
    }
}
