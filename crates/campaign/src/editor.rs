//! Rule editor controller
//!
//! Mutation operations over the current rule set. Every operation keeps the
//! connector-length invariant (`connectors.len() == conditions.len() - 1`
//! when non-empty) by reconciling after the edit. Out-of-range indices are
//! logged and ignored rather than panicking: stale indices can arrive from
//! a UI that re-rendered mid-edit.

use tracing::warn;

use outreach_segment::{Condition, ConditionValue, Field, Logic, Operator, SegmentRules};

/// Partial update for a single condition
#[derive(Debug, Clone, Default)]
pub struct ConditionPatch {
    /// New field, if changing
    pub field: Option<Field>,
    /// New operator, if changing
    pub operator: Option<Operator>,
    /// New value, if changing
    pub value: Option<ConditionValue>,
}

impl ConditionPatch {
    /// Patch that only changes the field
    pub fn field(field: Field) -> Self {
        Self {
            field: Some(field),
            ..Default::default()
        }
    }

    /// Patch that only changes the operator
    pub fn operator(operator: Operator) -> Self {
        Self {
            operator: Some(operator),
            ..Default::default()
        }
    }

    /// Patch that only changes the value
    pub fn value(value: impl Into<ConditionValue>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }
}

/// Owns the rule set being edited
#[derive(Debug, Clone)]
pub struct RuleEditor {
    rules: SegmentRules,
}

impl RuleEditor {
    /// Editor over the default rule set a new campaign starts with
    pub fn new() -> Self {
        Self {
            rules: SegmentRules::default_rule_set(),
        }
    }

    /// Editor over an existing rule set, re-establishing the connector
    /// invariant first
    pub fn from_rules(mut rules: SegmentRules) -> Self {
        rules.reconcile_connectors();
        Self { rules }
    }

    /// Current rule set
    pub fn rules(&self) -> &SegmentRules {
        &self.rules
    }

    /// Consume the editor, returning the rule set
    pub fn into_rules(self) -> SegmentRules {
        self.rules
    }

    /// Append a default condition (`totalSpending > 0`).
    ///
    /// The new gap is joined with the current global logic.
    pub fn add_condition(&mut self) {
        if !self.rules.conditions.is_empty() {
            self.rules.connectors.push(self.rules.logic);
        }
        self.rules
            .conditions
            .push(Condition::new(Field::TotalSpending, Operator::Gt, 0));
        self.rules.reconcile_connectors();
    }

    /// Remove the condition at `index`.
    ///
    /// The connector at the same index (the gap after the removed
    /// condition) goes with it; when none exists (removing the last
    /// condition) the trailing connector is dropped instead, so the
    /// remaining gaps keep their explicit values.
    pub fn remove_condition(&mut self, index: usize) {
        if index >= self.rules.conditions.len() {
            warn!(index, len = self.rules.conditions.len(), "remove_condition index out of range");
            return;
        }
        self.rules.conditions.remove(index);
        if index < self.rules.connectors.len() {
            self.rules.connectors.remove(index);
        } else {
            self.rules.connectors.pop();
        }
        self.rules.reconcile_connectors();
    }

    /// Shallow-merge `patch` into the condition at `index`.
    ///
    /// A field change does not reset the operator or value; a stale
    /// operator left behind by a field change is kept as-is.
    pub fn update_condition(&mut self, index: usize, patch: ConditionPatch) {
        let Some(condition) = self.rules.conditions.get_mut(index) else {
            warn!(index, len = self.rules.conditions.len(), "update_condition index out of range");
            return;
        };
        if let Some(field) = patch.field {
            condition.field = field;
        }
        if let Some(operator) = patch.operator {
            condition.operator = operator;
        }
        if let Some(value) = patch.value {
            condition.value = value;
        }
    }

    /// Change the global logic.
    ///
    /// Existing per-gap connectors keep their explicit values; only future
    /// gap fills use the new logic.
    pub fn set_logic(&mut self, logic: Logic) {
        self.rules.logic = logic;
    }

    /// Set the connector joining conditions `index` and `index + 1`
    pub fn set_connector(&mut self, index: usize, logic: Logic) {
        let Some(slot) = self.rules.connectors.get_mut(index) else {
            warn!(index, len = self.rules.connectors.len(), "set_connector index out of range");
            return;
        };
        *slot = logic;
    }
}

impl Default for RuleEditor {
    fn default() -> Self {
        Self::new()
    }
}
