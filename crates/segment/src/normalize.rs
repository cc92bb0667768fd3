//! Rule-set normalization
//!
//! `normalize_rules` coerces an arbitrary JSON candidate into a well-formed
//! `SegmentRules`. Candidates arrive from three places: user edits, the
//! AI natural-language-to-rules endpoint (which returns possibly malformed
//! shapes), and deserialized drafts. The function is total - any input
//! produces a usable rule set, never an error - and idempotent:
//! `normalize_rules(normalize_rules(x))` equals `normalize_rules(x)`.

use serde_json::Value;

use crate::rules::{Condition, ConditionValue, Field, Logic, Operator, SegmentRules};

/// Normalize an arbitrary candidate value into a well-formed rule set.
pub fn normalize_rules(candidate: &Value) -> SegmentRules {
    let Some(obj) = candidate.as_object() else {
        // Non-object candidate: empty AND rule set
        return SegmentRules::default();
    };

    // Global logic: exactly the string "OR" means OR, anything else
    // (including missing) coerces to AND.
    let logic = match obj.get("logic").and_then(Value::as_str) {
        Some("OR") => Logic::Or,
        _ => Logic::And,
    };

    let conditions: Vec<Condition> = obj
        .get("conditions")
        .and_then(Value::as_array)
        .map(|raw| raw.iter().map(coerce_condition).collect())
        .unwrap_or_default();

    // Connector overrides: falsy entries are dropped, then each remaining
    // entry maps to OR when its uppercase-trimmed form is exactly "OR",
    // otherwise AND. A non-array value counts as absent.
    let explicit: Option<Vec<Logic>> = obj.get("connectors").and_then(Value::as_array).map(|raw| {
        raw.iter()
            .filter(|v| !is_falsy(v))
            .map(coerce_connector)
            .collect()
    });

    let expected = conditions.len().saturating_sub(1);
    let connectors = match explicit {
        // Absent: fill every gap with the global logic
        None => vec![logic; expected],
        Some(mut list) => {
            if list.len() > expected {
                list.truncate(expected);
            }
            while list.len() < expected {
                list.push(logic);
            }
            list
        }
    };

    SegmentRules {
        logic,
        conditions,
        connectors,
    }
}

/// JSON analog of a falsy value: null, false, 0, or the empty string.
fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn coerce_connector(v: &Value) -> Logic {
    match v.as_str() {
        Some(s) if s.trim().to_uppercase() == "OR" => Logic::Or,
        _ => Logic::And,
    }
}

/// Coerce a single candidate condition into a safe shape.
///
/// Missing or unrecognized parts take per-field defaults. The given
/// operator is kept verbatim even when it does not belong to the field's
/// allowed set (a stale operator after a field change is a known,
/// documented gap).
fn coerce_condition(v: &Value) -> Condition {
    let obj = v.as_object();

    let field = obj
        .and_then(|o| o.get("field"))
        .and_then(|f| serde_json::from_value::<Field>(f.clone()).ok())
        .unwrap_or_default();

    let operator = obj
        .and_then(|o| o.get("operator"))
        .and_then(|op| serde_json::from_value::<Operator>(op.clone()).ok())
        .unwrap_or_else(|| field.default_operator());

    let value = match obj.and_then(|o| o.get("value")) {
        Some(Value::Number(n)) => ConditionValue::Number(n.clone()),
        Some(Value::String(s)) => ConditionValue::Text(s.clone()),
        // null and non-scalar values fall back to the field default
        _ => field.default_value(),
    };

    Condition {
        field,
        operator,
        value,
    }
}
