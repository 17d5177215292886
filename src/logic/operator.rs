use serde::{Deserialize, Serialize};
use std::fmt;

/// The comparison operators a rule may carry.
///
/// The set is closed: an operator string outside this list is rejected when
/// the definition is deserialized, which is where malformed backend payloads
/// are supposed to surface. Nothing downstream needs an "unknown" arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equal,
    NotEqual,
    EqualIgnoreCase,
    NotEqualIgnoreCase,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    IsFilled,
    IsEmpty,
    IsTrue,
    IsFalse,
    Contains,
    NotContains,
    ContainsIgnoreCase,
    NotContainsIgnoreCase,
    StartsWith,
    NotStartsWith,
    EndsWith,
    NotEndsWith,
    IsNumerical,
    IsText,
    SelectionsInclude,
    SelectionsDontInclude,
}

impl Operator {
    /// Operators that inspect only the left operand and ignore `values`.
    pub fn is_unary(self) -> bool {
        matches!(
            self,
            Operator::IsFilled
                | Operator::IsEmpty
                | Operator::IsTrue
                | Operator::IsFalse
                | Operator::IsNumerical
                | Operator::IsText
        )
    }

    /// Operators that test membership in a collection rather than comparing
    /// scalar by scalar.
    pub fn is_membership(self) -> bool {
        matches!(
            self,
            Operator::SelectionsInclude | Operator::SelectionsDontInclude
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The canonical wire spelling doubles as the display form.
        let name = serde_json::to_value(self).map_err(|_| fmt::Error)?;
        match name {
            serde_json::Value::String(s) => write!(f, "{}", s),
            _ => Err(fmt::Error),
        }
    }
}
