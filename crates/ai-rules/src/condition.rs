use serde::{Deserialize, Serialize};

use crate::telemetry::{BoolSignal, FloatSignal, IntSignal, Telemetry};

/// Tolerance used by [`FloatOp::ApproximatelyEqualTo`].
pub const LOOSE_EQUALITY_EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatOp {
    #[serde(alias = "<")]
    LessThan,
    #[serde(alias = "<=")]
    LessThanOrEqualTo,
    #[serde(alias = ">")]
    GreaterThan,
    #[serde(alias = ">=")]
    GreaterThanOrEqualTo,
    /// Exact `==` on the float values.
    #[serde(alias = "==")]
    EqualTo,
    /// `|lhs - rhs| <= LOOSE_EQUALITY_EPSILON`.
    #[serde(alias = "~=")]
    ApproximatelyEqualTo,
}

impl FloatOp {
    pub fn compare(self, lhs: f32, rhs: f32) -> bool {
        match self {
            FloatOp::LessThan => lhs < rhs,
            FloatOp::LessThanOrEqualTo => lhs <= rhs,
            FloatOp::GreaterThan => lhs > rhs,
            FloatOp::GreaterThanOrEqualTo => lhs >= rhs,
            FloatOp::EqualTo => lhs == rhs,
            FloatOp::ApproximatelyEqualTo => (lhs - rhs).abs() <= LOOSE_EQUALITY_EPSILON,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntOp {
    #[serde(alias = "==")]
    EqualTo,
    #[serde(alias = "!=")]
    NotEqualTo,
    #[serde(alias = "<")]
    LessThan,
    #[serde(alias = "<=")]
    LessThanOrEqualTo,
    #[serde(alias = ">")]
    GreaterThan,
    #[serde(alias = ">=")]
    GreaterThanOrEqualTo,
}

impl IntOp {
    pub fn compare(self, lhs: i32, rhs: i32) -> bool {
        match self {
            IntOp::EqualTo => lhs == rhs,
            IntOp::NotEqualTo => lhs != rhs,
            IntOp::LessThan => lhs < rhs,
            IntOp::LessThanOrEqualTo => lhs <= rhs,
            IntOp::GreaterThan => lhs > rhs,
            IntOp::GreaterThanOrEqualTo => lhs >= rhs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloatCondition {
    pub signal: FloatSignal,
    pub op: FloatOp,
    pub value: f32,
    #[serde(default)]
    pub inverted: bool,
}

impl FloatCondition {
    pub fn evaluate(&self, telemetry: &Telemetry) -> bool {
        self.op.compare(telemetry.float(self.signal), self.value) ^ self.inverted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntCondition {
    pub signal: IntSignal,
    pub op: IntOp,
    pub value: i32,
    #[serde(default)]
    pub inverted: bool,
}

impl IntCondition {
    pub fn evaluate(&self, telemetry: &Telemetry) -> bool {
        self.op.compare(telemetry.int(self.signal), self.value) ^ self.inverted
    }
}

/// Equality against a target value. Negate by authoring the opposite `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoolCondition {
    pub signal: BoolSignal,
    pub value: bool,
}

impl BoolCondition {
    pub fn evaluate(&self, telemetry: &Telemetry) -> bool {
        telemetry.bool(self.signal) == self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    Float(FloatCondition),
    Int(IntCondition),
    Bool(BoolCondition),
}

impl Condition {
    pub fn float(signal: FloatSignal, op: FloatOp, value: f32) -> Self {
        Condition::Float(FloatCondition {
            signal,
            op,
            value,
            inverted: false,
        })
    }

    pub fn int(signal: IntSignal, op: IntOp, value: i32) -> Self {
        Condition::Int(IntCondition {
            signal,
            op,
            value,
            inverted: false,
        })
    }

    pub fn boolean(signal: BoolSignal, value: bool) -> Self {
        Condition::Bool(BoolCondition { signal, value })
    }

    /// Flip the `inverted` flag. Bool conditions have no flag and negate their target value.
    pub fn inverted(self) -> Self {
        match self {
            Condition::Float(c) => Condition::Float(FloatCondition {
                inverted: !c.inverted,
                ..c
            }),
            Condition::Int(c) => Condition::Int(IntCondition {
                inverted: !c.inverted,
                ..c
            }),
            Condition::Bool(c) => Condition::Bool(BoolCondition {
                value: !c.value,
                ..c
            }),
        }
    }

    pub fn evaluate(&self, telemetry: &Telemetry) -> bool {
        match self {
            Condition::Float(c) => c.evaluate(telemetry),
            Condition::Int(c) => c.evaluate(telemetry),
            Condition::Bool(c) => c.evaluate(telemetry),
        }
    }

    /// Why this condition can never be meaningfully evaluated, if it can't.
    pub(crate) fn defect(&self) -> Option<String> {
        match self {
            Condition::Float(c) if c.value.is_nan() => {
                Some(format!("{:?} threshold is NaN", c.signal))
            }
            _ => None,
        }
    }
}

/// Conjunction of conditions. An empty group holds vacuously.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionGroup {
    conditions: Vec<Condition>,
}

impl ConditionGroup {
    pub fn new(conditions: Vec<Condition>) -> Self {
        Self { conditions }
    }

    /// The group with no conditions: always passes.
    pub fn always() -> Self {
        Self::default()
    }

    pub fn with(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn passes(&self, telemetry: &Telemetry) -> bool {
        self.conditions.iter().all(|c| c.evaluate(telemetry))
    }
}
