use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::action::{ActionTable, AttackAction, MoveAction};
use crate::condition::{Condition, ConditionGroup};
use crate::error::{Result, RuleError};
use crate::telemetry::Telemetry;

/// An authored rule: when to activate, and which actions to roll while active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BehaviorState {
    pub name: String,
    /// Alternatives: the state activates if any group passes.
    #[serde(default)]
    pub conditions: Vec<ConditionGroup>,
    #[serde(default)]
    pub move_actions: ActionTable<MoveAction>,
    #[serde(default)]
    pub attack_actions: ActionTable<AttackAction>,
}

impl BehaviorState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            conditions: Vec::new(),
            move_actions: ActionTable::new(),
            attack_actions: ActionTable::new(),
        }
    }

    pub fn when(mut self, group: ConditionGroup) -> Self {
        self.conditions.push(group);
        self
    }

    /// Shorthand for a one-condition group.
    pub fn when_single(self, condition: Condition) -> Self {
        self.when(ConditionGroup::new(vec![condition]))
    }

    pub fn with_move(mut self, action: MoveAction, weight: f32) -> Self {
        self.move_actions = self.move_actions.with(action, weight);
        self
    }

    pub fn with_attack(mut self, action: AttackAction, weight: f32) -> Self {
        self.attack_actions = self.attack_actions.with(action, weight);
        self
    }

    /// True iff at least one condition group passes.
    ///
    /// A state without groups never matches here; it can still be chosen as the fallback.
    pub fn test_conditions(&self, telemetry: &Telemetry) -> bool {
        self.conditions.iter().any(|g| g.passes(telemetry))
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason: String| RuleError::InvalidCondition {
            behavior: self.name.clone(),
            reason,
        };

        for condition in self.conditions.iter().flat_map(|g| g.conditions()) {
            if let Some(reason) = condition.defect() {
                return Err(invalid(reason));
            }
        }

        let weight = self
            .move_actions
            .weight_defect()
            .or_else(|| self.attack_actions.weight_defect());
        if let Some(weight) = weight {
            return Err(RuleError::InvalidWeight {
                behavior: self.name.clone(),
                weight,
            });
        }

        let action = self
            .move_actions
            .action_defect()
            .or_else(|| self.attack_actions.action_defect());
        if let Some(reason) = action {
            return Err(RuleError::InvalidAction {
                behavior: self.name.clone(),
                reason,
            });
        }

        Ok(())
    }
}

/// Result of [`BehaviorSet::select`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'a> {
    pub index: usize,
    pub behavior: &'a BehaviorState,
    /// Nothing matched and the last declared state was taken by default.
    pub fallback: bool,
}

/// Ordered behavior states. Declaration order is the priority order.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorSet {
    behaviors: Vec<BehaviorState>,
}

impl BehaviorSet {
    /// Validate and freeze an authored list.
    ///
    /// The list must be non-empty, names must be unique, thresholds must not be NaN, weights
    /// and action parameters must be finite and non-negative.
    pub fn new(behaviors: Vec<BehaviorState>) -> Result<Self> {
        if behaviors.is_empty() {
            return Err(RuleError::EmptyBehaviorSet);
        }

        let mut names = BTreeSet::new();
        for behavior in &behaviors {
            if !names.insert(behavior.name.as_str()) {
                return Err(RuleError::DuplicateBehavior(behavior.name.clone()));
            }
            behavior.validate()?;
        }

        Ok(Self { behaviors })
    }

    pub fn behaviors(&self) -> &[BehaviorState] {
        &self.behaviors
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BehaviorState> {
        self.behaviors.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.behaviors.iter().position(|b| b.name == name)
    }

    /// The state taken when nothing matches: always the last declared one.
    pub fn fallback_index(&self) -> usize {
        self.behaviors.len() - 1
    }

    /// First state in declaration order whose conditions hold, else the fallback.
    pub fn select(&self, telemetry: &Telemetry) -> Selection<'_> {
        let matched = self
            .behaviors
            .iter()
            .position(|b| b.test_conditions(telemetry));

        let (index, fallback) = match matched {
            Some(index) => (index, false),
            None => (self.fallback_index(), true),
        };

        Selection {
            index,
            behavior: &self.behaviors[index],
            fallback,
        }
    }
}
