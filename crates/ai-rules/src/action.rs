use ai_core::DeterministicRng;
use serde::{Deserialize, Serialize};

/// How the agent should move while a behavior is active.
///
/// Closed set: the movement subsystem matches on it directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum MoveAction {
    /// Stand still, keep facing the target if there is one.
    Hold,
    /// Close in on the target and stop at `stopping_distance`.
    Chase { stopping_distance: f32 },
    /// Circle the target at `radius`.
    Strafe { radius: f32, clockwise: bool },
    /// Back away from the target until `distance` away.
    Retreat { distance: f32 },
    /// Wander around the home position within `radius`.
    Patrol { radius: f32 },
    ReturnHome,
}

impl MoveAction {
    pub fn name(&self) -> &'static str {
        match self {
            MoveAction::Hold => "hold",
            MoveAction::Chase { .. } => "chase",
            MoveAction::Strafe { .. } => "strafe",
            MoveAction::Retreat { .. } => "retreat",
            MoveAction::Patrol { .. } => "patrol",
            MoveAction::ReturnHome => "return_home",
        }
    }

    fn defect(&self) -> Option<String> {
        let (label, value) = match *self {
            MoveAction::Chase { stopping_distance } => ("stopping_distance", stopping_distance),
            MoveAction::Strafe { radius, .. } => ("radius", radius),
            MoveAction::Retreat { distance } => ("distance", distance),
            MoveAction::Patrol { radius } => ("radius", radius),
            MoveAction::Hold | MoveAction::ReturnHome => return None,
        };
        non_negative(self.name(), label, value)
    }
}

/// What attack to perform while a behavior is active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum AttackAction {
    Melee {
        range: f32,
        windup: f32,
        recovery: f32,
        #[serde(default = "default_damage")]
        damage: f32,
    },
    Ranged {
        range: f32,
        windup: f32,
        recovery: f32,
        #[serde(default = "default_damage")]
        damage: f32,
    },
    /// Run up and detonate after `fuse` seconds within `radius`.
    Charge {
        range: f32,
        fuse: f32,
        radius: f32,
        #[serde(default = "default_damage")]
        damage: f32,
    },
}

fn default_damage() -> f32 {
    10.0
}

impl AttackAction {
    pub fn name(&self) -> &'static str {
        match self {
            AttackAction::Melee { .. } => "melee",
            AttackAction::Ranged { .. } => "ranged",
            AttackAction::Charge { .. } => "charge",
        }
    }

    /// Distance to the target at which the attack may start.
    pub fn range(&self) -> f32 {
        match *self {
            AttackAction::Melee { range, .. }
            | AttackAction::Ranged { range, .. }
            | AttackAction::Charge { range, .. } => range,
        }
    }

    pub fn damage(&self) -> f32 {
        match *self {
            AttackAction::Melee { damage, .. }
            | AttackAction::Ranged { damage, .. }
            | AttackAction::Charge { damage, .. } => damage,
        }
    }

    fn defect(&self) -> Option<String> {
        let name = self.name();
        let fields: [(&str, f32); 4] = match *self {
            AttackAction::Melee {
                range,
                windup,
                recovery,
                damage,
            }
            | AttackAction::Ranged {
                range,
                windup,
                recovery,
                damage,
            } => [
                ("range", range),
                ("windup", windup),
                ("recovery", recovery),
                ("damage", damage),
            ],
            AttackAction::Charge {
                range,
                fuse,
                radius,
                damage,
            } => [
                ("range", range),
                ("fuse", fuse),
                ("radius", radius),
                ("damage", damage),
            ],
        };
        fields
            .iter()
            .find_map(|(label, value)| non_negative(name, label, *value))
    }
}

fn non_negative(action: &str, label: &str, value: f32) -> Option<String> {
    if value.is_finite() && value >= 0.0 {
        None
    } else {
        Some(format!("{action}.{label} must be finite and >= 0, got {value}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightedAction<A> {
    pub action: A,
    #[serde(default = "default_weight")]
    pub weight: f32,
}

fn default_weight() -> f32 {
    1.0
}

/// Same-category actions with relative weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionTable<A> {
    entries: Vec<WeightedAction<A>>,
}

impl<A> Default for ActionTable<A> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<A> ActionTable<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, action: A, weight: f32) -> Self {
        self.entries.push(WeightedAction { action, weight });
        self
    }

    pub fn entries(&self) -> &[WeightedAction<A>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_weight(&self) -> f32 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Roll one action with probability proportional to its weight.
    ///
    /// Zero-weight entries are never chosen; a table without positive weight yields `None`.
    pub fn select(&self, rng: &mut impl DeterministicRng) -> Option<&A> {
        // Avoid consuming randomness when there is nothing to choose between.
        if self.entries.len() == 1 {
            let only = &self.entries[0];
            return (only.weight > 0.0).then_some(&only.action);
        }
        let weights: Vec<f32> = self.entries.iter().map(|e| e.weight).collect();
        let index = rng.pick_weighted(&weights)?;
        Some(&self.entries[index].action)
    }

    pub(crate) fn weight_defect(&self) -> Option<f32> {
        self.entries
            .iter()
            .map(|e| e.weight)
            .find(|w| !w.is_finite() || *w < 0.0)
    }
}

impl ActionTable<MoveAction> {
    pub(crate) fn action_defect(&self) -> Option<String> {
        self.entries.iter().find_map(|e| e.action.defect())
    }
}

impl ActionTable<AttackAction> {
    pub(crate) fn action_defect(&self) -> Option<String> {
        self.entries.iter().find_map(|e| e.action.defect())
    }

    /// Longest reach among attacks that can actually be rolled.
    pub fn max_range(&self) -> Option<f32> {
        self.entries
            .iter()
            .filter(|e| e.weight > 0.0)
            .map(|e| e.action.range())
            .reduce(f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_core::SplitMix64;

    fn melee(range: f32) -> AttackAction {
        AttackAction::Melee {
            range,
            windup: 0.2,
            recovery: 0.4,
            damage: 5.0,
        }
    }

    #[test]
    fn empty_table_selects_nothing() {
        let table: ActionTable<MoveAction> = ActionTable::new();
        assert_eq!(table.select(&mut SplitMix64::new(1)), None);
    }

    #[test]
    fn single_zero_weight_entry_is_never_selected() {
        let table = ActionTable::new().with(MoveAction::Hold, 0.0);
        assert_eq!(table.select(&mut SplitMix64::new(1)), None);
    }

    #[test]
    fn zero_weight_entries_are_skipped() {
        let table = ActionTable::new()
            .with(MoveAction::Hold, 0.0)
            .with(MoveAction::ReturnHome, 1.0)
            .with(MoveAction::Patrol { radius: 3.0 }, 0.0);
        let mut rng = SplitMix64::new(99);
        for _ in 0..500 {
            assert_eq!(table.select(&mut rng), Some(&MoveAction::ReturnHome));
        }
    }

    #[test]
    fn both_weighted_entries_get_picked_eventually() {
        let table = ActionTable::new()
            .with(MoveAction::Hold, 1.0)
            .with(MoveAction::ReturnHome, 1.0);
        let mut rng = SplitMix64::new(5);
        let picks: Vec<_> = (0..200).filter_map(|_| table.select(&mut rng)).collect();
        assert!(picks.contains(&&MoveAction::Hold));
        assert!(picks.contains(&&MoveAction::ReturnHome));
    }

    #[test]
    fn max_range_ignores_unreachable_entries() {
        let table = ActionTable::new().with(melee(2.0), 1.0).with(melee(8.0), 0.0);
        assert_eq!(table.max_range(), Some(2.0));
        assert_eq!(ActionTable::<AttackAction>::new().max_range(), None);
    }

    #[test]
    fn negative_weights_and_ranges_are_defects() {
        let table = ActionTable::new().with(melee(2.0), -1.0);
        assert_eq!(table.weight_defect(), Some(-1.0));

        let table = ActionTable::new().with(melee(-2.0), 1.0);
        assert!(table.action_defect().unwrap().contains("melee.range"));

        let table = ActionTable::new().with(
            MoveAction::Strafe {
                radius: f32::INFINITY,
                clockwise: true,
            },
            1.0,
        );
        assert!(table.action_defect().unwrap().contains("strafe.radius"));
    }
}
