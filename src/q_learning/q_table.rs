//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Action, StateKey};

/// Q-table mapping (state, action) pairs to Q-values
///
/// Unseen pairs implicitly read as 0.0. The table is never pruned; unbounded
/// growth is an accepted property of tabular learning on a state space this
/// small.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    /// Q-values: (state key, action) -> Q-value
    q_values: HashMap<(StateKey, Action), f64>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a new Q-table
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            q_values: HashMap::new(),
            learning_rate,
            discount_factor,
        }
    }

    /// Get Q-value for a state-action pair (0.0 if unseen)
    pub fn get(&self, state: StateKey, action: Action) -> f64 {
        self.q_values.get(&(state, action)).copied().unwrap_or(0.0)
    }

    /// Maximum Q-value over all four actions in a state
    pub fn max_q(&self, state: StateKey) -> f64 {
        Action::ALL
            .iter()
            .map(|&action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Greedy action for a state.
    ///
    /// Ties break to the first action achieving the maximum in `Action::ALL`
    /// order. This is deliberate: deterministic tie-breaking keeps seeded
    /// runs reproducible.
    pub fn greedy_action(&self, state: StateKey) -> Action {
        let mut best = Action::ALL[0];
        let mut best_q = self.get(state, best);
        for &action in &Action::ALL[1..] {
            let q = self.get(state, action);
            if q > best_q {
                best = action;
                best_q = q;
            }
        }
        best
    }

    /// Q-learning update: off-policy TD(0) control
    ///
    /// Q(s,a) ← (1−α)·Q(s,a) + α·(r + γ·max_a' Q(s',a'))
    ///
    /// This is the only mutator of the table.
    pub fn update(&mut self, state: StateKey, action: Action, reward: f64, next_state: StateKey) {
        let current_q = self.get(state, action);
        let max_future_q = self.max_q(next_state);
        let new_q = (1.0 - self.learning_rate) * current_q
            + self.learning_rate * (reward + self.discount_factor * max_future_q);
        self.q_values.insert((state, action), new_q);
    }

    /// Number of stored (state, action) entries
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }

    /// Number of distinct states with at least one stored entry
    pub fn state_count(&self) -> usize {
        let states: std::collections::HashSet<StateKey> =
            self.q_values.keys().map(|(state, _)| *state).collect();
        states.len()
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(hunger: i32) -> StateKey {
        StateKey::Offset {
            dx: 1,
            dy: 0,
            hunger,
        }
    }

    #[test]
    fn test_unseen_pairs_read_zero() {
        let table = QTable::new(0.5, 0.9);
        assert_eq!(table.get(state(50), Action::Up), 0.0);
        assert_eq!(table.max_q(state(50)), 0.0);
    }

    #[test]
    fn test_update_blends_toward_target() {
        let mut table = QTable::new(0.5, 0.9);
        let terminal = StateKey::NoFood { hunger: 0 };
        table.update(state(50), Action::Right, 10.0, terminal);
        // (1-0.5)*0 + 0.5*(10 + 0.9*0) = 5.0
        assert_eq!(table.get(state(50), Action::Right), 5.0);
    }

    #[test]
    fn test_update_bootstraps_from_next_state() {
        let mut table = QTable::new(0.5, 0.9);
        let next = state(49);
        table.update(next, Action::Left, 10.0, StateKey::NoFood { hunger: 0 });
        table.update(state(50), Action::Right, 0.0, next);
        // max_a Q(next, a) = 5.0, so 0.5 * 0.9 * 5.0 = 2.25
        assert_eq!(table.get(state(50), Action::Right), 2.25);
    }

    #[test]
    fn test_repeated_updates_approach_reward_monotonically() {
        let mut table = QTable::new(0.5, 0.9);
        let s = state(50);
        let terminal = StateKey::NoFood { hunger: 0 };
        let reward = 10.0;

        let mut previous = 0.0;
        for _ in 0..64 {
            table.update(s, Action::Up, reward, terminal);
            let q = table.get(s, Action::Up);
            assert!(q > previous, "estimate must increase toward the reward");
            assert!(q <= reward, "estimate must never overshoot the reward");
            previous = q;
        }
        assert!((previous - reward).abs() < 1e-6);
    }

    #[test]
    fn test_greedy_tie_breaks_to_first_action() {
        let table = QTable::new(0.5, 0.9);
        // All four actions are unseen (all zero): first in order wins.
        assert_eq!(table.greedy_action(state(50)), Action::Left);

        let mut table = QTable::new(0.5, 0.9);
        let terminal = StateKey::NoFood { hunger: 0 };
        table.update(state(50), Action::Up, 10.0, terminal);
        table.update(state(50), Action::Down, 10.0, terminal);
        // Up and Down tie at 5.0; Up precedes Down in Action::ALL.
        assert_eq!(table.greedy_action(state(50)), Action::Up);
    }

    #[test]
    fn test_state_count() {
        let mut table = QTable::new(0.15, 0.9);
        let terminal = StateKey::NoFood { hunger: 0 };
        table.update(state(50), Action::Up, 1.0, terminal);
        table.update(state(50), Action::Down, 1.0, terminal);
        table.update(state(49), Action::Up, 1.0, terminal);
        assert_eq!(table.len(), 3);
        assert_eq!(table.state_count(), 2);
    }
}
