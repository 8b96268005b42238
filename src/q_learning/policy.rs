//! ε-greedy action selection over Q-values.

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use super::QTable;
use crate::types::{Action, EPSILON, Mode, StateKey};

/// ε-greedy policy: explore uniformly with probability ε in training mode,
/// otherwise exploit the greedy action.
///
/// Selection is a pure function of (state, Q-table snapshot, mode, RNG
/// draw); it has no side effects on the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    /// Create a policy with the given exploration rate.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if ε is outside
    /// `[0, 1]` or not finite.
    pub fn new(epsilon: f64) -> crate::Result<Self> {
        if (0.0..=1.0).contains(&epsilon) && epsilon.is_finite() {
            Ok(EpsilonGreedy { epsilon })
        } else {
            Err(crate::Error::InvalidConfiguration {
                message: format!("epsilon {epsilon} must lie in [0, 1]"),
            })
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Select an action for `state`.
    ///
    /// In evaluation mode the exploration branch is disabled entirely and no
    /// random draw is taken; the result is the deterministic greedy action.
    pub fn select<R: Rng>(
        &self,
        table: &QTable,
        state: StateKey,
        mode: Mode,
        rng: &mut R,
    ) -> Action {
        if mode.explores() && rng.random::<f64>() < self.epsilon {
            // Explore: uniformly random action. ALL is non-empty, so
            // choose cannot fail.
            return Action::ALL
                .choose(rng)
                .copied()
                .unwrap_or(Action::ALL[0]);
        }
        table.greedy_action(state)
    }
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        EpsilonGreedy { epsilon: EPSILON }
    }
}
