//! Newtype wrappers and core value types for the foraging domain.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum (and initial) hunger level.
pub const HUNGER_MAX: f64 = 100.0;

/// Hunger drained per simulation step.
pub const HUNGER_RATE: f64 = 0.1;

/// Exploration rate for ε-greedy action selection.
pub const EPSILON: f64 = 0.1;

/// Discount factor γ shared by both embedding variants.
pub const DISCOUNT_FACTOR: f64 = 0.9;

/// Reward granted per food item consumed.
pub const REWARD_PER_FOOD: f64 = 10.0;

/// Milliseconds between opportunistic food spawns.
pub const SPAWN_INTERVAL_MS: u64 = 2000;

/// Simulated milliseconds advanced per step (nominal 30 FPS frame).
pub const FRAME_MS: u64 = 33;

/// Food items placed at episode reset.
pub const INITIAL_FOOD: usize = 5;

/// Default number of training episodes.
pub const TRAINING_EPISODES: usize = 10_000;

/// The agent's hunger level, bounded to `[0, HUNGER_MAX]`.
///
/// Hunger decays by a fixed rate each step and is restored on feeding,
/// capped at the maximum. Reaching zero is the episode's terminal
/// condition, not an error.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Hunger(f64);

impl Hunger {
    /// A fully fed agent.
    pub const fn full() -> Self {
        Hunger(HUNGER_MAX)
    }

    /// Create a hunger level, clamping into `[0, HUNGER_MAX]`.
    pub fn new(value: f64) -> Self {
        Hunger(value.clamp(0.0, HUNGER_MAX))
    }

    /// Get the inner value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Drain hunger by `rate`. Returns `true` if the agent starved.
    ///
    /// A starved agent's hunger is pinned to zero so the bound invariant
    /// holds even on the terminal step. The zero test carries a small
    /// tolerance: repeated subtraction of `rate` accumulates rounding
    /// error, and a full drain from the maximum must terminate after
    /// exactly `HUNGER_MAX / rate` steps.
    pub fn decay(&mut self, rate: f64) -> bool {
        const STARVE_TOLERANCE: f64 = 1e-9;
        self.0 -= rate;
        if self.0 <= STARVE_TOLERANCE {
            self.0 = 0.0;
            true
        } else {
            false
        }
    }

    /// Restore hunger by `amount`, capped at the maximum.
    pub fn restore(&mut self, amount: f64) {
        self.0 = (self.0 + amount).min(HUNGER_MAX);
    }

    /// Whole-unit hunger level, as used by the continuous state key.
    pub fn floor(&self) -> i32 {
        self.0.floor() as i32
    }

    /// Ten-point hunger band, as used by the compass state key.
    pub fn band(&self) -> i32 {
        (self.0.floor() / 10.0) as i32
    }
}

impl Default for Hunger {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for Hunger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}", self.0)
    }
}

/// One of the four unit-step movement directions.
///
/// The enumeration order is load-bearing: greedy action selection breaks
/// ties by taking the first maximum in `Action::ALL` order, which keeps
/// seeded runs reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
}

impl Action {
    /// All actions in fixed tie-break order.
    pub const ALL: [Action; 4] = [Action::Left, Action::Right, Action::Up, Action::Down];

    /// Unit displacement for this action. The y axis grows downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Action::Left => (-1, 0),
            Action::Right => (1, 0),
            Action::Up => (0, -1),
            Action::Down => (0, 1),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Left => "left",
            Action::Right => "right",
            Action::Up => "up",
            Action::Down => "down",
        };
        write!(f, "{name}")
    }
}

/// Discrete state abstraction used as the Q-table lookup key.
///
/// Both embedding variants produce keys from this enum. `NoFood` is the
/// sentinel for an empty food set; it carries the variant's quantized
/// hunger so identical world configurations always map to identical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateKey {
    /// Sentinel: the food set is empty.
    NoFood { hunger: i32 },
    /// Continuous variant: raw signed offset to the nearest food item
    /// plus whole-unit hunger.
    Offset { dx: i32, dy: i32, hunger: i32 },
    /// Discretized variant: 8-way compass octant of the offset angle
    /// plus ten-point hunger band.
    Compass { octant: u8, band: i32 },
}

/// Whether an episode runs with exploration and learning enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// ε-greedy exploration, Q-table updates applied.
    Training,
    /// Greedy policy, Q-table frozen.
    Evaluation,
}

impl Mode {
    /// Whether the policy may take random exploratory actions.
    pub fn explores(self) -> bool {
        matches!(self, Mode::Training)
    }

    /// Whether TD updates are applied to the Q-table.
    pub fn learns(self) -> bool {
        matches!(self, Mode::Training)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hunger_restore_caps_at_maximum() {
        let mut hunger = Hunger::new(95.0);
        hunger.restore(20.0);
        assert_eq!(hunger.value(), 100.0);
    }

    #[test]
    fn test_hunger_decay_reports_starvation() {
        let mut hunger = Hunger::new(0.05);
        assert!(hunger.decay(0.1));
        assert_eq!(hunger.value(), 0.0);
    }

    #[test]
    fn test_full_drain_lasts_exactly_one_thousand_steps() {
        let mut hunger = Hunger::full();
        for _ in 0..999 {
            assert!(!hunger.decay(HUNGER_RATE));
        }
        assert!(hunger.decay(HUNGER_RATE));
        assert_eq!(hunger.value(), 0.0);
    }

    #[test]
    fn test_hunger_stays_in_bounds() {
        let mut hunger = Hunger::full();
        for _ in 0..50 {
            hunger.decay(HUNGER_RATE);
            hunger.restore(20.0);
            assert!(hunger.value() >= 0.0 && hunger.value() <= HUNGER_MAX);
        }
    }

    #[test]
    fn test_hunger_quantization() {
        let hunger = Hunger::new(87.6);
        assert_eq!(hunger.floor(), 87);
        assert_eq!(hunger.band(), 8);
    }

    #[test]
    fn test_action_order_is_fixed() {
        assert_eq!(
            Action::ALL,
            [Action::Left, Action::Right, Action::Up, Action::Down]
        );
        assert_eq!(Action::Up.delta(), (0, -1));
    }

    #[test]
    fn test_state_keys_are_distinct() {
        let sentinel = StateKey::NoFood { hunger: 100 };
        let zero_offset = StateKey::Offset {
            dx: 0,
            dy: 0,
            hunger: 100,
        };
        assert_ne!(sentinel, zero_offset);
    }

    #[test]
    fn test_mode_flags() {
        assert!(Mode::Training.explores());
        assert!(Mode::Training.learns());
        assert!(!Mode::Evaluation.explores());
        assert!(!Mode::Evaluation.learns());
    }
}
