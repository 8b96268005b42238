//! The foraging agent: wrapped position, hunger, and its owned Q-table.

use serde::{Deserialize, Serialize};

use super::{Arena, Point, WorldParams};
use crate::{
    q_learning::QTable,
    types::{Action, Hunger},
};

/// A single foraging agent.
///
/// The Q-table is owned exclusively by the agent and persists across episode
/// resets; it is the only state carried between training episodes. Position
/// and hunger are per-episode state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forager {
    position: Point,
    hunger: Hunger,
    q_table: QTable,
}

impl Forager {
    /// Create an agent at the arena center with full hunger.
    pub fn new(arena: &Arena, learning_rate: f64, discount_factor: f64) -> Self {
        Forager {
            position: arena.center(),
            hunger: Hunger::full(),
            q_table: QTable::new(learning_rate, discount_factor),
        }
    }

    /// Per-episode reset: re-center position and refill hunger. The Q-table
    /// is deliberately untouched.
    pub fn reset(&mut self, arena: &Arena) {
        self.position = arena.center();
        self.hunger = Hunger::full();
    }

    /// Apply a movement action, wrapping into the arena bounds.
    pub fn apply(&mut self, action: Action, params: &WorldParams) {
        self.position = params
            .arena
            .translate(self.position, action.delta(), params.step);
    }

    /// Apply a raw `(dx, dy)` movement intent from manual play, wrapping
    /// into the arena bounds.
    pub fn apply_intent(&mut self, delta: (i32, i32), params: &WorldParams) {
        self.position = params.arena.translate(self.position, delta, params.step);
    }

    /// Drain hunger by the variant's rate. Returns `true` on starvation.
    pub fn tick_hunger(&mut self, params: &WorldParams) -> bool {
        self.hunger.decay(params.hunger_rate)
    }

    /// Restore hunger for `count` consumed food items, capped at maximum.
    pub fn eat(&mut self, count: usize, params: &WorldParams) {
        for _ in 0..count {
            self.hunger.restore(params.eat_restore);
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn hunger(&self) -> Hunger {
        self.hunger
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Mutable Q-table access for the TD update. Callers must not touch the
    /// table in evaluation mode.
    pub fn q_table_mut(&mut self) -> &mut QTable {
        &mut self.q_table
    }
}
