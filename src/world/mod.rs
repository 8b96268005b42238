//! World model: arena geometry, the foraging agent, and the food set.
//!
//! The world owns no learning state beyond the agent's Q-table; it answers
//! the two questions the episode driver asks each step: "did the agent just
//! eat?" and "should new food spawn now?".

pub mod agent;
pub mod arena;
pub mod food;

use serde::{Deserialize, Serialize};

pub use agent::Forager;
pub use arena::{Arena, Point};
pub use food::{Food, FoodField};

use crate::types::{HUNGER_RATE, INITIAL_FOOD, SPAWN_INTERVAL_MS};

/// How food consumption is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsumeRule {
    /// Continuous variant: squared Euclidean distance below
    /// `(agent_radius + food_radius)²`.
    WithinRadius { agent_radius: i32, food_radius: i32 },
    /// Discretized variant: exact cell match.
    ExactCell,
}

impl ConsumeRule {
    /// Whether food at `food` is consumed by an agent at `agent`.
    pub fn consumes(&self, agent: Point, food: Point) -> bool {
        match *self {
            ConsumeRule::WithinRadius {
                agent_radius,
                food_radius,
            } => {
                let threshold = (agent_radius + food_radius) as i64;
                agent.distance_squared(food) < threshold * threshold
            }
            ConsumeRule::ExactCell => agent == food,
        }
    }
}

/// Fixed world geometry and dynamics for one simulation variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldParams {
    pub arena: Arena,
    /// Distance moved per action, in arena units.
    pub step: i32,
    /// Food items placed at episode reset.
    pub initial_food: usize,
    /// Simulated milliseconds between opportunistic spawns.
    pub spawn_interval_ms: u64,
    /// Hunger drained per step.
    pub hunger_rate: f64,
    /// Hunger restored per food item consumed.
    pub eat_restore: f64,
    pub consume: ConsumeRule,
}

impl WorldParams {
    /// Continuous-pixel variant: 800×600 arena, 5-pixel steps, radius-based
    /// consumption, 20 hunger restored per item.
    pub fn continuous() -> Self {
        WorldParams {
            arena: Arena::new(800, 600),
            step: 5,
            initial_food: INITIAL_FOOD,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            hunger_rate: HUNGER_RATE,
            eat_restore: 20.0,
            consume: ConsumeRule::WithinRadius {
                agent_radius: 10,
                food_radius: 5,
            },
        }
    }

    /// Integer-grid variant: 40×30 cells, single-cell steps, exact-cell
    /// consumption, 10 hunger restored per item.
    pub fn grid() -> Self {
        WorldParams {
            arena: Arena::new(40, 30),
            step: 1,
            initial_food: INITIAL_FOOD,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            hunger_rate: HUNGER_RATE,
            eat_restore: 10.0,
            consume: ConsumeRule::ExactCell,
        }
    }
}
