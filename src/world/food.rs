//! The food set: uniform random placement, spawn timing, and consumption.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{ConsumeRule, Point, WorldParams};

/// A single food item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub position: Point,
}

impl Food {
    /// Sample a food item uniformly at random within the arena bounds.
    pub fn sample<R: Rng>(params: &WorldParams, rng: &mut R) -> Self {
        Food {
            position: Point::new(
                rng.random_range(0..params.arena.width()),
                rng.random_range(0..params.arena.height()),
            ),
        }
    }
}

/// The active food set plus the spawn-timer reference tick.
///
/// The set may be empty; callers taking a minimum over it must go through
/// [`FoodField::nearest_by`], which guards that case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodField {
    items: Vec<Food>,
    last_spawn_ms: u64,
}

impl FoodField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear and repopulate to the initial count, resetting the spawn timer
    /// reference to `now_ms`.
    pub fn reset<R: Rng>(&mut self, params: &WorldParams, rng: &mut R, now_ms: u64) {
        self.items.clear();
        self.items
            .extend((0..params.initial_food).map(|_| Food::sample(params, rng)));
        self.last_spawn_ms = now_ms;
    }

    /// Remove every item the agent consumes at `position`, returning the
    /// count removed.
    pub fn consume_at(&mut self, position: Point, rule: &ConsumeRule) -> usize {
        let before = self.items.len();
        self.items.retain(|food| !rule.consumes(position, food.position));
        before - self.items.len()
    }

    /// Append exactly one food item if the spawn interval has elapsed,
    /// resetting the timer reference. Returns whether a spawn occurred.
    pub fn maybe_spawn<R: Rng>(&mut self, now_ms: u64, params: &WorldParams, rng: &mut R) -> bool {
        if now_ms.saturating_sub(self.last_spawn_ms) > params.spawn_interval_ms {
            self.items.push(Food::sample(params, rng));
            self.last_spawn_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Position of the item nearest to `from` under `metric`, or `None` if
    /// the set is empty. Ties resolve to the earliest-placed item.
    pub fn nearest_by<F>(&self, from: Point, metric: F) -> Option<Point>
    where
        F: Fn(Point, Point) -> i64,
    {
        self.items
            .iter()
            .min_by_key(|food| metric(from, food.position))
            .map(|food| food.position)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Positions of all active items, for the render snapshot.
    pub fn positions(&self) -> Vec<Point> {
        self.items.iter().map(|food| food.position).collect()
    }
}
