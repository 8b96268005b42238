//! State embeddings: deterministic mapping from world configuration to a
//! discrete Q-table key.
//!
//! Two variants exist. [`OffsetEmbedding`] keys on the raw signed offset to
//! the nearest food item (squared Euclidean metric) plus whole-unit hunger.
//! [`CompassEmbedding`] buckets the offset angle into 8 compass octants
//! (Manhattan metric) and hunger into ten-point bands, shrinking the state
//! space by roughly two orders of magnitude at the cost of angular
//! resolution. An empty food set always collapses to the sentinel key.

use std::{fmt, str::FromStr};

use crate::{
    types::StateKey,
    world::{Forager, FoodField, WorldParams},
};

/// Capability seam for state abstraction.
///
/// Implementations must be deterministic: identical world configurations
/// must always produce identical keys, or table lookups lose their meaning.
pub trait StateEmbedding {
    /// Compute the state key for the current world configuration.
    fn embed(&self, agent: &Forager, food: &FoodField) -> StateKey;

    /// Human-readable embedding name.
    fn name(&self) -> &'static str;
}

/// Continuous-offset embedding: `(dx, dy, ⌊hunger⌋)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetEmbedding;

impl StateEmbedding for OffsetEmbedding {
    fn embed(&self, agent: &Forager, food: &FoodField) -> StateKey {
        let position = agent.position();
        match food.nearest_by(position, |a, b| a.distance_squared(b)) {
            None => StateKey::NoFood {
                hunger: agent.hunger().floor(),
            },
            Some(nearest) => {
                let (dx, dy) = position.offset_to(nearest);
                StateKey::Offset {
                    dx,
                    dy,
                    hunger: agent.hunger().floor(),
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "offset"
    }
}

/// Discretized embedding: `(compass_octant(dx, dy), ⌊hunger / 10⌋)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompassEmbedding;

impl StateEmbedding for CompassEmbedding {
    fn embed(&self, agent: &Forager, food: &FoodField) -> StateKey {
        let position = agent.position();
        match food.nearest_by(position, |a, b| a.manhattan(b)) {
            None => StateKey::NoFood {
                hunger: agent.hunger().band(),
            },
            Some(nearest) => {
                let (dx, dy) = position.offset_to(nearest);
                StateKey::Compass {
                    octant: compass_octant(dx, dy),
                    band: agent.hunger().band(),
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "compass"
    }
}

/// Map an offset vector to one of 8 compass octants of 45° each.
///
/// Bucket boundaries sit at 22.5° + k·45°; the 0°/360° tie belongs to
/// octant 0. The angle follows `atan2(dy, dx)` with the y axis growing
/// downward, normalized into `[0, 360)`.
pub fn compass_octant(dx: i32, dy: i32) -> u8 {
    let angle = (dy as f64).atan2(dx as f64).to_degrees().rem_euclid(360.0);
    if !(22.5..337.5).contains(&angle) {
        0
    } else {
        ((angle - 22.5) / 45.0) as u8 + 1
    }
}

/// One of the two simulation variants, bundling world geometry, the state
/// embedding, and the variant's learning rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// 800×600 pixel arena, raw-offset embedding, α = 0.5.
    Continuous,
    /// 40×30 cell arena, compass embedding, α = 0.15.
    Grid,
}

impl Variant {
    /// World geometry and dynamics for this variant.
    pub fn world_params(&self) -> WorldParams {
        match self {
            Variant::Continuous => WorldParams::continuous(),
            Variant::Grid => WorldParams::grid(),
        }
    }

    /// Learning rate α. The grid state space is denser in visits, so its
    /// updates are slower for stability.
    pub fn learning_rate(&self) -> f64 {
        match self {
            Variant::Continuous => 0.5,
            Variant::Grid => 0.15,
        }
    }

    /// The variant's state embedding.
    pub fn embedding(&self) -> Box<dyn StateEmbedding> {
        match self {
            Variant::Continuous => Box::new(OffsetEmbedding),
            Variant::Grid => Box::new(CompassEmbedding),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Continuous => "continuous",
            Variant::Grid => "grid",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Variant {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continuous" | "pixel" => Ok(Variant::Continuous),
            "grid" | "discrete" => Ok(Variant::Grid),
            other => Err(crate::Error::ParseVariant {
                input: other.to_string(),
                expected: "continuous, pixel, grid, discrete".to_string(),
            }),
        }
    }
}
