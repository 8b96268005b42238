//! Session wiring: world, embedding, policy, agent, clock, and RNG.

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    Result,
    embedding::{StateEmbedding, Variant},
    q_learning::{EpsilonGreedy, QTable},
    types::DISCOUNT_FACTOR,
    view::Snapshot,
    world::{FoodField, Forager, WorldParams},
};

/// Configuration for building a [`ForagingSession`].
///
/// # Examples
///
/// ```
/// use forager::{SessionConfig, Variant};
///
/// let session = SessionConfig::new(Variant::Grid)
///     .with_seed(42)
///     .with_epsilon(0.1)
///     .build()
///     .unwrap();
/// assert_eq!(session.params().arena.width(), 40);
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Simulation variant (world geometry + embedding + α).
    pub variant: Variant,
    /// Random seed for reproducibility. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Exploration rate ε.
    pub epsilon: f64,
    /// Learning rate α override; defaults to the variant's rate.
    pub learning_rate: Option<f64>,
    /// Discount factor γ.
    pub discount_factor: f64,
}

impl SessionConfig {
    /// Create a configuration with the variant's defaults.
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            seed: None,
            epsilon: crate::types::EPSILON,
            learning_rate: None,
            discount_factor: DISCOUNT_FACTOR,
        }
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the exploration rate.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Override the variant's learning rate.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = Some(learning_rate);
        self
    }

    /// Set the discount factor.
    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    /// Build the session.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if ε or the rates are
    /// out of range.
    pub fn build(self) -> Result<ForagingSession> {
        ForagingSession::new(self)
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

fn validate_rate(value: f64, name: &str) -> Result<f64> {
    if (0.0..=1.0).contains(&value) && value.is_finite() {
        Ok(value)
    } else {
        Err(crate::Error::InvalidConfiguration {
            message: format!("{name} {value} must lie in [0, 1]"),
        })
    }
}

/// One wired-up simulation: the single agent, its world, and the learning
/// machinery, single-threaded and fully synchronous.
///
/// The session's Q-table (owned by the agent) is the only state carried
/// across episodes; the simulated clock is monotonic across the whole run.
pub struct ForagingSession {
    pub(crate) params: WorldParams,
    pub(crate) embedding: Box<dyn StateEmbedding>,
    pub(crate) policy: EpsilonGreedy,
    pub(crate) agent: Forager,
    pub(crate) food: FoodField,
    pub(crate) clock_ms: u64,
    pub(crate) rng: StdRng,
    variant: Variant,
}

impl ForagingSession {
    /// Build a session from its configuration.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let params = config.variant.world_params();
        let learning_rate = validate_rate(
            config.learning_rate.unwrap_or(config.variant.learning_rate()),
            "learning rate",
        )?;
        let discount_factor = validate_rate(config.discount_factor, "discount factor")?;
        let policy = EpsilonGreedy::new(config.epsilon)?;

        Ok(ForagingSession {
            agent: Forager::new(&params.arena, learning_rate, discount_factor),
            food: FoodField::new(),
            embedding: config.variant.embedding(),
            policy,
            params,
            clock_ms: 0,
            rng: build_rng(config.seed),
            variant: config.variant,
        })
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn params(&self) -> &WorldParams {
        &self.params
    }

    pub fn agent(&self) -> &Forager {
        &self.agent
    }

    pub fn q_table(&self) -> &QTable {
        self.agent.q_table()
    }

    /// Read-only frame snapshot for the renderer.
    pub fn snapshot(&self, step: usize) -> Snapshot {
        Snapshot {
            step,
            position: self.agent.position(),
            hunger: self.agent.hunger().value(),
            food: self.food.positions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_applies_variant_defaults() {
        let session = SessionConfig::new(Variant::Grid).with_seed(1).build().unwrap();
        assert_eq!(session.q_table().learning_rate(), 0.15);
        assert_eq!(session.q_table().discount_factor(), 0.9);

        let session = SessionConfig::new(Variant::Continuous)
            .with_seed(1)
            .build()
            .unwrap();
        assert_eq!(session.q_table().learning_rate(), 0.5);
    }

    #[test]
    fn test_build_rejects_bad_rates() {
        assert!(
            SessionConfig::new(Variant::Grid)
                .with_epsilon(1.5)
                .build()
                .is_err()
        );
        assert!(
            SessionConfig::new(Variant::Grid)
                .with_learning_rate(-0.2)
                .build()
                .is_err()
        );
        assert!(
            SessionConfig::new(Variant::Grid)
                .with_discount_factor(f64::NAN)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_snapshot_reflects_world() {
        let session = SessionConfig::new(Variant::Grid).with_seed(9).build().unwrap();
        let snapshot = session.snapshot(0);
        assert_eq!(snapshot.position, session.params().arena.center());
        assert_eq!(snapshot.hunger, 100.0);
        assert!(snapshot.food.is_empty(), "no food before the first reset");
    }
}
