//! Training and evaluation pipeline for the foraging learner.
//!
//! This module provides:
//! - [`ForagingSession`]: the wired-together simulation (world, embedding,
//!   policy, agent, seeded RNG, simulated clock)
//! - [`episode::run_episode`]: one reset-to-terminal episode
//! - [`TrainingPipeline`]: many training episodes followed by a single
//!   policy-frozen evaluation episode
//! - [`Observer`]s for composable progress reporting and metrics

pub mod episode;
pub mod observers;
pub mod session;
pub mod training;

pub use episode::{EpisodeOutcome, run_episode};
pub use observers::{MetricsObserver, MetricsSummary, Observer, ProgressObserver};
pub use session::{ForagingSession, SessionConfig};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult, evaluate};
