//! Forager - tabular Q-learning foraging simulator
//!
//! This crate provides:
//! - A bounded toroidal foraging world with hunger, food spawning, and
//!   two embedding variants (continuous offset and discretized compass)
//! - A tabular Q-learning agent with ε-greedy action selection and TD(0)
//!   updates
//! - A training pipeline with observers, followed by a frozen evaluation
//!   episode, plus a manual-play mode driving the same world rules

pub mod cli;
pub mod embedding;
pub mod error;
pub mod pipeline;
pub mod q_learning;
pub mod types;
pub mod view;
pub mod world;

pub use embedding::{
    CompassEmbedding, OffsetEmbedding, StateEmbedding, Variant, compass_octant,
};
pub use error::{Error, Result};
pub use pipeline::{
    EpisodeOutcome, ForagingSession, MetricsObserver, MetricsSummary, Observer, ProgressObserver,
    SessionConfig, TrainingConfig, TrainingPipeline, TrainingResult, evaluate, run_episode,
};
pub use q_learning::{EpsilonGreedy, QTable};
pub use types::{Action, Hunger, Mode, StateKey};
pub use view::{
    AsciiGridSink, ConsoleSink, FrameLimiter, FrameSink, Intent, IntentSource, NullSink, Snapshot,
    StdinIntents,
};
pub use world::{Arena, ConsumeRule, Food, FoodField, Forager, Point, WorldParams};
