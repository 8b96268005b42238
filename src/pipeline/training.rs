//! Training/evaluation controller: many learning episodes, then one
//! policy-frozen evaluation episode.

use serde::{Deserialize, Serialize};

use super::{
    episode::{EpisodeOutcome, run_episode},
    observers::Observer,
    session::ForagingSession,
};
use crate::{
    Result,
    types::{Mode, TRAINING_EPISODES},
    view::{FrameLimiter, FrameSink},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Optional safety cap on episode length. `None` leaves starvation as
    /// the only terminal condition.
    pub max_steps_per_episode: Option<usize>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: TRAINING_EPISODES,
            max_steps_per_episode: None,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes completed
    pub episodes: usize,

    /// Total steps across all episodes
    pub total_steps: usize,

    /// Mean episode length in steps
    pub mean_steps: f64,

    /// Longest episode
    pub best_steps: usize,

    /// Food items consumed across all episodes
    pub total_food_eaten: usize,

    /// (state, action) entries stored in the Q-table
    pub q_table_entries: usize,

    /// Distinct states visited
    pub q_table_states: usize,
}

impl TrainingResult {
    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Training pipeline: runs learning episodes back-to-back through the
/// episode driver. The agent's Q-table is the only state carried between
/// episodes.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run the training phase.
    ///
    /// The training loop is deliberately not paced by any clock: episodes
    /// run as fast as possible.
    pub fn run(&mut self, session: &mut ForagingSession) -> Result<TrainingResult> {
        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut total_steps = 0;
        let mut best_steps = 0;
        let mut total_food_eaten = 0;

        for episode in 0..self.config.episodes {
            for observer in &mut self.observers {
                observer.on_episode_start(episode)?;
            }

            let outcome = run_episode(
                session,
                Mode::Training,
                self.config.max_steps_per_episode,
                &mut |_| Ok(()),
            )?;

            total_steps += outcome.steps;
            best_steps = best_steps.max(outcome.steps);
            total_food_eaten += outcome.food_eaten;

            for observer in &mut self.observers {
                observer.on_episode_end(episode, &outcome)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let mean_steps = if self.config.episodes == 0 {
            0.0
        } else {
            total_steps as f64 / self.config.episodes as f64
        };

        Ok(TrainingResult {
            episodes: self.config.episodes,
            total_steps,
            mean_steps,
            best_steps,
            total_food_eaten,
            q_table_entries: session.q_table().len(),
            q_table_states: session.q_table().state_count(),
        })
    }
}

/// Run the single evaluation episode: exploration disabled, Q-table frozen.
///
/// Each frame is handed to `sink`; when a [`FrameLimiter`] is supplied the
/// loop yields to its fixed-rate pacing, which exists purely for
/// human-observable presentation.
pub fn evaluate(
    session: &mut ForagingSession,
    max_steps: Option<usize>,
    sink: &mut dyn FrameSink,
    limiter: Option<FrameLimiter>,
) -> Result<EpisodeOutcome> {
    let mut limiter = limiter;
    run_episode(session, Mode::Evaluation, max_steps, &mut |snapshot| {
        sink.frame(snapshot)?;
        if let Some(limiter) = limiter.as_mut() {
            limiter.pace();
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        embedding::Variant,
        pipeline::{observers::MetricsObserver, session::SessionConfig},
        view::NullSink,
    };

    fn session(seed: u64) -> ForagingSession {
        SessionConfig::new(Variant::Grid).with_seed(seed).build().unwrap()
    }

    #[test]
    fn test_training_pipeline_runs_all_episodes() {
        let config = TrainingConfig {
            episodes: 5,
            max_steps_per_episode: Some(2000),
        };
        let mut pipeline =
            TrainingPipeline::new(config).with_observer(Box::new(MetricsObserver::new()));
        let mut session = session(42);

        let result = pipeline.run(&mut session).unwrap();
        assert_eq!(result.episodes, 5);
        assert!(result.total_steps >= 5 * 1000);
        assert!(result.best_steps >= result.mean_steps as usize);
        assert!(result.q_table_entries > 0);
        assert!(result.q_table_states <= result.q_table_entries);
    }

    #[test]
    fn test_evaluation_freezes_table_and_policy() {
        let mut session = session(11);
        let mut pipeline = TrainingPipeline::new(TrainingConfig {
            episodes: 3,
            max_steps_per_episode: Some(2000),
        });
        pipeline.run(&mut session).unwrap();

        let before = session.q_table().clone();
        let outcome = evaluate(&mut session, Some(300), &mut NullSink, None).unwrap();
        assert!(outcome.steps > 0);
        assert_eq!(&before, session.q_table());
    }

    #[test]
    fn test_seeded_training_is_reproducible() {
        let run = |seed: u64| {
            let mut s = session(seed);
            TrainingPipeline::new(TrainingConfig {
                episodes: 3,
                max_steps_per_episode: Some(1500),
            })
            .run(&mut s)
            .unwrap()
        };
        let a = run(99);
        let b = run(99);
        assert_eq!(a.total_steps, b.total_steps);
        assert_eq!(a.total_food_eaten, b.total_food_eaten);
        assert_eq!(a.q_table_entries, b.q_table_entries);
    }

    #[test]
    fn test_result_round_trips_through_json() {
        let result = TrainingResult {
            episodes: 10,
            total_steps: 10_500,
            mean_steps: 1050.0,
            best_steps: 1200,
            total_food_eaten: 4,
            q_table_entries: 321,
            q_table_states: 100,
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        result.save(&path).unwrap();
        let loaded = TrainingResult::load(&path).unwrap();
        assert_eq!(loaded.episodes, result.episodes);
        assert_eq!(loaded.best_steps, result.best_steps);
    }
}
