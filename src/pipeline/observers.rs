//! Observer pattern for the training pipeline.
//!
//! Observers allow composable progress reporting and metrics collection
//! without coupling the training loop to specific output formats.

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::episode::EpisodeOutcome;
use crate::Result;

/// Observer trait for monitoring training.
///
/// The methods are called in order: `on_training_start` once, then
/// `on_episode_start`/`on_episode_end` per episode, then `on_training_end`
/// once. All methods default to no-ops.
pub trait Observer: Send {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called before each episode.
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each episode with its outcome.
    fn on_episode_end(&mut self, _episode: usize, _outcome: &EpisodeOutcome) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Progress bar observer - shows training progress with survival stats
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    episodes: usize,
    total_steps: u64,
    best_steps: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            episodes: 0,
            total_steps: 0,
            best_steps: 0,
        }
    }

    fn message(&self) -> String {
        let mean = if self.episodes == 0 {
            0.0
        } else {
            self.total_steps as f64 / self.episodes as f64
        };
        format!("avg {mean:.0} steps, best {}", self.best_steps)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: &EpisodeOutcome) -> Result<()> {
        self.episodes += 1;
        self.total_steps += outcome.steps as u64;
        self.best_steps = self.best_steps.max(outcome.steps);

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - tracks per-episode outcomes
pub struct MetricsObserver {
    steps: Vec<usize>,
    rewards: Vec<f64>,
    food_eaten: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            rewards: Vec::new(),
            food_eaten: 0,
        }
    }

    /// Mean episode length in steps
    pub fn mean_steps(&self) -> f64 {
        if self.steps.is_empty() {
            0.0
        } else {
            self.steps.iter().sum::<usize>() as f64 / self.steps.len() as f64
        }
    }

    /// Longest episode observed
    pub fn best_steps(&self) -> usize {
        self.steps.iter().copied().max().unwrap_or(0)
    }

    /// Mean accumulated reward per episode
    pub fn mean_reward(&self) -> f64 {
        if self.rewards.is_empty() {
            0.0
        } else {
            self.rewards.iter().sum::<f64>() / self.rewards.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            episodes: self.steps.len(),
            mean_steps: self.mean_steps(),
            best_steps: self.best_steps(),
            mean_reward: self.mean_reward(),
            total_food_eaten: self.food_eaten,
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, outcome: &EpisodeOutcome) -> Result<()> {
        self.steps.push(outcome.steps);
        self.rewards.push(outcome.total_reward);
        self.food_eaten += outcome.food_eaten;
        Ok(())
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub episodes: usize,
    pub mean_steps: f64,
    pub best_steps: usize,
    pub mean_reward: f64,
    pub total_food_eaten: usize,
}
