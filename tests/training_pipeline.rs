//! End-to-end tests for the training pipeline and the frozen evaluation
//! episode, driven entirely through the public API.

use std::sync::{Arc, Mutex};

use forager::{
    EpisodeOutcome, Mode, NullSink, Observer, Result, SessionConfig, TrainingConfig,
    TrainingPipeline, Variant, evaluate, run_episode,
};

fn grid_session(seed: u64) -> forager::ForagingSession {
    SessionConfig::new(Variant::Grid)
        .with_seed(seed)
        .build()
        .unwrap()
}

#[test]
fn test_train_then_frozen_evaluation() {
    let mut session = grid_session(42);
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        episodes: 10,
        max_steps_per_episode: Some(1500),
    });

    let result = pipeline.run(&mut session).unwrap();
    assert_eq!(result.episodes, 10);
    assert!(result.q_table_entries > 0);
    assert!(result.q_table_states <= result.q_table_entries);

    let before = session.q_table().clone();
    let outcome = evaluate(&mut session, Some(300), &mut NullSink, None).unwrap();
    assert!(outcome.steps > 0);
    assert_eq!(&before, session.q_table());
}

#[test]
fn test_seeded_runs_reproduce_exactly() {
    let run = |seed: u64| -> (usize, usize, usize, EpisodeOutcome) {
        let mut session = grid_session(seed);
        let result = TrainingPipeline::new(TrainingConfig {
            episodes: 5,
            max_steps_per_episode: Some(1200),
        })
        .run(&mut session)
        .unwrap();
        let evaluation = evaluate(&mut session, Some(400), &mut NullSink, None).unwrap();
        (
            result.total_steps,
            result.total_food_eaten,
            result.q_table_entries,
            evaluation,
        )
    };

    assert_eq!(run(77), run(77));
}

#[derive(Default)]
struct LifecycleCounts {
    training_starts: usize,
    episode_starts: usize,
    episode_ends: usize,
    training_ends: usize,
}

struct LifecycleObserver(Arc<Mutex<LifecycleCounts>>);

impl Observer for LifecycleObserver {
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        self.0.lock().unwrap().training_starts += 1;
        Ok(())
    }

    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.0.lock().unwrap().episode_starts += 1;
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, _outcome: &EpisodeOutcome) -> Result<()> {
        self.0.lock().unwrap().episode_ends += 1;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.0.lock().unwrap().training_ends += 1;
        Ok(())
    }
}

#[test]
fn test_observer_lifecycle_counts() {
    let counts = Arc::new(Mutex::new(LifecycleCounts::default()));
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        episodes: 4,
        max_steps_per_episode: Some(1100),
    })
    .with_observer(Box::new(LifecycleObserver(Arc::clone(&counts))));

    pipeline.run(&mut grid_session(5)).unwrap();

    let counts = counts.lock().unwrap();
    assert_eq!(counts.training_starts, 1);
    assert_eq!(counts.episode_starts, 4);
    assert_eq!(counts.episode_ends, 4);
    assert_eq!(counts.training_ends, 1);
}

#[test]
fn test_starved_terminal_step_is_never_rendered() {
    let mut session = grid_session(13);
    let mut frames = 0usize;
    let mut last_hunger = f64::NAN;
    let outcome = run_episode(&mut session, Mode::Training, None, &mut |snapshot| {
        frames += 1;
        last_hunger = snapshot.hunger;
        Ok(())
    })
    .unwrap();

    // The terminal step aborts before consumption and rendering, so the
    // sink sees one frame fewer than the step count and never sees zero
    // hunger.
    assert!(outcome.starved);
    assert_eq!(frames, outcome.steps - 1);
    assert!(last_hunger > 0.0);
}

#[test]
fn test_reward_accounting_identity() {
    let mut session = grid_session(21);
    let outcome = run_episode(&mut session, Mode::Training, None, &mut |_| Ok(())).unwrap();
    assert!(outcome.starved);

    let hunger_rate = session.params().hunger_rate;
    let expected = 10.0 * outcome.food_eaten as f64 - hunger_rate * outcome.steps as f64;
    assert!(
        (outcome.total_reward - expected).abs() < 1e-6,
        "reward {} diverged from shaping+consumption identity {expected}",
        outcome.total_reward
    );
}

#[test]
fn test_continuous_variant_trains() {
    let mut session = SessionConfig::new(Variant::Continuous)
        .with_seed(8)
        .build()
        .unwrap();
    let result = TrainingPipeline::new(TrainingConfig {
        episodes: 3,
        max_steps_per_episode: Some(1500),
    })
    .run(&mut session)
    .unwrap();

    assert_eq!(result.episodes, 3);
    assert!(result.total_steps >= 3 * 1000);
    assert!(result.q_table_entries > 0);
}
