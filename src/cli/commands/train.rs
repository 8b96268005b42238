//! Train command - run the training phase, then one frozen evaluation episode

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::output::{format_number, print_section, print_subsection},
    embedding::Variant,
    pipeline::{
        EpisodeOutcome, ProgressObserver, SessionConfig, TrainingConfig, TrainingPipeline,
        TrainingResult, evaluate,
    },
    types::{DISCOUNT_FACTOR, EPSILON, TRAINING_EPISODES},
    view::{AsciiGridSink, ConsoleSink, FrameLimiter, FrameSink, NullSink},
};

#[derive(Parser, Debug)]
#[command(about = "Train the foraging learner")]
pub struct TrainArgs {
    /// Simulation variant (continuous or grid)
    #[arg(long, short = 'v', default_value = "continuous")]
    pub variant: String,

    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = TRAINING_EPISODES)]
    pub episodes: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Exploration rate ε
    #[arg(long, default_value_t = EPSILON)]
    pub epsilon: f64,

    /// Learning rate α (defaults to the variant's rate)
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Discount factor γ
    #[arg(long, default_value_t = DISCOUNT_FACTOR)]
    pub discount: f64,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Render the evaluation episode to the terminal
    #[arg(long, default_value_t = false)]
    pub render: bool,

    /// Frames per second for the rendered evaluation episode
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Safety cap on evaluation episode length (0 = starvation only)
    #[arg(long, default_value_t = 10_000)]
    pub eval_max_steps: usize,

    /// Safety cap on training episode length (0 = starvation only)
    #[arg(long, default_value_t = 0)]
    pub train_max_steps: usize,
}

#[derive(Debug, Serialize)]
struct EvaluationStats {
    steps: usize,
    total_reward: f64,
    food_eaten: usize,
    starved: bool,
    elapsed_seconds: f64,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: TrainingResult,
    evaluation: EvaluationStats,
    metadata: SummaryMetadata,
}

#[derive(Debug, Serialize)]
struct SummaryMetadata {
    variant: String,
    episodes: usize,
    seed: Option<u64>,
    epsilon: f64,
    learning_rate: f64,
    discount_factor: f64,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

fn step_cap(raw: usize) -> Option<usize> {
    if raw == 0 { None } else { Some(raw) }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let variant: Variant = args
        .variant
        .parse()
        .context("unrecognized --variant value")?;

    let mut session_config = SessionConfig::new(variant).with_epsilon(args.epsilon);
    if let Some(seed) = args.seed {
        session_config = session_config.with_seed(seed);
    }
    if let Some(learning_rate) = args.learning_rate {
        session_config = session_config.with_learning_rate(learning_rate);
    }
    session_config = session_config.with_discount_factor(args.discount);
    let mut session = session_config.build()?;

    print_section(&format!(
        "Training foraging learner ({variant} variant, {} episodes)",
        format_number(args.episodes)
    ));

    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        episodes: args.episodes,
        max_steps_per_episode: step_cap(args.train_max_steps),
    });
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    let training = pipeline.run(&mut session)?;

    print_subsection("Training summary");
    println!("Episodes:          {}", format_number(training.episodes));
    println!("Total steps:       {}", format_number(training.total_steps));
    println!("Mean survival:     {:.1} steps", training.mean_steps);
    println!("Best survival:     {} steps", format_number(training.best_steps));
    println!("Food eaten:        {}", format_number(training.total_food_eaten));
    println!(
        "Q-table size:      {} entries across {} states",
        format_number(training.q_table_entries),
        format_number(training.q_table_states)
    );

    print_subsection("Evaluation (policy frozen)");
    let started = Instant::now();
    let evaluation = run_evaluation(&mut session, &args, variant)?;
    let elapsed = started.elapsed().as_secs_f64();

    if evaluation.starved {
        println!("The agent starved after {} steps.", format_number(evaluation.steps));
    } else {
        println!(
            "The agent was still alive when the {}-step cap was reached.",
            format_number(evaluation.steps)
        );
    }
    println!("Food eaten:        {}", evaluation.food_eaten);
    println!("Total reward:      {:.1}", evaluation.total_reward);
    println!("Elapsed:           {elapsed:.5} seconds");

    if let Some(raw_path) = &args.summary {
        let path = sanitize_summary_path(raw_path);
        let summary = TrainingSummaryFile {
            evaluation: EvaluationStats {
                steps: evaluation.steps,
                total_reward: evaluation.total_reward,
                food_eaten: evaluation.food_eaten,
                starved: evaluation.starved,
                elapsed_seconds: elapsed,
            },
            metadata: SummaryMetadata {
                variant: variant.to_string(),
                episodes: args.episodes,
                seed: args.seed,
                epsilon: args.epsilon,
                learning_rate: session.q_table().learning_rate(),
                discount_factor: session.q_table().discount_factor(),
            },
            training,
        };
        let file = std::fs::File::create(&path)
            .with_context(|| format!("failed to create summary file {}", path.display()))?;
        to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}

fn run_evaluation(
    session: &mut crate::pipeline::ForagingSession,
    args: &TrainArgs,
    variant: Variant,
) -> Result<EpisodeOutcome> {
    let max_steps = step_cap(args.eval_max_steps);
    let outcome = if args.render {
        let limiter = Some(FrameLimiter::new(args.fps));
        let mut sink: Box<dyn FrameSink> = match variant {
            Variant::Grid => Box::new(AsciiGridSink::stdout(session.params().arena)),
            Variant::Continuous => Box::new(ConsoleSink::stdout()),
        };
        evaluate(session, max_steps, sink.as_mut(), limiter)?
    } else {
        evaluate(session, max_steps, &mut NullSink, None)?
    };
    Ok(outcome)
}
