//! Play command - the purely-manual variant, no learning involved

use anyhow::{Context, Result};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    cli::output::print_section,
    embedding::Variant,
    types::FRAME_MS,
    view::{
        AsciiGridSink, ConsoleSink, FrameLimiter, FrameSink, Intent, IntentSource, Snapshot,
        StdinIntents,
    },
    world::{FoodField, Forager, WorldParams},
};

#[derive(Parser, Debug)]
#[command(about = "Play the foraging game manually")]
pub struct PlayArgs {
    /// Simulation variant (continuous or grid)
    #[arg(long, short = 'v', default_value = "continuous")]
    pub variant: String,

    /// Random seed for food placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frames per second
    #[arg(long, default_value_t = 30)]
    pub fps: u32,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let variant: Variant = args
        .variant
        .parse()
        .context("unrecognized --variant value")?;
    let params = variant.world_params();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut sink: Box<dyn FrameSink> = match variant {
        Variant::Grid => Box::new(AsciiGridSink::stdout(params.arena)),
        Variant::Continuous => Box::new(ConsoleSink::stdout()),
    };

    print_section(&format!("Manual foraging ({variant} variant)"));
    println!("Controls: w/a/s/d to move, '.' or empty line to idle, q to quit.");

    let mut intents = StdinIntents::stdin();
    let mut limiter = FrameLimiter::new(args.fps);

    let outcome = run_manual(
        &params,
        &mut rng,
        &mut intents,
        sink.as_mut(),
        &mut |_| limiter.pace(),
    )?;

    match outcome {
        ManualOutcome::Starved { steps } => println!("\nYou starved after {steps} steps."),
        ManualOutcome::Quit { steps } => println!("\nStopped after {steps} steps."),
    }
    Ok(())
}

/// How a manual session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualOutcome {
    Starved { steps: usize },
    Quit { steps: usize },
}

/// The manual-play frame loop: poll an intent, move, decay hunger, consume,
/// spawn, render. Bad intent lines are reported and treated as idle frames.
pub fn run_manual<R: rand::Rng>(
    params: &WorldParams,
    rng: &mut R,
    intents: &mut dyn IntentSource,
    sink: &mut dyn FrameSink,
    pace: &mut dyn FnMut(&Snapshot),
) -> crate::Result<ManualOutcome> {
    let mut agent = Forager::new(&params.arena, 0.0, 0.0);
    let mut food = FoodField::new();
    let mut clock_ms = 0u64;
    food.reset(params, rng, clock_ms);

    let mut steps = 0usize;
    loop {
        let delta = match intents.poll() {
            Ok(Intent::Quit) => return Ok(ManualOutcome::Quit { steps }),
            Ok(Intent::Move { dx, dy }) => (dx.clamp(-1, 1), dy.clamp(-1, 1)),
            Ok(Intent::Idle) => (0, 0),
            Err(err) => {
                eprintln!("{err}");
                (0, 0)
            }
        };

        agent.apply_intent(delta, params);
        steps += 1;

        if agent.tick_hunger(params) {
            return Ok(ManualOutcome::Starved { steps });
        }

        let eaten = food.consume_at(agent.position(), &params.consume);
        agent.eat(eaten, params);

        clock_ms += FRAME_MS;
        food.maybe_spawn(clock_ms, params, rng);

        let snapshot = Snapshot {
            step: steps,
            position: agent.position(),
            hunger: agent.hunger().value(),
            food: food.positions(),
        };
        sink.frame(&snapshot)?;
        pace(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::view::NullSink;

    struct Scripted(Vec<Intent>);

    impl IntentSource for Scripted {
        fn poll(&mut self) -> crate::Result<Intent> {
            Ok(if self.0.is_empty() {
                Intent::Quit
            } else {
                self.0.remove(0)
            })
        }
    }

    #[test]
    fn test_manual_loop_quits_cleanly() {
        let params = WorldParams::grid();
        let mut rng = StdRng::seed_from_u64(1);
        let mut intents = Scripted(vec![
            Intent::Move { dx: 1, dy: 0 },
            Intent::Idle,
            Intent::Move { dx: 0, dy: 1 },
        ]);
        let outcome = run_manual(
            &params,
            &mut rng,
            &mut intents,
            &mut NullSink,
            &mut |_| {},
        )
        .unwrap();
        assert_eq!(outcome, ManualOutcome::Quit { steps: 3 });
    }

    #[test]
    fn test_manual_loop_starves_without_food() {
        let params = WorldParams {
            initial_food: 0,
            spawn_interval_ms: u64::MAX,
            ..WorldParams::grid()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let mut intents = Scripted(vec![Intent::Idle; 1100]);
        let outcome = run_manual(
            &params,
            &mut rng,
            &mut intents,
            &mut NullSink,
            &mut |_| {},
        )
        .unwrap();
        assert_eq!(outcome, ManualOutcome::Starved { steps: 1000 });
    }
}
