//! The episode driver: one reset-to-terminal pass of the agent through the
//! environment.

use serde::{Deserialize, Serialize};

use super::session::ForagingSession;
use crate::{
    Result,
    types::{FRAME_MS, Mode, REWARD_PER_FOOD},
    view::Snapshot,
};

/// Result of a single episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeOutcome {
    /// Steps survived before the terminal condition.
    pub steps: usize,
    /// Accumulated shaping + consumption reward.
    pub total_reward: f64,
    /// Food items consumed.
    pub food_eaten: usize,
    /// Whether the episode ended by starvation (as opposed to a step cap).
    pub starved: bool,
}

/// Run one episode: reset, step until starvation, return the outcome.
///
/// The per-step order is load-bearing: embed, select, move (toroidal wrap),
/// accrue the shaping reward,
/// decay hunger — and if the agent starves the step ends here, skipping
/// consumption and the learning update — then consume, spawn, embed the next
/// state, and (training mode only) apply the TD update.
///
/// `on_step` is invoked once per completed (non-terminal) step with a
/// read-only snapshot; the rendered evaluation episode uses it for frame
/// output and pacing. `max_steps` is a safety cap for policies good enough
/// to never starve; `None` means starvation is the only exit.
pub fn run_episode(
    session: &mut ForagingSession,
    mode: Mode,
    max_steps: Option<usize>,
    on_step: &mut dyn FnMut(&Snapshot) -> Result<()>,
) -> Result<EpisodeOutcome> {
    session.agent.reset(&session.params.arena);
    session
        .food
        .reset(&session.params, &mut session.rng, session.clock_ms);

    let mut steps = 0;
    let mut total_reward = 0.0;
    let mut food_eaten = 0;

    loop {
        let state = session.embedding.embed(&session.agent, &session.food);
        let action = session
            .policy
            .select(session.agent.q_table(), state, mode, &mut session.rng);
        session.agent.apply(action, &session.params);

        let mut reward = -session.params.hunger_rate;
        steps += 1;

        if session.agent.tick_hunger(&session.params) {
            // Starvation aborts the step before food can be eaten and
            // before any learning update.
            total_reward += reward;
            return Ok(EpisodeOutcome {
                steps,
                total_reward,
                food_eaten,
                starved: true,
            });
        }

        let eaten = session
            .food
            .consume_at(session.agent.position(), &session.params.consume);
        if eaten > 0 {
            session.agent.eat(eaten, &session.params);
            reward += REWARD_PER_FOOD * eaten as f64;
            food_eaten += eaten;
        }

        session.clock_ms += FRAME_MS;
        session
            .food
            .maybe_spawn(session.clock_ms, &session.params, &mut session.rng);

        let next_state = session.embedding.embed(&session.agent, &session.food);
        if mode.learns() {
            session
                .agent
                .q_table_mut()
                .update(state, action, reward, next_state);
        }

        total_reward += reward;
        on_step(&session.snapshot(steps))?;

        if max_steps.is_some_and(|cap| steps >= cap) {
            return Ok(EpisodeOutcome {
                steps,
                total_reward,
                food_eaten,
                starved: false,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{embedding::Variant, pipeline::session::SessionConfig};

    fn session(variant: Variant, seed: u64) -> ForagingSession {
        SessionConfig::new(variant).with_seed(seed).build().unwrap()
    }

    #[test]
    fn test_episode_terminates_by_starvation() {
        let mut session = session(Variant::Grid, 42);
        let outcome =
            run_episode(&mut session, Mode::Training, None, &mut |_| Ok(())).unwrap();
        assert!(outcome.starved);
        assert!(outcome.steps >= 1000, "five initial items can only extend life");
    }

    #[test]
    fn test_step_cap_preempts_starvation() {
        let mut session = session(Variant::Grid, 42);
        let outcome =
            run_episode(&mut session, Mode::Training, Some(10), &mut |_| Ok(())).unwrap();
        assert_eq!(outcome.steps, 10);
        assert!(!outcome.starved);
    }

    #[test]
    fn test_training_mode_populates_q_table() {
        let mut session = session(Variant::Grid, 7);
        assert!(session.q_table().is_empty());
        run_episode(&mut session, Mode::Training, None, &mut |_| Ok(())).unwrap();
        assert!(!session.q_table().is_empty());
    }

    #[test]
    fn test_evaluation_mode_freezes_q_table() {
        let mut session = session(Variant::Grid, 7);
        run_episode(&mut session, Mode::Training, None, &mut |_| Ok(())).unwrap();
        let before = session.q_table().clone();

        run_episode(&mut session, Mode::Evaluation, Some(500), &mut |_| Ok(())).unwrap();
        // Snapshot equality: zero mutations during evaluation.
        assert_eq!(&before, session.q_table());
    }

    #[test]
    fn test_on_step_sees_every_non_terminal_step() {
        let mut session = session(Variant::Grid, 3);
        let mut observed = 0usize;
        let outcome = run_episode(&mut session, Mode::Training, Some(25), &mut |snapshot| {
            observed += 1;
            assert_eq!(snapshot.step, observed);
            Ok(())
        })
        .unwrap();
        assert_eq!(observed, outcome.steps);
    }

    #[test]
    fn test_seeded_episodes_are_reproducible() {
        let run = |seed: u64| {
            let mut s = session(Variant::Continuous, seed);
            run_episode(&mut s, Mode::Training, None, &mut |_| Ok(())).unwrap()
        };
        assert_eq!(run(1234), run(1234));
    }
}
