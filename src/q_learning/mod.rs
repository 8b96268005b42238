//! Tabular Q-learning: the action-value table and ε-greedy policy.
//!
//! This is the learning core of the crate. The Q-table maps
//! `(StateKey, Action)` pairs to value estimates with unseen pairs reading
//! as zero, and is updated with the standard TD(0) rule
//!
//! ```text
//! Q(s,a) ← (1−α)·Q(s,a) + α·(r + γ·max_a' Q(s',a'))
//! ```
//!
//! Action selection mixes uniform exploration (probability ε, training mode
//! only) with greedy exploitation; greedy ties break to the first maximum in
//! the fixed [`Action::ALL`](crate::types::Action::ALL) order so seeded runs
//! are reproducible.

pub mod policy;
pub mod q_table;

pub use policy::EpsilonGreedy;
pub use q_table::QTable;
