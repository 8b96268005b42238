//! CLI infrastructure for the forager toolkit
//!
//! This module provides the command-line interface for training the
//! foraging learner and for the purely-manual play variant.

pub mod commands;
pub mod output;
