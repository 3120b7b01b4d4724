//! Miscellaneous utilities for fxplore.
//!
//! - [cli]: command-line argument parsing
//! - [helpers]: path expansion, resolution and display
//! - [logging]: tracing subscriber setup

pub mod cli;
pub mod helpers;
pub mod logging;

pub use helpers::{expand_home_path, readable_path, resolve_path, shorten_home_path};
