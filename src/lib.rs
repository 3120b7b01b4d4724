//! Internal library crate for fxplore.
//!
//! The shipped application is the `fx` binary (`src/main.rs`).
//!
//! This library exists to share code between targets (binary, tests) and to keep modules organized.
//! This API is only used to build the `fx` binary and is not considered a library for external use.

pub mod app;
pub mod core;
pub mod ui;
pub mod utils;
