//! # Async Load/Cache Primitives
//!
//! Generic building blocks for fetching and memoizing one asynchronous value:
//! - [`LoadingState`]: a single-shot `Idle -> Loading -> {Loaded, Error}`
//!   state machine
//! - [`LoadingModel`]: a stateful holder binding a value slot to an
//!   injectable loader function
//!
//! Neither primitive guards against duplicate concurrent loads for the same
//! logical key; memoization and single-flight are layered on top by the
//! owner (see `core-fetch`).

pub mod model;
pub mod state;

pub use model::{BoxLoader, LoadingModel};
pub use state::LoadingState;
