#![forbid(unsafe_code)]

//! Trace replay for the haptic grid interaction core.
//!
//! Reads JSON-lines pointer or drag traces, drives a `GridTouchTracker` or
//! `SlideConfirmController` on the trace's own clock, and reports every
//! event and pulse with its timestamp. Used for regression fixtures and for
//! inspecting a recorded gesture by hand.

pub mod cli;
pub mod error;
pub mod replay;
pub mod trace;

pub use cli::run_from_env;
pub use error::{HarnessError, Result};
pub use replay::{
    GridReplay, GridSummary, ReplayEvent, SlideReplay, SlideSummary, replay_grid,
    replay_grid_with, replay_slide,
};
pub use trace::{TraceRecord, parse_trace, read_trace, write_trace};
