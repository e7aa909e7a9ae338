#![forbid(unsafe_code)]

//! Core: pointer-to-grid tracking, slide-to-confirm, and haptic feedback.
//!
//! # Role in the haptic grid
//! `hgrid-core` is the interaction layer behind a touch-driven grid of dots.
//! It has no UI dependencies: the host feeds it pointer samples and cell
//! geometry, and it answers with events to render and pulses to play.
//!
//! # Primary responsibilities
//! - **GridTouchTracker**: maps a dragging pointer onto cells, deduplicates
//!   entries, and expires each highlight on its own timer.
//! - **SlideConfirmController**: rubber-banded drag-to-unlock with a
//!   step-wise walk back on incomplete release.
//! - **rubber_band**: the shared overscroll compression curve.
//! - **FeedbackPort**: fire-and-forget pulse sink, with recording, gated, and
//!   engine-backed implementations.
//!
//! # Time
//! Nothing here spawns timers. Every entry point takes `now`, due work is
//! applied on entry, and `tick(now)` plus `next_deadline()` let the host
//! drive expiries from its own loop. Dropping a tracker or controller drops
//! everything it had scheduled.

pub mod config;
pub mod event;
pub mod feedback;
pub mod geometry;
pub mod grid_tracker;
pub mod haptics;
pub mod layout;
pub mod logging;
pub mod rubber_band;
pub mod slide;
pub mod timer;

#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

pub use config::{ConfigError, GridConfig, GridSettings, SlideConfig};
pub use event::{GridEvent, SlideEvent};
pub use feedback::{FeedbackPort, FeedbackPulse, GatedPort, NullPort, RecordingPort};
pub use geometry::{CellBounds, GridPoint, Point, Rect, Size};
pub use grid_tracker::GridTouchTracker;
pub use haptics::{EnginePort, HapticBackend, HapticError, HapticPattern};
pub use layout::GridLayout;
pub use rubber_band::rubber_band;
pub use slide::{SlideConfirmController, SlidePhase};
pub use timer::DeadlineQueue;

/// Monotonic instant used by every time-aware entry point.
pub use web_time::Instant;
