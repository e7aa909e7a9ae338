#![forbid(unsafe_code)]

//! Grid touch tracking: maps a dragging pointer onto grid cells.
//!
//! [`GridTouchTracker`] turns a high-frequency stream of pointer locations
//! into discrete cell entries. Each cell the pointer enters joins the touched
//! set, produces one feedback pulse, and leaves the set on its own after the
//! configured highlight duration.
//!
//! # State Machine
//!
//! ```text
//!            pointer moved                pointer up / cancel
//!   Idle ───────────────────▶ Tracking ─────────────────────▶ Idle
//!                              │    ▲
//!                              └────┘ pointer moved
//! ```
//!
//! Touched-set expiry runs independently of the gesture phase: lifting the
//! pointer never clears highlights early.
//!
//! # Invariants
//!
//! 1. A cell enters the touched set only through a pointer entry, and leaves
//!    only through its own expiry.
//! 2. At most one pulse per entry: a pointer lingering over (or returning to)
//!    a cell that is still touched emits nothing and does not extend its
//!    highlight.
//! 3. Each touched cell has exactly one pending expiry.
//! 4. Pulses are emitted in the order cells are entered.
//! 5. Dropping the tracker drops every pending expiry.
//!
//! # Failure Modes
//!
//! None. A location outside every registered cell, an empty bounds registry,
//! or a non-finite location is a silent no-op.

use std::time::Duration;

use ahash::AHashMap;
use web_time::Instant;

use crate::config::{ConfigError, GridConfig};
use crate::event::GridEvent;
use crate::feedback::FeedbackPort;
use crate::geometry::{CellBounds, GridPoint, Point, Size};
use crate::layout::GridLayout;
use crate::timer::DeadlineQueue;

// ---------------------------------------------------------------------------
// Bounds registry
// ---------------------------------------------------------------------------

/// Latest reported rectangle per grid point, in first-report order.
#[derive(Debug, Default)]
struct BoundsRegistry {
    cells: Vec<CellBounds>,
    index: AHashMap<GridPoint, usize>,
}

impl BoundsRegistry {
    fn merge(&mut self, bounds: impl IntoIterator<Item = CellBounds>) {
        for cell in bounds {
            match self.index.get(&cell.point) {
                Some(&i) => self.cells[i] = cell,
                None => {
                    self.index.insert(cell.point, self.cells.len());
                    self.cells.push(cell);
                }
            }
        }
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.index.clear();
    }

    fn hit(&self, location: Point) -> Option<GridPoint> {
        self.cells
            .iter()
            .find(|c| c.contains(location))
            .map(|c| c.point)
    }

    fn len(&self) -> usize {
        self.cells.len()
    }
}

// ---------------------------------------------------------------------------
// GridTouchTracker
// ---------------------------------------------------------------------------

/// Stateful tracker converting pointer drags into cell entries and expiries.
///
/// Every entry point takes the current time. Expiries that have fallen due
/// are applied first and reported ahead of anything else the call produces,
/// so the returned events are always in time order. Call
/// [`tick`](GridTouchTracker::tick) when no input is arriving (e.g., on a
/// timer armed for [`next_deadline`](GridTouchTracker::next_deadline)).
pub struct GridTouchTracker<P> {
    config: GridConfig,
    port: P,
    bounds: BoundsRegistry,
    touched: DeadlineQueue<GridPoint>,
    tracking: bool,
}

impl<P> std::fmt::Debug for GridTouchTracker<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridTouchTracker")
            .field("rows", &self.config.rows)
            .field("cols", &self.config.cols)
            .field("cells", &self.bounds.len())
            .field("touched", &self.touched.len())
            .field("tracking", &self.tracking)
            .finish()
    }
}

impl<P: FeedbackPort> GridTouchTracker<P> {
    /// Create a tracker with no registered cells.
    pub fn new(config: GridConfig, port: P) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            port,
            bounds: BoundsRegistry::default(),
            touched: DeadlineQueue::new(),
            tracking: false,
        })
    }

    /// Merge cell bounds reported by layout.
    ///
    /// Cells report independently; the registry keeps the latest rectangle
    /// per grid point. An empty report is valid (nothing laid out yet).
    pub fn register_cell_bounds(&mut self, bounds: impl IntoIterator<Item = CellBounds>) {
        self.bounds.merge(bounds);
    }

    /// Replace the whole registry (resize, orientation change).
    pub fn replace_cell_bounds(&mut self, bounds: impl IntoIterator<Item = CellBounds>) {
        self.bounds.clear();
        self.bounds.merge(bounds);
    }

    /// Fit the configured grid into `view` and register the resulting cells.
    ///
    /// Returns the layout so the caller can draw the dots where the tracker
    /// expects them.
    pub fn layout(&mut self, view: Size) -> GridLayout {
        let layout = GridLayout::fit(view, &self.config);
        self.replace_cell_bounds(layout.cell_bounds());
        layout
    }

    /// Swap in a new configuration.
    ///
    /// The bounds registry is cleared because cell geometry no longer
    /// matches; touched cells keep their pending expiries.
    pub fn reconfigure(&mut self, config: GridConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.bounds.clear();
        Ok(())
    }

    /// Handle one pointer sample.
    ///
    /// Returns due expiries followed by a [`GridEvent::CellEntered`] if the
    /// sample landed on a cell that is not currently touched.
    pub fn on_pointer_moved(&mut self, location: Point, now: Instant) -> Vec<GridEvent> {
        let mut out = Vec::with_capacity(1);
        self.expire(now, &mut out);

        if !self.tracking {
            self.tracking = true;
            #[cfg(feature = "tracing")]
            tracing::trace!(x = location.x, y = location.y, "grid gesture started");
        }

        let Some(point) = self.bounds.hit(location) else {
            return out;
        };

        // Lingering over a still-touched cell: no pulse, no timer reset.
        if self
            .touched
            .schedule(point, now + self.config.color_animation_duration)
        {
            self.port.emit(self.config.feedback);
            out.push(GridEvent::CellEntered(point));
        }
        out
    }

    /// End the current gesture. Touched cells keep expiring on schedule.
    pub fn on_pointer_up(&mut self) {
        if self.tracking {
            self.tracking = false;
            #[cfg(feature = "tracing")]
            tracing::trace!(touched = self.touched.len(), "grid gesture ended");
        }
    }

    /// Abandon the current gesture (same effect as lifting the pointer).
    pub fn on_pointer_cancel(&mut self) {
        self.on_pointer_up();
    }

    /// Apply every expiry due at `now`.
    pub fn tick(&mut self, now: Instant) -> Vec<GridEvent> {
        let mut out = Vec::new();
        self.expire(now, &mut out);
        out
    }

    /// When the next touched cell expires, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.touched.next_deadline()
    }

    /// Cell under `location`, if any.
    #[must_use]
    pub fn cell_at(&self, location: Point) -> Option<GridPoint> {
        self.bounds.hit(location)
    }

    /// Whether `point` is currently highlighted.
    #[inline]
    #[must_use]
    pub fn is_touched(&self, point: GridPoint) -> bool {
        self.touched.contains(&point)
    }

    /// Currently highlighted cells, sorted by column then row.
    #[must_use]
    pub fn touched_points(&self) -> Vec<GridPoint> {
        let mut points: Vec<_> = self.touched.keys().copied().collect();
        points.sort_unstable();
        points
    }

    #[inline]
    #[must_use]
    pub fn touched_len(&self) -> usize {
        self.touched.len()
    }

    /// Number of registered cells.
    #[inline]
    #[must_use]
    pub fn bounds_len(&self) -> usize {
        self.bounds.len()
    }

    /// Whether a gesture is in progress.
    #[inline]
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// How long a touched cell stays highlighted.
    #[inline]
    #[must_use]
    pub fn highlight_duration(&self) -> Duration {
        self.config.color_animation_duration
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Borrow the feedback port.
    #[inline]
    #[must_use]
    pub fn port(&self) -> &P {
        &self.port
    }

    fn expire(&mut self, now: Instant, out: &mut Vec<GridEvent>) {
        while let Some(point) = self.touched.pop_expired(now) {
            out.push(GridEvent::CellExpired(point));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
