//! Drive the interaction core from a recorded trace.
//!
//! The trace clock maps onto a fixed base [`Instant`]: record `t_ms` becomes
//! `base + t_ms`. After the last record the clock keeps advancing to each
//! pending deadline, so every expiry and reset step shows up in the output.

use std::time::Duration;

use hgrid_core::{
    FeedbackPulse, GatedPort, GridConfig, GridEvent, GridTouchTracker, Instant, Point,
    RecordingPort, SlideConfig, SlideConfirmController, SlideEvent, Size,
};
use serde::Serialize;

use crate::error::{HarnessError, Result};
use crate::trace::TraceRecord;

// ---------------------------------------------------------------------------
// Output records
// ---------------------------------------------------------------------------

/// One observable outcome, stamped with trace time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplayEvent {
    CellEntered { t_ms: u64, x: u16, y: u16 },
    CellExpired { t_ms: u64, x: u16, y: u16 },
    OffsetChanged { t_ms: u64, offset: u16 },
    Unlocked { t_ms: u64 },
    Pulse { t_ms: u64, intensity: f64, sharpness: f64 },
}

impl ReplayEvent {
    fn grid(t_ms: u64, event: GridEvent) -> Self {
        match event {
            GridEvent::CellEntered(p) => Self::CellEntered {
                t_ms,
                x: p.x,
                y: p.y,
            },
            GridEvent::CellExpired(p) => Self::CellExpired {
                t_ms,
                x: p.x,
                y: p.y,
            },
        }
    }

    fn slide(t_ms: u64, event: SlideEvent) -> Self {
        match event {
            SlideEvent::OffsetChanged(offset) => Self::OffsetChanged { t_ms, offset },
            SlideEvent::Unlocked => Self::Unlocked { t_ms },
        }
    }

    fn pulse(t_ms: u64, pulse: FeedbackPulse) -> Self {
        Self::Pulse {
            t_ms,
            intensity: pulse.intensity(),
            sharpness: pulse.sharpness(),
        }
    }

    #[must_use]
    pub fn t_ms(&self) -> u64 {
        match *self {
            Self::CellEntered { t_ms, .. }
            | Self::CellExpired { t_ms, .. }
            | Self::OffsetChanged { t_ms, .. }
            | Self::Unlocked { t_ms }
            | Self::Pulse { t_ms, .. } => t_ms,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GridSummary {
    pub entered: usize,
    pub expired: usize,
    pub pulses: usize,
    /// Largest touched set seen after any record.
    pub peak_touched: usize,
    pub end_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlideSummary {
    pub unlocked: bool,
    pub final_offset: u16,
    pub peak_offset: u16,
    pub reset_steps: usize,
    pub pulses: usize,
    pub end_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridReplay {
    pub events: Vec<ReplayEvent>,
    pub summary: GridSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideReplay {
    pub events: Vec<ReplayEvent>,
    pub summary: SlideSummary,
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct TraceClock {
    base: Instant,
}

impl TraceClock {
    fn new() -> Self {
        Self {
            base: Instant::now(),
        }
    }

    fn at(&self, t_ms: u64) -> Instant {
        self.base + Duration::from_millis(t_ms)
    }

    fn ms(&self, at: Instant) -> u64 {
        u64::try_from(at.saturating_duration_since(self.base).as_millis()).unwrap_or(u64::MAX)
    }
}

fn unsupported(index: usize, record: &TraceRecord, mode: &str) -> HarnessError {
    HarnessError::invalid(format!(
        "record {} has kind `{}`, which a {mode} replay does not accept",
        index + 1,
        record.kind()
    ))
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Replay pointer records through a tracker laid out in `view`.
pub fn replay_grid(config: &GridConfig, view: Size, records: &[TraceRecord]) -> Result<GridReplay> {
    replay_grid_with(config, view, records, true)
}

/// Like [`replay_grid`], with haptics switched on or off.
///
/// With haptics off, cells are still tracked but no pulses are recorded.
pub fn replay_grid_with(
    config: &GridConfig,
    view: Size,
    records: &[TraceRecord],
    haptics_enabled: bool,
) -> Result<GridReplay> {
    let sink = RecordingPort::new();
    let port = GatedPort::new(sink.clone(), haptics_enabled);
    let mut tracker = GridTouchTracker::new(config.clone(), &port)?;
    tracker.layout(view);

    let clock = TraceClock::new();
    let mut events = Vec::new();
    let mut summary = GridSummary::default();

    for (index, record) in records.iter().enumerate() {
        let t_ms = record.t_ms();
        let now = clock.at(t_ms);
        let produced = match *record {
            TraceRecord::Down { x, y, .. } | TraceRecord::Move { x, y, .. } => {
                tracker.on_pointer_moved(Point::new(x, y), now)
            }
            TraceRecord::Up { .. } => {
                let due = tracker.tick(now);
                tracker.on_pointer_up();
                due
            }
            TraceRecord::Cancel { .. } => {
                let due = tracker.tick(now);
                tracker.on_pointer_cancel();
                due
            }
            TraceRecord::Tick { .. } => tracker.tick(now),
            TraceRecord::Drag { .. } | TraceRecord::DragEnd { .. } => {
                return Err(unsupported(index, record, "grid"));
            }
        };
        push_grid(&mut events, &mut summary, t_ms, produced, &sink);
        summary.peak_touched = summary.peak_touched.max(tracker.touched_len());
        summary.end_ms = t_ms;
    }

    while let Some(deadline) = tracker.next_deadline() {
        let t_ms = clock.ms(deadline);
        let produced = tracker.tick(deadline);
        push_grid(&mut events, &mut summary, t_ms, produced, &sink);
        summary.end_ms = t_ms;
    }

    Ok(GridReplay { events, summary })
}

fn push_grid(
    events: &mut Vec<ReplayEvent>,
    summary: &mut GridSummary,
    t_ms: u64,
    produced: Vec<GridEvent>,
    sink: &RecordingPort,
) {
    // Expiries come first in `produced`; the pulse belongs to the entry that
    // follows them.
    let mut pulses = sink.take().into_iter();
    for event in produced {
        match event {
            GridEvent::CellEntered(_) => summary.entered += 1,
            GridEvent::CellExpired(_) => summary.expired += 1,
        }
        events.push(ReplayEvent::grid(t_ms, event));
        if matches!(event, GridEvent::CellEntered(_))
            && let Some(pulse) = pulses.next()
        {
            summary.pulses += 1;
            events.push(ReplayEvent::pulse(t_ms, pulse));
        }
    }
}

// ---------------------------------------------------------------------------
// Slide
// ---------------------------------------------------------------------------

/// Replay drag records through a slide controller.
///
/// `track_px` overrides the pixel length carried by each drag record.
pub fn replay_slide(
    config: &SlideConfig,
    records: &[TraceRecord],
    track_px: Option<f64>,
) -> Result<SlideReplay> {
    let sink = RecordingPort::new();
    let mut slider = SlideConfirmController::new(config.clone(), sink.clone())?;

    let clock = TraceClock::new();
    let mut events = Vec::new();
    let mut summary = SlideSummary::default();

    for (index, record) in records.iter().enumerate() {
        let t_ms = record.t_ms();
        let now = clock.at(t_ms);
        // Due reset steps first, so drag and release outcomes are separable.
        let mut produced = slider.tick(now);
        summary.reset_steps += produced.len();
        match *record {
            TraceRecord::Drag {
                delta,
                track_px: recorded,
                ..
            } => produced.extend(slider.on_drag_update(delta, track_px.unwrap_or(recorded), now)),
            TraceRecord::DragEnd { .. } => produced.extend(slider.on_drag_end(now)),
            TraceRecord::Tick { .. } => {}
            TraceRecord::Cancel { .. } => produced.extend(slider.cancel()),
            TraceRecord::Down { .. } | TraceRecord::Move { .. } | TraceRecord::Up { .. } => {
                return Err(unsupported(index, record, "slide"));
            }
        }
        push_slide(&mut events, &mut summary, t_ms, produced, &sink);
        summary.end_ms = t_ms;
    }

    while let Some(deadline) = slider.next_deadline() {
        let t_ms = clock.ms(deadline);
        let produced = slider.tick(deadline);
        summary.reset_steps += produced.len();
        push_slide(&mut events, &mut summary, t_ms, produced, &sink);
        summary.end_ms = t_ms;
    }

    summary.unlocked = slider.is_unlocked();
    summary.final_offset = slider.offset();
    Ok(SlideReplay { events, summary })
}

fn push_slide(
    events: &mut Vec<ReplayEvent>,
    summary: &mut SlideSummary,
    t_ms: u64,
    produced: Vec<SlideEvent>,
    sink: &RecordingPort,
) {
    for event in produced {
        if let SlideEvent::OffsetChanged(offset) = event {
            summary.peak_offset = summary.peak_offset.max(offset);
        }
        events.push(ReplayEvent::slide(t_ms, event));
    }
    for pulse in sink.take() {
        summary.pulses += 1;
        events.push(ReplayEvent::pulse(t_ms, pulse));
    }
}
