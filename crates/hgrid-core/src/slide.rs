#![forbid(unsafe_code)]

//! Slide-to-confirm: a one-directional drag that must reach the end of the
//! track.
//!
//! The thumb covers `slider_width` columns of a `track_length`-column track.
//! Dragging moves it forward with rubber-banded resistance; releasing at the
//! far end unlocks, releasing anywhere else walks the thumb back to zero one
//! column per `step_interval`.
//!
//! # State Machine
//!
//! ```text
//!          drag (delta > 0)            release at max
//!   Idle ─────────────────▶ Dragging ─────────────────▶ Completed
//!    ▲                        │  ▲                         │
//!    │                        │  └── drag                  │ reset()
//!    │   last step            │ release below max          │
//!    └────────── Resetting ◀──┘                            │
//!    ▲                                                     │
//!    └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. `offset()` is always in `0..=max_offset()`.
//! 2. [`SlideEvent::Unlocked`] is produced at most once per gesture, and only
//!    when the thumb is released at `max_offset()`.
//! 3. A reset walks the offset down strictly by one per step, emits no pulses,
//!    and ends at zero in `Idle`.
//! 4. Drags in the reverse direction never move the thumb.
//!
//! # Failure Modes
//!
//! Construction rejects an invalid [`SlideConfig`]. At runtime, reverse or
//! non-finite drags and a non-positive track pixel length are ignored.

use std::ops::Range;

use web_time::Instant;

use crate::config::{ConfigError, SlideConfig};
use crate::event::SlideEvent;
use crate::feedback::{FeedbackPort, FeedbackPulse};
use crate::rubber_band::rubber_band;

/// Where the control is in its gesture lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SlidePhase {
    #[default]
    Idle,
    Dragging,
    /// Released at the end of the track. Stays here until [`reset`].
    ///
    /// [`reset`]: SlideConfirmController::reset
    Completed,
    /// Walking back to zero after an incomplete release.
    Resetting,
}

/// Drag-to-unlock controller.
pub struct SlideConfirmController<P> {
    config: SlideConfig,
    port: P,
    phase: SlidePhase,
    offset: u16,
    next_step: Option<Instant>,
}

impl<P> std::fmt::Debug for SlideConfirmController<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideConfirmController")
            .field("phase", &self.phase)
            .field("offset", &self.offset)
            .field("max_offset", &self.config.max_offset())
            .field("next_step", &self.next_step)
            .finish()
    }
}

impl<P: FeedbackPort> SlideConfirmController<P> {
    pub fn new(config: SlideConfig, port: P) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            port,
            phase: SlidePhase::Idle,
            offset: 0,
            next_step: None,
        })
    }

    /// Handle a drag sample.
    ///
    /// `delta` is the distance dragged along the track and `track_px` the
    /// on-screen length of the whole track, both in the same units. Due reset
    /// steps are applied first, so a new drag after a finished reset starts a
    /// fresh gesture.
    pub fn on_drag_update(&mut self, delta: f64, track_px: f64, now: Instant) -> Vec<SlideEvent> {
        let mut out = self.tick(now);

        if !matches!(self.phase, SlidePhase::Idle | SlidePhase::Dragging) {
            return out;
        }
        if !delta.is_finite() || delta <= 0.0 || !track_px.is_finite() || track_px <= 0.0 {
            return out;
        }

        if self.phase == SlidePhase::Idle {
            self.phase = SlidePhase::Dragging;
            #[cfg(feature = "tracing")]
            tracing::trace!(delta, track_px, "slide drag started");
        }

        let target = self.target_offset(delta, track_px);
        if target != self.offset {
            self.offset = target;
            self.port.emit(self.progress_pulse());
            out.push(SlideEvent::OffsetChanged(target));
        }
        out
    }

    /// Handle the end of a drag.
    ///
    /// Returns [`SlideEvent::Unlocked`] if the thumb was at the end of the
    /// track. Otherwise the first reset step is scheduled one
    /// `step_interval` after `now`.
    pub fn on_drag_end(&mut self, now: Instant) -> Option<SlideEvent> {
        if self.phase != SlidePhase::Dragging {
            return None;
        }

        if self.offset == self.config.max_offset() {
            self.phase = SlidePhase::Completed;
            #[cfg(feature = "tracing")]
            tracing::debug!(offset = self.offset, "slide unlocked");
            return Some(SlideEvent::Unlocked);
        }

        if self.offset == 0 {
            self.phase = SlidePhase::Idle;
        } else {
            self.phase = SlidePhase::Resetting;
            self.next_step = Some(now + self.config.step_interval);
            #[cfg(feature = "tracing")]
            tracing::debug!(from = self.offset, "slide released early, resetting");
        }
        None
    }

    /// Apply every reset step due at `now`.
    ///
    /// Steps stay on their original schedule: a late tick catches up by
    /// emitting several [`SlideEvent::OffsetChanged`] at once.
    pub fn tick(&mut self, now: Instant) -> Vec<SlideEvent> {
        let mut out = Vec::new();
        while let Some(at) = self.next_step {
            if at > now {
                break;
            }
            self.offset = self.offset.saturating_sub(1);
            out.push(SlideEvent::OffsetChanged(self.offset));
            if self.offset == 0 {
                self.phase = SlidePhase::Idle;
                self.next_step = None;
            } else {
                self.next_step = Some(at + self.config.step_interval);
            }
        }
        out
    }

    /// Abandon the gesture, snapping the thumb back without animation.
    ///
    /// An unlocked control stays unlocked; use [`reset`](Self::reset) for
    /// that.
    pub fn cancel(&mut self) -> Option<SlideEvent> {
        if self.phase == SlidePhase::Completed {
            return None;
        }
        self.snap_to_zero()
    }

    /// Return to `Idle` at offset zero from any phase, ready for reuse.
    pub fn reset(&mut self) -> Option<SlideEvent> {
        self.snap_to_zero()
    }

    /// When the next reset step is due, if one is pending.
    #[inline]
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_step
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> SlidePhase {
        self.phase
    }

    /// Current thumb position, in columns from the start of the track.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> u16 {
        self.offset
    }

    #[inline]
    #[must_use]
    pub fn max_offset(&self) -> u16 {
        self.config.max_offset()
    }

    /// Fraction of the track covered, in [0, 1].
    #[must_use]
    pub fn progress(&self) -> f64 {
        let max = self.config.max_offset();
        if max == 0 {
            return 1.0;
        }
        f64::from(self.offset) / f64::from(max)
    }

    /// Columns currently covered by the thumb.
    #[must_use]
    pub fn thumb_columns(&self) -> Range<u16> {
        self.offset..self.offset + self.config.slider_width
    }

    #[inline]
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.phase == SlidePhase::Completed
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SlideConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn port(&self) -> &P {
        &self.port
    }

    fn target_offset(&self, delta: f64, track_px: f64) -> u16 {
        let raw = delta / track_px * f64::from(self.config.track_length);
        let banded = rubber_band(raw, raw, self.config.rubber_band_coefficient);
        let max = self.config.max_offset();
        // Truncates toward zero; the clamp keeps the cast in range.
        banded.clamp(0.0, f64::from(max)) as u16
    }

    fn progress_pulse(&self) -> FeedbackPulse {
        let half = f64::from(self.config.track_length) / 2.0;
        FeedbackPulse::new(f64::from(self.offset) / half, self.config.sharpness)
    }

    fn snap_to_zero(&mut self) -> Option<SlideEvent> {
        self.phase = SlidePhase::Idle;
        self.next_step = None;
        if self.offset == 0 {
            return None;
        }
        self.offset = 0;
        Some(SlideEvent::OffsetChanged(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::RecordingPort;
    use std::time::Duration;

    const PX: f64 = 420.0;
    const MS_9: Duration = Duration::from_millis(9);

    fn controller() -> (SlideConfirmController<RecordingPort>, RecordingPort) {
        let port = RecordingPort::new();
        let c = SlideConfirmController::new(SlideConfig::default(), port.clone()).unwrap();
        (c, port)
    }

    #[test]
    fn overscroll_clamps_to_max() {
        let (mut c, port) = controller();
        let now = Instant::now();
        let events = c.on_drag_update(840.0, PX, now);
        assert_eq!(events, vec![SlideEvent::OffsetChanged(36)]);
        assert_eq!(c.offset(), 36);
        assert_eq!(port.count(), 1);
        assert_eq!(port.last().map(|p| p.intensity()), Some(1.0));
    }

    #[test]
    fn release_at_max_unlocks_once() {
        let (mut c, _port) = controller();
        let now = Instant::now();
        c.on_drag_update(840.0, PX, now);
        assert_eq!(c.on_drag_end(now), Some(SlideEvent::Unlocked));
        assert!(c.is_unlocked());
        assert_eq!(c.on_drag_end(now), None);
        assert!(c.on_drag_update(900.0, PX, now).is_empty());
        assert_eq!(c.offset(), 36);
    }

    #[test]
    fn partial_drag_is_rubber_banded() {
        let (mut c, port) = controller();
        // raw 12.3 → 12.3·4.5 / (4.5 + 1) ≈ 10.06
        let events = c.on_drag_update(123.0, PX, Instant::now());
        assert_eq!(events, vec![SlideEvent::OffsetChanged(10)]);
        let pulse = port.last().unwrap();
        assert!((pulse.intensity() - 10.0 / 21.0).abs() < 1e-12);
        assert_eq!(pulse.sharpness(), 1.0);
    }

    #[test]
    fn same_offset_emits_nothing() {
        let (mut c, port) = controller();
        let now = Instant::now();
        c.on_drag_update(123.0, PX, now);
        assert!(c.on_drag_update(123.5, PX, now).is_empty());
        assert_eq!(port.count(), 1);
    }

    #[test]
    fn reverse_drag_never_leaves_idle() {
        let (mut c, port) = controller();
        let now = Instant::now();
        assert!(c.on_drag_update(-50.0, PX, now).is_empty());
        assert!(c.on_drag_update(0.0, PX, now).is_empty());
        assert_eq!(c.phase(), SlidePhase::Idle);
        assert_eq!(c.offset(), 0);
        assert_eq!(port.count(), 0);
        assert_eq!(c.on_drag_end(now), None);
    }

    #[test]
    fn degenerate_input_is_ignored() {
        let (mut c, _port) = controller();
        let now = Instant::now();
        assert!(c.on_drag_update(f64::NAN, PX, now).is_empty());
        assert!(c.on_drag_update(f64::INFINITY, PX, now).is_empty());
        assert!(c.on_drag_update(100.0, 0.0, now).is_empty());
        assert!(c.on_drag_update(100.0, -PX, now).is_empty());
        assert_eq!(c.phase(), SlidePhase::Idle);
    }

    #[test]
    fn early_release_walks_back_one_step_at_a_time() {
        let (mut c, port) = controller();
        let now = Instant::now();
        c.on_drag_update(123.0, PX, now);
        assert_eq!(c.on_drag_end(now), None);
        assert_eq!(c.phase(), SlidePhase::Resetting);
        assert_eq!(c.next_deadline(), Some(now + MS_9));

        let mut seen = Vec::new();
        for step in 1..=10u32 {
            let events = c.tick(now + MS_9 * step);
            assert_eq!(events.len(), 1);
            seen.extend(events);
        }
        let offsets: Vec<_> = seen
            .iter()
            .map(|e| match e {
                SlideEvent::OffsetChanged(o) => *o,
                SlideEvent::Unlocked => panic!("unexpected unlock"),
            })
            .collect();
        assert_eq!(offsets, (0..10).rev().collect::<Vec<u16>>());
        assert_eq!(c.phase(), SlidePhase::Idle);
        assert_eq!(c.next_deadline(), None);
        assert_eq!(port.count(), 1);
    }

    #[test]
    fn late_tick_catches_up() {
        let (mut c, _port) = controller();
        let now = Instant::now();
        c.on_drag_update(123.0, PX, now);
        c.on_drag_end(now);
        assert!(c.tick(now + Duration::from_millis(8)).is_empty());
        assert_eq!(c.tick(now + MS_9 * 4).len(), 4);
        assert_eq!(c.offset(), 6);
        assert_eq!(c.tick(now + Duration::from_secs(1)).len(), 6);
        assert_eq!(c.offset(), 0);
    }

    #[test]
    fn drags_during_reset_are_ignored() {
        let (mut c, port) = controller();
        let now = Instant::now();
        c.on_drag_update(123.0, PX, now);
        c.on_drag_end(now);
        assert!(c.on_drag_update(300.0, PX, now).is_empty());
        assert_eq!(c.offset(), 10);
        assert_eq!(port.count(), 1);
    }

    #[test]
    fn new_drag_after_reset_finishes() {
        let (mut c, _port) = controller();
        let now = Instant::now();
        c.on_drag_update(123.0, PX, now);
        c.on_drag_end(now);
        let later = now + Duration::from_secs(1);
        let events = c.on_drag_update(123.0, PX, later);
        assert_eq!(events.len(), 11);
        assert_eq!(events.last(), Some(&SlideEvent::OffsetChanged(10)));
        assert_eq!(c.phase(), SlidePhase::Dragging);
    }

    #[test]
    fn release_at_zero_returns_to_idle() {
        let (mut c, _port) = controller();
        let now = Instant::now();
        // raw 0.05 → banded < 1 → offset stays 0
        assert!(c.on_drag_update(0.5, PX, now).is_empty());
        assert_eq!(c.phase(), SlidePhase::Dragging);
        assert_eq!(c.on_drag_end(now), None);
        assert_eq!(c.phase(), SlidePhase::Idle);
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn cancel_snaps_back_but_keeps_unlock() {
        let (mut c, _port) = controller();
        let now = Instant::now();
        c.on_drag_update(123.0, PX, now);
        assert_eq!(c.cancel(), Some(SlideEvent::OffsetChanged(0)));
        assert_eq!(c.phase(), SlidePhase::Idle);
        assert_eq!(c.cancel(), None);

        c.on_drag_update(840.0, PX, now);
        c.on_drag_end(now);
        assert_eq!(c.cancel(), None);
        assert!(c.is_unlocked());
        assert_eq!(c.reset(), Some(SlideEvent::OffsetChanged(0)));
        assert_eq!(c.phase(), SlidePhase::Idle);
    }

    #[test]
    fn thumb_and_progress() {
        let (mut c, _port) = controller();
        assert_eq!(c.thumb_columns(), 0..6);
        assert_eq!(c.progress(), 0.0);
        c.on_drag_update(840.0, PX, Instant::now());
        assert_eq!(c.thumb_columns(), 36..42);
        assert_eq!(c.progress(), 1.0);
    }

    #[test]
    fn full_width_thumb_unlocks_on_any_release() {
        let port = RecordingPort::new();
        let config = SlideConfig::new(4, 4).unwrap();
        let mut c = SlideConfirmController::new(config, port).unwrap();
        let now = Instant::now();
        assert!(c.on_drag_update(10.0, 100.0, now).is_empty());
        assert_eq!(c.progress(), 1.0);
        assert_eq!(c.on_drag_end(now), Some(SlideEvent::Unlocked));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = SlideConfig {
            slider_width: 50,
            ..SlideConfig::default()
        };
        assert_eq!(
            SlideConfirmController::new(config, RecordingPort::new()).unwrap_err(),
            ConfigError::SliderWiderThanTrack {
                slider_width: 50,
                track_length: 42
            }
        );
    }

    #[test]
    fn unbounded_step_interval_rejected_before_any_drag() {
        let config = SlideConfig {
            step_interval: Duration::MAX,
            ..SlideConfig::default()
        };
        assert_eq!(
            SlideConfirmController::new(config, RecordingPort::new()).unwrap_err(),
            ConfigError::StepIntervalTooLong(Duration::MAX)
        );
    }

    #[test]
    fn longest_allowed_step_interval_resets() {
        let config = SlideConfig {
            step_interval: crate::config::MAX_DELAY,
            ..SlideConfig::default()
        };
        let mut c = SlideConfirmController::new(config, RecordingPort::new()).unwrap();
        let now = Instant::now();
        c.on_drag_update(123.0, 420.0, now);
        assert_eq!(c.offset(), 10);
        assert_eq!(c.on_drag_end(now), None);
        assert_eq!(c.phase(), SlidePhase::Resetting);
        assert_eq!(c.next_deadline(), Some(now + crate::config::MAX_DELAY));
        assert_eq!(
            c.tick(now + crate::config::MAX_DELAY),
            vec![SlideEvent::OffsetChanged(9)]
        );
    }
}
