#![forbid(unsafe_code)]

//! Fire-and-forget feedback output.
//!
//! The interaction components never talk to haptic hardware directly. They
//! hold a [`FeedbackPort`] and call [`emit`](FeedbackPort::emit) with a
//! [`FeedbackPulse`]; whatever happens after that (hardware missing, engine
//! stopped, user preference off) is the port's business.
//!
//! # Invariants
//!
//! 1. `emit` never reports failure and never blocks on the caller's behalf.
//! 2. Pulse scalars are always within `[0.0, 1.0]` (clamped on construction).
//! 3. A port observes pulses in exactly the order the core emitted them.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

/// A single transient haptic request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackPulse {
    intensity: f64,
    sharpness: f64,
}

impl FeedbackPulse {
    /// Full-strength, fully sharp tap.
    pub const FULL: Self = Self {
        intensity: 1.0,
        sharpness: 1.0,
    };

    /// Create a pulse, clamping both scalars into `[0.0, 1.0]`.
    ///
    /// NaN maps to `0.0`.
    #[must_use]
    pub fn new(intensity: f64, sharpness: f64) -> Self {
        Self {
            intensity: unit(intensity),
            sharpness: unit(sharpness),
        }
    }

    /// Strength of the tap in `[0.0, 1.0]`.
    #[inline]
    #[must_use]
    pub const fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Crispness of the tap in `[0.0, 1.0]`.
    #[inline]
    #[must_use]
    pub const fn sharpness(&self) -> f64 {
        self.sharpness
    }

    /// Same sharpness, different intensity.
    #[must_use]
    pub fn with_intensity(self, intensity: f64) -> Self {
        Self::new(intensity, self.sharpness)
    }
}

impl Default for FeedbackPulse {
    fn default() -> Self {
        Self::FULL
    }
}

/// Clamp into the unit interval, sending NaN to zero.
pub(crate) fn unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Sink for haptic pulses.
///
/// Implementations must swallow their own failures. The interaction core is
/// single-threaded and calls `emit` from its event loop, so ports that keep
/// state use interior mutability rather than `&mut self`.
pub trait FeedbackPort {
    /// Request one transient pulse.
    fn emit(&self, pulse: FeedbackPulse);
}

impl<P: FeedbackPort + ?Sized> FeedbackPort for &P {
    fn emit(&self, pulse: FeedbackPulse) {
        (**self).emit(pulse);
    }
}

impl<P: FeedbackPort + ?Sized> FeedbackPort for Rc<P> {
    fn emit(&self, pulse: FeedbackPulse) {
        (**self).emit(pulse);
    }
}

impl<P: FeedbackPort + ?Sized> FeedbackPort for Arc<P> {
    fn emit(&self, pulse: FeedbackPulse) {
        (**self).emit(pulse);
    }
}

impl<P: FeedbackPort + ?Sized> FeedbackPort for Box<P> {
    fn emit(&self, pulse: FeedbackPulse) {
        (**self).emit(pulse);
    }
}

// ---------------------------------------------------------------------------
// NullPort
// ---------------------------------------------------------------------------

/// Port for devices without haptics: every pulse is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPort;

impl FeedbackPort for NullPort {
    fn emit(&self, _pulse: FeedbackPulse) {}
}

// ---------------------------------------------------------------------------
// RecordingPort
// ---------------------------------------------------------------------------

/// Records every pulse in order.
///
/// Clones share the same log, so a test can hand one clone to a tracker and
/// inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingPort {
    pulses: Rc<RefCell<Vec<FeedbackPulse>>>,
}

impl RecordingPort {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pulses recorded so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.pulses.borrow().len()
    }

    /// Copy of the recorded pulses, oldest first.
    #[must_use]
    pub fn pulses(&self) -> Vec<FeedbackPulse> {
        self.pulses.borrow().clone()
    }

    /// Most recent pulse, if any.
    #[must_use]
    pub fn last(&self) -> Option<FeedbackPulse> {
        self.pulses.borrow().last().copied()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<FeedbackPulse> {
        std::mem::take(&mut *self.pulses.borrow_mut())
    }
}

impl FeedbackPort for RecordingPort {
    fn emit(&self, pulse: FeedbackPulse) {
        self.pulses.borrow_mut().push(pulse);
    }
}

// ---------------------------------------------------------------------------
// GatedPort
// ---------------------------------------------------------------------------

/// Forwards pulses only while enabled (the "haptics enabled" preference).
#[derive(Debug)]
pub struct GatedPort<P> {
    inner: P,
    enabled: Cell<bool>,
}

impl<P: FeedbackPort> GatedPort<P> {
    /// Wrap `inner`, starting in the given state.
    #[must_use]
    pub fn new(inner: P, enabled: bool) -> Self {
        Self {
            inner,
            enabled: Cell::new(enabled),
        }
    }

    /// Turn forwarding on or off.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Borrow the wrapped port.
    #[must_use]
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: FeedbackPort> FeedbackPort for GatedPort<P> {
    fn emit(&self, pulse: FeedbackPulse) {
        if self.enabled.get() {
            self.inner.emit(pulse);
        }
    }
}
