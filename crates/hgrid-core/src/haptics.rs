#![forbid(unsafe_code)]

//! Haptic patterns and a self-restarting engine port.
//!
//! [`EnginePort`] adapts a platform [`HapticBackend`] to the fire-and-forget
//! [`FeedbackPort`] contract. One engine is shared app-wide; the port owns it
//! and hides its lifecycle from the interaction core:
//!
//! - The backend is started lazily on the first pulse.
//! - If the system stops the engine (audio session interruption, app
//!   backgrounded), the next pulse restarts it before playing.
//! - Hardware without haptics turns every pulse into a no-op.
//! - Start and play failures are logged and dropped, never returned.

use std::cell::RefCell;
use std::time::Duration;

use crate::feedback::{FeedbackPort, FeedbackPulse};

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// One transient tap inside a pattern, at `offset` from the pattern start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternEvent {
    pub offset: Duration,
    pub pulse: FeedbackPulse,
}

/// An ordered sequence of transient taps.
///
/// Events are kept sorted by offset; equal offsets keep insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HapticPattern {
    events: Vec<PatternEvent>,
}

impl HapticPattern {
    /// Create an empty pattern.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A pattern holding a single tap at offset zero.
    #[must_use]
    pub fn transient(pulse: FeedbackPulse) -> Self {
        Self::new().then(Duration::ZERO, pulse)
    }

    /// Add a tap at `offset` (builder pattern).
    #[must_use]
    pub fn then(mut self, offset: Duration, pulse: FeedbackPulse) -> Self {
        let idx = self.events.partition_point(|e| e.offset <= offset);
        self.events.insert(idx, PatternEvent { offset, pulse });
        self
    }

    /// Confirmation tap played while a swipe makes progress.
    #[must_use]
    pub fn swipe_success() -> Self {
        Self::transient(FeedbackPulse::FULL)
    }

    /// Double tap acknowledging a completed long press.
    ///
    /// The second tap asks for more than full strength; the pulse clamps it.
    #[must_use]
    pub fn long_press_success() -> Self {
        Self::transient(FeedbackPulse::FULL)
            .then(Duration::from_millis(100), FeedbackPulse::new(2.0, 5.0))
    }

    #[must_use]
    pub fn events(&self) -> &[PatternEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Offset of the last tap (zero for an empty pattern).
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.events.last().map_or(Duration::ZERO, |e| e.offset)
    }
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Failure reported by a platform haptic backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HapticError {
    #[error("haptic engine failed to start: {0}")]
    Start(String),
    #[error("haptic pattern rejected: {0}")]
    Pattern(String),
    #[error("haptic playback failed: {0}")]
    Playback(String),
}

/// Platform haptic engine driven by [`EnginePort`].
pub trait HapticBackend {
    /// Whether the device can produce haptics at all.
    fn supports_haptics(&self) -> bool;

    /// Create and start the engine. Called again after the system stops it.
    fn start(&mut self) -> Result<(), HapticError>;

    /// Whether the system has stopped a previously started engine.
    fn is_stopped(&self) -> bool;

    /// Play a pattern on a started engine.
    fn play(&mut self, pattern: &HapticPattern) -> Result<(), HapticError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    NotStarted,
    Running,
}

/// [`FeedbackPort`] over a [`HapticBackend`] with lazy start and restart.
pub struct EnginePort<B> {
    backend: RefCell<B>,
    state: RefCell<EngineState>,
}

impl<B> std::fmt::Debug for EnginePort<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnginePort")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl<B: HapticBackend> EnginePort<B> {
    /// Wrap a backend. Nothing is started until the first pulse.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend: RefCell::new(backend),
            state: RefCell::new(EngineState::NotStarted),
        }
    }

    /// Whether the engine has been started and not observed stopped since.
    #[must_use]
    pub fn is_running(&self) -> bool {
        *self.state.borrow() == EngineState::Running && !self.backend.borrow().is_stopped()
    }

    /// Play a whole pattern, starting or restarting the engine if needed.
    pub fn play_pattern(&self, pattern: &HapticPattern) {
        if pattern.is_empty() {
            return;
        }
        let Ok(mut backend) = self.backend.try_borrow_mut() else {
            // Re-entrant call from inside the backend; drop the pulse.
            return;
        };
        if !backend.supports_haptics() {
            return;
        }

        let mut state = self.state.borrow_mut();
        if *state == EngineState::NotStarted || backend.is_stopped() {
            #[cfg(feature = "tracing")]
            tracing::debug!(restart = (*state == EngineState::Running), "starting haptic engine");
            *state = EngineState::NotStarted;
            if let Err(_err) = backend.start() {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_err, "haptic engine start failed");
                return;
            }
            *state = EngineState::Running;
        }

        if let Err(_err) = backend.play(pattern) {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, events = pattern.len(), "haptic playback failed");
        }
    }

    /// Borrow the backend (for inspection in tests and diagnostics).
    pub fn with_backend<R>(&self, f: impl FnOnce(&B) -> R) -> R {
        f(&self.backend.borrow())
    }

    /// Consume the port and return the backend.
    pub fn into_backend(self) -> B {
        self.backend.into_inner()
    }
}

impl<B: HapticBackend> FeedbackPort for EnginePort<B> {
    fn emit(&self, pulse: FeedbackPulse) {
        self.play_pattern(&HapticPattern::transient(pulse));
    }
}
