#![forbid(unsafe_code)]

//! Validated configuration for the grid tracker and the slide control.
//!
//! Configuration is plain data checked once, when a tracker or controller is
//! built. Nothing in the gesture path re-validates; a bad value is a
//! [`ConfigError`] at setup time or never.
//!
//! [`GridSettings`] is the user-facing preference record (what a settings
//! screen edits). Out-of-range preferences are clamped, not rejected, and
//! then converted into a [`GridConfig`].

use std::time::Duration;

use crate::feedback::{FeedbackPulse, unit};
use crate::rubber_band::DEFAULT_COEFFICIENT;

/// Smallest number of rows or columns a user may pick.
pub const MIN_GRID_SIZE: u16 = 5;
/// Largest number of rows or columns a user may pick.
pub const MAX_GRID_SIZE: u16 = 20;
/// Rows and columns for a fresh install.
pub const DEFAULT_GRID_SIZE: u16 = 16;
/// Smallest dot diameter a user may pick.
pub const MIN_DOT_SIZE: f64 = 10.0;
/// Largest dot diameter a user may pick.
pub const MAX_DOT_SIZE: f64 = 50.0;
/// Dot diameter for a fresh install.
pub const DEFAULT_DOT_SIZE: f64 = 10.0;

/// How long a touched dot stays highlighted.
pub const DEFAULT_COLOR_ANIMATION: Duration = Duration::from_millis(500);
/// Delay between reset steps of the slide control.
pub const DEFAULT_RESET_STEP: Duration = Duration::from_millis(9);
/// Upper bound for every configured delay. Deadlines are `now + delay`, so
/// an unbounded delay could overflow the clock.
pub const MAX_DELAY: Duration = Duration::from_secs(60 * 60);

/// A configuration value was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column (got {rows}×{cols})")]
    EmptyGrid { rows: u16, cols: u16 },
    #[error("dot size must be a finite non-negative number (got {0})")]
    InvalidDotSize(f64),
    #[error("dot padding must be a finite non-negative number (got {0})")]
    InvalidPadding(f64),
    #[error("color animation duration must be non-zero")]
    ZeroAnimationDuration,
    #[error("color animation duration {0:?} exceeds {max:?}", max = MAX_DELAY)]
    AnimationDurationTooLong(Duration),
    #[error("slider track length must be positive")]
    EmptyTrack,
    #[error("slider width must be positive")]
    ZeroSliderWidth,
    #[error("slider width {slider_width} exceeds track length {track_length}")]
    SliderWiderThanTrack { slider_width: u16, track_length: u16 },
    #[error("rubber band coefficient must be a finite non-negative number (got {0})")]
    InvalidCoefficient(f64),
    #[error("reset step interval must be non-zero")]
    ZeroStepInterval,
    #[error("reset step interval {0:?} exceeds {max:?}", max = MAX_DELAY)]
    StepIntervalTooLong(Duration),
}

// ---------------------------------------------------------------------------
// GridConfig
// ---------------------------------------------------------------------------

/// Parameters of one haptic grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub rows: u16,
    pub cols: u16,
    /// Preferred dot diameter; layout may shrink it to fit.
    pub dot_size: f64,
    /// Padding on every side of each dot.
    pub dot_padding: f64,
    /// How long a cell stays in the touched set after entry.
    pub color_animation_duration: Duration,
    /// Pulse emitted on each new cell entry.
    pub feedback: FeedbackPulse,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            dot_size: 25.0,
            dot_padding: 0.0,
            color_animation_duration: DEFAULT_COLOR_ANIMATION,
            feedback: FeedbackPulse::FULL,
        }
    }
}

impl GridConfig {
    /// Default configuration with the given dimensions.
    #[must_use]
    pub fn with_dimensions(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !self.dot_size.is_finite() || self.dot_size < 0.0 {
            return Err(ConfigError::InvalidDotSize(self.dot_size));
        }
        if !self.dot_padding.is_finite() || self.dot_padding < 0.0 {
            return Err(ConfigError::InvalidPadding(self.dot_padding));
        }
        if self.color_animation_duration.is_zero() {
            return Err(ConfigError::ZeroAnimationDuration);
        }
        if self.color_animation_duration > MAX_DELAY {
            return Err(ConfigError::AnimationDurationTooLong(
                self.color_animation_duration,
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SlideConfig
// ---------------------------------------------------------------------------

/// Parameters of the slide-to-confirm track.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideConfig {
    /// Number of discrete columns along the track.
    pub track_length: u16,
    /// Number of columns covered by the thumb.
    pub slider_width: u16,
    pub rubber_band_coefficient: f64,
    /// Delay between successive reset steps after an incomplete release.
    pub step_interval: Duration,
    /// Sharpness of the progress pulses.
    pub sharpness: f64,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            track_length: 42,
            slider_width: 6,
            rubber_band_coefficient: DEFAULT_COEFFICIENT,
            step_interval: DEFAULT_RESET_STEP,
            sharpness: 1.0,
        }
    }
}

impl SlideConfig {
    /// Validated configuration with default coefficient and timing.
    pub fn new(track_length: u16, slider_width: u16) -> Result<Self, ConfigError> {
        let config = Self {
            track_length,
            slider_width,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Furthest offset the thumb can reach.
    #[inline]
    #[must_use]
    pub fn max_offset(&self) -> u16 {
        self.track_length.saturating_sub(self.slider_width)
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.track_length == 0 {
            return Err(ConfigError::EmptyTrack);
        }
        if self.slider_width == 0 {
            return Err(ConfigError::ZeroSliderWidth);
        }
        if self.slider_width > self.track_length {
            return Err(ConfigError::SliderWiderThanTrack {
                slider_width: self.slider_width,
                track_length: self.track_length,
            });
        }
        if !self.rubber_band_coefficient.is_finite() || self.rubber_band_coefficient < 0.0 {
            return Err(ConfigError::InvalidCoefficient(self.rubber_band_coefficient));
        }
        if self.step_interval.is_zero() {
            return Err(ConfigError::ZeroStepInterval);
        }
        if self.step_interval > MAX_DELAY {
            return Err(ConfigError::StepIntervalTooLong(self.step_interval));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GridSettings
// ---------------------------------------------------------------------------

/// User preferences for the grid, as edited on a settings screen.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridSettings {
    pub grid_rows: u16,
    pub grid_cols: u16,
    pub dot_size: f64,
    pub feedback_intensity: f64,
    pub feedback_sharpness: f64,
    pub haptics_enabled: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            grid_rows: DEFAULT_GRID_SIZE,
            grid_cols: DEFAULT_GRID_SIZE,
            dot_size: DEFAULT_DOT_SIZE,
            feedback_intensity: 1.0,
            feedback_sharpness: 1.0,
            haptics_enabled: true,
        }
    }
}

impl GridSettings {
    /// Copy with every field pulled into its allowed range.
    ///
    /// Rows and columns are clamped independently; a NaN dot size falls back
    /// to the default.
    #[must_use]
    pub fn clamped(&self) -> Self {
        let dot_size = if self.dot_size.is_nan() {
            DEFAULT_DOT_SIZE
        } else {
            self.dot_size.clamp(MIN_DOT_SIZE, MAX_DOT_SIZE)
        };
        Self {
            grid_rows: self.grid_rows.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE),
            grid_cols: self.grid_cols.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE),
            dot_size,
            feedback_intensity: unit(self.feedback_intensity),
            feedback_sharpness: unit(self.feedback_sharpness),
            haptics_enabled: self.haptics_enabled,
        }
    }

    /// Grid configuration for these (clamped) settings.
    pub fn to_grid_config(&self) -> Result<GridConfig, ConfigError> {
        let s = self.clamped();
        let config = GridConfig {
            rows: s.grid_rows,
            cols: s.grid_cols,
            dot_size: s.dot_size,
            feedback: FeedbackPulse::new(s.feedback_intensity, s.feedback_sharpness),
            ..GridConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}
