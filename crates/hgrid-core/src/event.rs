#![forbid(unsafe_code)]

//! Events handed to the presentation layer.
//!
//! Both interaction components report what changed as values rather than
//! callbacks. The host applies them in the order returned.

use crate::geometry::GridPoint;

/// State change produced by the grid tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridEvent {
    /// A cell joined the touched set (and one pulse was emitted for it).
    CellEntered(GridPoint),
    /// A cell's highlight ran out and it left the touched set.
    CellExpired(GridPoint),
}

impl GridEvent {
    /// The cell the event is about.
    #[must_use]
    pub const fn point(&self) -> GridPoint {
        match *self {
            Self::CellEntered(p) | Self::CellExpired(p) => p,
        }
    }
}

/// State change produced by the slide-to-confirm control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideEvent {
    /// The thumb moved to a new integer offset.
    OffsetChanged(u16),
    /// The thumb was released at the end of the track. Emitted once per
    /// gesture.
    Unlocked,
}
