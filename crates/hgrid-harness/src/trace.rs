//! JSON-lines interaction traces.
//!
//! One record per line, tagged by `kind`. Timestamps are milliseconds from
//! the start of the trace and must never decrease. Blank lines and lines
//! starting with `#` are skipped so fixtures can carry notes.
//!
//! ```text
//! {"kind":"down","t_ms":0,"x":15.0,"y":25.0}
//! {"kind":"move","t_ms":16,"x":16.0,"y":26.0}
//! {"kind":"up","t_ms":32}
//! {"kind":"drag","t_ms":0,"delta":123.0,"track_px":420.0}
//! {"kind":"drag_end","t_ms":40}
//! ```

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};

/// One input sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceRecord {
    Down {
        t_ms: u64,
        x: f64,
        y: f64,
    },
    Move {
        t_ms: u64,
        x: f64,
        y: f64,
    },
    Up {
        t_ms: u64,
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    Cancel {
        t_ms: u64,
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    /// Advance the clock without input.
    Tick { t_ms: u64 },
    Drag {
        t_ms: u64,
        delta: f64,
        track_px: f64,
    },
    DragEnd { t_ms: u64 },
}

impl TraceRecord {
    #[must_use]
    pub fn t_ms(&self) -> u64 {
        match *self {
            Self::Down { t_ms, .. }
            | Self::Move { t_ms, .. }
            | Self::Up { t_ms, .. }
            | Self::Cancel { t_ms, .. }
            | Self::Tick { t_ms }
            | Self::Drag { t_ms, .. }
            | Self::DragEnd { t_ms } => t_ms,
        }
    }

    /// The `kind` tag as it appears on the wire.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Down { .. } => "down",
            Self::Move { .. } => "move",
            Self::Up { .. } => "up",
            Self::Cancel { .. } => "cancel",
            Self::Tick { .. } => "tick",
            Self::Drag { .. } => "drag",
            Self::DragEnd { .. } => "drag_end",
        }
    }
}

/// Parse a trace from its text form.
pub fn parse_trace(text: &str) -> Result<Vec<TraceRecord>> {
    let mut records = Vec::new();
    let mut last_t = 0u64;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let number = index + 1;
        let record: TraceRecord = serde_json::from_str(line)
            .map_err(|error| HarnessError::trace(number, error.to_string()))?;
        if record.t_ms() < last_t {
            return Err(HarnessError::trace(
                number,
                format!("t_ms {} is earlier than {last_t}", record.t_ms()),
            ));
        }
        last_t = record.t_ms();
        records.push(record);
    }

    Ok(records)
}

/// Read and parse a trace file.
pub fn read_trace(path: &Path) -> Result<Vec<TraceRecord>> {
    if !path.exists() {
        return Err(HarnessError::MissingPath {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path)?;
    parse_trace(&text)
}

/// Write records as JSON lines.
pub fn write_trace(path: &Path, records: &[TraceRecord]) -> Result<()> {
    let mut file = fs::File::create(path)?;
    for record in records {
        serde_json::to_writer(&mut file, record)?;
        file.write_all(b"\n")?;
    }
    Ok(())
}
