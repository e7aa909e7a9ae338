#![no_main]

use std::time::Duration;

use hgrid_core::{GridConfig, GridEvent, GridTouchTracker, Instant, Point, RecordingPort, Size};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First three bytes pick the grid (5..=20 each way) and view size.
    if data.len() < 3 {
        return;
    }
    let rows = u16::from(data[0] % 16) + 5;
    let cols = u16::from(data[1] % 16) + 5;
    let side = 50.0 + f64::from(data[2]) * 4.0;
    let payload = &data[3..];

    let port = RecordingPort::new();
    let config = GridConfig::with_dimensions(rows, cols);
    let Ok(mut tracker) = GridTouchTracker::new(config, port.clone()) else {
        return;
    };
    tracker.layout(Size::new(side, side));

    // Each 5-byte chunk: x (u16), y (u16), and a time step / opcode byte.
    let start = Instant::now();
    let mut now = start;
    let mut entered = 0usize;
    let mut expired = 0usize;
    for chunk in payload.chunks_exact(5) {
        let x = coordinate([chunk[0], chunk[1]], side);
        let y = coordinate([chunk[2], chunk[3]], side);
        now += Duration::from_millis(u64::from(chunk[4] & 0x7f) * 8);

        let events = if chunk[4] & 0x80 == 0 {
            tracker.on_pointer_moved(Point::new(x, y), now)
        } else {
            tracker.on_pointer_up();
            tracker.tick(now)
        };
        for event in events {
            match event {
                GridEvent::CellEntered(p) => {
                    assert!(p.x < cols && p.y < rows, "entered cell out of range");
                    entered += 1;
                }
                GridEvent::CellExpired(_) => expired += 1,
            }
        }

        // Post-conditions that must always hold:
        assert_eq!(port.count(), entered, "one pulse per entry");
        assert_eq!(tracker.touched_len(), entered - expired, "touched set out of sync");
        assert!(tracker.touched_len() <= usize::from(rows) * usize::from(cols));
    }

    let drained = tracker.tick(now + tracker.highlight_duration());
    assert_eq!(expired + drained.len(), entered, "highlights must all expire");
    assert_eq!(tracker.next_deadline(), None);
});

/// Map two bytes onto `[-10%, 110%]` of the view side.
fn coordinate(bytes: [u8; 2], side: f64) -> f64 {
    f64::from(u16::from_le_bytes(bytes)) / 65535.0 * side * 1.2 - side * 0.1
}
