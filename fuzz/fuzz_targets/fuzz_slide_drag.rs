#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use hgrid_core::{
    Instant, RecordingPort, SlideConfig, SlideConfirmController, SlideEvent, SlidePhase,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Drag { delta: f64, track_px: f64, dt_ms: u8 },
    End { dt_ms: u8 },
    Tick { dt_ms: u16 },
    Cancel,
    Reset,
}

#[derive(Debug, Arbitrary)]
struct Input {
    track_length: u16,
    slider_width: u16,
    coefficient: f64,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let config = SlideConfig {
        track_length: input.track_length,
        slider_width: input.slider_width,
        rubber_band_coefficient: input.coefficient,
        ..SlideConfig::default()
    };
    let Ok(mut slider) = SlideConfirmController::new(config, RecordingPort::new()) else {
        return;
    };
    let max = slider.max_offset();
    let mut now = Instant::now();
    let mut unlocks = 0usize;

    for op in input.ops {
        let events = match op {
            Op::Drag { delta, track_px, dt_ms } => {
                now += Duration::from_millis(u64::from(dt_ms));
                slider.on_drag_update(delta, track_px, now)
            }
            Op::End { dt_ms } => {
                now += Duration::from_millis(u64::from(dt_ms));
                let mut events = slider.tick(now);
                events.extend(slider.on_drag_end(now));
                events
            }
            Op::Tick { dt_ms } => {
                now += Duration::from_millis(u64::from(dt_ms));
                slider.tick(now)
            }
            Op::Cancel => slider.cancel().into_iter().collect(),
            Op::Reset => {
                unlocks = 0;
                slider.reset().into_iter().collect()
            }
        };
        for event in events {
            match event {
                SlideEvent::OffsetChanged(offset) => assert!(offset <= max),
                SlideEvent::Unlocked => unlocks += 1,
            }
        }

        // Post-conditions that must always hold:
        assert!(slider.offset() <= max, "offset escaped the track");
        assert!(unlocks <= 1, "unlocked twice in one gesture");
        assert_eq!(slider.is_unlocked(), slider.phase() == SlidePhase::Completed);
        if slider.phase() == SlidePhase::Idle {
            assert_eq!(slider.next_deadline(), None);
        }
    }
});
