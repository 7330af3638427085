//! Wheel-delta normalization.
//!
//! Browsers disagree on wheel units: pixels, lines or whole pages depending
//! on OS and device. This flattens a `WheelEvent` into approximate pixels
//! plus a unit spin (sign of the gesture), which is what the scroll state
//! consumes. Thin glue only; the interesting work is one `match`.

use web_sys::WheelEvent;

const PIXEL_STEP: f64 = 10.0;
const LINE_HEIGHT: f64 = 40.0;
const PAGE_HEIGHT: f64 = 800.0;

/// Device-independent vertical wheel delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Sign-correct spin units; one notch forward is +1.
    pub spin_y: f64,
    /// Approximate pixel travel.
    pub pixel_y: f64,
}

/// Normalize a raw delta given its DOM delta mode.
pub fn normalize_delta(delta_y: f64, delta_mode: u32) -> WheelDelta {
    let pixel_y = match delta_mode {
        WheelEvent::DOM_DELTA_LINE => delta_y * LINE_HEIGHT,
        WheelEvent::DOM_DELTA_PAGE => delta_y * PAGE_HEIGHT,
        _ => delta_y,
    };
    let spin_y = if pixel_y == 0.0 {
        0.0
    } else if pixel_y.abs() < PIXEL_STEP {
        pixel_y / PIXEL_STEP
    } else {
        pixel_y.signum()
    };
    WheelDelta { spin_y, pixel_y }
}

/// Normalize a live wheel event.
pub fn normalize(event: &WheelEvent) -> WheelDelta {
    normalize_delta(event.delta_y(), event.delta_mode())
}
