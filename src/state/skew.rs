//! Scroll-speed to skew-angle mapping.

use crate::state::scroll::ScrollState;

/// Instantaneous scroll speed over the last frame interval, clamped to
/// `[-max_speed, max_speed]`. Touch gestures read faster than wheel spins for
/// the same travel, so touch speed is doubled before clamping.
pub fn frame_speed(scroll: &ScrollState, dt_ms: f64, max_speed: f64, touch_active: bool) -> f64 {
    let mut speed = (scroll.curr - scroll.prev) / dt_ms;
    if touch_active {
        speed *= 2.0;
    }
    speed.clamp(-max_speed, max_speed)
}

/// Target skew angle in degrees for a given speed. Opposes the scroll
/// direction, which is what makes sections trail behind the motion.
pub fn skew_target(speed: f64, skew_factor: f64) -> f64 {
    -speed * skew_factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroll(curr: f64, prev: f64) -> ScrollState {
        ScrollState {
            curr,
            prev,
            max: 10_000.0,
            ..Default::default()
        }
    }

    #[test]
    fn speed_is_travel_over_time() {
        let s = scroll(400.0, 300.0);
        assert_eq!(frame_speed(&s, 20.0, 15.0, false), 5.0);
    }

    #[test]
    fn speed_clamps_preserving_sign() {
        let up = scroll(0.0, 5000.0);
        let down = scroll(5000.0, 0.0);
        assert_eq!(frame_speed(&up, 1.0, 15.0, false), -15.0);
        assert_eq!(frame_speed(&down, 1.0, 15.0, false), 15.0);
        // clamped speed maps to the full-scale skew target, sign flipped
        assert_eq!(skew_target(frame_speed(&down, 1.0, 15.0, false), 0.2), -3.0);
        assert_eq!(skew_target(frame_speed(&up, 1.0, 15.0, false), 0.2), 3.0);
    }

    #[test]
    fn touch_speed_doubles_before_clamping() {
        let s = scroll(100.0, 0.0);
        assert_eq!(frame_speed(&s, 20.0, 15.0, false), 5.0);
        assert_eq!(frame_speed(&s, 20.0, 15.0, true), 10.0);
        // doubling cannot escape the clamp
        assert_eq!(frame_speed(&s, 10.0, 15.0, true), 15.0);
    }
}
