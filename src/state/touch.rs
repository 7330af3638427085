//! Touch gesture state and post-release inertia decay.

/// Inertia stops once the decaying step drops below this magnitude.
const STOP_THRESHOLD: f64 = 10.0;

/// Live touch session. Reset on every touch-start; the start sample decides
/// whether a release kicks off inertia.
#[derive(Debug, Clone)]
pub struct TouchState {
    pub start_val: f64,
    pub start_time: f64,
    pub curr: f64,
    pub prev: f64,
    /// Rate converting touch travel to scroll travel.
    pub touch_factor: f64,
    pub friction_inertia: f64,
}

impl Default for TouchState {
    fn default() -> Self {
        Self {
            start_val: 0.0,
            start_time: 0.0,
            curr: 0.0,
            prev: 0.0,
            touch_factor: 1.0,
            friction_inertia: 0.6,
        }
    }
}

impl TouchState {
    /// Begin a session at the primary touch's vertical position.
    pub fn begin(&mut self, y: f64, now_ms: f64) {
        self.start_val = y;
        self.start_time = now_ms;
        self.curr = y;
        self.prev = y;
    }

    /// Record a touch-move sample and return the finger travel since the
    /// previous sample.
    pub fn track(&mut self, y: f64) -> f64 {
        self.prev = self.curr;
        self.curr = y;
        self.curr - self.prev
    }

    /// Finger travel -> scroll delta. Sign inverted: dragging down scrolls up.
    pub fn to_scroll_delta(&self, delta: f64, device_pixel_ratio: f64) -> f64 {
        -delta * self.touch_factor * device_pixel_ratio
    }

    /// Decide at touch-end whether the gesture was fast enough for inertia
    /// (average speed above 1 unit/ms). Slow or short touches get none.
    pub fn release(&self, now_ms: f64) -> Option<InertiaDecay> {
        let dt = now_ms - self.start_time;
        let dv = self.curr.abs() - self.start_val.abs();
        if dv.abs() > dt {
            Some(InertiaDecay {
                dv,
                friction: self.friction_inertia,
            })
        } else {
            None
        }
    }
}

/// Geometric decay of the release velocity, stepped at a fixed period by the
/// controller's timer.
#[derive(Debug, Clone, Copy)]
pub struct InertiaDecay {
    dv: f64,
    friction: f64,
}

impl InertiaDecay {
    /// One timer tick: yields the step to feed into the scroll conversion, or
    /// `None` once the magnitude falls under the stop threshold (the caller
    /// must then cancel its timer).
    pub fn tick(&mut self) -> Option<f64> {
        if self.dv.abs() < STOP_THRESHOLD {
            return None;
        }
        let step = self.dv;
        self.dv *= self.friction;
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::TouchState;

    #[test]
    fn track_reports_finger_travel() {
        let mut t = TouchState::default();
        t.begin(500.0, 0.0);
        assert_eq!(t.track(480.0), -20.0);
        assert_eq!(t.track(450.0), -30.0);
        assert_eq!(t.prev, 480.0);
    }

    #[test]
    fn scroll_delta_inverts_and_scales() {
        let t = TouchState {
            touch_factor: 1.5,
            ..Default::default()
        };
        assert_eq!(t.to_scroll_delta(-20.0, 2.0), 60.0);
    }

    #[test]
    fn slow_release_gets_no_inertia() {
        let mut t = TouchState::default();
        t.begin(500.0, 0.0);
        t.track(450.0);
        // 50 units over 100ms: below the 1 unit/ms bar
        assert!(t.release(100.0).is_none());
    }

    #[test]
    fn fast_release_decays_to_a_stop() {
        // start 500, end 300 after 100ms: dv -200 engages; |dv| runs
        // 200, 120, 72, 43.2, 25.92, 15.552 and the 7th tick sees 9.33
        let mut t = TouchState::default();
        t.begin(500.0, 0.0);
        t.track(300.0);
        let mut decay = t.release(100.0).expect("inertia should engage");
        let mut steps = Vec::new();
        while let Some(s) = decay.tick() {
            steps.push(s.abs());
        }
        let expected = [200.0, 120.0, 72.0, 43.2, 25.92, 15.552];
        assert_eq!(steps.len(), expected.len());
        for (got, want) in steps.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn decay_terminates_for_any_friction_below_one() {
        let mut t = TouchState {
            friction_inertia: 0.99,
            ..Default::default()
        };
        t.begin(0.0, 0.0);
        t.track(100_000.0);
        let mut decay = t.release(1.0).unwrap();
        let mut ticks = 0u32;
        while decay.tick().is_some() {
            ticks += 1;
            assert!(ticks < 10_000, "decay must terminate");
        }
    }
}
