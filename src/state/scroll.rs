//! Scroll offset state: current/previous position and hard bounds.

/// Vertical scroll offset in pixels, clamped to `[min, max]`.
#[derive(Debug, Clone)]
pub struct ScrollState {
    pub curr: f64,
    pub prev: f64,
    pub min: f64,
    pub max: f64,
    /// Pixels travelled per normalized wheel-spin unit.
    pub spin_factor: f64,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            curr: 0.0,
            prev: 0.0,
            min: 0.0,
            max: 0.0,
            spin_factor: 150.0,
        }
    }
}

impl ScrollState {
    /// Shift the offset by `delta`, capturing `prev` first and hard-clamping
    /// the result. No rubber-banding past the bounds.
    pub fn apply_delta(&mut self, delta: f64) {
        self.prev = self.curr;
        self.curr = (self.curr + delta).clamp(self.min, self.max);
    }

    /// Convert a normalized wheel spin into a scroll delta and apply it.
    pub fn apply_spin(&mut self, spin_y: f64) {
        self.apply_delta(spin_y * self.spin_factor);
    }

    /// Recompute `max` from container content height and viewport height.
    /// Content shorter than the viewport yields `max = 0` (nothing to scroll).
    pub fn recompute_max(&mut self, content_height: f64, viewport_height: f64) {
        self.max = (content_height - viewport_height).max(0.0);
    }

    /// Pull `curr` back inside `[min, max]`. Returns true if it moved, so the
    /// caller knows whether to retrigger the scroll animation.
    pub fn reclamp(&mut self) -> bool {
        let clamped = self.curr.clamp(self.min, self.max);
        if clamped != self.curr {
            self.prev = self.curr;
            self.curr = clamped;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ScrollState;

    fn state(max: f64) -> ScrollState {
        ScrollState {
            max,
            ..Default::default()
        }
    }

    #[test]
    fn delta_stays_within_bounds() {
        let mut s = state(1200.0);
        for d in [500.0, 500.0, 500.0, -5000.0, 37.5, 1e9, -1e9] {
            s.apply_delta(d);
            assert!(s.curr >= s.min && s.curr <= s.max, "curr {} out of bounds", s.curr);
        }
    }

    #[test]
    fn prev_captured_before_update() {
        let mut s = state(1200.0);
        s.apply_delta(300.0);
        s.apply_delta(100.0);
        assert_eq!(s.prev, 300.0);
        assert_eq!(s.curr, 400.0);
    }

    #[test]
    fn wheel_spin_scenario() {
        // content 2000, viewport 800 -> max 1200; spin -1 at factor 150 moves -150
        let mut s = ScrollState::default();
        s.recompute_max(2000.0, 800.0);
        assert_eq!(s.max, 1200.0);
        s.curr = 600.0;
        s.apply_spin(-1.0);
        assert_eq!(s.curr, 450.0);
        s.curr = 100.0;
        s.apply_spin(-1.0);
        assert_eq!(s.curr, 0.0); // clamped at min
    }

    #[test]
    fn recompute_max_is_idempotent() {
        let mut s = ScrollState::default();
        s.recompute_max(2000.0, 800.0);
        let first = s.max;
        s.recompute_max(2000.0, 800.0);
        assert_eq!(s.max, first);
    }

    #[test]
    fn short_content_yields_zero_max() {
        let mut s = ScrollState::default();
        s.recompute_max(500.0, 800.0);
        assert_eq!(s.max, 0.0);
    }

    #[test]
    fn reclamp_after_shrink() {
        let mut s = state(1200.0);
        s.apply_delta(1000.0);
        s.recompute_max(1400.0, 800.0); // max drops to 600
        assert!(s.reclamp());
        assert_eq!(s.curr, 600.0);
        assert!(!s.reclamp());
    }
}
