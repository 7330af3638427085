//! Minimal retargeting tween over a single numeric property.
//!
//! Replace-in-place policy: starting a tween for a property that is already
//! animating samples the in-flight tween and restarts from that value, so
//! rapid input retargets motion instead of queuing animations behind it.

/// Eased interpolation between two values over a fixed duration.
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    from: f64,
    to: f64,
    start_ms: f64,
    duration_ms: f64,
}

impl Tween {
    pub fn new(from: f64, to: f64, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1.0),
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms >= self.duration_ms
    }

    pub fn sample(&self, now_ms: f64) -> f64 {
        let t = ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * smoothstep(t)
    }

    /// Re-aim at a new target from the current sampled value.
    pub fn retarget(&mut self, now_ms: f64, new_to: f64, duration_ms: f64) {
        let cur = self.sample(now_ms);
        *self = Self::new(cur, new_to, now_ms, duration_ms);
    }
}

/// Replace-in-place entry point for an optional tween slot. `from` is only
/// used when no tween is in flight.
pub fn retarget_slot(slot: &mut Option<Tween>, now_ms: f64, from: f64, to: f64, duration_ms: f64) {
    match slot {
        Some(t) => t.retarget(now_ms, to, duration_ms),
        None => *slot = Some(Tween::new(from, to, now_ms, duration_ms)),
    }
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        let t = Tween::new(0.0, 100.0, 1000.0, 500.0);
        assert_eq!(t.sample(1000.0), 0.0);
        assert_eq!(t.sample(1500.0), 100.0);
        assert_eq!(t.sample(9999.0), 100.0);
        assert!(!t.is_done(1499.0));
        assert!(t.is_done(1500.0));
    }

    #[test]
    fn progress_is_monotonic() {
        let t = Tween::new(-40.0, 60.0, 0.0, 400.0);
        let mut last = t.sample(0.0);
        for i in 1..=40 {
            let v = t.sample(i as f64 * 10.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn retarget_continues_from_current_value() {
        let mut t = Tween::new(0.0, 100.0, 0.0, 1000.0);
        let mid = t.sample(500.0);
        t.retarget(500.0, -50.0, 1000.0);
        // no jump at the retarget instant
        assert_eq!(t.sample(500.0), mid);
        assert_eq!(t.sample(1500.0), -50.0);
    }

    #[test]
    fn slot_replaces_instead_of_queuing() {
        let mut slot = None;
        retarget_slot(&mut slot, 0.0, 0.0, 100.0, 1000.0);
        retarget_slot(&mut slot, 500.0, 0.0, 300.0, 1000.0);
        let t = slot.unwrap();
        assert_eq!(t.target(), 300.0);
        // finishes on the second tween's clock, not the first's
        assert!(!t.is_done(1400.0));
        assert!(t.is_done(1500.0));
    }
}
