//! Debounce/throttle rate limiting as timestamp-driven state machines.
//!
//! No timers are owned here: callers report attempts with `record(now)` and
//! poll `ready(now)` from the frame loop to learn when the deferred
//! invocation is due.

/// Trailing-edge debounce: a burst of calls collapses into one invocation,
/// due one full window after the *last* call.
#[derive(Debug, Clone)]
pub struct Debounce {
    window_ms: f64,
    deadline: Option<f64>,
}

impl Debounce {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            deadline: None,
        }
    }

    /// Register a call attempt; restarts the window.
    pub fn record(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.window_ms);
    }

    /// True exactly once, when the window has elapsed with no further calls.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Leading-edge throttle: the first call fires immediately, later calls
/// inside the window are dropped, and one trailing replay fires once the
/// window elapses if anything was dropped.
#[derive(Debug, Clone)]
pub struct Throttle {
    window_ms: f64,
    gate_until: Option<f64>,
    pending: bool,
}

impl Throttle {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            gate_until: None,
            pending: false,
        }
    }

    /// Register a call attempt. Returns true when the call should run now
    /// (leading edge); otherwise it is collapsed into the trailing replay.
    pub fn record(&mut self, now_ms: f64) -> bool {
        match self.gate_until {
            Some(until) if now_ms < until => {
                self.pending = true;
                false
            }
            _ => {
                self.gate_until = Some(now_ms + self.window_ms);
                self.pending = false;
                true
            }
        }
    }

    /// True when the window elapsed with dropped calls to replay. The replay
    /// counts as a call of its own and reopens the window.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.gate_until {
            Some(until) if now_ms >= until => {
                if self.pending {
                    self.pending = false;
                    self.gate_until = Some(now_ms + self.window_ms);
                    true
                } else {
                    self.gate_until = None;
                    false
                }
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debounce_collapses_burst_to_one() {
        let mut d = Debounce::new(100.0);
        let mut fired = 0;
        for now in [0.0, 10.0, 20.0, 90.0] {
            d.record(now);
            if d.ready(now) {
                fired += 1;
            }
        }
        // window counts from the last call at t=90
        assert!(!d.ready(150.0));
        assert!(d.ready(190.0));
        fired += 1;
        assert_eq!(fired, 1);
        // one-shot: does not keep firing
        assert!(!d.ready(500.0));
    }

    #[test]
    fn debounce_restarts_window_on_each_call() {
        let mut d = Debounce::new(100.0);
        d.record(0.0);
        assert!(!d.ready(99.0));
        d.record(99.0);
        assert!(!d.ready(150.0));
        assert!(d.ready(199.0));
    }

    #[test]
    fn throttle_fires_leading_then_one_trailing() {
        let mut t = Throttle::new(100.0);
        assert!(t.record(0.0)); // leading edge
        assert!(!t.record(10.0));
        assert!(!t.record(50.0));
        assert!(!t.ready(99.0));
        assert!(t.ready(100.0)); // single trailing replay
        assert!(!t.ready(101.0));
    }

    #[test]
    fn throttle_without_dropped_calls_has_no_trailing() {
        let mut t = Throttle::new(100.0);
        assert!(t.record(0.0));
        assert!(!t.ready(200.0));
        // gate released: next call is leading again
        assert!(t.record(250.0));
    }

    #[test]
    fn throttle_replay_reopens_window() {
        let mut t = Throttle::new(100.0);
        assert!(t.record(0.0));
        assert!(!t.record(10.0));
        assert!(t.ready(100.0));
        // the replay occupies a fresh window
        assert!(!t.record(150.0));
        assert!(t.ready(200.0));
    }
}
