//! Logical buttons, per-tick snapshots, and edge/auto-shift tracking.

/// The logical buttons the simulation reads. The frontend decides which
/// physical inputs map to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Hard drop.
    W,
    /// Move left.
    A,
    /// Soft drop (faster fall while held).
    S,
    /// Move right.
    D,
    /// Rotate counter-clockwise.
    J,
    /// Rotate clockwise.
    L,
    /// Restart.
    R,
    /// Hold / swap.
    Space,
}

impl Button {
    pub const LEN: usize = 8;

    const fn index(self) -> usize {
        self as usize
    }
}

/// One tick's polled button state.
///
/// The simulation computes rising edges itself by diffing snapshots; the
/// input source only reports whether each button is currently down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonSnapshot {
    down: [bool; Button::LEN],
}

impl ButtonSnapshot {
    #[must_use]
    pub const fn is_down(&self, button: Button) -> bool {
        self.down[button.index()]
    }

    pub const fn set_down(&mut self, button: Button, down: bool) {
        self.down[button.index()] = down;
    }

    /// Builder-style convenience for frontends and tests.
    #[must_use]
    pub const fn with_down(mut self, button: Button) -> Self {
        self.down[button.index()] = true;
        self
    }
}

/// Rising edges for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonEdges {
    pressed: [bool; Button::LEN],
}

impl ButtonEdges {
    /// True iff the button went from up to down this tick.
    #[must_use]
    pub const fn pressed(&self, button: Button) -> bool {
        self.pressed[button.index()]
    }
}

/// Auto-shift kicks in after holding a direction this long.
pub(crate) const AUTO_SHIFT_DELAY_MS: f32 = 125.0;
/// Repeat cadence once auto-shift is active.
pub(crate) const AUTO_SHIFT_INTERVAL_MS: f32 = 50.0;

/// Input state that survives across ticks: the previous snapshot for edge
/// detection plus the delayed-auto-shift counters.
///
/// All of this lives in explicit fields so it can be inspected, reset, and
/// tested; none of it hides in function-local storage.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    previous: ButtonSnapshot,
    shift_delay: f32,
    shift_repeat: f32,
}

impl InputTracker {
    /// Diffs against the previous tick's snapshot and records the new one.
    pub(crate) fn rising_edges(&mut self, snapshot: &ButtonSnapshot) -> ButtonEdges {
        let mut edges = ButtonEdges::default();
        for (index, pressed) in edges.pressed.iter_mut().enumerate() {
            *pressed = snapshot.down[index] && !self.previous.down[index];
        }
        self.previous = *snapshot;
        edges
    }

    /// Advances the auto-shift counters by `dt` milliseconds and returns the
    /// repeat intent for this tick (`-1` left, `1` right, `0` none).
    ///
    /// The delay counter is signed: holding A drives it negative, holding D
    /// positive. Holding both directions (or neither) resets both counters.
    pub(crate) fn auto_shift(&mut self, snapshot: &ButtonSnapshot, dt: f32) -> i32 {
        let left = snapshot.is_down(Button::A);
        let right = snapshot.is_down(Button::D);

        if left && right {
            self.shift_repeat = 0.0;
            self.shift_delay = 0.0;
        }
        if left {
            self.shift_delay -= dt;
        } else if right {
            self.shift_delay += dt;
        } else {
            self.shift_repeat = 0.0;
            self.shift_delay = 0.0;
        }

        let mut intent = 0;
        if self.shift_delay <= -AUTO_SHIFT_DELAY_MS {
            self.shift_repeat += dt;
            if self.shift_repeat >= AUTO_SHIFT_INTERVAL_MS {
                intent = -1;
                self.shift_repeat -= AUTO_SHIFT_INTERVAL_MS;
            }
        }
        if self.shift_delay >= AUTO_SHIFT_DELAY_MS {
            self.shift_repeat += dt;
            if self.shift_repeat >= AUTO_SHIFT_INTERVAL_MS {
                intent = 1;
                self.shift_repeat -= AUTO_SHIFT_INTERVAL_MS;
            }
        }
        intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rising_edges_fire_once() {
        let mut tracker = InputTracker::default();
        let down = ButtonSnapshot::default().with_down(Button::W);

        assert!(tracker.rising_edges(&down).pressed(Button::W));
        // Still held: no new edge.
        assert!(!tracker.rising_edges(&down).pressed(Button::W));

        let up = ButtonSnapshot::default();
        assert!(!tracker.rising_edges(&up).pressed(Button::W));
        assert!(tracker.rising_edges(&down).pressed(Button::W));
    }

    #[test]
    fn test_auto_shift_waits_for_delay() {
        let mut tracker = InputTracker::default();
        let holding_left = ButtonSnapshot::default().with_down(Button::A);

        // 125 ms of delay, then one repeat every 50 ms.
        assert_eq!(tracker.auto_shift(&holding_left, 50.0), 0);
        assert_eq!(tracker.auto_shift(&holding_left, 50.0), 0);
        assert_eq!(tracker.auto_shift(&holding_left, 50.0), -1);
        assert_eq!(tracker.auto_shift(&holding_left, 50.0), -1);
        assert_eq!(tracker.auto_shift(&holding_left, 25.0), 0);
        assert_eq!(tracker.auto_shift(&holding_left, 25.0), -1);
    }

    #[test]
    fn test_auto_shift_right() {
        let mut tracker = InputTracker::default();
        let holding_right = ButtonSnapshot::default().with_down(Button::D);
        for _ in 0..3 {
            let _ = tracker.auto_shift(&holding_right, 50.0);
        }
        assert_eq!(tracker.auto_shift(&holding_right, 50.0), 1);
    }

    #[test]
    fn test_release_resets_counters() {
        let mut tracker = InputTracker::default();
        let holding_left = ButtonSnapshot::default().with_down(Button::A);
        for _ in 0..4 {
            let _ = tracker.auto_shift(&holding_left, 50.0);
        }

        assert_eq!(tracker.auto_shift(&ButtonSnapshot::default(), 50.0), 0);
        // Delay starts over from zero.
        assert_eq!(tracker.auto_shift(&holding_left, 50.0), 0);
        assert_eq!(tracker.auto_shift(&holding_left, 50.0), 0);
        assert_eq!(tracker.auto_shift(&holding_left, 50.0), -1);
    }

    #[test]
    fn test_both_directions_cancel() {
        let mut tracker = InputTracker::default();
        let both = ButtonSnapshot::default()
            .with_down(Button::A)
            .with_down(Button::D);
        for _ in 0..20 {
            assert_eq!(tracker.auto_shift(&both, 50.0), 0);
        }
    }
}
