//! Directional jitter filter for incoming scroll deltas.
//!
//! Positive deltas collapse the bar, negative deltas expand it. A delta that
//! reverses direction by less than [`ANTI_SHAKE_THRESHOLD`] pixels relative to
//! the previous delta is noise from the input device and is swallowed.

use log::trace;

use crate::animation::SnapAction;

/// Largest change in magnitude that still counts as shake on a direction flip
pub const ANTI_SHAKE_THRESHOLD: i32 = 200;

/// Direction the bar was last heading, used to pick a snap target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollAction {
    #[default]
    None,
    Expanding,
    Collapsing,
}

impl ScrollAction {
    pub fn snap_action(self) -> Option<SnapAction> {
        match self {
            ScrollAction::None => None,
            ScrollAction::Expanding => Some(SnapAction::Expand),
            ScrollAction::Collapsing => Some(SnapAction::Collapse),
        }
    }
}

impl From<SnapAction> for ScrollAction {
    fn from(action: SnapAction) -> Self {
        match action {
            SnapAction::Expand => ScrollAction::Expanding,
            SnapAction::Collapse => ScrollAction::Collapsing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollVerdict {
    /// Noise; leave the bar alone
    Shake,
    /// Pass the delta on to the controller
    Forward(i32),
}

#[derive(Debug, Default)]
pub struct ScrollAdapter {
    pre_y: i32,
    pending: ScrollAction,
}

impl ScrollAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `y` flips direction against the previous delta by a small margin
    pub fn is_shake(&self, y: i32) -> bool {
        let flipped = (y as i64) * (self.pre_y as i64) < 0;
        flipped && y.unsigned_abs().abs_diff(self.pre_y.unsigned_abs()) < ANTI_SHAKE_THRESHOLD as u32
    }

    /// Classify `y` and remember it as the previous delta.
    pub fn filter(&mut self, y: i32) -> ScrollVerdict {
        if self.is_shake(y) {
            trace!("Swallowing shake delta {y} after {}", self.pre_y);
            self.pre_y = y;
            return ScrollVerdict::Shake;
        }

        let trend = y as i64 + self.pre_y as i64;
        if trend > 0 {
            self.pending = ScrollAction::Collapsing;
        } else if trend < 0 {
            self.pending = ScrollAction::Expanding;
        }
        self.pre_y = y;
        ScrollVerdict::Forward(y)
    }

    /// Direction of the last forwarded gesture
    pub fn pending(&self) -> ScrollAction {
        self.pending
    }

    pub fn last_delta(&self) -> i32 {
        self.pre_y
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn after(pre_y: i32) -> ScrollAdapter {
        let mut adapter = ScrollAdapter::new();
        adapter.filter(pre_y);
        adapter
    }

    #[test]
    fn test_small_reversal_is_shake() {
        let mut adapter = after(10);
        assert_eq!(adapter.filter(-5), ScrollVerdict::Shake);
        assert_eq!(adapter.last_delta(), -5);
        // Pending direction is left as it was
        assert_eq!(adapter.pending(), ScrollAction::Collapsing);
    }

    #[test]
    fn test_large_reversal_is_forwarded() {
        let mut adapter = after(10);
        assert_eq!(adapter.filter(-250), ScrollVerdict::Forward(-250));
        assert_eq!(adapter.pending(), ScrollAction::Expanding);
    }

    #[test]
    fn test_same_direction_is_forwarded() {
        let mut adapter = after(10);
        assert_eq!(adapter.filter(3), ScrollVerdict::Forward(3));
        assert_eq!(adapter.filter(-1), ScrollVerdict::Shake);
        assert_eq!(adapter.filter(-4), ScrollVerdict::Forward(-4));
        assert_eq!(adapter.pending(), ScrollAction::Expanding);
    }

    #[test]
    fn test_zero_keeps_pending_action() {
        let mut adapter = after(-20);
        assert_eq!(adapter.filter(0), ScrollVerdict::Forward(0));
        assert_eq!(adapter.pending(), ScrollAction::Expanding);
    }

    #[test]
    fn test_trend_accumulates_previous_delta() {
        let mut adapter = after(300);
        // Reversal past the threshold, but the sum still points at collapsing
        assert_eq!(adapter.filter(-50), ScrollVerdict::Forward(-50));
        assert_eq!(adapter.pending(), ScrollAction::Collapsing);
    }

    #[test]
    fn test_extreme_deltas_do_not_overflow() {
        let mut adapter = after(i32::MAX);
        assert_eq!(adapter.filter(i32::MIN), ScrollVerdict::Shake);
    }

    #[test]
    fn test_scroll_action_maps_to_snap() {
        assert_eq!(ScrollAction::None.snap_action(), None);
        assert_eq!(ScrollAction::Collapsing.snap_action(), Some(SnapAction::Collapse));
        assert_eq!(ScrollAction::from(SnapAction::Expand), ScrollAction::Expanding);
    }
}
