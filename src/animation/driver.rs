//! Single-flight snap animation.
//!
//! The driver is a two-state machine, `Idle -> Running -> Idle`. While
//! Running, each host frame calls [`AutoAnimationDriver::step`], which moves
//! the bar by the share of the total distance that elapsed since the previous
//! step. The flight ends once the bar reaches the terminal height for its
//! action, however long that takes.

use std::str::FromStr;

use crate::error::Error;

/// Direction of a snap animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapAction {
    Collapse,
    Expand,
}

impl SnapAction {
    /// Sign of the height delta that moves the bar in this direction
    fn delta_sign(self) -> i32 {
        match self {
            SnapAction::Collapse => 1,
            SnapAction::Expand => -1,
        }
    }
}

impl FromStr for SnapAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "collapse" => Ok(SnapAction::Collapse),
            "expand" => Ok(SnapAction::Expand),
            other => Err(Error::InvalidAction(other.to_string())),
        }
    }
}

/// What the driver moves. Implemented by the collapse controller.
pub trait SnapTarget {
    /// Shrink (positive) or grow (negative) the bar, returning the consumed amount
    fn apply_delta(&mut self, dy: i32) -> i32;
    fn is_collapsed(&self) -> bool;
    fn is_expanded(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy)]
struct Flight {
    duration_ms: u64,
    total_distance: i32,
    last_step_ms: u64,
    action: SnapAction,
    /// Sub-pixel remainder carried into the next step
    carry: f32,
}

impl Flight {
    /// Pixels to move for the time elapsed since the last step
    fn fragment(&mut self, now_ms: u64) -> i32 {
        if self.duration_ms == 0 {
            return self.total_distance;
        }
        let elapsed = now_ms.saturating_sub(self.last_step_ms) as f32;
        let exact = self.total_distance as f32 * (elapsed / self.duration_ms as f32) + self.carry;
        let whole = exact.trunc();
        self.carry = exact - whole;
        whole as i32
    }
}

#[derive(Debug, Default)]
pub struct AutoAnimationDriver {
    flight: Option<Flight>,
}

impl AutoAnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a flight, replacing any flight already running.
    ///
    /// The first step is due on the first frame at or after `start_ms`.
    pub fn start(
        &mut self,
        duration_ms: u64,
        total_distance: i32,
        start_ms: u64,
        action: SnapAction,
    ) {
        if let Some(previous) = self.flight.take() {
            log::trace!("Replacing running {:?} snap", previous.action);
        }
        self.flight = Some(Flight {
            duration_ms,
            total_distance,
            last_step_ms: start_ms,
            action,
            carry: 0.0,
        });
    }

    /// Cancel the flight. Safe to call when already Idle.
    pub fn stop(&mut self) {
        self.flight = None;
    }

    pub fn state(&self) -> DriverState {
        if self.flight.is_some() {
            DriverState::Running
        } else {
            DriverState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.flight.is_some()
    }

    /// Action of the running flight, if any
    pub fn action(&self) -> Option<SnapAction> {
        self.flight.map(|f| f.action)
    }

    /// Run one step against `target`. Returns the state after the step.
    pub fn step<T: SnapTarget + ?Sized>(&mut self, now_ms: u64, target: &mut T) -> DriverState {
        let Some(flight) = self.flight.as_mut() else {
            return DriverState::Idle;
        };

        let fragment = flight.fragment(now_ms);
        target.apply_delta(fragment * flight.action.delta_sign());
        flight.last_step_ms = now_ms;

        let reached = match flight.action {
            SnapAction::Collapse => target.is_collapsed(),
            SnapAction::Expand => target.is_expanded(),
        };
        if reached {
            log::debug!("{:?} snap reached its end", flight.action);
            self.flight = None;
            DriverState::Idle
        } else {
            DriverState::Running
        }
    }
}
