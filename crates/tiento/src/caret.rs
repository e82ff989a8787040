//! Tolerance-based convergence for continuous-valued controls.
//!
//! A caret owner is anything with a scalar position that can be moved one
//! increment at a time: a text caret, a slider knob, a scroll bar. [`ToPosition`]
//! classifies the current position against a target with an allowed error,
//! and [`drive`] nudges the control until it lands inside that tolerance.
//!
//! The current position is never cached. Each classification reads it again
//! because the control may move between calls.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

use crate::config::TientoConfig;
use crate::result::{TientoError, TientoResult};
use crate::wait::DriveOptions;

/// Which way a control has to move to approach its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Current position is above the target
    Decrease,
    /// Current position is within the allowed error
    AtTarget,
    /// Current position is below the target
    Increase,
}

impl Direction {
    /// Signed encoding: -1, 0 or 1
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        match self {
            Self::Decrease => -1,
            Self::AtTarget => 0,
            Self::Increase => 1,
        }
    }

    /// Decode from the sign of `value`
    #[must_use]
    pub const fn from_sign(value: i32) -> Self {
        match value {
            v if v < 0 => Self::Decrease,
            0 => Self::AtTarget,
            _ => Self::Increase,
        }
    }

    /// Check if no movement is needed
    #[must_use]
    pub const fn is_at_target(&self) -> bool {
        matches!(self, Self::AtTarget)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decrease => write!(f, "decrease"),
            Self::AtTarget => write!(f, "at target"),
            Self::Increase => write!(f, "increase"),
        }
    }
}

fn validate_allowed_error(allowed_error: f64) -> TientoResult<()> {
    if allowed_error.is_nan() {
        return Err(TientoError::invalid_argument("Precision must be a number"));
    }
    if allowed_error < 0.0 {
        return Err(TientoError::invalid_argument(
            "Precision could not be less than 0",
        ));
    }
    Ok(())
}

/// Target value with an allowed error
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToPosition {
    value: f64,
    allowed_error: f64,
}

impl ToPosition {
    /// Create a target; the allowed error must be a non-negative number
    pub fn new(value: f64, allowed_error: f64) -> TientoResult<Self> {
        if value.is_nan() {
            return Err(TientoError::invalid_argument("Target position must be a number"));
        }
        validate_allowed_error(allowed_error)?;
        Ok(Self {
            value,
            allowed_error,
        })
    }

    /// Target that must be hit exactly
    pub fn exact(value: f64) -> TientoResult<Self> {
        Self::new(value, 0.0)
    }

    /// Target value
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Allowed error
    #[must_use]
    pub const fn allowed_error(&self) -> f64 {
        self.allowed_error
    }

    /// Classify `current` against the target
    #[must_use]
    pub fn direction_from(&self, current: f64) -> Direction {
        let diff = self.value - current;
        if diff.abs() <= self.allowed_error {
            Direction::AtTarget
        } else if diff > 0.0 {
            Direction::Increase
        } else {
            Direction::Decrease
        }
    }
}

impl fmt::Display for ToPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value == {} with {} error", self.value, self.allowed_error)
    }
}

/// A [`ToPosition`] bound to a callback reading the live position.
pub struct CaretTarget<F> {
    goal: ToPosition,
    position: F,
}

impl<F: Fn() -> f64> CaretTarget<F> {
    /// Create a target reading the current position from `position`
    pub fn new(value: f64, allowed_error: f64, position: F) -> TientoResult<Self> {
        Ok(Self {
            goal: ToPosition::new(value, allowed_error)?,
            position,
        })
    }

    /// Bind an existing goal to a position callback
    pub const fn from_goal(goal: ToPosition, position: F) -> Self {
        Self { goal, position }
    }

    /// Which way to move right now
    pub fn step(&self) -> Direction {
        self.goal.direction_from((self.position)())
    }

    /// Current position as read from the callback
    pub fn current(&self) -> f64 {
        (self.position)()
    }

    /// The target and its tolerance
    pub const fn goal(&self) -> &ToPosition {
        &self.goal
    }
}

impl<F> fmt::Debug for CaretTarget<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaretTarget")
            .field("goal", &self.goal)
            .finish_non_exhaustive()
    }
}

impl<F> fmt::Display for CaretTarget<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.goal, f)
    }
}

/// Capability of a control with a scalar position
pub trait Positionable {
    /// Current position, read from the live control
    fn position(&self) -> f64;

    /// Move one increment in `direction`
    fn nudge(&mut self, direction: Direction) -> TientoResult<()>;
}

impl<P: Positionable + ?Sized> Positionable for &mut P {
    fn position(&self) -> f64 {
        (**self).position()
    }

    fn nudge(&mut self, direction: Direction) -> TientoResult<()> {
        (**self).nudge(direction)
    }
}

/// Outcome of a successful [`drive`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveReport {
    /// Nudges performed
    pub steps: usize,
    /// Times the direction flipped (overshoots)
    pub reversals: usize,
    /// Position when the target was reached
    pub final_position: f64,
    /// Time spent driving
    pub elapsed: Duration,
}

/// Nudge `caret` until it is within the goal's tolerance.
///
/// # Errors
///
/// [`TientoError::NotConverged`] once `max_steps` nudges have not reached the
/// target, [`TientoError::Timeout`] once `timeout_ms` has elapsed, or whatever
/// error the caret reports from `nudge`.
pub fn drive<P>(caret: &mut P, goal: &ToPosition, options: &DriveOptions) -> TientoResult<DriveReport>
where
    P: Positionable + ?Sized,
{
    let start = Instant::now();
    let mut steps = 0;
    let mut reversals = 0;
    let mut last: Option<Direction> = None;

    loop {
        let current = caret.position();
        let direction = goal.direction_from(current);

        if direction.is_at_target() {
            tracing::debug!(steps, reversals, position = current, target = %goal, "caret converged");
            return Ok(DriveReport {
                steps,
                reversals,
                final_position: current,
                elapsed: start.elapsed(),
            });
        }

        if steps >= options.max_steps {
            tracing::warn!(steps, position = current, target = %goal, "caret did not converge");
            return Err(TientoError::NotConverged {
                target: goal.to_string(),
                steps,
            });
        }
        if start.elapsed() >= options.timeout() {
            tracing::warn!(steps, position = current, target = %goal, "caret drive timed out");
            return Err(TientoError::Timeout {
                ms: options.timeout_ms,
            });
        }

        if last.is_some_and(|previous| previous != direction) {
            reversals += 1;
        }
        last = Some(direction);

        tracing::trace!(step = steps + 1, position = current, %direction, "nudging caret");
        caret.nudge(direction)?;
        steps += 1;

        if options.step_delay_ms > 0 {
            std::thread::sleep(options.step_delay());
        }
    }
}

/// A positionable control together with its allowed error and drive bounds.
#[derive(Debug)]
pub struct CaretOwner<P> {
    caret: P,
    allowed_error: f64,
    options: DriveOptions,
}

impl<P> CaretOwner<P> {
    /// Wrap a control; the allowed error starts at 0
    pub fn new(caret: P) -> Self {
        Self {
            caret,
            allowed_error: 0.0,
            options: DriveOptions::default(),
        }
    }

    /// Set the drive bounds
    #[must_use]
    pub const fn with_options(mut self, options: DriveOptions) -> Self {
        self.options = options;
        self
    }

    /// Take drive bounds from a configuration
    #[must_use]
    pub const fn with_config(mut self, config: &TientoConfig) -> Self {
        self.options = config.drive;
        self
    }

    /// Allowed error used by [`CaretOwner::move_to`]
    pub const fn allowed_error(&self) -> f64 {
        self.allowed_error
    }

    /// Change the allowed error; negative values are rejected and leave the
    /// previous value in place
    pub fn allow_error(&mut self, allowed_error: f64) -> TientoResult<()> {
        validate_allowed_error(allowed_error)?;
        self.allowed_error = allowed_error;
        Ok(())
    }

    /// Drive bounds
    pub const fn options(&self) -> &DriveOptions {
        &self.options
    }

    /// The wrapped control
    pub const fn caret(&self) -> &P {
        &self.caret
    }

    /// The wrapped control, mutably
    pub fn caret_mut(&mut self) -> &mut P {
        &mut self.caret
    }

    /// Give back the wrapped control
    pub fn into_inner(self) -> P {
        self.caret
    }
}

impl<P: Positionable> CaretOwner<P> {
    /// Current position of the control
    pub fn position(&self) -> f64 {
        self.caret.position()
    }

    /// A target at `position` reading this control's live position
    pub fn target(&self, position: f64) -> TientoResult<CaretTarget<impl Fn() -> f64 + '_>> {
        CaretTarget::new(position, self.allowed_error, move || self.caret.position())
    }

    /// Move to `position` within the configured allowed error
    pub fn move_to(&mut self, position: f64) -> TientoResult<DriveReport> {
        self.move_to_within(position, self.allowed_error)
    }

    /// Move to `position` within `allowed_error`
    pub fn move_to_within(&mut self, position: f64, allowed_error: f64) -> TientoResult<DriveReport> {
        let goal = ToPosition::new(position, allowed_error)?;
        drive(&mut self.caret, &goal, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSlider;
    use std::cell::Cell;

    mod direction_tests {
        use super::*;

        #[test]
        fn test_signed_encoding() {
            assert_eq!(Direction::Decrease.as_i32(), -1);
            assert_eq!(Direction::AtTarget.as_i32(), 0);
            assert_eq!(Direction::Increase.as_i32(), 1);
        }

        #[test]
        fn test_from_sign() {
            assert_eq!(Direction::from_sign(-7), Direction::Decrease);
            assert_eq!(Direction::from_sign(0), Direction::AtTarget);
            assert_eq!(Direction::from_sign(3), Direction::Increase);
        }

        #[test]
        fn test_display() {
            assert_eq!(Direction::AtTarget.to_string(), "at target");
        }
    }

    mod to_position_tests {
        use super::*;

        #[test]
        fn test_classification() {
            let goal = ToPosition::new(10.0, 0.5).unwrap();
            assert_eq!(goal.direction_from(10.3), Direction::AtTarget);
            assert_eq!(goal.direction_from(9.0), Direction::Increase);
            assert_eq!(goal.direction_from(11.0), Direction::Decrease);
        }

        #[test]
        fn test_tolerance_boundary_is_inclusive() {
            let goal = ToPosition::new(10.0, 0.5).unwrap();
            assert_eq!(goal.direction_from(9.5), Direction::AtTarget);
            assert_eq!(goal.direction_from(10.5), Direction::AtTarget);
        }

        #[test]
        fn test_exact_target() {
            let goal = ToPosition::exact(3.0).unwrap();
            assert_eq!(goal.direction_from(3.0), Direction::AtTarget);
            assert_eq!(goal.direction_from(3.0001), Direction::Decrease);
        }

        #[test]
        fn test_negative_error_rejected() {
            let err = ToPosition::new(10.0, -1.0).unwrap_err();
            assert!(matches!(err, TientoError::InvalidArgument { .. }));
        }

        #[test]
        fn test_nan_rejected() {
            assert!(ToPosition::new(10.0, f64::NAN).is_err());
            assert!(ToPosition::new(f64::NAN, 0.0).is_err());
        }

        #[test]
        fn test_display() {
            let goal = ToPosition::new(10.0, 0.5).unwrap();
            assert_eq!(goal.to_string(), "value == 10 with 0.5 error");
        }
    }

    mod caret_target_tests {
        use super::*;

        #[test]
        fn test_step_rereads_position() {
            let position = Cell::new(0.0);
            let target = CaretTarget::new(10.0, 0.5, || position.get()).unwrap();

            assert_eq!(target.step(), Direction::Increase);
            assert_eq!(target.step(), Direction::Increase);

            position.set(10.3);
            assert_eq!(target.step(), Direction::AtTarget);

            position.set(11.0);
            assert_eq!(target.step(), Direction::Decrease);
            assert!((target.current() - 11.0).abs() < f64::EPSILON);
        }

        #[test]
        fn test_negative_error_rejected_at_construction() {
            let result = CaretTarget::new(10.0, -1.0, || 0.0);
            assert!(matches!(result, Err(TientoError::InvalidArgument { .. })));
        }

        #[test]
        fn test_display_and_debug() {
            let target = CaretTarget::new(2.0, 0.0, || 0.0).unwrap();
            assert_eq!(target.to_string(), "value == 2 with 0 error");
            assert!(format!("{target:?}").contains("CaretTarget"));
        }
    }

    mod drive_tests {
        use super::*;

        #[test]
        fn test_drive_converges() {
            let mut slider = MockSlider::new(0.0, 1.0);
            let goal = ToPosition::new(5.0, 0.0).unwrap();
            let report = drive(&mut slider, &goal, &DriveOptions::default()).unwrap();
            assert_eq!(report.steps, 5);
            assert_eq!(report.reversals, 0);
            assert!((report.final_position - 5.0).abs() < f64::EPSILON);
        }

        #[test]
        fn test_drive_already_at_target() {
            let mut slider = MockSlider::new(4.8, 1.0);
            let goal = ToPosition::new(5.0, 0.5).unwrap();
            let report = drive(&mut slider, &goal, &DriveOptions::default()).unwrap();
            assert_eq!(report.steps, 0);
            assert_eq!(slider.nudges(), 0);
        }

        #[test]
        fn test_drive_gives_up_on_oscillation() {
            // Step of 3 can never land within 0.5 of 10 starting from 0.
            let mut slider = MockSlider::new(0.0, 3.0);
            let goal = ToPosition::new(10.0, 0.5).unwrap();
            let options = DriveOptions::new().with_max_steps(20);
            let err = drive(&mut slider, &goal, &options).unwrap_err();
            assert!(matches!(err, TientoError::NotConverged { steps: 20, .. }));
            assert_eq!(slider.nudges(), 20);
        }

        #[test]
        fn test_drive_counts_reversals() {
            // 0 -> 4 -> 8 -> 12 overshoots, the halved step lands on 10.
            let mut slider = MockSlider::new(0.0, 4.0).with_damping(0.5);
            let goal = ToPosition::new(10.0, 0.5).unwrap();
            let report = drive(&mut slider, &goal, &DriveOptions::default()).unwrap();
            assert_eq!(report.steps, 4);
            assert_eq!(report.reversals, 1);
            assert!((report.final_position - 10.0).abs() < f64::EPSILON);
        }

        #[test]
        fn test_drive_timeout() {
            let mut slider = MockSlider::new(0.0, 1.0);
            let goal = ToPosition::new(100.0, 0.0).unwrap();
            let options = DriveOptions::new().with_timeout(0);
            let err = drive(&mut slider, &goal, &options).unwrap_err();
            assert!(matches!(err, TientoError::Timeout { ms: 0 }));
            assert_eq!(slider.nudges(), 0);
        }

        #[test]
        fn test_drive_propagates_nudge_errors() {
            let mut slider = MockSlider::new(0.0, 1.0).with_upper_bound(2.0);
            let goal = ToPosition::new(5.0, 0.0).unwrap();
            let err = drive(&mut slider, &goal, &DriveOptions::default()).unwrap_err();
            assert!(matches!(err, TientoError::Capability { .. }));
            assert_eq!(slider.nudges(), 2);
        }
    }

    mod owner_tests {
        use super::*;

        #[test]
        fn test_allow_error_validation() {
            let mut owner = CaretOwner::new(MockSlider::new(0.0, 1.0));
            assert_eq!(owner.allowed_error(), 0.0);
            owner.allow_error(0.25).unwrap();
            assert_eq!(owner.allowed_error(), 0.25);

            let err = owner.allow_error(-1.0).unwrap_err();
            assert!(matches!(err, TientoError::InvalidArgument { .. }));
            assert_eq!(owner.allowed_error(), 0.25);
        }

        #[test]
        fn test_move_to_uses_allowed_error() {
            let mut owner = CaretOwner::new(MockSlider::new(0.0, 2.0));
            owner.allow_error(1.0).unwrap();
            let report = owner.move_to(7.0).unwrap();
            assert_eq!(report.steps, 3);
            assert!((owner.position() - 6.0).abs() < f64::EPSILON);
        }

        #[test]
        fn test_move_to_within() {
            let mut owner = CaretOwner::new(MockSlider::new(10.0, 0.5));
            owner.move_to_within(8.0, 0.0).unwrap();
            assert!((owner.position() - 8.0).abs() < f64::EPSILON);
            assert!(owner.move_to_within(8.0, -0.1).is_err());
        }

        #[test]
        fn test_target_reads_live_position() {
            let owner = CaretOwner::new(MockSlider::new(9.0, 1.0));
            let target = owner.target(10.0).unwrap();
            assert_eq!(target.step(), Direction::Increase);
        }

        #[test]
        fn test_with_config_sets_options() {
            let config = TientoConfig::new().with_drive(DriveOptions::new().with_max_steps(3));
            let mut owner = CaretOwner::new(MockSlider::new(0.0, 1.0)).with_config(&config);
            assert_eq!(owner.options().max_steps, 3);
            assert!(matches!(
                owner.move_to(10.0),
                Err(TientoError::NotConverged { steps: 3, .. })
            ));
            assert_eq!(owner.into_inner().nudges(), 3);
        }
    }
}
