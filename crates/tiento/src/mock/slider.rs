//! Fixed-increment caret.

use crate::caret::{Direction, Positionable};
use crate::result::{TientoError, TientoResult};

/// Caret that moves one fixed increment per nudge.
///
/// With damping below 1.0 the increment shrinks every time the direction
/// reverses, which lets an overshooting caret settle.
#[derive(Debug, Clone, PartialEq)]
pub struct MockSlider {
    position: f64,
    step: f64,
    damping: f64,
    lower_bound: Option<f64>,
    upper_bound: Option<f64>,
    last_direction: Option<Direction>,
    nudges: usize,
}

impl MockSlider {
    /// Slider at `position` moving `step` per nudge
    #[must_use]
    pub const fn new(position: f64, step: f64) -> Self {
        Self {
            position,
            step,
            damping: 1.0,
            lower_bound: None,
            upper_bound: None,
            last_direction: None,
            nudges: 0,
        }
    }

    /// Multiply the increment by `factor` on every reversal
    #[must_use]
    pub const fn with_damping(mut self, factor: f64) -> Self {
        self.damping = factor;
        self
    }

    /// Refuse nudges that would go below `bound`
    #[must_use]
    pub const fn with_lower_bound(mut self, bound: f64) -> Self {
        self.lower_bound = Some(bound);
        self
    }

    /// Refuse nudges that would go above `bound`
    #[must_use]
    pub const fn with_upper_bound(mut self, bound: f64) -> Self {
        self.upper_bound = Some(bound);
        self
    }

    /// Current increment
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Number of nudges that moved the slider
    #[must_use]
    pub const fn nudges(&self) -> usize {
        self.nudges
    }
}

impl Positionable for MockSlider {
    fn position(&self) -> f64 {
        self.position
    }

    fn nudge(&mut self, direction: Direction) -> TientoResult<()> {
        let sign: f64 = match direction {
            Direction::AtTarget => return Ok(()),
            Direction::Decrease => -1.0,
            Direction::Increase => 1.0,
        };
        let reversed = self.last_direction.is_some_and(|last| last != direction);
        let step = if reversed {
            self.step * self.damping
        } else {
            self.step
        };
        let next = sign.mul_add(step, self.position);

        if self.upper_bound.is_some_and(|bound| next > bound)
            || self.lower_bound.is_some_and(|bound| next < bound)
        {
            return Err(TientoError::capability(format!(
                "Slider cannot move from {} to {next}",
                self.position
            )));
        }

        self.position = next;
        self.step = step;
        self.last_direction = Some(direction);
        self.nudges += 1;
        Ok(())
    }
}
