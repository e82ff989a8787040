//! Caret convergence against controls with different movement models.

use tiento::mock::MockSlider;
use tiento::prelude::*;
use tiento::{CaretTarget, DriveReport};

/// Scroll bar that moves a page at a time and clamps at its ends.
#[derive(Debug)]
struct ScrollBar {
    value: i64,
    page: i64,
    max: i64,
}

impl Positionable for ScrollBar {
    fn position(&self) -> f64 {
        self.value as f64
    }

    fn nudge(&mut self, direction: Direction) -> TientoResult<()> {
        let delta = i64::from(direction.as_i32()) * self.page;
        self.value = (self.value + delta).clamp(0, self.max);
        Ok(())
    }
}

#[test]
fn scroll_bar_reaches_page_aligned_target() {
    let mut owner = CaretOwner::new(ScrollBar {
        value: 0,
        page: 10,
        max: 100,
    });
    owner.allow_error(5.0).unwrap();

    let report: DriveReport = owner.move_to(42.0).unwrap();
    assert_eq!(report.steps, 4);
    assert_eq!(owner.position(), 40.0);
}

#[test]
fn target_past_the_end_does_not_converge() {
    let mut owner = CaretOwner::new(ScrollBar {
        value: 90,
        page: 10,
        max: 100,
    })
    .with_options(DriveOptions::new().with_max_steps(5));

    let err = owner.move_to(500.0).unwrap_err();
    assert!(matches!(err, TientoError::NotConverged { steps: 5, .. }));
    assert_eq!(owner.position(), 100.0);
}

#[test]
fn manual_stepping_with_live_position() {
    let mut slider = MockSlider::new(0.0, 2.5);
    let goal = ToPosition::new(5.0, 0.0).unwrap();

    for _ in 0..10 {
        let direction = goal.direction_from(slider.position());
        if direction.is_at_target() {
            break;
        }
        slider.nudge(direction).unwrap();
    }
    assert_eq!(slider.position(), 5.0);
    assert_eq!(slider.nudges(), 2);

    let target = CaretTarget::new(5.0, 0.0, || slider.position()).unwrap();
    assert_eq!(target.step().as_i32(), 0);
}

#[test]
fn drive_from_both_sides() {
    let goal = ToPosition::new(0.0, 0.25).unwrap();

    let mut below = MockSlider::new(-3.0, 1.0);
    let up = drive(&mut below, &goal, &DriveOptions::default()).unwrap();
    assert_eq!(up.steps, 3);

    let mut above = MockSlider::new(3.0, 1.0);
    let down = drive(&mut above, &goal, &DriveOptions::default()).unwrap();
    assert_eq!(down.steps, 3);
    assert_eq!(down.reversals, 0);
}

#[test]
fn config_file_bounds_apply_to_owner() {
    let config = TientoConfig::from_json(r#"{"drive": {"max_steps": 2}}"#).unwrap();
    let mut owner = CaretOwner::new(MockSlider::new(0.0, 1.0)).with_config(&config);
    assert!(owner.move_to(1.0).is_ok());
    assert!(owner.move_to(10.0).is_err());
}
