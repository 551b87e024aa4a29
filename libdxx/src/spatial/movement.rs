use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{DxxError, DxxResult};

/// Angles wrap at this many centidegrees
pub const FULL_CIRCLE: u32 = 3600;

/// Listener ear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ear {
    Left,
    Right,
}

impl Ear {
    pub const BOTH: [Ear; 2] = [Ear::Left, Ear::Right];

    /// path label, `L` or `R`
    pub fn label(self) -> &'static str {
        match self {
            Ear::Left => "L",
            Ear::Right => "R",
        }
    }
}

impl fmt::Display for Ear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rotation direction of the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub const BOTH: [Direction; 2] = [Direction::Clockwise, Direction::CounterClockwise];

    /// path label, `c` or `cc`
    pub fn label(self) -> &'static str {
        match self {
            Direction::Clockwise => "c",
            Direction::CounterClockwise => "cc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameters of one move
///
/// `move_width` counts angle steps, `move_velocity` is steps per second and
/// `end_angle` is where the sweep is anchored, in centidegrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDescriptor {
    pub move_width: u32,
    pub move_velocity: u32,
    pub end_angle: u32,
    pub direction: Direction,
}

impl MoveDescriptor {
    /// Validate caller-supplied move parameters
    pub fn new(
        move_width: i64,
        move_velocity: i64,
        end_angle: i64,
        direction: Direction,
    ) -> DxxResult<Self> {
        if move_width <= 0 || move_width >= i64::from(FULL_CIRCLE) {
            return Err(DxxError::InvalidArgument(format!(
                "move width must be in 1..{FULL_CIRCLE}, got {move_width}"
            )));
        }
        if move_velocity <= 0 || move_velocity > i64::from(u32::MAX) {
            return Err(DxxError::InvalidArgument(format!(
                "move velocity must be positive, got {move_velocity}"
            )));
        }
        if !(0..i64::from(FULL_CIRCLE)).contains(&end_angle) {
            return Err(DxxError::InvalidArgument(format!(
                "end angle must be in 0..{FULL_CIRCLE}, got {end_angle}"
            )));
        }

        Ok(MoveDescriptor {
            move_width: move_width as u32,
            move_velocity: move_velocity as u32,
            end_angle: end_angle as u32,
            direction,
        })
    }

    /// Same move, other direction
    pub fn with_direction(self, direction: Direction) -> Self {
        MoveDescriptor { direction, ..self }
    }

    /// Move duration in whole milliseconds
    pub fn move_time_ms(&self) -> u64 {
        (f64::from(self.move_width) * 1000.0 / f64::from(self.move_velocity)) as u64
    }

    /// Move duration in samples at `sampling_rate` Hz
    pub fn move_samples(&self, sampling_rate: u32) -> usize {
        (self.move_time_ms() * u64::from(sampling_rate) / 1000) as usize
    }

    /// Absolute lookup angle of step `step`
    ///
    /// A sawtooth counter over `2 * width * substeps` is folded into a
    /// triangle wave, mirrored for counter-clockwise moves, divided back down
    /// to whole steps and anchored at `end_angle`. `substeps` is 1 for
    /// overlap-add and 2 for the windowed renderer, which visits half steps.
    pub fn step_angle(&self, step: usize, substeps: u32) -> u32 {
        let span = i64::from(self.move_width) * i64::from(substeps);
        let mut angle = (step as i64) % (span * 2);
        if angle > span {
            angle = span * 2 - angle;
        }
        if self.direction == Direction::CounterClockwise {
            angle = -angle;
        }
        angle /= i64::from(substeps);
        let offset = angle.rem_euclid(i64::from(FULL_CIRCLE));
        ((i64::from(self.end_angle) + offset) % i64::from(FULL_CIRCLE)) as u32
    }
}
