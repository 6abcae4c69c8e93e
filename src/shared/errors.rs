use std::fmt;

use crate::shared::{ElevatorId, Floor, FloorRange};

/// Rejections from the building's request entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    InvalidElevatorId { id: ElevatorId, elevators: usize },
    FloorOutOfRange { floor: Floor, range: FloorRange },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::InvalidElevatorId { id, elevators } => write!(
                f,
                "elevator {} does not exist (building has elevators 1..={})",
                id, elevators
            ),
            DispatchError::FloorOutOfRange { floor, range } => write!(
                f,
                "floor {} is outside the building ({}..={})",
                floor, range.bottom, range.top
            ),
        }
    }
}

impl std::error::Error for DispatchError {}
