/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
pub type Floor = i32;

/// 1-based, stable for the lifetime of the building.
pub type ElevatorId = usize;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorRange {
    pub bottom: Floor,
    pub top: Floor,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorState {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "movingUp")]
    MovingUp,
    #[serde(rename = "movingDown")]
    MovingDown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    #[serde(rename = "callFromOutside")]
    CallFromOutside,
    #[serde(rename = "destinationFromInside")]
    DestinationFromInside,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub floor: Floor,
    pub kind: RequestKind,
}

/// Point-in-time view of one elevator, as seen by the dispatcher.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElevatorSnapshot {
    pub id: ElevatorId,
    pub floor: Floor,
    pub state: ElevatorState,
    #[serde(rename = "highestPending")]
    pub highest_pending: Floor,
    #[serde(rename = "lowestPending")]
    pub lowest_pending: Floor,
    pub pending: Vec<Request>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum ElevatorEvent {
    #[serde(rename = "statusChanged")]
    StatusChanged {
        #[serde(rename = "elevatorId")]
        elevator_id: ElevatorId,
        floor: Floor,
        state: ElevatorState,
    },
    #[serde(rename = "personEntered")]
    PersonEntered {
        #[serde(rename = "elevatorId")]
        elevator_id: ElevatorId,
        floor: Floor,
    },
}

/***************************************/
/*          Implementations            */
/***************************************/
impl FloorRange {
    pub fn new(bottom: Floor, top: Floor) -> FloorRange {
        FloorRange { bottom, top }
    }

    pub fn contains(&self, floor: Floor) -> bool {
        (self.bottom..=self.top).contains(&floor)
    }

    pub fn floors(&self) -> std::ops::RangeInclusive<Floor> {
        self.bottom..=self.top
    }
}

impl Direction {
    pub fn towards(from: Floor, to: Floor) -> Direction {
        if to > from {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    pub fn step(&self, floor: Floor) -> Floor {
        match self {
            Direction::Up => floor + 1,
            Direction::Down => floor - 1,
        }
    }
}

impl From<Direction> for ElevatorState {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => ElevatorState::MovingUp,
            Direction::Down => ElevatorState::MovingDown,
        }
    }
}

impl fmt::Display for ElevatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevatorState::Idle => write!(f, "idle"),
            ElevatorState::MovingUp => write!(f, "moving up"),
            ElevatorState::MovingDown => write!(f, "moving down"),
        }
    }
}

impl Request {
    pub fn call(floor: Floor) -> Request {
        Request {
            floor,
            kind: RequestKind::CallFromOutside,
        }
    }

    pub fn destination(floor: Floor) -> Request {
        Request {
            floor,
            kind: RequestKind::DestinationFromInside,
        }
    }

    pub fn boards_passenger(&self) -> bool {
        self.kind == RequestKind::DestinationFromInside
    }
}
