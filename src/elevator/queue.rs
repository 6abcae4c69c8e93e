/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{ElevatorState, Floor, Request};

/***************************************/
/*       Public data structures        */
/***************************************/

/// Outcome of clearing every request at one floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Drained {
    pub removed: bool,
    pub boarded: bool,
}

/// Floor chosen as the next stop.
///
/// `Behind` means the directional filter came up empty and the pick was made
/// against the current direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Ahead(Floor),
    Behind(Floor),
}

/**
 * Pending requests for one elevator.
 *
 * Every read and write goes through a single lock scoped to this queue, so
 * the owning control loop and any number of submitting threads can share it.
 * Insertion order is kept: the head is the oldest accepted request.
 */
#[derive(Debug, Default)]
pub struct RequestQueue {
    requests: Mutex<VecDeque<Request>>,
}

/***************************************/
/*             Public API              */
/***************************************/
impl Target {
    pub fn floor(&self) -> Floor {
        match *self {
            Target::Ahead(floor) | Target::Behind(floor) => floor,
        }
    }
}

impl RequestQueue {
    pub fn new() -> RequestQueue {
        RequestQueue {
            requests: Mutex::new(VecDeque::new()),
        }
    }

    /// Appends `request` unless the current head targets the same floor.
    /// Only the head is compared; repeats further back are kept.
    pub fn push(&self, request: Request) -> bool {
        let mut requests = self.lock();
        if requests.front().map(|head| head.floor) == Some(request.floor) {
            return false;
        }
        requests.push_back(request);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn snapshot(&self) -> Vec<Request> {
        self.lock().iter().copied().collect()
    }

    pub fn highest_floor(&self, default: Floor) -> Floor {
        self.lock().iter().map(|r| r.floor).max().unwrap_or(default)
    }

    pub fn lowest_floor(&self, default: Floor) -> Floor {
        self.lock().iter().map(|r| r.floor).min().unwrap_or(default)
    }

    pub fn next_target(&self, state: ElevatorState, current_floor: Floor) -> Option<Target> {
        select_target(&self.lock(), state, current_floor)
    }

    /// Removes the oldest request for `floor`.
    pub fn remove_first_at(&self, floor: Floor) -> bool {
        let mut requests = self.lock();
        match requests.iter().position(|r| r.floor == floor) {
            Some(index) => requests.remove(index).is_some(),
            None => false,
        }
    }

    /// Clears all requests for `floor` in one critical section.
    pub fn drain_floor(&self, floor: Floor) -> Drained {
        let mut requests = self.lock();
        let boarded = requests
            .iter()
            .any(|r| r.floor == floor && r.boards_passenger());
        let before = requests.len();
        requests.retain(|r| r.floor != floor);
        Drained {
            removed: requests.len() != before,
            boarded,
        }
    }

    /// Like `drain_floor` but only reports how many were dropped.
    pub fn purge_floor(&self, floor: Floor) -> usize {
        let mut requests = self.lock();
        let before = requests.len();
        requests.retain(|r| r.floor != floor);
        before - requests.len()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Request>> {
        // Plain values with no multi-step updates, so a poisoned queue is still consistent
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/**
 * Picks the next floor to visit.
 *
 * - Idle: the head of the queue.
 * - Moving up: the lowest queued floor at or above the car.
 * - Moving down: the highest queued floor at or below the car.
 *
 * When a moving car has nothing left ahead of it, the nearest floor behind it
 * is returned as `Target::Behind`.
 */
pub fn select_target(
    requests: &VecDeque<Request>,
    state: ElevatorState,
    current_floor: Floor,
) -> Option<Target> {
    let head = requests.front()?;
    let floors = || requests.iter().map(|r| r.floor);

    match state {
        ElevatorState::Idle => Some(Target::Ahead(head.floor)),
        ElevatorState::MovingUp => floors()
            .filter(|&f| f >= current_floor)
            .min()
            .map(Target::Ahead)
            .or_else(|| floors().filter(|&f| f <= current_floor).max().map(Target::Behind)),
        ElevatorState::MovingDown => floors()
            .filter(|&f| f <= current_floor)
            .max()
            .map(Target::Ahead)
            .or_else(|| floors().filter(|&f| f >= current_floor).min().map(Target::Behind)),
    }
}
