/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info, warn};
use std::sync::Arc;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::queue::Target;
use crate::elevator::unit::ElevatorUnit;
use crate::shared::{Direction, ElevatorState, Floor};

/***************************************/
/*       Public data structures        */
/***************************************/

/// Simulated interval the car spends between two steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delay {
    FloorTravel,
    DoorOpen,
}

/// What the control loop has to wait for before the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Immediate,
    Wait(Delay),
    AwaitRequest,
}

/// Physical situation of the car.
///
/// A car halted mid-route to serve a floor on its way stays `Moving` with
/// `paused` set; it is reported as `Idle` until it resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Idle,
    Moving { direction: Direction, paused: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Select,
    Advance { target: Floor },
    Halted { target: Floor, boarded: bool },
    Resuming { target: Floor, boarded: bool },
    Landing,
    Docked,
}

/**
 * Elevator control loop, one step at a time.
 *
 * Each call to `step` performs the work between two waits and returns the
 * wait that must follow. The controller never sleeps or blocks itself; the
 * `ElevatorRunner` performs the waits on the elevator's thread, and tests
 * drive `step` directly.
 *
 * Cycle for one trip:
 * 1. Select a target (head of queue when idle, nearest floor ahead when moving).
 *    Requests at the current floor are dropped without moving.
 * 2. Move one floor per step, clearing every request at each floor passed.
 *    Serving a floor before the target halts the car for two door intervals,
 *    reported idle in between, then resumes toward the same target.
 * 3. At the target, report idle, wait one door interval and purge the floor.
 *
 * # Fields
 * - `unit`:    Shared elevator the controller drives.
 * - `floor`:   Car position; published through the unit on every change.
 * - `motion`:  Current motion, from which the reported state is derived.
 * - `phase`:   Where in the cycle the next step resumes.
 */
pub struct Controller {
    unit: Arc<ElevatorUnit>,
    floor: Floor,
    motion: Motion,
    phase: Phase,
}

/***************************************/
/*             Public API              */
/***************************************/
impl Motion {
    pub fn state(&self) -> ElevatorState {
        match *self {
            Motion::Idle => ElevatorState::Idle,
            Motion::Moving { paused: true, .. } => ElevatorState::Idle,
            Motion::Moving { direction, .. } => direction.into(),
        }
    }

    fn with_paused(self, paused: bool) -> Motion {
        match self {
            Motion::Moving { direction, .. } => Motion::Moving { direction, paused },
            Motion::Idle => Motion::Idle,
        }
    }
}

impl Controller {
    pub fn new(unit: Arc<ElevatorUnit>) -> Controller {
        let floor = unit.current_floor();
        Controller {
            unit,
            floor,
            motion: Motion::Idle,
            phase: Phase::Select,
        }
    }

    pub fn unit(&self) -> &Arc<ElevatorUnit> {
        &self.unit
    }

    pub fn floor(&self) -> Floor {
        self.floor
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn step(&mut self) -> Tick {
        match self.phase {
            Phase::Select => self.select_target(),
            Phase::Advance { target } => self.advance(target),
            Phase::Halted { target, boarded } => {
                self.motion = self.motion.with_paused(true);
                self.publish();
                self.phase = Phase::Resuming { target, boarded };
                Tick::Wait(Delay::DoorOpen)
            }
            Phase::Resuming { target, boarded } => {
                self.motion = self.motion.with_paused(false);
                self.publish();
                self.leave_floor(target, boarded)
            }
            Phase::Landing => {
                info!("Elevator {} arrived at floor {}", self.unit.id(), self.floor);
                self.motion = Motion::Idle;
                self.publish();
                self.phase = Phase::Docked;
                Tick::Wait(Delay::DoorOpen)
            }
            Phase::Docked => {
                self.unit.queue().purge_floor(self.floor);
                self.phase = Phase::Select;
                Tick::Immediate
            }
        }
    }

    /***************************************/
    /*          Private helpers            */
    /***************************************/
    fn select_target(&mut self) -> Tick {
        loop {
            let next = self.unit.queue().next_target(self.motion.state(), self.floor);
            let target = match next {
                Some(target) => target,
                None => {
                    self.motion = Motion::Idle;
                    self.publish();
                    debug!("Elevator {} waits", self.unit.id());
                    return Tick::AwaitRequest;
                }
            };
            if let Target::Behind(floor) = target {
                warn!(
                    "Elevator {} has nothing ahead while {} at floor {}, turning back to floor {}",
                    self.unit.id(),
                    self.motion.state(),
                    self.floor,
                    floor
                );
            }
            let target = target.floor();

            if target == self.floor {
                self.unit.queue().remove_first_at(target);
                continue;
            }

            let direction = Direction::towards(self.floor, target);
            self.motion = Motion::Moving {
                direction,
                paused: false,
            };
            self.publish();
            info!(
                "Elevator {} moving from {} to {}",
                self.unit.id(),
                self.floor,
                target
            );
            self.phase = Phase::Advance { target };
            return Tick::Immediate;
        }
    }

    fn advance(&mut self, target: Floor) -> Tick {
        self.floor = Direction::towards(self.floor, target).step(self.floor);
        self.publish();

        let drained = self.unit.queue().drain_floor(self.floor);
        if drained.removed && self.floor != target {
            debug!(
                "Elevator {} stopping at floor {} on the way to {}",
                self.unit.id(),
                self.floor,
                target
            );
            self.phase = Phase::Halted {
                target,
                boarded: drained.boarded,
            };
            return Tick::Wait(Delay::DoorOpen);
        }
        self.leave_floor(target, drained.boarded)
    }

    fn leave_floor(&mut self, target: Floor, boarded: bool) -> Tick {
        if boarded {
            self.unit.notify_person_entered(self.floor);
        }
        self.phase = if self.floor == target {
            Phase::Landing
        } else {
            Phase::Advance { target }
        };
        Tick::Wait(Delay::FloorTravel)
    }

    fn publish(&self) {
        self.unit.set_status(self.floor, self.motion.state());
    }
}
