/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{ElevatorId, ElevatorSnapshot, ElevatorState, Floor};

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Estimated number of floors `elevator` must travel before it can serve a
 * call at `floor`.
 *
 * A car moving away from the call is charged for finishing its sweep to the
 * furthest queued floor in its direction and coming back. Nothing past that
 * queued extreme is considered.
 */
pub fn effective_distance(elevator: &ElevatorSnapshot, floor: Floor) -> u32 {
    let current = elevator.floor;
    match elevator.state {
        ElevatorState::Idle => current.abs_diff(floor),
        ElevatorState::MovingUp if floor >= current => current.abs_diff(floor),
        ElevatorState::MovingUp => {
            let highest = elevator.highest_pending;
            highest.abs_diff(current) + highest.abs_diff(floor)
        }
        ElevatorState::MovingDown if floor <= current => current.abs_diff(floor),
        ElevatorState::MovingDown => {
            let lowest = elevator.lowest_pending;
            current.abs_diff(lowest) + floor.abs_diff(lowest)
        }
    }
}

/// Id of the elevator with the strictly smallest effective distance.
/// The first one listed wins a tie; `None` only for an empty bank.
pub fn best_elevator(elevators: &[ElevatorSnapshot], floor: Floor) -> Option<ElevatorId> {
    let mut best: Option<(ElevatorId, u32)> = None;
    for elevator in elevators {
        let distance = effective_distance(elevator, floor);
        match best {
            Some((_, min_distance)) if distance >= min_distance => {}
            _ => best = Some((elevator.id, distance)),
        }
    }
    best.map(|(id, _)| id)
}
