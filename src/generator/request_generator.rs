/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info, warn};
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::thread::sleep;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::building::Building;
use crate::config::GeneratorConfig;
use crate::elevator::ElevatorListener;
use crate::shared::{ElevatorId, ElevatorState, Floor, FloorRange, Request, RequestKind};

/**
 * Synthetic load for the building.
 *
 * `run` issues random floor calls at a fixed pace, some of them as in-car
 * destinations for a random elevator. Every boarding reported by an elevator
 * is answered with a destination request for a random other floor in that
 * elevator. Both draw from the same request budget, so the load always ends.
 *
 * Holds the building weakly since the building holds the generator as a
 * listener.
 *
 * # Fields
 * - `building`:            Target of the generated requests.
 * - `range`:               Floors requests are drawn from.
 * - `remaining`:           Requests left in the budget.
 * - `request_interval`:    Pause between two generated calls.
 * - `destination_ratio`:   Share of generated requests issued as destinations.
 */
pub struct RequestGenerator {
    building: Weak<Building>,
    range: FloorRange,
    remaining: AtomicUsize,
    request_interval: Duration,
    destination_ratio: f64,
}

impl RequestGenerator {
    pub fn new(building: &Arc<Building>, config: &GeneratorConfig) -> RequestGenerator {
        RequestGenerator {
            building: Arc::downgrade(building),
            range: building.range(),
            remaining: AtomicUsize::new(config.max_requests),
            request_interval: Duration::from_millis(config.request_interval),
            destination_ratio: config.destination_ratio,
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::SeqCst)
    }

    pub fn run(&self) {
        info!("Request generator started with {} requests", self.remaining());
        while self.take_one() {
            let building = match self.building.upgrade() {
                Some(building) => building,
                None => break,
            };
            self.issue_random_request(&building);
            drop(building);
            sleep(self.request_interval);
        }
        info!("Request generator finished");
    }

    fn issue_random_request(&self, building: &Building) {
        let mut rng = rand::thread_rng();
        let floor = rng.gen_range(self.range.bottom..=self.range.top);
        let elevators = building.elevators().len();

        let result = if elevators > 0 && rng.gen_bool(self.destination_ratio) {
            let elevator_id = rng.gen_range(1..=elevators);
            building
                .request_elevator_for(floor, RequestKind::DestinationFromInside, elevator_id)
                .map(|_| ())
        } else {
            building.request_elevator(floor).map(|_| ())
        };
        if let Err(e) = result {
            warn!("Generated request rejected: {}", e);
        }
    }

    fn take_one(&self) -> bool {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

/// Random floor in `range` other than `floor`, if there is one.
pub fn other_floor<R: Rng>(rng: &mut R, range: FloorRange, floor: Floor) -> Option<Floor> {
    if range.bottom >= range.top {
        return None;
    }
    let pick = rng.gen_range(range.bottom..range.top);
    Some(if pick >= floor { pick + 1 } else { pick })
}

impl ElevatorListener for RequestGenerator {
    fn on_elevator_status_change(&self, _elevator_id: ElevatorId, _floor: Floor, _state: ElevatorState) {}

    fn on_person_entered(&self, elevator_id: ElevatorId, floor: Floor) {
        let destination = match other_floor(&mut rand::thread_rng(), self.range, floor) {
            Some(destination) => destination,
            None => return,
        };
        let building = match self.building.upgrade() {
            Some(building) => building,
            None => return,
        };
        if !self.take_one() {
            debug!("Request budget spent, passenger at floor {} stays put", floor);
            return;
        }

        match building.elevator(elevator_id) {
            Ok(elevator) => {
                elevator.submit_request(Request::destination(destination));
            }
            Err(e) => warn!("Passenger destination rejected: {}", e),
        }
    }
}
