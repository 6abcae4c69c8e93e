/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{Builder, JoinHandle};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::building::dispatch;
use crate::config::{BuildingConfig, ElevatorConfig};
use crate::elevator::{ElevatorListener, ElevatorRunner, ElevatorUnit};
use crate::shared::{
    DispatchError, ElevatorId, ElevatorSnapshot, Floor, FloorRange, Request, RequestKind,
};

/**
 * The bank of elevators and the dispatcher in front of it.
 *
 * Every elevator is created here, gets its own `elevator_<id>` thread, and
 * lives until `shutdown` (or drop). The collection never changes size, and
 * elevator ids are positions in it, starting at 1.
 *
 * # Fields
 * - `range`:           Floors served by the building.
 * - `elevators`:       Units in id order.
 * - `terminate_tx`:    Dropped on shutdown; every runner watches the read end.
 * - `threads`:         Join handles for the elevator threads.
 */
pub struct Building {
    range: FloorRange,
    elevators: Vec<Arc<ElevatorUnit>>,
    terminate_tx: Mutex<Option<cbc::Sender<()>>>,
    threads: Mutex<Vec<JoinHandle<()>>>,
}

impl Building {
    pub fn new(config: &BuildingConfig, elevator_config: &ElevatorConfig) -> std::io::Result<Building> {
        let range = FloorRange::new(config.bottom_floor, config.top_floor);
        let (terminate_tx, terminate_rx) = cbc::bounded::<()>(0);

        let mut elevators = Vec::with_capacity(config.elevators);
        let mut threads = Vec::with_capacity(config.elevators);
        for id in 1..=config.elevators {
            let unit = Arc::new(ElevatorUnit::new(id, range));
            let runner = ElevatorRunner::new(Arc::clone(&unit), elevator_config, terminate_rx.clone());

            let elevator_thread = Builder::new().name(format!("elevator_{}", id));
            threads.push(elevator_thread.spawn(move || runner.run())?);
            elevators.push(unit);
        }

        info!(
            "Building ready with {} elevators serving floors {}..={}",
            elevators.len(),
            range.bottom,
            range.top
        );

        Ok(Building {
            range,
            elevators,
            terminate_tx: Mutex::new(Some(terminate_tx)),
            threads: Mutex::new(threads),
        })
    }

    pub fn range(&self) -> FloorRange {
        self.range
    }

    pub fn elevators(&self) -> &[Arc<ElevatorUnit>] {
        &self.elevators
    }

    pub fn elevator(&self, id: ElevatorId) -> Result<&Arc<ElevatorUnit>, DispatchError> {
        id.checked_sub(1)
            .and_then(|index| self.elevators.get(index))
            .ok_or(DispatchError::InvalidElevatorId {
                id,
                elevators: self.elevators.len(),
            })
    }

    pub fn add_listener(&self, listener: Arc<dyn ElevatorListener>) {
        for elevator in &self.elevators {
            elevator.add_listener(Arc::clone(&listener));
        }
    }

    pub fn add_listeners<I>(&self, listeners: I)
    where
        I: IntoIterator<Item = Arc<dyn ElevatorListener>>,
    {
        for listener in listeners {
            self.add_listener(listener);
        }
    }

    pub fn snapshots(&self) -> Vec<ElevatorSnapshot> {
        self.elevators.iter().map(|e| e.snapshot()).collect()
    }

    /// Sends a call from `floor` to the elevator with the lowest effective
    /// distance and returns its id. An empty bank drops the call.
    pub fn request_elevator(&self, floor: Floor) -> Result<Option<ElevatorId>, DispatchError> {
        self.check_floor(floor)?;

        let best = dispatch::best_elevator(&self.snapshots(), floor);
        match best {
            Some(id) => {
                debug!("Call from floor {} assigned to elevator {}", floor, id);
                self.elevator(id)?.submit_request(Request::call(floor));
            }
            None => warn!("No elevators to answer call from floor {}", floor),
        }
        Ok(best)
    }

    /// Routes a request straight to `elevator_id`, skipping the dispatcher.
    /// Returns whether the elevator queued it.
    pub fn request_elevator_for(
        &self,
        floor: Floor,
        kind: RequestKind,
        elevator_id: ElevatorId,
    ) -> Result<bool, DispatchError> {
        self.check_floor(floor)?;
        let elevator = self.elevator(elevator_id)?;
        Ok(elevator.submit_request(Request { floor, kind }))
    }

    pub fn is_quiescent(&self) -> bool {
        self.elevators.iter().all(|e| e.is_quiescent())
    }

    /// Stops every control loop and waits for the threads to exit.
    pub fn shutdown(&self) {
        let terminate_tx = self
            .terminate_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if terminate_tx.is_none() {
            return;
        }
        drop(terminate_tx);

        let threads: Vec<JoinHandle<()>> = self
            .threads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        let current = std::thread::current().id();
        for thread in threads {
            // A listener holding the last reference can end up dropping us from an elevator thread
            if thread.thread().id() == current {
                continue;
            }
            if thread.join().is_err() {
                warn!("An elevator thread panicked before shutdown");
            }
        }
        info!("Building shut down");
    }

    fn check_floor(&self, floor: Floor) -> Result<(), DispatchError> {
        if self.range.contains(floor) {
            Ok(())
        } else {
            Err(DispatchError::FloorOutOfRange {
                floor,
                range: self.range,
            })
        }
    }
}

impl Drop for Building {
    fn drop(&mut self) {
        self.shutdown();
    }
}
