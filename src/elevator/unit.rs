/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, warn};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::listener::ElevatorListener;
use crate::elevator::queue::RequestQueue;
use crate::shared::{ElevatorId, ElevatorSnapshot, ElevatorState, Floor, FloorRange, Request};

/**
 * One elevator car: its published status, its request queue and the
 * listeners interested in it.
 *
 * The unit is shared between its control loop (see `Controller`) and any
 * thread that submits requests or reads snapshots. Only the control loop
 * changes floor and state.
 *
 * # Fields
 * - `id`:          1-based, stable position in the building.
 * - `range`:       Floors the car may visit.
 * - `queue`:       Pending requests, guarded by its own lock.
 * - `status`:      Last published floor and state.
 * - `listeners`:   Registered event receivers.
 * - `wake_tx`:     Single-slot wake signal, posted after every accepted request.
 * - `wake_rx`:     Read end of the wake signal, consumed by the control loop.
 */
pub struct ElevatorUnit {
    id: ElevatorId,
    range: FloorRange,
    queue: RequestQueue,
    status: Mutex<Status>,
    listeners: RwLock<Vec<Arc<dyn ElevatorListener>>>,
    wake_tx: cbc::Sender<()>,
    wake_rx: cbc::Receiver<()>,
}

#[derive(Debug, Clone, Copy)]
struct Status {
    floor: Floor,
    state: ElevatorState,
}

impl ElevatorUnit {
    pub(crate) fn new(id: ElevatorId, range: FloorRange) -> ElevatorUnit {
        let (wake_tx, wake_rx) = cbc::bounded::<()>(1);
        ElevatorUnit {
            id,
            range,
            queue: RequestQueue::new(),
            status: Mutex::new(Status {
                floor: range.bottom,
                state: ElevatorState::Idle,
            }),
            listeners: RwLock::new(Vec::new()),
            wake_tx,
            wake_rx,
        }
    }

    pub fn id(&self) -> ElevatorId {
        self.id
    }

    /// Queues `request` and wakes the control loop.
    ///
    /// Returns `false` when the request was dropped, either because the head
    /// of the queue already targets the same floor or because the floor is
    /// outside the building.
    pub fn submit_request(&self, request: Request) -> bool {
        if !self.range.contains(request.floor) {
            warn!(
                "Elevator {} ignored request for floor {} outside {}..={}",
                self.id, request.floor, self.range.bottom, self.range.top
            );
            return false;
        }
        if !self.queue.push(request) {
            debug!("Elevator {} already heading to floor {}", self.id, request.floor);
            return false;
        }
        debug!("Request added to Elevator {}: {:?}", self.id, request);

        // Full means a wake-up is already pending
        let _ = self.wake_tx.try_send(());
        true
    }

    pub fn current_floor(&self) -> Floor {
        self.status().floor
    }

    pub fn state(&self) -> ElevatorState {
        self.status().state
    }

    pub fn highest_pending_floor(&self) -> Floor {
        self.queue.highest_floor(self.range.top)
    }

    pub fn lowest_pending_floor(&self) -> Floor {
        self.queue.lowest_floor(self.range.bottom)
    }

    pub fn pending_requests(&self) -> Vec<Request> {
        self.queue.snapshot()
    }

    pub fn snapshot(&self) -> ElevatorSnapshot {
        let status = self.status();
        ElevatorSnapshot {
            id: self.id,
            floor: status.floor,
            state: status.state,
            highest_pending: self.highest_pending_floor(),
            lowest_pending: self.lowest_pending_floor(),
            pending: self.pending_requests(),
        }
    }

    pub fn is_quiescent(&self) -> bool {
        self.state() == ElevatorState::Idle && self.queue.is_empty()
    }

    pub fn add_listener(&self, listener: Arc<dyn ElevatorListener>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /***************************************/
    /*       Control loop interface        */
    /***************************************/
    pub(crate) fn queue(&self) -> &RequestQueue {
        &self.queue
    }

    pub(crate) fn wake_rx(&self) -> cbc::Receiver<()> {
        self.wake_rx.clone()
    }

    /// Publishes a new floor/state pair and notifies every listener.
    pub(crate) fn set_status(&self, floor: Floor, state: ElevatorState) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = Status { floor, state };
        for listener in self.listeners() {
            listener.on_elevator_status_change(self.id, floor, state);
        }
    }

    pub(crate) fn notify_person_entered(&self, floor: Floor) {
        for listener in self.listeners() {
            listener.on_person_entered(self.id, floor);
        }
    }

    fn status(&self) -> Status {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Copied out so no lock is held while callbacks run
    fn listeners(&self) -> Vec<Arc<dyn ElevatorListener>> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
