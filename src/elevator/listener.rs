use crossbeam_channel as cbc;

use crate::shared::{ElevatorEvent, ElevatorId, ElevatorState, Floor};

/**
 * Receiver of elevator notifications.
 *
 * Callbacks run synchronously on the elevator's own thread, with no queue or
 * status lock held, so an implementation may submit new requests from inside
 * a callback. Keep them short: the car does not move while a callback runs.
 */
pub trait ElevatorListener: Send + Sync {
    /// Fired on every floor step and every state transition.
    fn on_elevator_status_change(&self, elevator_id: ElevatorId, floor: Floor, state: ElevatorState);

    /// Fired when an in-car destination request is served at `floor`.
    fn on_person_entered(&self, elevator_id: ElevatorId, floor: Floor);
}

/// Forwards every notification as an `ElevatorEvent` over a channel.
pub struct ChannelListener {
    event_tx: cbc::Sender<ElevatorEvent>,
}

impl ChannelListener {
    pub fn new(event_tx: cbc::Sender<ElevatorEvent>) -> ChannelListener {
        ChannelListener { event_tx }
    }
}

impl ElevatorListener for ChannelListener {
    fn on_elevator_status_change(&self, elevator_id: ElevatorId, floor: Floor, state: ElevatorState) {
        // A dropped receiver only means nobody is watching anymore
        let _ = self.event_tx.send(ElevatorEvent::StatusChanged {
            elevator_id,
            floor,
            state,
        });
    }

    fn on_person_entered(&self, elevator_id: ElevatorId, floor: Floor) {
        let _ = self
            .event_tx
            .send(ElevatorEvent::PersonEntered { elevator_id, floor });
    }
}
