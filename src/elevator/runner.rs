use crossbeam_channel as cbc;
use log::info;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ElevatorConfig;
use crate::elevator::controller::{Controller, Delay, Tick};
use crate::elevator::unit::ElevatorUnit;

/**
 * Runs a `Controller` on the elevator's own thread.
 *
 * Every wait the controller asks for is a cancellation point: the loop ends as
 * soon as `terminate_rx` yields a message or is disconnected, leaving the car
 * at whatever floor it last published.
 *
 * # Fields
 * - `controller`:          Step function for the car.
 * - `wake_rx`:             Posted to whenever a request is accepted.
 * - `terminate_rx`:        Stop signal shared by every elevator in the building.
 * - `floor_travel_time`:   Time spent between two floors.
 * - `door_open_time`:      Time spent per door interval.
 */
pub struct ElevatorRunner {
    controller: Controller,
    wake_rx: cbc::Receiver<()>,
    terminate_rx: cbc::Receiver<()>,
    floor_travel_time: Duration,
    door_open_time: Duration,
}

impl ElevatorRunner {
    pub fn new(
        unit: Arc<ElevatorUnit>,
        config: &ElevatorConfig,
        terminate_rx: cbc::Receiver<()>,
    ) -> ElevatorRunner {
        ElevatorRunner {
            wake_rx: unit.wake_rx(),
            controller: Controller::new(unit),
            terminate_rx,
            floor_travel_time: config.floor_travel_duration(),
            door_open_time: config.door_open_duration(),
        }
    }

    pub fn run(mut self) {
        let id = self.controller.unit().id();
        info!("Elevator {} has started", id);

        loop {
            let keep_running = match self.controller.step() {
                Tick::Immediate => true,
                Tick::Wait(delay) => self.pause(delay),
                Tick::AwaitRequest => self.await_request(),
            };
            if !keep_running {
                break;
            }
        }

        info!(
            "Elevator {} stopped at floor {} ({})",
            id,
            self.controller.floor(),
            self.controller.motion().state()
        );
    }

    fn pause(&self, delay: Delay) -> bool {
        let duration = match delay {
            Delay::FloorTravel => self.floor_travel_time,
            Delay::DoorOpen => self.door_open_time,
        };
        matches!(
            self.terminate_rx.recv_timeout(duration),
            Err(cbc::RecvTimeoutError::Timeout)
        )
    }

    fn await_request(&self) -> bool {
        cbc::select! {
            recv(self.wake_rx) -> wake => wake.is_ok(),
            recv(self.terminate_rx) -> _ => false,
        }
    }
}
