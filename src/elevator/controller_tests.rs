/*
 * Unit tests for the elevator controller
 *
 * The unit tests follows the Arrange, Act, Assert pattern. The controller is
 * stepped by hand, so no test waits on real time.
 *
 * Tests:
 *  - test_controller_waits_when_queue_empty
 *  - test_controller_drops_request_at_current_floor
 *  - test_controller_single_trip
 *  - test_controller_serves_floor_on_the_way
 *  - test_controller_stop_and_continue_keeps_direction
 *  - test_controller_boarding_event
 *  - test_controller_no_boarding_for_calls
 *  - test_controller_arrival_invariant
 *  - test_controller_range_invariant
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod controller_tests {
    use crate::elevator::controller::{Controller, Delay, Motion, Tick};
    use crate::elevator::{ChannelListener, ElevatorUnit};
    use crate::shared::ElevatorState::{self, Idle, MovingDown, MovingUp};
    use crate::shared::{Direction, ElevatorEvent, Floor, FloorRange, Request};
    use crossbeam_channel::{unbounded, Receiver};
    use std::sync::Arc;

    const MAX_STEPS: usize = 1000;

    fn setup_controller(range: FloorRange) -> (Controller, Arc<ElevatorUnit>, Receiver<ElevatorEvent>) {
        // Arrange mock listener
        let unit = Arc::new(ElevatorUnit::new(1, range));
        let (event_tx, event_rx) = unbounded::<ElevatorEvent>();
        unit.add_listener(Arc::new(ChannelListener::new(event_tx)));

        (Controller::new(Arc::clone(&unit)), unit, event_rx)
    }

    fn run_until_waiting(controller: &mut Controller) -> Vec<Tick> {
        let mut ticks = Vec::new();
        for _ in 0..MAX_STEPS {
            let tick = controller.step();
            ticks.push(tick);
            if tick == Tick::AwaitRequest {
                return ticks;
            }
        }
        panic!("Controller did not settle within {} steps", MAX_STEPS);
    }

    fn statuses(event_rx: &Receiver<ElevatorEvent>, boardings: &mut Vec<Floor>) -> Vec<(Floor, ElevatorState)> {
        let mut statuses = Vec::new();
        for event in event_rx.try_iter() {
            match event {
                ElevatorEvent::StatusChanged { floor, state, .. } => statuses.push((floor, state)),
                ElevatorEvent::PersonEntered { floor, .. } => boardings.push(floor),
            }
        }
        statuses
    }

    #[test]
    fn test_controller_waits_when_queue_empty() {
        // Arrange
        let (mut controller, _unit, event_rx) = setup_controller(FloorRange::new(0, 9));

        // Act
        let tick = controller.step();

        // Assert
        let mut boardings = Vec::new();
        assert_eq!(tick, Tick::AwaitRequest);
        assert_eq!(statuses(&event_rx, &mut boardings), vec![(0, Idle)]);
        assert!(boardings.is_empty());
    }

    #[test]
    fn test_controller_drops_request_at_current_floor() {
        // Arrange
        let (mut controller, unit, event_rx) = setup_controller(FloorRange::new(0, 9));
        unit.submit_request(Request::destination(0));

        // Act
        let tick = controller.step();

        // Assert
        let mut boardings = Vec::new();
        assert_eq!(tick, Tick::AwaitRequest);
        assert_eq!(statuses(&event_rx, &mut boardings), vec![(0, Idle)]);
        assert!(boardings.is_empty());
        assert!(unit.pending_requests().is_empty());
    }

    #[test]
    fn test_controller_single_trip() {
        // Arrange
        let (mut controller, unit, event_rx) = setup_controller(FloorRange::new(0, 9));
        unit.submit_request(Request::call(3));

        // Act
        let ticks = run_until_waiting(&mut controller);

        // Assert
        let mut boardings = Vec::new();
        assert_eq!(
            ticks,
            vec![
                Tick::Immediate,
                Tick::Wait(Delay::FloorTravel),
                Tick::Wait(Delay::FloorTravel),
                Tick::Wait(Delay::FloorTravel),
                Tick::Wait(Delay::DoorOpen),
                Tick::Immediate,
                Tick::AwaitRequest,
            ]
        );
        assert_eq!(
            statuses(&event_rx, &mut boardings),
            vec![
                (0, MovingUp),
                (1, MovingUp),
                (2, MovingUp),
                (3, MovingUp),
                (3, Idle),
                (3, Idle),
            ]
        );
        assert!(boardings.is_empty());
        assert_eq!(unit.current_floor(), 3);
        assert_eq!(unit.state(), Idle);
    }

    #[test]
    fn test_controller_serves_floor_on_the_way() {
        // Arrange
        let (mut controller, unit, event_rx) = setup_controller(FloorRange::new(0, 9));
        unit.submit_request(Request::call(3));
        run_until_waiting(&mut controller);
        let _ = event_rx.try_iter().count();

        // Act
        unit.submit_request(Request::call(7));
        assert_eq!(controller.step(), Tick::Immediate);
        assert_eq!(controller.step(), Tick::Wait(Delay::FloorTravel));
        unit.submit_request(Request::call(5));
        run_until_waiting(&mut controller);

        // Assert
        let mut boardings = Vec::new();
        let statuses = statuses(&event_rx, &mut boardings);
        assert_eq!(
            statuses,
            vec![
                (3, MovingUp),
                (4, MovingUp),
                (5, MovingUp),
                (5, Idle),
                (5, MovingUp),
                (6, MovingUp),
                (7, MovingUp),
                (7, Idle),
                (7, Idle),
            ]
        );
        assert!(statuses.iter().all(|&(floor, _)| floor >= 3));
        assert!(unit.pending_requests().is_empty());
    }

    #[test]
    fn test_controller_stop_and_continue_keeps_direction() {
        // Arrange
        let (mut controller, unit, _event_rx) = setup_controller(FloorRange::new(0, 9));
        unit.submit_request(Request::call(8));
        run_until_waiting(&mut controller);
        unit.submit_request(Request::call(2));
        unit.submit_request(Request::call(4));
        for _ in 0..4 {
            controller.step();
        }

        // Act
        let arrive_at_four = controller.step();
        let halted = controller.step();
        let halted_motion = controller.motion();
        let halted_state = unit.state();
        let resumed = controller.step();

        // Assert
        assert_eq!(controller.floor(), 4);
        assert_eq!(arrive_at_four, Tick::Wait(Delay::DoorOpen));
        assert_eq!(halted, Tick::Wait(Delay::DoorOpen));
        assert_eq!(
            halted_motion,
            Motion::Moving {
                direction: Direction::Down,
                paused: true
            }
        );
        assert_eq!(halted_state, Idle);
        assert_eq!(resumed, Tick::Wait(Delay::FloorTravel));
        assert_eq!(unit.state(), MovingDown);
        assert_eq!(unit.pending_requests(), vec![Request::call(2)]);
    }

    #[test]
    fn test_controller_boarding_event() {
        // Arrange
        let (mut controller, unit, event_rx) = setup_controller(FloorRange::new(0, 9));
        unit.submit_request(Request::call(6));
        unit.submit_request(Request::destination(2));

        // Act
        run_until_waiting(&mut controller);
        unit.submit_request(Request::destination(4));
        run_until_waiting(&mut controller);

        // Assert
        let mut boardings = Vec::new();
        statuses(&event_rx, &mut boardings);
        assert_eq!(boardings, vec![2, 4]);
        assert_eq!(controller.floor(), 4);
    }

    #[test]
    fn test_controller_no_boarding_for_calls() {
        // Arrange
        let (mut controller, unit, event_rx) = setup_controller(FloorRange::new(0, 9));
        unit.submit_request(Request::call(8));
        unit.submit_request(Request::call(3));

        // Act
        run_until_waiting(&mut controller);

        // Assert
        let mut boardings = Vec::new();
        statuses(&event_rx, &mut boardings);
        assert!(boardings.is_empty());
        assert_eq!(controller.floor(), 8);
    }

    #[test]
    fn test_controller_arrival_invariant() {
        // Arrange
        let (mut controller, unit, _event_rx) = setup_controller(FloorRange::new(0, 9));
        for floor in [4, 8, 6, 1] {
            unit.submit_request(Request::call(floor));
        }

        // Act
        run_until_waiting(&mut controller);

        // Assert
        assert_eq!(unit.current_floor(), 1);
        assert_eq!(unit.state(), Idle);
        assert!(unit.is_quiescent());
        assert!(unit.pending_requests().iter().all(|r| r.floor != 1));
    }

    #[test]
    fn test_controller_range_invariant() {
        // Arrange
        let range = FloorRange::new(-2, 3);
        let (mut controller, unit, event_rx) = setup_controller(range);
        for floor in [3, -2, 3, 0, -2, 2, -1, 3] {
            unit.submit_request(Request::destination(floor));
        }

        // Act
        run_until_waiting(&mut controller);

        // Assert
        let mut boardings = Vec::new();
        let statuses = statuses(&event_rx, &mut boardings);
        assert!(statuses.iter().all(|&(floor, _)| range.contains(floor)));
        assert!(statuses
            .windows(2)
            .all(|pair| pair[0].0.abs_diff(pair[1].0) <= 1));
        assert!(boardings.iter().all(|&floor| range.contains(floor)));
        assert!(unit.is_quiescent());
    }
}
