/*
 * Integration tests for the building and its elevator threads
 *
 * The unit tests follows the Arrange, Act, Assert pattern. Every building
 * runs with zero delays, so a trip completes in a few milliseconds.
 *
 * Tests:
 *  - test_building_serves_call
 *  - test_building_routes_to_nearest
 *  - test_building_direct_request_boards
 *  - test_building_rejects_invalid_elevator
 *  - test_building_rejects_floor_out_of_range
 *  - test_building_without_elevators
 *  - test_building_shutdown_is_idempotent
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod building_tests {
    use crate::building::Building;
    use crate::config::{BuildingConfig, ElevatorConfig};
    use crate::elevator::ChannelListener;
    use crate::shared::ElevatorState::{Idle, MovingUp};
    use crate::shared::{DispatchError, ElevatorEvent, ElevatorId, Floor, RequestKind};
    use crossbeam_channel::{unbounded, Receiver};
    use std::sync::Arc;
    use std::thread::sleep;
    use std::time::{Duration, Instant};

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn setup_building(elevators: usize) -> (Building, Receiver<ElevatorEvent>) {
        let config = BuildingConfig {
            elevators,
            bottom_floor: 0,
            top_floor: 9,
        };
        let timing = ElevatorConfig {
            floor_travel_time: 0,
            door_open_time: 0,
        };
        let building = Building::new(&config, &timing).unwrap();
        let (event_tx, event_rx) = unbounded::<ElevatorEvent>();
        building.add_listener(Arc::new(ChannelListener::new(event_tx)));
        (building, event_rx)
    }

    fn wait_until<F: Fn() -> bool>(condition: F) {
        let start = Instant::now();
        while !condition() {
            if start.elapsed() > TIMEOUT {
                panic!("Condition not met within {:?}", TIMEOUT);
            }
            sleep(Duration::from_millis(1));
        }
    }

    fn wait_for_idle_at(building: &Building, id: ElevatorId, floor: Floor) {
        wait_until(|| {
            let elevator = building.elevator(id).unwrap();
            elevator.current_floor() == floor && elevator.is_quiescent()
        });
    }

    #[test]
    fn test_building_serves_call() {
        // Arrange
        let (building, event_rx) = setup_building(2);

        // Act
        let assigned = building.request_elevator(5).unwrap();
        wait_for_idle_at(&building, 1, 5);
        building.shutdown();

        // Assert
        let events: Vec<ElevatorEvent> = event_rx.try_iter().collect();
        let moving_up: Vec<Floor> = events
            .iter()
            .filter_map(|event| match *event {
                ElevatorEvent::StatusChanged {
                    elevator_id: 1,
                    floor,
                    state: MovingUp,
                } => Some(floor),
                _ => None,
            })
            .collect();
        assert_eq!(assigned, Some(1));
        assert_eq!(moving_up, vec![0, 1, 2, 3, 4, 5]);
        assert!(events.contains(&ElevatorEvent::StatusChanged {
            elevator_id: 1,
            floor: 5,
            state: Idle,
        }));
        assert!(events.iter().all(|event| match *event {
            ElevatorEvent::StatusChanged {
                elevator_id: 2,
                floor,
                state,
            } => (floor, state) == (0, Idle),
            _ => true,
        }));
        assert!(!events
            .iter()
            .any(|event| matches!(event, ElevatorEvent::PersonEntered { .. })));
    }

    #[test]
    fn test_building_routes_to_nearest() {
        // Arrange
        let (building, _event_rx) = setup_building(2);
        building.request_elevator(5).unwrap();
        wait_for_idle_at(&building, 1, 5);

        // Act
        let to_four = building.request_elevator(4).unwrap();
        wait_for_idle_at(&building, 1, 4);
        let to_one = building.request_elevator(1).unwrap();
        wait_for_idle_at(&building, 2, 1);

        // Assert
        assert_eq!(to_four, Some(1));
        assert_eq!(to_one, Some(2));
        assert!(building.is_quiescent());
    }

    #[test]
    fn test_building_direct_request_boards() {
        // Arrange
        let (building, event_rx) = setup_building(2);

        // Act
        let accepted = building
            .request_elevator_for(3, RequestKind::DestinationFromInside, 2)
            .unwrap();
        wait_for_idle_at(&building, 2, 3);
        building.shutdown();

        // Assert
        let boardings: Vec<ElevatorEvent> = event_rx
            .try_iter()
            .filter(|event| matches!(event, ElevatorEvent::PersonEntered { .. }))
            .collect();
        assert!(accepted);
        assert_eq!(
            boardings,
            vec![ElevatorEvent::PersonEntered {
                elevator_id: 2,
                floor: 3
            }]
        );
        assert_eq!(building.elevator(1).unwrap().current_floor(), 0);
    }

    #[test]
    fn test_building_rejects_invalid_elevator() {
        // Arrange
        let (building, _event_rx) = setup_building(2);

        // Act
        let zero = building.request_elevator_for(3, RequestKind::CallFromOutside, 0);
        let three = building.request_elevator_for(3, RequestKind::CallFromOutside, 3);

        // Assert
        assert_eq!(
            zero,
            Err(DispatchError::InvalidElevatorId { id: 0, elevators: 2 })
        );
        assert_eq!(
            three,
            Err(DispatchError::InvalidElevatorId { id: 3, elevators: 2 })
        );
        assert!(building.is_quiescent());
    }

    #[test]
    fn test_building_rejects_floor_out_of_range() {
        // Arrange
        let (building, _event_rx) = setup_building(2);

        // Act
        let above = building.request_elevator(10);
        let below = building.request_elevator_for(-1, RequestKind::DestinationFromInside, 1);

        // Assert
        assert!(matches!(
            above,
            Err(DispatchError::FloorOutOfRange { floor: 10, .. })
        ));
        assert!(matches!(
            below,
            Err(DispatchError::FloorOutOfRange { floor: -1, .. })
        ));
        assert!(building.is_quiescent());
    }

    #[test]
    fn test_building_without_elevators() {
        // Arrange
        let (building, _event_rx) = setup_building(0);

        // Act
        let assigned = building.request_elevator(4);

        // Assert
        assert_eq!(assigned, Ok(None));
        assert!(building.elevators().is_empty());
        assert!(building.is_quiescent());
    }

    #[test]
    fn test_building_shutdown_is_idempotent() {
        // Arrange
        let (building, _event_rx) = setup_building(3);

        // Act
        building.shutdown();
        building.shutdown();

        // Assert
        assert_eq!(building.elevators().len(), 3);
        assert!(building.is_quiescent());
    }
}
