use log::warn;

use crate::elevator::ElevatorListener;
use crate::shared::{ElevatorEvent, ElevatorId, ElevatorState, Floor, FloorRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/**
 * Terminal view of the elevator bank.
 *
 * Prints one line per event. In text mode each status line draws the shaft
 * from the bottom floor to the top, with the car marked by its state:
 * `#` idle, `^` moving up, `v` moving down. In JSON mode every event is
 * printed as one `ElevatorEvent` object.
 */
pub struct StatusPrinter {
    range: FloorRange,
    format: OutputFormat,
}

impl StatusPrinter {
    pub fn new(range: FloorRange, format: OutputFormat) -> StatusPrinter {
        StatusPrinter { range, format }
    }

    fn print(&self, event: ElevatorEvent) {
        match self.format {
            OutputFormat::Text => println!("{}", self.render(&event)),
            OutputFormat::Json => match serde_json::to_string(&event) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!("Failed to serialize {:?}: {}", event, e),
            },
        }
    }

    pub fn render(&self, event: &ElevatorEvent) -> String {
        match *event {
            ElevatorEvent::StatusChanged {
                elevator_id,
                floor,
                state,
            } => format!(
                "Elevator {} |{}| floor {} {}",
                elevator_id,
                render_shaft(self.range, floor, state),
                floor,
                state
            ),
            ElevatorEvent::PersonEntered { elevator_id, floor } => {
                format!("Elevator {} picked up a passenger at floor {}", elevator_id, floor)
            }
        }
    }
}

pub fn render_shaft(range: FloorRange, floor: Floor, state: ElevatorState) -> String {
    let car = match state {
        ElevatorState::Idle => '#',
        ElevatorState::MovingUp => '^',
        ElevatorState::MovingDown => 'v',
    };
    range
        .floors()
        .map(|f| if f == floor { car } else { '.' })
        .collect()
}

impl ElevatorListener for StatusPrinter {
    fn on_elevator_status_change(&self, elevator_id: ElevatorId, floor: Floor, state: ElevatorState) {
        self.print(ElevatorEvent::StatusChanged {
            elevator_id,
            floor,
            state,
        });
    }

    fn on_person_entered(&self, elevator_id: ElevatorId, floor: Floor) {
        self.print(ElevatorEvent::PersonEntered { elevator_id, floor });
    }
}

#[cfg(test)]
mod status_printer_tests {
    use super::*;

    #[test]
    fn test_render_shaft_marks_car_by_state() {
        // Arrange
        let range = FloorRange::new(0, 4);

        // Act
        let idle = render_shaft(range, 0, ElevatorState::Idle);
        let up = render_shaft(range, 2, ElevatorState::MovingUp);
        let down = render_shaft(range, 4, ElevatorState::MovingDown);

        // Assert
        assert_eq!(idle, "#....");
        assert_eq!(up, "..^..");
        assert_eq!(down, "....v");
    }

    #[test]
    fn test_render_status_line() {
        // Arrange
        let printer = StatusPrinter::new(FloorRange::new(-1, 2), OutputFormat::Text);
        let event = ElevatorEvent::StatusChanged {
            elevator_id: 2,
            floor: 0,
            state: ElevatorState::MovingUp,
        };

        // Act
        let line = printer.render(&event);

        // Assert
        assert_eq!(line, "Elevator 2 |.^..| floor 0 moving up");
    }

    #[test]
    fn test_json_event_shape() {
        // Arrange
        let event = ElevatorEvent::PersonEntered {
            elevator_id: 1,
            floor: 7,
        };

        // Act
        let json: serde_json::Value = serde_json::to_value(event).unwrap();

        // Assert
        assert_eq!(
            json,
            serde_json::json!({ "event": "personEntered", "elevatorId": 1, "floor": 7 })
        );
    }
}
