use log::{info, warn};
use std::io::BufRead;
use std::sync::Arc;

use crate::building::Building;
use crate::shared::{ElevatorId, Floor, RequestKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Call(Floor),
    Destination(Floor, ElevatorId),
    Quit,
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelExit {
    Quit,
    EndOfInput,
}

/**
 * Line-based call panel.
 *
 * - `<floor>`              call an elevator to `floor`
 * - `<floor> <elevator>`   register `floor` as a destination inside `elevator`
 * - `q`                    leave the panel
 */
pub struct ControlPanel {
    building: Arc<Building>,
}

impl ControlPanel {
    pub fn new(building: Arc<Building>) -> ControlPanel {
        ControlPanel { building }
    }

    pub fn run<R: BufRead>(&self, input: R) -> PanelExit {
        let range = self.building.range();
        info!(
            "Control panel ready: '<floor>' to call, '<floor> <elevator>' for a destination, 'q' to quit ({}..={})",
            range.bottom, range.top
        );

        for line in input.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Failed to read from control panel input: {}", e);
                    break;
                }
            };
            match parse_command(&line) {
                Ok(Command::Quit) => return PanelExit::Quit,
                Ok(command) => self.execute(command),
                Err(e) => warn!("{}", e),
            }
        }
        PanelExit::EndOfInput
    }

    fn execute(&self, command: Command) {
        let result = match command {
            Command::Call(floor) => self.building.request_elevator(floor).map(|_| ()),
            Command::Destination(floor, elevator_id) => self
                .building
                .request_elevator_for(floor, RequestKind::DestinationFromInside, elevator_id)
                .map(|_| ()),
            Command::Quit | Command::Nothing => Ok(()),
        };
        if let Err(e) = result {
            warn!("Request rejected: {}", e);
        }
    }
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let first = match words.next() {
        Some(word) => word,
        None => return Ok(Command::Nothing),
    };
    if first.eq_ignore_ascii_case("q") || first.eq_ignore_ascii_case("quit") {
        return Ok(Command::Quit);
    }

    let floor: Floor = first
        .parse()
        .map_err(|_| format!("'{}' is not a floor number", first))?;
    let command = match words.next() {
        None => Command::Call(floor),
        Some(word) => {
            let elevator_id: ElevatorId = word
                .parse()
                .map_err(|_| format!("'{}' is not an elevator number", word))?;
            Command::Destination(floor, elevator_id)
        }
    };

    if let Some(extra) = words.next() {
        return Err(format!("unexpected '{}' after the command", extra));
    }
    Ok(command)
}
