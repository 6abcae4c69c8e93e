/* 3rd party libraries */
use clap::Parser;
use log::info;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::thread::{sleep, Builder};
use std::time::Duration;

/* Custom libraries */
use building::Building;
use console::{ControlPanel, OutputFormat, PanelExit, StatusPrinter};
use elevator::ElevatorListener;
use generator::RequestGenerator;

/* Modules */
mod building;
mod config;
mod console;
mod elevator;
mod generator;
mod shared;

/// Multi-elevator dispatch simulator
#[derive(Parser, Debug)]
#[clap(name = "elevator_bank", version, about)]
struct Args {
    /// Configuration file
    #[clap(short, long, default_value = "config.toml")]
    config: String,

    /// Override the number of elevators
    #[clap(short, long)]
    elevators: Option<usize>,

    /// Override the number of generated requests
    #[clap(short, long)]
    requests: Option<usize>,

    /// Print status events as JSON lines
    #[clap(long)]
    json: bool,

    /// Read calls from stdin instead of generating them
    #[clap(long)]
    manual: bool,
}

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Load the configuration
    let mut config = unwrap_or_exit!(config::load_config(Path::new(&args.config)));
    if let Some(elevators) = args.elevators {
        config.building.elevators = elevators;
    }
    if let Some(requests) = args.requests {
        config.generator.max_requests = requests;
    }

    // Start the elevators
    let building = Arc::new(unwrap_or_exit!(Building::new(
        &config.building,
        &config.elevator
    )));

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let printer = Arc::new(StatusPrinter::new(building.range(), format));
    for elevator in building.elevators() {
        printer.on_elevator_status_change(elevator.id(), elevator.current_floor(), elevator.state());
    }
    let mut listeners: Vec<Arc<dyn ElevatorListener>> = vec![printer as Arc<dyn ElevatorListener>];

    // Feed requests until the source runs dry
    if args.manual {
        building.add_listeners(listeners);
        let panel = ControlPanel::new(Arc::clone(&building));
        if panel.run(io::stdin().lock()) == PanelExit::Quit {
            building.shutdown();
            return;
        }
    } else {
        let generator = Arc::new(RequestGenerator::new(&building, &config.generator));
        listeners.push(Arc::clone(&generator) as Arc<dyn ElevatorListener>);
        building.add_listeners(listeners);

        let generator_thread = Builder::new().name("request_generator".into());
        let handle = unwrap_or_exit!(generator_thread.spawn(move || generator.run()));
        if handle.join().is_err() {
            log::error!("Request generator panicked");
        }
    }

    // Let the elevators finish what they have queued
    let poll = Duration::from_millis(config.elevator.floor_travel_time.max(10));
    while !building.is_quiescent() {
        sleep(poll);
    }
    info!("All elevators idle, shutting down");
    building.shutdown();
}
