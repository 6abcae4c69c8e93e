pub mod controller;
pub mod listener;
pub mod queue;
pub mod runner;
pub mod unit;

mod controller_tests;

pub use controller::Controller;
pub use listener::{ChannelListener, ElevatorListener};
pub use queue::RequestQueue;
pub use runner::ElevatorRunner;
pub use unit::ElevatorUnit;
