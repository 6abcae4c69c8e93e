pub mod control_panel;
pub mod status_printer;

pub use control_panel::{ControlPanel, PanelExit};
pub use status_printer::{OutputFormat, StatusPrinter};
