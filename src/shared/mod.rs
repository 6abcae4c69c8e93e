pub mod errors;
pub mod macros;
pub mod structs;

pub use errors::DispatchError;
pub use structs::Direction;
pub use structs::ElevatorEvent;
pub use structs::ElevatorId;
pub use structs::ElevatorSnapshot;
pub use structs::ElevatorState;
pub use structs::Floor;
pub use structs::FloorRange;
pub use structs::Request;
pub use structs::RequestKind;
