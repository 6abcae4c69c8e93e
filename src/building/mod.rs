pub mod building;
pub mod dispatch;

mod building_tests;

pub use building::Building;
