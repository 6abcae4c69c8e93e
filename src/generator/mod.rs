pub mod request_generator;

pub use request_generator::RequestGenerator;
