/// HTTP request handlers for the simulator API
pub mod simulator;

pub use simulator::simulator_routes;
