/// HTTP middleware for the simulator API
pub mod simulator_auth;

pub use simulator_auth::SimulatorAuthMiddleware;
