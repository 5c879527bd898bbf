pub mod assistant;
pub mod config;
pub mod geocoding;
pub mod payment;
pub mod telemetry;
