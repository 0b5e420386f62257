pub mod configuration;
pub mod date_time;
pub mod ids;
pub mod tracing;
