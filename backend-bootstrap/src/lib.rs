pub mod context;
pub mod lifecycle;
pub mod telemetry;

pub use lifecycle::run_with_config;
pub use telemetry::init_tracing;
