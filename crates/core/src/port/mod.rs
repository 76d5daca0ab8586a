// Port Layer - Interfaces for external collaborators

pub mod log_sink;
pub mod service_clock; // For deterministic testing

// Re-exports
pub use log_sink::LogSink;
pub use service_clock::ServiceClock;
