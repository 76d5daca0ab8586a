// Clinic Infrastructure - System Adapters
// Implements: LogSink, ServiceClock, and the random patient source

pub mod log_sink_impl;
pub mod patient_generator;
pub mod service_clock_impl;

pub use log_sink_impl::{ConsoleLogSink, FileLogSink};
pub use patient_generator::PatientGenerator;
pub use service_clock_impl::ThreadServiceClock;
