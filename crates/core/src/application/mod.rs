// Application Layer - Queueing, routing and the round loop

pub mod clinic;
pub mod queue;
pub mod router;
pub mod scheduler;
pub mod worker;

// Re-exports
pub use clinic::{Clinic, QueueLengths};
pub use queue::PatientQueue;
pub use router::{RouteOutcome, Router};
pub use scheduler::{Departures, RunSummary, Scheduler, SchedulerConfig, SchedulerState};
pub use worker::{ServeOutcome, ServiceWorker};
