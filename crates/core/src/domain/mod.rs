// Domain Layer - Pure clinic entities and service policies

pub mod error;
pub mod patient;
pub mod service_point;

// Re-exports
pub use error::DomainError;
pub use patient::{Category, Patient, Severity};
pub use service_point::ServicePoint;
