// Router - moves patients from registration to their specialized queue

use super::clinic::Clinic;
use crate::domain::ServicePoint;
use crate::error::Result;
use std::sync::Arc;
use tracing::debug;

/// Result of one routing attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// One patient moved to the queue of this service point
    Routed(ServicePoint),
    /// Registration was empty at check time, or another router took the
    /// last patient first
    Idle,
}

/// Routes one registration patient per invocation
#[derive(Clone)]
pub struct Router {
    clinic: Arc<Clinic>,
}

impl Router {
    pub fn new(clinic: Arc<Clinic>) -> Self {
        Self { clinic }
    }

    /// Check registration, and if it has a patient move it to the queue
    /// matching its category.
    ///
    /// Never blocks on an empty queue: losing the race to a concurrent router
    /// is a no-op for this round. While the log sink is healthy a dequeued
    /// patient is always re-enqueued before returning; if the sink fails on
    /// the target queue the patient is lost and the error is fatal.
    pub fn route_next(&self) -> Result<RouteOutcome> {
        let registration = self.clinic.registration();
        if !registration.is_non_empty() {
            return Ok(RouteOutcome::Idle);
        }
        let Some(patient) = registration.dequeue()? else {
            debug!("Registration drained by a concurrent router");
            return Ok(RouteOutcome::Idle);
        };

        let target = patient.category().service_point();
        self.clinic.queue(target).enqueue(patient)?;
        Ok(RouteOutcome::Routed(target))
    }
}
