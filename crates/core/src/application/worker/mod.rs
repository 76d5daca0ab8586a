// Service Worker - drains one specialized queue

pub mod constants;

use crate::application::clinic::Clinic;
use crate::domain::{Category, Patient, ServicePoint};
use crate::error::Result;
use crate::port::ServiceClock;
use std::sync::Arc;
use tracing::debug;

/// Result of one service attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServeOutcome {
    /// A patient was served for `units` and has left
    Served { patient: Patient, units: u64 },
    /// The queue was empty at check time
    Idle,
}

/// Serves patients of one specialized queue, one per invocation
#[derive(Clone)]
pub struct ServiceWorker {
    clinic: Arc<Clinic>,
    service_point: ServicePoint,
    clock: Arc<dyn ServiceClock>,
}

impl ServiceWorker {
    /// Worker for the queue receiving `category` patients
    pub fn new(clinic: Arc<Clinic>, category: Category, clock: Arc<dyn ServiceClock>) -> Self {
        Self {
            clinic,
            service_point: category.service_point(),
            clock,
        }
    }

    pub fn service_point(&self) -> ServicePoint {
        self.service_point
    }

    /// Call out the next patient, block for its service time, then log its
    /// departure.
    ///
    /// No queue guard is held while blocked, so routers and the other
    /// workers keep making progress.
    pub fn serve_next(&self) -> Result<ServeOutcome> {
        let queue = self.clinic.queue(self.service_point);
        if !queue.is_non_empty() {
            return Ok(ServeOutcome::Idle);
        }
        let Some(patient) = queue.dequeue()? else {
            return Ok(ServeOutcome::Idle);
        };

        let units = self.service_point.service_duration(&patient);
        debug!(
            service_point = %self.service_point,
            units,
            "Serving patient"
        );
        self.clock.serve(units);

        self.clinic.sink().emit(&format!(
            "{} has left {}.\n",
            patient, self.service_point
        ))?;
        Ok(ServeOutcome::Served { patient, units })
    }
}
