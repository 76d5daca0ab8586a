// Clinic - the four process-wide queues and the shared log sink

use super::queue::PatientQueue;
use crate::domain::{Patient, ServicePoint};
use crate::error::Result;
use crate::port::LogSink;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Owns the registration queue, the three specialized queues and the log
/// sink they share. Built once per run and handed to routers, workers and
/// the scheduler behind an `Arc`.
pub struct Clinic {
    registration: PatientQueue,
    dentist: PatientQueue,
    surgeon: PatientQueue,
    therapist: PatientQueue,
    sink: Arc<dyn LogSink>,
}

/// Snapshot of every queue length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueLengths {
    pub registration: usize,
    pub dentist: usize,
    pub surgeon: usize,
    pub therapist: usize,
}

impl QueueLengths {
    pub fn total(&self) -> usize {
        self.registration + self.dentist + self.surgeon + self.therapist
    }
}

impl Clinic {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            registration: PatientQueue::new(ServicePoint::Registration, Arc::clone(&sink)),
            dentist: PatientQueue::new(ServicePoint::Dentist, Arc::clone(&sink)),
            surgeon: PatientQueue::new(ServicePoint::Surgeon, Arc::clone(&sink)),
            therapist: PatientQueue::new(ServicePoint::Therapist, Arc::clone(&sink)),
            sink,
        }
    }

    /// Queue bound to `point`
    pub fn queue(&self, point: ServicePoint) -> &PatientQueue {
        match point {
            ServicePoint::Registration => &self.registration,
            ServicePoint::Dentist => &self.dentist,
            ServicePoint::Surgeon => &self.surgeon,
            ServicePoint::Therapist => &self.therapist,
        }
    }

    pub fn registration(&self) -> &PatientQueue {
        &self.registration
    }

    pub fn sink(&self) -> &dyn LogSink {
        self.sink.as_ref()
    }

    /// Put a new patient into the registration queue
    pub fn admit(&self, patient: Patient) -> Result<()> {
        self.registration.enqueue(patient)
    }

    /// Admit every patient in order, stopping at the first sink failure
    pub fn admit_all(&self, patients: impl IntoIterator<Item = Patient>) -> Result<usize> {
        let mut admitted = 0;
        for patient in patients {
            self.admit(patient)?;
            admitted += 1;
        }
        debug!(admitted, "Patients admitted to registration");
        Ok(admitted)
    }

    pub fn queue_lengths(&self) -> QueueLengths {
        QueueLengths {
            registration: self.registration.len(),
            dentist: self.dentist.len(),
            surgeon: self.surgeon.len(),
            therapist: self.therapist.len(),
        }
    }

    /// Patients still waiting anywhere in the clinic
    pub fn total_patients(&self) -> usize {
        self.queue_lengths().total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::port::log_sink::mocks::MemoryLogSink;

    #[test]
    fn test_admit_goes_to_registration() {
        let sink = Arc::new(MemoryLogSink::new());
        let clinic = Clinic::new(sink.clone());
        let patients = (0..3)
            .map(|i| Patient::from_codes(format!("P{}", i), "S", Category::Dental.code(), 3).unwrap());
        assert_eq!(clinic.admit_all(patients).unwrap(), 3);

        let lengths = clinic.queue_lengths();
        assert_eq!(lengths.registration, 3);
        assert_eq!(lengths.total(), 3);
        assert_eq!(clinic.total_patients(), 3);
        assert_eq!(sink.matching("got in queue to registration.").len(), 3);
    }

    #[test]
    fn test_queue_lookup_matches_service_point() {
        let clinic = Clinic::new(Arc::new(MemoryLogSink::new()));
        for point in [
            ServicePoint::Registration,
            ServicePoint::Dentist,
            ServicePoint::Surgeon,
            ServicePoint::Therapist,
        ] {
            assert_eq!(clinic.queue(point).service_point(), point);
        }
        assert_eq!(clinic.total_patients(), 0);
    }
}
