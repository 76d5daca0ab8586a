// Patient Queue - FIFO bound to one service point

use crate::domain::{Patient, ServicePoint};
use crate::error::Result;
use crate::port::LogSink;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// FIFO queue of patients waiting for one service point.
///
/// Guards:
/// - `add_guard` serializes enqueuers together with their log line, so the
///   "got in queue" lines appear in queue order
/// - `remove_guard` does the same for dequeuers and "called out" lines
/// - the storage lock is only held for the push/pop/len itself, so a router
///   appending never waits on a worker removing
///
/// `is_non_empty` and `len` are point-in-time snapshots. Callers use
/// check-then-act: a concurrent consumer may drain the queue between the
/// check and `dequeue`, in which case `dequeue` reports `None`.
pub struct PatientQueue {
    service_point: ServicePoint,
    patients: Mutex<VecDeque<Patient>>,
    add_guard: Mutex<()>,
    remove_guard: Mutex<()>,
    sink: Arc<dyn LogSink>,
}

impl PatientQueue {
    pub fn new(service_point: ServicePoint, sink: Arc<dyn LogSink>) -> Self {
        Self {
            service_point,
            patients: Mutex::new(VecDeque::new()),
            add_guard: Mutex::new(()),
            remove_guard: Mutex::new(()),
            sink,
        }
    }

    pub fn service_point(&self) -> ServicePoint {
        self.service_point
    }

    /// Append `patient` to the tail.
    ///
    /// The line is emitted before the push, so no consumer can call the
    /// patient out before its arrival has been logged. A failing sink leaves
    /// the queue untouched.
    pub fn enqueue(&self, patient: Patient) -> Result<()> {
        let _add = lock(&self.add_guard);
        self.sink.emit(&format!(
            "{} got in queue to {}.\n",
            patient, self.service_point
        ))?;
        lock(&self.patients).push_back(patient);
        Ok(())
    }

    /// Remove and return the head, or `None` if the queue was drained by a
    /// concurrent caller since its last check.
    ///
    /// Only dequeuers remove, so the head seen under `remove_guard` is the
    /// one popped after its line is emitted. A failing sink leaves the head
    /// in place.
    pub fn dequeue(&self) -> Result<Option<Patient>> {
        let _remove = lock(&self.remove_guard);
        let Some(line) = lock(&self.patients)
            .front()
            .map(|patient| format!("{} called out {}.\n", self.service_point, patient))
        else {
            return Ok(None);
        };
        self.sink.emit(&line)?;
        Ok(lock(&self.patients).pop_front())
    }

    pub fn is_non_empty(&self) -> bool {
        !lock(&self.patients).is_empty()
    }

    pub fn len(&self) -> usize {
        lock(&self.patients).len()
    }

    pub fn is_empty(&self) -> bool {
        !self.is_non_empty()
    }
}

impl std::fmt::Debug for PatientQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatientQueue")
            .field("service_point", &self.service_point)
            .field("len", &self.len())
            .finish()
    }
}

// A panic while holding a guard cannot leave a VecDeque push/pop half done
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::port::log_sink::mocks::{FailingLogSink, MemoryLogSink};
    use std::collections::HashSet;
    use std::thread;

    fn patient(i: usize) -> Patient {
        Patient::from_codes(format!("Name{}", i), "Surname", Category::General.code(), 5).unwrap()
    }

    fn queue() -> (PatientQueue, Arc<MemoryLogSink>) {
        let sink = Arc::new(MemoryLogSink::new());
        (PatientQueue::new(ServicePoint::Therapist, sink.clone()), sink)
    }

    #[test]
    fn test_fifo_order_single_thread() {
        let (queue, _) = queue();
        for i in 0..10 {
            queue.enqueue(patient(i)).unwrap();
        }
        assert_eq!(queue.len(), 10);
        for i in 0..10 {
            let next = queue.dequeue().unwrap().unwrap();
            assert_eq!(next.name(), format!("Name{}", i));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dequeue_empty_reports_none() {
        let (queue, sink) = queue();
        assert!(!queue.is_non_empty());
        assert!(queue.dequeue().unwrap().is_none());
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_log_lines() {
        let (queue, sink) = queue();
        let p = patient(1);
        queue.enqueue(p.clone()).unwrap();
        queue.dequeue().unwrap();
        assert_eq!(
            sink.lines(),
            vec![
                format!("{} got in queue to therapist.\n", p),
                format!("therapist called out {}.\n", p),
            ]
        );
    }

    #[test]
    fn test_failing_sink_leaves_queue_untouched() {
        let sink = Arc::new(FailingLogSink::new("/missing/log.txt"));
        let queue = PatientQueue::new(ServicePoint::Registration, sink.clone());
        assert!(queue.enqueue(patient(0)).is_err());
        assert_eq!(queue.len(), 0);
        assert_eq!(sink.attempts(), 1);
    }

    #[test]
    fn test_failing_sink_keeps_head_on_dequeue() {
        let sink = Arc::new(FailingLogSink::after(1, "/missing/log.txt"));
        let queue = PatientQueue::new(ServicePoint::Dentist, sink);
        queue.enqueue(patient(0)).unwrap();
        assert!(queue.dequeue().is_err());
        assert_eq!(queue.len(), 1);
    }

    fn producer_seq(p: &Patient) -> (usize, usize) {
        let id: usize = p.name().trim_start_matches("Name").parse().unwrap();
        (id / 1000, id % 1000)
    }

    #[test]
    fn test_concurrent_enqueue_dequeue_fifo_no_loss_no_duplication() {
        let (queue, _) = queue();
        let queue = Arc::new(queue);
        let producers = 4;
        let per_producer = 50;

        let mut handles = Vec::new();
        for p in 0..producers {
            let queue = Arc::clone(&queue);
            handles.push(thread::spawn(move || {
                for i in 0..per_producer {
                    queue.enqueue(patient(p * 1000 + i)).unwrap();
                }
            }));
        }

        // Each consumer keeps the order it dequeued in
        let mut consumers = Vec::new();
        for _ in 0..3 {
            let queue = Arc::clone(&queue);
            consumers.push(thread::spawn(move || {
                let mut taken = Vec::new();
                let mut idle_spins = 0;
                while idle_spins < 10_000 {
                    if queue.is_non_empty() {
                        if let Some(p) = queue.dequeue().unwrap() {
                            taken.push(producer_seq(&p));
                            idle_spins = 0;
                            continue;
                        }
                    }
                    idle_spins += 1;
                    thread::yield_now();
                }
                taken
            }));
        }

        for h in handles {
            h.join().unwrap();
        }
        let mut consumed: Vec<Vec<(usize, usize)>> =
            consumers.into_iter().map(|c| c.join().unwrap()).collect();
        // Anything the consumers gave up on is still queued
        let mut rest = Vec::new();
        while let Some(p) = queue.dequeue().unwrap() {
            rest.push(producer_seq(&p));
        }
        consumed.push(rest);

        // FIFO: every consumer sees each producer's patients in send order
        for taken in &consumed {
            let mut last_seen = vec![None::<usize>; producers];
            for &(producer, seq) in taken {
                if let Some(prev) = last_seen[producer] {
                    assert!(seq > prev, "producer {} reordered: {} after {}", producer, seq, prev);
                }
                last_seen[producer] = Some(seq);
            }
        }

        let all: Vec<_> = consumed.into_iter().flatten().collect();
        assert_eq!(all.len(), producers * per_producer);
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), producers * per_producer);
    }

    #[test]
    fn test_per_producer_order_preserved_under_concurrency() {
        let (queue, _) = queue();
        let queue = Arc::new(queue);
        let mut handles = Vec::new();
        for p in 0..3 {
            let queue = Arc::clone(&queue);
            handles.push(thread::spawn(move || {
                for i in 0..100 {
                    queue.enqueue(patient(p * 1000 + i)).unwrap();
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        let mut last_seen = [None::<usize>; 3];
        while let Some(p) = queue.dequeue().unwrap() {
            let (producer, seq) = producer_seq(&p);
            if let Some(prev) = last_seen[producer] {
                assert!(seq > prev, "producer {} reordered", producer);
            }
            last_seen[producer] = Some(seq);
        }
        assert_eq!(last_seen, [Some(99), Some(99), Some(99)]);
    }
}
