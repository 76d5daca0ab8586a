// Service Clock Port (for testability)

/// Blocks the calling thread while a patient is being served.
///
/// This is the only intentional suspension point of the simulation. It is
/// always called with no queue guard held.
pub trait ServiceClock: Send + Sync {
    /// Block for `units` service-duration units
    fn serve(&self, units: u64);
}

/// Mock implementations for testing
pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Returns immediately and records every requested duration
    #[derive(Default)]
    pub struct RecordingClock {
        served: Mutex<Vec<u64>>,
    }

    impl RecordingClock {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn served(&self) -> Vec<u64> {
            self.served
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone()
        }

        pub fn total_units(&self) -> u64 {
            self.served().iter().sum()
        }
    }

    impl ServiceClock for RecordingClock {
        fn serve(&self, units: u64) {
            self.served
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(units);
        }
    }
}
