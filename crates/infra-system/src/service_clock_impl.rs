// Service clock implementation (real thread sleep)
use std::time::Duration;
use tracing::trace;

use clinic_core::port::ServiceClock;

/// Blocks the calling thread for `units * unit`
pub struct ThreadServiceClock {
    unit: Duration,
}

impl ThreadServiceClock {
    pub fn new(unit: Duration) -> Self {
        Self { unit }
    }

    /// Real time spent for `units`
    pub fn duration_for(&self, units: u64) -> Duration {
        let factor = u32::try_from(units).unwrap_or(u32::MAX);
        self.unit.saturating_mul(factor)
    }
}

impl ServiceClock for ThreadServiceClock {
    fn serve(&self, units: u64) {
        let duration = self.duration_for(units);
        trace!(units, ?duration, "Service block");
        std::thread::sleep(duration);
    }
}
