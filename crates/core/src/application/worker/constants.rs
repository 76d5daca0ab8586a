// Simulation constants (No magic values)

/// Concurrent router invocations per round
pub const ROUTER_SLOTS: usize = 2;

/// Smallest patient population accepted by the input collaborators
pub const MIN_PATIENTS: usize = 1;

/// Largest patient population accepted by the input collaborators
pub const MAX_PATIENTS: usize = 100;

/// Random population bounds used when the count is generated
pub const GENERATED_MIN_PATIENTS: usize = 10;
pub const GENERATED_MAX_PATIENTS: usize = 100;

/// Default real time of one service-duration unit (1s)
pub const DEFAULT_TIME_UNIT_MS: u64 = 1000;
