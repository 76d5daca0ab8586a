// Random patient generator (input collaborator)
// reason: rand for names, categories and severities
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use clinic_core::application::worker::constants::{
    GENERATED_MAX_PATIENTS, GENERATED_MIN_PATIENTS,
};
use clinic_core::domain::patient::{MAX_SEVERITY, MIN_SEVERITY};
use clinic_core::domain::{Category, Patient, Severity};
use clinic_core::error::Result;

/// Shortest and longest lowercase tail of a generated name
const NAME_TAIL_MIN: usize = 6;
const NAME_TAIL_MAX: usize = 12;

/// Produces random patients: a capitalized name and surname, a uniform
/// category and a uniform severity.
pub struct PatientGenerator<R: Rng = StdRng> {
    rng: R,
}

impl PatientGenerator<StdRng> {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for tests and reproducible runs
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for PatientGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PatientGenerator<R> {
    /// Random population size for generated runs
    pub fn population(&mut self) -> usize {
        self.rng
            .gen_range(GENERATED_MIN_PATIENTS..=GENERATED_MAX_PATIENTS)
    }

    pub fn next_patient(&mut self) -> Result<Patient> {
        let name = self.name();
        let surname = self.name();
        let category = Category::ALL[self.rng.gen_range(0..Category::ALL.len())];
        let severity = Severity::new(self.rng.gen_range(MIN_SEVERITY..=MAX_SEVERITY))?;
        Ok(Patient::new(name, surname, category, severity))
    }

    pub fn generate(&mut self, count: usize) -> Result<Vec<Patient>> {
        (0..count).map(|_| self.next_patient()).collect()
    }

    fn name(&mut self) -> String {
        let tail = self.rng.gen_range(NAME_TAIL_MIN..=NAME_TAIL_MAX);
        let mut name = String::with_capacity(tail + 1);
        name.push(self.rng.gen_range(b'A'..=b'Z') as char);
        for _ in 0..tail {
            name.push(self.rng.gen_range(b'a'..=b'z') as char);
        }
        name
    }
}
