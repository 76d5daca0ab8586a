// Service Point Domain Model

use super::patient::Patient;
use serde::Serialize;

/// A service policy bound to exactly one queue.
///
/// Every variant shares the same duration formula and differs only in its
/// maximum service time and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServicePoint {
    /// Intake desk. Backs the registration queue label; never timed.
    Registration,
    Dentist,
    Surgeon,
    Therapist,
}

impl ServicePoint {
    /// Specialized service points in routing order (dental, surgical, general)
    pub const SPECIALIZED: [ServicePoint; 3] = [
        ServicePoint::Dentist,
        ServicePoint::Surgeon,
        ServicePoint::Therapist,
    ];

    /// Maximum service time in duration units
    pub const fn max_duration(self) -> u64 {
        match self {
            ServicePoint::Registration => 5,
            ServicePoint::Dentist => 20,
            ServicePoint::Surgeon => 15,
            ServicePoint::Therapist => 12,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ServicePoint::Registration => "registration",
            ServicePoint::Dentist => "dentist",
            ServicePoint::Surgeon => "surgeon",
            ServicePoint::Therapist => "therapist",
        }
    }

    /// Service time for `patient`: `max_duration * severity / 10`, truncated.
    ///
    /// Yields between 10% and 100% of `max_duration`.
    pub fn service_duration(self, patient: &Patient) -> u64 {
        self.max_duration() * u64::from(patient.severity().get()) / 10
    }
}

impl std::fmt::Display for ServicePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patient::{Category, MAX_SEVERITY, MIN_SEVERITY};

    fn patient(severity: u8) -> Patient {
        Patient::from_codes("Test", "Patient", Category::Dental.code(), severity).unwrap()
    }

    #[test]
    fn test_duration_formula_for_all_points_and_severities() {
        let points = [
            ServicePoint::Registration,
            ServicePoint::Dentist,
            ServicePoint::Surgeon,
            ServicePoint::Therapist,
        ];
        for point in points {
            for severity in MIN_SEVERITY..=MAX_SEVERITY {
                let expected = point.max_duration() * u64::from(severity) / 10;
                assert_eq!(point.service_duration(&patient(severity)), expected);
            }
        }
    }

    #[test]
    fn test_duration_extremes() {
        assert_eq!(ServicePoint::Dentist.service_duration(&patient(10)), 20);
        assert_eq!(ServicePoint::Dentist.service_duration(&patient(1)), 2);
        assert_eq!(ServicePoint::Surgeon.service_duration(&patient(1)), 1);
        assert_eq!(ServicePoint::Therapist.service_duration(&patient(1)), 1);
        assert_eq!(ServicePoint::Registration.service_duration(&patient(1)), 0);
        assert_eq!(ServicePoint::Surgeon.service_duration(&patient(5)), 7);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ServicePoint::Registration.to_string(), "registration");
        assert_eq!(ServicePoint::Dentist.label(), "dentist");
        assert_eq!(ServicePoint::Surgeon.label(), "surgeon");
        assert_eq!(ServicePoint::Therapist.label(), "therapist");
    }
}
