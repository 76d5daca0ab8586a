// Patient Domain Model

use super::error::{DomainError, Result};
use super::service_point::ServicePoint;
use serde::{Deserialize, Serialize};

/// Lowest accepted illness severity
pub const MIN_SEVERITY: u8 = 1;

/// Highest accepted illness severity
pub const MAX_SEVERITY: u8 = 10;

/// Illness category, decides which specialized queue a patient is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Teeth problems (code 1)
    Dental,
    /// Organ problems (code 2)
    Surgical,
    /// General complaints (code 3)
    General,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Dental, Category::Surgical, Category::General];

    /// Numeric code used in patient display strings and input data
    pub fn code(self) -> u8 {
        match self {
            Category::Dental => 1,
            Category::Surgical => 2,
            Category::General => 3,
        }
    }

    /// Service point whose queue receives patients of this category
    pub fn service_point(self) -> ServicePoint {
        match self {
            Category::Dental => ServicePoint::Dentist,
            Category::Surgical => ServicePoint::Surgeon,
            Category::General => ServicePoint::Therapist,
        }
    }
}

impl TryFrom<u8> for Category {
    type Error = DomainError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Category::Dental),
            2 => Ok(Category::Surgical),
            3 => Ok(Category::General),
            other => Err(DomainError::InvalidCategory(other)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Illness severity in `MIN_SEVERITY..=MAX_SEVERITY`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Severity(u8);

impl Severity {
    pub fn new(value: u8) -> Result<Self> {
        if (MIN_SEVERITY..=MAX_SEVERITY).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidSeverity(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Severity {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Patient Entity
///
/// Category and severity are fixed at construction; there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    name: String,
    surname: String,
    category: Category,
    severity: Severity,
}

impl Patient {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        category: Category,
        severity: Severity,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            category,
            severity,
        }
    }

    /// Build a patient from raw input codes, rejecting undefined categories
    /// and out-of-range severities.
    pub fn from_codes(
        name: impl Into<String>,
        surname: impl Into<String>,
        category: u8,
        severity: u8,
    ) -> Result<Self> {
        let name = name.into();
        let surname = surname.into();
        if name.trim().is_empty() || surname.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "patient name and surname cannot be empty".to_string(),
            ));
        }
        Ok(Self::new(
            name,
            surname,
            Category::try_from(category)?,
            Severity::new(severity)?,
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

impl std::fmt::Display for Patient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Patient {} {} Illness(type, stage) = ({}, {})",
            self.name, self.surname, self.category, self.severity
        )
    }
}
