//! Admission application model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an admission application through its lifecycle
///
/// ```text
/// draft → submitted → under_review → accepted
///                                  → rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionStatus {
    /// Being filled in by the applicant
    Draft,
    /// Sent to the admissions office
    Submitted,
    /// Under evaluation
    UnderReview,
    /// Admitted
    Accepted,
    /// Not admitted
    Rejected,
}

impl AdmissionStatus {
    /// Valid next states from the current state
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Submitted],
            Self::Submitted => &[Self::UnderReview],
            Self::UnderReview => &[Self::Accepted, Self::Rejected],
            Self::Accepted | Self::Rejected => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// String representation used in storage and wire formats
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for AdmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applicant identity section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact email
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Date of birth
    pub birth_date: Option<NaiveDate>,
    /// Postal address
    pub address: String,
}

/// Prior education section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicInfo {
    /// Last school attended
    pub last_school: String,
    /// Highest diploma obtained
    pub diploma: String,
    /// Year of graduation
    pub graduation_year: Option<u16>,
}

/// Requested program section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramInfo {
    /// Program applied to
    pub program: String,
    /// Requested start term (e.g., "2025-automne")
    pub start_term: String,
    /// Motivation statement
    pub motivation: String,
}

/// Reference to an uploaded supporting document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// File name as uploaded
    pub name: String,
    /// Document kind (e.g., "transcript", "id")
    pub kind: String,
}

/// An admission application, filled in step by step then submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionApplication {
    /// Unique record id
    pub id: String,

    /// Applicant identity
    pub personal: PersonalInfo,

    /// Prior education
    pub academic: AcademicInfo,

    /// Requested program
    pub program: ProgramInfo,

    /// Supporting documents
    pub documents: Vec<DocumentRef>,

    /// Lifecycle status
    pub status: AdmissionStatus,

    /// When the application was submitted, if it has been
    pub submitted_at: Option<DateTime<Utc>>,

    /// Reference number issued by the admissions backend on submission
    pub reference: Option<String>,
}

impl AdmissionApplication {
    /// Create an empty draft application
    ///
    /// # Arguments
    /// * `id` - Unique record id
    #[must_use]
    pub fn new(id: String) -> Self {
        Self {
            id,
            personal: PersonalInfo::default(),
            academic: AcademicInfo::default(),
            program: ProgramInfo::default(),
            documents: Vec::new(),
            status: AdmissionStatus::Draft,
            submitted_at: None,
            reference: None,
        }
    }

    /// Whether the application can still be edited
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.status == AdmissionStatus::Draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_application_is_draft() {
        let app = AdmissionApplication::new("a-1".to_string());

        assert_eq!(app.status, AdmissionStatus::Draft);
        assert!(app.is_editable());
        assert!(app.submitted_at.is_none());
        assert!(app.documents.is_empty());
    }

    #[test]
    fn test_transitions() {
        assert!(AdmissionStatus::Draft.can_transition_to(AdmissionStatus::Submitted));
        assert!(AdmissionStatus::Submitted.can_transition_to(AdmissionStatus::UnderReview));
        assert!(AdmissionStatus::UnderReview.can_transition_to(AdmissionStatus::Accepted));
        assert!(AdmissionStatus::UnderReview.can_transition_to(AdmissionStatus::Rejected));

        assert!(!AdmissionStatus::Draft.can_transition_to(AdmissionStatus::Accepted));
        assert!(!AdmissionStatus::Accepted.can_transition_to(AdmissionStatus::Draft));
        assert!(AdmissionStatus::Rejected.allowed_next_states().is_empty());
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(AdmissionStatus::UnderReview.as_str(), "under_review");
        assert_eq!(AdmissionStatus::Accepted.to_string(), "accepted");
    }
}
