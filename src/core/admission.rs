//! Admission service
//!
//! Applications are drafted section by section, then submitted through an
//! injected backend. Submission is an async contract, so tests plug in a
//! fast or failing backend instead of waiting on wall-clock delays, and
//! every status change goes through the `AdmissionStatus` state machine.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;

use crate::core::ids;
use crate::core::models::{
    AcademicInfo, AdmissionApplication, AdmissionStatus, DocumentRef, PersonalInfo, ProgramInfo,
};

/// Errors from admission operations
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// No application with the given id
    #[error("Unknown application: {0}")]
    UnknownApplication(String),

    /// The requested status change is not allowed by the lifecycle
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status
        from: AdmissionStatus,
        /// Requested status
        to: AdmissionStatus,
    },

    /// The application has left `Draft` and can no longer be edited
    #[error("Application can no longer be edited (status: {0})")]
    NotEditable(AdmissionStatus),

    /// The admissions backend rejected or failed the submission
    #[error("Submission failed: {0}")]
    Backend(String),
}

/// Receipt issued by the admissions backend on a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionReceipt {
    /// Reference number the applicant can quote
    pub reference: String,
}

/// Where submitted applications go
#[async_trait]
pub trait AdmissionBackend: Send + Sync {
    /// Submit a completed application
    ///
    /// # Errors
    /// Returns `AdmissionError::Backend` when the submission fails
    async fn submit(
        &self,
        application: &AdmissionApplication,
    ) -> Result<AdmissionReceipt, AdmissionError>;
}

/// Accepting stub backend issuing sequential reference numbers
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    counter: AtomicU64,
}

impl InMemoryBackend {
    /// Create a backend starting at reference 1
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdmissionBackend for InMemoryBackend {
    async fn submit(
        &self,
        _application: &AdmissionApplication,
    ) -> Result<AdmissionReceipt, AdmissionError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(AdmissionReceipt {
            reference: format!("ESST-{n:06}"),
        })
    }
}

/// Drafting, submission, and review of admission applications
pub struct AdmissionService {
    backend: Arc<dyn AdmissionBackend>,
    applications: Mutex<Vec<AdmissionApplication>>,
}

impl AdmissionService {
    /// Create a service submitting through the given backend
    #[must_use]
    pub fn new(backend: Arc<dyn AdmissionBackend>) -> Self {
        Self {
            backend,
            applications: Mutex::new(Vec::new()),
        }
    }

    /// Start a new draft application
    pub fn new_application(&self) -> AdmissionApplication {
        let application = AdmissionApplication::new(ids::new_id());
        self.lock().push(application.clone());
        application
    }

    /// All applications, oldest first
    #[must_use]
    pub fn list(&self) -> Vec<AdmissionApplication> {
        self.lock().clone()
    }

    /// Get one application by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<AdmissionApplication> {
        self.lock().iter().find(|a| a.id == id).cloned()
    }

    /// Update the applicant-identity section of a draft
    ///
    /// # Errors
    /// `UnknownApplication` if the id does not exist, `NotEditable` once the
    /// application has left `Draft`
    pub fn update_personal(&self, id: &str, personal: PersonalInfo) -> Result<(), AdmissionError> {
        self.edit(id, |app| app.personal = personal)
    }

    /// Update the prior-education section of a draft
    ///
    /// # Errors
    /// Same as `update_personal`
    pub fn update_academic(&self, id: &str, academic: AcademicInfo) -> Result<(), AdmissionError> {
        self.edit(id, |app| app.academic = academic)
    }

    /// Update the requested-program section of a draft
    ///
    /// # Errors
    /// Same as `update_personal`
    pub fn update_program(&self, id: &str, program: ProgramInfo) -> Result<(), AdmissionError> {
        self.edit(id, |app| app.program = program)
    }

    /// Attach a supporting document to a draft
    ///
    /// # Errors
    /// Same as `update_personal`
    pub fn attach_document(&self, id: &str, document: DocumentRef) -> Result<(), AdmissionError> {
        self.edit(id, |app| app.documents.push(document))
    }

    /// Submit a draft through the backend
    ///
    /// On success the application becomes `Submitted` and carries the
    /// backend's reference number; on failure it stays `Draft`, untouched.
    ///
    /// # Errors
    /// `UnknownApplication`, `InvalidTransition` when the application is not
    /// a draft, or the backend's `AdmissionError::Backend`
    pub async fn submit(&self, id: &str) -> Result<AdmissionApplication, AdmissionError> {
        let application = self
            .get(id)
            .ok_or_else(|| AdmissionError::UnknownApplication(id.to_string()))?;

        Self::check_transition(application.status, AdmissionStatus::Submitted)?;

        // The lock is not held across the backend call
        let receipt = match self.backend.submit(&application).await {
            Ok(receipt) => receipt,
            Err(err) => {
                crate::warn!("Submission of application {id} failed: {err}");
                return Err(err);
            }
        };

        let mut apps = self.lock();
        let stored = apps
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AdmissionError::UnknownApplication(id.to_string()))?;
        stored.status = AdmissionStatus::Submitted;
        stored.submitted_at = Some(Utc::now());
        stored.reference = Some(receipt.reference);
        crate::info!(
            "Application {id} submitted (reference {})",
            stored.reference.as_deref().unwrap_or("-")
        );
        Ok(stored.clone())
    }

    /// Move a submitted application into review
    ///
    /// # Errors
    /// `UnknownApplication` or `InvalidTransition`
    pub fn begin_review(&self, id: &str) -> Result<AdmissionApplication, AdmissionError> {
        self.transition(id, AdmissionStatus::UnderReview)
    }

    /// Accept an application under review
    ///
    /// # Errors
    /// `UnknownApplication` or `InvalidTransition`
    pub fn accept(&self, id: &str) -> Result<AdmissionApplication, AdmissionError> {
        self.transition(id, AdmissionStatus::Accepted)
    }

    /// Reject an application under review
    ///
    /// # Errors
    /// `UnknownApplication` or `InvalidTransition`
    pub fn reject(&self, id: &str) -> Result<AdmissionApplication, AdmissionError> {
        self.transition(id, AdmissionStatus::Rejected)
    }

    fn edit(
        &self,
        id: &str,
        f: impl FnOnce(&mut AdmissionApplication),
    ) -> Result<(), AdmissionError> {
        let mut apps = self.lock();
        let app = apps
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AdmissionError::UnknownApplication(id.to_string()))?;
        if !app.is_editable() {
            return Err(AdmissionError::NotEditable(app.status));
        }
        f(app);
        Ok(())
    }

    fn transition(
        &self,
        id: &str,
        to: AdmissionStatus,
    ) -> Result<AdmissionApplication, AdmissionError> {
        let mut apps = self.lock();
        let app = apps
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AdmissionError::UnknownApplication(id.to_string()))?;
        Self::check_transition(app.status, to)?;
        app.status = to;
        Ok(app.clone())
    }

    fn check_transition(from: AdmissionStatus, to: AdmissionStatus) -> Result<(), AdmissionError> {
        if from.can_transition_to(to) {
            Ok(())
        } else {
            Err(AdmissionError::InvalidTransition { from, to })
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<AdmissionApplication>> {
        self.applications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingBackend;

    #[async_trait]
    impl AdmissionBackend for FailingBackend {
        async fn submit(
            &self,
            _application: &AdmissionApplication,
        ) -> Result<AdmissionReceipt, AdmissionError> {
            Err(AdmissionError::Backend("service indisponible".to_string()))
        }
    }

    fn service() -> AdmissionService {
        AdmissionService::new(Arc::new(InMemoryBackend::new()))
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let svc = service();
        let app = svc.new_application();

        svc.update_personal(
            &app.id,
            PersonalInfo {
                first_name: "Awa".to_string(),
                last_name: "Ndiaye".to_string(),
                email: "awa@example.com".to_string(),
                ..PersonalInfo::default()
            },
        )
        .unwrap();

        let submitted = svc.submit(&app.id).await.unwrap();
        assert_eq!(submitted.status, AdmissionStatus::Submitted);
        assert!(submitted.reference.as_deref().unwrap().starts_with("ESST-"));
        assert!(submitted.submitted_at.is_some());

        svc.begin_review(&app.id).unwrap();
        let accepted = svc.accept(&app.id).unwrap();
        assert_eq!(accepted.status, AdmissionStatus::Accepted);
    }

    #[tokio::test]
    async fn test_failing_backend_leaves_draft() {
        let svc = AdmissionService::new(Arc::new(FailingBackend));
        let app = svc.new_application();

        let err = svc.submit(&app.id).await.unwrap_err();
        assert!(matches!(err, AdmissionError::Backend(_)));

        let stored = svc.get(&app.id).unwrap();
        assert_eq!(stored.status, AdmissionStatus::Draft);
        assert!(stored.submitted_at.is_none());
    }

    #[test]
    fn test_illegal_transition_is_rejected() {
        let svc = service();
        let app = svc.new_application();

        let err = svc.accept(&app.id).unwrap_err();
        assert!(matches!(err, AdmissionError::InvalidTransition { .. }));
        assert_eq!(svc.get(&app.id).unwrap().status, AdmissionStatus::Draft);
    }

    #[tokio::test]
    async fn test_submitted_application_is_frozen() {
        let svc = service();
        let app = svc.new_application();
        svc.submit(&app.id).await.unwrap();

        let err = svc
            .update_program(&app.id, ProgramInfo::default())
            .unwrap_err();
        assert!(matches!(err, AdmissionError::NotEditable(_)));
    }

    #[test]
    fn test_unknown_application() {
        let svc = service();

        assert!(matches!(
            svc.begin_review("nope").unwrap_err(),
            AdmissionError::UnknownApplication(_)
        ));
    }

    #[tokio::test]
    async fn test_double_submit_is_rejected() {
        let svc = service();
        let app = svc.new_application();

        svc.submit(&app.id).await.unwrap();
        let err = svc.submit(&app.id).await.unwrap_err();
        assert!(matches!(err, AdmissionError::InvalidTransition { .. }));
    }
}
