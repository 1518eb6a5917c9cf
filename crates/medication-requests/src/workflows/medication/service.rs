use std::sync::Arc;

use super::domain::{MedicationRequestId, ProcessingResult};
use super::notification::{EmailError, EmailNotification, EmailSender};
use super::repository::{MedicationRequestRepository, RepositoryError};
use super::stock::StockDecision;

/// Service validating a stored request against its medication snapshot and notifying the patient.
pub struct MedicationRequestService<R, E> {
    repository: Arc<R>,
    email: Arc<E>,
}

impl<R, E> MedicationRequestService<R, E>
where
    R: MedicationRequestRepository + 'static,
    E: EmailSender + 'static,
{
    pub fn new(repository: Arc<R>, email: Arc<E>) -> Self {
        Self { repository, email }
    }

    /// Look up a request, check stock, and e-mail the patient when it can be filled.
    ///
    /// Exactly one repository lookup happens per call. The email is sent once, and only when the
    /// request passes validation. Collaborator failures are returned as-is.
    pub async fn process(
        &self,
        request_id: MedicationRequestId,
    ) -> Result<ProcessingResult, MedicationRequestError> {
        let request = self
            .repository
            .get_one(request_id)
            .await?
            .ok_or(MedicationRequestError::NotFound(request_id))?;

        match StockDecision::evaluate(request.medication.quantity, request.quantity) {
            StockDecision::OutOfStock => {
                return Err(MedicationRequestError::OutOfStock {
                    medication: request.medication.name,
                })
            }
            StockDecision::Insufficient {
                available,
                requested,
            } => {
                return Err(MedicationRequestError::InsufficientStock {
                    medication: request.medication.name,
                    available,
                    requested,
                })
            }
            StockDecision::Available => {}
        }

        EmailNotification::new_request(&request)
            .dispatch(self.email.as_ref())
            .await?;

        Ok(ProcessingResult::for_request(&request))
    }
}

impl<R, E> Clone for MedicationRequestService<R, E> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            email: Arc::clone(&self.email),
        }
    }
}

/// Error raised by the medication request service.
#[derive(Debug, thiserror::Error)]
pub enum MedicationRequestError {
    #[error("medication request {0} not found")]
    NotFound(MedicationRequestId),
    #[error("{medication} is out of stock")]
    OutOfStock { medication: String },
    #[error("insufficient stock for {medication}: {available} available, {requested} requested")]
    InsufficientStock {
        medication: String,
        available: u32,
        requested: u32,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Email(#[from] EmailError),
}

impl MedicationRequestError {
    /// Stable machine-readable code for API payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::OutOfStock { .. } => "out_of_stock",
            Self::InsufficientStock { .. } => "insufficient_stock",
            Self::Repository(_) => "repository",
            Self::Email(_) => "email",
        }
    }
}
