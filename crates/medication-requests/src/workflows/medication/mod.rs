//! Medication request processing: repository lookup, stock validation, and patient notification.

pub mod domain;
pub mod notification;
pub mod repository;
pub mod router;
pub mod service;
pub mod stock;

#[cfg(test)]
mod tests;

pub use domain::{
    Medication, MedicationRequest, MedicationRequestId, NewMedicationRequest, ProcessingResult,
};
pub use notification::{EmailError, EmailNotification, EmailSender, NEW_REQUEST_SUBJECT};
pub use repository::{MedicationRequestRepository, RepositoryError};
pub use router::medication_request_router;
pub use service::{MedicationRequestError, MedicationRequestService};
pub use stock::StockDecision;
