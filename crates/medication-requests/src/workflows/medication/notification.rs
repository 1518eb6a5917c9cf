use async_trait::async_trait;

use super::domain::MedicationRequest;

pub const NEW_REQUEST_SUBJECT: &str = "New Medication Request";

/// Outbound hook for patient e-mail (SMTP, provider APIs, or test doubles).
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, address: &str, subject: &str, body: &str)
        -> Result<(), EmailError>;
}

/// Email dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("email transport unavailable: {0}")]
    Transport(String),
}

/// Fully composed message handed to an [`EmailSender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailNotification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailNotification {
    pub fn new_request(request: &MedicationRequest) -> Self {
        let body = format!(
            "Hello {},\n\nYour request for {} unit(s) of {} has been received and is being prepared.\n",
            request.patient_name, request.quantity, request.medication.name
        );

        Self {
            to: request.patient_email.clone(),
            subject: NEW_REQUEST_SUBJECT.to_string(),
            body,
        }
    }

    pub async fn dispatch<E>(&self, sender: &E) -> Result<(), EmailError>
    where
        E: EmailSender + ?Sized,
    {
        sender.send_email(&self.to, &self.subject, &self.body).await
    }
}
