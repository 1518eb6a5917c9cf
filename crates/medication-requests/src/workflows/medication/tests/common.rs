use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::medication::domain::{Medication, MedicationRequest, MedicationRequestId};
use crate::workflows::medication::notification::{EmailError, EmailSender};
use crate::workflows::medication::repository::{MedicationRequestRepository, RepositoryError};
use crate::workflows::medication::service::MedicationRequestService;

pub(super) fn request(medication_stock: u32, requested: u32) -> MedicationRequest {
    MedicationRequest {
        id: MedicationRequestId(1),
        patient_name: "John Doe".to_string(),
        patient_email: "john@example.com".to_string(),
        quantity: requested,
        medication: Medication {
            name: "Aspirin".to_string(),
            quantity: medication_stock,
        },
    }
}

pub(super) fn build_service(
    records: Vec<MedicationRequest>,
) -> (
    MedicationRequestService<MemoryRepository, RecordingEmailSender>,
    Arc<MemoryRepository>,
    Arc<RecordingEmailSender>,
) {
    let repository = Arc::new(MemoryRepository::with_records(records));
    let email = Arc::new(RecordingEmailSender::default());
    let service = MedicationRequestService::new(repository.clone(), email.clone());
    (service, repository, email)
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<HashMap<MedicationRequestId, MedicationRequest>>,
    lookups: AtomicUsize,
}

impl MemoryRepository {
    pub(super) fn with_records(records: Vec<MedicationRequest>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.id, record))
            .collect();
        Self {
            records: Mutex::new(records),
            lookups: AtomicUsize::new(0),
        }
    }

    pub(super) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MedicationRequestRepository for MemoryRepository {
    async fn get_one(
        &self,
        id: MedicationRequestId,
    ) -> Result<Option<MedicationRequest>, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }
}

pub(super) struct UnavailableRepository;

#[async_trait]
impl MedicationRequestRepository for UnavailableRepository {
    async fn get_one(
        &self,
        _id: MedicationRequestId,
    ) -> Result<Option<MedicationRequest>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SentEmail {
    pub(super) address: String,
    pub(super) subject: String,
    pub(super) body: String,
}

#[derive(Default)]
pub(super) struct RecordingEmailSender {
    sent: Mutex<Vec<SentEmail>>,
}

impl RecordingEmailSender {
    pub(super) fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().expect("email mutex poisoned").clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send_email(
        &self,
        address: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), EmailError> {
        self.sent
            .lock()
            .expect("email mutex poisoned")
            .push(SentEmail {
                address: address.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        Ok(())
    }
}

pub(super) struct BouncingEmailSender;

#[async_trait]
impl EmailSender for BouncingEmailSender {
    async fn send_email(
        &self,
        _address: &str,
        _subject: &str,
        _body: &str,
    ) -> Result<(), EmailError> {
        Err(EmailError::Transport("smtp relay refused".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
