use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use medication_requests::config::NotificationConfig;
use medication_requests::workflows::medication::{
    EmailError, EmailSender, Medication, MedicationRequest, MedicationRequestId,
    MedicationRequestRepository, NewMedicationRequest, RepositoryError,
};
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct RequestTable {
    records: BTreeMap<MedicationRequestId, MedicationRequest>,
    last_id: u64,
}

/// Process-local request store; identifiers are assigned sequentially on insert.
#[derive(Default, Clone)]
pub(crate) struct InMemoryMedicationRequestRepository {
    table: Arc<Mutex<RequestTable>>,
}

impl InMemoryMedicationRequestRepository {
    pub(crate) fn insert(&self, request: NewMedicationRequest) -> MedicationRequest {
        let mut guard = self.table.lock().expect("repository mutex poisoned");
        guard.last_id += 1;
        let record = request.with_id(MedicationRequestId(guard.last_id));
        guard.records.insert(record.id, record.clone());
        record
    }

    /// Stores one request per processing outcome: out of stock, insufficient, and fillable.
    pub(crate) fn seed_demo(&self) -> Vec<MedicationRequest> {
        demo_requests()
            .into_iter()
            .map(|request| self.insert(request))
            .collect()
    }
}

#[async_trait]
impl MedicationRequestRepository for InMemoryMedicationRequestRepository {
    async fn get_one(
        &self,
        id: MedicationRequestId,
    ) -> Result<Option<MedicationRequest>, RepositoryError> {
        let guard = self.table.lock().expect("repository mutex poisoned");
        Ok(guard.records.get(&id).cloned())
    }
}

pub(crate) fn demo_requests() -> Vec<NewMedicationRequest> {
    let request = |stock: u32, requested: u32| NewMedicationRequest {
        patient_name: "John Doe".to_string(),
        patient_email: "john@example.com".to_string(),
        quantity: requested,
        medication: Medication {
            name: "Aspirin".to_string(),
            quantity: stock,
        },
    };

    vec![request(0, 5), request(3, 5), request(10, 5)]
}

#[derive(Debug, Clone)]
pub(crate) struct DispatchedEmail {
    pub(crate) from: String,
    pub(crate) to: String,
    pub(crate) subject: String,
    pub(crate) body: String,
    pub(crate) sent_at: DateTime<Utc>,
}

/// Email sender that records messages locally and logs each dispatch instead of relaying it.
#[derive(Clone)]
pub(crate) struct LoggingEmailSender {
    sender_address: String,
    outbox: Arc<Mutex<Vec<DispatchedEmail>>>,
}

impl LoggingEmailSender {
    pub(crate) fn new(config: &NotificationConfig) -> Self {
        Self {
            sender_address: config.sender_address.clone(),
            outbox: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn outbox(&self) -> Vec<DispatchedEmail> {
        self.outbox.lock().expect("outbox mutex poisoned").clone()
    }
}

#[async_trait]
impl EmailSender for LoggingEmailSender {
    async fn send_email(
        &self,
        address: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), EmailError> {
        let dispatched = DispatchedEmail {
            from: self.sender_address.clone(),
            to: address.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            sent_at: Utc::now(),
        };
        info!(from = %dispatched.from, to = %dispatched.to, subject, "email dispatched");
        self.outbox
            .lock()
            .expect("outbox mutex poisoned")
            .push(dispatched);
        Ok(())
    }
}
