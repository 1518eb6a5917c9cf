use async_trait::async_trait;

use super::domain::{MedicationRequest, MedicationRequestId};

/// Lookup abstraction so the processor can run against any store.
#[async_trait]
pub trait MedicationRequestRepository: Send + Sync {
    /// Returns `Ok(None)` when no request exists for `id`.
    async fn get_one(
        &self,
        id: MedicationRequestId,
    ) -> Result<Option<MedicationRequest>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
