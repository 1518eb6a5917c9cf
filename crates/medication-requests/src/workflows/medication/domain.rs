use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned to a request by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MedicationRequestId(pub u64);

impl fmt::Display for MedicationRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inventory record as it stood when the request was looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    /// Units currently on hand.
    pub quantity: u32,
}

/// A patient's ask for a quantity of a named medication.
///
/// The embedded [`Medication`] is a snapshot taken at lookup time and is authoritative for a
/// single processing attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicationRequest {
    pub id: MedicationRequestId,
    pub patient_name: String,
    pub patient_email: String,
    pub quantity: u32,
    pub medication: Medication,
}

/// Intake payload used by stores that assign identifiers on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMedicationRequest {
    pub patient_name: String,
    pub patient_email: String,
    pub quantity: u32,
    pub medication: Medication,
}

impl NewMedicationRequest {
    pub fn with_id(self, id: MedicationRequestId) -> MedicationRequest {
        MedicationRequest {
            id,
            patient_name: self.patient_name,
            patient_email: self.patient_email,
            quantity: self.quantity,
            medication: self.medication,
        }
    }
}

/// Summary returned after a request passes validation and the patient was notified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    pub medication_name: String,
    pub message: String,
}

impl ProcessingResult {
    pub(crate) fn for_request(request: &MedicationRequest) -> Self {
        Self {
            medication_name: request.medication.name.clone(),
            message: format!(
                "Medication request {} for {} x{} successfully processed",
                request.id, request.medication.name, request.quantity
            ),
        }
    }
}
