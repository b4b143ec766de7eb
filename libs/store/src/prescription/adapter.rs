use chain::event::{PrescriptionCreated, PrescriptionDispensed, PrescriptionUpdated};

use crate::prescription::model::{NewPrescription, PrescriptionDispense, PrescriptionUpdate};
use crate::utils::address_to_string;

impl NewPrescription {
    pub fn from_event(event: &PrescriptionCreated, raw_event: String) -> Self {
        Self {
            id: event.id,
            patient_hash: event.patient_hash.clone(),
            doctor: address_to_string(&event.doctor),
            expires_at: event.expires_at,
            created_at: event.created_at,
            raw_event,
        }
    }
}

impl PrescriptionUpdate {
    pub fn from_event(event: &PrescriptionUpdated, raw_event: String) -> Self {
        Self {
            id: event.id,
            updated_at: event.updated_at,
            reason: event.reason.clone(),
            raw_event,
        }
    }
}

impl PrescriptionDispense {
    pub fn from_event(event: &PrescriptionDispensed, raw_event: String) -> Self {
        Self {
            id: event.id,
            dispensed_by: address_to_string(&event.pharmacist),
            dispensed_at: event.dispensed_at,
            raw_event,
        }
    }
}
