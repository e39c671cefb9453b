//! Intake validation
//!
//! Turns a raw triage request, as the boundary layer deserialized it, into a
//! [`NewAttendance`]. Every field is checked and all failures are reported
//! together, keyed by field name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{LiveOpsError, LiveOpsResult};
use crate::models::{NewAttendance, Patient, RiskClassification};

/// Maximum length of the unit identifier
pub const MAX_HEALTH_UNIT_ID_LENGTH: usize = 64;

/// Maximum length of the patient name
pub const MAX_PATIENT_NAME_LENGTH: usize = 255;

/// Maximum length of the patient document
pub const MAX_PATIENT_DOCUMENT_LENGTH: usize = 32;

/// Raw intake input; any field may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageRequest {
    pub health_unit_id: Option<String>,
    pub patient_name: Option<String>,
    pub patient_document: Option<String>,
    pub risk_classification: Option<String>,
}

impl TriageRequest {
    pub fn new(
        health_unit_id: impl Into<String>,
        patient_name: impl Into<String>,
        patient_document: impl Into<String>,
        risk_classification: RiskClassification,
    ) -> Self {
        Self {
            health_unit_id: Some(health_unit_id.into()),
            patient_name: Some(patient_name.into()),
            patient_document: Some(patient_document.into()),
            risk_classification: Some(risk_classification.as_str().to_string()),
        }
    }
}

/// Validate a triage request and stamp its entry time
pub fn validate_triage_request(
    request: &TriageRequest,
    now: DateTime<Utc>,
) -> LiveOpsResult<NewAttendance> {
    let mut errors = BTreeMap::new();

    let health_unit_id = required_text(
        &mut errors,
        "healthUnitId",
        request.health_unit_id.as_deref(),
        "Health Unit ID is required",
        MAX_HEALTH_UNIT_ID_LENGTH,
    );
    let patient_name = required_text(
        &mut errors,
        "patientName",
        request.patient_name.as_deref(),
        "Patient name is required",
        MAX_PATIENT_NAME_LENGTH,
    );
    let patient_document = required_text(
        &mut errors,
        "patientDocument",
        request.patient_document.as_deref(),
        "Patient document is required",
        MAX_PATIENT_DOCUMENT_LENGTH,
    );

    let risk_classification = match request.risk_classification.as_deref().map(str::trim) {
        None | Some("") => {
            errors.insert(
                "riskClassification".to_string(),
                "Risk classification is required".to_string(),
            );
            None
        }
        Some(raw) => match raw.parse::<RiskClassification>() {
            Ok(risk) => Some(risk),
            Err(e) => {
                errors.insert("riskClassification".to_string(), e);
                None
            }
        },
    };

    match (
        health_unit_id,
        patient_name,
        patient_document,
        risk_classification,
    ) {
        (Some(health_unit_id), Some(name), Some(document), Some(risk_classification))
            if errors.is_empty() =>
        {
            Ok(NewAttendance {
                health_unit_id,
                patient: Patient::new(name, document),
                risk_classification,
                entry_time: now,
            })
        }
        _ => Err(LiveOpsError::Validation { fields: errors }),
    }
}

fn required_text(
    errors: &mut BTreeMap<String, String>,
    field: &str,
    value: Option<&str>,
    missing_message: &str,
    max_length: usize,
) -> Option<String> {
    let trimmed = value.map(str::trim).unwrap_or_default();

    if trimmed.is_empty() {
        errors.insert(field.to_string(), missing_message.to_string());
        return None;
    }

    if trimmed.chars().count() > max_length {
        errors.insert(
            field.to_string(),
            format!("Must be at most {max_length} characters"),
        );
        return None;
    }

    Some(trimmed.to_string())
}
