//! The disclosure filter.
//!
//! Pure projection from a stored record to what an anonymous scanner may
//! see. Diseases and allergies pass only with clinician attestation, and
//! the attestation travels with the fact; prescriptions pass only while
//! active. No store or clock access happens here.

use carelink_store::{ClinicianRef, MedicalRecord};
use carelink_types::Timestamp;
use serde::{Deserialize, Serialize};

/// A clinician-verified disease, with its provenance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisclosedDisease {
    pub name: String,
    pub severity: Option<String>,
    pub diagnosed_at: Option<Timestamp>,
    pub verified_by: ClinicianRef,
    pub verified_at: Timestamp,
}

/// A clinician-verified allergy, with its provenance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisclosedAllergy {
    pub name: String,
    pub severity: Option<String>,
    pub reaction: Option<String>,
    pub verified_by: ClinicianRef,
    pub verified_at: Timestamp,
}

/// An active prescription.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisclosedPrescription {
    pub medication: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub prescribed_by: Option<ClinicianRef>,
    pub prescribed_at: Option<Timestamp>,
}

/// The filtered record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DisclosedRecord {
    pub diseases: Vec<DisclosedDisease>,
    pub allergies: Vec<DisclosedAllergy>,
    pub prescriptions: Vec<DisclosedPrescription>,
    pub last_verified_at: Option<Timestamp>,
    pub last_verified_by: Option<ClinicianRef>,
}

/// Project a stored record down to its disclosable subset, preserving
/// stored order.
pub fn filter_record(record: &MedicalRecord) -> DisclosedRecord {
    let diseases = record
        .diseases
        .iter()
        .filter_map(|d| {
            d.verification.as_ref().map(|v| DisclosedDisease {
                name: d.name.clone(),
                severity: d.severity.clone(),
                diagnosed_at: d.diagnosed_at,
                verified_by: v.clinician.clone(),
                verified_at: v.verified_at,
            })
        })
        .collect();

    let allergies = record
        .allergies
        .iter()
        .filter_map(|a| {
            a.verification.as_ref().map(|v| DisclosedAllergy {
                name: a.name.clone(),
                severity: a.severity.clone(),
                reaction: a.reaction.clone(),
                verified_by: v.clinician.clone(),
                verified_at: v.verified_at,
            })
        })
        .collect();

    let prescriptions = record
        .prescriptions
        .iter()
        .filter(|p| p.active)
        .map(|p| DisclosedPrescription {
            medication: p.medication.clone(),
            dosage: p.dosage.clone(),
            frequency: p.frequency.clone(),
            prescribed_by: p.prescribed_by.clone(),
            prescribed_at: p.prescribed_at,
        })
        .collect();

    DisclosedRecord {
        diseases,
        allergies,
        prescriptions,
        last_verified_at: record.last_verified_at,
        last_verified_by: record.last_verified_by.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carelink_store::{AllergyEntry, DiseaseEntry, PrescriptionEntry, VerificationEvidence};

    fn dr_mehta() -> ClinicianRef {
        ClinicianRef {
            name: "Dr. Mehta".to_string(),
            specialization: Some("cardiology".to_string()),
        }
    }

    fn attested(at: u64) -> Option<VerificationEvidence> {
        Some(VerificationEvidence {
            clinician: dr_mehta(),
            verified_at: Timestamp::new(at),
        })
    }

    fn disease(name: &str, verification: Option<VerificationEvidence>) -> DiseaseEntry {
        DiseaseEntry {
            name: name.to_string(),
            severity: None,
            diagnosed_at: None,
            verification,
        }
    }

    #[test]
    fn self_reported_diseases_are_dropped() {
        let record = MedicalRecord {
            diseases: vec![
                disease("hypertension", attested(100)),
                disease("migraine", None),
            ],
            ..MedicalRecord::default()
        };
        let out = filter_record(&record);
        assert_eq!(out.diseases.len(), 1);
        assert_eq!(out.diseases[0].name, "hypertension");
        assert_eq!(out.diseases[0].verified_by, dr_mehta());
    }

    #[test]
    fn unverified_allergies_are_dropped() {
        let record = MedicalRecord {
            allergies: vec![
                AllergyEntry {
                    name: "penicillin".to_string(),
                    severity: Some("severe".to_string()),
                    reaction: Some("anaphylaxis".to_string()),
                    verification: attested(200),
                },
                AllergyEntry {
                    name: "dust".to_string(),
                    severity: None,
                    reaction: None,
                    verification: None,
                },
            ],
            ..MedicalRecord::default()
        };
        let out = filter_record(&record);
        assert_eq!(out.allergies.len(), 1);
        assert_eq!(out.allergies[0].name, "penicillin");
        assert_eq!(out.allergies[0].verified_at, Timestamp::new(200));
    }

    #[test]
    fn inactive_prescriptions_are_dropped() {
        let record = MedicalRecord {
            prescriptions: vec![
                PrescriptionEntry {
                    medication: "metformin".to_string(),
                    dosage: Some("500mg".to_string()),
                    frequency: Some("twice daily".to_string()),
                    prescribed_by: Some(dr_mehta()),
                    prescribed_at: Some(Timestamp::new(50)),
                    active: true,
                },
                PrescriptionEntry {
                    medication: "amoxicillin".to_string(),
                    dosage: None,
                    frequency: None,
                    prescribed_by: None,
                    prescribed_at: None,
                    active: false,
                },
            ],
            ..MedicalRecord::default()
        };
        let out = filter_record(&record);
        assert_eq!(out.prescriptions.len(), 1);
        assert_eq!(out.prescriptions[0].medication, "metformin");
    }

    #[test]
    fn fully_self_reported_record_discloses_nothing() {
        let record = MedicalRecord {
            diseases: vec![disease("migraine", None)],
            allergies: vec![AllergyEntry {
                name: "dust".to_string(),
                severity: None,
                reaction: None,
                verification: None,
            }],
            prescriptions: vec![PrescriptionEntry {
                medication: "ibuprofen".to_string(),
                dosage: None,
                frequency: None,
                prescribed_by: None,
                prescribed_at: None,
                active: false,
            }],
            ..MedicalRecord::default()
        };
        let out = filter_record(&record);
        assert!(out.diseases.is_empty());
        assert!(out.allergies.is_empty());
        assert!(out.prescriptions.is_empty());
    }

    #[test]
    fn stored_order_is_preserved() {
        let record = MedicalRecord {
            diseases: vec![
                disease("a", attested(1)),
                disease("b", None),
                disease("c", attested(2)),
            ],
            ..MedicalRecord::default()
        };
        let names: Vec<_> = filter_record(&record)
            .diseases
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["a", "c"]);
    }
}
