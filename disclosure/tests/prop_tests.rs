//! Property tests for the disclosure filter.

use carelink_disclosure::filter_record;
use carelink_store::{
    AllergyEntry, ClinicianRef, DiseaseEntry, MedicalRecord, PrescriptionEntry,
    VerificationEvidence,
};
use carelink_types::Timestamp;
use proptest::prelude::*;

fn arb_verification() -> impl Strategy<Value = Option<VerificationEvidence>> {
    prop_oneof![
        Just(None),
        (any::<u32>(), "[A-Za-z ]{1,20}").prop_map(|(at, name)| {
            Some(VerificationEvidence {
                clinician: ClinicianRef {
                    name,
                    specialization: None,
                },
                verified_at: Timestamp::new(at as u64),
            })
        }),
    ]
}

fn arb_disease() -> impl Strategy<Value = DiseaseEntry> {
    ("[a-z]{1,16}", arb_verification()).prop_map(|(name, verification)| DiseaseEntry {
        name,
        severity: None,
        diagnosed_at: None,
        verification,
    })
}

fn arb_allergy() -> impl Strategy<Value = AllergyEntry> {
    ("[a-z]{1,16}", arb_verification()).prop_map(|(name, verification)| AllergyEntry {
        name,
        severity: None,
        reaction: None,
        verification,
    })
}

fn arb_prescription() -> impl Strategy<Value = PrescriptionEntry> {
    ("[a-z]{1,16}", any::<bool>()).prop_map(|(medication, active)| PrescriptionEntry {
        medication,
        dosage: None,
        frequency: None,
        prescribed_by: None,
        prescribed_at: None,
        active,
    })
}

fn arb_record() -> impl Strategy<Value = MedicalRecord> {
    (
        prop::collection::vec(arb_disease(), 0..8),
        prop::collection::vec(arb_allergy(), 0..8),
        prop::collection::vec(arb_prescription(), 0..8),
    )
        .prop_map(|(diseases, allergies, prescriptions)| MedicalRecord {
            diseases,
            allergies,
            prescriptions,
            ..MedicalRecord::default()
        })
}

proptest! {
    /// Everything disclosed traces back to an attested or active entry.
    #[test]
    fn disclosed_facts_are_a_subset_of_attested_input(record in arb_record()) {
        let out = filter_record(&record);

        let verified_diseases: Vec<_> = record
            .diseases
            .iter()
            .filter(|d| d.verification.is_some())
            .map(|d| d.name.clone())
            .collect();
        let disclosed: Vec<_> = out.diseases.iter().map(|d| d.name.clone()).collect();
        prop_assert_eq!(disclosed, verified_diseases);

        let verified_allergies = record
            .allergies
            .iter()
            .filter(|a| a.verification.is_some())
            .count();
        prop_assert_eq!(out.allergies.len(), verified_allergies);

        for p in &out.prescriptions {
            prop_assert!(record
                .prescriptions
                .iter()
                .any(|orig| orig.active && orig.medication == p.medication));
        }
    }

    /// A record with no attestations and no active prescriptions discloses
    /// nothing at all.
    #[test]
    fn unattested_record_discloses_nothing(mut record in arb_record()) {
        for d in &mut record.diseases {
            d.verification = None;
        }
        for a in &mut record.allergies {
            a.verification = None;
        }
        for p in &mut record.prescriptions {
            p.active = false;
        }
        let out = filter_record(&record);
        prop_assert!(out.diseases.is_empty());
        prop_assert!(out.allergies.is_empty());
        prop_assert!(out.prescriptions.is_empty());
    }

    /// Provenance is carried through unchanged for every disclosed fact.
    #[test]
    fn provenance_travels_with_the_fact(record in arb_record()) {
        let out = filter_record(&record);
        let attested: Vec<_> = record
            .diseases
            .iter()
            .filter_map(|d| d.verification.as_ref())
            .collect();
        for (disclosed, evidence) in out.diseases.iter().zip(attested) {
            prop_assert_eq!(&disclosed.verified_by, &evidence.clinician);
            prop_assert_eq!(disclosed.verified_at, evidence.verified_at);
        }
    }
}
