//! Activity category classification.
//!
//! A pure, total function: every activity name maps to exactly one label
//! from the closed [`ActivityClass`] set. Classification is an ordered chain
//! of keyword-membership predicates (case-insensitive substring match);
//! precedence is the list order below and the first matching category wins.

use soa_model::ActivityClass;

/// Ordered (category, keywords) precedence table. Auditable as data.
const KEYWORDS: &[(ActivityClass, &[&str])] = &[
    (
        ActivityClass::Imaging,
        &["imaging", "ct/mri", "ct scan", "mri", "x-ray", "pet", "bone scan", "scan"],
    ),
    (
        ActivityClass::Labs,
        &[
            "hematology",
            "cbc",
            "chemistry",
            "cmp",
            "urinalysis",
            "tumor markers",
            "coagulation",
        ],
    ),
    (
        ActivityClass::Pharmacokinetics,
        &["pharmacokinetic", "pk sampling", "pk sample"],
    ),
    (
        ActivityClass::Pathology,
        &["biopsy", "tumor tissue", "histology", "pathology"],
    ),
    (
        ActivityClass::Dosing,
        &[
            "study drug administration",
            "dose",
            "infusion",
            "premedication",
            "drug accountability",
            "administration",
        ],
    ),
    (
        ActivityClass::Vitals,
        &[
            "vital signs",
            "vital",
            "ecg",
            "echocardiogram",
            "muga",
            "physical exam",
            "blood pressure",
        ],
    ),
    (
        ActivityClass::AdverseEvent,
        &["adverse event", "toxicity assessment"],
    ),
    (
        ActivityClass::PatientReported,
        &["patient-reported", "patient reported", "eortc", "questionnaire"],
    ),
    (ActivityClass::PerformanceStatus, &["ecog", "karnofsky", "performance status"]),
    (
        ActivityClass::Admin,
        &[
            "informed consent",
            "consent",
            "demograph",
            "randomization",
            "concomitant medication",
            "height",
            "weight",
            "pregnancy test",
            "medical history",
        ],
    ),
];

/// Classify an activity name. Never fails; unmatched names are `other`.
pub fn classify_activity(name: &str) -> ActivityClass {
    let lower = name.to_lowercase();
    for (category, keywords) in KEYWORDS {
        if keywords.iter().any(|keyword| lower.contains(keyword)) {
            return *category;
        }
    }
    ActivityClass::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imaging_keywords() {
        assert_eq!(classify_activity("Imaging (CT/MRI)"), ActivityClass::Imaging);
        assert_eq!(classify_activity("Brain MRI"), ActivityClass::Imaging);
        assert_eq!(classify_activity("Chest X-ray"), ActivityClass::Imaging);
    }

    #[test]
    fn labs_keywords() {
        assert_eq!(classify_activity("Hematology (CBC)"), ActivityClass::Labs);
        assert_eq!(classify_activity("Urinalysis"), ActivityClass::Labs);
    }

    #[test]
    fn dosing_and_admin() {
        assert_eq!(
            classify_activity("Study Drug Administration"),
            ActivityClass::Dosing
        );
        assert_eq!(classify_activity("Informed Consent"), ActivityClass::Admin);
        assert_eq!(classify_activity("Demographics"), ActivityClass::Admin);
    }

    #[test]
    fn vitals_keywords() {
        assert_eq!(classify_activity("Vital Signs"), ActivityClass::Vitals);
        assert_eq!(classify_activity("12-lead ECG"), ActivityClass::Vitals);
    }

    #[test]
    fn unmatched_is_other() {
        assert_eq!(classify_activity("Telephone contact"), ActivityClass::Other);
        assert_eq!(classify_activity(""), ActivityClass::Other);
    }

    #[test]
    fn precedence_is_list_order() {
        // "Tumor tissue biopsy during infusion visit" hits pathology before
        // dosing because pathology precedes dosing in the table.
        assert_eq!(
            classify_activity("Tumor tissue biopsy during infusion visit"),
            ActivityClass::Pathology
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let name = "Pharmacokinetic sampling";
        let first = classify_activity(name);
        for _ in 0..10 {
            assert_eq!(classify_activity(name), first);
        }
        assert_eq!(first, ActivityClass::Pharmacokinetics);
    }
}
