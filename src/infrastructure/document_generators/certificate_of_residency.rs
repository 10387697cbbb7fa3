use chrono::{Datelike, NaiveDate, Utc};

use crate::domain::{
    models::{document::Document, resident::Resident},
    services::document_service::DocumentGenerator,
};

use super::{RULE, address_or_barangay, purpose_sentence, signed_issued_block};

/// Certificate of residency; age and residency length are computed against
/// `today`, which defaults to the current UTC date.
#[derive(Debug, Clone, Copy, Default)]
pub struct CertificateOfResidencyGenerator {
    today: Option<NaiveDate>,
}

impl CertificateOfResidencyGenerator {
    pub fn new() -> Self {
        Self { today: None }
    }

    pub fn at(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// Whole years and remaining months between two dates
fn elapsed(from: NaiveDate, to: NaiveDate) -> (u32, u32) {
    let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }
    let months = months.max(0) as u32;
    (months / 12, months % 12)
}

fn plural(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

fn residency_duration(from: NaiveDate, to: NaiveDate) -> String {
    match elapsed(from, to) {
        (0, 0) => "less than a month".to_string(),
        (0, months) => plural(months, "month"),
        (years, 0) => plural(years, "year"),
        (years, months) => format!("{} and {}", plural(years, "year"), plural(months, "month")),
    }
}

impl DocumentGenerator for CertificateOfResidencyGenerator {
    fn generate_content(&self, document: &Document, resident: &Resident) -> String {
        let today = self.today();

        let mut content = String::new();
        content.push_str(RULE);
        content.push_str("   CERTIFICATE OF RESIDENCY      \n");
        content.push_str(RULE);
        content.push('\n');
        content.push_str(&format!("Reference No: {}\n\n", document.reference));
        content.push_str("TO WHOM IT MAY CONCERN:\n\n");
        content.push_str(&format!(
            "This is to certify that {}, {} years old, {}, ",
            resident.full_name(),
            resident.age_on(today),
            resident.gender.as_word(),
        ));
        if let Some(status) = resident.civil_status {
            content.push_str(status.as_word());
            content.push_str(", ");
        }
        content.push_str(&format!(
            "is a bona fide resident of {}.\n\n",
            address_or_barangay(resident)
        ));

        content.push_str(&format!(
            "The above-named person has been a resident of this barangay for {}.\n\n",
            residency_duration(resident.registered_at.date_naive(), today)
        ));

        content.push_str(&purpose_sentence(document, "This certification is issued"));
        content.push_str(&signed_issued_block(document));
        content
    }

    fn validate(&self, _document: &Document, resident: &Resident) -> bool {
        resident.is_active
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{
        domain::models::document::DocumentType,
        test_support::{sample_document, sample_resident},
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2024, 1, 10), date(2024, 1, 31), "less than a month")]
    #[case(date(2024, 1, 10), date(2024, 2, 10), "1 month")]
    #[case(date(2024, 1, 10), date(2024, 4, 9), "2 months")]
    #[case(date(2023, 1, 10), date(2024, 1, 10), "1 year")]
    #[case(date(2020, 1, 10), date(2025, 3, 1), "5 years and 1 month")]
    #[case(date(2021, 6, 1), date(2024, 1, 1), "2 years and 7 months")]
    #[case(date(2025, 1, 1), date(2024, 1, 1), "less than a month")]
    fn test_residency_duration(#[case] from: NaiveDate, #[case] to: NaiveDate, #[case] expected: &str) {
        assert_eq!(residency_duration(from, to), expected);
    }

    #[test]
    fn test_residency_content() {
        let document = sample_document(DocumentType::CertificateOfResidency);
        let resident = sample_resident();
        let generator = CertificateOfResidencyGenerator::at(date(2025, 3, 1));

        let content = generator.generate_content(&document, &resident);

        assert!(content.contains("   CERTIFICATE OF RESIDENCY      \n"));
        assert!(content.contains("Reference No: CR-2025-0000000001\n\n"));
        assert!(content.contains(
            "This is to certify that Juan Santos Dela Cruz Jr., 34 years old, male, married, \
             is a bona fide resident of this barangay.\n\n"
        ));
        assert!(content.contains(
            "has been a resident of this barangay for 5 years and 1 month.\n\n"
        ));
        assert!(content.contains(
            "This certification is issued upon request of the interested party for employment.\n\n"
        ));
        assert!(content.contains("Issued By: clerk01\n"));
    }

    #[test]
    fn test_residency_without_civil_status() {
        let document = sample_document(DocumentType::CertificateOfResidency);
        let mut resident = sample_resident();
        resident.civil_status = None;

        let content = CertificateOfResidencyGenerator::at(date(2025, 3, 1))
            .generate_content(&document, &resident);
        assert!(content.contains("34 years old, male, is a bona fide resident"));
    }

    #[test]
    fn test_residency_requires_active_resident() {
        let document = sample_document(DocumentType::CertificateOfResidency);
        let mut resident = sample_resident();
        let generator = CertificateOfResidencyGenerator::new();
        assert!(generator.validate(&document, &resident));

        resident.is_active = false;
        assert!(!generator.validate(&document, &resident));
    }
}
