pub mod barangay_clearance;
pub mod barangay_id;
pub mod certificate_of_residency;

use chrono::NaiveDate;

use crate::domain::{
    models::{
        document::{Document, DocumentType},
        resident::Resident,
    },
    services::document_service::{DocumentGenerator, DocumentGeneratorProvider},
};

use self::{
    barangay_clearance::BarangayClearanceGenerator, barangay_id::BarangayIdGenerator,
    certificate_of_residency::CertificateOfResidencyGenerator,
};

const RULE: &str = "=================================\n";

/// Picks the generator for a document type
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentGeneratorFactory {
    today: Option<NaiveDate>,
}

impl DocumentGeneratorFactory {
    pub fn new() -> Self {
        Self { today: None }
    }

    /// Generators created by this factory treat `today` as the current date
    pub fn at(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }
}

impl DocumentGeneratorProvider for DocumentGeneratorFactory {
    fn create(&self, document_type: DocumentType) -> Box<dyn DocumentGenerator> {
        match document_type {
            DocumentType::BarangayId => Box::new(BarangayIdGenerator),
            DocumentType::BarangayClearance => Box::new(BarangayClearanceGenerator),
            DocumentType::CertificateOfResidency => Box::new(match self.today {
                Some(today) => CertificateOfResidencyGenerator::at(today),
                None => CertificateOfResidencyGenerator::new(),
            }),
        }
    }
}

fn address_or_barangay(resident: &Resident) -> String {
    resident
        .address
        .as_ref()
        .map(|a| a.full_address())
        .unwrap_or_else(|| "this barangay".to_string())
}

fn purpose_sentence(document: &Document, lead: &str) -> String {
    match document.purpose().filter(|p| !p.is_empty()) {
        Some(purpose) => format!(
            "{lead} upon request of the interested party for {purpose}.\n\n"
        ),
        None => String::new(),
    }
}

fn valid_until_line(document: &Document) -> String {
    document
        .valid_until
        .map(|until| format!("Valid Until: {until}\n"))
        .unwrap_or_default()
}

fn issued_block(document: &Document) -> String {
    format!(
        "{}\nIssued By: {}\n",
        valid_until_line(document),
        document.issued_by
    )
}

fn signed_issued_block(document: &Document) -> String {
    format!(
        "Issued this {}.\n{}\n\nIssued By: {}\n\n_______________________\nAuthorized Signature\n",
        document.issued_date,
        valid_until_line(document),
        document.issued_by
    )
}
