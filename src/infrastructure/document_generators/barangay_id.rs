use crate::domain::{
    models::{document::Document, resident::Resident},
    services::document_service::DocumentGenerator,
};

use super::{RULE, issued_block};

/// Barangay identification card
#[derive(Debug, Clone, Copy, Default)]
pub struct BarangayIdGenerator;

impl DocumentGenerator for BarangayIdGenerator {
    fn generate_content(&self, document: &Document, resident: &Resident) -> String {
        let address = resident
            .address
            .as_ref()
            .map(|a| a.full_address())
            .unwrap_or_else(|| "N/A".to_string());

        let mut content = String::new();
        content.push_str(RULE);
        content.push_str("      BARANGAY IDENTIFICATION    \n");
        content.push_str(RULE);
        content.push('\n');
        content.push_str(&format!("ID Number: {}\n\n", document.reference));
        content.push_str(&format!("Name: {}\n", resident.full_name()));
        content.push_str(&format!("Birth Date: {}\n", resident.birth_date));
        content.push_str(&format!("Gender: {}\n", resident.gender));
        content.push_str(&format!("Address: {address}\n\n"));

        if let Some(contact) = &document.additional_info {
            content.push_str(&format!("Emergency Contact: {contact}\n"));
        }

        content.push_str(&format!("\nIssued: {}\n", document.issued_date));
        content.push_str(&issued_block(document));
        content
    }

    fn validate(&self, _document: &Document, resident: &Resident) -> bool {
        resident.is_active
    }
}
