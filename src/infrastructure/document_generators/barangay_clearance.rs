use crate::domain::{
    models::{document::Document, resident::Resident},
    services::document_service::DocumentGenerator,
};

use super::{RULE, address_or_barangay, purpose_sentence, signed_issued_block};

#[derive(Debug, Clone, Copy, Default)]
pub struct BarangayClearanceGenerator;

impl DocumentGenerator for BarangayClearanceGenerator {
    fn generate_content(&self, document: &Document, resident: &Resident) -> String {
        let mut content = String::new();
        content.push_str(RULE);
        content.push_str("      BARANGAY CLEARANCE         \n");
        content.push_str(RULE);
        content.push('\n');
        content.push_str(&format!("Reference No: {}\n\n", document.reference));
        content.push_str("TO WHOM IT MAY CONCERN:\n\n");
        content.push_str(&format!(
            "This is to certify that {}, of legal age, {}, Filipino, and a resident of {} \
             is personally known to me and is of good moral character.\n\n",
            resident.full_name(),
            resident.gender.as_word(),
            address_or_barangay(resident),
        ));
        content.push_str(&purpose_sentence(document, "This clearance is being issued"));
        content.push_str(&signed_issued_block(document));
        content
    }

    fn validate(&self, document: &Document, resident: &Resident) -> bool {
        resident.is_active && document.purpose.is_some()
    }
}
