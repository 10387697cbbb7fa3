use crate::domain::models::{
    document::{Document, DocumentType},
    resident::Resident,
};

/// Strategy for rendering one type of barangay document
pub trait DocumentGenerator: Send + Sync {
    /// Printable content of the document for the given resident
    fn generate_content(&self, document: &Document, resident: &Resident) -> String;

    /// Whether the document-specific requirements hold
    fn validate(&self, document: &Document, resident: &Resident) -> bool;
}

/// Selects the generator responsible for a document type
pub trait DocumentGeneratorProvider: Send + Sync {
    fn create(&self, document_type: DocumentType) -> Box<dyn DocumentGenerator>;
}
