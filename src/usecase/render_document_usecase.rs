use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use crate::{
    domain::{
        error::DomainError,
        models::{document::Document, resident::Resident},
        services::document_service::DocumentGeneratorProvider,
    },
};

/// Printable content plus whether the document is still in force
#[derive(Debug)]
pub struct RenderedDocument {
    pub content: String,
    pub is_valid: bool,
}

pub struct RenderDocumentUsecase<F: DocumentGeneratorProvider> {
    factory: F,
}

impl<F: DocumentGeneratorProvider> RenderDocumentUsecase<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    pub fn render(
        &self,
        document: &Document,
        resident: &Resident,
    ) -> Result<RenderedDocument, DomainError> {
        self.render_on(document, resident, Utc::now().date_naive())
    }

    /// Validate and render a document with the generator for its type,
    /// checking its validity period against `today`
    pub fn render_on(
        &self,
        document: &Document,
        resident: &Resident,
        today: NaiveDate,
    ) -> Result<RenderedDocument, DomainError> {
        let generator = self.factory.create(document.document_type);

        if !generator.validate(document, resident) {
            warn!(
                reference = %document.reference,
                resident_id = %resident.id,
                "document requirements not met"
            );
            return Err(DomainError::DocumentRequirementsNotMet(
                document.document_type.to_string(),
            ));
        }

        let is_valid = document.is_valid_on(today);
        debug!(reference = %document.reference, is_valid, "rendering document");
        Ok(RenderedDocument {
            content: generator.generate_content(document, resident),
            is_valid,
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{
        domain::models::document::DocumentType,
        infrastructure::document_generators::DocumentGeneratorFactory,
        test_support::{sample_document, sample_resident},
    };

    fn usecase() -> RenderDocumentUsecase<DocumentGeneratorFactory> {
        RenderDocumentUsecase::new(DocumentGeneratorFactory::at(
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        ))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_render_positive() {
        let rendered = usecase()
            .render_on(
                &sample_document(DocumentType::CertificateOfResidency),
                &sample_resident(),
                date(2025, 3, 1),
            )
            .unwrap();
        assert!(rendered.content.contains("CERTIFICATE OF RESIDENCY"));
        assert!(rendered.content.contains("34 years old"));
        assert!(rendered.is_valid);
    }

    #[rstest]
    #[case(date(2026, 3, 1), true)]
    #[case(date(2026, 3, 2), false)]
    fn test_render_reports_validity(#[case] today: NaiveDate, #[case] valid: bool) {
        let rendered = usecase()
            .render_on(
                &sample_document(DocumentType::BarangayClearance),
                &sample_resident(),
                today,
            )
            .unwrap();
        assert_eq!(rendered.is_valid, valid);
    }

    #[test]
    fn test_render_without_expiry_is_valid() {
        let mut document = sample_document(DocumentType::BarangayId);
        document.valid_until = None;
        let rendered = usecase()
            .render_on(&document, &sample_resident(), date(2099, 1, 1))
            .unwrap();
        assert!(rendered.is_valid);
    }

    #[test]
    fn test_render_inactive_resident_negative() {
        let mut resident = sample_resident();
        resident.is_active = false;

        let err = usecase()
            .render(&sample_document(DocumentType::BarangayId), &resident)
            .unwrap_err();
        assert_eq!(err.to_string(), "Barangay ID requirements are not met");
    }

    #[test]
    fn test_render_clearance_without_purpose_negative() {
        let mut document = sample_document(DocumentType::BarangayClearance);
        document.purpose = None;

        let result = usecase().render(&document, &sample_resident());
        assert!(matches!(result, Err(DomainError::DocumentRequirementsNotMet(_))));
    }
}
