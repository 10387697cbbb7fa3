use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    models::resident::{ResidentId, matches_serial_format},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    BarangayId,
    BarangayClearance,
    CertificateOfResidency,
}

impl DocumentType {
    /// Prefix of reference numbers issued for this type
    pub fn reference_prefix(&self) -> &'static str {
        match self {
            DocumentType::BarangayId => "BID",
            DocumentType::BarangayClearance => "BC",
            DocumentType::CertificateOfResidency => "CR",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentType::BarangayId => "Barangay ID",
            DocumentType::BarangayClearance => "Barangay Clearance",
            DocumentType::CertificateOfResidency => "Certificate of Residency",
        };
        f.write_str(name)
    }
}

/// Document reference number, `(BID|BC|CR)-YYYY-XXXXXXXXXX`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentReference(String);

impl DocumentReference {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if !matches_serial_format(&value, &["BID", "BC", "CR"]) {
            return Err(DomainError::InvalidDocumentReference(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DocumentReference {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DocumentReference> for String {
    fn from(reference: DocumentReference) -> Self {
        reference.0
    }
}

impl fmt::Display for DocumentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An issued barangay document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub reference: DocumentReference,
    pub resident_id: ResidentId,
    pub document_type: DocumentType,
    #[serde(default)]
    pub purpose: Option<String>,
    pub issued_date: NaiveDate,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    /// Username of the issuing official
    pub issued_by: String,
    /// Free-form document specific data, e.g. an emergency contact on IDs
    #[serde(default)]
    pub additional_info: Option<String>,
}

impl Document {
    /// Documents without an expiry never lapse
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.valid_until.is_none_or(|until| date <= until)
    }

    pub fn purpose(&self) -> Option<&str> {
        self.purpose.as_deref()
    }
}
