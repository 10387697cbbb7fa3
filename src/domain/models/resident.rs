use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Resident identifier, `BR-YYYY-XXXXXXXXXX`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResidentId(String);

impl ResidentId {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if !matches_serial_format(&value, &["BR"]) {
            return Err(DomainError::InvalidResidentId(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ResidentId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ResidentId> for String {
    fn from(id: ResidentId) -> Self {
        id.0
    }
}

impl fmt::Display for ResidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks `PREFIX-YYYY-XXXXXXXXXX` against the allowed prefixes
pub(crate) fn matches_serial_format(value: &str, prefixes: &[&str]) -> bool {
    let mut parts = value.split('-');
    let (Some(prefix), Some(year), Some(serial), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    prefixes.contains(&prefix)
        && year.len() == 4
        && year.bytes().all(|b| b.is_ascii_digit())
        && serial.len() == 10
        && serial.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Lower-case word used inside certification sentences
    pub fn as_word(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => f.write_str("Male"),
            Gender::Female => f.write_str("Female"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CivilStatus {
    Single,
    Married,
    Widowed,
    Separated,
    Divorced,
}

impl CivilStatus {
    pub fn as_word(&self) -> &'static str {
        match self {
            CivilStatus::Single => "single",
            CivilStatus::Married => "married",
            CivilStatus::Widowed => "widowed",
            CivilStatus::Separated => "separated",
            CivilStatus::Divorced => "divorced",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub house_number: Option<String>,
    pub street: Option<String>,
    pub purok: Option<String>,
    pub barangay: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
}

impl Address {
    pub fn full_address(&self) -> String {
        fn present(part: &Option<String>) -> Option<&str> {
            part.as_deref().filter(|s| !s.is_empty())
        }

        let mut out = String::new();
        if let Some(house) = present(&self.house_number) {
            out.push_str(house);
            out.push(' ');
        }
        if let Some(street) = present(&self.street) {
            out.push_str(street);
            out.push_str(", ");
        }
        if let Some(purok) = present(&self.purok) {
            out.push_str("Purok ");
            out.push_str(purok);
            out.push_str(", ");
        }
        if let Some(barangay) = present(&self.barangay) {
            out.push_str("Barangay ");
            out.push_str(barangay);
            out.push_str(", ");
        }
        if let Some(city) = present(&self.city) {
            out.push_str(city);
            out.push_str(", ");
        }
        if let Some(province) = present(&self.province) {
            out.push_str(province);
        }
        out.trim().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resident {
    pub id: ResidentId,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub suffix: Option<String>,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    #[serde(default)]
    pub civil_status: Option<CivilStatus>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    pub registered_at: DateTime<Utc>,
}

fn active_by_default() -> bool {
    true
}

impl Resident {
    pub fn full_name(&self) -> String {
        let mut name = self.first_name.clone();
        if let Some(middle) = self.middle_name.as_deref().filter(|s| !s.is_empty()) {
            name.push(' ');
            name.push_str(middle);
        }
        name.push(' ');
        name.push_str(&self.last_name);
        if let Some(suffix) = self.suffix.as_deref().filter(|s| !s.is_empty()) {
            name.push(' ');
            name.push_str(suffix);
        }
        name
    }

    /// Completed years of age on the given date
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        date.years_since(self.birth_date).unwrap_or(0)
    }
}
