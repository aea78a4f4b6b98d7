//! The medical profile record.
//!
//! A [`ProfileRecord`] is a flat set of free-text fields. Persisted records are
//! JSON objects keyed by the camelCase names in [`ProfileField::key`], and are
//! always read by merging whatever keys are present over [`ProfileRecord::default`].

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RecordError;

/// Default text for fields that mean "nothing to report" rather than "unknown".
pub const NONE_REPORTED: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileRecord {
    pub full_name: String,
    pub date_of_birth: String,
    pub blood_type: String,
    pub allergies: String,
    pub current_medications: String,
    pub primary_physician: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
}

impl Default for ProfileRecord {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            date_of_birth: String::new(),
            blood_type: String::new(),
            allergies: NONE_REPORTED.to_string(),
            current_medications: NONE_REPORTED.to_string(),
            primary_physician: String::new(),
            emergency_contact: String::new(),
            emergency_phone: String::new(),
        }
    }
}

/// The editable fields of a [`ProfileRecord`], in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    FullName,
    DateOfBirth,
    BloodType,
    Allergies,
    CurrentMedications,
    PrimaryPhysician,
    EmergencyContact,
    EmergencyPhone,
}

impl ProfileField {
    pub const ALL: [ProfileField; 8] = [
        ProfileField::FullName,
        ProfileField::DateOfBirth,
        ProfileField::BloodType,
        ProfileField::Allergies,
        ProfileField::CurrentMedications,
        ProfileField::PrimaryPhysician,
        ProfileField::EmergencyContact,
        ProfileField::EmergencyPhone,
    ];

    /// Key used for this field in the persisted JSON object.
    pub fn key(self) -> &'static str {
        match self {
            ProfileField::FullName => "fullName",
            ProfileField::DateOfBirth => "dateOfBirth",
            ProfileField::BloodType => "bloodType",
            ProfileField::Allergies => "allergies",
            ProfileField::CurrentMedications => "currentMedications",
            ProfileField::PrimaryPhysician => "primaryPhysician",
            ProfileField::EmergencyContact => "emergencyContact",
            ProfileField::EmergencyPhone => "emergencyPhone",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::FullName => "Full Name",
            ProfileField::DateOfBirth => "Date of Birth",
            ProfileField::BloodType => "Blood Type",
            ProfileField::Allergies => "Allergies",
            ProfileField::CurrentMedications => "Current Medications",
            ProfileField::PrimaryPhysician => "Primary Physician",
            ProfileField::EmergencyContact => "Emergency Contact",
            ProfileField::EmergencyPhone => "Emergency Phone",
        }
    }

    /// Hint shown in an empty input.
    pub fn placeholder(self) -> &'static str {
        match self {
            ProfileField::FullName => "Enter your full name",
            ProfileField::DateOfBirth => "YYYY-MM-DD",
            ProfileField::BloodType => "e.g. A+, O-",
            ProfileField::Allergies => "List any allergies",
            ProfileField::CurrentMedications => "List current medications",
            ProfileField::PrimaryPhysician => "Doctor's name",
            ProfileField::EmergencyContact => "Contact name",
            ProfileField::EmergencyPhone => "Phone number",
        }
    }

    pub fn is_required(self) -> bool {
        self == ProfileField::FullName
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Position of this field in [`ProfileField::ALL`].
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|f| *f == self)
            .unwrap_or_default()
    }

    /// The following field, wrapping to the first.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The preceding field, wrapping to the last.
    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}

impl ProfileRecord {
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FullName => &self.full_name,
            ProfileField::DateOfBirth => &self.date_of_birth,
            ProfileField::BloodType => &self.blood_type,
            ProfileField::Allergies => &self.allergies,
            ProfileField::CurrentMedications => &self.current_medications,
            ProfileField::PrimaryPhysician => &self.primary_physician,
            ProfileField::EmergencyContact => &self.emergency_contact,
            ProfileField::EmergencyPhone => &self.emergency_phone,
        }
    }

    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    fn slot_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::FullName => &mut self.full_name,
            ProfileField::DateOfBirth => &mut self.date_of_birth,
            ProfileField::BloodType => &mut self.blood_type,
            ProfileField::Allergies => &mut self.allergies,
            ProfileField::CurrentMedications => &mut self.current_medications,
            ProfileField::PrimaryPhysician => &mut self.primary_physician,
            ProfileField::EmergencyContact => &mut self.emergency_contact,
            ProfileField::EmergencyPhone => &mut self.emergency_phone,
        }
    }

    pub fn has_full_name(&self) -> bool {
        !self.full_name.is_empty()
    }

    /// Decode persisted text by shallow-merging it over the defaults.
    ///
    /// Missing keys keep their defaults and unknown keys are ignored. A JSON
    /// `null` reads as an empty record. Anything that is not a JSON object, or
    /// a known key holding a non-string value, is an error.
    pub fn merged_over_defaults(text: &str) -> Result<Self, RecordError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| RecordError::Malformed(e.to_string()))?;

        let mut record = Self::default();
        match value {
            Value::Object(object) => {
                record.merge_object(&object)?;
                Ok(record)
            }
            Value::Null => Ok(record),
            _ => Err(RecordError::NotAnObject),
        }
    }

    /// Overwrite every field present in `object`. Returns the number of
    /// fields replaced.
    ///
    /// Fails on the first known key whose value is not a string; fields
    /// merged before it stay replaced.
    pub fn merge_object(&mut self, object: &Map<String, Value>) -> Result<usize, RecordError> {
        let mut replaced = 0;
        for (key, value) in object {
            let Some(field) = ProfileField::from_key(key) else {
                tracing::debug!(key = key.as_str(), "Ignoring unknown profile key");
                continue;
            };
            match value {
                Value::String(text) => {
                    self.set(field, text.as_str());
                    replaced += 1;
                }
                other => {
                    tracing::warn!(
                        key = key.as_str(),
                        found = json_type_name(other),
                        "Profile value is not text"
                    );
                    return Err(RecordError::FieldNotText {
                        key: key.clone(),
                        found: json_type_name(other),
                    });
                }
            }
        }
        Ok(replaced)
    }

    /// Encode as the flat JSON object that [`merged_over_defaults`](Self::merged_over_defaults) reads.
    pub fn to_json(&self) -> Result<String, RecordError> {
        serde_json::to_string(self).map_err(|e| RecordError::Serialize(e.to_string()))
    }

    /// Parse the date of birth as `YYYY-MM-DD`, if it is one.
    pub fn birth_date(&self) -> Option<Date> {
        self.date_of_birth.trim().parse::<Date>().ok()
    }

    /// Age in whole years on `today`. `None` when the date of birth does not
    /// parse or lies in the future.
    pub fn age_on(&self, today: Date) -> Option<i16> {
        let born = self.birth_date()?;
        if born > today {
            return None;
        }
        let mut years = today.year() - born.year();
        if (today.month(), today.day()) < (born.month(), born.day()) {
            years -= 1;
        }
        Some(years)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
