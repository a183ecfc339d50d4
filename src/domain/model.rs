use crate::utils::error::ValidationError;
use crate::utils::validation::require_text;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Identity of the employee a declaration is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    tax_identification_number: String,
    last_name: String,
    first_name: String,
}

impl Employee {
    pub fn new(
        tax_identification_number: &str,
        last_name: &str,
        first_name: &str,
    ) -> Result<Self, ValidationError> {
        require_text("employee_tax_identification_number", tax_identification_number)?;
        require_text("employee_last_name", last_name)?;
        require_text("employee_first_name", first_name)?;

        Ok(Self {
            tax_identification_number: tax_identification_number.trim().to_string(),
            last_name: last_name.trim().to_string(),
            first_name: first_name.trim().to_string(),
        })
    }

    pub fn tax_identification_number(&self) -> &str {
        &self.tax_identification_number
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }
}

/// Reference to an earlier submission that a declaration amends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedProtocol {
    id: Option<String>,
    date: Option<NaiveDate>,
}

impl RelatedProtocol {
    pub fn new(id: Option<String>, date: Option<NaiveDate>) -> Self {
        Self {
            id: non_blank(id),
            date,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

/// Receipt returned by Ergani for every accepted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub submission_id: String,
    pub protocol: String,
    pub submission_date: NaiveDateTime,
}

/// The four document kinds Ergani accepts through this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DeclarationKind {
    WorkCard,
    Overtime,
    DailySchedule,
    WeeklySchedule,
}

impl DeclarationKind {
    /// Endpoint path, relative to the configured base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            DeclarationKind::WorkCard => "Documents/WRKCardSE",
            DeclarationKind::Overtime => "Documents/OvTime",
            DeclarationKind::DailySchedule => "Documents/WTODaily",
            DeclarationKind::WeeklySchedule => "Documents/WTOWeek",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeclarationKind::WorkCard => "work card",
            DeclarationKind::Overtime => "overtime",
            DeclarationKind::DailySchedule => "daily schedule",
            DeclarationKind::WeeklySchedule => "weekly schedule",
        }
    }
}

/// Optional free-text values: blank strings count as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Times in input files may be written as `HH:MM` or `HH:MM:SS`.
pub(crate) mod time_input {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer};

    pub fn parse(value: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(value, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
            .ok()
    }

    pub fn required<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid time '{}', expected HH:MM", raw)))
    }

    pub fn optional<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid time '{}', expected HH:MM", raw))),
        }
    }
}
