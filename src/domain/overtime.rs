use crate::domain::codes::{ErganiCode, OvertimeJustification};
use crate::domain::model::{non_blank, time_input, Employee, RelatedProtocol};
use crate::utils::error::ValidationError;
use crate::utils::validation::{require_entries, require_text, validate_time_range};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

pub const MAX_SECONDARY_ACTIVITY_CODES: usize = 4;

#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeFields {
    pub employee_tax_identification_number: String,
    pub employee_social_security_number: String,
    pub employee_last_name: String,
    pub employee_first_name: String,
    pub overtime_date: NaiveDate,
    #[serde(deserialize_with = "time_input::required")]
    pub overtime_start_time: NaiveTime,
    #[serde(deserialize_with = "time_input::required")]
    pub overtime_end_time: NaiveTime,
    #[serde(default)]
    pub overtime_cancellation: bool,
    pub employee_profession_code: String,
    pub overtime_justification: String,
    pub weekly_workdays_number: u8,
    #[serde(default)]
    pub asee_approval: Option<String>,
}

/// Overtime worked by one employee on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overtime {
    employee: Employee,
    social_security_number: String,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    cancellation: bool,
    profession_code: String,
    justification: OvertimeJustification,
    weekly_workdays_number: u8,
    asee_approval: Option<String>,
}

impl Overtime {
    pub fn new(fields: OvertimeFields) -> Result<Self, ValidationError> {
        let employee = Employee::new(
            &fields.employee_tax_identification_number,
            &fields.employee_last_name,
            &fields.employee_first_name,
        )?;
        require_text(
            "employee_social_security_number",
            &fields.employee_social_security_number,
        )?;
        require_text("employee_profession_code", &fields.employee_profession_code)?;
        validate_time_range("overtime", fields.overtime_start_time, fields.overtime_end_time)?;
        let justification = OvertimeJustification::parse(&fields.overtime_justification)?;

        if !matches!(fields.weekly_workdays_number, 5 | 6) {
            return Err(ValidationError::OutOfRange {
                field: "weekly_workdays_number".to_string(),
                value: fields.weekly_workdays_number.to_string(),
                reason: "must be 5 or 6".to_string(),
            });
        }

        Ok(Self {
            employee,
            social_security_number: fields.employee_social_security_number.trim().to_string(),
            date: fields.overtime_date,
            start_time: fields.overtime_start_time,
            end_time: fields.overtime_end_time,
            cancellation: fields.overtime_cancellation,
            profession_code: fields.employee_profession_code.trim().to_string(),
            justification,
            weekly_workdays_number: fields.weekly_workdays_number,
            asee_approval: non_blank(fields.asee_approval),
        })
    }

    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    pub fn social_security_number(&self) -> &str {
        &self.social_security_number
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn is_cancellation(&self) -> bool {
        self.cancellation
    }

    pub fn profession_code(&self) -> &str {
        &self.profession_code
    }

    pub fn justification(&self) -> OvertimeJustification {
        self.justification
    }

    pub fn weekly_workdays_number(&self) -> u8 {
        self.weekly_workdays_number
    }

    pub fn asee_approval(&self) -> Option<&str> {
        self.asee_approval.as_deref()
    }
}

impl TryFrom<OvertimeFields> for Overtime {
    type Error = ValidationError;

    fn try_from(fields: OvertimeFields) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}

#[derive(Debug, Clone)]
pub struct CompanyOvertimeFields {
    pub business_branch_number: u32,
    pub sepe_service_code: String,
    pub business_primary_activity_code: String,
    pub business_secondary_activity_codes: Vec<String>,
    pub business_branch_activity_code: String,
    pub kallikratis_municipal_code: String,
    pub legal_representative_tax_identification_number: String,
    pub employee_overtimes: Vec<Overtime>,
    pub related_protocol_id: Option<String>,
    pub related_protocol_date: Option<NaiveDate>,
    pub employer_organization: Option<String>,
    pub comments: Option<String>,
}

/// Overtime declarations of one employer branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyOvertime {
    business_branch_number: u32,
    sepe_service_code: String,
    business_primary_activity_code: String,
    business_secondary_activity_codes: Vec<String>,
    business_branch_activity_code: String,
    kallikratis_municipal_code: String,
    legal_representative_tax_identification_number: String,
    employee_overtimes: Vec<Overtime>,
    related_protocol: RelatedProtocol,
    employer_organization: Option<String>,
    comments: Option<String>,
}

impl CompanyOvertime {
    pub fn new(fields: CompanyOvertimeFields) -> Result<Self, ValidationError> {
        require_text("sepe_service_code", &fields.sepe_service_code)?;
        require_text(
            "business_primary_activity_code",
            &fields.business_primary_activity_code,
        )?;
        require_text(
            "business_branch_activity_code",
            &fields.business_branch_activity_code,
        )?;
        require_text("kallikratis_municipal_code", &fields.kallikratis_municipal_code)?;
        require_text(
            "legal_representative_tax_identification_number",
            &fields.legal_representative_tax_identification_number,
        )?;

        if fields.business_secondary_activity_codes.len() > MAX_SECONDARY_ACTIVITY_CODES {
            return Err(ValidationError::OutOfRange {
                field: "business_secondary_activity_codes".to_string(),
                value: fields.business_secondary_activity_codes.len().to_string(),
                reason: format!("at most {} codes are accepted", MAX_SECONDARY_ACTIVITY_CODES),
            });
        }
        for code in &fields.business_secondary_activity_codes {
            require_text("business_secondary_activity_codes", code)?;
        }

        require_entries("employee_overtimes", &fields.employee_overtimes)?;

        Ok(Self {
            business_branch_number: fields.business_branch_number,
            sepe_service_code: fields.sepe_service_code.trim().to_string(),
            business_primary_activity_code: fields.business_primary_activity_code.trim().to_string(),
            business_secondary_activity_codes: fields
                .business_secondary_activity_codes
                .iter()
                .map(|code| code.trim().to_string())
                .collect(),
            business_branch_activity_code: fields.business_branch_activity_code.trim().to_string(),
            kallikratis_municipal_code: fields.kallikratis_municipal_code.trim().to_string(),
            legal_representative_tax_identification_number: fields
                .legal_representative_tax_identification_number
                .trim()
                .to_string(),
            employee_overtimes: fields.employee_overtimes,
            related_protocol: RelatedProtocol::new(fields.related_protocol_id, fields.related_protocol_date),
            employer_organization: non_blank(fields.employer_organization),
            comments: non_blank(fields.comments),
        })
    }

    pub fn business_branch_number(&self) -> u32 {
        self.business_branch_number
    }

    pub fn sepe_service_code(&self) -> &str {
        &self.sepe_service_code
    }

    pub fn business_primary_activity_code(&self) -> &str {
        &self.business_primary_activity_code
    }

    pub fn business_secondary_activity_codes(&self) -> &[String] {
        &self.business_secondary_activity_codes
    }

    pub fn business_branch_activity_code(&self) -> &str {
        &self.business_branch_activity_code
    }

    pub fn kallikratis_municipal_code(&self) -> &str {
        &self.kallikratis_municipal_code
    }

    pub fn legal_representative_tax_identification_number(&self) -> &str {
        &self.legal_representative_tax_identification_number
    }

    pub fn employee_overtimes(&self) -> &[Overtime] {
        &self.employee_overtimes
    }

    pub fn related_protocol(&self) -> &RelatedProtocol {
        &self.related_protocol
    }

    pub fn employer_organization(&self) -> Option<&str> {
        self.employer_organization.as_deref()
    }

    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }
}

impl TryFrom<CompanyOvertimeFields> for CompanyOvertime {
    type Error = ValidationError;

    fn try_from(fields: CompanyOvertimeFields) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}
