//! JSON layout of declaration input files.
//!
//! Parsing only checks the shape of the document. Business rules run
//! afterwards in the entity constructors, so a rule violation reaches the
//! caller as [`ErganiError::Validation`] rather than as a JSON error.

use crate::domain::overtime::{CompanyOvertime, CompanyOvertimeFields, Overtime, OvertimeFields};
use crate::domain::schedule::{
    CompanyDailySchedule, CompanyDailyScheduleFields, CompanyWeeklySchedule,
    CompanyWeeklyScheduleFields, EmployeeDailySchedule, EmployeeScheduleFields,
    EmployeeWeeklySchedule, WorkdayDetails, WorkdayDetailsFields,
};
use crate::domain::work_card::{CompanyWorkCard, CompanyWorkCardFields, WorkCard, WorkCardFields};
use crate::utils::error::{ErganiError, Result, ValidationError};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// A parsed company envelope that still has to pass validation.
pub trait Envelope: DeserializeOwned {
    type Entity;

    fn validate_into(self) -> std::result::Result<Self::Entity, ValidationError>;
}

/// Parses a JSON array of envelopes, then validates them in input order.
pub fn parse_envelopes<E: Envelope>(json: &str) -> Result<Vec<E::Entity>> {
    let envelopes: Vec<E> = serde_json::from_str(json)?;
    envelopes
        .into_iter()
        .map(|envelope| envelope.validate_into().map_err(ErganiError::from))
        .collect()
}

fn build_all<F, T>(items: Vec<F>) -> std::result::Result<Vec<T>, ValidationError>
where
    T: TryFrom<F, Error = ValidationError>,
{
    items.into_iter().map(T::try_from).collect()
}

#[derive(Debug, Deserialize)]
pub struct CompanyWorkCardInput {
    employer_tax_identification_number: String,
    business_branch_number: u32,
    #[serde(default)]
    comments: Option<String>,
    card_details: Vec<WorkCardFields>,
}

impl Envelope for CompanyWorkCardInput {
    type Entity = CompanyWorkCard;

    fn validate_into(self) -> std::result::Result<CompanyWorkCard, ValidationError> {
        let card_details: Vec<WorkCard> = build_all(self.card_details)?;
        CompanyWorkCard::new(CompanyWorkCardFields {
            employer_tax_identification_number: self.employer_tax_identification_number,
            business_branch_number: self.business_branch_number,
            comments: self.comments,
            card_details,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CompanyOvertimeInput {
    business_branch_number: u32,
    sepe_service_code: String,
    business_primary_activity_code: String,
    #[serde(default)]
    business_secondary_activity_codes: Vec<String>,
    business_branch_activity_code: String,
    kallikratis_municipal_code: String,
    legal_representative_tax_identification_number: String,
    employee_overtimes: Vec<OvertimeFields>,
    #[serde(default)]
    related_protocol_id: Option<String>,
    #[serde(default)]
    related_protocol_date: Option<NaiveDate>,
    #[serde(default)]
    employer_organization: Option<String>,
    #[serde(default)]
    comments: Option<String>,
}

impl Envelope for CompanyOvertimeInput {
    type Entity = CompanyOvertime;

    fn validate_into(self) -> std::result::Result<CompanyOvertime, ValidationError> {
        let employee_overtimes: Vec<Overtime> = build_all(self.employee_overtimes)?;
        CompanyOvertime::new(CompanyOvertimeFields {
            business_branch_number: self.business_branch_number,
            sepe_service_code: self.sepe_service_code,
            business_primary_activity_code: self.business_primary_activity_code,
            business_secondary_activity_codes: self.business_secondary_activity_codes,
            business_branch_activity_code: self.business_branch_activity_code,
            kallikratis_municipal_code: self.kallikratis_municipal_code,
            legal_representative_tax_identification_number: self
                .legal_representative_tax_identification_number,
            employee_overtimes,
            related_protocol_id: self.related_protocol_id,
            related_protocol_date: self.related_protocol_date,
            employer_organization: self.employer_organization,
            comments: self.comments,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct EmployeeScheduleInput {
    employee_tax_identification_number: String,
    employee_last_name: String,
    employee_first_name: String,
    schedule_date: NaiveDate,
    workday_details: Vec<WorkdayDetailsFields>,
}

impl EmployeeScheduleInput {
    fn into_fields(self) -> std::result::Result<EmployeeScheduleFields, ValidationError> {
        let workday_details: Vec<WorkdayDetails> = build_all(self.workday_details)?;
        Ok(EmployeeScheduleFields {
            employee_tax_identification_number: self.employee_tax_identification_number,
            employee_last_name: self.employee_last_name,
            employee_first_name: self.employee_first_name,
            schedule_date: self.schedule_date,
            workday_details,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CompanyDailyScheduleInput {
    business_branch_number: u32,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    employee_schedules: Vec<EmployeeScheduleInput>,
    #[serde(default)]
    related_protocol_id: Option<String>,
    #[serde(default)]
    related_protocol_date: Option<NaiveDate>,
    #[serde(default)]
    comments: Option<String>,
}

impl Envelope for CompanyDailyScheduleInput {
    type Entity = CompanyDailySchedule;

    fn validate_into(self) -> std::result::Result<CompanyDailySchedule, ValidationError> {
        let employee_schedules = self
            .employee_schedules
            .into_iter()
            .map(|input| input.into_fields().and_then(EmployeeDailySchedule::new))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        CompanyDailySchedule::new(CompanyDailyScheduleFields {
            business_branch_number: self.business_branch_number,
            start_date: self.start_date,
            end_date: self.end_date,
            employee_schedules,
            related_protocol_id: self.related_protocol_id,
            related_protocol_date: self.related_protocol_date,
            comments: self.comments,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CompanyWeeklyScheduleInput {
    business_branch_number: u32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    employee_schedules: Vec<EmployeeScheduleInput>,
    #[serde(default)]
    related_protocol_id: Option<String>,
    #[serde(default)]
    related_protocol_date: Option<NaiveDate>,
    #[serde(default)]
    comments: Option<String>,
}

impl Envelope for CompanyWeeklyScheduleInput {
    type Entity = CompanyWeeklySchedule;

    fn validate_into(self) -> std::result::Result<CompanyWeeklySchedule, ValidationError> {
        let employee_schedules = self
            .employee_schedules
            .into_iter()
            .map(|input| input.into_fields().and_then(EmployeeWeeklySchedule::new))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        CompanyWeeklySchedule::new(CompanyWeeklyScheduleFields {
            business_branch_number: self.business_branch_number,
            start_date: self.start_date,
            end_date: self.end_date,
            employee_schedules,
            related_protocol_id: self.related_protocol_id,
            related_protocol_date: self.related_protocol_date,
            comments: self.comments,
        })
    }
}
