use crate::domain::codes::{ErganiCode, ScheduleWorkType};
use crate::domain::model::{non_blank, time_input, Employee, RelatedProtocol};
use crate::utils::error::ValidationError;
use crate::utils::validation::{require_entries, validate_date_range, validate_time_range};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct WorkdayDetailsFields {
    pub work_type: String,
    #[serde(default, deserialize_with = "time_input::optional")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "time_input::optional")]
    pub end_time: Option<NaiveTime>,
}

/// One entry of an employee's working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkdayDetails {
    work_type: ScheduleWorkType,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
}

impl WorkdayDetails {
    pub fn new(fields: WorkdayDetailsFields) -> Result<Self, ValidationError> {
        let work_type = ScheduleWorkType::parse(&fields.work_type)?;

        match (fields.start_time, fields.end_time) {
            (Some(start), Some(end)) => validate_time_range("workday", start, end)?,
            (None, None) if !work_type.requires_hours() => {}
            (None, _) => {
                return Err(ValidationError::MissingField {
                    field: "start_time".to_string(),
                })
            }
            (_, None) => {
                return Err(ValidationError::MissingField {
                    field: "end_time".to_string(),
                })
            }
        }

        Ok(Self {
            work_type,
            start_time: fields.start_time,
            end_time: fields.end_time,
        })
    }

    pub fn work_type(&self) -> ScheduleWorkType {
        self.work_type
    }

    pub fn start_time(&self) -> Option<NaiveTime> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<NaiveTime> {
        self.end_time
    }
}

impl TryFrom<WorkdayDetailsFields> for WorkdayDetails {
    type Error = ValidationError;

    fn try_from(fields: WorkdayDetailsFields) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}

/// Fields shared by the daily and the weekly employee schedule.
#[derive(Debug, Clone)]
pub struct EmployeeScheduleFields {
    pub employee_tax_identification_number: String,
    pub employee_last_name: String,
    pub employee_first_name: String,
    pub schedule_date: NaiveDate,
    pub workday_details: Vec<WorkdayDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EmployeeSchedule {
    employee: Employee,
    schedule_date: NaiveDate,
    workday_details: Vec<WorkdayDetails>,
}

impl EmployeeSchedule {
    fn new(fields: EmployeeScheduleFields) -> Result<Self, ValidationError> {
        let employee = Employee::new(
            &fields.employee_tax_identification_number,
            &fields.employee_last_name,
            &fields.employee_first_name,
        )?;
        require_entries("workday_details", &fields.workday_details)?;

        Ok(Self {
            employee,
            schedule_date: fields.schedule_date,
            workday_details: fields.workday_details,
        })
    }
}

/// Schedule of one employee for a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDailySchedule(EmployeeSchedule);

/// Schedule of one employee for one day of a declared week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeWeeklySchedule(EmployeeSchedule);

impl EmployeeDailySchedule {
    pub fn new(fields: EmployeeScheduleFields) -> Result<Self, ValidationError> {
        EmployeeSchedule::new(fields).map(Self)
    }

    pub fn employee(&self) -> &Employee {
        &self.0.employee
    }

    pub fn schedule_date(&self) -> NaiveDate {
        self.0.schedule_date
    }

    pub fn workday_details(&self) -> &[WorkdayDetails] {
        &self.0.workday_details
    }
}

impl EmployeeWeeklySchedule {
    pub fn new(fields: EmployeeScheduleFields) -> Result<Self, ValidationError> {
        EmployeeSchedule::new(fields).map(Self)
    }

    pub fn employee(&self) -> &Employee {
        &self.0.employee
    }

    pub fn schedule_date(&self) -> NaiveDate {
        self.0.schedule_date
    }

    pub fn workday_details(&self) -> &[WorkdayDetails] {
        &self.0.workday_details
    }
}

impl TryFrom<EmployeeScheduleFields> for EmployeeDailySchedule {
    type Error = ValidationError;

    fn try_from(fields: EmployeeScheduleFields) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}

impl TryFrom<EmployeeScheduleFields> for EmployeeWeeklySchedule {
    type Error = ValidationError;

    fn try_from(fields: EmployeeScheduleFields) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}

fn ensure_within(
    field: &str,
    date: NaiveDate,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(), ValidationError> {
    if date < start || date > end {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value: date.to_string(),
            reason: format!("must fall between {} and {}", start, end),
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct CompanyDailyScheduleFields {
    pub business_branch_number: u32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub employee_schedules: Vec<EmployeeDailySchedule>,
    pub related_protocol_id: Option<String>,
    pub related_protocol_date: Option<NaiveDate>,
    pub comments: Option<String>,
}

/// Daily schedules of one employer branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyDailySchedule {
    business_branch_number: u32,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    employee_schedules: Vec<EmployeeDailySchedule>,
    related_protocol: RelatedProtocol,
    comments: Option<String>,
}

impl CompanyDailySchedule {
    pub fn new(fields: CompanyDailyScheduleFields) -> Result<Self, ValidationError> {
        require_entries("employee_schedules", &fields.employee_schedules)?;

        if let (Some(start), Some(end)) = (fields.start_date, fields.end_date) {
            validate_date_range("schedule", start, end)?;
            for schedule in &fields.employee_schedules {
                ensure_within("schedule_date", schedule.schedule_date(), start, end)?;
            }
        }

        Ok(Self {
            business_branch_number: fields.business_branch_number,
            start_date: fields.start_date,
            end_date: fields.end_date,
            employee_schedules: fields.employee_schedules,
            related_protocol: RelatedProtocol::new(fields.related_protocol_id, fields.related_protocol_date),
            comments: non_blank(fields.comments),
        })
    }

    pub fn business_branch_number(&self) -> u32 {
        self.business_branch_number
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn employee_schedules(&self) -> &[EmployeeDailySchedule] {
        &self.employee_schedules
    }

    pub fn related_protocol(&self) -> &RelatedProtocol {
        &self.related_protocol
    }

    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }
}

impl TryFrom<CompanyDailyScheduleFields> for CompanyDailySchedule {
    type Error = ValidationError;

    fn try_from(fields: CompanyDailyScheduleFields) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}

#[derive(Debug, Clone)]
pub struct CompanyWeeklyScheduleFields {
    pub business_branch_number: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub employee_schedules: Vec<EmployeeWeeklySchedule>,
    pub related_protocol_id: Option<String>,
    pub related_protocol_date: Option<NaiveDate>,
    pub comments: Option<String>,
}

/// Weekly schedules of one employer branch. The date range applies to
/// every employee entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyWeeklySchedule {
    business_branch_number: u32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    employee_schedules: Vec<EmployeeWeeklySchedule>,
    related_protocol: RelatedProtocol,
    comments: Option<String>,
}

impl CompanyWeeklySchedule {
    pub fn new(fields: CompanyWeeklyScheduleFields) -> Result<Self, ValidationError> {
        validate_date_range("schedule", fields.start_date, fields.end_date)?;
        require_entries("employee_schedules", &fields.employee_schedules)?;
        for schedule in &fields.employee_schedules {
            ensure_within(
                "schedule_date",
                schedule.schedule_date(),
                fields.start_date,
                fields.end_date,
            )?;
        }

        Ok(Self {
            business_branch_number: fields.business_branch_number,
            start_date: fields.start_date,
            end_date: fields.end_date,
            employee_schedules: fields.employee_schedules,
            related_protocol: RelatedProtocol::new(fields.related_protocol_id, fields.related_protocol_date),
            comments: non_blank(fields.comments),
        })
    }

    pub fn business_branch_number(&self) -> u32 {
        self.business_branch_number
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn employee_schedules(&self) -> &[EmployeeWeeklySchedule] {
        &self.employee_schedules
    }

    pub fn related_protocol(&self) -> &RelatedProtocol {
        &self.related_protocol
    }

    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }
}

impl TryFrom<CompanyWeeklyScheduleFields> for CompanyWeeklySchedule {
    type Error = ValidationError;

    fn try_from(fields: CompanyWeeklyScheduleFields) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}
