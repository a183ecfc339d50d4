use crate::core::client::ErganiClient;
use crate::core::input::{
    parse_envelopes, CompanyDailyScheduleInput, CompanyOvertimeInput, CompanyWeeklyScheduleInput,
    CompanyWorkCardInput,
};
use crate::core::serialize;
use crate::domain::model::{DeclarationKind, SubmissionResponse};
use crate::domain::overtime::CompanyOvertime;
use crate::domain::ports::Transport;
use crate::domain::schedule::{CompanyDailySchedule, CompanyWeeklySchedule};
use crate::domain::work_card::CompanyWorkCard;
use crate::utils::error::Result;

/// A batch of company declarations of a single kind, as read from an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationBatch {
    WorkCard(Vec<CompanyWorkCard>),
    Overtime(Vec<CompanyOvertime>),
    DailySchedule(Vec<CompanyDailySchedule>),
    WeeklySchedule(Vec<CompanyWeeklySchedule>),
}

impl DeclarationBatch {
    /// Parses a JSON array of company envelopes and validates every entity.
    /// Malformed JSON is a serialization error; rule violations are validation errors.
    pub fn from_json(kind: DeclarationKind, json: &str) -> Result<Self> {
        let batch = match kind {
            DeclarationKind::WorkCard => Self::WorkCard(parse_envelopes::<CompanyWorkCardInput>(json)?),
            DeclarationKind::Overtime => Self::Overtime(parse_envelopes::<CompanyOvertimeInput>(json)?),
            DeclarationKind::DailySchedule => {
                Self::DailySchedule(parse_envelopes::<CompanyDailyScheduleInput>(json)?)
            }
            DeclarationKind::WeeklySchedule => {
                Self::WeeklySchedule(parse_envelopes::<CompanyWeeklyScheduleInput>(json)?)
            }
        };
        Ok(batch)
    }

    pub fn kind(&self) -> DeclarationKind {
        match self {
            Self::WorkCard(_) => DeclarationKind::WorkCard,
            Self::Overtime(_) => DeclarationKind::Overtime,
            Self::DailySchedule(_) => DeclarationKind::DailySchedule,
            Self::WeeklySchedule(_) => DeclarationKind::WeeklySchedule,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::WorkCard(items) => items.len(),
            Self::Overtime(items) => items.len(),
            Self::DailySchedule(items) => items.len(),
            Self::WeeklySchedule(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn payload(&self) -> serde_json::Value {
        match self {
            Self::WorkCard(items) => serialize::work_card_payload(items),
            Self::Overtime(items) => serialize::overtime_payload(items),
            Self::DailySchedule(items) => serialize::daily_schedule_payload(items),
            Self::WeeklySchedule(items) => serialize::weekly_schedule_payload(items),
        }
    }

    pub async fn submit<T: Transport>(&self, client: &ErganiClient<T>) -> Result<Vec<SubmissionResponse>> {
        match self {
            Self::WorkCard(items) => client.submit_work_card(items).await,
            Self::Overtime(items) => client.submit_overtime(items).await,
            Self::DailySchedule(items) => client.submit_daily_schedule(items).await,
            Self::WeeklySchedule(items) => client.submit_weekly_schedule(items).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{ErganiError, ValidationError};

    const WEEK: &str = r#"[{
        "business_branch_number": 1,
        "start_date": "2024-01-08",
        "end_date": "2024-01-14",
        "employee_schedules": [{
            "employee_tax_identification_number": "123456789",
            "employee_last_name": "Papadopoulos",
            "employee_first_name": "Maria",
            "schedule_date": "2024-01-09",
            "workday_details": [
                {"work_type": "WORK_FROM_HOME", "start_time": "09:00", "end_time": "17:00"},
                {"work_type": "REST_DAY"}
            ]
        }]
    }]"#;

    #[test]
    fn test_weekly_batch_from_json() {
        let batch = DeclarationBatch::from_json(DeclarationKind::WeeklySchedule, WEEK).unwrap();

        assert_eq!(batch.kind(), DeclarationKind::WeeklySchedule);
        assert_eq!(batch.len(), 1);

        let payload = batch.payload();
        let employee = &payload["WTOS"]["WTO"][0]["Ergazomenoi"]["ErgazomenoiWTO"][0];
        assert_eq!(employee["f_day"], 2);
        assert_eq!(
            employee["ErgazomenosAnalytics"]["ErgazomenosWTOAnalytics"][0]["f_type"],
            "ΤΗΛ"
        );
        assert_eq!(
            employee["ErgazomenosAnalytics"]["ErgazomenosWTOAnalytics"][1]["f_from"],
            ""
        );
    }

    #[test]
    fn test_invalid_entity_fails_parsing() {
        let broken = WEEK.replace("\"end_time\": \"17:00\"", "\"end_time\": \"08:00\"");
        let err = DeclarationBatch::from_json(DeclarationKind::WeeklySchedule, &broken).unwrap_err();

        assert!(matches!(
            err,
            ErganiError::Validation(ValidationError::InvalidTimeRange { .. })
        ));
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Invalid time range"));
    }

    #[test]
    fn test_daily_batch_with_reversed_hours_is_validation_error() {
        let daily = r#"[{
            "business_branch_number": 1,
            "employee_schedules": [{
                "employee_tax_identification_number": "123456789",
                "employee_last_name": "Papadopoulos",
                "employee_first_name": "Maria",
                "schedule_date": "2024-01-10",
                "workday_details": [
                    {"work_type": "WORK_FROM_HOME", "start_time": "09:00", "end_time": "08:00"}
                ]
            }]
        }]"#;

        let err = DeclarationBatch::from_json(DeclarationKind::DailySchedule, daily).unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            err.recovery_suggestion(),
            "Fix the reported field in the input file and submit again"
        );
    }

    #[test]
    fn test_wrong_kind_fails_parsing() {
        assert!(DeclarationBatch::from_json(DeclarationKind::Overtime, WEEK).is_err());
    }
}
