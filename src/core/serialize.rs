//! Mapping from validated entities to the Ergani wire format.
//!
//! Every function here is pure and infallible: identical input always gives
//! identical JSON, and entry order follows the input slices. Absent optional
//! values are sent as empty strings, which is how the API expects them.

use crate::domain::codes::ErganiCode;
use crate::domain::model::{Employee, RelatedProtocol};
use crate::domain::overtime::{CompanyOvertime, Overtime, MAX_SECONDARY_ACTIVITY_CODES};
use crate::domain::schedule::{
    CompanyDailySchedule, CompanyWeeklySchedule, EmployeeDailySchedule, EmployeeWeeklySchedule,
    WorkdayDetails,
};
use crate::domain::work_card::{CompanyWorkCard, WorkCard};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{json, Value};

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn format_time(time: Option<NaiveTime>) -> String {
    time.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// Date and time with microseconds and no offset, e.g. `2024-01-10T09:00:00.000000`.
pub fn format_datetime(datetime: NaiveDateTime) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// 0 = Sunday … 6 = Saturday.
pub fn day_of_week(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

fn text(value: Option<&str>) -> &str {
    value.unwrap_or("")
}

fn employee_fields(employee: &Employee) -> [(&'static str, Value); 3] {
    [
        ("f_afm", json!(employee.tax_identification_number())),
        ("f_eponymo", json!(employee.last_name())),
        ("f_onoma", json!(employee.first_name())),
    ]
}

fn with_employee(employee: &Employee, mut record: Value) -> Value {
    if let Value::Object(map) = &mut record {
        for (key, value) in employee_fields(employee) {
            map.insert(key.to_string(), value);
        }
    }
    record
}

pub fn work_card(card: &WorkCard) -> Value {
    let justification = card
        .late_declaration_justification()
        .map(|j| j.code())
        .unwrap_or("");
    with_employee(
        card.employee(),
        json!({
            "f_type": card.movement_type().code(),
            "f_reference_date": format_date(Some(card.submission_date())),
            "f_date": format_datetime(card.movement_datetime()),
            "f_aitiologia": justification,
        }),
    )
}

pub fn company_work_card(company: &CompanyWorkCard) -> Value {
    json!({
        "f_afm_ergodoti": company.employer_tax_identification_number(),
        "f_aa": company.business_branch_number(),
        "f_comments": text(company.comments()),
        "Details": {
            "CardDetails": company.card_details().iter().map(work_card).collect::<Vec<_>>(),
        },
    })
}

pub fn overtime(entry: &Overtime) -> Value {
    let cancellation = if entry.is_cancellation() { "1" } else { "0" };
    with_employee(
        entry.employee(),
        json!({
            "f_amka": entry.social_security_number(),
            "f_date": format_date(Some(entry.date())),
            "f_from": format_time(Some(entry.start_time())),
            "f_to": format_time(Some(entry.end_time())),
            "f_cancellation": cancellation,
            "f_step": entry.profession_code(),
            "f_reason": entry.justification().code(),
            "f_weekdates": entry.weekly_workdays_number(),
            "f_asee": text(entry.asee_approval()),
        }),
    )
}

fn related_protocol_fields(protocol: &RelatedProtocol) -> (String, String) {
    (
        protocol.id().unwrap_or("").to_string(),
        format_date(protocol.date()),
    )
}

pub fn company_overtime(company: &CompanyOvertime) -> Value {
    let (rel_protocol, rel_date) = related_protocol_fields(company.related_protocol());
    let mut record = json!({
        "f_aa_pararthmatos": company.business_branch_number(),
        "f_rel_protocol": rel_protocol,
        "f_rel_date": rel_date,
        "f_ypiresia_sepe": company.sepe_service_code(),
        "f_ergodotikh_organwsh": text(company.employer_organization()),
        "f_kad_kyria": company.business_primary_activity_code(),
        "f_kad_pararthmatos": company.business_branch_activity_code(),
        "f_kallikratis_pararthmatos": company.kallikratis_municipal_code(),
        "f_comments": text(company.comments()),
        "f_afm_proswpoy": company.legal_representative_tax_identification_number(),
        "Ergazomenoi": {
            "OvertimeErgazomenosDate": company.employee_overtimes().iter().map(overtime).collect::<Vec<_>>(),
        },
    });

    if let Value::Object(map) = &mut record {
        let secondary = company.business_secondary_activity_codes();
        for slot in 0..MAX_SECONDARY_ACTIVITY_CODES {
            let code = secondary.get(slot).map(String::as_str).unwrap_or("");
            map.insert(format!("f_kad_deyt_{}", slot + 1), json!(code));
        }
    }
    record
}

pub fn workday_details(details: &WorkdayDetails) -> Value {
    json!({
        "f_type": details.work_type().code(),
        "f_from": format_time(details.start_time()),
        "f_to": format_time(details.end_time()),
    })
}

fn workday_analytics(details: &[WorkdayDetails]) -> Value {
    json!({
        "ErgazomenosWTOAnalytics": details.iter().map(workday_details).collect::<Vec<_>>(),
    })
}

pub fn employee_daily_schedule(schedule: &EmployeeDailySchedule) -> Value {
    with_employee(
        schedule.employee(),
        json!({
            "f_date": format_date(Some(schedule.schedule_date())),
            "ErgazomenosAnalytics": workday_analytics(schedule.workday_details()),
        }),
    )
}

pub fn employee_weekly_schedule(schedule: &EmployeeWeeklySchedule) -> Value {
    with_employee(
        schedule.employee(),
        json!({
            "f_day": day_of_week(schedule.schedule_date()),
            "ErgazomenosAnalytics": workday_analytics(schedule.workday_details()),
        }),
    )
}

fn schedule_envelope(
    branch: u32,
    protocol: &RelatedProtocol,
    comments: Option<&str>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    employees: Vec<Value>,
) -> Value {
    let (rel_protocol, rel_date) = related_protocol_fields(protocol);
    json!({
        "f_aa_pararthmatos": branch,
        "f_rel_protocol": rel_protocol,
        "f_rel_date": rel_date,
        "f_comments": text(comments),
        "f_from_date": format_date(start),
        "f_to_date": format_date(end),
        "Ergazomenoi": {
            "ErgazomenoiWTO": employees,
        },
    })
}

pub fn company_daily_schedule(company: &CompanyDailySchedule) -> Value {
    schedule_envelope(
        company.business_branch_number(),
        company.related_protocol(),
        company.comments(),
        company.start_date(),
        company.end_date(),
        company
            .employee_schedules()
            .iter()
            .map(employee_daily_schedule)
            .collect(),
    )
}

pub fn company_weekly_schedule(company: &CompanyWeeklySchedule) -> Value {
    schedule_envelope(
        company.business_branch_number(),
        company.related_protocol(),
        company.comments(),
        Some(company.start_date()),
        Some(company.end_date()),
        company
            .employee_schedules()
            .iter()
            .map(employee_weekly_schedule)
            .collect(),
    )
}

pub fn work_card_payload(companies: &[CompanyWorkCard]) -> Value {
    json!({
        "Cards": {
            "Card": companies.iter().map(company_work_card).collect::<Vec<_>>(),
        },
    })
}

pub fn overtime_payload(companies: &[CompanyOvertime]) -> Value {
    json!({
        "Overtimes": {
            "Overtime": companies.iter().map(company_overtime).collect::<Vec<_>>(),
        },
    })
}

pub fn daily_schedule_payload(companies: &[CompanyDailySchedule]) -> Value {
    json!({
        "WTOS": {
            "WTO": companies.iter().map(company_daily_schedule).collect::<Vec<_>>(),
        },
    })
}

pub fn weekly_schedule_payload(companies: &[CompanyWeeklySchedule]) -> Value {
    json!({
        "WTOS": {
            "WTO": companies.iter().map(company_weekly_schedule).collect::<Vec<_>>(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schedule::WorkdayDetailsFields;
    use crate::domain::work_card::{CompanyWorkCardFields, WorkCardFields};

    fn card(movement: &str, at: &str) -> WorkCard {
        WorkCard::new(WorkCardFields {
            employee_tax_identification_number: "123456789".to_string(),
            employee_last_name: "Papadopoulos".to_string(),
            employee_first_name: "Maria".to_string(),
            work_card_movement_type: movement.to_string(),
            work_card_submission_date: "2024-01-10".parse().unwrap(),
            work_card_movement_datetime: at.parse().unwrap(),
            late_declaration_justification: None,
        })
        .unwrap()
    }

    #[test]
    fn test_formatting_helpers() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(format_date(Some(date)), "2024-01-07");
        assert_eq!(format_date(None), "");
        assert_eq!(format_time(NaiveTime::from_hms_opt(8, 5, 59)), "08:05");
        assert_eq!(format_time(None), "");
        assert_eq!(
            format_datetime("2024-01-10T09:00:00".parse().unwrap()),
            "2024-01-10T09:00:00.000000"
        );
    }

    #[test]
    fn test_day_of_week_starts_on_sunday() {
        assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()), 0);
        assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()), 1);
        assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2024, 1, 13).unwrap()), 6);
    }

    #[test]
    fn test_arrival_serializes_to_code_zero() {
        let value = work_card(&card("ARRIVAL", "2024-01-10T09:00:00"));
        assert_eq!(value["f_type"], "0");
        assert_eq!(value["f_afm"], "123456789");
        assert_eq!(value["f_eponymo"], "Papadopoulos");
        assert_eq!(value["f_onoma"], "Maria");
        assert_eq!(value["f_reference_date"], "2024-01-10");
        assert_eq!(value["f_date"], "2024-01-10T09:00:00.000000");
        assert_eq!(value["f_aitiologia"], "");
    }

    #[test]
    fn test_work_card_batch_preserves_order() {
        let company = CompanyWorkCard::new(CompanyWorkCardFields {
            employer_tax_identification_number: "987654321".to_string(),
            business_branch_number: 3,
            comments: None,
            card_details: vec![
                card("DEPARTURE", "2024-01-10T17:00:00"),
                card("ARRIVAL", "2024-01-10T09:00:00"),
            ],
        })
        .unwrap();

        let payload = work_card_payload(&[company]);
        let cards = &payload["Cards"]["Card"][0]["Details"]["CardDetails"];
        assert_eq!(cards[0]["f_type"], "1");
        assert_eq!(cards[1]["f_type"], "0");
        assert_eq!(payload["Cards"]["Card"][0]["f_aa"], 3);
        assert_eq!(payload["Cards"]["Card"][0]["f_comments"], "");
    }

    #[test]
    fn test_rest_day_has_empty_hours() {
        let details = WorkdayDetails::new(WorkdayDetailsFields {
            work_type: "REST_DAY".to_string(),
            start_time: None,
            end_time: None,
        })
        .unwrap();

        assert_eq!(
            workday_details(&details),
            json!({"f_type": "ΑΝ", "f_from": "", "f_to": ""})
        );
    }
}
