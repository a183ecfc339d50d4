//! Closed code sets of the Ergani API.
//!
//! Each enum knows its semantic name (what callers write) and the code the
//! API expects on the wire. Parsing an unknown name fails with
//! [`ValidationError::InvalidCode`] listing every accepted name.

use crate::utils::error::ValidationError;
use std::fmt;

pub trait ErganiCode: Sized + Copy + 'static {
    /// Field name reported in validation errors.
    const FIELD: &'static str;
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    fn code(self) -> &'static str;

    fn parse(value: &str) -> Result<Self, ValidationError> {
        let wanted = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|variant| variant.name() == wanted)
            .ok_or_else(|| ValidationError::InvalidCode {
                field: Self::FIELD.to_string(),
                value: value.to_string(),
                allowed: Self::ALL.iter().map(|v| v.name().to_string()).collect(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkCardMovementType {
    Arrival,
    Departure,
}

impl ErganiCode for WorkCardMovementType {
    const FIELD: &'static str = "work_card_movement_type";
    const ALL: &'static [Self] = &[Self::Arrival, Self::Departure];

    fn name(self) -> &'static str {
        match self {
            Self::Arrival => "ARRIVAL",
            Self::Departure => "DEPARTURE",
        }
    }

    fn code(self) -> &'static str {
        match self {
            Self::Arrival => "0",
            Self::Departure => "1",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LateDeclarationJustification {
    PowerOutage,
    EmployerSystemsUnavailable,
    ErganiSystemsUnavailable,
}

impl ErganiCode for LateDeclarationJustification {
    const FIELD: &'static str = "late_declaration_justification";
    const ALL: &'static [Self] = &[
        Self::PowerOutage,
        Self::EmployerSystemsUnavailable,
        Self::ErganiSystemsUnavailable,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::PowerOutage => "POWER_OUTAGE",
            Self::EmployerSystemsUnavailable => "EMPLOYER_SYSTEMS_UNAVAILABLE",
            Self::ErganiSystemsUnavailable => "ERGANI_SYSTEMS_UNAVAILABLE",
        }
    }

    fn code(self) -> &'static str {
        match self {
            Self::PowerOutage => "001",
            Self::EmployerSystemsUnavailable => "002",
            Self::ErganiSystemsUnavailable => "003",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OvertimeJustification {
    AccidentPreventionOrDamageRestoration,
    UrgentSeasonalTasks,
    ExceptionalWorkload,
    SupplementaryTasks,
    LostHoursSuddenCauses,
    LostHoursOfficialHolidays,
    LostHoursWeatherConditions,
    EmergencyClosureDay,
    NonWorkdayTasks,
}

impl ErganiCode for OvertimeJustification {
    const FIELD: &'static str = "overtime_justification";
    const ALL: &'static [Self] = &[
        Self::AccidentPreventionOrDamageRestoration,
        Self::UrgentSeasonalTasks,
        Self::ExceptionalWorkload,
        Self::SupplementaryTasks,
        Self::LostHoursSuddenCauses,
        Self::LostHoursOfficialHolidays,
        Self::LostHoursWeatherConditions,
        Self::EmergencyClosureDay,
        Self::NonWorkdayTasks,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::AccidentPreventionOrDamageRestoration => "ACCIDENT_PREVENTION_OR_DAMAGE_RESTORATION",
            Self::UrgentSeasonalTasks => "URGENT_SEASONAL_TASKS",
            Self::ExceptionalWorkload => "EXCEPTIONAL_WORKLOAD",
            Self::SupplementaryTasks => "SUPPLEMENTARY_TASKS",
            Self::LostHoursSuddenCauses => "LOST_HOURS_SUDDEN_CAUSES",
            Self::LostHoursOfficialHolidays => "LOST_HOURS_OFFICIAL_HOLIDAYS",
            Self::LostHoursWeatherConditions => "LOST_HOURS_WEATHER_CONDITIONS",
            Self::EmergencyClosureDay => "EMERGENCY_CLOSURE_DAY",
            Self::NonWorkdayTasks => "NON_WORKDAY_TASKS",
        }
    }

    fn code(self) -> &'static str {
        match self {
            Self::AccidentPreventionOrDamageRestoration => "001",
            Self::UrgentSeasonalTasks => "002",
            Self::ExceptionalWorkload => "003",
            Self::SupplementaryTasks => "004",
            Self::LostHoursSuddenCauses => "005",
            Self::LostHoursOfficialHolidays => "006",
            Self::LostHoursWeatherConditions => "007",
            Self::EmergencyClosureDay => "008",
            Self::NonWorkdayTasks => "009",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleWorkType {
    Absent,
    RestDay,
    WorkFromHome,
    WorkFromOffice,
}

impl ScheduleWorkType {
    /// Absence and rest days carry no working hours.
    pub fn requires_hours(self) -> bool {
        matches!(self, Self::WorkFromHome | Self::WorkFromOffice)
    }
}

impl ErganiCode for ScheduleWorkType {
    const FIELD: &'static str = "work_type";
    const ALL: &'static [Self] = &[
        Self::Absent,
        Self::RestDay,
        Self::WorkFromHome,
        Self::WorkFromOffice,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Absent => "ABSENT",
            Self::RestDay => "REST_DAY",
            Self::WorkFromHome => "WORK_FROM_HOME",
            Self::WorkFromOffice => "WORK_FROM_OFFICE",
        }
    }

    fn code(self) -> &'static str {
        match self {
            Self::WorkFromOffice => "ΕΡΓ",
            Self::WorkFromHome => "ΤΗΛ",
            Self::RestDay => "ΑΝ",
            Self::Absent => "ΜΕ",
        }
    }
}

impl fmt::Display for WorkCardMovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for LateDeclarationJustification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for OvertimeJustification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ScheduleWorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        assert_eq!(
            WorkCardMovementType::parse("ARRIVAL").unwrap(),
            WorkCardMovementType::Arrival
        );
        assert_eq!(
            ScheduleWorkType::parse(" WORK_FROM_HOME ").unwrap(),
            ScheduleWorkType::WorkFromHome
        );
        assert_eq!(
            OvertimeJustification::parse("NON_WORKDAY_TASKS").unwrap().code(),
            "009"
        );
    }

    #[test]
    fn test_parse_unknown_name_reports_field_and_allowed_set() {
        let err = LateDeclarationJustification::parse("TRAFFIC").unwrap_err();
        match err {
            ValidationError::InvalidCode { field, value, allowed } => {
                assert_eq!(field, "late_declaration_justification");
                assert_eq!(value, "TRAFFIC");
                assert_eq!(allowed.len(), 3);
                assert!(allowed.contains(&"POWER_OUTAGE".to_string()));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!(WorkCardMovementType::parse("arrival").is_err());
    }

    #[test]
    fn test_wire_codes() {
        assert_eq!(WorkCardMovementType::Arrival.code(), "0");
        assert_eq!(WorkCardMovementType::Departure.code(), "1");
        assert_eq!(ScheduleWorkType::WorkFromOffice.code(), "ΕΡΓ");
        assert_eq!(ScheduleWorkType::Absent.code(), "ΜΕ");
        assert_eq!(
            LateDeclarationJustification::ErganiSystemsUnavailable.code(),
            "003"
        );
    }

    #[test]
    fn test_overtime_codes_are_sequential() {
        let codes: Vec<&str> = OvertimeJustification::ALL.iter().map(|j| j.code()).collect();
        assert_eq!(
            codes,
            vec!["001", "002", "003", "004", "005", "006", "007", "008", "009"]
        );
    }

    #[test]
    fn test_requires_hours() {
        assert!(!ScheduleWorkType::Absent.requires_hours());
        assert!(!ScheduleWorkType::RestDay.requires_hours());
        assert!(ScheduleWorkType::WorkFromOffice.requires_hours());
    }
}
