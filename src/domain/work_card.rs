use crate::domain::codes::{ErganiCode, LateDeclarationJustification, WorkCardMovementType};
use crate::domain::model::{non_blank, Employee};
use crate::utils::error::ValidationError;
use crate::utils::validation::{require_entries, require_text};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// Caller-supplied fields of a work card movement.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkCardFields {
    pub employee_tax_identification_number: String,
    pub employee_last_name: String,
    pub employee_first_name: String,
    pub work_card_movement_type: String,
    pub work_card_submission_date: NaiveDate,
    pub work_card_movement_datetime: NaiveDateTime,
    #[serde(default)]
    pub late_declaration_justification: Option<String>,
}

/// An employee arrival or departure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkCard {
    employee: Employee,
    movement_type: WorkCardMovementType,
    submission_date: NaiveDate,
    movement_datetime: NaiveDateTime,
    late_declaration_justification: Option<LateDeclarationJustification>,
}

impl WorkCard {
    pub fn new(fields: WorkCardFields) -> Result<Self, ValidationError> {
        let employee = Employee::new(
            &fields.employee_tax_identification_number,
            &fields.employee_last_name,
            &fields.employee_first_name,
        )?;
        let movement_type = WorkCardMovementType::parse(&fields.work_card_movement_type)?;
        let late_declaration_justification = non_blank(fields.late_declaration_justification)
            .map(|code| LateDeclarationJustification::parse(&code))
            .transpose()?;

        // Naive timestamps: lateness compares calendar dates only.
        let is_late = fields.work_card_movement_datetime.date() < fields.work_card_submission_date;
        if late_declaration_justification.is_some() && !is_late {
            return Err(ValidationError::LateJustificationNotAllowed {
                movement: fields.work_card_movement_datetime.to_string(),
                submission: fields.work_card_submission_date.to_string(),
            });
        }

        Ok(Self {
            employee,
            movement_type,
            submission_date: fields.work_card_submission_date,
            movement_datetime: fields.work_card_movement_datetime,
            late_declaration_justification,
        })
    }

    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    pub fn movement_type(&self) -> WorkCardMovementType {
        self.movement_type
    }

    pub fn submission_date(&self) -> NaiveDate {
        self.submission_date
    }

    pub fn movement_datetime(&self) -> NaiveDateTime {
        self.movement_datetime
    }

    pub fn late_declaration_justification(&self) -> Option<LateDeclarationJustification> {
        self.late_declaration_justification
    }

    /// True when the movement is declared after the day it happened.
    pub fn is_late_declaration(&self) -> bool {
        self.movement_datetime.date() < self.submission_date
    }
}

impl TryFrom<WorkCardFields> for WorkCard {
    type Error = ValidationError;

    fn try_from(fields: WorkCardFields) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}

#[derive(Debug, Clone)]
pub struct CompanyWorkCardFields {
    pub employer_tax_identification_number: String,
    pub business_branch_number: u32,
    pub comments: Option<String>,
    pub card_details: Vec<WorkCard>,
}

/// Work card movements of one employer branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyWorkCard {
    employer_tax_identification_number: String,
    business_branch_number: u32,
    comments: Option<String>,
    card_details: Vec<WorkCard>,
}

impl CompanyWorkCard {
    pub fn new(fields: CompanyWorkCardFields) -> Result<Self, ValidationError> {
        require_text(
            "employer_tax_identification_number",
            &fields.employer_tax_identification_number,
        )?;
        require_entries("card_details", &fields.card_details)?;

        Ok(Self {
            employer_tax_identification_number: fields.employer_tax_identification_number.trim().to_string(),
            business_branch_number: fields.business_branch_number,
            comments: non_blank(fields.comments),
            card_details: fields.card_details,
        })
    }

    pub fn employer_tax_identification_number(&self) -> &str {
        &self.employer_tax_identification_number
    }

    pub fn business_branch_number(&self) -> u32 {
        self.business_branch_number
    }

    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    pub fn card_details(&self) -> &[WorkCard] {
        &self.card_details
    }
}

impl TryFrom<CompanyWorkCardFields> for CompanyWorkCard {
    type Error = ValidationError;

    fn try_from(fields: CompanyWorkCardFields) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(movement: &str, submission: &str, at: &str) -> WorkCardFields {
        WorkCardFields {
            employee_tax_identification_number: "123456789".to_string(),
            employee_last_name: "Papadopoulos".to_string(),
            employee_first_name: "Maria".to_string(),
            work_card_movement_type: movement.to_string(),
            work_card_submission_date: submission.parse().unwrap(),
            work_card_movement_datetime: at.parse().unwrap(),
            late_declaration_justification: None,
        }
    }

    #[test]
    fn test_arrival_on_the_same_day() {
        let card = WorkCard::new(fields("ARRIVAL", "2024-01-10", "2024-01-10T09:00:00")).unwrap();
        assert_eq!(card.movement_type(), WorkCardMovementType::Arrival);
        assert!(!card.is_late_declaration());
        assert_eq!(card.late_declaration_justification(), None);
    }

    #[test]
    fn test_unknown_movement_type() {
        let err = WorkCard::new(fields("BREAK", "2024-01-10", "2024-01-10T09:00:00")).unwrap_err();
        assert_eq!(err.field(), Some("work_card_movement_type"));
    }

    #[test]
    fn test_justification_on_back_dated_movement() {
        let mut input = fields("DEPARTURE", "2024-01-11", "2024-01-10T17:00:00");
        input.late_declaration_justification = Some("POWER_OUTAGE".to_string());

        let card = WorkCard::new(input).unwrap();
        assert!(card.is_late_declaration());
        assert_eq!(
            card.late_declaration_justification(),
            Some(LateDeclarationJustification::PowerOutage)
        );
    }

    #[test]
    fn test_justification_rejected_when_not_late() {
        let mut input = fields("ARRIVAL", "2024-01-10", "2024-01-10T09:00:00");
        input.late_declaration_justification = Some("ERGANI_SYSTEMS_UNAVAILABLE".to_string());

        let err = WorkCard::new(input).unwrap_err();
        assert!(matches!(err, ValidationError::LateJustificationNotAllowed { .. }));
    }

    #[test]
    fn test_blank_justification_is_ignored() {
        let mut input = fields("ARRIVAL", "2024-01-10", "2024-01-10T09:00:00");
        input.late_declaration_justification = Some(String::new());

        assert!(WorkCard::new(input).is_ok());
    }

    #[test]
    fn test_company_requires_cards() {
        let err = CompanyWorkCard::new(CompanyWorkCardFields {
            employer_tax_identification_number: "987654321".to_string(),
            business_branch_number: 0,
            comments: None,
            card_details: vec![],
        })
        .unwrap_err();

        assert_eq!(
            err,
            ValidationError::EmptyList {
                field: "card_details".to_string()
            }
        );
    }

    #[test]
    fn test_fields_from_json_then_validated() {
        let json = serde_json::json!({
            "employee_tax_identification_number": "123456789",
            "employee_last_name": "Papadopoulos",
            "employee_first_name": "Maria",
            "work_card_movement_type": "LUNCH",
            "work_card_submission_date": "2024-01-10",
            "work_card_movement_datetime": "2024-01-10T09:00:00"
        });

        let fields: WorkCardFields = serde_json::from_value(json).unwrap();
        assert_eq!(fields.late_declaration_justification, None);

        let err = WorkCard::try_from(fields).unwrap_err();
        assert_eq!(err.field(), Some("work_card_movement_type"));
    }
}
