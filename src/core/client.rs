use crate::core::serialize;
use crate::domain::model::{DeclarationKind, SubmissionResponse};
use crate::domain::overtime::CompanyOvertime;
use crate::domain::ports::Transport;
use crate::domain::schedule::{CompanyDailySchedule, CompanyWeeklySchedule};
use crate::domain::work_card::CompanyWorkCard;
use crate::utils::error::{Result, ValidationError};
use reqwest::Method;

/// Submits declaration batches through a [`Transport`].
///
/// Each call is one atomic batch: it is validated and serialized in full,
/// then handed to the transport in a single request.
pub struct ErganiClient<T: Transport> {
    transport: T,
}

impl<T: Transport> ErganiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submits work card records (check-in, check-out).
    pub async fn submit_work_card(
        &self,
        company_work_cards: &[CompanyWorkCard],
    ) -> Result<Vec<SubmissionResponse>> {
        ensure_not_empty(DeclarationKind::WorkCard, company_work_cards)?;
        let payload = serialize::work_card_payload(company_work_cards);
        self.submit(DeclarationKind::WorkCard, company_work_cards.len(), &payload)
            .await
    }

    pub async fn submit_overtime(
        &self,
        company_overtimes: &[CompanyOvertime],
    ) -> Result<Vec<SubmissionResponse>> {
        ensure_not_empty(DeclarationKind::Overtime, company_overtimes)?;
        let payload = serialize::overtime_payload(company_overtimes);
        self.submit(DeclarationKind::Overtime, company_overtimes.len(), &payload)
            .await
    }

    pub async fn submit_daily_schedule(
        &self,
        company_daily_schedules: &[CompanyDailySchedule],
    ) -> Result<Vec<SubmissionResponse>> {
        ensure_not_empty(DeclarationKind::DailySchedule, company_daily_schedules)?;
        let payload = serialize::daily_schedule_payload(company_daily_schedules);
        self.submit(
            DeclarationKind::DailySchedule,
            company_daily_schedules.len(),
            &payload,
        )
        .await
    }

    pub async fn submit_weekly_schedule(
        &self,
        company_weekly_schedules: &[CompanyWeeklySchedule],
    ) -> Result<Vec<SubmissionResponse>> {
        ensure_not_empty(DeclarationKind::WeeklySchedule, company_weekly_schedules)?;
        let payload = serialize::weekly_schedule_payload(company_weekly_schedules);
        self.submit(
            DeclarationKind::WeeklySchedule,
            company_weekly_schedules.len(),
            &payload,
        )
        .await
    }

    async fn submit(
        &self,
        kind: DeclarationKind,
        envelopes: usize,
        payload: &serde_json::Value,
    ) -> Result<Vec<SubmissionResponse>> {
        tracing::info!(
            "📤 Submitting {} batch with {} envelope(s) to {}",
            kind.label(),
            envelopes,
            kind.endpoint()
        );

        let receipts = self
            .transport
            .send(kind.endpoint(), Method::POST, payload)
            .await?;

        tracing::info!("✅ Ergani accepted {} {} document(s)", receipts.len(), kind.label());
        Ok(receipts)
    }
}

fn ensure_not_empty<E>(kind: DeclarationKind, envelopes: &[E]) -> std::result::Result<(), ValidationError> {
    if envelopes.is_empty() {
        return Err(ValidationError::EmptyBatch {
            kind: kind.label().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::overtime::{CompanyOvertimeFields, Overtime, OvertimeFields};
    use crate::domain::work_card::{CompanyWorkCardFields, WorkCard, WorkCardFields};
    use crate::utils::error::{ErganiError, TransportError};
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveTime};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTransport {
        calls: Mutex<Vec<(String, Method, serde_json::Value)>>,
        fail_with_status: Option<u16>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(
            &self,
            endpoint: &str,
            method: Method,
            payload: &serde_json::Value,
        ) -> std::result::Result<Vec<SubmissionResponse>, TransportError> {
            self.calls
                .lock()
                .unwrap()
                .push((endpoint.to_string(), method, payload.clone()));

            if let Some(status) = self.fail_with_status {
                return Err(TransportError::Api {
                    status,
                    message: "rejected".to_string(),
                });
            }

            Ok(vec![SubmissionResponse {
                submission_id: "1".to_string(),
                protocol: "ΕΙΣ-1".to_string(),
                submission_date: NaiveDate::from_ymd_opt(2024, 1, 10)
                    .unwrap()
                    .and_hms_opt(9, 1, 0)
                    .unwrap(),
            }])
        }
    }

    fn company_work_card() -> CompanyWorkCard {
        let card = WorkCard::new(WorkCardFields {
            employee_tax_identification_number: "123456789".to_string(),
            employee_last_name: "Papadopoulos".to_string(),
            employee_first_name: "Maria".to_string(),
            work_card_movement_type: "ARRIVAL".to_string(),
            work_card_submission_date: "2024-01-10".parse().unwrap(),
            work_card_movement_datetime: "2024-01-10T09:00:00".parse().unwrap(),
            late_declaration_justification: None,
        })
        .unwrap();

        CompanyWorkCard::new(CompanyWorkCardFields {
            employer_tax_identification_number: "987654321".to_string(),
            business_branch_number: 0,
            comments: None,
            card_details: vec![card],
        })
        .unwrap()
    }

    fn company_overtime() -> CompanyOvertime {
        let overtime = Overtime::new(OvertimeFields {
            employee_tax_identification_number: "123456789".to_string(),
            employee_social_security_number: "01018012345".to_string(),
            employee_last_name: "Georgiou".to_string(),
            employee_first_name: "Nikos".to_string(),
            overtime_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            overtime_start_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            overtime_end_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            overtime_cancellation: false,
            employee_profession_code: "7212".to_string(),
            overtime_justification: "EXCEPTIONAL_WORKLOAD".to_string(),
            weekly_workdays_number: 5,
            asee_approval: None,
        })
        .unwrap();

        CompanyOvertime::new(CompanyOvertimeFields {
            business_branch_number: 0,
            sepe_service_code: "10000".to_string(),
            business_primary_activity_code: "4711".to_string(),
            business_secondary_activity_codes: vec![],
            business_branch_activity_code: "4711".to_string(),
            kallikratis_municipal_code: "9186".to_string(),
            legal_representative_tax_identification_number: "555555555".to_string(),
            employee_overtimes: vec![overtime],
            related_protocol_id: None,
            related_protocol_date: None,
            employer_organization: None,
            comments: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_empty_overtime_batch_never_reaches_transport() {
        let client = ErganiClient::new(RecordingTransport::default());

        let err = client.submit_overtime(&[]).await.unwrap_err();

        assert!(matches!(
            err,
            ErganiError::Validation(ValidationError::EmptyBatch { .. })
        ));
        assert!(client.transport().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_work_card_posts_to_work_card_endpoint() {
        let client = ErganiClient::new(RecordingTransport::default());
        let batch = vec![company_work_card(), company_work_card()];

        let receipts = client.submit_work_card(&batch).await.unwrap();

        assert_eq!(receipts.len(), 1);
        let calls = client.transport().calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "Documents/WRKCardSE");
        assert_eq!(calls[0].1, Method::POST);
        assert_eq!(calls[0].2, serialize::work_card_payload(&batch));
        assert_eq!(calls[0].2["Cards"]["Card"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_overtime_posts_to_overtime_endpoint() {
        let client = ErganiClient::new(RecordingTransport::default());

        tokio_test::block_on(client.submit_overtime(&[company_overtime()])).unwrap();

        let calls = client.transport().calls.lock().unwrap();
        assert_eq!(calls[0].0, "Documents/OvTime");
        assert!(calls[0].2["Overtimes"]["Overtime"].is_array());
    }

    #[tokio::test]
    async fn test_transport_error_is_propagated_unchanged() {
        let client = ErganiClient::new(RecordingTransport {
            fail_with_status: Some(503),
            ..Default::default()
        });

        let err = client.submit_work_card(&[company_work_card()]).await.unwrap_err();

        match err {
            ErganiError::Transport(TransportError::Api { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "rejected");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(client.transport().calls.lock().unwrap().len(), 1);
    }
}
