pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::http::HttpTransport;
pub use config::{ClientConfig, FileConfig, LoggingConfig};
pub use crate::core::{batch::DeclarationBatch, client::ErganiClient};
pub use domain::codes::{
    ErganiCode, LateDeclarationJustification, OvertimeJustification, ScheduleWorkType,
    WorkCardMovementType,
};
pub use domain::model::{DeclarationKind, SubmissionResponse};
pub use domain::overtime::{CompanyOvertime, CompanyOvertimeFields, Overtime, OvertimeFields};
pub use domain::ports::Transport;
pub use domain::schedule::{
    CompanyDailySchedule, CompanyDailyScheduleFields, CompanyWeeklySchedule,
    CompanyWeeklyScheduleFields, EmployeeDailySchedule, EmployeeScheduleFields,
    EmployeeWeeklySchedule, WorkdayDetails, WorkdayDetailsFields,
};
pub use domain::work_card::{CompanyWorkCard, CompanyWorkCardFields, WorkCard, WorkCardFields};
pub use utils::error::{ErganiError, Result, TransportError, ValidationError};
