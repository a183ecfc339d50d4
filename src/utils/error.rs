use thiserror::Error;

/// Raised while constructing a domain entity. Nothing has touched the
/// network when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value '{value}' for {field}. Allowed values: {}", .allowed.join(", "))]
    InvalidCode {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("Invalid time range for {field}: end {end} must be after start {start}")]
    InvalidTimeRange {
        field: String,
        start: String,
        end: String,
    },

    #[error("Invalid date range for {field}: end {end} must be after start {start}")]
    InvalidDateRange {
        field: String,
        start: String,
        end: String,
    },

    #[error(
        "Late declaration justification requires a back-dated movement (movement {movement}, submission {submission})"
    )]
    LateJustificationNotAllowed { movement: String, submission: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    OutOfRange {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{field} must contain at least one entry")]
    EmptyList { field: String },

    #[error("Cannot submit an empty {kind} batch")]
    EmptyBatch { kind: String },
}

impl ValidationError {
    /// Name of the field the error refers to, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::InvalidCode { field, .. }
            | ValidationError::InvalidTimeRange { field, .. }
            | ValidationError::InvalidDateRange { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::EmptyList { field } => Some(field.as_str()),
            ValidationError::LateJustificationNotAllowed { .. } => {
                Some("late_declaration_justification")
            }
            ValidationError::EmptyBatch { .. } => None,
        }
    }
}

/// Failures of the HTTP collaborator, passed to the caller untouched.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Authentication failed. Status code {status}. Error message: {message}")]
    Authentication { status: u16, message: String },

    #[error("Status code {status}. Error message: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response from Ergani: {message}")]
    InvalidResponse { message: String },
}

#[derive(Error, Debug)]
pub enum ErganiError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Configuration error in {field}: {message}")]
    Config { field: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ErganiError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ErganiError::Validation(_) => 2,
            ErganiError::Config { .. } => 3,
            ErganiError::Transport(TransportError::Authentication { .. }) => 4,
            ErganiError::Transport(_) => 5,
            _ => 1,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ErganiError::Validation(_) => "Fix the reported field in the input file and submit again",
            ErganiError::Config { .. } => "Check the configuration file and the environment variables it references",
            ErganiError::Transport(TransportError::Authentication { .. }) => {
                "Verify the Ergani username and password"
            }
            ErganiError::Transport(TransportError::Api { status, .. }) if *status >= 500 => {
                "The Ergani service is unavailable, try again later"
            }
            ErganiError::Transport(_) => "Check network connectivity and the configured base_url",
            ErganiError::Io(_) => "Check that the file exists and is readable",
            ErganiError::Serialization(_) => "Check that the input file is valid JSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, ErganiError>;
