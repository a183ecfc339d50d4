pub mod batch;
pub mod client;
pub mod input;
pub mod serialize;

pub use crate::domain::model::{DeclarationKind, SubmissionResponse};
pub use crate::domain::ports::Transport;
pub use crate::utils::error::Result;
