use thiserror::Error;

/// A validation failure on a specific form field. Reported synchronously and
/// blocks submission; no request is issued while one of these is pending.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a unique priority between 1 and {max} for {subject}.")]
    PriorityOutOfRange { subject: String, max: usize },

    #[error("Priority {value} is already assigned. Each subject must have a unique priority.")]
    DuplicatePriority { value: u32 },

    #[error("You must assign all priorities uniquely from 1 to {expected}.")]
    IncompleteAssignment { expected: usize },

    #[error("Please enter a credit of at least 1 for {subject}.")]
    InvalidCredit { subject: String },

    /// No subjects are loaded for the current class and semester, so there is
    /// nothing to submit.
    #[error("No subjects are loaded for this class and semester.")]
    EmptyCatalog,
}

/// Failure of an outbound call to the timetable server.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("server returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Top-level outcome of one event-handler invocation. Every failure path ends
/// up here so the caller can surface it; nothing is fatal to the process.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Failed to fetch subjects for {class_name} ({semester}): {source}")]
    CatalogUnavailable {
        class_name: String,
        semester: String,
        source: ServiceError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to encode the form payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Failed to submit the form: {0}")]
    SubmitFailed(ServiceError),

    /// The server answered with an error body (e.g. an infeasible timetable).
    /// The message is surfaced verbatim.
    #[error("{0}")]
    ServerRejected(String),

    #[error("Failed to save priorities.")]
    SaveRejected,
}
