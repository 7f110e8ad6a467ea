pub mod display;
pub mod error;
pub mod form;
pub mod render;
pub mod service;
pub mod workflow;

pub use error::{ServiceError, ValidationError, WorkflowError};
pub use form::{
    build_input_region, CreditAssignment, FieldValues, FormVariant, InputRegion,
    PriorityAssignment, SavePrioritiesRequest, SubmissionPayload,
};
pub use render::{
    render_rows, ErrorPolicy, GenerateResponse, RenderedGrid, ScheduleRow, ScheduleView,
    ABSENCE_MARKER, WEEKDAYS,
};
pub use service::{HttpScheduleService, ScheduleService};
pub use workflow::{
    FetchOutcome, Phase, Selection, SubmitOutcome, SubmitTarget, WorkflowConfig,
    WorkflowController, CREDITS_PAGE,
};
