pub mod fields;
pub mod payload;
pub mod validate;

pub use fields::{build_input_region, FieldValues, FormVariant, InputRegion};
pub use payload::{assemble, SavePrioritiesRequest, SubmissionPayload};
pub use validate::{collect_assignments, CreditAssignment, PriorityAssignment};
